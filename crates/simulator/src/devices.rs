//! Simulated player, Wi-Fi, time zone table and sensors.

use std::net::Ipv4Addr;

use embassy_time::{Duration, Instant, Timer};
use platform::{
    AccessPoint, AudioPlayer, AuthMode, Ipv4Info, Network, NetworkError, NetworkInfo, PlayerError, Sensors,
    SensorError, SoundEffect, LightGain, TrackTags, ZoneDb,
};

/// Pretends to play: each track "plays" for a fixed time.
pub struct SimPlayer {
    track_len: Duration,
    ends_at: Option<Instant>,
}

impl SimPlayer {
    pub fn new(track_len: Duration) -> Self {
        Self { track_len, ends_at: None }
    }
}

/// Tags derived from the file name: `Game - Track.vgm`.
pub fn tags_for(path: &str) -> TrackTags {
    let file = path.rsplit('/').next().unwrap_or(path);
    let stem = file.rsplit_once('.').map_or(file, |(stem, _)| stem);
    match stem.split_once(" - ") {
        Some((game, track)) => TrackTags {
            game_name: Some(game.trim().into()),
            track_name: Some(track.trim().into()),
            ..TrackTags::default()
        },
        None => TrackTags { track_name: Some(stem.into()), ..TrackTags::default() },
    }
}

impl AudioPlayer for SimPlayer {
    async fn play_file(&mut self, path: &str) -> Result<TrackTags, PlayerError> {
        if self.ends_at.is_some() {
            return Err(PlayerError::Busy);
        }
        tracing::info!(path, "playing");
        self.ends_at = Some(Instant::now().checked_add(self.track_len).unwrap_or(Instant::MAX));
        Ok(tags_for(path))
    }

    fn stop(&mut self) {
        if self.ends_at.take().is_some() {
            tracing::info!("playback stopped");
        }
    }

    async fn wait_finished(&mut self) {
        if let Some(ends_at) = self.ends_at {
            Timer::at(ends_at).await;
            self.ends_at = None;
        }
    }

    fn play_effect(&mut self, effect: SoundEffect) {
        let name = match effect {
            SoundEffect::Chime => "chime",
            SoundEffect::Blip => "blip",
            SoundEffect::Credit => "credit",
        };
        tracing::info!(effect = name, "sound effect");
    }
}

/// A few fixed networks; connecting always succeeds.
pub struct SimNetwork {
    access_points: Vec<AccessPoint>,
    connected: Option<String>,
}

fn access_point(ssid: &str, last: u8, rssi: i8, auth: AuthMode) -> Option<AccessPoint> {
    Some(AccessPoint {
        ssid: heapless::String::try_from(ssid).ok()?,
        bssid: [0x02, 0x00, 0x5E, 0x10, 0x00, last],
        rssi,
        auth,
    })
}

impl Default for SimNetwork {
    fn default() -> Self {
        let access_points = [
            access_point("Home", 0x01, -48, AuthMode::Wpa2Psk),
            access_point("Coffee Shop Guest", 0x02, -67, AuthMode::Open),
            access_point("", 0x03, -70, AuthMode::WpaWpa2Psk),
            access_point("Office", 0x04, -81, AuthMode::Wpa2Enterprise),
        ]
        .into_iter()
        .flatten()
        .collect();
        Self { access_points, connected: None }
    }
}

impl Network for SimNetwork {
    async fn scan(&mut self) -> Result<Vec<AccessPoint>, NetworkError> {
        Timer::after_millis(500).await;
        Ok(self.access_points.clone())
    }

    async fn connect(&mut self, ssid: &str, _password: &str) -> Result<(), NetworkError> {
        if !self.access_points.iter().any(|ap| ap.ssid.as_str() == ssid) {
            return Err(NetworkError::ConnectFailed);
        }
        tracing::info!(ssid, "connected");
        self.connected = Some(ssid.into());
        Ok(())
    }

    fn station_info(&self) -> NetworkInfo {
        NetworkInfo {
            mac: Some([0x02, 0x00, 0x5E, 0x00, 0x00, 0x01]),
            ipv4: self.connected.as_ref().map(|_| Ipv4Info {
                ip: Ipv4Addr::new(192, 168, 4, 20),
                netmask: Ipv4Addr::new(255, 255, 255, 0),
                gateway: Ipv4Addr::new(192, 168, 4, 1),
            }),
        }
    }
}

/// Zone table, grouped by region.
const ZONES: &[(&str, &str)] = &[
    ("America/Chicago", "CST6CDT,M3.2.0,M11.1.0"),
    ("America/Denver", "MST7MDT,M3.2.0,M11.1.0"),
    ("America/Los_Angeles", "PST8PDT,M3.2.0,M11.1.0"),
    ("America/New_York", "EST5EDT,M3.2.0,M11.1.0"),
    ("Asia/Kolkata", "IST-5:30"),
    ("Asia/Tokyo", "JST-9"),
    ("Australia/Sydney", "AEST-10AEDT,M10.1.0,M4.1.0/3"),
    ("Europe/Berlin", "CET-1CEST,M3.5.0,M10.5.0/3"),
    ("Europe/London", "GMT0BST,M3.5.0/1,M10.5.0"),
    ("Pacific/Honolulu", "HST10"),
];

/// Built-in zone table.
pub struct SimZones;

impl ZoneDb for SimZones {
    fn region_list(&self) -> Option<String> {
        let mut regions: Vec<&str> = ZONES.iter().filter_map(|(z, _)| z.split_once('/')).map(|(r, _)| r).collect();
        regions.dedup();
        Some(regions.join("\n"))
    }

    fn zone_list(&self, region: &str) -> Option<String> {
        let zones: Vec<&str> = ZONES
            .iter()
            .filter_map(|(z, _)| z.split_once('/'))
            .filter(|(r, _)| *r == region)
            .map(|(_, city)| city)
            .collect();
        (!zones.is_empty()).then(|| zones.join("\n"))
    }

    fn posix_tz(&self, zone: &str) -> Option<&str> {
        ZONES.iter().find(|(z, _)| *z == zone).map(|(_, tz)| *tz)
    }
}

/// Slowly drifting readings so the live screens have something to show.
#[derive(Default)]
pub struct SimSensors {
    reads: u16,
}

impl SimSensors {
    fn drift(&mut self, span: u16) -> u16 {
        self.reads = self.reads.wrapping_add(1);
        self.reads.checked_rem(span).unwrap_or(0)
    }
}

impl Sensors for SimSensors {
    fn touch_pad_raw(&mut self) -> Result<u16, SensorError> {
        Ok(1180_u16.saturating_add(self.drift(40)))
    }

    fn ambient_light_raw(&mut self, gain: LightGain) -> Result<u16, SensorError> {
        let base: u16 = match gain {
            LightGain::Db0 => 620,
            LightGain::Db2_5 => 480,
        };
        Ok(base.saturating_add(self.drift(16)))
    }

    fn volume_raw(&mut self) -> Result<u16, SensorError> {
        Ok(self.drift(4096))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_from_file_name() {
        let tags = tags_for("/sdcard/NES/Mega Man 2 - Dr. Wily Stage 1.vgz");
        assert_eq!(tags.game_name.as_deref(), Some("Mega Man 2"));
        assert_eq!(tags.track_name.as_deref(), Some("Dr. Wily Stage 1"));
        assert_eq!(tags_for("/sdcard/intro.vgm").track_name.as_deref(), Some("intro"));
    }

    #[test]
    fn test_zone_table_lists() {
        assert_eq!(SimZones.region_list().unwrap(), "America\nAsia\nAustralia\nEurope\nPacific");
        assert_eq!(SimZones.zone_list("Asia").unwrap(), "Kolkata\nTokyo");
        assert_eq!(SimZones.posix_tz("Asia/Tokyo"), Some("JST-9"));
        assert!(SimZones.zone_list("Antarctica").is_none());
    }

    #[tokio::test]
    async fn test_stop_ends_track() {
        let mut player = SimPlayer::new(Duration::from_secs(3600));
        player.play_file("/sdcard/a.vgm").await.unwrap();
        assert_eq!(player.play_file("/sdcard/b.vgm").await, Err(PlayerError::Busy));
        player.stop();
        player.wait_finished().await;
        assert!(player.play_file("/sdcard/b.vgm").await.is_ok());
    }

    #[tokio::test]
    async fn test_connect_brings_interface_up() {
        let mut net = SimNetwork::default();
        assert!(net.station_info().ipv4.is_none());
        assert_eq!(net.connect("Nowhere", "").await, Err(NetworkError::ConnectFailed));
        net.connect("Home", "hunter22").await.unwrap();
        assert!(net.station_info().ipv4.is_some());
    }
}
