//! Mock implementations for testing
//!
//! This module provides mock implementations of all platform traits
//! for use in unit and integration tests.

#![cfg(any(test, feature = "std"))]

use std::collections::BTreeMap;
use std::string::{String, ToString};
use std::vec::Vec;

use crate::*;

/// One recorded call on [`MockDisplay`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayCall {
    /// `clear()`
    Clear,
    /// `draw_selection_list()`
    SelectionList {
        /// Title
        title: String,
        /// Serialized options
        options: String,
        /// Highlighted ordinal
        highlighted: u16,
    },
    /// `draw_message()`
    Message {
        /// Title
        title: String,
        /// Optional second line
        subtitle: Option<String>,
        /// Body text
        body: String,
        /// Serialized buttons
        buttons: String,
        /// Highlighted button
        highlighted: u16,
    },
    /// `draw_static_list()`
    StaticList {
        /// Title
        title: String,
        /// Body lines
        body: String,
    },
    /// `draw_value_input()`
    ValueInput {
        /// Title
        title: String,
        /// Value shown
        value: u8,
    },
    /// `draw_time_input()`
    TimeInput {
        /// Title
        title: String,
        /// Hour shown
        hour: u8,
        /// Minute shown
        minute: u8,
        /// Field under the cursor
        field: TimeField,
    },
    /// `draw_text_input()`
    TextInput {
        /// Title
        title: String,
        /// Committed text
        text: String,
        /// Character under the wheel
        pending: char,
    },
    /// `draw_clock()`
    Clock(ClockState),
    /// `draw_test_pattern()`
    TestPattern(bool),
    /// `draw_logo()`
    Logo,
}

/// Mock display that records every call
pub struct MockDisplay {
    calls: Vec<DisplayCall>,
    contrast: u8,
}

impl MockDisplay {
    /// Create new mock display
    pub fn new() -> Self {
        Self { calls: Vec::new(), contrast: 0x80 }
    }

    /// Every call so far, oldest first
    pub fn calls(&self) -> &[DisplayCall] {
        &self.calls
    }

    /// Forget recorded calls
    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    /// Number of clock faces drawn
    pub fn clock_draws(&self) -> usize {
        self.calls.iter().filter(|c| matches!(c, DisplayCall::Clock(_))).count()
    }

    /// Most recent clock face
    pub fn last_clock(&self) -> Option<ClockState> {
        self.calls.iter().rev().find_map(|c| match c {
            DisplayCall::Clock(state) => Some(*state),
            _ => None,
        })
    }

    /// Titles of every selection list drawn, in order (repeats included)
    pub fn list_titles(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DisplayCall::SelectionList { title, .. } => Some(title.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Serialized options of the most recent selection list titled `title`
    pub fn last_list(&self, title: &str) -> Option<&str> {
        self.calls.iter().rev().find_map(|c| match c {
            DisplayCall::SelectionList { title: t, options, .. } if t == title => {
                Some(options.as_str())
            }
            _ => None,
        })
    }

    /// Bodies of every message box drawn, in order
    pub fn message_bodies(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DisplayCall::Message { body, .. } => Some(body.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Default for MockDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl MenuDisplay for MockDisplay {
    fn clear(&mut self) {
        self.calls.push(DisplayCall::Clear);
    }

    fn draw_selection_list(&mut self, title: &str, options: &str, highlighted: u16) {
        self.calls.push(DisplayCall::SelectionList {
            title: title.to_string(),
            options: options.to_string(),
            highlighted,
        });
    }

    fn draw_message(
        &mut self,
        title: &str,
        subtitle: Option<&str>,
        body: &str,
        buttons: &str,
        highlighted: u16,
    ) {
        self.calls.push(DisplayCall::Message {
            title: title.to_string(),
            subtitle: subtitle.map(ToString::to_string),
            body: body.to_string(),
            buttons: buttons.to_string(),
            highlighted,
        });
    }

    fn draw_static_list(&mut self, title: &str, body: &str) {
        self.calls.push(DisplayCall::StaticList { title: title.to_string(), body: body.to_string() });
    }

    fn draw_value_input(&mut self, title: &str, value: u8) {
        self.calls.push(DisplayCall::ValueInput { title: title.to_string(), value });
    }

    fn draw_time_input(&mut self, title: &str, hour: u8, minute: u8, field: TimeField) {
        self.calls.push(DisplayCall::TimeInput { title: title.to_string(), hour, minute, field });
    }

    fn draw_text_input(&mut self, title: &str, text: &str, pending: char) {
        self.calls.push(DisplayCall::TextInput {
            title: title.to_string(),
            text: text.to_string(),
            pending,
        });
    }

    fn draw_clock(&mut self, state: &ClockState) {
        self.calls.push(DisplayCall::Clock(*state));
    }

    fn draw_test_pattern(&mut self, inverted: bool) {
        self.calls.push(DisplayCall::TestPattern(inverted));
    }

    fn draw_logo(&mut self) {
        self.calls.push(DisplayCall::Logo);
    }

    fn contrast(&self) -> u8 {
        self.contrast
    }

    fn set_contrast(&mut self, contrast: u8) {
        self.contrast = contrast;
    }
}

/// Mock input device
///
/// Once the scripted events run out it behaves like an idle user: every wait
/// stays pending, so the menu timeout fires.
pub struct MockInput {
    script: heapless::Deque<Scripted, 64>,
}

#[derive(Debug, Clone, Copy)]
enum Scripted {
    Event(InputEvent),
    /// No input until this much time has passed since the entry was reached.
    Quiet(embassy_time::Duration),
    /// A quiet gap that has started; input resumes at the deadline.
    QuietUntil(embassy_time::Instant),
}

impl MockInput {
    /// Create new mock input
    pub fn new() -> Self {
        Self {
            script: heapless::Deque::new(),
        }
    }

    /// Create with a script of button presses
    pub fn with_presses(buttons: &[Button]) -> Self {
        let mut input = Self::new();
        for &button in buttons {
            // Scripts longer than the queue are a test bug; drop the tail.
            let _ = input.add_event(InputEvent::ButtonPress(button));
        }
        input
    }

    /// Add event to queue
    pub fn add_event(&mut self, event: InputEvent) -> Result<(), InputEvent> {
        self.script.push_back(Scripted::Event(event)).map_err(|_| event)
    }

    /// Queue a press and its release
    pub fn click(&mut self, button: Button) {
        let _ = self.add_event(InputEvent::ButtonPress(button));
        let _ = self.add_event(InputEvent::ButtonRelease(button));
    }

    /// Stay silent for `gap` once the events queued so far are consumed
    pub fn quiet(&mut self, gap: embassy_time::Duration) {
        let _ = self.script.push_back(Scripted::Quiet(gap));
    }

    /// Number of events not consumed yet
    pub fn pending(&self) -> usize {
        self.script.iter().filter(|s| matches!(s, Scripted::Event(_))).count()
    }

    /// Clear all events
    pub fn clear(&mut self) {
        self.script.clear();
    }

    /// Next event if one is due, arming quiet gaps on the way.
    fn next_due(&mut self) -> Option<InputEvent> {
        loop {
            let now = embassy_time::Instant::now();
            let front = self.script.front_mut()?;
            match *front {
                Scripted::Event(event) => {
                    self.script.pop_front();
                    return Some(event);
                }
                Scripted::Quiet(gap) => {
                    *front = Scripted::QuietUntil(now.checked_add(gap).unwrap_or(embassy_time::Instant::MAX));
                }
                Scripted::QuietUntil(deadline) if now < deadline => return None,
                Scripted::QuietUntil(_) => {
                    self.script.pop_front();
                }
            }
        }
    }
}

impl Default for MockInput {
    fn default() -> Self {
        Self::new()
    }
}

impl InputDevice for MockInput {
    async fn wait_for_event(&mut self) -> InputEvent {
        loop {
            if let Some(event) = self.next_due() {
                return event;
            }
            embassy_time::Timer::after_millis(1).await;
        }
    }

    fn poll_event(&mut self) -> Option<InputEvent> {
        self.next_due()
    }

    fn clear_events(&mut self) {
        // Scripted events are the test's input, not stale hardware state.
    }
}

/// Mock SD card backed by an in-memory directory map
pub struct MockStorage {
    dirs: BTreeMap<String, Vec<DirEntry>>,
    detected: bool,
    mounted: bool,
    reads: Vec<String>,
}

impl MockStorage {
    /// Empty, detected and mounted card
    pub fn new() -> Self {
        Self { dirs: BTreeMap::new(), detected: true, mounted: true, reads: Vec::new() }
    }

    /// Register a directory and its entries
    pub fn with_dir(mut self, path: &str, entries: Vec<DirEntry>) -> Self {
        self.dirs.insert(path.to_string(), entries);
        self
    }

    /// Simulate card-detect and mount state
    pub fn with_state(mut self, detected: bool, mounted: bool) -> Self {
        self.detected = detected;
        self.mounted = mounted;
        self
    }

    /// Paths passed to `read_dir`, in order
    pub fn reads(&self) -> &[String] {
        &self.reads
    }
}

impl Default for MockStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl Storage for MockStorage {
    async fn read_dir(&mut self, path: &str) -> Result<Vec<DirEntry>, StorageError> {
        self.reads.push(path.to_string());
        if !self.detected || !self.mounted {
            return Err(StorageError::Io);
        }
        self.dirs.get(path).cloned().ok_or(StorageError::NotFound)
    }

    fn is_detected(&self) -> bool {
        self.detected
    }

    fn is_mounted(&self) -> bool {
        self.mounted
    }
}

/// Mock RTC
pub struct MockRtc {
    /// Value returned by `now()`
    pub now: Result<WallTime, RtcError>,
    /// Last POSIX TZ applied
    pub time_zone: Option<String>,
    /// Calibration output starts requested
    pub calibration_starts: usize,
    /// Trims passed to `reinit()`
    pub reinits: Vec<RtcTrim>,
}

impl MockRtc {
    /// RTC reporting `now`
    pub fn new(now: WallTime) -> Self {
        Self { now: Ok(now), time_zone: None, calibration_starts: 0, reinits: Vec::new() }
    }
}

impl Default for MockRtc {
    fn default() -> Self {
        Self::new(WallTime { hour: 7, minute: 30 })
    }
}

impl Rtc for MockRtc {
    fn now(&mut self) -> Result<WallTime, RtcError> {
        self.now
    }

    fn set_time_zone(&mut self, posix_tz: &str) {
        self.time_zone = Some(posix_tz.to_string());
    }

    fn start_calibration_output(&mut self) -> Result<(), RtcError> {
        self.calibration_starts = self.calibration_starts.saturating_add(1);
        Ok(())
    }

    fn reinit(&mut self, trim: RtcTrim) -> Result<(), RtcError> {
        self.reinits.push(trim);
        Ok(())
    }
}

/// Mock SNTP client
#[derive(Default)]
pub struct MockTimeSync {
    /// Current server
    pub server: Option<String>,
}

impl TimeSync for MockTimeSync {
    fn server_name(&self) -> Option<&str> {
        self.server.as_deref()
    }

    fn set_server_name(&mut self, hostname: &str) {
        self.server = Some(hostname.to_string());
    }
}

/// In-memory settings store
pub struct MockSettings {
    /// Alarm time
    pub alarm_time: WallTime,
    /// 24-hour format
    pub twenty_four: bool,
    /// Time zone name
    pub time_zone: Option<String>,
    /// NTP hostname
    pub ntp_server: Option<String>,
    /// RTC trim
    pub rtc_trim: RtcTrim,
    /// Make every write fail
    pub read_only: bool,
}

impl Default for MockSettings {
    fn default() -> Self {
        Self {
            alarm_time: WallTime { hour: 6, minute: 45 },
            twenty_four: false,
            time_zone: None,
            ntp_server: None,
            rtc_trim: RtcTrim::DISABLED,
            read_only: false,
        }
    }
}

impl MockSettings {
    fn writable(&self) -> Result<(), SettingsError> {
        if self.read_only {
            Err(SettingsError::WriteFailed)
        } else {
            Ok(())
        }
    }
}

impl Settings for MockSettings {
    fn alarm_time(&self) -> Result<WallTime, SettingsError> {
        Ok(self.alarm_time)
    }

    fn set_alarm_time(&mut self, time: WallTime) -> Result<(), SettingsError> {
        self.writable()?;
        self.alarm_time = time;
        Ok(())
    }

    fn time_format(&self) -> Result<bool, SettingsError> {
        Ok(self.twenty_four)
    }

    fn set_time_format(&mut self, twenty_four: bool) -> Result<(), SettingsError> {
        self.writable()?;
        self.twenty_four = twenty_four;
        Ok(())
    }

    fn time_zone(&self) -> Result<String, SettingsError> {
        self.time_zone.clone().ok_or(SettingsError::NotFound)
    }

    fn set_time_zone(&mut self, zone: &str) -> Result<(), SettingsError> {
        self.writable()?;
        self.time_zone = Some(zone.to_string());
        Ok(())
    }

    fn ntp_server(&self) -> Result<String, SettingsError> {
        self.ntp_server.clone().ok_or(SettingsError::NotFound)
    }

    fn set_ntp_server(&mut self, hostname: &str) -> Result<(), SettingsError> {
        self.writable()?;
        self.ntp_server = Some(hostname.to_string());
        Ok(())
    }

    fn rtc_trim(&self) -> Result<RtcTrim, SettingsError> {
        Ok(self.rtc_trim)
    }

    fn set_rtc_trim(&mut self, trim: RtcTrim) -> Result<(), SettingsError> {
        self.writable()?;
        self.rtc_trim = trim;
        Ok(())
    }
}

/// Mock music player
pub struct MockPlayer {
    /// Tags reported for every file
    pub tags: TrackTags,
    /// Files started, in order
    pub played: Vec<String>,
    /// Effects played, in order
    pub effects: Vec<SoundEffect>,
    /// Number of `stop()` calls
    pub stops: usize,
    /// Finish tracks immediately instead of waiting for `stop()`
    pub auto_finish: bool,
    playing: bool,
}

impl MockPlayer {
    /// Player whose tracks end only when stopped
    pub fn new() -> Self {
        Self {
            tags: TrackTags::default(),
            played: Vec::new(),
            effects: Vec::new(),
            stops: 0,
            auto_finish: false,
            playing: false,
        }
    }

    /// Player whose tracks end as soon as they start
    pub fn auto_finishing() -> Self {
        Self { auto_finish: true, ..Self::new() }
    }
}

impl Default for MockPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioPlayer for MockPlayer {
    async fn play_file(&mut self, path: &str) -> Result<TrackTags, PlayerError> {
        self.played.push(path.to_string());
        self.playing = !self.auto_finish;
        Ok(self.tags.clone())
    }

    fn stop(&mut self) {
        self.stops = self.stops.saturating_add(1);
        self.playing = false;
    }

    async fn wait_finished(&mut self) {
        while self.playing {
            embassy_time::Timer::after_millis(1).await;
        }
    }

    fn play_effect(&mut self, effect: SoundEffect) {
        self.effects.push(effect);
    }
}

/// Mock Wi-Fi station
#[derive(Default)]
pub struct MockNetwork {
    /// Scan result; `None` makes the scan fail
    pub access_points: Option<Vec<AccessPoint>>,
    /// `(ssid, password)` of every connect attempt
    pub connects: Vec<(String, String)>,
    /// Reject connect attempts
    pub refuse: bool,
    /// Reported interface details
    pub info: NetworkInfo,
}

impl Network for MockNetwork {
    async fn scan(&mut self) -> Result<Vec<AccessPoint>, NetworkError> {
        self.access_points.clone().ok_or(NetworkError::ScanFailed)
    }

    async fn connect(&mut self, ssid: &str, password: &str) -> Result<(), NetworkError> {
        self.connects.push((ssid.to_string(), password.to_string()));
        if self.refuse {
            Err(NetworkError::ConnectFailed)
        } else {
            Ok(())
        }
    }

    fn station_info(&self) -> NetworkInfo {
        self.info
    }
}

/// Small fixed zone table
pub struct MockZoneDb {
    zones: Vec<(&'static str, &'static str)>,
}

impl MockZoneDb {
    /// Table of `(zone, posix_tz)` pairs
    pub fn new(zones: Vec<(&'static str, &'static str)>) -> Self {
        Self { zones }
    }
}

impl Default for MockZoneDb {
    fn default() -> Self {
        Self::new(std::vec![
            ("America/Chicago", "CST6CDT,M3.2.0,M11.1.0"),
            ("America/New_York", "EST5EDT,M3.2.0,M11.1.0"),
            ("Europe/Berlin", "CET-1CEST,M3.5.0,M10.5.0/3"),
        ])
    }
}

impl ZoneDb for MockZoneDb {
    fn region_list(&self) -> Option<String> {
        let mut regions: Vec<&str> =
            self.zones.iter().filter_map(|(zone, _)| zone.split_once('/')).map(|(r, _)| r).collect();
        regions.dedup();
        Some(regions.join("\n"))
    }

    fn zone_list(&self, region: &str) -> Option<String> {
        let zones: Vec<&str> = self
            .zones
            .iter()
            .filter_map(|(zone, _)| zone.split_once('/'))
            .filter(|(r, _)| *r == region)
            .map(|(_, z)| z)
            .collect();
        if zones.is_empty() {
            None
        } else {
            Some(zones.join("\n"))
        }
    }

    fn posix_tz(&self, zone: &str) -> Option<&str> {
        self.zones.iter().find(|(z, _)| *z == zone).map(|(_, tz)| *tz)
    }
}

/// Mock analog sensors
pub struct MockSensors {
    /// Touch pad reading; `None` fails
    pub touch: Option<u16>,
    /// Ambient light sample
    pub light: u16,
    /// Volume knob reading
    pub volume: u16,
    /// Number of light samples taken
    pub light_samples: usize,
}

impl Default for MockSensors {
    fn default() -> Self {
        Self { touch: Some(1200), light: 300, volume: 2048, light_samples: 0 }
    }
}

impl Sensors for MockSensors {
    fn touch_pad_raw(&mut self) -> Result<u16, SensorError> {
        self.touch.ok_or(SensorError::TouchUnavailable)
    }

    fn ambient_light_raw(&mut self, _gain: LightGain) -> Result<u16, SensorError> {
        self.light_samples = self.light_samples.saturating_add(1);
        Ok(self.light)
    }

    fn volume_raw(&mut self) -> Result<u16, SensorError> {
        Ok(self.volume)
    }
}

/// Board made of mocks
pub struct MockBoard;

impl Board for MockBoard {
    type Input = MockInput;
    type Display = MockDisplay;
    type Storage = MockStorage;
    type Rtc = MockRtc;
    type TimeSync = MockTimeSync;
    type Settings = MockSettings;
    type Player = MockPlayer;
    type Network = MockNetwork;
    type Zones = MockZoneDb;
    type Sensors = MockSensors;
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_display_records_calls() {
        let mut display = MockDisplay::new();
        display.clear();
        display.draw_clock(&ClockState::new(true));
        assert_eq!(display.calls().len(), 2);
        assert_eq!(display.clock_draws(), 1);
        assert!(display.last_clock().unwrap().twenty_four);
    }

    #[tokio::test]
    async fn test_mock_input() {
        let mut input = MockInput::new();

        input.add_event(InputEvent::ButtonPress(Button::A)).unwrap();
        input.add_event(InputEvent::ButtonPress(Button::B)).unwrap();

        assert_eq!(input.poll_event(), Some(InputEvent::ButtonPress(Button::A)));
        assert_eq!(input.wait_for_event().await, InputEvent::ButtonPress(Button::B));
        assert_eq!(input.poll_event(), None);
    }

    #[tokio::test]
    async fn test_mock_input_quiet_gap() {
        let mut input = MockInput::with_presses(&[Button::A]);
        input.quiet(embassy_time::Duration::from_millis(30));
        input.click(Button::B);
        assert_eq!(input.pending(), 3);

        assert_eq!(input.poll_event(), Some(InputEvent::ButtonPress(Button::A)));
        assert_eq!(input.poll_event(), None);
        let start = embassy_time::Instant::now();
        assert_eq!(input.wait_for_event().await, InputEvent::ButtonPress(Button::B));
        assert!(start.elapsed() >= embassy_time::Duration::from_millis(25));
    }

    #[tokio::test]
    async fn test_mock_storage_reports_unmounted_card() {
        let mut storage = MockStorage::new()
            .with_dir("/sdcard", std::vec![DirEntry::file("a.vgm")])
            .with_state(true, false);
        assert_eq!(storage.read_dir("/sdcard").await, Err(StorageError::Io));
        assert!(storage.is_detected());
        assert!(!storage.is_mounted());
    }

    #[test]
    fn test_mock_zone_db_lists() {
        let db = MockZoneDb::default();
        assert_eq!(db.region_list().unwrap(), "America\nEurope");
        assert_eq!(db.zone_list("America").unwrap(), "Chicago\nNew_York");
        assert_eq!(db.posix_tz("Europe/Berlin"), Some("CET-1CEST,M3.5.0,M10.5.0/3"));
        assert!(db.zone_list("Asia").is_none());
    }

    #[tokio::test]
    async fn test_mock_player_waits_for_stop() {
        let mut player = MockPlayer::new();
        player.play_file("/sdcard/a.vgm").await.unwrap();
        player.stop();
        player.wait_finished().await;
        assert_eq!(player.stops, 1);
    }
}
