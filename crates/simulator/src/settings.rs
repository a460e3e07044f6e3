//! Settings persisted as a JSON file.
//!
//! The file is rewritten after every change. A missing file is an empty
//! store; a file that does not parse is an error at startup.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::Context;
use platform::{RtcTrim, Settings, SettingsError, WallTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct StoredTime {
    hour: u8,
    minute: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct StoredTrim {
    coarse: bool,
    raw: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
struct Stored {
    alarm_time: Option<StoredTime>,
    twenty_four: Option<bool>,
    time_zone: Option<String>,
    ntp_server: Option<String>,
    rtc_trim: Option<StoredTrim>,
}

pub struct JsonSettings {
    path: PathBuf,
    stored: Stored,
}

impl JsonSettings {
    /// Load `path`, or start empty when it does not exist yet.
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        let stored = match fs::read_to_string(path) {
            Ok(text) => serde_json::from_str(&text).context("settings file is not valid JSON")?,
            Err(err) if err.kind() == ErrorKind::NotFound => Stored::default(),
            Err(err) => return Err(err).context("reading settings file"),
        };
        Ok(Self { path: path.to_path_buf(), stored })
    }

    /// Apply `change` and write the file; on failure the old values stay.
    fn update(&mut self, change: impl FnOnce(&mut Stored)) -> Result<(), SettingsError> {
        let mut next = self.stored.clone();
        change(&mut next);
        let text = serde_json::to_string_pretty(&next).map_err(|_| SettingsError::WriteFailed)?;
        if let Err(err) = fs::write(&self.path, text) {
            tracing::warn!(path = %self.path.display(), %err, "settings not saved");
            return Err(SettingsError::WriteFailed);
        }
        self.stored = next;
        Ok(())
    }
}

fn found<T>(value: &Option<T>) -> Result<&T, SettingsError> {
    value.as_ref().ok_or(SettingsError::NotFound)
}

impl Settings for JsonSettings {
    fn alarm_time(&self) -> Result<WallTime, SettingsError> {
        let t = found(&self.stored.alarm_time)?;
        WallTime::new(t.hour, t.minute).ok_or(SettingsError::Corrupt)
    }

    fn set_alarm_time(&mut self, time: WallTime) -> Result<(), SettingsError> {
        self.update(|s| s.alarm_time = Some(StoredTime { hour: time.hour, minute: time.minute }))
    }

    fn time_format(&self) -> Result<bool, SettingsError> {
        found(&self.stored.twenty_four).copied()
    }

    fn set_time_format(&mut self, twenty_four: bool) -> Result<(), SettingsError> {
        self.update(|s| s.twenty_four = Some(twenty_four))
    }

    fn time_zone(&self) -> Result<String, SettingsError> {
        found(&self.stored.time_zone).cloned()
    }

    fn set_time_zone(&mut self, zone: &str) -> Result<(), SettingsError> {
        self.update(|s| s.time_zone = Some(zone.into()))
    }

    fn ntp_server(&self) -> Result<String, SettingsError> {
        found(&self.stored.ntp_server).cloned()
    }

    fn set_ntp_server(&mut self, hostname: &str) -> Result<(), SettingsError> {
        self.update(|s| s.ntp_server = Some(hostname.into()))
    }

    fn rtc_trim(&self) -> Result<RtcTrim, SettingsError> {
        Ok(self.stored.rtc_trim.map_or(RtcTrim::DISABLED, |t| RtcTrim::from_raw(t.coarse, t.raw)))
    }

    fn set_rtc_trim(&mut self, trim: RtcTrim) -> Result<(), SettingsError> {
        self.update(|s| s.rtc_trim = Some(StoredTrim { coarse: trim.coarse, raw: trim.raw() }))
    }
}
