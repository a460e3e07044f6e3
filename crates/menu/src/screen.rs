//! Screen identifiers and the fixed menu screens.

/// Every screen and dialog the navigator can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScreenId {
    /// Top-level menu.
    MainMenu,
    /// One directory level of the file browser, by depth (root is 0).
    Browser(u8),
    /// Sound effect list.
    SoundEffects,
    /// Diagnostics list.
    Diagnostics,
    /// Setup list.
    Setup,
    /// Wi-Fi scan results.
    WifiNetworks,
    /// Time zone regions.
    TimeZoneRegions,
    /// Time zones within a region.
    TimeZones,
    /// RTC trim editor.
    RtcTrim,
    /// Transient dialog (message box, value or text entry, live readout).
    Dialog,
}

impl ScreenId {
    /// Short label used in logs.
    pub const fn name(self) -> &'static str {
        match self {
            Self::MainMenu => "main-menu",
            Self::Browser(_) => "browser",
            Self::SoundEffects => "sound-effects",
            Self::Diagnostics => "diagnostics",
            Self::Setup => "setup",
            Self::WifiNetworks => "wifi-networks",
            Self::TimeZoneRegions => "tz-regions",
            Self::TimeZones => "tz-zones",
            Self::RtcTrim => "rtc-trim",
            Self::Dialog => "dialog",
        }
    }
}

/// A selection list: identity, title and serialized options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Screen<'a> {
    /// Identity reported through the navigator state
    pub id: ScreenId,
    /// Title line
    pub title: &'a str,
    /// `'\n'`-separated option labels
    pub options: &'a str,
}

impl<'a> Screen<'a> {
    /// Build a screen.
    pub const fn new(id: ScreenId, title: &'a str, options: &'a str) -> Self {
        Self { id, title, options }
    }
}

/// Top-level menu.
pub const MAIN_MENU: Screen<'static> = Screen::new(
    ScreenId::MainMenu,
    "Main Menu",
    "Demo Playback\nDemo Sound Effects\nDiagnostics\nSet Alarm Time\nSetup\nAbout",
);

/// Sound effect demo.
pub const SOUND_EFFECTS: Screen<'static> =
    Screen::new(ScreenId::SoundEffects, "Demo Sound Effects", "Chime\nBlip\nCredit");

/// Diagnostics.
pub const DIAGNOSTICS: Screen<'static> = Screen::new(
    ScreenId::Diagnostics,
    "Diagnostics",
    "Display Test\nCapacitive Touch\nAmbient Light Sensor\nVolume Adjustment",
);

/// Setup.
pub const SETUP: Screen<'static> = Screen::new(
    ScreenId::Setup,
    "Setup",
    "Wi-Fi Setup\nNetwork Info\nTime Zone\nTime Format\nNTP Server\nRTC Calibration",
);
