//! Foreground menu task: idle face, key dispatch and menu sessions.

use embassy_sync::blocking_mutex::raw::RawMutex;
use platform::{Board, Button, InputDevice, Rtc, Settings, TimeSync, ZoneDb};

use crate::clock::IdleClock;
use crate::config::MenuConfig;
use crate::navigator::{Navigator, TimedOut};
use crate::screens::{self, BoardNavigator};

/// Every device the menu tree talks to, apart from the keypad and the
/// display (owned by the navigator and the [`IdleClock`]).
pub struct Devices<B: Board> {
    /// SD card
    pub storage: B::Storage,
    /// Real-time clock
    pub rtc: B::Rtc,
    /// SNTP client
    pub time_sync: B::TimeSync,
    /// Settings store
    pub settings: B::Settings,
    /// Music player
    pub player: B::Player,
    /// Wi-Fi station
    pub network: B::Network,
    /// Time zone database
    pub zones: B::Zones,
    /// Analog sensors
    pub sensors: B::Sensors,
}

/// The menu side of the front panel.
///
/// Runs forever in its own task; the RTC tick reaches the shared
/// [`IdleClock`] from elsewhere.
pub struct MenuTask<'c, B: Board, M: RawMutex> {
    nav: BoardNavigator<'c, B, M>,
    devices: Devices<B>,
    config: MenuConfig,
}

impl<'c, B: Board, M: RawMutex> MenuTask<'c, B, M> {
    /// Create the task. Call [`Self::load_settings`] before [`Self::run`].
    pub fn new(
        input: B::Input,
        clock: &'c IdleClock<M, B::Display>,
        devices: Devices<B>,
        config: MenuConfig,
    ) -> Self {
        Self { nav: Navigator::new(input, clock, config.timeout), devices, config }
    }

    /// Apply the persisted time format, time zone and NTP server.
    ///
    /// Missing or unreadable settings keep the defaults.
    pub fn load_settings(&mut self) {
        let dev = &mut self.devices;
        match dev.settings.time_format() {
            Ok(twenty_four) => self.nav.clock().set_twenty_four(twenty_four),
            Err(err) => debug!("time format: {}", err),
        }

        match dev.settings.time_zone() {
            Ok(zone) => match dev.zones.posix_tz(&zone) {
                Some(tz) => dev.rtc.set_time_zone(tz),
                None => warn!("unknown time zone {}", zone.as_str()),
            },
            Err(err) => debug!("time zone: {}", err),
        }

        if let Ok(hostname) = dev.settings.ntp_server() {
            if !hostname.is_empty() {
                dev.time_sync.set_server_name(&hostname);
            }
        }
    }

    /// Hide any menu and draw the idle face with the current time.
    pub fn show_idle(&mut self) {
        let now = match self.devices.rtc.now() {
            Ok(now) => Some(now),
            Err(err) => {
                warn!("{}", err);
                None
            }
        };
        self.nav.clock().show_idle(now);
    }

    /// Wait (without timeout) for one key press on the idle face and act on
    /// it. The face is redrawn afterwards whatever the key did.
    pub async fn idle_cycle(&mut self) {
        let button = loop {
            if let Some(button) = self.nav.input().wait_for_event().await.pressed() {
                break button;
            }
        };

        match button {
            Button::Start => self.nav.clock().set_alarm_armed(true),
            Button::Select => self.nav.clock().set_alarm_armed(false),
            Button::A | Button::B => {
                if let Err(TimedOut) = self.session().await {
                    info!("menu closed after inactivity");
                }
            }
            _ => {}
        }
        self.show_idle();
    }

    async fn session(&mut self) -> Result<(), TimedOut> {
        self.nav.clock().enter_menu();
        let result = screens::main_menu::<B, M>(&mut self.nav, &mut self.devices, &self.config).await;
        self.nav.reset();
        result
    }

    /// Run forever.
    pub async fn run(&mut self) -> ! {
        self.show_idle();
        loop {
            self.idle_cycle().await;
        }
    }

    /// The navigator, for inspecting session state.
    pub fn navigator(&self) -> &BoardNavigator<'c, B, M> {
        &self.nav
    }

    /// The devices.
    pub fn devices(&mut self) -> &mut Devices<B> {
        &mut self.devices
    }
}
