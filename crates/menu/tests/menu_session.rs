//! End-to-end menu sessions against the mock board.

#![allow(clippy::unwrap_used)]

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_time::Duration;
use menu::{Devices, IdleClock, MenuConfig, MenuState, MenuTask};
use platform::mocks::*;
use platform::Button::{self, *};
use platform::{AlarmFlags, TickHandler, WallTime};

type Clock = IdleClock<CriticalSectionRawMutex, MockDisplay>;
type Task<'c> = MenuTask<'c, MockBoard, CriticalSectionRawMutex>;

const TIMEOUT: Duration = Duration::from_millis(60);

fn devices() -> Devices<MockBoard> {
    Devices {
        storage: MockStorage::new(),
        rtc: MockRtc::new(WallTime { hour: 21, minute: 30 }),
        time_sync: MockTimeSync::default(),
        settings: MockSettings::default(),
        player: MockPlayer::new(),
        network: MockNetwork::default(),
        zones: MockZoneDb::default(),
        sensors: MockSensors::default(),
    }
}

fn task_with<'c>(clock: &'c Clock, presses: &[Button], devices: Devices<MockBoard>) -> Task<'c> {
    let config = MenuConfig::new().with_timeout(TIMEOUT);
    MenuTask::new(MockInput::with_presses(presses), clock, devices, config)
}

fn task<'c>(clock: &'c Clock, presses: &[Button]) -> Task<'c> {
    task_with(clock, presses, devices())
}

#[tokio::test]
async fn nested_timeout_returns_to_idle_face() {
    let clock = Clock::new(MockDisplay::new(), false);
    // Main Menu -> Setup -> RTC Calibration -> Trim, then nothing
    let mut task = task(&clock, &[A, Down, Down, Down, Down, A, Down, Down, Down, Down, Down, A, Right, A]);
    task.idle_cycle().await;

    assert_eq!(task.navigator().state(), MenuState::Idle);
    assert_eq!(task.navigator().depth(), 0);
    assert!(!clock.is_menu_visible());
    clock.render(|d| {
        let titles = d.list_titles();
        assert_eq!(titles.iter().filter(|t| **t == "Main Menu").count(), 5);
        assert_eq!(titles.iter().filter(|t| **t == "Setup").count(), 6);
        assert_eq!(titles.last(), Some(&"RTC Trim"));
        let face = d.last_clock().unwrap();
        assert_eq!((face.hour, face.minute), (21, 30));
    });
}

#[tokio::test]
async fn tick_during_menu_does_not_draw() {
    let clock = Clock::new(MockDisplay::new(), false);
    let mut task = task(&clock, &[A]);
    let now = WallTime::new(21, 31);

    tokio::join!(task.idle_cycle(), async {
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        assert!(clock.is_menu_visible());
        clock.on_tick(AlarmFlags::default(), now);
        clock.render(|d| assert_eq!(d.clock_draws(), 0));
    });

    // the session timed out and the face came back
    clock.render(|d| assert_eq!(d.clock_draws(), 1));
    clock.on_tick(AlarmFlags::default(), now);
    clock.render(|d| assert_eq!(d.clock_draws(), 2));
}

#[tokio::test]
async fn idle_keys_arm_and_open() {
    let clock = Clock::new(MockDisplay::new(), false);
    let mut task = task(&clock, &[Start, Touch, B, B]);

    task.idle_cycle().await;
    assert!(clock.state().alarm_armed);

    // keys without a meaning on the idle face only redraw it
    task.idle_cycle().await;
    clock.render(|d| assert!(d.list_titles().is_empty()));

    task.idle_cycle().await;
    clock.render(|d| assert_eq!(d.list_titles(), ["Main Menu"]));
    assert!(clock.state().alarm_armed);
}

#[tokio::test]
async fn missing_card_is_reported() {
    let clock = Clock::new(MockDisplay::new(), false);
    let mut devices = devices();
    devices.storage = MockStorage::new().with_state(false, false);
    let mut task = task_with(&clock, &[A, A, A, B], devices);
    task.idle_cycle().await;

    clock.render(|d| assert_eq!(d.message_bodies(), ["SD card was not detected"]));
    assert_eq!(task.navigator().state(), MenuState::Idle);
}

#[tokio::test]
async fn unmounted_card_is_reported() {
    let clock = Clock::new(MockDisplay::new(), false);
    let mut devices = devices();
    devices.storage = MockStorage::new().with_state(true, false);
    let mut task = task_with(&clock, &[A, A, A, B], devices);
    task.idle_cycle().await;

    clock.render(|d| assert_eq!(d.message_bodies(), ["SD card could not be accessed"]));
}

#[tokio::test]
async fn time_format_reaches_idle_face() {
    let clock = Clock::new(MockDisplay::new(), false);
    let presses = [
        A, Down, Down, Down, Down, A, // Setup
        Down, Down, Down, A, // Time Format
        Right, A, // 24-hour
        B, B,
    ];
    let mut task = task(&clock, &presses);
    task.idle_cycle().await;

    assert!(task.devices().settings.twenty_four);
    clock.render(|d| assert!(d.last_clock().unwrap().twenty_four));
}

#[tokio::test]
async fn alarm_time_is_stored() {
    let clock = Clock::new(MockDisplay::new(), false);
    let presses = [A, Down, Down, Down, A, Down, Right, Down, A, B];
    let mut task = task(&clock, &presses);
    task.idle_cycle().await;

    assert_eq!(task.devices().settings.alarm_time, WallTime { hour: 5, minute: 44 });
}
