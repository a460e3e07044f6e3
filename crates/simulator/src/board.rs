//! The simulator's device set.

use platform::storage_local::LocalFileStorage;
use platform::Board;

use crate::devices::{SimNetwork, SimPlayer, SimSensors, SimZones};
use crate::keys::KeyboardInput;
use crate::rtc::{HostRtc, HostTimeSync};
use crate::settings::JsonSettings;
use crate::terminal::TerminalDisplay;

pub struct SimBoard;

impl Board for SimBoard {
    type Input = KeyboardInput;
    type Display = TerminalDisplay<std::io::Stdout>;
    type Storage = LocalFileStorage;
    type Rtc = HostRtc;
    type TimeSync = HostTimeSync;
    type Settings = JsonSettings;
    type Player = SimPlayer;
    type Network = SimNetwork;
    type Zones = SimZones;
    type Sensors = SimSensors;
}
