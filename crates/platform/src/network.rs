//! Wi-Fi station abstraction
//!
//! Only what the setup screens need: scan, connect and read back addresses.
//! The IP stack itself is the driver's business.

use alloc::vec::Vec;
use core::net::Ipv4Addr;

/// Maximum SSID length in bytes (IEEE 802.11).
pub const SSID_MAX_LEN: usize = 32;

/// Longest WPA passphrase accepted by the driver.
pub const PASSWORD_MAX_LEN: usize = 63;

/// Authentication mode advertised by an access point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AuthMode {
    /// No authentication
    Open,
    /// WEP
    Wep,
    /// WPA personal
    WpaPsk,
    /// WPA2 personal
    Wpa2Psk,
    /// WPA/WPA2 mixed personal
    WpaWpa2Psk,
    /// WPA2 enterprise (802.1X)
    Wpa2Enterprise,
    /// Anything else
    Unknown,
}

impl AuthMode {
    /// Label shown on the connect dialog.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::Wep => "WEP",
            Self::WpaPsk => "WPA-PSK",
            Self::Wpa2Psk => "WPA2-PSK",
            Self::WpaWpa2Psk => "WPA-WPA2-PSK",
            Self::Wpa2Enterprise => "WPA2-Enterprise",
            Self::Unknown => "Unknown",
        }
    }

    /// Whether a passphrase must be entered before connecting.
    pub const fn needs_password(self) -> bool {
        !matches!(self, Self::Open)
    }
}

/// One scan result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessPoint {
    /// Network name
    pub ssid: heapless::String<SSID_MAX_LEN>,
    /// Hardware address
    pub bssid: [u8; 6],
    /// Signal strength in dBm
    pub rssi: i8,
    /// Advertised authentication
    pub auth: AuthMode,
}

/// IPv4 configuration of the station interface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ipv4Info {
    /// Assigned address
    pub ip: Ipv4Addr,
    /// Subnet mask
    pub netmask: Ipv4Addr,
    /// Default gateway
    pub gateway: Ipv4Addr,
}

/// Station interface details shown on the network info screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NetworkInfo {
    /// Station MAC address, if the driver could read it
    pub mac: Option<[u8; 6]>,
    /// IPv4 configuration, if the interface is up
    pub ipv4: Option<Ipv4Info>,
}

/// Wi-Fi errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror_no_std::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NetworkError {
    /// Radio not started
    #[error("Wi-Fi not started")]
    NotStarted,
    /// Scan failed
    #[error("Wi-Fi scan failed")]
    ScanFailed,
    /// Association or authentication failed
    #[error("Wi-Fi connection failed")]
    ConnectFailed,
}

/// Wi-Fi station driver
pub trait Network {
    /// Scan for access points.
    fn scan(&mut self) -> impl core::future::Future<Output = Result<Vec<AccessPoint>, NetworkError>>;

    /// Connect to `ssid`; `password` is empty for open networks.
    fn connect(
        &mut self,
        ssid: &str,
        password: &str,
    ) -> impl core::future::Future<Output = Result<(), NetworkError>>;

    /// Current station interface details.
    fn station_info(&self) -> NetworkInfo;
}
