//! Station MAC and IPv4 configuration.

use alloc::format;
use alloc::string::String;
use core::fmt::Write;

use embassy_sync::blocking_mutex::raw::RawMutex;
use platform::{InputDevice, MenuDisplay, Network, NetworkInfo};

use crate::navigator::{Navigator, TimedOut};

/// Show the station details until any key is pressed.
pub async fn network_info<I, M, D, N>(nav: &mut Navigator<'_, I, M, D>, network: &N) -> Result<(), TimedOut>
where
    I: InputDevice,
    M: RawMutex,
    D: MenuDisplay,
    N: Network,
{
    nav.show_static("Network Info", &info_lines(&network.station_info()));
    nav.wait_for_press().await.map(|_| ())
}

/// `AA:BB:CC:DD:EE:FF`
pub fn format_mac(mac: &[u8; 6]) -> String {
    let [a, b, c, d, e, f] = *mac;
    format!("{a:02X}:{b:02X}:{c:02X}:{d:02X}:{e:02X}:{f:02X}")
}

/// One line per known detail; missing details are left out.
pub fn info_lines(info: &NetworkInfo) -> String {
    let mut lines = String::new();
    if let Some(mac) = &info.mac {
        let _ = writeln!(lines, "MAC: {}", format_mac(mac));
    }
    if let Some(ipv4) = &info.ipv4 {
        let _ = writeln!(lines, "IP: {}", ipv4.ip);
        let _ = writeln!(lines, "Netmask: {}", ipv4.netmask);
        let _ = writeln!(lines, "Gateway: {}", ipv4.gateway);
    }
    lines.pop();
    lines
}
