//! Wi-Fi scan, select and connect.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use embassy_sync::blocking_mutex::raw::RawMutex;
use platform::{AccessPoint, AuthMode, InputDevice, MenuDisplay, Network, PASSWORD_MAX_LEN};

use super::network_info::format_mac;
use crate::list::{OptionList, DELIMITER, MAX_OPTIONS};
use crate::navigator::{Choice, Navigator, TimedOut};
use crate::screen::{Screen, ScreenId};

const SCAN_TITLE: &str = "Wi-Fi Scan";
const SELECT_TITLE: &str = "Select Network";

/// Scan, list the networks found and connect to the one picked.
///
/// Ends after the first successful connection, or when the user backs out
/// of the list.
pub async fn wifi_setup<I, M, D, N>(nav: &mut Navigator<'_, I, M, D>, network: &mut N) -> Result<(), TimedOut>
where
    I: InputDevice,
    M: RawMutex,
    D: MenuDisplay,
    N: Network,
{
    nav.show_static(SCAN_TITLE, "Please wait...");
    let scanned = match network.scan().await {
        Ok(scanned) => scanned,
        Err(err) => {
            warn!("{}", err);
            return Ok(());
        }
    };

    let access_points = listed(scanned);
    let Some(labels) = labels(&access_points) else {
        return nav.notify(SCAN_TITLE, "No networks found!").await;
    };
    let screen = Screen::new(ScreenId::WifiNetworks, SELECT_TITLE, labels.as_str());

    let mut option = 1;
    while let Some(ordinal) = nav.present(&screen, option).await.into_selection()? {
        option = ordinal.get();
        let Some(ap) = access_points.get(ordinal.index()) else {
            continue;
        };
        if connect(nav, network, ap).await? {
            break;
        }
    }
    Ok(())
}

/// Access points that can be shown as one list label each, capped to what
/// a selection list holds.
fn listed(mut scanned: Vec<AccessPoint>) -> Vec<AccessPoint> {
    scanned.retain(|ap| !ap.ssid.is_empty() && !ap.ssid.contains(DELIMITER));
    scanned.truncate(usize::from(MAX_OPTIONS));
    scanned
}

fn labels(access_points: &[AccessPoint]) -> Option<OptionList> {
    if access_points.is_empty() {
        return None;
    }
    let mut labels = OptionList::new();
    for ap in access_points {
        if let Err(err) = labels.push(&network_label(ap)) {
            warn!("network list: {}", err);
            return None;
        }
    }
    Some(labels)
}

/// `SSID | [RSSI]`, SSID right-aligned and cut to 22 characters.
pub fn network_label(ap: &AccessPoint) -> String {
    format!("{:>22.22} | [{:4}]", ap.ssid.as_str(), ap.rssi)
}

/// Connect dialog. `Ok(true)` once connected.
async fn connect<I, M, D, N>(
    nav: &mut Navigator<'_, I, M, D>,
    network: &mut N,
    ap: &AccessPoint,
) -> Result<bool, TimedOut>
where
    I: InputDevice,
    M: RawMutex,
    D: MenuDisplay,
    N: Network,
{
    let ssid = ap.ssid.as_str();
    let bssid = format_mac(&ap.bssid);
    match nav.message(ssid, Some(bssid.as_str()), ap.auth.label(), "Connect\nCancel").await {
        Choice::Timeout => return Err(TimedOut),
        Choice::Selected(ordinal) if ordinal.get() == 1 => {}
        Choice::Selected(_) | Choice::Cancel => return Ok(false),
    }

    if ap.auth == AuthMode::Wpa2Enterprise {
        nav.notify(ssid, "Unsupported authentication!").await?;
        return Ok(false);
    }

    let password = if ap.auth.needs_password() {
        match nav.input_text(&format!("Password for {ssid}"), "", PASSWORD_MAX_LEN).await? {
            Some(password) if !password.is_empty() => password,
            _ => return Ok(false),
        }
    } else {
        String::new()
    };

    info!("Connecting to: {}", ssid);
    match network.connect(ssid, &password).await {
        Ok(()) => Ok(true),
        Err(err) => {
            warn!("{}: {}", ssid, err);
            Ok(false)
        }
    }
}
