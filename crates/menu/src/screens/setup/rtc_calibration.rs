//! RTC digital trim: show, measure and edit.

use alloc::format;
use alloc::string::String;

use embassy_sync::blocking_mutex::raw::RawMutex;
use platform::{InputDevice, MenuDisplay, Rtc, RtcTrim, Settings};

use crate::navigator::{Choice, Navigator, TimedOut};
use crate::screen::{Screen, ScreenId};

/// Dialog timeouts tolerated while the user is measuring.
const MEASURE_PATIENCE: u8 = 5;

/// Calibration dialog. OK stores the trim and re-initializes the RTC with
/// it; Cancel or back discards edits.
pub async fn rtc_calibration<I, M, D, S, R>(
    nav: &mut Navigator<'_, I, M, D>,
    settings: &mut S,
    rtc: &mut R,
) -> Result<(), TimedOut>
where
    I: InputDevice,
    M: RawMutex,
    D: MenuDisplay,
    S: Settings,
    R: Rtc,
{
    let mut trim = match settings.rtc_trim() {
        Ok(trim) => trim,
        Err(err) => {
            warn!("rtc trim: {}", err);
            return Ok(());
        }
    };

    loop {
        let label = trim_label(trim);
        let choice = nav
            .message("RTC Calibration", Some(label.as_str()), &trim_description(trim), "Measure\nTrim\nOK\nCancel")
            .await;
        match choice.into_selection()?.map(|o| o.get()) {
            Some(1) => measure(nav, settings, rtc).await?,
            Some(2) => {
                if let Some(edited) = edit_trim(nav, trim).await? {
                    trim = edited;
                }
            }
            Some(3) => {
                let trim = trim.normalized();
                if let Err(err) = settings.set_rtc_trim(trim) {
                    warn!("{}", err);
                }
                reinit(rtc, trim);
                return Ok(());
            }
            _ => return Ok(()),
        }
    }
}

/// `[Coarse] +5`
pub fn trim_label(trim: RtcTrim) -> String {
    let mode = if trim.coarse { "Coarse" } else { "Fine" };
    let sign = if trim.add() { '+' } else { '-' };
    format!("[{mode}] {sign}{}", trim.value())
}

/// What the trim does to the oscillator, in words.
pub fn trim_description(trim: RtcTrim) -> String {
    if trim.is_disabled() {
        return "Digital trimming disabled".into();
    }
    let verb = if trim.add() { "Add" } else { "Subtract" };
    let rate = if trim.coarse { "128 times per second" } else { "every minute" };
    format!("{verb} {} clock cycles\n{rate}", trim.cycles())
}

/// Route the RTC calibration signal to its test point until the user is
/// done, then restore normal operation with the stored trim.
async fn measure<I, M, D, S, R>(nav: &mut Navigator<'_, I, M, D>, settings: &S, rtc: &mut R) -> Result<(), TimedOut>
where
    I: InputDevice,
    M: RawMutex,
    D: MenuDisplay,
    S: Settings,
    R: Rtc,
{
    let stored = settings.rtc_trim().unwrap_or(RtcTrim::DISABLED);
    if let Err(err) = rtc.start_calibration_output() {
        warn!("calibration output: {}", err);
        reinit(rtc, stored);
        return Ok(());
    }

    let mut timeouts = 0u8;
    let result = loop {
        match nav.message("RTC Measure", None, "Measure frequency at test point", "Done").await {
            Choice::Timeout => {
                timeouts = timeouts.saturating_add(1);
                if timeouts >= MEASURE_PATIENCE {
                    break Err(TimedOut);
                }
            }
            Choice::Selected(_) | Choice::Cancel => break Ok(()),
        }
    };

    reinit(rtc, stored);
    result
}

fn reinit<R: Rtc>(rtc: &mut R, trim: RtcTrim) {
    if let Err(err) = rtc.reinit(trim) {
        error!("rtc reinit: {}", err);
    }
}

/// Trim editor. `Some` on Accept.
async fn edit_trim<I, M, D>(nav: &mut Navigator<'_, I, M, D>, trim: RtcTrim) -> Result<Option<RtcTrim>, TimedOut>
where
    I: InputDevice,
    M: RawMutex,
    D: MenuDisplay,
{
    let (mut coarse, mut add, mut value) = (trim.coarse, trim.add(), trim.value());
    let mut option = 1;
    loop {
        let options = format!(
            "{}\n{}\nValue={value}\nAccept",
            if coarse { "Coarse" } else { "Fine" },
            if add { "Add" } else { "Subtract" },
        );
        let screen = Screen::new(ScreenId::RtcTrim, "RTC Trim", &options);
        let Some(ordinal) = nav.present(&screen, option).await.into_selection()? else {
            return Ok(None);
        };
        option = ordinal.get();
        match option {
            1 => coarse = !coarse,
            2 => add = !add,
            3 => {
                if let Some(v) = nav.input_value("Trim Value", value, 0, RtcTrim::MAX_VALUE).await? {
                    value = v;
                }
            }
            4 => return Ok(Some(RtcTrim::new(coarse, add, value))),
            _ => {}
        }
    }
}
