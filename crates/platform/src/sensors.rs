//! Analog sensors used by the diagnostics screens.

/// ADC input attenuation for the ambient light channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LightGain {
    /// 0 dB attenuation (dim rooms)
    Db0,
    /// 2.5 dB attenuation (normal operation)
    Db2_5,
}

/// Sensor read errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror_no_std::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// The touch controller is not calibrated or not present
    #[error("touch pad unavailable")]
    TouchUnavailable,
    /// ADC conversion failed
    #[error("ADC read failed")]
    Adc,
}

/// Analog sensor readings
pub trait Sensors {
    /// Raw capacitive touch pad measurement.
    fn touch_pad_raw(&mut self) -> Result<u16, SensorError>;

    /// One raw 12-bit ambient light sample at the given gain.
    fn ambient_light_raw(&mut self, gain: LightGain) -> Result<u16, SensorError>;

    /// Raw 12-bit volume knob reading.
    fn volume_raw(&mut self) -> Result<u16, SensorError>;
}

/// Volume knob reading in percent, `(raw >> 5) * 100 / 127`.
#[allow(clippy::arithmetic_side_effects)] // steps <= 127, product fits u32
pub fn volume_percent(raw: u16) -> u8 {
    let steps = u32::from(raw >> 5).min(127);
    u8::try_from(steps * 100 / 127).unwrap_or(100)
}
