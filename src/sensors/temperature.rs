//! NTC thermistor temperature sensor (10 kOhm @ 25 C, B = 3950).
//!
//! Wired in a voltage divider with a fixed 10 kOhm resistor, read via
//! the ESP32-S3 ADC.  The simplified Beta (Steinhart-Hart) equation
//! converts resistance to temperature; an exponential moving average
//! smooths successive readings.
//!
//! A reading at either ADC rail (open or shorted thermistor) is not a
//! temperature.  The sensor then reports [`SENSOR_FAULT_C`] and drops its
//! filter state, so the next good reading seeds the filter afresh.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads ADC1 via the oneshot API (initialised by hw_init).
//! On host/test: reads from a per-channel static AtomicU16 for injection.

use core::sync::atomic::AtomicU16;
#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::Ordering;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::app::ports::SENSOR_FAULT_C;
use crate::config::SensorConfig;
#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;

const SIM_ADC_CHANNELS: usize = 10;

/// Mid-scale: 25 °C with the default divider.
#[cfg_attr(target_os = "espidf", allow(dead_code))]
static SIM_ADC: [AtomicU16; SIM_ADC_CHANNELS] = [const { AtomicU16::new(2048) }; SIM_ADC_CHANNELS];

/// Inject a raw ADC value for `channel` (host builds only).
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_adc(channel: u32, raw: u16) {
    if let Some(slot) = SIM_ADC.get(channel as usize) {
        slot.store(raw, Ordering::Relaxed);
    }
}

const KELVIN_OFFSET: f32 = 273.15;

/// Divider and thermistor constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NtcParams {
    /// Fixed divider resistor (ohm).
    pub r_fixed_ohm: f32,
    /// Thermistor resistance at `t0_kelvin` (ohm).
    pub r0_ohm: f32,
    pub beta: f32,
    pub t0_kelvin: f32,
    /// ADC reference / divider supply voltage.
    pub v_ref: f32,
    /// Full-scale ADC count.
    pub adc_max: f32,
    /// Readings within this distance of either rail are rejected (volts).
    pub rail_margin_v: f32,
}

impl Default for NtcParams {
    fn default() -> Self {
        Self {
            r_fixed_ohm: 10_000.0,
            r0_ohm: 10_000.0,
            beta: 3950.0,
            t0_kelvin: 298.15,
            v_ref: 3.3,
            adc_max: 4095.0,
            rail_margin_v: 0.01,
        }
    }
}

impl NtcParams {
    /// Convert a raw ADC count to °C.  `None` for implausible readings.
    pub fn adc_to_celsius(&self, raw: u16) -> Option<f32> {
        let voltage = (f32::from(raw) / self.adc_max) * self.v_ref;
        if voltage <= self.rail_margin_v || voltage >= self.v_ref - self.rail_margin_v {
            return None;
        }
        let r_ntc = self.r_fixed_ohm * voltage / (self.v_ref - voltage);
        let inv_t = (1.0 / self.t0_kelvin) + (1.0 / self.beta) * (r_ntc / self.r0_ohm).ln();
        if inv_t <= 0.0 || !inv_t.is_finite() {
            return None;
        }
        Some((1.0 / inv_t) - KELVIN_OFFSET)
    }
}

pub struct TemperatureSensor {
    adc_channel: u32,
    ntc: NtcParams,
    alpha: f32,
    /// `None` until the first plausible reading, and again after a fault.
    filtered: Option<f32>,
    faulted: bool,
}

impl TemperatureSensor {
    pub fn new(cfg: &SensorConfig) -> Self {
        Self {
            adc_channel: cfg.adc_channel,
            ntc: cfg.ntc,
            alpha: cfg.alpha,
            filtered: None,
            faulted: false,
        }
    }

    /// Sample the ADC once and fold the result into the filter.
    pub fn update(&mut self) {
        let raw = self.read_adc();
        self.ingest(raw);
    }

    /// Fold one raw ADC count into the filter; returns the new reading.
    pub fn ingest(&mut self, raw: u16) -> f32 {
        match self.ntc.adc_to_celsius(raw) {
            Some(celsius) => {
                if self.faulted {
                    info!("temp(ch{}): reading recovered ({:.1}C)", self.adc_channel, celsius);
                    self.faulted = false;
                }
                let next = match self.filtered {
                    None => celsius,
                    Some(prev) => self.alpha * celsius + (1.0 - self.alpha) * prev,
                };
                self.filtered = Some(next);
            }
            None => {
                if !self.faulted {
                    warn!("temp(ch{}): implausible ADC reading {}", self.adc_channel, raw);
                    self.faulted = true;
                }
                self.filtered = None;
            }
        }
        self.temperature_c()
    }

    /// Latest filtered temperature, or [`SENSOR_FAULT_C`].
    pub fn temperature_c(&self) -> f32 {
        self.filtered.unwrap_or(SENSOR_FAULT_C)
    }

    pub fn is_faulted(&self) -> bool {
        self.faulted
    }

    pub fn adc_channel(&self) -> u32 {
        self.adc_channel
    }

    #[cfg(target_os = "espidf")]
    fn read_adc(&self) -> u16 {
        hw_init::adc1_read(self.adc_channel)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_adc(&self) -> u16 {
        SIM_ADC
            .get(self.adc_channel as usize)
            .map_or(0, |slot| slot.load(Ordering::Relaxed))
    }
}
