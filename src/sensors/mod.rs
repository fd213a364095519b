//! Sensor subsystem: the NTC driver and the owning [`SensorBank`].
//!
//! Actuators never hold a sensor; they hold a [`SensorId`] that indexes
//! into the bank.  The bank is updated once per tick, before any
//! actuator reads it.

pub mod temperature;

use log::warn;

use crate::app::ports::{SENSOR_FAULT_C, SensorId};
use crate::config::{SENSOR_COUNT, SensorConfig};
use temperature::TemperatureSensor;

/// Owns every temperature sensor on the board.
pub struct SensorBank {
    sensors: heapless::Vec<TemperatureSensor, SENSOR_COUNT>,
}

impl SensorBank {
    pub fn new() -> Self {
        Self {
            sensors: heapless::Vec::new(),
        }
    }

    /// One sensor per config entry, ids assigned in order.  Entries past
    /// [`SENSOR_COUNT`] are logged and skipped.
    pub fn from_config(configs: &[SensorConfig]) -> Self {
        let mut bank = Self::new();
        for cfg in configs {
            if bank.add(TemperatureSensor::new(cfg)).is_none() {
                warn!("sensors: bank full, ADC ch{} not registered", cfg.adc_channel);
            }
        }
        bank
    }

    /// Register a sensor.  `None` when the bank is full.
    pub fn add(&mut self, sensor: TemperatureSensor) -> Option<SensorId> {
        let id = u8::try_from(self.sensors.len()).ok()?;
        self.sensors.push(sensor).ok()?;
        Some(SensorId(id))
    }

    /// Sample every sensor once.
    pub fn update_all(&mut self) {
        for s in &mut self.sensors {
            s.update();
        }
    }

    /// Filtered reading for `id`.  Unknown ids read as a fault.
    pub fn temperature_c(&self, id: SensorId) -> f32 {
        self.get(id).map_or(SENSOR_FAULT_C, TemperatureSensor::temperature_c)
    }

    pub fn get(&self, id: SensorId) -> Option<&TemperatureSensor> {
        self.sensors.get(usize::from(id.0))
    }

    pub fn get_mut(&mut self, id: SensorId) -> Option<&mut TemperatureSensor> {
        self.sensors.get_mut(usize::from(id.0))
    }

    pub fn len(&self) -> usize {
        self.sensors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sensors.is_empty()
    }
}

impl Default for SensorBank {
    fn default() -> Self {
        Self::new()
    }
}
