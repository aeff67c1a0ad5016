use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceClass {
    Monetary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StateClass {
    Total,
}

/// What the host needs to register and label the reading.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorMetadata {
    pub name: String,
    pub unit_of_measurement: String,
    pub device_class: DeviceClass,
    pub state_class: StateClass,
}

impl Default for SensorMetadata {
    fn default() -> Self {
        Self {
            name: "Energy Price".to_string(),
            unit_of_measurement: "€/kWh".to_string(),
            device_class: DeviceClass::Monetary,
            state_class: StateClass::Total,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SensorState<'a> {
    #[serde(flatten)]
    pub metadata: &'a SensorMetadata,
    pub native_value: Option<f64>,
    pub last_updated: Option<DateTime<Utc>>,
}

/// Last known energy price. Starts out unknown.
#[derive(Debug, Default)]
pub struct PriceSensor {
    metadata: SensorMetadata,
    native_value: Option<f64>,
    last_updated: Option<DateTime<Utc>>,
}

impl PriceSensor {
    pub fn new(metadata: SensorMetadata) -> Self {
        Self {
            metadata,
            native_value: None,
            last_updated: None,
        }
    }

    pub fn metadata(&self) -> &SensorMetadata {
        &self.metadata
    }

    pub fn native_value(&self) -> Option<f64> {
        self.native_value
    }

    /// Stores a freshly fetched value. `None` leaves the previous reading alone.
    /// Returns true if the stored value changed.
    pub fn apply(&mut self, reading: Option<f64>) -> bool {
        let Some(value) = reading else {
            return false;
        };
        let changed = self.native_value != Some(value);
        self.native_value = Some(value);
        self.last_updated = Some(Utc::now());
        changed
    }

    pub fn snapshot(&self) -> SensorState<'_> {
        SensorState {
            metadata: &self.metadata,
            native_value: self.native_value,
            last_updated: self.last_updated,
        }
    }
}
