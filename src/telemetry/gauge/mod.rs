//! Gauge scales used by renderers to place snapshot values on their arcs.
//!
//! Ranges and tick counts match the dashboard face. The fuel gauge runs
//! backwards (full on the left), which is expressed by `min > max`.
use crate::telemetry::snapshot::VehicleSnapshot;

/// Value range and tick count of one arc.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GaugeScale {
    /// Value shown at the start of the arc.
    pub min: i32,
    /// Value shown at the end of the arc.
    pub max: i32,
    /// Number of major ticks.
    pub ticks: u8,
}

impl GaugeScale {
    pub const fn new(min: i32, max: i32, ticks: u8) -> Self {
        Self { min, max, ticks }
    }

    /// True when the arc runs from high to low values.
    pub const fn is_inverted(&self) -> bool {
        self.min > self.max
    }

    /// Limit `value` to the range covered by the arc.
    pub fn clamp(&self, value: i32) -> i32 {
        let (low, high) = if self.is_inverted() {
            (self.max, self.min)
        } else {
            (self.min, self.max)
        };
        value.clamp(low, high)
    }

    /// Position of `value` along the arc, 0 (start) to 1000 (end).
    pub fn permille(&self, value: i32) -> u16 {
        let span = self.max as i64 - self.min as i64;
        if span == 0 {
            return 0;
        }
        let offset = self.clamp(value) as i64 - self.min as i64;
        // Same sign as `span` after clamping, so the ratio is in 0..=1000.
        (offset * 1000 / span) as u16
    }
}

/// The four arcs of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Gauge {
    Rpm,
    Speed,
    Fuel,
    Temperature,
}

impl Gauge {
    pub const ALL: [Gauge; 4] = [Gauge::Rpm, Gauge::Speed, Gauge::Fuel, Gauge::Temperature];

    pub const fn scale(self) -> GaugeScale {
        match self {
            Gauge::Rpm => GaugeScale::new(0, 7000, 8),
            Gauge::Speed => GaugeScale::new(0, 130, 14),
            Gauge::Fuel => GaugeScale::new(100, 0, 5),
            Gauge::Temperature => GaugeScale::new(0, 200, 5),
        }
    }

    /// Raw snapshot value displayed by this gauge.
    pub fn reading(self, snapshot: &VehicleSnapshot) -> i32 {
        match self {
            Gauge::Rpm => snapshot.rpm() as i32,
            Gauge::Speed => snapshot.speed() as i32,
            Gauge::Fuel => snapshot.fuel_percent() as i32,
            Gauge::Temperature => snapshot.coolant_temp() as i32,
        }
    }

    /// Snapshot value limited to the arc range.
    pub fn clamped_reading(self, snapshot: &VehicleSnapshot) -> i32 {
        self.scale().clamp(self.reading(snapshot))
    }

    /// Needle position for `snapshot`, 0 to 1000.
    pub fn permille(self, snapshot: &VehicleSnapshot) -> u16 {
        self.scale().permille(self.reading(snapshot))
    }
}
