//! Canonical decoded vehicle state handed from the bus to the renderer.
use crate::protocol::decode::DecodedFrame;

/// Latest known value of every dashboard metric.
///
/// All fields start at zero. A field only changes when a frame carrying its
/// metric is decoded; the consumer side gets read-only accessors.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct VehicleSnapshot {
    pub(crate) rpm: u16,
    pub(crate) speed: u8,
    pub(crate) fuel_percent: u8,
    pub(crate) coolant_temp: i16,
}

impl VehicleSnapshot {
    /// Snapshot with every metric at zero.
    pub const fn new() -> Self {
        Self {
            rpm: 0,
            speed: 0,
            fuel_percent: 0,
            coolant_temp: 0,
        }
    }

    /// Engine speed (RPM).
    pub fn rpm(&self) -> u16 {
        self.rpm
    }

    /// Vehicle speed.
    pub fn speed(&self) -> u8 {
        self.speed
    }

    /// Fuel level, 0–100 %.
    pub fn fuel_percent(&self) -> u8 {
        self.fuel_percent
    }

    /// Coolant temperature (°C), negative below freezing.
    pub fn coolant_temp(&self) -> i16 {
        self.coolant_temp
    }

    /// Overwrite the fields for which a decoder produced a value.
    ///
    /// Returns `true` when at least one field was written (even with its
    /// current value).
    pub(crate) fn apply(&mut self, decoded: &DecodedFrame) -> bool {
        if let Some(rpm) = decoded.rpm {
            self.rpm = rpm;
        }
        if let Some(speed) = decoded.speed {
            self.speed = speed;
        }
        if let Some(fuel) = decoded.fuel_percent {
            self.fuel_percent = fuel;
        }
        if let Some(temp) = decoded.coolant_temp {
            self.coolant_temp = temp;
        }
        !decoded.is_empty()
    }
}
