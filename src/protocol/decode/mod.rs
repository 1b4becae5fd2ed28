//! Per-metric decoders: pure functions mapping one [`RawFrame`] to at most one
//! physical value.
//!
//! Every decoder is gated by its identifier and returns `None` for any other
//! frame. A decoded zero is a real reading, never a "not applicable" marker.
//!
//! # Byte layout
//!
//! | Identifier | Metric                   | Bytes used                 |
//! |------------|--------------------------|----------------------------|
//! | `0x0AA`    | engine speed (RPM)       | `data[4]`, `data[5]`       |
//! | `0x1A0`    | vehicle speed            | `data[0]`, `data[1] & 0xF` |
//! | `0x1D0`    | fuel level / coolant     | `data[3]`, `data[0]`       |
//! | `0x330`    | odometer / fuel range    | none (not decoded yet)     |
//!
//! Payload bytes past the frame length read as zero; short frames are decoded
//! like full ones.
use crate::protocol::transport::can_frame::RawFrame;
use crate::protocol::transport::can_id::MetricId;

//==================================================================================Constants

/// Weight of one increment of the high counter byte (RPM and speed frames).
const INCREMENT_WEIGHT: u32 = 255;

/// RPM divisor: the high counter is reported in half steps of a quarter RPM.
const RPM_DIVISOR: u32 = 8;

/// Speed scale in thousandths (km/h to mph).
const SPEED_SCALE_MILLI: u32 = 621;

/// Coolant temperature bias (°C).
pub const COOLANT_BIAS: i16 = 48;

//==================================================================================Decoders

/// Engine speed in RPM.
///
/// `round(data[5] * 255 / 8) + data[4]`, rounded half up and saturated to
/// `u16` (the largest reachable value, 8383, never saturates in practice).
pub fn decode_rpm(frame: &RawFrame) -> Option<u16> {
    if frame.id != MetricId::Torque3 {
        return None;
    }
    let hi = frame.byte(5) as u32;
    let lo = frame.byte(4) as u32;
    let raw = hi * INCREMENT_WEIGHT;
    let rpm = (raw + RPM_DIVISOR / 2) / RPM_DIVISOR + lo;
    Some(u16::try_from(rpm).unwrap_or(u16::MAX))
}

/// Vehicle speed.
///
/// `round((data[1] & 0x0F) * 255 * 0.621) + data[0]`, saturated at 255. Only
/// the low nibble of `data[1]` is a counter; the high nibble carries flags.
pub fn decode_speed(frame: &RawFrame) -> Option<u8> {
    if frame.id != MetricId::Speed {
        return None;
    }
    let inc = (frame.byte(1) & 0x0F) as u32;
    let base = frame.byte(0) as u32;
    let raw = inc * INCREMENT_WEIGHT;
    let scaled = (raw * SPEED_SCALE_MILLI + 500) / 1000;
    Some(u8::try_from(scaled + base).unwrap_or(u8::MAX))
}

/// Fuel level as a 0–100 percentage (`data[3] * 100 / 255`, rounded down).
pub fn decode_fuel(frame: &RawFrame) -> Option<u8> {
    if frame.id != MetricId::EngineData {
        return None;
    }
    let level = frame.byte(3) as u16 * 100 / 255;
    // Bounded by 100 for any byte value.
    Some(level as u8)
}

/// Coolant temperature in °C (`data[0] - 48`).
///
/// Signed: raw bytes below the bias are sub-zero readings, not wraparounds.
pub fn decode_temperature(frame: &RawFrame) -> Option<i16> {
    if frame.id != MetricId::EngineData {
        return None;
    }
    Some(frame.byte(0) as i16 - COOLANT_BIAS)
}

/// Odometer reading.
///
/// The `0x330` layout is not decoded yet: a matching frame always yields the
/// default `0`, any other frame yields `None`.
pub fn decode_odometer(frame: &RawFrame) -> Option<u32> {
    if frame.id != MetricId::FuelMileage {
        return None;
    }
    Some(0)
}

/// Remaining fuel range.
///
/// Same contract as [`decode_odometer`]: `Some(0)` on `0x330`, `None` otherwise.
pub fn decode_fuel_range(frame: &RawFrame) -> Option<u16> {
    if frame.id != MetricId::FuelMileage {
        return None;
    }
    Some(0)
}

//==================================================================================DecodedFrame

/// Result of running every snapshot decoder against a single frame.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DecodedFrame {
    pub rpm: Option<u16>,
    pub speed: Option<u8>,
    pub fuel_percent: Option<u8>,
    pub coolant_temp: Option<i16>,
}

impl DecodedFrame {
    /// True when no decoder fired for the frame.
    pub fn is_empty(&self) -> bool {
        self.rpm.is_none()
            && self.speed.is_none()
            && self.fuel_percent.is_none()
            && self.coolant_temp.is_none()
    }
}

/// Run the four snapshot decoders against `frame`.
pub fn decode_frame(frame: &RawFrame) -> DecodedFrame {
    DecodedFrame {
        rpm: decode_rpm(frame),
        speed: decode_speed(frame),
        fuel_percent: decode_fuel(frame),
        coolant_temp: decode_temperature(frame),
    }
}
