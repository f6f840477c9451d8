use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ReportError, ReportResult};

/// Opaque RGB color in normalized 0..=1 channel values.
///
/// Serialized as a `#rrggbb` hex string.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
}

impl Color {
    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self { red, green, blue }
    }

    #[must_use]
    pub fn from_rgb8(red: u8, green: u8, blue: u8) -> Self {
        Self::rgb(
            f64::from(red) / 255.0,
            f64::from(green) / 255.0,
            f64::from(blue) / 255.0,
        )
    }

    /// Parses `#rrggbb` (the leading `#` is optional).
    pub fn from_hex(input: &str) -> ReportResult<Self> {
        let digits = input.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ReportError::InvalidData(format!(
                "color `{input}` must be a 6-digit hex string"
            )));
        }
        let packed = u32::from_str_radix(digits, 16)
            .map_err(|e| ReportError::InvalidData(format!("invalid hex color `{input}`: {e}")))?;
        Ok(Self::from_packed_rgb(packed))
    }

    #[must_use]
    pub fn from_packed_rgb(packed: u32) -> Self {
        let [_, red, green, blue] = packed.to_be_bytes();
        Self::from_rgb8(red, green, blue)
    }

    #[must_use]
    pub fn to_rgb8(self) -> [u8; 3] {
        [
            channel_to_u8(self.red),
            channel_to_u8(self.green),
            channel_to_u8(self.blue),
        ]
    }

    /// `0xRRGGBB`, the form viewer material tables expect.
    #[must_use]
    pub fn to_packed_rgb(self) -> u32 {
        let [red, green, blue] = self.to_rgb8();
        u32::from_be_bytes([0, red, green, blue])
    }

    #[must_use]
    pub fn to_hex(self) -> String {
        let [red, green, blue] = self.to_rgb8();
        format!("#{red:02x}{green:02x}{blue:02x}")
    }

    /// Channel-wise linear interpolation in 8-bit RGB space, rounded to the
    /// nearest representable color.
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        let [r0, g0, b0] = self.to_rgb8();
        let [r1, g1, b1] = other.to_rgb8();
        Self::from_rgb8(lerp_u8(r0, r1, t), lerp_u8(g0, g1, t), lerp_u8(b0, b1, t))
    }

    pub fn validate(self) -> ReportResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ReportError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

fn channel_to_u8(value: f64) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn lerp_u8(from: u8, to: u8, t: f64) -> u8 {
    let value = f64::from(from) + (f64::from(to) - f64::from(from)) * t;
    value.round().clamp(0.0, 255.0) as u8
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Self::from_hex(&hex).map_err(D::Error::custom)
    }
}
