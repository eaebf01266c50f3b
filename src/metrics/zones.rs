//! Intensity zones for aerobic steps.
//!
//! Eight ordered zones: 1 through 5, with zone 5 split into 5a/5b/5c for
//! the top end. Zone time is kept as a fixed histogram indexed by zone.

use serde::{Deserialize, Serialize};

/// RGB color representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#rrggbb` form for SVG and CSS consumers.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Aerobic intensity zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum IntensityZone {
    #[default]
    #[serde(rename = "1")]
    Z1,
    #[serde(rename = "2")]
    Z2,
    #[serde(rename = "3")]
    Z3,
    #[serde(rename = "4")]
    Z4,
    #[serde(rename = "5")]
    Z5,
    #[serde(rename = "5a")]
    Z5a,
    #[serde(rename = "5b")]
    Z5b,
    #[serde(rename = "5c")]
    Z5c,
}

/// Number of intensity zones.
pub const ZONE_COUNT: usize = 8;

/// Display colors indexed by zone (blue, teal, yellow, orange, then reds).
pub const ZONE_COLORS: [Color; ZONE_COUNT] = [
    Color::new(59, 130, 246),
    Color::new(20, 184, 166),
    Color::new(234, 179, 8),
    Color::new(249, 115, 22),
    Color::new(239, 68, 68),
    Color::new(239, 68, 68),
    Color::new(220, 38, 38),
    Color::new(185, 28, 28),
];

impl IntensityZone {
    /// All zones in ascending order.
    pub const ALL: [IntensityZone; ZONE_COUNT] = [
        IntensityZone::Z1,
        IntensityZone::Z2,
        IntensityZone::Z3,
        IntensityZone::Z4,
        IntensityZone::Z5,
        IntensityZone::Z5a,
        IntensityZone::Z5b,
        IntensityZone::Z5c,
    ];

    /// Position of the zone in ascending order.
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Wire tag (`"1"` .. `"5c"`).
    pub fn code(&self) -> &'static str {
        match self {
            IntensityZone::Z1 => "1",
            IntensityZone::Z2 => "2",
            IntensityZone::Z3 => "3",
            IntensityZone::Z4 => "4",
            IntensityZone::Z5 => "5",
            IntensityZone::Z5a => "5a",
            IntensityZone::Z5b => "5b",
            IntensityZone::Z5c => "5c",
        }
    }

    /// Parse a wire tag, case-insensitively.
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|zone| zone.code() == code)
    }

    pub fn color(&self) -> Color {
        ZONE_COLORS[self.index()]
    }

    /// Badge text, e.g. `Z5b`.
    pub fn badge(&self) -> String {
        format!("Z{}", self.code())
    }
}

impl std::fmt::Display for IntensityZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Zone {}", self.code())
    }
}

/// Seconds accumulated per zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ZoneTime {
    seconds: [u32; ZONE_COUNT],
}

impl ZoneTime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attribute `seconds` to `zone`.
    pub fn add(&mut self, zone: IntensityZone, seconds: u32) {
        let slot = &mut self.seconds[zone.index()];
        *slot = slot.saturating_add(seconds);
    }

    pub fn get(&self, zone: IntensityZone) -> u32 {
        self.seconds[zone.index()]
    }

    pub fn total(&self) -> u32 {
        self.seconds.iter().sum()
    }

    /// Time of the busiest zone.
    pub fn max(&self) -> u32 {
        self.seconds.iter().copied().max().unwrap_or(0)
    }

    /// Zones with any time, in ascending zone order.
    pub fn used(&self) -> impl Iterator<Item = (IntensityZone, u32)> + '_ {
        IntensityZone::ALL
            .into_iter()
            .map(|zone| (zone, self.get(zone)))
            .filter(|(_, seconds)| *seconds > 0)
    }
}
