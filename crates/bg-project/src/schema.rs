//! Rotor configuration schema definitions.

use serde::{Deserialize, Serialize};

/// Top-level rotor document: shaft sizing plus the blade list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RotorDef {
    pub inner_shaft_diameter: f64,
    pub outer_shaft_diameter: OuterShaftDiameterDef,
    /// Profiles synthesized between each configured adjacent pair.
    #[serde(default)]
    pub intermediate_profiles: usize,
    pub blades: Vec<BladeDef>,
}

/// Outer shaft diameter: explicit value or `"auto"` (sized from the
/// blades' computed clearance).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OuterShaftDiameterDef {
    Auto,
    Fixed(f64),
}

impl Serialize for OuterShaftDiameterDef {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            OuterShaftDiameterDef::Auto => serializer.serialize_str("auto"),
            OuterShaftDiameterDef::Fixed(v) => serializer.serialize_f64(*v),
        }
    }
}

impl<'de> Deserialize<'de> for OuterShaftDiameterDef {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(v) => Ok(OuterShaftDiameterDef::Fixed(v)),
            Raw::Text(s) if s == "auto" => Ok(OuterShaftDiameterDef::Auto),
            Raw::Text(s) => Err(serde::de::Error::custom(format!(
                "outer_shaft_diameter must be a number or \"auto\", got \"{s}\""
            ))),
        }
    }
}

/// One blade entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BladeDef {
    /// Rotation of the finished solid about the spanwise axis (degrees).
    pub angle: f64,
    pub radial_blade_offset: f64,
    #[serde(default)]
    pub vertical_blade_offset: f64,
    pub profiles: Vec<ProfileDef>,
}

/// One radial slice of a blade.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProfileDef {
    /// 4-digit NACA designation, e.g. `"2412"`.
    pub naca: String,
    /// Chord length.
    pub c: f64,
    /// Twist angle in degrees (applied as a shear, see bg-airfoil).
    pub angle: f64,
    pub radial_offset: f64,
    #[serde(default)]
    pub colinear_offset: f64,
}
