//! Rotor document validation logic.

use crate::schema::{BladeDef, OuterShaftDiameterDef, ProfileDef, RotorDef};
use bg_airfoil::Naca4;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Bad NACA code in {context}: {source}")]
    BadNaca {
        context: String,
        #[source]
        source: bg_airfoil::NacaError,
    },

    #[error("Empty section: {what}")]
    Empty { what: String },
}

pub fn validate_rotor(rotor: &RotorDef) -> Result<(), ValidationError> {
    if rotor.inner_shaft_diameter <= 0.0 || !rotor.inner_shaft_diameter.is_finite() {
        return Err(ValidationError::InvalidValue {
            field: "inner_shaft_diameter".to_string(),
            value: rotor.inner_shaft_diameter.to_string(),
            reason: "must be positive and finite".to_string(),
        });
    }

    if let OuterShaftDiameterDef::Fixed(d) = rotor.outer_shaft_diameter
        && (d <= 0.0 || !d.is_finite())
    {
        return Err(ValidationError::InvalidValue {
            field: "outer_shaft_diameter".to_string(),
            value: d.to_string(),
            reason: "must be positive and finite (or \"auto\")".to_string(),
        });
    }

    if rotor.blades.is_empty() {
        return Err(ValidationError::Empty {
            what: "blades".to_string(),
        });
    }

    for (i, blade) in rotor.blades.iter().enumerate() {
        validate_blade(blade, i)?;
    }

    Ok(())
}

fn validate_blade(blade: &BladeDef, blade_no: usize) -> Result<(), ValidationError> {
    if blade.profiles.len() < 2 {
        return Err(ValidationError::InvalidValue {
            field: format!("blades[{blade_no}].profiles"),
            value: blade.profiles.len().to_string(),
            reason: "a blade needs at least 2 profiles to loft".to_string(),
        });
    }

    for field in ["angle", "radial_blade_offset", "vertical_blade_offset"] {
        let value = match field {
            "angle" => blade.angle,
            "radial_blade_offset" => blade.radial_blade_offset,
            _ => blade.vertical_blade_offset,
        };
        if !value.is_finite() {
            return Err(ValidationError::InvalidValue {
                field: format!("blades[{blade_no}].{field}"),
                value: value.to_string(),
                reason: "must be finite".to_string(),
            });
        }
    }

    for (j, profile) in blade.profiles.iter().enumerate() {
        validate_profile(profile, blade_no, j)?;
    }

    Ok(())
}

fn validate_profile(
    profile: &ProfileDef,
    blade_no: usize,
    profile_no: usize,
) -> Result<(), ValidationError> {
    Naca4::parse(&profile.naca).map_err(|source| ValidationError::BadNaca {
        context: format!("blades[{blade_no}].profiles[{profile_no}]"),
        source,
    })?;

    if profile.c <= 0.0 || !profile.c.is_finite() {
        return Err(ValidationError::InvalidValue {
            field: format!("blades[{blade_no}].profiles[{profile_no}].c"),
            value: profile.c.to_string(),
            reason: "chord must be positive and finite".to_string(),
        });
    }

    for (field, value) in [
        ("angle", profile.angle),
        ("radial_offset", profile.radial_offset),
        ("colinear_offset", profile.colinear_offset),
    ] {
        if !value.is_finite() {
            return Err(ValidationError::InvalidValue {
                field: format!("blades[{blade_no}].profiles[{profile_no}].{field}"),
                value: value.to_string(),
                reason: "must be finite".to_string(),
            });
        }
    }

    Ok(())
}
