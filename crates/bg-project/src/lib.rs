//! bg-project: canonical rotor configuration file format and validation.

pub mod schema;
pub mod validate;

pub use schema::*;
pub use validate::{ValidationError, validate_rotor};

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn load_yaml(path: &std::path::Path) -> ProjectResult<RotorDef> {
    let content = std::fs::read_to_string(path)?;
    let rotor: RotorDef = serde_yaml::from_str(&content)?;
    validate_rotor(&rotor)?;
    Ok(rotor)
}

pub fn save_yaml(path: &std::path::Path, rotor: &RotorDef) -> ProjectResult<()> {
    validate_rotor(rotor)?;
    let content = serde_yaml::to_string(rotor)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &std::path::Path) -> ProjectResult<RotorDef> {
    let content = std::fs::read_to_string(path)?;
    let rotor: RotorDef = serde_json::from_str(&content)?;
    validate_rotor(&rotor)?;
    Ok(rotor)
}

pub fn save_json(path: &std::path::Path, rotor: &RotorDef) -> ProjectResult<()> {
    validate_rotor(rotor)?;
    let content = serde_json::to_string_pretty(rotor)?;
    std::fs::write(path, content)?;
    Ok(())
}
