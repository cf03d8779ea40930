//! Validation trait definition

/// Validation trait for configuration sections; errors are user-facing text
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}
