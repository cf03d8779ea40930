//! Configuration validation
//!
//! - `trait_def`: the `Validate` trait
//! - `url`: base URL checks for the proxy address
//! - `config_validators`: validators for every configuration section
//! - `tests`: test suite for all validators

mod config_validators;
mod trait_def;
mod url;

pub use trait_def::Validate;
pub use url::validate_base_url;
