//! Validators for every configuration section

use super::trait_def::Validate;
use super::url::validate_base_url;
use crate::config::Config;
use crate::config::models::*;
use tracing::{debug, warn};

impl Validate for Config {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating import configuration");

        self.proxy.validate()?;
        self.submission.validate()?;
        self.input.validate()?;

        debug!("Import configuration validation completed");
        Ok(())
    }
}

impl Validate for ProxyConfig {
    fn validate(&self) -> Result<(), String> {
        validate_base_url(&self.base_url, "Proxy base_url")?;

        if self.connect_timeout == 0 {
            return Err("Proxy connect_timeout must be greater than 0".to_string());
        }

        if let Some(key) = &self.api_key {
            if key.trim().is_empty() {
                return Err("Proxy api_key cannot be blank when set".to_string());
            }
        } else {
            warn!("No proxy api_key configured; /user/new will likely reject every row");
        }

        Ok(())
    }
}

impl Validate for SubmissionSettings {
    fn validate(&self) -> Result<(), String> {
        if self.concurrency == 0 {
            return Err("Submission concurrency must be at least 1".to_string());
        }

        if self.concurrency > 64 {
            return Err(format!(
                "Submission concurrency {} is above the limit of 64",
                self.concurrency
            ));
        }

        if self.timeout == 0 {
            return Err("Submission timeout must be greater than 0".to_string());
        }

        Ok(())
    }
}

impl Validate for InputSettings {
    fn validate(&self) -> Result<(), String> {
        match self.delimiter {
            '"' => Err("Delimiter cannot be a double quote".to_string()),
            '\n' | '\r' => Err("Delimiter cannot be a line break".to_string()),
            _ => Ok(()),
        }
    }
}
