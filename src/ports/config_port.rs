//! Configuration access port trait.
//!
//! Implementors only supply raw string lookup; typed accessors parse on top
//! of it and report unparsable values as `ConfigInvalid`.

use std::str::FromStr;

use crate::domain::error::QuantsimError;

pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;

    fn get_double(&self, section: &str, key: &str, default: f64) -> Result<f64, QuantsimError> {
        Ok(parse_value(self.get_string(section, key), section, key)?.unwrap_or(default))
    }

    fn get_optional_double(&self, section: &str, key: &str) -> Result<Option<f64>, QuantsimError> {
        parse_value(self.get_string(section, key), section, key)
    }

    fn get_usize(&self, section: &str, key: &str, default: usize) -> Result<usize, QuantsimError> {
        Ok(parse_value(self.get_string(section, key), section, key)?.unwrap_or(default))
    }
}

fn parse_value<T: FromStr>(
    raw: Option<String>,
    section: &str,
    key: &str,
) -> Result<Option<T>, QuantsimError> {
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse::<T>().map(Some).map_err(|_| {
            QuantsimError::invalid(section, key, format!("cannot parse '{}'", s))
        }),
    }
}
