//! Registration request and its field validation.
//!
//! Fields arrive as optional raw strings so that shape-level absence surfaces
//! as a field validation message rather than a deserialization failure.
//! Validation aggregates every failing field; it never short-circuits.

use std::sync::OnceLock;

use regex::Regex;
use serde::Deserialize;

use gatehouse_core::ServiceError;

const FULL_NAME_REQUIRED: &str = "Full name is require!";
const PHONE_NUMBER_PATTERN: &str = "Phone number must be between 8 and 12 digits";
const GENDER_REQUIRED: &str = "Gender is required";
const GENDER_PATTERN: &str = "Gender must be 'M' or 'F'";

static PHONE_RE: OnceLock<Regex> = OnceLock::new();
static GENDER_RE: OnceLock<Regex> = OnceLock::new();

fn phone_regex() -> &'static Regex {
    PHONE_RE.get_or_init(|| Regex::new("^[0-9]{8,9}$").expect("phone pattern is valid"))
}

fn gender_regex() -> &'static Regex {
    GENDER_RE.get_or_init(|| Regex::new("^[MF]$").expect("gender pattern is valid"))
}

/// Caller-supplied registration payload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserRequest {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
}

impl RegisterUserRequest {
    /// Validate every field, collecting one message per violation in field
    /// declaration order.
    ///
    /// A missing phone number passes: the pattern constraint only applies to
    /// a supplied value.
    pub fn validate(&self) -> Result<(), ServiceError> {
        let mut errors = Vec::new();

        match &self.full_name {
            Some(name) if !name.is_empty() => {}
            _ => errors.push(FULL_NAME_REQUIRED.to_string()),
        }

        if let Some(phone) = &self.phone_number {
            if !phone_regex().is_match(phone) {
                errors.push(PHONE_NUMBER_PATTERN.to_string());
            }
        }

        match &self.gender {
            None => errors.push(GENDER_REQUIRED.to_string()),
            Some(gender) => {
                if gender.trim().is_empty() {
                    errors.push(GENDER_REQUIRED.to_string());
                }
                if !gender_regex().is_match(gender) {
                    errors.push(GENDER_PATTERN.to_string());
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ServiceError::Validation(errors))
        }
    }
}
