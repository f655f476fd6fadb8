//! Query value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// A validated property lookup request (Value Object)
///
/// Address, city and state are required and stored trimmed. The zip code is
/// optional; an empty zip is treated the same as a missing one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    address: String,
    city: String,
    state: String,
    zip: Option<String>,
}

impl Query {
    /// Create a new query, rejecting blank required fields
    pub fn new(
        address: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        zip: Option<String>,
    ) -> Result<Self, DomainError> {
        let address = required("address", address.into())?;
        let city = required("city", city.into())?;
        let state = required("state", state.into())?;
        let zip = zip
            .map(|z| z.trim().to_string())
            .filter(|z| !z.is_empty());

        Ok(Self {
            address,
            city,
            state,
            zip,
        })
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn state(&self) -> &str {
        &self.state
    }

    /// Zip code, `None` when absent or blank
    pub fn zip(&self) -> Option<&str> {
        self.zip.as_deref()
    }

    /// Zip code or the empty string
    pub fn zip_or_empty(&self) -> &str {
        self.zip.as_deref().unwrap_or("")
    }

    /// Single-line form: `"<address>, <city>, <state> <zip>"`
    pub fn one_line(&self) -> String {
        match &self.zip {
            Some(zip) => format!("{}, {}, {} {}", self.address, self.city, self.state, zip),
            None => format!("{}, {}, {}", self.address, self.city, self.state),
        }
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.one_line())
    }
}

fn required(field: &'static str, value: String) -> Result<String, DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(DomainError::MissingField(field))
    } else {
        Ok(trimmed.to_string())
    }
}
