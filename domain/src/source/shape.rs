//! Endpoint shapes: the different ways a remote lookup can be parameterized.
//!
//! The provider accepts several parameter layouts and which one works varies
//! by property type and region, so the engine tries a fixed, ordered list of
//! them for each address variant.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a shape packages the (variant, city, state, zip) tuple into
/// query parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamStyle {
    /// `address=<variant>, <city>, <state> <zip>`
    FullAddress,
    /// `street=<variant>&city=<city>&state=<state>&zipcode=<zip>`
    Components,
    /// `location=<variant> <city> <state> <zip>`
    Location,
    /// `address=<variant>&zipcode=<zip>`, falling back to city/state when
    /// the zip is missing
    StreetAndZip,
}

impl ParamStyle {
    /// Build the query parameters for this style.
    ///
    /// Empty components are omitted rather than sent blank.
    pub fn build(
        &self,
        variant: &str,
        city: &str,
        state: &str,
        zip: &str,
    ) -> Vec<(String, String)> {
        let pair = |k: &str, v: String| (k.to_string(), v);
        match self {
            ParamStyle::FullAddress => {
                let tail = if zip.is_empty() {
                    state.to_string()
                } else {
                    format!("{} {}", state, zip)
                };
                vec![pair("address", format!("{}, {}, {}", variant, city, tail))]
            }
            ParamStyle::Components => {
                let mut params = vec![
                    pair("street", variant.to_string()),
                    pair("city", city.to_string()),
                    pair("state", state.to_string()),
                ];
                if !zip.is_empty() {
                    params.push(pair("zipcode", zip.to_string()));
                }
                params
            }
            ParamStyle::Location => {
                let location = [variant, city, state, zip]
                    .iter()
                    .filter(|s| !s.is_empty())
                    .copied()
                    .collect::<Vec<_>>()
                    .join(" ");
                vec![pair("location", location)]
            }
            ParamStyle::StreetAndZip => {
                if zip.is_empty() {
                    vec![
                        pair("address", variant.to_string()),
                        pair("citystatezip", format!("{}, {}", city, state)),
                    ]
                } else {
                    vec![
                        pair("address", variant.to_string()),
                        pair("zipcode", zip.to_string()),
                    ]
                }
            }
        }
    }
}

impl fmt::Display for ParamStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParamStyle::FullAddress => "full_address",
            ParamStyle::Components => "components",
            ParamStyle::Location => "location",
            ParamStyle::StreetAndZip => "street_and_zip",
        };
        write!(f, "{}", name)
    }
}

impl std::str::FromStr for ParamStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "full_address" | "full" | "address" => Ok(ParamStyle::FullAddress),
            "components" | "parts" => Ok(ParamStyle::Components),
            "location" => Ok(ParamStyle::Location),
            "street_and_zip" | "street_zip" => Ok(ParamStyle::StreetAndZip),
            _ => Err(format!("Invalid ParamStyle: {}", s)),
        }
    }
}

/// One (path, parameter style) pair tried against the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointShape {
    /// Endpoint path relative to the API base, e.g. `/property`
    pub path: String,
    pub style: ParamStyle,
}

impl EndpointShape {
    /// Create a shape; the path must start with `/`.
    pub fn new(path: impl Into<String>, style: ParamStyle) -> Result<Self, DomainError> {
        let path = path.into();
        if !path.starts_with('/') {
            return Err(DomainError::InvalidShape(format!(
                "path '{}' must start with '/'",
                path
            )));
        }
        Ok(Self { path, style })
    }

    /// The default priority order of shapes
    pub fn default_shapes() -> Vec<EndpointShape> {
        vec![
            EndpointShape {
                path: "/property".to_string(),
                style: ParamStyle::FullAddress,
            },
            EndpointShape {
                path: "/property".to_string(),
                style: ParamStyle::Components,
            },
            EndpointShape {
                path: "/propertyExtendedSearch".to_string(),
                style: ParamStyle::Location,
            },
            EndpointShape {
                path: "/property".to_string(),
                style: ParamStyle::StreetAndZip,
            },
        ]
    }
}

impl fmt::Display for EndpointShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.path, self.style)
    }
}
