//! Canonical property record.
//!
//! The fixed, source-independent output schema. Every field is optional
//! since no single source populates all of them.

use serde::{Deserialize, Serialize};

/// One entry of a property's price history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceEvent {
    /// Event text as reported by the source (`"Sold"`, `"Listed for sale"`, ...)
    pub event: Option<String>,
    /// `YYYY-MM-DD` when the source gave a timestamp, otherwise verbatim
    pub date: Option<String>,
    pub price: Option<i64>,
}

impl PriceEvent {
    pub fn is_empty(&self) -> bool {
        self.event.is_none() && self.date.is_none() && self.price.is_none()
    }

    /// Whether the event text mentions a sale
    pub fn is_sale(&self) -> bool {
        self.event
            .as_deref()
            .is_some_and(|e| e.to_lowercase().contains("sold"))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalRecord {
    // Identifiers
    pub zpid: Option<i64>,
    pub home_type: Option<String>,
    pub home_status: Option<String>,

    // Structure
    pub year_built: Option<i64>,
    pub lot_size: Option<f64>,
    pub living_area: Option<i64>,
    pub num_bedrooms: Option<i64>,
    pub num_bathrooms: Option<f64>,
    pub num_floors: Option<i64>,
    pub num_parking_spaces: Option<i64>,
    pub parking: Option<String>,
    pub parking_features: Option<Vec<String>>,
    pub garage_spaces: Option<i64>,
    pub pool: Option<bool>,
    pub roof_type: Option<String>,
    pub sewer: Option<Vec<String>>,
    pub water: Option<Vec<String>>,

    // Location
    pub county: Option<String>,

    // Valuation
    pub zestimate: Option<i64>,
    pub zestimate_low: Option<i64>,
    pub zestimate_high: Option<i64>,
    pub rent_zestimate: Option<i64>,

    // Costs
    pub monthly_hoa_fee: Option<i64>,
    pub tax_annual_amount: Option<f64>,
    pub tax_assessed_value: Option<i64>,

    // History
    pub last_sold_price: Option<i64>,
    pub last_sold_date: Option<String>,
    pub price_history: Option<Vec<PriceEvent>>,

    // Media
    pub img_src: Option<String>,
    pub photos: Option<Vec<String>>,
    #[serde(rename = "property_url")]
    pub property_url: Option<String>,
}

impl CanonicalRecord {
    /// Whether a point valuation was found
    pub fn has_valuation(&self) -> bool {
        self.zestimate.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_with_canonical_names() {
        let record = CanonicalRecord {
            zpid: Some(42),
            zestimate_low: Some(100),
            property_url: Some("https://example.test/homes/42_zpid/".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["zpid"], 42);
        assert_eq!(json["zestimateLow"], 100);
        assert_eq!(json["property_url"], "https://example.test/homes/42_zpid/");
        assert!(json["numBedrooms"].is_null());
        assert!(json.get("priceHistory").is_some());
    }

    #[test]
    fn test_price_event_is_sale() {
        let sold = PriceEvent {
            event: Some("SOLD".to_string()),
            ..Default::default()
        };
        let listed = PriceEvent {
            event: Some("Listed for sale".to_string()),
            ..Default::default()
        };
        assert!(sold.is_sale());
        assert!(!listed.is_sale());
        assert!(PriceEvent::default().is_empty());
    }
}
