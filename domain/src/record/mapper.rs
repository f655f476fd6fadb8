//! Maps an accepted raw candidate into a [`CanonicalRecord`].

use super::canonical::{CanonicalRecord, PriceEvent};
use crate::extraction::path::{
    coerce_integer, coerce_text, extract, extract_bool, extract_f64, extract_i64,
    extract_str, extract_string_list, walk,
};
use crate::extraction::paths::FieldPaths;
use crate::scoring::scorer::{IDENTIFIER_FALLBACK, VALUATION_FALLBACK};
use crate::source::attempt::SourceKind;
use chrono::DateTime;
use serde_json::Value;

/// Timestamps above this are epoch milliseconds rather than seconds
const EPOCH_MILLIS_THRESHOLD: i64 = 100_000_000_000;

const PHOTO_URL_PATHS: &[&str] = &[
    "url",
    "mixedSources.jpeg.0.url",
    "mixedSources.webp.0.url",
    "src",
];

/// Source-aware mapper from raw candidates to canonical records.
#[derive(Debug, Clone)]
pub struct FieldMapper {
    kind: SourceKind,
    site_base: Option<String>,
}

impl FieldMapper {
    pub fn new(kind: SourceKind) -> Self {
        Self {
            kind,
            site_base: None,
        }
    }

    /// Base URL that relative detail links are joined to
    pub fn with_site_base(mut self, base: Option<String>) -> Self {
        self.site_base = base.filter(|b| !b.trim().is_empty());
        self
    }

    pub fn map(&self, candidate: &Value) -> CanonicalRecord {
        let paths = FieldPaths::for_source(self.kind);
        let int = |p: &[&str]| extract_i64(candidate, p);
        let text = |p: &[&str]| extract_str(candidate, p);

        let zpid = int(paths.zpid)
            .or_else(|| IDENTIFIER_FALLBACK.find(candidate));
        let zestimate = int(paths.zestimate)
            .or_else(|| VALUATION_FALLBACK.find(candidate));
        let (zestimate_low, zestimate_high) = self.valuation_range(candidate, zestimate);

        let price_history = price_history(candidate, paths.price_history);
        let (last_sold_price, last_sold_date) = self.last_sale(candidate, price_history.as_deref());

        let photos = photos(candidate, paths);
        let img_src = text(paths.img_src)
            .or_else(|| photos.as_ref().and_then(|p| p.first().cloned()));

        CanonicalRecord {
            zpid,
            home_type: text(paths.home_type),
            home_status: text(paths.home_status),
            year_built: int(paths.year_built),
            lot_size: extract_f64(candidate, paths.lot_size),
            living_area: int(paths.living_area),
            num_bedrooms: int(paths.bedrooms),
            num_bathrooms: extract_f64(candidate, paths.bathrooms),
            num_floors: int(paths.floors),
            num_parking_spaces: int(paths.parking_spaces),
            parking: text(paths.parking),
            parking_features: extract_string_list(candidate, paths.parking_features),
            garage_spaces: int(paths.garage_spaces),
            pool: pool(candidate, paths.pool),
            roof_type: text(paths.roof_type),
            sewer: extract_string_list(candidate, paths.sewer),
            water: extract_string_list(candidate, paths.water),
            county: text(paths.county),
            zestimate,
            zestimate_low,
            zestimate_high,
            rent_zestimate: int(paths.rent_zestimate),
            monthly_hoa_fee: int(paths.monthly_hoa_fee),
            tax_annual_amount: extract_f64(candidate, paths.tax_annual_amount),
            tax_assessed_value: int(paths.tax_assessed_value),
            last_sold_price,
            last_sold_date,
            price_history,
            img_src,
            photos,
            property_url: self.property_url(candidate),
        }
    }

    /// Explicit low/high values, else a percentage band around the point value.
    fn valuation_range(&self, candidate: &Value, zestimate: Option<i64>) -> (Option<i64>, Option<i64>) {
        let paths = FieldPaths::for_source(self.kind);
        let band = |percent_paths: &[&str], sign: f64| {
            let point = zestimate?;
            let percent = extract_f64(candidate, percent_paths)?;
            Some((point as f64 * (1.0 + sign * percent / 100.0)).round() as i64)
        };

        let low = extract_i64(candidate, paths.zestimate_low)
            .or_else(|| band(paths.zestimate_low_percent, -1.0));
        let high = extract_i64(candidate, paths.zestimate_high)
            .or_else(|| band(paths.zestimate_high_percent, 1.0));
        (low, high)
    }

    /// Explicit last-sale fields, else the first "sold" history entry.
    fn last_sale(
        &self,
        candidate: &Value,
        history: Option<&[PriceEvent]>,
    ) -> (Option<i64>, Option<String>) {
        let paths = FieldPaths::for_source(self.kind);
        let explicit_price = extract_i64(candidate, paths.last_sold_price);
        let explicit_date = extract(candidate, paths.last_sold_date).and_then(render_date);

        let sale = history.and_then(|events| events.iter().find(|e| e.is_sale()));
        let price = explicit_price.or_else(|| sale.and_then(|e| e.price));
        let date = explicit_date.or_else(|| sale.and_then(|e| e.date.clone()));
        (price, date)
    }

    fn property_url(&self, candidate: &Value) -> Option<String> {
        let paths = FieldPaths::for_source(self.kind);
        let link = extract_str(candidate, paths.property_url)
            .or_else(|| extract_str(candidate, paths.detail_url))?;
        if link.starts_with('/') {
            match &self.site_base {
                Some(base) => Some(format!("{}{}", base.trim_end_matches('/'), link)),
                None => Some(link),
            }
        } else {
            Some(link)
        }
    }
}

fn price_history(candidate: &Value, paths: &[&str]) -> Option<Vec<PriceEvent>> {
    let Some(Value::Array(entries)) = extract(candidate, paths) else {
        return None;
    };
    let events: Vec<PriceEvent> = entries
        .iter()
        .map(|entry| PriceEvent {
            event: extract_str(entry, &["event", "eventType", "type"]),
            date: extract(entry, &["date", "time", "eventDate"]).and_then(render_date),
            price: extract(entry, &["price", "amount"]).and_then(coerce_integer),
        })
        .filter(|event| !event.is_empty())
        .collect();
    (!events.is_empty()).then_some(events)
}

/// Render a date value: epoch numbers become `YYYY-MM-DD`, text is kept.
fn render_date(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => {
            let raw = n.as_i64()?;
            let millis = if raw.abs() >= EPOCH_MILLIS_THRESHOLD {
                raw
            } else {
                raw.saturating_mul(1000)
            };
            DateTime::from_timestamp_millis(millis).map(|dt| dt.format("%Y-%m-%d").to_string())
        }
        other => coerce_text(other),
    }
}

fn photos(candidate: &Value, paths: &FieldPaths) -> Option<Vec<String>> {
    let mut urls: Vec<String> = Vec::new();
    for list_paths in [paths.photos, paths.responsive_photos] {
        let Some(Value::Array(entries)) = extract(candidate, list_paths) else {
            continue;
        };
        for entry in entries {
            let url = match entry {
                Value::String(_) => coerce_text(entry),
                _ => extract_str(entry, PHOTO_URL_PATHS),
            };
            if let Some(url) = url
                && !urls.contains(&url)
            {
                urls.push(url);
            }
        }
        if !urls.is_empty() {
            break;
        }
    }
    (!urls.is_empty()).then_some(urls)
}

fn pool(candidate: &Value, paths: &[&str]) -> Option<bool> {
    extract_bool(candidate, paths).or_else(|| {
        let features = paths
            .iter()
            .filter_map(|p| walk(candidate, p))
            .find_map(|v| v.as_array())?;
        let present: Vec<String> = features.iter().filter_map(coerce_text).collect();
        (!present.is_empty()).then(|| present.iter().any(|f| !f.eq_ignore_ascii_case("none")))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_maps_api_body() {
        let body = json!({
            "zpid": 20483921,
            "address": {"streetAddress": "123 Main Street", "city": "Springfield", "state": "IL", "zipcode": "62704"},
            "homeType": "SINGLE_FAMILY",
            "homeStatus": "OTHER",
            "yearBuilt": 1954,
            "livingArea": 1850,
            "lotSize": 7405,
            "bedrooms": 3,
            "bathrooms": 2.5,
            "zestimate": 245000,
            "zestimateLowPercent": "6",
            "zestimateHighPercent": "8",
            "rentZestimate": 1750,
            "county": "Sangamon County",
            "monthlyHoaFee": null,
            "resoFacts": {
                "stories": 2,
                "parkingCapacity": 2,
                "parkingFeatures": ["Attached Garage", "Driveway"],
                "garageParkingCapacity": 2,
                "hasPrivatePool": false,
                "roofType": "Asphalt",
                "sewer": ["Public Sewer"],
                "waterSource": ["Public"],
                "taxAnnualAmount": 4521.33,
                "taxAssessedValue": 61230
            },
            "url": "https://www.zillow.com/homedetails/20483921_zpid/"
        });

        let record = FieldMapper::new(SourceKind::Api).map(&body);
        assert_eq!(record.zpid, Some(20483921));
        assert_eq!(record.home_type.as_deref(), Some("SINGLE_FAMILY"));
        assert_eq!(record.year_built, Some(1954));
        assert_eq!(record.num_bathrooms, Some(2.5));
        assert_eq!(record.num_floors, Some(2));
        assert_eq!(record.zestimate, Some(245000));
        assert_eq!(record.zestimate_low, Some(230300));
        assert_eq!(record.zestimate_high, Some(264600));
        assert_eq!(record.pool, Some(false));
        assert_eq!(record.tax_annual_amount, Some(4521.33));
        assert_eq!(record.tax_assessed_value, Some(61230));
        assert_eq!(record.monthly_hoa_fee, None);
        assert_eq!(
            record.parking_features,
            Some(vec!["Attached Garage".to_string(), "Driveway".to_string()])
        );
        assert_eq!(
            record.property_url.as_deref(),
            Some("https://www.zillow.com/homedetails/20483921_zpid/")
        );
    }

    #[test]
    fn test_explicit_range_beats_percent_band() {
        let body = json!({
            "zestimate": 100000,
            "zestimateLow": 95000,
            "zestimateLowPercent": "50",
            "zestimateHighPercent": "10"
        });
        let record = FieldMapper::new(SourceKind::Api).map(&body);
        assert_eq!(record.zestimate_low, Some(95000));
        assert_eq!(record.zestimate_high, Some(110000));
    }

    #[test]
    fn test_band_requires_point_valuation() {
        let body = json!({"zestimateLowPercent": "5", "zpid": 1234});
        let record = FieldMapper::new(SourceKind::Api).map(&body);
        assert_eq!(record.zestimate, None);
        assert_eq!(record.zestimate_low, None);
    }

    #[test]
    fn test_last_sale_from_history() {
        let body = json!({
            "priceHistory": [
                {"event": "Listed for sale", "date": "2023-04-01", "price": 260000},
                {"event": "Sold", "time": 1623715200000_i64, "price": "$231,000"},
                {"event": "Sold", "date": "2010-01-01", "price": 120000}
            ]
        });
        let record = FieldMapper::new(SourceKind::Api).map(&body);
        assert_eq!(record.last_sold_price, Some(231000));
        assert_eq!(record.last_sold_date.as_deref(), Some("2021-06-15"));
        let history = record.price_history.unwrap();
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].event.as_deref(), Some("Listed for sale"));
    }

    #[test]
    fn test_explicit_last_sale_wins() {
        let body = json!({
            "lastSoldPrice": 300000,
            "dateSold": "2022-02-02",
            "priceHistory": [{"event": "Sold", "date": "2010-01-01", "price": 120000}]
        });
        let record = FieldMapper::new(SourceKind::Api).map(&body);
        assert_eq!(record.last_sold_price, Some(300000));
        assert_eq!(record.last_sold_date.as_deref(), Some("2022-02-02"));
    }

    #[test]
    fn test_maps_search_list_entry() {
        let entry = json!({
            "zpid": "58213344",
            "address": "413 E 5th St, Austin, TX 78701",
            "detailUrl": "/homedetails/413-E-5th-St-Austin-TX-78701/58213344_zpid/",
            "imgSrc": "https://photos.example.test/a.jpg",
            "hdpData": {"homeInfo": {
                "zestimate": 512000,
                "rentZestimate": 2900,
                "bedrooms": 2,
                "bathrooms": 2,
                "livingArea": 1100,
                "homeType": "CONDO",
                "homeStatus": "FOR_SALE",
                "dateSold": 1623715200000_i64
            }}
        });
        let record = FieldMapper::new(SourceKind::Document)
            .with_site_base(Some("https://www.zillow.com/".to_string()))
            .map(&entry);
        assert_eq!(record.zpid, Some(58213344));
        assert_eq!(record.zestimate, Some(512000));
        assert_eq!(record.num_bedrooms, Some(2));
        assert_eq!(record.home_type.as_deref(), Some("CONDO"));
        assert_eq!(record.last_sold_date.as_deref(), Some("2021-06-15"));
        assert_eq!(
            record.property_url.as_deref(),
            Some("https://www.zillow.com/homedetails/413-E-5th-St-Austin-TX-78701/58213344_zpid/")
        );
        assert_eq!(record.img_src.as_deref(), Some("https://photos.example.test/a.jpg"));
    }

    #[test]
    fn test_photos_from_mixed_sources() {
        let body = json!({
            "photos": [
                {"mixedSources": {"jpeg": [{"url": "https://p/1.jpg", "width": 192}]}},
                {"url": "https://p/2.jpg"},
                {"url": "https://p/2.jpg"},
                "https://p/3.jpg"
            ]
        });
        let record = FieldMapper::new(SourceKind::Api).map(&body);
        assert_eq!(
            record.photos,
            Some(vec![
                "https://p/1.jpg".to_string(),
                "https://p/2.jpg".to_string(),
                "https://p/3.jpg".to_string()
            ])
        );
        assert_eq!(record.img_src.as_deref(), Some("https://p/1.jpg"));
    }

    #[test]
    fn test_pool_from_feature_list() {
        let body = json!({"resoFacts": {"poolFeatures": ["In Ground"]}});
        assert_eq!(FieldMapper::new(SourceKind::Api).map(&body).pool, Some(true));
        let body = json!({"resoFacts": {"poolFeatures": ["None"]}});
        assert_eq!(FieldMapper::new(SourceKind::Api).map(&body).pool, Some(false));
    }

    #[test]
    fn test_numeric_fallback_for_identifier() {
        let body = json!({"listing": {"meta": {"zpid": 77441122}}});
        let record = FieldMapper::new(SourceKind::Api).map(&body);
        assert_eq!(record.zpid, Some(77441122));
    }

    #[test]
    fn test_render_date_seconds_and_text() {
        assert_eq!(render_date(&json!(1623715200)).as_deref(), Some("2021-06-15"));
        assert_eq!(render_date(&json!("06/15/2021")).as_deref(), Some("06/15/2021"));
        assert_eq!(render_date(&json!(null)), None);
    }
}
