//! Candidate path lists per canonical field.
//!
//! Page blobs put listing facts under `hdpData.homeInfo`, detail caches put
//! them at the top level with structured facts under `resoFacts`, and API
//! bodies sometimes wrap the record in `property`. Each source kind gets its
//! own priority order over those locations.

use crate::source::attempt::SourceKind;

type Paths = &'static [&'static str];

/// Ordered lookup paths for every field the engine reads.
#[derive(Debug)]
pub struct FieldPaths {
    // Location (used for scoring)
    pub full_address: Paths,
    pub street: Paths,
    pub city: Paths,
    pub state: Paths,
    pub zip: Paths,

    // Identifiers and valuation
    pub zpid: Paths,
    pub zestimate: Paths,
    pub zestimate_low: Paths,
    pub zestimate_high: Paths,
    pub zestimate_low_percent: Paths,
    pub zestimate_high_percent: Paths,
    pub rent_zestimate: Paths,

    // Structure
    pub home_type: Paths,
    pub year_built: Paths,
    pub lot_size: Paths,
    pub living_area: Paths,
    pub bedrooms: Paths,
    pub bathrooms: Paths,
    pub floors: Paths,
    pub parking_spaces: Paths,
    pub parking: Paths,
    pub parking_features: Paths,
    pub garage_spaces: Paths,
    pub pool: Paths,
    pub roof_type: Paths,
    pub sewer: Paths,
    pub water: Paths,
    pub county: Paths,

    // Status, costs, history
    pub home_status: Paths,
    pub monthly_hoa_fee: Paths,
    pub tax_annual_amount: Paths,
    pub tax_assessed_value: Paths,
    pub last_sold_price: Paths,
    pub last_sold_date: Paths,
    pub price_history: Paths,

    // Media and links
    pub img_src: Paths,
    pub photos: Paths,
    pub responsive_photos: Paths,
    pub property_url: Paths,
    pub detail_url: Paths,
}

impl FieldPaths {
    /// Path table for the given source kind
    pub fn for_source(kind: SourceKind) -> &'static FieldPaths {
        match kind {
            SourceKind::Document => &DOCUMENT_PATHS,
            SourceKind::Api => &API_PATHS,
        }
    }
}

/// Page blobs: listing entries first, then detail-cache layout.
pub static DOCUMENT_PATHS: FieldPaths = FieldPaths {
    full_address: &["address", "hdpData.homeInfo.fullAddress"],
    street: &[
        "addressStreet",
        "hdpData.homeInfo.streetAddress",
        "streetAddress",
        "address.streetAddress",
    ],
    city: &["addressCity", "hdpData.homeInfo.city", "city", "address.city"],
    state: &["addressState", "hdpData.homeInfo.state", "state", "address.state"],
    zip: &[
        "addressZipcode",
        "hdpData.homeInfo.zipcode",
        "zipcode",
        "address.zipcode",
    ],

    zpid: &["zpid", "hdpData.homeInfo.zpid", "id"],
    zestimate: &["zestimate", "hdpData.homeInfo.zestimate"],
    zestimate_low: &["zestimateLow", "zestimateLowValue"],
    zestimate_high: &["zestimateHigh", "zestimateHighValue"],
    zestimate_low_percent: &["zestimateLowPercent"],
    zestimate_high_percent: &["zestimateHighPercent"],
    rent_zestimate: &["rentZestimate", "hdpData.homeInfo.rentZestimate"],

    home_type: &["homeType", "hdpData.homeInfo.homeType", "resoFacts.homeType"],
    year_built: &["yearBuilt", "resoFacts.yearBuilt", "hdpData.homeInfo.yearBuilt"],
    lot_size: &[
        "lotSize",
        "lotAreaValue",
        "hdpData.homeInfo.lotAreaValue",
        "resoFacts.lotSize",
    ],
    living_area: &[
        "livingArea",
        "hdpData.homeInfo.livingArea",
        "area",
        "resoFacts.livingArea",
    ],
    bedrooms: &["bedrooms", "hdpData.homeInfo.bedrooms", "beds", "resoFacts.bedrooms"],
    bathrooms: &[
        "bathrooms",
        "hdpData.homeInfo.bathrooms",
        "baths",
        "resoFacts.bathrooms",
    ],
    floors: &["resoFacts.stories", "resoFacts.storiesTotal", "stories"],
    parking_spaces: &["resoFacts.parkingCapacity", "parkingCapacity"],
    parking: &["resoFacts.parking", "parking", "resoFacts.hasGarage"],
    parking_features: &["resoFacts.parkingFeatures", "parkingFeatures"],
    garage_spaces: &["resoFacts.garageParkingCapacity", "resoFacts.garageSpaces"],
    pool: &["resoFacts.hasPrivatePool", "resoFacts.poolFeatures", "hasPool"],
    roof_type: &["resoFacts.roofType", "roofType"],
    sewer: &["resoFacts.sewer", "sewer"],
    water: &["resoFacts.waterSource", "resoFacts.water", "water"],
    county: &["county", "resoFacts.countyOrParish", "address.county"],

    home_status: &["homeStatus", "hdpData.homeInfo.homeStatus", "statusType"],
    monthly_hoa_fee: &["monthlyHoaFee", "resoFacts.hoaFee", "hoaFee"],
    tax_annual_amount: &[
        "resoFacts.taxAnnualAmount",
        "taxAnnualAmount",
        "taxHistory.0.taxPaid",
    ],
    tax_assessed_value: &[
        "taxAssessedValue",
        "hdpData.homeInfo.taxAssessedValue",
        "resoFacts.taxAssessedValue",
        "taxHistory.0.value",
    ],
    last_sold_price: &["lastSoldPrice", "hdpData.homeInfo.lastSoldPrice"],
    last_sold_date: &["dateSold", "lastSoldDate", "hdpData.homeInfo.dateSold"],
    price_history: &["priceHistory"],

    img_src: &["imgSrc", "hiResImageLink", "desktopWebHdpImageLink"],
    photos: &["photos", "originalPhotos"],
    responsive_photos: &["responsivePhotos"],
    property_url: &["url", "hdpUrl"],
    detail_url: &["detailUrl", "hdpData.homeInfo.detailUrl"],
};

/// API bodies: top level first, then a `property` wrapper, then facts.
pub static API_PATHS: FieldPaths = FieldPaths {
    full_address: &["address", "property.address", "fullAddress"],
    street: &[
        "address.streetAddress",
        "streetAddress",
        "property.address.streetAddress",
        "property.streetAddress",
    ],
    city: &["address.city", "city", "property.address.city", "property.city"],
    state: &["address.state", "state", "property.address.state", "property.state"],
    zip: &[
        "address.zipcode",
        "zipcode",
        "property.address.zipcode",
        "property.zipcode",
    ],

    zpid: &["zpid", "property.zpid"],
    zestimate: &["zestimate", "property.zestimate"],
    zestimate_low: &["zestimateLow", "property.zestimateLow"],
    zestimate_high: &["zestimateHigh", "property.zestimateHigh"],
    zestimate_low_percent: &["zestimateLowPercent", "property.zestimateLowPercent"],
    zestimate_high_percent: &["zestimateHighPercent", "property.zestimateHighPercent"],
    rent_zestimate: &["rentZestimate", "property.rentZestimate"],

    home_type: &["homeType", "property.homeType", "resoFacts.homeType"],
    year_built: &["yearBuilt", "property.yearBuilt", "resoFacts.yearBuilt"],
    lot_size: &[
        "lotSize",
        "property.lotSize",
        "lotAreaValue",
        "resoFacts.lotSize",
    ],
    living_area: &["livingArea", "property.livingArea", "resoFacts.livingArea"],
    bedrooms: &["bedrooms", "property.bedrooms", "resoFacts.bedrooms"],
    bathrooms: &["bathrooms", "property.bathrooms", "resoFacts.bathrooms"],
    floors: &[
        "resoFacts.stories",
        "resoFacts.storiesTotal",
        "property.resoFacts.stories",
    ],
    parking_spaces: &["resoFacts.parkingCapacity", "property.resoFacts.parkingCapacity"],
    parking: &["resoFacts.parking", "parking", "resoFacts.hasGarage"],
    parking_features: &["resoFacts.parkingFeatures", "property.resoFacts.parkingFeatures"],
    garage_spaces: &[
        "resoFacts.garageParkingCapacity",
        "resoFacts.garageSpaces",
        "property.resoFacts.garageParkingCapacity",
    ],
    pool: &["resoFacts.hasPrivatePool", "resoFacts.poolFeatures"],
    roof_type: &["resoFacts.roofType", "property.resoFacts.roofType"],
    sewer: &["resoFacts.sewer", "property.resoFacts.sewer"],
    water: &["resoFacts.waterSource", "resoFacts.water", "property.resoFacts.waterSource"],
    county: &["county", "property.county", "resoFacts.countyOrParish"],

    home_status: &["homeStatus", "property.homeStatus"],
    monthly_hoa_fee: &["monthlyHoaFee", "resoFacts.hoaFee", "property.monthlyHoaFee"],
    tax_annual_amount: &[
        "resoFacts.taxAnnualAmount",
        "taxAnnualAmount",
        "taxHistory.0.taxPaid",
    ],
    tax_assessed_value: &[
        "resoFacts.taxAssessedValue",
        "taxAssessedValue",
        "taxHistory.0.value",
    ],
    last_sold_price: &["lastSoldPrice", "property.lastSoldPrice"],
    last_sold_date: &["dateSold", "lastSoldDate", "property.dateSold"],
    price_history: &["priceHistory", "property.priceHistory"],

    img_src: &["imgSrc", "property.imgSrc", "hiResImageLink"],
    photos: &["photos", "originalPhotos", "property.photos"],
    responsive_photos: &["responsivePhotos", "property.responsivePhotos"],
    property_url: &["url", "property.url", "hdpUrl"],
    detail_url: &["detailUrl", "property.detailUrl"],
};
