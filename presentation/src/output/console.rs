//! Console output formatter for resolution results

use crate::output::formatter::OutputFormatter;
use colored::{ColoredString, Colorize};
use parcel_domain::{CanonicalRecord, Query, ResolutionResult};

/// Price history rows shown in the summary
const HISTORY_ROWS: usize = 5;

/// Formats resolution results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Summary of the result, with the query as a title when known
    pub fn format(result: &ResolutionResult, query: Option<&Query>) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Property Resolution"));
        output.push('\n');

        if let Some(query) = query {
            output.push_str(&format!("{} {}\n", "Query:".cyan().bold(), query));
        }

        if !result.ok {
            output.push_str(&format!(
                "{} {}\n",
                "Failed:".red().bold(),
                result.error.as_deref().unwrap_or("unknown error")
            ));
            output.push_str(&Self::footer());
            return output;
        }

        let Some(record) = &result.canonical_record else {
            output.push_str(&format!("{} no matching property\n", "Result:".yellow().bold()));
            if let Some(note) = &result.note {
                output.push_str(&format!("{} {}\n", "Note:".dimmed(), note));
            }
            output.push_str(&Self::footer());
            return output;
        };

        output.push_str(&format!(
            "{} {}\n",
            "Source:".cyan().bold(),
            result.source_description
        ));
        output.push_str(&format!(
            "{} {}\n",
            "Confidence:".cyan().bold(),
            Self::confidence(result.match_confidence)
        ));

        Self::valuation_section(&mut output, record);
        Self::facts_section(&mut output, record);
        Self::sale_section(&mut output, record);
        Self::links_section(&mut output, record);

        output.push_str(&Self::footer());
        output
    }

    /// Format as JSON
    pub fn format_json(result: &ResolutionResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
    }

    fn valuation_section(output: &mut String, record: &CanonicalRecord) {
        let mut rows = Vec::new();
        if let Some(value) = record.zestimate {
            rows.push(("Zestimate", money(value)));
        }
        if let (Some(low), Some(high)) = (record.zestimate_low, record.zestimate_high) {
            rows.push(("Range", format!("{} - {}", money(low), money(high))));
        }
        if let Some(rent) = record.rent_zestimate {
            rows.push(("Rent", format!("{}/mo", money(rent))));
        }
        Self::section(output, "Valuation", rows);
    }

    fn facts_section(output: &mut String, record: &CanonicalRecord) {
        let mut rows = Vec::new();
        if let Some(id) = record.zpid {
            rows.push(("zpid", id.to_string()));
        }
        if let Some(home_type) = &record.home_type {
            rows.push(("Type", home_type.clone()));
        }
        if let Some(year) = record.year_built {
            rows.push(("Built", year.to_string()));
        }
        let rooms = match (record.num_bedrooms, record.num_bathrooms) {
            (Some(beds), Some(baths)) => Some(format!("{} bd / {} ba", beds, baths)),
            (Some(beds), None) => Some(format!("{} bd", beds)),
            (None, Some(baths)) => Some(format!("{} ba", baths)),
            (None, None) => None,
        };
        if let Some(rooms) = rooms {
            rows.push(("Rooms", rooms));
        }
        if let Some(area) = record.living_area {
            rows.push(("Living area", format!("{} sqft", thousands(area))));
        }
        if let Some(lot) = record.lot_size {
            rows.push(("Lot", format!("{} sqft", thousands(lot.round() as i64))));
        }
        if let Some(floors) = record.num_floors {
            rows.push(("Floors", floors.to_string()));
        }
        let parking = [
            record.garage_spaces.map(|n| format!("{} garage", n)),
            record.num_parking_spaces.map(|n| format!("{} spaces", n)),
            record.parking.clone(),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>();
        if !parking.is_empty() {
            rows.push(("Parking", parking.join(", ")));
        }
        if let Some(pool) = record.pool {
            rows.push(("Pool", if pool { "yes" } else { "no" }.to_string()));
        }
        if let Some(roof) = &record.roof_type {
            rows.push(("Roof", roof.clone()));
        }
        if let Some(sewer) = &record.sewer {
            rows.push(("Sewer", sewer.join(", ")));
        }
        if let Some(water) = &record.water {
            rows.push(("Water", water.join(", ")));
        }
        if let Some(county) = &record.county {
            rows.push(("County", county.clone()));
        }
        Self::section(output, "Facts", rows);
    }

    fn sale_section(output: &mut String, record: &CanonicalRecord) {
        let mut rows = Vec::new();
        if let Some(status) = &record.home_status {
            rows.push(("Status", status.clone()));
        }
        match (record.last_sold_price, &record.last_sold_date) {
            (Some(price), Some(date)) => rows.push(("Last sold", format!("{} on {}", money(price), date))),
            (Some(price), None) => rows.push(("Last sold", money(price))),
            (None, Some(date)) => rows.push(("Last sold", date.clone())),
            (None, None) => {}
        }
        if let Some(hoa) = record.monthly_hoa_fee {
            rows.push(("HOA", format!("{}/mo", money(hoa))));
        }
        if let Some(tax) = record.tax_annual_amount {
            rows.push(("Tax", format!("{}/yr", money(tax.round() as i64))));
        }
        if let Some(assessed) = record.tax_assessed_value {
            rows.push(("Assessed", money(assessed)));
        }
        if let Some(history) = &record.price_history {
            for event in history.iter().take(HISTORY_ROWS) {
                let line = [
                    event.date.clone(),
                    event.event.clone(),
                    event.price.map(money),
                ]
                .into_iter()
                .flatten()
                .collect::<Vec<_>>()
                .join("  ");
                rows.push(("History", line));
            }
            if history.len() > HISTORY_ROWS {
                rows.push(("History", format!("... {} more", history.len() - HISTORY_ROWS)));
            }
        }
        Self::section(output, "Sale & costs", rows);
    }

    fn links_section(output: &mut String, record: &CanonicalRecord) {
        let mut rows = Vec::new();
        if let Some(url) = &record.property_url {
            rows.push(("Page", url.clone()));
        }
        if let Some(img) = &record.img_src {
            rows.push(("Image", img.clone()));
        }
        if let Some(photos) = record.photos.as_ref().filter(|p| !p.is_empty()) {
            rows.push(("Photos", photos.len().to_string()));
        }
        Self::section(output, "Links", rows);
    }

    fn section(output: &mut String, title: &str, rows: Vec<(&str, String)>) {
        if rows.is_empty() {
            return;
        }
        output.push_str(&Self::section_header(title));
        for (label, value) in rows {
            output.push_str(&format!("  {:<12} {}\n", format!("{}:", label).dimmed(), value));
        }
    }

    fn confidence(value: u8) -> ColoredString {
        let text = format!("{}%", value);
        match value {
            80..=100 => text.green().bold(),
            50..=79 => text.yellow().bold(),
            _ => text.red().bold(),
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_summary(&self, result: &ResolutionResult) -> String {
        Self::format(result, None)
    }

    fn format_json(&self, result: &ResolutionResult) -> String {
        Self::format_json(result)
    }
}

/// `1234567` → `$1,234,567`
fn money(value: i64) -> String {
    let sign = if value < 0 { "-" } else { "" };
    format!("{}${}", sign, group_digits(value.unsigned_abs()))
}

fn thousands(value: i64) -> String {
    let sign = if value < 0 { "-" } else { "" };
    format!("{}{}", sign, group_digits(value.unsigned_abs()))
}

fn group_digits(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}
