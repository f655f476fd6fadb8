//! Output formatter trait

use parcel_domain::{OutputFormat, ResolutionResult};

/// Trait for formatting resolution results
pub trait OutputFormatter {
    /// Human-readable summary
    fn format_summary(&self, result: &ResolutionResult) -> String;

    /// Format as JSON
    fn format_json(&self, result: &ResolutionResult) -> String;

    fn render(&self, result: &ResolutionResult, format: OutputFormat) -> String {
        match format {
            OutputFormat::Summary => self.format_summary(result),
            OutputFormat::Json => self.format_json(result),
        }
    }
}
