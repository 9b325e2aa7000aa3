//! Output formatter trait

use crate::output::report::MealReport;

/// Trait for formatting meal reports
pub trait OutputFormatter {
    /// Format the complete report
    fn format(&self, report: &MealReport) -> String;

    /// Format as JSON
    fn format_json(&self, report: &MealReport) -> String;

    /// Format the final result only (concise output)
    fn format_summary(&self, report: &MealReport) -> String;
}
