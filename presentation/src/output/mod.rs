//! Output formatting for meal reports

pub mod console;
pub mod formatter;
pub mod report;
