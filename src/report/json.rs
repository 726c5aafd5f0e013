use std::error::Error;

use super::SiteReport;
use crate::report_helpers;

pub fn print_json(report: &SiteReport) -> Result<(), Box<dyn Error>> {
    report_helpers::print_json_stdout(report)
}
