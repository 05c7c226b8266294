pub mod account;
pub mod attendee;
pub mod calendar;
pub mod clear;
pub mod config;
pub mod delete;
pub mod edit;
pub mod export;
pub mod list;
pub mod map;
pub mod new;
pub mod rsvp;
pub mod show;
pub mod stats;

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveTime};
use evplan_core::event::hh_mm;

/// Place fields given on the command line; unset fields keep their current value.
pub struct Place {
    pub name: Option<String>,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}'. Expected YYYY-MM-DD", input))
}

pub fn parse_time(input: &str) -> Result<NaiveTime> {
    hh_mm::parse(input.trim()).map_err(|e| anyhow::anyhow!(e))
}

/// Empty address input clears the address.
fn normalize_address(address: String) -> Option<String> {
    let address = address.trim();
    if address.is_empty() { None } else { Some(address.to_string()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date(" 2025-03-20 ").unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 20).unwrap()
        );
        assert!(parse_date("20/03/2025").is_err());
        assert!(parse_date("2025-02-30").is_err());
    }

    #[test]
    fn test_parse_time() {
        assert_eq!(
            parse_time("18:30").unwrap(),
            NaiveTime::from_hms_opt(18, 30, 0).unwrap()
        );
        assert!(parse_time("6pm").is_err());
    }

    #[test]
    fn test_normalize_address() {
        assert_eq!(normalize_address("  ".to_string()), None);
        assert_eq!(
            normalize_address(" Hamra ".to_string()).as_deref(),
            Some("Hamra")
        );
    }
}
