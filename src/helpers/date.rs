//! Date helper functions

use chrono::NaiveDate;

/// Format a date the way the site displays it: a lowercased short form,
/// e.g. "sat jan 01 2022"
pub fn format_date(date: NaiveDate) -> String {
    date.format("%a %b %d %Y").to_string().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date() {
        let date: NaiveDate = "2022-01-01".parse().unwrap();
        assert_eq!(format_date(date), "sat jan 01 2022");
    }
}
