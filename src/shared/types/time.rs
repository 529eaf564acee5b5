use chrono::{DateTime, Utc};

/// Day-first calendar date shown to clients, e.g. `07/03/2024`.
pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";

pub fn format_display_date(at: &DateTime<Utc>) -> String {
    at.format(DISPLAY_DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn pads_day_and_month() {
        let at = Utc.with_ymd_and_hms(2024, 3, 7, 23, 59, 0).unwrap();
        assert_eq!(format_display_date(&at), "07/03/2024");
    }
}
