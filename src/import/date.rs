use chrono::{NaiveDate, NaiveDateTime};

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];
const DATETIME_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parses an ISO-like date. Date-times are accepted and truncated to their date.
pub fn parse_date(content: &str) -> Option<NaiveDate> {
    let content = content.trim();
    if content.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(content, format).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(content, format).ok())
                .map(|datetime| datetime.date())
        })
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("2025-07-25", (2025, 7, 25))]
    #[case(" 2025-07-25 ", (2025, 7, 25))]
    #[case("2025-7-5", (2025, 7, 5))]
    #[case("2025/07/25", (2025, 7, 25))]
    #[case("2025-07-25T13:45:00", (2025, 7, 25))]
    #[case("2025-07-25 13:45:00", (2025, 7, 25))]
    #[case("2025-07-25 13:45", (2025, 7, 25))]
    #[case("2024-02-29", (2024, 2, 29))]
    fn valid_dates(#[case] input: &str, #[case] expected: (i32, u32, u32)) {
        assert_eq!(
            NaiveDate::from_ymd_opt(expected.0, expected.1, expected.2),
            parse_date(input)
        );
    }

    #[rstest]
    #[case("")]
    #[case("not-a-date")]
    #[case("2025-02-29")]
    #[case("2025-13-01")]
    #[case("2025-07-32")]
    #[case("25/07/2025x")]
    fn invalid_dates(#[case] input: &str) {
        assert_eq!(None, parse_date(input));
    }
}
