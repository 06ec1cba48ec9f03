// Observation extractor - mileage and date readings embedded in free-text notes
use chrono::NaiveDate;
use regex::Regex;

pub struct ObservationExtractor {
    distance_regex: Regex,
    date_regex: Regex,
}

impl ObservationExtractor {
    pub fn new() -> Self {
        // Digits with optional "." thousands groups, then the unit: "109.418 km", "115000km"
        let distance_regex = Regex::new(r"(?i)(\d{1,3}(?:\.\d{3})+|\d+)\s*km").expect("valid distance regex");
        // dd/mm/yyyy or dd/mm/yy
        let date_regex = Regex::new(r"\b(\d{2})/(\d{2})/(\d{4}|\d{2})\b").expect("valid date regex");

        Self {
            distance_regex,
            date_regex,
        }
    }

    /// Odometer reading written in the note, in km.
    pub fn extract_distance(&self, text: Option<&str>) -> Option<f64> {
        let captures = self.distance_regex.captures(text?)?;
        let digits = captures.get(1)?.as_str().replace('.', "");
        digits.parse::<f64>().ok().filter(|n| n.is_finite())
    }

    /// Measurement date written in the note. Two-digit years are 20yy.
    pub fn extract_date(&self, text: Option<&str>) -> Option<NaiveDate> {
        let captures = self.date_regex.captures(text?)?;
        let day: u32 = captures.get(1)?.as_str().parse().ok()?;
        let month: u32 = captures.get(2)?.as_str().parse().ok()?;
        let year_token = captures.get(3)?.as_str();
        let mut year: i32 = year_token.parse().ok()?;
        if year_token.len() == 2 {
            year += 2000;
        }
        NaiveDate::from_ymd_opt(year, month, day)
    }
}

impl Default for ObservationExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_with_thousands_separator() {
        let extractor = ObservationExtractor::new();
        assert_eq!(
            extractor.extract_distance(Some("Aferição 20/08/25 - 109.418 km")),
            Some(109418.0)
        );
    }

    #[test]
    fn test_distance_plain_and_case_insensitive() {
        let extractor = ObservationExtractor::new();
        assert_eq!(
            extractor.extract_distance(Some("Aferição 01/01/25 - 115000 km")),
            Some(115000.0)
        );
        assert_eq!(extractor.extract_distance(Some("rodou 98765KM")), Some(98765.0));
        assert_eq!(extractor.extract_distance(Some("1.234.567 Km")), Some(1234567.0));
    }

    #[test]
    fn test_distance_missing() {
        let extractor = ObservationExtractor::new();
        assert_eq!(extractor.extract_distance(Some("sem leitura")), None);
        assert_eq!(extractor.extract_distance(Some("")), None);
        assert_eq!(extractor.extract_distance(None), None);
    }

    #[test]
    fn test_overflowing_distance_is_missing() {
        let extractor = ObservationExtractor::new();
        let note = format!("Aferição 01/01/25 - {} km", "9".repeat(400));
        assert_eq!(extractor.extract_distance(Some(&note)), None);
    }

    #[test]
    fn test_date_two_and_four_digit_years() {
        let extractor = ObservationExtractor::new();
        assert_eq!(
            extractor.extract_date(Some("Aferição 20/08/25 - 109.418 km")),
            NaiveDate::from_ymd_opt(2025, 8, 20)
        );
        assert_eq!(
            extractor.extract_date(Some("medido em 03/11/2024")),
            NaiveDate::from_ymd_opt(2024, 11, 3)
        );
    }

    #[test]
    fn test_invalid_date_is_missing() {
        let extractor = ObservationExtractor::new();
        assert_eq!(extractor.extract_date(Some("31/02/25")), None);
        assert_eq!(extractor.extract_date(Some("sem data")), None);
        assert_eq!(extractor.extract_date(None), None);
    }
}
