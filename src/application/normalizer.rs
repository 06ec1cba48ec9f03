// Value normalizer - locale-aware coercion of spreadsheet cells
use crate::domain::workbook::CellValue;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Coerces a cell to a number, reading Brazilian-formatted text.
///
/// Anything that does not parse to a finite number is missing; this never fails.
pub fn to_number(value: &CellValue) -> Option<f64> {
    match value {
        CellValue::Number(n) if n.is_finite() => Some(*n),
        CellValue::Text(s) => parse_locale_number(s),
        _ => None,
    }
}

/// `"1.234,56"` -> 1234.56, `"12,5"` -> 12.5, `"7.5"` -> 7.5.
pub fn parse_locale_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let canonical = if trimmed.contains('.') && trimmed.contains(',') {
        trimmed.replace('.', "").replace(',', ".")
    } else if trimmed.contains(',') {
        trimmed.replace(',', ".")
    } else {
        trimmed.to_string()
    };

    canonical.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Trimmed text of a cell; blank cells are missing.
pub fn to_text(value: &CellValue) -> Option<String> {
    match value {
        CellValue::Empty => None,
        CellValue::Text(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        other => Some(other.to_string()),
    }
}

/// Join key: case, accents and whitespace runs do not matter.
///
/// "Novo", "NOVO " and "Nôvo" all become "NOVO".
pub fn normalize_key(raw: &str) -> String {
    let collapsed = raw
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    collapsed
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_uppercase()
}

/// Normalized key of an optional value; blank input has no key.
pub fn optional_key(raw: Option<&str>) -> Option<String> {
    raw.map(normalize_key).filter(|k| !k.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brazilian_thousands_and_decimal() {
        assert_eq!(to_number(&CellValue::text("1.234,56")), Some(1234.56));
        assert_eq!(to_number(&CellValue::text("12,5")), Some(12.5));
        assert_eq!(to_number(&CellValue::text(" 5,0 ")), Some(5.0));
        assert_eq!(to_number(&CellValue::text("7.5")), Some(7.5));
    }

    #[test]
    fn test_unparsable_and_blank_are_missing() {
        assert_eq!(to_number(&CellValue::text("abc")), None);
        assert_eq!(to_number(&CellValue::text("")), None);
        assert_eq!(to_number(&CellValue::Empty), None);
        assert_eq!(to_number(&CellValue::Bool(true)), None);
        assert_eq!(to_number(&CellValue::text("NaN")), None);
        assert_eq!(to_number(&CellValue::text("inf")), None);
    }

    #[test]
    fn test_numbers_pass_through() {
        assert_eq!(to_number(&CellValue::Number(100000.0)), Some(100000.0));
        assert_eq!(to_number(&CellValue::Number(f64::NAN)), None);
    }

    #[test]
    fn test_normalize_key_ignores_case_accents_and_spacing() {
        assert_eq!(normalize_key("Novo"), "NOVO");
        assert_eq!(normalize_key("NOVO "), "NOVO");
        assert_eq!(normalize_key("Nôvo"), "NOVO");
        assert_eq!(normalize_key("  Ressolado   2ª  "), "RESSOLADO 2A");
        assert_eq!(normalize_key("posição"), normalize_key("POSICAO"));
    }

    #[test]
    fn test_text_is_trimmed() {
        assert_eq!(to_text(&CellValue::text("  DDI ")), Some("DDI".to_string()));
        assert_eq!(to_text(&CellValue::text("   ")), None);
        assert_eq!(to_text(&CellValue::Number(275.0)), Some("275".to_string()));
        assert_eq!(optional_key(Some("  ")), None);
    }
}
