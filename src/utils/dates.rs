use chrono::NaiveDate;

/// Parses the date shapes users type into intake forms and payment logs:
/// `YYYY-MM-DD`, `M/D/YYYY` and `M/D/YY`.
pub fn parse_flexible_date(raw: &str) -> Option<NaiveDate> {
    let text = raw.trim();
    if text.is_empty() {
        return None;
    }
    if text.contains('-') {
        return NaiveDate::parse_from_str(text, "%Y-%m-%d").ok();
    }
    let year_len = text.rsplit('/').next().map(str::len).unwrap_or(0);
    match year_len {
        4 => NaiveDate::parse_from_str(text, "%m/%d/%Y").ok(),
        2 => NaiveDate::parse_from_str(text, "%m/%d/%y").ok(),
        _ => None,
    }
}
