//! Field-level transforms.
//!
//! Every function here is total: a null input or an unparseable value yields
//! null (or the configured default), never an error. A bad date in one field
//! must not stop the rest of the row from being mapped.

use chrono::NaiveDate;

/// Date format of DCC extracts.
pub const DCC_DATE_FORMAT: &str = "%Y-%m-%d";

/// Strips surrounding whitespace.
pub fn trim(value: Option<&str>) -> Option<String> {
    value.map(|v| v.trim().to_string())
}

/// Exact-match lookup in `pairs`; unmapped and null values give `default`.
///
/// ```
/// use ardac_transform::fields::categorical_recode;
///
/// let pairs = [("Y", "alive"), ("N", "dead")];
/// assert_eq!(categorical_recode(Some("Y"), &pairs, None), Some("alive".to_string()));
/// assert_eq!(categorical_recode(Some("U"), &pairs, None), None);
/// assert_eq!(
///     categorical_recode(None, &pairs, Some("Not Reported")),
///     Some("Not Reported".to_string())
/// );
/// ```
pub fn categorical_recode(
    value: Option<&str>,
    pairs: &[(&str, &str)],
    default: Option<&str>,
) -> Option<String> {
    value
        .and_then(|v| pairs.iter().find(|(from, _)| *from == v).map(|(_, to)| *to))
        .or(default)
        .map(str::to_string)
}

/// Text after the last `:`, trimmed. A value without `:` is only trimmed.
///
/// DCC arm labels look like `2: AH - moderate`; the node wants `AH - moderate`.
pub fn suffix_after_colon(value: Option<&str>) -> Option<String> {
    value.map(|v| v.rsplit(':').next().unwrap_or(v).trim().to_string())
}

/// Text before the first `-`, i.e. the year of an ISO date.
pub fn year_of(value: Option<&str>) -> Option<String> {
    value.map(|v| v.split('-').next().unwrap_or(v).to_string())
}

/// Parses a full `YYYY-MM-DD` date.
pub fn parse_dcc_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, DCC_DATE_FORMAT).ok()
}

/// Whole days from `start` to `end` (`end - start`).
///
/// Returns `None` when either date is null or not a valid `YYYY-MM-DD` date.
pub fn days_between(end: Option<&str>, start: Option<&str>) -> Option<i64> {
    let end = parse_dcc_date(end?)?;
    let start = parse_dcc_date(start?)?;
    Some((end - start).num_days())
}
