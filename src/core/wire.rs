use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumOrString {
    Num(f64),
    Str(String),
}

/// Accepts `1.5`, `"1.5"`, `null` or a missing field. Unparsable strings become `None`.
pub fn de_opt_f64_lenient<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<NumOrString>::deserialize(deserializer)? {
        Some(NumOrString::Num(n)) => Some(n),
        Some(NumOrString::Str(s)) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        None => None,
    })
}

/// Parses an RFC 3339 timestamp into Unix seconds.
pub fn rfc3339_to_unix(s: Option<&str>) -> Option<i64> {
    chrono::DateTime::parse_from_rfc3339(s?).ok().map(|dt| dt.timestamp())
}

/// Scales an integer token amount by its decimals, e.g. `("1500000", 6)` -> `1.5`.
#[allow(clippy::cast_precision_loss)]
pub fn scale_by_decimals(raw: &str, decimals: u32) -> Option<f64> {
    let value: f64 = raw.trim().parse().ok()?;
    let divisor = 10f64.powi(i32::try_from(decimals).ok()?);
    Some(value / divisor)
}

/// Rejects values that would escape the path segment they are spliced into.
pub fn path_segment<'a>(what: &str, value: &'a str) -> Result<&'a str, crate::core::BelugaError> {
    if value.is_empty() || value == ".." || value.contains(['/', '?', '#', '\\']) {
        return Err(crate::core::BelugaError::Data(format!("invalid {what}: {value:?}")));
    }
    Ok(value)
}
