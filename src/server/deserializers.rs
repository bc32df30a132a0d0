use std::num::IntErrorKind;

use serde::{Deserialize, Deserializer};

pub fn first_page() -> i64 {
    1
}

// ?page=abc falls back to the first page instead of rejecting the request.
// Integers out of i64 range saturate so they still land past the end.
pub fn deserialize_page_lenient<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.map_or_else(first_page, |value| parse_page(value.trim())))
}

fn parse_page(value: &str) -> i64 {
    match value.parse::<i64>() {
        Ok(page) => page,
        Err(error) => match error.kind() {
            IntErrorKind::PosOverflow => i64::MAX,
            IntErrorKind::NegOverflow => i64::MIN,
            _ => first_page(),
        },
    }
}
