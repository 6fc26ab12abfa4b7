use crate::export::{Address, FieldValue};
use serde_json::Value;

/// Keys checked first when digging a display value out of an unknown payload.
const PREFERRED_KEYS: &[&str] = &["value", "text", "name", "label"];

/// Renders a section field value as a single display string.
///
/// `None` means the field has nothing presentable and is left out of the
/// notes entirely; structural payloads are never dumped.
pub fn format_field_value(value: &FieldValue) -> Option<String> {
    match value {
        FieldValue::Concealed(s) | FieldValue::String(s) | FieldValue::Menu(s) => non_empty(s),
        // Only reached for OTP fields the resolver did not claim.
        FieldValue::Totp(s) => non_empty(s.trim()),
        FieldValue::SsoLogin(sso) => sso.provider.as_deref().and_then(non_empty),
        FieldValue::Address(address) => format_address(address),
        FieldValue::Other { payload, .. } => first_scalar(payload),
    }
}

/// Postal order: street, city, state, zip, country.
pub fn format_address(address: &Address) -> Option<String> {
    let parts: Vec<&str> = [
        &address.street,
        &address.city,
        &address.state,
        &address.zip,
        &address.country,
    ]
    .into_iter()
    .filter_map(|part| part.as_deref())
    .map(str::trim)
    .filter(|part| !part.is_empty())
    .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}

fn first_scalar(payload: &Value) -> Option<String> {
    match payload {
        Value::Null => None,
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => non_empty(s),
        Value::Array(values) => values.iter().find_map(first_scalar),
        Value::Object(map) => PREFERRED_KEYS
            .iter()
            .filter_map(|key| map.get(*key))
            .find_map(first_scalar)
            .or_else(|| map.values().find_map(first_scalar)),
    }
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}
