use serde::{Deserialize, Deserializer};
use serde_json::Value;
use utoipa::ToSchema;

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddCartItemRequest {
    pub product_id: Option<String>,
    /// Defaults to 1; values below 1, or that are not numbers, become 1.
    #[serde(default, deserialize_with = "lenient_quantity")]
    #[schema(value_type = Option<i64>)]
    pub quantity: Option<i64>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCartItemRequest {
    /// 0 (or anything below it, or anything that is not a number) removes the line.
    #[serde(default, deserialize_with = "lenient_quantity")]
    #[schema(value_type = Option<i64>)]
    pub quantity: Option<i64>,
}

/// Accepts numbers and numeric strings; fractions are truncated and
/// anything else reads as absent so the service clamp applies.
fn lenient_quantity<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(quantity_from_value))
}

fn quantity_from_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(truncate)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(truncate))
        }
        _ => None,
    }
}

fn truncate(value: f64) -> Option<i64> {
    if !value.is_finite() {
        return None;
    }
    // Saturating cast; the service clamps to the column range afterwards.
    Some(value.trunc() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add(body: &str) -> AddCartItemRequest {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn numeric_strings_and_fractions_are_read() {
        assert_eq!(add(r#"{"productId":"x","quantity":"2"}"#).quantity, Some(2));
        assert_eq!(add(r#"{"productId":"x","quantity":2.5}"#).quantity, Some(2));
        assert_eq!(add(r#"{"productId":"x","quantity":" 4 "}"#).quantity, Some(4));
        assert_eq!(add(r#"{"productId":"x","quantity":-3}"#).quantity, Some(-3));
    }

    #[test]
    fn anything_else_reads_as_absent() {
        assert_eq!(add(r#"{"productId":"x","quantity":"abc"}"#).quantity, None);
        assert_eq!(add(r#"{"productId":"x","quantity":null}"#).quantity, None);
        assert_eq!(add(r#"{"productId":"x","quantity":[1]}"#).quantity, None);
        assert_eq!(add(r#"{"productId":"x"}"#).quantity, None);

        let update: UpdateCartItemRequest = serde_json::from_str(r#"{"quantity":true}"#).unwrap();
        assert_eq!(update.quantity, None);
    }
}
