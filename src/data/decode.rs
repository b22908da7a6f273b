//! Schema-free decoding of food list rows
//!
//! Nutrient columns arrive as top-level keys named `n<nutrientId>`, and the
//! key set changes per request with the user's nutrient selection, so a row
//! cannot be described by a fixed struct. Decoding is an explicit pass over
//! the parsed object's entries: the three required fields are pulled out,
//! every `n<digits>` key with a numeric value lands in `nutrient_values`, and
//! everything else is ignored. Non-numeric values under nutrient keys are
//! skipped rather than rejected, since upstream data is not perfectly typed.

use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;

use super::FoodSummary;

/// Returns true for keys of the form `n` followed by one or more digits
pub(crate) fn is_nutrient_key(key: &str) -> bool {
    match key.strip_prefix('n') {
        Some(digits) => !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()),
        None => false,
    }
}

/// Pulls a required string field out of the row object
fn required_str<E: de::Error>(object: &Map<String, Value>, field: &'static str) -> Result<String, E> {
    match object.get(field) {
        None => Err(E::missing_field(field)),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(E::custom(format!(
            "field `{}` must be a string, got {}",
            field,
            type_name(other)
        ))),
    }
}

/// Pulls a required integer field out of the row object
fn required_int<E: de::Error>(object: &Map<String, Value>, field: &'static str) -> Result<i64, E> {
    match object.get(field) {
        None => Err(E::missing_field(field)),
        Some(value) => value.as_i64().ok_or_else(|| {
            E::custom(format!(
                "field `{}` must be an integer, got {}",
                field,
                type_name(value)
            ))
        }),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl<'de> Deserialize<'de> for FoodSummary {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let object = Map::<String, Value>::deserialize(deserializer)?;

        let description = required_str(&object, "description")?;
        let fdc_id = required_int(&object, "fdc_id")?;
        let id = required_int(&object, "id")?;

        let mut nutrient_values = HashMap::new();
        for (key, value) in &object {
            if !is_nutrient_key(key) {
                continue;
            }
            if let Some(amount) = value.as_f64() {
                nutrient_values.insert(key.clone(), amount);
            }
        }

        Ok(FoodSummary {
            description,
            fdc_id,
            id,
            nutrient_values,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(value: Value) -> Result<FoodSummary, serde_json::Error> {
        serde_json::from_value(value)
    }

    #[test]
    fn test_nutrient_key_pattern() {
        assert!(is_nutrient_key("n1008"));
        assert!(is_nutrient_key("n1"));
        assert!(!is_nutrient_key("n"));
        assert!(!is_nutrient_key("n12x"));
        assert!(!is_nutrient_key("name"));
        assert!(!is_nutrient_key("1008"));
        assert!(!is_nutrient_key(""));
    }

    #[test]
    fn test_decodes_dynamic_nutrient_columns() {
        let food = decode(json!({
            "description": "Apple",
            "fdc_id": 1,
            "id": 1,
            "n1008": 52,
            "n1003": 0.3,
            "other": "ignored"
        }))
        .expect("row should decode");

        assert_eq!(food.description, "Apple");
        assert_eq!(food.fdc_id, 1);
        assert_eq!(food.id, 1);
        assert_eq!(food.nutrient_values.len(), 2);
        assert_eq!(food.nutrient_values["n1008"], 52.0);
        assert_eq!(food.nutrient_values["n1003"], 0.3);
        assert!(!food.nutrient_values.contains_key("other"));
    }

    #[test]
    fn test_missing_fdc_id_is_a_decoding_error() {
        let err = decode(json!({
            "description": "Apple",
            "id": 1,
            "n1008": 52
        }))
        .expect_err("missing fdc_id must fail");
        assert!(err.to_string().contains("fdc_id"));
    }

    #[test]
    fn test_missing_description_is_a_decoding_error() {
        assert!(decode(json!({"fdc_id": 1, "id": 1})).is_err());
    }

    #[test]
    fn test_mistyped_required_field_is_a_decoding_error() {
        let err = decode(json!({
            "description": "Apple",
            "fdc_id": "not a number",
            "id": 1
        }))
        .expect_err("string fdc_id must fail");
        assert!(err.to_string().contains("fdc_id"));

        assert!(decode(json!({"description": 7, "fdc_id": 1, "id": 1})).is_err());
    }

    #[test]
    fn test_non_numeric_nutrient_values_are_skipped_not_rejected() {
        let food = decode(json!({
            "description": "Apple",
            "fdc_id": 1,
            "id": 1,
            "n1008": 52,
            "n1003": "trace",
            "n1004": null,
            "n1005": true
        }))
        .expect("row should decode despite mistyped nutrient values");

        assert_eq!(food.nutrient_values.len(), 1);
        assert_eq!(food.nutrient_values["n1008"], 52.0);
    }

    #[test]
    fn test_keys_not_matching_the_pattern_are_ignored() {
        let food = decode(json!({
            "description": "Apple",
            "fdc_id": 1,
            "id": 1,
            "n": 1.0,
            "n12x": 2.0,
            "nutrients": 3.0,
            "m1008": 4.0
        }))
        .expect("row should decode");

        assert!(food.nutrient_values.is_empty());
    }

    #[test]
    fn test_row_with_no_nutrient_columns_decodes_empty_map() {
        let food = decode(json!({
            "description": "Water",
            "fdc_id": 173944,
            "id": 9
        }))
        .expect("row should decode");

        assert!(food.nutrient_values.is_empty());
    }

    #[test]
    fn test_integer_and_float_amounts_are_both_coerced() {
        let food = decode(json!({
            "description": "Apple",
            "fdc_id": 1,
            "id": 1,
            "n1008": 52,
            "n1079": 2.4
        }))
        .expect("row should decode");

        assert_eq!(food.nutrient_values["n1008"], 52.0);
        assert_eq!(food.nutrient_values["n1079"], 2.4);
    }

    #[test]
    fn test_list_response_decodes_rows_and_count() {
        let answer: crate::data::FoodListResponse = serde_json::from_value(json!({
            "food": [
                {"description": "Apple", "fdc_id": 171688, "id": 1, "n1008": 52},
                {"description": "Banana", "fdc_id": 173944, "id": 2}
            ],
            "count": 4123
        }))
        .expect("list response should decode");

        assert_eq!(answer.count, 4123);
        assert_eq!(answer.food.len(), 2);
        assert_eq!(answer.food[0].nutrient_values["n1008"], 52.0);
        assert!(answer.food[1].nutrient_values.is_empty());
    }

    #[test]
    fn test_one_bad_row_fails_the_whole_list_decode() {
        let result: Result<crate::data::FoodListResponse, _> = serde_json::from_value(json!({
            "food": [
                {"description": "Apple", "fdc_id": 171688, "id": 1},
                {"description": "Broken", "id": 2}
            ],
            "count": 2
        }));
        assert!(result.is_err());
    }
}
