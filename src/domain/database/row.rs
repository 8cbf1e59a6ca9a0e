//! Conversion of arbitrary result rows into JSON objects.
//!
//! Rows come from the simple query protocol, so every value arrives in the
//! server's text rendering. Numbers, booleans, JSON and timestamps are lifted
//! into their JSON counterparts; everything else (intervals, network
//! addresses, arrays, ranges, enums, ...) is returned as that text.
//!
//! Column order is preserved (`serde_json` is built with `preserve_order`), so a
//! row serializes with its keys in the order the statement selected them.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::{Map, Number, Value};
use sqlx::postgres::PgRow;
use sqlx::{Column, Row, TypeInfo, ValueRef};

/// One result row keyed by column name.
pub type RowMap = Map<String, Value>;

pub fn row_to_json(row: &PgRow) -> Result<RowMap, sqlx::Error> {
    let mut map = Map::with_capacity(row.len());
    for column in row.columns() {
        let idx = column.ordinal();
        let value = if row.try_get_raw(idx)?.is_null() {
            Value::Null
        } else {
            let text = row.try_get_unchecked::<&str, _>(idx)?;
            text_value(column.type_info().name(), text)
        };
        map.insert(column.name().to_string(), value);
    }
    Ok(map)
}

/// JSON value for one non-null column given its type name and text form.
pub fn text_value(type_name: &str, text: &str) -> Value {
    match type_name {
        "BOOL" => match text {
            "t" => Value::Bool(true),
            "f" => Value::Bool(false),
            _ => Value::String(text.to_string()),
        },
        // NaN and Infinity have no JSON number form and stay text
        "INT2" | "INT4" | "INT8" | "OID" | "FLOAT4" | "FLOAT8" | "NUMERIC" => {
            match text.parse::<Number>() {
                Ok(number) => Value::Number(number),
                Err(_) => Value::String(text.to_string()),
            }
        }
        "JSON" | "JSONB" => {
            serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
        }
        "TIMESTAMPTZ" => match DateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f%#z") {
            Ok(at) => Value::String(at.with_timezone(&Utc).to_rfc3339()),
            Err(_) => Value::String(text.to_string()),
        },
        "TIMESTAMP" => match NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f") {
            Ok(at) => Value::String(at.format("%Y-%m-%dT%H:%M:%S%.f").to_string()),
            Err(_) => Value::String(text.to_string()),
        },
        _ => Value::String(text.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numeric_types_become_json_numbers() {
        assert_eq!(text_value("INT4", "42"), json!(42));
        assert_eq!(text_value("INT8", "9223372036854775807"), json!(i64::MAX));
        assert_eq!(text_value("OID", "1259"), json!(1259));
        assert_eq!(text_value("FLOAT8", "1.5"), json!(1.5));
        assert_eq!(text_value("NUMERIC", "123.45"), json!(123.45));
    }

    #[test]
    fn test_non_finite_numbers_stay_text() {
        assert_eq!(text_value("FLOAT8", "NaN"), json!("NaN"));
        assert_eq!(text_value("FLOAT4", "Infinity"), json!("Infinity"));
        assert_eq!(text_value("NUMERIC", "NaN"), json!("NaN"));
    }

    #[test]
    fn test_bool_and_json() {
        assert_eq!(text_value("BOOL", "t"), json!(true));
        assert_eq!(text_value("BOOL", "f"), json!(false));
        assert_eq!(text_value("JSONB", r#"{"a": [1, 2]}"#), json!({"a": [1, 2]}));
    }

    #[test]
    fn test_timestamps_normalized_to_iso() {
        let at = text_value("TIMESTAMPTZ", "2024-05-01 12:30:00+02");
        assert_eq!(at, json!("2024-05-01T10:30:00+00:00"));

        let at = text_value("TIMESTAMP", "2024-05-01 12:30:00");
        assert_eq!(at, json!("2024-05-01T12:30:00"));

        assert_eq!(text_value("TIMESTAMPTZ", "infinity"), json!("infinity"));
    }

    #[test]
    fn test_other_types_keep_server_text() {
        assert_eq!(text_value("INTERVAL", "1 day"), json!("1 day"));
        assert_eq!(text_value("INET", "10.0.0.1"), json!("10.0.0.1"));
        assert_eq!(text_value("TIMETZ", "12:30:00+02"), json!("12:30:00+02"));
        assert_eq!(text_value("FLOAT8[]", "{1.5}"), json!("{1.5}"));
        let nil = "00000000-0000-0000-0000-000000000000";
        assert_eq!(text_value("UUID", nil), json!(nil));
    }

    #[test]
    fn test_row_map_keeps_insertion_order() {
        let mut map = RowMap::new();
        map.insert("zeta".to_string(), Value::from(1));
        map.insert("alpha".to_string(), Value::from(2));
        let keys: Vec<_> = map.keys().cloned().collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
    }
}
