use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Number, Value};

use crate::error::EngineError;

/// A single cell of a result row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(Number),
    Text(String),
    Bool(bool),
    Null,
}

/// One result row. Column order is the order the upstream service sent.
pub type Record = IndexMap<String, Scalar>;

impl Scalar {
    pub fn from_f64(value: f64) -> Option<Self> {
        Number::from_f64(value).map(Scalar::Number)
    }

    /// Numeric reading of the cell, parsing numeric text the way a
    /// spreadsheet would. Booleans count as 0/1.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Number(n) => n.as_f64(),
            Scalar::Text(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
            Scalar::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Scalar::Null => None,
        }
    }

    /// Coerce to a numeric cell, keeping integers integral.
    pub fn to_number(&self) -> Option<Scalar> {
        match self {
            Scalar::Number(n) => Some(Scalar::Number(n.clone())),
            Scalar::Text(s) => {
                let trimmed = s.trim();
                if let Ok(i) = trimmed.parse::<i64>() {
                    return Some(Scalar::Number(Number::from(i)));
                }
                self.as_f64().and_then(Scalar::from_f64)
            }
            Scalar::Bool(b) => Some(Scalar::Number(Number::from(u8::from(*b)))),
            Scalar::Null => None,
        }
    }

    /// Text used for axis ticks and table cells.
    pub fn label(&self) -> String {
        match self {
            Scalar::Number(n) => n.to_string(),
            Scalar::Text(s) => s.clone(),
            Scalar::Bool(b) => b.to_string(),
            Scalar::Null => String::new(),
        }
    }

    pub fn is_blank(&self) -> bool {
        match self {
            Scalar::Text(s) => s.is_empty(),
            Scalar::Null => true,
            _ => false,
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Number(Number::from(value))
    }
}

/// Read the `data` member of an envelope: a JSON array of flat objects.
pub fn records_from_json(value: &Value) -> Result<Vec<Record>, EngineError> {
    let array = value
        .as_array()
        .ok_or_else(|| EngineError::Validation("`data` must be an array of objects".to_string()))?;

    let mut records = Vec::with_capacity(array.len());
    for (idx, item) in array.iter().enumerate() {
        let obj = item.as_object().ok_or_else(|| {
            EngineError::Validation(format!("`data[{}]` is not an object", idx))
        })?;

        let mut record = Record::with_capacity(obj.len());
        for (key, cell) in obj {
            let scalar = match cell {
                Value::Number(n) => Scalar::Number(n.clone()),
                Value::String(s) => Scalar::Text(s.clone()),
                Value::Bool(b) => Scalar::Bool(*b),
                Value::Null => Scalar::Null,
                Value::Array(_) | Value::Object(_) => {
                    return Err(EngineError::Validation(format!(
                        "`data[{}].{}` is not a scalar value",
                        idx, key
                    )))
                }
            };
            record.insert(key.clone(), scalar);
        }
        records.push(record);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_records_keep_column_order() {
        let value: Value =
            serde_json::from_str(r#"[{"season": "2023-24", "zeta": 1, "alpha": 2}]"#).unwrap();
        let records = records_from_json(&value).unwrap();
        let keys: Vec<&str> = records[0].keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["season", "zeta", "alpha"]);
    }

    #[test]
    fn test_nested_values_rejected() {
        let value = json!([{"season": "2023-24", "splits": [1, 2]}]);
        let err = records_from_json(&value).unwrap_err();
        assert!(err.to_string().contains("data[0].splits"));
    }

    #[test]
    fn test_non_object_row_rejected() {
        let value = json!([{"a": 1}, 3]);
        assert!(records_from_json(&value).is_err());
    }

    #[test]
    fn test_numeric_coercion() {
        assert_eq!(Scalar::from("28").to_number(), Some(Scalar::from(28)));
        assert_eq!(Scalar::from(" 27.5 ").as_f64(), Some(27.5));
        assert_eq!(Scalar::Bool(true).as_f64(), Some(1.0));
        assert_eq!(Scalar::from("n/a").to_number(), None);
        assert_eq!(Scalar::Null.to_number(), None);
    }

    #[test]
    fn test_integers_serialize_without_fraction() {
        let cell = Scalar::from("30").to_number().unwrap();
        assert_eq!(serde_json::to_string(&cell).unwrap(), "30");
    }
}
