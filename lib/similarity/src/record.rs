//! Ground-truth record
//!
//! The trusted values a document is audited against. Records are accepted in
//! the nested shape produced by the property register
//! (`{"address": {"streetName": ..}, "areaSize": 120}`) or flat with the same
//! camelCase keys. Unknown keys such as `href` or `streetCode` are ignored.

use docverify_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A field value as it appears in the source JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(serde_json::Number),
}

impl FieldValue {
    /// True for empty or whitespace-only text
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.trim().is_empty(),
            FieldValue::Number(_) => false,
        }
    }
}

impl fmt::Display for FieldValue {
    /// Numbers without a fractional part render without decimals (`120`, not `120.0`)
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => write!(f, "{}", s.trim()),
            FieldValue::Number(n) => match n.as_f64() {
                Some(v) if !n.is_i64() && !n.is_u64() && v.fract() == 0.0 && v.abs() < 1e15 => {
                    write!(f, "{}", v as i64)
                }
                _ => write!(f, "{}", n),
            },
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Number(n.into())
    }
}

impl From<f64> for FieldValue {
    /// Non-finite values have no JSON form and become text
    fn from(v: f64) -> Self {
        serde_json::Number::from_f64(v)
            .map(FieldValue::Number)
            .unwrap_or_else(|| FieldValue::Text(v.to_string()))
    }
}

/// The fields of interest from one trusted record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawRecord")]
pub struct GroundTruthRecord {
    pub street_name: Option<FieldValue>,
    pub house_number: Option<FieldValue>,
    pub postal_code: Option<FieldValue>,
    pub postal_district: Option<FieldValue>,
    pub area_size: Option<FieldValue>,
}

impl GroundTruthRecord {
    /// Parse a record from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Record(e.to_string()))
    }

    /// Convert an already parsed JSON value
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| Error::Record(e.to_string()))
    }

    /// Non-blank value of a field, rendered as text
    pub fn present(field: &Option<FieldValue>) -> Option<String> {
        field
            .as_ref()
            .filter(|v| !v.is_blank())
            .map(|v| v.to_string())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAddress {
    street_name: Option<FieldValue>,
    house_number: Option<FieldValue>,
    postal_code: Option<FieldValue>,
    postal_district: Option<FieldValue>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRecord {
    #[serde(default)]
    address: Option<RawAddress>,
    street_name: Option<FieldValue>,
    house_number: Option<FieldValue>,
    postal_code: Option<FieldValue>,
    postal_district: Option<FieldValue>,
    area_size: Option<FieldValue>,
}

impl From<RawRecord> for GroundTruthRecord {
    /// Nested address fields take precedence over flat ones
    fn from(raw: RawRecord) -> Self {
        let address = raw.address.unwrap_or_default();
        Self {
            street_name: address.street_name.or(raw.street_name),
            house_number: address.house_number.or(raw.house_number),
            postal_code: address.postal_code.or(raw.postal_code),
            postal_district: address.postal_district.or(raw.postal_district),
            area_size: raw.area_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nested_shape() {
        let record = GroundTruthRecord::from_value(json!({
            "address": {
                "href": "https://example.invalid/adresser/1",
                "streetCode": "0718",
                "streetName": "Ørnevej",
                "houseNumber": "45",
                "postalCode": 8000,
                "postalDistrict": "Aarhus C"
            },
            "areaSize": 120
        }))
        .unwrap();

        assert_eq!(record.street_name, Some(FieldValue::from("Ørnevej")));
        assert_eq!(record.postal_code.as_ref().unwrap().to_string(), "8000");
        assert_eq!(record.area_size.as_ref().unwrap().to_string(), "120");
    }

    #[test]
    fn test_flat_shape() {
        let record = GroundTruthRecord::from_json(
            r#"{"streetName": "Ørnevej", "houseNumber": 45, "areaSize": 120.0}"#,
        )
        .unwrap();
        assert_eq!(record.house_number.unwrap().to_string(), "45");
        assert_eq!(record.area_size.unwrap().to_string(), "120");
        assert!(record.postal_code.is_none());
    }

    #[test]
    fn test_fractional_area_kept() {
        assert_eq!(FieldValue::from(87.5).to_string(), "87.5");
    }

    #[test]
    fn test_blank_and_null_fields() {
        let record = GroundTruthRecord::from_value(json!({
            "address": {"streetName": "  ", "houseNumber": null},
        }))
        .unwrap();
        assert_eq!(GroundTruthRecord::present(&record.street_name), None);
        assert_eq!(GroundTruthRecord::present(&record.house_number), None);
        assert_eq!(GroundTruthRecord::present(&record.area_size), None);
    }

    #[test]
    fn test_invalid_json() {
        let err = GroundTruthRecord::from_json("{not json").unwrap_err();
        assert!(matches!(err, Error::Record(_)));
    }
}
