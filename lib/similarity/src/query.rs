//! Query building
//!
//! Derives the query strings searched for in the document from a
//! [`GroundTruthRecord`]. Weak signals are combined into one query (a lone
//! house number matches every number in a document) and area sizes are
//! expanded into unit and ordering variants to absorb OCR and language
//! differences in how an area is written.

use crate::record::GroundTruthRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Unit spellings tried for area sizes, with the slug used in query labels
pub const AREA_UNITS: [(&str, &str); 6] = [
    ("m2", "m2"),
    ("m²", "m2sup"),
    ("kvm", "kvm"),
    ("kvadratmeter", "kvadratmeter"),
    ("sqm", "sqm"),
    ("square meters", "square_meters"),
];

/// Logical field a query resolves to; the unit of reconciliation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldGroup {
    Address,
    Postal,
    AreaSize,
}

impl FieldGroup {
    /// Every group, in report order
    pub const ALL: [FieldGroup; 3] = [FieldGroup::Address, FieldGroup::Postal, FieldGroup::AreaSize];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldGroup::Address => "address",
            FieldGroup::Postal => "postal",
            FieldGroup::AreaSize => "area_size",
        }
    }
}

impl fmt::Display for FieldGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the unit goes relative to the number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitOrder {
    Suffix,
    Prefix,
}

impl UnitOrder {
    fn as_str(&self) -> &'static str {
        match self {
            UnitOrder::Suffix => "suffix",
            UnitOrder::Prefix => "prefix",
        }
    }
}

/// One query string and the group it belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Query {
    pub label: String,
    pub text: String,
    pub group: FieldGroup,
}

impl Query {
    pub fn new(label: impl Into<String>, text: impl Into<String>, group: FieldGroup) -> Self {
        Self {
            label: label.into(),
            text: text.into(),
            group,
        }
    }
}

/// Ordered queries plus the expected value of every group that has queries
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryPlan {
    queries: Vec<Query>,
    expected: BTreeMap<FieldGroup, String>,
}

impl QueryPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a query; the first query of a group sets its expected value
    pub fn push(&mut self, query: Query, expected: impl Into<String>) {
        self.expected.entry(query.group).or_insert_with(|| expected.into());
        self.queries.push(query);
    }

    pub fn queries(&self) -> &[Query] {
        &self.queries
    }

    pub fn len(&self) -> usize {
        self.queries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }

    /// Queries of one group, in build order
    pub fn group_queries(&self, group: FieldGroup) -> impl Iterator<Item = &Query> {
        self.queries.iter().filter(move |q| q.group == group)
    }

    pub fn expected(&self, group: FieldGroup) -> Option<&str> {
        self.expected.get(&group).map(String::as_str)
    }
}

/// Derive queries from a record; components that are missing or blank
/// produce no query for their group
pub fn build_queries(record: &GroundTruthRecord) -> QueryPlan {
    let mut plan = QueryPlan::new();

    let street = GroundTruthRecord::present(&record.street_name);
    let house = GroundTruthRecord::present(&record.house_number);
    if let (Some(street), Some(house)) = (street, house) {
        let text = format!("{} {}", street, house);
        plan.push(Query::new("address", text.clone(), FieldGroup::Address), text);
    }

    let code = GroundTruthRecord::present(&record.postal_code);
    let district = GroundTruthRecord::present(&record.postal_district);
    if let (Some(code), Some(district)) = (code, district) {
        let text = format!("{} {}", code, district);
        plan.push(Query::new("postal", text.clone(), FieldGroup::Postal), text);
    }

    if let Some(area) = GroundTruthRecord::present(&record.area_size) {
        for (unit, slug) in AREA_UNITS {
            for order in [UnitOrder::Suffix, UnitOrder::Prefix] {
                let text = match order {
                    UnitOrder::Suffix => format!("{} {}", area, unit),
                    UnitOrder::Prefix => format!("{} {}", unit, area),
                };
                let label = format!("area_size_{}_{}", slug, order.as_str());
                plan.push(Query::new(label, text, FieldGroup::AreaSize), area.clone());
            }
        }
    }

    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::FieldValue;

    fn full_record() -> GroundTruthRecord {
        GroundTruthRecord {
            street_name: Some(FieldValue::from("Ørnevej")),
            house_number: Some(FieldValue::from("45")),
            postal_code: Some(FieldValue::from(8000)),
            postal_district: Some(FieldValue::from("Aarhus C")),
            area_size: Some(FieldValue::from(120)),
        }
    }

    #[test]
    fn test_full_record() {
        let plan = build_queries(&full_record());
        assert_eq!(plan.len(), 2 + AREA_UNITS.len() * 2);

        let address: Vec<&Query> = plan.group_queries(FieldGroup::Address).collect();
        assert_eq!(address.len(), 1);
        assert_eq!(address[0].text, "Ørnevej 45");
        assert_eq!(plan.expected(FieldGroup::Postal), Some("8000 Aarhus C"));
        assert_eq!(plan.expected(FieldGroup::AreaSize), Some("120"));
    }

    #[test]
    fn test_area_variants() {
        let plan = build_queries(&full_record());
        let texts: Vec<&str> = plan
            .group_queries(FieldGroup::AreaSize)
            .map(|q| q.text.as_str())
            .collect();
        assert_eq!(
            texts,
            vec![
                "120 m2",
                "m2 120",
                "120 m²",
                "m² 120",
                "120 kvm",
                "kvm 120",
                "120 kvadratmeter",
                "kvadratmeter 120",
                "120 sqm",
                "sqm 120",
                "120 square meters",
                "square meters 120",
            ]
        );

        let labels: Vec<&str> = plan
            .group_queries(FieldGroup::AreaSize)
            .map(|q| q.label.as_str())
            .collect();
        assert_eq!(labels[0], "area_size_m2_suffix");
        assert_eq!(labels[3], "area_size_m2sup_prefix");
        assert_eq!(labels[6], "area_size_kvadratmeter_suffix");
        assert_eq!(labels[11], "area_size_square_meters_prefix");
    }

    #[test]
    fn test_missing_component_skips_group() {
        let mut record = full_record();
        record.house_number = None;
        record.postal_district = Some(FieldValue::from(" "));
        let plan = build_queries(&record);

        assert_eq!(plan.group_queries(FieldGroup::Address).count(), 0);
        assert_eq!(plan.group_queries(FieldGroup::Postal).count(), 0);
        assert_eq!(plan.expected(FieldGroup::Address), None);
        assert_eq!(plan.group_queries(FieldGroup::AreaSize).count(), AREA_UNITS.len() * 2);
    }

    #[test]
    fn test_empty_record() {
        assert!(build_queries(&GroundTruthRecord::default()).is_empty());
    }

    #[test]
    fn test_group_names() {
        assert_eq!(FieldGroup::AreaSize.to_string(), "area_size");
        assert_eq!(serde_json::to_string(&FieldGroup::Postal).unwrap(), "\"postal\"");
    }
}
