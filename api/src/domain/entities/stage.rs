//! Winemaking process stages
//!
//! A batch carries at most one record per [`StageKind`]. The four record
//! types are flat parameter sets; [`StageRecord`] tags them with their kind so
//! batch operations can be written once for every stage.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// The four sub-processes of a batch, in process order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageKind {
    Fermentation,
    Clarification,
    Pressing,
    Aging,
}

impl StageKind {
    pub const ALL: [StageKind; 4] = [
        StageKind::Fermentation,
        StageKind::Clarification,
        StageKind::Pressing,
        StageKind::Aging,
    ];

    /// Capitalised name used in user-facing messages
    pub fn title(&self) -> &'static str {
        match self {
            StageKind::Fermentation => "Fermentation",
            StageKind::Clarification => "Clarification",
            StageKind::Pressing => "Pressing",
            StageKind::Aging => "Aging",
        }
    }
}

impl std::fmt::Display for StageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StageKind::Fermentation => write!(f, "fermentation"),
            StageKind::Clarification => write!(f, "clarification"),
            StageKind::Pressing => write!(f, "pressing"),
            StageKind::Aging => write!(f, "aging"),
        }
    }
}

impl std::str::FromStr for StageKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fermentation" => Ok(StageKind::Fermentation),
            "clarification" => Ok(StageKind::Clarification),
            "pressing" => Ok(StageKind::Pressing),
            "aging" | "ageing" => Ok(StageKind::Aging),
            _ => Err(format!("Unknown process stage: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fermentation {
    pub yeast_used: String,
    pub fermentation_type: String,
    pub start_date: String,
    pub end_date: String,
    pub initial_sugar_level: f64,
    pub final_sugar_level: f64,
    pub initial_ph: f64,
    pub final_ph: f64,
    pub temperature_min: f64,
    pub temperature_max: f64,
    pub tank_code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Clarification {
    pub method_used: String,
    pub start_date: String,
    pub end_date: String,
    /// NTU
    pub initial_turbidity: f64,
    pub final_turbidity: f64,
    pub wine_volume: f64,
    pub temperature: f64,
    pub duration_hours: i32,
    #[serde(default)]
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pressing {
    pub press_type: String,
    pub start_date: String,
    pub end_date: String,
    pub pressure_bars: f64,
    pub duration_minutes: i32,
    pub pomace_weight_kg: f64,
    pub yield_liters: f64,
    pub must_usage: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Aging {
    pub barrel_type: String,
    pub start_date: String,
    pub end_date: String,
    pub aging_duration_months: i32,
    pub inspections_performed: i32,
    pub inspection_result: String,
}

/// A stage record tagged with its kind
#[derive(Debug, Clone, PartialEq)]
pub enum StageRecord {
    Fermentation(Fermentation),
    Clarification(Clarification),
    Pressing(Pressing),
    Aging(Aging),
}

impl StageRecord {
    pub fn kind(&self) -> StageKind {
        match self {
            StageRecord::Fermentation(_) => StageKind::Fermentation,
            StageRecord::Clarification(_) => StageKind::Clarification,
            StageRecord::Pressing(_) => StageKind::Pressing,
            StageRecord::Aging(_) => StageKind::Aging,
        }
    }

    /// Decode the flat JSON body for the given kind
    pub fn from_json(kind: StageKind, value: serde_json::Value) -> Result<Self, DomainError> {
        let parsed = match kind {
            StageKind::Fermentation => serde_json::from_value(value).map(StageRecord::Fermentation),
            StageKind::Clarification => {
                serde_json::from_value(value).map(StageRecord::Clarification)
            }
            StageKind::Pressing => serde_json::from_value(value).map(StageRecord::Pressing),
            StageKind::Aging => serde_json::from_value(value).map(StageRecord::Aging),
        };

        parsed.map_err(|e| DomainError::Validation(format!("Invalid {} body: {}", kind, e)))
    }

    /// Encode the record without its tag
    pub fn to_json(&self) -> serde_json::Value {
        let encoded = match self {
            StageRecord::Fermentation(r) => serde_json::to_value(r),
            StageRecord::Clarification(r) => serde_json::to_value(r),
            StageRecord::Pressing(r) => serde_json::to_value(r),
            StageRecord::Aging(r) => serde_json::to_value(r),
        };
        // Plain structs with string keys always encode.
        encoded.unwrap_or(serde_json::Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::aging;
    use serde_json::json;

    #[test]
    fn kind_parsing_and_display() {
        for kind in StageKind::ALL {
            assert_eq!(kind.to_string().parse::<StageKind>().unwrap(), kind);
        }
        assert_eq!("Aging".parse::<StageKind>().unwrap(), StageKind::Aging);
        assert!("bottling".parse::<StageKind>().is_err());
    }

    #[test]
    fn kinds_are_ordered_by_process() {
        assert!(StageKind::Fermentation < StageKind::Clarification);
        assert!(StageKind::Clarification < StageKind::Pressing);
        assert!(StageKind::Pressing < StageKind::Aging);
    }

    #[test]
    fn aging_decodes_from_camel_case_body() {
        let body = json!({
            "barrelType": "French oak",
            "startDate": "2024-05-01",
            "endDate": "2025-05-01",
            "agingDurationMonths": 12,
            "inspectionsPerformed": 3,
            "inspectionResult": "Good"
        });

        let record = StageRecord::from_json(StageKind::Aging, body).unwrap();

        assert_eq!(record.kind(), StageKind::Aging);
        match record {
            StageRecord::Aging(a) => {
                assert_eq!(a.barrel_type, "French oak");
                assert_eq!(a.aging_duration_months, 12);
                assert_eq!(a.inspections_performed, 3);
            }
            other => panic!("unexpected record {:?}", other),
        }
    }

    #[test]
    fn wrong_body_for_kind_is_a_validation_error() {
        let body = StageRecord::Aging(aging()).to_json();
        let result = StageRecord::from_json(StageKind::Pressing, body);
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn json_encoding_is_untagged() {
        let value = StageRecord::Aging(aging()).to_json();
        assert_eq!(value["barrelType"], "French oak");
        assert!(value.get("Aging").is_none());
    }
}
