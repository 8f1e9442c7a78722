//! Batch domain entity
//!
//! A production batch and the winemaking stages recorded against it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::stage::{StageKind, StageRecord};
use crate::error::DomainError;

/// Unique identifier for a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BatchId(pub i32);

impl From<i32> for BatchId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for BatchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A production batch
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    pub id: BatchId,
    pub vineyard_code: String,
    pub grape_variety: String,
    pub harvest_campaign: String,
    pub reception_date: String,
    pub initial_grape_quantity_kg: f64,
    pub created_by: String,
    /// At most one record per kind; each value's kind matches its key
    stages: BTreeMap<StageKind, StageRecord>,
}

/// Data needed to register a batch
#[derive(Debug, Clone)]
pub struct NewBatch {
    pub vineyard_code: String,
    pub grape_variety: String,
    pub harvest_campaign: String,
    pub reception_date: String,
    pub initial_grape_quantity_kg: f64,
    pub created_by: String,
}

impl Batch {
    pub fn new(id: BatchId, command: NewBatch) -> Self {
        Self {
            id,
            vineyard_code: command.vineyard_code,
            grape_variety: command.grape_variety,
            harvest_campaign: command.harvest_campaign,
            reception_date: command.reception_date,
            initial_grape_quantity_kg: command.initial_grape_quantity_kg,
            created_by: command.created_by,
            stages: BTreeMap::new(),
        }
    }

    /// Rebuild a batch from storage, keeping the first record seen per kind
    pub fn restore(mut self, records: impl IntoIterator<Item = StageRecord>) -> Self {
        for record in records {
            self.stages.entry(record.kind()).or_insert(record);
        }
        self
    }

    pub fn stage(&self, kind: StageKind) -> Option<&StageRecord> {
        self.stages.get(&kind)
    }

    pub fn has_stage(&self, kind: StageKind) -> bool {
        self.stages.contains_key(&kind)
    }

    /// Stages in process order
    pub fn stages(&self) -> impl Iterator<Item = &StageRecord> {
        self.stages.values()
    }

    /// Furthest stage reached so far
    pub fn latest_stage(&self) -> Option<StageKind> {
        self.stages.keys().next_back().copied()
    }

    pub fn add_stage(&mut self, record: StageRecord) -> Result<&StageRecord, DomainError> {
        let kind = record.kind();
        if self.has_stage(kind) {
            return Err(DomainError::AlreadyExists(format!(
                "Batch {} already has a {} record",
                self.id, kind
            )));
        }
        Ok(&*self.stages.entry(kind).or_insert(record))
    }

    pub fn update_stage(&mut self, record: StageRecord) -> Result<&StageRecord, DomainError> {
        let kind = record.kind();
        let batch_id = self.id;
        let slot = self.stages.get_mut(&kind).ok_or_else(|| {
            DomainError::NotFound(format!("{} for batch {} not found", kind.title(), batch_id))
        })?;
        *slot = record;
        Ok(&*slot)
    }

    /// Storage-level write of one record, returning the record it replaced
    pub fn put_stage(&mut self, record: StageRecord) -> Option<StageRecord> {
        self.stages.insert(record.kind(), record)
    }

    /// Storage-level removal of one record
    pub fn take_stage(&mut self, kind: StageKind) -> Option<StageRecord> {
        self.stages.remove(&kind)
    }

    pub fn remove_stage(&mut self, kind: StageKind) -> Result<StageRecord, DomainError> {
        self.stages.remove(&kind).ok_or_else(|| {
            DomainError::NotFound(format!("{} for batch {} not found", kind.title(), self.id))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::stage::{Aging, Fermentation};
    use crate::test_utils::{aging, clarification, fermentation, new_batch, pressing};

    fn batch() -> Batch {
        Batch::new(BatchId(1), new_batch())
    }

    #[test]
    fn new_batch_has_no_stages() {
        let batch = batch();
        assert_eq!(batch.stages().count(), 0);
        assert_eq!(batch.latest_stage(), None);
    }

    #[test]
    fn add_stage_once_per_kind() {
        let mut batch = batch();

        assert!(batch.add_stage(StageRecord::Aging(aging())).is_ok());
        let second = batch.add_stage(StageRecord::Aging(aging()));

        assert!(matches!(second, Err(DomainError::AlreadyExists(_))));
        assert_eq!(batch.stages().count(), 1);
    }

    #[test]
    fn kinds_are_independent() {
        let mut batch = batch();
        batch.add_stage(StageRecord::Pressing(pressing())).unwrap();
        batch
            .add_stage(StageRecord::Fermentation(fermentation()))
            .unwrap();

        assert!(batch.has_stage(StageKind::Pressing));
        assert!(batch.has_stage(StageKind::Fermentation));
        assert!(!batch.has_stage(StageKind::Aging));
        assert_eq!(batch.latest_stage(), Some(StageKind::Pressing));
    }

    #[test]
    fn update_missing_stage_is_not_found() {
        let mut batch = batch();
        let result = batch.update_stage(StageRecord::Clarification(clarification()));
        assert!(matches!(result, Err(DomainError::NotFound(_))));
    }

    #[test]
    fn update_replaces_record() {
        let mut batch = batch();
        batch.add_stage(StageRecord::Aging(aging())).unwrap();

        let mut changed = aging();
        changed.inspection_result = "Excellent".to_string();
        changed.inspections_performed = 5;
        batch
            .update_stage(StageRecord::Aging(changed.clone()))
            .unwrap();

        assert_eq!(
            batch.stage(StageKind::Aging),
            Some(&StageRecord::Aging(changed))
        );
    }

    #[test]
    fn edge_values_are_stored_unchanged() {
        let mut batch = batch();
        let blank = Aging {
            barrel_type: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            aging_duration_months: 0,
            inspections_performed: 0,
            inspection_result: String::new(),
        };
        batch.add_stage(StageRecord::Aging(blank.clone())).unwrap();
        assert_eq!(
            batch.stage(StageKind::Aging),
            Some(&StageRecord::Aging(blank))
        );

        let inverted = Fermentation {
            initial_sugar_level: -1.0,
            initial_ph: 15.0,
            temperature_min: 30.0,
            temperature_max: 18.0,
            ..fermentation()
        };
        batch
            .add_stage(StageRecord::Fermentation(fermentation()))
            .unwrap();
        batch
            .update_stage(StageRecord::Fermentation(inverted.clone()))
            .unwrap();
        assert_eq!(
            batch.stage(StageKind::Fermentation),
            Some(&StageRecord::Fermentation(inverted))
        );
    }

    #[test]
    fn remove_stage_clears_it() {
        let mut batch = batch();
        batch.add_stage(StageRecord::Aging(aging())).unwrap();

        let removed = batch.remove_stage(StageKind::Aging).unwrap();

        assert_eq!(removed.kind(), StageKind::Aging);
        assert!(batch.stage(StageKind::Aging).is_none());
        assert!(matches!(
            batch.remove_stage(StageKind::Aging),
            Err(DomainError::NotFound(_))
        ));
    }

    #[test]
    fn restore_keeps_first_record_per_kind() {
        let mut other = aging();
        other.barrel_type = "American oak".to_string();

        let batch = batch().restore(vec![
            StageRecord::Aging(aging()),
            StageRecord::Aging(other),
            StageRecord::Pressing(pressing()),
        ]);

        assert_eq!(batch.stages().count(), 2);
        assert_eq!(
            batch.stage(StageKind::Aging),
            Some(&StageRecord::Aging(aging()))
        );
    }
}
