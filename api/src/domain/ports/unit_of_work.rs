//! Unit of work port
//!
//! A [`ChangeSet`] collects every write a request makes. The service hands it
//! to [`UnitOfWork::complete`] once, and the adapter applies it atomically:
//! either every change lands or none does.

use async_trait::async_trait;

use crate::domain::entities::{
    Batch, BatchId, Client, ClientId, Inventory, InventoryId, Order, OrderId, OrderRequest,
    OrderRequestId, Profile, ProfileId, StageKind, StageRecord, User, UserId,
};
use crate::error::DomainError;

/// An aggregate to insert or overwrite
#[derive(Debug, Clone, PartialEq)]
pub enum Aggregate {
    User(User),
    Profile(Profile),
    Order(Order),
    OrderRequest(OrderRequest),
    Inventory(Inventory),
    Client(Client),
    /// Saved together with its full set of stage records
    Batch(Batch),
    /// One stage record of an existing batch; sibling stages are untouched
    Stage(BatchId, StageRecord),
}

/// Identity of an aggregate to delete
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateKey {
    User(UserId),
    Profile(ProfileId),
    Order(OrderId),
    OrderRequest(OrderRequestId),
    Inventory(InventoryId),
    Client(ClientId),
    Batch(BatchId),
    Stage(BatchId, StageKind),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Change {
    Save(Aggregate),
    Remove(AggregateKey),
}

/// Ordered list of pending writes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangeSet {
    changes: Vec<Change>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage an insert-or-overwrite
    pub fn save(&mut self, aggregate: impl Into<Aggregate>) -> &mut Self {
        self.changes.push(Change::Save(aggregate.into()));
        self
    }

    /// Stage a deletion
    pub fn remove(&mut self, key: impl Into<AggregateKey>) -> &mut Self {
        self.changes.push(Change::Remove(key.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }
}

impl IntoIterator for ChangeSet {
    type Item = Change;
    type IntoIter = std::vec::IntoIter<Change>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.into_iter()
    }
}

macro_rules! aggregate_conversions {
    ($($variant:ident => $entity:ty, $key:ty;)*) => {
        $(
            impl From<$entity> for Aggregate {
                fn from(value: $entity) -> Self {
                    Aggregate::$variant(value)
                }
            }

            impl From<$key> for AggregateKey {
                fn from(value: $key) -> Self {
                    AggregateKey::$variant(value)
                }
            }
        )*
    };
}

aggregate_conversions! {
    User => User, UserId;
    Profile => Profile, ProfileId;
    Order => Order, OrderId;
    OrderRequest => OrderRequest, OrderRequestId;
    Inventory => Inventory, InventoryId;
    Client => Client, ClientId;
    Batch => Batch, BatchId;
}

impl From<(BatchId, StageRecord)> for Aggregate {
    fn from((batch_id, record): (BatchId, StageRecord)) -> Self {
        Aggregate::Stage(batch_id, record)
    }
}

impl From<(BatchId, StageKind)> for AggregateKey {
    fn from((batch_id, kind): (BatchId, StageKind)) -> Self {
        AggregateKey::Stage(batch_id, kind)
    }
}

/// Commit boundary shared by every service
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Apply every change in order as one atomic write
    async fn complete(&self, changes: ChangeSet) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn changes_keep_insertion_order() {
        let mut changes = ChangeSet::new();
        changes
            .remove(OrderId(4))
            .remove(BatchId(2))
            .remove(ClientId(9));

        let keys: Vec<_> = changes
            .into_iter()
            .map(|change| match change {
                Change::Remove(key) => key,
                Change::Save(_) => panic!("unexpected save"),
            })
            .collect();

        assert_eq!(
            keys,
            vec![
                AggregateKey::Order(OrderId(4)),
                AggregateKey::Batch(BatchId(2)),
                AggregateKey::Client(ClientId(9)),
            ]
        );
    }

    #[test]
    fn new_change_set_is_empty() {
        let changes = ChangeSet::new();
        assert!(changes.is_empty());
        assert_eq!(changes.len(), 0);
    }
}
