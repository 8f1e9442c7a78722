//! In-memory adapter
//!
//! One store backing every repository and the unit of work. Used when no
//! database is configured and as the test double for services and handlers.
//! Changes are applied in place while a journal records how to revert each
//! one; a failing change set is rolled back from that journal, so a commit
//! costs time proportional to its own changes, not to the stored rows.

use std::collections::BTreeMap;
#[cfg(test)]
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::entities::{
    Batch, BatchId, Client, ClientId, Inventory, InventoryId, Order, OrderId, OrderRequest,
    OrderRequestId, Profile, ProfileId, User, UserId,
};
use crate::domain::ports::{
    Aggregate, AggregateKey, BatchRepository, Change, ChangeSet, ClientRepository,
    InventoryRepository, OrderRepository, OrderRequestRepository, ProfileRepository,
    UnitOfWork, UserRepository,
};
use crate::error::DomainError;

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<UserId, User>,
    profiles: BTreeMap<ProfileId, Profile>,
    orders: BTreeMap<OrderId, Order>,
    order_requests: BTreeMap<OrderRequestId, OrderRequest>,
    inventories: BTreeMap<InventoryId, Inventory>,
    clients: BTreeMap<ClientId, Client>,
    batches: BTreeMap<BatchId, Batch>,
}

/// The change that restores what an insert-or-overwrite replaced
fn revert_save<T: Into<Aggregate>>(previous: Option<T>, key: AggregateKey) -> Change {
    match previous {
        Some(old) => Change::Save(old.into()),
        None => Change::Remove(key),
    }
}

impl Tables {
    /// Apply one change, returning the change that reverts it
    fn apply(&mut self, change: Change) -> Result<Change, DomainError> {
        match change {
            Change::Save(aggregate) => self.save(aggregate),
            Change::Remove(key) => self.remove(key),
        }
    }

    fn save(&mut self, aggregate: Aggregate) -> Result<Change, DomainError> {
        let revert = match aggregate {
            Aggregate::User(user) => {
                let taken = self
                    .users
                    .values()
                    .any(|u| u.username == user.username && u.id != user.id);
                if taken {
                    return Err(DomainError::Database(format!(
                        "duplicate key value violates unique constraint on username '{}'",
                        user.username
                    )));
                }
                let id = user.id;
                revert_save(self.users.insert(id, user), id.into())
            }
            Aggregate::Profile(profile) => {
                let id = profile.id;
                revert_save(self.profiles.insert(id, profile), id.into())
            }
            Aggregate::Order(order) => {
                let id = order.id;
                revert_save(self.orders.insert(id, order), id.into())
            }
            Aggregate::OrderRequest(request) => {
                let id = request.id;
                revert_save(self.order_requests.insert(id, request), id.into())
            }
            Aggregate::Inventory(item) => {
                let id = item.id;
                revert_save(self.inventories.insert(id, item), id.into())
            }
            Aggregate::Client(client) => {
                let id = client.id;
                revert_save(self.clients.insert(id, client), id.into())
            }
            Aggregate::Batch(batch) => {
                let id = batch.id;
                revert_save(self.batches.insert(id, batch), id.into())
            }
            Aggregate::Stage(batch_id, record) => {
                let kind = record.kind();
                let batch = self.batches.get_mut(&batch_id).ok_or_else(|| {
                    DomainError::NotFound(format!("No batch {} for {} record", batch_id, kind))
                })?;
                let previous = batch.put_stage(record).map(|old| (batch_id, old));
                revert_save(previous, (batch_id, kind).into())
            }
        };
        Ok(revert)
    }

    fn remove(&mut self, key: AggregateKey) -> Result<Change, DomainError> {
        let removed: Option<Aggregate> = match key {
            AggregateKey::User(id) => self.users.remove(&id).map(Into::into),
            AggregateKey::Profile(id) => self.profiles.remove(&id).map(Into::into),
            AggregateKey::Order(id) => self.orders.remove(&id).map(Into::into),
            AggregateKey::OrderRequest(id) => self.order_requests.remove(&id).map(Into::into),
            AggregateKey::Inventory(id) => self.inventories.remove(&id).map(Into::into),
            AggregateKey::Client(id) => self.clients.remove(&id).map(Into::into),
            AggregateKey::Batch(id) => self.batches.remove(&id).map(Into::into),
            AggregateKey::Stage(batch_id, kind) => self
                .batches
                .get_mut(&batch_id)
                .and_then(|batch| batch.take_stage(kind))
                .map(|record| Aggregate::Stage(batch_id, record)),
        };
        removed
            .map(Change::Save)
            .ok_or_else(|| DomainError::NotFound(format!("No row to delete for {:?}", key)))
    }
}

#[derive(Debug, Default)]
struct Sequences {
    users: i32,
    orders: i32,
    order_requests: i32,
    inventories: i32,
    clients: i32,
    batches: i32,
}

fn next(counter: &mut i32) -> i32 {
    *counter += 1;
    *counter
}

/// In-memory implementation of every repository port and UnitOfWork
#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
    sequences: RwLock<Sequences>,
    #[cfg(test)]
    fail_commits: AtomicBool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent commit fail, for exercising error paths
    #[cfg(test)]
    pub fn failing_commits(self) -> Self {
        self.fail_commits.store(true, Ordering::SeqCst);
        self
    }

    /// Number of committed change sets' worth of rows, for assertions in tests
    #[cfg(test)]
    pub async fn user_count(&self) -> usize {
        self.tables.read().await.users.len()
    }
}

#[async_trait]
impl UnitOfWork for InMemoryStore {
    async fn complete(&self, changes: ChangeSet) -> Result<(), DomainError> {
        #[cfg(test)]
        if self.fail_commits.load(Ordering::SeqCst) {
            return Err(DomainError::Database("connection reset".to_string()));
        }

        let mut tables = self.tables.write().await;
        let mut journal = Vec::new();
        for change in changes {
            match tables.apply(change) {
                Ok(revert) => journal.push(revert),
                Err(e) => {
                    for revert in journal.into_iter().rev() {
                        if let Err(undo_err) = tables.apply(revert) {
                            tracing::error!(error = %undo_err, "Failed to roll back in-memory change");
                        }
                    }
                    return Err(e);
                }
            }
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn next_id(&self) -> Result<UserId, DomainError> {
        Ok(UserId(next(&mut self.sequences.write().await.users)))
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        Ok(self.tables.read().await.users.get(id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        Ok(self.tables.read().await.users.values().cloned().collect())
    }
}

#[async_trait]
impl ProfileRepository for InMemoryStore {
    async fn find_by_id(&self, id: &ProfileId) -> Result<Option<Profile>, DomainError> {
        Ok(self.tables.read().await.profiles.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<Profile>, DomainError> {
        Ok(self.tables.read().await.profiles.values().cloned().collect())
    }
}

#[async_trait]
impl OrderRepository for InMemoryStore {
    async fn next_id(&self) -> Result<OrderId, DomainError> {
        Ok(OrderId(next(&mut self.sequences.write().await.orders)))
    }

    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, DomainError> {
        Ok(self.tables.read().await.orders.get(id).cloned())
    }

    async fn find_by_profile(&self, profile_id: &ProfileId) -> Result<Vec<Order>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables
            .orders
            .values()
            .filter(|o| &o.profile_id == profile_id)
            .cloned()
            .collect())
    }

    async fn list(&self) -> Result<Vec<Order>, DomainError> {
        Ok(self.tables.read().await.orders.values().cloned().collect())
    }
}

#[async_trait]
impl OrderRequestRepository for InMemoryStore {
    async fn next_id(&self) -> Result<OrderRequestId, DomainError> {
        Ok(OrderRequestId(next(
            &mut self.sequences.write().await.order_requests,
        )))
    }

    async fn find_by_id(&self, id: &OrderRequestId) -> Result<Option<OrderRequest>, DomainError> {
        Ok(self.tables.read().await.order_requests.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<OrderRequest>, DomainError> {
        Ok(self
            .tables
            .read()
            .await
            .order_requests
            .values()
            .cloned()
            .collect())
    }
}

#[async_trait]
impl InventoryRepository for InMemoryStore {
    async fn next_id(&self) -> Result<InventoryId, DomainError> {
        Ok(InventoryId(next(&mut self.sequences.write().await.inventories)))
    }

    async fn find_by_id(&self, id: &InventoryId) -> Result<Option<Inventory>, DomainError> {
        Ok(self.tables.read().await.inventories.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<Inventory>, DomainError> {
        Ok(self
            .tables
            .read()
            .await
            .inventories
            .values()
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ClientRepository for InMemoryStore {
    async fn next_id(&self) -> Result<ClientId, DomainError> {
        Ok(ClientId(next(&mut self.sequences.write().await.clients)))
    }

    async fn find_by_id(&self, id: &ClientId) -> Result<Option<Client>, DomainError> {
        Ok(self.tables.read().await.clients.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<Client>, DomainError> {
        Ok(self.tables.read().await.clients.values().cloned().collect())
    }
}

#[async_trait]
impl BatchRepository for InMemoryStore {
    async fn next_id(&self) -> Result<BatchId, DomainError> {
        Ok(BatchId(next(&mut self.sequences.write().await.batches)))
    }

    async fn find_by_id(&self, id: &BatchId) -> Result<Option<Batch>, DomainError> {
        Ok(self.tables.read().await.batches.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<Batch>, DomainError> {
        Ok(self.tables.read().await.batches.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Role, StageKind, StageRecord};
    use crate::test_utils::{aging, fermentation, new_batch, pressing, test_user};

    #[tokio::test]
    async fn saved_aggregates_are_readable() {
        let store = InMemoryStore::new();
        let id = BatchRepository::next_id(&store).await.unwrap();
        let mut batch = Batch::new(id, new_batch());
        batch.add_stage(StageRecord::Aging(aging())).unwrap();

        let mut changes = ChangeSet::new();
        changes.save(batch.clone());
        store.complete(changes).await.unwrap();

        let found = BatchRepository::find_by_id(&store, &id).await.unwrap();
        assert_eq!(found, Some(batch));
        assert!(found.unwrap().has_stage(StageKind::Aging));
    }

    #[tokio::test]
    async fn ids_are_sequential_per_aggregate() {
        let store = InMemoryStore::new();
        assert_eq!(BatchRepository::next_id(&store).await.unwrap(), BatchId(1));
        assert_eq!(BatchRepository::next_id(&store).await.unwrap(), BatchId(2));
        assert_eq!(OrderRepository::next_id(&store).await.unwrap(), OrderId(1));
    }

    #[tokio::test]
    async fn failed_change_set_applies_nothing() {
        let store = InMemoryStore::new();
        let user = test_user("ana", Role::Producer);

        let mut changes = ChangeSet::new();
        changes.save(user.clone()).remove(OrderId(99));
        assert!(store.complete(changes).await.is_err());

        assert!(UserRepository::find_by_id(&store, &user.id)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn duplicate_username_is_rejected_at_commit() {
        let store = InMemoryStore::new();
        let mut first = ChangeSet::new();
        first.save(test_user("ana", Role::Producer));
        store.complete(first).await.unwrap();

        let mut clash = test_user("ana", Role::Admin);
        clash.id = UserId(42);
        let mut second = ChangeSet::new();
        second.save(clash);

        assert!(matches!(
            store.complete(second).await,
            Err(DomainError::Database(_))
        ));
        assert_eq!(store.user_count().await, 1);
    }

    #[tokio::test]
    async fn failing_commits_reject_everything() {
        let store = InMemoryStore::new().failing_commits();
        let mut changes = ChangeSet::new();
        changes.save(test_user("ana", Role::Producer));

        assert!(store.complete(changes).await.is_err());
        assert_eq!(store.user_count().await, 0);
    }

    #[tokio::test]
    async fn rollback_restores_overwritten_rows() {
        let store = InMemoryStore::new();
        let user = test_user("ana", Role::Producer);
        let mut first = ChangeSet::new();
        first.save(user.clone());
        store.complete(first).await.unwrap();

        let mut promoted = user.clone();
        promoted.role = Role::Admin;
        let mut changes = ChangeSet::new();
        changes.save(promoted).remove(OrderId(99));
        assert!(store.complete(changes).await.is_err());

        let found = UserRepository::find_by_id(&store, &user.id).await.unwrap();
        assert_eq!(found, Some(user));
    }

    #[tokio::test]
    async fn stage_writes_leave_sibling_stages_alone() {
        let store = InMemoryStore::new();
        let id = BatchRepository::next_id(&store).await.unwrap();
        let mut changes = ChangeSet::new();
        changes.save(Batch::new(id, new_batch()));
        store.complete(changes).await.unwrap();

        // Both writers started from the same stage-less snapshot
        let mut first = ChangeSet::new();
        first.save((id, StageRecord::Fermentation(fermentation())));
        let mut second = ChangeSet::new();
        second.save((id, StageRecord::Pressing(pressing())));
        store.complete(first).await.unwrap();
        store.complete(second).await.unwrap();

        let batch = BatchRepository::find_by_id(&store, &id).await.unwrap().unwrap();
        assert!(batch.has_stage(StageKind::Fermentation));
        assert!(batch.has_stage(StageKind::Pressing));

        let mut remove = ChangeSet::new();
        remove.remove((id, StageKind::Pressing));
        store.complete(remove).await.unwrap();

        let mut again = ChangeSet::new();
        again.remove((id, StageKind::Pressing));
        assert!(matches!(
            store.complete(again).await,
            Err(DomainError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn stage_for_missing_batch_is_not_found() {
        let store = InMemoryStore::new();
        let mut changes = ChangeSet::new();
        changes.save((BatchId(7), StageRecord::Aging(aging())));

        assert!(matches!(
            store.complete(changes).await,
            Err(DomainError::NotFound(_))
        ));
    }
}
