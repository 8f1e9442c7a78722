//! Client service
//!
//! Customer records kept by distributors and producers.

use std::sync::Arc;

use crate::domain::entities::{Client, ClientId, NewClient};
use crate::domain::ports::{ChangeSet, ClientRepository, UnitOfWork};
use crate::error::{AppError, DomainError};

pub struct ClientService<CR, UW>
where
    CR: ClientRepository + ?Sized,
    UW: UnitOfWork + ?Sized,
{
    clients: Arc<CR>,
    unit_of_work: Arc<UW>,
}

impl<CR, UW> ClientService<CR, UW>
where
    CR: ClientRepository + ?Sized,
    UW: UnitOfWork + ?Sized,
{
    pub fn new(clients: Arc<CR>, unit_of_work: Arc<UW>) -> Self {
        Self {
            clients,
            unit_of_work,
        }
    }

    pub async fn create(&self, command: NewClient) -> Result<Client, AppError> {
        let id = self.clients.next_id().await?;
        let client = Client::new(id, command)?;

        let mut changes = ChangeSet::new();
        changes.save(client.clone());
        self.unit_of_work.complete(changes).await?;

        tracing::info!(client_id = %client.id, "Client created");
        Ok(client)
    }

    pub async fn get(&self, id: &ClientId) -> Result<Option<Client>, AppError> {
        Ok(self.clients.find_by_id(id).await?)
    }

    pub async fn list(&self) -> Result<Vec<Client>, AppError> {
        Ok(self.clients.list().await?)
    }

    pub async fn delete(&self, id: &ClientId) -> Result<(), AppError> {
        if self.clients.find_by_id(id).await?.is_none() {
            return Err(AppError::Domain(DomainError::NotFound(format!(
                "Client {} not found",
                id
            ))));
        }

        let mut changes = ChangeSet::new();
        changes.remove(*id);
        self.unit_of_work.complete(changes).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::test_utils::new_client;

    fn service() -> ClientService<InMemoryStore, InMemoryStore> {
        let store = Arc::new(InMemoryStore::new());
        ClientService::new(store.clone(), store)
    }

    #[tokio::test]
    async fn create_get_delete() {
        let service = service();
        let client = service.create(new_client()).await.unwrap();

        assert_eq!(service.get(&client.id).await.unwrap(), Some(client.clone()));

        service.delete(&client.id).await.unwrap();
        assert!(service.get(&client.id).await.unwrap().is_none());
        assert!(matches!(
            service.delete(&client.id).await,
            Err(AppError::Domain(DomainError::NotFound(_)))
        ));
    }

    #[tokio::test]
    async fn invalid_client_is_rejected() {
        let service = service();
        let command = NewClient {
            person_name: String::new(),
            ..new_client()
        };

        assert!(service.create(command).await.is_err());
        assert!(service.list().await.unwrap().is_empty());
    }
}
