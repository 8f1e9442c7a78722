//! PostgreSQL adapter for ClientRepository

use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ConnectionTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use super::{db_err, ensure_deleted, next_val};
use crate::domain::entities::{Client, ClientId};
use crate::domain::ports::ClientRepository;
use crate::entity::clients;
use crate::error::DomainError;

/// PostgreSQL implementation of ClientRepository
pub struct PostgresClientRepository {
    db: DatabaseConnection,
}

impl PostgresClientRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ClientRepository for PostgresClientRepository {
    async fn next_id(&self) -> Result<ClientId, DomainError> {
        Ok(ClientId(next_val(&self.db, "clients_id_seq").await?))
    }

    async fn find_by_id(&self, id: &ClientId) -> Result<Option<Client>, DomainError> {
        let result = clients::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(result.map(|m| m.into()))
    }

    async fn list(&self) -> Result<Vec<Client>, DomainError> {
        let results = clients::Entity::find()
            .order_by_asc(clients::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }
}

pub(super) async fn save<C: ConnectionTrait>(conn: &C, client: &Client) -> Result<(), DomainError> {
    let model = clients::ActiveModel {
        id: Set(client.id.0),
        person_name: Set(client.person_name.clone()),
        dni: Set(client.dni),
        email: Set(client.email.clone()),
        business_name: Set(client.business_name.clone()),
        phone: Set(client.phone),
        address: Set(client.address.clone()),
        country: Set(client.country.clone()),
        city: Set(client.city.clone()),
        ruc: Set(client.ruc),
    };

    clients::Entity::insert(model)
        .on_conflict(
            OnConflict::column(clients::Column::Id)
                .update_columns([
                    clients::Column::PersonName,
                    clients::Column::Dni,
                    clients::Column::Email,
                    clients::Column::BusinessName,
                    clients::Column::Phone,
                    clients::Column::Address,
                    clients::Column::Country,
                    clients::Column::City,
                    clients::Column::Ruc,
                ])
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await
        .map_err(db_err)?;

    Ok(())
}

pub(super) async fn remove<C: ConnectionTrait>(conn: &C, id: &ClientId) -> Result<(), DomainError> {
    let result = clients::Entity::delete_by_id(id.0)
        .exec(conn)
        .await
        .map_err(db_err)?;

    ensure_deleted(result.rows_affected, || format!("Client {} not found", id))
}

impl From<clients::Model> for Client {
    fn from(model: clients::Model) -> Self {
        Client {
            id: ClientId(model.id),
            person_name: model.person_name,
            dni: model.dni,
            email: model.email,
            business_name: model.business_name,
            phone: model.phone,
            address: model.address,
            country: model.country,
            city: model.city,
            ruc: model.ruc,
        }
    }
}
