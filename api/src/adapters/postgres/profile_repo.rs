//! PostgreSQL adapter for ProfileRepository

use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ConnectionTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use super::{db_err, ensure_deleted};
use crate::domain::entities::{EmailAddress, PersonName, Profile, ProfileId, StreetAddress};
use crate::domain::ports::ProfileRepository;
use crate::entity::profiles;
use crate::error::DomainError;

/// PostgreSQL implementation of ProfileRepository
pub struct PostgresProfileRepository {
    db: DatabaseConnection,
}

impl PostgresProfileRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProfileRepository for PostgresProfileRepository {
    async fn find_by_id(&self, id: &ProfileId) -> Result<Option<Profile>, DomainError> {
        let result = profiles::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        result.map(Profile::try_from).transpose()
    }

    async fn list(&self) -> Result<Vec<Profile>, DomainError> {
        let results = profiles::Entity::find()
            .order_by_asc(profiles::Column::LastName)
            .order_by_asc(profiles::Column::FirstName)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        results.into_iter().map(Profile::try_from).collect()
    }
}

pub(super) async fn save<C: ConnectionTrait>(
    conn: &C,
    profile: &Profile,
) -> Result<(), DomainError> {
    let model = profiles::ActiveModel {
        id: Set(profile.id.0),
        first_name: Set(profile.name.first_name().to_string()),
        last_name: Set(profile.name.last_name().to_string()),
        email: Set(profile.email.address().to_string()),
        street: Set(profile.address.street().to_string()),
        number: Set(profile.address.number().to_string()),
        city: Set(profile.address.city().to_string()),
        country: Set(profile.address.country().to_string()),
        company_name: Set(profile.company_name.clone()),
        phone_number: Set(profile.phone_number.clone()),
        ruc: Set(profile.ruc.clone()),
    };

    profiles::Entity::insert(model)
        .on_conflict(
            OnConflict::column(profiles::Column::Id)
                .update_columns([
                    profiles::Column::FirstName,
                    profiles::Column::LastName,
                    profiles::Column::Email,
                    profiles::Column::Street,
                    profiles::Column::Number,
                    profiles::Column::City,
                    profiles::Column::Country,
                    profiles::Column::CompanyName,
                    profiles::Column::PhoneNumber,
                    profiles::Column::Ruc,
                ])
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await
        .map_err(db_err)?;

    Ok(())
}

pub(super) async fn remove<C: ConnectionTrait>(
    conn: &C,
    id: &ProfileId,
) -> Result<(), DomainError> {
    let result = profiles::Entity::delete_by_id(id.0)
        .exec(conn)
        .await
        .map_err(db_err)?;

    ensure_deleted(result.rows_affected, || format!("Profile {} not found", id))
}

/// Rebuild the value objects; a row that no longer validates is a storage fault
impl TryFrom<profiles::Model> for Profile {
    type Error = DomainError;

    fn try_from(model: profiles::Model) -> Result<Self, Self::Error> {
        let id = ProfileId(model.id);
        let corrupt =
            |e: DomainError| DomainError::Database(format!("Stored profile {} is invalid: {}", id, e));

        Ok(Profile {
            id,
            name: PersonName::new(&model.first_name, &model.last_name).map_err(corrupt)?,
            email: EmailAddress::new(&model.email).map_err(corrupt)?,
            address: StreetAddress::new(&model.street, &model.number, &model.city, &model.country)
                .map_err(corrupt)?,
            company_name: model.company_name,
            phone_number: model.phone_number,
            ruc: model.ruc,
        })
    }
}
