//! Profile service

use std::sync::Arc;

use crate::domain::entities::{NewProfile, Profile, ProfileId};
use crate::domain::ports::{ChangeSet, ProfileRepository, UnitOfWork};
use crate::error::{AppError, DomainError};

pub struct ProfileService<PR, UW>
where
    PR: ProfileRepository + ?Sized,
    UW: UnitOfWork + ?Sized,
{
    profiles: Arc<PR>,
    unit_of_work: Arc<UW>,
}

impl<PR, UW> ProfileService<PR, UW>
where
    PR: ProfileRepository + ?Sized,
    UW: UnitOfWork + ?Sized,
{
    pub fn new(profiles: Arc<PR>, unit_of_work: Arc<UW>) -> Self {
        Self {
            profiles,
            unit_of_work,
        }
    }

    pub async fn create_profile(&self, command: NewProfile) -> Result<Profile, AppError> {
        let profile = Profile::create(&command)?;

        let mut changes = ChangeSet::new();
        changes.save(profile.clone());
        self.unit_of_work.complete(changes).await?;

        tracing::info!(profile_id = %profile.id, "Profile created");
        Ok(profile)
    }

    pub async fn get_profile(&self, id: &ProfileId) -> Result<Option<Profile>, AppError> {
        Ok(self.profiles.find_by_id(id).await?)
    }

    pub async fn list_profiles(&self) -> Result<Vec<Profile>, AppError> {
        Ok(self.profiles.list().await?)
    }

    /// Replace every field of an existing profile
    pub async fn update_profile(
        &self,
        id: &ProfileId,
        command: NewProfile,
    ) -> Result<Profile, AppError> {
        let mut profile = self
            .profiles
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Profile {} not found", id)))?;

        profile.update(&command)?;

        let mut changes = ChangeSet::new();
        changes.save(profile.clone());
        self.unit_of_work.complete(changes).await?;

        Ok(profile)
    }
}
