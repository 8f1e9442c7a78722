//! Order request service

use std::sync::Arc;

use crate::domain::entities::{OrderRequest, OrderRequestDetails, OrderRequestId};
use crate::domain::ports::{ChangeSet, OrderRequestRepository, UnitOfWork};
use crate::error::{AppError, DomainError};

pub struct OrderRequestService<RR, UW>
where
    RR: OrderRequestRepository + ?Sized,
    UW: UnitOfWork + ?Sized,
{
    requests: Arc<RR>,
    unit_of_work: Arc<UW>,
}

impl<RR, UW> OrderRequestService<RR, UW>
where
    RR: OrderRequestRepository + ?Sized,
    UW: UnitOfWork + ?Sized,
{
    pub fn new(requests: Arc<RR>, unit_of_work: Arc<UW>) -> Self {
        Self {
            requests,
            unit_of_work,
        }
    }

    async fn load(&self, id: &OrderRequestId) -> Result<OrderRequest, AppError> {
        self.requests
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Order request {} not found", id)).into())
    }

    async fn commit(&self, request: &OrderRequest) -> Result<(), AppError> {
        let mut changes = ChangeSet::new();
        changes.save(request.clone());
        self.unit_of_work.complete(changes).await?;
        Ok(())
    }

    pub async fn create(&self, details: OrderRequestDetails) -> Result<OrderRequest, AppError> {
        let id = self.requests.next_id().await?;
        let request = OrderRequest::new(id, details)?;
        self.commit(&request).await?;

        tracing::info!(order_request_id = %request.id, order_number = %request.details.order_number, "Order request created");
        Ok(request)
    }

    pub async fn get(&self, id: &OrderRequestId) -> Result<Option<OrderRequest>, AppError> {
        Ok(self.requests.find_by_id(id).await?)
    }

    pub async fn list(&self) -> Result<Vec<OrderRequest>, AppError> {
        Ok(self.requests.list().await?)
    }

    pub async fn update_status(
        &self,
        id: &OrderRequestId,
        status: &str,
    ) -> Result<OrderRequest, AppError> {
        let mut request = self.load(id).await?;
        request.update_status(status);
        self.commit(&request).await?;
        Ok(request)
    }

    /// Overwrite every field of the request
    pub async fn update(
        &self,
        id: &OrderRequestId,
        details: OrderRequestDetails,
    ) -> Result<OrderRequest, AppError> {
        let mut request = self.load(id).await?;
        request.update(details)?;
        self.commit(&request).await?;
        Ok(request)
    }

    pub async fn delete(&self, id: &OrderRequestId) -> Result<(), AppError> {
        let request = self.load(id).await?;

        let mut changes = ChangeSet::new();
        changes.remove(request.id);
        self.unit_of_work.complete(changes).await?;
        Ok(())
    }
}
