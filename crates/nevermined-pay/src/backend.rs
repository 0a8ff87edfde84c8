//! The seam between the gateway and whatever actually moves funds.
//!
//! [`NeverminedClient`](crate::NeverminedClient) is the production
//! implementation; tests plug in their own.

use std::future::Future;
use std::sync::Arc;

use crate::error::BackendError;
use crate::payment::{PaymentAmount, ServiceId};
use crate::response::BackendReceipt;

/// A payment backend able to purchase access to a service.
pub trait PaymentBackend: Send + Sync {
    /// Pay `amount` for `service_id`. The receipt may or may not carry an agreement id.
    fn pay_for_service(
        &self,
        service_id: &ServiceId,
        amount: PaymentAmount,
    ) -> impl Future<Output = Result<BackendReceipt, BackendError>> + Send;
}

impl<B: PaymentBackend> PaymentBackend for Arc<B> {
    async fn pay_for_service(
        &self,
        service_id: &ServiceId,
        amount: PaymentAmount,
    ) -> Result<BackendReceipt, BackendError> {
        (**self).pay_for_service(service_id, amount).await
    }
}
