use std::sync::Arc;

use log::warn;

use crate::{
    domain::contact::{ContactConfirmation, ContactSubmission, ValidationFailure},
    workflow::contact::dispatch::DispatchContactEmailWorkflow,
};

pub const ACKNOWLEDGEMENT: &str = "Thank you for your message! We'll be in touch soon.";
pub const DELIVERY_FAILURE: &str = "Failed to send email. Please try again later.";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitContactError {
    #[error("{0}")]
    Validation(#[from] ValidationFailure),
    #[error("Failed to send email. Please try again later.")]
    Delivery,
}

#[async_trait::async_trait]
pub trait SubmitContactUseCase {
    async fn submit(
        &self,
        submission: ContactSubmission,
    ) -> Result<ContactConfirmation, SubmitContactError>;
}

pub struct SubmitContactUseCaseImpl<D: DispatchContactEmailWorkflow> {
    dispatch_workflow: Arc<D>,
}

impl<D: DispatchContactEmailWorkflow> SubmitContactUseCaseImpl<D> {
    pub fn new(dispatch_workflow: Arc<D>) -> Self {
        Self { dispatch_workflow }
    }
}

#[async_trait::async_trait]
impl<D: DispatchContactEmailWorkflow + Send + Sync> SubmitContactUseCase
    for SubmitContactUseCaseImpl<D>
{
    async fn submit(
        &self,
        submission: ContactSubmission,
    ) -> Result<ContactConfirmation, SubmitContactError> {
        if let Err(failure) = submission.check() {
            warn!("Rejected contact submission: {}", failure);
            return Err(failure.into());
        }

        if !self.dispatch_workflow.dispatch(&submission).await {
            return Err(SubmitContactError::Delivery);
        }

        Ok(ContactConfirmation {
            message: ACKNOWLEDGEMENT.to_string(),
        })
    }
}
