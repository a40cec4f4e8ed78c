use std::sync::Arc;

use crate::{
    ports::email::EmailPort,
    workflow::contact::{
        dispatch::{ContactMailSettings, DispatchContactEmailWorkflowImpl},
        submit::{SubmitContactUseCase, SubmitContactUseCaseImpl},
    },
};

pub mod domain;
pub mod ports;
pub mod workflow;

pub struct Application {
    pub contact_submit_use_case: Box<dyn SubmitContactUseCase + Send + Sync + 'static>,
}

pub fn build_application<E: EmailPort + Send + Sync + 'static>(
    email_port: Arc<E>,
    mail_settings: ContactMailSettings,
) -> Application {
    let dispatch_contact_email_workflow = Arc::new(DispatchContactEmailWorkflowImpl::new(
        email_port,
        mail_settings,
    ));

    let contact_submit_use_case = Box::new(SubmitContactUseCaseImpl::new(
        dispatch_contact_email_workflow,
    ));

    Application {
        contact_submit_use_case,
    }
}
