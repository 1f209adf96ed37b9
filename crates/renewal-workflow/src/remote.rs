/*
[INPUT]:  RenewalClient from renewal-adapter
[OUTPUT]: DataFetch and SubmissionService backed by the REST service
[POS]:    Collaborator bindings - remote renewal service
[UPDATE]: When the adapter's endpoints or response shapes change
*/

use async_trait::async_trait;
use renewal_adapter::{LabelPair, RenewalClient, SubmissionPayload};

use crate::ports::{DataFetch, FormOptions, InitialList, ServiceError, SubmissionService};

#[async_trait]
impl DataFetch for RenewalClient {
    async fn fetch_initial_list(&self) -> Result<InitialList, ServiceError> {
        let response = RenewalClient::fetch_initial_list(self).await?;
        let labels = response.labels();
        Ok(InitialList {
            records: response.records,
            labels,
            error_message: response.error_msg,
        })
    }

    async fn fetch_form_options(&self) -> Result<FormOptions, ServiceError> {
        let response = RenewalClient::fetch_form_options(self).await?;
        Ok(FormOptions {
            renew_options: response.renew_options,
            account_options: response.account_options,
        })
    }

    async fn fetch_popup_labels(&self) -> Result<LabelPair, ServiceError> {
        Ok(RenewalClient::fetch_popup_labels(self).await?)
    }
}

#[async_trait]
impl SubmissionService for RenewalClient {
    async fn count_existing(&self, record_id: &str) -> Result<u32, ServiceError> {
        Ok(RenewalClient::count_existing(self, record_id).await?)
    }

    async fn submit(&self, payload: &SubmissionPayload) -> Result<bool, ServiceError> {
        let response = RenewalClient::submit(self, payload).await?;
        match (response.success, response.message) {
            (true, _) => Ok(true),
            (false, Some(message)) if !message.trim().is_empty() => {
                Err(ServiceError::Rejected(message))
            }
            (false, _) => Ok(false),
        }
    }
}
