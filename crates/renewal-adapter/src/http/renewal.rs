/*
[INPUT]:  Client identity and base URL
[OUTPUT]: Renewable records, form options and popup labels
[POS]:    HTTP layer - read-only renewal endpoints
[UPDATE]: When adding new read endpoints or changing response format
*/

use crate::http::{RenewalClient, Result};
use crate::types::{FormOptionsResponse, InitialListResponse, LabelPair, PopupLabelsResponse};
use reqwest::Method;

impl RenewalClient {
    /// List renewable records together with the list labels
    ///
    /// GET /api/renewals
    pub async fn fetch_initial_list(&self) -> Result<InitialListResponse> {
        let builder = self.request(Method::GET, &["api", "renewals"])?;
        let response: InitialListResponse = self.send_json(builder).await?;
        tracing::debug!(records = response.records.len(), "initial list fetched");
        Ok(response)
    }

    /// Options offered by the renewal form
    ///
    /// GET /api/renewals/options
    pub async fn fetch_form_options(&self) -> Result<FormOptionsResponse> {
        let builder = self.request(Method::GET, &["api", "renewals", "options"])?;
        self.send_json(builder).await
    }

    /// Texts shown when existing preferences are about to be overwritten
    ///
    /// GET /api/renewals/popup-labels
    pub async fn fetch_popup_labels(&self) -> Result<LabelPair> {
        let builder = self.request(Method::GET, &["api", "renewals", "popup-labels"])?;
        let PopupLabelsResponse(labels) = self.send_json(builder).await?;
        Ok(labels)
    }
}

#[cfg(test)]
mod tests {
    use crate::http::{RenewalClient, RenewalError};
    use crate::types::{AccountOption, LabelPair, RecordStatus, RenewOption};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_fetch_initial_list() {
        let server = MockServer::start().await;
        let mock_response = r#"{
            "records": [
                {"suffix": "0001", "status": "expiring", "expiresAt": "2026-11-30T00:00:00Z",
                 "attributes": {"holder": "svc-web"}},
                {"suffix": "0002", "status": "active"}
            ],
            "label1": "Renewable certificates",
            "label2": "Select one to renew",
            "errorMsg": "Renewal could not be saved"
        }"#;

        Mock::given(method("GET"))
            .and(path("/api/renewals"))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw(mock_response, "application/json"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = RenewalClient::new(&server.uri()).expect("client init");
        let response = client.fetch_initial_list().await.expect("fetch_initial_list");

        assert_eq!(response.records.len(), 2);
        assert_eq!(response.records[0].status, RecordStatus::Expiring);
        assert_eq!(
            response.records[0].attributes.get("holder").map(String::as_str),
            Some("svc-web")
        );
        assert!(response.records[0].expires_at.is_some());
        assert_eq!(
            response.labels(),
            LabelPair::new("Renewable certificates", "Select one to renew")
        );
        assert_eq!(response.error_msg, "Renewal could not be saved");
    }

    #[tokio::test]
    async fn test_fetch_form_options() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/renewals/options"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "renewOptions": [
                    {"value": "keep", "shortText": "Keep", "richText": "Keep <i>as is</i>"},
                    {"value": "move", "shortText": "Move"}
                ],
                "accountOptions": [{"value": "acc-1", "text": "Primary"}]
            })))
            .mount(&server)
            .await;

        let client = RenewalClient::new(&server.uri()).expect("client init");
        let options = client.fetch_form_options().await.expect("fetch_form_options");

        assert_eq!(options.renew_options[0].rich_text, "Keep <i>as is</i>");
        assert_eq!(options.renew_options[1], RenewOption::new("move", "Move"));
        assert_eq!(options.account_options, vec![AccountOption::new("acc-1", "Primary")]);
    }

    #[tokio::test]
    async fn test_fetch_popup_labels() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/renewals/popup-labels"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "label1": "Preferences exist",
                "label2": "Overwrite them?"
            })))
            .mount(&server)
            .await;

        let client = RenewalClient::new(&server.uri()).expect("client init");
        let labels = client.fetch_popup_labels().await.expect("fetch_popup_labels");
        assert_eq!(labels, LabelPair::new("Preferences exist", "Overwrite them?"));
    }

    #[tokio::test]
    async fn test_error_status_maps_to_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/renewals"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let client = RenewalClient::new(&server.uri()).expect("client init");
        let err = client.fetch_initial_list().await.expect_err("503 must fail");
        match err {
            RenewalError::Api { code, message } => {
                assert_eq!(code, 503);
                assert_eq!(message, "maintenance");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
