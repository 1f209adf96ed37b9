/*
[INPUT]:  Record identifiers and submission payloads
[OUTPUT]: Existing submission counts and submit confirmations
[POS]:    HTTP layer - renewal submission endpoints
[UPDATE]: When changing submission flow or payload format
*/

use crate::http::{RenewalClient, Result};
use crate::types::{SubmissionCountResponse, SubmissionPayload, SubmitResponse};
use reqwest::Method;

impl RenewalClient {
    /// Number of preferences already stored for a record
    ///
    /// GET /api/renewals/{record_id}/submissions/count
    pub async fn count_existing(&self, record_id: &str) -> Result<u32> {
        let builder = self.request(
            Method::GET,
            &["api", "renewals", record_id, "submissions", "count"],
        )?;
        let response: SubmissionCountResponse = self.send_json(builder).await?;
        Ok(response.count)
    }

    /// Store the renewal decision, replacing whatever was there
    ///
    /// POST /api/renewals/submissions
    pub async fn submit(&self, payload: &SubmissionPayload) -> Result<SubmitResponse> {
        let builder = self
            .request(Method::POST, &["api", "renewals", "submissions"])?
            .json(payload);
        let response: SubmitResponse = self.send_json(builder).await?;
        tracing::info!(
            record_id = %payload.record_id,
            success = response.success,
            "renewal submitted"
        );
        Ok(response)
    }
}
