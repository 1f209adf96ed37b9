/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust request structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use serde::{Deserialize, Serialize};

/// Final renewal decision for one record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    pub record_id: String,
    pub renew_option: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_option: Option<String>,
    pub note_text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_omits_missing_account() {
        let payload = SubmissionPayload {
            record_id: "A-1".to_string(),
            renew_option: "0".to_string(),
            account_option: None,
            note_text: String::new(),
        };
        let json = serde_json::to_value(&payload).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({"recordId": "A-1", "renewOption": "0", "noteText": ""})
        );
    }
}
