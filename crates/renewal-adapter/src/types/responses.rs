/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust response structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use serde::{Deserialize, Serialize};

use super::models::{AccountOption, LabelPair, Record, RenewOption};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitialListResponse {
    pub records: Vec<Record>,
    #[serde(default)]
    pub label1: String,
    #[serde(default)]
    pub label2: String,
    #[serde(default)]
    pub error_msg: String,
}

impl InitialListResponse {
    pub fn labels(&self) -> LabelPair {
        LabelPair::new(self.label1.clone(), self.label2.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormOptionsResponse {
    pub renew_options: Vec<RenewOption>,
    #[serde(default)]
    pub account_options: Vec<AccountOption>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PopupLabelsResponse(pub LabelPair);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionCountResponse {
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
