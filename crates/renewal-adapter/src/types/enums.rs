/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust enums with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle status of a renewable record as reported by the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordStatus {
    Active,
    Expiring,
    Expired,
    Revoked,
    #[serde(other)]
    Unknown,
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RecordStatus::Active => "active",
            RecordStatus::Expiring => "expiring",
            RecordStatus::Expired => "expired",
            RecordStatus::Revoked => "revoked",
            RecordStatus::Unknown => "unknown",
        };
        f.write_str(label)
    }
}
