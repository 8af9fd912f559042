use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Claim lifecycle status as stored by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClaimStatus {
    Open,
    Pending,
    Approved,
    Denied,
    NeedsMoreInfo,
}

impl ClaimStatus {
    /// Parse a requested status loosely: case-insensitive, `None` for
    /// anything outside the known set.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_uppercase().as_str() {
            "OPEN" => Some(Self::Open),
            "PENDING" => Some(Self::Pending),
            "APPROVED" => Some(Self::Approved),
            "DENIED" => Some(Self::Denied),
            "NEEDS_MORE_INFO" => Some(Self::NeedsMoreInfo),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Denied => "DENIED",
            Self::NeedsMoreInfo => "NEEDS_MORE_INFO",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimComment {
    pub id: String,
    pub sender: String,
    pub message: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarrantyClaim {
    pub id: String,
    #[serde(rename = "workOrderId")]
    pub work_order_id: String,
    #[serde(rename = "customerId", default)]
    pub customer_id: Option<String>,
    pub status: ClaimStatus,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "firstResponseAt", default)]
    pub first_response_at: Option<DateTime<Utc>>,
    #[serde(rename = "resolutionNotes", default)]
    pub resolution_notes: Option<String>,
    #[serde(rename = "attachmentUrl", default)]
    pub attachment_url: Option<String>,
    #[serde(default)]
    pub comments: Vec<ClaimComment>,
}

/// Visual weight of an SLA badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Destructive,
    Success,
    Warning,
    Muted,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlaBadge {
    pub label: String,
    pub tone: Tone,
}

/// Dashboard roll-up of open claims against the first-response SLA.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlaSummary {
    pub breached: usize,
    pub upcoming: usize,
    pub total_open: usize,
}
