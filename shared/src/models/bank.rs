//! Bank account master models

use serde::{Deserialize, Serialize};

/// A bank account payments can be routed through
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankAccount {
    pub id: String,
    pub bank_name: String,
    pub branch: String,
    pub ifsc: String,
    pub account_no: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upi_id: Option<String>,
}
