//! Crop master models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A traded commodity (maize, wheat, bajra, ...)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Crop {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    /// Empty-bag tare weight, used to prefill line weights in the entry form
    pub default_bag_weight_kg: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hsn_code: Option<String>,
}
