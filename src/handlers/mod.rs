pub mod orders;
pub mod products;

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;

use bigdecimal::BigDecimal;

use crate::domain::pricing::DiscountRule;

/// Loosely-typed discount pair used on the wire. Unknown kinds and
/// unparseable values fall back to "no discount" instead of erroring, matching
/// how the pricing rules treat malformed stored pairs.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DiscountDto {
    /// "percentage" or "fixed_amount"
    pub kind: Option<String>,
    /// Decimal value as a string to avoid floating-point issues, e.g. "20"
    pub value: Option<String>,
}

impl DiscountDto {
    pub fn into_rule(self) -> DiscountRule {
        let value = self
            .value
            .as_deref()
            .and_then(|v| BigDecimal::from_str(v).ok());
        DiscountRule::from_parts(self.kind.as_deref(), value)
    }

    pub fn from_rule(rule: &DiscountRule) -> Option<Self> {
        let (kind, value) = rule.as_parts();
        kind.map(|k| DiscountDto {
            kind: Some(k.to_string()),
            value: value.map(|v| v.to_string()),
        })
    }
}
