use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::pricing::DiscountRule;

#[derive(Debug, Clone)]
pub struct ProductView {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Input for creating an option axis together with its ordered values.
#[derive(Debug, Clone)]
pub struct AxisInput {
    pub name: String,
    pub values: Vec<AxisValueInput>,
}

#[derive(Debug, Clone)]
pub struct AxisValueInput {
    pub label: String,
    pub swatch: Option<String>,
    pub discount: DiscountRule,
}

/// A variant row to persist, typically derived from a generated combination
/// the admin reviewed and priced.
#[derive(Debug, Clone)]
pub struct NewVariantInput {
    pub title: String,
    pub sku: Option<String>,
    pub price: BigDecimal,
    pub discount: DiscountRule,
    pub stock: i32,
}

#[derive(Debug, Clone)]
pub struct VariantView {
    pub id: Uuid,
    pub product_id: Uuid,
    pub title: String,
    pub sku: Option<String>,
    pub price: BigDecimal,
    pub discount: DiscountRule,
    pub stock: i32,
}
