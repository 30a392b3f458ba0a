use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::schema::{option_axes, option_values, order_lines, orders, product_variants, products};

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProductRow {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = products)]
pub struct NewProductRow {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = option_axes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OptionAxisRow {
    pub id: Uuid,
    pub product_id: Uuid,
    pub name: String,
    pub position: i32,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = option_axes)]
pub struct NewOptionAxisRow {
    pub id: Uuid,
    pub product_id: Uuid,
    pub name: String,
    pub position: i32,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name = option_values)]
#[diesel(belongs_to(OptionAxisRow, foreign_key = axis_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OptionValueRow {
    pub id: Uuid,
    pub axis_id: Uuid,
    pub label: String,
    pub swatch: Option<String>,
    pub discount_kind: Option<String>,
    pub discount_value: Option<BigDecimal>,
    pub position: i32,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = option_values)]
pub struct NewOptionValueRow {
    pub id: Uuid,
    pub axis_id: Uuid,
    pub label: String,
    pub swatch: Option<String>,
    pub discount_kind: Option<String>,
    pub discount_value: Option<BigDecimal>,
    pub position: i32,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = product_variants)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct VariantRow {
    pub id: Uuid,
    pub product_id: Uuid,
    pub title: String,
    pub sku: Option<String>,
    pub price: BigDecimal,
    pub discount_kind: Option<String>,
    pub discount_value: Option<BigDecimal>,
    pub stock: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = product_variants)]
pub struct NewVariantRow {
    pub id: Uuid,
    pub product_id: Uuid,
    pub title: String,
    pub sku: Option<String>,
    pub price: BigDecimal,
    pub discount_kind: Option<String>,
    pub discount_value: Option<BigDecimal>,
    pub stock: i32,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderRow {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = orders)]
pub struct NewOrderRow {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub status: String,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name = order_lines)]
#[diesel(belongs_to(OrderRow, foreign_key = order_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderLineRow {
    pub id: Uuid,
    pub order_id: Uuid,
    pub variant_id: Uuid,
    pub quantity: i32,
    pub unit_price: BigDecimal,
    pub position: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = order_lines)]
pub struct NewOrderLineRow {
    pub id: Uuid,
    pub order_id: Uuid,
    pub variant_id: Uuid,
    pub quantity: i32,
    pub unit_price: BigDecimal,
    pub position: i32,
}
