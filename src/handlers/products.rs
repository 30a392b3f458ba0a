use actix_web::{web, HttpResponse};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::catalog_service::CatalogService;
use crate::domain::catalog::{AxisInput, AxisValueInput, NewVariantInput};
use crate::domain::pricing::effective_price;
use crate::errors::AppError;
use crate::infrastructure::catalog_repo::DieselCatalogRepository;

use super::DiscountDto;

type Catalog = web::Data<CatalogService<DieselCatalogRepository>>;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    pub name: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateProductResponse {
    pub id: Uuid,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AxisValueRequest {
    pub label: String,
    /// Optional color-swatch code, e.g. "#ff0000"
    pub swatch: Option<String>,
    pub discount: Option<DiscountDto>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateAxisRequest {
    pub name: String,
    /// Values in display order; the order is preserved and drives the order
    /// of generated combinations.
    pub values: Vec<AxisValueRequest>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AxisValueResponse {
    pub id: Uuid,
    pub label: String,
    pub swatch: Option<String>,
    pub discount: Option<DiscountDto>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AxisResponse {
    pub id: Uuid,
    pub name: String,
    pub values: Vec<AxisValueResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SelectionResponse {
    pub axis_id: Uuid,
    pub value_id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CombinationResponse {
    pub title: String,
    pub selections: Vec<SelectionResponse>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateVariantRequest {
    pub title: String,
    pub sku: Option<String>,
    /// Decimal price as a string to avoid floating-point issues, e.g. "9.99"
    pub price: String,
    pub discount: Option<DiscountDto>,
    #[serde(default)]
    pub stock: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateVariantsRequest {
    pub variants: Vec<CreateVariantRequest>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VariantResponse {
    pub id: Uuid,
    pub title: String,
    pub sku: Option<String>,
    pub price: String,
    /// Price after applying the variant's discount; what the storefront shows
    /// and checkout charges.
    pub effective_price: String,
    pub discount: Option<DiscountDto>,
    pub stock: i32,
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /products
#[utoipa::path(
    post,
    path = "/products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = CreateProductResponse),
        (status = 400, description = "Invalid input"),
    ),
    tag = "catalog"
)]
pub async fn create_product(
    catalog: Catalog,
    body: web::Json<CreateProductRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let id = web::block(move || catalog.create_product(&body.name))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;
    Ok(HttpResponse::Created().json(json!({ "id": id })))
}

/// POST /products/{id}/options
///
/// Adds an option axis (e.g. "Color") with its ordered values after the
/// product's existing axes.
#[utoipa::path(
    post,
    path = "/products/{id}/options",
    params(("id" = Uuid, Path, description = "Product UUID")),
    request_body = CreateAxisRequest,
    responses(
        (status = 201, description = "Axis created"),
        (status = 404, description = "Product not found"),
    ),
    tag = "catalog"
)]
pub async fn create_option_axis(
    catalog: Catalog,
    path: web::Path<Uuid>,
    body: web::Json<CreateAxisRequest>,
) -> Result<HttpResponse, AppError> {
    let product_id = path.into_inner();
    let body = body.into_inner();
    let axis = AxisInput {
        name: body.name,
        values: body
            .values
            .into_iter()
            .map(|v| AxisValueInput {
                label: v.label,
                swatch: v.swatch,
                discount: v.discount.map(DiscountDto::into_rule).unwrap_or_default(),
            })
            .collect(),
    };
    let id = web::block(move || catalog.add_option_axis(product_id, axis))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;
    Ok(HttpResponse::Created().json(json!({ "id": id })))
}

/// GET /products/{id}/options
#[utoipa::path(
    get,
    path = "/products/{id}/options",
    params(("id" = Uuid, Path, description = "Product UUID")),
    responses(
        (status = 200, description = "Axes in position order", body = [AxisResponse]),
        (status = 404, description = "Product not found"),
    ),
    tag = "catalog"
)]
pub async fn list_option_axes(
    catalog: Catalog,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let product_id = path.into_inner();
    let axes = web::block(move || catalog.list_option_axes(product_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    let response: Vec<AxisResponse> = axes
        .into_iter()
        .map(|axis| AxisResponse {
            id: axis.id,
            name: axis.name,
            values: axis
                .values
                .into_iter()
                .map(|v| AxisValueResponse {
                    id: v.id,
                    label: v.label,
                    swatch: v.swatch,
                    discount: DiscountDto::from_rule(&v.discount),
                })
                .collect(),
        })
        .collect();
    Ok(HttpResponse::Ok().json(response))
}

/// POST /products/{id}/variants/generate
///
/// Expands the product's persisted axes into the full set of variant
/// combinations, in stored axis and value order. Nothing is written; the
/// admin reviews the staging rows and persists the ones they want via
/// POST /products/{id}/variants.
#[utoipa::path(
    post,
    path = "/products/{id}/variants/generate",
    params(("id" = Uuid, Path, description = "Product UUID")),
    responses(
        (status = 200, description = "Proposed combinations", body = [CombinationResponse]),
        (status = 404, description = "Product not found"),
    ),
    tag = "catalog"
)]
pub async fn generate_variants(
    catalog: Catalog,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let product_id = path.into_inner();
    let combinations = web::block(move || catalog.generate_variants(product_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    let response: Vec<CombinationResponse> = combinations
        .into_iter()
        .map(|c| CombinationResponse {
            title: c.title,
            selections: c
                .selections
                .into_iter()
                .map(|(axis_id, value_id)| SelectionResponse { axis_id, value_id })
                .collect(),
        })
        .collect();
    Ok(HttpResponse::Ok().json(response))
}

/// POST /products/{id}/variants
#[utoipa::path(
    post,
    path = "/products/{id}/variants",
    params(("id" = Uuid, Path, description = "Product UUID")),
    request_body = CreateVariantsRequest,
    responses(
        (status = 201, description = "Variants created"),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Product not found"),
    ),
    tag = "catalog"
)]
pub async fn create_variants(
    catalog: Catalog,
    path: web::Path<Uuid>,
    body: web::Json<CreateVariantsRequest>,
) -> Result<HttpResponse, AppError> {
    let product_id = path.into_inner();
    let body = body.into_inner();

    let variants: Result<Vec<NewVariantInput>, AppError> = body
        .variants
        .into_iter()
        .map(|v| {
            let price = BigDecimal::from_str(&v.price)
                .map_err(|e| AppError::BadRequest(format!("Invalid price '{}': {}", v.price, e)))?;
            Ok(NewVariantInput {
                title: v.title,
                sku: v.sku,
                price,
                discount: v.discount.map(DiscountDto::into_rule).unwrap_or_default(),
                stock: v.stock,
            })
        })
        .collect();
    let variants = variants?;

    let ids = web::block(move || catalog.add_variants(product_id, variants))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;
    Ok(HttpResponse::Created().json(json!({ "ids": ids })))
}

/// GET /products/{id}/variants
#[utoipa::path(
    get,
    path = "/products/{id}/variants",
    params(("id" = Uuid, Path, description = "Product UUID")),
    responses(
        (status = 200, description = "Variants with effective prices", body = [VariantResponse]),
        (status = 404, description = "Product not found"),
    ),
    tag = "catalog"
)]
pub async fn list_variants(
    catalog: Catalog,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let product_id = path.into_inner();
    let variants = web::block(move || catalog.list_variants(product_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    let response: Vec<VariantResponse> = variants
        .into_iter()
        .map(|v| VariantResponse {
            id: v.id,
            title: v.title,
            sku: v.sku,
            effective_price: effective_price(&v.price, &v.discount).to_string(),
            price: v.price.to_string(),
            discount: DiscountDto::from_rule(&v.discount),
            stock: v.stock,
        })
        .collect();
    Ok(HttpResponse::Ok().json(response))
}
