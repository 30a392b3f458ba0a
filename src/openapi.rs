use utoipa::OpenApi;

use crate::handlers;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::products::create_product,
        handlers::products::create_option_axis,
        handlers::products::list_option_axes,
        handlers::products::generate_variants,
        handlers::products::create_variants,
        handlers::products::list_variants,
        handlers::orders::create_order,
        handlers::orders::get_order,
        handlers::orders::list_orders,
        handlers::orders::cancel_order,
    ),
    components(schemas(
        handlers::DiscountDto,
        handlers::products::CreateProductRequest,
        handlers::products::CreateProductResponse,
        handlers::products::AxisValueRequest,
        handlers::products::CreateAxisRequest,
        handlers::products::AxisValueResponse,
        handlers::products::AxisResponse,
        handlers::products::SelectionResponse,
        handlers::products::CombinationResponse,
        handlers::products::CreateVariantRequest,
        handlers::products::CreateVariantsRequest,
        handlers::products::VariantResponse,
        handlers::orders::CreateOrderLineRequest,
        handlers::orders::CreateOrderRequest,
        handlers::orders::CreateOrderResponse,
        handlers::orders::OrderLineResponse,
        handlers::orders::OrderResponse,
        handlers::orders::ListOrdersParams,
        handlers::orders::ListOrdersResponse,
    )),
    tags(
        (name = "catalog", description = "Admin catalog authoring: products, option axes, variants"),
        (name = "orders", description = "Checkout, order lookup, cancellation"),
    )
)]
pub struct ApiDoc;
