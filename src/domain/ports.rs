use uuid::Uuid;

use super::catalog::{AxisInput, NewVariantInput, ProductView, VariantView};
use super::errors::DomainError;
use super::order::{ListResult, OrderLineInput, OrderView};
use super::variants::OptionAxis;

/// Admin-side catalog persistence: products, option axes/values, variant rows.
pub trait CatalogRepository: Send + Sync + 'static {
    fn create_product(&self, name: &str) -> Result<Uuid, DomainError>;
    fn find_product(&self, id: Uuid) -> Result<Option<ProductView>, DomainError>;
    /// Appends the axis after the product's existing axes; values keep the
    /// order they were supplied in.
    fn add_option_axis(&self, product_id: Uuid, axis: AxisInput) -> Result<Uuid, DomainError>;
    /// Axes ordered by position, each with its values ordered by position.
    fn list_option_axes(&self, product_id: Uuid) -> Result<Vec<OptionAxis>, DomainError>;
    /// Inserts all rows in one transaction; returns their ids in input order.
    fn insert_variants(
        &self,
        product_id: Uuid,
        variants: Vec<NewVariantInput>,
    ) -> Result<Vec<Uuid>, DomainError>;
    fn list_variants(&self, product_id: Uuid) -> Result<Vec<VariantView>, DomainError>;
}

/// Order persistence. Implementations own atomicity: `create` and `cancel`
/// must commit all their row effects together or not at all.
pub trait OrderRepository: Send + Sync + 'static {
    /// Creates the order with its lines, charging each line the variant's
    /// current effective price and decrementing variant stock by a guarded
    /// relative delta. Insufficient stock on any line aborts the whole order.
    fn create(&self, customer_id: Uuid, lines: Vec<OrderLineInput>) -> Result<Uuid, DomainError>;
    fn find_by_id(&self, id: Uuid) -> Result<Option<OrderView>, DomainError>;
    fn list(&self, page: i64, limit: i64) -> Result<ListResult, DomainError>;
    /// Cancels the order and restores every line's stock (`stock = stock +
    /// quantity`, a relative delta so it stays correct under concurrent
    /// checkouts) as one unit. Rejects with `NotCancellable` unless the order
    /// is pending or processing; re-cancelling never double-credits stock.
    fn cancel(&self, id: Uuid) -> Result<(), DomainError>;
}
