use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Supplier(#[from] dropbridge_supplier::SupplierError),

    #[error(transparent)]
    Storefront(#[from] dropbridge_storefront::StorefrontError),

    /// One or more line items exhausted every resolution step. The order is
    /// never partially submitted; every failing identifier is reported so an
    /// operator can fix them all in one pass.
    #[error("order {order_number}: unresolvable line item identifiers {identifiers:?}")]
    Unresolvable {
        order_number: String,
        identifiers: Vec<String>,
    },

    /// Every line item was dropped (zero or negative quantities), leaving
    /// nothing to submit.
    #[error("order {order_number} has no submittable line items")]
    EmptyOrder { order_number: String },
}
