//! Order translation, submission, and stock reconciliation.
//!
//! The two workflows of the bridge live here: turning an inbound storefront
//! order into a supplier submission (all-or-nothing per order), and the
//! periodic pass that pushes supplier stock levels back onto storefront
//! variants.

pub mod error;
pub mod reconcile;
pub mod submit;
pub mod translate;

pub use error::SyncError;
pub use reconcile::reconcile;
pub use submit::submit_order;
pub use translate::translate_order;
