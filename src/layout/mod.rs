//! Page layout for paged output.
//!
//! Pure and always compiled: turns an intermediate document into positioned
//! items on pages so that pagination rules can be checked without producing
//! any PDF bytes.

pub mod metrics;
mod paginate;
mod wrap;

pub use metrics::{measure, metrics, FontMetrics};
pub use paginate::{
    paginate, ItemKind, PageLayout, PlacedContent, PlacedItem, BULLET_INDENT_EM,
};
pub use wrap::{Line, Wrapper};
