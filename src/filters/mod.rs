//! Conversation filter queries: `field:value` terms joined by AND/OR.

pub mod apply;
pub mod ast;
pub mod parser;

pub use apply::{apply_filters, matches_filter};
pub use ast::{FieldFilter, FilterExpr, FilterField, FilterOperator, FilterValue};
pub use parser::parse_filter;
