//! Postman collection (v2.0 / v2.1) import

pub mod parser;
pub mod types;

pub use parser::{extract_collection, load_collection, parse_collection, NAME_SEPARATOR};
pub use types::CollectionNode;
