pub mod analyze;
pub mod catalog;
pub mod check;
pub mod error;
pub mod parse;
pub mod protocol;
pub mod validate;
pub mod wasm;

pub use check::{analyze, execution_order, validate, validate_json, Analysis, ValidationResult};
pub use error::GraphError;
pub use parse::GraphDocument;
