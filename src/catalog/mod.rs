//! Node type catalog: the static registry of layer kinds.
//!
//! Everything here is compile-time data and pure functions over it, shared
//! read-only by every validation.

pub mod kind;
pub mod params;
pub mod schema;
pub mod transfer;
pub mod weights;

pub use kind::NodeKind;
pub use params::Params;
pub use schema::{all_schemas, schema_for, Arity, NodeSchema, ParamDefault};
pub use transfer::{shape_transfer, Shape, ShapeError};
pub use weights::param_count;
