//! # API Model
//!
//! The typed object graph handed to the code generator:
//! groups → versions → resources → subresources, plus the flattened
//! [`Struct`]s of every group and the controller bindings.
//!
//! All maps are ordered so that serialized output is stable between runs.

mod types;

pub use types::*;
