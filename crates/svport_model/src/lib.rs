//! Interface model produced by the svport extractor.
//!
//! A [`Module`] owns its [`Parameter`]s and [`Port`]s. Every port and
//! parameter carries a [`DataType`]: a scalar [`BasicType`] or a struct/union
//! built from [`CompositeType`] and [`StructField`]s. All values are plain,
//! immutable-after-construction data with serde support, so consumers can
//! render or serialize them without knowing how they were extracted.

#![warn(missing_docs)]

pub mod module;
pub mod param;
pub mod port;
pub mod types;

pub use module::Module;
pub use param::Parameter;
pub use port::{Direction, Port};
pub use types::{BasicType, CompositeType, DataType, Fields, StructField, ARCH_DEFINED_TYPES};
