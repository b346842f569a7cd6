//! FMG Core
//!
//! Core library for managing FortiManager and FortiGate configuration as
//! declared resources: schemas, values, diffing and effect execution.

pub mod convert;
pub mod differ;
pub mod effect;
pub mod interpreter;
pub mod plan;
pub mod provider;
pub mod resource;
pub mod resource_data;
pub mod schema;
