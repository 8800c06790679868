//! Core data types

pub mod driver;
pub mod prediction;

pub use driver::{DriverRecord, FIELD_COUNT};
pub use prediction::{ChurnLabel, ChurnPrediction};
