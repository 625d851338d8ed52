//! Import/export module
//!
//! Reading labeled training files and saving or restoring trained models.

pub mod model;
pub mod training;

pub use model::{load_from_disk, save_to_disk, ModelHeader, ModelReader, ModelWriter};
pub use training::{LoadReport, TrainingExample, TrainingSet};
