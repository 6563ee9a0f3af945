//! Training module for MaxEnt models
//!
//! This module contains the components needed to train a model with Improved
//! Iterative Scaling: feature function generation, the p(y|x) context, the
//! Newton-Raphson solver and model serialization.

mod feature_gen;
mod feature_set;
mod iis_context;
mod maxent;
mod model_writer;
mod params;
mod trainer;

// Re-export public types
pub use self::maxent::MaxEnt;
pub use self::model_writer::ModelWriter;
pub use self::params::IisParams;
pub use self::trainer::Trainer;
