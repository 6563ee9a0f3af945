//! Maximum Entropy classifier trained with Improved Iterative Scaling (IIS)
//!
//! Feature functions are binary indicators over (dimension, value, label)
//! triples generated from the training data. Training fits one weight per
//! function; classification scores every label in the observed range.
//!
//! # Examples
//!
//! ## Training
//!
//! ```no_run
//! use maxent::train::Trainer;
//!
//! let mut trainer = Trainer::new();
//! trainer.append(1, &[0, 0])?;
//! trainer.append(0, &[1, 1])?;
//! trainer.set("max_iterations", "200")?;
//!
//! let model = trainer.train()?;
//! model.save("model.maxent")?;
//! # Ok::<(), maxent::Error>(())
//! ```
//!
//! ## Prediction
//!
//! ```no_run
//! use maxent::{Feature, Model};
//!
//! let model_data = std::fs::read("model.maxent")?;
//! let model = Model::new(&model_data)?;
//! let label = model.classifier().classify(&Feature::new(vec![0, 0]));
//! # Ok::<(), maxent::Error>(())
//! ```

mod classifier;
mod dataset;
mod error;
mod feature;
mod model;

/// Reader for the plain-text data format
pub mod reader;
/// Training module containing all components for training MaxEnt models
pub mod train;

// Re-export main types
pub use self::classifier::Classifier;
pub use self::dataset::{Feature, Instance};
pub use self::error::{Error, Result};
pub use self::feature::FeatureFunction;
pub use self::model::Model;

// Re-export training types for convenience
pub use self::train::{MaxEnt, Trainer};
