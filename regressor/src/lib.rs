//! Core of the matrix–filler ratio predictor.
//!
//! This crate owns everything that is not the terminal UI:
//! - the fixed feature schema of the material properties form,
//! - the standard scaler applied to each submitted sample,
//! - the forward-only regression network,
//! - loading of the serialized model artifact.

mod artifact;
mod error;
mod network;
mod scaler;
pub mod schema;

pub use artifact::load;
pub use error::RegressorError;
pub use network::{Activation, DenseLayer, Network};
pub use scaler::StandardScaler;
