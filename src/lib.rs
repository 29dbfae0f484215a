/// Policy evaluation
pub mod algo;

/// Data structures
pub mod ds;

/// Environment traits
pub mod env;

/// Error types
pub mod error;

/// Grid world environment
pub mod gym;

/// Policy construction
pub mod policy;

/// Plain-text rendering of value and policy matrices
pub mod render;

/// JSON request and response shapes
pub mod request;

/// Terminal UI
#[cfg(feature = "viz")]
pub mod viz;

mod util;

pub use error::{GridError, Result};
