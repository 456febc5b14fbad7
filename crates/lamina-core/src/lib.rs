#![deny(missing_docs)]
#![doc = "Core types for the Lamina collection generator: the deterministic sequencer, the drawable-surface seam, and the shared error taxonomy."]

pub mod errors;
pub mod rng;
pub mod schema;
pub mod surface;

pub use errors::{ErrorInfo, LaminaError};
pub use rng::{derive_text_seed, Seed, Sequencer};
pub use schema::SchemaVersion;
pub use surface::{ImageFormat, NullSurface, Surface};
