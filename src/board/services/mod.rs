//! Application services for the board context.

mod error;
mod registry;
mod sync;

pub use error::{RegistryError, RegistryResult};
pub use registry::{BoardRegistry, RebuildSummary};
pub use sync::WriteThrough;
