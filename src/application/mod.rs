//! Application layer: input loading and rendering use cases
//!
//! This layer feeds files and settings into the domain builders.

pub mod error;
pub mod error_ext;
pub mod loader;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use loader::{load_records, parse_records, InputFormat};
pub use services::{BuildOptions, RenderService};
