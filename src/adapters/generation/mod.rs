//! Copy generation adapters.
//!
//! Implementations of the CopyGenerator port.
//!
//! ## Available Adapters
//!
//! - `HttpCopyGenerator` - The generation service over HTTP
//! - `MockCopyGenerator` - Configurable mock for testing

mod http_copy_generator;
mod mock_copy_generator;

pub use http_copy_generator::{HttpCopyGenerator, HttpCopyGeneratorConfig, DEFAULT_ENDPOINT};
pub use mock_copy_generator::{MockCopyGenerator, MockResponse};
