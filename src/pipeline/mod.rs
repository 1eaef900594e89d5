//! Skill transformation: prompt, model round trip, extraction, structural validation.

pub mod batch;
pub mod error;
pub mod extractor;
pub mod transformer;
pub mod validator;

pub use error::{TransformError, TransformFailure};
pub use transformer::Transformer;
