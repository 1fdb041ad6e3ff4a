//! Route-to-OpenAPI transformation engine.
//!
//! Takes a documented route table ([`RouteDescriptor`]) plus a [`DocConfig`]
//! and produces a single OpenAPI 3.0.0 document. Nothing in this crate does
//! I/O; reading the route table and writing the document is left to the
//! caller.
#![allow(clippy::doc_markdown)]

pub mod config;
pub mod document;
pub mod error;
pub mod model;
pub mod openapi;
pub mod operation;
pub mod parameters;
pub mod render;
pub mod responses;
pub mod schema;

#[cfg(test)]
mod tests;

pub use config::DocConfig;
pub use document::{DocumentGenerator, GeneratedDocument, GenerationStats};
pub use error::{ConfigError, GenerationWarning, RenderError, RouteError, RouteLabel, SchemaInconsistency};
pub use model::{ParameterSchema, PropertyNode, PropertyShape, RawResponse, RouteDescriptor, StructuredResponse, ValueType};
pub use openapi::OpenApiDocument;
pub use operation::{OperationBuilder, PathOperation};
pub use parameters::{ClassifiedParameters, ParameterClassifier};
pub use render::{CodeSampleRenderer, CurlRenderer};
pub use responses::ResponseAssembler;
pub use schema::SchemaProjector;
