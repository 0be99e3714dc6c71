//! prisma-swagger generator library.
//!
//! This crate derives OpenAPI schemas from a Prisma data model and renders a
//! `swagger-autogen` config script that embeds them. For every model it
//! produces:
//!
//! - `Get<Model>Response` - the read shape
//! - `Post<Model>Request` - the create body (no omitted or relation fields)
//! - `Put<Model>Request` - the update body (nothing required)
//! - `List<Models>Response` - the paginated envelope
//!
//! and one string-enum schema per enum, plus fixed error-response schemas.
//!
//! ## Modules
//!
//! - [`introspect`] - Reading `.prisma` sources and DMMF JSON
//! - [`scalar`] / [`derive`] / [`naming`] - Schema derivation rules
//! - [`example`] - Example synthesis for request bodies
//! - [`auxiliary`] - Error-response schemas
//! - [`discovery`] - Controller file discovery
//! - [`document`] / [`output`] - Script assembly and atomic writing
//! - [`config`] - Run settings
//! - [`errors`] - Error types for the generator
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::path::PathBuf;
//! use prisma_swagger_gen::config::Settings;
//! use prisma_swagger_gen::output::generate_and_write;
//!
//! let settings = Settings {
//!     project_root: PathBuf::from("my-service"),
//!     service_title: "My Service".to_string(),
//!     ..Default::default()
//! };
//!
//! // Writes my-service/swagger.config.js
//! generate_and_write(&settings, false).unwrap();
//! ```

pub mod auxiliary;
pub mod config;
pub mod derive;
pub mod discovery;
pub mod document;
pub mod errors;
pub mod example;
pub mod introspect;
pub mod naming;
pub mod output;
pub mod scalar;

#[cfg(test)]
pub(crate) mod test_utils;
