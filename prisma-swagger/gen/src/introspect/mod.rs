//! Data model introspection.
//!
//! An [`Introspector`] turns the raw text of a model description source into
//! a [`Datamodel`]. Two are built in:
//!
//! - [`PrismaIntrospector`] - parses `.prisma` source directly
//! - [`DmmfIntrospector`] - reads a DMMF JSON document (`{ "datamodel": ... }`)
//!
//! [`load_datamodel`] resolves the configured source path, picks the
//! introspector and returns the data model.

pub mod dmmf;
pub mod prisma;

use std::fs;
use std::path::Path;

use clap::ValueEnum;
use prisma_swagger_define::Datamodel;
use tracing::{debug, info};

use crate::config::Settings;
use crate::errors::GeneratorError;

pub use dmmf::DmmfIntrospector;
pub use prisma::PrismaIntrospector;

/// Turns model description source text into a data model.
pub trait Introspector {
    /// Short name used in logs and error messages.
    fn name(&self) -> &'static str;

    /// Introspects the given source text.
    ///
    /// ## Errors
    ///
    /// Returns `GeneratorError::ParseError` or
    /// `GeneratorError::IntrospectionShape` when the source does not describe
    /// a data model.
    fn introspect(&self, source: &str) -> Result<Datamodel, GeneratorError>;
}

/// Which introspector reads the source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum IntrospectorKind {
    /// Choose by file extension (`.prisma` or `.json`).
    #[default]
    Auto,
    /// Parse Prisma schema language.
    Prisma,
    /// Read a DMMF JSON document.
    Dmmf,
}

/// Returns the introspector for a source path.
///
/// ## Errors
///
/// Returns `GeneratorError::IntrospectionUnavailable` when `kind` is
/// [`IntrospectorKind::Auto`] and the extension is not recognized.
pub fn introspector_for(
    kind: IntrospectorKind,
    path: &Path,
) -> Result<Box<dyn Introspector>, GeneratorError> {
    let kind = match kind {
        IntrospectorKind::Auto => match path.extension().and_then(|e| e.to_str()) {
            Some("prisma") => IntrospectorKind::Prisma,
            Some("json") => IntrospectorKind::Dmmf,
            other => {
                return Err(GeneratorError::IntrospectionUnavailable(format!(
                    "no introspector for '{}' sources (expected .prisma or .json, or pass --introspector)",
                    other.unwrap_or("")
                )));
            }
        },
        explicit => explicit,
    };

    Ok(match kind {
        IntrospectorKind::Dmmf => Box::new(DmmfIntrospector),
        _ => Box::new(PrismaIntrospector),
    })
}

/// Loads the data model described by the configured source.
///
/// ## Errors
///
/// - `GeneratorError::SchemaNotFound` with the resolved absolute path when the
///   source does not exist
/// - `GeneratorError::ReadError` when it cannot be read
/// - any introspection error
pub fn load_datamodel(settings: &Settings) -> Result<Datamodel, GeneratorError> {
    let path = settings.schema_source();
    debug!(path = %path.display(), "Resolving model description source");

    if !path.is_file() {
        return Err(GeneratorError::SchemaNotFound {
            path: path.display().to_string(),
        });
    }

    let introspector = introspector_for(settings.introspector, &path)?;
    let source = fs::read_to_string(&path).map_err(|e| GeneratorError::ReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    let datamodel = introspector.introspect(&source)?;
    info!(
        introspector = introspector.name(),
        models = datamodel.models.len(),
        enums = datamodel.enums.len(),
        "Loaded data model"
    );

    Ok(datamodel)
}
