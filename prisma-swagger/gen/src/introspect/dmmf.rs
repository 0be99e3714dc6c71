//! DMMF JSON introspection.
//!
//! Reads the document Prisma's `getDMMF()` produces (for example dumped with
//! `prisma generate` tooling). Only `datamodel.models` and `datamodel.enums`
//! are consumed; other members are ignored.

use prisma_swagger_define::{Datamodel, Dmmf};
use serde_json::Value;

use super::Introspector;
use crate::errors::GeneratorError;

/// Reads a DMMF JSON document.
#[derive(Debug, Clone, Copy, Default)]
pub struct DmmfIntrospector;

impl Introspector for DmmfIntrospector {
    fn name(&self) -> &'static str {
        "dmmf"
    }

    fn introspect(&self, source: &str) -> Result<Datamodel, GeneratorError> {
        parse_dmmf(source)
    }
}

/// Parses a DMMF JSON document into a data model.
///
/// ## Errors
///
/// Returns `GeneratorError::IntrospectionShape` naming the first missing or
/// malformed member.
pub fn parse_dmmf(source: &str) -> Result<Datamodel, GeneratorError> {
    let document: Value = serde_json::from_str(source).map_err(|e| {
        GeneratorError::IntrospectionShape(format!("DMMF document is not valid JSON: {e}"))
    })?;

    let datamodel = document
        .get("datamodel")
        .ok_or_else(|| GeneratorError::IntrospectionShape("missing 'datamodel'".to_string()))?;

    if !datamodel.get("models").is_some_and(Value::is_array) {
        return Err(GeneratorError::IntrospectionShape(
            "missing 'datamodel.models' array".to_string(),
        ));
    }

    if datamodel.get("enums").is_some_and(|e| !e.is_array()) {
        return Err(GeneratorError::IntrospectionShape(
            "'datamodel.enums' is not an array".to_string(),
        ));
    }

    let dmmf: Dmmf = serde_json::from_value(document).map_err(|e| {
        GeneratorError::IntrospectionShape(format!("'datamodel' has an unexpected shape: {e}"))
    })?;

    Ok(dmmf.datamodel)
}
