//! Output assembly and file writing for the generated script.
//!
//! This module handles the final phase of a run: combining derived and
//! auxiliary schemas, rendering the `swagger-autogen` config script, and
//! writing it to disk atomically.
//!
//! ## Output Structure
//!
//! ```text
//! // This file was automatically generated by prisma-swagger. Do not edit manually.
//!
//! const swaggerAutogen = require('swagger-autogen')({ openapi: '3.0.0' });
//!
//! const outputFile = "./src/web/api/openapi.json";
//! const endpointsFiles = [ ... ];
//! const doc = { info, servers, components, security };
//!
//! swaggerAutogen(outputFile, endpointsFiles, doc)   // + optional fixup step
//! ```
//!
//! ## Guarantees
//!
//! - **Deterministic**: schema sets serialize in key order and discovery is
//!   ordered, so unchanged inputs render byte-identical scripts
//! - **Atomic writes**: temp file + rename, so a failed run never leaves a
//!   partial script

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use prisma_swagger_define::{Datamodel, SchemaSet};
use tracing::{info, warn};

use crate::auxiliary::error_schemas;
use crate::config::Settings;
use crate::derive::derive_schemas;
use crate::discovery::discover_controllers;
use crate::document::SwaggerDoc;
use crate::errors::GeneratorError;
use crate::example::attach_examples;
use crate::introspect::load_datamodel;

/// First line of every generated script.
pub const GENERATED_NOTICE: &str =
    "// This file was automatically generated by prisma-swagger. Do not edit manually.";

/// Post-processing chained onto the generator call.
///
/// `swagger-autogen` sometimes renders literal schema members as nested
/// schema objects (`"type": { "type": "string", "example": "string" }`); this
/// rewrites them back to the literal.
const SCHEMA_FIXUP: &str = r#".then(() => {
  const fs = require('fs');
  const LITERAL_KEYS = ['type', 'format', 'required', 'enum'];
  const unwrap = (node) => {
    if (Array.isArray(node)) {
      node.forEach(unwrap);
      return;
    }
    if (!node || typeof node !== 'object') {
      return;
    }
    for (const key of LITERAL_KEYS) {
      const value = node[key];
      if (value && typeof value === 'object' && !Array.isArray(value) && 'example' in value) {
        node[key] = value.example;
      }
    }
    Object.values(node).forEach(unwrap);
  };
  const spec = JSON.parse(fs.readFileSync(outputFile, 'utf8'));
  unwrap(spec.components && spec.components.schemas);
  fs.writeFileSync(outputFile, JSON.stringify(spec, null, 2));
})"#;

/// Builds the complete schema set for a data model.
///
/// Derived model and enum schemas are combined with the error schemas, then
/// the write/update request schemas receive synthesized examples.
pub fn build_schema_set(datamodel: &Datamodel, settings: &Settings) -> SchemaSet {
    let (derived, request_names) = derive_schemas(datamodel, &settings.omit_fields);

    let mut schemas = error_schemas();
    for (name, schema) in derived {
        if schemas.insert(name.clone(), schema).is_some() {
            warn!(name = %name, "Derived schema replaces a built-in schema of the same name");
        }
    }

    attach_examples(&mut schemas, &request_names, settings.example_depth);
    schemas
}

/// Renders the config script.
///
/// ## Errors
///
/// Returns `GeneratorError::RenderError` if the metadata cannot be serialized.
pub fn render_script(
    doc: &SwaggerDoc,
    endpoints: &[String],
    settings: &Settings,
) -> Result<String, GeneratorError> {
    let output_file = serde_json::to_string(&settings.openapi_out)?;
    let endpoints = serde_json::to_string_pretty(endpoints)?;
    let doc = serde_json::to_string_pretty(doc)?;
    let fixup = if settings.fixup_schemas { SCHEMA_FIXUP } else { "" };

    Ok(format!(
        "{GENERATED_NOTICE}\n\
         \n\
         const swaggerAutogen = require('swagger-autogen')({{ openapi: '3.0.0' }});\n\
         \n\
         const outputFile = {output_file};\n\
         \n\
         const endpointsFiles = {endpoints};\n\
         \n\
         const doc = {doc};\n\
         \n\
         swaggerAutogen(outputFile, endpointsFiles, doc){fixup};\n"
    ))
}

/// Runs the whole pipeline and returns the script text without writing it.
///
/// ## Errors
///
/// Returns any introspection, discovery or rendering error.
pub fn generate(settings: &Settings) -> Result<String, GeneratorError> {
    let datamodel = load_datamodel(settings)?;

    let schemas = build_schema_set(&datamodel, settings);
    info!(schemas = schemas.len(), "Derived schemas");

    let endpoints = discover_controllers(settings)?;
    info!(controllers = endpoints.len(), "Discovered controllers");

    let doc = SwaggerDoc::new(settings, schemas);
    render_script(&doc, &endpoints, settings)
}

/// Writes `content` next to `path` under a `.tmp` suffix, then renames it
/// over `path`.
///
/// ## Errors
///
/// Returns `GeneratorError::WriteError` naming the directory, temp file or
/// target that could not be created, written or renamed.
pub fn write_atomic(path: &Path, content: &str) -> Result<(), GeneratorError> {
    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
    {
        fs::create_dir_all(dir).map_err(|e| GeneratorError::WriteError {
            path: dir.display().to_string(),
            source: e,
        })?;
    }

    let temp_path = temp_sibling(path);
    fs::write(&temp_path, content).map_err(|e| GeneratorError::WriteError {
        path: temp_path.display().to_string(),
        source: e,
    })?;

    fs::rename(&temp_path, path).map_err(|e| GeneratorError::WriteError {
        path: path.display().to_string(),
        source: e,
    })
}

/// `swagger.config.js` -> `swagger.config.js.tmp`
fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Generates the script and writes it to the configured out file.
///
/// With `dry_run` the script is printed to stdout instead.
///
/// ## Returns
///
/// The generated script text.
///
/// ## Errors
///
/// Returns any pipeline error, or `GeneratorError::WriteError` when the
/// script cannot be written. Nothing is written when an error occurs.
pub fn generate_and_write(settings: &Settings, dry_run: bool) -> Result<String, GeneratorError> {
    let script = generate(settings)?;

    if dry_run {
        print!("{script}");
    } else {
        let path = settings.out_path();
        write_atomic(&path, &script)?;
        info!(path = %path.display(), "Wrote generated script");
    }

    Ok(script)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::introspect::dmmf::parse_dmmf;
    use crate::test_utils::make_datamodel;
    use prisma_swagger_define::Schema;
    use serde_json::json;
    use tempfile::TempDir;

    fn render(settings: &Settings) -> String {
        let schemas = build_schema_set(&make_datamodel(), settings);
        let doc = SwaggerDoc::new(settings, schemas);
        render_script(&doc, &["./src/a.ts".to_string()], settings).unwrap()
    }

    /// Extracts the JSON literal assigned to `const <name> = ...;`.
    fn constant(script: &str, name: &str) -> serde_json::Value {
        let start = script.find(&format!("const {name} = ")).unwrap() + name.len() + 9;
        let end = start + script[start..].find(";\n").unwrap();
        serde_json::from_str(&script[start..end]).unwrap()
    }

    // === build_schema_set ===

    #[test]
    fn schema_set_includes_error_schemas() {
        let schemas = build_schema_set(&make_datamodel(), &Settings::default());

        for name in [
            "HttpException",
            "BadRequestException",
            "NotFoundException",
            "InternalServerErrorException",
            "GetPostResponse",
            "Status",
        ] {
            assert!(schemas.contains_key(name), "missing {name}");
        }
    }

    #[test]
    fn request_schemas_get_examples() {
        let schemas = build_schema_set(&make_datamodel(), &Settings::default());

        assert_eq!(schemas["PostPostRequest"].example, Some(json!({ "tag": "DRAFT" })));
        assert_eq!(
            schemas["PostUserRequest"].example,
            Some(json!({ "email": "string", "age": 0 }))
        );
        assert_eq!(schemas["PutUserRequest"].example, schemas["PostUserRequest"].example);
        assert!(schemas["GetUserResponse"].example.is_none());
    }

    #[test]
    fn undeclared_dmmf_enum_does_not_dangle() {
        let datamodel = parse_dmmf(
            r#"{"datamodel": {"models": [{"name": "A", "fields": [
                {"name": "s", "kind": "enum", "type": "Missing", "isList": false, "isRequired": true}
            ]}], "enums": []}}"#,
        )
        .unwrap();

        let schemas = build_schema_set(&datamodel, &Settings::default());

        assert!(!schemas.contains_key("Missing"));
        let read = &schemas["GetAResponse"];
        assert_eq!(read.properties.as_ref().unwrap()["s"], Schema::object());
        assert_eq!(schemas["PostARequest"].example, Some(json!({ "s": {} })));
    }

    // === render_script ===

    #[test]
    fn script_embeds_literal_constants() {
        let settings = Settings::default();
        let script = render(&settings);

        assert!(script.starts_with(GENERATED_NOTICE));
        assert!(script.contains("require('swagger-autogen')({ openapi: '3.0.0' })"));
        assert_eq!(constant(&script, "outputFile"), json!("./src/web/api/openapi.json"));
        assert_eq!(constant(&script, "endpointsFiles"), json!(["./src/a.ts"]));

        let doc = constant(&script, "doc");
        assert_eq!(doc["info"]["title"], "API");
        assert!(doc["components"]["schemas"]["ListPostsResponse"].is_object());
    }

    #[test]
    fn script_invokes_generator_with_fixup_by_default() {
        let script = render(&Settings::default());

        assert!(script.contains("swaggerAutogen(outputFile, endpointsFiles, doc).then(() => {"));
        assert!(script.contains("const LITERAL_KEYS = ['type', 'format', 'required', 'enum'];"));
        assert!(script.ends_with("});\n"));
    }

    #[test]
    fn script_without_fixup_is_a_plain_call() {
        let settings = Settings {
            fixup_schemas: false,
            ..Default::default()
        };
        let script = render(&settings);

        assert!(script.ends_with("swaggerAutogen(outputFile, endpointsFiles, doc);\n"));
        assert!(!script.contains(".then("));
    }

    #[test]
    fn rendering_is_deterministic() {
        let settings = Settings::default();
        assert_eq!(render(&settings), render(&settings));
    }

    // === write_atomic ===

    #[test]
    fn write_atomic_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/dir/swagger.config.js");

        write_atomic(&path, "content").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "content");
        assert!(!dir.path().join("nested/dir/swagger.config.js.tmp").exists());
    }

    #[test]
    fn write_atomic_replaces_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("swagger.config.js");
        fs::write(&path, "old").unwrap();

        write_atomic(&path, "new").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn write_atomic_handles_tmp_targets() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("swagger.tmp");

        write_atomic(&path, "content").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "content");
        assert!(!dir.path().join("swagger.tmp.tmp").exists());
    }

    #[test]
    fn temp_sibling_appends_suffix() {
        assert_eq!(
            temp_sibling(Path::new("out/swagger.config.js")),
            PathBuf::from("out/swagger.config.js.tmp")
        );
        assert_eq!(temp_sibling(Path::new("script")), PathBuf::from("script.tmp"));
    }

    // === generate_and_write ===

    #[test]
    fn missing_schema_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let settings = Settings {
            project_root: dir.path().to_path_buf(),
            ..Default::default()
        };

        let err = generate_and_write(&settings, false).unwrap_err();

        assert!(matches!(err, GeneratorError::SchemaNotFound { .. }));
        assert!(!settings.out_path().exists());
    }
}
