//! Run settings.
//!
//! [`Settings`] is built once at start-up from [`Settings::default`] with the
//! command-line overrides applied, then passed by reference through the
//! pipeline. Nothing reads configuration from anywhere else.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::errors::GeneratorError;
use crate::introspect::IntrospectorKind;

/// Default model description source, relative to the project root.
pub const DEFAULT_SCHEMA_PATH: &str = "prisma/schema.prisma";

/// Default controller discovery pattern, relative to the project root.
pub const DEFAULT_CONTROLLERS_GLOB: &str = "src/web/api/controllers/**/*.ts";

/// Default generated script path.
pub const DEFAULT_OUT_FILE: &str = "./swagger.config.js";

/// Default path the documentation generator writes its OpenAPI document to.
pub const DEFAULT_OPENAPI_OUT: &str = "./src/web/api/openapi.json";

/// Fields stripped from create/update request bodies unless overridden.
pub const DEFAULT_OMIT_FIELDS: &[&str] = &["id", "createdAt", "updatedAt"];

/// Maximum number of `$ref` hops followed while synthesizing an example.
pub const DEFAULT_EXAMPLE_DEPTH: usize = 3;

/// Immutable settings for one generator run.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Directory every relative path below is resolved against.
    pub project_root: PathBuf,
    /// Model description source (`.prisma` or DMMF `.json`).
    pub schema_path: PathBuf,
    /// Which introspector reads `schema_path`.
    pub introspector: IntrospectorKind,
    /// Glob pattern for controller files, relative to `project_root`.
    pub controllers_glob: String,
    /// Where the generated script is written.
    pub out_file: PathBuf,
    /// Where the generated script tells the documentation generator to write.
    pub openapi_out: String,
    pub service_title: String,
    pub service_version: String,
    pub server_url: String,
    pub security_scheme_name: String,
    pub oauth_token_url: String,
    pub oauth_refresh_url: String,
    /// OAuth2 scopes, name to description.
    pub oauth_scopes: Map<String, Value>,
    /// Property names stripped from write/update schemas.
    pub omit_fields: BTreeSet<String>,
    pub example_depth: usize,
    /// Append the post-processing step that unwraps nested schema members.
    pub fixup_schemas: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            project_root: PathBuf::from("."),
            schema_path: PathBuf::from(DEFAULT_SCHEMA_PATH),
            introspector: IntrospectorKind::Auto,
            controllers_glob: DEFAULT_CONTROLLERS_GLOB.to_string(),
            out_file: PathBuf::from(DEFAULT_OUT_FILE),
            openapi_out: DEFAULT_OPENAPI_OUT.to_string(),
            service_title: "API".to_string(),
            service_version: "1.0.0".to_string(),
            server_url: "http://localhost:3000".to_string(),
            security_scheme_name: "oauth2".to_string(),
            oauth_token_url: "/api/auth/token".to_string(),
            oauth_refresh_url: "/api/auth/refresh".to_string(),
            oauth_scopes: Map::new(),
            omit_fields: DEFAULT_OMIT_FIELDS.iter().map(|s| s.to_string()).collect(),
            example_depth: DEFAULT_EXAMPLE_DEPTH,
            fixup_schemas: true,
        }
    }
}

impl Settings {
    /// Resolves a path against the project root.
    ///
    /// Absolute paths are returned unchanged.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.project_root.join(path)
    }

    /// The model description source as an absolute path.
    ///
    /// Falls back to the joined (possibly relative) path when the current
    /// directory cannot be determined.
    pub fn schema_source(&self) -> PathBuf {
        let joined = self.resolve(&self.schema_path);
        std::path::absolute(&joined).unwrap_or(joined)
    }

    /// The generated script path, resolved against the project root.
    pub fn out_path(&self) -> PathBuf {
        self.resolve(&self.out_file)
    }
}

/// Parses the `--oauthScopes` value.
///
/// The value must be a JSON object; arrays, `null` and scalars are rejected.
///
/// ## Errors
///
/// Returns `GeneratorError::ConfigError` for malformed JSON or a non-object.
pub fn parse_oauth_scopes(raw: &str) -> Result<Map<String, Value>, GeneratorError> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|e| GeneratorError::ConfigError(format!("--oauthScopes is not valid JSON: {e}")))?;

    match value {
        Value::Object(map) => Ok(map),
        other => Err(GeneratorError::ConfigError(format!(
            "--oauthScopes must be a JSON object, got {}",
            json_kind(&other)
        ))),
    }
}

/// Parses the `--omitFields` comma-separated list.
///
/// Entries are trimmed and empty entries dropped, so `""` yields an empty set
/// and disables omission entirely.
pub fn parse_omit_fields(raw: &str) -> BTreeSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
