//! prisma-swagger
//!
//! Derives OpenAPI schemas from a Prisma data model and writes a
//! `swagger-autogen` config script.

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use clap::error::{ContextKind, ContextValue, ErrorKind};
use colored::Colorize;
use prisma_swagger_gen::config::{Settings, parse_oauth_scopes, parse_omit_fields};
use prisma_swagger_gen::errors::GeneratorError;
use prisma_swagger_gen::introspect::IntrospectorKind;
use prisma_swagger_gen::output::generate_and_write;
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// prisma-swagger - turns a Prisma data model into a swagger-autogen config script
#[derive(Parser, Debug, Default)]
#[command(name = "prisma-swagger")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Prisma schema or DMMF JSON, relative to the project root [default: prisma/schema.prisma]
    #[arg(long, value_name = "PATH")]
    schema: Option<PathBuf>,

    /// Directory all relative paths are resolved against [default: .]
    #[arg(long = "projectRoot", value_name = "DIR")]
    project_root: Option<PathBuf>,

    /// Glob for controller files [default: src/web/api/controllers/**/*.ts]
    #[arg(long = "controllersGlob", value_name = "GLOB")]
    controllers_glob: Option<String>,

    /// Generated script path [default: ./swagger.config.js]
    #[arg(long = "outFile", value_name = "PATH")]
    out_file: Option<PathBuf>,

    /// OpenAPI document path written by swagger-autogen [default: ./src/web/api/openapi.json]
    #[arg(long = "openapiOut", value_name = "PATH")]
    openapi_out: Option<String>,

    /// API title [default: API]
    #[arg(long = "serviceTitle", value_name = "TITLE")]
    service_title: Option<String>,

    /// API version [default: 1.0.0]
    #[arg(long = "serviceVersion", value_name = "VERSION")]
    service_version: Option<String>,

    /// Server URL [default: http://localhost:3000]
    #[arg(long = "serverUrl", value_name = "URL")]
    server_url: Option<String>,

    /// Security scheme name [default: oauth2]
    #[arg(long = "securitySchemeName", value_name = "NAME")]
    security_scheme_name: Option<String>,

    /// OAuth2 password-flow token URL [default: /api/auth/token]
    #[arg(long = "oauthTokenUrl", value_name = "URL")]
    oauth_token_url: Option<String>,

    /// OAuth2 password-flow refresh URL [default: /api/auth/refresh]
    #[arg(long = "oauthRefreshUrl", value_name = "URL")]
    oauth_refresh_url: Option<String>,

    /// OAuth2 scopes as a JSON object, e.g. '{"read": "Read access"}'
    #[arg(long = "oauthScopes", value_name = "JSON")]
    oauth_scopes: Option<String>,

    /// Fields left out of request bodies [default: id,createdAt,updatedAt]
    #[arg(long = "omitFields", value_name = "CSV")]
    omit_fields: Option<String>,

    /// Maximum $ref hops followed when synthesizing examples [default: 3]
    #[arg(long = "exampleDepth", value_name = "N")]
    example_depth: Option<usize>,

    /// Do not append the schema normalization step to the script
    #[arg(long = "skipSchemaFixup")]
    skip_schema_fixup: bool,

    /// How to read the schema source [default: auto]
    #[arg(long, value_enum)]
    introspector: Option<IntrospectorKind>,

    /// Print the generated script instead of writing it
    #[arg(long = "dryRun")]
    dry_run: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    /// Applies the command-line overrides to the default settings.
    fn into_settings(self) -> Result<Settings, GeneratorError> {
        let defaults = Settings::default();

        let oauth_scopes = match self.oauth_scopes.as_deref() {
            Some(raw) => parse_oauth_scopes(raw)?,
            None => defaults.oauth_scopes,
        };

        Ok(Settings {
            project_root: self.project_root.unwrap_or(defaults.project_root),
            schema_path: self.schema.unwrap_or(defaults.schema_path),
            introspector: self.introspector.unwrap_or(defaults.introspector),
            controllers_glob: self.controllers_glob.unwrap_or(defaults.controllers_glob),
            out_file: self.out_file.unwrap_or(defaults.out_file),
            openapi_out: self.openapi_out.unwrap_or(defaults.openapi_out),
            service_title: self.service_title.unwrap_or(defaults.service_title),
            service_version: self.service_version.unwrap_or(defaults.service_version),
            server_url: self.server_url.unwrap_or(defaults.server_url),
            security_scheme_name: self
                .security_scheme_name
                .unwrap_or(defaults.security_scheme_name),
            oauth_token_url: self.oauth_token_url.unwrap_or(defaults.oauth_token_url),
            oauth_refresh_url: self.oauth_refresh_url.unwrap_or(defaults.oauth_refresh_url),
            oauth_scopes,
            omit_fields: self
                .omit_fields
                .as_deref()
                .map(parse_omit_fields)
                .unwrap_or(defaults.omit_fields),
            example_depth: self.example_depth.unwrap_or(defaults.example_depth),
            fixup_schemas: !self.skip_schema_fixup,
        })
    }
}

/// Initialize tracing subscriber based on verbosity
fn init_tracing(verbose: u8) {
    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            0 => "warn".to_string(),
            1 => "info".to_string(),
            2 => "debug".to_string(),
            _ => "trace".to_string(),
        },
    };

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(verbose >= 2)
                .with_level(true)
                .with_file(verbose >= 3)
                .with_line_number(verbose >= 3)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

/// Parses the command line.
///
/// An argument clap rejects (unknown, or a known flag with an invalid value)
/// is dropped with a warning and the rest is parsed again, so the remaining
/// flags still apply. When the offending argument cannot be located the
/// defaults are used.
fn parse_cli() -> Cli {
    let mut args: Vec<OsString> = std::env::args_os().collect();

    loop {
        match Cli::try_parse_from(&args) {
            Ok(cli) => return cli,
            Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
                e.exit()
            }
            Err(e) => {
                let reason = clap_reason(&e);
                if drop_rejected(&mut args, &e) {
                    eprintln!("{} {reason}; ignoring it", "warning:".yellow().bold());
                } else {
                    eprintln!("{} {reason}; using defaults", "warning:".yellow().bold());
                    return Cli::default();
                }
            }
        }
    }
}

/// The first line of a clap error without clap's own `error:` prefix.
fn clap_reason(e: &clap::Error) -> String {
    let rendered = e.to_string();
    let first_line = rendered.lines().next().unwrap_or_default();
    first_line
        .strip_prefix("error: ")
        .unwrap_or(first_line)
        .to_string()
}

/// Removes the argument `e` complains about, along with its separate value
/// when the flag itself is known. Returns false if it cannot be found.
fn drop_rejected(args: &mut Vec<OsString>, e: &clap::Error) -> bool {
    let Some(ContextValue::String(invalid)) = e.get(ContextKind::InvalidArg) else {
        return false;
    };
    // Known flags are rendered with their value name, e.g. `--exampleDepth <N>`
    let flag = invalid.split_whitespace().next().unwrap_or_default();
    if flag.is_empty() {
        return false;
    }

    let inline = format!("{flag}=");
    let Some(pos) = args.iter().skip(1).position(|arg| {
        let arg = arg.to_string_lossy();
        arg == flag || arg == invalid.as_str() || arg.starts_with(&inline)
    }) else {
        return false;
    };
    let pos = pos + 1;

    let has_separate_value = e.kind() != ErrorKind::UnknownArgument
        && flag.starts_with('-')
        && !args[pos].to_string_lossy().contains('=');
    args.remove(pos);
    if has_separate_value && pos < args.len() {
        args.remove(pos);
    }

    true
}

fn main() -> ExitCode {
    let cli = parse_cli();
    init_tracing(cli.verbose);

    let dry_run = cli.dry_run;
    let result = cli
        .into_settings()
        .and_then(|settings| generate_and_write(&settings, dry_run));

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
