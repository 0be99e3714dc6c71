//! Fixed error-response schemas.
//!
//! Controllers document their failure responses against these names, so
//! they are emitted into every schema set alongside the derived ones.

use std::collections::BTreeMap;

use prisma_swagger_define::{Schema, SchemaSet};
use serde_json::json;

/// Name of the generic exception shape the specializations extend.
pub const HTTP_EXCEPTION: &str = "HttpException";

/// `(name, status code, message, error)` for each specialization.
const SPECIALIZATIONS: [(&str, u16, &str, &str); 3] = [
    ("BadRequestException", 400, "Validation failed", "Bad Request"),
    ("NotFoundException", 404, "Resource not found", "Not Found"),
    (
        "InternalServerErrorException",
        500,
        "An unexpected error occurred",
        "Internal Server Error",
    ),
];

/// Returns the generic exception schema and its three specializations.
pub fn error_schemas() -> SchemaSet {
    let mut schemas = SchemaSet::new();
    schemas.insert(HTTP_EXCEPTION.to_string(), http_exception());

    for (name, status, message, error) in SPECIALIZATIONS {
        schemas.insert(
            name.to_string(),
            Schema {
                all_of: Some(vec![Schema::reference(HTTP_EXCEPTION)]),
                example: Some(json!({
                    "statusCode": status,
                    "message": message,
                    "error": error,
                })),
                ..Default::default()
            },
        );
    }

    schemas
}

fn http_exception() -> Schema {
    let properties = BTreeMap::from([
        ("statusCode".to_string(), Schema::with_format("integer", "int32")),
        ("message".to_string(), Schema::typed("string")),
        ("error".to_string(), Schema::typed("string")),
    ]);

    Schema {
        properties: Some(properties),
        required: Some(vec!["statusCode".to_string(), "message".to_string()]),
        ..Schema::object()
    }
}
