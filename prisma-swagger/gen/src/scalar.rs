//! Scalar type mapping.

use std::str::FromStr;

use prisma_swagger_define::{ScalarType, Schema};

/// Maps a Prisma scalar type name to its OpenAPI fragment.
///
/// Unrecognized names map to `{ "type": "string" }`.
///
/// ## Examples
///
/// ```
/// use prisma_swagger_define::Schema;
/// use prisma_swagger_gen::scalar::scalar_schema;
///
/// assert_eq!(scalar_schema("Int"), Schema::with_format("integer", "int32"));
/// assert_eq!(scalar_schema("Geometry"), Schema::typed("string"));
/// ```
pub fn scalar_schema(type_name: &str) -> Schema {
    let Ok(scalar) = ScalarType::from_str(type_name) else {
        return Schema::typed("string");
    };

    match scalar {
        ScalarType::String => Schema::typed("string"),
        ScalarType::Boolean => Schema::typed("boolean"),
        ScalarType::Int => Schema::with_format("integer", "int32"),
        ScalarType::BigInt => Schema::with_format("integer", "int64"),
        ScalarType::Float => Schema::with_format("number", "double"),
        ScalarType::Decimal => Schema::with_format("number", "decimal"),
        ScalarType::DateTime => Schema::with_format("string", "date-time"),
        ScalarType::Json => Schema::object(),
        ScalarType::Bytes => Schema::with_format("string", "byte"),
    }
}
