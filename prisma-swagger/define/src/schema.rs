//! OpenAPI schema objects.
//!
//! [`Schema`] is the subset of the OpenAPI 3.0 Schema Object that the
//! generator emits. Every member is optional and absent members are not
//! serialized, so a schema renders exactly as the fragment it describes.
//!
//! Schemas are plain values. Derivations clone and adjust rather than share,
//! which keeps every named schema in a [`SchemaSet`] independent.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Prefix of every local schema reference.
pub const REF_PREFIX: &str = "#/components/schemas/";

/// Named schemas keyed by their generated name, serialized in key order.
pub type SchemaSet = BTreeMap<String, Schema>;

/// An OpenAPI schema fragment.
///
/// ## Examples
///
/// Scalar fragments:
///
/// ```
/// use prisma_swagger_define::Schema;
///
/// let id = Schema::with_format("integer", "int64");
/// assert_eq!(
///     serde_json::to_value(&id).unwrap(),
///     serde_json::json!({ "type": "integer", "format": "int64" })
/// );
/// ```
///
/// References and arrays:
///
/// ```
/// use prisma_swagger_define::Schema;
///
/// let posts = Schema::array(Schema::reference("GetPostResponse"));
/// assert_eq!(
///     serde_json::to_value(&posts).unwrap(),
///     serde_json::json!({
///         "type": "array",
///         "items": { "$ref": "#/components/schemas/GetPostResponse" }
///     })
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, Schema>>,

    /// Required property names in declaration order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,

    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<Value>>,

    #[serde(rename = "$ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    #[serde(rename = "allOf", default, skip_serializing_if = "Option::is_none")]
    pub all_of: Option<Vec<Schema>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
}

impl Schema {
    /// A fragment with only a `type`.
    pub fn typed(schema_type: &str) -> Self {
        Self {
            schema_type: Some(schema_type.to_string()),
            ..Default::default()
        }
    }

    /// A fragment with a `type` and a `format`.
    pub fn with_format(schema_type: &str, format: &str) -> Self {
        Self {
            schema_type: Some(schema_type.to_string()),
            format: Some(format.to_string()),
            ..Default::default()
        }
    }

    /// The generic `{ "type": "object" }` fragment.
    pub fn object() -> Self {
        Self::typed("object")
    }

    /// An array of `items`.
    pub fn array(items: Schema) -> Self {
        Self {
            schema_type: Some("array".to_string()),
            items: Some(Box::new(items)),
            ..Default::default()
        }
    }

    /// A `$ref` to the named schema of the same collection.
    ///
    /// ```
    /// use prisma_swagger_define::Schema;
    ///
    /// let r = Schema::reference("Status");
    /// assert_eq!(r.reference.as_deref(), Some("#/components/schemas/Status"));
    /// assert_eq!(r.ref_target(), Some("Status"));
    /// ```
    pub fn reference(name: &str) -> Self {
        Self {
            reference: Some(format!("{REF_PREFIX}{name}")),
            ..Default::default()
        }
    }

    /// A `{ "type": "string", "enum": [...] }` fragment.
    pub fn string_enum<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            schema_type: Some("string".to_string()),
            enum_values: Some(values.into_iter().map(|v| Value::String(v.into())).collect()),
            ..Default::default()
        }
    }

    /// Returns the schema name a local `$ref` points at.
    ///
    /// References outside `#/components/schemas/` yield `None`.
    pub fn ref_target(&self) -> Option<&str> {
        self.reference.as_deref()?.strip_prefix(REF_PREFIX)
    }

    /// Returns true if the schema declares the given `type`.
    pub fn is_type(&self, schema_type: &str) -> bool {
        self.schema_type.as_deref() == Some(schema_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_members_are_not_serialized() {
        let value = serde_json::to_value(Schema::object()).unwrap();
        assert_eq!(value, json!({ "type": "object" }));
    }

    #[test]
    fn renamed_members_use_openapi_keys() {
        let schema = Schema {
            all_of: Some(vec![Schema::reference("HttpException")]),
            enum_values: Some(vec![json!("A")]),
            ..Default::default()
        };
        let value = serde_json::to_value(&schema).unwrap();

        assert_eq!(value["allOf"][0]["$ref"], "#/components/schemas/HttpException");
        assert_eq!(value["enum"], json!(["A"]));
    }

    #[test]
    fn ref_target_ignores_foreign_references() {
        let schema = Schema {
            reference: Some("https://example.com/schema.json".to_string()),
            ..Default::default()
        };
        assert_eq!(schema.ref_target(), None);
    }

    #[test]
    fn properties_serialize_in_key_order() {
        let mut properties = BTreeMap::new();
        properties.insert("zeta".to_string(), Schema::typed("string"));
        properties.insert("alpha".to_string(), Schema::typed("string"));
        let schema = Schema {
            properties: Some(properties),
            ..Schema::object()
        };

        let text = serde_json::to_string(&schema).unwrap();
        assert!(text.find("alpha").unwrap() < text.find("zeta").unwrap());
    }
}
