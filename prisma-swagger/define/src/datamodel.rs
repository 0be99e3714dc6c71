//! Introspected data model types.
//!
//! These types mirror the `datamodel` portion of Prisma's DMMF document. They
//! are produced either by parsing a `.prisma` source directly or by reading a
//! DMMF JSON dump, and consumed by the schema derivation in `prisma-swagger-gen`.
//!
//! - [`Dmmf`] - The top-level document wrapper (`{ "datamodel": ... }`)
//! - [`Datamodel`] - Models and enums in declaration order
//! - [`Model`] / [`Field`] / [`FieldKind`] - Model structure
//! - [`Enum`] / [`EnumValue`] - Enum structure
//! - [`ScalarType`] - The fixed set of Prisma scalar type names

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// A DMMF document as emitted by Prisma's introspection layer.
///
/// Only the `datamodel` member is consumed; everything else (`schema`,
/// `mappings`) is ignored on deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dmmf {
    /// The introspected models and enums.
    pub datamodel: Datamodel,
}

/// The models and enums of a data model description.
///
/// ## Examples
///
/// ```
/// use prisma_swagger_define::{Datamodel, Field, FieldKind, Model};
///
/// let datamodel = Datamodel {
///     models: vec![Model::new("User", vec![Field::scalar("id", "String", true)])],
///     enums: vec![],
/// };
///
/// assert!(datamodel.model("User").is_some());
/// assert_eq!(datamodel.models[0].fields[0].kind, FieldKind::Scalar);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Datamodel {
    /// Models in declaration order.
    pub models: Vec<Model>,
    /// Enums in declaration order.
    #[serde(default)]
    pub enums: Vec<Enum>,
}

impl Datamodel {
    /// Looks up a model by name.
    pub fn model(&self, name: &str) -> Option<&Model> {
        self.models.iter().find(|m| m.name == name)
    }

    /// Looks up an enum by name.
    pub fn enum_by_name(&self, name: &str) -> Option<&Enum> {
        self.enums.iter().find(|e| e.name == name)
    }
}

/// A single model (table or collection).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Model {
    /// Model name as declared (e.g., "User").
    pub name: String,
    /// Triple-slash documentation attached to the model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
    /// Fields in declaration order.
    pub fields: Vec<Field>,
}

impl Model {
    /// Creates an undocumented model.
    pub fn new(name: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            name: name.into(),
            documentation: None,
            fields,
        }
    }

    /// Returns true if the named field is a relation to another model.
    pub fn is_relation(&self, field_name: &str) -> bool {
        self.fields
            .iter()
            .any(|f| f.name == field_name && f.kind == FieldKind::Object)
    }
}

/// The kind of value a field holds.
///
/// Serialized with DMMF's lowercase names. Kinds this crate does not know
/// deserialize as [`FieldKind::Unsupported`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// A primitive value (see [`ScalarType`]).
    Scalar,
    /// A value of a declared enum.
    Enum,
    /// A relation to another model.
    Object,
    /// `Unsupported("...")` database types and anything unrecognized.
    #[serde(other)]
    Unsupported,
}

/// A single model field.
///
/// ## Examples
///
/// ```
/// use prisma_swagger_define::{Field, FieldKind};
///
/// let posts = Field::relation("posts", "Post", false).list();
/// assert_eq!(posts.kind, FieldKind::Object);
/// assert!(posts.is_list);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    /// Field name.
    pub name: String,
    /// What kind of value the field holds.
    pub kind: FieldKind,
    /// Underlying type name: a scalar name, an enum name, or a model name.
    #[serde(rename = "type")]
    pub type_name: String,
    /// Whether the field holds a list.
    #[serde(default)]
    pub is_list: bool,
    /// Whether the field is required (not `?`-optional).
    #[serde(default)]
    pub is_required: bool,
    /// Triple-slash documentation attached to the field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
}

impl Field {
    fn new(name: &str, kind: FieldKind, type_name: &str, is_required: bool) -> Self {
        Self {
            name: name.to_string(),
            kind,
            type_name: type_name.to_string(),
            is_list: false,
            is_required,
            documentation: None,
        }
    }

    /// Creates a singular scalar field.
    pub fn scalar(name: &str, type_name: &str, is_required: bool) -> Self {
        Self::new(name, FieldKind::Scalar, type_name, is_required)
    }

    /// Creates a singular enum field.
    pub fn enumeration(name: &str, enum_name: &str, is_required: bool) -> Self {
        Self::new(name, FieldKind::Enum, enum_name, is_required)
    }

    /// Creates a singular relation field.
    pub fn relation(name: &str, model_name: &str, is_required: bool) -> Self {
        Self::new(name, FieldKind::Object, model_name, is_required)
    }

    /// Creates a singular field of an unsupported database type.
    pub fn unsupported(name: &str, type_name: &str, is_required: bool) -> Self {
        Self::new(name, FieldKind::Unsupported, type_name, is_required)
    }

    /// Marks the field as a list.
    pub fn list(mut self) -> Self {
        self.is_list = true;
        self
    }

    /// Attaches documentation.
    pub fn documented(mut self, doc: impl Into<String>) -> Self {
        self.documentation = Some(doc.into());
        self
    }
}

/// A declared enum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enum {
    /// Enum name.
    pub name: String,
    /// Values in declaration order.
    pub values: Vec<EnumValue>,
    /// Triple-slash documentation attached to the enum.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
}

impl Enum {
    /// Creates an undocumented enum from its value names.
    pub fn new(name: impl Into<String>, values: &[&str]) -> Self {
        Self {
            name: name.into(),
            values: values.iter().map(|v| EnumValue::new(*v)).collect(),
            documentation: None,
        }
    }
}

/// A single enum value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumValue {
    /// The value name exposed by the client.
    pub name: String,
    /// The `@map`ped database name, when different.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db_name: Option<String>,
}

impl EnumValue {
    /// Creates an unmapped enum value.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            db_name: None,
        }
    }
}

/// The Prisma scalar types with a dedicated OpenAPI mapping.
///
/// ## Examples
///
/// ```
/// use std::str::FromStr;
/// use prisma_swagger_define::ScalarType;
///
/// assert_eq!(ScalarType::from_str("BigInt").unwrap(), ScalarType::BigInt);
/// assert!(ScalarType::from_str("Geometry").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
pub enum ScalarType {
    String,
    Boolean,
    Int,
    BigInt,
    Float,
    Decimal,
    DateTime,
    Json,
    Bytes,
}
