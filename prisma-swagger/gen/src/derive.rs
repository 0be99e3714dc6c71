//! Schema derivation from models and enums.
//!
//! Each model yields four schemas and each enum one:
//!
//! 1. [`read_schema`] - one property per field, `required` in declaration order
//! 2. [`write_schema`] - the read schema without omitted and relation fields
//! 3. [`update_schema`] - the write schema with nothing required
//! 4. [`list_schema`] - a fixed paginated envelope around the read schema
//! 5. [`enum_schema`] - a string enum
//!
//! Relation and enum targets are resolved through injected closures returning
//! the referenced schema name, so derivation carries no hidden state.
//! [`derive_schemas`] wires everything for a whole data model.

use std::collections::{BTreeMap, BTreeSet};

use prisma_swagger_define::{Datamodel, Enum, Field, FieldKind, Model, Schema, SchemaSet};
use tracing::{debug, warn};

use crate::naming::{
    list_schema_name, read_schema_name, update_schema_name, write_schema_name,
};
use crate::scalar::scalar_schema;

/// Properties of every list envelope, in `required` order.
const LIST_PROPERTIES: [(&str, &str); 6] = [
    ("count", "integer"),
    ("pageNumber", "integer"),
    ("pageSize", "integer"),
    ("totalPages", "integer"),
    ("hasPreviousPage", "boolean"),
    ("hasNextPage", "boolean"),
];

/// Maps a field to its schema fragment.
///
/// `models` maps a related model name to its read schema name and `enums`
/// maps an enum name to its schema name. Both return `None` for undeclared
/// names, which render as a generic object so that no `$ref` dangles.
///
/// ## Examples
///
/// ```
/// use prisma_swagger_define::{Field, Schema};
/// use prisma_swagger_gen::derive::field_schema;
///
/// let models = |model: &str| Some(format!("Get{model}Response"));
/// let enums = |name: &str| (name == "Role").then(|| name.to_string());
///
/// let owner = field_schema(&Field::relation("owner", "User", false), &models, &enums);
/// assert_eq!(owner, Schema::reference("GetUserResponse"));
///
/// let role = field_schema(&Field::enumeration("role", "Role", true), &models, &enums);
/// assert_eq!(role, Schema::reference("Role"));
///
/// let scores = field_schema(&Field::scalar("scores", "Float", true).list(), &models, &enums);
/// assert_eq!(scores, Schema::array(Schema::with_format("number", "double")));
/// ```
pub fn field_schema(
    field: &Field,
    models: &impl Fn(&str) -> Option<String>,
    enums: &impl Fn(&str) -> Option<String>,
) -> Schema {
    let base = match field.kind {
        FieldKind::Scalar => scalar_schema(&field.type_name),
        FieldKind::Enum => match enums(&field.type_name) {
            Some(name) => Schema::reference(&name),
            None => {
                warn!(
                    field = %field.name,
                    target = %field.type_name,
                    "Enum type is not a declared enum, rendering as object"
                );
                Schema::object()
            }
        },
        FieldKind::Object => match models(&field.type_name) {
            Some(name) => Schema::reference(&name),
            None => {
                warn!(
                    field = %field.name,
                    target = %field.type_name,
                    "Relation target is not a known model, rendering as object"
                );
                Schema::object()
            }
        },
        FieldKind::Unsupported => Schema::object(),
    };

    let mut schema = if field.is_list {
        Schema::array(base)
    } else {
        base
    };

    // OpenAPI 3.0 ignores siblings of `$ref`
    if schema.reference.is_none() {
        schema.description = field.documentation.clone();
    }

    schema
}

/// Derives the read (`Get<Model>Response`) schema.
///
/// `required` lists exactly the required fields in declaration order and is
/// absent when no field is required.
pub fn read_schema(
    model: &Model,
    models: &impl Fn(&str) -> Option<String>,
    enums: &impl Fn(&str) -> Option<String>,
) -> Schema {
    let properties: BTreeMap<String, Schema> = model
        .fields
        .iter()
        .map(|f| (f.name.clone(), field_schema(f, models, enums)))
        .collect();

    let required: Vec<String> = model
        .fields
        .iter()
        .filter(|f| f.is_required)
        .map(|f| f.name.clone())
        .collect();

    Schema {
        description: model.documentation.clone(),
        properties: Some(properties),
        required: (!required.is_empty()).then_some(required),
        ..Schema::object()
    }
}

/// Derives the write (`Post<Model>Request`) schema from the read schema.
///
/// Properties named in `omit` and relation fields of `model` are removed from
/// both `properties` and `required`; an emptied `required` is dropped.
pub fn write_schema(model: &Model, read: &Schema, omit: &BTreeSet<String>) -> Schema {
    let keep = |name: &str| !omit.contains(name) && !model.is_relation(name);

    let mut schema = read.clone();
    if let Some(properties) = schema.properties.as_mut() {
        properties.retain(|name, _| keep(name.as_str()));
    }
    schema.required = schema
        .required
        .take()
        .map(|names| names.into_iter().filter(|n| keep(n.as_str())).collect::<Vec<_>>())
        .filter(|names| !names.is_empty());

    schema
}

/// Derives the update (`Put<Model>Request`) schema: the write schema with
/// every field optional.
pub fn update_schema(write: &Schema) -> Schema {
    Schema {
        required: None,
        ..write.clone()
    }
}

/// Derives the paginated list (`List<Plural>Response`) envelope.
///
/// ## Examples
///
/// ```
/// use prisma_swagger_gen::derive::list_schema;
///
/// let schema = list_schema("Tag");
/// let items = &schema.properties.as_ref().unwrap()["items"];
/// assert_eq!(
///     items.items.as_ref().unwrap().reference.as_deref(),
///     Some("#/components/schemas/GetTagResponse")
/// );
/// assert_eq!(schema.required.unwrap().len(), 7);
/// ```
pub fn list_schema(model_name: &str) -> Schema {
    let mut properties: BTreeMap<String, Schema> = LIST_PROPERTIES
        .iter()
        .map(|(name, schema_type)| (name.to_string(), Schema::typed(schema_type)))
        .collect();
    properties.insert(
        "items".to_string(),
        Schema::array(Schema::reference(&read_schema_name(model_name))),
    );

    let required = LIST_PROPERTIES
        .iter()
        .map(|(name, _)| name.to_string())
        .chain(std::iter::once("items".to_string()))
        .collect();

    Schema {
        properties: Some(properties),
        required: Some(required),
        ..Schema::object()
    }
}

/// Maps an enum to `{ "type": "string", "enum": [...] }`.
pub fn enum_schema(e: &Enum) -> Schema {
    Schema {
        description: e.documentation.clone(),
        ..Schema::string_enum(e.values.iter().map(|v| v.name.clone()))
    }
}

/// The four schemas derived from one model, with their names.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSchemas {
    pub read: (String, Schema),
    pub write: (String, Schema),
    pub update: (String, Schema),
    pub list: (String, Schema),
}

impl ModelSchemas {
    /// Derives all four schemas for `model`.
    pub fn derive(
        model: &Model,
        models: &impl Fn(&str) -> Option<String>,
        enums: &impl Fn(&str) -> Option<String>,
        omit: &BTreeSet<String>,
    ) -> Self {
        let read = read_schema(model, models, enums);
        let write = write_schema(model, &read, omit);
        let update = update_schema(&write);
        let list = list_schema(&model.name);

        Self {
            read: (read_schema_name(&model.name), read),
            write: (write_schema_name(&model.name), write),
            update: (update_schema_name(&model.name), update),
            list: (list_schema_name(&model.name), list),
        }
    }

    /// Names of the request body schemas (write and update).
    pub fn request_names(&self) -> [&str; 2] {
        [self.write.0.as_str(), self.update.0.as_str()]
    }

    fn into_entries(self) -> [(String, Schema); 4] {
        [self.read, self.write, self.update, self.list]
    }
}

/// Derives every model and enum schema of a data model.
///
/// Returns the schema set and the names of the request body schemas, which
/// are the ones that receive synthesized examples.
pub fn derive_schemas(datamodel: &Datamodel, omit: &BTreeSet<String>) -> (SchemaSet, Vec<String>) {
    let models = |name: &str| datamodel.model(name).map(|m| read_schema_name(&m.name));
    let enums = |name: &str| datamodel.enum_by_name(name).map(|e| e.name.clone());

    let mut schemas = SchemaSet::new();
    let mut request_names = Vec::new();

    for model in &datamodel.models {
        debug!(model = %model.name, fields = model.fields.len(), "Deriving model schemas");
        let derived = ModelSchemas::derive(model, &models, &enums, omit);
        request_names.extend(derived.request_names().map(str::to_string));
        schemas.extend(derived.into_entries());
    }

    for e in &datamodel.enums {
        debug!(name = %e.name, values = e.values.len(), "Deriving enum schema");
        schemas.insert(e.name.clone(), enum_schema(e));
    }

    (schemas, request_names)
}
