//! Example synthesis for request body schemas.
//!
//! [`ExampleSynthesizer`] builds a representative JSON value for a schema by
//! walking it against the schema set it belongs to:
//!
//! - an explicit `example` wins
//! - `$ref` follows the target, counting one hop; past `max_depth` hops there
//!   is no example, which also ends self-referencing chains
//! - `allOf` merges the object examples of all branches
//! - `enum` takes the first literal
//! - arrays hold one item example
//! - objects recurse per property and skip undetermined ones
//! - scalars take a canonical value per type

use prisma_swagger_define::{Schema, SchemaSet};
use serde_json::{Map, Value, json};
use tracing::debug;

/// Example used for `date-time` strings.
pub const DATE_TIME_EXAMPLE: &str = "1970-01-01T00:00:00.000Z";

/// Synthesizes examples against a schema set.
///
/// ## Examples
///
/// ```
/// use prisma_swagger_define::{Schema, SchemaSet};
/// use prisma_swagger_gen::example::ExampleSynthesizer;
/// use serde_json::json;
///
/// let mut schemas = SchemaSet::new();
/// schemas.insert("Role".to_string(), Schema::string_enum(["ADMIN", "USER"]));
///
/// let role = Schema::reference("Role");
/// let synthesizer = ExampleSynthesizer::new(&schemas, 3);
/// assert_eq!(synthesizer.example_for(&role), Some(json!("ADMIN")));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ExampleSynthesizer<'a> {
    schemas: &'a SchemaSet,
    max_depth: usize,
}

impl<'a> ExampleSynthesizer<'a> {
    pub fn new(schemas: &'a SchemaSet, max_depth: usize) -> Self {
        Self { schemas, max_depth }
    }

    /// Returns an example for `schema`, or `None` when it is undetermined.
    pub fn example_for(&self, schema: &Schema) -> Option<Value> {
        self.synthesize(schema, 0)
    }

    fn synthesize(&self, schema: &Schema, depth: usize) -> Option<Value> {
        if let Some(example) = &schema.example {
            return Some(example.clone());
        }

        if let Some(reference) = &schema.reference {
            if depth >= self.max_depth {
                debug!(reference = %reference, depth, "Example depth cap reached");
                return None;
            }
            let target = self.schemas.get(schema.ref_target()?)?;
            return self.synthesize(target, depth + 1);
        }

        if let Some(branches) = &schema.all_of {
            let merged: Map<String, Value> = branches
                .iter()
                .filter_map(|branch| match self.synthesize(branch, depth) {
                    Some(Value::Object(object)) => Some(object),
                    _ => None,
                })
                .flatten()
                .collect();
            return (!merged.is_empty()).then_some(Value::Object(merged));
        }

        if let Some(first) = schema.enum_values.as_ref().and_then(|values| values.first()) {
            return Some(first.clone());
        }

        if let Some(properties) = &schema.properties {
            let object: Map<String, Value> = properties
                .iter()
                .filter_map(|(name, property)| {
                    self.synthesize(property, depth).map(|v| (name.clone(), v))
                })
                .collect();
            return Some(Value::Object(object));
        }

        match schema.schema_type.as_deref()? {
            "array" => {
                let item = self.synthesize(schema.items.as_deref()?, depth)?;
                Some(Value::Array(vec![item]))
            }
            "string" if schema.format.as_deref() == Some("date-time") => {
                Some(json!(DATE_TIME_EXAMPLE))
            }
            "string" => Some(json!("string")),
            "integer" | "number" => Some(json!(0)),
            "boolean" => Some(json!(true)),
            "object" => Some(json!({})),
            _ => Some(Value::Null),
        }
    }
}

/// Stores a synthesized example on each named schema that has none.
///
/// Existing examples are never replaced. Names missing from the set and
/// schemas without a determinable example are skipped.
pub fn attach_examples(schemas: &mut SchemaSet, names: &[String], max_depth: usize) {
    for name in names {
        let Some(schema) = schemas.get(name) else {
            continue;
        };
        if schema.example.is_some() {
            continue;
        }

        let example = ExampleSynthesizer::new(schemas, max_depth).example_for(schema);
        if let Some(example) = example
            && let Some(schema) = schemas.get_mut(name)
        {
            schema.example = Some(example);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn object(properties: &[(&str, Schema)]) -> Schema {
        Schema {
            properties: Some(
                properties
                    .iter()
                    .map(|(name, schema)| (name.to_string(), schema.clone()))
                    .collect::<BTreeMap<_, _>>(),
            ),
            ..Schema::object()
        }
    }

    fn set(entries: Vec<(&str, Schema)>) -> SchemaSet {
        entries
            .into_iter()
            .map(|(name, schema)| (name.to_string(), schema))
            .collect()
    }

    #[test]
    fn scalars_take_canonical_values() {
        let schemas = SchemaSet::new();
        let synth = ExampleSynthesizer::new(&schemas, 3);

        assert_eq!(synth.example_for(&Schema::typed("string")), Some(json!("string")));
        assert_eq!(synth.example_for(&Schema::with_format("integer", "int64")), Some(json!(0)));
        assert_eq!(synth.example_for(&Schema::with_format("number", "double")), Some(json!(0)));
        assert_eq!(synth.example_for(&Schema::typed("boolean")), Some(json!(true)));
        assert_eq!(synth.example_for(&Schema::object()), Some(json!({})));
        assert_eq!(
            synth.example_for(&Schema::with_format("string", "date-time")),
            Some(json!("1970-01-01T00:00:00.000Z"))
        );
        assert_eq!(synth.example_for(&Schema::typed("file")), Some(Value::Null));
        assert_eq!(synth.example_for(&Schema::default()), None);
    }

    #[test]
    fn objects_skip_undetermined_properties() {
        let schemas = SchemaSet::new();
        let schema = object(&[
            ("name", Schema::typed("string")),
            ("missing", Schema::reference("Nowhere")),
        ]);

        let example = ExampleSynthesizer::new(&schemas, 3).example_for(&schema);
        assert_eq!(example, Some(json!({ "name": "string" })));
    }

    #[test]
    fn arrays_hold_one_item() {
        let schemas = SchemaSet::new();
        let synth = ExampleSynthesizer::new(&schemas, 3);

        assert_eq!(
            synth.example_for(&Schema::array(Schema::typed("boolean"))),
            Some(json!([true]))
        );
        assert_eq!(synth.example_for(&Schema::array(Schema::reference("Nowhere"))), None);
    }

    #[test]
    fn enums_take_first_literal() {
        let schemas = set(vec![("Status", Schema::string_enum(["DRAFT", "PUBLISHED"]))]);
        let schema = object(&[("status", Schema::reference("Status"))]);

        let example = ExampleSynthesizer::new(&schemas, 3).example_for(&schema);
        assert_eq!(example, Some(json!({ "status": "DRAFT" })));
    }

    #[test]
    fn all_of_merges_branches() {
        let schemas = set(vec![(
            "Base",
            object(&[("id", Schema::typed("integer"))]),
        )]);
        let schema = Schema {
            all_of: Some(vec![
                Schema::reference("Base"),
                object(&[("label", Schema::typed("string"))]),
            ]),
            ..Default::default()
        };

        let example = ExampleSynthesizer::new(&schemas, 3).example_for(&schema);
        assert_eq!(example, Some(json!({ "id": 0, "label": "string" })));
    }

    #[test]
    fn explicit_examples_win() {
        let schemas = SchemaSet::new();
        let schema = Schema {
            example: Some(json!("kept")),
            ..Schema::typed("string")
        };

        assert_eq!(
            ExampleSynthesizer::new(&schemas, 3).example_for(&schema),
            Some(json!("kept"))
        );
    }

    #[test]
    fn reference_chain_stops_at_depth_cap() {
        let schemas = set(vec![
            ("A", Schema::reference("B")),
            ("B", Schema::reference("C")),
            ("C", Schema::typed("string")),
        ]);
        let start = Schema::reference("A");

        assert_eq!(
            ExampleSynthesizer::new(&schemas, 3).example_for(&start),
            Some(json!("string"))
        );
        assert_eq!(ExampleSynthesizer::new(&schemas, 2).example_for(&start), None);
    }

    #[test]
    fn self_reference_terminates() {
        let node = object(&[
            ("name", Schema::typed("string")),
            ("next", Schema::reference("Node")),
        ]);
        let schemas = set(vec![("Node", node.clone())]);

        let example = ExampleSynthesizer::new(&schemas, 3).example_for(&node).unwrap();

        let mut nesting = 0;
        let mut cursor = &example;
        while let Some(next) = cursor.get("next") {
            nesting += 1;
            cursor = next;
        }
        assert_eq!(nesting, 3);
        assert_eq!(cursor, &json!({ "name": "string" }));
    }

    #[test]
    fn attach_examples_fills_missing_only() {
        let mut schemas = set(vec![
            ("PostTagRequest", object(&[("label", Schema::typed("string"))])),
            (
                "PutTagRequest",
                Schema {
                    example: Some(json!({ "label": "custom" })),
                    ..object(&[("label", Schema::typed("string"))])
                },
            ),
        ]);
        let names = vec![
            "PostTagRequest".to_string(),
            "PutTagRequest".to_string(),
            "Unknown".to_string(),
        ];

        attach_examples(&mut schemas, &names, 3);

        assert_eq!(schemas["PostTagRequest"].example, Some(json!({ "label": "string" })));
        assert_eq!(schemas["PutTagRequest"].example, Some(json!({ "label": "custom" })));
        assert!(!schemas.contains_key("Unknown"));
    }
}
