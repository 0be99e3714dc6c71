//! prisma-swagger definition library
//!
//! This crate provides the types shared by the `prisma-swagger-gen` generator:
//! the introspected data model it reads and the OpenAPI schema fragments it
//! writes.
//!
//! ## Core Types
//!
//! ### Data Model
//!
//! - [`Dmmf`] - A DMMF document wrapping the data model
//! - [`Datamodel`] - Models and enums in declaration order
//! - [`Model`] - A model with its ordered fields
//! - [`Field`] - A field with kind, type, list and required flags
//! - [`FieldKind`] - Scalar, enum, relation (`object`) or unsupported
//! - [`Enum`] / [`EnumValue`] - Declared enums
//! - [`ScalarType`] - Prisma scalar type names
//!
//! ### Output
//!
//! - [`Schema`] - An OpenAPI schema fragment
//! - [`SchemaSet`] - Named schemas keyed by generated name
//!
//! ## Examples
//!
//! ```
//! use prisma_swagger_define::{Datamodel, Enum, Field, Model};
//!
//! let datamodel = Datamodel {
//!     models: vec![Model::new(
//!         "Post",
//!         vec![
//!             Field::scalar("id", "String", true),
//!             Field::enumeration("status", "Status", false),
//!             Field::relation("author", "User", false),
//!         ],
//!     )],
//!     enums: vec![Enum::new("Status", &["DRAFT", "PUBLISHED"])],
//! };
//!
//! assert_eq!(datamodel.models[0].fields.len(), 3);
//! assert_eq!(datamodel.enums[0].values[1].name, "PUBLISHED");
//! ```

pub mod datamodel;
pub mod prelude;
pub mod schema;

// Re-export main types at crate root
pub use datamodel::{Datamodel, Dmmf, Enum, EnumValue, Field, FieldKind, Model, ScalarType};
pub use schema::{REF_PREFIX, Schema, SchemaSet};
