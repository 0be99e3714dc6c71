//! Convenient re-exports for working with data models and schemas.
//!
//! ```
//! use prisma_swagger_define::prelude::*;
//!
//! let model = Model::new("Tag", vec![Field::scalar("label", "String", true)]);
//! let schema = Schema::array(Schema::reference("GetTagResponse"));
//! # let _ = (model, schema);
//! ```

pub use crate::datamodel::{Datamodel, Dmmf, Enum, EnumValue, Field, FieldKind, Model, ScalarType};
pub use crate::schema::{REF_PREFIX, Schema, SchemaSet};
