//! Shared test fixtures for prisma-swagger-gen tests.

use prisma_swagger_define::{Datamodel, Enum, Field, Model};

/// The `Post` model: required scalar `id`, optional enum `tag`, optional
/// relation `owner`.
pub fn make_post_model() -> Model {
    Model::new(
        "Post",
        vec![
            Field::scalar("id", "String", true),
            Field::enumeration("tag", "Status", false),
            Field::relation("owner", "User", false),
        ],
    )
}

/// The `User` model with timestamps and a list relation back to `Post`.
pub fn make_user_model() -> Model {
    Model::new(
        "User",
        vec![
            Field::scalar("id", "String", true),
            Field::scalar("email", "String", true),
            Field::scalar("age", "Int", false),
            Field::scalar("createdAt", "DateTime", true),
            Field::relation("posts", "Post", true).list(),
        ],
    )
}

/// `Post`, `User` and the `Status` enum.
pub fn make_datamodel() -> Datamodel {
    Datamodel {
        models: vec![make_post_model(), make_user_model()],
        enums: vec![Enum::new("Status", &["DRAFT", "PUBLISHED"])],
    }
}

/// A resolver that knows the models of [`make_datamodel`].
pub fn known_models(name: &str) -> Option<String> {
    matches!(name, "Post" | "User").then(|| crate::naming::read_schema_name(name))
}

/// A resolver that knows the enums of [`make_datamodel`].
pub fn known_enums(name: &str) -> Option<String> {
    (name == "Status").then(|| name.to_string())
}
