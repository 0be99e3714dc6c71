//! Generated schema names.
//!
//! Downstream tooling binds to these names, so they are fixed:
//!
//! | Shape | Name |
//! |---|---|
//! | read | `Get<Model>Response` |
//! | write | `Post<Model>Request` |
//! | update | `Put<Model>Request` |
//! | list | `List<Plural>Response` |
//!
//! Enums keep their declared name.

/// Pluralizes a model name: `es` after a trailing `s`, otherwise `s`.
///
/// ```
/// use prisma_swagger_gen::naming::pluralize;
///
/// assert_eq!(pluralize("Tag"), "Tags");
/// assert_eq!(pluralize("Status"), "Statuses");
/// ```
pub fn pluralize(name: &str) -> String {
    if name.ends_with('s') {
        format!("{name}es")
    } else {
        format!("{name}s")
    }
}

pub fn read_schema_name(model: &str) -> String {
    format!("Get{model}Response")
}

pub fn write_schema_name(model: &str) -> String {
    format!("Post{model}Request")
}

pub fn update_schema_name(model: &str) -> String {
    format!("Put{model}Request")
}

pub fn list_schema_name(model: &str) -> String {
    format!("List{}Response", pluralize(model))
}
