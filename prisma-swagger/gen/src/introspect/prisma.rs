//! Prisma schema language introspection.
//!
//! A line-oriented reader for the parts of a `.prisma` file that shape the
//! data model: `model`, `enum` and composite `type` blocks. `datasource`,
//! `generator` and `view` blocks are skipped. Block attributes (`@@...`) and
//! field attributes (`@id`, `@default(...)`, ...) are ignored.
//!
//! Field kinds are classified after all blocks are read, so relations may
//! refer to models declared later in the file:
//!
//! - a type naming an enum is an enum field
//! - a type naming a model is a relation (`object`) field
//! - a composite `type` or `Unsupported("...")` is an unsupported field
//! - anything else is a scalar

use std::collections::HashSet;

use prisma_swagger_define::{Datamodel, Enum, EnumValue, Field, FieldKind, Model};

use super::Introspector;
use crate::errors::GeneratorError;

/// Parses Prisma schema language.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrismaIntrospector;

impl Introspector for PrismaIntrospector {
    fn name(&self) -> &'static str {
        "prisma"
    }

    fn introspect(&self, source: &str) -> Result<Datamodel, GeneratorError> {
        parse_prisma(source)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockKind {
    Model,
    Enum,
    Type,
    Skipped,
}

#[derive(Debug)]
struct Line<'a> {
    number: usize,
    text: &'a str,
    documentation: Option<String>,
}

#[derive(Debug)]
struct Block<'a> {
    kind: BlockKind,
    name: String,
    documentation: Option<String>,
    lines: Vec<Line<'a>>,
}

/// Parses a Prisma schema into a data model.
///
/// ## Examples
///
/// ```
/// use prisma_swagger_define::FieldKind;
/// use prisma_swagger_gen::introspect::prisma::parse_prisma;
///
/// let datamodel = parse_prisma(r#"
///     model Post {
///       id     String  @id @default(cuid())
///       author User?   @relation(fields: [authorId], references: [id])
///       authorId String?
///     }
///
///     model User {
///       id    String @id
///       posts Post[]
///     }
/// "#).unwrap();
///
/// let post = &datamodel.models[0];
/// assert_eq!(post.fields[1].kind, FieldKind::Object);
/// assert!(!post.fields[1].is_required);
/// assert!(datamodel.models[1].fields[1].is_list);
/// ```
///
/// ## Errors
///
/// Returns `GeneratorError::ParseError` for unknown top-level declarations,
/// unterminated blocks and fields without a type.
pub fn parse_prisma(source: &str) -> Result<Datamodel, GeneratorError> {
    let blocks = read_blocks(source)?;

    let names_of = |kind: BlockKind| -> HashSet<&str> {
        blocks
            .iter()
            .filter(|b| b.kind == kind)
            .map(|b| b.name.as_str())
            .collect()
    };
    let models = names_of(BlockKind::Model);
    let enums = names_of(BlockKind::Enum);
    let types = names_of(BlockKind::Type);

    let mut datamodel = Datamodel::default();
    for block in &blocks {
        match block.kind {
            BlockKind::Model => {
                let fields = block
                    .lines
                    .iter()
                    .map(|line| parse_field(line, &models, &enums, &types))
                    .collect::<Result<Vec<_>, _>>()?;
                datamodel.models.push(Model {
                    name: block.name.clone(),
                    documentation: block.documentation.clone(),
                    fields,
                });
            }
            BlockKind::Enum => {
                let values = block
                    .lines
                    .iter()
                    .filter_map(|line| line.text.split_whitespace().next())
                    .map(EnumValue::new)
                    .collect();
                datamodel.enums.push(Enum {
                    name: block.name.clone(),
                    values,
                    documentation: block.documentation.clone(),
                });
            }
            BlockKind::Type | BlockKind::Skipped => {}
        }
    }

    Ok(datamodel)
}

/// Splits the source into top-level blocks with their member lines.
///
/// Member lines are comment-stripped, trimmed, non-empty and never block
/// attributes.
fn read_blocks(source: &str) -> Result<Vec<Block<'_>>, GeneratorError> {
    let mut blocks = Vec::new();
    let mut current: Option<(usize, Block<'_>)> = None;
    let mut docs: Vec<&str> = Vec::new();

    for (idx, raw) in source.lines().enumerate() {
        let number = idx + 1;
        let trimmed = raw.trim();

        if let Some(doc) = trimmed.strip_prefix("///") {
            docs.push(doc.trim());
            continue;
        }

        let text = strip_comment(trimmed).trim_end();
        if text.is_empty() {
            continue;
        }

        if text == "}" {
            if let Some((_, block)) = current.take() {
                blocks.push(block);
                continue;
            }
        }

        if let Some((_, block)) = current.as_mut() {
            let documentation = join_docs(&mut docs);
            if !text.starts_with("@@") {
                block.lines.push(Line {
                    number,
                    text,
                    documentation,
                });
            }
        } else {
            let (block, closed) = open_block(text, number, join_docs(&mut docs))?;
            if closed {
                blocks.push(block);
            } else {
                current = Some((number, block));
            }
        }
    }

    if let Some((number, block)) = current {
        return Err(GeneratorError::ParseError {
            line: number,
            message: format!("block '{}' is never closed", block.name),
        });
    }

    Ok(blocks)
}

/// Parses a block header such as `model User {`.
///
/// Returns the empty block and whether it closed on the same line (`{}`).
fn open_block<'a>(
    text: &str,
    number: usize,
    documentation: Option<String>,
) -> Result<(Block<'a>, bool), GeneratorError> {
    let Some(open) = text.find('{') else {
        return Err(GeneratorError::ParseError {
            line: number,
            message: format!("expected a block declaration, found '{text}'"),
        });
    };

    let mut header = text[..open].split_whitespace();
    let (Some(keyword), Some(name), None) = (header.next(), header.next(), header.next()) else {
        return Err(GeneratorError::ParseError {
            line: number,
            message: format!("malformed block header '{text}'"),
        });
    };

    let kind = match keyword {
        "model" => BlockKind::Model,
        "enum" => BlockKind::Enum,
        "type" => BlockKind::Type,
        "datasource" | "generator" | "view" => BlockKind::Skipped,
        other => {
            return Err(GeneratorError::ParseError {
                line: number,
                message: format!("unknown declaration '{other}'"),
            });
        }
    };

    let closed = text[open + 1..].trim() == "}";
    Ok((
        Block {
            kind,
            name: name.to_string(),
            documentation,
            lines: Vec::new(),
        },
        closed,
    ))
}

fn parse_field(
    line: &Line<'_>,
    models: &HashSet<&str>,
    enums: &HashSet<&str>,
    types: &HashSet<&str>,
) -> Result<Field, GeneratorError> {
    let mut tokens = line.text.split_whitespace();
    let name = tokens.next().unwrap_or_default();
    let Some(type_token) = tokens.next().filter(|t| !t.starts_with('@')) else {
        return Err(GeneratorError::ParseError {
            line: line.number,
            message: format!("field '{name}' has no type"),
        });
    };

    let (base, is_list, is_optional) = split_type_modifiers(type_token);
    let kind = if base.starts_with("Unsupported(") || types.contains(base) {
        FieldKind::Unsupported
    } else if enums.contains(base) {
        FieldKind::Enum
    } else if models.contains(base) {
        FieldKind::Object
    } else {
        FieldKind::Scalar
    };

    Ok(Field {
        name: name.to_string(),
        kind,
        type_name: base.to_string(),
        is_list,
        is_required: !is_optional,
        documentation: line.documentation.clone(),
    })
}

/// Splits `Type[]` / `Type?` into the base name and the list/optional flags.
fn split_type_modifiers(token: &str) -> (&str, bool, bool) {
    if let Some(base) = token.strip_suffix("[]") {
        (base, true, false)
    } else if let Some(base) = token.strip_suffix('?') {
        (base, false, true)
    } else {
        (token, false, false)
    }
}

/// Removes a trailing `//` comment that is not inside a string literal.
fn strip_comment(line: &str) -> &str {
    let mut in_string = false;
    let mut escaped = false;
    let bytes = line.as_bytes();

    for (idx, &b) in bytes.iter().enumerate() {
        match b {
            _ if escaped => escaped = false,
            b'\\' if in_string => escaped = true,
            b'"' => in_string = !in_string,
            b'/' if !in_string && bytes.get(idx + 1) == Some(&b'/') => return &line[..idx],
            _ => {}
        }
    }

    line
}

fn join_docs(docs: &mut Vec<&str>) -> Option<String> {
    if docs.is_empty() {
        return None;
    }
    let joined = docs.join("\n");
    docs.clear();
    Some(joined)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEMA: &str = r#"
datasource db {
  provider = "postgresql"
  url      = env("DATABASE_URL")
}

generator client {
  provider = "prisma-client-js"
}

/// A blog post.
model Post {
  id        String   @id @default(cuid())
  /// Shown in listings.
  title     String   @default("// not a comment")
  status    Status?  @default(DRAFT)
  tags      Tag[]
  author    User     @relation(fields: [authorId], references: [id]) // owner
  authorId  String
  views     BigInt
  location  Unsupported("point")?
  meta      Meta?
  createdAt DateTime @default(now())

  @@index([authorId])
}

model User {
  id    String @id
  posts Post[]
}

model Tag {
  id    Int    @id
  posts Post[]
}

enum Status {
  DRAFT
  PUBLISHED @map("published")
}

type Meta {
  source String
}

model Empty {}
"#;

    fn post(datamodel: &Datamodel) -> &Model {
        datamodel.model("Post").unwrap()
    }

    #[test]
    fn reads_models_and_enums_in_declaration_order() {
        let datamodel = parse_prisma(SCHEMA).unwrap();

        let names: Vec<_> = datamodel.models.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Post", "User", "Tag", "Empty"]);
        assert_eq!(datamodel.enums.len(), 1);
        assert_eq!(datamodel.enums[0].values.len(), 2);
        assert_eq!(datamodel.enums[0].values[1].name, "PUBLISHED");
    }

    #[test]
    fn classifies_field_kinds() {
        let datamodel = parse_prisma(SCHEMA).unwrap();
        let kinds: Vec<_> = post(&datamodel).fields.iter().map(|f| (f.name.as_str(), f.kind)).collect();

        assert_eq!(
            kinds,
            vec![
                ("id", FieldKind::Scalar),
                ("title", FieldKind::Scalar),
                ("status", FieldKind::Enum),
                ("tags", FieldKind::Object),
                ("author", FieldKind::Object),
                ("authorId", FieldKind::Scalar),
                ("views", FieldKind::Scalar),
                ("location", FieldKind::Unsupported),
                ("meta", FieldKind::Unsupported),
                ("createdAt", FieldKind::Scalar),
            ]
        );
    }

    #[test]
    fn reads_list_and_optional_modifiers() {
        let datamodel = parse_prisma(SCHEMA).unwrap();
        let post = post(&datamodel);

        let tags = &post.fields[3];
        assert!(tags.is_list);
        assert!(tags.is_required);
        assert_eq!(tags.type_name, "Tag");

        let status = &post.fields[2];
        assert!(!status.is_list);
        assert!(!status.is_required);
        assert_eq!(status.type_name, "Status");
    }

    #[test]
    fn keeps_documentation() {
        let datamodel = parse_prisma(SCHEMA).unwrap();
        let post = post(&datamodel);

        assert_eq!(post.documentation.as_deref(), Some("A blog post."));
        assert_eq!(post.fields[1].documentation.as_deref(), Some("Shown in listings."));
        assert_eq!(post.fields[0].documentation, None);
    }

    #[test]
    fn ignores_block_attributes_and_trailing_comments() {
        let datamodel = parse_prisma(SCHEMA).unwrap();
        let post = post(&datamodel);

        assert_eq!(post.fields.len(), 10);
        assert!(post.fields.iter().all(|f| !f.name.starts_with("@@")));
    }

    #[test]
    fn empty_inline_block_is_closed() {
        let datamodel = parse_prisma(SCHEMA).unwrap();
        assert!(datamodel.model("Empty").unwrap().fields.is_empty());
    }

    #[test]
    fn unterminated_block_reports_its_line() {
        let err = parse_prisma("\nmodel User {\n  id String\n").unwrap_err();
        assert!(matches!(err, GeneratorError::ParseError { line: 2, .. }));
        assert!(err.to_string().contains("'User' is never closed"));
    }

    #[test]
    fn unknown_declaration_is_rejected() {
        let err = parse_prisma("table User {\n}\n").unwrap_err();
        assert!(matches!(err, GeneratorError::ParseError { line: 1, ref message } if message.contains("'table'")));
    }

    #[test]
    fn field_without_type_is_rejected() {
        let err = parse_prisma("model User {\n  id @id\n}\n").unwrap_err();
        assert!(matches!(err, GeneratorError::ParseError { line: 2, ref message } if message.contains("'id' has no type")));
    }

    #[test]
    fn strip_comment_respects_strings() {
        assert_eq!(strip_comment(r#"a String @default("x//y") // c"#), r#"a String @default("x//y") "#);
        assert_eq!(strip_comment(r#"a String @default("\"//") "#), r#"a String @default("\"//") "#);
        assert_eq!(strip_comment("// whole line"), "");
    }
}
