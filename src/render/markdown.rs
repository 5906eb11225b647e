//! GitHub-flavored markdown renderer — one table per declaration.

use crate::model::{Declaration, Field, Options};
use crate::render::{anchor, Renderer};

pub struct MarkdownRenderer;

impl Renderer for MarkdownRenderer {
    fn render(&self, decls: &[Declaration], opts: &Options) -> String {
        let mut out = String::new();
        out.push_str(&format!("# {}\n\n", opts.title));

        if !decls.is_empty() {
            out.push_str("## Index\n\n");
            for decl in decls {
                out.push_str(&format!("* [{}](#{})\n", decl.name, anchor(&decl.name)));
            }
            out.push('\n');
        }

        for decl in decls {
            out.push_str(&render_declaration(decl, opts));
            out.push('\n');
        }

        out
    }
}

fn render_declaration(decl: &Declaration, opts: &Options) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!("## {}\n", decl.name));

    if !decl.doc.is_empty() {
        lines.push(decl.doc.clone());
        lines.push(String::new());
    }

    if opts.show_exported {
        lines.push("| Field | Type | Exported | Comment |".to_string());
        lines.push("|-------|------|----------|---------|".to_string());
    } else {
        lines.push("| Field | Type | Comment |".to_string());
        lines.push("|-------|------|---------|".to_string());
    }

    for field in &decl.fields {
        lines.push(render_field_row(field, opts.show_exported));
    }

    lines.push(String::new());
    lines.join("\n")
}

fn render_field_row(field: &Field, show_exported: bool) -> String {
    let ty = render_type(field);
    if show_exported {
        let exported = if field.exported { "Yes" } else { "No" };
        format!(
            "| {} | {} | {} | {} |",
            field.name, ty, exported, field.comment
        )
    } else {
        format!("| {} | {} | {} |", field.name, ty, field.comment)
    }
}

/// A field whose type is a sibling record links to that record's heading;
/// everything else renders as plain text.
fn render_type(field: &Field) -> String {
    if field.is_record {
        format!("[{}](#{})", field.type_name, anchor(&field.raw_type))
    } else {
        field.type_name.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(name: &str, ty: &str) -> Field {
        Field {
            name: name.to_string(),
            type_name: ty.to_string(),
            exported: true,
            ..Field::default()
        }
    }

    fn sample() -> Vec<Declaration> {
        vec![Declaration {
            name: "User".to_string(),
            doc: "An account holder.".to_string(),
            fields: vec![
                field("ID", "int"),
                Field {
                    name: "Home".to_string(),
                    type_name: "*Address".to_string(),
                    raw_type: "Address".to_string(),
                    is_record: true,
                    exported: true,
                    comment: "primary address".to_string(),
                    ..Field::default()
                },
            ],
            exported: true,
        }]
    }

    #[test]
    fn renders_title_index_and_table() {
        let out = MarkdownRenderer.render(&sample(), &Options::default());
        assert!(out.starts_with("# Go Structs Documentation\n"));
        assert!(out.contains("* [User](#user)"));
        assert!(out.contains("## User\n"));
        assert!(out.contains("An account holder."));
        assert!(out.contains("| Field | Type | Exported | Comment |"));
        assert!(out.contains("| ID | int | Yes |  |"));
    }

    #[test]
    fn record_fields_link_to_their_declaration() {
        let out = MarkdownRenderer.render(&sample(), &Options::default());
        assert!(out.contains("| Home | [*Address](#address) | Yes | primary address |"));
    }

    #[test]
    fn exported_column_can_be_hidden() {
        let opts = Options {
            show_exported: false,
            ..Options::default()
        };
        let out = MarkdownRenderer.render(&sample(), &opts);
        assert!(out.contains("| Field | Type | Comment |"));
        assert!(!out.contains("| Exported |"));
        assert!(out.contains("| ID | int |  |"));
    }

    #[test]
    fn unexported_fields_render_as_no() {
        let decls = vec![Declaration {
            name: "User".to_string(),
            fields: vec![Field {
                name: "age".to_string(),
                type_name: "int".to_string(),
                exported: false,
                ..Field::default()
            }],
            exported: true,
            ..Declaration::default()
        }];
        let out = MarkdownRenderer.render(&decls, &Options::default());
        assert!(out.contains("| age | int | No |  |"));
    }

    #[test]
    fn empty_extraction_still_has_title() {
        let out = MarkdownRenderer.render(&[], &Options::default());
        assert_eq!(out, "# Go Structs Documentation\n\n");
    }
}
