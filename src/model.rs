//! Data model for extracted declarations — format-agnostic.

use serde::Serialize;
use std::collections::BTreeMap;

/// One exported record (struct) declaration.
#[derive(Debug, Default, Serialize)]
pub struct Declaration {
    pub name: String,
    /// Leading doc comment, empty when absent.
    pub doc: String,
    /// Fields in source order.
    pub fields: Vec<Field>,
    /// Always true for retained declarations.
    pub exported: bool,
}

/// One named member of a record declaration.
#[derive(Debug, Default, Serialize)]
pub struct Field {
    /// Display name — the declared identifier unless a configured tag
    /// convention overrides it.
    pub name: String,
    /// Normalized type display string, e.g. `map[string]*Contact`.
    pub type_name: String,
    /// Unqualified record name used for cross-references; empty when the
    /// type is not a user-defined record.
    pub raw_type: String,
    pub is_record: bool,
    /// From the field identifier's own casing.
    pub exported: bool,
    /// Trailing comment, empty when absent.
    pub comment: String,
    /// Recognized tag keys → first value segment.
    pub tags: BTreeMap<String, String>,
}

/// Process-wide options, read-only for the duration of one run.
#[derive(Debug, Clone)]
pub struct Options {
    /// Tag convention that supplies field display names (e.g. "json").
    pub field_name_tag: Option<String>,
    /// Documentation title.
    pub title: String,
    /// Render the Exported column.
    pub show_exported: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            field_name_tag: None,
            title: "Go Structs Documentation".to_string(),
            show_exported: true,
        }
    }
}

/// Whitespace cleanup applied once, just before rendering: declaration
/// docs lose surrounding blank space and field comments collapse to a
/// single line. The only mutation the model sees after extraction.
pub fn normalize(decls: &mut [Declaration]) {
    for decl in decls.iter_mut() {
        decl.doc = decl.doc.trim().to_string();
        for field in &mut decl.fields {
            field.comment = field.comment.trim().replace('\n', " ");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_trims_doc_and_flattens_comments() {
        let mut decls = vec![Declaration {
            name: "User".to_string(),
            doc: "  account holder\n".to_string(),
            fields: vec![Field {
                comment: " first\nsecond ".to_string(),
                ..Field::default()
            }],
            exported: true,
        }];
        normalize(&mut decls);
        assert_eq!(decls[0].doc, "account holder");
        assert_eq!(decls[0].fields[0].comment, "first second");
    }
}
