//! Declaration extraction — walks parsed units and assembles the model.

use crate::model::{Declaration, Field, Options};
use crate::parser::{DeclBody, Unit};
use crate::tag;
use crate::types;
use std::collections::BTreeMap;

/// Extract every exported record declaration from the given units, in
/// unit order.
///
/// Retained: named record declarations whose identifier starts with an
/// upper-case letter. Unexported fields stay in the model, marked by
/// their own casing — whether they show up is a rendering decision.
/// Embedded entries (no identifier to key documentation on) are skipped;
/// a record with no fields yields an empty field sequence.
pub fn extract(units: &[Unit], opts: &Options) -> Vec<Declaration> {
    let mut decls = Vec::new();

    for unit in units {
        for decl in &unit.decls {
            let DeclBody::Record(entries) = &decl.body else {
                continue;
            };
            if !is_exported(&decl.name) {
                continue;
            }

            let mut fields = Vec::new();
            for entry in entries {
                if entry.names.is_empty() {
                    continue;
                }
                let resolved = types::resolve(&entry.ty, &unit.local_types);
                let tags = tag::parse_tag(&entry.tag);
                // Every identifier of a multi-name entry becomes its own
                // field with the shared type expression.
                for name in &entry.names {
                    fields.push(Field {
                        name: display_name(name, &tags, opts),
                        type_name: resolved.display.clone(),
                        raw_type: if resolved.is_record {
                            resolved.raw_name.clone()
                        } else {
                            String::new()
                        },
                        is_record: resolved.is_record,
                        exported: is_exported(name),
                        comment: entry.comment.clone(),
                        tags: tags.clone(),
                    });
                }
            }

            decls.push(Declaration {
                name: decl.name.clone(),
                doc: decl.doc.clone(),
                fields,
                exported: true,
            });
        }
    }

    decls
}

/// Exported-name convention: the identifier starts upper-case.
fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}

/// The configured convention overrides the declared identifier only when
/// its tag is present with a non-empty value.
fn display_name(declared: &str, tags: &BTreeMap<String, String>, opts: &Options) -> String {
    if let Some(ref key) = opts.field_name_tag {
        if let Some(value) = tags.get(key) {
            if !value.is_empty() {
                return value.clone();
            }
        }
    }
    declared.to_string()
}
