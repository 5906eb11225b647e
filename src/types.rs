//! Type expressions and their resolution.
//!
//! The scanner parses each field's declared type into a [`TypeExpr`];
//! [`resolve`] turns that into the display string, raw type name, and
//! record flag carried by the model.

use std::collections::HashSet;

/// Closed set of type-expression shapes handled by the resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    /// `T`
    Ident(String),
    /// `*X`
    Pointer(Box<TypeExpr>),
    /// `[]X` — sized arrays fold into this case
    Slice(Box<TypeExpr>),
    /// `map[K]V`
    Map(Box<TypeExpr>, Box<TypeExpr>),
    /// `pkg.T`
    Qualified(String, String),
    /// Anything else, tagged with its syntactic kind
    /// ("func", "chan", "interface", "struct", "unknown").
    Other(&'static str),
}

/// Resolution result for one type expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub display: String,
    pub raw_name: String,
    pub is_record: bool,
}

/// Resolve a type expression against the type names declared in the same
/// source unit.
///
/// Total and pure: wrapper cases recurse on strictly smaller expressions
/// and identifiers never recurse, so self-referential record types cannot
/// loop. Qualified types are never treated as local records — the
/// resolver has no visibility into other packages and must not fabricate
/// cross-references. Built-in value types are simply absent from
/// `local_types`.
pub fn resolve(expr: &TypeExpr, local_types: &HashSet<String>) -> Resolved {
    match expr {
        TypeExpr::Ident(name) => Resolved {
            display: name.clone(),
            raw_name: name.clone(),
            is_record: local_types.contains(name),
        },
        TypeExpr::Pointer(inner) => {
            let base = resolve(inner, local_types);
            Resolved {
                display: format!("*{}", base.display),
                raw_name: base.raw_name,
                is_record: base.is_record,
            }
        }
        TypeExpr::Slice(elem) => {
            let base = resolve(elem, local_types);
            Resolved {
                display: format!("[]{}", base.display),
                raw_name: base.raw_name,
                is_record: base.is_record,
            }
        }
        TypeExpr::Map(key, value) => {
            let key = resolve(key, local_types);
            let value = resolve(value, local_types);
            Resolved {
                display: format!("map[{}]{}", key.display, value.display),
                raw_name: value.raw_name,
                is_record: value.is_record,
            }
        }
        TypeExpr::Qualified(pkg, name) => Resolved {
            display: format!("{}.{}", pkg, name),
            raw_name: name.clone(),
            is_record: false,
        },
        TypeExpr::Other(kind) => Resolved {
            display: format!("<{} type>", kind),
            raw_name: String::new(),
            is_record: false,
        },
    }
}
