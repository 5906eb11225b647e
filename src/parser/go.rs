//! Go declaration scanner — line-by-line state machine.
//!
//! Produces one syntax unit per source file: the type declarations, their
//! doc comments, and each record's field entries. Declaration syntax
//! only — function bodies, grouped `type (...)` blocks, and expressions
//! are not parsed; brace-opening constructs other than struct bodies are
//! skipped by depth counting.

use crate::parser::SourceError;
use crate::types::TypeExpr;
use regex::Regex;
use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;

static RE_PACKAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^package\s+[A-Za-z_][A-Za-z0-9_]*").unwrap());

static RE_COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^//\s?(.*)$").unwrap());

static RE_STRUCT_EMPTY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^type\s+([A-Za-z_][A-Za-z0-9_]*)\s+struct\s*\{\s*\}\s*$").unwrap()
});

static RE_STRUCT_OPEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^type\s+([A-Za-z_][A-Za-z0-9_]*)\s+struct\s*\{\s*$").unwrap()
});

static RE_STRUCT_INLINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^type\s+([A-Za-z_][A-Za-z0-9_]*)\s+struct\s*\{(.+)\}\s*$").unwrap()
});

static RE_TYPE_OTHER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^type\s+([A-Za-z_][A-Za-z0-9_]*)\b").unwrap());

// Identifier list and shared type expression of one field entry.
static RE_FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z_][A-Za-z0-9_]*(?:\s*,\s*[A-Za-z_][A-Za-z0-9_]*)*)\s+(\S.*)$").unwrap()
});

static RE_IDENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

static RE_QUALIFIED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z_][A-Za-z0-9_]*(?:\.[A-Za-z_][A-Za-z0-9_]*)*)\.([A-Za-z_][A-Za-z0-9_]*)$")
        .unwrap()
});

// Sized array: the length is dropped and the element treated as a slice.
static RE_ARRAY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[\s*([0-9]+|\.\.\.|[A-Za-z_][A-Za-z0-9_.]*)\s*\](.+)$").unwrap()
});

/// One parsed source file.
#[derive(Debug)]
pub struct Unit {
    /// Every type name declared in this unit, records and otherwise —
    /// the resolution context for bare identifiers.
    pub local_types: HashSet<String>,
    pub decls: Vec<TypeDecl>,
}

/// A `type` declaration found in a unit.
#[derive(Debug)]
pub struct TypeDecl {
    pub name: String,
    /// Leading doc comment text, empty when absent.
    pub doc: String,
    pub body: DeclBody,
}

#[derive(Debug)]
pub enum DeclBody {
    /// `type X struct { ... }`
    Record(Vec<FieldEntry>),
    /// Alias, interface, or any other non-struct type declaration.
    NotRecord,
}

/// One entry of a record's field list, before expansion. A single entry
/// may declare several identifiers sharing one type expression; embedded
/// fields have an empty identifier list.
#[derive(Debug)]
pub struct FieldEntry {
    pub names: Vec<String>,
    pub ty: TypeExpr,
    /// Raw tag text without backticks, empty when absent.
    pub tag: String,
    /// Trailing comment, empty when absent.
    pub comment: String,
}

struct OpenRecord {
    name: String,
    doc: String,
    entries: Vec<FieldEntry>,
    depth: i32,
    opened_at: usize,
}

/// Parse one Go source file into a syntax unit.
///
/// Parse failures are structural only: a missing package clause or a
/// record body left open at end of file. Unusual type expressions are
/// not errors — they surface as the resolver's fallback variant.
pub fn parse(input: &str, path: &Path) -> Result<Unit, SourceError> {
    let mut decls: Vec<TypeDecl> = Vec::new();
    let mut local_types: HashSet<String> = HashSet::new();
    let mut doc: Vec<String> = Vec::new();
    let mut record: Option<OpenRecord> = None;
    let mut skip: i32 = 0;
    let mut saw_package = false;

    for (idx, raw_line) in input.lines().enumerate() {
        let lineno = idx + 1;
        let line = raw_line.trim();

        // Inside a brace-opening construct we don't model (interface
        // body, function body, composite literal).
        if skip > 0 {
            let (code, _) = split_comment(line);
            skip += brace_delta(code.trim());
            continue;
        }

        // Inside a struct body.
        if record.is_some() {
            let (code, comment) = split_comment(line);
            let (code, tag) = split_tag(&code);
            let code = code.trim().to_string();
            let delta = brace_delta(&code);

            let mut closed = false;
            if let Some(rec) = record.as_mut() {
                if rec.depth == 1 && !code.is_empty() && !code.starts_with('}') {
                    if let Some(entry) = parse_field_entry(&code, &tag, &comment) {
                        rec.entries.push(entry);
                    }
                }
                rec.depth += delta;
                closed = rec.depth <= 0;
            }
            if closed {
                if let Some(rec) = record.take() {
                    decls.push(TypeDecl {
                        name: rec.name,
                        doc: rec.doc,
                        body: DeclBody::Record(rec.entries),
                    });
                }
            }
            continue;
        }

        // The package clause must precede any declaration.
        if !saw_package {
            if line.is_empty() || RE_COMMENT.is_match(line) {
                continue;
            }
            if RE_PACKAGE.is_match(line) {
                saw_package = true;
                continue;
            }
            return Err(SourceError::Parse {
                path: path.to_path_buf(),
                line: lineno,
                message: "expected package clause".to_string(),
            });
        }

        // Doc comments attach only when directly adjacent to a
        // declaration; blank or unrelated lines detach them.
        if line.is_empty() {
            doc.clear();
            continue;
        }
        if let Some(caps) = RE_COMMENT.captures(line) {
            doc.push(caps[1].to_string());
            continue;
        }

        if let Some(caps) = RE_STRUCT_EMPTY.captures(line) {
            let name = caps[1].to_string();
            local_types.insert(name.clone());
            decls.push(TypeDecl {
                name,
                doc: take_doc(&mut doc),
                body: DeclBody::Record(Vec::new()),
            });
            continue;
        }

        if let Some(caps) = RE_STRUCT_OPEN.captures(line) {
            let name = caps[1].to_string();
            local_types.insert(name.clone());
            record = Some(OpenRecord {
                name,
                doc: take_doc(&mut doc),
                entries: Vec::new(),
                depth: 1,
                opened_at: lineno,
            });
            continue;
        }

        if let Some(caps) = RE_STRUCT_INLINE.captures(line) {
            let name = caps[1].to_string();
            local_types.insert(name.clone());
            let entries = caps[2]
                .split(';')
                .filter_map(|piece| {
                    let (code, comment) = split_comment(piece.trim());
                    let (code, tag) = split_tag(&code);
                    parse_field_entry(code.trim(), &tag, &comment)
                })
                .collect();
            decls.push(TypeDecl {
                name,
                doc: take_doc(&mut doc),
                body: DeclBody::Record(entries),
            });
            continue;
        }

        if let Some(caps) = RE_TYPE_OTHER.captures(line) {
            let name = caps[1].to_string();
            local_types.insert(name.clone());
            decls.push(TypeDecl {
                name,
                doc: take_doc(&mut doc),
                body: DeclBody::NotRecord,
            });
            let (code, _) = split_comment(line);
            let delta = brace_delta(code.trim());
            if delta > 0 {
                skip = delta;
            }
            continue;
        }

        // Any other declaration (func, var, const, import) detaches
        // pending docs; skip its body if it opens one.
        doc.clear();
        let (code, _) = split_comment(line);
        let delta = brace_delta(code.trim());
        if delta > 0 {
            skip = delta;
        }
    }

    if let Some(rec) = record {
        return Err(SourceError::Parse {
            path: path.to_path_buf(),
            line: rec.opened_at,
            message: format!("unterminated struct body for {}", rec.name),
        });
    }

    Ok(Unit { local_types, decls })
}

// -- Field entries -------------------------------------------------------

/// Parse one field-list line into an entry. A bare type with no
/// identifier list is an embedded field (empty name list).
fn parse_field_entry(code: &str, tag: &str, comment: &str) -> Option<FieldEntry> {
    if code.is_empty() {
        return None;
    }
    if let Some(caps) = RE_FIELD.captures(code) {
        let names = caps[1].split(',').map(|n| n.trim().to_string()).collect();
        Some(FieldEntry {
            names,
            ty: parse_type(caps[2].trim()),
            tag: tag.to_string(),
            comment: comment.to_string(),
        })
    } else {
        Some(FieldEntry {
            names: Vec::new(),
            ty: parse_type(code),
            tag: tag.to_string(),
            comment: comment.to_string(),
        })
    }
}

// -- Type expressions ----------------------------------------------------

/// Recursive descent over the declared type text. Total: anything
/// outside the handled grammar becomes [`TypeExpr::Other`].
pub fn parse_type(s: &str) -> TypeExpr {
    let s = s.trim();
    if let Some(rest) = s.strip_prefix('*') {
        return TypeExpr::Pointer(Box::new(parse_type(rest)));
    }
    if let Some(rest) = s.strip_prefix("[]") {
        return TypeExpr::Slice(Box::new(parse_type(rest)));
    }
    if let Some(rest) = s.strip_prefix("map[") {
        return parse_map(rest);
    }
    if let Some(caps) = RE_ARRAY.captures(s) {
        return TypeExpr::Slice(Box::new(parse_type(&caps[2])));
    }
    if is_keyword(s, "func") {
        return TypeExpr::Other("func");
    }
    if is_keyword(s, "chan") || s.starts_with("<-chan") {
        return TypeExpr::Other("chan");
    }
    if is_keyword(s, "interface") {
        return TypeExpr::Other("interface");
    }
    if is_keyword(s, "struct") {
        return TypeExpr::Other("struct");
    }
    if let Some(caps) = RE_QUALIFIED.captures(s) {
        return TypeExpr::Qualified(caps[1].to_string(), caps[2].to_string());
    }
    if RE_IDENT.is_match(s) {
        return TypeExpr::Ident(s.to_string());
    }
    TypeExpr::Other("unknown")
}

/// Key and value of `map[K]V`, honoring nested brackets in the key.
fn parse_map(rest: &str) -> TypeExpr {
    let mut depth = 1usize;
    for (i, c) in rest.char_indices() {
        match c {
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    let key = &rest[..i];
                    let value = &rest[i + 1..];
                    if key.trim().is_empty() || value.trim().is_empty() {
                        return TypeExpr::Other("unknown");
                    }
                    return TypeExpr::Map(Box::new(parse_type(key)), Box::new(parse_type(value)));
                }
            }
            _ => {}
        }
    }
    TypeExpr::Other("unknown")
}

/// True when `s` starts with the keyword followed by a non-identifier
/// character (or nothing).
fn is_keyword(s: &str, kw: &str) -> bool {
    match s.strip_prefix(kw) {
        Some("") => true,
        Some(rest) => !rest
            .chars()
            .next()
            .is_some_and(|c| c.is_alphanumeric() || c == '_'),
        None => false,
    }
}

// -- Line splitting ------------------------------------------------------

/// Split a line at the first `//` outside backticks and string quotes.
/// Returns the code part and the trimmed comment text.
fn split_comment(line: &str) -> (String, String) {
    let bytes = line.as_bytes();
    let mut in_backtick = false;
    let mut in_quote = false;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'`' if !in_quote => in_backtick = !in_backtick,
            b'"' if !in_backtick => in_quote = !in_quote,
            b'/' if !in_backtick && !in_quote && i + 1 < bytes.len() && bytes[i + 1] == b'/' => {
                return (line[..i].to_string(), line[i + 2..].trim().to_string());
            }
            _ => {}
        }
        i += 1;
    }
    (line.to_string(), String::new())
}

/// Split out a backtick-delimited tag. Returns the code with the tag
/// removed and the tag's inner text.
fn split_tag(line: &str) -> (String, String) {
    if let Some(start) = line.find('`') {
        if let Some(len) = line[start + 1..].find('`') {
            let tag = line[start + 1..start + 1 + len].to_string();
            let mut code = String::with_capacity(line.len() - len);
            code.push_str(&line[..start]);
            code.push_str(&line[start + len + 2..]);
            return (code, tag);
        }
    }
    (line.to_string(), String::new())
}

fn brace_delta(code: &str) -> i32 {
    code.matches('{').count() as i32 - code.matches('}').count() as i32
}

fn take_doc(doc: &mut Vec<String>) -> String {
    let text = doc.join("\n");
    doc.clear();
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_ok(input: &str) -> Unit {
        parse(input, Path::new("test.go")).unwrap()
    }

    #[test]
    fn simple_struct() {
        let unit = parse_ok(
            "package models\n\n// User is an account holder.\ntype User struct {\n\tID int `json:\"id\"`\n\tName string `json:\"name\"` // display name\n}\n",
        );
        assert_eq!(unit.decls.len(), 1);
        let decl = &unit.decls[0];
        assert_eq!(decl.name, "User");
        assert_eq!(decl.doc, "User is an account holder.");
        let DeclBody::Record(entries) = &decl.body else {
            panic!("expected record body");
        };
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].names, vec!["ID"]);
        assert_eq!(entries[0].tag, "json:\"id\"");
        assert_eq!(entries[1].comment, "display name");
    }

    #[test]
    fn multi_name_entry_shares_type_and_tag() {
        let unit = parse_ok(
            "package models\ntype Address struct {\n\tStreet, City string `json:\"loc\"`\n}\n",
        );
        let DeclBody::Record(entries) = &unit.decls[0].body else {
            panic!("expected record body");
        };
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].names, vec!["Street", "City"]);
        assert_eq!(entries[0].ty, TypeExpr::Ident("string".to_string()));
        assert_eq!(entries[0].tag, "json:\"loc\"");
    }

    #[test]
    fn embedded_field_has_no_names() {
        let unit = parse_ok("package models\ntype User struct {\n\t*Address\n\tBase\n}\n");
        let DeclBody::Record(entries) = &unit.decls[0].body else {
            panic!("expected record body");
        };
        assert_eq!(entries.len(), 2);
        assert!(entries[0].names.is_empty());
        assert!(entries[1].names.is_empty());
    }

    #[test]
    fn empty_struct_body() {
        let unit = parse_ok("package models\ntype Empty struct {}\n");
        let DeclBody::Record(entries) = &unit.decls[0].body else {
            panic!("expected record body");
        };
        assert!(entries.is_empty());
    }

    #[test]
    fn inline_struct_body() {
        let unit = parse_ok("package models\ntype Point struct { X, Y int }\n");
        let DeclBody::Record(entries) = &unit.decls[0].body else {
            panic!("expected record body");
        };
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].names, vec!["X", "Y"]);
    }

    #[test]
    fn non_struct_declarations_recorded_as_types() {
        let unit = parse_ok(
            "package models\ntype Celsius float64\ntype Reader interface {\n\tRead() error\n}\ntype User struct {\n\tTemp Celsius\n}\n",
        );
        assert_eq!(unit.decls.len(), 3);
        assert!(matches!(unit.decls[0].body, DeclBody::NotRecord));
        assert!(matches!(unit.decls[1].body, DeclBody::NotRecord));
        assert!(unit.local_types.contains("Celsius"));
        assert!(unit.local_types.contains("Reader"));
        assert!(unit.local_types.contains("User"));
    }

    #[test]
    fn blank_line_detaches_doc_comment() {
        let unit = parse_ok("package models\n// stray text\n\ntype User struct {}\n");
        assert_eq!(unit.decls[0].doc, "");
    }

    #[test]
    fn function_bodies_are_skipped() {
        let unit = parse_ok(
            "package models\nfunc helper() {\n\tx := map[string]int{\"a\": 1}\n\t_ = x\n}\ntype User struct {\n\tID int\n}\n",
        );
        assert_eq!(unit.decls.len(), 1);
        assert_eq!(unit.decls[0].name, "User");
    }

    #[test]
    fn missing_package_clause_is_a_parse_error() {
        let err = parse("type User struct {}\n", Path::new("bad.go")).unwrap_err();
        assert!(matches!(err, SourceError::Parse { line: 1, .. }));
    }

    #[test]
    fn unterminated_struct_is_a_parse_error() {
        let err = parse(
            "package models\ntype User struct {\n\tID int\n",
            Path::new("bad.go"),
        )
        .unwrap_err();
        let SourceError::Parse { line, message, .. } = err else {
            panic!("expected parse error");
        };
        assert_eq!(line, 2);
        assert!(message.contains("User"));
    }

    #[test]
    fn nested_literal_fields_fall_back() {
        let unit = parse_ok(
            "package models\ntype Outer struct {\n\tInner struct {\n\t\tX int\n\t}\n\tAfter int\n}\n",
        );
        let DeclBody::Record(entries) = &unit.decls[0].body else {
            panic!("expected record body");
        };
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].ty, TypeExpr::Other("struct"));
        assert_eq!(entries[1].names, vec!["After"]);
    }

    // -- type expression grammar --

    #[test]
    fn type_grammar_shapes() {
        assert_eq!(parse_type("int"), TypeExpr::Ident("int".to_string()));
        assert_eq!(
            parse_type("*Address"),
            TypeExpr::Pointer(Box::new(TypeExpr::Ident("Address".to_string())))
        );
        assert_eq!(
            parse_type("[]byte"),
            TypeExpr::Slice(Box::new(TypeExpr::Ident("byte".to_string())))
        );
        assert_eq!(
            parse_type("[8]byte"),
            TypeExpr::Slice(Box::new(TypeExpr::Ident("byte".to_string())))
        );
        assert_eq!(
            parse_type("map[string]Contact"),
            TypeExpr::Map(
                Box::new(TypeExpr::Ident("string".to_string())),
                Box::new(TypeExpr::Ident("Contact".to_string()))
            )
        );
        assert_eq!(
            parse_type("time.Time"),
            TypeExpr::Qualified("time".to_string(), "Time".to_string())
        );
    }

    #[test]
    fn type_grammar_nesting() {
        assert_eq!(
            parse_type("map[string][]*Contact"),
            TypeExpr::Map(
                Box::new(TypeExpr::Ident("string".to_string())),
                Box::new(TypeExpr::Slice(Box::new(TypeExpr::Pointer(Box::new(
                    TypeExpr::Ident("Contact".to_string())
                )))))
            )
        );
    }

    #[test]
    fn type_grammar_fallbacks() {
        assert_eq!(parse_type("func(int) error"), TypeExpr::Other("func"));
        assert_eq!(parse_type("chan int"), TypeExpr::Other("chan"));
        assert_eq!(parse_type("<-chan int"), TypeExpr::Other("chan"));
        assert_eq!(parse_type("interface{}"), TypeExpr::Other("interface"));
        assert_eq!(parse_type("struct{ X int }"), TypeExpr::Other("struct"));
        assert_eq!(parse_type("List[int]"), TypeExpr::Other("unknown"));
        // "channel" is an ordinary identifier, not the chan keyword
        assert_eq!(parse_type("channel"), TypeExpr::Ident("channel".to_string()));
    }
}
