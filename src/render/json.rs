//! JSON renderer — structured output for tooling integration.
//!
//! Serializes the declaration model directly; field order and tag maps
//! come straight from the extraction result.

use crate::model::{Declaration, Options};
use crate::render::Renderer;
use serde::Serialize;

pub struct JsonRenderer;

#[derive(Serialize)]
struct JsonDoc<'a> {
    title: &'a str,
    declarations: &'a [Declaration],
}

impl Renderer for JsonRenderer {
    fn render(&self, decls: &[Declaration], opts: &Options) -> String {
        let doc = JsonDoc {
            title: &opts.title,
            declarations: decls,
        };
        let mut out =
            serde_json::to_string_pretty(&doc).unwrap_or_else(|_| "{}".to_string());
        out.push('\n');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Field;

    #[test]
    fn emits_valid_json_with_declarations() {
        let decls = vec![Declaration {
            name: "User".to_string(),
            doc: "An account holder.".to_string(),
            fields: vec![Field {
                name: "ID".to_string(),
                type_name: "int".to_string(),
                exported: true,
                ..Field::default()
            }],
            exported: true,
        }];
        let out = JsonRenderer.render(&decls, &Options::default());
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["title"], "Go Structs Documentation");
        assert_eq!(value["declarations"][0]["name"], "User");
        assert_eq!(value["declarations"][0]["fields"][0]["type_name"], "int");
    }
}
