//! HTML renderer — standalone page with semantic markup.

use crate::model::{Declaration, Field, Options};
use crate::render::{anchor, Renderer};

pub struct HtmlRenderer;

impl Renderer for HtmlRenderer {
    fn render(&self, decls: &[Declaration], opts: &Options) -> String {
        let mut out = String::new();

        out.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
        out.push_str("<meta charset=\"utf-8\">\n");
        out.push_str(&format!("<title>{}</title>\n", html_escape(&opts.title)));
        out.push_str("<style>\n");
        out.push_str("body { font-family: system-ui, sans-serif; max-width: 48em; margin: 2em auto; padding: 0 1em; }\n");
        out.push_str("code { background: #f4f4f4; padding: 0.15em 0.3em; border-radius: 3px; }\n");
        out.push_str("table { border-collapse: collapse; width: 100%; }\n");
        out.push_str("th, td { border: 1px solid #ddd; padding: 0.4em 0.6em; text-align: left; }\n");
        out.push_str("th { background: #f4f4f4; }\n");
        out.push_str("</style>\n");
        out.push_str("</head>\n<body>\n");

        out.push_str(&format!("<h1>{}</h1>\n", html_escape(&opts.title)));

        if !decls.is_empty() {
            out.push_str("<h2>Index</h2>\n<ul>\n");
            for decl in decls {
                out.push_str(&format!(
                    "  <li><a href=\"#{}\">{}</a></li>\n",
                    anchor(&decl.name),
                    html_escape(&decl.name)
                ));
            }
            out.push_str("</ul>\n");
        }

        for decl in decls {
            out.push_str(&render_declaration_html(decl, opts));
        }

        out.push_str("</body>\n</html>\n");
        out
    }
}

fn render_declaration_html(decl: &Declaration, opts: &Options) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "<h2 id=\"{}\">{}</h2>\n",
        anchor(&decl.name),
        html_escape(&decl.name)
    ));

    if !decl.doc.is_empty() {
        out.push_str(&format!("<p>{}</p>\n", html_escape(&decl.doc)));
    }

    out.push_str("<table>\n<tr><th>Field</th><th>Type</th>");
    if opts.show_exported {
        out.push_str("<th>Exported</th>");
    }
    out.push_str("<th>Comment</th></tr>\n");

    for field in &decl.fields {
        out.push_str("<tr>");
        out.push_str(&format!("<td>{}</td>", html_escape(&field.name)));
        out.push_str(&format!("<td>{}</td>", render_type_html(field)));
        if opts.show_exported {
            out.push_str(&format!(
                "<td>{}</td>",
                if field.exported { "Yes" } else { "No" }
            ));
        }
        out.push_str(&format!("<td>{}</td>", html_escape(&field.comment)));
        out.push_str("</tr>\n");
    }

    out.push_str("</table>\n");
    out
}

fn render_type_html(field: &Field) -> String {
    if field.is_record {
        format!(
            "<a href=\"#{}\"><code>{}</code></a>",
            anchor(&field.raw_type),
            html_escape(&field.type_name)
        )
    } else {
        format!("<code>{}</code>", html_escape(&field.type_name))
    }
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
