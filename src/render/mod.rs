//! Renderer module — trait-based format dispatch.

pub mod html;
pub mod json;
pub mod markdown;

use crate::model::{Declaration, Options};
use anyhow::{anyhow, Result};

/// Trait for rendering extracted declarations into one output format.
pub trait Renderer {
    fn render(&self, decls: &[Declaration], opts: &Options) -> String;
}

/// Create a renderer for the given format name.
pub fn create_renderer(format: &str) -> Result<Box<dyn Renderer>> {
    match format {
        "markdown" | "md" => Ok(Box::new(markdown::MarkdownRenderer)),
        "html" => Ok(Box::new(html::HtmlRenderer)),
        "json" => Ok(Box::new(json::JsonRenderer)),
        _ => Err(anyhow!(
            "unknown format: {}. Use markdown, html, or json",
            format
        )),
    }
}

/// GitHub-style heading anchor for a declaration name: lowercase, keep
/// alphanumerics and hyphens, spaces become hyphens.
pub fn anchor(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.to_lowercase().chars() {
        if c.is_alphanumeric() || c == '-' {
            slug.push(c);
        } else if c == ' ' {
            slug.push('-');
        }
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchor_lowercases_identifiers() {
        assert_eq!(anchor("Address"), "address");
        assert_eq!(anchor("HTTPServer"), "httpserver");
    }

    #[test]
    fn anchor_strips_punctuation() {
        assert_eq!(anchor("User_Profile"), "userprofile");
    }

    #[test]
    fn unknown_format_is_an_error() {
        assert!(create_renderer("xml").is_err());
        assert!(create_renderer("markdown").is_ok());
        assert!(create_renderer("md").is_ok());
    }
}
