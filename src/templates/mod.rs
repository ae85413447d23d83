//! Embedded blog templates using the Tera template engine
//!
//! All templates are compiled into the binary; there is no theme
//! directory to resolve at run time.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

/// Template renderer with the embedded blog templates
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Rich-text content arrives pre-escaped from the renderer; plain
        // fields go through the escape filter in the templates instead.
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("blog/layout.html")),
            ("index.html", include_str!("blog/index.html")),
            ("post.html", include_str!("blog/post.html")),
            ("fallback.html", include_str!("blog/fallback.html")),
            (
                "partials/header.html",
                include_str!("blog/partials/header.html"),
            ),
        ])?;

        tera.register_filter("escape_html", escape_html_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Tera filter: escape HTML special characters
fn escape_html_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("escape_html", "value", String, value);
    Ok(tera::Value::String(crate::helpers::html::html_escape(&s)))
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub description: String,
    pub root: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PostPageData {
    pub title: String,
    pub author: String,
    pub date: String,
    pub banner_url: String,
    pub read_time: String,
    pub sections: Vec<SectionData>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SectionData {
    pub heading: String,
    pub body_html: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site() -> SiteData {
        SiteData {
            title: "spacetraveling".to_string(),
            description: String::new(),
            root: "/".to_string(),
        }
    }

    #[test]
    fn test_renderer_loads_templates() {
        assert!(TemplateRenderer::new().is_ok());
    }

    #[test]
    fn test_render_empty_index() {
        let renderer = TemplateRenderer::new().unwrap();
        let mut context = Context::new();
        context.insert("site", &site());
        context.insert("posts", &Vec::<crate::content::PostSummary>::new());
        context.insert("next_link", "");

        let html = renderer.render("index.html", &context).unwrap();
        assert!(html.contains("spacetraveling"));
        assert!(!html.contains("load-more"));
    }

    #[test]
    fn test_render_fallback() {
        let renderer = TemplateRenderer::new().unwrap();
        let mut context = Context::new();
        context.insert("site", &site());

        let html = renderer.render("fallback.html", &context).unwrap();
        assert!(html.contains("Loading"));
    }
}
