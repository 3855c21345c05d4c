/*
 * Responsibility
 * - HTML page rendering seam used by RequestContext::handle_error
 * - Template names for error pages are the decimal status code ("404", "500", ...)
 * - BasicPageRenderer is the built-in fallback; a template engine can plug in behind PageRenderer
 */
use serde::Serialize;
use thiserror::Error;

use crate::services::identity::SignedInUser;

/// Data handed to a page template.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PageModel {
    pub title: String,
    // Only filled outside production
    pub error_msg: Option<String>,
    pub is_signed_in: bool,
    pub signed_in_user: Option<SignedInUser>,
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template not found: {0}")]
    TemplateNotFound(String),
}

pub trait PageRenderer: Send + Sync {
    fn render(&self, template: &str, model: &PageModel) -> Result<String, RenderError>;
}

/// Minimal renderer that only knows status-code pages.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicPageRenderer;

impl PageRenderer for BasicPageRenderer {
    fn render(&self, template: &str, model: &PageModel) -> Result<String, RenderError> {
        let status: u16 = template
            .parse()
            .map_err(|_| RenderError::TemplateNotFound(template.to_string()))?;

        let title = escape_html(&model.title);
        let detail = model
            .error_msg
            .as_deref()
            .map(|msg| format!("\n<pre class=\"error\">{}</pre>", escape_html(msg)))
            .unwrap_or_default();

        Ok(format!(
            "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{title}</title></head>\n\
             <body>\n<h1>{status}</h1>\n<p>{title}</p>{detail}\n</body>\n</html>\n"
        ))
    }
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
