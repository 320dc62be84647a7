use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag};
use tracing::warn;

use super::escape_html;
use crate::domain::error::Result;

/// Markdown-to-safe-HTML capability used by the detail view
pub trait MarkdownRenderer: Send + Sync {
    fn render(&self, text: &str) -> Result<String>;
}

/// CommonMark renderer backed by pulldown-cmark.
///
/// Raw HTML blocks and inline HTML in the source are emitted as escaped
/// text, and links or images with script-capable schemes are neutralized.
#[derive(Debug, Clone)]
pub struct CommonMarkRenderer {
    options: Options,
}

impl Default for CommonMarkRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl CommonMarkRenderer {
    pub fn new() -> Self {
        Self {
            options: Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES,
        }
    }
}

impl MarkdownRenderer for CommonMarkRenderer {
    fn render(&self, text: &str) -> Result<String> {
        let events = Parser::new_ext(text, self.options).map(sanitize_event);

        let mut output = String::with_capacity(text.len() * 3 / 2);
        html::push_html(&mut output, events);
        Ok(output)
    }
}

fn sanitize_event(event: Event<'_>) -> Event<'_> {
    match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Link {
            link_type,
            dest_url: safe_url(dest_url),
            title,
            id,
        }),
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Image {
            link_type,
            dest_url: safe_url(dest_url),
            title,
            id,
        }),
        other => other,
    }
}

fn safe_url(url: CowStr<'_>) -> CowStr<'_> {
    let lowered = url.trim().to_ascii_lowercase();
    let unsafe_scheme = ["javascript:", "vbscript:", "data:"]
        .iter()
        .any(|scheme| lowered.starts_with(scheme));

    if unsafe_scheme {
        CowStr::Borrowed("#")
    } else {
        url
    }
}

/// Render markdown for the detail view, falling back to escaped text.
///
/// `None` means no renderer is available. Renderer failures are logged and
/// never propagated. Empty input yields an empty string.
pub fn render_markdown_or_escape(renderer: Option<&dyn MarkdownRenderer>, text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let Some(renderer) = renderer else {
        return escape_html(text);
    };

    match renderer.render(text) {
        Ok(html) => html,
        Err(err) => {
            warn!(error = %err, "Markdown rendering failed, falling back to escaped text");
            escape_html(text)
        }
    }
}
