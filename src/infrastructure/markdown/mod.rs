// ============================================================
// MARKDOWN INFRASTRUCTURE
// ============================================================
// Preview stripping, HTML escaping and the detail-view renderer

mod renderer;
mod text;

pub use renderer::{render_markdown_or_escape, CommonMarkRenderer, MarkdownRenderer};
pub use text::{escape_html, strip_markdown_markup};
