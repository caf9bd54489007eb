//! HTML page templates.
//!
//! Templates live in `templates/` and use Jinja2 syntax. They are embedded
//! at compile time; `.html` names are rendered with HTML auto-escaping.

pub mod engine;

pub use engine::TemplateEngine;
