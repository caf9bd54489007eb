use minijinja::{Environment, Value};
use thiserror::Error;

/// Templates shipped with the binary, keyed by their path under `templates/`
const EMBEDDED: &[(&str, &str)] = &[
    ("base.html", include_str!("../../../templates/base.html")),
    (
        "partials/product_card.html",
        include_str!("../../../templates/partials/product_card.html"),
    ),
    (
        "partials/pagination.html",
        include_str!("../../../templates/partials/pagination.html"),
    ),
    ("pages/home.html", include_str!("../../../templates/pages/home.html")),
    (
        "pages/products.html",
        include_str!("../../../templates/pages/products.html"),
    ),
    (
        "pages/product.html",
        include_str!("../../../templates/pages/product.html"),
    ),
    (
        "pages/collections.html",
        include_str!("../../../templates/pages/collections.html"),
    ),
    (
        "pages/collection.html",
        include_str!("../../../templates/pages/collection.html"),
    ),
    ("pages/login.html", include_str!("../../../templates/pages/login.html")),
    (
        "pages/register.html",
        include_str!("../../../templates/pages/register.html"),
    ),
    ("pages/cart.html", include_str!("../../../templates/pages/cart.html")),
    (
        "pages/account.html",
        include_str!("../../../templates/pages/account.html"),
    ),
    (
        "pages/checkout.html",
        include_str!("../../../templates/pages/checkout.html"),
    ),
    (
        "pages/admin_dashboard.html",
        include_str!("../../../templates/pages/admin_dashboard.html"),
    ),
    (
        "pages/admin_products.html",
        include_str!("../../../templates/pages/admin_products.html"),
    ),
    ("pages/error.html", include_str!("../../../templates/pages/error.html")),
];

/// Errors that can occur during template operations
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template '{0}' not found")]
    NotFound(String),

    #[error("Invalid template '{0}': {1}")]
    Syntax(String, String),

    #[error("Failed to render template: {0}")]
    RenderError(String),
}

/// Compiled template environment, built once at startup
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Compile the templates embedded in the binary
    pub fn load_embedded() -> Result<Self, TemplateError> {
        Self::from_sources(EMBEDDED.iter().copied())
    }

    pub fn from_sources(
        sources: impl IntoIterator<Item = (&'static str, &'static str)>,
    ) -> Result<Self, TemplateError> {
        let mut env = Environment::new();

        for (name, source) in sources {
            env.add_template(name, source)
                .map_err(|e| TemplateError::Syntax(name.to_string(), e.to_string()))?;
            tracing::debug!("Loaded template: {}", name);
        }

        Ok(Self { env })
    }

    /// Render a template with the given context.
    ///
    /// # Example
    /// ```ignore
    /// let html = engine.render("pages/home.html", minijinja::context! { locale => "en" })?;
    /// ```
    pub fn render(&self, template_name: &str, ctx: Value) -> Result<String, TemplateError> {
        let template = self
            .env
            .get_template(template_name)
            .map_err(|_| TemplateError::NotFound(template_name.to_string()))?;

        template
            .render(ctx)
            .map_err(|e| TemplateError::RenderError(e.to_string()))
    }

    /// Check if a template exists
    #[allow(dead_code)]
    pub fn template_exists(&self, template_name: &str) -> bool {
        self.env.get_template(template_name).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::context;

    #[test]
    fn test_embedded_templates_compile() {
        let engine = TemplateEngine::load_embedded().unwrap();
        assert!(engine.template_exists("pages/home.html"));
        assert!(engine.template_exists("pages/error.html"));
    }

    #[test]
    fn test_html_templates_escape_values() {
        let engine =
            TemplateEngine::from_sources([("page.html", "<p>{{ name }}</p>")]).unwrap();

        let html = engine
            .render("page.html", context! { name => "<script>" })
            .unwrap();

        assert_eq!(html, "<p>&lt;script&gt;</p>");
    }

    #[test]
    fn test_missing_template_is_not_found() {
        let engine = TemplateEngine::from_sources([]).unwrap();
        let result = engine.render("nope.html", context! {});
        assert!(matches!(result, Err(TemplateError::NotFound(_))));
    }

    #[test]
    fn test_syntax_error_names_template() {
        let result = TemplateEngine::from_sources([("broken.html", "{% if %}")]);
        assert!(matches!(result, Err(TemplateError::Syntax(name, _)) if name == "broken.html"));
    }
}
