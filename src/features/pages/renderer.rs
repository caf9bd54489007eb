use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use minijinja::{context, Value};
use serde::Serialize;

use crate::core::error::{AppError, Result};
use crate::features::pages::frame::PageFrame;
use crate::shared::i18n::Translations;
use crate::shared::templates::TemplateEngine;

/// Renders page templates inside the shared layout context
pub struct PageRenderer {
    engine: TemplateEngine,
    translations: Arc<Translations>,
}

impl PageRenderer {
    pub fn new(engine: TemplateEngine, translations: Arc<Translations>) -> Self {
        Self {
            engine,
            translations,
        }
    }

    pub fn translate<'a>(&'a self, frame: &PageFrame, key: &'a str) -> &'a str {
        self.translations.get(frame.locale, key)
    }

    /// Render `template` with `page` exposed to it as `page`
    pub fn render<T: Serialize>(
        &self,
        frame: &PageFrame,
        template: &str,
        page: &T,
    ) -> Result<Html<String>> {
        let ctx = context! {
            locale => frame.locale.code(),
            path => frame.path,
            signed_in => frame.user.is_some(),
            alternates => frame.alternates(),
            t => Value::from_serialize(self.translations.dictionary(frame.locale)),
            page => Value::from_serialize(page),
        };

        self.engine
            .render(template, ctx)
            .map(Html)
            .map_err(|e| AppError::Internal(e.to_string()))
    }

    /// Render with an explicit status, e.g. a form re-rendered with its errors
    pub fn render_with_status<T: Serialize>(
        &self,
        frame: &PageFrame,
        status: StatusCode,
        template: &str,
        page: &T,
    ) -> Response {
        match self.render(frame, template, page) {
            Ok(html) => (status, html).into_response(),
            Err(e) => self.error_page(frame, &e),
        }
    }

    /// Localized error page carrying the error's status
    pub fn error_page(&self, frame: &PageFrame, error: &AppError) -> Response {
        let status = error.status();

        if status.is_server_error() {
            tracing::error!("Page {} failed: {}", frame.path, error);
        }

        let key = format!("error.{}", error.code());
        let mut message = self.translations.get(frame.locale, &key).to_string();
        if message == key {
            message = self
                .translations
                .get(frame.locale, "error.generic")
                .to_string();
        }

        let page = ErrorPage {
            status: status.as_u16(),
            message,
        };

        match self.render(frame, "pages/error.html", &page) {
            Ok(html) => (status, html).into_response(),
            Err(e) => {
                tracing::error!("Failed to render error page: {}", e);
                (status, page.message).into_response()
            }
        }
    }

    /// Turn a page result into a response, rendering failures as error pages
    pub fn respond(&self, frame: &PageFrame, result: Result<Response>) -> Response {
        result.unwrap_or_else(|e| self.error_page(frame, &e))
    }
}

#[derive(Debug, Serialize)]
struct ErrorPage {
    status: u16,
    message: String,
}
