// src/middleware/i18n.rs

use axum::extract::{FromRef, FromRequestParts};
use axum::http::{header, request::Parts, HeaderMap};

use crate::common::i18n::{I18nStore, DEFAULT_LANG};
use crate::config::AppState;

// Idioma das mensagens de erro, negociado pelo Accept-Language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale(pub String);

impl Locale {
    /// Primeiro idioma do header que o store conhece ("pt-BR" -> "pt").
    pub fn negotiate(accept_language: Option<&str>, store: &I18nStore) -> Self {
        let lang = accept_language
            .map(accept_language::parse)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|tag| tag.split('-').next().map(|primary| primary.to_ascii_lowercase()))
            .find(|primary| store.supports(primary))
            .unwrap_or_else(|| DEFAULT_LANG.to_string());

        Locale(lang)
    }

    pub fn from_headers(headers: &HeaderMap, store: &I18nStore) -> Self {
        let header_value = headers.get(header::ACCEPT_LANGUAGE).and_then(|value| value.to_str().ok());
        Self::negotiate(header_value, store)
    }
}

impl<S> FromRequestParts<S> for Locale
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        Ok(Locale::from_headers(&parts.headers, &app_state.i18n_store))
    }
}
