//! Per-request language selection
//!
//! The chosen language lives in a `lang` cookie. Handlers read it with
//! [`request_language`] and pass it to the renderer explicitly.

use axum::{
    extract::Path,
    http::{
        header::{COOKIE, REFERER, SET_COOKIE},
        HeaderMap, HeaderValue,
    },
    response::{IntoResponse, Redirect, Response},
};
use tracing::debug;

use super::ApiError;

/// Cookie holding the selected language
pub const LANG_COOKIE: &str = "lang";

const MAX_LANG_LEN: usize = 16;

/// Language codes are short ASCII tokens, safe to echo into a cookie
pub fn is_valid_language(code: &str) -> bool {
    !code.is_empty()
        && code.len() <= MAX_LANG_LEN
        && code
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Language selected by the request's cookie, or `default`
pub fn request_language(headers: &HeaderMap, default: &str) -> String {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == LANG_COOKIE)
        .map(|(_, value)| value.trim())
        .filter(|value| is_valid_language(value))
        .unwrap_or(default)
        .to_string()
}

/// GET /set_lang/:lang
///
/// Stores the language and sends the browser back where it came from.
pub async fn set_lang(Path(lang): Path<String>, headers: HeaderMap) -> Result<Response, ApiError> {
    if !is_valid_language(&lang) {
        return Err(ApiError::BadRequest(format!("invalid language code: {}", lang)));
    }

    let cookie = HeaderValue::from_str(&format!("{}={}; Path=/; SameSite=Lax", LANG_COOKIE, lang))
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    let target = headers
        .get(REFERER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .unwrap_or("/");

    debug!("Language set to '{}', redirecting to {}", lang, target);
    Ok(([(SET_COOKIE, cookie)], Redirect::to(target)).into_response())
}
