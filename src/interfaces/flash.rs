use actix_web::{
    cookie::{Cookie, CookieJar, Key},
    HttpRequest, HttpResponseBuilder,
};
use serde::{Deserialize, Serialize};

const FLASH_COOKIE: &str = "flash";

/// One-shot notice carried across a redirect in a signed cookie,
/// replacing the session-backed flash mechanism of the original site.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Error,
}

impl FlashLevel {
    pub fn css_class(&self) -> &'static str {
        match self {
            FlashLevel::Success => "alert-success",
            FlashLevel::Error => "alert-danger",
        }
    }
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Flash { level: FlashLevel::Success, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Flash { level: FlashLevel::Error, message: message.into() }
    }
}

/// Attaches the notice to a response as a signed cookie.
pub fn set_flash(builder: &mut HttpResponseBuilder, key: &Key, flash: &Flash) {
    let value = match serde_json::to_string(flash) {
        Ok(value) => value,
        Err(e) => {
            tracing::error!("flash serialization failed: {}", e);
            return;
        }
    };

    let mut jar = CookieJar::new();
    jar.signed_mut(key)
        .add(Cookie::build(FLASH_COOKIE, value).path("/").http_only(true).finish());

    for cookie in jar.delta() {
        builder.cookie(cookie.clone());
    }
}

/// Reads and verifies the notice from the request, if any. Tampered or
/// malformed cookies are discarded silently.
pub fn take_flash(req: &HttpRequest, key: &Key) -> Option<Flash> {
    let cookie = req.cookie(FLASH_COOKIE)?;

    let mut jar = CookieJar::new();
    jar.add_original(cookie);
    let verified = jar.signed(key).get(FLASH_COOKIE)?;

    serde_json::from_str(verified.value()).ok()
}

/// Removal cookie appended after the notice has been rendered once.
pub fn clear_flash(builder: &mut HttpResponseBuilder) {
    let mut removal = Cookie::new(FLASH_COOKIE, "");
    removal.set_path("/");
    removal.make_removal();
    builder.cookie(removal);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flash_json_round_trips() {
        let flash = Flash::error("Preencha todos os campos!");
        let json = serde_json::to_string(&flash).unwrap();
        assert_eq!(serde_json::from_str::<Flash>(&json).unwrap(), flash);
    }

    #[test]
    fn levels_map_to_bootstrap_classes() {
        assert_eq!(FlashLevel::Success.css_class(), "alert-success");
        assert_eq!(FlashLevel::Error.css_class(), "alert-danger");
    }
}
