//! Per-client session state.
//!
//! A `Session` is the server-side key/value bag handed to every middleware
//! stage, together with the cookie attributes it is transported with.

use crate::config::SessionSettings;
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::Rng;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Field values stored for one session.
pub type SessionData = Map<String, Value>;

/// Attributes of the session cookie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CookieOptions {
    pub path: String,
    pub http_only: bool,
    pub secure: bool,
    pub same_site: String,
}

impl CookieOptions {
    #[must_use]
    pub fn from_settings(settings: &SessionSettings) -> Self {
        Self {
            path: "/".to_string(),
            http_only: true,
            secure: settings.cookie_secure,
            same_site: "Lax".to_string(),
        }
    }
}

impl Default for CookieOptions {
    fn default() -> Self {
        Self::from_settings(&SessionSettings::default())
    }
}

/// Server-side bag for one client.
///
/// Middleware stages read and write fields through `get`/`insert`/`remove`
/// (typed, via serde) or `get_value`/`insert_value` (raw JSON). Any write
/// marks the session modified so the manager persists it.
#[derive(Debug, Clone)]
pub struct Session {
    id: String,
    cookie: CookieOptions,
    data: SessionData,
    is_new: bool,
    modified: bool,
}

impl Session {
    /// Creates an empty session with a freshly generated identifier.
    #[must_use]
    pub fn new(cookie: CookieOptions) -> Self {
        Self {
            id: generate_session_id(),
            cookie,
            data: SessionData::new(),
            is_new: true,
            modified: false,
        }
    }

    /// Rebuilds a session previously saved under `id`.
    #[must_use]
    pub fn restore(id: String, data: SessionData, cookie: CookieOptions) -> Self {
        Self {
            id,
            cookie,
            data,
            is_new: false,
            modified: false,
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub const fn cookie(&self) -> &CookieOptions {
        &self.cookie
    }

    #[must_use]
    pub const fn data(&self) -> &SessionData {
        &self.data
    }

    /// True when the session was created while handling the current request.
    #[must_use]
    pub const fn is_new(&self) -> bool {
        self.is_new
    }

    /// True when any field was written or removed during the current request.
    #[must_use]
    pub const fn is_modified(&self) -> bool {
        self.modified
    }

    #[must_use]
    pub fn get_value(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Reads a field, returning `None` when it is absent or has another type.
    #[must_use]
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.data
            .get(key)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    pub fn insert_value(&mut self, key: &str, value: Value) {
        self.data.insert(key.to_string(), value);
        self.modified = true;
    }

    /// Serializes `value` and stores it under `key`.
    ///
    /// # Errors
    ///
    /// Returns the serialization error if `value` cannot be represented as JSON.
    pub fn insert<T: Serialize>(&mut self, key: &str, value: T) -> serde_json::Result<()> {
        let value = serde_json::to_value(value)?;
        self.insert_value(key, value);
        Ok(())
    }

    /// Deletes `key`, returning its previous value.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let removed = self.data.remove(key);
        if removed.is_some() {
            self.modified = true;
        }
        removed
    }

    /// Full view of the session for diagnostics: cookie attributes plus every field.
    #[must_use]
    pub fn snapshot(&self) -> Value {
        let mut view = Map::with_capacity(self.data.len() + 1);
        view.insert(
            "cookie".to_string(),
            serde_json::to_value(&self.cookie).unwrap_or(Value::Null),
        );
        for (key, value) in &self.data {
            view.insert(key.clone(), value.clone());
        }
        Value::Object(view)
    }
}

/// Generates an unpredictable 43-character session identifier.
#[must_use]
pub fn generate_session_id() -> String {
    let random_bytes: [u8; 32] = rand::rng().random();
    URL_SAFE_NO_PAD.encode(random_bytes)
}

#[must_use]
pub fn format_set_cookie(name: &str, value: &str, options: &CookieOptions) -> String {
    let http_only = if options.http_only { "; HttpOnly" } else { "" };
    let secure = if options.secure { "; Secure" } else { "" };
    format!(
        "{name}={value}; Path={}{http_only}{secure}; SameSite={}",
        options.path, options.same_site
    )
}
