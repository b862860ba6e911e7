//! Session attachment and commit.
//!
//! Resolves the session credential of an incoming request to a `Session`
//! (get-or-create) and writes the session back once the request pipeline has
//! run.

use super::credential::CredentialSigner;
use super::record::{CookieOptions, Session, format_set_cookie};
use super::store::SessionStore;
use crate::config::{Config, Result, SessionSettings};
use std::sync::Arc;
use tracing::debug;

pub struct SessionManager {
    store: Arc<dyn SessionStore>,
    signer: CredentialSigner,
    settings: SessionSettings,
    cookie: CookieOptions,
}

impl SessionManager {
    #[must_use]
    pub fn new(store: Arc<dyn SessionStore>, secret: &str, settings: SessionSettings) -> Self {
        let cookie = CookieOptions::from_settings(&settings);
        Self {
            store,
            signer: CredentialSigner::new(secret),
            settings,
            cookie,
        }
    }

    #[must_use]
    pub fn from_config(config: &Config, store: Arc<dyn SessionStore>) -> Self {
        Self::new(store, &config.session_secret, config.session.clone())
    }

    #[must_use]
    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    #[must_use]
    pub const fn signer(&self) -> &CredentialSigner {
        &self.signer
    }

    #[must_use]
    pub const fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    /// Finds the first session cookie value in a `Cookie` header.
    #[must_use]
    pub fn extract_token<'a>(&self, cookie_header: &'a str) -> Option<&'a str> {
        let prefix = format!("{}=", self.settings.cookie_name);
        cookie_header
            .split(';')
            .map(str::trim)
            .find_map(|cookie| cookie.strip_prefix(prefix.as_str()))
    }

    /// Returns the session the request's credential refers to, creating a new
    /// one when the credential is missing, forged or unknown to the store.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Store` if the store fails to load the session.
    pub async fn attach(&self, cookie_header: Option<&str>) -> Result<Session> {
        let session_id = match cookie_header.and_then(|h| self.extract_token(h)) {
            Some(token) => {
                let verified = self.signer.verify(token);
                if verified.is_none() {
                    debug!("Session credential rejected");
                }
                verified
            }
            None => None,
        };

        if let Some(id) = session_id {
            if let Some(data) = self.store.load(&id).await? {
                return Ok(Session::restore(id, data, self.cookie.clone()));
            }
            debug!("Session credential refers to an unknown session");
        }

        debug!("Session created");
        Ok(Session::new(self.cookie.clone()))
    }

    /// Saves the session if needed and returns the `Set-Cookie` value to send,
    /// which is only produced for newly saved sessions.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Store` if the store fails to save the session.
    pub async fn commit(&self, session: &Session) -> Result<Option<String>> {
        let should_save = if session.is_new() {
            self.settings.save_uninitialized || session.is_modified()
        } else {
            self.settings.resave || session.is_modified()
        };

        if !should_save {
            return Ok(None);
        }

        self.store.save(session.id(), session.data()).await?;

        if session.is_new() {
            let token = self.signer.sign(session.id());
            return Ok(Some(format_set_cookie(
                &self.settings.cookie_name,
                &token,
                session.cookie(),
            )));
        }

        Ok(None)
    }
}
