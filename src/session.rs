//! Authentication context.
//!
//! The backend issues a JWT; its payload carries the user identity and the
//! expiry. The raw token is kept in a file under the data directory so a
//! restarted terminal stays signed in until the token expires.

use crate::models::{AuthUser, Role};
use base64::engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD};
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Token inválido: {0}")]
    InvalidToken(String),

    #[error("Sesión expirada")]
    Expired,

    #[error("No se pudo guardar la sesión: {0}")]
    Storage(#[from] std::io::Error),
}

/// Claims read from the token payload
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenClaims {
    pub user_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub store_id: String,
    pub exp: i64,
}

impl TokenClaims {
    pub fn to_user(&self) -> AuthUser {
        AuthUser {
            user_id: self.user_id.clone(),
            name: self.name.clone(),
            username: self.username.clone(),
            role: self.role,
            store_id: self.store_id.clone(),
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        is_expired(self.exp, now)
    }
}

/// `exp` is in seconds, compared at millisecond precision
pub fn is_expired(exp: i64, now: DateTime<Utc>) -> bool {
    exp.saturating_mul(1000) < now.timestamp_millis()
}

/// Decode the payload segment of a JWT without verifying the signature
pub fn decode_token(token: &str) -> Result<TokenClaims, SessionError> {
    let payload = token
        .split('.')
        .nth(1)
        .ok_or_else(|| SessionError::InvalidToken("formato incorrecto".to_string()))?;
    let payload = payload.trim_end_matches('=');

    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .or_else(|_| STANDARD_NO_PAD.decode(payload))
        .map_err(|e| SessionError::InvalidToken(e.to_string()))?;

    serde_json::from_slice(&bytes).map_err(|e| SessionError::InvalidToken(e.to_string()))
}

/// Signed-in state of the terminal
#[derive(Debug, Default)]
pub struct Session {
    token_path: Option<PathBuf>,
    token: Option<String>,
    claims: Option<TokenClaims>,
}

impl Session {
    pub fn new(token_path: Option<PathBuf>) -> Self {
        Self {
            token_path,
            token: None,
            claims: None,
        }
    }

    /// Reload a stored token at start-up.
    ///
    /// Undecodable or expired tokens are discarded.
    pub fn restore(&mut self) -> Option<AuthUser> {
        let path = self.token_path.clone()?;
        let token = std::fs::read_to_string(&path).ok()?;
        let token = token.trim().to_string();

        match decode_token(&token) {
            Ok(claims) if !claims.is_expired_at(Utc::now()) => {
                log::info!("Restored session for {}", claims.username);
                self.token = Some(token);
                self.claims = Some(claims);
            }
            Ok(_) => {
                log::info!("Stored session expired");
                self.logout();
                return None;
            }
            Err(e) => {
                log::warn!("Discarding stored token: {}", e);
                self.logout();
                return None;
            }
        }

        self.user()
    }

    /// Accept a freshly issued token and persist it
    pub fn login(&mut self, token: &str) -> Result<AuthUser, SessionError> {
        let claims = decode_token(token)?;
        if claims.is_expired_at(Utc::now()) {
            return Err(SessionError::Expired);
        }

        if let Some(path) = &self.token_path {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, token)?;
        }

        let user = claims.to_user();
        log::info!("Signed in as {} ({:?})", user.username, user.role);
        self.token = Some(token.to_string());
        self.claims = Some(claims);
        Ok(user)
    }

    /// Forget the user and delete the stored token
    pub fn logout(&mut self) {
        self.token = None;
        self.claims = None;

        if let Some(path) = &self.token_path {
            if let Err(e) = std::fs::remove_file(path) {
                if e.kind() != std::io::ErrorKind::NotFound {
                    log::warn!("Failed to remove token file {}: {}", path.display(), e);
                }
            }
        }
    }

    /// Periodic expiry check; returns true when the session was just dropped
    pub fn check_expiry(&mut self, now: DateTime<Utc>) -> bool {
        match &self.claims {
            Some(claims) if claims.is_expired_at(now) => {
                log::info!("Session expired, logging out");
                self.logout();
                true
            }
            _ => false,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.claims.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<AuthUser> {
        self.claims.as_ref().map(TokenClaims::to_user)
    }

    /// Role guard; an empty list admits any signed-in user
    pub fn allows(&self, roles: &[Role]) -> bool {
        match &self.claims {
            Some(claims) => roles.is_empty() || roles.contains(&claims.role),
            None => false,
        }
    }
}
