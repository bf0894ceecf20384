//! Sign-in and password recovery flows.
//!
//! Each flow validates its form first and then calls the backend; every
//! failure comes back as a [`ValidationError`] ready to be shown as a toast.

use crate::api::{ApiError, PosBackend};
use crate::constants::*;
use crate::notify::ValidationError;

/// Username/password form
#[derive(Debug, Clone, Default)]
pub struct SignInForm {
    pub username: String,
    pub password: String,
}

impl SignInForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.username.trim().is_empty() || self.password.is_empty() {
            return Err(ValidationError::new(ERROR_LOGIN_FIELDS, ERROR_LOGIN_DESC));
        }
        Ok(())
    }
}

/// Validate the form and exchange the credentials for a token
pub async fn sign_in(backend: &dyn PosBackend, form: &SignInForm) -> Result<String, ValidationError> {
    form.validate()?;

    backend
        .login(form.username.trim(), &form.password)
        .await
        .map_err(|e| {
            log::warn!("Login failed for {}: {}", form.username.trim(), e);
            let title = match &e {
                ApiError::Http { message, .. } if !message.is_empty() => message.clone(),
                _ => ERROR_LOGIN.to_string(),
            };
            ValidationError::new(title, ERROR_LOGIN_DESC)
        })
}

pub fn validate_forgot(email: &str) -> Result<(), ValidationError> {
    if email.trim().is_empty() {
        return Err(ValidationError::new(ERROR_EMAIL_REQUIRED, ERROR_EMAIL_REQUIRED_DESC));
    }
    Ok(())
}

/// Ask the backend to email a password reset link
pub async fn request_password_reset(
    backend: &dyn PosBackend,
    email: &str,
    app_url: &str,
) -> Result<(), ValidationError> {
    validate_forgot(email)?;

    backend
        .request_password_reset(email.trim(), app_url)
        .await
        .map_err(|e| ValidationError::api(ERROR_EMAIL_SEND, &e))
}

/// Reset form filled from the emailed link
#[derive(Debug, Clone, Default)]
pub struct ResetPasswordForm {
    pub token: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl ResetPasswordForm {
    /// Checks run in order: token, presence, length, equality
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.token.trim().is_empty() {
            return Err(ValidationError::new(ERROR_TOKEN_INVALID, ERROR_TOKEN_INVALID_DESC));
        }
        if self.new_password.is_empty() || self.confirm_password.is_empty() {
            return Err(ValidationError::new(ERROR_ALL_FIELDS, ERROR_ALL_FIELDS_DESC));
        }
        if self.new_password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::new(ERROR_PASSWORD_SHORT, ERROR_PASSWORD_SHORT_DESC));
        }
        if self.new_password != self.confirm_password {
            return Err(ValidationError::new(ERROR_PASSWORD_MISMATCH, ERROR_PASSWORD_MISMATCH_DESC));
        }
        Ok(())
    }
}

pub async fn reset_password(backend: &dyn PosBackend, form: &ResetPasswordForm) -> Result<(), ValidationError> {
    form.validate()?;

    backend
        .reset_password(form.token.trim(), &form.new_password)
        .await
        .map_err(|e| ValidationError::api(ERROR_PASSWORD_RESET, &e))
}
