//! Access token resolution.

use crate::error::{Error, Result};

/// Prompt shown when no token is configured.
pub const TOKEN_PROMPT: &str = "Enter your Dropbox API token (input hidden): ";

/// Read the Dropbox token from `env_var`, falling back to a hidden terminal
/// prompt. The binary loads `.env` into the environment before this runs.
pub fn resolve_token(env_var: &str) -> Result<String> {
    resolve_with(std::env::var(env_var).ok(), || {
        rpassword::prompt_password(TOKEN_PROMPT)
    })
}

/// Token from `configured` when it is non-blank, otherwise from `prompt`.
pub fn resolve_with<F>(configured: Option<String>, prompt: F) -> Result<String>
where
    F: FnOnce() -> std::io::Result<String>,
{
    if let Some(token) = configured.map(|t| t.trim().to_string()).filter(|t| !t.is_empty()) {
        log::debug!("using token from environment");
        return Ok(token);
    }

    let token = prompt()?.trim().to_string();
    if token.is_empty() {
        return Err(Error::Credential("no Dropbox token provided".to_string()));
    }
    Ok(token)
}
