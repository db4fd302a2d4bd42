//! API credential resolution.
//!
//! Credentials come from the `GEMINI_API_KEY` environment variable or,
//! failing that, from `~/.config/foundry/secret.json`:
//!
//! ```json
//! { "gemini": { "api_key": "...", "model_name": "gemini-2.5-flash" } }
//! ```

use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

/// Environment variable consulted before the secret file.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Root structure of secret.json.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SecretConfig {
    #[serde(default)]
    pub gemini: Option<GeminiConfig>,
}

/// Gemini API credentials.
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiConfig {
    pub api_key: String,
    #[serde(default)]
    pub model_name: Option<String>,
}

impl SecretConfig {
    /// Reads and parses `~/.config/foundry/secret.json`.
    pub fn load() -> Result<Self, String> {
        let path = Self::path()?;
        if !path.exists() {
            return Err(format!("secret file not found at: {}", path.display()));
        }
        let content = fs::read_to_string(&path)
            .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
        serde_json::from_str(&content)
            .map_err(|e| format!("failed to parse {}: {e}", path.display()))
    }

    fn path() -> Result<PathBuf, String> {
        let home =
            dirs::home_dir().ok_or_else(|| "could not determine home directory".to_string())?;
        Ok(home.join(".config").join("foundry").join("secret.json"))
    }
}

/// Resolves Gemini credentials: environment first, secret file second.
///
/// Returns `(api_key, model_name_override)`.
pub fn resolve_gemini_credentials() -> Result<(String, Option<String>), String> {
    if let Ok(key) = std::env::var(API_KEY_ENV) {
        if !key.trim().is_empty() {
            return Ok((key, None));
        }
    }

    let config = SecretConfig::load()?;
    let gemini = config
        .gemini
        .ok_or_else(|| "no 'gemini' section in secret.json".to_string())?;
    Ok((gemini.api_key, gemini.model_name))
}
