// SPDX-FileCopyrightText: 2026 Logos Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Secret acquisition via TTY prompt or the LOGOS_API_KEY environment variable.

use logos_core::LogosError;
use secrecy::SecretString;

/// The environment variable name for providing the API secret.
pub const SECRET_ENV_VAR: &str = "LOGOS_API_KEY";

/// Get the secret to save from the environment or an interactive prompt.
///
/// Priority:
/// 1. `LOGOS_API_KEY` environment variable (scripts, CI)
/// 2. Interactive TTY prompt via `rpassword`, input hidden
///
/// Surrounding whitespace is trimmed. Empty input is rejected.
pub fn read_secret_input() -> Result<SecretString, LogosError> {
    if let Ok(value) = std::env::var(SECRET_ENV_VAR) {
        let value = value.trim();
        if !value.is_empty() {
            return Ok(SecretString::from(value.to_string()));
        }
    }

    if std::io::IsTerminal::is_terminal(&std::io::stdin()) {
        eprint!("API key: ");
        let input = rpassword::read_password()
            .map_err(|e| LogosError::Guard(format!("failed to read API key: {e}")))?;
        let input = input.trim();
        if input.is_empty() {
            return Err(LogosError::Guard("empty API key not allowed".to_string()));
        }
        return Ok(SecretString::from(input.to_string()));
    }

    Err(LogosError::Guard(format!(
        "No API key provided. Set {SECRET_ENV_VAR} or run interactively."
    )))
}
