// SPDX-FileCopyrightText: 2026 Logos Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `logos save`, `logos show`, and `logos clear`.

use std::io::{BufRead, IsTerminal, Write};

use logos_core::LogosError;
use logos_guard::{CredentialGuard, Retrieved, SaveOutcome, mask_secret, read_secret_input};
use secrecy::ExposeSecret;

/// Run `logos save`: read a key, store it, print its masked form.
pub async fn run_save(guard: &CredentialGuard, plain: bool) -> Result<(), LogosError> {
    let secret = read_secret_input()?;
    let outcome = guard.save(secret.expose_secret()).await?;
    let masked = mask_secret(secret.expose_secret());

    match outcome {
        SaveOutcome::Encrypted => println!("Saved API key {masked}"),
        SaveOutcome::Fallback { reason } => {
            println!("Saved API key {masked}");
            let note = format!("warning: key stored without encryption ({reason})");
            if !plain && std::io::stderr().is_terminal() {
                use colored::Colorize;
                eprintln!("{}", note.yellow());
            } else {
                eprintln!("{note}");
            }
        }
    }
    Ok(())
}

/// Run `logos show`.
pub async fn run_show(guard: &CredentialGuard, reveal: bool) -> Result<(), LogosError> {
    match guard.retrieve().await? {
        Some(retrieved) => {
            println!("{}", render_secret(&retrieved, reveal));
            if let Some(reason) = retrieved.failure() {
                eprintln!("note: stored value could not be decrypted ({reason}); shown as stored");
            }
        }
        None => println!("No API key stored."),
    }
    Ok(())
}

/// Run `logos clear`.
///
/// Without `--yes`, asks for confirmation on a terminal and refuses otherwise.
pub async fn run_clear(guard: &CredentialGuard, yes: bool) -> Result<(), LogosError> {
    if !yes {
        if !std::io::stdin().is_terminal() {
            return Err(LogosError::Guard(
                "refusing to clear without confirmation; pass --yes".to_string(),
            ));
        }
        eprint!("Remove the stored API key? [y/N] ");
        std::io::stderr()
            .flush()
            .map_err(|e| LogosError::Internal(format!("failed to flush prompt: {e}")))?;
        let mut answer = String::new();
        std::io::stdin()
            .lock()
            .read_line(&mut answer)
            .map_err(|e| LogosError::Internal(format!("failed to read confirmation: {e}")))?;
        if !is_confirmation(&answer) {
            println!("Aborted.");
            return Ok(());
        }
    }

    guard.clear().await?;
    println!("Stored API key cleared.");
    Ok(())
}

/// The line printed by `show`: the masked key, or the full key with `reveal`.
pub fn render_secret(retrieved: &Retrieved, reveal: bool) -> String {
    if reveal {
        retrieved.expose().to_string()
    } else {
        mask_secret(retrieved.expose())
    }
}

fn is_confirmation(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
