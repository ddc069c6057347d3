// SPDX-FileCopyrightText: 2026 Logos Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `logos status` command implementation.

use std::io::IsTerminal;

use chrono::SecondsFormat;
use logos_core::{HealthStatus, LogosError};
use logos_guard::{CredentialGuard, mask_secret};
use serde::Serialize;

/// Structured status output for `--json` mode.
///
/// Only the masked preview of the key is ever included.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct StatusReport {
    /// `None` when the store is too unhealthy to read.
    pub stored: Option<bool>,
    /// Whether the stored value decrypted cleanly. `None` when nothing is stored.
    pub verified: Option<bool>,
    pub stored_at: Option<String>,
    pub masked: Option<String>,
    pub store_health: &'static str,
    pub store_detail: Option<String>,
}

/// Gather the guard's state without exposing the key.
///
/// An unhealthy store is reported, not read.
pub async fn collect_status(guard: &CredentialGuard) -> Result<StatusReport, LogosError> {
    let health = guard.store_health().await?;
    let mut report = StatusReport {
        stored: None,
        verified: None,
        stored_at: None,
        masked: None,
        store_health: health.as_str(),
        store_detail: health.detail().map(str::to_string),
    };
    if matches!(health, HealthStatus::Unhealthy(_)) {
        return Ok(report);
    }

    match guard.retrieve().await? {
        Some(retrieved) => {
            report.stored = Some(true);
            report.verified = Some(retrieved.is_verified());
            report.masked = Some(mask_secret(retrieved.expose()));
            report.stored_at = guard
                .stored_at()
                .await?
                .map(|ts| ts.to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        None => report.stored = Some(false),
    }
    Ok(report)
}

/// Run the `logos status` command.
///
/// If `--json` is passed, outputs structured JSON for scripting.
/// If `--plain` is passed or stdout is not a TTY, disables colors.
pub async fn run_status(
    guard: &CredentialGuard,
    json: bool,
    plain: bool,
) -> Result<(), LogosError> {
    let report = collect_status(guard).await?;

    if json {
        let rendered = serde_json::to_string_pretty(&report)
            .map_err(|e| LogosError::Internal(format!("failed to render status: {e}")))?;
        println!("{rendered}");
    } else {
        let use_color = !plain && std::io::stdout().is_terminal();
        print_status(&report, use_color);
    }
    Ok(())
}

fn print_status(report: &StatusReport, use_color: bool) {
    println!();
    println!("  logos status");
    println!("  {}", "-".repeat(35));

    let state = match (report.stored, report.verified) {
        (None, _) => "unknown",
        (_, None) => "not stored",
        (_, Some(true)) => "stored (encrypted)",
        (_, Some(false)) => "stored (unverified)",
    };
    let health = match &report.store_detail {
        Some(detail) => format!("{} ({detail})", report.store_health),
        None => report.store_health.to_string(),
    };
    if use_color {
        use colored::Colorize;
        let state = match report.verified {
            None => state.dimmed(),
            Some(true) => state.green(),
            Some(false) => state.yellow(),
        };
        let health = match report.store_health {
            "healthy" => health.green(),
            "degraded" => health.yellow(),
            _ => health.red(),
        };
        println!("    API key:  {state}");
        println!("    Store:    {health}");
    } else {
        println!("    API key:  {state}");
        println!("    Store:    {health}");
    }

    if let Some(masked) = &report.masked {
        println!("    Preview:  {masked}");
    }
    if let Some(stored_at) = &report.stored_at {
        println!("    Saved at: {stored_at}");
    }
    println!();
}
