// SPDX-FileCopyrightText: 2026 Logos Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Display masking for secrets.

/// Shown instead of secrets too short to reveal any fragment of.
pub const MASK_PLACEHOLDER: &str = "••••••••";

/// Fixed lead-in of a masked secret. Never taken from the secret itself.
pub const MASK_PREFIX: &str = "sk-••••";

/// Secrets shorter than this (in characters) are fully masked.
pub const MIN_MASKABLE_CHARS: usize = 8;

/// Trailing characters left visible.
pub const VISIBLE_SUFFIX_CHARS: usize = 4;

/// Mask a secret for display: `"sk-••••"` followed by its last four characters.
///
/// Values shorter than eight characters, including the empty string, become
/// [`MASK_PLACEHOLDER`]. Lengths count Unicode scalar values, so multi-byte
/// input never splits a character.
pub fn mask_secret(value: &str) -> String {
    let char_count = value.chars().count();
    if char_count < MIN_MASKABLE_CHARS {
        return MASK_PLACEHOLDER.to_string();
    }
    let suffix: String = value.chars().skip(char_count - VISIBLE_SUFFIX_CHARS).collect();
    format!("{MASK_PREFIX}{suffix}")
}
