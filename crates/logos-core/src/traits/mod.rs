// SPDX-FileCopyrightText: 2026 Logos Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Seam traits between the credential guard and its environment.
//!
//! [`LocalStore`] is async and uses `#[async_trait]` for dynamic dispatch;
//! [`AeadCipher`] is synchronous because the primitive never suspends.

pub mod cipher;
pub mod store;

pub use cipher::{AeadCipher, Sealed};
pub use store::LocalStore;
