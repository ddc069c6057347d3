// SPDX-FileCopyrightText: 2026 Logos Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test doubles for Logos credential guard tests.
//!
//! # Components
//!
//! - [`BrokenCipher`] - AEAD primitive whose key generation, sealing, and
//!   opening can each be switched to fail
//! - [`InstrumentedStore`] - in-memory store that counts writes and can inject
//!   read/write failures or a write delay

pub mod broken_cipher;
pub mod instrumented_store;

pub use broken_cipher::BrokenCipher;
pub use instrumented_store::InstrumentedStore;
