//! # Signet
//!
//! Username/password registration and login.
//!
//! Identities are keyed by the lowercased username (`user:<name>`), passwords are
//! stored as salted Argon2id hashes, and a failed login never reveals whether
//! the username exists.
//!
//! - [`credentials`]: the registration/authentication core, the hasher and the
//!   identity store abstraction.
//! - [`signet`]: the HTTP adapter (`POST /api/signup`, `POST /api/login`).
//! - [`cli`]: argument parsing, telemetry setup and server startup.

pub mod cli;
pub mod credentials;
pub mod signet;
