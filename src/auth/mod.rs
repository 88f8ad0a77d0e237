// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authorization Module
//!
//! Token verification and role resolution for the registry gateway.
//!
//! ## Bearer flow (API routes)
//!
//! 1. Caller sends `Authorization: Bearer <identity-provider JWT>`
//! 2. Gateway fetches the provider's JWKS via HTTPS (cached with TTL)
//! 3. Verifies signature, expiry, and audience
//! 4. Derives the role from the email allow-list: listed → `editor`,
//!    otherwise `viewer`
//!
//! ## Session flow (dashboard pages)
//!
//! A session is established once via a sign-in exchange and stores the
//! verified claims with the token's expiry. Session reads recompute the
//! role and flag expiry but do not re-verify the signature; they must never
//! gate mutating routes.
//!
//! ## Security
//!
//! - Verification failures collapse into a single `InvalidToken` error;
//!   sub-reasons are logged internally only
//! - Roles are never cached; recomputed from the allow-list on every use
//! - Clock skew tolerance is 60 seconds

pub mod claims;
pub mod error;
pub mod extractor;
pub mod jwks;
pub mod roles;
pub mod session;
pub mod verifier;

pub use claims::ResolvedIdentity;
pub use error::AuthError;
pub use extractor::{Auth, EditorOnly};
pub use jwks::JwksClient;
pub use roles::{AllowList, Role};
pub use session::{Session, SessionIdentity, SessionStore};
pub use verifier::{TokenVerifier, VerifierConfig};
