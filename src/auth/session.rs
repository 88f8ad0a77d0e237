// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Session-based role resolution (dashboard flow).
//!
//! A session is established once by verifying an ID token through the bearer
//! path; the verified claims and the token's embedded expiry are stored. On
//! every read the role is recomputed from the current allow-list and an
//! explicit `session_expired` flag is set by comparing current time against
//! the stored expiry. The stored claims are trusted on read — no signature
//! re-verification — so this path's authenticity guarantee is weaker than
//! the per-request bearer path. It must only serve page rendering; mutating
//! API routes go through [`super::TokenVerifier`] on every request.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::roles::{AllowList, Role};

/// A long-lived session established by a sign-in exchange.
#[derive(Debug, Clone)]
pub struct Session {
    /// Verified email from the sign-in token.
    pub email: String,
    /// Claim set captured at sign-in.
    pub claims: serde_json::Value,
    /// Expiry embedded in the sign-in token (Unix seconds).
    pub expires_at: i64,
    /// When the session was established.
    pub created_at: DateTime<Utc>,
}

/// Result of reading a session.
///
/// The role is recomputed on every read; it is never stored with the
/// session, so an allow-list change takes effect on the next read after a
/// process restart.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SessionIdentity {
    /// Email the session was established for.
    pub email: String,
    /// Role derived from the current allow-list.
    pub role: Role,
    /// Whether the embedded expiry has passed.
    pub session_expired: bool,
}

impl SessionIdentity {
    /// Read a session: recompute the role and evaluate expiry at `now`
    /// (Unix seconds).
    pub fn read(session: &Session, allow_list: &AllowList, now: i64) -> Self {
        Self {
            email: session.email.clone(),
            role: allow_list.role_for(&session.email),
            session_expired: session.expires_at <= now,
        }
    }
}

/// In-memory session store.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: HashMap<Uuid, Session>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a session and return its identifier.
    pub fn insert(&mut self, session: Session) -> Uuid {
        let id = Uuid::new_v4();
        self.sessions.insert(id, session);
        id
    }

    pub fn get(&self, id: &Uuid) -> Option<&Session> {
        self.sessions.get(id)
    }

    /// Remove a session. Returns whether it existed.
    pub fn remove(&mut self, id: &Uuid) -> bool {
        self.sessions.remove(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_for(email: &str, expires_at: i64) -> Session {
        Session {
            email: email.to_string(),
            claims: serde_json::json!({"email": email, "exp": expires_at}),
            expires_at,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn read_recomputes_role_from_allow_list() {
        let session = session_for("a@x.com", i64::MAX);

        let listed = AllowList::parse("a@x.com");
        let identity = SessionIdentity::read(&session, &listed, 1_700_000_000);
        assert_eq!(identity.role, Role::Editor);

        // Same session, different allow-list: role follows the list.
        let unlisted = AllowList::parse("b@x.com");
        let identity = SessionIdentity::read(&session, &unlisted, 1_700_000_000);
        assert_eq!(identity.role, Role::Viewer);
    }

    #[test]
    fn read_flags_expired_session() {
        let session = session_for("a@x.com", 1_700_000_000);

        let list = AllowList::parse("a@x.com");
        let before = SessionIdentity::read(&session, &list, 1_699_999_999);
        assert!(!before.session_expired);

        let after = SessionIdentity::read(&session, &list, 1_700_000_001);
        assert!(after.session_expired);
        // Expiry does not strip the role; callers decide what to do with it.
        assert_eq!(after.role, Role::Editor);
    }

    #[test]
    fn store_roundtrip_and_remove() {
        let mut store = SessionStore::new();
        assert!(store.is_empty());

        let id = store.insert(session_for("a@x.com", 1));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&id).unwrap().email, "a@x.com");

        assert!(store.remove(&id));
        assert!(!store.remove(&id));
        assert!(store.is_empty());
    }
}
