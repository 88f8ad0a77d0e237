// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::auth::{SessionStore, TokenVerifier};
use crate::rpc::RpcPool;

/// Shared application state.
///
/// Everything here is either immutable after construction (verifier, pool)
/// or guarded by a lock (session store), so handlers clone freely.
#[derive(Clone)]
pub struct AppState {
    pub verifier: Arc<TokenVerifier>,
    pub sessions: Arc<RwLock<SessionStore>>,
    pub rpc: Arc<RpcPool>,
}

impl AppState {
    pub fn new(verifier: TokenVerifier, rpc: RpcPool) -> Self {
        Self {
            verifier: Arc::new(verifier),
            sessions: Arc::new(RwLock::new(SessionStore::new())),
            rpc: Arc::new(rpc),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::VerifierConfig;

    #[test]
    fn state_is_cloneable() {
        let state = AppState::new(
            TokenVerifier::new(VerifierConfig::default()),
            RpcPool::from_config("", &[]),
        );
        let clone = state.clone();
        assert!(Arc::ptr_eq(&state.verifier, &clone.verifier));
    }
}
