// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token verification and role resolution.
//!
//! ## Flow
//!
//! 1. Caller presents a bearer token from the identity provider
//! 2. The verifier checks signature, expiry, and audience against the
//!    provider's published JWKS
//! 3. The verified email is matched against the editor allow-list to derive
//!    the role (`editor` if listed, `viewer` otherwise)
//!
//! The role is a pure function of `(email, allow-list)` and is recomputed on
//! every verification; nothing is cached across requests. All failure modes
//! surface as a single `InvalidToken` error; the sub-reason is only logged.
//!
//! ## Authentication Modes
//!
//! - **Production mode** (JWKS URL configured): full signature verification
//! - **Development mode** (no JWKS URL): structure and expiry checks only

use jsonwebtoken::{decode, decode_header, Validation};

use super::claims::{IdTokenClaims, ResolvedIdentity};
use super::error::AuthError;
use super::jwks::JwksClient;
use super::roles::AllowList;

/// Clock skew tolerance (60 seconds).
const CLOCK_SKEW_LEEWAY: u64 = 60;

/// Configuration for a [`TokenVerifier`].
///
/// Injected explicitly at construction so tests can supply distinct
/// configurations without process-wide side effects.
#[derive(Debug, Clone, Default)]
pub struct VerifierConfig {
    /// JWKS endpoint of the identity provider. `None` enables development
    /// mode (no signature verification).
    pub jwks_url: Option<String>,
    /// Expected issuer claim, enforced when set.
    pub issuer: Option<String>,
    /// Expected audience claim (the configured client identifier), enforced
    /// when set.
    pub audience: Option<String>,
    /// Comma-separated editor allow-list.
    pub editor_allowlist: String,
}

/// Verifies bearer tokens and resolves the caller's role.
#[derive(Clone)]
pub struct TokenVerifier {
    jwks: Option<JwksClient>,
    issuer: Option<String>,
    audience: Option<String>,
    allow_list: AllowList,
}

impl TokenVerifier {
    /// Build a verifier from explicit configuration.
    pub fn new(config: VerifierConfig) -> Self {
        let jwks = config.jwks_url.as_deref().map(JwksClient::new);
        if jwks.is_none() {
            tracing::warn!(
                "no JWKS URL configured; token signatures will NOT be verified (development mode)"
            );
        }

        Self {
            jwks,
            issuer: config.issuer,
            audience: config.audience,
            allow_list: AllowList::parse(&config.editor_allowlist),
        }
    }

    /// The allow-list this verifier derives roles from.
    pub fn allow_list(&self) -> &AllowList {
        &self.allow_list
    }

    /// The JWKS client, when running in production mode.
    pub fn jwks(&self) -> Option<&JwksClient> {
        self.jwks.as_ref()
    }

    /// Verify a bearer token and resolve the caller's identity and role.
    ///
    /// An empty token fails immediately without contacting the provider.
    /// Every other failure mode (malformed, expired, wrong audience, bad
    /// signature, provider unreachable, missing email claim) also collapses
    /// into [`AuthError::InvalidToken`].
    pub async fn verify(&self, token: &str) -> Result<ResolvedIdentity, AuthError> {
        if token.trim().is_empty() {
            tracing::debug!("token verification failed: empty token");
            return Err(AuthError::InvalidToken);
        }

        let claims = match &self.jwks {
            Some(jwks) => self.verify_signed(token, jwks).await?,
            None => self.decode_unverified(token)?,
        };

        self.resolve(claims)
    }

    /// Derive the caller's identity from a verified claim set.
    fn resolve(&self, claims: IdTokenClaims) -> Result<ResolvedIdentity, AuthError> {
        let Some(email) = claims.email.clone() else {
            tracing::warn!("token verification failed: no email claim");
            return Err(AuthError::InvalidToken);
        };

        let role = self.allow_list.role_for(&email);

        Ok(ResolvedIdentity {
            email,
            role,
            claims: claims.to_raw(),
        })
    }

    /// Production verification against the provider's JWKS.
    async fn verify_signed(
        &self,
        token: &str,
        jwks: &JwksClient,
    ) -> Result<IdTokenClaims, AuthError> {
        let header = decode_header(token).map_err(|e| {
            tracing::debug!(error = %e, "token verification failed: malformed header");
            AuthError::InvalidToken
        })?;

        let (decoding_key, algorithm) = jwks.decoding_key_for(&header).await.map_err(|e| {
            tracing::warn!(error = %e, "token verification failed: no decoding key");
            AuthError::InvalidToken
        })?;

        let mut validation = Validation::new(algorithm);
        validation.leeway = CLOCK_SKEW_LEEWAY;

        if let Some(issuer) = &self.issuer {
            validation.set_issuer(&[issuer]);
        }

        if let Some(audience) = &self.audience {
            validation.set_audience(&[audience]);
        } else {
            validation.validate_aud = false;
        }

        let token_data = decode::<IdTokenClaims>(token, &decoding_key, &validation)
            .map_err(|e| {
                tracing::debug!(kind = ?e.kind(), "token verification failed");
                AuthError::InvalidToken
            })?;

        Ok(token_data.claims)
    }

    /// Development-mode decode: structure and expiry only, no signature.
    fn decode_unverified(&self, token: &str) -> Result<IdTokenClaims, AuthError> {
        let token_data = jsonwebtoken::dangerous::insecure_decode::<IdTokenClaims>(token)
            .map_err(|e| {
                tracing::debug!(error = %e, "token verification failed: malformed token");
                AuthError::InvalidToken
            })?;

        let claims = token_data.claims;

        let now = chrono::Utc::now().timestamp();
        if claims.exp > 0 && claims.exp < now - CLOCK_SKEW_LEEWAY as i64 {
            tracing::debug!("token verification failed: expired");
            return Err(AuthError::InvalidToken);
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::roles::Role;

    /// Development-mode verifier with the given allow-list.
    fn dev_verifier(allowlist: &str) -> TokenVerifier {
        TokenVerifier::new(VerifierConfig {
            jwks_url: None,
            issuer: None,
            audience: None,
            editor_allowlist: allowlist.to_string(),
        })
    }

    /// Build an unsigned JWT with the given claims JSON (development mode
    /// skips signature verification).
    fn unsigned_jwt(claims_json: &str) -> String {
        use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

        let header = r#"{"alg":"RS256","typ":"JWT"}"#;
        let header_b64 = URL_SAFE_NO_PAD.encode(header.as_bytes());
        let claims_b64 = URL_SAFE_NO_PAD.encode(claims_json.as_bytes());
        format!("{header_b64}.{claims_b64}.fake_signature")
    }

    fn token_for(email: &str) -> String {
        unsigned_jwt(&format!(
            r#"{{"email":"{email}","sub":"user_1","iat":1609459200,"exp":9999999999,"iss":"test"}}"#
        ))
    }

    #[tokio::test]
    async fn empty_token_fails_without_provider_call() {
        let verifier = dev_verifier("a@x.com");
        let err = verifier.verify("").await.unwrap_err();
        assert_eq!(err, AuthError::InvalidToken);

        let err = verifier.verify("   ").await.unwrap_err();
        assert_eq!(err, AuthError::InvalidToken);
    }

    #[tokio::test]
    async fn malformed_token_is_invalid() {
        let verifier = dev_verifier("a@x.com");
        let err = verifier.verify("not-a-jwt").await.unwrap_err();
        assert_eq!(err, AuthError::InvalidToken);
    }

    #[tokio::test]
    async fn expired_token_is_invalid() {
        let verifier = dev_verifier("a@x.com");
        let token = unsigned_jwt(
            r#"{"email":"a@x.com","iat":1609459200,"exp":1609462800,"iss":"test"}"#,
        );
        let err = verifier.verify(&token).await.unwrap_err();
        assert_eq!(err, AuthError::InvalidToken);
    }

    #[tokio::test]
    async fn missing_email_claim_is_invalid() {
        let verifier = dev_verifier("a@x.com");
        let token =
            unsigned_jwt(r#"{"sub":"user_1","iat":1609459200,"exp":9999999999,"iss":"test"}"#);
        let err = verifier.verify(&token).await.unwrap_err();
        assert_eq!(err, AuthError::InvalidToken);
    }

    #[tokio::test]
    async fn allow_listed_email_resolves_editor() {
        let verifier = dev_verifier("a@x.com,b@x.com");
        let identity = verifier.verify(&token_for("a@x.com")).await.unwrap();
        assert_eq!(identity.email, "a@x.com");
        assert_eq!(identity.role, Role::Editor);
    }

    #[tokio::test]
    async fn unlisted_email_resolves_viewer() {
        let verifier = dev_verifier("a@x.com,b@x.com");
        let identity = verifier.verify(&token_for("c@x.com")).await.unwrap();
        assert_eq!(identity.role, Role::Viewer);
    }

    #[tokio::test]
    async fn role_lookup_is_case_sensitive() {
        let verifier = dev_verifier("a@x.com");
        let identity = verifier.verify(&token_for("A@x.com")).await.unwrap();
        assert_eq!(identity.role, Role::Viewer);
    }

    #[tokio::test]
    async fn raw_claims_survive_verification() {
        let verifier = dev_verifier("");
        let token = unsigned_jwt(
            r#"{"email":"c@x.com","iat":1609459200,"exp":9999999999,"iss":"test","tenant":"acme"}"#,
        );
        let identity = verifier.verify(&token).await.unwrap();
        assert_eq!(identity.claims["tenant"], "acme");
        assert_eq!(identity.claims["iss"], "test");
    }
}
