//! Session tokens issued by the identity provider.
//!
//! Sign-in itself (credentials, wallet, OAuth) happens outside the kernel. The
//! provider hands the browser an HS256 JWT carrying the user's roles and
//! permissions; the kernel only verifies it and turns it into an
//! [`AuthorizationContext`].

use std::fmt;

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::access::AuthorizationContext;
use crate::error::NavError;
use crate::models::role::{Grants, default_grants};

/// JWT issuer claim value.
const ISSUER: &str = "cornice";

/// Default session lifetime (24 hours).
pub const DEFAULT_SESSION_LIFETIME_SECS: i64 = 24 * 3600;

/// How the user signed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentityProvider {
    Credentials,
    Wallet,
    Google,
    Facebook,
}

impl IdentityProvider {
    /// Social logins create the account on first sign-in and grant defaults.
    pub fn is_oauth(self) -> bool {
        matches!(self, Self::Google | Self::Facebook)
    }
}

impl fmt::Display for IdentityProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Credentials => "credentials",
            Self::Wallet => "wallet",
            Self::Google => "google",
            Self::Facebook => "facebook",
        };
        f.write_str(name)
    }
}

/// Session token claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub iss: String,
    /// User identifier (account id, email or wallet address).
    pub sub: String,
    pub provider: IdentityProvider,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub permissions: Vec<String>,
    pub iat: i64,
    pub exp: i64,
}

impl SessionClaims {
    /// The grants carried by the token, falling back to the social-login
    /// defaults when an OAuth token carries none.
    pub fn grants(&self) -> Grants {
        let grants = Grants {
            roles: self.roles.clone(),
            permissions: self.permissions.clone(),
        };
        if grants.is_empty() && self.provider.is_oauth() {
            return default_grants();
        }
        grants
    }

    pub fn context(&self) -> AuthorizationContext {
        self.grants().context()
    }
}

/// Signs and verifies session tokens with a shared secret.
#[derive(Clone)]
pub struct SessionVerifier {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl SessionVerifier {
    /// Create a verifier with HMAC-SHA256 signing.
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
        }
    }

    /// Issue a token for `sub`, valid for `lifetime_secs`.
    pub fn issue(
        &self,
        sub: &str,
        provider: IdentityProvider,
        grants: &Grants,
        lifetime_secs: i64,
    ) -> Result<String, NavError> {
        let now = chrono::Utc::now().timestamp();
        let claims = SessionClaims {
            iss: ISSUER.to_string(),
            sub: sub.to_string(),
            provider,
            roles: grants.roles.clone(),
            permissions: grants.permissions.clone(),
            iat: now,
            exp: now + lifetime_secs,
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| NavError::AuthenticationFailed(format!("failed to sign session: {e}")))
    }

    /// Verify signature, issuer and expiry and return the claims.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, NavError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[ISSUER]);
        validation.validate_aud = false;

        let data = jsonwebtoken::decode::<SessionClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| {
                debug!(error = %e, "session token rejected");
                NavError::AuthenticationFailed(e.to_string())
            })?;

        Ok(data.claims)
    }
}

impl fmt::Debug for SessionVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionVerifier").finish_non_exhaustive()
    }
}
