//! Authentication service for JWT bearer tokens and HTTP basic credentials.

use std::fmt;
use std::str::FromStr;

use axum::http::Method;
use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand::Rng;
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::error::AppError;

type HmacSha256 = Hmac<Sha256>;

/// Role carried in the `role` claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// Full access.
    Admin,
    /// Read-only access (`GET` and `HEAD`).
    User,
}

impl Role {
    pub fn allows(&self, method: &Method) -> bool {
        match self {
            Role::Admin => true,
            Role::User => method == Method::GET || method == Method::HEAD,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => f.write_str("ADMIN"),
            Role::User => f.write_str("USER"),
        }
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ADMIN" => Ok(Role::Admin),
            "USER" => Ok(Role::User),
            other => Err(AppError::bad_request(format!(
                "Unknown role '{other}', expected ADMIN or USER"
            ))),
        }
    }
}

/// Registered JWT claims plus the application role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub jti: String,
    pub iss: String,
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    pub role: Role,
}

/// Authenticated caller, stored in request extensions by the auth middleware.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub subject: String,
    pub role: Role,
}

impl Principal {
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the role may not use `method`.
    pub fn authorize(&self, method: &Method) -> Result<(), AppError> {
        if self.role.allows(method) {
            Ok(())
        } else {
            Err(AppError::unauthorized(format!(
                "Role {} is not allowed to perform {method} requests",
                self.role
            )))
        }
    }
}

struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    issuer: String,
}

/// Basic credentials kept only as an HMAC-SHA256 digest under a per-process key.
struct BasicCredentials {
    key: [u8; 32],
    digest: Vec<u8>,
}

impl BasicCredentials {
    fn new(username: &str, password: &str) -> Self {
        let mut key = [0u8; 32];
        rand::rng().fill(&mut key);

        let digest = Self::mac(&key, username, password)
            .finalize()
            .into_bytes()
            .to_vec();

        Self { key, digest }
    }

    fn mac(key: &[u8], username: &str, password: &str) -> HmacSha256 {
        let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts any key length");
        mac.update(username.as_bytes());
        mac.update(b":");
        mac.update(password.as_bytes());
        mac
    }

    /// Constant-time comparison through [`Mac::verify_slice`].
    fn matches(&self, username: &str, password: &str) -> bool {
        Self::mac(&self.key, username, password)
            .verify_slice(&self.digest)
            .is_ok()
    }
}

/// Issues and validates credentials.
///
/// JWT support and basic credentials are configured independently; the router
/// decides which middleware runs according to the configured auth mode.
#[derive(Default)]
pub struct AuthService {
    jwt: Option<JwtKeys>,
    basic: Option<BasicCredentials>,
}

impl AuthService {
    /// An auth service with nothing configured; every authentication attempt fails.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Enables HS256 tokens signed with a base64-encoded secret.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::BadRequest`] if the secret is not valid base64.
    pub fn with_jwt(
        mut self,
        secret_base64: &str,
        issuer: impl Into<String>,
    ) -> Result<Self, AppError> {
        let encoding = EncodingKey::from_base64_secret(secret_base64)
            .map_err(|e| AppError::bad_request(format!("Invalid JWT secret: {e}")))?;
        let decoding = DecodingKey::from_base64_secret(secret_base64)
            .map_err(|e| AppError::bad_request(format!("Invalid JWT secret: {e}")))?;

        self.jwt = Some(JwtKeys {
            encoding,
            decoding,
            issuer: issuer.into(),
        });
        Ok(self)
    }

    /// Enables basic authentication for a single account, granted [`Role::Admin`].
    pub fn with_basic(mut self, username: &str, password: &str) -> Self {
        self.basic = Some(BasicCredentials::new(username, password));
        self
    }

    /// Signs a token for `subject` valid for `ttl`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if JWT support is not configured or signing fails.
    pub fn issue_token(
        &self,
        subject: &str,
        role: Role,
        ttl: Duration,
    ) -> Result<String, AppError> {
        let keys = self
            .jwt
            .as_ref()
            .ok_or_else(|| AppError::internal("JWT support is not configured"))?;

        let mut jti = [0u8; 16];
        rand::rng().fill(&mut jti);

        let now = Utc::now();
        let claims = Claims {
            jti: hex::encode(jti),
            iss: keys.issuer.clone(),
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            role,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &keys.encoding)
            .map_err(|e| AppError::internal(format!("Failed to sign token: {e}")))
    }

    /// Verifies signature, issuer and expiry, then returns the claims.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] for malformed, expired, foreign or
    /// wrongly signed tokens.
    pub fn decode_token(&self, token: &str) -> Result<Claims, AppError> {
        let keys = self
            .jwt
            .as_ref()
            .ok_or_else(|| AppError::unauthorized("Bearer authentication is not enabled"))?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&keys.issuer]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        decode::<Claims>(token, &keys.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "Rejected bearer token");
                AppError::unauthorized("Invalid or expired token")
            })
    }

    pub fn authenticate_bearer(&self, token: &str) -> Result<Principal, AppError> {
        let claims = self.decode_token(token)?;
        Ok(Principal {
            subject: claims.sub,
            role: claims.role,
        })
    }

    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the credentials do not match or basic
    /// authentication is not configured.
    pub fn authenticate_basic(
        &self,
        username: &str,
        password: Option<&str>,
    ) -> Result<Principal, AppError> {
        let basic = self
            .basic
            .as_ref()
            .ok_or_else(|| AppError::unauthorized("Basic authentication is not enabled"))?;

        if !basic.matches(username, password.unwrap_or_default()) {
            return Err(AppError::unauthorized("Invalid username or password"));
        }

        Ok(Principal {
            subject: username.to_string(),
            role: Role::Admin,
        })
    }
}
