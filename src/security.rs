use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::models::Identity;

type HmacSha256 = Hmac<Sha256>;

// =============================================================================
// Caller Credentials
// =============================================================================

/// Unverified identity material presented with a call
///
/// Produced by the upstream auth gateway. Nothing here is trusted until an
/// [`IdentityResolver`] has checked it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub subject: String,
    pub name: String,
    /// Unix timestamp (seconds) at which the gateway signed the identity
    pub timestamp: i64,
    /// Hex-encoded HMAC-SHA256 over [`Credentials::signing_payload`]
    pub signature: String,
}

impl Credentials {
    /// The exact bytes the gateway signs: `subject\nname\ntimestamp`
    pub fn signing_payload(&self) -> String {
        format!("{}\n{}\n{}", self.subject, self.name, self.timestamp)
    }

    /// Build credentials signed with `secret`, as the auth gateway does
    pub fn signed(
        subject: impl Into<String>,
        name: impl Into<String>,
        timestamp: i64,
        secret: &str,
    ) -> Self {
        let mut credentials = Self {
            subject: subject.into(),
            name: name.into(),
            timestamp,
            signature: String::new(),
        };
        credentials.signature = sign(&credentials.signing_payload(), secret);
        credentials
    }
}

/// Turns presented credentials into a verified caller identity
///
/// Returning `None` means the call is unauthenticated.
pub trait IdentityResolver: Send + Sync {
    fn resolve(&self, credentials: Option<&Credentials>) -> Option<Identity>;
}

/// Accepts identities signed by the auth gateway with a shared secret
pub struct HmacIdentityResolver {
    secret: String,
    max_age_secs: i64,
}

impl HmacIdentityResolver {
    pub fn new(secret: impl Into<String>, max_age_secs: i64) -> Self {
        Self {
            secret: secret.into(),
            max_age_secs,
        }
    }
}

impl IdentityResolver for HmacIdentityResolver {
    fn resolve(&self, credentials: Option<&Credentials>) -> Option<Identity> {
        let credentials = credentials?;

        if credentials.subject.is_empty() {
            tracing::warn!("Identity with empty subject rejected");
            return None;
        }

        if !verify_hmac(
            &credentials.signing_payload(),
            &credentials.signature,
            &self.secret,
        ) {
            tracing::warn!("Invalid identity signature for subject {}", credentials.subject);
            return None;
        }

        if !validate_timestamp(credentials.timestamp, self.max_age_secs) {
            return None;
        }

        Some(Identity {
            subject: credentials.subject.clone(),
            name: credentials.name.clone(),
        })
    }
}

// =============================================================================
// HMAC Helpers
// =============================================================================

/// Hex-encoded HMAC-SHA256 of `data` under `secret`
pub fn sign(data: &str, secret: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .unwrap_or_else(|_| unreachable!("HMAC accepts keys of any length"));
    mac.update(data.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Verify HMAC-SHA256 signature
///
/// # Arguments
/// * `data` - The data that was signed
/// * `signature` - The hex-encoded HMAC signature
/// * `secret` - The shared secret key (from environment)
pub fn verify_hmac(data: &str, signature: &str, secret: &str) -> bool {
    let mut mac = match HmacSha256::new_from_slice(secret.as_bytes()) {
        Ok(m) => m,
        Err(_) => {
            tracing::error!("Failed to create HMAC instance");
            return false;
        }
    };

    mac.update(data.as_bytes());

    let sig_bytes = match hex::decode(signature) {
        Ok(bytes) => bytes,
        Err(_) => {
            tracing::warn!("Invalid hex signature format");
            return false;
        }
    };

    // Constant-time comparison
    mac.verify_slice(&sig_bytes).is_ok()
}

/// Validate timestamp is within acceptable range
///
/// Prevents replay of captured identity headers.
///
/// # Arguments
/// * `timestamp` - Unix timestamp in seconds from the gateway
/// * `max_age_secs` - Maximum age allowed in seconds
pub fn validate_timestamp(timestamp: i64, max_age_secs: i64) -> bool {
    let now = chrono::Utc::now().timestamp();
    let age_seconds = now.abs_diff(timestamp);

    if age_seconds > u64::try_from(max_age_secs).unwrap_or(0) {
        tracing::warn!(
            "Identity timestamp out of range: {} seconds (max: {})",
            age_seconds,
            max_age_secs
        );
        return false;
    }

    true
}
