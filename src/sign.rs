//! Request signing: Daraja timestamps and the derived STK password.
//!
//! Every signed call embeds a fresh 14-digit timestamp in the gateway's home
//! timezone (Africa/Nairobi) and a password derived from it, so signed fields
//! are recomputed per call and never cached.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};
use chrono_tz::Africa::Nairobi;

use crate::domain::{PassKey, ShortCode};

/// Current Daraja timestamp (`yyyyMMddHHmmss`, Nairobi time).
pub fn timestamp() -> String {
    timestamp_at(Utc::now())
}

/// Daraja timestamp for a given instant.
///
/// The instant is converted to Africa/Nairobi regardless of the host's local
/// timezone; the gateway validates the password against its own clock.
pub fn timestamp_at(now: DateTime<Utc>) -> String {
    now.with_timezone(&Nairobi)
        .format("%Y%m%d%H%M%S")
        .to_string()
}

/// Derive the STK password: base64 of `short_code + pass_key + timestamp`,
/// concatenated with no delimiter.
pub fn password(short_code: &ShortCode, pass_key: &PassKey, timestamp: &str) -> String {
    let to_encode = format!(
        "{}{}{}",
        short_code.as_str(),
        pass_key.as_str(),
        timestamp
    );
    STANDARD.encode(to_encode.as_bytes())
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Timestamp/password pair injected into signed requests.
pub struct SignedFields {
    pub timestamp: String,
    pub password: String,
}

impl SignedFields {
    /// Sign with the current time.
    pub fn generate(short_code: &ShortCode, pass_key: &PassKey) -> Self {
        Self::at(short_code, pass_key, Utc::now())
    }

    /// Sign for a given instant.
    pub fn at(short_code: &ShortCode, pass_key: &PassKey, now: DateTime<Utc>) -> Self {
        let timestamp = timestamp_at(now);
        let password = password(short_code, pass_key, &timestamp);
        Self {
            timestamp,
            password,
        }
    }
}
