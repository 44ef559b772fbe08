use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expires_in is not a number: {value}")]
    InvalidExpiresIn { value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AccessToken {
    pub access_token: String,
    pub expires_in_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
struct AccessTokenJson {
    access_token: String,
    expires_in: ExpiresIn,
}

// The sandbox returns `expires_in` as the string "3599"; production has been
// observed returning a bare number. Accept both.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum ExpiresIn {
    Number(u64),
    String(String),
}

pub(crate) fn decode_access_token(json: &str) -> Result<AccessToken, TransportError> {
    let parsed: AccessTokenJson = serde_json::from_str(json)?;

    let expires_in_secs = match parsed.expires_in {
        ExpiresIn::Number(value) => value,
        ExpiresIn::String(value) => value
            .trim()
            .parse()
            .map_err(|_| TransportError::InvalidExpiresIn { value })?,
    };

    Ok(AccessToken {
        access_token: parsed.access_token,
        expires_in_secs,
    })
}
