use crate::domain::validation::ValidationError;

use url::Url;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Daraja consumer key from the Safaricom developer portal.
///
/// Invariant: non-empty after trimming.
pub struct ConsumerKey(String);

impl ConsumerKey {
    pub const FIELD: &'static str = "consumer key";

    /// Create a validated [`ConsumerKey`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Daraja consumer secret from the Safaricom developer portal.
///
/// Invariant: must not be empty (whitespace is preserved and allowed).
pub struct ConsumerSecret(String);

impl ConsumerSecret {
    pub const FIELD: &'static str = "consumer secret";

    /// Create a validated [`ConsumerSecret`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the secret as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Business short code (PayBill or Till number).
///
/// Invariant: non-empty after trimming, ASCII digits only.
pub struct ShortCode(String);

impl ShortCode {
    /// JSON property name used by Daraja (`BusinessShortCode` / `ShortCode`).
    pub const FIELD: &'static str = "BusinessShortCode";

    /// Create a validated [`ShortCode`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated short code.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Lipa Na M-Pesa pass key, the shared secret behind the per-request password.
///
/// Invariant: must not be empty (whitespace is preserved and allowed).
pub struct PassKey(String);

impl PassKey {
    pub const FIELD: &'static str = "pass key";

    /// Create a validated [`PassKey`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the pass key as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Canonical Kenyan MSISDN as required by Daraja: `2547XXXXXXXX`.
///
/// [`Msisdn::new`] normalizes the common local shapes before validating:
/// `0712345678`, `712345678`, `254712345678`, and `+254712345678` all
/// canonicalize to `254712345678`. Anything else is rejected.
pub struct Msisdn(String);

impl Msisdn {
    /// JSON property name used by Daraja (`PhoneNumber`).
    pub const FIELD: &'static str = "PhoneNumber";

    /// Normalize and validate a subscriber number.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }

        // Drop internal whitespace, then a single leading `+`.
        let compact: String = trimmed.split_whitespace().collect();
        let digits = compact.strip_prefix('+').unwrap_or(&compact);

        let formatted = if let Some(rest) = digits.strip_prefix('0') {
            if rest.starts_with('7') {
                format!("254{rest}")
            } else {
                return Err(ValidationError::InvalidPhoneNumber {
                    input: trimmed.to_owned(),
                });
            }
        } else if digits.starts_with('7') {
            format!("254{digits}")
        } else if digits.starts_with("254") {
            digits.to_owned()
        } else {
            return Err(ValidationError::InvalidPhoneNumber {
                input: trimmed.to_owned(),
            });
        };

        // `254` + `7` + exactly 8 further digits.
        let valid = formatted.len() == 12
            && formatted.starts_with("2547")
            && formatted.bytes().all(|b| b.is_ascii_digit());
        if !valid {
            return Err(ValidationError::InvalidPhoneNumber {
                input: trimmed.to_owned(),
            });
        }

        Ok(Self(formatted))
    }

    /// Canonical `2547XXXXXXXX` form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Transaction amount in whole Kenyan shillings.
///
/// Invariant: at least 1. Daraja does not accept fractional amounts for
/// STK push.
pub struct Amount(u64);

impl Amount {
    /// JSON property name used by Daraja (`Amount`).
    pub const FIELD: &'static str = "Amount";

    /// Create a validated [`Amount`].
    pub fn new(value: u64) -> Result<Self, ValidationError> {
        if value == 0 {
            return Err(ValidationError::ZeroAmount);
        }
        Ok(Self(value))
    }

    /// Get the amount in whole shillings.
    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Caller-side reference shown on the customer's statement (`AccountReference`).
///
/// Invariant: non-empty after trimming.
pub struct AccountReference(String);

impl AccountReference {
    /// JSON property name used by Daraja (`AccountReference`).
    pub const FIELD: &'static str = "AccountReference";

    /// Create a validated [`AccountReference`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated reference.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Short human-readable payment description (`TransactionDesc`).
///
/// Invariant: non-empty after trimming.
pub struct TransactionDesc(String);

impl TransactionDesc {
    /// JSON property name used by Daraja (`TransactionDesc`).
    pub const FIELD: &'static str = "TransactionDesc";

    /// Create a validated [`TransactionDesc`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated description.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Publicly reachable URL that Daraja will POST results to.
///
/// Invariant: parses as an absolute `http`/`https` URL.
pub struct CallbackUrl(String);

impl CallbackUrl {
    /// JSON property name used by Daraja for STK push (`CallBackURL`).
    pub const FIELD: &'static str = "CallBackURL";

    /// Create a validated [`CallbackUrl`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }

        let parsed = Url::parse(trimmed).map_err(|_| ValidationError::InvalidUrl {
            input: trimmed.to_owned(),
        })?;
        if parsed.scheme() != "https" && parsed.scheme() != "http" {
            return Err(ValidationError::InvalidUrl {
                input: trimmed.to_owned(),
            });
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated URL.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Gateway-issued id correlating an STK push with its status query and
/// callback (`CheckoutRequestID`).
///
/// Invariant: non-empty after trimming.
pub struct CheckoutRequestId(String);

impl CheckoutRequestId {
    /// JSON property name used by Daraja (`CheckoutRequestID`).
    pub const FIELD: &'static str = "CheckoutRequestID";

    /// Create a validated [`CheckoutRequestId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_newtypes_trim_or_validate() {
        let key = ConsumerKey::new("  key ").unwrap();
        assert_eq!(key.as_str(), "key");
        assert!(ConsumerKey::new("  ").is_err());

        let secret = ConsumerSecret::new(" s3cret ").unwrap();
        assert_eq!(secret.as_str(), " s3cret ");
        assert!(ConsumerSecret::new("").is_err());

        let short_code = ShortCode::new(" 174379 ").unwrap();
        assert_eq!(short_code.as_str(), "174379");
        assert!(ShortCode::new("").is_err());
        assert!(ShortCode::new("17x379").is_err());

        let pass_key = PassKey::new("pk").unwrap();
        assert_eq!(pass_key.as_str(), "pk");
        assert!(PassKey::new("").is_err());

        let reference = AccountReference::new(" invoice-123 ").unwrap();
        assert_eq!(reference.as_str(), "invoice-123");
        assert!(AccountReference::new("  ").is_err());

        let desc = TransactionDesc::new(" Payment for shoes ").unwrap();
        assert_eq!(desc.as_str(), "Payment for shoes");
        assert!(TransactionDesc::new("").is_err());

        let id = CheckoutRequestId::new(" ws_CO_191220191020363925 ").unwrap();
        assert_eq!(id.as_str(), "ws_CO_191220191020363925");
        assert!(CheckoutRequestId::new("  ").is_err());
    }

    #[test]
    fn msisdn_accepts_all_local_shapes() {
        for input in [
            "0712345678",
            "712345678",
            "254712345678",
            "+254712345678",
            " 0712345678 ",
            "+254 712 345 678",
        ] {
            let msisdn = Msisdn::new(input).unwrap();
            assert_eq!(msisdn.as_str(), "254712345678", "input: {input:?}");
        }
    }

    #[test]
    fn msisdn_rejects_other_shapes() {
        for input in [
            "0812345678",
            "12345",
            "25471234567",
            "2547123456789",
            "254712345a78",
            "07123456789",
            "++254712345678",
            "phone",
        ] {
            let err = Msisdn::new(input).unwrap_err();
            assert!(
                matches!(err, ValidationError::InvalidPhoneNumber { .. }),
                "input: {input:?}, got: {err:?}"
            );
        }

        assert!(matches!(
            Msisdn::new("   "),
            Err(ValidationError::Empty {
                field: Msisdn::FIELD
            })
        ));
    }

    #[test]
    fn msisdn_error_names_the_offending_input() {
        let err = Msisdn::new(" 0812345678 ").unwrap_err();
        assert_eq!(err.to_string(), "invalid phone number: 0812345678");
    }

    #[test]
    fn amount_must_be_positive() {
        assert!(Amount::new(0).is_err());
        assert_eq!(Amount::new(10).unwrap().value(), 10);
    }

    #[test]
    fn callback_url_requires_http_scheme() {
        let url = CallbackUrl::new(" https://example.com/mpesa/callback ").unwrap();
        assert_eq!(url.as_str(), "https://example.com/mpesa/callback");
        assert!(CallbackUrl::new("ftp://example.com/cb").is_err());
        assert!(CallbackUrl::new("not a url").is_err());
        assert!(CallbackUrl::new("").is_err());
    }
}
