use crate::domain::value::CheckoutRequestId;

#[derive(Debug, Clone, PartialEq)]
/// Final result of an STK push transaction, delivered to the consumer's
/// callback URL.
///
/// Failed or cancelled transactions omit the metadata; `metadata` is empty
/// in that case.
pub struct StkCallback {
    pub merchant_request_id: String,
    pub checkout_request_id: CheckoutRequestId,
    pub result_code: i64,
    pub result_desc: String,
    pub metadata: Vec<CallbackItem>,
}

impl StkCallback {
    /// Whether the customer completed the payment.
    pub fn is_success(&self) -> bool {
        self.result_code == 0
    }

    /// Look up a metadata item by its `Name` (e.g. `MpesaReceiptNumber`).
    pub fn metadata_value(&self, name: &str) -> Option<&CallbackValue> {
        self.metadata
            .iter()
            .find(|item| item.name == name)
            .and_then(|item| item.value.as_ref())
    }
}

#[derive(Debug, Clone, PartialEq)]
/// One name/value pair from the callback metadata.
pub struct CallbackItem {
    pub name: String,
    pub value: Option<CallbackValue>,
}

#[derive(Debug, Clone, PartialEq)]
/// Metadata value; Daraja mixes numeric and string values in the same list.
pub enum CallbackValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl CallbackValue {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(value) => Some(*value as f64),
            Self::Float(value) => Some(*value),
            Self::Text(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// C2B payment notification POSTed to the registered confirmation and
/// validation URLs.
pub struct C2bTransaction {
    pub transaction_type: String,
    pub trans_id: String,
    pub trans_time: String,
    pub trans_amount: String,
    pub business_short_code: String,
    pub msisdn: String,
    pub bill_ref_number: Option<String>,
    pub invoice_number: Option<String>,
    pub org_account_balance: Option<String>,
    pub third_party_trans_id: Option<String>,
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Reply the consumer's validation URL must send back to Daraja.
pub struct C2bValidationResult {
    pub result_code: i32,
    pub result_desc: String,
}

impl C2bValidationResult {
    /// Accept the pending C2B payment.
    pub fn accept(message: impl Into<String>) -> Self {
        Self {
            result_code: 0,
            result_desc: message.into(),
        }
    }

    /// Reject the pending C2B payment.
    pub fn reject(message: impl Into<String>) -> Self {
        Self {
            result_code: 1,
            result_desc: message.into(),
        }
    }
}
