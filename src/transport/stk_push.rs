use serde::{Deserialize, Serialize};

use crate::domain::{CheckoutRequestId, ShortCode, StkPush, StkPushResponse, ValidationError};
use crate::sign::SignedFields;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid field in response: {0}")]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Serialize)]
struct StkPushJsonRequest<'a> {
    #[serde(rename = "BusinessShortCode")]
    business_short_code: &'a str,
    #[serde(rename = "Password")]
    password: &'a str,
    #[serde(rename = "Timestamp")]
    timestamp: &'a str,
    #[serde(rename = "TransactionType")]
    transaction_type: &'a str,
    #[serde(rename = "Amount")]
    amount: String,
    #[serde(rename = "PartyA")]
    party_a: &'a str,
    #[serde(rename = "PartyB")]
    party_b: &'a str,
    #[serde(rename = "PhoneNumber")]
    phone_number: &'a str,
    #[serde(rename = "CallBackURL")]
    call_back_url: &'a str,
    #[serde(rename = "AccountReference")]
    account_reference: &'a str,
    #[serde(rename = "TransactionDesc")]
    transaction_desc: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
struct StkPushJsonResponse {
    #[serde(rename = "MerchantRequestID")]
    merchant_request_id: String,
    #[serde(rename = "CheckoutRequestID")]
    checkout_request_id: String,
    #[serde(rename = "ResponseCode")]
    response_code: String,
    #[serde(rename = "ResponseDescription")]
    response_description: String,
    #[serde(rename = "CustomerMessage", default)]
    customer_message: Option<String>,
}

/// Finalize the outgoing payload: configured short code, signed fields, and
/// the canonical subscriber number as both `PartyA` and `PhoneNumber`.
/// `PartyB` falls back to the configured short code when not overridden.
pub(crate) fn encode_stk_push(
    request: &StkPush,
    short_code: &ShortCode,
    signed: &SignedFields,
) -> Result<String, serde_json::Error> {
    let party_b = request
        .party_b()
        .map(ShortCode::as_str)
        .unwrap_or_else(|| short_code.as_str());

    serde_json::to_string(&StkPushJsonRequest {
        business_short_code: short_code.as_str(),
        password: &signed.password,
        timestamp: &signed.timestamp,
        transaction_type: request.transaction_type().as_str(),
        amount: request.amount().value().to_string(),
        party_a: request.phone_number().as_str(),
        party_b,
        phone_number: request.phone_number().as_str(),
        call_back_url: request.callback_url().as_str(),
        account_reference: request.account_reference().as_str(),
        transaction_desc: request.transaction_desc().as_str(),
    })
}

pub(crate) fn decode_stk_push_response(json: &str) -> Result<StkPushResponse, TransportError> {
    let parsed: StkPushJsonResponse = serde_json::from_str(json)?;

    Ok(StkPushResponse {
        merchant_request_id: parsed.merchant_request_id,
        checkout_request_id: CheckoutRequestId::new(parsed.checkout_request_id)?,
        response_code: parsed.response_code,
        response_description: parsed.response_description,
        customer_message: parsed.customer_message,
    })
}

#[cfg(test)]
mod tests {
    use crate::domain::{AccountReference, Amount, CallbackUrl, Msisdn, PassKey, TransactionDesc};

    use super::*;

    fn sample_push() -> StkPush {
        StkPush::pay_bill(
            Amount::new(10).unwrap(),
            Msisdn::new("0712345678").unwrap(),
            AccountReference::new("invoice-123").unwrap(),
            TransactionDesc::new("Payment for shoes").unwrap(),
            CallbackUrl::new("https://example.com/mpesa/callback").unwrap(),
        )
    }

    #[test]
    fn encode_injects_signed_fields_and_defaults_party_b() {
        let short_code = ShortCode::new("174379").unwrap();
        let signed = SignedFields {
            timestamp: "20251021105921".to_owned(),
            password: "MTc0Mzc5WDIwMjUxMDIxMTA1OTIx".to_owned(),
        };

        let body = encode_stk_push(&sample_push(), &short_code, &signed).unwrap();
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();

        assert_eq!(value["BusinessShortCode"], "174379");
        assert_eq!(value["Password"], "MTc0Mzc5WDIwMjUxMDIxMTA1OTIx");
        assert_eq!(value["Timestamp"], "20251021105921");
        assert_eq!(value["TransactionType"], "CustomerPayBillOnline");
        assert_eq!(value["Amount"], "10");
        assert_eq!(value["PartyA"], "254712345678");
        assert_eq!(value["PartyB"], "174379");
        assert_eq!(value["PhoneNumber"], "254712345678");
        assert_eq!(value["CallBackURL"], "https://example.com/mpesa/callback");
        assert_eq!(value["AccountReference"], "invoice-123");
        assert_eq!(value["TransactionDesc"], "Payment for shoes");
    }

    #[test]
    fn encode_honors_party_b_override() {
        let short_code = ShortCode::new("174379").unwrap();
        let till = ShortCode::new("864233").unwrap();
        let signed = SignedFields::at(
            &short_code,
            &PassKey::new("X").unwrap(),
            chrono::Utc::now(),
        );

        let push = sample_push().with_party_b(till);
        let body = encode_stk_push(&push, &short_code, &signed).unwrap();
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();

        assert_eq!(value["PartyB"], "864233");
        assert_eq!(value["BusinessShortCode"], "174379");
    }

    #[test]
    fn decode_maps_acknowledgement() {
        let json = r#"
        {
          "MerchantRequestID": "29115-34620561-1",
          "CheckoutRequestID": "ws_CO_191220191020363925",
          "ResponseCode": "0",
          "ResponseDescription": "Success. Request accepted for processing",
          "CustomerMessage": "Success. Request accepted for processing"
        }
        "#;

        let response = decode_stk_push_response(json).unwrap();
        assert_eq!(response.merchant_request_id, "29115-34620561-1");
        assert_eq!(
            response.checkout_request_id.as_str(),
            "ws_CO_191220191020363925"
        );
        assert_eq!(response.response_code, "0");
        assert!(response.customer_message.is_some());
    }

    #[test]
    fn decode_tolerates_missing_customer_message_and_extra_fields() {
        let json = r#"
        {
          "MerchantRequestID": "29115-34620561-1",
          "CheckoutRequestID": "ws_CO_191220191020363925",
          "ResponseCode": "0",
          "ResponseDescription": "Accepted",
          "SomethingNew": true
        }
        "#;

        let response = decode_stk_push_response(json).unwrap();
        assert_eq!(response.customer_message, None);
    }

    #[test]
    fn decode_rejects_malformed_json() {
        assert!(matches!(
            decode_stk_push_response("{ not json }"),
            Err(TransportError::Json(_))
        ));
    }
}
