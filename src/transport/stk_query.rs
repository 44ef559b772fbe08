use serde::{Deserialize, Serialize};

use crate::domain::{CheckoutRequestId, ShortCode, StkQueryResponse, ValidationError};
use crate::sign::SignedFields;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid field in response: {0}")]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Serialize)]
struct StkQueryJsonRequest<'a> {
    #[serde(rename = "BusinessShortCode")]
    business_short_code: &'a str,
    #[serde(rename = "Password")]
    password: &'a str,
    #[serde(rename = "Timestamp")]
    timestamp: &'a str,
    #[serde(rename = "CheckoutRequestID")]
    checkout_request_id: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
struct StkQueryJsonResponse {
    #[serde(rename = "ResponseCode")]
    response_code: String,
    #[serde(rename = "ResponseDescription")]
    response_description: String,
    #[serde(rename = "MerchantRequestID")]
    merchant_request_id: String,
    #[serde(rename = "CheckoutRequestID")]
    checkout_request_id: String,
    #[serde(rename = "ResultCode")]
    result_code: String,
    #[serde(rename = "ResultDesc")]
    result_desc: String,
}

pub(crate) fn encode_stk_query(
    checkout_request_id: &CheckoutRequestId,
    short_code: &ShortCode,
    signed: &SignedFields,
) -> Result<String, serde_json::Error> {
    serde_json::to_string(&StkQueryJsonRequest {
        business_short_code: short_code.as_str(),
        password: &signed.password,
        timestamp: &signed.timestamp,
        checkout_request_id: checkout_request_id.as_str(),
    })
}

pub(crate) fn decode_stk_query_response(json: &str) -> Result<StkQueryResponse, TransportError> {
    let parsed: StkQueryJsonResponse = serde_json::from_str(json)?;

    Ok(StkQueryResponse {
        response_code: parsed.response_code,
        response_description: parsed.response_description,
        merchant_request_id: parsed.merchant_request_id,
        checkout_request_id: CheckoutRequestId::new(parsed.checkout_request_id)?,
        result_code: parsed.result_code,
        result_desc: parsed.result_desc,
    })
}

#[cfg(test)]
mod tests {
    use crate::domain::PassKey;

    use super::*;

    #[test]
    fn encode_carries_signed_fields_and_id() {
        let short_code = ShortCode::new("174379").unwrap();
        let signed = SignedFields {
            timestamp: "20251021105921".to_owned(),
            password: "MTc0Mzc5WDIwMjUxMDIxMTA1OTIx".to_owned(),
        };
        let id = CheckoutRequestId::new("ws_CO_191220191020363925").unwrap();

        let body = encode_stk_query(&id, &short_code, &signed).unwrap();
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();

        assert_eq!(value["BusinessShortCode"], "174379");
        assert_eq!(value["Password"], "MTc0Mzc5WDIwMjUxMDIxMTA1OTIx");
        assert_eq!(value["Timestamp"], "20251021105921");
        assert_eq!(value["CheckoutRequestID"], "ws_CO_191220191020363925");
    }

    #[test]
    fn encode_is_deterministic_for_fixed_signed_fields() {
        let short_code = ShortCode::new("174379").unwrap();
        let signed = SignedFields::at(
            &short_code,
            &PassKey::new("X").unwrap(),
            chrono::TimeZone::with_ymd_and_hms(&chrono::Utc, 2025, 10, 21, 7, 59, 21).unwrap(),
        );
        let id = CheckoutRequestId::new("ws_CO_1").unwrap();

        let first = encode_stk_query(&id, &short_code, &signed).unwrap();
        let second = encode_stk_query(&id, &short_code, &signed).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn decode_maps_query_result() {
        let json = r#"
        {
          "ResponseCode": "0",
          "ResponseDescription": "The service request has been accepted successfully",
          "MerchantRequestID": "22205-34066-1",
          "CheckoutRequestID": "ws_CO_13012021093521236557",
          "ResultCode": "0",
          "ResultDesc": "The service request is processed successfully."
        }
        "#;

        let response = decode_stk_query_response(json).unwrap();
        assert_eq!(response.result_code, "0");
        assert_eq!(
            response.checkout_request_id.as_str(),
            "ws_CO_13012021093521236557"
        );
    }

    #[test]
    fn decode_rejects_malformed_json() {
        assert!(matches!(
            decode_stk_query_response("[]"),
            Err(TransportError::Json(_))
        ));
    }
}
