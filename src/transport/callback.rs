use serde::{Deserialize, Serialize};

use crate::domain::{
    C2bTransaction, C2bValidationResult, CallbackItem, CallbackValue, CheckoutRequestId,
    StkCallback, ValidationError,
};

#[derive(Debug, thiserror::Error)]
/// Failure parsing an inbound webhook payload.
pub enum CallbackParseError {
    #[error("invalid callback JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid field in callback: {0}")]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Clone, Deserialize)]
struct StkCallbackEnvelope {
    #[serde(rename = "Body")]
    body: StkCallbackBody,
}

#[derive(Debug, Clone, Deserialize)]
struct StkCallbackBody {
    #[serde(rename = "stkCallback")]
    stk_callback: StkCallbackJson,
}

#[derive(Debug, Clone, Deserialize)]
struct StkCallbackJson {
    #[serde(rename = "MerchantRequestID")]
    merchant_request_id: String,
    #[serde(rename = "CheckoutRequestID")]
    checkout_request_id: String,
    #[serde(rename = "ResultCode")]
    result_code: i64,
    #[serde(rename = "ResultDesc")]
    result_desc: String,
    // Absent for failed or cancelled transactions.
    #[serde(rename = "CallbackMetadata", default)]
    callback_metadata: Option<MetadataJson>,
}

#[derive(Debug, Clone, Deserialize)]
struct MetadataJson {
    #[serde(rename = "Item", default)]
    items: Vec<ItemJson>,
}

#[derive(Debug, Clone, Deserialize)]
struct ItemJson {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Value", default)]
    value: Option<ValueJson>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum ValueJson {
    Int(i64),
    Float(f64),
    Text(String),
}

impl From<ValueJson> for CallbackValue {
    fn from(value: ValueJson) -> Self {
        match value {
            ValueJson::Int(value) => Self::Int(value),
            ValueJson::Float(value) => Self::Float(value),
            ValueJson::Text(value) => Self::Text(value),
        }
    }
}

/// Parse the JSON body Daraja POSTs to the STK push callback URL.
pub fn parse_stk_callback(json: &str) -> Result<StkCallback, CallbackParseError> {
    let envelope: StkCallbackEnvelope = serde_json::from_str(json)?;
    let parsed = envelope.body.stk_callback;

    let metadata = parsed
        .callback_metadata
        .map(|metadata| {
            metadata
                .items
                .into_iter()
                .map(|item| CallbackItem {
                    name: item.name,
                    value: item.value.map(CallbackValue::from),
                })
                .collect()
        })
        .unwrap_or_default();

    Ok(StkCallback {
        merchant_request_id: parsed.merchant_request_id,
        checkout_request_id: CheckoutRequestId::new(parsed.checkout_request_id)?,
        result_code: parsed.result_code,
        result_desc: parsed.result_desc,
        metadata,
    })
}

#[derive(Debug, Clone, Deserialize)]
struct C2bTransactionJson {
    #[serde(rename = "TransactionType")]
    transaction_type: String,
    #[serde(rename = "TransID")]
    trans_id: String,
    #[serde(rename = "TransTime")]
    trans_time: String,
    #[serde(rename = "TransAmount")]
    trans_amount: String,
    #[serde(rename = "BusinessShortCode")]
    business_short_code: String,
    #[serde(rename = "MSISDN")]
    msisdn: String,
    #[serde(rename = "BillRefNumber", default)]
    bill_ref_number: Option<String>,
    #[serde(rename = "InvoiceNumber", default)]
    invoice_number: Option<String>,
    #[serde(rename = "OrgAccountBalance", default)]
    org_account_balance: Option<String>,
    #[serde(rename = "ThirdPartyTransID", default)]
    third_party_trans_id: Option<String>,
    #[serde(rename = "FirstName", default)]
    first_name: Option<String>,
    #[serde(rename = "MiddleName", default)]
    middle_name: Option<String>,
    #[serde(rename = "LastName", default)]
    last_name: Option<String>,
}

/// Parse the C2B payment notification POSTed to the registered confirmation
/// and validation URLs.
pub fn parse_c2b_transaction(json: &str) -> Result<C2bTransaction, CallbackParseError> {
    let parsed: C2bTransactionJson = serde_json::from_str(json)?;

    Ok(C2bTransaction {
        transaction_type: parsed.transaction_type,
        trans_id: parsed.trans_id,
        trans_time: parsed.trans_time,
        trans_amount: parsed.trans_amount,
        business_short_code: parsed.business_short_code,
        msisdn: parsed.msisdn,
        bill_ref_number: parsed.bill_ref_number,
        invoice_number: parsed.invoice_number,
        org_account_balance: parsed.org_account_balance,
        third_party_trans_id: parsed.third_party_trans_id,
        first_name: parsed.first_name,
        middle_name: parsed.middle_name,
        last_name: parsed.last_name,
    })
}

#[derive(Debug, Serialize)]
struct C2bValidationResultJson<'a> {
    #[serde(rename = "ResultCode")]
    result_code: i32,
    #[serde(rename = "ResultDesc")]
    result_desc: &'a str,
}

/// Encode the reply a validation URL sends back to Daraja.
pub fn encode_c2b_validation_result(
    result: &C2bValidationResult,
) -> Result<String, serde_json::Error> {
    serde_json::to_string(&C2bValidationResultJson {
        result_code: result.result_code,
        result_desc: &result.result_desc,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_successful_stk_callback_with_metadata() {
        let json = r#"
        {
          "Body": {
            "stkCallback": {
              "MerchantRequestID": "29115-34620561-1",
              "CheckoutRequestID": "ws_CO_191220191020363925",
              "ResultCode": 0,
              "ResultDesc": "The service request is processed successfully.",
              "CallbackMetadata": {
                "Item": [
                  { "Name": "Amount", "Value": 1.00 },
                  { "Name": "MpesaReceiptNumber", "Value": "NLJ7RT61SV" },
                  { "Name": "TransactionDate", "Value": 20191219102115 },
                  { "Name": "PhoneNumber", "Value": 254712345678 },
                  { "Name": "Balance" }
                ]
              }
            }
          }
        }
        "#;

        let callback = parse_stk_callback(json).unwrap();
        assert!(callback.is_success());
        assert_eq!(
            callback.checkout_request_id.as_str(),
            "ws_CO_191220191020363925"
        );
        assert_eq!(callback.metadata.len(), 5);
        assert_eq!(
            callback
                .metadata_value("MpesaReceiptNumber")
                .and_then(CallbackValue::as_str),
            Some("NLJ7RT61SV")
        );
        assert_eq!(
            callback
                .metadata_value("PhoneNumber")
                .and_then(CallbackValue::as_i64),
            Some(254712345678)
        );
        assert_eq!(
            callback
                .metadata_value("Amount")
                .and_then(CallbackValue::as_f64),
            Some(1.0)
        );
        assert!(callback.metadata_value("Balance").is_none());
    }

    #[test]
    fn parse_failed_stk_callback_without_metadata() {
        let json = r#"
        {
          "Body": {
            "stkCallback": {
              "MerchantRequestID": "29115-34620561-1",
              "CheckoutRequestID": "ws_CO_191220191020363925",
              "ResultCode": 1032,
              "ResultDesc": "Request cancelled by user."
            }
          }
        }
        "#;

        let callback = parse_stk_callback(json).unwrap();
        assert!(!callback.is_success());
        assert_eq!(callback.result_code, 1032);
        assert!(callback.metadata.is_empty());
    }

    #[test]
    fn parse_tolerates_unknown_fields() {
        let json = r#"
        {
          "Body": {
            "stkCallback": {
              "MerchantRequestID": "1",
              "CheckoutRequestID": "ws_CO_1",
              "ResultCode": 0,
              "ResultDesc": "ok",
              "NewField": { "nested": true }
            },
            "AnotherNewField": 7
          }
        }
        "#;

        assert!(parse_stk_callback(json).is_ok());
    }

    #[test]
    fn parse_rejects_malformed_callback() {
        assert!(matches!(
            parse_stk_callback("{}"),
            Err(CallbackParseError::Json(_))
        ));
    }

    #[test]
    fn parse_c2b_confirmation_payload() {
        let json = r#"
        {
          "TransactionType": "Pay Bill",
          "TransID": "RKTQDM7W6S",
          "TransTime": "20191122063845",
          "TransAmount": "10",
          "BusinessShortCode": "600638",
          "BillRefNumber": "invoice008",
          "OrgAccountBalance": "49197.00",
          "MSISDN": "254708374149",
          "FirstName": "John",
          "MiddleName": "",
          "LastName": "Doe"
        }
        "#;

        let transaction = parse_c2b_transaction(json).unwrap();
        assert_eq!(transaction.trans_id, "RKTQDM7W6S");
        assert_eq!(transaction.bill_ref_number.as_deref(), Some("invoice008"));
        assert_eq!(transaction.invoice_number, None);
        assert_eq!(transaction.msisdn, "254708374149");
    }

    #[test]
    fn encode_validation_result_uses_daraja_keys() {
        let body =
            encode_c2b_validation_result(&C2bValidationResult::accept("Accepted")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["ResultCode"], 0);
        assert_eq!(value["ResultDesc"], "Accepted");
    }
}
