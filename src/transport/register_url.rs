use serde::{Deserialize, Serialize};

use crate::domain::{RegisterUrls, RegisterUrlsResponse, ShortCode};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Serialize)]
struct RegisterUrlsJsonRequest<'a> {
    #[serde(rename = "ShortCode")]
    short_code: &'a str,
    #[serde(rename = "ResponseType")]
    response_type: &'a str,
    #[serde(rename = "ConfirmationURL")]
    confirmation_url: &'a str,
    #[serde(rename = "ValidationURL")]
    validation_url: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
struct RegisterUrlsJsonResponse {
    // Safaricom's documented response misspells this key ("Coversation");
    // accept both spellings.
    #[serde(
        rename = "OriginatorConversationID",
        default,
        alias = "OriginatorCoversationID"
    )]
    originator_conversation_id: Option<String>,
    #[serde(rename = "ConversationID", default)]
    conversation_id: Option<String>,
    #[serde(rename = "ResponseDescription")]
    response_description: String,
}

/// This endpoint is not signed; only the configured short code is injected.
pub(crate) fn encode_register_urls(
    request: &RegisterUrls,
    short_code: &ShortCode,
) -> Result<String, serde_json::Error> {
    serde_json::to_string(&RegisterUrlsJsonRequest {
        short_code: short_code.as_str(),
        response_type: request.response_type().as_str(),
        confirmation_url: request.confirmation_url().as_str(),
        validation_url: request.validation_url().as_str(),
    })
}

pub(crate) fn decode_register_urls_response(
    json: &str,
) -> Result<RegisterUrlsResponse, TransportError> {
    let parsed: RegisterUrlsJsonResponse = serde_json::from_str(json)?;

    Ok(RegisterUrlsResponse {
        originator_conversation_id: parsed.originator_conversation_id,
        conversation_id: parsed.conversation_id,
        response_description: parsed.response_description,
    })
}

#[cfg(test)]
mod tests {
    use crate::domain::{CallbackUrl, ResponseType};

    use super::*;

    #[test]
    fn encode_injects_short_code_without_signing() {
        let request = RegisterUrls::new(
            ResponseType::Completed,
            CallbackUrl::new("https://example.com/c2b/confirm").unwrap(),
            CallbackUrl::new("https://example.com/c2b/validate").unwrap(),
        );
        let short_code = ShortCode::new("600984").unwrap();

        let body = encode_register_urls(&request, &short_code).unwrap();
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();

        assert_eq!(value["ShortCode"], "600984");
        assert_eq!(value["ResponseType"], "Completed");
        assert_eq!(value["ConfirmationURL"], "https://example.com/c2b/confirm");
        assert_eq!(value["ValidationURL"], "https://example.com/c2b/validate");
        assert!(value.get("Password").is_none());
        assert!(value.get("Timestamp").is_none());
    }

    #[test]
    fn decode_maps_acknowledgement() {
        let json = r#"
        {
          "OriginatorConversationID": "7619-37765134-1",
          "ConversationID": "AG_20230420_2010759fd5662ef6d054",
          "ResponseDescription": "Success"
        }
        "#;

        let response = decode_register_urls_response(json).unwrap();
        assert_eq!(
            response.originator_conversation_id.as_deref(),
            Some("7619-37765134-1")
        );
        assert_eq!(response.response_description, "Success");
    }

    #[test]
    fn decode_tolerates_missing_conversation_ids() {
        let json = r#"{ "ResponseDescription": "Success" }"#;
        let response = decode_register_urls_response(json).unwrap();
        assert_eq!(response.originator_conversation_id, None);
        assert_eq!(response.conversation_id, None);
    }
}
