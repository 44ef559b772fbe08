use crate::domain::value::CheckoutRequestId;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Synchronous acknowledgement of an STK push initiation.
///
/// A `response_code` of `"0"` means the push was accepted for processing;
/// the final outcome arrives later on the callback URL.
pub struct StkPushResponse {
    pub merchant_request_id: String,
    pub checkout_request_id: CheckoutRequestId,
    pub response_code: String,
    pub response_description: String,
    pub customer_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Result of an STK push status query.
///
/// `result_code` of `"0"` means the customer completed the payment; any
/// other value carries the failure reason in `result_desc`.
pub struct StkQueryResponse {
    pub response_code: String,
    pub response_description: String,
    pub merchant_request_id: String,
    pub checkout_request_id: CheckoutRequestId,
    pub result_code: String,
    pub result_desc: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Acknowledgement of a C2B callback URL registration.
pub struct RegisterUrlsResponse {
    pub originator_conversation_id: Option<String>,
    pub conversation_id: Option<String>,
    pub response_description: String,
}
