//! Typed Rust client for Safaricom's M-Pesa Daraja API.
//!
//! The crate is split into a domain layer of strong types, a transport layer
//! for wire-format quirks, and a small client layer orchestrating OAuth token
//! caching, request signing, and HTTP calls.
//!
//! ```rust,no_run
//! use daraja::{
//!     AccountReference, Amount, CallbackUrl, Config, ConsumerKey, ConsumerSecret, Environment,
//!     MpesaClient, Msisdn, PassKey, ShortCode, StkPush, TransactionDesc,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), daraja::MpesaError> {
//!     let config = Config {
//!         consumer_key: ConsumerKey::new("...")?,
//!         consumer_secret: ConsumerSecret::new("...")?,
//!         business_short_code: ShortCode::new("174379")?,
//!         pass_key: PassKey::new("...")?,
//!         environment: Environment::Sandbox,
//!     };
//!     let client = MpesaClient::new(config);
//!
//!     let request = StkPush::pay_bill(
//!         Amount::new(10)?,
//!         Msisdn::new("0712345678")?,
//!         AccountReference::new("invoice-123")?,
//!         TransactionDesc::new("Payment for shoes")?,
//!         CallbackUrl::new("https://example.com/mpesa/callback")?,
//!     );
//!     let response = client.stk_push(request).await?;
//!     println!("push accepted: {}", response.checkout_request_id.as_str());
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

mod auth;
pub mod client;
pub mod domain;
pub mod sign;
mod transport;

pub use auth::AuthError;
pub use client::{Config, Environment, MpesaClient, MpesaClientBuilder, MpesaError};
pub use domain::{
    AccountReference, Amount, C2bTransaction, C2bValidationResult, CallbackItem, CallbackUrl,
    CallbackValue, CheckoutRequestId, ConsumerKey, ConsumerSecret, Msisdn, PassKey, RegisterUrls,
    RegisterUrlsResponse, ResponseType, ShortCode, StkCallback, StkPush, StkPushResponse,
    StkQueryResponse, TransactionDesc, TransactionType, ValidationError,
};
pub use sign::SignedFields;
pub use transport::{
    CallbackParseError, encode_c2b_validation_result, parse_c2b_transaction, parse_stk_callback,
};
