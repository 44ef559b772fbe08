//! Domain layer: strong types with validation and invariants (no I/O).

mod callback;
mod request;
mod response;
mod validation;
mod value;

pub use callback::{C2bTransaction, C2bValidationResult, CallbackItem, CallbackValue, StkCallback};
pub use request::{RegisterUrls, ResponseType, StkPush, TransactionType};
pub use response::{RegisterUrlsResponse, StkPushResponse, StkQueryResponse};
pub use validation::ValidationError;
pub use value::{
    AccountReference, Amount, CallbackUrl, CheckoutRequestId, ConsumerKey, ConsumerSecret, Msisdn,
    PassKey, ShortCode, TransactionDesc,
};
