//! Transport layer: HTTP and wire-format details (serialization/deserialization).

pub mod callback;
pub(crate) mod http;
mod register_url;
mod stk_push;
mod stk_query;
pub(crate) mod token;

pub use callback::{
    CallbackParseError, encode_c2b_validation_result, parse_c2b_transaction, parse_stk_callback,
};
pub(crate) use register_url::{decode_register_urls_response, encode_register_urls};
pub(crate) use stk_push::{decode_stk_push_response, encode_stk_push};
pub(crate) use stk_query::{decode_stk_query_response, encode_stk_query};
