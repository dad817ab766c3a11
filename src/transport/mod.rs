//! Transport layer: URLs and wire-format details (serialization/deserialization).

mod batch_tests;
mod endpoint;
mod envelope;
mod token;

pub use batch_tests::{encode_new_batch_tests_body, encode_new_batch_tests_headers};
pub use endpoint::Endpoint;
pub use envelope::{decode_json_body, embedded_error};
pub use new_tests::encode_new_tests_body;
pub use token::{decode_token_response, encode_token_body};
