//! Typed Rust client for the TelQ Telecom SMS testing API.
//!
//! The crate is split into a domain layer of strong types, a transport layer for
//! URLs and wire-format details, and a small client layer orchestrating requests.
//!
//! ```rust,no_run
//! use telq::{Credentials, Destination, Mcc, Mnc, NewTests, TelqClient, TestOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), telq::TelqError> {
//!     let mut client = TelqClient::new();
//!     client.authenticate(&Credentials::new("app-id", "app-key")?).await?;
//!
//!     let networks = client.get_networks().await?;
//!     println!("{networks:#}");
//!
//!     let destination = Destination::network(Mcc::new("246")?, Mnc::new("03")?);
//!     let request = NewTests::new(vec![destination], TestOptions::default())?;
//!     let created = client.initiate_new_tests(&request).await?;
//!     println!("{created:#}");
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{Credentials, Session, TelqClient, TelqClientBuilder, TelqError};
pub use domain::{
    ApiVersion, BatchOptions, BatchResultsQuery, BatchTest, CallbackToken, CallbackUrl,
    CreatedTest, DateTimeBound, Destination, Mcc, MessageText, Mnc, Network, NewBatchTests,
    NewTests, Page, PageSize, PhoneNumber, RawPhoneNumber, SenderId, SortOrder, SupplierId,
    TestId, TestIdTextCase, TestIdTextLength, TestIdTextType, TestOptions, TestResult, TestStatus,
    TimeToLive, ValidationError,
};
