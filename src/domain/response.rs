//! Typed views over TelQ responses.
//!
//! Client operations return the decoded JSON untouched; these types are for
//! callers who want structure, via `serde_json::from_value`.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::domain::value::{Mcc, Mnc, TestIdTextCase, TestIdTextType};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Network {
    pub mcc: Mcc,
    pub mnc: Mnc,
    #[serde(default)]
    pub ported_from_mnc: Option<Mnc>,
    #[serde(default)]
    pub country_name: Option<String>,
    #[serde(default)]
    pub provider_name: Option<String>,
    #[serde(default)]
    pub ported_from_provider_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationNetwork {
    pub mcc: Mcc,
    pub mnc: Mnc,
    #[serde(default)]
    pub ported_from_mnc: Option<Mnc>,
}

/// One entry of the response to a new tests request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedTest {
    pub id: u64,
    #[serde(default)]
    pub test_id_text: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub destination_network: Option<DestinationNetwork>,
    #[serde(default)]
    pub test_id_text_type: Option<TestIdTextType>,
    #[serde(default)]
    pub test_id_text_case: Option<TestIdTextCase>,
    #[serde(default)]
    pub test_id_text_length: Option<u8>,
}

/// Test status. Values this crate does not know yet are kept in [`TestStatus::Unknown`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum TestStatus {
    Wait,
    Positive,
    NotDelivered,
    TestNumberNotAvailable,
    TestNumberOffline,
    NetworkOffline,
    InternalError,
    Unknown(String),
}

impl TestStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Wait => "WAIT",
            Self::Positive => "POSITIVE",
            Self::NotDelivered => "NOT_DELIVERED",
            Self::TestNumberNotAvailable => "TEST_NUMBER_NOT_AVAILABLE",
            Self::TestNumberOffline => "TEST_NUMBER_OFFLINE",
            Self::NetworkOffline => "NETWORK_OFFLINE",
            Self::InternalError => "INTERNAL_ERROR",
            Self::Unknown(raw) => raw,
        }
    }

    /// Whether the test reached a final state.
    pub fn is_final(&self) -> bool {
        !matches!(self, Self::Wait)
    }

    pub fn is_delivered(&self) -> bool {
        matches!(self, Self::Positive)
    }
}

impl<'de> Deserialize<'de> for TestStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(match raw.as_str() {
            "WAIT" => Self::Wait,
            "POSITIVE" => Self::Positive,
            "NOT_DELIVERED" => Self::NotDelivered,
            "TEST_NUMBER_NOT_AVAILABLE" => Self::TestNumberNotAvailable,
            "TEST_NUMBER_OFFLINE" => Self::TestNumberOffline,
            "NETWORK_OFFLINE" => Self::NetworkOffline,
            "INTERNAL_ERROR" => Self::InternalError,
            _ => Self::Unknown(raw),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkDetails {
    pub mcc: Mcc,
    pub mnc: Mnc,
    #[serde(default)]
    pub ported_from_mnc: Option<Mnc>,
    #[serde(default)]
    pub country_name: Option<String>,
    #[serde(default)]
    pub provider_name: Option<String>,
    #[serde(default)]
    pub ported_from_provider_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    pub id: u64,
    #[serde(default)]
    pub test_id_text: Option<String>,
    #[serde(default)]
    pub sender_delivered: Option<String>,
    #[serde(default)]
    pub text_delivered: Option<String>,
    #[serde(default)]
    pub test_created_at: Option<String>,
    #[serde(default)]
    pub sms_received_at: Option<String>,
    #[serde(default)]
    pub receipt_delay: Option<i64>,
    pub test_status: TestStatus,
    #[serde(default)]
    pub destination_network_details: Option<NetworkDetails>,
    #[serde(default)]
    pub smsc_info: Option<Value>,
    #[serde(default)]
    pub pdus_delivered: Vec<Value>,
}
