use serde::Deserialize;
use serde_json::{Map, Value};

use crate::domain::validation::ValidationError;
use crate::domain::value::{
    CallbackToken, CallbackUrl, DateTimeBound, HexTagValue, MaxCallbackRetries, Mcc, MessageText,
    Mnc, Page, PageSize, PriorityFlag, RawPhoneNumber, ScheduledDeliveryTime, SenderId, SmppOctet,
    SortOrder, SupplierId, TestIdTextCase, TestIdTextLength, TestIdTextType, TimeToLive,
};

/// Where a single test is sent: a network from the networks list, or a fixed test number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Network {
        mcc: Mcc,
        mnc: Mnc,
        ported_from_mnc: Option<Mnc>,
    },
    PhoneNumber(RawPhoneNumber),
}

impl Destination {
    /// JSON field name used by TelQ for the destination list.
    pub const FIELD: &'static str = "destinationNetworks";

    pub fn network(mcc: Mcc, mnc: Mnc) -> Self {
        Self::Network {
            mcc,
            mnc,
            ported_from_mnc: None,
        }
    }

    pub fn ported(mcc: Mcc, mnc: Mnc, ported_from_mnc: Mnc) -> Self {
        Self::Network {
            mcc,
            mnc,
            ported_from_mnc: Some(ported_from_mnc),
        }
    }

    pub fn phone_number(phone: RawPhoneNumber) -> Self {
        Self::PhoneNumber(phone)
    }

    /// Build a destination from a JSON object such as an entry of the networks list.
    ///
    /// `mcc` and `mnc` win when both are present; otherwise `phoneNumber` is used.
    /// Keys holding `null` count as absent. Extra keys (`providerName`,
    /// `countryName`, ...) are ignored.
    pub fn from_json(value: &Value) -> Result<Self, ValidationError> {
        let map = value
            .as_object()
            .ok_or(ValidationError::MissingDestination)?;

        if let (Some(mcc), Some(mnc)) = (present(map, Mcc::FIELD), present(map, Mnc::FIELD)) {
            let ported_from_mnc = present(map, "portedFromMnc")
                .map(|value| json_str(value, "portedFromMnc").and_then(Mnc::new))
                .transpose()?;
            return Ok(Self::Network {
                mcc: Mcc::new(json_str(mcc, Mcc::FIELD)?)?,
                mnc: Mnc::new(json_str(mnc, Mnc::FIELD)?)?,
                ported_from_mnc,
            });
        }

        match present(map, RawPhoneNumber::FIELD) {
            Some(phone) => Ok(Self::PhoneNumber(RawPhoneNumber::new(json_str(
                phone,
                RawPhoneNumber::FIELD,
            )?)?)),
            None => Err(ValidationError::MissingDestination),
        }
    }
}

fn present<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    map.get(key).filter(|value| !value.is_null())
}

fn json_str(value: &Value, field: &'static str) -> Result<String, ValidationError> {
    value
        .as_str()
        .map(str::to_owned)
        .ok_or_else(|| ValidationError::InvalidFormat {
            field,
            expected: "a JSON string",
            input: value.to_string(),
        })
}

/// Options shared by every test of a [`NewTests`] request.
#[derive(Debug, Clone)]
pub struct TestOptions {
    pub results_callback_url: Option<CallbackUrl>,
    pub max_callback_retries: MaxCallbackRetries,
    pub test_id_text_type: TestIdTextType,
    pub test_id_text_case: TestIdTextCase,
    pub test_id_text_length: TestIdTextLength,
    pub time_to_live: TimeToLive,
}

impl Default for TestOptions {
    fn default() -> Self {
        Self {
            results_callback_url: None,
            max_callback_retries: MaxCallbackRetries::new_unchecked(3),
            test_id_text_type: TestIdTextType::default(),
            test_id_text_case: TestIdTextCase::default(),
            test_id_text_length: TestIdTextLength::default(),
            time_to_live: TimeToLive::new_unchecked(3600),
        }
    }
}

/// Request to create one test per destination.
///
/// Invariant: at least one destination.
#[derive(Debug, Clone)]
pub struct NewTests {
    destinations: Vec<Destination>,
    options: TestOptions,
}

impl NewTests {
    pub fn new(
        destinations: Vec<Destination>,
        options: TestOptions,
    ) -> Result<Self, ValidationError> {
        if destinations.is_empty() {
            return Err(ValidationError::Empty {
                field: Destination::FIELD,
            });
        }
        Ok(Self {
            destinations,
            options,
        })
    }

    /// Build a request from raw JSON destinations, e.g. the output of `get_networks`.
    pub fn from_json(destinations: &[Value], options: TestOptions) -> Result<Self, ValidationError> {
        let destinations = destinations
            .iter()
            .map(Destination::from_json)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(destinations, options)
    }

    pub fn destinations(&self) -> &[Destination] {
        &self.destinations
    }

    pub fn options(&self) -> &TestOptions {
        &self.options
    }
}

/// One entry of an LNT batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchTest {
    pub sender: SenderId,
    pub text: MessageText,
    pub test_id_text_type: TestIdTextType,
    pub test_id_text_case: TestIdTextCase,
    pub test_id_text_length: TestIdTextLength,
    pub supplier_id: SupplierId,
    pub mcc: Mcc,
    pub mnc: Mnc,
    pub ported_from_mnc: Option<Mnc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BatchTestJson {
    sender: String,
    text: String,
    #[serde(default)]
    test_id_text_type: TestIdTextType,
    #[serde(default)]
    test_id_text_case: TestIdTextCase,
    #[serde(default)]
    test_id_text_length: Option<u8>,
    supplier_id: u64,
    mcc: String,
    mnc: String,
    #[serde(default)]
    ported_from_mnc: Option<String>,
}

impl BatchTest {
    /// JSON field name used by TelQ for the batch entry list.
    pub const FIELD: &'static str = "tests";

    /// Create an entry with the default id text (`ALPHA`, `MIXED`, 10 characters).
    pub fn new(
        sender: SenderId,
        text: MessageText,
        supplier_id: SupplierId,
        mcc: Mcc,
        mnc: Mnc,
    ) -> Self {
        Self {
            sender,
            text,
            test_id_text_type: TestIdTextType::default(),
            test_id_text_case: TestIdTextCase::default(),
            test_id_text_length: TestIdTextLength::default(),
            supplier_id,
            mcc,
            mnc,
            ported_from_mnc: None,
        }
    }

    /// Build an entry from a camelCase JSON object.
    pub fn from_json(value: &Value) -> Result<Self, ValidationError> {
        Self::from_json_at(value, 0)
    }

    fn from_json_at(value: &Value, index: usize) -> Result<Self, ValidationError> {
        let raw = BatchTestJson::deserialize(value).map_err(|err| ValidationError::Malformed {
            field: Self::FIELD,
            index,
            reason: err.to_string(),
        })?;

        Ok(Self {
            sender: SenderId::new(raw.sender)?,
            text: MessageText::new(raw.text)?,
            test_id_text_type: raw.test_id_text_type,
            test_id_text_case: raw.test_id_text_case,
            test_id_text_length: raw
                .test_id_text_length
                .map(TestIdTextLength::new)
                .transpose()?
                .unwrap_or_default(),
            supplier_id: SupplierId::new(raw.supplier_id),
            mcc: Mcc::new(raw.mcc)?,
            mnc: Mnc::new(raw.mnc)?,
            ported_from_mnc: raw.ported_from_mnc.map(Mnc::new).transpose()?,
        })
    }
}

/// SMPP-oriented options shared by every entry of a [`NewBatchTests`] request.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub results_callback_url: Option<CallbackUrl>,
    /// Sent as the `results-callback-token` header.
    pub results_callback_token: Option<CallbackToken>,
    pub max_callback_retries: MaxCallbackRetries,
    pub data_coding: SmppOctet,
    pub source_ton: SmppOctet,
    pub source_npi: SmppOctet,
    pub time_to_live: TimeToLive,
    /// SMPP validity period in seconds.
    pub validity_period: u32,
    pub scheduled_delivery_time: Option<ScheduledDeliveryTime>,
    pub replace_if_present: bool,
    pub priority: PriorityFlag,
    pub send_text_as_message_payload_tlv: bool,
    pub comment_text: Option<String>,
    pub tlv: Vec<HexTagValue>,
    pub udh: Vec<HexTagValue>,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            results_callback_url: None,
            results_callback_token: None,
            max_callback_retries: MaxCallbackRetries::new_unchecked(1),
            data_coding: SmppOctet::from_static("01"),
            source_ton: SmppOctet::from_static("00"),
            source_npi: SmppOctet::from_static("12"),
            time_to_live: TimeToLive::new_unchecked(600),
            validity_period: 120,
            scheduled_delivery_time: None,
            replace_if_present: false,
            priority: PriorityFlag::new_unchecked(1),
            send_text_as_message_payload_tlv: false,
            comment_text: None,
            tlv: Vec::new(),
            udh: Vec::new(),
        }
    }
}

/// Request to start an LNT batch.
///
/// Invariant: at least one entry.
#[derive(Debug, Clone)]
pub struct NewBatchTests {
    tests: Vec<BatchTest>,
    options: BatchOptions,
}

impl NewBatchTests {
    pub fn new(tests: Vec<BatchTest>, options: BatchOptions) -> Result<Self, ValidationError> {
        if tests.is_empty() {
            return Err(ValidationError::Empty {
                field: BatchTest::FIELD,
            });
        }
        Ok(Self { tests, options })
    }

    /// Build a batch from camelCase JSON entries; the first malformed entry is reported by index.
    pub fn from_json(tests: &[Value], options: BatchOptions) -> Result<Self, ValidationError> {
        let tests = tests
            .iter()
            .enumerate()
            .map(|(index, value)| BatchTest::from_json_at(value, index))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(tests, options)
    }

    pub fn tests(&self) -> &[BatchTest] {
        &self.tests
    }

    pub fn options(&self) -> &BatchOptions {
        &self.options
    }
}

/// Filter and pagination for the LNT results listing.
#[derive(Debug, Clone, Default)]
pub struct BatchResultsQuery {
    pub from: Option<DateTimeBound>,
    pub to: Option<DateTimeBound>,
    pub page: Page,
    pub size: PageSize,
    pub order: SortOrder,
}
