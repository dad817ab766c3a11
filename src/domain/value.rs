use std::fmt;

use phonenumber::country;
use serde::{Deserialize, Serialize};

use crate::domain::validation::ValidationError;

fn trimmed_non_empty(value: String, field: &'static str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(trimmed.to_owned())
}

fn check_range(field: &'static str, min: u32, max: u32, actual: u32) -> Result<(), ValidationError> {
    if !(min..=max).contains(&actual) {
        return Err(ValidationError::OutOfRange {
            field,
            min,
            max,
            actual,
        });
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// TelQ application id (`appId`), shown on the API menu of the TelQ app.
///
/// Invariant: non-empty after trimming.
pub struct AppId(String);

impl AppId {
    /// JSON field name used by the token endpoint (`appId`).
    pub const FIELD: &'static str = "appId";

    /// Create a validated [`AppId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self(trimmed_non_empty(value.into(), Self::FIELD)?))
    }

    /// Borrow the validated id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// TelQ application key (`appKey`).
///
/// Invariant: non-empty after trimming. `Debug` output never contains the key.
pub struct AppKey(String);

impl AppKey {
    /// JSON field name used by the token endpoint (`appKey`).
    pub const FIELD: &'static str = "appKey";

    /// Create a validated [`AppKey`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self(trimmed_non_empty(value.into(), Self::FIELD)?))
    }

    /// Borrow the key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AppKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AppKey(<redacted>)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// API version path segment, for example `v2.2`.
///
/// Invariant: non-empty after trimming, no `/` and no whitespace. Whether the
/// version is accepted by the client is decided at authentication time.
pub struct ApiVersion(String);

impl ApiVersion {
    pub const FIELD: &'static str = "apiVersion";

    /// Version used when none is configured.
    pub const DEFAULT: &'static str = "v2.2";

    /// Versions accepted by default.
    pub const SUPPORTED: &'static [&'static str] = &["v2.1", "v2.2", "v3"];

    /// Create a validated [`ApiVersion`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = trimmed_non_empty(value.into(), Self::FIELD)?;
        if value.contains(|c: char| c == '/' || c.is_whitespace()) {
            return Err(ValidationError::InvalidFormat {
                field: Self::FIELD,
                expected: "a single path segment such as v2.2",
                input: value,
            });
        }
        Ok(Self(value))
    }

    /// The default allow-list as typed values.
    pub fn supported() -> Vec<Self> {
        Self::SUPPORTED
            .iter()
            .map(|version| Self((*version).to_owned()))
            .collect()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ApiVersion {
    fn default() -> Self {
        Self(Self::DEFAULT.to_owned())
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
/// Mobile Country Code as defined by ITU-T E.212 (`mcc`).
///
/// Invariant: exactly 3 ASCII digits.
pub struct Mcc(String);

impl Mcc {
    pub const FIELD: &'static str = "mcc";

    /// Create a validated [`Mcc`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = trimmed_non_empty(value.into(), Self::FIELD)?;
        if value.len() != 3 || !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::InvalidFormat {
                field: Self::FIELD,
                expected: "3 digits",
                input: value,
            });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Mcc {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Mcc> for String {
    fn from(value: Mcc) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
/// Mobile Network Code as defined by ITU-T E.212 (`mnc`, `portedFromMnc`).
///
/// Invariant: 2 or 3 ASCII digits. Leading zeros are significant.
pub struct Mnc(String);

impl Mnc {
    pub const FIELD: &'static str = "mnc";

    /// Create a validated [`Mnc`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = trimmed_non_empty(value.into(), Self::FIELD)?;
        if !(2..=3).contains(&value.len()) || !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::InvalidFormat {
                field: Self::FIELD,
                expected: "2 or 3 digits",
                input: value,
            });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Mnc {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Mnc> for String {
    fn from(value: Mnc) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Test phone number as sent to TelQ (`phoneNumber`).
///
/// Invariant: digits only, a leading `+` is stripped. This type does not
/// normalize; parse into [`PhoneNumber`] first if you want E.164 normalization.
pub struct RawPhoneNumber(String);

impl RawPhoneNumber {
    /// JSON field name used by TelQ (`phoneNumber`).
    pub const FIELD: &'static str = "phoneNumber";

    /// Create a validated raw phone number.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = trimmed_non_empty(value.into(), Self::FIELD)?;
        let digits = value.strip_prefix('+').unwrap_or(&value);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::InvalidFormat {
                field: Self::FIELD,
                expected: "digits with an optional leading '+'",
                input: value,
            });
        }
        Ok(Self(digits.to_owned()))
    }

    /// Digits as sent to TelQ.
    pub fn raw(&self) -> &str {
        &self.0
    }
}

impl From<PhoneNumber> for RawPhoneNumber {
    /// Convert an already-parsed phone number to its E.164 digits.
    fn from(value: PhoneNumber) -> Self {
        Self(value.e164.trim_start_matches('+').to_owned())
    }
}

#[derive(Debug, Clone)]
/// Parsed phone number with an E.164 representation.
///
/// Equality, ordering, and hashing are based on the E.164 form.
pub struct PhoneNumber {
    raw: String,
    e164: String,
    parsed: phonenumber::PhoneNumber,
}

impl PhoneNumber {
    pub const FIELD: &'static str = "phoneNumber";

    /// Parse and normalize a phone number into E.164.
    ///
    /// `default_region` is used when the input does not contain an explicit country prefix.
    pub fn parse(
        default_region: Option<country::Id>,
        input: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let raw = trimmed_non_empty(input.into(), Self::FIELD)?;

        let parsed = phonenumber::parse(default_region, &raw)
            .map_err(|_| ValidationError::InvalidPhoneNumber { input: raw.clone() })?;

        let e164 = phonenumber::format(&parsed)
            .mode(phonenumber::Mode::E164)
            .to_string();

        Ok(Self { raw, e164, parsed })
    }

    /// Raw input after trimming.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Normalized E.164 representation.
    pub fn e164(&self) -> &str {
        &self.e164
    }

    /// The parsed phone number from the `phonenumber` crate.
    pub fn parsed(&self) -> &phonenumber::PhoneNumber {
        &self.parsed
    }
}

impl PartialEq for PhoneNumber {
    fn eq(&self, other: &Self) -> bool {
        self.e164 == other.e164
    }
}

impl Eq for PhoneNumber {}

impl std::hash::Hash for PhoneNumber {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.e164.hash(state);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// URL TelQ calls with test result updates (`resultsCallbackUrl`).
///
/// Invariant: absolute `http` or `https` URL.
pub struct CallbackUrl(String);

impl CallbackUrl {
    pub const FIELD: &'static str = "resultsCallbackUrl";

    /// Create a validated [`CallbackUrl`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = trimmed_non_empty(value.into(), Self::FIELD)?;
        match url::Url::parse(&value) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(Self(value)),
            _ => Err(ValidationError::InvalidUrl {
                field: Self::FIELD,
                input: value,
            }),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// Token TelQ presents as the bearer token of its result callbacks.
///
/// Sent as the `results-callback-token` header, never in the body.
pub struct CallbackToken(String);

impl CallbackToken {
    /// Header name used by TelQ.
    pub const HEADER: &'static str = "results-callback-token";

    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self(trimmed_non_empty(value.into(), Self::HEADER)?))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for CallbackToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CallbackToken(<redacted>)")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Number of attempts TelQ makes when calling the callback URL (`maxCallbackRetries`).
///
/// Invariant: `0..=5`.
pub struct MaxCallbackRetries(u8);

impl MaxCallbackRetries {
    pub const FIELD: &'static str = "maxCallbackRetries";
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Result<Self, ValidationError> {
        check_range(Self::FIELD, 0, u32::from(Self::MAX), u32::from(value))?;
        Ok(Self(value))
    }

    pub(crate) const fn new_unchecked(value: u8) -> Self {
        Self(value)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
/// Kind of characters used in the generated `testIdText`.
pub enum TestIdTextType {
    #[default]
    Alpha,
    AlphaNumeric,
    Numeric,
    /// WhatsApp-style code with a fixed length of [`TestIdTextLength::WHATSAPP_CODE`].
    WhatsappCode,
}

impl TestIdTextType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Alpha => "ALPHA",
            Self::AlphaNumeric => "ALPHA_NUMERIC",
            Self::Numeric => "NUMERIC",
            Self::WhatsappCode => "WHATSAPP_CODE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
/// Letter case of the generated `testIdText`. Applies to `ALPHA` and `ALPHA_NUMERIC`.
pub enum TestIdTextCase {
    Upper,
    Lower,
    #[default]
    Mixed,
}

impl TestIdTextCase {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Upper => "UPPER",
            Self::Lower => "LOWER",
            Self::Mixed => "MIXED",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Number of characters in the generated `testIdText` (`testIdTextLength`).
///
/// Invariant: `4..=20`.
pub struct TestIdTextLength(u8);

impl TestIdTextLength {
    pub const FIELD: &'static str = "testIdTextLength";
    pub const MIN: u8 = 4;
    pub const MAX: u8 = 20;
    pub const DEFAULT: u8 = 10;
    /// Fixed length of `WHATSAPP_CODE` ids.
    pub const WHATSAPP_CODE: u8 = 7;

    pub fn new(value: u8) -> Result<Self, ValidationError> {
        check_range(
            Self::FIELD,
            u32::from(Self::MIN),
            u32::from(Self::MAX),
            u32::from(value),
        )?;
        Ok(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Length actually sent for the given id type.
    pub fn effective(self, kind: TestIdTextType) -> u8 {
        match kind {
            TestIdTextType::WhatsappCode => Self::WHATSAPP_CODE,
            _ => self.0,
        }
    }
}

impl Default for TestIdTextLength {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Maximum time a test waits for a message, in seconds (`testTimeToLiveInSeconds`).
///
/// Invariant: `60..=10800` (one minute to three hours).
pub struct TimeToLive(u32);

impl TimeToLive {
    pub const FIELD: &'static str = "testTimeToLiveInSeconds";
    pub const MIN: u32 = 60;
    pub const MAX: u32 = 10_800;

    pub fn new(seconds: u32) -> Result<Self, ValidationError> {
        check_range(Self::FIELD, Self::MIN, Self::MAX, seconds)?;
        Ok(Self(seconds))
    }

    pub(crate) const fn new_unchecked(seconds: u32) -> Self {
        Self(seconds)
    }

    pub fn seconds(self) -> u32 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Sender id of a batch test (`sender`).
///
/// Invariant: non-empty after trimming.
pub struct SenderId(String);

impl SenderId {
    pub const FIELD: &'static str = "sender";

    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self(trimmed_non_empty(value.into(), Self::FIELD)?))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Message text of a batch test (`text`).
///
/// Invariant: non-empty after trimming. The original value (including whitespace) is preserved.
pub struct MessageText(String);

impl MessageText {
    pub const FIELD: &'static str = "text";

    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Supplier a batch test is routed through (`supplierId`).
pub struct SupplierId(u64);

impl SupplierId {
    pub const FIELD: &'static str = "supplierId";

    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// SMPP single-octet parameter (`dataCoding`, `sourceTon`, `sourceNpi`) as sent to TelQ.
///
/// Invariant: 1 or 2 hexadecimal digits.
pub struct SmppOctet(String);

impl SmppOctet {
    pub const FIELD: &'static str = "smppOctet";

    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = trimmed_non_empty(value.into(), Self::FIELD)?;
        if !(1..=2).contains(&value.len()) || !value.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ValidationError::InvalidFormat {
                field: Self::FIELD,
                expected: "1 or 2 hex digits",
                input: value,
            });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub(crate) fn from_static(value: &'static str) -> Self {
        Self(value.to_owned())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// SMPP time string `YYMMDDhhmmsstnnp` (`scheduledDeliveryTime`).
///
/// Invariant: 15 digits followed by `+`, `-` (absolute), `R` (relative) or a
/// digit (all-digit form, e.g. `2209131247000000`).
pub struct ScheduledDeliveryTime(String);

impl ScheduledDeliveryTime {
    pub const FIELD: &'static str = "scheduledDeliveryTime";

    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = trimmed_non_empty(value.into(), Self::FIELD)?;
        let bytes = value.as_bytes();
        let well_formed = bytes.len() == 16
            && bytes[..15].iter().all(u8::is_ascii_digit)
            && (bytes[15].is_ascii_digit() || matches!(bytes[15], b'+' | b'-' | b'R'));
        if !well_formed {
            return Err(ValidationError::InvalidFormat {
                field: Self::FIELD,
                expected: "YYMMDDhhmmsstnnp",
                input: value,
            });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// SMPP `priority_flag` (`priorityFlag`).
///
/// Invariant: `0..=3`.
pub struct PriorityFlag(u8);

impl PriorityFlag {
    pub const FIELD: &'static str = "priorityFlag";
    pub const MAX: u8 = 3;

    pub fn new(value: u8) -> Result<Self, ValidationError> {
        check_range(Self::FIELD, 0, u32::from(Self::MAX), u32::from(value))?;
        Ok(Self(value))
    }

    pub(crate) const fn new_unchecked(value: u8) -> Self {
        Self(value)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Raw TLV or UDH element passed through to the SMSC (`{tagHex, valueHex}`).
///
/// Invariant: both parts are non-empty hex strings.
pub struct HexTagValue {
    tag_hex: String,
    value_hex: String,
}

impl HexTagValue {
    pub const TAG_FIELD: &'static str = "tagHex";
    pub const VALUE_FIELD: &'static str = "valueHex";

    pub fn new(
        tag_hex: impl Into<String>,
        value_hex: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            tag_hex: hex_string(tag_hex.into(), Self::TAG_FIELD)?,
            value_hex: hex_string(value_hex.into(), Self::VALUE_FIELD)?,
        })
    }

    pub fn tag_hex(&self) -> &str {
        &self.tag_hex
    }

    pub fn value_hex(&self) -> &str {
        &self.value_hex
    }
}

fn hex_string(value: String, field: &'static str) -> Result<String, ValidationError> {
    let value = trimmed_non_empty(value, field)?;
    if !value.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ValidationError::InvalidFormat {
            field,
            expected: "hex digits",
            input: value,
        });
    }
    Ok(value)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Server-assigned test id, returned by the tests endpoints.
pub struct TestId(u64);

impl TestId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// ISO 8601 date-time bound of a results query (`from`, `to`).
///
/// Only shape-checked: non-empty and free of whitespace. TelQ parses the value.
pub struct DateTimeBound(String);

impl DateTimeBound {
    pub const FIELD: &'static str = "dateTime";

    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = trimmed_non_empty(value.into(), Self::FIELD)?;
        if value.contains(char::is_whitespace) {
            return Err(ValidationError::InvalidFormat {
                field: Self::FIELD,
                expected: "ISO 8601 date-time",
                input: value,
            });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// 1-based page number of a results query.
pub struct Page(u32);

impl Page {
    pub const FIELD: &'static str = "page";

    pub fn new(value: u32) -> Result<Self, ValidationError> {
        check_range(Self::FIELD, 1, u32::MAX, value)?;
        Ok(Self(value))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Page {
    fn default() -> Self {
        Self(1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Number of results per page.
pub struct PageSize(u32);

impl PageSize {
    pub const FIELD: &'static str = "size";
    pub const DEFAULT: u32 = 100;

    pub fn new(value: u32) -> Result<Self, ValidationError> {
        check_range(Self::FIELD, 1, u32::MAX, value)?;
        Ok(Self(value))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Ordering of results by id.
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}
