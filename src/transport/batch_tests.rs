use serde::Serialize;
use serde_json::Value;

use crate::domain::{
    BatchTest, CallbackToken, HexTagValue, NewBatchTests, TestIdTextCase, TestIdTextType,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NewBatchTestsBody<'a> {
    tests: Vec<BatchTestJson<'a>>,
    results_callback_url: Option<&'a str>,
    max_callback_retries: u8,
    data_coding: &'a str,
    source_ton: &'a str,
    source_npi: &'a str,
    test_time_to_live_in_seconds: u32,
    validity_period: u32,
    scheduled_delivery_time: Option<&'a str>,
    replace_if_present_flag: u8,
    priority_flag: u8,
    send_text_as_message_payload_tlv: u8,
    comment_text: Option<&'a str>,
    tlv: Option<Vec<TagValueJson<'a>>>,
    udh: Option<Vec<TagValueJson<'a>>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BatchTestJson<'a> {
    sender: &'a str,
    text: &'a str,
    test_id_text_type: TestIdTextType,
    test_id_text_case: TestIdTextCase,
    test_id_text_length: u8,
    supplier_id: u64,
    mcc: &'a str,
    mnc: &'a str,
    ported_from_mnc: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TagValueJson<'a> {
    tag_hex: &'a str,
    value_hex: &'a str,
}

impl<'a> From<&'a BatchTest> for BatchTestJson<'a> {
    fn from(test: &'a BatchTest) -> Self {
        Self {
            sender: test.sender.as_str(),
            text: test.text.as_str(),
            test_id_text_type: test.test_id_text_type,
            test_id_text_case: test.test_id_text_case,
            test_id_text_length: test.test_id_text_length.effective(test.test_id_text_type),
            supplier_id: test.supplier_id.value(),
            mcc: test.mcc.as_str(),
            mnc: test.mnc.as_str(),
            ported_from_mnc: test.ported_from_mnc.as_ref().map(|mnc| mnc.as_str()),
        }
    }
}

fn tag_values(items: &[HexTagValue]) -> Option<Vec<TagValueJson<'_>>> {
    if items.is_empty() {
        return None;
    }
    Some(
        items
            .iter()
            .map(|item| TagValueJson {
                tag_hex: item.tag_hex(),
                value_hex: item.value_hex(),
            })
            .collect(),
    )
}

pub fn encode_new_batch_tests_body(request: &NewBatchTests) -> Result<Value, serde_json::Error> {
    let options = request.options();
    serde_json::to_value(NewBatchTestsBody {
        tests: request.tests().iter().map(Into::into).collect(),
        results_callback_url: options.results_callback_url.as_ref().map(|url| url.as_str()),
        max_callback_retries: options.max_callback_retries.value(),
        data_coding: options.data_coding.as_str(),
        source_ton: options.source_ton.as_str(),
        source_npi: options.source_npi.as_str(),
        test_time_to_live_in_seconds: options.time_to_live.seconds(),
        validity_period: options.validity_period,
        scheduled_delivery_time: options
            .scheduled_delivery_time
            .as_ref()
            .map(|time| time.as_str()),
        replace_if_present_flag: u8::from(options.replace_if_present),
        priority_flag: options.priority.value(),
        send_text_as_message_payload_tlv: u8::from(options.send_text_as_message_payload_tlv),
        comment_text: options.comment_text.as_deref(),
        tlv: tag_values(&options.tlv),
        udh: tag_values(&options.udh),
    })
}

/// Extra headers of a batch request; the callback token never goes in the body.
pub fn encode_new_batch_tests_headers(request: &NewBatchTests) -> Vec<(String, String)> {
    request
        .options()
        .results_callback_token
        .as_ref()
        .map(|token| (CallbackToken::HEADER.to_owned(), token.as_str().to_owned()))
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::{
        BatchOptions, Mcc, MessageText, Mnc, PriorityFlag, ScheduledDeliveryTime, SenderId,
        SupplierId,
    };

    fn entry() -> BatchTest {
        BatchTest::new(
            SenderId::new("TelQ").unwrap(),
            MessageText::new("hello").unwrap(),
            SupplierId::new(42),
            Mcc::new("246").unwrap(),
            Mnc::new("03").unwrap(),
        )
    }

    #[test]
    fn default_batch_body_matches_api_defaults() {
        let request = NewBatchTests::new(vec![entry()], BatchOptions::default()).unwrap();

        assert_eq!(
            encode_new_batch_tests_body(&request).unwrap(),
            json!({
                "tests": [{
                    "sender": "TelQ",
                    "text": "hello",
                    "testIdTextType": "ALPHA",
                    "testIdTextCase": "MIXED",
                    "testIdTextLength": 10,
                    "supplierId": 42,
                    "mcc": "246",
                    "mnc": "03",
                    "portedFromMnc": null
                }],
                "resultsCallbackUrl": null,
                "maxCallbackRetries": 1,
                "dataCoding": "01",
                "sourceTon": "00",
                "sourceNpi": "12",
                "testTimeToLiveInSeconds": 600,
                "validityPeriod": 120,
                "scheduledDeliveryTime": null,
                "replaceIfPresentFlag": 0,
                "priorityFlag": 1,
                "sendTextAsMessagePayloadTlv": 0,
                "commentText": null,
                "tlv": null,
                "udh": null
            })
        );
        assert!(encode_new_batch_tests_headers(&request).is_empty());
    }

    #[test]
    fn smpp_options_and_tag_values_are_encoded() {
        let options = BatchOptions {
            results_callback_token: Some(CallbackToken::new("cb-token").unwrap()),
            scheduled_delivery_time: Some(ScheduledDeliveryTime::new("220913124700000+").unwrap()),
            replace_if_present: true,
            priority: PriorityFlag::new(3).unwrap(),
            send_text_as_message_payload_tlv: true,
            comment_text: Some("nightly".to_owned()),
            tlv: vec![HexTagValue::new("1403", "3131").unwrap()],
            udh: vec![HexTagValue::new("00", "030102").unwrap()],
            ..Default::default()
        };
        let request = NewBatchTests::new(vec![entry()], options).unwrap();

        let body = encode_new_batch_tests_body(&request).unwrap();
        assert_eq!(body["scheduledDeliveryTime"], json!("220913124700000+"));
        assert_eq!(body["replaceIfPresentFlag"], json!(1));
        assert_eq!(body["priorityFlag"], json!(3));
        assert_eq!(body["sendTextAsMessagePayloadTlv"], json!(1));
        assert_eq!(body["commentText"], json!("nightly"));
        assert_eq!(body["tlv"], json!([{"tagHex": "1403", "valueHex": "3131"}]));
        assert_eq!(body["udh"], json!([{"tagHex": "00", "valueHex": "030102"}]));
        assert!(body.get("resultsCallbackToken").is_none());

        assert_eq!(
            encode_new_batch_tests_headers(&request),
            vec![(
                "results-callback-token".to_owned(),
                "cb-token".to_owned()
            )]
        );
    }

    #[test]
    fn all_digit_scheduled_delivery_time_is_sent_verbatim() {
        let options = BatchOptions {
            scheduled_delivery_time: Some(ScheduledDeliveryTime::new("2209131247000000").unwrap()),
            ..Default::default()
        };
        let request = NewBatchTests::new(vec![entry()], options).unwrap();

        let body = encode_new_batch_tests_body(&request).unwrap();
        assert_eq!(body["scheduledDeliveryTime"], json!("2209131247000000"));
    }
}
