//! Domain layer: strong types with validation and invariants (no I/O).

mod request;
mod response;
mod validation;
mod value;

pub use request::{
    BatchOptions, BatchResultsQuery, BatchTest, Destination, NewBatchTests, NewTests, TestOptions,
};
pub use response::{
    CreatedTest, DestinationNetwork, Network, NetworkDetails, TestResult, TestStatus,
};
pub use validation::ValidationError;
pub use value::{
    ApiVersion, AppId, AppKey, CallbackToken, CallbackUrl, DateTimeBound, HexTagValue,
    MaxCallbackRetries, Mcc, MessageText, Mnc, Page, PageSize, PhoneNumber, PriorityFlag,
    RawPhoneNumber, ScheduledDeliveryTime, SenderId, SmppOctet, SortOrder, SupplierId, TestId,
    TestIdTextCase, TestIdTextLength, TestIdTextType, TimeToLive,
};

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn lithuania() -> serde_json::Value {
        json!({
            "mcc": "246",
            "countryName": "Lithuania",
            "mnc": "03",
            "providerName": "Tele2",
            "portedFromMnc": "02",
            "portedFromProviderName": "BITE"
        })
    }

    #[test]
    fn destination_from_network_descriptor_keeps_codes() {
        let destination = Destination::from_json(&lithuania()).unwrap();
        assert_eq!(
            destination,
            Destination::ported(
                Mcc::new("246").unwrap(),
                Mnc::new("03").unwrap(),
                Mnc::new("02").unwrap()
            )
        );
    }

    #[test]
    fn destination_treats_null_ported_mnc_as_absent() {
        let value = json!({"mcc": "364", "mnc": "49", "portedFromMnc": null});
        let destination = Destination::from_json(&value).unwrap();
        assert_eq!(
            destination,
            Destination::network(Mcc::new("364").unwrap(), Mnc::new("49").unwrap())
        );
    }

    #[test]
    fn destination_falls_back_to_phone_number() {
        let value = json!({"phoneNumber": "77055626363"});
        let destination = Destination::from_json(&value).unwrap();
        assert_eq!(
            destination,
            Destination::phone_number(RawPhoneNumber::new("77055626363").unwrap())
        );
    }

    #[test]
    fn destination_without_codes_or_phone_is_rejected() {
        for value in [
            json!({}),
            json!({"mcc": "246"}),
            json!({"mnc": "03", "countryName": "Lithuania"}),
            json!({"mcc": null, "mnc": null, "phoneNumber": null}),
            json!("246-03"),
        ] {
            assert_eq!(
                Destination::from_json(&value),
                Err(ValidationError::MissingDestination),
                "accepted {value}"
            );
        }
    }

    #[test]
    fn destination_rejects_non_string_codes() {
        let value = json!({"mcc": 246, "mnc": "03"});
        assert!(matches!(
            Destination::from_json(&value),
            Err(ValidationError::InvalidFormat { field: "mcc", .. })
        ));
    }

    #[test]
    fn new_tests_requires_destinations() {
        let err = NewTests::new(Vec::new(), TestOptions::default()).unwrap_err();
        assert_eq!(
            err,
            ValidationError::Empty {
                field: "destinationNetworks"
            }
        );

        let request = NewTests::from_json(&[lithuania()], TestOptions::default()).unwrap();
        assert_eq!(request.destinations().len(), 1);
    }

    #[test]
    fn test_options_defaults_match_api_defaults() {
        let options = TestOptions::default();
        assert!(options.results_callback_url.is_none());
        assert_eq!(options.max_callback_retries.value(), 3);
        assert_eq!(options.test_id_text_type, TestIdTextType::Alpha);
        assert_eq!(options.test_id_text_case, TestIdTextCase::Mixed);
        assert_eq!(options.test_id_text_length.value(), 10);
        assert_eq!(options.time_to_live.seconds(), 3600);
    }

    #[test]
    fn batch_options_defaults_match_api_defaults() {
        let options = BatchOptions::default();
        assert_eq!(options.max_callback_retries.value(), 1);
        assert_eq!(options.data_coding.as_str(), "01");
        assert_eq!(options.source_ton.as_str(), "00");
        assert_eq!(options.source_npi.as_str(), "12");
        assert_eq!(options.time_to_live.seconds(), 600);
        assert_eq!(options.validity_period, 120);
        assert_eq!(options.priority.value(), 1);
        assert!(!options.replace_if_present);
        assert!(options.tlv.is_empty());
    }

    #[test]
    fn batch_requires_entries() {
        let err = NewBatchTests::new(Vec::new(), BatchOptions::default()).unwrap_err();
        assert_eq!(err, ValidationError::Empty { field: "tests" });
    }

    #[test]
    fn batch_entry_from_json_reports_index_of_malformed_entry() {
        let good = json!({
            "sender": "TelQ",
            "text": "hello",
            "supplierId": 42,
            "mcc": "246",
            "mnc": "03"
        });
        let missing_sender = json!({"text": "hello", "supplierId": 42, "mcc": "246", "mnc": "03"});

        let err = NewBatchTests::from_json(&[good.clone(), missing_sender], BatchOptions::default())
            .unwrap_err();
        assert!(matches!(
            err,
            ValidationError::Malformed {
                field: "tests",
                index: 1,
                ..
            }
        ));

        let batch = NewBatchTests::from_json(&[good], BatchOptions::default()).unwrap();
        let entry = &batch.tests()[0];
        assert_eq!(entry.sender.as_str(), "TelQ");
        assert_eq!(entry.supplier_id.value(), 42);
        assert_eq!(entry.test_id_text_length.value(), 10);
        assert!(entry.ported_from_mnc.is_none());
    }

    #[test]
    fn batch_entry_from_json_validates_values() {
        let value = json!({
            "sender": "TelQ",
            "text": "hello",
            "testIdTextLength": 30,
            "supplierId": 42,
            "mcc": "246",
            "mnc": "03"
        });
        assert!(matches!(
            BatchTest::from_json(&value),
            Err(ValidationError::OutOfRange {
                field: "testIdTextLength",
                ..
            })
        ));
    }

    #[test]
    fn typed_views_decode_documented_payloads() {
        let networks: Vec<Network> = serde_json::from_value(json!([lithuania()])).unwrap();
        assert_eq!(networks[0].mcc.as_str(), "246");
        assert_eq!(networks[0].provider_name.as_deref(), Some("Tele2"));

        let created: Vec<CreatedTest> = serde_json::from_value(json!([{
            "id": 13754642,
            "testIdText": "woOMJtrQAy",
            "phoneNumber": "14045183990",
            "errorMessage": null,
            "destinationNetwork": {"mcc": "310", "mnc": "012", "portedFromMnc": "260"},
            "testIdTextType": "ALPHA",
            "testIdTextCase": "MIXED",
            "testIdTextLength": 10
        }]))
        .unwrap();
        assert_eq!(created[0].test_id_text_type, Some(TestIdTextType::Alpha));

        let result: TestResult = serde_json::from_value(json!({
            "id": 13754642,
            "testIdText": "woOMJtrQAy",
            "senderDelivered": null,
            "textDelivered": null,
            "testCreatedAt": "2022-05-13T19:46:38.011254Z",
            "smsReceivedAt": null,
            "receiptDelay": null,
            "testStatus": "WAIT",
            "destinationNetworkDetails": {
                "mcc": "310",
                "mnc": "012",
                "portedFromMnc": "260",
                "countryName": "United States of America",
                "providerName": "Verizon",
                "portedFromProviderName": "T-Mobile"
            },
            "smscInfo": null,
            "pdusDelivered": []
        }))
        .unwrap();
        assert_eq!(result.test_status, TestStatus::Wait);
        assert!(!result.test_status.is_final());
        assert!(result.pdus_delivered.is_empty());
    }

    #[test]
    fn unknown_test_status_keeps_server_value() {
        let status: TestStatus = serde_json::from_value(json!("SOMETHING_NEW")).unwrap();
        assert_eq!(status, TestStatus::Unknown("SOMETHING_NEW".to_owned()));
        assert_eq!(status.as_str(), "SOMETHING_NEW");
        assert!(status.is_final());

        let status: TestStatus = serde_json::from_value(json!("NOT_DELIVERED")).unwrap();
        assert_eq!(status, TestStatus::NotDelivered);
        assert_eq!(status.as_str(), "NOT_DELIVERED");
    }
}
