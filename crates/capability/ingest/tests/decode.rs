use apex_ingest::{IngestError, decode_update};

const PREFIX: &str = "apex/data-store-updates";

#[test]
fn decodes_camel_case_message() {
    let payload = br#"{
        "correlationId": "corr-1",
        "payloadType": "tblTransactions",
        "action": "Insert",
        "payload": "{\"transactionId\":1}"
    }"#;
    let message = decode_update(PREFIX, "apex/data-store-updates/ignored", payload).expect("decode");
    assert_eq!(message.correlation_id, "corr-1");
    assert_eq!(message.payload_type.as_deref(), Some("tblTransactions"));
    assert_eq!(message.action.as_deref(), Some("Insert"));
    assert!(message.payload.is_some());
}

#[test]
fn payload_type_and_correlation_are_filled_in() {
    let payload = br#"{"correlationId": "", "action": "update"}"#;
    let message =
        decode_update(PREFIX, "apex/data-store-updates/tblTransactions", payload).expect("decode");
    assert_eq!(message.payload_type.as_deref(), Some("tblTransactions"));
    assert!(!message.correlation_id.is_empty());
    assert!(message.payload.is_none());
}

#[test]
fn invalid_json_is_a_decode_error() {
    let result = decode_update(PREFIX, "apex/data-store-updates/tblTransactions", b"not json");
    assert!(matches!(result, Err(IngestError::Decode(_))));
}

#[test]
fn qos_values_out_of_range_fall_back_to_at_least_once() {
    use apex_ingest::qos_from_u8;
    use rumqttc::QoS;

    assert_eq!(qos_from_u8(0), QoS::AtMostOnce);
    assert_eq!(qos_from_u8(2), QoS::ExactlyOnce);
    assert_eq!(qos_from_u8(9), QoS::AtLeastOnce);
}
