use super::*;

#[test]
fn decodes_reference_request_shape() {
    let json = br#"{"requests":[{"id":"1","function":"waveform","params":["AAAA","extra"]}]}"#;
    let requests = decode_requests(json).unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].id, "1");
    assert!(requests[0].is_waveform());
    assert_eq!(requests[0].payload(), Some("AAAA"));
    assert_eq!(requests[0].params.len(), 2);
}

#[test]
fn missing_fields_default_to_empty() {
    let requests = decode_requests(br#"{"requests":[{"id":"a"},{}]}"#).unwrap();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].function, "");
    assert_eq!(requests[0].payload(), None);
    assert_eq!(requests[1], RenderRequest::default());

    assert!(decode_requests(b"{}").unwrap().is_empty());
}

#[test]
fn unknown_fields_are_ignored() {
    let json = br#"{"jsonrpc":"2.0","requests":[{"id":"x","function":"f","params":[],"meta":1}]}"#;
    let requests = decode_requests(json).unwrap();
    assert_eq!(requests[0].function, "f");
}

#[test]
fn malformed_json_is_a_decode_error() {
    let cases: [&[u8]; 5] = [b"", b"{", b"not json", br#"{"requests":{}}"#, b"[1,2]"];
    for bad in cases {
        let err = decode_requests(bad).unwrap_err();
        assert!(matches!(err, WaveformError::Decode(_)), "input {bad:?}");
    }
}

#[test]
fn empty_batch_encodes_to_empty_array() {
    let out = encode_responses(&[]).unwrap();
    assert_eq!(out, br#"{"responses":[]}"#);
}

#[test]
fn responses_keep_field_order_and_marker() {
    let out = encode_responses(&[
        RenderResult::success("1", "QUJD".to_owned()),
        RenderResult::failure("2", "bad payload"),
    ])
    .unwrap();
    assert_eq!(
        std::str::from_utf8(&out).unwrap(),
        r#"{"responses":[{"id":"1","result":"QUJD","error":"false"},{"id":"2","result":"","error":"bad payload"}]}"#
    );
}

#[test]
fn client_side_helpers_mirror_server_side() {
    let requests = vec![
        RenderRequest::waveform("a", "AAAA"),
        RenderRequest::waveform("b", "BBBB"),
    ];
    let doc = encode_requests(&requests).unwrap();
    assert_eq!(decode_requests(&doc).unwrap(), requests);

    let results = vec![RenderResult::failure("a", "x")];
    let doc = encode_responses(&results).unwrap();
    let decoded = decode_responses(&doc).unwrap();
    assert_eq!(decoded, results);
    assert!(!decoded[0].is_success());
}
