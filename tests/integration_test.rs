//! End-to-end tests for the fieldlink engine.
//!
//! These drive the full pipeline the way a serial transport would: raw
//! chunks in, decoded frames and wire-ready replies out. Frames are
//! assembled by hand here so the tests stay independent of the encoder
//! under test.

use fieldlink::{
    DescribeInfo, Family, FieldIssue, FieldValue, FloatDecodeMode, FunctionCode, FunctionCodeInfo,
    LinkSession, SessionConfig, Variant,
};

const VENDOR_ID: u16 = 0x002A;
const DEVICE_TYPE: u16 = 0x0110;
const GROUP: u8 = 0x03;
const NUMBER: u8 = 0x0C;

/// Content region shared by every frame family: common header plus payload.
fn content(function: u16, payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&VENDOR_ID.to_be_bytes());
    out.extend_from_slice(&DEVICE_TYPE.to_be_bytes());
    out.push(GROUP);
    out.push(NUMBER);
    out.extend_from_slice(&function.to_be_bytes());
    out.extend_from_slice(payload);
    out
}

fn fe_frame(command: u16, content: &[u8]) -> Vec<u8> {
    let mut frame = vec![0xFE, content.len() as u8];
    frame.extend_from_slice(&command.to_be_bytes());
    frame.extend_from_slice(content);
    let cks = frame[1..].iter().fold(0u8, |acc, b| acc ^ b);
    frame.push(cks);
    frame
}

fn digi_frame(address: [u8; 8], content: &[u8]) -> Vec<u8> {
    let mut frame = vec![0x7E];
    frame.extend_from_slice(&((10 + content.len()) as u16).to_be_bytes());
    frame.extend_from_slice(&address);
    frame.extend_from_slice(&[0x00, 0x00]);
    frame.extend_from_slice(content);
    let sum = frame[3..].iter().fold(0u8, |acc, b| acc.wrapping_add(*b));
    frame.push(0xFF_u8.wrapping_sub(sum));
    frame
}

fn lora_frame(content: &[u8]) -> Vec<u8> {
    let mut frame = vec![0x7E];
    frame.extend_from_slice(&((4 + content.len()) as u16).to_be_bytes());
    frame.extend_from_slice(&[0x00; 4]);
    frame.extend_from_slice(content);
    let sum = frame[1..].iter().fold(0u8, |acc, b| acc.wrapping_add(*b));
    frame.push(0xFF_u8.wrapping_sub(sum));
    frame
}

fn real_time_payload(value: f32) -> Vec<u8> {
    let mut payload = vec![
        0x5F, // success_rate 95%
        0x62, // battery 98%
        0x00, 0x3C, // sleep 60s
        0x00, 0x00, // status clear
        0x00, 0x00, 0x01, 0x00, // uptime
    ];
    payload.extend_from_slice(&value.to_be_bytes());
    payload
}

#[test]
fn digi_report_split_across_two_chunks() {
    let addr = [0x00, 0x13, 0xA2, 0x00, 0x41, 0x52, 0x9A, 0xB3];
    let frame = digi_frame(addr, &content(0x0101, &real_time_payload(21.5)));
    let (chunk1, chunk2) = frame.split_at(frame.len() / 2);

    let mut session = LinkSession::new(SessionConfig::new(Variant::Digi, FloatDecodeMode::Ieee754));

    let out = session.feed(chunk1);
    assert!(out.frames.is_empty());
    assert_eq!(out.discarded, 0);

    let out = session.feed(chunk2);
    assert_eq!(out.frames.len(), 1);
    let decoded = &out.frames[0];
    assert_eq!(decoded.family, Family::SevenE);
    assert_eq!(decoded.variant, Variant::Digi);
    assert_eq!(decoded.address.unwrap().as_bytes(), &addr);
    assert_eq!(
        decoded.function,
        FunctionCodeInfo::Known(FunctionCode::RealTimeData)
    );
    assert_eq!(decoded.field("battery"), Some(&FieldValue::Uint(0x62)));
    assert_eq!(decoded.field("value"), Some(&FieldValue::Float(21.5)));
}

#[test]
fn chunk_size_does_not_change_decoded_frames() {
    let frame = lora_frame(&content(0x0101, &real_time_payload(-4.75)));
    let config = SessionConfig::new(Variant::Lora, FloatDecodeMode::Ieee754);

    let mut whole = LinkSession::new(config);
    let expected = whole.feed(&frame).frames;
    assert_eq!(expected.len(), 1);

    for chunk_size in [1, 2, 3, 5, 7, frame.len() - 1] {
        let mut session = LinkSession::new(config);
        let mut frames = Vec::new();
        for chunk in frame.chunks(chunk_size) {
            frames.extend(session.feed(chunk).frames);
        }
        assert_eq!(frames.len(), 1, "chunk size {chunk_size}");
        assert_eq!(frames[0], expected[0], "chunk size {chunk_size}");
    }
}

#[test]
fn interior_marker_bytes_survive_chunked_delivery() {
    // Uptime bytes that mimic FE and 7E frame starts inside the payload.
    let mut payload = real_time_payload(21.5);
    payload[6] = 0xFE;
    payload[7] = 0x7E;
    let frame = digi_frame([0x44; 8], &content(0x0101, &payload));

    let config = SessionConfig::new(Variant::Digi, FloatDecodeMode::Ieee754);
    for chunk_size in [1, 3, 4, 9] {
        let mut session = LinkSession::new(config);
        let mut frames = Vec::new();
        let mut discarded = 0;
        for chunk in frame.chunks(chunk_size) {
            let out = session.feed(chunk);
            discarded += out.discarded;
            frames.extend(out.frames);
        }
        assert_eq!(frames.len(), 1, "chunk size {chunk_size}");
        assert_eq!(discarded, 0, "chunk size {chunk_size}");
        assert_eq!(
            frames[0].field("uptime"),
            Some(&FieldValue::Uint(0xFE7E_0100))
        );
    }
}

#[test]
fn garbage_prefix_is_skipped_and_counted() {
    let frame = fe_frame(0x0001, &content(0x0201, &[]));
    let mut stream = vec![0x00, 0x00];
    stream.extend_from_slice(&frame);

    let mut session =
        LinkSession::new(SessionConfig::new(Variant::Generic, FloatDecodeMode::Ieee754));
    let out = session.feed(&stream);
    assert_eq!(out.frames.len(), 1);
    assert_eq!(out.discarded, 2);
    assert_eq!(
        out.frames[0].function,
        FunctionCodeInfo::Known(FunctionCode::ReadRequest)
    );
}

#[test]
fn corrupted_frame_is_dropped_and_stream_recovers() {
    let good = fe_frame(0x0001, &content(0x0101, &real_time_payload(1.0)));
    let mut bad = good.clone();
    bad[6] ^= 0x20; // flip one content bit, checksum now fails
    let mut stream = bad.clone();
    stream.extend_from_slice(&good);

    let mut session =
        LinkSession::new(SessionConfig::new(Variant::Generic, FloatDecodeMode::Ieee754));
    let out = session.feed(&stream);
    assert_eq!(out.frames.len(), 1);
    assert_eq!(out.discarded, bad.len());
}

#[test]
fn unknown_function_code_yields_header_only_frame() {
    let frame = fe_frame(0x0001, &content(0x05FF, &[0xDE, 0xAD]));
    let mut session =
        LinkSession::new(SessionConfig::new(Variant::Generic, FloatDecodeMode::Ieee754));
    let out = session.feed(&frame);

    assert_eq!(out.frames.len(), 1);
    let decoded = &out.frames[0];
    assert_eq!(decoded.function, FunctionCodeInfo::Unrecognized(0x05FF));
    assert!(decoded.fields.is_empty());
    assert_eq!(decoded.vendor_id, VENDOR_ID);
    assert_eq!(decoded.device.group(), GROUP);
}

#[test]
fn legacy_float_mode_is_applied_per_session() {
    let frame = lora_frame(&content(0x0101, &real_time_payload(3.0)));

    let mut modern = LinkSession::new(SessionConfig::new(Variant::Lora, FloatDecodeMode::Ieee754));
    let out = modern.feed(&frame);
    assert_eq!(out.frames[0].field("value"), Some(&FieldValue::Float(3.0)));

    let mut legacy = LinkSession::new(SessionConfig::new(Variant::Lora, FloatDecodeMode::Legacy));
    let out = legacy.feed(&frame);
    assert_eq!(out.frames[0].field("value"), Some(&FieldValue::Float(6.0)));
}

#[test]
fn basic_info_report_then_acknowledgement_round_trip() {
    let mut payload = Vec::new();
    payload.extend_from_slice(b"PT-300          ");
    payload.extend_from_slice(b"00A1B2C3");
    payload.extend_from_slice(b"v2.1.0  ");
    payload.extend_from_slice(b"0-10MPa ");
    payload.extend_from_slice(b"0.25%   ");
    payload.extend_from_slice(b"IP67    ");
    payload.extend_from_slice(b"ExiaIIC ");
    payload.extend_from_slice(&[b' '; 32]);

    let addr = [0x11; 8];
    let frame = digi_frame(addr, &content(0x0102, &payload));
    let mut session = LinkSession::new(SessionConfig::new(Variant::Digi, FloatDecodeMode::Ieee754));

    let out = session.feed(&frame);
    assert_eq!(out.frames.len(), 1);
    let decoded = &out.frames[0];
    match decoded.field("model") {
        Some(FieldValue::Text(t)) => assert_eq!(t.as_str(), "PT-300"),
        other => panic!("model: {other:?}"),
    }
    assert_eq!(decoded.field("serial"), Some(&FieldValue::Uint(0x00A1_B2C3)));

    // Acknowledge, then feed our own reply back: it must decode cleanly
    // under the same session.
    let reply = session.ack_basic_info(0x01).unwrap();
    let out = session.feed(&reply);
    assert_eq!(out.frames.len(), 1);
    assert_eq!(
        out.frames[0].function,
        FunctionCodeInfo::Known(FunctionCode::AckBasicInfo)
    );
    assert_eq!(out.frames[0].field("status"), Some(&FieldValue::Uint(1)));
    assert_eq!(out.frames[0].address.unwrap().as_bytes(), &addr);
}

#[test]
fn truncated_payload_reports_per_field_issues() {
    // Real-time payload cut after `sleep_seconds`.
    let frame = fe_frame(0x0001, &content(0x0101, &real_time_payload(0.0)[..4]));
    let mut session =
        LinkSession::new(SessionConfig::new(Variant::Generic, FloatDecodeMode::Ieee754));
    let out = session.feed(&frame);

    let decoded = &out.frames[0];
    assert_eq!(decoded.field("sleep_seconds"), Some(&FieldValue::Uint(60)));
    assert_eq!(
        decoded.field("status"),
        Some(&FieldValue::Invalid(FieldIssue::Truncated))
    );
    assert_eq!(
        decoded.field("value"),
        Some(&FieldValue::Invalid(FieldIssue::Truncated))
    );
}

#[test]
fn calibration_exchange_round_trips() {
    let addr = [0x22; 8];
    let mut session = LinkSession::new(SessionConfig::new(Variant::Digi, FloatDecodeMode::Ieee754));
    session.feed(&digi_frame(addr, &content(0x0201, &[])));

    let describe = session
        .describe(&DescribeInfo {
            model: "PT-300",
            serial: "SN-0042",
            ip_rating: "IP67",
            explosion_grade: "ExiaIIC",
            description: "wellhead pressure",
        })
        .unwrap();
    let out = session.feed(&describe);
    assert_eq!(
        out.frames[0].function,
        FunctionCodeInfo::Known(FunctionCode::DescribeCalibration)
    );
    match out.frames[0].field("description") {
        Some(FieldValue::Text(t)) => assert_eq!(t.as_str(), "wellhead pressure"),
        other => panic!("description: {other:?}"),
    }

    let calibrate = session.calibrate(2, "MPa", 1.25).unwrap();
    let out = session.feed(&calibrate);
    assert_eq!(out.frames[0].field("param_index"), Some(&FieldValue::Uint(2)));
    assert_eq!(out.frames[0].field("value"), Some(&FieldValue::Float(1.25)));
}

#[test]
fn two_frames_in_one_chunk_decode_in_order() {
    let first = lora_frame(&content(0x0101, &real_time_payload(1.0)));
    let second = lora_frame(&content(0x0201, &[]));
    let mut stream = first;
    stream.extend_from_slice(&second);

    let mut session = LinkSession::new(SessionConfig::new(Variant::Lora, FloatDecodeMode::Ieee754));
    let out = session.feed(&stream);
    assert_eq!(out.frames.len(), 2);
    assert_eq!(
        out.frames[0].function,
        FunctionCodeInfo::Known(FunctionCode::RealTimeData)
    );
    assert_eq!(
        out.frames[1].function,
        FunctionCodeInfo::Known(FunctionCode::ReadRequest)
    );
}

#[test]
fn disconnect_resets_and_requires_reassociation() {
    let frame = digi_frame([0x33; 8], &content(0x0402, &[0x01]));
    let mut session = LinkSession::new(SessionConfig::new(Variant::Digi, FloatDecodeMode::Ieee754));

    let out = session.feed(&frame);
    assert_eq!(
        out.frames[0].function,
        FunctionCodeInfo::Known(FunctionCode::Disconnect)
    );
    assert!(session.disconnect(0x01).is_ok());

    session.reset();
    assert!(session.disconnect(0x01).is_err());
}
