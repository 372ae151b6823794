//! Response Decoding Tests

use bytes::Bytes;
use tsterm::term::{encode_term, Atom, Term};
use tsterm::{
    decode_get_response, decode_put_response, decode_query_response, Cell, Codec, CodecConfig,
    CodecError, ColumnDescriptor, ColumnType, ErrorKind, Row,
};

use super::fixtures::{error_response, row, ts_response};

// =============================================================================
// Success Responses
// =============================================================================

#[test]
fn test_decode_query_scenario() {
    let bytes = ts_response(
        Atom::TS_QUERY_RESP,
        &["time", "temp"],
        &["timestamp", "double"],
        vec![row(vec![Term::Integer(1_000_000), Term::Float(21.5)])],
    );

    let result = decode_query_response(&bytes).unwrap();

    assert_eq!(
        result.columns(),
        &[
            ColumnDescriptor::new("time", ColumnType::Timestamp),
            ColumnDescriptor::new("temp", ColumnType::Double),
        ]
    );
    assert_eq!(
        result.rows(),
        &[Row::new(vec![Cell::Timestamp(1_000_000), Cell::Double(21.5)])]
    );
}

#[test]
fn test_decode_get_response() {
    let bytes = ts_response(
        Atom::TS_GET_RESP,
        &["device", "time", "on"],
        &["varchar", "timestamp", "boolean"],
        vec![row(vec![
            Term::text("device-1"),
            Term::Integer(1_500_000_000_000),
            Term::Atom(Atom::TRUE),
        ])],
    );

    let result = decode_get_response(&bytes).unwrap();

    assert_eq!(result.row_count(), 1);
    assert_eq!(
        result.rows()[0].cells(),
        &[
            Cell::from("device-1"),
            Cell::Timestamp(1_500_000_000_000),
            Cell::Boolean(true),
        ]
    );
}

#[test]
fn test_timestamp_and_integer_share_value() {
    let bytes = ts_response(
        Atom::TS_QUERY_RESP,
        &["ts", "n"],
        &["timestamp", "sint64"],
        vec![row(vec![Term::Integer(777), Term::Integer(777)])],
    );

    let result = decode_query_response(&bytes).unwrap();
    let cells = result.rows()[0].cells();

    assert_eq!(cells[0], Cell::Timestamp(777));
    assert_eq!(cells[1], Cell::Integer(777));
}

#[test]
fn test_null_in_every_column_type() {
    let types = ["varchar", "sint64", "double", "timestamp", "boolean", "blob"];
    let names = ["a", "b", "c", "d", "e", "f"];
    let bytes = ts_response(
        Atom::TS_QUERY_RESP,
        &names,
        &types,
        vec![row(vec![Term::nil(); 6])],
    );

    let result = decode_query_response(&bytes).unwrap();
    assert!(result.rows()[0].iter().all(Cell::is_null));
}

#[test]
fn test_decode_empty_result() {
    let bytes = ts_response(Atom::TS_QUERY_RESP, &[], &[], vec![]);

    let result = decode_query_response(&bytes).unwrap();
    assert_eq!(result.column_count(), 0);
    assert!(result.is_empty());
}

#[test]
fn test_decode_columns_without_rows() {
    let bytes = ts_response(Atom::TS_QUERY_RESP, &["a"], &["sint64"], vec![]);

    let result = decode_query_response(&bytes).unwrap();
    assert_eq!(result.column_count(), 1);
    assert_eq!(result.row_count(), 0);
}

#[test]
fn test_multi_row_order_preserved() {
    let rows: Vec<Term> = (0..50)
        .map(|i| row(vec![Term::Integer(i), Term::text(&format!("v{}", i))]))
        .collect();
    let bytes = ts_response(Atom::TS_QUERY_RESP, &["i", "v"], &["sint64", "varchar"], rows);

    let result = decode_query_response(&bytes).unwrap();
    assert_eq!(result.row_count(), 50);
    for (i, r) in result.rows().iter().enumerate() {
        assert_eq!(r.get(0), Some(&Cell::Integer(i as i64)));
        assert_eq!(r.get(1), Some(&Cell::String(format!("v{}", i))));
    }
}

#[test]
fn test_put_rows_round_trip_through_response() {
    let columns = [
        ("family", ColumnType::Varchar),
        ("time", ColumnType::Timestamp),
        ("reading", ColumnType::Double),
        ("count", ColumnType::Sint64),
        ("ok", ColumnType::Boolean),
    ];
    let rows = vec![
        Row::new(vec![
            Cell::from("f1"),
            Cell::Timestamp(1_500_000_000_000),
            Cell::Double(-3.75),
            Cell::Integer(i64::MIN),
            Cell::Boolean(false),
        ]),
        Row::new(vec![
            Cell::from("f2"),
            Cell::Timestamp(0),
            Cell::Null,
            Cell::Integer(i64::MAX),
            Cell::Null,
        ]),
    ];

    let names: Vec<&str> = columns.iter().map(|(n, _)| *n).collect();
    let types: Vec<&str> = columns.iter().map(|(_, t)| t.as_str()).collect();
    let bytes = ts_response(
        Atom::TS_GET_RESP,
        &names,
        &types,
        rows.iter().map(Row::to_term).collect(),
    );

    let result = decode_get_response(&bytes).unwrap();
    let expected_columns: Vec<ColumnDescriptor> = columns
        .iter()
        .map(|(n, t)| ColumnDescriptor::new(*n, *t))
        .collect();

    assert_eq!(result.columns(), expected_columns.as_slice());
    assert_eq!(result.rows(), rows.as_slice());
}

#[test]
fn test_codec_instance_decodes() {
    let codec = Codec::new(CodecConfig::default());
    let bytes = ts_response(Atom::TS_GET_RESP, &["a"], &["double"], vec![row(vec![Term::Float(1.0)])]);
    assert_eq!(codec.decode_get_response(&bytes).unwrap().row_count(), 1);
}

// =============================================================================
// Backend Errors
// =============================================================================

#[test]
fn test_error_response_is_backend_error() {
    let bytes = error_response("Table t does not exist", 1019);

    let err = decode_query_response(&bytes).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::BackendError);
    assert!(err.is_backend());
    match err {
        CodecError::Backend { message, code } => {
            assert_eq!(message, "Table t does not exist");
            assert_eq!(code, 1019);
        }
        other => panic!("Expected backend error, got {}", other),
    }
}

#[test]
fn test_error_response_from_get() {
    let err = decode_get_response(&error_response("timeout", 3)).unwrap_err();
    assert!(matches!(err, CodecError::Backend { code: 3, .. }));
}

#[test]
fn test_error_response_wrong_arity() {
    let bytes = encode_term(&Term::Tuple(vec![
        Term::Atom(Atom::RPB_ERROR_RESP),
        Term::text("only a message"),
    ]));

    let err = decode_query_response(&bytes).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ProtocolViolation);
}

// =============================================================================
// Protocol Violations
// =============================================================================

#[test]
fn test_unrecognized_tag() {
    let bytes = encode_term(&Term::Tuple(vec![
        Term::Atom(Atom::TS_DEL_RESP),
        Term::nil(),
    ]));

    let err = decode_query_response(&bytes).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ProtocolViolation);
    assert!(matches!(err, CodecError::UnrecognizedResponse(ref tag) if tag == "tsdelresp"));
}

#[test]
fn test_column_count_mismatch() {
    let bytes = ts_response(Atom::TS_QUERY_RESP, &["a", "b"], &["sint64"], vec![]);

    let err = decode_query_response(&bytes).unwrap_err();
    assert!(matches!(
        err,
        CodecError::ColumnCountMismatch { names: 2, types: 1 }
    ));
}

#[test]
fn test_row_arity_mismatch() {
    let bytes = ts_response(
        Atom::TS_QUERY_RESP,
        &["a", "b"],
        &["sint64", "sint64"],
        vec![
            row(vec![Term::Integer(1), Term::Integer(2)]),
            row(vec![Term::Integer(3)]),
        ],
    );

    let err = decode_query_response(&bytes).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ProtocolViolation);
    assert!(matches!(
        err,
        CodecError::RowArity { row: 1, expected: 2, actual: 1 }
    ));
}

#[test]
fn test_unknown_column_type() {
    let bytes = ts_response(Atom::TS_QUERY_RESP, &["a"], &["geometry"], vec![]);

    let err = decode_query_response(&bytes).unwrap_err();
    assert!(matches!(err, CodecError::UnknownColumnType(ref t) if t == "geometry"));
}

#[test]
fn test_unknown_cell_shape() {
    let bytes = ts_response(
        Atom::TS_QUERY_RESP,
        &["a"],
        &["varchar"],
        vec![row(vec![Term::Tuple(vec![Term::Integer(1)])])],
    );

    let err = decode_query_response(&bytes).unwrap_err();
    assert!(matches!(err, CodecError::UnknownCellType { .. }));
}

#[test]
fn test_row_not_a_tuple() {
    let bytes = ts_response(
        Atom::TS_QUERY_RESP,
        &["a"],
        &["sint64"],
        vec![Term::List(vec![Term::Integer(1)])],
    );

    let err = decode_query_response(&bytes).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ProtocolViolation);
}

#[test]
fn test_success_tag_with_wrong_arity() {
    let bytes = encode_term(&Term::Tuple(vec![Term::Atom(Atom::TS_QUERY_RESP)]));

    let err = decode_query_response(&bytes).unwrap_err();
    assert!(matches!(err, CodecError::UnexpectedTerm { .. }));
}

#[test]
fn test_top_level_not_a_tuple() {
    let bytes = encode_term(&Term::Atom(Atom::TS_QUERY_RESP));

    let err = decode_query_response(&bytes).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ProtocolViolation);
}

// =============================================================================
// Malformed Encoding
// =============================================================================

#[test]
fn test_truncated_response() {
    let bytes = ts_response(
        Atom::TS_QUERY_RESP,
        &["a"],
        &["sint64"],
        vec![row(vec![Term::Integer(1)])],
    );

    for cut in 0..bytes.len() {
        let err = decode_query_response(&bytes[..cut]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedEncoding, "cut at {}", cut);
    }
}

#[test]
fn test_missing_version_marker() {
    let bytes = ts_response(Atom::TS_QUERY_RESP, &[], &[], vec![]);
    let err = decode_query_response(&bytes[1..]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedEncoding);
}

#[test]
fn test_trailing_bytes_rejected() {
    let mut bytes = ts_response(Atom::TS_QUERY_RESP, &[], &[], vec![]).to_vec();
    bytes.push(106);

    let err = decode_query_response(&bytes).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedEncoding);
}

#[test]
fn test_message_size_limit() {
    let codec = Codec::new(CodecConfig::builder().max_message_size(8).build());
    let bytes = ts_response(Atom::TS_QUERY_RESP, &["a"], &["sint64"], vec![]);

    let err = codec.decode_query_response(&bytes).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedEncoding);
    assert!(err.to_string().contains("exceeds limit"));
}

#[test]
fn test_message_size_in_megabytes_saturates() {
    let config = CodecConfig::builder().max_message_mb(2).build();
    assert_eq!(config.max_message_size, 2 * 1024 * 1024);

    let config = CodecConfig::builder().max_message_mb(usize::MAX).build();
    assert_eq!(config.max_message_size, usize::MAX);
}

// =============================================================================
// Put Acknowledgement
// =============================================================================

#[test]
fn test_put_response_bare_atom() {
    let bytes = encode_term(&Term::Atom(Atom::TS_PUT_RESP));
    decode_put_response(&bytes).unwrap();
}

#[test]
fn test_put_response_tuple() {
    let bytes = encode_term(&Term::Tuple(vec![Term::Atom(Atom::TS_PUT_RESP)]));
    decode_put_response(&bytes).unwrap();
}

#[test]
fn test_put_response_backend_error() {
    let err = decode_put_response(&error_response("bad row", 1003)).unwrap_err();
    assert!(matches!(err, CodecError::Backend { code: 1003, ref message } if message == "bad row"));
}

#[test]
fn test_put_response_unrecognized() {
    let err = decode_put_response(&encode_term(&Term::Atom(Atom::TS_GET_RESP))).unwrap_err();
    assert!(matches!(err, CodecError::UnrecognizedResponse(_)));

    let err = decode_put_response(&encode_term(&Term::Integer(1))).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ProtocolViolation);
}

#[test]
fn test_put_response_garbage() {
    let err = decode_put_response(&Bytes::from_static(&[131, 0xFF])).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedEncoding);
}
