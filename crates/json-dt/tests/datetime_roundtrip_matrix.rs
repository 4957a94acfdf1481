use json_dt::{
    from_reader, from_str, from_str_control, to_string, to_string_control, to_writer_control,
    DateTime, DecodeError, Decoder, EncodeError, EncodeOptions, Encoder, OtherValue, Value,
};
use time::macros::{datetime, offset};

fn obj(fields: &[(&str, Value)]) -> Value {
    Value::Object(
        fields
            .iter()
            .map(|(k, v)| ((*k).to_owned(), v.clone()))
            .collect(),
    )
}

fn officer_record() -> Value {
    obj(&[
        ("name", Value::from("Worf")),
        (
            "birthday",
            Value::from(DateTime::new(datetime!(2340-12-09 3:32))),
        ),
        (
            "postings",
            obj(&[
                (
                    "USS Hawk",
                    Value::from(DateTime::new(datetime!(2358-02-03 8:00))),
                ),
                (
                    "Deep Space 9",
                    Value::from(DateTime::new(datetime!(2372-01-05 4:08))),
                ),
            ]),
        ),
        (
            "log",
            Value::Array(vec![
                Value::from(DateTime::from(datetime!(2373-11-23 3:35:00.000001 UTC))),
                Value::Null,
                Value::Bool(true),
                Value::Integer(1),
            ]),
        ),
        ("children", Value::Integer(1)),
    ])
}

#[test]
fn roundtrip_matrix() {
    let record = officer_record();
    for control in [false, true] {
        let encoded = if control {
            to_string_control(&record).expect("encode")
        } else {
            to_string(&record).expect("encode")
        };
        let decoded = if control {
            from_str_control(&encoded).expect("decode")
        } else {
            from_str(&encoded).expect("decode")
        };
        assert_eq!(decoded, record, "control={control}");
    }
}

#[test]
fn control_mode_roundtrips_date_shaped_strings_unchanged() {
    // One real date and one string that merely looks like a date: only
    // control mode can bring this object back as-is.
    let strange = obj(&[
        (
            "a_date",
            Value::from(DateTime::new(datetime!(2019-08-19 21:32:59.169730))),
        ),
        ("b_date", Value::from("2018-05-01T07:03:44.560600")),
    ]);
    let encoded = to_string_control(&strange).expect("encode");
    assert_eq!(
        encoded,
        r#"{"a_date":"\\D2019-08-19T21:32:59.169730","b_date":"2018-05-01T07:03:44.560600"}"#
    );
    assert_eq!(from_str_control(&encoded).expect("decode"), strange);
}

#[test]
fn encoded_text_matrix() {
    let record = obj(&[(
        "ctime",
        Value::from(DateTime::new(datetime!(2019-08-17 7:54:22.175))),
    )]);
    assert_eq!(
        to_string(&record).expect("encode"),
        r#"{"ctime":"2019-08-17T07:54:22.175000"}"#
    );
    assert_eq!(
        to_string_control(&record).expect("encode"),
        r#"{"ctime":"\\D2019-08-17T07:54:22.175000"}"#
    );
}

#[test]
fn zero_microseconds_format_omits_fraction_and_roundtrips() {
    let record = obj(&[(
        "birthday",
        Value::from(DateTime::new(datetime!(2340-12-09 3:32))),
    )]);
    let encoded = to_string(&record).expect("encode");
    assert_eq!(encoded, r#"{"birthday":"2340-12-09T03:32:00"}"#);
    assert_eq!(from_str(&encoded).expect("decode"), record);
}

#[test]
fn marker_recognized_even_outside_control_mode() {
    let decoded = from_str(r#"{"k": "\\D2020-01-01T00:00:00"}"#).expect("decode");
    assert_eq!(
        decoded,
        obj(&[("k", Value::from(DateTime::new(datetime!(2020-01-01 0:00))))])
    );
}

#[test]
fn control_mode_suppresses_heuristic_recognition() {
    let decoded = from_str_control(r#"{"k": "2020-01-01T00:00:00"}"#).expect("decode");
    assert_eq!(decoded, obj(&[("k", Value::from("2020-01-01T00:00:00"))]));
}

#[test]
fn heuristic_recognition_outside_control_mode() {
    let decoded = from_str(r#"{"k": "2020-01-01T00:00:00"}"#).expect("decode");
    assert_eq!(
        decoded,
        obj(&[("k", Value::from(DateTime::new(datetime!(2020-01-01 0:00))))])
    );
}

#[test]
fn z_suffix_normalizes_to_explicit_utc_offset() {
    let decoded = from_str(r#"{"ctime":"2019-08-19T19:35:59.999Z"}"#).expect("decode");
    let Value::Object(pairs) = decoded else {
        panic!("expected object");
    };
    let Value::DateTime(dt) = &pairs[0].1 else {
        panic!("expected datetime, got {:?}", pairs[0].1);
    };
    assert_eq!(dt.offset(), Some(offset!(UTC)));
    assert_eq!(dt.microsecond(), 999_000);
    assert_eq!(*dt, DateTime::from(datetime!(2019-08-19 19:35:59.999 UTC)));
}

#[test]
fn date_recognition_applies_to_strings_outside_objects() {
    let decoded = from_str(r#"["2020-01-01T00:00:00", "plain"]"#).expect("decode");
    assert_eq!(
        decoded,
        Value::Array(vec![
            Value::from(DateTime::new(datetime!(2020-01-01 0:00))),
            Value::from("plain"),
        ])
    );
    let decoded = from_str(r#""2020-01-01T00:00:00""#).expect("decode");
    assert_eq!(decoded, Value::from(DateTime::new(datetime!(2020-01-01 0:00))));
}

#[test]
fn numeric_looking_strings_stay_strings() {
    let decoded = from_str(r#"{"k": "1234-5678"}"#).expect("decode");
    assert_eq!(decoded, obj(&[("k", Value::from("1234-5678"))]));
}

#[test]
fn malformed_date_shaped_string_fails_decode() {
    match from_str(r#"{"k": "2020-13-99T00:00:00"}"#) {
        Err(DecodeError::InvalidDate(s)) => assert_eq!(s, "2020-13-99T00:00:00"),
        other => panic!("expected InvalidDate, got {other:?}"),
    }
    // A marked string always parses as a date, so a bad one fails even in
    // control mode.
    match from_str_control(r#"{"k": "\\Dnot-a-date"}"#) {
        Err(DecodeError::InvalidDate(s)) => assert_eq!(s, "not-a-date"),
        other => panic!("expected InvalidDate, got {other:?}"),
    }
}

#[test]
fn fallback_hook_serializes_other_values() {
    #[derive(Debug)]
    struct Price(&'static str);

    let record = obj(&[("price", Value::Other(OtherValue::new(Price("4.95"))))]);

    let encoder = Encoder::new()
        .with_default(|other| other.downcast_ref::<Price>().map(|p| Value::from(p.0)));
    assert_eq!(encoder.encode(&record).expect("encode"), r#"{"price":"4.95"}"#);

    match to_string(&record) {
        Err(EncodeError::UnserializableValue) => {}
        other => panic!("expected UnserializableValue, got {other:?}"),
    }
}

#[test]
fn fallback_replacement_is_redispatched() {
    struct Epoch;

    let record = obj(&[("t", Value::Other(OtherValue::new(Epoch)))]);
    let encoder = Encoder::control().with_default(|other| {
        other
            .downcast_ref::<Epoch>()
            .map(|_| Value::from(DateTime::new(datetime!(1970-01-01 0:00))))
    });
    assert_eq!(
        encoder.encode(&record).expect("encode"),
        r#"{"t":"\\D1970-01-01T00:00:00"}"#
    );
}

#[test]
fn non_finite_numbers_are_rejected() {
    match to_string(&Value::Float(f64::NAN)) {
        Err(EncodeError::NonFiniteNumber) => {}
        other => panic!("expected NonFiniteNumber, got {other:?}"),
    }
}

#[test]
fn empty_object_both_directions() {
    assert_eq!(to_string(&Value::Object(vec![])).expect("encode"), "{}");
    assert_eq!(from_str("{}").expect("decode"), Value::Object(vec![]));
}

#[test]
fn object_hook_receives_ordered_pairs_after_date_conversion() {
    let decoder = Decoder::new().with_object_hook(|pairs| {
        Value::Array(
            pairs
                .into_iter()
                .map(|(k, v)| Value::Array(vec![Value::Str(k), v]))
                .collect(),
        )
    });
    let out = decoder
        .decode(r#"{"d": "2020-01-01T00:00:00", "n": 1}"#)
        .expect("decode");
    assert_eq!(
        out,
        Value::Array(vec![
            Value::Array(vec![
                Value::from("d"),
                Value::from(DateTime::new(datetime!(2020-01-01 0:00))),
            ]),
            Value::Array(vec![Value::from("n"), Value::Integer(1)]),
        ])
    );
}

#[test]
fn object_hook_fires_bottom_up() {
    // Tag each object with its depth of wrapping: the inner object must be
    // replaced before the outer one sees it.
    let decoder = Decoder::new().with_object_hook(|pairs| {
        let mut wrapped = vec![("hooked".to_owned(), Value::Bool(true))];
        wrapped.extend(pairs);
        Value::Object(wrapped)
    });
    let out = decoder
        .decode(r#"{"outer": {"inner": 2}}"#)
        .expect("decode");
    assert_eq!(
        out,
        obj(&[
            ("hooked", Value::Bool(true)),
            (
                "outer",
                obj(&[("hooked", Value::Bool(true)), ("inner", Value::Integer(2))])
            ),
        ])
    );
}

#[test]
fn stream_entry_points_match_text_entry_points() {
    let record = officer_record();
    let mut buf = Vec::new();
    to_writer_control(&mut buf, &record).expect("encode");
    assert_eq!(
        String::from_utf8(buf.clone()).expect("utf8"),
        to_string_control(&record).expect("encode")
    );
    // Reader path goes through the non-control decoder; the marked dates are
    // still converted (marker precedence), so the graph round-trips.
    let decoded = from_reader(buf.as_slice()).expect("decode");
    assert_eq!(decoded, record);
}

#[test]
fn formatting_options_pass_through_to_the_engine() {
    let record = obj(&[("b", Value::Integer(1)), ("a", Value::Integer(2))]);
    let sorted = Encoder::with_options(EncodeOptions {
        sort_keys: true,
        ..EncodeOptions::default()
    });
    assert_eq!(sorted.encode(&record).expect("encode"), r#"{"a":2,"b":1}"#);

    let pretty = Encoder::with_options(EncodeOptions {
        indent: Some(2),
        ..EncodeOptions::default()
    });
    assert_eq!(
        pretty.encode(&obj(&[("a", Value::Integer(1))])).expect("encode"),
        "{\n  \"a\": 1\n}"
    );
}
