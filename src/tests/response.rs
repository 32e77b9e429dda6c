use crate::{Error, Response, Value};
use chrono::NaiveDate;

#[test]
fn typed_accessors_return_matching_values() {
    assert_eq!(41, Response::success(41).as_int().unwrap());
    assert!(Response::success(true).as_bool().unwrap());
    assert_eq!(0.5, Response::success(0.5).as_double().unwrap());
    let stamp = NaiveDate::from_ymd_opt(1998, 7, 17)
        .unwrap()
        .and_hms_opt(14, 8, 55)
        .unwrap();
    assert_eq!(stamp, Response::success(stamp).as_datetime().unwrap());

    let response = Response::success(vec![1u8, 2, 3]);
    assert_eq!(&[1, 2, 3][..], response.as_bytes().unwrap());

    let response = Response::success(vec![Value::Int(7), Value::Int(11)]);
    assert_eq!(
        &[Value::Int(7), Value::Int(11)][..],
        response.as_array().unwrap()
    );

    let response = Response::success(vec![("k", "v")].into_iter().collect::<Value>());
    assert_eq!(
        &[("k".to_owned(), Value::String("v".to_owned()))][..],
        response.as_struct().unwrap()
    );
}

#[test]
fn predicates_track_value_kind() {
    let response = Response::success(41);
    assert!(response.is_int());
    assert!(!response.is_bool());
    assert!(!response.is_null());

    assert!(Response::success("x").is_string());
    assert!(Response::Success {
        value: Value::Other("x".to_owned()),
    }
    .is_string());
    assert!(Response::success(vec![Value::Int(1)]).is_array());
    assert!(Response::success(Value::empty_struct()).is_struct());
    assert!(Response::fault(1, "boom").is_null());
}

#[test]
fn mismatched_accessor_fails_without_consuming() {
    let response = Response::success("not a number");
    match response.as_int() {
        Err(Error::TypeMismatch { expected, found }) => {
            assert_eq!("int", expected);
            assert_eq!("string", found);
        }
        other => panic!("expected type mismatch, got {:?}", other),
    }
    // the response is still usable with the right accessor
    assert_eq!("not a number", response.as_string().unwrap());
}

#[test]
fn accessors_on_absent_value_report_null() {
    let response = Response::fault(1, "boom");
    assert!(matches!(response.as_int(), Err(Error::NullValue)));
    assert!(matches!(response.as_string(), Err(Error::NullValue)));
    assert!(matches!(response.as_struct(), Err(Error::NullValue)));
}

#[test]
fn renders_any_kind_as_string() {
    let response = Response::success(vec![Value::Int(1), Value::String("x".to_owned())]);
    assert_eq!("[1, x]", response.as_string().unwrap());

    let response = Response::success(vec![("k", "v")].into_iter().collect::<Value>());
    assert_eq!("{k: v}", response.as_string().unwrap());

    let response = Response::success(vec![1u8, 2, 3]);
    assert_eq!("AQID", response.as_string().unwrap());
}

#[test]
fn fault_accessors() {
    let raw: Value = vec![
        ("faultCode", Value::Int(4)),
        ("faultString", Value::String("Too many parameters.".to_owned())),
    ]
    .into_iter()
    .collect();
    let response = Response::Fault {
        code: 4,
        message: "Too many parameters.".to_owned(),
        raw: Some(raw.clone()),
    };
    assert!(response.is_fault());
    assert_eq!(Some(4), response.fault_code());
    assert_eq!(Some("Too many parameters."), response.fault_message());
    // the raw fault struct stays reachable through the value accessors
    assert_eq!(Some(&raw), response.value());
    assert!(response.is_struct());

    let success = Response::success(1);
    assert!(!success.is_fault());
    assert_eq!(None, success.fault_code());
    assert_eq!(None, success.fault_message());
}
