//! End-to-end pipeline tests: handler value in, wire-shaped envelope out.

use chrono::{DateTime, TimeZone, Utc};
use http::{Method, StatusCode};
use http_body_util::BodyExt;
use proptest::prelude::*;
use replykit_core::{process, sanitize, IntoResponse, Payload, Reply, Shared};
use rust_decimal::Decimal;
use serde_json::{json, Value};

async fn body_json(response: replykit_core::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

#[test]
fn bare_domain_record_gets_wrapped() {
    init_tracing();
    let ts = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    let order = Payload::record([
        ("id", Payload::Int(981)),
        ("total", Decimal::new(104950, 2).into()),
        ("placedAt", ts.into()),
    ]);

    let (envelope, status) = process(&order, &Method::GET);

    assert_eq!(status, StatusCode::OK);
    assert_eq!(envelope.message, "Success");
    assert_eq!(
        envelope.data,
        json!({
            "id": 981,
            "total": "1049.50",
            "placedAt": "2024-06-01T12:00:00.000Z",
        })
    );
}

#[test]
fn reply_descriptor_controls_message_and_status() {
    let reply = Reply::response("User created", Payload::record([("id", Payload::Int(1))]));
    let (envelope, status) = process(&reply.into(), &Method::POST);

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(envelope.message, "User created");
    assert_eq!(envelope.status_code, 201);
    assert_eq!(envelope.data, json!({ "id": 1 }));
}

#[test]
fn paginated_reply_travels_the_whole_pipeline() {
    init_tracing();
    let items = (1..=3).map(|n| Payload::record([("id", Payload::Int(n))]));
    let reply = Reply::pagination(items.collect(), 42, 3, 10).with_message("Orders listed");

    let (envelope, status) = process(&reply.into(), &Method::GET);

    assert_eq!(status, StatusCode::OK);
    assert_eq!(envelope.message, "Orders listed");
    assert_eq!(envelope.data["totalCount"], json!(42));
    assert_eq!(envelope.data["totalPage"], json!(5));
    assert_eq!(envelope.data["currentPage"], json!(3));
    assert_eq!(envelope.data["pageSize"], json!(10));
    assert_eq!(envelope.data["hasNextPage"], json!(true));
    assert_eq!(envelope.data["hasPreviousPage"], json!(true));
    assert_eq!(
        envelope.data["items"],
        json!([{ "id": 1 }, { "id": 2 }, { "id": 3 }])
    );
}

#[test]
fn cyclic_handler_value_still_produces_an_envelope() {
    let node = Shared::new(vec![("name".to_string(), Payload::from("root"))]);
    node.insert("parent", Payload::Record(node.clone()));

    let (envelope, status) = process(&Payload::Record(node), &Method::GET);

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        envelope.data,
        json!({ "name": "root", "parent": "[Circular]" })
    );
}

#[test]
fn envelope_date_is_stamped_at_format_time() {
    let handler_date = Utc.with_ymd_and_hms(1999, 1, 1, 0, 0, 0).unwrap();
    let value = Payload::record([("when", handler_date.into())]);

    let before = Utc::now();
    let (envelope, _) = process(&value, &Method::GET);
    let after = Utc::now();

    let stamped = DateTime::parse_from_rfc3339(&envelope.date)
        .expect("valid RFC3339")
        .with_timezone(&Utc);
    // Stamp granularity is milliseconds, so compare at that resolution.
    assert!(stamped >= before - chrono::Duration::milliseconds(1));
    assert!(stamped <= after + chrono::Duration::milliseconds(1));

    // The handler's own timestamp stays in the payload, not the stamp.
    assert_eq!(envelope.data["when"], json!("1999-01-01T00:00:00.000Z"));
}

#[test]
fn precision_survives_from_handler_to_wire() {
    let value = Payload::record([
        ("fileSize", Payload::Int(9_007_199_254_740_993)),
        ("precise", Payload::Big(99_999_999_999_999_999_999_999i128)),
    ]);
    let sanitized = sanitize(&value);

    assert_eq!(sanitized["fileSize"], json!("9007199254740993"));
    assert_eq!(sanitized["precise"], json!("99999999999999999999999"));
}

#[tokio::test]
async fn wire_body_has_exactly_the_canonical_fields() {
    let (envelope, status) = process(&Payload::from("pong"), &Method::GET);
    let response = (status, envelope).into_response();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;

    let map = body.as_object().expect("object body");
    let mut keys: Vec<_> = map.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, ["data", "date", "message", "statusCode"]);
    assert_eq!(body["data"], json!("pong"));
}

#[tokio::test]
async fn explicit_status_reaches_the_wire() {
    let reply = Reply::response("Accepted", Payload::Null).with_status(202);
    let (envelope, status) = process(&reply.into(), &Method::POST);
    let response = (status, envelope).into_response();

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let body = body_json(response).await;
    assert_eq!(body["statusCode"], json!(202));
}

fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        "[a-zA-Z0-9]{0,8}".prop_map(Value::from),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-z]{0,6}", inner, 0..4)
                .prop_map(|map| Value::Object(map.into_iter().collect())),
        ]
    })
}

// Property: classification is total - every JSON value formats to a
// well-formed envelope whose body mirrors the chosen status.
proptest! {
    #[test]
    fn prop_every_json_value_formats(value in arb_json(), is_create in any::<bool>()) {
        let (envelope, status) = replykit_core::format(value, is_create);

        prop_assert!(DateTime::parse_from_rfc3339(&envelope.date).is_ok());

        let body = serde_json::to_value(&envelope).expect("encode");
        let map = body.as_object().expect("object body");
        prop_assert!(map.contains_key("message"));
        prop_assert!(map.contains_key("data"));
        prop_assert!(map.contains_key("statusCode"));
        prop_assert!(map.contains_key("date"));
        prop_assert_eq!(body["statusCode"].as_u64(), Some(u64::from(envelope.status_code)));
        prop_assert!(status.as_u16() >= 100);
    }
}
