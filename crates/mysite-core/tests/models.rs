//! Domain model validation.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use chrono::Utc;

use mysite_core::model::{
    AuthorRef, NewArticle, NewOrder, NewProduct, Order, OrderItem, OrderPatch, OrderStatus, Price, ProfilePatch,
};
use mysite_core::subject::{NamedSubject, Subject, SubjectId};

#[test]
fn price_parsing() {
    assert_eq!("123.45".parse::<Price>().unwrap().cents(), 12345);
    assert_eq!("10".parse::<Price>().unwrap().cents(), 1000);
    assert_eq!("0.5".parse::<Price>().unwrap().cents(), 50);
    assert_eq!("99999999.99".parse::<Price>().unwrap().to_string(), "99999999.99");

    for bad in ["", "-1", "1.234", "abc", ".5", "1e3", "100000000.00"] {
        assert!(bad.parse::<Price>().is_err(), "{bad:?} should be rejected");
    }
}

#[test]
fn price_serializes_as_string() {
    let p: Price = serde_json::from_str("\"12.30\"").unwrap();
    assert_eq!(serde_json::to_string(&p).unwrap(), "\"12.30\"");
    assert!(serde_json::from_str::<Price>("12.3").is_err());
}

#[test]
fn new_product_rejects_owner_field() {
    let body = r#"{"name":"Table","price":"10.00","created_by":"u2"}"#;
    assert!(serde_json::from_str::<NewProduct>(body).is_err());

    let ok: NewProduct = serde_json::from_str(r#"{"name":"Table","price":"10.00"}"#).unwrap();
    ok.validate().unwrap();
    let product = ok.into_product(7, SubjectId::new("u1"), Utc::now());
    assert_eq!(product.created_by.as_str(), "u1");
    assert!(!product.archived);
}

#[test]
fn new_product_name_limits() {
    let blank: NewProduct = serde_json::from_str(r#"{"name":"  ","price":"1"}"#).unwrap();
    assert!(blank.validate().is_err());

    let long = format!(r#"{{"name":"{}","price":"1"}}"#, "x".repeat(201));
    let long: NewProduct = serde_json::from_str(&long).unwrap();
    assert!(long.validate().is_err());
}

#[test]
fn order_total_and_validation() {
    let now = Utc::now();
    let order = Order {
        id: 1,
        user: SubjectId::new("u1"),
        status: OrderStatus::default(),
        delivery_address: "Main st. 1".into(),
        promocode: None,
        items: vec![
            OrderItem { product_id: 1, quantity: 2, price: "10.50".parse().unwrap() },
            OrderItem { product_id: 2, quantity: 1, price: "0.99".parse().unwrap() },
        ],
        created_at: now,
        updated_at: now,
    };
    assert_eq!(order.total_price().unwrap().to_string(), "21.99");
    assert_eq!(order.status, OrderStatus::Pending);
    assert!(order.contains_product(2));

    let ok: NewOrder =
        serde_json::from_str(r#"{"delivery_address":"Main st. 1","items":[{"product_id":1,"quantity":1}]}"#).unwrap();
    assert!(ok.validate().is_ok());
    let empty: NewOrder = serde_json::from_str(r#"{"delivery_address":"Main st. 1","items":[]}"#).unwrap();
    assert!(empty.validate().is_err());
    let zero: NewOrder =
        serde_json::from_str(r#"{"delivery_address":"Main st. 1","items":[{"product_id":1,"quantity":0}]}"#).unwrap();
    assert!(zero.validate().is_err());
    assert!(serde_json::from_str::<NewOrder>(r#"{"items":[],"user":"u2"}"#).is_err());
}

#[test]
fn order_address_required_on_create_and_edit() {
    let missing: NewOrder = serde_json::from_str(r#"{"items":[{"product_id":1,"quantity":1}]}"#).unwrap();
    let err = missing.validate().unwrap_err();
    assert!(err.to_string().contains("delivery_address"));

    let blank: NewOrder =
        serde_json::from_str(r#"{"delivery_address":"   ","items":[{"product_id":1,"quantity":1}]}"#).unwrap();
    assert!(blank.validate().is_err());

    let patch: OrderPatch = serde_json::from_str(r#"{"delivery_address":""}"#).unwrap();
    assert!(patch.validate().is_err());
    let patch: OrderPatch = serde_json::from_str(r#"{"status":"shipped"}"#).unwrap();
    assert!(patch.validate().is_ok());
}

#[test]
fn author_resolved_through_named_subject() {
    let s = Subject::new(SubjectId::new("u9"), "alice");
    let author = AuthorRef::of(&s);
    assert_eq!(author.display_name(), "alice");
    assert_eq!(author.subject_id(), &SubjectId::new("u9"));

    let draft: NewArticle = serde_json::from_str(
        r#"{"title":"Hello","content":"Body","category":"news","tags":["rust"]}"#,
    )
    .unwrap();
    draft.validate().unwrap();
    let bad_tag: NewArticle = serde_json::from_str(
        r#"{"title":"Hello","content":"Body","category":"news","tags":["this-tag-is-far-too-long"]}"#,
    )
    .unwrap();
    assert!(bad_tag.validate().is_err());
}

#[test]
fn profile_bio_limit() {
    let ok = ProfilePatch { bio: Some("x".repeat(500)), avatar: None };
    assert!(ok.validate().is_ok());
    let long = ProfilePatch { bio: Some("x".repeat(501)), avatar: None };
    assert!(long.validate().is_err());
}
