//! Referential integrity between products and orders under concurrency.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::{Arc, Barrier};
use std::thread;

use chrono::Utc;

use mysite_core::error::{Result, SiteError};
use mysite_core::model::{Order, OrderItem, OrderStatus, Product};
use mysite_core::subject::SubjectId;
use mysite_web::store::{Store, Table};

fn product(id: u64) -> Product {
    let now = Utc::now();
    Product {
        id,
        name: format!("p{id}"),
        description: String::new(),
        price: "1.00".parse().unwrap(),
        quantity: 1,
        archived: false,
        created_by: SubjectId::new("owner"),
        created_at: now,
        updated_at: now,
    }
}

/// Same lookup `create_order` performs: the product must still exist.
fn order_for(products: &Table<Product>, product_id: u64) -> Result<Order> {
    let p = products
        .get(product_id)
        .ok_or_else(|| SiteError::BadRequest(format!("unknown product: {product_id}")))?;
    let now = Utc::now();
    Ok(Order {
        id: 0,
        user: SubjectId::new("buyer"),
        status: OrderStatus::Pending,
        delivery_address: "Main st. 1".into(),
        promocode: None,
        items: vec![OrderItem { product_id: p.id, quantity: 1, price: p.price }],
        created_at: now,
        updated_at: now,
    })
}

#[test]
fn referenced_product_cannot_be_deleted() {
    let store = Store::new();
    let p = store.products.insert_with(product);
    store.place_order(|products| order_for(products, p.id)).unwrap();

    let err = store.delete_product(p.id).unwrap_err();
    assert!(matches!(err, SiteError::Conflict(_)));
    assert!(store.products.get(p.id).is_some());
}

#[test]
fn unreferenced_product_is_deleted_once() {
    let store = Store::new();
    let p = store.products.insert_with(product);

    assert_eq!(store.delete_product(p.id).unwrap().id, p.id);
    assert!(matches!(store.delete_product(p.id), Err(SiteError::NotFound(_))));
    assert!(matches!(
        store.place_order(|products| order_for(products, p.id)),
        Err(SiteError::BadRequest(_))
    ));
}

#[test]
fn order_and_delete_race_never_orphans_an_order() {
    for _ in 0..200 {
        let store = Arc::new(Store::new());
        let p = store.products.insert_with(product);
        let barrier = Arc::new(Barrier::new(2));

        let buyer = {
            let (store, barrier) = (Arc::clone(&store), Arc::clone(&barrier));
            thread::spawn(move || {
                barrier.wait();
                store.place_order(|products| order_for(products, p.id)).is_ok()
            })
        };
        let remover = {
            let (store, barrier) = (Arc::clone(&store), Arc::clone(&barrier));
            thread::spawn(move || {
                barrier.wait();
                store.delete_product(p.id).is_ok()
            })
        };

        let ordered = buyer.join().unwrap();
        let deleted = remover.join().unwrap();

        // exactly one side wins
        assert!(ordered ^ deleted, "ordered={ordered} deleted={deleted}");
        assert_eq!(store.product_in_orders(p.id), ordered);
        assert_eq!(store.products.get(p.id).is_some(), ordered);
    }
}
