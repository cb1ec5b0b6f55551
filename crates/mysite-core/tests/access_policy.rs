//! Ownership/permission policy tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use mysite_core::access::{can_create, can_mutate, AccessDecision, Owned, Permission, PermissionCatalog};
use mysite_core::error::ClientCode;
use mysite_core::subject::{Subject, SubjectId};

struct Thing {
    owner: SubjectId,
}

impl Owned for Thing {
    fn owner(&self) -> &SubjectId {
        &self.owner
    }
}

fn owned_by(id: &str) -> Thing {
    Thing { owner: SubjectId::new(id) }
}

fn catalog() -> PermissionCatalog {
    PermissionCatalog::compile(&[
        "can_create_product".to_string(),
        "can_edit_product".to_string(),
        "can_delete_product".to_string(),
    ])
    .unwrap()
}

fn perm(name: &str) -> Permission {
    catalog().resolve(name).unwrap()
}

fn user(id: &str) -> Subject {
    Subject::new(SubjectId::new(id), id)
}

#[test]
fn owner_with_grant_may_edit() {
    let u1 = user("u1").with_permissions(["can_edit_product"]);
    let edit = perm("can_edit_product");

    assert_eq!(can_mutate(&u1, &owned_by("u1"), &edit), AccessDecision::Permit);
    assert_eq!(can_mutate(&u1, &owned_by("u2"), &edit), AccessDecision::Deny);
}

#[test]
fn owner_without_grant_is_denied() {
    let u1 = user("u1").with_permissions(["can_edit_product"]);
    let delete = perm("can_delete_product");
    assert_eq!(can_mutate(&u1, &owned_by("u1"), &delete), AccessDecision::Deny);

    let bare = user("u1");
    assert_eq!(
        can_mutate(&bare, &owned_by("u1"), &perm("can_edit_product")),
        AccessDecision::Deny
    );
}

#[test]
fn grant_without_ownership_is_denied() {
    let u1 = user("u1").with_permissions(["can_edit_product", "can_delete_product"]);
    for name in ["can_edit_product", "can_delete_product"] {
        assert!(!can_mutate(&u1, &owned_by("someone-else"), &perm(name)).is_permit());
    }
}

#[test]
fn staff_flag_alone_grants_nothing() {
    let staff = user("s").staff();
    assert_eq!(
        can_mutate(&staff, &owned_by("u1"), &perm("can_edit_product")),
        AccessDecision::Deny
    );
}

#[test]
fn superuser_may_mutate_anything() {
    let root = user("root").superuser();
    for name in catalog().names() {
        let p = perm(name);
        assert!(can_mutate(&root, &owned_by("root"), &p).is_permit());
        assert!(can_mutate(&root, &owned_by("u2"), &p).is_permit());
    }
}

#[test]
fn create_requires_authentication_and_grant() {
    let create = perm("can_create_product");
    assert_eq!(can_create(None, Some(&create)), AccessDecision::Deny);
    assert_eq!(can_create(None, None), AccessDecision::Deny);

    let plain = user("u1");
    assert_eq!(can_create(Some(&plain), Some(&create)), AccessDecision::Deny);
    assert_eq!(can_create(Some(&plain), None), AccessDecision::Permit);

    let granted = user("u1").with_permissions(["can_create_product"]);
    assert_eq!(can_create(Some(&granted), Some(&create)), AccessDecision::Permit);

    let root = user("root").superuser();
    assert_eq!(can_create(Some(&root), Some(&create)), AccessDecision::Permit);
}

#[test]
fn deny_maps_to_forbidden() {
    let err = AccessDecision::Deny.or_forbidden("edit product").unwrap_err();
    assert_eq!(err.client_code(), ClientCode::Forbidden);
    assert!(AccessDecision::Permit.or_forbidden("edit product").is_ok());
}
