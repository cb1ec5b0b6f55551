#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use mysite_core::access::PermissionCatalog;
use mysite_core::error::SiteError;

fn names(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| s.to_string()).collect()
}

#[test]
fn resolves_known_names() {
    let cat = PermissionCatalog::compile(&names(&["can_edit_product", "shop.can_view"])).unwrap();
    assert_eq!(cat.len(), 2);
    assert_eq!(cat.resolve("shop.can_view").unwrap().as_str(), "shop.can_view");
    assert!(cat.contains("can_edit_product"));
}

#[test]
fn unknown_name_is_config_error() {
    let cat = PermissionCatalog::compile(&names(&["can_edit_product"])).unwrap();
    let err = cat.resolve("can_edit_prodcut").unwrap_err();
    assert!(matches!(err, SiteError::Config(_)), "got {err:?}");
}

#[test]
fn rejects_duplicates_and_malformed() {
    assert!(PermissionCatalog::compile(&names(&["a", "a"])).is_err());
    assert!(PermissionCatalog::compile(&names(&[""])).is_err());
    assert!(PermissionCatalog::compile(&names(&["Can Edit"])).is_err());
}
