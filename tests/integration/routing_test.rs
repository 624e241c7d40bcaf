//! Integration tests for guarded navigation.

use storefront_auth::{RouteGuard, RouteOutcome, RouteTable};
use storefront_core::config::{AppConfig, RouteFallback};
use storefront_core::error::ErrorKind;

use crate::helpers::{self, TestApp};

const ROUTES: &str = r#"
[[routes]]
path = "/"

[[routes]]
path = "/account"
required_roles = ["BUYER", "SELLER", "ADMIN"]
fallback = { type = "redirect", to = "/login" }

[[routes]]
path = "/seller"
required_roles = ["SELLER"]
fallback = { type = "forbidden" }

[[routes]]
path = "/admin"
required_roles = ["ADMIN"]
"#;

fn load_table() -> RouteTable {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storefront.toml");
    std::fs::write(&path, ROUTES).unwrap();

    let config = AppConfig::load(path.to_str().unwrap()).unwrap();
    RouteTable::from_config(&config.routes).unwrap()
}

#[test]
fn test_anonymous_navigation() {
    let table = load_table();
    let anonymous = helpers::anonymous();

    assert_eq!(table.navigate("/products/7", &anonymous), RouteOutcome::Render);
    assert_eq!(
        table.navigate("/account/orders", &anonymous),
        RouteOutcome::Fallback(RouteFallback::Redirect {
            to: "/login".to_string()
        })
    );
    assert_eq!(
        table.navigate("/admin", &anonymous),
        RouteOutcome::Fallback(RouteFallback::Nothing)
    );
}

#[test]
fn test_seller_navigation() {
    let table = load_table();
    let seller = helpers::signed_in(&["role_seller"]);

    assert_eq!(table.navigate("/seller/listings", &seller), RouteOutcome::Render);
    assert_eq!(table.navigate("/account", &seller), RouteOutcome::Render);
    assert_eq!(
        table.navigate("/admin/users", &seller),
        RouteOutcome::Fallback(RouteFallback::Nothing)
    );
}

#[test]
fn test_spelling_variants_stay_guarded() {
    let table = load_table();
    let anonymous = helpers::anonymous();

    for path in [
        "/seller",
        "/Seller",
        "/seller?tab=orders",
        "/seller#top",
        "//seller",
    ] {
        assert_eq!(
            table.navigate(path, &anonymous),
            RouteOutcome::Fallback(RouteFallback::Forbidden),
            "{path}"
        );
    }
}

#[test]
fn test_guard_without_roles_denies() {
    let guard = RouteGuard::new(Vec::<String>::new());
    let admin = helpers::signed_in(&["ADMIN"]);
    assert_eq!(
        guard.resolve(&admin),
        RouteOutcome::Fallback(RouteFallback::Nothing)
    );
}

#[test]
fn test_duplicate_routes_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storefront.toml");
    std::fs::write(
        &path,
        "[[routes]]\npath = \"/admin\"\n\n[[routes]]\npath = \"/admin/\"\n",
    )
    .unwrap();

    let config = AppConfig::load(path.to_str().unwrap()).unwrap();
    let err = RouteTable::from_config(&config.routes).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Configuration);
}

#[tokio::test]
async fn test_navigation_follows_sign_in() {
    let app = TestApp::new().await;
    let table = load_table();

    assert_eq!(
        table.navigate("/seller", &app.store.evaluator()),
        RouteOutcome::Fallback(RouteFallback::Forbidden)
    );

    app.store
        .login(helpers::user_with("sam", &["SELLER"]))
        .await
        .unwrap();
    assert_eq!(
        table.navigate("/seller", &app.store.evaluator()),
        RouteOutcome::Render
    );
}
