//! Integration tests for permission queries and gates.

use storefront_auth::{AuthoritySource, Decision, MatchMode, PermissionGate};
use storefront_entity::Session;

use crate::helpers::{self, TestApp};

#[test]
fn test_anonymous_is_denied_everything() {
    let evaluator = helpers::anonymous();
    let names = ["ADMIN", "SELLER", "BUYER", "ROLE_ADMIN", "admin"];

    for name in names {
        assert!(!evaluator.has_permission(name));
        assert!(!evaluator.has_any_permission(&[name]));
        assert!(!evaluator.has_all_permissions(&[name]));
    }
    assert!(!evaluator.has_any_permission(&names));
    assert!(!evaluator.has_all_permissions(&names));
    assert!(evaluator.user_permissions().is_empty());
}

#[test]
fn test_aliases_match_across_case_and_prefix() {
    let session =
        Session::authenticated(helpers::user_with("mina", &["ADMIN", "SELLER"]));

    assert!(session.has_any_authority(&["seller"]));
    assert!(session.has_authority("ROLE_ADMIN"));
    assert!(!session.has_all_authorities(&["ADMIN", "BUYER"]));
}

#[test]
fn test_empty_requirement_lists() {
    let none: [&str; 0] = [];
    let evaluator = helpers::signed_in(&["BUYER"]);

    assert!(!evaluator.has_any_permission(&none));
    assert!(evaluator.has_all_permissions(&none));
    assert!(!helpers::anonymous().has_all_permissions(&none));
}

#[test]
fn test_all_mode_gate_shows_fallback_when_signed_out() {
    let gate = PermissionGate::all(["ADMIN"]);
    let evaluator = helpers::anonymous();

    let shown = gate.render(&evaluator, || "admin dashboard", || Some("please sign in"));
    assert_eq!(shown, Some("please sign in"));
}

#[test]
fn test_gate_modes_for_mixed_roles() {
    let evaluator = helpers::signed_in(&["ROLE_ADMIN", "seller"]);

    let any = PermissionGate::new(["BUYER", "SELLER"]);
    assert_eq!(any.evaluate(&evaluator), Decision::Allow);

    let all = any.clone().with_mode(MatchMode::All);
    assert_eq!(all.evaluate(&evaluator), Decision::Deny);
    assert_eq!(all.select(&evaluator, "tools", None), None);
}

#[tokio::test]
async fn test_evaluator_follows_store_changes() {
    let app = TestApp::new().await;
    let evaluator = app.store.evaluator();
    let gate = PermissionGate::new(["SELLER"]);

    assert_eq!(gate.evaluate(&evaluator), Decision::Deny);

    app.store
        .login(helpers::user_with("sam", &["ROLE_SELLER"]))
        .await
        .unwrap();
    assert_eq!(gate.evaluate(&evaluator), Decision::Allow);
    assert_eq!(evaluator.user_permissions(), vec!["ROLE_SELLER".to_string()]);

    app.store.logout().await.unwrap();
    assert_eq!(gate.evaluate(&evaluator), Decision::Deny);
}

#[tokio::test]
async fn test_subscriber_evaluator_sees_latest_session() {
    let app = TestApp::new().await;
    let evaluator = storefront_auth::PermissionEvaluator::new(app.store.subscribe());

    app.store
        .login(helpers::user_with("mina", &["ADMIN"]))
        .await
        .unwrap();
    assert!(evaluator.has_permission("admin"));
}
