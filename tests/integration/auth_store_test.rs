//! Integration tests for the persisted auth store.

use storefront_core::error::{AppError, ErrorKind};
use storefront_entity::Session;

use crate::helpers::{self, TestApp};

#[tokio::test]
async fn test_login_survives_restart() {
    let app = TestApp::new().await;
    let user = helpers::user_with("mina", &["ADMIN", "SELLER"])
        .with_name("Mina Park")
        .with_phone("+82 10 0000 0000");

    app.store.login(user.clone()).await.unwrap();

    let restored = app.reopen().await;
    assert_eq!(restored.session(), Session::authenticated(user));
}

#[tokio::test]
async fn test_logout_survives_restart() {
    let app = TestApp::new().await;
    app.store
        .login(helpers::user_with("mina", &["ADMIN"]))
        .await
        .unwrap();
    app.store.logout().await.unwrap();

    assert!(!app.storage.exists(helpers::USER_KEY).await.unwrap());
    assert_eq!(app.reopen().await.session(), Session::anonymous());
}

#[tokio::test]
async fn test_logout_when_signed_out_is_harmless() {
    let app = TestApp::new().await;
    app.store.logout().await.unwrap();
    assert!(!app.store.is_authenticated());
}

#[tokio::test]
async fn test_malformed_entry_starts_signed_out() {
    let app = TestApp::new().await;
    app.write_raw_user("this is not json").await;

    let store = app.reopen().await;
    assert!(!store.is_authenticated());
    assert!(store.current_user().is_none());
}

#[tokio::test]
async fn test_entry_with_invalid_user_starts_signed_out() {
    let app = TestApp::new().await;
    app.write_raw_user(
        r#"{"id":"7b1f3c52-3f1e-4a8a-9a51-0c1d2e3f4a5b","username":"","email":"nobody"}"#,
    )
    .await;

    assert_eq!(app.reopen().await.session(), Session::anonymous());
}

#[tokio::test]
async fn test_registration_commits_after_confirmation() {
    let app = TestApp::new().await;
    let user = helpers::user_with("newbie", &["BUYER"]);

    app.store
        .register(user.clone(), async { Ok(()) })
        .await
        .unwrap();

    assert_eq!(app.store.current_user(), Some(user.clone()));
    assert_eq!(app.reopen().await.current_user(), Some(user));
}

#[tokio::test]
async fn test_rejected_registration_leaves_session_alone() {
    let app = TestApp::new().await;

    let err = app
        .store
        .register(helpers::user_with("newbie", &["BUYER"]), async {
            Err(AppError::registration("Registration cancelled"))
        })
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Registration);
    assert!(!app.store.is_authenticated());
    assert!(!app.storage.exists(helpers::USER_KEY).await.unwrap());
}

#[tokio::test]
async fn test_session_flag_tracks_user_presence() {
    let app = TestApp::new().await;
    let check = |session: Session| assert_eq!(session.is_authenticated(), session.user().is_some());

    check(app.store.session());
    app.store
        .login(helpers::user_with("mina", &["SELLER"]))
        .await
        .unwrap();
    check(app.store.session());
    let _ = app
        .store
        .register(helpers::user_with("other", &[]), async {
            Err(AppError::internal("backend unavailable"))
        })
        .await;
    check(app.store.session());
    app.store.logout().await.unwrap();
    check(app.store.session());
}

#[tokio::test]
async fn test_role_groups_share_storage_with_session() {
    let app = TestApp::new().await;
    let groups = app.role_groups().await;
    let sellers = groups.add("Sellers").await.unwrap();

    app.store
        .login(helpers::user_with("mina", &["ADMIN"]))
        .await
        .unwrap();
    app.store.logout().await.unwrap();

    assert_eq!(app.role_groups().await.get(sellers.id).await, Some(sellers));
}
