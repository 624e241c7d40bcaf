//! Shared test helpers for integration tests.

use std::sync::Arc;

use tempfile::TempDir;

use storefront_auth::{AuthStore, PermissionEvaluator, RoleGroupStore};
use storefront_core::config::{AppConfig, SessionConfig, StorageBackend};
use storefront_core::traits::SessionStorage;
use storefront_entity::{Session, User};
use storefront_storage::LocalSessionStorage;

/// Key the auth store persists the user under.
pub const USER_KEY: &str = "user";

/// Key the role groups are persisted under.
pub const ROLE_GROUPS_KEY: &str = "role_groups";

/// Test application context backed by a throwaway session directory.
pub struct TestApp {
    /// Keeps the session directory alive for the test's duration
    _dir: TempDir,
    /// Application config pointing at the session directory
    pub config: AppConfig,
    /// Session storage shared with the stores
    pub storage: Arc<dyn SessionStorage>,
    /// Auth store under test
    pub store: AuthStore,
}

impl TestApp {
    /// Create a new test application with no persisted session
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let directory = dir.path().to_string_lossy().into_owned();

        let config = AppConfig {
            session: SessionConfig {
                backend: StorageBackend::Local,
                directory,
                ..SessionConfig::default()
            },
            ..AppConfig::default()
        };

        let storage = storefront_storage::build_session_storage(&config.session)
            .await
            .expect("Failed to init storage");
        let store = AuthStore::from_config(storage.clone(), &config.session).await;

        Self {
            _dir: dir,
            config,
            storage,
            store,
        }
    }

    /// Simulate a restart: a fresh store over a fresh handle to the same directory
    pub async fn reopen(&self) -> AuthStore {
        let storage = LocalSessionStorage::new(&self.config.session.directory)
            .await
            .expect("Failed to reopen storage");
        AuthStore::from_config(Arc::new(storage), &self.config.session).await
    }

    /// Role group store over the same storage
    pub async fn role_groups(&self) -> RoleGroupStore {
        RoleGroupStore::load(self.storage.clone(), ROLE_GROUPS_KEY).await
    }

    /// Write a raw value under the user key, bypassing the store
    pub async fn write_raw_user(&self, raw: &str) {
        self.storage
            .set(USER_KEY, raw)
            .await
            .expect("Failed to write raw entry");
    }
}

/// A valid user holding the given authorities
pub fn user_with(username: &str, authorities: &[&str]) -> User {
    User::new(username, format!("{username}@example.com"))
        .with_authorities(authorities.iter().copied())
}

/// Evaluator over a fixed authenticated session
pub fn signed_in(authorities: &[&str]) -> PermissionEvaluator<Session> {
    PermissionEvaluator::new(Session::authenticated(user_with("tester", authorities)))
}

/// Evaluator over the anonymous session
pub fn anonymous() -> PermissionEvaluator<Session> {
    PermissionEvaluator::new(Session::anonymous())
}
