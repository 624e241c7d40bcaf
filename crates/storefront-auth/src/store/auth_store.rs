//! Auth store: the signed-in session, persisted across restarts.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::{Mutex, watch};
use tracing::{info, warn};
use validator::Validate;

use storefront_core::config::SessionConfig;
use storefront_core::error::{AppError, ErrorKind};
use storefront_core::result::AppResult;
use storefront_core::traits::SessionStorage;
use storefront_entity::{Session, User};

use crate::permission::{PermissionEvaluator, SessionSource};

/// Holds `{is_authenticated, user}` and keeps it in sync with storage.
///
/// The store is the only writer. Readers take the current value through
/// [`SessionSource`] or a [`watch::Receiver`] from [`AuthStore::subscribe`],
/// which is notified after every committed login, registration and logout.
pub struct AuthStore {
    /// Persistence backend.
    storage: Arc<dyn SessionStorage>,
    /// Key of the persisted user entry.
    storage_key: String,
    /// Current session; `send_replace` commits a new value.
    state: watch::Sender<Session>,
    /// Serializes mutations so persist-then-commit pairs never interleave.
    write_lock: Mutex<()>,
}

impl std::fmt::Debug for AuthStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthStore")
            .field("backend", &self.storage.backend_name())
            .field("storage_key", &self.storage_key)
            .field("is_authenticated", &self.is_authenticated())
            .finish()
    }
}

impl AuthStore {
    /// Creates the store, restoring any persisted session.
    ///
    /// Never fails: a missing entry, an unreadable backend, or an entry
    /// that does not parse as a valid user all start anonymous.
    pub async fn init(storage: Arc<dyn SessionStorage>, storage_key: impl Into<String>) -> Self {
        let storage_key = storage_key.into();
        let session = restore_session(storage.as_ref(), &storage_key).await;
        let (state, _) = watch::channel(session);

        Self {
            storage,
            storage_key,
            state,
            write_lock: Mutex::new(()),
        }
    }

    /// Creates the store using the key from `config`.
    pub async fn from_config(storage: Arc<dyn SessionStorage>, config: &SessionConfig) -> Self {
        Self::init(storage, config.storage_key.clone()).await
    }

    /// Snapshot of the current session.
    pub fn session(&self) -> Session {
        self.state.borrow().clone()
    }

    /// Whether a user is signed in.
    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    /// The signed-in user, if any.
    pub fn current_user(&self) -> Option<User> {
        self.state.borrow().user().cloned()
    }

    /// Receiver notified on every committed change.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    /// Permission evaluator reading from this store.
    pub fn evaluator(&self) -> PermissionEvaluator<&Self> {
        PermissionEvaluator::new(self)
    }

    /// Signs `user` in: persists it, then publishes the authenticated session.
    ///
    /// On validation or storage failure the current session is left as is.
    pub async fn login(&self, user: User) -> AppResult<()> {
        user.validate()?;
        let _guard = self.write_lock.lock().await;
        self.commit(user).await
    }

    /// Registers `user`, committing only after `confirmation` resolves.
    ///
    /// If the confirmation fails the error is returned as
    /// [`ErrorKind::Registration`] and the current session is untouched.
    pub async fn register<F>(&self, user: User, confirmation: F) -> AppResult<()>
    where
        F: Future<Output = AppResult<()>>,
    {
        user.validate()?;

        if let Err(e) = confirmation.await {
            warn!(username = %user.username, error = %e, "Registration was not confirmed");
            return Err(if e.is(ErrorKind::Registration) {
                e
            } else {
                let message = format!("Registration was not confirmed: {}", e.message);
                AppError::with_source(ErrorKind::Registration, message, e)
            });
        }

        let _guard = self.write_lock.lock().await;
        self.commit(user).await
    }

    /// Signs out: removes the persisted entry and publishes the anonymous session.
    ///
    /// The in-memory session is cleared even if removing the entry fails;
    /// the storage error is then returned.
    pub async fn logout(&self) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;
        let removed = self.storage.remove(&self.storage_key).await;

        let previous = self.state.send_replace(Session::anonymous());
        if let Some(user) = previous.user() {
            info!(user_id = %user.id, username = %user.username, "Signed out");
        }

        if let Err(e) = &removed {
            warn!(error = %e, "Failed to remove persisted session");
        }
        removed
    }

    /// Persist `user` and publish it. Caller holds the write lock.
    async fn commit(&self, user: User) -> AppResult<()> {
        let payload = serde_json::to_string(&user)?;
        self.storage.set(&self.storage_key, &payload).await?;

        info!(user_id = %user.id, username = %user.username, "Signed in");
        self.state.send_replace(Session::authenticated(user));
        Ok(())
    }
}

impl SessionSource for AuthStore {
    fn with_session<R>(&self, f: impl FnOnce(&Session) -> R) -> R {
        f(&self.state.borrow())
    }
}

/// Read the persisted user; anything other than a valid user yields an
/// anonymous session.
async fn restore_session(storage: &dyn SessionStorage, key: &str) -> Session {
    let raw = match storage.get(key).await {
        Ok(Some(raw)) => raw,
        Ok(None) => return Session::anonymous(),
        Err(e) => {
            warn!(key, error = %e, "Failed to read persisted session; starting signed out");
            return Session::anonymous();
        }
    };

    let user = match serde_json::from_str::<User>(&raw) {
        Ok(user) => user,
        Err(e) => {
            warn!(key, error = %e, "Persisted session is malformed; starting signed out");
            return Session::anonymous();
        }
    };

    if let Err(e) = user.validate() {
        warn!(key, error = %e, "Persisted user is invalid; starting signed out");
        return Session::anonymous();
    }

    info!(user_id = %user.id, "Restored persisted session");
    Session::authenticated(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;
    use storefront_storage::MemorySessionStorage;

    const KEY: &str = "user";

    /// Memory storage whose operations can be switched to fail.
    #[derive(Debug, Default)]
    struct FailingStorage {
        inner: MemorySessionStorage,
        fail_reads: AtomicBool,
        fail_writes: AtomicBool,
        fail_removes: AtomicBool,
    }

    impl FailingStorage {
        fn check(flag: &AtomicBool, op: &str) -> AppResult<()> {
            if flag.load(Ordering::SeqCst) {
                return Err(AppError::storage(format!("{op} failed: disk unavailable")));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl SessionStorage for FailingStorage {
        fn backend_name(&self) -> &str {
            "failing"
        }

        async fn get(&self, key: &str) -> AppResult<Option<String>> {
            Self::check(&self.fail_reads, "read")?;
            self.inner.get(key).await
        }

        async fn set(&self, key: &str, value: &str) -> AppResult<()> {
            Self::check(&self.fail_writes, "write")?;
            self.inner.set(key, value).await
        }

        async fn remove(&self, key: &str) -> AppResult<()> {
            Self::check(&self.fail_removes, "remove")?;
            self.inner.remove(key).await
        }

        async fn health_check(&self) -> AppResult<bool> {
            Ok(true)
        }
    }

    fn mina() -> User {
        User::new("mina", "mina@example.com").with_authorities(["ADMIN", "SELLER"])
    }

    async fn make_store() -> (MemorySessionStorage, AuthStore) {
        let storage = MemorySessionStorage::new();
        let store = AuthStore::init(Arc::new(storage.clone()), KEY).await;
        (storage, store)
    }

    #[tokio::test]
    async fn test_starts_anonymous_without_entry() {
        let (_storage, store) = make_store().await;
        assert_eq!(store.session(), Session::anonymous());
    }

    #[tokio::test]
    async fn test_login_persists_and_restores() {
        let (storage, store) = make_store().await;
        let user = mina();
        store.login(user.clone()).await.unwrap();

        assert!(store.is_authenticated());
        assert_eq!(store.current_user(), Some(user.clone()));

        let restored = AuthStore::init(Arc::new(storage), KEY).await;
        assert_eq!(restored.session(), Session::authenticated(user));
    }

    #[tokio::test]
    async fn test_logout_clears_entry() {
        let (storage, store) = make_store().await;
        store.login(mina()).await.unwrap();
        store.logout().await.unwrap();

        assert_eq!(store.session(), Session::anonymous());
        assert!(!storage.exists(KEY).await.unwrap());

        let restored = AuthStore::init(Arc::new(storage), KEY).await;
        assert_eq!(restored.session(), Session::anonymous());
    }

    #[tokio::test]
    async fn test_malformed_entry_starts_anonymous() {
        let storage = MemorySessionStorage::new();
        storage.set(KEY, "definitely not json").await.unwrap();

        let store = AuthStore::init(Arc::new(storage), KEY).await;
        assert!(!store.is_authenticated());
        assert!(store.current_user().is_none());
    }

    #[tokio::test]
    async fn test_invalid_user_rejected_without_state_change() {
        let (storage, store) = make_store().await;
        let err = store
            .login(User::new("mina", "not-an-email"))
            .await
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(!store.is_authenticated());
        assert!(storage.is_empty());
    }

    #[tokio::test]
    async fn test_register_waits_for_confirmation() {
        let (_storage, store) = make_store().await;
        store.register(mina(), async { Ok(()) }).await.unwrap();
        assert!(store.is_authenticated());
    }

    #[tokio::test]
    async fn test_failed_registration_keeps_prior_state() {
        let (storage, store) = make_store().await;
        let first = mina();
        store.login(first.clone()).await.unwrap();

        let err = store
            .register(User::new("newbie", "newbie@example.com"), async {
                Err(AppError::conflict("email already registered"))
            })
            .await
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::Registration);
        assert_eq!(store.current_user(), Some(first.clone()));

        let persisted: User =
            serde_json::from_str(&storage.get(KEY).await.unwrap().unwrap()).unwrap();
        assert_eq!(persisted, first);
    }

    #[tokio::test]
    async fn test_subscribers_see_changes() {
        let (_storage, store) = make_store().await;
        let mut rx = store.subscribe();

        store.login(mina()).await.unwrap();
        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().is_authenticated());

        store.logout().await.unwrap();
        rx.changed().await.unwrap();
        assert!(!rx.borrow_and_update().is_authenticated());
    }

    #[tokio::test]
    async fn test_evaluator_tracks_store() {
        let (_storage, store) = make_store().await;
        let evaluator = store.evaluator();
        assert!(!evaluator.has_permission("ADMIN"));

        store.login(mina()).await.unwrap();
        assert!(evaluator.has_any_permission(&["seller"]));
        assert!(!evaluator.has_all_permissions(&["ADMIN", "BUYER"]));

        store.logout().await.unwrap();
        assert!(!evaluator.has_permission("ADMIN"));
    }

    #[tokio::test]
    async fn test_read_error_starts_anonymous() {
        let storage = Arc::new(FailingStorage::default());
        let payload = serde_json::to_string(&mina()).unwrap();
        storage.inner.set(KEY, &payload).await.unwrap();
        storage.fail_reads.store(true, Ordering::SeqCst);

        let store = AuthStore::init(storage, KEY).await;
        assert_eq!(store.session(), Session::anonymous());
    }

    #[tokio::test]
    async fn test_failed_persist_keeps_session() {
        let storage = Arc::new(FailingStorage::default());
        let store = AuthStore::init(storage.clone(), KEY).await;
        let first = mina();
        store.login(first.clone()).await.unwrap();

        storage.fail_writes.store(true, Ordering::SeqCst);
        let err = store
            .login(User::new("other", "other@example.com"))
            .await
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::Storage);
        assert_eq!(store.session(), Session::authenticated(first.clone()));

        let persisted: User =
            serde_json::from_str(&storage.inner.get(KEY).await.unwrap().unwrap()).unwrap();
        assert_eq!(persisted, first);
    }

    #[tokio::test]
    async fn test_failed_remove_still_signs_out() {
        let storage = Arc::new(FailingStorage::default());
        let store = AuthStore::init(storage.clone(), KEY).await;
        store.login(mina()).await.unwrap();
        let mut rx = store.subscribe();

        storage.fail_removes.store(true, Ordering::SeqCst);
        let err = store.logout().await.unwrap_err();

        assert_eq!(err.kind, ErrorKind::Storage);
        assert_eq!(store.session(), Session::anonymous());
        assert!(rx.has_changed().unwrap());
        assert!(storage.inner.exists(KEY).await.unwrap());
    }
}
