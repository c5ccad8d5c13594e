//! The session gate: single source of truth for "is this user signed in".
//!
//! ## Lifecycle
//!
//! ```text
//! LOADING    --initialize, stored == "1"-------> SIGNED_IN
//! LOADING    --initialize, other/absent/error--> SIGNED_OUT
//! SIGNED_OUT --sign_in accepted----------------> SIGNED_IN
//! SIGNED_OUT --sign_in rejected----------------> SIGNED_OUT
//! SIGNED_IN  --sign_out------------------------> SIGNED_OUT
//! ```
//!
//! `ready` flips to `true` exactly once, when the first storage read
//! resolves. Until then `signed_in` must not be trusted; see [`SessionPhase`].
//!
//! ## Writes
//!
//! The initial load, `sign_in` and `sign_out` all hold the same writer lock
//! while they touch memory and storage, so a stale write can never land after
//! a newer one. Memory is updated first and storage second; a failed storage
//! write is reported through [`Persistence`] but never rolled back.

use std::sync::Arc;

use tokio::sync::{watch, Mutex, OnceCell};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::SessionConfig;
use crate::credentials::{CredentialValidator, Credentials, FixedCredentials};
use crate::error::{SessionError, SessionResult};
use crate::storage::{KeyValueStore, MemoryStore, RedbStore, SIGNED_IN_SENTINEL, STORAGE_KEY};

/// Observable session fields.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    /// Initial load from storage has completed
    pub ready: bool,
    /// The user is authenticated (only meaningful once `ready`)
    pub signed_in: bool,
}

impl SessionState {
    pub fn phase(self) -> SessionPhase {
        match (self.ready, self.signed_in) {
            (false, _) => SessionPhase::Loading,
            (true, false) => SessionPhase::SignedOut,
            (true, true) => SessionPhase::SignedIn,
        }
    }
}

/// State machine view of a [`SessionState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    Loading,
    SignedOut,
    SignedIn,
}

/// Whether a sign-in or sign-out reached storage.
#[derive(Debug)]
pub enum Persistence {
    Saved,
    /// In-memory state changed but storage did not; the session may not
    /// survive a restart.
    Failed(SessionError),
}

impl Persistence {
    pub fn is_saved(&self) -> bool {
        matches!(self, Persistence::Saved)
    }

    fn from_result(result: SessionResult<()>) -> Self {
        match result {
            Ok(()) => Persistence::Saved,
            Err(err) => Persistence::Failed(err),
        }
    }
}

/// Result of [`SessionGate::sign_in`].
#[derive(Debug)]
pub enum SignInOutcome {
    /// Credentials did not validate; nothing changed
    Rejected,
    /// Signed in; carries whether the flag was persisted
    Accepted(Persistence),
}

impl SignInOutcome {
    pub fn is_signed_in(&self) -> bool {
        matches!(self, SignInOutcome::Accepted(_))
    }
}

/// Owns the signed-in flag, its persisted mirror and the credential policy.
///
/// Cheap to clone; clones share the same session. Pass it explicitly to
/// whatever needs it.
#[derive(Clone)]
pub struct SessionGate {
    inner: Arc<GateInner>,
}

struct GateInner {
    store: Arc<dyn KeyValueStore>,
    validator: Arc<dyn CredentialValidator>,
    storage_key: String,
    state: watch::Sender<SessionState>,
    loaded: OnceCell<()>,
    writer: Mutex<()>,
    shutdown: CancellationToken,
}

impl SessionGate {
    /// Gate over `store` using `validator`, with the default storage key.
    pub fn new(store: impl KeyValueStore, validator: impl CredentialValidator) -> Self {
        Self::from_parts(Arc::new(store), Arc::new(validator), STORAGE_KEY)
    }

    pub fn from_parts(
        store: Arc<dyn KeyValueStore>,
        validator: Arc<dyn CredentialValidator>,
        storage_key: impl Into<String>,
    ) -> Self {
        let (state, _) = watch::channel(SessionState::default());
        Self {
            inner: Arc::new(GateInner {
                store,
                validator,
                storage_key: storage_key.into(),
                state,
                loaded: OnceCell::new(),
                writer: Mutex::new(()),
                shutdown: CancellationToken::new(),
            }),
        }
    }

    /// Open the on-disk store described by `config` with the demo credential
    /// policy.
    pub fn open(config: &SessionConfig) -> SessionResult<Self> {
        let store = RedbStore::open(config.db_path())?;
        Ok(Self::from_parts(
            Arc::new(store),
            Arc::new(FixedCredentials::admin()),
            config.storage_key.clone(),
        ))
    }

    /// Like [`open`](Self::open), but falls back to an in-memory store when
    /// the database cannot be opened. The app then starts signed out and
    /// sign-ins do not survive a restart.
    pub fn open_or_volatile(config: &SessionConfig) -> Self {
        match Self::open(config) {
            Ok(gate) => gate,
            Err(err) => {
                warn!(
                    error = %err,
                    path = %config.db_path().display(),
                    "Session store unavailable, using in-memory session"
                );
                Self::from_parts(
                    Arc::new(MemoryStore::new()),
                    Arc::new(FixedCredentials::admin()),
                    config.storage_key.clone(),
                )
            }
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Reads
    // ═══════════════════════════════════════════════════════════════════════

    pub fn state(&self) -> SessionState {
        *self.inner.state.borrow()
    }

    pub fn phase(&self) -> SessionPhase {
        self.state().phase()
    }

    pub fn is_ready(&self) -> bool {
        self.state().ready
    }

    pub fn is_signed_in(&self) -> bool {
        self.state().signed_in
    }

    /// Receive every state change from now on.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.inner.state.subscribe()
    }

    pub fn storage_key(&self) -> &str {
        &self.inner.storage_key
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Lifecycle
    // ═══════════════════════════════════════════════════════════════════════

    /// Load the persisted flag and mark the session ready.
    ///
    /// Runs the storage read at most once per gate; concurrent callers wait
    /// for the same load and later calls return immediately. Read failures
    /// are logged and treated as signed out. If [`teardown`](Self::teardown)
    /// happens first, nothing is written and the session stays loading.
    pub async fn initialize(&self) -> SessionState {
        if let Err(err) = self.inner.loaded.get_or_try_init(|| self.load()).await {
            debug!(error = %err, "Initial session load abandoned");
        }
        self.state()
    }

    /// The owner of this gate is gone; discard any pending load.
    pub fn teardown(&self) {
        if !self.inner.shutdown.is_cancelled() {
            debug!("Session gate torn down");
            self.inner.shutdown.cancel();
        }
    }

    pub fn is_torn_down(&self) -> bool {
        self.inner.shutdown.is_cancelled()
    }

    async fn load(&self) -> SessionResult<()> {
        let inner = &self.inner;
        if inner.shutdown.is_cancelled() {
            return Err(SessionError::TornDown);
        }

        let _writer = inner.writer.lock().await;

        let store = Arc::clone(&inner.store);
        let key = inner.storage_key.clone();
        let read = tokio::task::spawn_blocking(move || store.get(&key));

        let stored = tokio::select! {
            biased;
            () = inner.shutdown.cancelled() => return Err(SessionError::TornDown),
            joined = read => joined.map_err(SessionError::from).and_then(|r| r),
        };

        if inner.shutdown.is_cancelled() {
            return Err(SessionError::TornDown);
        }

        let signed_in = match stored {
            Ok(value) => value.as_deref() == Some(SIGNED_IN_SENTINEL),
            Err(err) => {
                warn!(error = %err, "Failed to read session flag, treating as signed out");
                false
            }
        };

        inner.state.send_modify(|state| {
            state.signed_in = signed_in;
            state.ready = true;
        });
        info!(signed_in, "Session loaded");

        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Mutations
    // ═══════════════════════════════════════════════════════════════════════

    /// Validate credentials and, if accepted, sign in and persist the flag.
    ///
    /// Subscribers see the signed-in state before the storage write starts.
    pub async fn sign_in(&self, identifier: &str, secret: &str) -> SignInOutcome {
        let credentials = Credentials::new(identifier, secret);
        if !self.inner.validator.validate(&credentials) {
            info!(identifier = %credentials.identifier.trim(), "Sign-in rejected");
            return SignInOutcome::Rejected;
        }

        let _writer = self.inner.writer.lock().await;
        self.publish_signed_in(true);
        let persisted = self.persist(Some(SIGNED_IN_SENTINEL)).await;

        info!(
            identifier = %credentials.identifier.trim(),
            persisted = persisted.is_saved(),
            "Signed in"
        );
        SignInOutcome::Accepted(persisted)
    }

    /// Sign out and remove the persisted flag. Always signs out in memory.
    pub async fn sign_out(&self) -> Persistence {
        let _writer = self.inner.writer.lock().await;
        self.publish_signed_in(false);
        let persisted = self.persist(None).await;

        info!(persisted = persisted.is_saved(), "Signed out");
        persisted
    }

    fn publish_signed_in(&self, signed_in: bool) {
        self.inner.state.send_modify(|state| state.signed_in = signed_in);
    }

    /// Write the sentinel (`Some`) or remove the key (`None`).
    async fn persist(&self, value: Option<&'static str>) -> Persistence {
        let store = Arc::clone(&self.inner.store);
        let key = self.inner.storage_key.clone();

        let result = tokio::task::spawn_blocking(move || match value {
            Some(value) => store.set(&key, value),
            None => store.remove(&key),
        })
        .await
        .map_err(SessionError::from)
        .and_then(|r| r);

        if let Err(ref err) = result {
            warn!(error = %err, "Failed to persist session flag");
        }
        Persistence::from_result(result)
    }
}

impl std::fmt::Debug for SessionGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionGate")
            .field("storage_key", &self.inner.storage_key)
            .field("state", &self.state())
            .field("torn_down", &self.is_torn_down())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn admin_gate(store: MemoryStore) -> SessionGate {
        SessionGate::new(store, FixedCredentials::admin())
    }

    /// Store whose reads and/or writes always fail.
    struct BrokenStore {
        fail_reads: bool,
        fail_writes: bool,
        inner: MemoryStore,
    }

    impl KeyValueStore for BrokenStore {
        fn get(&self, key: &str) -> SessionResult<Option<String>> {
            if self.fail_reads {
                return Err(SessionError::Storage("read refused".into()));
            }
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> SessionResult<()> {
            if self.fail_writes {
                return Err(SessionError::Storage("write refused".into()));
            }
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> SessionResult<()> {
            if self.fail_writes {
                return Err(SessionError::Storage("remove refused".into()));
            }
            self.inner.remove(key)
        }
    }

    /// Counts reads so tests can check the load happens once.
    struct CountingStore {
        reads: Arc<AtomicUsize>,
        inner: MemoryStore,
    }

    impl KeyValueStore for CountingStore {
        fn get(&self, key: &str) -> SessionResult<Option<String>> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> SessionResult<()> {
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> SessionResult<()> {
            self.inner.remove(key)
        }
    }

    /// Read blocks until the test releases it.
    struct StalledStore {
        release: parking_lot::Mutex<std::sync::mpsc::Receiver<()>>,
        inner: MemoryStore,
    }

    impl KeyValueStore for StalledStore {
        fn get(&self, key: &str) -> SessionResult<Option<String>> {
            let _ = self.release.lock().recv();
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> SessionResult<()> {
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> SessionResult<()> {
            self.inner.remove(key)
        }
    }

    #[test]
    fn test_phase_mapping() {
        let loading = SessionState::default();
        assert_eq!(loading.phase(), SessionPhase::Loading);

        let stale = SessionState {
            ready: false,
            signed_in: true,
        };
        assert_eq!(stale.phase(), SessionPhase::Loading);

        let out = SessionState {
            ready: true,
            signed_in: false,
        };
        assert_eq!(out.phase(), SessionPhase::SignedOut);

        let signed_in = SessionState {
            ready: true,
            signed_in: true,
        };
        assert_eq!(signed_in.phase(), SessionPhase::SignedIn);
    }

    #[tokio::test]
    async fn test_new_gate_is_loading() {
        let gate = admin_gate(MemoryStore::new());
        assert_eq!(gate.state(), SessionState::default());
        assert_eq!(gate.phase(), SessionPhase::Loading);
        assert_eq!(gate.storage_key(), STORAGE_KEY);
    }

    #[tokio::test]
    async fn test_initialize_reads_sentinel() {
        let gate = admin_gate(MemoryStore::with_entry(STORAGE_KEY, "1"));
        let state = gate.initialize().await;
        assert!(state.ready);
        assert!(state.signed_in);
    }

    #[tokio::test]
    async fn test_initialize_once() {
        let reads = Arc::new(AtomicUsize::new(0));
        let inner = MemoryStore::new();
        let gate = SessionGate::new(
            CountingStore {
                reads: Arc::clone(&reads),
                inner: inner.clone(),
            },
            FixedCredentials::admin(),
        );
        let mut rx = gate.subscribe();

        let (a, b) = tokio::join!(gate.initialize(), gate.initialize());
        assert!(a.ready && b.ready);
        assert!(rx.has_changed().unwrap());
        rx.borrow_and_update();

        // Sentinel appears later; a second initialize must not re-read it
        inner.set(STORAGE_KEY, "1").unwrap();
        let again = gate.initialize().await;

        assert!(!again.signed_in);
        assert!(!rx.has_changed().unwrap());
        assert_eq!(reads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_read_failure_degrades_to_signed_out() {
        let gate = SessionGate::new(
            BrokenStore {
                fail_reads: true,
                fail_writes: false,
                inner: MemoryStore::with_entry(STORAGE_KEY, "1"),
            },
            FixedCredentials::admin(),
        );

        let state = gate.initialize().await;
        assert!(state.ready);
        assert!(!state.signed_in);
    }

    #[tokio::test]
    async fn test_sign_in_publishes_before_returning() {
        let store = MemoryStore::new();
        let gate = admin_gate(store.clone());
        gate.initialize().await;
        let mut rx = gate.subscribe();

        let outcome = gate.sign_in("admin", "admin").await;
        assert!(outcome.is_signed_in());
        assert!(matches!(outcome, SignInOutcome::Accepted(Persistence::Saved)));
        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().signed_in);
        assert_eq!(store.peek(STORAGE_KEY).as_deref(), Some(SIGNED_IN_SENTINEL));
    }

    #[tokio::test]
    async fn test_rejected_sign_in_changes_nothing() {
        let store = MemoryStore::new();
        let gate = admin_gate(store.clone());
        gate.initialize().await;
        let mut rx = gate.subscribe();

        let outcome = gate.sign_in("admin", "wrong").await;
        assert!(!outcome.is_signed_in());
        assert!(!gate.is_signed_in());
        assert!(!rx.has_changed().unwrap());
        assert_eq!(store.peek(STORAGE_KEY), None);
    }

    #[tokio::test]
    async fn test_failed_write_is_reported_not_rolled_back() {
        let gate = SessionGate::new(
            BrokenStore {
                fail_reads: false,
                fail_writes: true,
                inner: MemoryStore::new(),
            },
            FixedCredentials::admin(),
        );
        gate.initialize().await;

        match gate.sign_in("admin", "admin").await {
            SignInOutcome::Accepted(Persistence::Failed(SessionError::Storage(msg))) => {
                assert!(msg.contains("write refused"));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert!(gate.is_signed_in());

        let persisted = gate.sign_out().await;
        assert!(!persisted.is_saved());
        assert!(!gate.is_signed_in());
    }

    #[tokio::test]
    async fn test_teardown_discards_pending_load() {
        let (release_tx, release_rx) = std::sync::mpsc::channel();
        let gate = SessionGate::new(
            StalledStore {
                release: parking_lot::Mutex::new(release_rx),
                inner: MemoryStore::with_entry(STORAGE_KEY, "1"),
            },
            FixedCredentials::admin(),
        );

        let pending = tokio::spawn({
            let gate = gate.clone();
            async move { gate.initialize().await }
        });
        tokio::task::yield_now().await;

        gate.teardown();
        let state = pending.await.unwrap();
        release_tx.send(()).unwrap();

        assert!(!state.ready);
        assert!(!gate.is_ready());
        assert!(!gate.is_signed_in());

        // Later calls do not resurrect the load either
        assert!(!gate.initialize().await.ready);
        assert!(gate.is_torn_down());
    }

    #[tokio::test]
    async fn test_custom_validator() {
        let gate = SessionGate::new(MemoryStore::new(), |c: &Credentials| {
            c.identifier == "guest" && c.secret.is_empty()
        });
        gate.initialize().await;

        assert!(!gate.sign_in("admin", "admin").await.is_signed_in());
        assert!(gate.sign_in("guest", "").await.is_signed_in());
    }

    #[tokio::test]
    async fn test_custom_storage_key() {
        let store = MemoryStore::with_entry("@other/flag", "1");
        let gate = SessionGate::from_parts(
            Arc::new(store.clone()),
            Arc::new(FixedCredentials::admin()),
            "@other/flag",
        );

        assert!(gate.initialize().await.signed_in);
        gate.sign_out().await;
        assert_eq!(store.peek("@other/flag"), None);
    }

    #[tokio::test]
    async fn test_open_or_volatile_falls_back() {
        let temp = tempfile::TempDir::new().unwrap();
        // A regular file where the data directory should be
        let blocker = temp.path().join("not-a-dir");
        std::fs::write(&blocker, b"x").unwrap();

        let config = SessionConfig::new(&blocker);
        assert!(SessionGate::open(&config).is_err());

        let gate = SessionGate::open_or_volatile(&config);
        let state = gate.initialize().await;
        assert!(state.ready);
        assert!(!state.signed_in);
        assert!(gate.sign_in("admin", "admin").await.is_signed_in());
    }
}
