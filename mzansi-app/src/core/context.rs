//! Application context
//!
//! Explicit owner of everything the reporting core needs at runtime:
//! configuration, the local store, connectivity, the queue and history,
//! the lifecycle controller, user settings and the auth session. All
//! component wiring happens in [`AppContext::initialize`].

use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::watch;

use mzansi_client::{
    Classifier, DocumentStore, IdentityProvider, LoginInput, RegisterInput,
};
use shared::error::{AppError, AppResult};
use shared::models::{
    AuthSession, IssueReport, PendingReport, ReportStatus, Submission, User, UserSettings,
};

use crate::connectivity::ConnectivityMonitor;
use crate::core::config::{AppConfig, LocationRequest};
use crate::errors::{auth_error, store_error};
use crate::history::ReportHistory;
use crate::lifecycle::{ReportController, SubmitOutcome};
use crate::queue::OfflineQueue;
use crate::storage::LocalStore;

const STORE_FILE: &str = "mzansi.redb";

/// Runtime owner of the reporting core
pub struct AppContext {
    config: AppConfig,
    store: LocalStore,
    connectivity: ConnectivityMonitor,
    queue: Arc<OfflineQueue>,
    history: Arc<ReportHistory>,
    controller: ReportController,
    settings: RwLock<UserSettings>,
    identity: Option<Arc<dyn IdentityProvider>>,
    remote: Option<Arc<dyn DocumentStore>>,
    auth: watch::Sender<Option<AuthSession>>,
}

impl AppContext {
    /// Open the local store and wire every component.
    ///
    /// Persisted pending reports, history and settings are hydrated here;
    /// the session starts signed out.
    pub fn initialize(
        config: AppConfig,
        classifier: Arc<dyn Classifier>,
        remote: Option<Arc<dyn DocumentStore>>,
        identity: Option<Arc<dyn IdentityProvider>>,
    ) -> AppResult<Self> {
        crate::utils::logger::init_logger(&config);

        std::fs::create_dir_all(&config.work_dir)
            .map_err(|e| AppError::Storage(e.to_string()))?;
        let store = LocalStore::open(Path::new(&config.work_dir).join(STORE_FILE))
            .map_err(|e| AppError::Storage(e.to_string()))?;

        let connectivity = ConnectivityMonitor::default();
        let queue = Arc::new(OfflineQueue::open(store.clone(), connectivity.clone())?);
        let history = Arc::new(ReportHistory::open(store.clone())?);
        let settings = store
            .load_settings()
            .map_err(|e| AppError::Storage(e.to_string()))?
            .unwrap_or_default();

        let controller = ReportController::new(
            classifier,
            remote.clone(),
            Arc::clone(&queue),
            Arc::clone(&history),
            connectivity.clone(),
        );

        let (auth, _) = watch::channel(None);

        tracing::info!(work_dir = %config.work_dir, "reporting core initialized");

        Ok(Self {
            config,
            store,
            connectivity,
            queue,
            history,
            controller,
            settings: RwLock::new(settings),
            identity,
            remote,
            auth,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn connectivity(&self) -> &ConnectivityMonitor {
        &self.connectivity
    }

    pub fn controller(&self) -> &ReportController {
        &self.controller
    }

    /// Location acquisition policy for the platform layer
    pub fn location_request(&self) -> LocationRequest {
        self.config.location_request()
    }

    // ========== Reporting ==========

    /// Submit new evidence under the current session and language
    pub async fn submit(&self, submission: Submission) -> AppResult<SubmitOutcome> {
        let session = self.session();
        let language = self.settings.read().language.clone();
        self.controller
            .submit(submission, session.as_ref(), &language)
            .await
    }

    /// Promote a pending entry under the current session and language
    pub async fn promote_pending(&self, id: &str) -> AppResult<IssueReport> {
        let session = self.session();
        let language = self.settings.read().language.clone();
        self.controller
            .promote_pending(id, session.as_ref(), &language)
            .await
    }

    /// Change a report's status
    pub fn update_status(&self, report_id: &str, status: ReportStatus) -> AppResult<()> {
        self.controller.update_status(report_id, status)
    }

    /// Pending reports awaiting promotion, most-recent-first
    pub fn pending_reports(&self) -> Vec<PendingReport> {
        self.queue.list()
    }

    /// Remove a pending entry
    pub fn delete_pending(&self, id: &str) -> AppResult<()> {
        self.queue.delete(id)
    }

    /// Submitted reports, most-recent-first
    pub fn report_history(&self) -> Vec<IssueReport> {
        self.history.list()
    }

    // ========== Auth ==========

    /// Current session, if signed in
    pub fn session(&self) -> Option<AuthSession> {
        self.auth.borrow().clone()
    }

    /// Subscribe to session changes
    pub fn subscribe_auth(&self) -> watch::Receiver<Option<AuthSession>> {
        self.auth.subscribe()
    }

    /// Sign in with email and password
    pub async fn login(&self, email: &str, password: &str) -> AppResult<AuthSession> {
        let provider = self.identity.as_ref().ok_or(AppError::NotConfigured)?;
        let session = provider
            .login(&LoginInput {
                email: email.to_string(),
                password: password.to_string(),
            })
            .await
            .map_err(auth_error)?;

        self.on_auth_changed(Some(session.clone())).await?;
        Ok(session)
    }

    /// Register a new account and sign in
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> AppResult<AuthSession> {
        let provider = self.identity.as_ref().ok_or(AppError::NotConfigured)?;
        let session = provider
            .register(&RegisterInput {
                name: name.to_string(),
                email: email.to_string(),
                password: password.to_string(),
            })
            .await
            .map_err(auth_error)?;

        self.on_auth_changed(Some(session.clone())).await?;
        Ok(session)
    }

    /// Sign out: provider teardown, session cleared, history mirror dropped
    pub async fn logout(&self) -> AppResult<()> {
        if let Some(provider) = &self.identity {
            provider.logout().await.map_err(auth_error)?;
        }
        self.on_auth_changed(None).await
    }

    /// React to a session change: a sign-in replaces the history mirror
    /// with the remote collection, a sign-out clears it.
    pub async fn on_auth_changed(&self, session: Option<AuthSession>) -> AppResult<()> {
        match &session {
            Some(session) => {
                if let Some(remote) = &self.remote {
                    let reports = remote
                        .fetch_reports(&session.user_id)
                        .await
                        .map_err(store_error)?;
                    self.history.replace_all(reports)?;
                }
                tracing::info!(user_id = %session.user_id, "signed in");
            }
            None => {
                self.history.clear()?;
                self.controller.reset();
                tracing::info!("signed out");
            }
        }
        self.auth.send_replace(session);
        Ok(())
    }

    /// Update the current session's profile in the local cache
    pub fn update_user(&self, user: User) {
        self.auth.send_if_modified(|session| match session {
            Some(session) => {
                session.user = user.clone();
                true
            }
            None => false,
        });
    }

    // ========== Settings & local data ==========

    /// Current settings snapshot
    pub fn settings(&self) -> UserSettings {
        self.settings.read().clone()
    }

    /// Replace the settings, persisting before the in-memory commit
    pub fn update_settings(&self, settings: UserSettings) -> AppResult<()> {
        let mut current = self.settings.write();
        self.store
            .save_settings(&settings)
            .map_err(|e| AppError::Storage(e.to_string()))?;
        *current = settings;
        Ok(())
    }

    /// Wipe the local report cache (pending + history + current view).
    /// Settings are retained. Both persisted collections go in a single
    /// transaction, so an interruption never leaves a half-cleared cache.
    pub fn clear_local_data(&self) -> AppResult<()> {
        self.store
            .clear_reports()
            .map_err(|e| AppError::Storage(e.to_string()))?;
        self.queue.reset();
        self.history.reset();
        self.controller.reset();
        tracing::info!("local report cache cleared");
        Ok(())
    }
}
