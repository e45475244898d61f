//! Report lifecycle controller
//!
//! Drives a submission from capture to the history: NoReport, Analyzing
//! while the classifier runs, then Submitted, with Error reachable from
//! Analyzing. Report statuses (submitted / in_progress / resolved) are
//! user-driven and not forward-only; the controller is the sole status
//! writer.
//!
//! Connectivity is checked once, at submission time. A submission that
//! starts online and fails mid-flight surfaces as an error rather than
//! being queued; retry is a fresh submission after `clear_error`.

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use parking_lot::RwLock;

use mzansi_client::{ClassificationInput, Classifier, DocumentStore};
use shared::error::{AppError, AppResult};
use shared::models::{AuthSession, IssueReport, PendingReport, ReportStatus, Submission};
use shared::util::report_id;

use crate::connectivity::ConnectivityMonitor;
use crate::errors::{classifier_error, store_error};
use crate::history::ReportHistory;
use crate::queue::OfflineQueue;

/// Where the controller currently is in the submission flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    NoReport,
    Analyzing,
    Submitted,
    Error,
}

/// Result of a submission attempt
#[derive(Debug, Clone)]
pub enum SubmitOutcome {
    /// Classified and recorded
    Submitted(IssueReport),
    /// Captured offline, awaiting promotion
    Queued(PendingReport),
}

/// Submission flow controller
pub struct ReportController {
    classifier: Arc<dyn Classifier>,
    remote: Option<Arc<dyn DocumentStore>>,
    queue: Arc<OfflineQueue>,
    history: Arc<ReportHistory>,
    connectivity: ConnectivityMonitor,

    phase: RwLock<Phase>,
    current: RwLock<Option<IssueReport>>,
    error: RwLock<Option<String>>,
}

impl ReportController {
    pub fn new(
        classifier: Arc<dyn Classifier>,
        remote: Option<Arc<dyn DocumentStore>>,
        queue: Arc<OfflineQueue>,
        history: Arc<ReportHistory>,
        connectivity: ConnectivityMonitor,
    ) -> Self {
        Self {
            classifier,
            remote,
            queue,
            history,
            connectivity,
            phase: RwLock::new(Phase::NoReport),
            current: RwLock::new(None),
            error: RwLock::new(None),
        }
    }

    /// Current flow phase
    pub fn phase(&self) -> Phase {
        *self.phase.read()
    }

    /// The report currently in view, if any
    pub fn current_report(&self) -> Option<IssueReport> {
        self.current.read().clone()
    }

    /// The user-visible message of the last failure, if uncleared
    pub fn last_error(&self) -> Option<String> {
        self.error.read().clone()
    }

    /// Acknowledge the last failure, making submission possible again
    pub fn clear_error(&self) {
        *self.error.write() = None;
        let mut phase = self.phase.write();
        if *phase == Phase::Error {
            *phase = if self.current.read().is_some() {
                Phase::Submitted
            } else {
                Phase::NoReport
            };
        }
    }

    fn fail(&self, err: AppError) -> AppError {
        *self.error.write() = Some(err.user_message());
        *self.phase.write() = Phase::Error;
        err
    }

    /// Submit new evidence.
    ///
    /// The photo is mandatory; description, location and priority hint are
    /// optional. Offline at submission time hands the evidence to the queue
    /// without entering the analysis flow. Rejected while a previous error
    /// is uncleared.
    pub async fn submit(
        &self,
        submission: Submission,
        session: Option<&AuthSession>,
        language: &str,
    ) -> AppResult<SubmitOutcome> {
        if self.phase() == Phase::Error {
            return Err(AppError::validation(
                "A previous submission failed. Clear the error before retrying.",
            ));
        }
        if submission.image.is_empty() {
            return Err(AppError::validation("A photo of the issue is required."));
        }

        if !self.connectivity.is_online() {
            let pending = self.queue.enqueue(&submission)?;
            return Ok(SubmitOutcome::Queued(pending));
        }

        *self.phase.write() = Phase::Analyzing;

        let input = ClassificationInput {
            report_id: report_id(),
            image: submission.image.clone(),
            description: submission.description.clone(),
            location: submission.location,
            priority_hint: submission.priority_hint,
            language: language.to_string(),
        };

        let classification = match self.classifier.classify(&input).await {
            Ok(classification) => classification,
            Err(err) => return Err(self.fail(classifier_error(err))),
        };

        let report = IssueReport::from_classification(
            classification,
            submission.location,
            Some(BASE64.encode(&submission.image)),
            submission.is_anonymous,
        );

        // A failed remote save fails the whole submission; nothing has been
        // written locally yet.
        if let (Some(remote), Some(session)) = (&self.remote, session) {
            if let Err(err) = remote.save_report(&session.user_id, &report).await {
                return Err(self.fail(store_error(err)));
            }
        }

        if let Err(err) = self.history.insert(report.clone()) {
            return Err(self.fail(err));
        }

        *self.current.write() = Some(report.clone());
        *self.phase.write() = Phase::Submitted;
        tracing::info!(report_id = %report.report_id(), "submission completed");

        Ok(SubmitOutcome::Submitted(report))
    }

    /// Promote a pending entry through the queue and bring the resulting
    /// report into view.
    pub async fn promote_pending(
        &self,
        id: &str,
        session: Option<&AuthSession>,
        language: &str,
    ) -> AppResult<IssueReport> {
        let remote = match (&self.remote, session) {
            (Some(remote), Some(session)) => {
                Some((session.user_id.as_str(), remote.as_ref()))
            }
            _ => None,
        };

        let report = self
            .queue
            .promote(id, language, self.classifier.as_ref(), &self.history, remote)
            .await?;

        *self.current.write() = Some(report.clone());
        *self.phase.write() = Phase::Submitted;
        Ok(report)
    }

    /// Change a report's status, in the history and in the current view
    /// when it is the same report. Idempotent.
    pub fn update_status(&self, report_id: &str, status: ReportStatus) -> AppResult<()> {
        self.history.update_status(report_id, status)?;

        let mut current = self.current.write();
        if let Some(report) = current.as_mut()
            && report.report_id() == report_id
        {
            report.status = status;
        }
        Ok(())
    }

    /// Drop the current view (the history is untouched)
    pub fn reset(&self) {
        *self.current.write() = None;
        *self.error.write() = None;
        *self.phase.write() = Phase::NoReport;
    }
}
