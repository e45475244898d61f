//! Offline queue manager
//!
//! Owns the pending-report collection: submissions captured while offline,
//! waiting to be promoted into real reports once connectivity returns.
//! Promotion is all-or-nothing from the caller's view; any failure before
//! the final commit leaves both collections untouched.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use dashmap::DashSet;
use parking_lot::RwLock;

use mzansi_client::{ClassificationInput, Classifier, DocumentStore};
use shared::error::{AppError, AppResult};
use shared::models::{IssueReport, PendingReport, Submission};
use shared::util::report_id;

use crate::connectivity::ConnectivityMonitor;
use crate::errors::{classifier_error, store_error};
use crate::history::ReportHistory;
use crate::storage::LocalStore;

/// Releases the in-flight marker on every exit path
struct InFlight<'a> {
    set: &'a DashSet<String>,
    id: String,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.set.remove(&self.id);
    }
}

/// Pending-report collection plus the per-entry promotion gate
pub struct OfflineQueue {
    pending: RwLock<Vec<PendingReport>>,
    in_flight: DashSet<String>,
    store: LocalStore,
    connectivity: ConnectivityMonitor,
}

impl OfflineQueue {
    /// Open the queue, hydrating from the persisted snapshot
    pub fn open(store: LocalStore, connectivity: ConnectivityMonitor) -> AppResult<Self> {
        let pending = store
            .load_pending()
            .map_err(|e| AppError::Storage(e.to_string()))?;
        Ok(Self {
            pending: RwLock::new(pending),
            in_flight: DashSet::new(),
            store,
            connectivity,
        })
    }

    /// Capture a submission as a pending entry.
    ///
    /// No network dependency: this is the offline path and always succeeds
    /// short of a storage failure.
    pub fn enqueue(&self, submission: &Submission) -> AppResult<PendingReport> {
        let image = BASE64.encode(&submission.image);
        let entry = PendingReport::capture(image, submission);

        let mut pending = self.pending.write();
        let mut working = pending.clone();
        working.insert(0, entry.clone());
        self.store
            .save_pending(&working)
            .map_err(|e| AppError::Storage(e.to_string()))?;
        *pending = working;

        tracing::info!(id = %entry.id, "submission queued offline");
        Ok(entry)
    }

    /// Snapshot of the pending collection, most-recent-first
    pub fn list(&self) -> Vec<PendingReport> {
        self.pending.read().clone()
    }

    /// Number of pending entries
    pub fn len(&self) -> usize {
        self.pending.read().len()
    }

    /// Whether the queue is empty
    pub fn is_empty(&self) -> bool {
        self.pending.read().is_empty()
    }

    /// Remove a pending entry unconditionally (confirmation is upstream)
    pub fn delete(&self, id: &str) -> AppResult<()> {
        let mut pending = self.pending.write();
        let index = pending
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| AppError::not_found(format!("pending report {id}")))?;

        let mut working = pending.clone();
        working.remove(index);
        self.store
            .save_pending(&working)
            .map_err(|e| AppError::Storage(e.to_string()))?;
        *pending = working;
        Ok(())
    }

    /// Promote a pending entry into a submitted report.
    ///
    /// Classifies the stored evidence, optionally saves to the remote store
    /// (authenticated callers), then commits: the report enters the history
    /// and the pending entry leaves the queue in one storage transaction.
    /// At most one promotion of a given entry runs at a time.
    pub async fn promote(
        &self,
        id: &str,
        language: &str,
        classifier: &dyn Classifier,
        history: &ReportHistory,
        remote: Option<(&str, &dyn DocumentStore)>,
    ) -> AppResult<IssueReport> {
        if !self.in_flight.insert(id.to_string()) {
            return Err(AppError::PromotionInFlight(id.to_string()));
        }
        let _gate = InFlight {
            set: &self.in_flight,
            id: id.to_string(),
        };

        if !self.connectivity.is_online() {
            return Err(AppError::Offline);
        }

        let entry = self
            .pending
            .read()
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("pending report {id}")))?;

        let image = BASE64
            .decode(&entry.image)
            .map_err(|e| AppError::internal(format!("corrupt pending image: {e}")))?;

        let input = ClassificationInput {
            report_id: report_id(),
            image,
            description: entry.description.clone(),
            location: entry.location,
            priority_hint: entry.priority_hint,
            language: language.to_string(),
        };

        let classification = classifier.classify(&input).await.map_err(classifier_error)?;
        let report = IssueReport::from_classification(
            classification,
            entry.location,
            Some(entry.image.clone()),
            entry.is_anonymous,
        );

        if let Some((user_id, document_store)) = remote {
            document_store
                .save_report(user_id, &report)
                .await
                .map_err(store_error)?;
        }

        // Commit: remove from pending and insert into history atomically
        let mut pending = self.pending.write();
        let index = pending
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| AppError::not_found(format!("pending report {id}")))?;
        let mut working = pending.clone();
        working.remove(index);
        history.insert_with_pending(report.clone(), &working)?;
        *pending = working;

        tracing::info!(id, report_id = %report.report_id(), "pending report promoted");
        Ok(report)
    }

    /// Drop the in-memory collection only. For callers that have already
    /// cleared the persisted blobs in one transaction.
    pub(crate) fn reset(&self) {
        self.pending.write().clear();
    }

    /// Drop every pending entry, locally and in the persisted mirror
    pub fn clear(&self) -> AppResult<()> {
        let mut pending = self.pending.write();
        self.store
            .save_pending(&[])
            .map_err(|e| AppError::Storage(e.to_string()))?;
        pending.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mzansi_client::{ClientError, ClientResult};
    use shared::models::{Classification, Priority, PriorityHint, ReportMetadata};

    struct ScriptedClassifier {
        fail: bool,
    }

    #[async_trait]
    impl Classifier for ScriptedClassifier {
        async fn classify(&self, input: &ClassificationInput) -> ClientResult<Classification> {
            if self.fail {
                return Err(ClientError::InvalidResponse("no response".to_string()));
            }
            Ok(Classification {
                report_id: input.report_id.clone(),
                primary_category: "Pothole".to_string(),
                secondary_category: None,
                detected_objects: vec![],
                severity_score: 0.6,
                priority: Priority::Medium,
                confidence: 0.9,
                suggested_department: vec![
                    "Johannesburg Roads Agency (JRA)".to_string(),
                ],
                contact_details: None,
                dispatch_recommendation: None,
                estimated_time_to_fix: None,
                sla_tier: None,
                human_summary: None,
                clarifying_questions: vec![],
                emergency: false,
                metadata: ReportMetadata::default(),
            })
        }
    }

    fn submission(description: &str) -> Submission {
        Submission {
            image: vec![0xFF, 0xD8, 0xFF],
            description: description.to_string(),
            location: None,
            priority_hint: PriorityHint::Medium,
            is_anonymous: false,
        }
    }

    fn fixtures(online: bool) -> (OfflineQueue, ReportHistory) {
        let store = LocalStore::open_in_memory().unwrap();
        let connectivity = ConnectivityMonitor::new(online);
        let queue = OfflineQueue::open(store.clone(), connectivity).unwrap();
        let history = ReportHistory::open(store).unwrap();
        (queue, history)
    }

    #[test]
    fn enqueue_then_delete_removes_exactly_that_entry() {
        let (queue, _) = fixtures(false);
        let first = queue.enqueue(&submission("a")).unwrap();
        let second = queue.enqueue(&submission("b")).unwrap();

        queue.delete(&first.id).unwrap();

        let remaining = queue.list();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, second.id);
    }

    #[test]
    fn delete_unknown_id_is_not_found() {
        let (queue, _) = fixtures(false);
        assert!(matches!(
            queue.delete("nope").unwrap_err(),
            AppError::NotFound(_)
        ));
    }

    #[test]
    fn newest_entry_sits_first() {
        let (queue, _) = fixtures(false);
        queue.enqueue(&submission("a")).unwrap();
        let second = queue.enqueue(&submission("b")).unwrap();
        assert_eq!(queue.list()[0].id, second.id);
    }

    #[tokio::test]
    async fn promote_success_moves_entry_into_history() {
        let (queue, history) = fixtures(true);
        let classifier = ScriptedClassifier { fail: false };
        let entry = queue.enqueue(&submission("pothole")).unwrap();

        let report = queue
            .promote(&entry.id, "en", &classifier, &history, None)
            .await
            .unwrap();

        assert!(queue.is_empty());
        assert_eq!(history.len(), 1);
        assert!(report.report_id().starts_with('R'));
        assert_eq!(report.status, shared::models::ReportStatus::Submitted);
        assert_eq!(report.image, Some(entry.image));
    }

    #[tokio::test]
    async fn promote_failure_leaves_collections_untouched() {
        let (queue, history) = fixtures(true);
        let classifier = ScriptedClassifier { fail: true };
        let entry = queue.enqueue(&submission("pothole")).unwrap();
        let before = queue.list();

        let err = queue
            .promote(&entry.id, "en", &classifier, &history, None)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Classifier(_)));
        assert_eq!(queue.list(), before);
        assert!(history.is_empty());
    }

    #[tokio::test]
    async fn promote_offline_is_rejected() {
        let (queue, history) = fixtures(false);
        let classifier = ScriptedClassifier { fail: false };
        let entry = queue.enqueue(&submission("pothole")).unwrap();

        let err = queue
            .promote(&entry.id, "en", &classifier, &history, None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Offline));
        assert_eq!(queue.len(), 1);
    }

    #[tokio::test]
    async fn promote_unknown_id_is_not_found() {
        let (queue, history) = fixtures(true);
        let classifier = ScriptedClassifier { fail: false };
        let err = queue
            .promote("nope", "en", &classifier, &history, None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn concurrent_promotion_of_same_entry_is_gated() {
        let (queue, history) = fixtures(true);
        let classifier = ScriptedClassifier { fail: false };
        let entry = queue.enqueue(&submission("pothole")).unwrap();

        queue.in_flight.insert(entry.id.clone());
        let err = queue
            .promote(&entry.id, "en", &classifier, &history, None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::PromotionInFlight(_)));
        queue.in_flight.remove(&entry.id);
    }

    #[tokio::test]
    async fn gate_is_released_after_failure() {
        let (queue, history) = fixtures(false);
        let classifier = ScriptedClassifier { fail: false };
        let entry = queue.enqueue(&submission("pothole")).unwrap();

        let err = queue
            .promote(&entry.id, "en", &classifier, &history, None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Offline));

        queue.connectivity.set_online(true);
        queue
            .promote(&entry.id, "en", &classifier, &history, None)
            .await
            .unwrap();
        assert!(queue.is_empty());
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn clear_empties_queue_and_persisted_mirror() {
        let store = LocalStore::open_in_memory().unwrap();
        let connectivity = ConnectivityMonitor::new(false);
        let queue = OfflineQueue::open(store.clone(), connectivity.clone()).unwrap();
        queue.enqueue(&submission("a")).unwrap();
        queue.enqueue(&submission("b")).unwrap();

        queue.clear().unwrap();
        assert!(queue.is_empty());

        let reopened = OfflineQueue::open(store, connectivity).unwrap();
        assert!(reopened.is_empty());
    }

    #[tokio::test]
    async fn repeated_cycles_never_duplicate_report_ids() {
        let (queue, history) = fixtures(true);
        let classifier = ScriptedClassifier { fail: false };

        for i in 0..3 {
            let entry = queue.enqueue(&submission(&format!("issue {i}"))).unwrap();
            queue
                .promote(&entry.id, "en", &classifier, &history, None)
                .await
                .unwrap();
        }

        // Clock-collision ids upsert instead of duplicating, so the history
        // holds each report_id at most once regardless of timing.
        let list = history.list();
        let mut ids: Vec<&str> = list.iter().map(|r| r.report_id()).collect();
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), total);
        assert!(queue.is_empty());
    }
}
