//! Report history
//!
//! In-memory list of submitted reports, most-recent-first, mirrored to the
//! local store on every mutation. The persistence write happens before the
//! in-memory commit, so a storage failure leaves the visible list unchanged.

use parking_lot::RwLock;

use shared::error::{AppError, AppResult};
use shared::models::{IssueReport, PendingReport, ReportStatus};

use crate::storage::LocalStore;

/// Submitted-report collection, mirrored to [`LocalStore`]
pub struct ReportHistory {
    reports: RwLock<Vec<IssueReport>>,
    store: LocalStore,
}

/// Upsert by report_id into a working copy: a known id replaces in place at
/// its current position, a fresh one is pushed to the front.
fn upsert(reports: &mut Vec<IssueReport>, report: IssueReport) {
    match reports
        .iter()
        .position(|r| r.report_id() == report.report_id())
    {
        Some(index) => reports[index] = report,
        None => reports.insert(0, report),
    }
}

impl ReportHistory {
    /// Open the history, hydrating from the persisted snapshot
    pub fn open(store: LocalStore) -> AppResult<Self> {
        let reports = store
            .load_history()
            .map_err(|e| AppError::Storage(e.to_string()))?;
        Ok(Self {
            reports: RwLock::new(reports),
            store,
        })
    }

    /// Snapshot of the collection, most-recent-first
    pub fn list(&self) -> Vec<IssueReport> {
        self.reports.read().clone()
    }

    /// Number of reports in the collection
    pub fn len(&self) -> usize {
        self.reports.read().len()
    }

    /// Whether the collection is empty
    pub fn is_empty(&self) -> bool {
        self.reports.read().is_empty()
    }

    /// Insert a report (idempotent upsert by report_id)
    pub fn insert(&self, report: IssueReport) -> AppResult<()> {
        let mut reports = self.reports.write();
        let mut working = reports.clone();
        upsert(&mut working, report);
        self.store
            .save_history(&working)
            .map_err(|e| AppError::Storage(e.to_string()))?;
        *reports = working;
        Ok(())
    }

    /// Insert a report and persist it together with the given pending
    /// collection in a single transaction (promotion commit).
    pub fn insert_with_pending(
        &self,
        report: IssueReport,
        pending: &[PendingReport],
    ) -> AppResult<()> {
        let mut reports = self.reports.write();
        let mut working = reports.clone();
        upsert(&mut working, report);
        self.store
            .save_pending_and_history(pending, &working)
            .map_err(|e| AppError::Storage(e.to_string()))?;
        *reports = working;
        Ok(())
    }

    /// Change a report's status in place.
    ///
    /// Position in the list is preserved. A matching status is a no-op
    /// (nothing is persisted); an unknown id is `NotFound`.
    pub fn update_status(&self, report_id: &str, status: ReportStatus) -> AppResult<()> {
        let mut reports = self.reports.write();
        let index = reports
            .iter()
            .position(|r| r.report_id() == report_id)
            .ok_or_else(|| AppError::not_found(format!("report {report_id}")))?;

        if reports[index].status == status {
            return Ok(());
        }

        let mut working = reports.clone();
        working[index].status = status;
        self.store
            .save_history(&working)
            .map_err(|e| AppError::Storage(e.to_string()))?;
        *reports = working;
        Ok(())
    }

    /// Install a remote fetch result as the new collection
    pub fn replace_all(&self, remote: Vec<IssueReport>) -> AppResult<()> {
        let mut reports = self.reports.write();
        self.store
            .save_history(&remote)
            .map_err(|e| AppError::Storage(e.to_string()))?;
        *reports = remote;
        Ok(())
    }

    /// Drop the in-memory collection only. For callers that have already
    /// cleared the persisted blobs in one transaction.
    pub(crate) fn reset(&self) {
        self.reports.write().clear();
    }

    /// Drop every report, locally and in the persisted mirror
    pub fn clear(&self) -> AppResult<()> {
        let mut reports = self.reports.write();
        self.store
            .save_history(&[])
            .map_err(|e| AppError::Storage(e.to_string()))?;
        reports.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{Classification, Priority, ReportMetadata};

    fn report(id: &str) -> IssueReport {
        let classification = Classification {
            report_id: id.to_string(),
            primary_category: "Pothole".to_string(),
            secondary_category: None,
            detected_objects: vec![],
            severity_score: 0.5,
            priority: Priority::Medium,
            confidence: 0.8,
            suggested_department: vec![],
            contact_details: None,
            dispatch_recommendation: None,
            estimated_time_to_fix: None,
            sla_tier: None,
            human_summary: None,
            clarifying_questions: vec![],
            emergency: false,
            metadata: ReportMetadata::default(),
        };
        IssueReport::from_classification(classification, None, None, false)
    }

    fn history() -> ReportHistory {
        ReportHistory::open(LocalStore::open_in_memory().unwrap()).unwrap()
    }

    #[test]
    fn inserts_are_most_recent_first() {
        let history = history();
        history.insert(report("RA")).unwrap();
        history.insert(report("RB")).unwrap();

        let list = history.list();
        let ids: Vec<&str> = list.iter().map(|r| r.report_id()).collect();
        assert_eq!(ids, vec!["RB", "RA"]);
    }

    #[test]
    fn same_id_replaces_in_place() {
        let history = history();
        history.insert(report("RA")).unwrap();
        history.insert(report("RB")).unwrap();

        let mut updated = report("RA");
        updated.classification.primary_category = "Burst pipe".to_string();
        history.insert(updated).unwrap();

        let list = history.list();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].report_id(), "RB");
        assert_eq!(list[1].classification.primary_category, "Burst pipe");
    }

    #[test]
    fn status_update_is_idempotent() {
        let history = history();
        history.insert(report("RA")).unwrap();

        history
            .update_status("RA", ReportStatus::InProgress)
            .unwrap();
        history
            .update_status("RA", ReportStatus::InProgress)
            .unwrap();

        assert_eq!(history.list()[0].status, ReportStatus::InProgress);
    }

    #[test]
    fn status_update_preserves_position() {
        let history = history();
        history.insert(report("RA")).unwrap();
        history.insert(report("RB")).unwrap();

        history.update_status("RA", ReportStatus::Resolved).unwrap();

        let list = history.list();
        assert_eq!(list[1].report_id(), "RA");
        assert_eq!(list[1].status, ReportStatus::Resolved);
    }

    #[test]
    fn unknown_id_is_not_found() {
        let history = history();
        let err = history
            .update_status("R?", ReportStatus::Resolved)
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn hydrates_from_persisted_snapshot() {
        let store = LocalStore::open_in_memory().unwrap();
        {
            let history = ReportHistory::open(store.clone()).unwrap();
            history.insert(report("RA")).unwrap();
        }
        let reopened = ReportHistory::open(store).unwrap();
        assert_eq!(reopened.len(), 1);
    }
}
