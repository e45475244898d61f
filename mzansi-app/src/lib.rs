//! MzansiFix reporting core
//!
//! Client-side orchestration for municipal issue reporting: capture a
//! photo, classify it (online) or queue it (offline), keep the submitted
//! history, and route each report to the responsible Johannesburg
//! department.
//!
//! # Components
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | `core` | Configuration and the wired-up [`AppContext`] |
//! | `storage` | redb local persistence adapter |
//! | `connectivity` | Event-fed online/offline state |
//! | `queue` | Offline queue and promotion |
//! | `history` | Submitted-report collection |
//! | `lifecycle` | Submission flow controller |
//! | `routing` | Department matcher and contact directory |

pub mod connectivity;
pub mod core;
mod errors;
pub mod history;
pub mod lifecycle;
pub mod queue;
pub mod routing;
pub mod storage;
pub mod utils;

pub use connectivity::ConnectivityMonitor;
pub use core::config::{AppConfig, LocationRequest};
pub use core::context::AppContext;
pub use history::ReportHistory;
pub use lifecycle::{Phase, ReportController, SubmitOutcome};
pub use queue::OfflineQueue;
pub use routing::{department_contacts, match_department};
pub use storage::{LocalStore, StorageError};
pub use utils::logger::init_logger;
