pub mod error;
pub mod interval;
pub mod planner;
pub mod queue;
pub mod service;

pub use error::{RepositoryError, SchedulerError};
pub use interval::apply_review;
pub use planner::{build_session, ItemKind, PlannedItem, SessionPlan};
pub use queue::due_items;
pub use service::{NextReviewInfo, SchedulerService, SchedulingRepository};
