//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Lifecycle transitions
//! use status-guarded conditional updates so out-of-order transitions
//! surface as "no row affected" rather than silently applying.

pub mod change_request_repo;
pub mod comment_repo;
pub mod dashboard_repo;
pub mod milestone_repo;
pub mod notification_repo;
pub mod profile_repo;
pub mod project_repo;
pub mod project_request_repo;
pub mod search_repo;
pub mod session_repo;
pub mod update_repo;

pub use change_request_repo::ChangeRequestRepo;
pub use comment_repo::CommentRepo;
pub use dashboard_repo::DashboardRepo;
pub use milestone_repo::MilestoneRepo;
pub use notification_repo::NotificationRepo;
pub use profile_repo::ProfileRepo;
pub use project_repo::ProjectRepo;
pub use project_request_repo::ProjectRequestRepo;
pub use search_repo::SearchRepo;
pub use session_repo::SessionRepo;
pub use update_repo::UpdateRepo;
