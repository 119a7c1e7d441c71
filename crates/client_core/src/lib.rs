//! Employee directory client core: the remote API seam, the per-view list
//! state, and the add/edit/delete workflow.

pub mod api;
pub mod error;
pub mod fetcher;
pub mod roster;
pub mod workflow;

pub use api::{EmployeeApi, HttpEmployeeApi, DEFAULT_REQUEST_TIMEOUT};
pub use error::{ApiError, ApiResult};
pub use fetcher::{fetch_employees, FetchState};
pub use roster::EmployeeRoster;
pub use workflow::{
    DeleteFlow, DeletePhase, EditorFlow, EditorPhase, EditorTarget, MutationKind,
    MutationOutcome, MutationRequest, Notice, NoticeKind, SubmissionId, SubmitRejection,
};
