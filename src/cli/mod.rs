//! Command-line workflows shared by the binary and the integration tests.

pub mod orchestration;

pub use orchestration::{
    prepare_release, read_documents, run_release_workflow, run_status, Documents,
    PreparedRelease, Project, ReleaseWorkflowArgs, StatusSummary, WorkflowResult,
};
