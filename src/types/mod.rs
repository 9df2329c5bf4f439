pub mod report;
pub mod workflow;

pub use report::GeneratedReport;
pub use workflow::{GenerationRequest, WorkflowRecord, WorkflowStep};
