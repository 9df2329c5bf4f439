pub mod assessment;
pub mod context;
pub mod insight;
pub mod outlet;
pub mod prompt;
pub mod report;
pub mod session;
pub mod workflow;
