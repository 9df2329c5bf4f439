//! 会话状态与事件分发，状态只在会话内部流转

use crate::types::GeneratedReport;

/// 单个操作员会话的可变状态
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub selected_workflow: Option<String>,
    pub user_requirements: String,
    pub generated_report: Option<GeneratedReport>,
    pub show_analysis: bool,
    /// 最近一次失败的提示信息
    pub last_error: Option<String>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            selected_workflow: None,
            user_requirements: String::new(),
            generated_report: None,
            show_analysis: true,
            last_error: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    SelectWorkflow(String),
    UpdateRequirements(String),
    ReportGenerated(GeneratedReport),
    GenerationFailed(String),
    ToggleAnalysis,
}

/// 纯函数：(当前状态, 事件) -> 新状态
pub fn dispatch(mut state: Session, event: SessionEvent) -> Session {
    match event {
        SessionEvent::SelectWorkflow(name) => {
            state.selected_workflow = Some(name);
            state.last_error = None;
        }
        SessionEvent::UpdateRequirements(text) => {
            state.user_requirements = text;
        }
        SessionEvent::ReportGenerated(report) => {
            state.generated_report = Some(report);
            state.last_error = None;
        }
        SessionEvent::GenerationFailed(message) => {
            state.last_error = Some(message);
        }
        SessionEvent::ToggleAnalysis => {
            state.show_analysis = !state.show_analysis;
        }
    }
    state
}
