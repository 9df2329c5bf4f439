use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 模型生成的分析报告及其来源信息
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GeneratedReport {
    /// 报告对应的工作流名称
    pub workflow_name: String,
    /// 报告正文
    pub content: String,
    /// 生成时间
    pub generated_at: DateTime<Utc>,
}

impl GeneratedReport {
    pub fn new(workflow_name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            workflow_name: workflow_name.into(),
            content: content.into(),
            generated_at: Utc::now(),
        }
    }
}
