//! 工作流结构质量评估，纯函数，不做任何IO

use crate::types::WorkflowRecord;

/// 评估结果附带的固定建议
pub const ADVISORY_NOTE: &str = "Recommendation: Verify AI model integration points";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
}

impl Severity {
    pub fn marker(&self) -> &'static str {
        match self {
            Severity::Warning => "⚠️",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub severity: Severity,
    pub message: &'static str,
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.severity.marker(), self.message)
    }
}

/// 单条质量规则：`violated` 返回true时产生对应的发现
pub struct QualityRule {
    pub finding: &'static str,
    pub severity: Severity,
    pub violated: fn(&WorkflowRecord) -> bool,
}

/// 内置规则表，新增规则只需追加一行
pub const RULES: &[QualityRule] = &[
    QualityRule {
        finding: "missing workflow steps",
        severity: Severity::Warning,
        violated: |record| record.steps.is_empty(),
    },
    QualityRule {
        finding: "no business rules defined",
        severity: Severity::Warning,
        violated: |record| record.business_rules.is_empty(),
    },
    QualityRule {
        finding: "missing system dependencies",
        severity: Severity::Warning,
        violated: |record| record.dependencies.is_empty(),
    },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssessmentResult {
    pub findings: Vec<Finding>,
    pub advisory: &'static str,
}

impl AssessmentResult {
    /// 所有规则均通过
    pub fn is_validated(&self) -> bool {
        self.findings.is_empty()
    }

    /// 带严重级别标记的发现列表
    pub fn lines(&self) -> Vec<String> {
        self.findings.iter().map(|f| f.to_string()).collect()
    }
}

/// 使用内置规则表评估工作流
pub fn assess(record: &WorkflowRecord) -> AssessmentResult {
    assess_with(record, RULES)
}

/// 使用给定规则表评估工作流，每条规则独立求值
pub fn assess_with(record: &WorkflowRecord, rules: &[QualityRule]) -> AssessmentResult {
    let findings = rules
        .iter()
        .filter(|rule| (rule.violated)(record))
        .map(|rule| Finding {
            severity: rule.severity,
            message: rule.finding,
        })
        .collect();

    AssessmentResult {
        findings,
        advisory: ADVISORY_NOTE,
    }
}
