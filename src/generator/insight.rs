//! 工作流概览：指标、步骤图与相关组件

use std::collections::BTreeMap;

use crate::types::WorkflowRecord;

/// 选中工作流的基本指标
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowMetrics {
    pub steps: usize,
    pub business_rules: usize,
    pub dependencies: usize,
    pub actors: String,
    pub expected_outcome: String,
}

impl WorkflowMetrics {
    pub fn of(record: &WorkflowRecord) -> Self {
        Self {
            steps: record.steps.len(),
            business_rules: record.business_rules.len(),
            dependencies: record.dependencies.len(),
            actors: record.actors.join(", "),
            expected_outcome: record.expected_outcome.clone(),
        }
    }
}

/// 步骤图的一根横条
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartBar {
    pub label: String,
    pub value: u32,
}

/// 工作流步骤横向条形图数据
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepChart {
    pub title: &'static str,
    pub x_label: &'static str,
    pub bars: Vec<ChartBar>,
}

impl StepChart {
    /// 没有步骤时不生成图表
    pub fn of(record: &WorkflowRecord) -> Option<Self> {
        if record.steps.is_empty() {
            return None;
        }
        let bars = record
            .steps
            .iter()
            .map(|step| ChartBar {
                label: step.action.clone(),
                value: step.step_number,
            })
            .collect();
        Some(Self {
            title: "Workflow Step Visualization",
            x_label: "Step Sequence",
            bars,
        })
    }

    /// 以文本横条绘制，`width` 为最长横条的字符数
    pub fn render_text(&self, width: usize) -> String {
        let max_value = self.bars.iter().map(|b| b.value).max().unwrap_or(0).max(1);
        let label_width = self
            .bars
            .iter()
            .map(|b| b.label.chars().count())
            .max()
            .unwrap_or(0);

        let mut out = format!("{}\n", self.title);
        for bar in &self.bars {
            let length = (bar.value as usize * width).div_ceil(max_value as usize);
            out.push_str(&format!(
                "{:>label_width$} | {} {}\n",
                bar.label,
                "█".repeat(length),
                bar.value,
            ));
        }
        out.push_str(&format!("{:>label_width$}   {}\n", "", self.x_label));
        out
    }
}

pub const NO_RELATED_COMPONENTS: &str = "No related components";

/// 工作流名称到相关组件的可注入映射
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelatedItems {
    mapping: BTreeMap<String, Vec<String>>,
}

impl RelatedItems {
    pub fn new(mapping: BTreeMap<String, Vec<String>>) -> Self {
        Self { mapping }
    }

    pub fn lookup(&self, workflow_name: &str) -> Vec<String> {
        match self.mapping.get(workflow_name) {
            Some(items) if !items.is_empty() => items.clone(),
            _ => vec![NO_RELATED_COMPONENTS.to_string()],
        }
    }
}
