use serde::{Deserialize, Serialize};

/// 工作流中的单个步骤
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowStep {
    /// 步骤序号，从1开始
    pub step_number: u32,
    /// 步骤动作描述
    pub action: String,
}

/// 业务流程工作流记录，catalog 加载后不可变
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowRecord {
    /// 工作流名称，在catalog内唯一
    pub name: String,

    /// 有序的步骤列表
    #[serde(default)]
    pub steps: Vec<WorkflowStep>,

    /// 业务规则
    #[serde(default)]
    pub business_rules: Vec<String>,

    /// 系统依赖
    #[serde(default)]
    pub dependencies: Vec<String>,

    /// 参与者
    #[serde(default)]
    pub actors: Vec<String>,

    /// 预期结果
    #[serde(default)]
    pub expected_outcome: String,
}

impl WorkflowRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            steps: Vec::new(),
            business_rules: Vec::new(),
            dependencies: Vec::new(),
            actors: Vec::new(),
            expected_outcome: String::new(),
        }
    }
}

/// 一次报告生成请求，只在单次生成过程中存在
#[derive(Debug, Clone, Copy)]
pub struct GenerationRequest<'a> {
    pub workflow: &'a WorkflowRecord,
    pub user_requirements: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_collections_default_to_empty() {
        let record: WorkflowRecord =
            serde_json::from_str(r#"{"name": "Bare Workflow"}"#).unwrap();

        assert_eq!(record.name, "Bare Workflow");
        assert!(record.steps.is_empty());
        assert!(record.business_rules.is_empty());
        assert!(record.dependencies.is_empty());
        assert!(record.actors.is_empty());
        assert!(record.expected_outcome.is_empty());
    }

    #[test]
    fn test_camel_case_fields() {
        let json = r#"{
            "name": "Dashboard Creation",
            "steps": [{"stepNumber": 1, "action": "collect"}],
            "businessRules": ["r1"],
            "dependencies": ["d1"],
            "actors": ["analyst"],
            "expectedOutcome": "dashboard live"
        }"#;
        let record: WorkflowRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.steps[0].step_number, 1);
        assert_eq!(record.steps[0].action, "collect");
        assert_eq!(record.business_rules, vec!["r1"]);
        assert_eq!(record.expected_outcome, "dashboard live");

        let value = serde_json::to_value(&record).unwrap();
        assert!(value.get("businessRules").is_some());
        assert!(value["steps"][0].get("stepNumber").is_some());
    }
}
