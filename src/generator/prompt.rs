//! 提示词组装 - 将静态上下文、工作流记录与用户需求合并为单个有界文档

use thiserror::Error;

use crate::config::{Config, OverflowPolicy};
use crate::types::GenerationRequest;
use crate::utils::token_estimator::TokenEstimator;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PromptError {
    #[error("user requirements too long: {length} characters (limit {limit})")]
    RequirementsTooLong { length: usize, limit: usize },

    #[error("failed to serialize workflow record: {0}")]
    Serialize(String),
}

/// 组装完成的提示词
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptDocument {
    pub content: String,
    /// 用户需求是否被截断
    pub truncated: bool,
}

/// 上下文组装器，相同输入总是产生逐字节相同的输出
#[derive(Debug, Clone)]
pub struct ContextAssembler {
    domain_name: String,
    static_context: String,
    max_requirements_chars: usize,
    overflow: OverflowPolicy,
}

impl ContextAssembler {
    pub fn new(
        domain_name: impl Into<String>,
        static_context: impl Into<String>,
        max_requirements_chars: usize,
        overflow: OverflowPolicy,
    ) -> Self {
        Self {
            domain_name: domain_name.into(),
            static_context: static_context.into(),
            max_requirements_chars,
            overflow,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.domain_name.clone(),
            config.corporate_context.clone(),
            config.max_requirements_chars,
            config.requirements_overflow,
        )
    }

    pub fn assemble(&self, request: GenerationRequest<'_>) -> Result<PromptDocument, PromptError> {
        let (requirements, truncated) = self.bound_requirements(request.user_requirements)?;

        let workflow_details = serde_json::to_string_pretty(request.workflow)
            .map_err(|e| PromptError::Serialize(e.to_string()))?;

        let mut content = String::new();
        content.push_str(&format!(
            "## {} Workflow Analysis Context\n",
            self.domain_name
        ));
        content.push_str(self.static_context.trim());
        content.push_str("\n\n## Workflow Details\n");
        content.push_str(&workflow_details);
        content.push_str("\n\n## User Requirements\n");
        content.push_str(requirements);
        content.push('\n');

        let estimation = TokenEstimator::new().estimate_tokens(&content);
        tracing::debug!(
            workflow = %request.workflow.name,
            characters = estimation.character_count,
            estimated_tokens = estimation.estimated_tokens,
            truncated,
            "prompt assembled"
        );

        Ok(PromptDocument { content, truncated })
    }

    /// 按字符数限制用户需求，截断时保证落在字符边界上
    fn bound_requirements<'a>(&self, requirements: &'a str) -> Result<(&'a str, bool), PromptError> {
        let length = requirements.chars().count();
        if length <= self.max_requirements_chars {
            return Ok((requirements, false));
        }

        match self.overflow {
            OverflowPolicy::Reject => Err(PromptError::RequirementsTooLong {
                length,
                limit: self.max_requirements_chars,
            }),
            OverflowPolicy::Truncate => {
                let cut = requirements
                    .char_indices()
                    .nth(self.max_requirements_chars)
                    .map(|(index, _)| index)
                    .unwrap_or(requirements.len());
                tracing::warn!(
                    length,
                    limit = self.max_requirements_chars,
                    "user requirements truncated"
                );
                Ok((&requirements[..cut], true))
            }
        }
    }
}
