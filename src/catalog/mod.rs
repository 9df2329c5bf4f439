//! 工作流目录 - 加载并按名称索引工作流记录

use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::types::WorkflowRecord;

/// 目录加载失败的原因
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LoadError {
    #[error("failed to read workflow catalog {path:?}: {reason}")]
    Unreadable { path: PathBuf, reason: String },

    #[error("malformed workflow catalog: {reason}")]
    Malformed { reason: String },

    #[error("workflow catalog has no top-level `workflows` key")]
    MissingRoot,

    #[error("duplicate workflow name in catalog: {name}")]
    DuplicateName { name: String },
}

/// 选中的工作流不在目录中
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("selected workflow not found: {name}")]
pub struct NotFound {
    pub name: String,
}

#[derive(Deserialize)]
struct CatalogDocument {
    workflows: Option<Vec<WorkflowRecord>>,
}

/// 只读的工作流目录，加载后在会话间共享
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkflowCatalog {
    workflows: Vec<WorkflowRecord>,
}

impl WorkflowCatalog {
    pub fn new(workflows: Vec<WorkflowRecord>) -> Result<Self, LoadError> {
        let mut seen = HashSet::new();
        for workflow in &workflows {
            if !seen.insert(workflow.name.as_str()) {
                return Err(LoadError::DuplicateName {
                    name: workflow.name.clone(),
                });
            }
        }
        Ok(Self { workflows })
    }

    /// 从文件加载目录
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| LoadError::Unreadable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_json_str(&content)
    }

    /// 加载失败时记录错误并返回空目录，调用方需处理空目录
    pub fn load_or_empty(path: &Path) -> Self {
        match Self::load(path) {
            Ok(catalog) => {
                tracing::info!(
                    path = %path.display(),
                    workflows = catalog.len(),
                    "workflow catalog loaded"
                );
                catalog
            }
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "workflow loading error");
                Self::default()
            }
        }
    }

    pub fn from_json_str(content: &str) -> Result<Self, LoadError> {
        let document: CatalogDocument =
            serde_json::from_str(content).map_err(|e| LoadError::Malformed {
                reason: e.to_string(),
            })?;
        let workflows = document.workflows.ok_or(LoadError::MissingRoot)?;
        Self::new(workflows)
    }

    /// 按名称精确查找
    pub fn lookup(&self, name: &str) -> Result<&WorkflowRecord, NotFound> {
        self.iter()
            .find(|workflow| workflow.name == name)
            .ok_or_else(|| NotFound {
                name: name.to_string(),
            })
    }

    pub fn names(&self) -> Vec<&str> {
        self.iter().map(|w| w.name.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WorkflowRecord> {
        self.workflows.iter()
    }

    pub fn first(&self) -> Option<&WorkflowRecord> {
        self.workflows.first()
    }

    pub fn len(&self) -> usize {
        self.workflows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workflows.is_empty()
    }
}
