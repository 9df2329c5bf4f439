use std::sync::Arc;

use anyhow::Result;

use crate::catalog::WorkflowCatalog;
use crate::config::Config;
use crate::generator::insight::RelatedItems;
use crate::generator::outlet::{DiskOutlet, DocumentRenderer};
use crate::generator::prompt::ContextAssembler;
use crate::llm::{LLMClient, TextBackend};

/// 生成流程的共享上下文：目录只读共享，后端可替换
#[derive(Clone)]
pub struct GeneratorContext {
    /// 配置
    pub config: Config,
    /// 只读的工作流目录
    pub catalog: Arc<WorkflowCatalog>,
    /// 文本生成后端
    pub backend: Arc<dyn TextBackend>,
}

impl GeneratorContext {
    /// 创建使用LLM后端的上下文，缺少凭证时返回错误
    pub fn new(config: Config, catalog: Arc<WorkflowCatalog>) -> Result<Self> {
        let llm_client = LLMClient::new(config.llm.clone())?;
        Ok(Self::with_backend(config, catalog, Arc::new(llm_client)))
    }

    pub fn with_backend(
        config: Config,
        catalog: Arc<WorkflowCatalog>,
        backend: Arc<dyn TextBackend>,
    ) -> Self {
        Self {
            config,
            catalog,
            backend,
        }
    }

    pub fn assembler(&self) -> ContextAssembler {
        ContextAssembler::from_config(&self.config)
    }

    pub fn renderer(&self) -> DocumentRenderer {
        DocumentRenderer::from_config(&self.config)
    }

    pub fn outlet(&self) -> DiskOutlet {
        DiskOutlet::from_config(&self.config)
    }

    pub fn related_items(&self) -> RelatedItems {
        RelatedItems::new(self.config.related_items.clone())
    }
}
