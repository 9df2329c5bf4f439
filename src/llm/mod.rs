//! 文本生成后端

use anyhow::Result;
use async_trait::async_trait;

pub mod client;

pub use client::LLMClient;

/// 文本生成后端的统一抽象，报告生成器只依赖该接口
#[async_trait]
pub trait TextBackend: Send + Sync {
    /// 以系统指令和用户内容发起一次完整的生成，返回生成的文本
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String>;
}
