//! LLM客户端 - 基于rig的文本生成后端

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::future::Future;
use std::time::Duration;

use crate::config::LLMConfig;
use crate::llm::TextBackend;
use crate::utils::token_estimator::TokenEstimator;

mod providers;

use providers::ProviderClient;

/// LLM客户端 - 提供统一的LLM服务接口
#[derive(Clone)]
pub struct LLMClient {
    config: LLMConfig,
    client: ProviderClient,
}

impl LLMClient {
    /// 创建新的LLM客户端，缺少凭证时直接失败
    pub fn new(config: LLMConfig) -> Result<Self> {
        let api_key = config.resolve_api_key()?;
        let client = ProviderClient::new(&config, &api_key)?;
        Ok(Self { client, config })
    }

    /// 通用重试逻辑，每次尝试都受超时约束
    async fn retry_with_backoff<T, F, Fut>(&self, operation: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, anyhow::Error>>,
    {
        let max_attempts = self.config.retry_attempts.max(1);
        let retry_delay = Duration::from_millis(self.config.retry_delay_ms);
        let timeout = Duration::from_secs(self.config.timeout_seconds);
        let mut attempts = 0;

        loop {
            attempts += 1;
            let outcome = match tokio::time::timeout(timeout, operation()).await {
                Ok(result) => result,
                Err(_) => Err(anyhow!(
                    "model call timed out after {}s",
                    self.config.timeout_seconds
                )),
            };

            match outcome {
                Ok(result) => return Ok(result),
                Err(err) => {
                    if attempts >= max_attempts {
                        return Err(err);
                    }
                    tracing::warn!(
                        attempt = attempts,
                        max_attempts,
                        error = %err,
                        "model call failed, retrying"
                    );
                    tokio::time::sleep(retry_delay).await;
                }
            }
        }
    }
}

#[async_trait]
impl TextBackend for LLMClient {
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        let estimated = TokenEstimator::new().estimate_request(system_prompt, user_prompt);
        tracing::debug!(
            provider = %self.config.provider,
            model = %self.config.model,
            estimated_tokens = estimated,
            "calling model"
        );

        let agent = self.client.create_agent(&self.config.model, system_prompt, &self.config);
        self.retry_with_backoff(|| async { agent.prompt(user_prompt).await })
            .await
    }
}
