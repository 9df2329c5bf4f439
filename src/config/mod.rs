use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// 读取API KEY的环境变量
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// LLM Provider类型
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub enum LLMProvider {
    #[serde(rename = "openai")]
    #[default]
    OpenAI,
    #[serde(rename = "deepseek")]
    DeepSeek,
    #[serde(rename = "anthropic")]
    Anthropic,
    #[serde(rename = "ollama")]
    Ollama,
}

impl LLMProvider {
    /// 该provider是否需要API KEY
    pub fn requires_api_key(&self) -> bool {
        !matches!(self, LLMProvider::Ollama)
    }

    /// provider的默认API基地址
    pub fn default_base_url(&self) -> &'static str {
        match self {
            LLMProvider::OpenAI => "https://api.openai.com/v1",
            LLMProvider::DeepSeek => "https://api.deepseek.com",
            LLMProvider::Anthropic => "https://api.anthropic.com",
            LLMProvider::Ollama => "http://localhost:11434",
        }
    }
}

impl std::fmt::Display for LLMProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LLMProvider::OpenAI => write!(f, "openai"),
            LLMProvider::DeepSeek => write!(f, "deepseek"),
            LLMProvider::Anthropic => write!(f, "anthropic"),
            LLMProvider::Ollama => write!(f, "ollama"),
        }
    }
}

impl std::str::FromStr for LLMProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(LLMProvider::OpenAI),
            "deepseek" => Ok(LLMProvider::DeepSeek),
            "anthropic" => Ok(LLMProvider::Anthropic),
            "ollama" => Ok(LLMProvider::Ollama),
            _ => Err(format!("Unknown provider: {}", s)),
        }
    }
}

/// 用户需求超长时的处理策略
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverflowPolicy {
    /// 截断到上限
    #[serde(rename = "truncate")]
    #[default]
    Truncate,
    /// 直接拒绝本次生成
    #[serde(rename = "reject")]
    Reject,
}

impl std::str::FromStr for OverflowPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "truncate" => Ok(OverflowPolicy::Truncate),
            "reject" => Ok(OverflowPolicy::Reject),
            _ => Err(format!("Unknown overflow policy: {}", s)),
        }
    }
}

/// 缺少模型服务凭证，启动阶段即终止
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error(
    "API key missing for provider {provider}: set `llm.api_key`, the {env} environment variable, or add {env} to {secrets_path:?}"
)]
pub struct MissingCredentials {
    pub provider: String,
    pub env: &'static str,
    pub secrets_path: PathBuf,
}

/// 应用程序配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct Config {
    /// 领域名称，用于报告标题和提示词
    pub domain_name: String,

    /// 静态的企业/平台上下文
    pub corporate_context: String,

    /// 工作流目录文件路径
    pub catalog_path: PathBuf,

    /// 输出路径
    pub output_path: PathBuf,

    /// 导出文件的基础文件名（不含扩展名）
    pub export_base_name: String,

    /// 用户需求的最大字符数
    pub max_requirements_chars: usize,

    /// 用户需求超长时的处理策略
    pub requirements_overflow: OverflowPolicy,

    /// 工作流名称到相关组件的映射
    pub related_items: BTreeMap<String, Vec<String>>,

    /// LLM模型配置
    pub llm: LLMConfig,

    /// 是否启用详细日志
    pub verbose: bool,
}

/// LLM模型配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct LLMConfig {
    /// LLM Provider类型
    pub provider: LLMProvider,

    /// LLM API KEY，为空时从环境变量或secrets文件读取
    pub api_key: String,

    /// LLM API基地址，为空时使用provider的默认地址
    pub api_base_url: String,

    /// 报告生成使用的模型
    pub model: String,

    /// 最大tokens
    pub max_tokens: u32,

    /// 温度
    pub temperature: f64,

    /// 尝试次数，1表示不重试
    pub retry_attempts: u32,

    /// 重试间隔（毫秒）
    pub retry_delay_ms: u64,

    /// 单次调用超时时间（秒）
    pub timeout_seconds: u64,

    /// secrets文件路径
    pub secrets_path: PathBuf,
}

impl Config {
    /// 从文件加载配置
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let mut file =
            File::open(path).context(format!("Failed to open config file: {:?}", path))?;
        let mut content = String::new();
        file.read_to_string(&mut content)
            .context("Failed to read config file")?;

        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }

    /// 报告标题
    pub fn report_title(&self) -> String {
        format!("{} Workflow Analysis Report", self.domain_name)
    }

    /// 导出的PDF与TXT文件名
    pub fn export_file_names(&self) -> (String, String) {
        (
            format!("{}.pdf", self.export_base_name),
            format!("{}.txt", self.export_base_name),
        )
    }
}

impl LLMConfig {
    /// 实际使用的API基地址
    pub fn base_url(&self) -> &str {
        let configured = self.api_base_url.trim();
        if configured.is_empty() {
            self.provider.default_base_url()
        } else {
            configured
        }
    }

    /// 解析API KEY：配置 > 环境变量 > secrets文件
    pub fn resolve_api_key(&self) -> Result<String, MissingCredentials> {
        self.resolve_api_key_with(std::env::var(API_KEY_ENV).ok())
    }

    pub(crate) fn resolve_api_key_with(
        &self,
        env_value: Option<String>,
    ) -> Result<String, MissingCredentials> {
        if !self.api_key.trim().is_empty() {
            return Ok(self.api_key.clone());
        }

        if let Some(key) = env_value
            && !key.trim().is_empty()
        {
            return Ok(key);
        }

        if let Some(key) = read_secret(&self.secrets_path, API_KEY_ENV) {
            return Ok(key);
        }

        if !self.provider.requires_api_key() {
            return Ok(String::new());
        }

        Err(MissingCredentials {
            provider: self.provider.to_string(),
            env: API_KEY_ENV,
            secrets_path: self.secrets_path.clone(),
        })
    }
}

/// 从toml格式的secrets文件读取指定键
fn read_secret(path: &Path, key: &str) -> Option<String> {
    let content = std::fs::read_to_string(path).ok()?;
    let table: toml::Table = match toml::from_str(&content) {
        Ok(table) => table,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to parse secrets file");
            return None;
        }
    };
    table
        .get(key)
        .and_then(|value| value.as_str())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

pub const DEFAULT_CORPORATE_CONTEXT: &str = "KPIonthefly.com AI Analytics Platform
- Advanced dashboard creation tools
- Integrated AI/ML insights generation
- Third-party service integrations
- Enterprise-grade security protocols
- Real-time data visualization
- Compliance with GDPR and CCPA";

fn default_related_items() -> BTreeMap<String, Vec<String>> {
    BTreeMap::from([
        (
            "Dashboard Creation".to_string(),
            vec!["AI Model v2.1".to_string(), "Visualizer 3.4".to_string()],
        ),
        (
            "AI Insights Generation".to_string(),
            vec!["Data Engine 5.0".to_string(), "Analytics SDK".to_string()],
        ),
        (
            "Third-Party Integrations".to_string(),
            vec!["API Gateway 2.3".to_string()],
        ),
    ])
}

impl Default for Config {
    fn default() -> Self {
        Self {
            domain_name: String::from("KPI on the Fly"),
            corporate_context: DEFAULT_CORPORATE_CONTEXT.to_string(),
            catalog_path: PathBuf::from("KPI_Workflows.txt"),
            output_path: PathBuf::from("./kpi.reports"),
            export_base_name: String::from("KPI_analysis"),
            max_requirements_chars: 4000,
            requirements_overflow: OverflowPolicy::default(),
            related_items: default_related_items(),
            llm: LLMConfig::default(),
            verbose: false,
        }
    }
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            provider: LLMProvider::default(),
            api_key: String::new(),
            api_base_url: String::new(),
            model: String::from("gpt-4"),
            max_tokens: 4096,
            temperature: 0.3,
            retry_attempts: 1,
            retry_delay_ms: 2000,
            timeout_seconds: 120,
            secrets_path: PathBuf::from(".streamlit/secrets.toml"),
        }
    }
}
