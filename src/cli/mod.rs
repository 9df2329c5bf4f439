use crate::config::{Config, LLMProvider};
use crate::generator::workflow::Action;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// 默认配置文件名，位于当前工作目录
pub const DEFAULT_CONFIG_FILE: &str = "kpi-analyzer.toml";

/// KPI Workflow Analyzer - 基于LLM的业务工作流分析报告生成工具
#[derive(Parser, Debug)]
#[command(name = "kpi-analyzer")]
#[command(
    about = "Inspects business workflows from a catalog, flags structural gaps, and generates AI workflow analysis reports exported as PDF and text."
)]
#[command(version)]
pub struct Args {
    /// 配置文件路径
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// 工作流目录文件路径
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// 输出路径
    #[arg(short, long, global = true)]
    pub output_path: Option<PathBuf>,

    /// 是否启用详细日志
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// LLM Provider (openai, deepseek, anthropic, ollama)
    #[arg(long, global = true)]
    pub llm_provider: Option<String>,

    /// 模型名称
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// LLM API基地址
    #[arg(long, global = true)]
    pub llm_api_base_url: Option<String>,

    /// LLM API KEY
    #[arg(long, global = true)]
    pub llm_api_key: Option<String>,

    /// 最大tokens数
    #[arg(long, global = true)]
    pub max_tokens: Option<u32>,

    /// 温度参数
    #[arg(long, global = true)]
    pub temperature: Option<f64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// 列出目录中的工作流
    List,
    /// 展示工作流指标、质量评估与相关组件
    Show {
        /// 工作流名称，默认使用目录中的第一个
        workflow: Option<String>,
    },
    /// 生成分析报告并导出PDF与TXT
    Generate {
        /// 工作流名称，默认使用目录中的第一个
        workflow: Option<String>,

        /// 分析需求
        #[arg(short, long, conflicts_with = "requirements_file")]
        requirements: Option<String>,

        /// 从文件读取分析需求
        #[arg(long)]
        requirements_file: Option<PathBuf>,
    },
    /// 交互式会话
    Shell,
}

impl Args {
    /// 加载配置文件并应用命令行覆盖
    pub fn to_config(&self) -> Result<Config> {
        let mut config = if let Some(config_path) = &self.config {
            // 显式指定的配置文件必须可读
            Config::from_file(config_path)
                .context(format!("无法读取配置文件 {:?}", config_path))?
        } else {
            let default_config_path = std::env::current_dir()
                .unwrap_or_else(|_| PathBuf::from("."))
                .join(DEFAULT_CONFIG_FILE);

            if default_config_path.exists() {
                Config::from_file(&default_config_path)
                    .context(format!("无法读取默认配置文件 {:?}", default_config_path))?
            } else {
                Config::default()
            }
        };

        if let Some(catalog) = &self.catalog {
            config.catalog_path = catalog.clone();
        }
        if let Some(output_path) = &self.output_path {
            config.output_path = output_path.clone();
        }

        // 覆盖LLM配置
        if let Some(provider_str) = &self.llm_provider {
            if let Ok(provider) = provider_str.parse::<LLMProvider>() {
                config.llm.provider = provider;
            } else {
                eprintln!(
                    "⚠️ 警告: 未知的provider: {}，使用默认provider",
                    provider_str
                );
            }
        }
        if let Some(model) = &self.model {
            config.llm.model = model.clone();
        }
        if let Some(llm_api_base_url) = &self.llm_api_base_url {
            config.llm.api_base_url = llm_api_base_url.clone();
        }
        if let Some(llm_api_key) = &self.llm_api_key {
            config.llm.api_key = llm_api_key.clone();
        }
        if let Some(max_tokens) = self.max_tokens {
            config.llm.max_tokens = max_tokens;
        }
        if let Some(temperature) = self.temperature {
            config.llm.temperature = temperature;
        }

        config.verbose = config.verbose || self.verbose;

        Ok(config)
    }

    /// 将子命令转换为工作流动作，需要时读取需求文件
    pub fn to_action(&self) -> Result<Action> {
        let action = match &self.command {
            Command::List => Action::List,
            Command::Show { workflow } => Action::Show {
                workflow: workflow.clone(),
            },
            Command::Generate {
                workflow,
                requirements,
                requirements_file,
            } => {
                let requirements = match (requirements, requirements_file) {
                    (Some(text), _) => text.clone(),
                    (None, Some(path)) => std::fs::read_to_string(path)
                        .context(format!("无法读取需求文件 {:?}", path))?,
                    (None, None) => String::new(),
                };
                Action::Generate {
                    workflow: workflow.clone(),
                    requirements,
                }
            }
            Command::Shell => Action::Shell,
        };
        Ok(action)
    }
}

// Include tests
#[cfg(test)]
mod tests;
