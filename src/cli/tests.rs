#[cfg(test)]
mod tests {
    use crate::cli::{Args, Command};
    use crate::config::LLMProvider;
    use crate::generator::workflow::Action;
    use clap::Parser;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_args_list_defaults() {
        let args = Args::try_parse_from(["kpi-analyzer", "list"]).unwrap();

        assert_eq!(args.command, Command::List);
        assert!(args.config.is_none());
        assert!(args.catalog.is_none());
        assert!(args.output_path.is_none());
        assert!(!args.verbose);
    }

    #[test]
    fn test_args_require_subcommand() {
        assert!(Args::try_parse_from(["kpi-analyzer"]).is_err());
    }

    #[test]
    fn test_args_show_workflow() {
        let args = Args::try_parse_from(["kpi-analyzer", "show", "Dashboard Creation"]).unwrap();

        assert_eq!(
            args.command,
            Command::Show {
                workflow: Some("Dashboard Creation".to_string())
            }
        );
    }

    #[test]
    fn test_args_generate_with_global_options() {
        let args = Args::try_parse_from([
            "kpi-analyzer",
            "generate",
            "Dashboard Creation",
            "-r",
            "focus on latency",
            "-o",
            "/tmp/reports",
            "--catalog",
            "/data/KPI_Workflows.txt",
            "-v",
        ])
        .unwrap();

        assert_eq!(args.output_path, Some(PathBuf::from("/tmp/reports")));
        assert_eq!(args.catalog, Some(PathBuf::from("/data/KPI_Workflows.txt")));
        assert!(args.verbose);
        assert_eq!(
            args.to_action().unwrap(),
            Action::Generate {
                workflow: Some("Dashboard Creation".to_string()),
                requirements: "focus on latency".to_string(),
            }
        );
    }

    #[test]
    fn test_requirements_sources_conflict() {
        let result = Args::try_parse_from([
            "kpi-analyzer",
            "generate",
            "--requirements",
            "a",
            "--requirements-file",
            "b.txt",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_requirements_file_is_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("requirements.txt");
        std::fs::write(&path, "track weekly active users").unwrap();

        let args = Args::try_parse_from([
            "kpi-analyzer",
            "generate",
            "--requirements-file",
            path.to_str().unwrap(),
        ])
        .unwrap();

        assert_eq!(
            args.to_action().unwrap(),
            Action::Generate {
                workflow: None,
                requirements: "track weekly active users".to_string(),
            }
        );
    }

    #[test]
    fn test_missing_requirements_file_is_an_error() {
        let args = Args::try_parse_from([
            "kpi-analyzer",
            "generate",
            "--requirements-file",
            "/nonexistent/requirements.txt",
        ])
        .unwrap();

        assert!(args.to_action().is_err());
    }

    #[test]
    fn test_to_config_applies_overrides() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("kpi-analyzer.toml");
        std::fs::write(
            &config_path,
            r#"
domain_name = "Ops"

[llm]
model = "gpt-4o"
"#,
        )
        .unwrap();

        let args = Args::try_parse_from([
            "kpi-analyzer",
            "--config",
            config_path.to_str().unwrap(),
            "--llm-provider",
            "deepseek",
            "--llm-api-key",
            "sk-test",
            "--temperature",
            "0.5",
            "--max-tokens",
            "2048",
            "list",
        ])
        .unwrap();
        let config = args.to_config().unwrap();

        assert_eq!(config.domain_name, "Ops");
        assert_eq!(config.llm.model, "gpt-4o");
        assert_eq!(config.llm.provider, LLMProvider::DeepSeek);
        assert_eq!(config.llm.api_key, "sk-test");
        assert_eq!(config.llm.temperature, 0.5);
        assert_eq!(config.llm.max_tokens, 2048);
    }

    #[test]
    fn test_unknown_provider_keeps_default() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("empty.toml");
        std::fs::write(&config_path, "").unwrap();

        let args = Args::try_parse_from([
            "kpi-analyzer",
            "list",
            "--config",
            config_path.to_str().unwrap(),
            "--llm-provider",
            "mystery",
        ])
        .unwrap();

        assert_eq!(args.to_config().unwrap().llm.provider, LLMProvider::OpenAI);
    }

    #[test]
    fn test_explicit_missing_config_is_an_error() {
        let args = Args::try_parse_from([
            "kpi-analyzer",
            "list",
            "--config",
            "/nonexistent/kpi-analyzer.toml",
        ])
        .unwrap();

        assert!(args.to_config().is_err());
    }
}
