//! 交互式会话：逐行读取命令，通过事件驱动会话状态

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};

use super::{generate_report, inspect, save};
use crate::generator::context::GeneratorContext;
use crate::generator::session::{self, Session, SessionEvent};

pub const HELP: &str = "Commands:
  list                 list workflows
  select <workflow>    select a workflow
  show                 show the selected workflow
  req <text>           set the requirements
  generate             generate a report for the selected workflow
  report               print the last generated report
  export               write the last report as PDF and TXT
  toggle               show or hide the quality analysis
  help                 show this help
  quit                 leave the shell";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    List,
    Select(String),
    Show,
    Requirements(String),
    Generate,
    Report,
    Export,
    Toggle,
    Help,
    Quit,
}

impl std::str::FromStr for ShellCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        match (verb.to_lowercase().as_str(), rest) {
            ("list", _) => Ok(ShellCommand::List),
            ("select", "") => Err("usage: select <workflow>".to_string()),
            ("select", name) => Ok(ShellCommand::Select(name.to_string())),
            ("show", _) => Ok(ShellCommand::Show),
            ("req", text) => Ok(ShellCommand::Requirements(text.to_string())),
            ("generate", _) => Ok(ShellCommand::Generate),
            ("report", _) => Ok(ShellCommand::Report),
            ("export", _) => Ok(ShellCommand::Export),
            ("toggle", _) => Ok(ShellCommand::Toggle),
            ("help", _) => Ok(ShellCommand::Help),
            ("quit" | "exit", _) => Ok(ShellCommand::Quit),
            (other, _) => Err(format!("unknown command: {}", other)),
        }
    }
}

/// 执行一条命令后的结果
#[derive(Debug, Clone, PartialEq)]
pub struct ShellOutcome {
    pub session: Session,
    pub output: String,
    pub quit: bool,
}

impl ShellOutcome {
    fn reply(session: Session, output: impl Into<String>) -> Self {
        Self {
            session,
            output: output.into(),
            quit: false,
        }
    }
}

/// 会话初始选中目录中的第一个工作流
pub fn initial_session(context: &GeneratorContext) -> Session {
    match context.catalog.first() {
        Some(record) => session::dispatch(
            Session::default(),
            SessionEvent::SelectWorkflow(record.name.clone()),
        ),
        None => Session::default(),
    }
}

pub async fn apply(
    context: &GeneratorContext,
    session: Session,
    command: ShellCommand,
) -> ShellOutcome {
    match command {
        ShellCommand::List => {
            let listing = context
                .catalog
                .names()
                .iter()
                .map(|name| {
                    if session.selected_workflow.as_deref() == Some(*name) {
                        format!("* {}", name)
                    } else {
                        format!("  {}", name)
                    }
                })
                .collect::<Vec<_>>()
                .join("\n");
            ShellOutcome::reply(session, listing)
        }
        ShellCommand::Select(name) => match context.catalog.lookup(&name) {
            Ok(_) => {
                let output = format!("✅ Selected {}", name);
                ShellOutcome::reply(
                    session::dispatch(session, SessionEvent::SelectWorkflow(name)),
                    output,
                )
            }
            Err(e) => ShellOutcome::reply(session, format!("🚨 {}", e)),
        },
        ShellCommand::Show => {
            let output = match &session.selected_workflow {
                Some(name) => match inspect(context, name) {
                    Ok(inspection) => inspection.render_text(session.show_analysis),
                    Err(e) => format!("🚨 {}", e),
                },
                None => "🚨 no workflow selected".to_string(),
            };
            ShellOutcome::reply(session, output)
        }
        ShellCommand::Requirements(text) => ShellOutcome::reply(
            session::dispatch(session, SessionEvent::UpdateRequirements(text)),
            "✅ Requirements updated",
        ),
        ShellCommand::Generate => {
            let session = generate_report(context, session).await;
            let output = match (&session.last_error, &session.generated_report) {
                (Some(message), _) => format!("🚨 {}", message),
                (None, Some(report)) => format!("📈 Analysis Report\n\n{}", report.content),
                (None, None) => String::new(),
            };
            ShellOutcome::reply(session, output)
        }
        ShellCommand::Report => {
            let output = match &session.generated_report {
                Some(report) => report.content.clone(),
                None => "No report generated yet".to_string(),
            };
            ShellOutcome::reply(session, output)
        }
        ShellCommand::Export => {
            let output = match &session.generated_report {
                Some(report) => match save(context, report).await {
                    Ok(files) => format!(
                        "💾 Exported {}\n💾 Exported {}",
                        files.pdf_path.display(),
                        files.text_path.display()
                    ),
                    Err(e) => format!("🚨 Export failed: {:#}", e),
                },
                None => "No report generated yet".to_string(),
            };
            ShellOutcome::reply(session, output)
        }
        ShellCommand::Toggle => {
            let session = session::dispatch(session, SessionEvent::ToggleAnalysis);
            let output = if session.show_analysis {
                "Quality analysis shown"
            } else {
                "Quality analysis hidden"
            };
            ShellOutcome::reply(session, output)
        }
        ShellCommand::Help => ShellOutcome::reply(session, HELP),
        ShellCommand::Quit => ShellOutcome {
            session,
            output: String::new(),
            quit: true,
        },
    }
}

/// 从标准输入读取命令直到 `quit` 或输入结束
pub async fn run(context: &GeneratorContext) -> Result<()> {
    println!("🚀 {} Workflow Analyzer", context.config.domain_name);
    println!("{}", HELP);

    let mut session = initial_session(context);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let command = match line.parse::<ShellCommand>() {
            Ok(command) => command,
            Err(message) => {
                eprintln!("⚠️ {}", message);
                continue;
            }
        };

        let outcome = apply(context, session, command).await;
        if !outcome.output.is_empty() {
            println!("{}", outcome.output);
        }
        session = outcome.session;
        if outcome.quit {
            break;
        }
    }

    tracing::debug!("shell closed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!("list".parse::<ShellCommand>(), Ok(ShellCommand::List));
        assert_eq!(
            "select  Dashboard Creation ".parse::<ShellCommand>(),
            Ok(ShellCommand::Select("Dashboard Creation".to_string()))
        );
        assert_eq!(
            "req focus on latency".parse::<ShellCommand>(),
            Ok(ShellCommand::Requirements("focus on latency".to_string()))
        );
        assert_eq!(
            "req".parse::<ShellCommand>(),
            Ok(ShellCommand::Requirements(String::new()))
        );
        assert_eq!("EXIT".parse::<ShellCommand>(), Ok(ShellCommand::Quit));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!("select".parse::<ShellCommand>().is_err());
        assert_eq!(
            "launch".parse::<ShellCommand>(),
            Err("unknown command: launch".to_string())
        );
    }
}
