use std::sync::Arc;

use anyhow::{Result, anyhow};

use crate::catalog::{NotFound, WorkflowCatalog};
use crate::config::Config;
use crate::generator::assessment::{self, AssessmentResult};
use crate::generator::context::GeneratorContext;
use crate::generator::insight::{StepChart, WorkflowMetrics};
use crate::generator::outlet::{ExportedFiles, Outlet, RenderedDocument};
use crate::generator::report::ReportGenerator;
use crate::generator::session::{self, Session, SessionEvent};
use crate::types::{GeneratedReport, GenerationRequest};

pub mod shell;

/// 文本步骤图的横条宽度
const CHART_WIDTH: usize = 40;

/// 选中工作流的完整概览
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowInspection {
    pub name: String,
    pub metrics: WorkflowMetrics,
    pub assessment: AssessmentResult,
    pub chart: Option<StepChart>,
    pub related: Vec<String>,
}

impl WorkflowInspection {
    /// 终端展示文本，`with_analysis` 为false时省略质量评估与步骤图
    pub fn render_text(&self, with_analysis: bool) -> String {
        let mut out = format!("📋 {}\n", self.name);
        out.push_str(&format!("   Steps:          {}\n", self.metrics.steps));
        out.push_str(&format!(
            "   Business Rules: {}\n",
            self.metrics.business_rules
        ));
        out.push_str(&format!("   Dependencies:   {}\n", self.metrics.dependencies));
        out.push_str(&format!("   Actors:         {}\n", self.metrics.actors));
        out.push_str(&format!(
            "   Outcome:        {}\n",
            self.metrics.expected_outcome
        ));

        if with_analysis {
            out.push_str("\n🔍 Quality Assessment\n");
            if self.assessment.is_validated() {
                out.push_str("   ✅ Workflow structure validated\n");
            } else {
                for line in self.assessment.lines() {
                    out.push_str(&format!("   {}\n", line));
                }
            }
            out.push_str(&format!("   {}\n", self.assessment.advisory));

            if let Some(chart) = &self.chart {
                out.push('\n');
                out.push_str(&chart.render_text(CHART_WIDTH));
            }
        }

        out.push_str("\n🔗 Related Components\n");
        for item in &self.related {
            out.push_str(&format!("   - {}\n", item));
        }
        out
    }
}

/// 汇总一个工作流的指标、质量评估、步骤图和相关组件
pub fn inspect(context: &GeneratorContext, name: &str) -> Result<WorkflowInspection, NotFound> {
    let record = context.catalog.lookup(name)?;
    Ok(WorkflowInspection {
        name: record.name.clone(),
        metrics: WorkflowMetrics::of(record),
        assessment: assessment::assess(record),
        chart: StepChart::of(record),
        related: context.related_items().lookup(&record.name),
    })
}

/// 为会话中选中的工作流生成报告，失败时保留之前的报告并记录错误
pub async fn generate_report(context: &GeneratorContext, session: Session) -> Session {
    let Some(name) = session.selected_workflow.clone() else {
        return session::dispatch(
            session,
            SessionEvent::GenerationFailed("no workflow selected".to_string()),
        );
    };

    let record = match context.catalog.lookup(&name) {
        Ok(record) => record,
        Err(e) => return session::dispatch(session, SessionEvent::GenerationFailed(e.to_string())),
    };

    let request = GenerationRequest {
        workflow: record,
        user_requirements: &session.user_requirements,
    };
    let prompt = match context.assembler().assemble(request) {
        Ok(prompt) => prompt,
        Err(e) => return session::dispatch(session, SessionEvent::GenerationFailed(e.to_string())),
    };
    tracing::info!(workflow = %name, "generating report");
    match ReportGenerator::new(context.backend.as_ref())
        .generate(&prompt)
        .await
    {
        Ok(content) => session::dispatch(
            session,
            SessionEvent::ReportGenerated(GeneratedReport::new(name, content)),
        ),
        Err(e) => session::dispatch(session, SessionEvent::GenerationFailed(e.to_string())),
    }
}

/// 将报告排版为PDF文档
pub fn export(context: &GeneratorContext, report: &GeneratedReport) -> Result<RenderedDocument> {
    let document = context.renderer().render(&report.content)?;
    Ok(document)
}

/// 渲染并写出两种导出物
pub async fn save(context: &GeneratorContext, report: &GeneratedReport) -> Result<ExportedFiles> {
    let document = export(context, report)?;
    let outlet = context.outlet();
    outlet.save(&document).await
}

/// 一次运行要执行的动作
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// 列出目录中的工作流
    List,
    /// 展示工作流概览，未指定时使用目录中的第一个
    Show { workflow: Option<String> },
    /// 生成并导出报告
    Generate {
        workflow: Option<String>,
        requirements: String,
    },
    /// 交互式会话
    Shell,
}

/// 加载目录、解析凭证并执行动作
pub async fn launch(config: &Config, action: Action) -> Result<()> {
    let catalog = Arc::new(WorkflowCatalog::load_or_empty(&config.catalog_path));
    let context = GeneratorContext::new(config.clone(), catalog)?;
    run(&context, action).await
}

/// 在已构建的上下文上执行动作
pub async fn run(context: &GeneratorContext, action: Action) -> Result<()> {
    if context.catalog.is_empty() {
        eprintln!(
            "🚨 No workflows available in {}",
            context.config.catalog_path.display()
        );
        return Err(anyhow!("no workflows available"));
    }

    match action {
        Action::List => {
            for (index, name) in context.catalog.names().iter().enumerate() {
                println!("{:>3}. {}", index + 1, name);
            }
            Ok(())
        }
        Action::Show { workflow } => {
            let name = resolve_workflow(context, workflow)?;
            let inspection = inspect(context, &name).map_err(|e| operator_error(e.to_string()))?;
            print!("{}", inspection.render_text(true));
            Ok(())
        }
        Action::Generate {
            workflow,
            requirements,
        } => {
            let name = resolve_workflow(context, workflow)?;
            let session = session::dispatch(Session::default(), SessionEvent::SelectWorkflow(name));
            let session = session::dispatch(session, SessionEvent::UpdateRequirements(requirements));

            println!("🤖 Analyzing workflow...");
            let session = generate_report(context, session).await;
            if let Some(message) = session.last_error {
                return Err(operator_error(message));
            }

            if let Some(report) = &session.generated_report {
                println!("📈 Analysis Report\n");
                println!("{}", report.content);
                let files = save(context, report).await?;
                print_exported(&files);
            }
            Ok(())
        }
        Action::Shell => shell::run(context).await,
    }
}

fn resolve_workflow(context: &GeneratorContext, workflow: Option<String>) -> Result<String> {
    match workflow {
        Some(name) => Ok(name),
        None => context
            .catalog
            .first()
            .map(|record| record.name.clone())
            .ok_or_else(|| anyhow!("no workflows available")),
    }
}

/// 向操作员输出失败信息并转换为错误
fn operator_error(message: String) -> anyhow::Error {
    eprintln!("🚨 {}", message);
    anyhow!(message)
}

fn print_exported(files: &ExportedFiles) {
    println!("💾 Exported {}", files.pdf_path.display());
    println!("💾 Exported {}", files.text_path.display());
}
