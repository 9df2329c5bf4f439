use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::Config;

pub mod layout;
pub mod pdf;

pub use layout::{Flowable, PageSpec, Section, split_sections};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("failed to encode PDF: {0}")]
    Pdf(String),
}

/// 一次导出产生的文档：PDF字节与原始文本
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub pdf: Vec<u8>,
    pub text: String,
    pub sections: Vec<Section>,
    pub page_count: usize,
    /// PDF中被替换为占位符的字符数
    pub replaced_chars: usize,
}

/// 将生成的报告文本拆分为章节并排版为分页文档
#[derive(Debug, Clone)]
pub struct DocumentRenderer {
    title: String,
    page: PageSpec,
}

impl DocumentRenderer {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            page: PageSpec::LETTER,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.report_title())
    }

    pub fn render(&self, text: &str) -> Result<RenderedDocument, RenderError> {
        let sections = split_sections(text);
        let mut replaced_chars = 0;
        let flowables: Vec<Flowable> = layout::build_flowables(&self.title, &sections)
            .into_iter()
            .map(|flowable| match flowable {
                Flowable::Paragraph { style, text } => {
                    let (text, replaced) = pdf::to_builtin_charset(&text);
                    replaced_chars += replaced;
                    Flowable::Paragraph { style, text }
                }
                spacer => spacer,
            })
            .collect();
        if replaced_chars > 0 {
            tracing::warn!(
                replaced = replaced_chars,
                "characters outside the PDF font charset replaced with '{}'",
                pdf::STAND_IN
            );
        }

        let pages = layout::paginate(&flowables, self.page);
        let pdf = pdf::encode(&self.title, &pages, self.page)?;

        tracing::debug!(
            sections = sections.len(),
            pages = pages.len(),
            bytes = pdf.len(),
            "report rendered"
        );

        Ok(RenderedDocument {
            pdf,
            text: text.to_string(),
            sections,
            page_count: pages.len(),
            replaced_chars,
        })
    }
}

/// 导出后的文件路径
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFiles {
    pub pdf_path: PathBuf,
    pub text_path: PathBuf,
}

pub trait Outlet {
    async fn save(&self, document: &RenderedDocument) -> Result<ExportedFiles>;
}

/// 将PDF与TXT两种导出物写入输出目录
pub struct DiskOutlet {
    output_dir: PathBuf,
    pdf_name: String,
    text_name: String,
}

impl DiskOutlet {
    pub fn new(output_dir: &Path, base_name: &str) -> Self {
        Self {
            output_dir: output_dir.to_path_buf(),
            pdf_name: format!("{}.pdf", base_name),
            text_name: format!("{}.txt", base_name),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let (pdf_name, text_name) = config.export_file_names();
        Self {
            output_dir: config.output_path.clone(),
            pdf_name,
            text_name,
        }
    }
}

impl Outlet for DiskOutlet {
    async fn save(&self, document: &RenderedDocument) -> Result<ExportedFiles> {
        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .context(format!(
                "Failed to create output directory: {:?}",
                self.output_dir
            ))?;

        let pdf_path = self.output_dir.join(&self.pdf_name);
        tokio::fs::write(&pdf_path, &document.pdf)
            .await
            .context(format!("Failed to write {:?}", pdf_path))?;

        let text_path = self.output_dir.join(&self.text_name);
        tokio::fs::write(&text_path, document.text.as_bytes())
            .await
            .context(format!("Failed to write {:?}", text_path))?;

        tracing::info!(
            pdf = %pdf_path.display(),
            text = %text_path.display(),
            "report exported"
        );

        Ok(ExportedFiles {
            pdf_path,
            text_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn renderer() -> DocumentRenderer {
        DocumentRenderer::new("KPI on the Fly Workflow Analysis Report")
    }

    #[test]
    fn test_render_fixture_sections() {
        let document = renderer()
            .render("Title1\nbody1\n##Title2\nbody2a\nbody2b")
            .unwrap();

        assert_eq!(document.sections.len(), 2);
        assert_eq!(document.sections[0].title, "Title1");
        assert_eq!(document.sections[0].body, vec!["body1"]);
        assert_eq!(document.sections[1].title, "Title2");
        assert_eq!(document.sections[1].body, vec!["body2a", "body2b"]);
    }

    #[test]
    fn test_render_without_marker() {
        let document = renderer().render("Executive overview\nEverything nominal").unwrap();

        assert_eq!(document.sections.len(), 1);
        assert_eq!(document.sections[0].title, "Executive overview");
    }

    #[test]
    fn test_render_empty_text_still_produces_document() {
        for text in ["", "   \n\t"] {
            let document = renderer().render(text).unwrap();
            assert!(document.sections.is_empty());
            assert_eq!(document.page_count, 1);
            assert!(document.pdf.starts_with(b"%PDF"));
            assert_eq!(document.text, text);
        }
    }

    #[test]
    fn test_render_keeps_raw_text() {
        let text = "## Summary\nAll good.";
        let document = renderer().render(text).unwrap();

        assert_eq!(document.text, text);
        assert!(document.pdf.starts_with(b"%PDF"));
    }

    #[test]
    fn test_render_non_latin_text_keeps_visible_glyphs() {
        let text = "## Résumé\n✅ ok — “quotes” 数据 🚀\n## Risks\n• bullet";
        let document = renderer().render(text).unwrap();

        assert_eq!(document.replaced_chars, 4);
        assert_eq!(document.text, text);
        assert_eq!(document.sections[0].title, "Résumé");

        // 内容流未压缩，文本以十六进制字符串写出
        let pdf = String::from_utf8_lossy(&document.pdf);
        assert!(pdf.contains("<52E973756DE9> Tj"));
        assert!(pdf.contains("<3F206F6B2097209371756F74657394203F3F203F> Tj"));
        assert!(pdf.contains("<2D2062756C6C6574> Tj"));
        assert!(!pdf.contains("<7F2062756C6C6574>"));
    }

    #[tokio::test]
    async fn test_disk_outlet_writes_both_artifacts() {
        let temp_dir = TempDir::new().unwrap();
        let output_dir = temp_dir.path().join("reports");
        let document = renderer().render("## Summary\nAll good.").unwrap();

        let outlet = DiskOutlet::new(&output_dir, "KPI_analysis");
        let files = outlet.save(&document).await.unwrap();

        assert_eq!(files.pdf_path, output_dir.join("KPI_analysis.pdf"));
        assert_eq!(files.text_path, output_dir.join("KPI_analysis.txt"));
        assert_eq!(std::fs::read(&files.pdf_path).unwrap(), document.pdf);
        assert_eq!(
            std::fs::read_to_string(&files.text_path).unwrap(),
            "## Summary\nAll good."
        );
    }
}
