//! 使用printpdf将排好的页面编码为PDF字节

use printpdf::{BuiltinFont, Mm, PdfDocument, Pt};

use super::RenderError;
use super::layout::{Page, PageSpec};

/// 内置字体无法编码的字符统一替换为该字符
pub const STAND_IN: char = '?';

/// 将文本限制在内置Helvetica字体（WinAnsi编码）可正确编码的字符内，
/// 返回转换后的文本与被替换为 `STAND_IN` 的字符数
pub fn to_builtin_charset(text: &str) -> (String, usize) {
    let mut out = String::with_capacity(text.len());
    let mut replaced = 0;

    for ch in text.chars() {
        match ch {
            ' '..='~' | '\u{A1}'..='\u{FF}' => out.push(ch),
            'Œ' | 'œ' | 'Š' | 'š' | 'Ž' | 'ž' | 'Ÿ' | 'ƒ' | 'ˆ' | '˜' | '–' | '—' | '‘' | '’'
            | '‚' | '“' | '”' | '„' | '†' | '‡' | '…' | '‰' | '‹' | '›' | '€' | '™' => {
                out.push(ch)
            }
            '\u{A0}' => out.push(' '),
            '\t' => out.push_str("    "),
            // 项目符号在编码表中会落到未定义的0x7F
            '•' | '◦' | '‣' | '▪' | '●' => out.push('-'),
            // 零宽字符与变体选择符不占字形
            '\u{200B}' | '\u{200C}' | '\u{200D}' | '\u{FE0E}' | '\u{FE0F}' => {}
            _ => {
                out.push(STAND_IN);
                replaced += 1;
            }
        }
    }

    (out, replaced)
}

/// 行文本需已经过 `to_builtin_charset` 转换
pub fn encode(document_title: &str, pages: &[Page], spec: PageSpec) -> Result<Vec<u8>, RenderError> {
    let width = Mm::from(Pt(spec.width));
    let height = Mm::from(Pt(spec.height));
    let (doc, first_page, first_layer) = PdfDocument::new(document_title, width, height, "Layer 1");

    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| RenderError::Pdf(e.to_string()))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| RenderError::Pdf(e.to_string()))?;

    for (index, page) in pages.iter().enumerate() {
        let (page_index, layer_index) = if index == 0 {
            (first_page, first_layer)
        } else {
            doc.add_page(width, height, "Layer 1")
        };
        let layer = doc.get_page(page_index).get_layer(layer_index);

        for line in &page.lines {
            let font = if line.style.bold() { &bold } else { &regular };
            layer.use_text(
                line.text.as_str(),
                line.style.font_size(),
                Mm::from(Pt(line.x)),
                Mm::from(Pt(line.y)),
                font,
            );
        }
    }

    doc.save_to_bytes()
        .map_err(|e| RenderError::Pdf(e.to_string()))
}
