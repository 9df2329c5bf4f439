//! 报告版面 - 章节拆分、段落流与分页

/// 章节分隔标记（Markdown二级标题）
pub const SECTION_MARKER: &str = "\n##";

/// 报告中的一个章节：首行为标题，其后每一行各成一个正文段落
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: String,
    pub body: Vec<String>,
}

/// 按 `"\n##"` 拆分文本，丢弃空白块
pub fn split_sections(text: &str) -> Vec<Section> {
    text.split(SECTION_MARKER)
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .map(|block| {
            let mut lines = block.lines();
            let title = lines
                .next()
                .unwrap_or_default()
                .trim_start_matches('#')
                .trim()
                .to_string();
            let body = lines.map(str::to_string).collect();
            Section { title, body }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParagraphStyle {
    Title,
    Heading,
    Body,
}

impl ParagraphStyle {
    pub fn font_size(&self) -> f32 {
        match self {
            ParagraphStyle::Title => 18.0,
            ParagraphStyle::Heading => 14.0,
            ParagraphStyle::Body => 10.0,
        }
    }

    pub fn leading(&self) -> f32 {
        match self {
            ParagraphStyle::Title => 22.0,
            ParagraphStyle::Heading => 18.0,
            ParagraphStyle::Body => 12.0,
        }
    }

    pub fn space_before(&self) -> f32 {
        match self {
            ParagraphStyle::Title => 0.0,
            ParagraphStyle::Heading => 10.0,
            ParagraphStyle::Body => 6.0,
        }
    }

    pub fn space_after(&self) -> f32 {
        match self {
            ParagraphStyle::Title => 6.0,
            ParagraphStyle::Heading => 6.0,
            ParagraphStyle::Body => 0.0,
        }
    }

    pub fn bold(&self) -> bool {
        !matches!(self, ParagraphStyle::Body)
    }

    pub fn centered(&self) -> bool {
        matches!(self, ParagraphStyle::Title)
    }

    /// Helvetica平均字宽（em比例）
    fn average_glyph_width(&self) -> f32 {
        if self.bold() { 0.56 } else { 0.5 }
    }

    /// 估算文本宽度（pt），按每个字符对应一个单字节字形计算，
    /// 文本需先经过 `pdf::to_builtin_charset`
    pub fn text_width(&self, text: &str) -> f32 {
        text.chars().count() as f32 * self.font_size() * self.average_glyph_width()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Flowable {
    Paragraph { style: ParagraphStyle, text: String },
    Spacer(f32),
}

/// 标题 + 顶部留白，随后每个章节为标题、正文段落和固定间距
pub fn build_flowables(document_title: &str, sections: &[Section]) -> Vec<Flowable> {
    let mut flowables = vec![
        Flowable::Paragraph {
            style: ParagraphStyle::Title,
            text: document_title.to_string(),
        },
        Flowable::Spacer(24.0),
    ];

    for section in sections {
        flowables.push(Flowable::Paragraph {
            style: ParagraphStyle::Heading,
            text: section.title.clone(),
        });
        for line in &section.body {
            flowables.push(Flowable::Paragraph {
                style: ParagraphStyle::Body,
                text: line.clone(),
            });
        }
        flowables.push(Flowable::Spacer(12.0));
    }

    flowables
}

/// 页面规格，单位为pt
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSpec {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
}

impl PageSpec {
    /// US Letter
    pub const LETTER: PageSpec = PageSpec {
        width: 612.0,
        height: 792.0,
        margin: 72.0,
    };

    pub fn frame_width(&self) -> f32 {
        self.width - 2.0 * self.margin
    }

    fn top(&self) -> f32 {
        self.height - self.margin
    }

    fn bottom(&self) -> f32 {
        self.margin
    }
}

/// 已定位的一行文本，坐标原点为页面左下角，y为基线
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub style: ParagraphStyle,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub lines: Vec<PlacedLine>,
}

struct Cursor {
    spec: PageSpec,
    pages: Vec<Page>,
    y: f32,
}

impl Cursor {
    fn new(spec: PageSpec) -> Self {
        Self {
            spec,
            pages: vec![Page::default()],
            y: spec.top(),
        }
    }

    fn at_page_top(&self) -> bool {
        self.y >= self.spec.top()
    }

    fn new_page(&mut self) {
        self.pages.push(Page::default());
        self.y = self.spec.top();
    }

    fn advance(&mut self, amount: f32) {
        if self.at_page_top() {
            return;
        }
        if self.y - amount < self.spec.bottom() {
            self.new_page();
        } else {
            self.y -= amount;
        }
    }

    fn place(&mut self, style: ParagraphStyle, text: String) {
        if self.y - style.leading() < self.spec.bottom() {
            self.new_page();
        }
        let x = if style.centered() {
            self.spec.margin + ((self.spec.frame_width() - style.text_width(&text)) / 2.0).max(0.0)
        } else {
            self.spec.margin
        };
        let y = self.y - style.font_size();
        self.y -= style.leading();
        if let Some(page) = self.pages.last_mut() {
            page.lines.push(PlacedLine { text, style, x, y });
        }
    }
}

/// 将段落流排入页面，段落按框宽自动换行，放不下时另起一页
pub fn paginate(flowables: &[Flowable], spec: PageSpec) -> Vec<Page> {
    let mut cursor = Cursor::new(spec);

    for flowable in flowables {
        match flowable {
            Flowable::Spacer(height) => cursor.advance(*height),
            Flowable::Paragraph { style, text } => {
                cursor.advance(style.space_before());
                for line in wrap(text, *style, spec.frame_width()) {
                    cursor.place(*style, line);
                }
                cursor.advance(style.space_after());
            }
        }
    }

    cursor.pages
}

/// 按单词换行，超长单词按字符硬切
fn wrap(text: &str, style: ParagraphStyle, width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };

        if style.text_width(&candidate) <= width {
            current = candidate;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }

        if style.text_width(word) <= width {
            current = word.to_string();
        } else {
            for ch in word.chars() {
                current.push(ch);
                if style.text_width(&current) > width {
                    current.pop();
                    lines.push(std::mem::take(&mut current));
                    current.push(ch);
                }
            }
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(title: &str, body: &[&str]) -> Section {
        Section {
            title: title.to_string(),
            body: body.iter().map(|line| line.to_string()).collect(),
        }
    }

    #[test]
    fn test_split_on_marker() {
        let sections = split_sections("Title1\nbody1\n##Title2\nbody2a\nbody2b");

        assert_eq!(
            sections,
            vec![
                section("Title1", &["body1"]),
                section("Title2", &["body2a", "body2b"]),
            ]
        );
    }

    #[test]
    fn test_no_marker_is_single_section() {
        let sections = split_sections("Overview\nfirst line\nsecond line");
        assert_eq!(
            sections,
            vec![section("Overview", &["first line", "second line"])]
        );
    }

    #[test]
    fn test_single_line_is_title_only() {
        assert_eq!(split_sections("Just a title"), vec![section("Just a title", &[])]);
    }

    #[test]
    fn test_blank_input_has_no_sections() {
        assert!(split_sections("").is_empty());
        assert!(split_sections("  \n\t \n").is_empty());
        assert!(split_sections("\n##\n##   ").is_empty());
    }

    #[test]
    fn test_heading_prefix_stripped_from_titles() {
        let sections = split_sections("## Summary\nAll good.\n## Risks\nNone\n### Detail\nx");

        assert_eq!(
            sections,
            vec![
                section("Summary", &["All good."]),
                section("Risks", &["None"]),
                section("Detail", &["x"]),
            ]
        );
    }

    #[test]
    fn test_body_lines_are_not_merged() {
        let sections = split_sections("T\nline one\n\nline three");
        assert_eq!(sections[0].body, vec!["line one", "", "line three"]);
    }

    #[test]
    fn test_flowables_preamble_and_sections() {
        let flowables = build_flowables("Report", &[section("S", &["a", "b"])]);

        assert_eq!(
            flowables,
            vec![
                Flowable::Paragraph {
                    style: ParagraphStyle::Title,
                    text: "Report".to_string()
                },
                Flowable::Spacer(24.0),
                Flowable::Paragraph {
                    style: ParagraphStyle::Heading,
                    text: "S".to_string()
                },
                Flowable::Paragraph {
                    style: ParagraphStyle::Body,
                    text: "a".to_string()
                },
                Flowable::Paragraph {
                    style: ParagraphStyle::Body,
                    text: "b".to_string()
                },
                Flowable::Spacer(12.0),
            ]
        );
    }

    #[test]
    fn test_flowables_without_sections_keep_preamble() {
        let flowables = build_flowables("Report", &[]);
        assert_eq!(flowables.len(), 2);
    }

    #[test]
    fn test_wrap_respects_frame_width() {
        let text = "word ".repeat(200);
        let lines = wrap(&text, ParagraphStyle::Body, PageSpec::LETTER.frame_width());

        assert!(lines.len() > 1);
        for line in &lines {
            assert!(ParagraphStyle::Body.text_width(line) <= PageSpec::LETTER.frame_width());
        }
        let rejoined: Vec<&str> = lines.iter().flat_map(|l| l.split(' ')).collect();
        assert_eq!(rejoined.len(), 200);
    }

    #[test]
    fn test_wrap_hard_breaks_long_words() {
        let word = "x".repeat(300);
        let lines = wrap(&word, ParagraphStyle::Body, 100.0);

        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), word);
    }

    #[test]
    fn test_paginate_single_page() {
        let flowables = build_flowables("Report", &[section("S", &["a"])]);
        let pages = paginate(&flowables, PageSpec::LETTER);

        assert_eq!(pages.len(), 1);
        let texts: Vec<&str> = pages[0].lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["Report", "S", "a"]);
        // 自上而下排列
        assert!(pages[0].lines[0].y > pages[0].lines[1].y);
        assert!(pages[0].lines[1].y > pages[0].lines[2].y);
    }

    #[test]
    fn test_paginate_breaks_pages() {
        let body: Vec<String> = (0..200).map(|i| format!("line {}", i)).collect();
        let body_refs: Vec<&str> = body.iter().map(String::as_str).collect();
        let flowables = build_flowables("Report", &[section("Long", &body_refs)]);

        let pages = paginate(&flowables, PageSpec::LETTER);

        assert!(pages.len() > 1);
        let placed: usize = pages.iter().map(|p| p.lines.len()).sum();
        assert_eq!(placed, 202);
        for page in &pages {
            for line in &page.lines {
                assert!(line.y >= PageSpec::LETTER.margin - 1.0);
                assert!(line.y <= PageSpec::LETTER.height - PageSpec::LETTER.margin);
            }
        }
    }

    #[test]
    fn test_title_is_centered() {
        let pages = paginate(&build_flowables("Report", &[]), PageSpec::LETTER);
        let title = &pages[0].lines[0];
        assert!(title.x > PageSpec::LETTER.margin);
    }
}
