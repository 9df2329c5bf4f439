/// Token估算器，用于在调用模型前估算提示词规模
#[derive(Debug, Clone)]
pub struct TokenEstimator {
    /// 拉丁字符的平均token比例（字符数/token数）
    latin_chars_per_token: f64,
    /// CJK字符的平均token比例
    cjk_chars_per_token: f64,
    /// 每次请求的固定开销（角色标记等）
    request_overhead: usize,
}

/// Token估算结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenEstimation {
    pub estimated_tokens: usize,
    pub character_count: usize,
    pub cjk_char_count: usize,
}

impl Default for TokenEstimator {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenEstimator {
    pub fn new() -> Self {
        Self {
            // 基于GPT系列模型的经验值
            latin_chars_per_token: 4.0,
            cjk_chars_per_token: 1.5,
            request_overhead: 8,
        }
    }

    /// 估算文本的token数量
    pub fn estimate_tokens(&self, text: &str) -> TokenEstimation {
        let character_count = text.chars().count();
        let cjk_char_count = text.chars().filter(|c| is_cjk(*c)).count();
        let latin_count = character_count - cjk_char_count;

        let cjk_tokens = (cjk_char_count as f64 / self.cjk_chars_per_token).ceil() as usize;
        let latin_tokens = (latin_count as f64 / self.latin_chars_per_token).ceil() as usize;

        TokenEstimation {
            estimated_tokens: cjk_tokens + latin_tokens + self.request_overhead,
            character_count,
            cjk_char_count,
        }
    }

    /// 估算一次请求（系统提示词 + 用户内容）的token数量
    pub fn estimate_request(&self, system_prompt: &str, user_prompt: &str) -> usize {
        self.estimate_tokens(system_prompt).estimated_tokens
            + self.estimate_tokens(user_prompt).estimated_tokens
    }
}

fn is_cjk(c: char) -> bool {
    matches!(c as u32,
        0x4E00..=0x9FFF |   // CJK统一汉字
        0x3400..=0x4DBF |   // CJK扩展A
        0x3040..=0x30FF |   // 平假名、片假名
        0xAC00..=0xD7AF |   // 韩文音节
        0x20000..=0x2A6DF   // CJK扩展B
    )
}
