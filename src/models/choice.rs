use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, PartialEq)]
pub struct Choice {
    pub id: i64,
    pub question_id: i64,
    pub choice_text: String,
    pub votes: i64,
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.choice_text)
    }
}

/// 随问题一起创建的选项；空白文本的行会被忽略
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct InlineChoiceRequest {
    #[validate(length(max = 200))]
    pub choice_text: String,

    #[validate(range(min = 0))]
    #[serde(default)]
    pub votes: i64,
}

impl InlineChoiceRequest {
    pub fn is_blank(&self) -> bool {
        self.choice_text.trim().is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateChoiceRequest {
    pub question_id: i64,

    #[validate(length(min = 1, max = 200))]
    pub choice_text: String,

    #[validate(range(min = 0))]
    #[serde(default)]
    pub votes: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateChoiceRequest {
    pub question_id: Option<i64>,

    #[validate(length(min = 1, max = 200))]
    pub choice_text: Option<String>,

    #[validate(range(min = 0))]
    pub votes: Option<i64>,
}

/// 投票表单；`choice` 缺失或无法解析时视为无效投票
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VoteForm {
    pub choice: Option<String>,
}

impl VoteForm {
    pub fn choice_id(&self) -> Option<i64> {
        self.choice.as_deref().and_then(|c| c.trim().parse().ok())
    }
}
