use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

use super::choice::{Choice, InlineChoiceRequest};

/// 投票问题
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, PartialEq)]
pub struct Question {
    pub id: i64,
    pub question_text: String,
    pub pub_date: DateTime<Utc>,
}

impl Question {
    /// 发布时间不晚于 `now` 的问题才对外可见
    pub fn is_published(&self, now: DateTime<Utc>) -> bool {
        self.pub_date <= now
    }

    /// 发布时间落在 `[now - 1 day, now]` 内（不含恰好 24 小时）
    pub fn was_published_recently(&self, now: DateTime<Utc>) -> bool {
        was_published_recently(self.pub_date, now)
    }
}

pub fn was_published_recently(pub_date: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    let age = now - pub_date;
    age >= Duration::zero() && age < Duration::days(1)
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.question_text)
    }
}

/// 首页列表项
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionSummary {
    pub id: i64,
    pub question_text: String,
    pub pub_date: DateTime<Utc>,
    pub was_published_recently: bool,
}

impl QuestionSummary {
    pub fn from_question(question: Question, now: DateTime<Utc>) -> Self {
        let was_published_recently = question.was_published_recently(now);
        Self {
            id: question.id,
            question_text: question.question_text,
            pub_date: question.pub_date,
            was_published_recently,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionWithChoices {
    #[serde(flatten)]
    pub question: Question,
    pub choices: Vec<Choice>,
}

impl QuestionWithChoices {
    pub fn total_votes(&self) -> i64 {
        self.choices.iter().map(|c| c.votes).sum()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateQuestionRequest {
    #[validate(length(min = 1, max = 200))]
    pub question_text: String,

    pub pub_date: DateTime<Utc>,

    #[serde(default)]
    #[validate]
    pub choices: Vec<InlineChoiceRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateQuestionRequest {
    #[validate(length(min = 1, max = 200))]
    pub question_text: Option<String>,

    pub pub_date: Option<DateTime<Utc>>,
}
