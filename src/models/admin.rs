use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::question::Question;

/// 管理后台问题列表的发布日期筛选
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PubDateFilter {
    #[default]
    Any,
    Today,
    #[serde(rename = "past_7_days")]
    Past7Days,
    ThisMonth,
    ThisYear,
}

impl PubDateFilter {
    /// 半开区间 `[start, end)`，`Any` 没有边界
    pub fn window(&self, now: DateTime<Utc>) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let today = now.date_naive();
        let tomorrow = midnight(today) + Duration::days(1);

        match self {
            PubDateFilter::Any => None,
            PubDateFilter::Today => Some((midnight(today), tomorrow)),
            PubDateFilter::Past7Days => Some((midnight(today) - Duration::days(7), tomorrow)),
            PubDateFilter::ThisMonth => {
                let start = first_of_month(today.year(), today.month());
                let end = if today.month() == 12 {
                    first_of_month(today.year() + 1, 1)
                } else {
                    first_of_month(today.year(), today.month() + 1)
                };
                Some((start, end))
            }
            PubDateFilter::ThisYear => Some((
                first_of_month(today.year(), 1),
                first_of_month(today.year() + 1, 1),
            )),
        }
    }
}

fn midnight(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::default()))
}

fn first_of_month(year: i32, month: u32) -> DateTime<Utc> {
    let date = NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MIN);
    midnight(date)
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminQuestionQuery {
    pub q: Option<String>,
    #[serde(default)]
    pub pub_date: PubDateFilter,
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminChoiceQuery {
    pub question_id: Option<i64>,
}

/// 列表列：问题文本、发布时间、是否已发布、是否最近发布
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminQuestionRow {
    pub id: i64,
    pub question_text: String,
    pub pub_date: DateTime<Utc>,
    pub is_published: bool,
    pub was_published_recently: bool,
}

impl AdminQuestionRow {
    pub fn from_question(question: Question, now: DateTime<Utc>) -> Self {
        let is_published = question.is_published(now);
        let was_published_recently = question.was_published_recently(now);
        Self {
            id: question.id,
            question_text: question.question_text,
            pub_date: question.pub_date,
            is_published,
            was_published_recently,
        }
    }
}
