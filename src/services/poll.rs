use crate::{
    error::{AppError, Result},
    models::{Choice, Question, QuestionSummary, QuestionWithChoices},
    services::Database,
};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// 面向投票者的查询与投票
#[derive(Clone)]
pub struct PollService {
    db: Arc<Database>,
}

impl PollService {
    pub async fn new(db: Arc<Database>) -> Result<Self> {
        Ok(Self { db })
    }

    /// 已发布的问题，按发布时间倒序
    pub async fn published_questions(
        &self,
        now: DateTime<Utc>,
        limit: Option<usize>,
    ) -> Result<Vec<QuestionSummary>> {
        debug!("Listing questions published at or before {}", now);

        // SQLite 中 LIMIT -1 表示不限制
        let limit = limit.map(|l| l as i64).unwrap_or(-1);

        let questions: Vec<Question> = sqlx::query_as(
            r#"
            SELECT id, question_text, pub_date
            FROM question
            WHERE pub_date <= ?
            ORDER BY pub_date DESC, id DESC
            LIMIT ?
            "#,
        )
        .bind(now)
        .bind(limit)
        .fetch_all(&self.db.pool)
        .await?;

        Ok(questions
            .into_iter()
            .map(|q| QuestionSummary::from_question(q, now))
            .collect())
    }

    /// 详情页入口：未发布的问题与不存在的问题一样返回 NotFound
    pub async fn published_question(
        &self,
        question_id: i64,
        now: DateTime<Utc>,
    ) -> Result<QuestionWithChoices> {
        debug!("Fetching published question: {}", question_id);

        let question: Question = sqlx::query_as(
            "SELECT id, question_text, pub_date FROM question WHERE id = ? AND pub_date <= ?",
        )
        .bind(question_id)
        .bind(now)
        .fetch_optional(&self.db.pool)
        .await?
        .ok_or_else(|| AppError::not_found("Question"))?;

        let choices = self.choices_for(question.id).await?;

        Ok(QuestionWithChoices { question, choices })
    }

    /// 为问题的某个选项计一票
    pub async fn vote(
        &self,
        question_id: i64,
        choice_id: Option<i64>,
        now: DateTime<Utc>,
    ) -> Result<Choice> {
        let question = self.published_question(question_id, now).await?;

        let choice_id = match choice_id {
            Some(id) => id,
            None => {
                debug!("Vote on question {} without a choice", question_id);
                return Err(AppError::invalid_vote("You didn't select a choice."));
            }
        };

        // 计数在数据库内原地自增，并发投票不会丢失
        let result = sqlx::query(
            "UPDATE choice SET votes = votes + 1 WHERE id = ? AND question_id = ?",
        )
        .bind(choice_id)
        .bind(question.question.id)
        .execute(&self.db.pool)
        .await?;

        if result.rows_affected() == 0 {
            warn!(
                "Rejected vote for choice {} which does not belong to question {}",
                choice_id, question_id
            );
            return Err(AppError::invalid_vote("You didn't select a choice."));
        }

        let choice: Choice = sqlx::query_as(
            "SELECT id, question_id, choice_text, votes FROM choice WHERE id = ?",
        )
        .bind(choice_id)
        .fetch_one(&self.db.pool)
        .await?;

        info!("Vote recorded for choice {} on question {}", choice.id, question_id);

        Ok(choice)
    }

    async fn choices_for(&self, question_id: i64) -> Result<Vec<Choice>> {
        let choices: Vec<Choice> = sqlx::query_as(
            "SELECT id, question_id, choice_text, votes FROM choice WHERE question_id = ? ORDER BY id",
        )
        .bind(question_id)
        .fetch_all(&self.db.pool)
        .await?;

        Ok(choices)
    }
}
