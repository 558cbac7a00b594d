use crate::{
    error::{AppError, Result},
    models::{
        admin::{AdminQuestionQuery, AdminQuestionRow},
        choice::{CreateChoiceRequest, UpdateChoiceRequest},
        question::{CreateQuestionRequest, UpdateQuestionRequest},
        Choice, PaginatedResult, Question, QuestionWithChoices,
    },
    services::Database,
};
use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Sqlite};
use std::sync::Arc;
use tracing::{debug, info};
use validator::Validate;

/// 管理后台为每个问题额外提供的空白选项行数
pub const EXTRA_CHOICE_SLOTS: usize = 3;

#[derive(Clone)]
pub struct AdminService {
    db: Arc<Database>,
    default_page_size: usize,
}

impl AdminService {
    pub async fn new(db: Arc<Database>, default_page_size: usize) -> Result<Self> {
        Ok(Self {
            db,
            default_page_size: default_page_size.max(1),
        })
    }

    /// 问题列表，支持文本搜索与发布日期筛选
    pub async fn list_questions(
        &self,
        query: AdminQuestionQuery,
        now: DateTime<Utc>,
    ) -> Result<PaginatedResult<AdminQuestionRow>> {
        debug!("Admin listing questions with query: {:?}", query);

        let page = query.page.unwrap_or(1).max(1);
        let per_page = query.per_page.unwrap_or(self.default_page_size).clamp(1, 500);
        let offset = (page - 1)
            .checked_mul(per_page)
            .filter(|offset| *offset <= i64::MAX as usize)
            .ok_or_else(|| AppError::bad_request("page out of range"))?;

        let mut count_query = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM question");
        push_question_filters(&mut count_query, &query, now);
        let total: i64 = count_query
            .build_query_scalar()
            .fetch_one(&self.db.pool)
            .await?;

        let mut list_query =
            QueryBuilder::<Sqlite>::new("SELECT id, question_text, pub_date FROM question");
        push_question_filters(&mut list_query, &query, now);
        list_query
            .push(" ORDER BY id DESC LIMIT ")
            .push_bind(per_page as i64)
            .push(" OFFSET ")
            .push_bind(offset as i64);

        let questions: Vec<Question> = list_query
            .build_query_as()
            .fetch_all(&self.db.pool)
            .await?;

        let rows = questions
            .into_iter()
            .map(|q| AdminQuestionRow::from_question(q, now))
            .collect();

        Ok(PaginatedResult::new(rows, total as usize, page, per_page))
    }

    /// 在同一事务中创建问题及其内联选项
    pub async fn create_question(&self, request: CreateQuestionRequest) -> Result<QuestionWithChoices> {
        request.validate()?;
        let question_text = non_blank(&request.question_text, "question_text")?;

        let mut tx = self.db.pool.begin().await?;

        let question_id = sqlx::query("INSERT INTO question (question_text, pub_date) VALUES (?, ?)")
            .bind(question_text)
            .bind(request.pub_date)
            .execute(&mut *tx)
            .await?
            .last_insert_rowid();

        let mut choices = Vec::new();
        for inline in request.choices.iter().filter(|c| !c.is_blank()) {
            let choice_text = inline.choice_text.trim().to_string();
            let choice_id = sqlx::query(
                "INSERT INTO choice (question_id, choice_text, votes) VALUES (?, ?, ?)",
            )
            .bind(question_id)
            .bind(&choice_text)
            .bind(inline.votes)
            .execute(&mut *tx)
            .await?
            .last_insert_rowid();

            choices.push(Choice {
                id: choice_id,
                question_id,
                choice_text,
                votes: inline.votes,
            });
        }

        tx.commit().await?;

        info!("Created question {} with {} choices", question_id, choices.len());

        Ok(QuestionWithChoices {
            question: Question {
                id: question_id,
                question_text: question_text.to_string(),
                pub_date: request.pub_date,
            },
            choices,
        })
    }

    /// 管理端可以看到未发布的问题
    pub async fn get_question(&self, question_id: i64) -> Result<QuestionWithChoices> {
        let question = self.find_question(question_id).await?;
        let choices = self.list_choices(Some(question_id)).await?;
        Ok(QuestionWithChoices { question, choices })
    }

    pub async fn update_question(
        &self,
        question_id: i64,
        request: UpdateQuestionRequest,
    ) -> Result<Question> {
        request.validate()?;
        let mut question = self.find_question(question_id).await?;

        if let Some(text) = &request.question_text {
            question.question_text = non_blank(text, "question_text")?.to_string();
        }
        if let Some(pub_date) = request.pub_date {
            question.pub_date = pub_date;
        }

        sqlx::query("UPDATE question SET question_text = ?, pub_date = ? WHERE id = ?")
            .bind(&question.question_text)
            .bind(question.pub_date)
            .bind(question.id)
            .execute(&self.db.pool)
            .await?;

        info!("Updated question {}", question_id);
        Ok(question)
    }

    /// 删除问题，选项随外键级联删除
    pub async fn delete_question(&self, question_id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM question WHERE id = ?")
            .bind(question_id)
            .execute(&self.db.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Question"));
        }

        info!("Deleted question {}", question_id);
        Ok(())
    }

    pub async fn list_choices(&self, question_id: Option<i64>) -> Result<Vec<Choice>> {
        let mut query =
            QueryBuilder::<Sqlite>::new("SELECT id, question_id, choice_text, votes FROM choice");
        if let Some(question_id) = question_id {
            query.push(" WHERE question_id = ").push_bind(question_id);
        }
        query.push(" ORDER BY question_id, id");

        let choices: Vec<Choice> = query.build_query_as().fetch_all(&self.db.pool).await?;
        Ok(choices)
    }

    pub async fn create_choice(&self, request: CreateChoiceRequest) -> Result<Choice> {
        request.validate()?;
        let choice_text = non_blank(&request.choice_text, "choice_text")?;

        // 确认所属问题存在
        self.find_question(request.question_id).await?;

        let choice_id = sqlx::query(
            "INSERT INTO choice (question_id, choice_text, votes) VALUES (?, ?, ?)",
        )
        .bind(request.question_id)
        .bind(choice_text)
        .bind(request.votes)
        .execute(&self.db.pool)
        .await?
        .last_insert_rowid();

        info!("Created choice {} for question {}", choice_id, request.question_id);

        Ok(Choice {
            id: choice_id,
            question_id: request.question_id,
            choice_text: choice_text.to_string(),
            votes: request.votes,
        })
    }

    pub async fn get_choice(&self, choice_id: i64) -> Result<Choice> {
        sqlx::query_as("SELECT id, question_id, choice_text, votes FROM choice WHERE id = ?")
            .bind(choice_id)
            .fetch_optional(&self.db.pool)
            .await?
            .ok_or_else(|| AppError::not_found("Choice"))
    }

    pub async fn update_choice(&self, choice_id: i64, request: UpdateChoiceRequest) -> Result<Choice> {
        request.validate()?;
        let mut choice = self.get_choice(choice_id).await?;

        if let Some(question_id) = request.question_id {
            self.find_question(question_id).await?;
            choice.question_id = question_id;
        }
        if let Some(text) = &request.choice_text {
            choice.choice_text = non_blank(text, "choice_text")?.to_string();
        }
        if let Some(votes) = request.votes {
            choice.votes = votes;
        }

        sqlx::query("UPDATE choice SET question_id = ?, choice_text = ?, votes = ? WHERE id = ?")
            .bind(choice.question_id)
            .bind(&choice.choice_text)
            .bind(choice.votes)
            .bind(choice.id)
            .execute(&self.db.pool)
            .await?;

        info!("Updated choice {}", choice_id);
        Ok(choice)
    }

    pub async fn delete_choice(&self, choice_id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM choice WHERE id = ?")
            .bind(choice_id)
            .execute(&self.db.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Choice"));
        }

        info!("Deleted choice {}", choice_id);
        Ok(())
    }

    async fn find_question(&self, question_id: i64) -> Result<Question> {
        sqlx::query_as("SELECT id, question_text, pub_date FROM question WHERE id = ?")
            .bind(question_id)
            .fetch_optional(&self.db.pool)
            .await?
            .ok_or_else(|| AppError::not_found("Question"))
    }
}

fn push_question_filters(
    builder: &mut QueryBuilder<'_, Sqlite>,
    query: &AdminQuestionQuery,
    now: DateTime<Utc>,
) {
    builder.push(" WHERE 1 = 1");

    if let Some(term) = query.q.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        builder
            .push(" AND question_text LIKE ")
            .push_bind(format!("%{}%", escape_like(term)))
            .push(" ESCAPE '\\'");
    }

    if let Some((start, end)) = query.pub_date.window(now) {
        builder
            .push(" AND pub_date >= ")
            .push_bind(start)
            .push(" AND pub_date < ")
            .push_bind(end);
    }
}

fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn non_blank<'a>(value: &'a str, field: &str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{} must not be blank", field)));
    }
    Ok(trimmed)
}
