//! Early-access submission entity and its database operations.
//!
//! A submission is a lead-capture record: contact info plus an optional
//! financial profile. Clients only ever create submissions; updates and
//! deletes go through the admin API.
//!
//! Queries use the runtime sqlx API (`query_as` / `QueryBuilder`) so the
//! workspace builds without a live database.

use crate::entities::FormType;
use crate::framework::DatabaseProcessor;
use kanau::processor::Processor;
use rust_decimal::Decimal;
use sqlx::QueryBuilder;
use uuid::Uuid;

/// A stored early-access submission.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EarlyAccessSubmission {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub form_type: FormType,
    pub initial_deposit: Option<Decimal>,
    pub monthly_contribution: Option<Decimal>,
    pub target_apy: Option<Decimal>,
    pub calculations: Option<serde_json::Value>,
    /// Requester metadata captured at submit time.
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: time::PrimitiveDateTime,
}

const SUBMISSION_COLUMNS: &str = "id, email, full_name, phone, company, form_type, \
     initial_deposit, monthly_contribution, target_apy, calculations, \
     ip_address, user_agent, created_at";

#[derive(Debug, Clone)]
/// Insert a new submission and return the stored row.
pub struct InsertEarlyAccessSubmission {
    pub email: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub form_type: FormType,
    pub initial_deposit: Option<Decimal>,
    pub monthly_contribution: Option<Decimal>,
    pub target_apy: Option<Decimal>,
    pub calculations: Option<serde_json::Value>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

impl Processor<InsertEarlyAccessSubmission> for DatabaseProcessor {
    type Output = EarlyAccessSubmission;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:InsertEarlyAccessSubmission")]
    async fn process(
        &self,
        cmd: InsertEarlyAccessSubmission,
    ) -> Result<EarlyAccessSubmission, sqlx::Error> {
        let sql = format!(
            "INSERT INTO early_access_submissions \
             (email, full_name, phone, company, form_type, initial_deposit, \
              monthly_contribution, target_apy, calculations, ip_address, user_agent) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {SUBMISSION_COLUMNS}"
        );
        sqlx::query_as::<_, EarlyAccessSubmission>(&sql)
            .bind(cmd.email)
            .bind(cmd.full_name)
            .bind(cmd.phone)
            .bind(cmd.company)
            .bind(cmd.form_type)
            .bind(cmd.initial_deposit)
            .bind(cmd.monthly_contribution)
            .bind(cmd.target_apy)
            .bind(cmd.calculations)
            .bind(cmd.ip_address)
            .bind(cmd.user_agent)
            .fetch_one(&self.pool)
            .await
    }
}

#[derive(Debug, Clone, Copy)]
/// Fetch a single submission by id.
pub struct GetEarlyAccessSubmissionById {
    pub id: Uuid,
}

impl Processor<GetEarlyAccessSubmissionById> for DatabaseProcessor {
    type Output = Option<EarlyAccessSubmission>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:GetEarlyAccessSubmissionById")]
    async fn process(
        &self,
        query: GetEarlyAccessSubmissionById,
    ) -> Result<Option<EarlyAccessSubmission>, sqlx::Error> {
        let sql = format!(
            "SELECT {SUBMISSION_COLUMNS} FROM early_access_submissions WHERE id = $1"
        );
        sqlx::query_as::<_, EarlyAccessSubmission>(&sql)
            .bind(query.id)
            .fetch_optional(&self.pool)
            .await
    }
}

#[derive(Debug, Clone)]
/// List submissions newest-first with pagination and an optional
/// form-type filter.
pub struct ListEarlyAccessSubmissions {
    pub limit: i64,
    pub offset: i64,
    pub form_type: Option<FormType>,
}

impl Processor<ListEarlyAccessSubmissions> for DatabaseProcessor {
    type Output = Vec<EarlyAccessSubmission>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:ListEarlyAccessSubmissions")]
    async fn process(
        &self,
        query: ListEarlyAccessSubmissions,
    ) -> Result<Vec<EarlyAccessSubmission>, sqlx::Error> {
        let mut builder = QueryBuilder::new(format!(
            "SELECT {SUBMISSION_COLUMNS} FROM early_access_submissions"
        ));
        if let Some(form_type) = query.form_type {
            builder.push(" WHERE form_type = ").push_bind(form_type);
        }
        builder
            .push(" ORDER BY created_at DESC LIMIT ")
            .push_bind(query.limit)
            .push(" OFFSET ")
            .push_bind(query.offset);

        builder
            .build_query_as::<EarlyAccessSubmission>()
            .fetch_all(&self.pool)
            .await
    }
}

#[derive(Debug, Clone, Copy)]
/// Count submissions matching the optional form-type filter; drives the
/// pagination summary for the list endpoint.
pub struct CountEarlyAccessSubmissions {
    pub form_type: Option<FormType>,
}

impl Processor<CountEarlyAccessSubmissions> for DatabaseProcessor {
    type Output = i64;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:CountEarlyAccessSubmissions")]
    async fn process(&self, query: CountEarlyAccessSubmissions) -> Result<i64, sqlx::Error> {
        let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM early_access_submissions");
        if let Some(form_type) = query.form_type {
            builder.push(" WHERE form_type = ").push_bind(form_type);
        }
        builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
    }
}

/// Aggregate counters over all submissions.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EarlyAccessStats {
    pub total: i64,
    pub savings_count: i64,
    pub investment_count: i64,
    /// Submissions within the last 7 days.
    pub recent_count: i64,
    pub projected_initial_deposits: Decimal,
    pub projected_monthly_contributions: Decimal,
}

#[derive(Debug, Clone, Copy)]
/// Compute aggregate stats in a single query.
pub struct GetEarlyAccessStats;

impl Processor<GetEarlyAccessStats> for DatabaseProcessor {
    type Output = EarlyAccessStats;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:GetEarlyAccessStats")]
    async fn process(&self, _query: GetEarlyAccessStats) -> Result<EarlyAccessStats, sqlx::Error> {
        sqlx::query_as::<_, EarlyAccessStats>(
            r#"
            SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE form_type = 'savings') AS savings_count,
                COUNT(*) FILTER (WHERE form_type = 'investment') AS investment_count,
                COUNT(*) FILTER (WHERE created_at > NOW() - INTERVAL '7 days') AS recent_count,
                COALESCE(SUM(initial_deposit), 0) AS projected_initial_deposits,
                COALESCE(SUM(monthly_contribution), 0) AS projected_monthly_contributions
            FROM early_access_submissions
            "#,
        )
        .fetch_one(&self.pool)
        .await
    }
}

#[derive(Debug, Clone)]
/// Partially update a submission (admin path). `None` fields keep their
/// current value.
pub struct UpdateEarlyAccessSubmission {
    pub id: Uuid,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub form_type: Option<FormType>,
    pub initial_deposit: Option<Decimal>,
    pub monthly_contribution: Option<Decimal>,
    pub target_apy: Option<Decimal>,
}

impl Processor<UpdateEarlyAccessSubmission> for DatabaseProcessor {
    type Output = Option<EarlyAccessSubmission>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:UpdateEarlyAccessSubmission")]
    async fn process(
        &self,
        cmd: UpdateEarlyAccessSubmission,
    ) -> Result<Option<EarlyAccessSubmission>, sqlx::Error> {
        let sql = format!(
            "UPDATE early_access_submissions SET \
                email = COALESCE($2, email), \
                full_name = COALESCE($3, full_name), \
                phone = COALESCE($4, phone), \
                company = COALESCE($5, company), \
                form_type = COALESCE($6, form_type), \
                initial_deposit = COALESCE($7, initial_deposit), \
                monthly_contribution = COALESCE($8, monthly_contribution), \
                target_apy = COALESCE($9, target_apy) \
             WHERE id = $1 \
             RETURNING {SUBMISSION_COLUMNS}"
        );
        sqlx::query_as::<_, EarlyAccessSubmission>(&sql)
            .bind(cmd.id)
            .bind(cmd.email)
            .bind(cmd.full_name)
            .bind(cmd.phone)
            .bind(cmd.company)
            .bind(cmd.form_type)
            .bind(cmd.initial_deposit)
            .bind(cmd.monthly_contribution)
            .bind(cmd.target_apy)
            .fetch_optional(&self.pool)
            .await
    }
}

#[derive(Debug, Clone, Copy)]
/// Delete a submission (admin path). Returns whether a row was removed.
pub struct DeleteEarlyAccessSubmission {
    pub id: Uuid,
}

impl Processor<DeleteEarlyAccessSubmission> for DatabaseProcessor {
    type Output = bool;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:DeleteEarlyAccessSubmission")]
    async fn process(&self, cmd: DeleteEarlyAccessSubmission) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM early_access_submissions WHERE id = $1")
            .bind(cmd.id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
