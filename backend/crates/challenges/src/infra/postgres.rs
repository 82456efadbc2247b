//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::entities::{Challenge, NewChallenge};
use crate::domain::repository::ChallengeRepository;
use crate::error::ChallengesResult;

/// PostgreSQL-backed challenge repository
#[derive(Clone)]
pub struct PgChallengeRepository {
    pool: PgPool,
}

impl PgChallengeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl ChallengeRepository for PgChallengeRepository {
    async fn list(&self) -> ChallengesResult<Vec<Challenge>> {
        let rows = sqlx::query_as::<_, ChallengeRow>(
            r#"
            SELECT
                id,
                title,
                problem,
                concept,
                category,
                difficulty,
                sample_code,
                test_cases,
                created_at
            FROM challenges
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ChallengeRow::into_challenge).collect())
    }

    async fn insert(&self, challenge: &NewChallenge) -> ChallengesResult<Challenge> {
        let row = sqlx::query_as::<_, ChallengeRow>(
            r#"
            INSERT INTO challenges (
                title,
                problem,
                concept,
                category,
                difficulty,
                sample_code,
                test_cases
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING
                id,
                title,
                problem,
                concept,
                category,
                difficulty,
                sample_code,
                test_cases,
                created_at
            "#,
        )
        .bind(&challenge.title)
        .bind(&challenge.problem)
        .bind(&challenge.concept)
        .bind(&challenge.category)
        .bind(&challenge.difficulty)
        .bind(&challenge.sample_code)
        .bind(&challenge.test_cases)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_challenge())
    }

    async fn delete(&self, id: i64) -> ChallengesResult<u64> {
        let deleted = sqlx::query("DELETE FROM challenges WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted)
    }

    async fn delete_many(&self, ids: &[i64]) -> ChallengesResult<u64> {
        let deleted = sqlx::query("DELETE FROM challenges WHERE id = ANY($1)")
            .bind(ids)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted)
    }
}

// Internal row type for sqlx mapping

#[derive(sqlx::FromRow)]
struct ChallengeRow {
    id: i64,
    title: String,
    problem: String,
    concept: Option<String>,
    category: String,
    difficulty: String,
    sample_code: Option<String>,
    test_cases: Option<String>,
    created_at: DateTime<Utc>,
}

impl ChallengeRow {
    fn into_challenge(self) -> Challenge {
        Challenge {
            id: self.id,
            title: self.title,
            problem: self.problem,
            concept: self.concept,
            category: self.category,
            difficulty: self.difficulty,
            sample_code: self.sample_code,
            test_cases: self.test_cases,
            created_at: self.created_at,
        }
    }
}
