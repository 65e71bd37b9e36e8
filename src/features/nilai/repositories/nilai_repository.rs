use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::database::{contains_pattern, map_db_error};
use crate::core::error::{AppError, Result};
use crate::features::nilai::models::{NewNilai, Nilai, NilaiRecord};

/// Filters accepted by the admin nilai listing
#[derive(Debug, Clone, Default)]
pub struct NilaiFilter {
    /// Case-insensitive substring of the student username or the course
    pub search: Option<String>,
    /// Exact course name
    pub mata_kuliah: Option<String>,
}

/// Storage for grade rows. Any user may be referenced; the MAHASISWA
/// restriction only applies when offering candidates.
#[async_trait]
pub trait NilaiRepository: Send + Sync {
    /// Insert a grade. An unknown user fails with `NotFound`.
    async fn create_nilai(&self, new_nilai: NewNilai) -> Result<Nilai>;

    async fn find_nilai(&self, id: Uuid) -> Result<Option<NilaiRecord>>;

    async fn update_nilai(&self, id: Uuid, changes: NewNilai) -> Result<Option<Nilai>>;

    async fn delete_nilai(&self, id: Uuid) -> Result<bool>;

    async fn list_nilai(
        &self,
        filter: &NilaiFilter,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<NilaiRecord>, i64)>;

    /// Every grade, ordered by username then course
    async fn list_all(&self) -> Result<Vec<NilaiRecord>>;

    /// Grades of one student, ordered by course
    async fn list_by_mahasiswa(&self, mahasiswa_id: Uuid) -> Result<Vec<NilaiRecord>>;
}

const RECORD_COLUMNS: &str =
    "n.id, n.mahasiswa_id, u.username, n.mata_kuliah, n.nilai, n.created_at";

pub struct PgNilaiRepository {
    pool: PgPool,
}

impl PgNilaiRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NilaiRepository for PgNilaiRepository {
    async fn create_nilai(&self, new_nilai: NewNilai) -> Result<Nilai> {
        sqlx::query_as::<_, Nilai>(
            r#"
            INSERT INTO nilai (id, mahasiswa_id, mata_kuliah, nilai)
            VALUES ($1, $2, $3, $4)
            RETURNING id, mahasiswa_id, mata_kuliah, nilai, created_at
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(new_nilai.mahasiswa_id)
        .bind(&new_nilai.mata_kuliah)
        .bind(new_nilai.nilai)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_db_error(
                e,
                "Nilai already exists",
                &format!("User {} not found", new_nilai.mahasiswa_id),
            )
        })
    }

    async fn find_nilai(&self, id: Uuid) -> Result<Option<NilaiRecord>> {
        sqlx::query_as::<_, NilaiRecord>(&format!(
            "SELECT {} FROM nilai n JOIN users u ON u.id = n.mahasiswa_id WHERE n.id = $1",
            RECORD_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get nilai: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn update_nilai(&self, id: Uuid, changes: NewNilai) -> Result<Option<Nilai>> {
        sqlx::query_as::<_, Nilai>(
            r#"
            UPDATE nilai
            SET mahasiswa_id = $2, mata_kuliah = $3, nilai = $4
            WHERE id = $1
            RETURNING id, mahasiswa_id, mata_kuliah, nilai, created_at
            "#,
        )
        .bind(id)
        .bind(changes.mahasiswa_id)
        .bind(&changes.mata_kuliah)
        .bind(changes.nilai)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            map_db_error(
                e,
                "Nilai already exists",
                &format!("User {} not found", changes.mahasiswa_id),
            )
        })
    }

    async fn delete_nilai(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM nilai WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete nilai: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_nilai(
        &self,
        filter: &NilaiFilter,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<NilaiRecord>, i64)> {
        let search = filter.search.as_deref().map(contains_pattern);
        let where_clause = r#"
            WHERE ($1::text IS NULL OR u.username ILIKE $1 OR n.mata_kuliah ILIKE $1)
              AND ($2::text IS NULL OR n.mata_kuliah = $2)
        "#;

        let total: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM nilai n JOIN users u ON u.id = n.mahasiswa_id {}",
            where_clause
        ))
        .bind(&search)
        .bind(&filter.mata_kuliah)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count nilai: {:?}", e);
            AppError::Database(e)
        })?;

        let items = sqlx::query_as::<_, NilaiRecord>(&format!(
            r#"
            SELECT {} FROM nilai n JOIN users u ON u.id = n.mahasiswa_id
            {}
            ORDER BY u.username, n.mata_kuliah, n.id
            OFFSET $3 LIMIT $4
            "#,
            RECORD_COLUMNS, where_clause
        ))
        .bind(&search)
        .bind(&filter.mata_kuliah)
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list nilai: {:?}", e);
            AppError::Database(e)
        })?;

        Ok((items, total))
    }

    async fn list_all(&self) -> Result<Vec<NilaiRecord>> {
        sqlx::query_as::<_, NilaiRecord>(&format!(
            r#"
            SELECT {} FROM nilai n JOIN users u ON u.id = n.mahasiswa_id
            ORDER BY u.username, n.mata_kuliah, n.id
            "#,
            RECORD_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list all nilai: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn list_by_mahasiswa(&self, mahasiswa_id: Uuid) -> Result<Vec<NilaiRecord>> {
        sqlx::query_as::<_, NilaiRecord>(&format!(
            r#"
            SELECT {} FROM nilai n JOIN users u ON u.id = n.mahasiswa_id
            WHERE n.mahasiswa_id = $1
            ORDER BY n.mata_kuliah, n.id
            "#,
            RECORD_COLUMNS
        ))
        .bind(mahasiswa_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list nilai by mahasiswa: {:?}", e);
            AppError::Database(e)
        })
    }
}
