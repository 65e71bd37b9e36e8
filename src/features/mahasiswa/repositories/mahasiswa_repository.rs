use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::database::{contains_pattern, map_db_error};
use crate::core::error::{AppError, Result};
use crate::features::mahasiswa::models::{Mahasiswa, NewMahasiswa};

/// Storage for registry student records
#[async_trait]
pub trait MahasiswaRepository: Send + Sync {
    /// Insert a record. A `nim` already held by another record fails with
    /// `Conflict`; any number of records may have no `nim`.
    async fn create_mahasiswa(&self, new_mahasiswa: NewMahasiswa) -> Result<Mahasiswa>;

    async fn find_mahasiswa(&self, id: Uuid) -> Result<Option<Mahasiswa>>;

    async fn update_mahasiswa(&self, id: Uuid, changes: NewMahasiswa)
        -> Result<Option<Mahasiswa>>;

    async fn delete_mahasiswa(&self, id: Uuid) -> Result<bool>;

    /// Page through records ordered by nim, optionally searching nim, names
    /// and jurusan
    async fn list_mahasiswa(
        &self,
        search: Option<&str>,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Mahasiswa>, i64)>;
}

const COLUMNS: &str = "id, nim, firstname, lastname, jurusan, created_at, updated_at";

fn duplicate_nim(nim: Option<&str>) -> String {
    format!(
        "Mahasiswa with nim '{}' already exists",
        nim.unwrap_or_default()
    )
}

pub struct PgMahasiswaRepository {
    pool: PgPool,
}

impl PgMahasiswaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MahasiswaRepository for PgMahasiswaRepository {
    async fn create_mahasiswa(&self, new_mahasiswa: NewMahasiswa) -> Result<Mahasiswa> {
        sqlx::query_as::<_, Mahasiswa>(&format!(
            r#"
            INSERT INTO mahasiswa (id, nim, firstname, lastname, jurusan)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(Uuid::now_v7())
        .bind(&new_mahasiswa.nim)
        .bind(&new_mahasiswa.firstname)
        .bind(&new_mahasiswa.lastname)
        .bind(&new_mahasiswa.jurusan)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_db_error(
                e,
                &duplicate_nim(new_mahasiswa.nim.as_deref()),
                "Referenced record not found",
            )
        })
    }

    async fn find_mahasiswa(&self, id: Uuid) -> Result<Option<Mahasiswa>> {
        sqlx::query_as::<_, Mahasiswa>(&format!(
            "SELECT {} FROM mahasiswa WHERE id = $1",
            COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get mahasiswa: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn update_mahasiswa(
        &self,
        id: Uuid,
        changes: NewMahasiswa,
    ) -> Result<Option<Mahasiswa>> {
        sqlx::query_as::<_, Mahasiswa>(&format!(
            r#"
            UPDATE mahasiswa
            SET nim = $2, firstname = $3, lastname = $4, jurusan = $5, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(id)
        .bind(&changes.nim)
        .bind(&changes.firstname)
        .bind(&changes.lastname)
        .bind(&changes.jurusan)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            map_db_error(
                e,
                &duplicate_nim(changes.nim.as_deref()),
                "Referenced record not found",
            )
        })
    }

    async fn delete_mahasiswa(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM mahasiswa WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete mahasiswa: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_mahasiswa(
        &self,
        search: Option<&str>,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Mahasiswa>, i64)> {
        let pattern = search.map(contains_pattern);
        let where_clause = r#"
            WHERE $1::text IS NULL
               OR nim ILIKE $1
               OR firstname ILIKE $1
               OR lastname ILIKE $1
               OR jurusan ILIKE $1
        "#;

        let total: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM mahasiswa {}",
            where_clause
        ))
        .bind(&pattern)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count mahasiswa: {:?}", e);
            AppError::Database(e)
        })?;

        let items = sqlx::query_as::<_, Mahasiswa>(&format!(
            r#"
            SELECT {} FROM mahasiswa
            {}
            ORDER BY nim NULLS LAST, lastname, firstname, id
            OFFSET $2 LIMIT $3
            "#,
            COLUMNS, where_clause
        ))
        .bind(&pattern)
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list mahasiswa: {:?}", e);
            AppError::Database(e)
        })?;

        Ok((items, total))
    }
}
