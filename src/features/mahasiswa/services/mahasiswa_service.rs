use std::sync::Arc;

use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::mahasiswa::dtos::{MahasiswaDto, MahasiswaQueryParams, MahasiswaResponseDto};
use crate::features::mahasiswa::models::NewMahasiswa;
use crate::features::mahasiswa::repositories::MahasiswaRepository;

/// Service for the student registry
pub struct MahasiswaService {
    repository: Arc<dyn MahasiswaRepository>,
}

impl MahasiswaService {
    pub fn new(repository: Arc<dyn MahasiswaRepository>) -> Self {
        Self { repository }
    }

    pub async fn list(
        &self,
        params: &MahasiswaQueryParams,
    ) -> Result<(Vec<MahasiswaResponseDto>, i64)> {
        let search = optional_text(params.search.clone());
        let (items, total) = self
            .repository
            .list_mahasiswa(search.as_deref(), params.offset(), params.limit())
            .await?;

        Ok((items.into_iter().map(Into::into).collect(), total))
    }

    pub async fn get(&self, id: Uuid) -> Result<MahasiswaResponseDto> {
        self.repository
            .find_mahasiswa(id)
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound(format!("Mahasiswa {} not found", id)))
    }

    pub async fn create(&self, dto: MahasiswaDto) -> Result<MahasiswaResponseDto> {
        let mahasiswa = self.repository.create_mahasiswa(into_new(dto)).await?;
        tracing::info!(
            "Mahasiswa created: id={}, nim={:?}",
            mahasiswa.id,
            mahasiswa.nim
        );
        Ok(mahasiswa.into())
    }

    pub async fn update(&self, id: Uuid, dto: MahasiswaDto) -> Result<MahasiswaResponseDto> {
        let mahasiswa = self
            .repository
            .update_mahasiswa(id, into_new(dto))
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Mahasiswa {} not found", id)))?;

        tracing::info!("Mahasiswa updated: id={}", mahasiswa.id);
        Ok(mahasiswa.into())
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        if !self.repository.delete_mahasiswa(id).await? {
            return Err(AppError::NotFound(format!("Mahasiswa {} not found", id)));
        }

        tracing::info!("Mahasiswa deleted: id={}", id);
        Ok(())
    }
}

fn into_new(dto: MahasiswaDto) -> NewMahasiswa {
    NewMahasiswa {
        nim: optional_text(dto.nim),
        firstname: dto.firstname.trim().to_string(),
        lastname: dto.lastname.trim().to_string(),
        jurusan: optional_text(dto.jurusan),
    }
}

/// Trimmed text, with blank treated as absent
fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::InMemoryStore;

    fn service(store: &Arc<InMemoryStore>) -> MahasiswaService {
        MahasiswaService::new(store.clone())
    }

    fn dto(nim: Option<&str>, firstname: &str, jurusan: Option<&str>) -> MahasiswaDto {
        MahasiswaDto {
            nim: nim.map(str::to_string),
            firstname: firstname.to_string(),
            lastname: "Wijaya".to_string(),
            jurusan: jurusan.map(str::to_string),
        }
    }

    fn query(search: Option<&str>) -> MahasiswaQueryParams {
        MahasiswaQueryParams {
            page: 1,
            page_size: 10,
            search: search.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_create_returns_label() {
        let store = InMemoryStore::new();

        let created = service(&store)
            .create(dto(Some("A11.001"), "Andi", Some("Informatika")))
            .await
            .unwrap();

        assert_eq!(created.label, "A11.001 - Andi Wijaya - Informatika");
    }

    #[tokio::test]
    async fn test_duplicate_nim_fails_second_write() {
        let store = InMemoryStore::new();
        let service = service(&store);
        service
            .create(dto(Some("A11.001"), "Andi", None))
            .await
            .unwrap();

        let result = service.create(dto(Some("A11.001"), "Budi", None)).await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
        assert_eq!(service.list(&query(None)).await.unwrap().1, 1);
    }

    #[tokio::test]
    async fn test_records_without_nim_never_collide() {
        let store = InMemoryStore::new();
        let service = service(&store);

        service.create(dto(None, "Andi", None)).await.unwrap();
        service.create(dto(Some("  "), "Budi", None)).await.unwrap();
        let third = service.create(dto(None, "Citra", None)).await.unwrap();

        assert_eq!(third.nim, None);
        assert_eq!(third.label, "None - Citra Wijaya - None");
        assert_eq!(service.list(&query(None)).await.unwrap().1, 3);
    }

    #[tokio::test]
    async fn test_update_to_taken_nim_conflicts() {
        let store = InMemoryStore::new();
        let service = service(&store);
        service
            .create(dto(Some("A11.001"), "Andi", None))
            .await
            .unwrap();
        let budi = service
            .create(dto(Some("A11.002"), "Budi", None))
            .await
            .unwrap();

        let result = service
            .update(budi.id, dto(Some("A11.001"), "Budi", None))
            .await;
        assert!(matches!(result, Err(AppError::Conflict(_))));

        let same_nim = service
            .update(budi.id, dto(Some("A11.002"), "Budi", Some("Sistem Informasi")))
            .await
            .unwrap();
        assert_eq!(same_nim.jurusan.as_deref(), Some("Sistem Informasi"));
    }

    #[tokio::test]
    async fn test_search_over_nim_names_and_jurusan() {
        let store = InMemoryStore::new();
        let service = service(&store);
        service
            .create(dto(Some("A11.001"), "Andi", Some("Informatika")))
            .await
            .unwrap();
        service
            .create(dto(Some("B12.002"), "Budi", Some("Sistem Informasi")))
            .await
            .unwrap();

        assert_eq!(service.list(&query(Some("b12"))).await.unwrap().1, 1);
        assert_eq!(service.list(&query(Some("andi"))).await.unwrap().1, 1);
        assert_eq!(service.list(&query(Some("wijaya"))).await.unwrap().1, 2);
        assert_eq!(service.list(&query(Some("informa"))).await.unwrap().1, 2);
        assert_eq!(service.list(&query(Some("%"))).await.unwrap().1, 0);
    }

    #[tokio::test]
    async fn test_delete_unknown_is_not_found() {
        let store = InMemoryStore::new();
        let result = service(&store).delete(Uuid::now_v7()).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
