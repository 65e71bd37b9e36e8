//! In-memory repositories and router helpers for tests.
//!
//! [`InMemoryStore`] implements every repository trait over plain vectors and
//! mirrors the database constraints the services rely on: unique usernames,
//! one profile per user, unique non-null `nim`, unknown users as `NotFound`
//! and cascading deletes from users.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{http::HeaderValue, middleware::from_fn_with_state, Router};
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::core::config::SessionConfig;
use crate::core::error::{AppError, Result};
use crate::core::middleware::session_middleware;
use crate::features::auth::model::{AuthenticatedUser, Session};
use crate::features::auth::password;
use crate::features::auth::services::{AuthService, LoginOutcome};
use crate::features::auth::SessionStore;
use crate::features::mahasiswa::models::{Mahasiswa, NewMahasiswa};
use crate::features::mahasiswa::MahasiswaRepository;
use crate::features::nilai::models::{NewNilai, Nilai, NilaiRecord};
use crate::features::nilai::repositories::NilaiFilter;
use crate::features::nilai::NilaiRepository;
use crate::features::profiles::models::{Profile, ProfileDetail, Role};
use crate::features::profiles::repositories::ProfileFilter;
use crate::features::profiles::ProfileRepository;
use crate::features::users::models::{NewUser, User, UserSummary};
use crate::features::users::UserRepository;

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    profiles: Vec<Profile>,
    nilai: Vec<Nilai>,
    mahasiswa: Vec<Mahasiswa>,
    sessions: Vec<Session>,
}

impl Tables {
    fn user(&self, id: Uuid) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    fn role_of(&self, user_id: Uuid) -> Option<Role> {
        self.profiles
            .iter()
            .find(|p| p.user_id == user_id)
            .map(|p| p.role)
    }

    fn summary(&self, user: &User) -> UserSummary {
        UserSummary {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            is_staff: user.is_staff,
            role: self.role_of(user.id),
            created_at: user.created_at,
        }
    }

    fn profile_detail(&self, profile: &Profile) -> Option<ProfileDetail> {
        self.user(profile.user_id).map(|user| ProfileDetail {
            id: profile.id,
            user_id: profile.user_id,
            username: user.username.clone(),
            email: user.email.clone(),
            role: profile.role,
        })
    }

    fn nilai_record(&self, nilai: &Nilai) -> Option<NilaiRecord> {
        self.user(nilai.mahasiswa_id).map(|user| NilaiRecord {
            id: nilai.id,
            mahasiswa_id: nilai.mahasiswa_id,
            username: user.username.clone(),
            mata_kuliah: nilai.mata_kuliah.clone(),
            nilai: nilai.nilai,
            created_at: nilai.created_at,
        })
    }

    fn nilai_records(&self, keep: impl Fn(&NilaiRecord) -> bool) -> Vec<NilaiRecord> {
        let mut records: Vec<NilaiRecord> = self
            .nilai
            .iter()
            .filter_map(|n| self.nilai_record(n))
            .filter(|r| keep(r))
            .collect();
        records.sort_by(|a, b| {
            (&a.username, &a.mata_kuliah, a.id).cmp(&(&b.username, &b.mata_kuliah, b.id))
        });
        records
    }

    fn nim_taken(&self, nim: Option<&str>, except: Option<Uuid>) -> bool {
        nim.is_some_and(|nim| {
            self.mahasiswa
                .iter()
                .any(|m| m.nim.as_deref() == Some(nim) && Some(m.id) != except)
        })
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn page<T>(items: Vec<T>, offset: i64, limit: i64) -> (Vec<T>, i64) {
    let total = items.len() as i64;
    let items = items
        .into_iter()
        .skip(offset.max(0) as usize)
        .take(limit.max(0) as usize)
        .collect();
    (items, total)
}

/// Repository implementation backed by vectors behind a mutex
#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Insert a user with a hashed password and, when given, a profile
    pub async fn seed_user(&self, username: &str, password: &str, role: Option<Role>) -> User {
        let password_hash = password::hash_password(password.to_string())
            .await
            .expect("hash password");
        let user = UserRepository::create(
            self,
            NewUser {
                username: username.to_string(),
                email: None,
                password_hash,
                is_staff: false,
            },
        )
        .await
        .expect("seed user");

        if let Some(role) = role {
            ProfileRepository::create(self, user.id, role)
                .await
                .expect("seed profile");
        }
        user
    }

    /// Insert a staff user without a profile
    pub async fn seed_staff(&self, username: &str, password: &str) -> User {
        let user = self.seed_user(username, password, None).await;
        let mut tables = self.tables.lock().await;
        let stored = tables
            .users
            .iter_mut()
            .find(|u| u.id == user.id)
            .expect("seeded user");
        stored.is_staff = true;
        stored.clone()
    }

    pub async fn set_email(&self, user_id: Uuid, email: &str) {
        let mut tables = self.tables.lock().await;
        if let Some(user) = tables.users.iter_mut().find(|u| u.id == user_id) {
            user.email = Some(email.to_string());
        }
    }

    pub async fn seed_nilai(&self, mahasiswa_id: Uuid, mata_kuliah: &str, nilai: f64) -> Nilai {
        self.create_nilai(NewNilai {
            mahasiswa_id,
            mata_kuliah: mata_kuliah.to_string(),
            nilai,
        })
        .await
        .expect("seed nilai")
    }

    pub async fn nilai_for(&self, mahasiswa_id: Uuid) -> Vec<Nilai> {
        let tables = self.tables.lock().await;
        tables
            .nilai
            .iter()
            .filter(|n| n.mahasiswa_id == mahasiswa_id)
            .cloned()
            .collect()
    }

    pub async fn session_count_for(&self, user_id: Uuid) -> usize {
        self.session_hashes_for(user_id).await.len()
    }

    pub async fn session_hashes_for(&self, user_id: Uuid) -> Vec<String> {
        let tables = self.tables.lock().await;
        tables
            .sessions
            .iter()
            .filter(|s| s.user_id == user_id)
            .map(|s| s.token_hash.clone())
            .collect()
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(&self, new_user: NewUser) -> Result<User> {
        let mut tables = self.tables.lock().await;
        if tables.users.iter().any(|u| u.username == new_user.username) {
            return Err(AppError::Conflict(format!(
                "Username '{}' is already taken",
                new_user.username
            )));
        }

        let user = User {
            id: Uuid::now_v7(),
            username: new_user.username,
            email: new_user.email,
            password_hash: new_user.password_hash,
            is_staff: new_user.is_staff,
            created_at: Utc::now(),
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        Ok(self.tables.lock().await.user(id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let tables = self.tables.lock().await;
        Ok(tables.users.iter().find(|u| u.username == username).cloned())
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<(Vec<UserSummary>, i64)> {
        let tables = self.tables.lock().await;
        let mut summaries: Vec<UserSummary> =
            tables.users.iter().map(|u| tables.summary(u)).collect();
        summaries.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(page(summaries, offset, limit))
    }

    async fn find_summary(&self, id: Uuid) -> Result<Option<UserSummary>> {
        let tables = self.tables.lock().await;
        Ok(tables.user(id).map(|u| tables.summary(u)))
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let mut tables = self.tables.lock().await;
        let before = tables.users.len();
        tables.users.retain(|u| u.id != id);
        if tables.users.len() == before {
            return Ok(false);
        }

        tables.profiles.retain(|p| p.user_id != id);
        tables.nilai.retain(|n| n.mahasiswa_id != id);
        tables.sessions.retain(|s| s.user_id != id);
        Ok(true)
    }
}

#[async_trait]
impl ProfileRepository for InMemoryStore {
    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<Profile>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .profiles
            .iter()
            .find(|p| p.user_id == user_id)
            .cloned())
    }

    async fn find_detail(&self, user_id: Uuid) -> Result<Option<ProfileDetail>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .profiles
            .iter()
            .find(|p| p.user_id == user_id)
            .and_then(|p| tables.profile_detail(p)))
    }

    async fn create(&self, user_id: Uuid, role: Role) -> Result<Profile> {
        let mut tables = self.tables.lock().await;
        if tables.user(user_id).is_none() {
            return Err(AppError::NotFound(format!("User {} not found", user_id)));
        }
        if tables.profiles.iter().any(|p| p.user_id == user_id) {
            return Err(AppError::Conflict("User already has a profile".to_string()));
        }

        let profile = Profile {
            id: Uuid::now_v7(),
            user_id,
            role,
        };
        tables.profiles.push(profile.clone());
        Ok(profile)
    }

    async fn update_role(&self, user_id: Uuid, role: Role) -> Result<Option<Profile>> {
        let mut tables = self.tables.lock().await;
        Ok(tables
            .profiles
            .iter_mut()
            .find(|p| p.user_id == user_id)
            .map(|p| {
                p.role = role;
                p.clone()
            }))
    }

    async fn delete(&self, user_id: Uuid) -> Result<bool> {
        let mut tables = self.tables.lock().await;
        let before = tables.profiles.len();
        tables.profiles.retain(|p| p.user_id != user_id);
        Ok(tables.profiles.len() < before)
    }

    async fn list(
        &self,
        filter: &ProfileFilter,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<ProfileDetail>, i64)> {
        let tables = self.tables.lock().await;
        let mut details: Vec<ProfileDetail> = tables
            .profiles
            .iter()
            .filter_map(|p| tables.profile_detail(p))
            .filter(|d| filter.role.map_or(true, |role| d.role == role))
            .filter(|d| {
                filter.search.as_deref().map_or(true, |term| {
                    contains_ci(&d.username, term)
                        || d.email.as_deref().is_some_and(|e| contains_ci(e, term))
                })
            })
            .collect();
        details.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(page(details, offset, limit))
    }

    async fn list_by_role(&self, role: Role) -> Result<Vec<ProfileDetail>> {
        let tables = self.tables.lock().await;
        let mut details: Vec<ProfileDetail> = tables
            .profiles
            .iter()
            .filter(|p| p.role == role)
            .filter_map(|p| tables.profile_detail(p))
            .collect();
        details.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(details)
    }
}

#[async_trait]
impl NilaiRepository for InMemoryStore {
    async fn create_nilai(&self, new_nilai: NewNilai) -> Result<Nilai> {
        let mut tables = self.tables.lock().await;
        if tables.user(new_nilai.mahasiswa_id).is_none() {
            return Err(AppError::NotFound(format!(
                "User {} not found",
                new_nilai.mahasiswa_id
            )));
        }

        let nilai = Nilai {
            id: Uuid::now_v7(),
            mahasiswa_id: new_nilai.mahasiswa_id,
            mata_kuliah: new_nilai.mata_kuliah,
            nilai: new_nilai.nilai,
            created_at: Utc::now(),
        };
        tables.nilai.push(nilai.clone());
        Ok(nilai)
    }

    async fn find_nilai(&self, id: Uuid) -> Result<Option<NilaiRecord>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .nilai
            .iter()
            .find(|n| n.id == id)
            .and_then(|n| tables.nilai_record(n)))
    }

    async fn update_nilai(&self, id: Uuid, changes: NewNilai) -> Result<Option<Nilai>> {
        let mut tables = self.tables.lock().await;
        if tables.user(changes.mahasiswa_id).is_none() {
            return Err(AppError::NotFound(format!(
                "User {} not found",
                changes.mahasiswa_id
            )));
        }

        Ok(tables.nilai.iter_mut().find(|n| n.id == id).map(|n| {
            n.mahasiswa_id = changes.mahasiswa_id;
            n.mata_kuliah = changes.mata_kuliah;
            n.nilai = changes.nilai;
            n.clone()
        }))
    }

    async fn delete_nilai(&self, id: Uuid) -> Result<bool> {
        let mut tables = self.tables.lock().await;
        let before = tables.nilai.len();
        tables.nilai.retain(|n| n.id != id);
        Ok(tables.nilai.len() < before)
    }

    async fn list_nilai(
        &self,
        filter: &NilaiFilter,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<NilaiRecord>, i64)> {
        let tables = self.tables.lock().await;
        let records = tables.nilai_records(|r| {
            let matches_search = filter.search.as_deref().map_or(true, |term| {
                contains_ci(&r.username, term) || contains_ci(&r.mata_kuliah, term)
            });
            let matches_course = filter
                .mata_kuliah
                .as_deref()
                .map_or(true, |course| r.mata_kuliah == course);
            matches_search && matches_course
        });
        Ok(page(records, offset, limit))
    }

    async fn list_all(&self) -> Result<Vec<NilaiRecord>> {
        Ok(self.tables.lock().await.nilai_records(|_| true))
    }

    async fn list_by_mahasiswa(&self, mahasiswa_id: Uuid) -> Result<Vec<NilaiRecord>> {
        Ok(self
            .tables
            .lock()
            .await
            .nilai_records(|r| r.mahasiswa_id == mahasiswa_id))
    }
}

#[async_trait]
impl MahasiswaRepository for InMemoryStore {
    async fn create_mahasiswa(&self, new_mahasiswa: NewMahasiswa) -> Result<Mahasiswa> {
        let mut tables = self.tables.lock().await;
        if tables.nim_taken(new_mahasiswa.nim.as_deref(), None) {
            return Err(AppError::Conflict(format!(
                "Mahasiswa with nim '{}' already exists",
                new_mahasiswa.nim.unwrap_or_default()
            )));
        }

        let now = Utc::now();
        let mahasiswa = Mahasiswa {
            id: Uuid::now_v7(),
            nim: new_mahasiswa.nim,
            firstname: new_mahasiswa.firstname,
            lastname: new_mahasiswa.lastname,
            jurusan: new_mahasiswa.jurusan,
            created_at: now,
            updated_at: now,
        };
        tables.mahasiswa.push(mahasiswa.clone());
        Ok(mahasiswa)
    }

    async fn find_mahasiswa(&self, id: Uuid) -> Result<Option<Mahasiswa>> {
        let tables = self.tables.lock().await;
        Ok(tables.mahasiswa.iter().find(|m| m.id == id).cloned())
    }

    async fn update_mahasiswa(
        &self,
        id: Uuid,
        changes: NewMahasiswa,
    ) -> Result<Option<Mahasiswa>> {
        let mut tables = self.tables.lock().await;
        if tables.nim_taken(changes.nim.as_deref(), Some(id)) {
            return Err(AppError::Conflict(format!(
                "Mahasiswa with nim '{}' already exists",
                changes.nim.unwrap_or_default()
            )));
        }

        Ok(tables.mahasiswa.iter_mut().find(|m| m.id == id).map(|m| {
            m.nim = changes.nim;
            m.firstname = changes.firstname;
            m.lastname = changes.lastname;
            m.jurusan = changes.jurusan;
            m.updated_at = Utc::now();
            m.clone()
        }))
    }

    async fn delete_mahasiswa(&self, id: Uuid) -> Result<bool> {
        let mut tables = self.tables.lock().await;
        let before = tables.mahasiswa.len();
        tables.mahasiswa.retain(|m| m.id != id);
        Ok(tables.mahasiswa.len() < before)
    }

    async fn list_mahasiswa(
        &self,
        search: Option<&str>,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Mahasiswa>, i64)> {
        let tables = self.tables.lock().await;
        let mut items: Vec<Mahasiswa> = tables
            .mahasiswa
            .iter()
            .filter(|m| {
                search.map_or(true, |term| {
                    m.nim.as_deref().is_some_and(|nim| contains_ci(nim, term))
                        || contains_ci(&m.firstname, term)
                        || contains_ci(&m.lastname, term)
                        || m.jurusan.as_deref().is_some_and(|j| contains_ci(j, term))
                })
            })
            .cloned()
            .collect();
        // NULL nim sorts last, as in Postgres
        items.sort_by(|a, b| {
            (a.nim.is_none(), &a.nim, &a.lastname, &a.firstname, a.id).cmp(&(
                b.nim.is_none(),
                &b.nim,
                &b.lastname,
                &b.firstname,
                b.id,
            ))
        });
        Ok(page(items, offset, limit))
    }
}

#[async_trait]
impl SessionStore for InMemoryStore {
    async fn create_session(
        &self,
        user_id: Uuid,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<Session> {
        let mut tables = self.tables.lock().await;
        if tables.user(user_id).is_none() {
            return Err(AppError::NotFound(format!("User {} not found", user_id)));
        }
        if tables.sessions.iter().any(|s| s.token_hash == token_hash) {
            return Err(AppError::Conflict("Session token collision".to_string()));
        }

        let session = Session {
            id: Uuid::now_v7(),
            user_id,
            token_hash: token_hash.to_string(),
            created_at: Utc::now(),
            expires_at,
        };
        tables.sessions.push(session.clone());
        Ok(session)
    }

    async fn find_identity(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<AuthenticatedUser>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .sessions
            .iter()
            .find(|s| s.token_hash == token_hash && !s.is_expired(now))
            .and_then(|s| tables.user(s.user_id))
            .map(|user| AuthenticatedUser {
                user_id: user.id,
                username: user.username.clone(),
                is_staff: user.is_staff,
                role: tables.role_of(user.id),
            }))
    }

    async fn delete_session(&self, token_hash: &str) -> Result<bool> {
        let mut tables = self.tables.lock().await;
        let before = tables.sessions.len();
        tables.sessions.retain(|s| s.token_hash != token_hash);
        Ok(tables.sessions.len() < before)
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64> {
        let mut tables = self.tables.lock().await;
        let before = tables.sessions.len();
        tables.sessions.retain(|s| !s.is_expired(now));
        Ok((before - tables.sessions.len()) as u64)
    }
}

/// Auth service over the in-memory store with default session settings
pub fn auth_service(store: &Arc<InMemoryStore>) -> Arc<AuthService> {
    Arc::new(AuthService::new(
        store.clone(),
        store.clone(),
        SessionConfig::default(),
    ))
}

/// Wrap a router with session resolution, as the application does
pub fn session_layer(router: Router, auth: Arc<AuthService>) -> Router {
    router.layer(from_fn_with_state(auth, session_middleware))
}

/// Log in and return a `Cookie` header value carrying the session token
pub async fn session_cookie(auth: &AuthService, username: &str, password: &str) -> HeaderValue {
    match auth.login(username, password).await.expect("login") {
        LoginOutcome::Authenticated(session) => HeaderValue::from_str(&format!(
            "{}={}",
            auth.session_config().cookie_name,
            session.token
        ))
        .expect("cookie header"),
        LoginOutcome::InvalidCredentials => panic!("invalid test credentials for {}", username),
    }
}
