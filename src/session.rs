//! Session persistence for generation outputs.
//!
//! The orchestrator itself is stateless; callers that want history hand a
//! derived subset of each [`crate::ideas::GenerationResult`] to a
//! [`SessionStore`]. The stored subset is deliberately smaller than the
//! full result: reframes, sketch prompts, image URLs, and layouts, the
//! parts worth revisiting later. Expired sessions are purged on a fixed
//! retention window.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ideas::{GenerationResult, LayoutIdea, Theme};

/// Sessions untouched for this many days are eligible for purging.
pub const RETENTION_DAYS: i64 = 180;

#[derive(Debug, Error, Diagnostic)]
pub enum SessionStoreError {
    #[error("session backend error: {message}")]
    #[diagnostic(
        code(ideaforge::session::backend),
        help("Ensure the database URL is valid and the store is reachable.")
    )]
    Backend { message: String },

    #[error("session serialization error: {0}")]
    #[diagnostic(code(ideaforge::session::serde))]
    Serde(#[from] serde_json::Error),
}

/// The durable subset of one generation result.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StoredOutputs {
    pub reframes: Vec<Theme<String>>,
    pub sketch_prompts: Vec<String>,
    /// One entry per image slot; `None` where the render failed.
    pub image_urls: Vec<Option<String>>,
    pub layouts: Vec<Theme<LayoutIdea>>,
}

impl StoredOutputs {
    /// Derives the durable subset from a full generation result.
    #[must_use]
    pub fn from_result(result: &GenerationResult) -> Self {
        Self {
            reframes: result.reframes.clone(),
            sketch_prompts: result.sketch_prompts.clone(),
            image_urls: result.images.iter().map(|slot| slot.url.clone()).collect(),
            layouts: result.layouts.clone(),
        }
    }
}

/// One stored session: the challenge plus the latest outputs, if any.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: String,
    pub challenge: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// `None` until the first generation for this session completes.
    pub outputs: Option<StoredOutputs>,
}

/// Durable storage seam for generation sessions.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Creates a session for a challenge. Creating an id that already
    /// exists is a no-op.
    async fn create_session(&self, id: &str, challenge: &str) -> Result<(), SessionStoreError>;

    /// Replaces the stored outputs for a session and refreshes its
    /// `updated_at` timestamp.
    async fn update_results(
        &self,
        id: &str,
        outputs: &StoredOutputs,
    ) -> Result<(), SessionStoreError>;

    /// Fetches a session by id, or `None` when it does not exist.
    async fn get_session(&self, id: &str) -> Result<Option<SessionRecord>, SessionStoreError>;

    /// Deletes sessions past the retention window. Returns the number of
    /// sessions removed.
    async fn purge_expired(&self) -> Result<u64, SessionStoreError>;
}

#[cfg(feature = "sqlite")]
pub use self::sqlite::SqliteSessionStore;

#[cfg(feature = "sqlite")]
mod sqlite {
    use super::*;

    use sqlx::{Row, SqlitePool};
    use tracing::instrument;

    // Applied on connect; idempotent.
    const SCHEMA: &str = r#"
        CREATE TABLE IF NOT EXISTS sessions (
            id TEXT PRIMARY KEY,
            challenge TEXT NOT NULL,
            outputs_json TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
    "#;

    /// SQLite-backed [`SessionStore`].
    ///
    /// The schema is applied on connect, so a fresh database file (or
    /// `sqlite::memory:` in tests) needs no external setup.
    #[derive(Clone)]
    pub struct SqliteSessionStore {
        pool: SqlitePool,
    }

    impl std::fmt::Debug for SqliteSessionStore {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("SqliteSessionStore").finish()
        }
    }

    impl SqliteSessionStore {
        /// Connects (or creates) a SQLite database at `database_url`,
        /// e.g. `sqlite://ideaforge.db` or `sqlite::memory:`.
        #[instrument(skip(database_url))]
        pub async fn connect(database_url: &str) -> Result<Self, SessionStoreError> {
            let pool = SqlitePool::connect(database_url)
                .await
                .map_err(|e| SessionStoreError::Backend {
                    message: format!("connect error: {e}"),
                })?;
            sqlx::query(SCHEMA)
                .execute(&pool)
                .await
                .map_err(|e| SessionStoreError::Backend {
                    message: format!("schema setup: {e}"),
                })?;
            Ok(Self { pool })
        }
    }

    #[async_trait]
    impl SessionStore for SqliteSessionStore {
        #[instrument(skip(self, challenge), err)]
        async fn create_session(&self, id: &str, challenge: &str) -> Result<(), SessionStoreError> {
            let now = Utc::now().to_rfc3339();
            sqlx::query(
                r#"
                INSERT OR IGNORE INTO sessions (id, challenge, created_at, updated_at)
                VALUES (?1, ?2, ?3, ?3)
                "#,
            )
            .bind(id)
            .bind(challenge)
            .bind(&now)
            .execute(&self.pool)
            .await
            .map_err(|e| SessionStoreError::Backend {
                message: format!("insert session: {e}"),
            })?;
            Ok(())
        }

        #[instrument(skip(self, outputs), err)]
        async fn update_results(
            &self,
            id: &str,
            outputs: &StoredOutputs,
        ) -> Result<(), SessionStoreError> {
            let outputs_json = serde_json::to_string(outputs)?;
            let now = Utc::now().to_rfc3339();
            sqlx::query(
                r#"
                UPDATE sessions SET outputs_json = ?2, updated_at = ?3
                WHERE id = ?1
                "#,
            )
            .bind(id)
            .bind(&outputs_json)
            .bind(&now)
            .execute(&self.pool)
            .await
            .map_err(|e| SessionStoreError::Backend {
                message: format!("update session: {e}"),
            })?;
            Ok(())
        }

        #[instrument(skip(self), err)]
        async fn get_session(&self, id: &str) -> Result<Option<SessionRecord>, SessionStoreError> {
            let row = sqlx::query(
                r#"
                SELECT id, challenge, outputs_json, created_at, updated_at
                FROM sessions WHERE id = ?1
                "#,
            )
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| SessionStoreError::Backend {
                message: format!("fetch session: {e}"),
            })?;

            let Some(row) = row else {
                return Ok(None);
            };

            let outputs = row
                .get::<Option<String>, _>("outputs_json")
                .map(|json| serde_json::from_str(&json))
                .transpose()?;
            Ok(Some(SessionRecord {
                id: row.get("id"),
                challenge: row.get("challenge"),
                created_at: parse_timestamp(&row.get::<String, _>("created_at"))?,
                updated_at: parse_timestamp(&row.get::<String, _>("updated_at"))?,
                outputs,
            }))
        }

        #[instrument(skip(self), err)]
        async fn purge_expired(&self) -> Result<u64, SessionStoreError> {
            let cutoff = (Utc::now() - chrono::Duration::days(RETENTION_DAYS)).to_rfc3339();
            let result = sqlx::query("DELETE FROM sessions WHERE updated_at < ?1")
                .bind(&cutoff)
                .execute(&self.pool)
                .await
                .map_err(|e| SessionStoreError::Backend {
                    message: format!("purge sessions: {e}"),
                })?;
            Ok(result.rows_affected())
        }
    }

    fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, SessionStoreError> {
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| SessionStoreError::Backend {
                message: format!("malformed timestamp {raw:?}: {e}"),
            })
    }
}
