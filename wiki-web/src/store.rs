//! # Artigos Salvos
//!
//! Persistência dos artigos salvos pelo usuário em SQLite (`sqlx`). Todas as operações
//! são restritas ao usuário fixo [`DEFAULT_USER_ID`]; não há autenticação.
//!
//! `frequent_words` é gravado como JSON e lido de volta já tipado.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::types::Json;
use sqlx::FromRow;
use thiserror::Error;
use tracing::info;
use wiki_core::WordFrequency;

/// Usuário único da aplicação.
pub const DEFAULT_USER_ID: &str = "default_user";

const ARTICLE_COLUMNS: &str = "id, title, wikipedia_id, wikipedia_url, summary, word_count, \
                               frequent_words, personal_notes, created_at, updated_at";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("article is already saved")]
    Duplicate,

    #[error("article {0} not found")]
    NotFound(i64),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Um artigo salvo, como devolvido pela API.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SavedArticle {
    pub id: i64,
    pub title: String,
    pub wikipedia_id: String,
    pub wikipedia_url: String,
    pub summary: Option<String>,
    pub word_count: Option<i64>,
    pub frequent_words: Option<Json<Vec<WordFrequency>>>,
    pub personal_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Dados para salvar um artigo. O dono é sempre [`DEFAULT_USER_ID`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewArticle {
    pub title: String,
    pub wikipedia_id: String,
    pub wikipedia_url: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub full_text: Option<String>,
    #[serde(default)]
    pub word_count: Option<i64>,
    #[serde(default)]
    pub frequent_words: Option<Vec<WordFrequency>>,
}

/// Campos editáveis de um artigo salvo. Apenas os `Some` são alterados.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArticlePatch {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub personal_notes: Option<String>,
}

/// Repositório de artigos salvos.
#[derive(Debug, Clone)]
pub struct ArticleStore {
    pool: SqlitePool,
}

impl ArticleStore {
    /// Conecta ao banco (criando o arquivo se necessário) e aplica o schema.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        info!("inicializando banco de dados em {database_url}");

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    /// Banco em memória com uma única conexão (cada conexão `:memory:` é um banco novo).
    pub async fn in_memory() -> Result<Self, StoreError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;
        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS saved_articles (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                wikipedia_id TEXT NOT NULL,
                wikipedia_url TEXT NOT NULL,
                summary TEXT,
                full_text TEXT,
                word_count INTEGER,
                frequent_words TEXT,
                personal_notes TEXT,
                user_id TEXT NOT NULL,
                created_at DATETIME NOT NULL,
                updated_at DATETIME NOT NULL
            );
            CREATE UNIQUE INDEX IF NOT EXISTS idx_saved_articles_wiki_user
                ON saved_articles (wikipedia_id, user_id);
            CREATE INDEX IF NOT EXISTS idx_saved_articles_user
                ON saved_articles (user_id);
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn find_by_wikipedia_id(&self, wikipedia_id: &str) -> Result<Option<SavedArticle>, StoreError> {
        let sql = format!(
            "SELECT {ARTICLE_COLUMNS} FROM saved_articles WHERE wikipedia_id = ? AND user_id = ?"
        );
        Ok(sqlx::query_as::<_, SavedArticle>(&sql)
            .bind(wikipedia_id)
            .bind(DEFAULT_USER_ID)
            .fetch_optional(&self.pool)
            .await?)
    }

    pub async fn get(&self, id: i64) -> Result<SavedArticle, StoreError> {
        let sql = format!("SELECT {ARTICLE_COLUMNS} FROM saved_articles WHERE id = ? AND user_id = ?");
        sqlx::query_as::<_, SavedArticle>(&sql)
            .bind(id)
            .bind(DEFAULT_USER_ID)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound(id))
    }

    /// Salva um artigo. O par `(wikipedia_id, user_id)` é único.
    pub async fn create(&self, article: NewArticle) -> Result<SavedArticle, StoreError> {
        let now = Utc::now();
        let sql = format!(
            "INSERT INTO saved_articles \
             (title, wikipedia_id, wikipedia_url, summary, full_text, word_count, frequent_words, \
              user_id, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?) \
             RETURNING {ARTICLE_COLUMNS}"
        );

        let result = sqlx::query_as::<_, SavedArticle>(&sql)
            .bind(article.title)
            .bind(article.wikipedia_id)
            .bind(article.wikipedia_url)
            .bind(article.summary)
            .bind(article.full_text)
            .bind(article.word_count)
            .bind(article.frequent_words.map(Json))
            .bind(DEFAULT_USER_ID)
            .bind(now)
            .bind(now)
            .fetch_one(&self.pool)
            .await;

        match result {
            Ok(saved) => {
                info!(id = saved.id, wikipedia_id = %saved.wikipedia_id, "artigo salvo");
                Ok(saved)
            }
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Err(StoreError::Duplicate),
            Err(e) => Err(e.into()),
        }
    }

    /// Uma página de artigos e o total de artigos do usuário.
    pub async fn list(&self, skip: i64, limit: i64) -> Result<(Vec<SavedArticle>, i64), StoreError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM saved_articles WHERE user_id = ?")
            .bind(DEFAULT_USER_ID)
            .fetch_one(&self.pool)
            .await?;

        let sql = format!(
            "SELECT {ARTICLE_COLUMNS} FROM saved_articles WHERE user_id = ? \
             ORDER BY id LIMIT ? OFFSET ?"
        );
        let items = sqlx::query_as::<_, SavedArticle>(&sql)
            .bind(DEFAULT_USER_ID)
            .bind(limit)
            .bind(skip)
            .fetch_all(&self.pool)
            .await?;

        Ok((items, total))
    }

    pub async fn update(&self, id: i64, patch: ArticlePatch) -> Result<SavedArticle, StoreError> {
        let sql = format!(
            "UPDATE saved_articles SET \
             title = COALESCE(?, title), \
             summary = COALESCE(?, summary), \
             personal_notes = COALESCE(?, personal_notes), \
             updated_at = ? \
             WHERE id = ? AND user_id = ? \
             RETURNING {ARTICLE_COLUMNS}"
        );
        sqlx::query_as::<_, SavedArticle>(&sql)
            .bind(patch.title)
            .bind(patch.summary)
            .bind(patch.personal_notes)
            .bind(Utc::now())
            .bind(id)
            .bind(DEFAULT_USER_ID)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound(id))
    }

    /// Remove um artigo. Devolve `false` se ele não existia.
    pub async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM saved_articles WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(DEFAULT_USER_ID)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_article(wikipedia_id: &str) -> NewArticle {
        NewArticle {
            title: format!("Article {wikipedia_id}"),
            wikipedia_id: wikipedia_id.to_string(),
            wikipedia_url: format!("https://en.wikipedia.org/?curid={wikipedia_id}"),
            summary: Some("A summary".to_string()),
            full_text: Some("Full text".to_string()),
            word_count: Some(2),
            frequent_words: Some(vec![WordFrequency { word: "text".into(), count: 1 }]),
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let store = ArticleStore::in_memory().await.unwrap();
        let saved = store.create(new_article("100")).await.unwrap();

        assert!(saved.id > 0);
        assert_eq!(saved.title, "Article 100");
        assert_eq!(saved.personal_notes, None);
        let words = saved.frequent_words.as_ref().unwrap();
        assert_eq!(words.0[0].word, "text");

        let fetched = store.get(saved.id).await.unwrap();
        assert_eq!(fetched.wikipedia_id, "100");

        let by_wiki = store.find_by_wikipedia_id("100").await.unwrap();
        assert_eq!(by_wiki.map(|a| a.id), Some(saved.id));
        assert!(store.find_by_wikipedia_id("999").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_is_rejected() {
        let store = ArticleStore::in_memory().await.unwrap();
        store.create(new_article("7")).await.unwrap();
        let err = store.create(new_article("7")).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate));
    }

    #[tokio::test]
    async fn test_list_paginates_with_total() {
        let store = ArticleStore::in_memory().await.unwrap();
        for id in ["1", "2", "3"] {
            store.create(new_article(id)).await.unwrap();
        }

        let (items, total) = store.list(1, 1).await.unwrap();
        assert_eq!(total, 3);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].wikipedia_id, "2");

        let (items, _) = store.list(0, 100).await.unwrap();
        assert_eq!(items.len(), 3);
    }

    #[tokio::test]
    async fn test_update_only_changes_given_fields() {
        let store = ArticleStore::in_memory().await.unwrap();
        let saved = store.create(new_article("5")).await.unwrap();

        let patch = ArticlePatch {
            personal_notes: Some("read later".to_string()),
            ..ArticlePatch::default()
        };
        let updated = store.update(saved.id, patch).await.unwrap();

        assert_eq!(updated.personal_notes.as_deref(), Some("read later"));
        assert_eq!(updated.title, saved.title);
        assert_eq!(updated.summary, saved.summary);
        assert!(updated.updated_at >= saved.updated_at);

        let missing = store.update(9999, ArticlePatch::default()).await.unwrap_err();
        assert!(matches!(missing, StoreError::NotFound(9999)));
    }

    #[tokio::test]
    async fn test_delete() {
        let store = ArticleStore::in_memory().await.unwrap();
        let saved = store.create(new_article("8")).await.unwrap();

        assert!(store.delete(saved.id).await.unwrap());
        assert!(!store.delete(saved.id).await.unwrap());
        assert!(matches!(store.get(saved.id).await, Err(StoreError::NotFound(_))));
    }
}
