//! Postgres 本地化短语实现

use crate::error::StorageError;
use crate::traits::PhraseStore;
use crate::validation::ensure_correlation;
use domain::RequestContext;
use sqlx::{PgPool, Row};
use std::collections::HashMap;

pub struct PgPhraseStore {
    pub pool: PgPool,
}

impl PgPhraseStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl PhraseStore for PgPhraseStore {
    async fn get_phrases(
        &self,
        ctx: &RequestContext,
        phrase_ids: &[i32],
    ) -> Result<HashMap<i32, String>, StorageError> {
        ensure_correlation(ctx)?;
        if phrase_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows = sqlx::query(
            "select phrase_id, text from locale_phrases where phrase_id = any($1)",
        )
        .bind(phrase_ids)
        .fetch_all(&self.pool)
        .await?;
        let mut items = HashMap::with_capacity(rows.len());
        for row in rows {
            items.insert(row.try_get("phrase_id")?, row.try_get("text")?);
        }
        Ok(items)
    }
}
