//! Postgres 用户默认值实现

use crate::error::StorageError;
use crate::traits::UserDefaultStore;
use crate::validation::ensure_correlation;
use domain::RequestContext;
use sqlx::{PgPool, Row};
use std::collections::HashMap;

pub struct PgUserDefaultStore {
    pub pool: PgPool,
}

impl PgUserDefaultStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl UserDefaultStore for PgUserDefaultStore {
    async fn get_unit_preferences(
        &self,
        ctx: &RequestContext,
        user_id: &str,
    ) -> Result<HashMap<String, String>, StorageError> {
        ensure_correlation(ctx)?;
        let rows = sqlx::query(
            "select property, value from user_defaults \
             where user_id = $1 and default_group = 'UnitPreference'",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        let mut items = HashMap::with_capacity(rows.len());
        for row in rows {
            items.insert(row.try_get("property")?, row.try_get("value")?);
        }
        Ok(items)
    }
}
