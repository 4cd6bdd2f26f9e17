//! Postgres 系统参数实现

use crate::error::StorageError;
use crate::traits::SystemParameterStore;
use crate::validation::ensure_correlation;
use domain::RequestContext;
use sqlx::{PgPool, Row};
use std::collections::HashMap;

pub struct PgSystemParameterStore {
    pub pool: PgPool,
}

impl PgSystemParameterStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl SystemParameterStore for PgSystemParameterStore {
    async fn get_parameter(
        &self,
        ctx: &RequestContext,
        name: &str,
    ) -> Result<Option<String>, StorageError> {
        ensure_correlation(ctx)?;
        let row = sqlx::query("select value from system_parameters where parameter = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        match row {
            Some(row) => Ok(row.try_get("value")?),
            None => Ok(None),
        }
    }

    async fn get_unit_defaults(
        &self,
        ctx: &RequestContext,
    ) -> Result<HashMap<String, String>, StorageError> {
        ensure_correlation(ctx)?;
        let rows = sqlx::query(
            "select category, unit from system_unit_defaults order by category",
        )
        .fetch_all(&self.pool)
        .await?;
        let mut items = HashMap::with_capacity(rows.len());
        for row in rows {
            items.insert(row.try_get("category")?, row.try_get("unit")?);
        }
        Ok(items)
    }
}
