//! Postgres 实时扫描数据实现

use crate::error::StorageError;
use crate::traits::RawScanStore;
use crate::validation::ensure_node_id;
use domain::RequestContext;
use sqlx::{PgPool, Row};
use std::collections::HashMap;

pub struct PgRawScanStore {
    pub pool: PgPool,
}

impl PgRawScanStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl RawScanStore for PgRawScanStore {
    async fn get_current_raw_scan_data(
        &self,
        ctx: &RequestContext,
        node_id: &str,
        registers: &[i32],
    ) -> Result<HashMap<i32, f64>, StorageError> {
        ensure_node_id(ctx, node_id)?;
        if registers.is_empty() {
            return Ok(HashMap::new());
        }
        let rows = sqlx::query(
            "select address, value from curr_raw_scan_data \
             where node_id = $1 and address = any($2) and value is not null",
        )
        .bind(node_id)
        .bind(registers)
        .fetch_all(&self.pool)
        .await?;
        let mut items = HashMap::with_capacity(rows.len());
        for row in rows {
            items.insert(row.try_get("address")?, row.try_get("value")?);
        }
        Ok(items)
    }

    async fn get_current_raw_scan_string_values(
        &self,
        ctx: &RequestContext,
        node_id: &str,
        addresses: &[String],
    ) -> Result<HashMap<String, String>, StorageError> {
        ensure_node_id(ctx, node_id)?;
        if addresses.is_empty() {
            return Ok(HashMap::new());
        }
        let rows = sqlx::query(
            "select string_id, string_value from curr_raw_scan_data \
             where node_id = $1 and string_id = any($2) and string_value is not null",
        )
        .bind(node_id)
        .bind(addresses)
        .fetch_all(&self.pool)
        .await?;
        let mut items = HashMap::with_capacity(rows.len());
        for row in rows {
            items.insert(row.try_get("string_id")?, row.try_get("string_value")?);
        }
        Ok(items)
    }
}
