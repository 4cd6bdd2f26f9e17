//! Postgres 端口配置实现

use crate::error::StorageError;
use crate::models::PortRecord;
use crate::traits::PortStore;
use crate::validation::ensure_correlation;
use domain::RequestContext;
use sqlx::{PgPool, Row};

pub struct PgPortStore {
    pub pool: PgPool,
}

impl PgPortStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl PortStore for PgPortStore {
    async fn find_port(
        &self,
        ctx: &RequestContext,
        port_id: i32,
    ) -> Result<Option<PortRecord>, StorageError> {
        ensure_correlation(ctx)?;
        let row = sqlx::query(
            "select port_id, description, hostname, legacy \
             from port_configurations where port_id = $1",
        )
        .bind(port_id)
        .fetch_optional(&self.pool)
        .await?;
        let Some(row) = row else {
            return Ok(None);
        };
        Ok(Some(PortRecord {
            port_id: row.try_get("port_id")?,
            description: row.try_get("description")?,
            hostname: row.try_get("hostname")?,
            legacy: row.try_get("legacy")?,
        }))
    }
}
