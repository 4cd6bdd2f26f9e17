//! Postgres 节点实现

use crate::error::StorageError;
use crate::models::NodeRecord;
use crate::traits::NodeStore;
use crate::validation::ensure_correlation;
use domain::RequestContext;
use sqlx::{PgPool, Row};
use uuid::Uuid;

pub struct PgNodeStore {
    pub pool: PgPool,
}

impl PgNodeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl NodeStore for PgNodeStore {
    async fn find_node_by_asset(
        &self,
        ctx: &RequestContext,
        asset_id: Uuid,
    ) -> Result<Option<NodeRecord>, StorageError> {
        ensure_correlation(ctx)?;
        let row = sqlx::query(
            "select node_id, asset_id, enabled, port_id, node_address, poc_type \
             from node_master where asset_id = $1",
        )
        .bind(asset_id)
        .fetch_optional(&self.pool)
        .await?;
        let Some(row) = row else {
            return Ok(None);
        };
        Ok(Some(NodeRecord {
            node_id: row.try_get("node_id")?,
            asset_id: row.try_get("asset_id")?,
            enabled: row.try_get("enabled")?,
            port_id: row.try_get("port_id")?,
            node_address: row.try_get("node_address")?,
            poc_type: row.try_get("poc_type")?,
        }))
    }
}
