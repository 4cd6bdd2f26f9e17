//! Postgres 站场实现

use crate::error::StorageError;
use crate::models::FacilityAlarmRecord;
use crate::traits::FacilityStore;
use crate::validation::ensure_node_id;
use domain::{FacilityTag, RequestContext};
use sqlx::{PgPool, Row};

pub struct PgFacilityStore {
    pub pool: PgPool,
}

impl PgFacilityStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl FacilityStore for PgFacilityStore {
    async fn get_facility_tags(
        &self,
        ctx: &RequestContext,
        node_id: &str,
    ) -> Result<Vec<FacilityTag>, StorageError> {
        ensure_node_id(ctx, node_id)?;
        let rows = sqlx::query(
            "select description, address, value, engineering_units, alarm_state \
             from facility_tags where node_id = $1 and enabled order by display_order, address",
        )
        .bind(node_id)
        .fetch_all(&self.pool)
        .await?;
        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            items.push(FacilityTag {
                description: row.try_get("description")?,
                address: row.try_get("address")?,
                value: row.try_get("value")?,
                engineering_units: row.try_get("engineering_units")?,
                alarm_state: row.try_get("alarm_state")?,
            });
        }
        Ok(items)
    }

    async fn get_facility_alarms(
        &self,
        ctx: &RequestContext,
        node_id: &str,
    ) -> Result<Vec<FacilityAlarmRecord>, StorageError> {
        ensure_node_id(ctx, node_id)?;
        let rows = sqlx::query(
            "select description, priority from facility_alarms \
             where node_id = $1 and active order by address",
        )
        .bind(node_id)
        .fetch_all(&self.pool)
        .await?;
        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            items.push(FacilityAlarmRecord {
                description: row.try_get("description")?,
                priority: row.try_get("priority")?,
            });
        }
        Ok(items)
    }
}
