//! Postgres 告警实现

use crate::error::StorageError;
use crate::models::{CameraAlarmRecord, ConfigAlarmRecord, ExceptionRecord, HostAlarmRecord};
use crate::traits::AlarmStore;
use crate::validation::{ensure_correlation, ensure_node_id};
use domain::RequestContext;
use sqlx::{PgPool, Row};
use uuid::Uuid;

pub struct PgAlarmStore {
    pub pool: PgPool,
}

impl PgAlarmStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl AlarmStore for PgAlarmStore {
    async fn get_config_alarms(
        &self,
        ctx: &RequestContext,
        node_id: &str,
    ) -> Result<Vec<ConfigAlarmRecord>, StorageError> {
        ensure_node_id(ctx, node_id)?;
        let rows = sqlx::query(
            "select a.address, a.bit, a.description, a.priority, a.normal_state, \
             d.value::text as current_value \
             from config_alarms a \
             left join curr_raw_scan_data d on d.node_id = a.node_id and d.address = a.address \
             where a.node_id = $1 and a.enabled",
        )
        .bind(node_id)
        .fetch_all(&self.pool)
        .await?;
        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            items.push(ConfigAlarmRecord {
                address: row.try_get("address")?,
                bit: row.try_get("bit")?,
                description: row.try_get("description")?,
                priority: row.try_get("priority")?,
                normal_state: row.try_get("normal_state")?,
                current_value: row.try_get("current_value")?,
            });
        }
        Ok(items)
    }

    async fn get_host_alarms(
        &self,
        ctx: &RequestContext,
        asset_id: Uuid,
    ) -> Result<Vec<HostAlarmRecord>, StorageError> {
        ensure_correlation(ctx)?;
        let rows = sqlx::query(
            "select description, priority, alarm_state from host_alarms \
             where asset_id = $1 and enabled",
        )
        .bind(asset_id)
        .fetch_all(&self.pool)
        .await?;
        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            items.push(HostAlarmRecord {
                description: row.try_get("description")?,
                priority: row.try_get("priority")?,
                alarm_state: row.try_get("alarm_state")?,
            });
        }
        Ok(items)
    }

    async fn get_camera_alarms(
        &self,
        ctx: &RequestContext,
        asset_id: Uuid,
    ) -> Result<Vec<CameraAlarmRecord>, StorageError> {
        ensure_correlation(ctx)?;
        let rows = sqlx::query(
            "select description, priority from camera_alarms \
             where asset_id = $1 and acknowledged = false",
        )
        .bind(asset_id)
        .fetch_all(&self.pool)
        .await?;
        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            items.push(CameraAlarmRecord {
                description: row.try_get("description")?,
                priority: row.try_get("priority")?,
            });
        }
        Ok(items)
    }

    async fn get_exceptions(
        &self,
        ctx: &RequestContext,
        node_id: &str,
    ) -> Result<Vec<ExceptionRecord>, StorageError> {
        ensure_node_id(ctx, node_id)?;
        let rows = sqlx::query(
            "select description, priority from node_exceptions where node_id = $1",
        )
        .bind(node_id)
        .fetch_all(&self.pool)
        .await?;
        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            items.push(ExceptionRecord {
                description: row.try_get("description")?,
                priority: row.try_get("priority")?,
            });
        }
        Ok(items)
    }
}
