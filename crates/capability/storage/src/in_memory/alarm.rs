//! 告警内存存储实现
//!
//! 仅用于本地演示和测试。

use crate::error::StorageError;
use crate::models::{CameraAlarmRecord, ConfigAlarmRecord, ExceptionRecord, HostAlarmRecord};
use crate::traits::AlarmStore;
use crate::validation::{ensure_correlation, ensure_node_id};
use domain::RequestContext;
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
struct AlarmTables {
    config: HashMap<String, Vec<ConfigAlarmRecord>>,
    host: HashMap<Uuid, Vec<HostAlarmRecord>>,
    camera: HashMap<Uuid, Vec<CameraAlarmRecord>>,
    exceptions: HashMap<String, Vec<ExceptionRecord>>,
}

/// 告警内存存储
pub struct InMemoryAlarmStore {
    tables: RwLock<AlarmTables>,
}

impl InMemoryAlarmStore {
    /// 创建新的告警存储
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(AlarmTables::default()),
        }
    }

    pub fn insert_config_alarms(&self, node_id: &str, alarms: Vec<ConfigAlarmRecord>) {
        if let Ok(mut tables) = self.tables.write() {
            tables.config.insert(node_id.to_string(), alarms);
        }
    }

    pub fn insert_host_alarms(&self, asset_id: Uuid, alarms: Vec<HostAlarmRecord>) {
        if let Ok(mut tables) = self.tables.write() {
            tables.host.insert(asset_id, alarms);
        }
    }

    pub fn insert_camera_alarms(&self, asset_id: Uuid, alarms: Vec<CameraAlarmRecord>) {
        if let Ok(mut tables) = self.tables.write() {
            tables.camera.insert(asset_id, alarms);
        }
    }

    pub fn insert_exceptions(&self, node_id: &str, exceptions: Vec<ExceptionRecord>) {
        if let Ok(mut tables) = self.tables.write() {
            tables.exceptions.insert(node_id.to_string(), exceptions);
        }
    }
}

#[async_trait::async_trait]
impl AlarmStore for InMemoryAlarmStore {
    async fn get_config_alarms(
        &self,
        ctx: &RequestContext,
        node_id: &str,
    ) -> Result<Vec<ConfigAlarmRecord>, StorageError> {
        ensure_node_id(ctx, node_id)?;
        let items = self
            .tables
            .read()
            .ok()
            .and_then(|tables| tables.config.get(node_id).cloned())
            .unwrap_or_default();
        Ok(items)
    }

    async fn get_host_alarms(
        &self,
        ctx: &RequestContext,
        asset_id: Uuid,
    ) -> Result<Vec<HostAlarmRecord>, StorageError> {
        ensure_correlation(ctx)?;
        let items = self
            .tables
            .read()
            .ok()
            .and_then(|tables| tables.host.get(&asset_id).cloned())
            .unwrap_or_default();
        Ok(items)
    }

    async fn get_camera_alarms(
        &self,
        ctx: &RequestContext,
        asset_id: Uuid,
    ) -> Result<Vec<CameraAlarmRecord>, StorageError> {
        ensure_correlation(ctx)?;
        let items = self
            .tables
            .read()
            .ok()
            .and_then(|tables| tables.camera.get(&asset_id).cloned())
            .unwrap_or_default();
        Ok(items)
    }

    async fn get_exceptions(
        &self,
        ctx: &RequestContext,
        node_id: &str,
    ) -> Result<Vec<ExceptionRecord>, StorageError> {
        ensure_node_id(ctx, node_id)?;
        let items = self
            .tables
            .read()
            .ok()
            .and_then(|tables| tables.exceptions.get(node_id).cloned())
            .unwrap_or_default();
        Ok(items)
    }
}
