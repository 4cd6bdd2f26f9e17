//! 站场内存存储实现

use crate::error::StorageError;
use crate::models::FacilityAlarmRecord;
use crate::traits::FacilityStore;
use crate::validation::ensure_node_id;
use domain::{FacilityTag, RequestContext};
use std::collections::HashMap;
use std::sync::RwLock;

/// 站场内存存储
pub struct InMemoryFacilityStore {
    tags: RwLock<HashMap<String, Vec<FacilityTag>>>,
    alarms: RwLock<HashMap<String, Vec<FacilityAlarmRecord>>>,
}

impl InMemoryFacilityStore {
    pub fn new() -> Self {
        Self {
            tags: RwLock::new(HashMap::new()),
            alarms: RwLock::new(HashMap::new()),
        }
    }

    pub fn insert_tags(&self, node_id: &str, tags: Vec<FacilityTag>) {
        if let Ok(mut map) = self.tags.write() {
            map.insert(node_id.to_string(), tags);
        }
    }

    pub fn insert_alarms(&self, node_id: &str, alarms: Vec<FacilityAlarmRecord>) {
        if let Ok(mut map) = self.alarms.write() {
            map.insert(node_id.to_string(), alarms);
        }
    }
}

#[async_trait::async_trait]
impl FacilityStore for InMemoryFacilityStore {
    async fn get_facility_tags(
        &self,
        ctx: &RequestContext,
        node_id: &str,
    ) -> Result<Vec<FacilityTag>, StorageError> {
        ensure_node_id(ctx, node_id)?;
        let items = self
            .tags
            .read()
            .ok()
            .and_then(|map| map.get(node_id).cloned())
            .unwrap_or_default();
        Ok(items)
    }

    async fn get_facility_alarms(
        &self,
        ctx: &RequestContext,
        node_id: &str,
    ) -> Result<Vec<FacilityAlarmRecord>, StorageError> {
        ensure_node_id(ctx, node_id)?;
        let items = self
            .alarms
            .read()
            .ok()
            .and_then(|map| map.get(node_id).cloned())
            .unwrap_or_default();
        Ok(items)
    }
}
