//! 端口内存存储实现

use crate::error::StorageError;
use crate::models::PortRecord;
use crate::traits::PortStore;
use crate::validation::ensure_correlation;
use domain::RequestContext;
use std::collections::HashMap;
use std::sync::RwLock;

/// 端口内存存储
pub struct InMemoryPortStore {
    ports: RwLock<HashMap<i32, PortRecord>>,
}

impl InMemoryPortStore {
    pub fn new() -> Self {
        Self {
            ports: RwLock::new(HashMap::new()),
        }
    }

    pub fn insert_port(&self, record: PortRecord) {
        if let Ok(mut map) = self.ports.write() {
            map.insert(record.port_id, record);
        }
    }
}

#[async_trait::async_trait]
impl PortStore for InMemoryPortStore {
    async fn find_port(
        &self,
        ctx: &RequestContext,
        port_id: i32,
    ) -> Result<Option<PortRecord>, StorageError> {
        ensure_correlation(ctx)?;
        Ok(self
            .ports
            .read()
            .ok()
            .and_then(|map| map.get(&port_id).cloned()))
    }
}
