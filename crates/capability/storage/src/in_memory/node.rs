//! 节点内存存储实现

use crate::error::StorageError;
use crate::models::NodeRecord;
use crate::traits::NodeStore;
use crate::validation::ensure_correlation;
use domain::RequestContext;
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

/// 节点内存存储（以 asset_id 为键）
pub struct InMemoryNodeStore {
    nodes: RwLock<HashMap<Uuid, NodeRecord>>,
}

impl InMemoryNodeStore {
    pub fn new() -> Self {
        Self {
            nodes: RwLock::new(HashMap::new()),
        }
    }

    pub fn insert_node(&self, record: NodeRecord) {
        if let Ok(mut map) = self.nodes.write() {
            map.insert(record.asset_id, record);
        }
    }
}

#[async_trait::async_trait]
impl NodeStore for InMemoryNodeStore {
    async fn find_node_by_asset(
        &self,
        ctx: &RequestContext,
        asset_id: Uuid,
    ) -> Result<Option<NodeRecord>, StorageError> {
        ensure_correlation(ctx)?;
        Ok(self
            .nodes
            .read()
            .ok()
            .and_then(|map| map.get(&asset_id).cloned()))
    }
}
