//! 实时扫描数据内存存储实现

use crate::error::StorageError;
use crate::traits::RawScanStore;
use crate::validation::ensure_node_id;
use domain::RequestContext;
use std::collections::HashMap;
use std::sync::RwLock;

/// 实时扫描数据内存存储
///
/// 仅返回请求中列出的地址。
pub struct InMemoryRawScanStore {
    numeric: RwLock<HashMap<String, HashMap<i32, f64>>>,
    strings: RwLock<HashMap<String, HashMap<String, String>>>,
}

impl InMemoryRawScanStore {
    pub fn new() -> Self {
        Self {
            numeric: RwLock::new(HashMap::new()),
            strings: RwLock::new(HashMap::new()),
        }
    }

    pub fn set_value(&self, node_id: &str, address: i32, value: f64) {
        if let Ok(mut map) = self.numeric.write() {
            map.entry(node_id.to_string())
                .or_default()
                .insert(address, value);
        }
    }

    pub fn set_string_value(&self, node_id: &str, address: &str, value: &str) {
        if let Ok(mut map) = self.strings.write() {
            map.entry(node_id.to_string())
                .or_default()
                .insert(address.to_string(), value.to_string());
        }
    }
}

#[async_trait::async_trait]
impl RawScanStore for InMemoryRawScanStore {
    async fn get_current_raw_scan_data(
        &self,
        ctx: &RequestContext,
        node_id: &str,
        registers: &[i32],
    ) -> Result<HashMap<i32, f64>, StorageError> {
        ensure_node_id(ctx, node_id)?;
        let map = self
            .numeric
            .read()
            .map_err(|_| StorageError::LockPoisoned("raw_scan"))?;
        let Some(values) = map.get(node_id) else {
            return Ok(HashMap::new());
        };
        Ok(registers
            .iter()
            .filter_map(|address| values.get(address).map(|value| (*address, *value)))
            .collect())
    }

    async fn get_current_raw_scan_string_values(
        &self,
        ctx: &RequestContext,
        node_id: &str,
        addresses: &[String],
    ) -> Result<HashMap<String, String>, StorageError> {
        ensure_node_id(ctx, node_id)?;
        let map = self
            .strings
            .read()
            .map_err(|_| StorageError::LockPoisoned("raw_scan"))?;
        let Some(values) = map.get(node_id) else {
            return Ok(HashMap::new());
        };
        Ok(addresses
            .iter()
            .filter_map(|address| {
                values
                    .get(address)
                    .map(|value| (address.clone(), value.clone()))
            })
            .collect())
    }
}
