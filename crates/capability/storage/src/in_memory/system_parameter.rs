//! 系统参数内存存储实现

use crate::error::StorageError;
use crate::traits::SystemParameterStore;
use crate::validation::ensure_correlation;
use domain::RequestContext;
use std::collections::HashMap;
use std::sync::RwLock;

/// 系统参数内存存储
pub struct InMemorySystemParameterStore {
    parameters: RwLock<HashMap<String, String>>,
    unit_defaults: RwLock<HashMap<String, String>>,
}

impl InMemorySystemParameterStore {
    pub fn new() -> Self {
        Self {
            parameters: RwLock::new(HashMap::new()),
            unit_defaults: RwLock::new(HashMap::new()),
        }
    }

    pub fn set_parameter(&self, name: &str, value: &str) {
        if let Ok(mut map) = self.parameters.write() {
            map.insert(name.to_string(), value.to_string());
        }
    }

    pub fn set_unit_default(&self, category: &str, unit: &str) {
        if let Ok(mut map) = self.unit_defaults.write() {
            map.insert(category.to_string(), unit.to_string());
        }
    }
}

#[async_trait::async_trait]
impl SystemParameterStore for InMemorySystemParameterStore {
    async fn get_parameter(
        &self,
        ctx: &RequestContext,
        name: &str,
    ) -> Result<Option<String>, StorageError> {
        ensure_correlation(ctx)?;
        Ok(self
            .parameters
            .read()
            .ok()
            .and_then(|map| map.get(name).cloned()))
    }

    async fn get_unit_defaults(
        &self,
        ctx: &RequestContext,
    ) -> Result<HashMap<String, String>, StorageError> {
        ensure_correlation(ctx)?;
        Ok(self
            .unit_defaults
            .read()
            .map(|map| map.clone())
            .unwrap_or_default())
    }
}
