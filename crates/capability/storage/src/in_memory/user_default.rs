//! 用户默认值内存存储实现

use crate::error::StorageError;
use crate::traits::UserDefaultStore;
use crate::validation::ensure_correlation;
use domain::RequestContext;
use std::collections::HashMap;
use std::sync::RwLock;

/// 用户单位偏好内存存储
pub struct InMemoryUserDefaultStore {
    preferences: RwLock<HashMap<String, HashMap<String, String>>>,
}

impl InMemoryUserDefaultStore {
    pub fn new() -> Self {
        Self {
            preferences: RwLock::new(HashMap::new()),
        }
    }

    /// 设置单个类别的偏好单位
    pub fn set_preference(&self, user_id: &str, category: &str, unit: &str) {
        if let Ok(mut map) = self.preferences.write() {
            map.entry(user_id.to_string())
                .or_default()
                .insert(category.to_string(), unit.to_string());
        }
    }
}

#[async_trait::async_trait]
impl UserDefaultStore for InMemoryUserDefaultStore {
    async fn get_unit_preferences(
        &self,
        ctx: &RequestContext,
        user_id: &str,
    ) -> Result<HashMap<String, String>, StorageError> {
        ensure_correlation(ctx)?;
        let items = self
            .preferences
            .read()
            .ok()
            .and_then(|map| map.get(user_id).cloned())
            .unwrap_or_default();
        Ok(items)
    }
}
