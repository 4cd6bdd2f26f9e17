//! 本地化短语内存存储实现

use crate::error::StorageError;
use crate::traits::PhraseStore;
use crate::validation::ensure_correlation;
use domain::RequestContext;
use std::collections::HashMap;
use std::sync::RwLock;

/// 短语内存存储
pub struct InMemoryPhraseStore {
    phrases: RwLock<HashMap<i32, String>>,
}

impl InMemoryPhraseStore {
    pub fn new() -> Self {
        Self {
            phrases: RwLock::new(HashMap::new()),
        }
    }

    pub fn insert_phrase(&self, phrase_id: i32, text: &str) {
        if let Ok(mut map) = self.phrases.write() {
            map.insert(phrase_id, text.to_string());
        }
    }
}

#[async_trait::async_trait]
impl PhraseStore for InMemoryPhraseStore {
    async fn get_phrases(
        &self,
        ctx: &RequestContext,
        phrase_ids: &[i32],
    ) -> Result<HashMap<i32, String>, StorageError> {
        ensure_correlation(ctx)?;
        let map = self
            .phrases
            .read()
            .map_err(|_| StorageError::LockPoisoned("phrases"))?;
        Ok(phrase_ids
            .iter()
            .filter_map(|id| map.get(id).map(|text| (*id, text.clone())))
            .collect())
    }
}
