//! 存储装配
//!
//! 配置了数据库地址时使用 PostgreSQL 存储，否则退化为内存存储（本地演示）。

use apex_config::AppConfig;
use apex_status::StatusStores;
use apex_storage::{
    InMemoryAlarmStore, InMemoryAssetStore, InMemoryFacilityStore, InMemoryNodeStore,
    InMemoryPhraseStore, InMemoryPortStore, InMemoryRawScanStore, InMemorySystemParameterStore,
    InMemoryUserDefaultStore, NodeStore, PgAlarmStore, PgAssetStore, PgFacilityStore, PgNodeStore,
    PgPhraseStore, PgPortStore, PgRawScanStore, PgSystemParameterStore, PgUserDefaultStore,
    PortStore, StorageError, connect_pool,
};
use std::sync::Arc;
use tracing::{info, warn};

/// 进程内共享的存储句柄
#[derive(Clone)]
pub struct Stores {
    pub status: StatusStores,
    pub nodes: Arc<dyn NodeStore>,
    pub ports: Arc<dyn PortStore>,
}

pub async fn build_stores(config: &AppConfig) -> Result<Stores, StorageError> {
    let Some(database_url) = config.database_url.as_deref() else {
        warn!(target: "apex.api", "database_url_missing_using_in_memory");
        return Ok(in_memory_stores());
    };

    let pool = connect_pool(database_url).await?;
    info!(target: "apex.api", "postgres_connected");
    let ports: Arc<dyn PortStore> = Arc::new(PgPortStore::new(pool.clone()));
    Ok(Stores {
        status: StatusStores {
            assets: Arc::new(PgAssetStore::new(pool.clone())),
            alarms: Arc::new(PgAlarmStore::new(pool.clone())),
            facilities: Arc::new(PgFacilityStore::new(pool.clone())),
            user_defaults: Arc::new(PgUserDefaultStore::new(pool.clone())),
            system_parameters: Arc::new(PgSystemParameterStore::new(pool.clone())),
            phrases: Arc::new(PgPhraseStore::new(pool.clone())),
            raw_scan: Arc::new(PgRawScanStore::new(pool.clone())),
            ports: ports.clone(),
        },
        nodes: Arc::new(PgNodeStore::new(pool)),
        ports,
    })
}

pub fn in_memory_stores() -> Stores {
    let ports: Arc<dyn PortStore> = Arc::new(InMemoryPortStore::new());
    Stores {
        status: StatusStores {
            assets: Arc::new(InMemoryAssetStore::new()),
            alarms: Arc::new(InMemoryAlarmStore::new()),
            facilities: Arc::new(InMemoryFacilityStore::new()),
            user_defaults: Arc::new(InMemoryUserDefaultStore::new()),
            system_parameters: Arc::new(InMemorySystemParameterStore::new()),
            phrases: Arc::new(InMemoryPhraseStore::new()),
            raw_scan: Arc::new(InMemoryRawScanStore::new()),
            ports: ports.clone(),
        },
        nodes: Arc::new(InMemoryNodeStore::new()),
        ports,
    }
}
