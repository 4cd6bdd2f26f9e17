//! # Apex Storage 模块
//!
//! 状态聚合与井控分发所需的只读数据访问层。
//!
//! ## 架构设计
//!
//! 1. **接口抽象层** (`traits.rs`)：各数据源的异步 Trait 接口
//! 2. **数据模型层** (`models.rs`)：存储相关的数据结构
//! 3. **错误处理层** (`error.rs`)：统一的存储错误类型
//! 4. **验证辅助层** (`validation.rs`)：关联 ID 与节点 ID 校验
//! 5. **连接管理层** (`connection.rs`)：数据库连接池管理
//! 6. **实现层**：
//!    - `in_memory/`：内存存储实现（用于测试和演示）
//!    - `postgres/`：PostgreSQL 存储实现（生产环境使用）
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use apex_storage::{InMemoryNodeStore, NodeStore};
//! use domain::RequestContext;
//!
//! let store = InMemoryNodeStore::new();
//! let ctx = RequestContext::system("corr-1");
//! let node = store.find_node_by_asset(&ctx, asset_id).await?;
//! ```
//!
//! ## 设计约束
//!
//! - **显式上下文**：所有数据访问方法必须显式接收 `RequestContext`
//! - **禁止直接 SQL**：服务层与 Handler 层统一通过 storage 层访问数据
//! - **只读**：本层不写入业务表

pub mod connection;
pub mod error;
pub mod in_memory;
pub mod models;
pub mod postgres;
pub mod traits;
pub mod validation;

pub use connection::*;
pub use error::*;
pub use models::*;
pub use traits::*;
pub use validation::*;

pub use in_memory::{
    InMemoryAlarmStore, InMemoryAssetStore, InMemoryFacilityStore, InMemoryNodeStore,
    InMemoryPhraseStore, InMemoryPortStore, InMemoryRawScanStore, InMemorySystemParameterStore,
    InMemoryUserDefaultStore,
};

pub use postgres::{
    PgAlarmStore, PgAssetStore, PgFacilityStore, PgNodeStore, PgPhraseStore, PgPortStore,
    PgRawScanStore, PgSystemParameterStore, PgUserDefaultStore,
};
