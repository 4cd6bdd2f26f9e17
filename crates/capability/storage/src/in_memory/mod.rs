//! 内存存储实现模块
//!
//! 仅用于本地演示和测试。
//!
//! 包含以下实现：
//! - AssetStore: InMemoryAssetStore
//! - AlarmStore: InMemoryAlarmStore
//! - FacilityStore: InMemoryFacilityStore
//! - UserDefaultStore: InMemoryUserDefaultStore
//! - SystemParameterStore: InMemorySystemParameterStore
//! - PhraseStore: InMemoryPhraseStore
//! - RawScanStore: InMemoryRawScanStore
//! - NodeStore: InMemoryNodeStore
//! - PortStore: InMemoryPortStore

pub mod alarm;
pub mod asset;
pub mod facility;
pub mod node;
pub mod phrase;
pub mod port;
pub mod raw_scan;
pub mod system_parameter;
pub mod user_default;

pub use alarm::*;
pub use asset::*;
pub use facility::*;
pub use node::*;
pub use phrase::*;
pub use port::*;
pub use raw_scan::*;
pub use system_parameter::*;
pub use user_default::*;
