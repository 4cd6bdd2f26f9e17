//! 存储接口 Trait 定义
//!
//! 定义状态聚合与井控分发所消费的异步数据源：
//! - AssetStore：资产快照与各应用分支明细
//! - AlarmStore：配置/主机/摄像头告警与异常
//! - FacilityStore：站场标签与站场告警
//! - UserDefaultStore：用户单位偏好
//! - SystemParameterStore：系统参数与系统单位默认值
//! - PhraseStore：本地化短语
//! - RawScanStore：最近一次扫描的寄存器原值
//! - NodeStore / PortStore：节点与端口配置
//!
//! 设计原则：
//! - 所有接口显式接收 RequestContext
//! - 所有接口返回 StorageError
//! - 使用 async_trait 支持动态分发

use crate::error::StorageError;
use crate::models::{
    CameraAlarmRecord, ConfigAlarmRecord, CoreAssetRecord, ExceptionRecord, FacilityAlarmRecord,
    HostAlarmRecord, NodeRecord, ParameterStandardRecord, PortRecord, RegisterRecord,
};
use async_trait::async_trait;
use domain::{
    ChemicalInjectionInfo, EspMotorPumpInfo, FacilityTag, GasLiftInfo, RequestContext, RodString,
};
use std::collections::HashMap;

/// 资产存储接口
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// 资产核心快照
    async fn get_core_asset(
        &self,
        ctx: &RequestContext,
        asset_id: uuid::Uuid,
    ) -> Result<Option<CoreAssetRecord>, StorageError>;

    /// 抽油杆柱
    async fn get_rod_strings(
        &self,
        ctx: &RequestContext,
        asset_id: uuid::Uuid,
    ) -> Result<Vec<RodString>, StorageError>;

    /// 电潜泵电机/泵信息
    async fn get_esp_motor_pump(
        &self,
        ctx: &RequestContext,
        asset_id: uuid::Uuid,
    ) -> Result<Option<EspMotorPumpInfo>, StorageError>;

    /// 气举信息
    async fn get_gas_lift(
        &self,
        ctx: &RequestContext,
        asset_id: uuid::Uuid,
    ) -> Result<Option<GasLiftInfo>, StorageError>;

    /// 化学注入信息
    async fn get_chemical_injection(
        &self,
        ctx: &RequestContext,
        asset_id: uuid::Uuid,
    ) -> Result<Option<ChemicalInjectionInfo>, StorageError>;

    /// 显示寄存器
    async fn get_registers(
        &self,
        ctx: &RequestContext,
        asset_id: uuid::Uuid,
    ) -> Result<Vec<RegisterRecord>, StorageError>;

    /// 参数标准数据
    async fn get_parameter_standards(
        &self,
        ctx: &RequestContext,
        asset_id: uuid::Uuid,
    ) -> Result<Vec<ParameterStandardRecord>, StorageError>;
}

/// 告警存储接口
#[async_trait]
pub trait AlarmStore: Send + Sync {
    async fn get_config_alarms(
        &self,
        ctx: &RequestContext,
        node_id: &str,
    ) -> Result<Vec<ConfigAlarmRecord>, StorageError>;

    async fn get_host_alarms(
        &self,
        ctx: &RequestContext,
        asset_id: uuid::Uuid,
    ) -> Result<Vec<HostAlarmRecord>, StorageError>;

    async fn get_camera_alarms(
        &self,
        ctx: &RequestContext,
        asset_id: uuid::Uuid,
    ) -> Result<Vec<CameraAlarmRecord>, StorageError>;

    async fn get_exceptions(
        &self,
        ctx: &RequestContext,
        node_id: &str,
    ) -> Result<Vec<ExceptionRecord>, StorageError>;
}

/// 站场存储接口
#[async_trait]
pub trait FacilityStore: Send + Sync {
    async fn get_facility_tags(
        &self,
        ctx: &RequestContext,
        node_id: &str,
    ) -> Result<Vec<FacilityTag>, StorageError>;

    async fn get_facility_alarms(
        &self,
        ctx: &RequestContext,
        node_id: &str,
    ) -> Result<Vec<FacilityAlarmRecord>, StorageError>;
}

/// 用户默认值存储接口
#[async_trait]
pub trait UserDefaultStore: Send + Sync {
    /// 用户单位偏好（类别名 → 单位符号）
    async fn get_unit_preferences(
        &self,
        ctx: &RequestContext,
        user_id: &str,
    ) -> Result<HashMap<String, String>, StorageError>;
}

/// 系统参数存储接口
#[async_trait]
pub trait SystemParameterStore: Send + Sync {
    async fn get_parameter(
        &self,
        ctx: &RequestContext,
        name: &str,
    ) -> Result<Option<String>, StorageError>;

    /// 系统级单位默认值（类别名 → 单位符号）
    async fn get_unit_defaults(
        &self,
        ctx: &RequestContext,
    ) -> Result<HashMap<String, String>, StorageError>;
}

/// 本地化短语存储接口
#[async_trait]
pub trait PhraseStore: Send + Sync {
    async fn get_phrases(
        &self,
        ctx: &RequestContext,
        phrase_ids: &[i32],
    ) -> Result<HashMap<i32, String>, StorageError>;
}

/// 实时扫描数据接口
#[async_trait]
pub trait RawScanStore: Send + Sync {
    /// 整数寄存器地址 → 原值
    async fn get_current_raw_scan_data(
        &self,
        ctx: &RequestContext,
        node_id: &str,
        registers: &[i32],
    ) -> Result<HashMap<i32, f64>, StorageError>;

    /// 字符串地址（如 `TfReg:11.0.3`）→ 字符串原值
    async fn get_current_raw_scan_string_values(
        &self,
        ctx: &RequestContext,
        node_id: &str,
        addresses: &[String],
    ) -> Result<HashMap<String, String>, StorageError>;
}

/// 节点存储接口
#[async_trait]
pub trait NodeStore: Send + Sync {
    async fn find_node_by_asset(
        &self,
        ctx: &RequestContext,
        asset_id: uuid::Uuid,
    ) -> Result<Option<NodeRecord>, StorageError>;
}

/// 端口存储接口
#[async_trait]
pub trait PortStore: Send + Sync {
    async fn find_port(
        &self,
        ctx: &RequestContext,
        port_id: i32,
    ) -> Result<Option<PortRecord>, StorageError>;
}
