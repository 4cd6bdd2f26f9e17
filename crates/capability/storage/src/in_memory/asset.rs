//! 资产内存存储实现
//!
//! 仅用于本地演示和测试。

use crate::error::StorageError;
use crate::models::{CoreAssetRecord, ParameterStandardRecord, RegisterRecord};
use crate::traits::AssetStore;
use crate::validation::ensure_correlation;
use domain::{ChemicalInjectionInfo, EspMotorPumpInfo, GasLiftInfo, RequestContext, RodString};
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
struct AssetTables {
    core: HashMap<Uuid, CoreAssetRecord>,
    rod_strings: HashMap<Uuid, Vec<RodString>>,
    esp: HashMap<Uuid, EspMotorPumpInfo>,
    gas_lift: HashMap<Uuid, GasLiftInfo>,
    chemical_injection: HashMap<Uuid, ChemicalInjectionInfo>,
    registers: HashMap<Uuid, Vec<RegisterRecord>>,
    parameter_standards: HashMap<Uuid, Vec<ParameterStandardRecord>>,
}

/// 资产内存存储
///
/// 使用 RwLock + HashMap 提供线程安全的内存存储。
pub struct InMemoryAssetStore {
    tables: RwLock<AssetTables>,
}

impl InMemoryAssetStore {
    /// 创建新的资产存储
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(AssetTables::default()),
        }
    }

    /// 写入资产快照（以 asset_id 为键）
    pub fn insert_asset(&self, record: CoreAssetRecord) {
        if let Ok(mut tables) = self.tables.write() {
            tables.core.insert(record.asset_id, record);
        }
    }

    /// 以指定键写入资产快照（键与记录内 asset_id 可以不同）
    pub fn insert_asset_keyed(&self, asset_id: Uuid, record: CoreAssetRecord) {
        if let Ok(mut tables) = self.tables.write() {
            tables.core.insert(asset_id, record);
        }
    }

    pub fn insert_rod_strings(&self, asset_id: Uuid, rod_strings: Vec<RodString>) {
        if let Ok(mut tables) = self.tables.write() {
            tables.rod_strings.insert(asset_id, rod_strings);
        }
    }

    pub fn insert_esp_motor_pump(&self, asset_id: Uuid, info: EspMotorPumpInfo) {
        if let Ok(mut tables) = self.tables.write() {
            tables.esp.insert(asset_id, info);
        }
    }

    pub fn insert_gas_lift(&self, asset_id: Uuid, info: GasLiftInfo) {
        if let Ok(mut tables) = self.tables.write() {
            tables.gas_lift.insert(asset_id, info);
        }
    }

    pub fn insert_chemical_injection(&self, asset_id: Uuid, info: ChemicalInjectionInfo) {
        if let Ok(mut tables) = self.tables.write() {
            tables.chemical_injection.insert(asset_id, info);
        }
    }

    pub fn insert_registers(&self, asset_id: Uuid, registers: Vec<RegisterRecord>) {
        if let Ok(mut tables) = self.tables.write() {
            tables.registers.insert(asset_id, registers);
        }
    }

    pub fn insert_parameter_standards(&self, asset_id: Uuid, items: Vec<ParameterStandardRecord>) {
        if let Ok(mut tables) = self.tables.write() {
            tables.parameter_standards.insert(asset_id, items);
        }
    }

    fn read<T>(&self, f: impl FnOnce(&AssetTables) -> T) -> Result<T, StorageError> {
        let tables = self
            .tables
            .read()
            .map_err(|_| StorageError::LockPoisoned("assets"))?;
        Ok(f(&tables))
    }
}

#[async_trait::async_trait]
impl AssetStore for InMemoryAssetStore {
    async fn get_core_asset(
        &self,
        ctx: &RequestContext,
        asset_id: Uuid,
    ) -> Result<Option<CoreAssetRecord>, StorageError> {
        ensure_correlation(ctx)?;
        self.read(|tables| tables.core.get(&asset_id).cloned())
    }

    async fn get_rod_strings(
        &self,
        ctx: &RequestContext,
        asset_id: Uuid,
    ) -> Result<Vec<RodString>, StorageError> {
        ensure_correlation(ctx)?;
        self.read(|tables| {
            tables
                .rod_strings
                .get(&asset_id)
                .cloned()
                .unwrap_or_default()
        })
    }

    async fn get_esp_motor_pump(
        &self,
        ctx: &RequestContext,
        asset_id: Uuid,
    ) -> Result<Option<EspMotorPumpInfo>, StorageError> {
        ensure_correlation(ctx)?;
        self.read(|tables| tables.esp.get(&asset_id).cloned())
    }

    async fn get_gas_lift(
        &self,
        ctx: &RequestContext,
        asset_id: Uuid,
    ) -> Result<Option<GasLiftInfo>, StorageError> {
        ensure_correlation(ctx)?;
        self.read(|tables| tables.gas_lift.get(&asset_id).cloned())
    }

    async fn get_chemical_injection(
        &self,
        ctx: &RequestContext,
        asset_id: Uuid,
    ) -> Result<Option<ChemicalInjectionInfo>, StorageError> {
        ensure_correlation(ctx)?;
        self.read(|tables| tables.chemical_injection.get(&asset_id).cloned())
    }

    async fn get_registers(
        &self,
        ctx: &RequestContext,
        asset_id: Uuid,
    ) -> Result<Vec<RegisterRecord>, StorageError> {
        ensure_correlation(ctx)?;
        self.read(|tables| tables.registers.get(&asset_id).cloned().unwrap_or_default())
    }

    async fn get_parameter_standards(
        &self,
        ctx: &RequestContext,
        asset_id: Uuid,
    ) -> Result<Vec<ParameterStandardRecord>, StorageError> {
        ensure_correlation(ctx)?;
        self.read(|tables| {
            tables
                .parameter_standards
                .get(&asset_id)
                .cloned()
                .unwrap_or_default()
        })
    }
}
