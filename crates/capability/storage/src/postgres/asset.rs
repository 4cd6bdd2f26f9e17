//! Postgres 资产实现

use crate::error::StorageError;
use crate::models::{CoreAssetRecord, ParameterStandardRecord, RegisterRecord};
use crate::traits::AssetStore;
use crate::validation::ensure_correlation;
use domain::{
    ChemicalInjectionInfo, EspMotorPumpInfo, GasLiftInfo, Measured, RequestContext, RodString,
    UnitCategory,
};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

pub struct PgAssetStore {
    pub pool: PgPool,
}

impl PgAssetStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn measured(row: &PgRow, column: &str, category: UnitCategory) -> Result<Measured, StorageError> {
    let value: Option<f64> = row.try_get(column)?;
    Ok(Measured::new(value, category))
}

fn category(row: &PgRow) -> Result<Option<UnitCategory>, StorageError> {
    let name: Option<String> = row.try_get("unit_category")?;
    Ok(name.as_deref().and_then(UnitCategory::from_name))
}

#[async_trait::async_trait]
impl AssetStore for PgAssetStore {
    async fn get_core_asset(
        &self,
        ctx: &RequestContext,
        asset_id: Uuid,
    ) -> Result<Option<CoreAssetRecord>, StorageError> {
        ensure_correlation(ctx)?;
        let row = sqlx::query(
            "select a.asset_id, a.asset_name, a.node_id, a.customer_id, n.poc_type, \
             a.application_id, n.node_address, n.port_id, a.tz_offset_hours, \
             a.honor_daylight_savings, \
             (extract(epoch from n.last_good_scan_time) * 1000)::bigint as last_good_scan_ms, \
             n.run_status, n.comm_status, a.pumping_unit_type, a.pumping_unit_manufacturer, \
             a.pumping_unit_name, a.motor_kind, a.pump_type, \
             a.tubing_pressure, a.casing_pressure, a.pump_intake_pressure, a.fluid_level, \
             a.pump_depth, a.stroke_length, a.gross_rate, a.oil_rate, a.water_rate, \
             a.gas_rate, a.motor_power, a.peak_load, a.minimum_load, a.yesterday_gas_volume \
             from assets a join node_master n on n.node_id = a.node_id \
             where a.asset_id = $1",
        )
        .bind(asset_id)
        .fetch_optional(&self.pool)
        .await?;
        let Some(row) = row else {
            return Ok(None);
        };
        Ok(Some(CoreAssetRecord {
            asset_id: row.try_get("asset_id")?,
            asset_name: row.try_get("asset_name")?,
            node_id: row.try_get("node_id")?,
            customer_id: row.try_get("customer_id")?,
            poc_type: row.try_get("poc_type")?,
            application_id: row.try_get("application_id")?,
            node_address: row.try_get("node_address")?,
            port_id: row.try_get("port_id")?,
            tz_offset_hours: row.try_get("tz_offset_hours")?,
            honor_daylight_savings: row.try_get("honor_daylight_savings")?,
            last_good_scan_ms: row.try_get("last_good_scan_ms")?,
            run_status: row.try_get("run_status")?,
            comm_status: row.try_get("comm_status")?,
            pumping_unit_type: row.try_get("pumping_unit_type")?,
            pumping_unit_manufacturer: row.try_get("pumping_unit_manufacturer")?,
            pumping_unit_name: row.try_get("pumping_unit_name")?,
            motor_kind: row.try_get("motor_kind")?,
            pump_type: row.try_get("pump_type")?,
            tubing_pressure: measured(&row, "tubing_pressure", UnitCategory::Pressure)?,
            casing_pressure: measured(&row, "casing_pressure", UnitCategory::Pressure)?,
            pump_intake_pressure: measured(&row, "pump_intake_pressure", UnitCategory::Pressure)?,
            fluid_level: measured(&row, "fluid_level", UnitCategory::Length)?,
            pump_depth: measured(&row, "pump_depth", UnitCategory::Length)?,
            stroke_length: measured(&row, "stroke_length", UnitCategory::ShortLength)?,
            gross_rate: measured(&row, "gross_rate", UnitCategory::FluidRate)?,
            oil_rate: measured(&row, "oil_rate", UnitCategory::FluidRate)?,
            water_rate: measured(&row, "water_rate", UnitCategory::FluidRate)?,
            gas_rate: measured(&row, "gas_rate", UnitCategory::GasRate)?,
            motor_power: measured(&row, "motor_power", UnitCategory::Power)?,
            peak_load: measured(&row, "peak_load", UnitCategory::Weight)?,
            minimum_load: measured(&row, "minimum_load", UnitCategory::Weight)?,
            yesterday_gas_volume: measured(&row, "yesterday_gas_volume", UnitCategory::GasVolume)?,
        }))
    }

    async fn get_rod_strings(
        &self,
        ctx: &RequestContext,
        asset_id: Uuid,
    ) -> Result<Vec<RodString>, StorageError> {
        ensure_correlation(ctx)?;
        let rows = sqlx::query(
            "select section, grade, diameter_in, length_ft from rod_strings \
             where asset_id = $1 order by section",
        )
        .bind(asset_id)
        .fetch_all(&self.pool)
        .await?;
        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            items.push(RodString {
                section: row.try_get("section")?,
                grade: row.try_get("grade")?,
                diameter_in: row.try_get("diameter_in")?,
                length_ft: row.try_get("length_ft")?,
            });
        }
        Ok(items)
    }

    async fn get_esp_motor_pump(
        &self,
        ctx: &RequestContext,
        asset_id: Uuid,
    ) -> Result<Option<EspMotorPumpInfo>, StorageError> {
        ensure_correlation(ctx)?;
        let row = sqlx::query(
            "select motor_manufacturer, motor_model, motor_nameplate_hp, motor_nameplate_volts, \
             motor_nameplate_amps, pump_manufacturer, pump_model, pump_stages \
             from esp_motor_pumps where asset_id = $1",
        )
        .bind(asset_id)
        .fetch_optional(&self.pool)
        .await?;
        let Some(row) = row else {
            return Ok(None);
        };
        Ok(Some(EspMotorPumpInfo {
            motor_manufacturer: row.try_get("motor_manufacturer")?,
            motor_model: row.try_get("motor_model")?,
            motor_nameplate_hp: row.try_get("motor_nameplate_hp")?,
            motor_nameplate_volts: row.try_get("motor_nameplate_volts")?,
            motor_nameplate_amps: row.try_get("motor_nameplate_amps")?,
            pump_manufacturer: row.try_get("pump_manufacturer")?,
            pump_model: row.try_get("pump_model")?,
            pump_stages: row.try_get("pump_stages")?,
        }))
    }

    async fn get_gas_lift(
        &self,
        ctx: &RequestContext,
        asset_id: Uuid,
    ) -> Result<Option<GasLiftInfo>, StorageError> {
        ensure_correlation(ctx)?;
        let row = sqlx::query(
            "select injection_rate, injection_pressure, valve_count, operating_valve_depth \
             from gas_lift_details where asset_id = $1",
        )
        .bind(asset_id)
        .fetch_optional(&self.pool)
        .await?;
        let Some(row) = row else {
            return Ok(None);
        };
        Ok(Some(GasLiftInfo {
            injection_rate: measured(&row, "injection_rate", UnitCategory::GasRate)?,
            injection_pressure: measured(&row, "injection_pressure", UnitCategory::Pressure)?,
            valve_count: row.try_get("valve_count")?,
            operating_valve_depth: measured(&row, "operating_valve_depth", UnitCategory::Length)?,
        }))
    }

    async fn get_chemical_injection(
        &self,
        ctx: &RequestContext,
        asset_id: Uuid,
    ) -> Result<Option<ChemicalInjectionInfo>, StorageError> {
        ensure_correlation(ctx)?;
        let row = sqlx::query(
            "select chemical_name, tank_level, target_rate, actual_rate, pump_running \
             from chemical_injection_details where asset_id = $1",
        )
        .bind(asset_id)
        .fetch_optional(&self.pool)
        .await?;
        let Some(row) = row else {
            return Ok(None);
        };
        Ok(Some(ChemicalInjectionInfo {
            chemical_name: row.try_get("chemical_name")?,
            tank_level: row.try_get("tank_level")?,
            target_rate: row.try_get("target_rate")?,
            actual_rate: row.try_get("actual_rate")?,
            pump_running: row.try_get("pump_running")?,
        }))
    }

    async fn get_registers(
        &self,
        ctx: &RequestContext,
        asset_id: Uuid,
    ) -> Result<Vec<RegisterRecord>, StorageError> {
        ensure_correlation(ctx)?;
        let rows = sqlx::query(
            "select r.address, r.description, d.value::text as raw_value, r.unit_category \
             from display_registers r \
             join assets a on a.asset_id = r.asset_id \
             left join curr_raw_scan_data d on d.node_id = a.node_id and d.address = r.address \
             where r.asset_id = $1 order by r.display_order, r.address",
        )
        .bind(asset_id)
        .fetch_all(&self.pool)
        .await?;
        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            items.push(RegisterRecord {
                address: row.try_get("address")?,
                description: row.try_get("description")?,
                raw_value: row.try_get("raw_value")?,
                category: category(&row)?,
            });
        }
        Ok(items)
    }

    async fn get_parameter_standards(
        &self,
        ctx: &RequestContext,
        asset_id: Uuid,
    ) -> Result<Vec<ParameterStandardRecord>, StorageError> {
        ensure_correlation(ctx)?;
        let rows = sqlx::query(
            "select param_standard_type, description, raw_value, unit_category \
             from parameter_standards where asset_id = $1 order by param_standard_type",
        )
        .bind(asset_id)
        .fetch_all(&self.pool)
        .await?;
        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            items.push(ParameterStandardRecord {
                param_standard_type: row.try_get("param_standard_type")?,
                description: row.try_get("description")?,
                raw_value: row.try_get("raw_value")?,
                category: category(&row)?,
            });
        }
        Ok(items)
    }
}
