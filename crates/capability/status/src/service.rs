//! 资产状态编排服务。
//!
//! ```text
//! request ─► 输入校验 ─► 核心快照 ─► 换算上下文 ─► 图表类型
//!                                                    │
//!        DTO ◄── 单位换算 ◄── 告警/异常 ◄── 分支明细 ◄┘
//!             (快照 + 明细)
//! ```
//!
//! 请求内的中间数据保存在 `StatusContext`，服务实例本身不可变，可跨请求并发复用。

use crate::alarms::{merge_alarms, sort_exceptions};
use crate::diagram::{DiagramInputs, select_diagram_type};
use crate::error::StatusError;
use api_contract::{AssetStatusDto, AssetStatusResponse, QuantityDto, SeriesItem};
use apex_normalize::{ConversionPass, ConversionProvider, SeriesSource, StorageConversionProvider};
use apex_protocol::{ControllerFamily, NodeAddressParser, TotalFlowTag, decode_total_flow};
use apex_storage::{
    AlarmStore, AssetStore, CoreAssetRecord, FacilityStore, PhraseStore, PortStore, RawScanStore,
    StorageError, SystemParameterStore, UserDefaultStore,
};
use domain::{
    AlarmEntry, ApplicationDetail, AssetStatusRequest, DetailKind, DiagramType, ExceptionEntry,
    Measured, RequestContext, RodString,
};
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;

/// 状态聚合依赖的数据源。
#[derive(Clone)]
pub struct StatusStores {
    pub assets: Arc<dyn AssetStore>,
    pub alarms: Arc<dyn AlarmStore>,
    pub facilities: Arc<dyn FacilityStore>,
    pub user_defaults: Arc<dyn UserDefaultStore>,
    pub system_parameters: Arc<dyn SystemParameterStore>,
    pub phrases: Arc<dyn PhraseStore>,
    pub raw_scan: Arc<dyn RawScanStore>,
    pub ports: Arc<dyn PortStore>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusConfig {
    pub refresh_interval_seconds: u64,
    pub smarten_api_port: u16,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            refresh_interval_seconds: 15,
            smarten_api_port: 8080,
        }
    }
}

struct StatusInner {
    stores: StatusStores,
    parser: Arc<dyn NodeAddressParser>,
    conversion: Arc<dyn ConversionProvider>,
    config: StatusConfig,
}

/// 资产状态聚合服务（`Clone` 后共享同一组依赖）。
#[derive(Clone)]
pub struct AssetStatusService {
    inner: Arc<StatusInner>,
}

/// 单次请求的中间数据。
struct StatusContext {
    ctx: RequestContext,
    record: CoreAssetRecord,
    pass: ConversionPass,
    diagram: DiagramType,
    rod_strings: Vec<RodString>,
    detail: ApplicationDetail,
    alarms: Vec<AlarmEntry>,
    exceptions: Vec<ExceptionEntry>,
    registers: Vec<SeriesItem>,
    parameter_standards: Vec<SeriesItem>,
    live_url: String,
}

impl StatusContext {
    /// 资产级数据源的键；快照资产 ID 为空时不发起查询。
    fn asset_key(&self) -> Option<uuid::Uuid> {
        Some(self.record.asset_id).filter(|id| !id.is_nil())
    }
}

impl AssetStatusService {
    pub fn new(
        stores: StatusStores,
        parser: Arc<dyn NodeAddressParser>,
        config: StatusConfig,
    ) -> Self {
        let conversion = Arc::new(StorageConversionProvider::new(
            stores.system_parameters.clone(),
            stores.phrases.clone(),
            stores.user_defaults.clone(),
        ));
        Self::with_conversion(stores, parser, conversion, config)
    }

    pub fn with_conversion(
        stores: StatusStores,
        parser: Arc<dyn NodeAddressParser>,
        conversion: Arc<dyn ConversionProvider>,
        config: StatusConfig,
    ) -> Self {
        Self {
            inner: Arc::new(StatusInner {
                stores,
                parser,
                conversion,
                config,
            }),
        }
    }

    pub fn config(&self) -> StatusConfig {
        self.inner.config
    }

    /// 聚合资产状态。
    ///
    /// 请求为空返回 `Ok(None)`；输入无效或资产不存在返回带关联 ID 的空结果。
    pub async fn get_asset_status(
        &self,
        request: Option<&AssetStatusRequest>,
        cancel: &CancellationToken,
    ) -> Result<Option<AssetStatusResponse>, StatusError> {
        let Some(request) = request else {
            return Ok(None);
        };
        apex_telemetry::record_status_request();
        let started = Instant::now();
        let result = self.aggregate(request, cancel).await;
        apex_telemetry::record_status_latency_ms(started.elapsed().as_millis() as u64);

        match &result {
            Ok(response) if response.is_empty() => apex_telemetry::record_status_empty(),
            Ok(_) => {}
            Err(err) => {
                apex_telemetry::record_status_failure();
                tracing::warn!(
                    target: "apex.status",
                    correlation_id = %request.correlation_id,
                    asset_id = %request.asset_id,
                    error = %err,
                    "asset_status_failed"
                );
            }
        }
        result.map(Some)
    }

    async fn aggregate(
        &self,
        request: &AssetStatusRequest,
        cancel: &CancellationToken,
    ) -> Result<AssetStatusResponse, StatusError> {
        let Some(user_id) = request.effective_user() else {
            tracing::info!(
                target: "apex.status",
                correlation_id = %request.correlation_id,
                asset_id = %request.asset_id,
                "asset_status_user_missing"
            );
            return Ok(AssetStatusResponse::empty(&request.correlation_id));
        };
        if request.asset_id.is_nil() {
            tracing::info!(
                target: "apex.status",
                correlation_id = %request.correlation_id,
                "asset_status_asset_missing"
            );
            return Ok(AssetStatusResponse::empty(&request.correlation_id));
        }

        let ctx = RequestContext::new(&request.correlation_id, user_id);
        let stores = &self.inner.stores;

        let record = guarded(cancel, stores.assets.get_core_asset(&ctx, request.asset_id))
            .await?
            .map_err(|err| StatusError::Storage(err.to_string()))?;
        let Some(record) = record else {
            tracing::info!(
                target: "apex.status",
                correlation_id = %ctx.correlation_id,
                asset_id = %request.asset_id,
                "asset_status_record_missing"
            );
            return Ok(AssetStatusResponse::empty(&request.correlation_id));
        };

        let pass = match guarded(cancel, self.inner.conversion.load(&ctx, user_id)).await? {
            Ok(pass) => pass,
            Err(err) => {
                tracing::warn!(
                    target: "apex.status",
                    correlation_id = %ctx.correlation_id,
                    error = %err,
                    "conversion_context_unavailable"
                );
                ConversionPass::base_units()
            }
        };

        let diagram = select_diagram_type(&DiagramInputs::from_record(&record));
        tracing::debug!(
            target: "apex.status",
            correlation_id = %ctx.correlation_id,
            node_id = %record.node_id,
            diagram = ?diagram,
            "diagram_selected"
        );

        let mut state = StatusContext {
            ctx,
            record,
            pass,
            diagram,
            rod_strings: Vec::new(),
            detail: ApplicationDetail::None,
            alarms: Vec::new(),
            exceptions: Vec::new(),
            registers: Vec::new(),
            parameter_standards: Vec::new(),
            live_url: String::new(),
        };

        self.load_detail(&mut state, cancel).await?;
        self.load_alarms(&mut state, cancel).await?;
        self.load_series(&mut state, cancel).await?;
        state.pass.apply_to_asset(&mut state.record);
        state.pass.apply_to_detail(&mut state.detail);
        if state.diagram == DiagramType::Smarten {
            state.live_url = self.smarten_live_url(&state, cancel).await?;
        }

        Ok(AssetStatusResponse {
            correlation_id: request.correlation_id.clone(),
            values: Some(self.build_dto(state)),
        })
    }

    async fn load_detail(
        &self,
        state: &mut StatusContext,
        cancel: &CancellationToken,
    ) -> Result<(), StatusError> {
        let stores = &self.inner.stores;
        let ctx = &state.ctx;
        let node_id = state.record.node_id.as_str();
        let asset_key = state.asset_key();

        let detail = match state.diagram.detail_kind() {
            DetailKind::None => ApplicationDetail::None,
            DetailKind::RodStrings => {
                if let Some(asset_id) = asset_key {
                    let result = guarded(cancel, stores.assets.get_rod_strings(ctx, asset_id));
                    state.rod_strings = soft(ctx, "rod_strings", result.await?);
                }
                ApplicationDetail::None
            }
            DetailKind::EspMotorPump => match asset_key {
                Some(asset_id) => {
                    let result = guarded(cancel, stores.assets.get_esp_motor_pump(ctx, asset_id));
                    soft(ctx, "esp_motor_pump", result.await?)
                        .map_or(ApplicationDetail::None, ApplicationDetail::EspMotorPump)
                }
                None => ApplicationDetail::None,
            },
            DetailKind::GasLift => match asset_key {
                Some(asset_id) => {
                    let result = guarded(cancel, stores.assets.get_gas_lift(ctx, asset_id));
                    soft(ctx, "gas_lift", result.await?)
                        .map_or(ApplicationDetail::None, ApplicationDetail::GasLift)
                }
                None => ApplicationDetail::None,
            },
            DetailKind::ChemicalInjection => match asset_key {
                Some(asset_id) => {
                    let result =
                        guarded(cancel, stores.assets.get_chemical_injection(ctx, asset_id));
                    soft(ctx, "chemical_injection", result.await?)
                        .map_or(ApplicationDetail::None, ApplicationDetail::ChemicalInjection)
                }
                None => ApplicationDetail::None,
            },
            DetailKind::PlungerLiftRegisters
            | DetailKind::Pid
            | DetailKind::ValveControl
            | DetailKind::GasFlowMeter => match ControllerFamily::for_diagram(state.diagram) {
                Some(family) => {
                    let addresses = family.addresses();
                    let result = guarded(
                        cancel,
                        stores
                            .raw_scan
                            .get_current_raw_scan_data(ctx, node_id, &addresses),
                    );
                    let snapshot = soft(ctx, "raw_scan", result.await?);
                    family.decode(
                        &snapshot,
                        state.pass.significant_digits(),
                        state.pass.phrases(),
                    )
                }
                None => ApplicationDetail::None,
            },
            DetailKind::TotalFlowPlungerLift => {
                let addresses = TotalFlowTag::addresses();
                let result = guarded(
                    cancel,
                    stores
                        .raw_scan
                        .get_current_raw_scan_string_values(ctx, node_id, &addresses),
                );
                let snapshot = soft(ctx, "raw_scan_strings", result.await?);
                ApplicationDetail::TotalFlowPlungerLift(decode_total_flow(
                    &snapshot,
                    state.pass.significant_digits(),
                    state.pass.phrases(),
                ))
            }
            DetailKind::FacilityTags => {
                let result = guarded(cancel, stores.facilities.get_facility_tags(ctx, node_id));
                ApplicationDetail::FacilityTags(soft(ctx, "facility_tags", result.await?))
            }
        };
        state.detail = detail;
        Ok(())
    }

    async fn load_alarms(
        &self,
        state: &mut StatusContext,
        cancel: &CancellationToken,
    ) -> Result<(), StatusError> {
        let stores = &self.inner.stores;
        let ctx = &state.ctx;
        let node_id = state.record.node_id.as_str();
        let asset_key = state.asset_key();

        let config = soft(
            ctx,
            "config_alarms",
            guarded(cancel, stores.alarms.get_config_alarms(ctx, node_id)).await?,
        );
        let (host, camera) = match asset_key {
            Some(asset_id) => {
                let host = soft(
                    ctx,
                    "host_alarms",
                    guarded(cancel, stores.alarms.get_host_alarms(ctx, asset_id)).await?,
                );
                let camera = soft(
                    ctx,
                    "camera_alarms",
                    guarded(cancel, stores.alarms.get_camera_alarms(ctx, asset_id)).await?,
                );
                (host, camera)
            }
            None => (Vec::new(), Vec::new()),
        };
        let facility = if state.diagram == DiagramType::Facility {
            soft(
                ctx,
                "facility_alarms",
                guarded(cancel, stores.facilities.get_facility_alarms(ctx, node_id)).await?,
            )
        } else {
            Vec::new()
        };
        let exceptions = soft(
            ctx,
            "exceptions",
            guarded(cancel, stores.alarms.get_exceptions(ctx, node_id)).await?,
        );

        state.alarms = merge_alarms(config, host, facility, camera);
        state.exceptions = sort_exceptions(exceptions);
        Ok(())
    }

    async fn load_series(
        &self,
        state: &mut StatusContext,
        cancel: &CancellationToken,
    ) -> Result<(), StatusError> {
        let Some(asset_id) = state.asset_key() else {
            return Ok(());
        };
        let stores = &self.inner.stores;
        let ctx = &state.ctx;

        let registers = soft(
            ctx,
            "registers",
            guarded(cancel, stores.assets.get_registers(ctx, asset_id)).await?,
        );
        let standards = soft(
            ctx,
            "parameter_standards",
            guarded(cancel, stores.assets.get_parameter_standards(ctx, asset_id)).await?,
        );

        state.registers = state
            .pass
            .convert_series(registers.into_iter().map(SeriesSource::from).collect());
        state.parameter_standards = state
            .pass
            .convert_series(standards.into_iter().map(SeriesSource::from).collect());
        Ok(())
    }

    /// SMARTEN 实时数据地址：优先节点地址中的主机名，其次端口主机名。
    async fn smarten_live_url(
        &self,
        state: &StatusContext,
        cancel: &CancellationToken,
    ) -> Result<String, StatusError> {
        let ctx = &state.ctx;
        let parsed_host = match self.inner.parser.parse(state.record.node_address.as_deref()) {
            Ok(parsed) => parsed.hostname,
            Err(err) => {
                tracing::debug!(
                    target: "apex.status",
                    correlation_id = %ctx.correlation_id,
                    node_id = %state.record.node_id,
                    error = %err,
                    "smarten_address_unparsable"
                );
                None
            }
        };

        let host = match parsed_host {
            Some(host) => Some(host),
            None => match state.record.port_id {
                Some(port_id) => {
                    let port = soft(
                        ctx,
                        "port",
                        guarded(cancel, self.inner.stores.ports.find_port(ctx, port_id)).await?,
                    );
                    port.and_then(|port| port.hostname)
                }
                None => None,
            },
        };

        let host = host
            .map(|host| host.trim().to_string())
            .filter(|host| !host.is_empty());
        Ok(match host {
            Some(host) => format!("http://{}:{}/", host, self.inner.config.smarten_api_port),
            None => String::new(),
        })
    }

    fn build_dto(&self, state: StatusContext) -> AssetStatusDto {
        let StatusContext {
            record,
            diagram,
            rod_strings,
            detail,
            alarms,
            exceptions,
            registers,
            parameter_standards,
            live_url,
            ..
        } = state;
        AssetStatusDto {
            asset_id: record.asset_id,
            asset_name: record.asset_name,
            node_id: record.node_id,
            poc_type: record.poc_type,
            application_id: record.application_id,
            diagram_type: diagram,
            run_status: record.run_status,
            comm_status: record.comm_status,
            last_good_scan_ms: record.last_good_scan_ms,
            tz_offset_hours: record.tz_offset_hours,
            honor_daylight_savings: record.honor_daylight_savings,
            pumping_unit_name: record.pumping_unit_name,
            pumping_unit_manufacturer: record.pumping_unit_manufacturer,
            motor_kind: record.motor_kind,
            pump_type: record.pump_type,
            tubing_pressure: quantity(record.tubing_pressure),
            casing_pressure: quantity(record.casing_pressure),
            pump_intake_pressure: quantity(record.pump_intake_pressure),
            fluid_level: quantity(record.fluid_level),
            pump_depth: quantity(record.pump_depth),
            stroke_length: quantity(record.stroke_length),
            gross_rate: quantity(record.gross_rate),
            oil_rate: quantity(record.oil_rate),
            water_rate: quantity(record.water_rate),
            gas_rate: quantity(record.gas_rate),
            motor_power: quantity(record.motor_power),
            peak_load: quantity(record.peak_load),
            minimum_load: quantity(record.minimum_load),
            yesterday_gas_volume: quantity(record.yesterday_gas_volume),
            rod_strings,
            detail,
            registers,
            parameter_standards,
            alarms,
            exceptions,
            refresh_interval_seconds: self.inner.config.refresh_interval_seconds,
            live_url,
        }
    }
}

fn quantity(measured: Measured) -> QuantityDto {
    QuantityDto {
        value: measured.value,
        unit: measured.unit,
    }
}

/// 与取消令牌竞争；令牌先触发时返回 `Cancelled`。
async fn guarded<F, T>(cancel: &CancellationToken, fut: F) -> Result<T, StatusError>
where
    F: Future<Output = T>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(StatusError::Cancelled),
        out = fut => Ok(out),
    }
}

/// 可选分区读取失败时记录并留空。
fn soft<T: Default>(
    ctx: &RequestContext,
    section: &'static str,
    result: Result<T, StorageError>,
) -> T {
    match result {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(
                target: "apex.status",
                correlation_id = %ctx.correlation_id,
                section,
                error = %err,
                "status_section_failed"
            );
            T::default()
        }
    }
}
