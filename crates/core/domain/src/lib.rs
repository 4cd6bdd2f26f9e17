pub mod alarm;
pub mod asset;
pub mod detail;
pub mod measure;

pub use alarm::{AlarmEntry, AlarmSource, ExceptionEntry};
pub use asset::{DetailKind, DiagramType, IndustryApplication, PumpingUnitType, poc_type};
pub use detail::{
    ApplicationDetail, ChemicalInjectionInfo, ControlMode, EspMotorPumpInfo, FacilityTag,
    GasFlowMeterData, GasLiftInfo, PidData, PlungerLiftData, RodString, TotalFlowPlungerLiftData,
    ValveControlData,
};
pub use measure::{Measured, UnitCategory};

/// 请求上下文：所有 store 调用共享的执行上下文。
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub correlation_id: String,
    pub user_id: String,
}

impl RequestContext {
    /// 构造显式关联 ID 与调用用户的上下文。
    pub fn new(correlation_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            correlation_id: correlation_id.into(),
            user_id: user_id.into(),
        }
    }

    /// 系统调用（总线消费者等无用户身份的场景）。
    pub fn system(correlation_id: impl Into<String>) -> Self {
        Self::new(correlation_id, "system")
    }
}

impl Default for RequestContext {
    /// 空上下文（仅用于测试或占位）。
    fn default() -> Self {
        Self {
            correlation_id: "".to_string(),
            user_id: "".to_string(),
        }
    }
}

/// 资产状态查询请求。
#[derive(Debug, Clone)]
pub struct AssetStatusRequest {
    pub asset_id: uuid::Uuid,
    pub user_id: Option<String>,
    pub correlation_id: String,
}

impl AssetStatusRequest {
    pub fn new(
        asset_id: uuid::Uuid,
        user_id: Option<String>,
        correlation_id: impl Into<String>,
    ) -> Self {
        Self {
            asset_id,
            user_id,
            correlation_id: correlation_id.into(),
        }
    }

    /// 有效的调用用户（非空白）。
    pub fn effective_user(&self) -> Option<&str> {
        self.user_id
            .as_deref()
            .map(str::trim)
            .filter(|user| !user.is_empty())
    }
}
