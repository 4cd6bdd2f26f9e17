//! 基于 storage 的换算上下文提供者。

use crate::NormalizeError;
use crate::catalog::all_phrase_ids;
use crate::pass::{ConversionPass, UnitPreferences};
use crate::rounding::DEFAULT_SIGNIFICANT_DIGITS;
use apex_storage::{PhraseStore, SystemParameterStore, UserDefaultStore};
use async_trait::async_trait;
use domain::{ControlMode, RequestContext};
use std::sync::Arc;

/// 系统参数名：有效数字。
pub const SIGNIFICANT_DIGITS_PARAMETER: &str = "SignificantDigits";

/// 换算上下文提供者抽象。
#[async_trait]
pub trait ConversionProvider: Send + Sync {
    async fn load(
        &self,
        ctx: &RequestContext,
        user_id: &str,
    ) -> Result<ConversionPass, NormalizeError>;
}

/// 从系统参数、短语与用户默认值组装换算上下文。
#[derive(Clone)]
pub struct StorageConversionProvider {
    parameters: Arc<dyn SystemParameterStore>,
    phrases: Arc<dyn PhraseStore>,
    user_defaults: Arc<dyn UserDefaultStore>,
}

impl StorageConversionProvider {
    pub fn new(
        parameters: Arc<dyn SystemParameterStore>,
        phrases: Arc<dyn PhraseStore>,
        user_defaults: Arc<dyn UserDefaultStore>,
    ) -> Self {
        Self {
            parameters,
            phrases,
            user_defaults,
        }
    }

    async fn significant_digits(&self, ctx: &RequestContext) -> Result<u32, NormalizeError> {
        let raw = self
            .parameters
            .get_parameter(ctx, SIGNIFICANT_DIGITS_PARAMETER)
            .await
            .map_err(|err| NormalizeError::Storage(err.to_string()))?;
        let Some(raw) = raw else {
            return Ok(DEFAULT_SIGNIFICANT_DIGITS);
        };
        match raw.trim().parse::<u32>() {
            Ok(digits) if digits > 0 => Ok(digits),
            _ => {
                tracing::debug!(
                    target: "apex.normalize",
                    correlation_id = %ctx.correlation_id,
                    raw = %raw,
                    "significant_digits_invalid"
                );
                Ok(DEFAULT_SIGNIFICANT_DIGITS)
            }
        }
    }
}

#[async_trait]
impl ConversionProvider for StorageConversionProvider {
    async fn load(
        &self,
        ctx: &RequestContext,
        user_id: &str,
    ) -> Result<ConversionPass, NormalizeError> {
        let significant_digits = self.significant_digits(ctx).await?;

        let mut phrase_ids = all_phrase_ids();
        phrase_ids.extend_from_slice(&ControlMode::PHRASE_IDS);
        let phrases = self
            .phrases
            .get_phrases(ctx, &phrase_ids)
            .await
            .map_err(|err| NormalizeError::Storage(err.to_string()))?;

        let user = self
            .user_defaults
            .get_unit_preferences(ctx, user_id)
            .await
            .map_err(|err| NormalizeError::Storage(err.to_string()))?;
        let system = if user.is_empty() {
            self.parameters
                .get_unit_defaults(ctx)
                .await
                .map_err(|err| NormalizeError::Storage(err.to_string()))?
        } else {
            Default::default()
        };

        Ok(ConversionPass::new(
            phrases,
            UnitPreferences::resolve(user, system),
            significant_digits,
        ))
    }
}
