//! 支付网关适配层 (Stripe PaymentIntent)
//!
//! 金额换算和参数校验在本地完成；授权本身是对托管支付 API 的一次
//! 调用。服务端只返回 client secret，实际扣款确认由客户端的托管支付
//! UI 完成。密钥缺失时整个支付面不可用，返回配置错误而不是 panic。

use serde::Deserialize;

use crate::utils::{AppError, AppResult};

const STRIPE_API_URL: &str = "https://api.stripe.com/v1/payment_intents";

/// Smallest charge the gateway accepts, in minor units (50 = $0.50).
const MINIMUM_MINOR_UNITS: i64 = 50;

/// 创建成功的支付意向
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: String,
}

#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    error: StripeErrorDetail,
}

#[derive(Debug, Deserialize)]
struct StripeErrorDetail {
    message: String,
}

#[derive(Clone)]
pub struct PaymentService {
    secret_key: Option<String>,
    client: reqwest::Client,
}

impl PaymentService {
    pub fn new(secret_key: Option<String>) -> Self {
        Self {
            secret_key,
            client: reqwest::Client::new(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.secret_key.is_some()
    }

    /// 主币金额 → 最小货币单位 (美分)
    ///
    /// 四舍五入到整数美分；低于 $0.50 的金额被网关拒绝，在本地先行校验。
    pub fn minor_units(amount: f64) -> AppResult<i64> {
        if !amount.is_finite() {
            return Err(AppError::validation("Invalid amount"));
        }
        let cents = (amount * 100.0).round() as i64;
        if cents < MINIMUM_MINOR_UNITS {
            return Err(AppError::validation("Amount must be at least $0.50"));
        }
        Ok(cents)
    }

    /// 创建支付意向，返回客户端确认所需的 client secret
    pub async fn create_intent(&self, amount: f64, currency: &str) -> AppResult<PaymentIntent> {
        let cents = Self::minor_units(amount)?;
        let secret_key = self
            .secret_key
            .as_deref()
            .ok_or_else(|| AppError::payment_config("Payment gateway is not configured"))?;

        let response = self
            .client
            .post(STRIPE_API_URL)
            .basic_auth(secret_key, None::<&str>)
            .form(&[
                ("amount", cents.to_string()),
                ("currency", currency.to_string()),
                ("automatic_payment_methods[enabled]", "true".to_string()),
            ])
            .send()
            .await
            .map_err(|e| AppError::payment(format!("Payment gateway unreachable: {e}")))?;

        if response.status().is_success() {
            let intent: PaymentIntent = response
                .json()
                .await
                .map_err(|e| AppError::payment(format!("Malformed gateway response: {e}")))?;
            tracing::info!(intent_id = %intent.id, amount_cents = cents, "Payment intent created");
            Ok(intent)
        } else {
            let status = response.status();
            let message = response
                .json::<StripeErrorBody>()
                .await
                .map(|b| b.error.message)
                .unwrap_or_else(|_| format!("Gateway returned {status}"));
            tracing::warn!(%status, %message, "Payment intent creation failed");
            Err(AppError::payment(message))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minor_units_rounds_to_cents() {
        assert_eq!(PaymentService::minor_units(22.0).unwrap(), 2200);
        assert_eq!(PaymentService::minor_units(9.995).unwrap(), 1000);
        assert_eq!(PaymentService::minor_units(0.50).unwrap(), 50);
    }

    #[test]
    fn minor_units_enforces_the_fifty_cent_floor() {
        let err = PaymentService::minor_units(0.40).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(err.to_string().contains("$0.50"));
    }

    #[test]
    fn minor_units_rejects_non_finite_amounts() {
        assert!(PaymentService::minor_units(f64::NAN).is_err());
        assert!(PaymentService::minor_units(f64::INFINITY).is_err());
    }

    #[tokio::test]
    async fn unconfigured_service_fails_before_any_network_call() {
        let svc = PaymentService::new(None);
        let err = svc.create_intent(22.0, "usd").await.unwrap_err();
        assert!(matches!(err, AppError::PaymentConfig(_)));
    }
}
