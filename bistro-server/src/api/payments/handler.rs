//! Payment API Handlers
//!
//! 响应体与原客户端的解析约定保持一致：成功为 `{ "clientSecret": ... }`，
//! 失败为 `{ "error": ... }` (由 [`AppError`] 统一生成)。请求体按原样接收
//! 后手工取值，缺失或非数值的金额走本服务的 400 响应而不是框架默认的 422。

use axum::{Json, extract::State};
use serde::Serialize;
use serde_json::Value;

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIntentResponse {
    pub client_secret: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeResponse {
    pub message: &'static str,
    /// Client-side gateway key, handed out so browsers can mount the
    /// hosted payment UI.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publishable_key: Option<String>,
}

/// GET /api/create-payment-intent - 探活 + 客户端公钥下发
pub async fn probe(State(state): State<ServerState>) -> Json<ProbeResponse> {
    Json(ProbeResponse {
        message: "Payment API is active",
        publishable_key: state.config.stripe_publishable_key.clone(),
    })
}

/// POST /api/create-payment-intent - 创建支付意向
pub async fn create_intent(
    State(state): State<ServerState>,
    Json(payload): Json<Value>,
) -> AppResult<Json<CreateIntentResponse>> {
    let amount = payload
        .get("amount")
        .and_then(Value::as_f64)
        .ok_or_else(|| AppError::validation("A valid amount is required"))?;

    let currency = match payload.get("currency") {
        None | Some(Value::Null) => state.config.currency.clone(),
        Some(Value::String(code)) if !code.trim().is_empty() => code.clone(),
        Some(_) => return Err(AppError::validation("Currency must be a non-empty string")),
    };

    let intent = state.payment.create_intent(amount, &currency).await?;
    Ok(Json(CreateIntentResponse {
        client_secret: intent.client_secret,
    }))
}
