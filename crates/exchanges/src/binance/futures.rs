use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use interface::{ExchangeError, OrderResponse, RequestParams};

use super::{encode_query, generate_signature, get_timestamp, BinanceClient};
use crate::FuturesOrderApi;

const ORDER_ENDPOINT: &str = "/fapi/v1/order";

/// Binance 에러 응답 본문
#[derive(Debug, Deserialize)]
struct BinanceErrorBody {
    code: i64,
    msg: String,
}

#[async_trait]
impl FuturesOrderApi for BinanceClient {
    async fn futures_create_order(
        &self,
        params: &RequestParams,
    ) -> Result<OrderResponse, ExchangeError> {
        let mut signed = params.clone();
        // 서명은 항상 여기서 새로 계산한다
        signed.remove("signature");
        if let Some(recv_window) = self.recv_window {
            signed.insert("recvWindow", recv_window.to_string());
        }
        signed.insert("timestamp", get_timestamp().to_string());

        let query_string = encode_query(&signed);
        let signature = generate_signature(&query_string, &self.api_secret);

        let url = format!(
            "{}{}?{}&signature={}",
            self.base_url, ORDER_ENDPOINT, query_string, signature
        );
        debug!("futures_create_order query_string: {}", query_string);

        let response = self
            .http
            .post(&url)
            .header("X-MBX-APIKEY", self.api_key.as_str())
            .send()
            .await
            .map_err(strip_signed_url)?;

        let status = response.status();
        let response_text = response.text().await.map_err(strip_signed_url)?;

        debug!(
            "futures_create_order response: status {}, body {}",
            status, response_text
        );

        decode_order_response(status.as_u16(), &response_text)
    }
}

/// reqwest 에러에는 서명이 붙은 전체 URL이 들어 있어서 로그로 새지 않게 떼어낸다
fn strip_signed_url(err: reqwest::Error) -> ExchangeError {
    ExchangeError::Http(err.without_url())
}

/// HTTP 상태와 본문으로 주문 응답을 해석한다
pub(crate) fn decode_order_response(
    status: u16,
    body: &str,
) -> Result<OrderResponse, ExchangeError> {
    if !(200..300).contains(&status) {
        return Err(match serde_json::from_str::<BinanceErrorBody>(body) {
            Ok(err) => ExchangeError::Api {
                status,
                code: err.code,
                msg: err.msg,
            },
            Err(_) => ExchangeError::Api {
                status,
                code: 0,
                msg: format!(
                    "Invalid JSON error message from Binance: {}",
                    body.chars().take(200).collect::<String>()
                ),
            },
        });
    }

    let value: serde_json::Value = serde_json::from_str(body)?;

    // 200 응답이어도 주문 거부를 code/msg로 알려오는 경우가 있다
    if value.get("orderId").is_none() {
        if let Ok(err) = serde_json::from_value::<BinanceErrorBody>(value.clone()) {
            return Err(ExchangeError::Order {
                code: err.code,
                msg: err.msg,
            });
        }
    }

    Ok(serde_json::from_value(value)?)
}
