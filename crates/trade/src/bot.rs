use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, error, info};

use exchanges::{BinanceClient, FuturesOrderApi};
use interface::{ExchangeError, OrderResponse, OrderType, RequestParams, Side, TimeInForce};

use crate::error::error_chain;
use crate::order::OrderRequest;

/// 편의 주문 메서드의 선택 옵션
#[derive(Debug, Clone, Default)]
pub struct PlaceOrderOptions {
    /// MARKET 주문에서는 전송되지 않는다
    pub time_in_force: TimeInForce,
    pub reduce_only: Option<bool>,
    pub extra_params: RequestParams,
}

/// Binance Futures 주문 봇
pub struct BasicBot {
    client: Arc<dyn FuturesOrderApi>,
}

impl BasicBot {
    pub fn new(api_key: &str, api_secret: &str, testnet: bool) -> Result<Self, ExchangeError> {
        let client = BinanceClient::new(api_key, api_secret, testnet)?;
        debug!(
            "Initialized BasicBot with testnet={} base_url={}",
            testnet,
            client.base_url()
        );
        Ok(Self::with_client(Arc::new(client)))
    }

    pub fn with_client(client: Arc<dyn FuturesOrderApi>) -> Self {
        Self { client }
    }

    /// 주문을 한 번 전송한다. 재시도하지 않고 에러는 그대로 돌려준다
    pub async fn place_order(&self, order: &OrderRequest) -> Result<OrderResponse, ExchangeError> {
        let request_params = order.to_request_params();
        info!(
            "Sending order request: {}",
            sanitize_for_logging(&request_params)
        );

        match self.client.futures_create_order(&request_params).await {
            Ok(response) => {
                info!(
                    "Order response: {}",
                    serde_json::to_string(&response).unwrap_or_default()
                );
                Ok(response)
            }
            Err(e) if e.is_exchange_reported() => {
                error!("Binance API error: {}", e);
                Err(e)
            }
            Err(e) => {
                error!("Unexpected error when placing order: {}", error_chain(&e));
                Err(e)
            }
        }
    }

    pub async fn place_market_order(
        &self,
        symbol: &str,
        side: Side,
        quantity: Decimal,
        options: PlaceOrderOptions,
    ) -> Result<OrderResponse, ExchangeError> {
        let order = OrderRequest::new(symbol, side, OrderType::Market, quantity)
            .with_reduce_only(options.reduce_only)
            .with_extra_params(options.extra_params);
        self.place_order(&order).await
    }

    pub async fn place_limit_order(
        &self,
        symbol: &str,
        side: Side,
        quantity: Decimal,
        price: Decimal,
        options: PlaceOrderOptions,
    ) -> Result<OrderResponse, ExchangeError> {
        let order = OrderRequest::new(symbol, side, OrderType::Limit, quantity)
            .with_price(price)
            .with_time_in_force(options.time_in_force)
            .with_reduce_only(options.reduce_only)
            .with_extra_params(options.extra_params);
        self.place_order(&order).await
    }

    /// Binance Futures에서 stop-limit은 type=STOP으로 보낸다.
    /// workingType은 CONTRACT_PRICE가 기본이고 extra_params로 바꿀 수 있다
    pub async fn place_stop_limit_order(
        &self,
        symbol: &str,
        side: Side,
        quantity: Decimal,
        price: Decimal,
        stop_price: Decimal,
        options: PlaceOrderOptions,
    ) -> Result<OrderResponse, ExchangeError> {
        let order = OrderRequest::new(symbol, side, OrderType::Stop, quantity)
            .with_price(price)
            .with_stop_price(stop_price)
            .with_time_in_force(options.time_in_force)
            .with_reduce_only(options.reduce_only)
            .with_extra_param("workingType", "CONTRACT_PRICE")
            .with_extra_params(options.extra_params);
        self.place_order(&order).await
    }
}

/// 로그에 남기기 전에 민감한 값(서명)을 제거한 사본
pub fn sanitize_for_logging(params: &RequestParams) -> RequestParams {
    let mut sanitized = params.clone();
    sanitized.remove("signature");
    sanitized
}
