use async_trait::async_trait;

use interface::{ExchangeError, OrderResponse, RequestParams};

pub mod binance;

/// 선물 주문을 실제로 보내는 쪽. 테스트에서는 기록용 구현체로 바꿔 끼운다
#[async_trait]
pub trait FuturesOrderApi: Send + Sync {
    /// 파라미터에 서명을 붙여 주문을 한 번 보내고, 디코딩된 응답을 돌려준다
    async fn futures_create_order(
        &self,
        params: &RequestParams,
    ) -> Result<OrderResponse, ExchangeError>;
}

// Convenience re-exports
pub use binance::BinanceClient;
