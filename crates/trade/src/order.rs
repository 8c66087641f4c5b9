//! 주문 의도를 Binance Futures 요청 파라미터로 바꾸는 부분
//!
//! 검증은 하지 않는다. 호출하는 쪽(CLI)이 가격 누락이나 음수 수량을 미리 걸러야 한다.

use interface::{OrderType, RequestParams, Side, TimeInForce};
use rust_decimal::Decimal;

/// 한 번의 주문 요청
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRequest {
    pub symbol: String,
    pub side: Side,
    pub order_type: OrderType,
    pub quantity: Decimal,
    pub price: Option<Decimal>,
    pub time_in_force: TimeInForce,
    pub stop_price: Option<Decimal>,
    /// None이면 전송하지 않고, Some(false)는 그대로 false로 보낸다
    pub reduce_only: Option<bool>,
    /// 마지막에 병합되며 계산된 키를 덮어쓴다 (symbol, quantity 포함)
    pub extra_params: RequestParams,
}

impl OrderRequest {
    pub fn new(
        symbol: impl Into<String>,
        side: Side,
        order_type: OrderType,
        quantity: Decimal,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            order_type,
            quantity,
            price: None,
            time_in_force: TimeInForce::default(),
            stop_price: None,
            reduce_only: None,
            extra_params: RequestParams::new(),
        }
    }

    pub fn with_price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_stop_price(mut self, stop_price: Decimal) -> Self {
        self.stop_price = Some(stop_price);
        self
    }

    pub fn with_time_in_force(mut self, time_in_force: TimeInForce) -> Self {
        self.time_in_force = time_in_force;
        self
    }

    pub fn with_reduce_only(mut self, reduce_only: Option<bool>) -> Self {
        self.reduce_only = reduce_only;
        self
    }

    pub fn with_extra_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_params.insert(key, value);
        self
    }

    pub fn with_extra_params(mut self, extra_params: RequestParams) -> Self {
        self.extra_params.extend(extra_params.iter());
        self
    }

    /// 요청 파라미터 생성. 값이 없는 선택 필드는 키 자체를 넣지 않는다
    pub fn to_request_params(&self) -> RequestParams {
        let mut params = RequestParams::new();
        params.insert("symbol", self.symbol.to_uppercase());
        params.insert("side", self.side.as_str());
        params.insert("type", self.order_type.as_str());
        params.insert("quantity", self.quantity.to_string());

        if let Some(price) = self.price {
            params.insert("price", price.to_string());
        }
        if self.order_type.requires_time_in_force() {
            params.insert("timeInForce", self.time_in_force.as_str());
        }
        if let Some(stop_price) = self.stop_price {
            params.insert("stopPrice", stop_price.to_string());
        }
        if let Some(reduce_only) = self.reduce_only {
            params.insert("reduceOnly", reduce_only.to_string());
        }

        params.extend(self.extra_params.iter());
        params
    }
}
