use serde::{Deserialize, Serialize};

/// 주문 응답. 자주 쓰는 필드만 꺼내 두고 나머지는 `extra`에 원본 그대로 보관한다
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub symbol: Option<String>,
    pub order_id: Option<u64>,
    pub status: Option<String>,
    #[serde(rename = "type")]
    pub order_type: Option<String>,
    pub side: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_futures_order_response() {
        let body = r#"{
            "orderId": 4061925384,
            "symbol": "BTCUSDT",
            "status": "NEW",
            "clientOrderId": "x-abc",
            "price": "100",
            "origQty": "1",
            "executedQty": "0",
            "type": "STOP",
            "side": "BUY",
            "stopPrice": "95",
            "workingType": "CONTRACT_PRICE",
            "reduceOnly": false
        }"#;
        let resp: OrderResponse = serde_json::from_str(body).unwrap();

        assert_eq!(resp.order_id, Some(4061925384));
        assert_eq!(resp.symbol.as_deref(), Some("BTCUSDT"));
        assert_eq!(resp.order_type.as_deref(), Some("STOP"));
        assert_eq!(resp.side.as_deref(), Some("BUY"));
        assert_eq!(resp.extra["clientOrderId"], "x-abc");
        assert_eq!(resp.extra["workingType"], "CONTRACT_PRICE");
        assert_eq!(resp.extra["reduceOnly"], false);
    }
}
