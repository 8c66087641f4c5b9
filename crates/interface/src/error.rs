use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExchangeError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    /// 2xx 이외의 응답. Binance는 본문에 `{"code": .., "msg": ..}`를 담아 보낸다
    #[error("APIError(code={code}): {msg}")]
    Api { status: u16, code: i64, msg: String },
    /// 2xx 응답이지만 본문이 주문 거부를 나타내는 경우
    #[error("OrderError(code={code}): {msg}")]
    Order { code: i64, msg: String },
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ExchangeError {
    /// 거래소가 직접 보고한 에러인지 (주문 거부, 인증 실패, rate limit 등)
    pub fn is_exchange_reported(&self) -> bool {
        matches!(self, ExchangeError::Api { .. } | ExchangeError::Order { .. })
    }
}
