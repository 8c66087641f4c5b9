use std::fmt;
use std::time::Duration;

use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use url::form_urlencoded;

use interface::{ExchangeError, RequestParams};

pub mod futures;

pub const FUTURES_BASE_URL: &str = "https://fapi.binance.com";
pub const FUTURES_TESTNET_URL: &str = "https://testnet.binancefuture.com";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Binance USDⓈ-M Futures 클라이언트 (서명이 필요한 주문 API 전용)
#[derive(Clone)]
pub struct BinanceClient {
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: String,
    pub(crate) api_key: String,
    pub(crate) api_secret: String,
    pub(crate) recv_window: Option<u64>,
}

impl BinanceClient {
    /// testnet이 true면 테스트넷 URL로 요청을 보낸다
    pub fn new(
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
        testnet: bool,
    ) -> Result<Self, ExchangeError> {
        let http = reqwest::Client::builder().timeout(DEFAULT_TIMEOUT).build()?;
        let base_url = if testnet {
            FUTURES_TESTNET_URL
        } else {
            FUTURES_BASE_URL
        };

        Ok(Self {
            http,
            base_url: base_url.to_string(),
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            recv_window: None,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// 설정하면 모든 서명 요청에 recvWindow(ms)를 붙인다
    pub fn with_recv_window(mut self, recv_window_ms: u64) -> Self {
        self.recv_window = Some(recv_window_ms);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl fmt::Debug for BinanceClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BinanceClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"***")
            .field("api_secret", &"***")
            .field("recv_window", &self.recv_window)
            .finish()
    }
}

type HmacSha256 = Hmac<Sha256>;

/// Binance API 서명 생성
/// query_string: 쿼리 파라미터 문자열 (예: "symbol=BTCUSDT&timestamp=1234567890")
/// api_secret: API Secret Key
pub fn generate_signature(query_string: &str, api_secret: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(api_secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(query_string.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// 타임스탬프 생성 (밀리초)
pub fn get_timestamp() -> u64 {
    Utc::now().timestamp_millis() as u64
}

/// 파라미터를 삽입 순서 그대로 form-urlencoded 쿼리 문자열로 만든다
pub fn encode_query(params: &RequestParams) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params.iter())
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_signature_matches_binance_docs() {
        // Binance 공식 문서의 HMAC 예제
        let secret = "NhqPtmdSJYdKjVHjA7PZj4Mge3R5YNiP1e3UZjInClVN65XAbvqqM6A7H5fATj0j";
        let query = "symbol=LTCBTC&side=BUY&type=LIMIT&timeInForce=GTC&quantity=1&price=0.1&recvWindow=5000&timestamp=1499827319559";
        assert_eq!(
            generate_signature(query, secret),
            "c8db56825ae71d6d79447849e617115f4a920fa2acdcab2b053c4b2838bd6b71"
        );
    }

    #[test]
    fn test_encode_query_keeps_order_and_escapes() {
        let params: RequestParams = [
            ("symbol", "BTCUSDT"),
            ("side", "BUY"),
            ("newClientOrderId", "my order/1"),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            encode_query(&params),
            "symbol=BTCUSDT&side=BUY&newClientOrderId=my+order%2F1"
        );
    }

    #[test]
    fn test_new_selects_base_url() {
        let testnet = BinanceClient::new("k", "s", true).unwrap();
        assert_eq!(testnet.base_url(), FUTURES_TESTNET_URL);

        let live = BinanceClient::new("k", "s", false).unwrap();
        assert_eq!(live.base_url(), FUTURES_BASE_URL);

        let custom = live.with_base_url("http://127.0.0.1:9000/");
        assert_eq!(custom.base_url(), "http://127.0.0.1:9000");
    }

    #[test]
    fn test_debug_hides_credentials() {
        let client = BinanceClient::new("public-key", "very-secret", true).unwrap();
        let debug = format!("{:?}", client);
        assert!(!debug.contains("very-secret"));
        assert!(!debug.contains("public-key"));
    }
}
