//! 거래소 클라이언트와 주문 레이어가 공유하는 타입 모음

mod error;
mod order;
mod params;
mod response;

pub use error::ExchangeError;
pub use order::{OrderType, ParseEnumError, Side, TimeInForce};
pub use params::RequestParams;
pub use response::OrderResponse;
