use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid {kind}: {value}")]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
}

/// 대소문자 구분 없이 `as_str()` 값과 비교해서 파싱한다
macro_rules! wire_enum {
    ($name:ident, $kind:literal, { $($variant:ident => $wire:literal),+ $(,)? }) => {
        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_uppercase().as_str() {
                    $($wire => Ok($name::$variant),)+
                    _ => Err(ParseEnumError {
                        kind: $kind,
                        value: s.to_string(),
                    }),
                }
            }
        }
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Side {
    Buy,
    Sell,
}

wire_enum!(Side, "side", { Buy => "BUY", Sell => "SELL" });

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    Market,
    Limit,
    Stop,
    StopMarket,
    StopLimit,
}

wire_enum!(OrderType, "order type", {
    Market => "MARKET",
    Limit => "LIMIT",
    Stop => "STOP",
    StopMarket => "STOP_MARKET",
    StopLimit => "STOP_LIMIT",
});

impl OrderType {
    /// 주문 유지 정책(timeInForce)을 함께 보내야 하는 주문 타입
    pub fn requires_time_in_force(&self) -> bool {
        matches!(
            self,
            OrderType::Limit | OrderType::Stop | OrderType::StopMarket | OrderType::StopLimit
        )
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeInForce {
    #[default]
    #[serde(rename = "GTC")]
    Gtc,
    #[serde(rename = "IOC")]
    Ioc,
    #[serde(rename = "FOK")]
    Fok,
    #[serde(rename = "GTX")]
    Gtx,
}

wire_enum!(TimeInForce, "time in force", {
    Gtc => "GTC",
    Ioc => "IOC",
    Fok => "FOK",
    Gtx => "GTX",
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("buy".parse::<Side>().unwrap(), Side::Buy);
        assert_eq!("Sell".parse::<Side>().unwrap(), Side::Sell);
        assert_eq!("stop_limit".parse::<OrderType>().unwrap(), OrderType::StopLimit);
        assert_eq!("gtx".parse::<TimeInForce>().unwrap(), TimeInForce::Gtx);
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = "HOLD".parse::<Side>().unwrap_err();
        assert_eq!(err.to_string(), "invalid side: HOLD");
    }

    #[test]
    fn test_requires_time_in_force() {
        assert!(!OrderType::Market.requires_time_in_force());
        for t in [
            OrderType::Limit,
            OrderType::Stop,
            OrderType::StopMarket,
            OrderType::StopLimit,
        ] {
            assert!(t.requires_time_in_force(), "{t} should carry timeInForce");
        }
    }

    #[test]
    fn test_serde_uses_wire_names() {
        assert_eq!(
            serde_json::to_string(&OrderType::StopMarket).unwrap(),
            "\"STOP_MARKET\""
        );
        assert_eq!(serde_json::to_string(&TimeInForce::default()).unwrap(), "\"GTC\"");
    }
}
