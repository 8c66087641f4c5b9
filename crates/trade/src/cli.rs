use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

use rust_decimal::Decimal;
use structopt::clap::{self, ErrorKind};
use structopt::StructOpt;
use tracing::{debug, error};

use interface::{OrderResponse, OrderType, Side, TimeInForce};

use crate::bot::{BasicBot, PlaceOrderOptions};
use crate::error::{error_chain, OrderError};

#[derive(Debug, StructOpt)]
#[structopt(
    name = "trade",
    about = "Place orders on the Binance Futures Testnet"
)]
pub struct Args {
    /// Binance API key
    #[structopt(long, env = "BINANCE_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Binance API secret
    #[structopt(long, env = "BINANCE_API_SECRET", hide_env_values = true)]
    pub api_secret: String,

    /// Trading pair symbol (e.g., BTCUSDT)
    #[structopt(long, default_value = "BTCUSDT")]
    pub symbol: String,

    /// Order side
    #[structopt(long, possible_values = &["BUY", "SELL"])]
    pub side: Side,

    /// Order type to execute
    #[structopt(
        long = "type",
        default_value = "MARKET",
        possible_values = &["MARKET", "LIMIT", "STOP_LIMIT"]
    )]
    pub order_type: OrderType,

    /// Order quantity (base asset amount)
    #[structopt(long, parse(try_from_str = parse_positive_decimal), allow_hyphen_values = true)]
    pub quantity: Decimal,

    /// Limit price for LIMIT or STOP_LIMIT orders
    #[structopt(long, parse(try_from_str = parse_positive_decimal), allow_hyphen_values = true)]
    pub price: Option<Decimal>,

    /// Stop price for STOP_LIMIT orders
    #[structopt(long, parse(try_from_str = parse_positive_decimal), allow_hyphen_values = true)]
    pub stop_price: Option<Decimal>,

    /// Time in force for limit-based orders
    #[structopt(
        long,
        default_value = "GTC",
        possible_values = &["GTC", "IOC", "FOK", "GTX"]
    )]
    pub time_in_force: TimeInForce,

    /// Mark order as reduce-only
    #[structopt(long)]
    pub reduce_only: bool,

    /// Path to the log file
    #[structopt(long, default_value = "bot.log", parse(from_os_str))]
    pub log_file: PathBuf,

    /// Logging level (DEBUG, INFO, WARNING, ERROR)
    #[structopt(long, default_value = "INFO")]
    pub log_level: String,
}

/// 프로세스 종료 코드
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Success = 0,
    ExchangeError = 1,
    InputError = 2,
    Unexpected = 3,
}

impl ExitStatus {
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status.code())
    }
}

/// 0보다 큰 10진수만 허용한다
pub fn parse_positive_decimal(value: &str) -> Result<Decimal, String> {
    let parsed = Decimal::from_str(value.trim())
        .map_err(|_| format!("Invalid decimal value: {}", value))?;
    if parsed <= Decimal::ZERO {
        return Err(format!("must be greater than 0, got {}", value));
    }
    Ok(parsed)
}

pub fn parse_args<I, T>(iter: I) -> Result<Args, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Args::from_iter_safe(iter)
}

/// 인자 파싱 실패를 출력하고 종료 코드를 고른다. --help/--version은 성공으로 본다
pub fn report_parse_error(err: &clap::Error) -> ExitStatus {
    match err.kind {
        ErrorKind::HelpDisplayed | ErrorKind::VersionDisplayed => {
            println!("{}", err.message);
            ExitStatus::Success
        }
        _ => {
            eprintln!("{}", err.message);
            ExitStatus::InputError
        }
    }
}

/// 로깅 초기화처럼 주문 전에 실패한 경우. 로그가 없을 수 있으니 stderr에 원인 전체를 남긴다
pub fn report_startup_error(err: &eyre::Report) -> ExitStatus {
    eprintln!("Unexpected error: {:#}", err);
    ExitStatus::Unexpected
}

/// 주문 타입에 맞는 편의 메서드로 보낸다. 필요한 가격이 없으면 네트워크 호출 전에 실패한다
pub async fn execute_order(args: &Args, bot: &BasicBot) -> Result<OrderResponse, OrderError> {
    let mut options = PlaceOrderOptions {
        time_in_force: args.time_in_force,
        ..Default::default()
    };
    if args.reduce_only {
        options.reduce_only = Some(true);
    }

    debug!(
        "Dispatching {} order: symbol={} side={} quantity={} price={:?} stop_price={:?} options={:?}",
        args.order_type,
        args.symbol,
        args.side,
        args.quantity,
        args.price,
        args.stop_price,
        options
    );

    let response = match args.order_type {
        OrderType::Market => {
            bot.place_market_order(&args.symbol, args.side, args.quantity, options)
                .await?
        }
        OrderType::Limit => {
            let price = args.price.ok_or_else(|| {
                OrderError::InvalidInput("--price is required for LIMIT orders".to_string())
            })?;
            bot.place_limit_order(&args.symbol, args.side, args.quantity, price, options)
                .await?
        }
        OrderType::StopLimit => match (args.price, args.stop_price) {
            (Some(price), Some(stop_price)) => {
                bot.place_stop_limit_order(
                    &args.symbol,
                    args.side,
                    args.quantity,
                    price,
                    stop_price,
                    options,
                )
                .await?
            }
            _ => {
                return Err(OrderError::InvalidInput(
                    "--price and --stop-price are required for STOP_LIMIT orders".to_string(),
                ))
            }
        },
        other => {
            return Err(OrderError::InvalidInput(format!(
                "unsupported order type: {}",
                other
            )))
        }
    };

    Ok(response)
}

/// 주문을 실행하고 결과를 stdout에 출력한다
pub async fn run(args: &Args, bot: &BasicBot) -> ExitStatus {
    run_with_output(args, bot, &mut std::io::stdout()).await
}

pub async fn run_with_output<W: Write>(args: &Args, bot: &BasicBot, out: &mut W) -> ExitStatus {
    match execute_order(args, bot).await {
        Ok(response) => {
            let _ = print_order_summary(out, &response);
            ExitStatus::Success
        }
        Err(OrderError::InvalidInput(msg)) => {
            error!("Input validation error: {}", msg);
            let _ = writeln!(out, "Input error: {}", msg);
            ExitStatus::InputError
        }
        Err(OrderError::Exchange(e)) if e.is_exchange_reported() => {
            error!("Binance error: {}", e);
            let _ = writeln!(out, "Order failed: {}", e);
            ExitStatus::ExchangeError
        }
        Err(OrderError::Exchange(e)) => {
            error!("Unexpected error: {}", error_chain(&e));
            let _ = writeln!(out, "Unexpected error: {}", e);
            ExitStatus::Unexpected
        }
    }
}

fn print_order_summary<W: Write>(out: &mut W, response: &OrderResponse) -> std::io::Result<()> {
    fn or_na(value: Option<&str>) -> &str {
        value.unwrap_or("N/A")
    }

    writeln!(out, "Order placed successfully!")?;
    writeln!(out, "Symbol: {}", or_na(response.symbol.as_deref()))?;
    match response.order_id {
        Some(order_id) => writeln!(out, "Order ID: {}", order_id)?,
        None => writeln!(out, "Order ID: N/A")?,
    }
    writeln!(out, "Status: {}", or_na(response.status.as_deref()))?;
    writeln!(out, "Type: {}", or_na(response.order_type.as_deref()))?;
    writeln!(out, "Side: {}", or_na(response.side.as_deref()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> Result<Args, clap::Error> {
        let mut argv = vec![
            "trade",
            "--api-key",
            "key",
            "--api-secret",
            "secret",
            "--side",
            "BUY",
        ];
        argv.extend_from_slice(extra);
        parse_args(argv)
    }

    #[test]
    fn test_defaults() {
        let args = args(&["--quantity", "0.5"]).unwrap();
        assert_eq!(args.symbol, "BTCUSDT");
        assert_eq!(args.order_type, OrderType::Market);
        assert_eq!(args.time_in_force, TimeInForce::Gtc);
        assert_eq!(args.quantity, Decimal::from_str("0.5").unwrap());
        assert_eq!(args.price, None);
        assert!(!args.reduce_only);
        assert_eq!(args.log_file, PathBuf::from("bot.log"));
        assert_eq!(args.log_level, "INFO");
    }

    #[test]
    fn test_negative_quantity_rejected_at_parse_time() {
        let err = args(&["--quantity", "-5"]).unwrap_err();
        assert!(err.message.contains("greater than 0"), "{}", err.message);
        assert_eq!(report_parse_error(&err), ExitStatus::InputError);
    }

    #[test]
    fn test_zero_and_garbage_prices_rejected() {
        assert!(args(&["--quantity", "1", "--price", "0"]).is_err());
        assert!(args(&["--quantity", "1", "--stop-price", "abc"]).is_err());
    }

    #[test]
    fn test_unsupported_type_rejected() {
        assert!(args(&["--quantity", "1", "--type", "STOP_MARKET"]).is_err());
        assert!(args(&["--quantity", "1", "--side", "HOLD"]).is_err());
    }

    #[test]
    fn test_missing_required_flag() {
        let err = parse_args(vec!["trade", "--api-key", "k", "--api-secret", "s", "--quantity", "1"])
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_parse_positive_decimal() {
        assert_eq!(
            parse_positive_decimal("100.25").unwrap(),
            Decimal::from_str("100.25").unwrap()
        );
        assert!(parse_positive_decimal("0").is_err());
        assert!(parse_positive_decimal("-0.1").is_err());
        assert!(parse_positive_decimal("NaN").is_err());
    }

    #[test]
    fn test_log_file_failure_is_unexpected_error() {
        // 디렉터리는 로그 파일로 열 수 없다
        let err = crate::logger::init_tracing(std::path::Path::new("/"), "INFO")
            .err()
            .expect("opening a directory as the log file fails");
        let status = report_startup_error(&err);
        assert_eq!(status, ExitStatus::Unexpected);
        assert_eq!(status.code(), 3);
    }

    #[test]
    fn test_exit_status_codes() {
        assert_eq!(ExitStatus::Success.code(), 0);
        assert_eq!(ExitStatus::ExchangeError.code(), 1);
        assert_eq!(ExitStatus::InputError.code(), 2);
        assert_eq!(ExitStatus::Unexpected.code(), 3);
    }
}
