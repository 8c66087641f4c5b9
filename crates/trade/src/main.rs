use std::process::ExitCode;

use color_eyre::eyre;
use tracing::error;

use trade::cli::{self, ExitStatus};
use trade::error::error_chain;
use trade::{logger, BasicBot};

#[tokio::main]
async fn main() -> eyre::Result<ExitCode> {
    // init error reporting
    color_eyre::install()?;

    // .env의 BINANCE_API_KEY / BINANCE_API_SECRET도 인자로 쓸 수 있게
    dotenv::dotenv().ok();

    let args = match cli::parse_args(std::env::args_os()) {
        Ok(args) => args,
        Err(e) => return Ok(cli::report_parse_error(&e).into()),
    };

    // init logging
    let _guards = match logger::init_tracing(&args.log_file, &args.log_level) {
        Ok(guards) => guards,
        Err(e) => return Ok(cli::report_startup_error(&e).into()),
    };

    let bot = match BasicBot::new(&args.api_key, &args.api_secret, true) {
        Ok(bot) => bot,
        Err(e) => {
            error!("Failed to initialize client: {}", error_chain(&e));
            println!("Unexpected error: {}", e);
            return Ok(ExitStatus::Unexpected.into());
        }
    };

    let status = cli::run(&args, &bot).await;
    Ok(status.into())
}
