use interface::ExchangeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OrderError {
    /// 네트워크 호출 전에 걸러지는 입력 오류
    #[error("{0}")]
    InvalidInput(String),
    #[error(transparent)]
    Exchange(#[from] ExchangeError),
}

/// 에러와 그 원인들을 한 줄로 이어 붙인다. 앞 메시지에 이미 들어 있는 원인은 건너뛴다
pub fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut chain = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let msg = cause.to_string();
        if !chain.contains(&msg) {
            chain.push_str(": ");
            chain.push_str(&msg);
        }
        source = cause.source();
    }
    chain
}
