use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),

    #[error("all {hosts} upstream mirrors failed, last: {last}")]
    UpstreamExhausted { hosts: usize, last: String },
}
