#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    #[error("Clock error: {}", _0)]
    Clock(#[from] elec_clock::Error),

    #[error("Could not parse the timing configuration: {}", _0)]
    Parse(#[from] serde_json::Error),

    #[error("The process-wide time reference service was already initialized")]
    GlobalAlreadyInitialized,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
