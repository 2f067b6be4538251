#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    #[error("Invalid clock configuration: {parameter} is out of range at {value}")]
    InvalidConfiguration { parameter: &'static str, value: f64 },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
