/// Failure taxonomy surfaced by the admission layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    Unauthenticated,
    Forbidden,
    RateLimited,
    NotFound,
    Schema,
    Config,
    Internal,
}

impl ErrorKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Unauthenticated => "Unauthenticated",
            ErrorKind::Forbidden => "Forbidden",
            ErrorKind::RateLimited => "RateLimited",
            ErrorKind::NotFound => "NotFound",
            ErrorKind::Schema => "Schema",
            ErrorKind::Config => "Config",
            ErrorKind::Internal => "Internal",
        }
    }
}
