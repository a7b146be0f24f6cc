#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("unknown page type: {0}")]
    UnknownPageType(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Invalid locator: {message}")]
    InvalidLocator { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<Error> for dql_core::Error {
    fn from(error: Error) -> Self {
        dql_core::Error::backend(error)
    }
}
