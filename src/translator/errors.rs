use thiserror::Error;

#[derive(Error, Debug)]
pub enum TranslateError {
    #[error("translation request failed: {0}")]
    Request(String),

    #[error("translation api returned status {0}")]
    Api(reqwest::StatusCode),

    #[error("translation api returned an empty result")]
    Empty,

    #[error("batch result count mismatch: sent {sent}, received {received}")]
    BatchMismatch { sent: usize, received: usize },

    #[error("chunk {index} failed: {source}")]
    Chunk {
        index: usize,
        #[source]
        source: Box<TranslateError>,
    },
}

impl TranslateError {
    pub fn from_reqwest_error(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            Self::Api(status)
        } else {
            Self::Request(err.to_string())
        }
    }
}
