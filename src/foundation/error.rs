pub type KanjiResult<T> = Result<T, KanjiError>;

#[derive(thiserror::Error, Debug)]
pub enum KanjiError {
    #[error("corpus error: {0}")]
    Corpus(String),

    #[error("svg error: {0}")]
    Svg(String),

    #[error("raster error: {0}")]
    Raster(String),

    #[error("metadata error: {0}")]
    Metadata(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl KanjiError {
    pub fn corpus(msg: impl Into<String>) -> Self {
        Self::Corpus(msg.into())
    }

    pub fn svg(msg: impl Into<String>) -> Self {
        Self::Svg(msg.into())
    }

    pub fn raster(msg: impl Into<String>) -> Self {
        Self::Raster(msg.into())
    }

    pub fn metadata(msg: impl Into<String>) -> Self {
        Self::Metadata(msg.into())
    }
}
