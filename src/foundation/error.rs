pub type NounResult<T> = Result<T, NounError>;

#[derive(thiserror::Error, Debug)]
pub enum NounError {
    /// The trait catalog cannot produce parts for a seed.
    #[error("resolution error: {0}")]
    Resolution(String),

    /// The custom raster asset is missing, unreadable, or unusable.
    #[error("asset read error: {0}")]
    AssetRead(String),

    /// Layers, palette, or background cannot be flattened into a document.
    #[error("render error: {0}")]
    Render(String),

    #[error("io error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("validation error: {0}")]
    Validation(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl NounError {
    pub fn resolution(msg: impl Into<String>) -> Self {
        Self::Resolution(msg.into())
    }

    pub fn asset_read(msg: impl Into<String>) -> Self {
        Self::AssetRead(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}
