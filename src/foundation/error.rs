/// Convenience result type used across flaggrid.
pub type FlagGridResult<T> = Result<T, FlagGridError>;

/// Top-level error taxonomy for listing, rendering and composing preview grids.
#[derive(thiserror::Error, Debug)]
pub enum FlagGridError {
    /// The input directory (or another required path) does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// No qualifying images were found, so there is nothing to compose.
    #[error("empty input: {0}")]
    EmptyInput(String),

    /// A source image could not be read or is not a valid SVG.
    #[error("decode error: {0}")]
    Decode(String),

    /// The label font could not be read or contains no usable face.
    #[error("font load error: {0}")]
    FontLoad(String),

    /// The output image could not be encoded or written.
    #[error("write error: {0}")]
    Write(String),

    /// Invalid configuration or geometry.
    #[error("validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FlagGridError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn empty_input(msg: impl Into<String>) -> Self {
        Self::EmptyInput(msg.into())
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    pub fn font_load(msg: impl Into<String>) -> Self {
        Self::FontLoad(msg.into())
    }

    pub fn write(msg: impl Into<String>) -> Self {
        Self::Write(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
