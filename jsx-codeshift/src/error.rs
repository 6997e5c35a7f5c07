use std::path::PathBuf;

use thiserror::Error;

/// Everything that can abort the transform of a single file.
#[derive(Error, Debug)]
pub enum TransformError {
    #[error("{file}:{line}:{column}: parse error: {message}")]
    Parse {
        file: String,
        line: usize,
        column: usize,
        message: String,
    },

    #[error("failed to print transformed source: {0}")]
    Emit(#[from] std::io::Error),

    #[error("printed source is not valid UTF-8")]
    EmitEncoding(#[from] std::string::FromUtf8Error),

    #[error("More than one parameter was passed to the render function ({count} found)")]
    TooManyRenderParams { count: usize },

    #[error("Given `{key}` property does not resolve to a function")]
    RenderNotFunction { key: String },

    #[error("Unexpected attribute of type \"{kind}\"")]
    UnexpectedAttribute { kind: &'static str },

    #[error("invalid transform config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TransformError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Errors raised by the rewrite passes themselves, as opposed to I/O or
    /// syntax problems with the input.
    pub fn is_rewrite_error(&self) -> bool {
        matches!(
            self,
            Self::TooManyRenderParams { .. }
                | Self::RenderNotFunction { .. }
                | Self::UnexpectedAttribute { .. }
        )
    }
}

pub type Result<T, E = TransformError> = std::result::Result<T, E>;
