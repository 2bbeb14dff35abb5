use thiserror::Error;

/// Errors raised while rendering a message body.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A template failed to parse.
    #[error("syntax error in template '{name}': {source}")]
    Syntax {
        name: String,
        #[source]
        source: minijinja::Error,
    },

    /// A template parsed but failed during evaluation.
    #[error("error rendering {field}: {source}")]
    Render {
        field: String,
        #[source]
        source: minijinja::Error,
    },

    /// The rendered body exceeded the size limit.
    #[error("rendered body is {size} bytes, exceeding the limit of {limit} bytes")]
    TooLarge { size: usize, limit: usize },
}
