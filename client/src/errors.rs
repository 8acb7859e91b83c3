use serde::Deserialize;

/// Single error entry of a GraphQL response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphQlError {
    /// Human readable message as sent by the server.
    pub message: String,
    /// Value of the `code` extension, when present.
    pub code: Option<String>,
}

impl std::fmt::Display for GraphQlError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.code {
            Some(code) => write!(f, "[{code}] {}", self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawGraphQlError {
    pub message: String,
    #[serde(default)]
    pub extensions: Option<RawErrorExtensions>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawErrorExtensions {
    #[serde(default)]
    pub code: Option<String>,
}

impl From<RawGraphQlError> for GraphQlError {
    fn from(value: RawGraphQlError) -> Self {
        Self {
            message: value.message,
            code: value.extensions.and_then(|e| e.code),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MarketplaceClientError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid url: {0}")]
    UrlParse(#[from] url::ParseError),
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("graphql error: {}", .0.iter().map(ToString::to_string).collect::<Vec<_>>().join(", "))]
    GraphQl(Vec<GraphQlError>),
    #[error("response contained no data")]
    NoData,
}

impl MarketplaceClientError {
    /// Codes of all GraphQL errors carried by this error, empty for other kinds.
    pub fn codes(&self) -> Vec<&str> {
        match self {
            MarketplaceClientError::GraphQl(errors) => errors.iter().filter_map(|e| e.code.as_deref()).collect(),
            _ => Vec::new(),
        }
    }
}
