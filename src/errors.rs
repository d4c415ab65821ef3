use thiserror::Error;

/// Main error type for the Pokedex catalog client
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PokedexError {
    /// Error returned by the remote catalog or its transport
    #[error("Remote source error: {0}")]
    Source(#[from] SourceError),
    /// A remote item could not be turned into a Pokemon
    #[error("Normalization error: {0}")]
    Normalize(#[from] NormalizeError),
    /// Error reading or writing persisted state
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    /// Error loading or validating configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    /// A catalog operation was attempted without a session
    #[error("Not authenticated: log in first")]
    NotAuthenticated,
}

/// Errors raised while talking to the remote catalog
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// Connection, TLS or timeout failure before a response arrived
    #[error("transport failure: {0}")]
    Transport(String),
    /// The requested resource does not exist (HTTP 404)
    #[error("not found: {0}")]
    NotFound(String),
    /// Any other non-success HTTP status
    #[error("unexpected status {status}: {message}")]
    Status { status: u16, message: String },
    /// The response body was not the expected JSON document
    #[error("undecodable response: {0}")]
    Decode(String),
    /// The request could not be built (bad base URL, empty type name, ...)
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Errors related to turning raw remote items into view models
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    /// A required field is absent from the remote item
    #[error("malformed response: missing {0}")]
    MalformedResponse(String),
}

/// Errors related to the key-value storage backend
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// The backing medium could not be read or written
    #[error("i/o failure on key '{key}': {message}")]
    Io { key: String, message: String },
    /// A value could not be encoded for storage
    #[error("could not encode value for key '{key}': {message}")]
    Serialize { key: String, message: String },
}

/// Errors related to configuration loading
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The configuration file could not be read
    #[error("cannot read {path}: {message}")]
    Io { path: String, message: String },
    /// The configuration file is not valid RON
    #[error("cannot parse {path}: {message}")]
    Parse { path: String, message: String },
    /// A field holds a value outside its accepted range
    #[error("invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

/// Type alias for Results using PokedexError
pub type PokedexResult<T> = Result<T, PokedexError>;

/// Type alias for Results using SourceError
pub type SourceResult<T> = Result<T, SourceError>;
