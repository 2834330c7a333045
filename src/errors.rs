use thiserror::Error;

/// All errors that can occur in Passport.
#[derive(Debug, Error)]
pub enum PassportError {
    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed: data is corrupted or was encrypted on another machine")]
    DecryptionFailed,

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    // --- Secret errors ---
    #[error("Secret name cannot be empty")]
    SecretNameEmpty,

    #[error("Secret value cannot be empty")]
    SecretValueEmpty,

    #[error("Secret '{0}' not found")]
    SecretNotFound(String),

    #[error("Secret '{0}' already exists (remove it first to replace it)")]
    SecretAlreadyExists(String),

    // --- Workspace errors ---
    #[error("Workspace name cannot be empty")]
    WorkspaceNameEmpty,

    #[error("Workspace path cannot be empty")]
    WorkspacePathEmpty,

    #[error("Workspace name '{0}' is already in use")]
    WorkspaceNameExists(String),

    #[error("A workspace is already registered at {0}")]
    WorkspacePathExists(String),

    #[error("No workspace registered at {0}")]
    WorkspaceNotFound(String),

    // --- Script errors ---
    #[error("Script name cannot be empty")]
    ScriptNameEmpty,

    #[error("Script command cannot be empty")]
    ScriptCommandEmpty,

    #[error("Script '{0}' already exists in this workspace")]
    ScriptNameExists(String),

    #[error("Script '{0}' not found in this workspace")]
    ScriptNotFound(String),

    #[error("Unterminated quote in command: {0}")]
    UnterminatedQuote(String),

    #[error("Command is empty after interpolation")]
    EmptyCommand,

    // --- Process errors ---
    #[error("Failed to start '{program}': {source}")]
    SpawnFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Process failed: {0}")]
    ProcessFailed(String),

    // --- Store errors ---
    #[error("Invalid store format: {0}")]
    InvalidStoreFormat(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),
}

/// Convenience type alias for Passport results.
pub type Result<T> = std::result::Result<T, PassportError>;
