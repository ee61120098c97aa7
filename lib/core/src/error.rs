use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Cannot flatten document: {0}")]
    Flatten(String),

    #[error("Invalid denormalization target: {0}")]
    InvalidTarget(String),

    #[error("Cannot decode {value} to {target} for field '{field}'")]
    Coercion {
        field: String,
        value: String,
        target: String,
    },

    #[error("Field '{field}' holds a nested map without a raw value")]
    RawUnwrap { field: String },

    #[error("Cannot encode boolean for field '{field}' declared as {schema_type}")]
    BoolEncoding { field: String, schema_type: String },

    #[error("Unknown schema type: {0}")]
    UnknownSchemaType(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
