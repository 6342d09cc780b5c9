//! # petstore-client
//!
//! A typed HTTP client layer for driving a pet store REST API (pets, store orders and
//! users) from test code. Every operation returns a [`Response`] handle so callers can
//! assert on status codes of negative paths, or decode the body into one of the
//! domain models in [`model`].
//!
//! ```no_run
//! use petstore_client::clients::PetClient;
//! use petstore_client::model::{Pet, PetStatus};
//!
//! # fn main() -> petstore_client::Result<()> {
//! let pets = PetClient::new();
//! let pet = Pet {
//!     id: Some(42),
//!     name: Some("Rex".to_string()),
//!     photo_urls: Some(vec!["https://example.com/rex.png".to_string()]),
//!     status: Some(PetStatus::Available),
//!     ..Pet::default()
//! };
//!
//! let created = pets.create_pet_and_get_response(&pet)?;
//! assert_eq!(created.name, pet.name);
//!
//! let response = pets.delete_pet(42)?;
//! assert_eq!(response.status_code, 200);
//! assert_eq!(pets.get_pet_by_id(42)?.status_code, 404);
//! # Ok(())
//! # }
//! ```
//!
//! Configuration (base URL, API key, timeout) is read once from an optional
//! `application.*` file and `PETSTORE_*` environment variables, see [`config`].

use std::fmt;
use std::path::PathBuf;

pub mod clients;
pub mod config;
pub mod executor;
pub mod http_client;
pub mod model;
pub mod output;
pub mod response;
pub mod specification;

pub use crate::config::Configuration;
pub use crate::response::Response;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub struct Error {
    pub kind: ErrorKind,
}

#[derive(Debug)]
pub enum ErrorKind {
    /// Connection refused, DNS failure, transport timeout.
    Transport(reqwest::Error),
    Encode(serde_json::Error),
    /// The response body did not match the requested shape.
    Decode(serde_json::Error),
    InvalidUrl(String),
    UnresolvedPath(String),
    InvalidJsonPath(String),
    Io(PathBuf, std::io::Error),
    Expectation(String),
}

impl Error {
    pub fn is_decode(&self) -> bool {
        matches!(self.kind, ErrorKind::Decode(_))
    }

    pub fn is_transport(&self) -> bool {
        matches!(self.kind, ErrorKind::Transport(_))
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error { kind }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            ErrorKind::Transport(e) => Some(e),
            ErrorKind::Encode(e) | ErrorKind::Decode(e) => Some(e),
            ErrorKind::Io(_, e) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ErrorKind::Transport(e) => write!(f, "Error executing request: {}", e),
            ErrorKind::Encode(e) => write!(f, "Could not serialize request body: {}", e),
            ErrorKind::Decode(e) => write!(f, "Could not decode response body: {}", e),
            ErrorKind::InvalidUrl(message) => write!(f, "Invalid url: {}", message),
            ErrorKind::UnresolvedPath(message) => write!(f, "Unresolved path: {}", message),
            ErrorKind::InvalidJsonPath(path) => write!(f, "Invalid json path: {}", path),
            ErrorKind::Io(path, e) => write!(f, "{}: {}", path.display(), e),
            ErrorKind::Expectation(message) => write!(f, "Unexpected response: {}", message),
        }
    }
}
