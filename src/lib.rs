//! Flix catalog client library for Rust.
//!
//! A client for the Flix demo video-catalog backend: sign in or register,
//! browse the movie catalog, and keep a personal list. The backend owns all
//! data; this crate only issues requests and holds transient view state.
//! The `flix-tui` binary renders it in the terminal.
//!
//! # Quick Start
//!
//! ```no_run
//! use flix_client::{FlixClient, HomeState, SessionStore};
//!
//! let client = FlixClient::new("http://localhost:8000").unwrap();
//! let mut session = SessionStore::new();
//! session
//!     .sign_in(client.auth().login("demo@flix.com", "demo").unwrap())
//!     .unwrap();
//!
//! let mut home = HomeState::new();
//! home.load(&client, session.session()).unwrap();
//! for m in &home.movies {
//!     println!("{}: {}", m.id, m.title);
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod home;
pub mod http;
pub mod models;
pub mod session;
pub mod tui;

// Re-export the main public types at the crate root for convenience.
pub use client::{AuthClient, FlixClient, MoviesClient, MyListClient};
pub use config::{ClientConfig, DEFAULT_BACKEND_URL};
pub use error::{FlixApiError, Result};
pub use home::{
    fetch_catalog, AddOutcome, CatalogSnapshot, HomeState, MovieRow, ROW_GENRE,
    SIGN_IN_REQUIRED_NOTICE,
};
pub use http::{HttpClient, RequestOptions};
pub use models::{AuthResponse, Movie, MovieFilter, User};
pub use session::{Session, SessionStore};
