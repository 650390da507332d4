use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::error::{FlixApiError, Result};
use crate::http::{HttpClient, RequestOptions};
use crate::models::*;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Decode a required JSON payload into `T`.
fn decode<T: DeserializeOwned>(data: Option<Value>) -> Result<T> {
    let data = data.ok_or_else(|| FlixApiError::without_status("Empty response body"))?;
    serde_json::from_value(data)
        .map_err(|e| FlixApiError::without_status(format!("Deserialization error: {e}")))
}

fn encode<T: Serialize>(body: &T) -> Result<Value> {
    serde_json::to_value(body)
        .map_err(|e| FlixApiError::without_status(format!("Serialization error: {e}")))
}

// ---------------------------------------------------------------------------
// Public client
// ---------------------------------------------------------------------------

/// Main entry point for talking to the Flix backend.
///
/// ```no_run
/// use flix_client::{FlixClient, MovieFilter};
///
/// let client = FlixClient::new("http://localhost:8000").unwrap();
/// let comedies = client.movies().list(&MovieFilter::genre("Comedy")).unwrap();
/// for m in &comedies {
///     println!("{}: {}", m.id, m.title);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct FlixClient {
    base: HttpClient,
}

impl FlixClient {
    /// Create a new client for the backend rooted at `base_url`.
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            base: HttpClient::new(base_url)?,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base.base_url()
    }

    /// The underlying JSON wrapper, for endpoints without a typed call site.
    pub fn http(&self) -> &HttpClient {
        &self.base
    }

    // -- sub-client accessors ------------------------------------------------

    pub fn auth(&self) -> AuthClient<'_> {
        AuthClient { base: &self.base }
    }

    pub fn movies(&self) -> MoviesClient<'_> {
        MoviesClient { base: &self.base }
    }

    pub fn my_list(&self) -> MyListClient<'_> {
        MyListClient { base: &self.base }
    }
}

// ===========================================================================
// Sub-clients
// ===========================================================================

// ---- Auth -----------------------------------------------------------------

pub struct AuthClient<'a> {
    base: &'a HttpClient,
}

impl AuthClient<'_> {
    /// Create an account. Fails with the backend's message, e.g. when the
    /// email is already registered.
    pub fn register(&self, name: &str, email: &str, password: &str) -> Result<AuthResponse> {
        let body = encode(&RegisterRequest {
            name,
            email,
            password,
        })?;
        let data = self
            .base
            .call("/api/auth/register", RequestOptions::post(Some(body)))?;
        let auth: AuthResponse = decode(data)?;
        info!(user_id = auth.user.id, "registered");
        Ok(auth)
    }

    /// Sign in with email and password.
    pub fn login(&self, email: &str, password: &str) -> Result<AuthResponse> {
        let body = encode(&LoginRequest { email, password })?;
        let data = self
            .base
            .call("/api/auth/login", RequestOptions::post(Some(body)))?;
        let auth: AuthResponse = decode(data)?;
        info!(user_id = auth.user.id, "logged in");
        Ok(auth)
    }
}

// ---- Movies ---------------------------------------------------------------

pub struct MoviesClient<'a> {
    base: &'a HttpClient,
}

impl MoviesClient<'_> {
    /// List movies matching `filter`.
    pub fn list(&self, filter: &MovieFilter) -> Result<Vec<Movie>> {
        let data = self
            .base
            .call("/api/movies", RequestOptions::query(filter.to_query()))?;
        decode(data)
    }

    /// Get a single movie by id.
    pub fn get(&self, id: i64) -> Result<Movie> {
        let data = self
            .base
            .call(&format!("/api/movies/{id}"), RequestOptions::default())?;
        decode(data)
    }

    /// Populate or reset the backend's demo catalog. Whatever the backend
    /// answers is discarded.
    pub fn seed(&self) -> Result<()> {
        self.base.call("/api/seed", RequestOptions::post(None))?;
        info!("catalog seeded");
        Ok(())
    }
}

// ---- Personal list --------------------------------------------------------

pub struct MyListClient<'a> {
    base: &'a HttpClient,
}

impl MyListClient<'_> {
    /// Save a movie to the list of the session identified by `token`.
    pub fn add(&self, token: &str, movie_id: i64) -> Result<()> {
        let body = encode(&AddToListRequest { token, movie_id })?;
        self.base
            .call("/api/list/add", RequestOptions::post(Some(body)))?;
        Ok(())
    }

    /// Fetch the full list of the session identified by `token`.
    pub fn get(&self, token: &str) -> Result<Vec<Movie>> {
        let query = vec![("token".to_string(), token.to_string())];
        let data = self.base.call("/api/list", RequestOptions::query(query))?;
        decode(data)
    }
}
