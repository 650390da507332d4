use serde::{Deserialize, Deserializer, Serialize};

/// Accept `null` wherever a display field has a sensible empty value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ---------------------------------------------------------------------------
// Movies
// ---------------------------------------------------------------------------

/// A catalog entry. The backend dictates the shape; the client only
/// displays it.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub thumbnail_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub genre: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub featured: bool,
}

/// Filters accepted by `GET /api/movies`.
///
/// Only the fields that are set are sent; an empty filter sends no query
/// string at all.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovieFilter {
    pub featured: Option<bool>,
    pub genre: Option<String>,
}

impl MovieFilter {
    pub fn featured() -> Self {
        Self {
            featured: Some(true),
            ..Default::default()
        }
    }

    pub fn genre(genre: impl Into<String>) -> Self {
        Self {
            genre: Some(genre.into()),
            ..Default::default()
        }
    }

    pub(crate) fn to_query(&self) -> Vec<(String, String)> {
        let mut query: Vec<(String, String)> = Vec::new();
        if let Some(featured) = self.featured {
            query.push(("featured".into(), featured.to_string()));
        }
        if let Some(ref genre) = self.genre {
            query.push(("genre".into(), genre.clone()));
        }
        query
    }
}

// ---------------------------------------------------------------------------
// Users & auth
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
}

/// Successful answer of both `register` and `login`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub(crate) struct RegisterRequest<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct AddToListRequest<'a> {
    pub token: &'a str,
    pub movie_id: i64,
}
