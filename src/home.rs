//! State behind the home screen and the sequence that keeps it in step
//! with the backend.
//!
//! Four slices are held: featured titles, the full catalog, one genre, and
//! the personal list. A load fetches the three catalog slices concurrently
//! and commits them only if all three succeed, then fetches the personal
//! list when a session exists (or clears it when none does). Writes never
//! patch local state; they are always followed by a full re-fetch.

use std::thread;

use tracing::{debug, info};

use crate::client::FlixClient;
use crate::error::{FlixApiError, Result};
use crate::models::{Movie, MovieFilter};
use crate::session::Session;

/// Genre shown in the second row.
pub const ROW_GENRE: &str = "Comedy";

/// Shown when a signed-out user tries to save a title.
pub const SIGN_IN_REQUIRED_NOTICE: &str = "Sign in to save to your list";

/// The three catalog slices fetched together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogSnapshot {
    pub featured: Vec<Movie>,
    pub all: Vec<Movie>,
    pub genre: Vec<Movie>,
}

/// Fetch featured, all and genre listings concurrently.
///
/// Every request is awaited before any result is looked at, and the first
/// failure (in that order) is returned with nothing else.
pub fn fetch_catalog(client: &FlixClient) -> Result<CatalogSnapshot> {
    thread::scope(|s| {
        let featured = s.spawn(|| client.movies().list(&MovieFilter::featured()));
        let all = s.spawn(|| client.movies().list(&MovieFilter::default()));
        let genre = s.spawn(|| client.movies().list(&MovieFilter::genre(ROW_GENRE)));

        let featured = settle(featured);
        let all = settle(all);
        let genre = settle(genre);

        Ok(CatalogSnapshot {
            featured: featured?,
            all: all?,
            genre: genre?,
        })
    })
}

fn settle<T>(handle: thread::ScopedJoinHandle<'_, Result<T>>) -> Result<T> {
    handle
        .join()
        .unwrap_or_else(|_| Err(FlixApiError::without_status("Catalog request panicked")))
}

/// Result of [`HomeState::add_to_list`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// Saved; the personal list was re-fetched.
    Added,
    /// Nothing was sent because nobody is signed in.
    SignInRequired,
}

/// A titled, horizontally scrolling row of movies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovieRow<'a> {
    pub title: &'static str,
    pub items: &'a [Movie],
    /// Whether titles in this row offer "+ My List".
    pub allows_add: bool,
}

#[derive(Debug, Default)]
pub struct HomeState {
    pub featured: Vec<Movie>,
    pub movies: Vec<Movie>,
    pub comedy: Vec<Movie>,
    pub my_list: Vec<Movie>,
    /// Movie shown in the "More info" panel.
    pub details: Option<Movie>,
    /// Token of the last issued load; `None` inside means signed out.
    loaded_for: Option<Option<String>>,
}

impl HomeState {
    pub fn new() -> Self {
        Self::default()
    }

    /// True before the first load and whenever the session token differs
    /// from the one the last load was issued for.
    pub fn needs_reload(&self, session: &Session) -> bool {
        match &self.loaded_for {
            None => true,
            Some(token) => token.as_deref() != session.token(),
        }
    }

    /// Run the full load sequence for `session`.
    pub fn load(&mut self, client: &FlixClient, session: &Session) -> Result<()> {
        self.loaded_for = Some(session.token().map(str::to_string));

        let catalog = fetch_catalog(client)?;
        debug!(
            featured = catalog.featured.len(),
            all = catalog.all.len(),
            genre = catalog.genre.len(),
            "catalog loaded"
        );
        self.featured = catalog.featured;
        self.movies = catalog.all;
        self.comedy = catalog.genre;

        match session.token() {
            Some(token) => self.my_list = client.my_list().get(token)?,
            None => self.my_list.clear(),
        }
        Ok(())
    }

    /// Save a title to the personal list, then replace the local list with
    /// the backend's.
    pub fn add_to_list(
        &mut self,
        client: &FlixClient,
        session: &Session,
        movie_id: i64,
    ) -> Result<AddOutcome> {
        let Some(token) = session.token() else {
            return Ok(AddOutcome::SignInRequired);
        };
        client.my_list().add(token, movie_id)?;
        self.my_list = client.my_list().get(token)?;
        info!(movie_id, size = self.my_list.len(), "added to personal list");
        Ok(AddOutcome::Added)
    }

    /// Seed the backend's demo catalog and reload everything.
    pub fn seed(&mut self, client: &FlixClient, session: &Session) -> Result<()> {
        client.movies().seed()?;
        self.load(client, session)
    }

    /// Fetch one movie for the details panel.
    pub fn show_details(&mut self, client: &FlixClient, movie_id: i64) -> Result<()> {
        self.details = Some(client.movies().get(movie_id)?);
        Ok(())
    }

    pub fn hide_details(&mut self) {
        self.details = None;
    }

    /// Title of the hero banner: the first featured movie.
    pub fn hero(&self) -> Option<&Movie> {
        self.featured.first()
    }

    /// Rows in display order. "My List" only appears for a signed-in user
    /// with at least one saved title.
    pub fn rows(&self, session: &Session) -> Vec<MovieRow<'_>> {
        let mut rows = vec![
            MovieRow {
                title: "Trending Now",
                items: &self.movies,
                allows_add: true,
            },
            MovieRow {
                title: "Comedies",
                items: &self.comedy,
                allows_add: true,
            },
        ];
        if session.is_signed_in() && !self.my_list.is_empty() {
            rows.push(MovieRow {
                title: "My List",
                items: &self.my_list,
                allows_add: false,
            });
        }
        rows
    }
}
