//! In-process fake of the Flix backend.
//!
//! Serves the same routes as the real service from memory, on a random
//! local port, and records every request it receives so tests can assert
//! which calls were (or were not) made.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    extract::{Path, Query, Request, State},
    http::{HeaderMap, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

/// One request as seen by the fake backend.
#[derive(Debug, Clone, PartialEq)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
}

impl Recorded {
    pub fn is(&self, method: &str, path: &str) -> bool {
        self.method == method && self.path == path
    }
}

struct StoredUser {
    id: i64,
    name: String,
    email: String,
    password: String,
}

#[derive(Default)]
struct Inner {
    movies: Vec<Value>,
    users: Vec<StoredUser>,
    lists: HashMap<i64, Vec<i64>>,
    failing_genre: Option<String>,
    log: Vec<Recorded>,
}

/// Handle to a running fake backend.
#[derive(Clone)]
pub struct Backend {
    inner: Arc<Mutex<Inner>>,
    pub base_url: String,
}

pub fn movie(id: i64, title: &str, genre: &str, featured: bool) -> Value {
    json!({
        "id": id,
        "title": title,
        "description": format!("{title} description"),
        "thumbnail_url": format!("https://img.example.com/{id}.jpg"),
        "genre": genre,
        "featured": featured,
    })
}

/// Catalog installed by `POST /api/seed`.
pub fn seed_catalog() -> Vec<Value> {
    vec![
        movie(1, "Night Shift", "Drama", true),
        movie(2, "Laugh Track", "Comedy", false),
        movie(3, "Deep Orbit", "Sci-Fi", true),
        movie(4, "Office Hours", "Comedy", false),
        movie(5, "Heat Wave", "Action", false),
        movie(6, "Best Man Down", "Comedy", true),
    ]
}

impl Backend {
    /// Start a backend with the seed catalog already loaded.
    pub fn start() -> Self {
        let backend = Self::start_empty();
        backend.set_catalog(seed_catalog());
        backend
    }

    /// Start a backend with no movies; only the demo user exists.
    pub fn start_empty() -> Self {
        let inner = Arc::new(Mutex::new(Inner {
            users: vec![StoredUser {
                id: 1,
                name: "Demo".into(),
                email: "demo@flix.com".into(),
                password: "demo".into(),
            }],
            ..Default::default()
        }));

        let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = std_listener.local_addr().unwrap();
        std_listener.set_nonblocking(true).unwrap();

        let backend = Backend {
            inner,
            base_url: format!("http://{addr}"),
        };
        let app = backend.router();

        std::thread::spawn(move || {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            rt.block_on(async {
                let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
                axum::serve(listener, app).await
            })
            .unwrap();
        });

        backend
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap()
    }

    pub fn set_catalog(&self, movies: Vec<Value>) {
        self.lock().movies = movies;
    }

    /// Make `GET /api/movies?genre=<genre>` answer 500.
    pub fn fail_genre(&self, genre: &str) {
        self.lock().failing_genre = Some(genre.to_string());
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.lock().log.clone()
    }

    pub fn clear_requests(&self) {
        self.lock().log.clear();
    }

    /// Movie ids saved for `user_id`, in insertion order.
    pub fn saved(&self, user_id: i64) -> Vec<i64> {
        self.lock().lists.get(&user_id).cloned().unwrap_or_default()
    }

    fn router(&self) -> Router {
        Router::new()
            .route("/api/auth/register", post(register))
            .route("/api/auth/login", post(login))
            .route("/api/movies", get(list_movies))
            .route("/api/movies/{id}", get(get_movie))
            .route("/api/seed", post(seed))
            .route("/api/list/add", post(add_to_list))
            .route("/api/list", get(get_list))
            .route("/test/status/{code}", get(status_with_body))
            .route("/test/headers", get(echo_headers))
            .layer(middleware::from_fn_with_state(self.clone(), record))
            .with_state(self.clone())
    }
}

async fn record(State(backend): State<Backend>, req: Request, next: Next) -> Response {
    backend.lock().log.push(Recorded {
        method: req.method().to_string(),
        path: req.uri().path().to_string(),
        query: req.uri().query().map(str::to_string),
    });
    next.run(req).await
}

fn detail(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "detail": message }))).into_response()
}

fn auth_body(user: &StoredUser) -> Value {
    json!({
        "token": format!("t{}", user.id),
        "user": { "id": user.id, "name": user.name, "email": user.email },
    })
}

fn user_for_token(inner: &Inner, token: &str) -> Option<i64> {
    let id: i64 = token.strip_prefix('t')?.parse().ok()?;
    inner.users.iter().any(|u| u.id == id).then_some(id)
}

#[derive(Deserialize)]
struct RegisterBody {
    name: String,
    email: String,
    password: String,
}

async fn register(State(backend): State<Backend>, Json(body): Json<RegisterBody>) -> Response {
    let mut inner = backend.lock();
    if inner.users.iter().any(|u| u.email == body.email) {
        return detail(StatusCode::BAD_REQUEST, "email taken");
    }
    let user = StoredUser {
        id: inner.users.len() as i64 + 1,
        name: body.name,
        email: body.email,
        password: body.password,
    };
    let response = auth_body(&user);
    inner.users.push(user);
    Json(response).into_response()
}

#[derive(Deserialize)]
struct LoginBody {
    email: String,
    password: String,
}

async fn login(State(backend): State<Backend>, Json(body): Json<LoginBody>) -> Response {
    let inner = backend.lock();
    match inner
        .users
        .iter()
        .find(|u| u.email == body.email && u.password == body.password)
    {
        Some(user) => Json(auth_body(user)).into_response(),
        None => detail(StatusCode::UNAUTHORIZED, "Invalid credentials"),
    }
}

async fn list_movies(
    State(backend): State<Backend>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let inner = backend.lock();
    let genre = params.get("genre");
    if genre.is_some() && genre == inner.failing_genre.as_ref() {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    let featured = params.get("featured").map(|f| f == "true");
    let movies: Vec<Value> = inner
        .movies
        .iter()
        .filter(|m| featured.map_or(true, |f| m["featured"] == f))
        .filter(|m| genre.map_or(true, |g| m["genre"] == g.as_str()))
        .cloned()
        .collect();
    Json(movies).into_response()
}

async fn get_movie(State(backend): State<Backend>, Path(id): Path<i64>) -> Response {
    let inner = backend.lock();
    match inner.movies.iter().find(|m| m["id"] == id) {
        Some(m) => Json(m.clone()).into_response(),
        None => detail(StatusCode::NOT_FOUND, "Movie not found"),
    }
}

async fn seed(State(backend): State<Backend>) -> StatusCode {
    backend.lock().movies = seed_catalog();
    StatusCode::OK
}

#[derive(Deserialize)]
struct AddBody {
    token: String,
    movie_id: i64,
}

async fn add_to_list(State(backend): State<Backend>, Json(body): Json<AddBody>) -> Response {
    let mut inner = backend.lock();
    let Some(user_id) = user_for_token(&inner, &body.token) else {
        return detail(StatusCode::UNAUTHORIZED, "Invalid token");
    };
    let list = inner.lists.entry(user_id).or_default();
    if !list.contains(&body.movie_id) {
        list.push(body.movie_id);
    }
    Json(json!({ "ok": true })).into_response()
}

async fn get_list(
    State(backend): State<Backend>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let inner = backend.lock();
    let token = params.get("token").map(String::as_str).unwrap_or_default();
    let Some(user_id) = user_for_token(&inner, token) else {
        return detail(StatusCode::UNAUTHORIZED, "Invalid token");
    };
    let ids = inner.lists.get(&user_id).cloned().unwrap_or_default();
    let movies: Vec<Value> = ids
        .iter()
        .filter_map(|id| inner.movies.iter().find(|m| m["id"] == *id).cloned())
        .collect();
    Json(movies).into_response()
}

/// Answer with the given status and the raw `body` query parameter.
async fn status_with_body(
    Path(code): Path<u16>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let status = StatusCode::from_u16(code).unwrap();
    let body = params.get("body").cloned().unwrap_or_default();
    (status, body).into_response()
}

async fn echo_headers(headers: HeaderMap) -> Json<Value> {
    let map: serde_json::Map<String, Value> = headers
        .iter()
        .map(|(k, v)| (k.to_string(), json!(v.to_str().unwrap_or_default())))
        .collect();
    Json(Value::Object(map))
}
