//! In-process fake of the persons service
//!
//! Serves `/rs/persons` on an ephemeral port with the same plain-text row
//! format as the real service. `Mode` switches in specific misbehaviours so
//! the scenarios can be shown to catch them.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Form, Router};
use parking_lot::Mutex;
use serde::Deserialize;
use tokio::task::JoinHandle;

use persons_e2e::parser::render_records;
use persons_e2e::{Person, ServiceConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Healthy,
    /// Every request answers 500
    Failing,
    /// PUT answers 200 but keeps the old names
    IgnoresUpdates,
    /// DELETE answers 200 but keeps the row
    IgnoresDeletes,
    /// POST stores the row but echoes nothing
    SilentCreate,
    /// POST echoes the row but never stores it
    EchoOnlyCreate,
    /// POST stores and echoes but answers 201 instead of 200
    CreatedStatus,
    /// GET /persons always answers an empty list
    EmptyList,
    /// GET /persons/{id} answers the row with its names swapped
    WrongRowById,
}

#[derive(Default)]
struct Store {
    next_id: u64,
    rows: Vec<Person>,
}

impl Store {
    fn insert(&mut self, first_name: String, last_name: String) -> Person {
        self.next_id += 1;
        let person = Person::new(first_name, last_name).with_id(self.next_id);
        self.rows.push(person.clone());
        person
    }

    fn position(&self, id: u64) -> Option<usize> {
        self.rows.iter().position(|p| p.id == Some(id))
    }
}

struct AppState {
    mode: Mode,
    store: Mutex<Store>,
}

type Shared = Arc<AppState>;

#[derive(Deserialize)]
struct PersonForm {
    #[serde(rename = "firstName")]
    first_name: String,
    #[serde(rename = "lastName")]
    last_name: String,
}

pub struct FakeService {
    pub config: ServiceConfig,
    state: Shared,
    handle: JoinHandle<()>,
}

impl FakeService {
    pub async fn spawn(mode: Mode) -> Self {
        Self::spawn_with_rows(mode, &[]).await
    }

    /// Start with rows already present, as a shared live service would be
    pub async fn spawn_with_rows(mode: Mode, rows: &[(&str, &str)]) -> Self {
        let mut store = Store::default();
        for (first, last) in rows {
            store.insert(first.to_string(), last.to_string());
        }
        let state = Arc::new(AppState {
            mode,
            store: Mutex::new(store),
        });

        let persons = Router::new()
            .route("/persons", get(list_handler).post(create_handler))
            .route(
                "/persons/:id",
                get(get_handler).put(update_handler).delete(delete_handler),
            )
            .with_state(state.clone());
        let app = Router::new().nest("/rs", persons);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake service");
        let port = listener.local_addr().expect("fake service addr").port();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("fake service");
        });

        let config = ServiceConfig {
            request_timeout: Duration::from_secs(5),
            ready_timeout: Duration::from_secs(5),
            ..ServiceConfig::new("http://127.0.0.1", port)
        };

        Self { config, state, handle }
    }

    pub fn rows(&self) -> Vec<Person> {
        self.state.store.lock().rows.clone()
    }
}

impl Drop for FakeService {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn failing() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "database unavailable").into_response()
}

async fn list_handler(State(state): State<Shared>) -> Response {
    if state.mode == Mode::Failing {
        return failing();
    }
    if state.mode == Mode::EmptyList {
        return render_records(&[]).into_response();
    }
    render_records(&state.store.lock().rows).into_response()
}

async fn create_handler(State(state): State<Shared>, Form(form): Form<PersonForm>) -> Response {
    if state.mode == Mode::Failing {
        return failing();
    }
    if state.mode == Mode::EchoOnlyCreate {
        let next_id = state.store.lock().next_id + 1;
        let echoed = Person::new(form.first_name, form.last_name).with_id(next_id);
        return render_records(&[echoed]).into_response();
    }
    let created = state.store.lock().insert(form.first_name, form.last_name);
    match state.mode {
        Mode::SilentCreate => "[]".into_response(),
        Mode::CreatedStatus => (StatusCode::CREATED, render_records(&[created])).into_response(),
        _ => render_records(&[created]).into_response(),
    }
}

async fn get_handler(State(state): State<Shared>, Path(id): Path<u64>) -> Response {
    if state.mode == Mode::Failing {
        return failing();
    }
    let store = state.store.lock();
    match store.position(id) {
        Some(idx) if state.mode == Mode::WrongRowById => {
            let row = &store.rows[idx];
            let swapped = Person::new(row.last_name.clone(), row.first_name.clone()).with_id(id);
            render_records(&[swapped]).into_response()
        }
        Some(idx) => render_records(&store.rows[idx..=idx]).into_response(),
        None => (StatusCode::NOT_FOUND, "[]").into_response(),
    }
}

async fn update_handler(
    State(state): State<Shared>,
    Path(id): Path<u64>,
    Form(form): Form<PersonForm>,
) -> Response {
    if state.mode == Mode::Failing {
        return failing();
    }
    let mut store = state.store.lock();
    let Some(idx) = store.position(id) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    if state.mode != Mode::IgnoresUpdates {
        store.rows[idx] = Person::new(form.first_name, form.last_name).with_id(id);
    }
    StatusCode::OK.into_response()
}

async fn delete_handler(State(state): State<Shared>, Path(id): Path<u64>) -> Response {
    if state.mode == Mode::Failing {
        return failing();
    }
    let mut store = state.store.lock();
    let Some(idx) = store.position(id) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    if state.mode != Mode::IgnoresDeletes {
        store.rows.remove(idx);
    }
    StatusCode::OK.into_response()
}

/// A port nothing is listening on
pub fn find_free_port() -> u16 {
    std::net::TcpListener::bind("127.0.0.1:0")
        .expect("Failed to bind to find free port")
        .local_addr()
        .expect("Failed to get local addr")
        .port()
}
