//! Single binary web server: JSON API over the in-memory participant directory.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT, DRAW_QUOTA, ROSTER_IDLE_SECS.

use actix_web::{
    get, post, put,
    web::{self, Data, Json, Path, Query},
    App, HttpResponse, HttpServer, Responder,
};
use event_raffle_web::{
    filter_participants, Collaborators, Config, EventView, InMemoryDirectory, Participant, RngSource, RosterCache,
    RosterState, SelectionError, SharedRosterCache,
};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};
use std::time::Duration;

/// Shared server state: one directory and one roster cache for all events.
struct AppState {
    config: Config,
    directory: Arc<InMemoryDirectory>,
    cache: SharedRosterCache,
}

impl AppState {
    /// A fresh view for one request, with the query already settled.
    fn view(&self, event: &str, query: Option<&str>) -> EventView {
        let mut view = EventView::new(
            event,
            self.config.quota,
            self.cache.clone(),
            Collaborators::from_store(self.directory.clone()),
        );
        if let Some(q) = query {
            view.set_query(q);
            view.settle_query();
        }
        view
    }
}

type State = Data<AppState>;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Serialize)]
struct RosterResponse<'a> {
    /// "loaded" or "failed"; a failed fetch is reported with an empty list.
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
    participants: Vec<Participant>,
}

impl<'a> RosterResponse<'a> {
    fn new(state: &'a RosterState, participants: Vec<Participant>) -> Self {
        match state {
            RosterState::Loaded(_) => Self {
                status: "loaded",
                error: None,
                participants,
            },
            RosterState::Failed { reason, .. } => Self {
                status: "failed",
                error: Some(reason.as_str()),
                participants,
            },
        }
    }
}

#[derive(Deserialize)]
struct SearchParams {
    #[serde(default)]
    q: Option<String>,
}

#[derive(Deserialize)]
struct AddParticipantBody {
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    github: String,
    #[serde(default)]
    wants_to_play: bool,
}

#[derive(Deserialize)]
struct WantsToPlayBody {
    checked: bool,
}

/// Path segment: event id (e.g. /api/events/{event})
#[derive(Deserialize)]
struct EventPath {
    event: String,
}

/// Path segments: event id and participant id
#[derive(Deserialize)]
struct EventParticipantPath {
    event: String,
    participant_id: String,
}

fn error_response(e: &SelectionError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        SelectionError::InsufficientCandidates { .. } | SelectionError::InvalidQuota => {
            HttpResponse::BadRequest().json(body)
        }
        SelectionError::ParticipantNotFound(_) | SelectionError::FetchFailure(_) => {
            HttpResponse::NotFound().json(body)
        }
        SelectionError::CommitFailure(_) => HttpResponse::BadGateway().json(body),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "event-raffle-web",
    })
}

/// Filtered roster for an event (?q= searches name, email and github).
#[get("/api/events/{event}/participants")]
async fn api_list_participants(state: State, path: Path<EventPath>, params: Query<SearchParams>) -> HttpResponse {
    let view = state.view(&path.event, params.q.as_deref());
    let roster = view.roster().await;
    let filtered = filter_participants(roster.participants(), view.query().deferred());
    HttpResponse::Ok().json(RosterResponse::new(&roster, filtered))
}

/// Add a participant to an event (creates the event on first add).
#[post("/api/events/{event}/participants")]
async fn api_add_participant(state: State, path: Path<EventPath>, body: Json<AddParticipantBody>) -> HttpResponse {
    let name = body.name.trim();
    if name.is_empty() {
        return HttpResponse::BadRequest().json(serde_json::json!({ "error": "Name is required" }));
    }
    let participant = Participant::new(name, body.email.trim(), body.github.trim()).wanting_to_play(body.wants_to_play);
    match state.directory.add_participant(&path.event, participant) {
        Ok(p) => {
            state.view(&path.event, None).invalidate();
            HttpResponse::Ok().json(p)
        }
        Err(e) => error_response(&e),
    }
}

/// Set a participant's wants-to-play flag. The cached roster is invalidated on success,
/// so the next listing or draw re-fetches it.
#[put("/api/events/{event}/participants/{participant_id}/wants-to-play")]
async fn api_set_wants_to_play(
    state: State,
    path: Path<EventParticipantPath>,
    body: Json<WantsToPlayBody>,
) -> HttpResponse {
    let view = state.view(&path.event, None);
    match view.set_wants_to_play(&path.participant_id, body.checked).await {
        Ok(()) => {
            view.invalidate();
            HttpResponse::NoContent().finish()
        }
        Err(e) => error_response(&e),
    }
}

/// Draw the configured quota from the filtered roster (?q= as for listing) and commit it.
#[post("/api/events/{event}/draw")]
async fn api_draw(state: State, path: Path<EventPath>, params: Query<SearchParams>) -> HttpResponse {
    let mut view = state.view(&path.event, params.q.as_deref());
    let mut rng = RngSource::thread();
    match view.generate_groups(&mut rng).await {
        Ok(outcome) => HttpResponse::Ok().json(outcome),
        Err(e) => error_response(&e),
    }
}

fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(api_health)
        .service(api_list_participants)
        .service(api_add_participant)
        .service(api_set_wants_to_play)
        .service(api_draw);
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env();
    let bind = (config.host.clone(), config.port);
    log::info!("Starting server at http://{}:{} (draw quota {})", bind.0, bind.1, config.quota);

    let idle = config.roster_idle();
    let state = Data::new(AppState {
        config,
        directory: Arc::new(InMemoryDirectory::new()),
        cache: Arc::new(RwLock::new(RosterCache::new())),
    });

    // Background task: every 30 minutes, drop cached rosters nobody has refreshed recently
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.cache.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let removed = g.evict_idle(idle);
            if removed > 0 {
                log::info!("Evicted {} idle roster(s)", removed);
            }
        }
    });

    HttpServer::new(move || App::new().app_data(state.clone()).configure(routes))
    .bind(bind)?
    .run()
    .await
}
