//! Single binary web server: JSON API over World Cup, Champions League and fixture wheel sessions.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT. Log filter via RUST_LOG.

use actix_web::{
    get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use football_tournament_sim::logic::{champions_league, finals, group_play};
use football_tournament_sim::models::{MoveDirection, Wheel};
use football_tournament_sim::{
    ChampionsLeagueSession, FixtureWheel, MatchId, SessionId, TeamId, TournamentConfig,
    WheelMode, WorldCupSession,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Session plus last activity time (for auto-cleanup).
struct Entry<T> {
    session: T,
    last_activity: Instant,
}

impl<T> Entry<T> {
    fn new(session: T) -> Self {
        Self {
            session,
            last_activity: Instant::now(),
        }
    }
}

type Sessions<T> = RwLock<HashMap<SessionId, Entry<T>>>;

/// In-memory state: sessions by id, one map per mode. Entries are removed after 12h inactivity.
#[derive(Default)]
struct Store {
    world_cup: Sessions<WorldCupSession>,
    champions_league: Sessions<ChampionsLeagueSession>,
    fixtures: Sessions<FixtureWheel>,
}

type AppState = Data<Store>;

/// Inactivity threshold: sessions not accessed for this long are removed.
const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(12 * 3600);

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateSessionBody {
    #[serde(default)]
    seed: Option<u64>,
}

#[derive(Deserialize)]
struct CreateWheelBody {
    #[serde(default)]
    mode: WheelMode,
}

#[derive(Deserialize)]
struct ScoreBody {
    score_a: u32,
    score_b: u32,
}

#[derive(Deserialize)]
struct NudgeBody {
    team_id: TeamId,
    delta: i32,
}

#[derive(Deserialize)]
struct MoveBody {
    index: usize,
    direction: MoveDirection,
}

#[derive(Deserialize)]
struct ThirdsOrderBody {
    order: Vec<TeamId>,
}

#[derive(Deserialize)]
struct WinnerBody {
    team_id: TeamId,
}

#[derive(Deserialize)]
struct SessionPath {
    id: SessionId,
}

#[derive(Deserialize)]
struct GroupPath {
    id: SessionId,
    group: String,
}

#[derive(Deserialize)]
struct GroupMatchPath {
    id: SessionId,
    group: String,
    match_id: MatchId,
}

#[derive(Deserialize)]
struct MatchPath {
    id: SessionId,
    match_id: MatchId,
}

#[derive(Deserialize)]
struct WheelPath {
    id: SessionId,
    wheel: Wheel,
}

fn bad_request(message: impl ToString) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({ "error": message.to_string() }))
}

/// Look up a session, refresh its activity time, and hand it to `f`.
fn with_session<T>(
    sessions: &Sessions<T>,
    id: SessionId,
    f: impl FnOnce(&mut T) -> HttpResponse,
) -> HttpResponse {
    let mut g = match sessions.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get_mut(&id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            f(&mut entry.session)
        }
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "No session" })),
    }
}

fn insert_session<T: Serialize>(sessions: &Sessions<T>, id: SessionId, session: T) -> HttpResponse {
    let mut g = match sessions.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let response = HttpResponse::Ok().json(&session);
    g.insert(id, Entry::new(session));
    response
}

/// Champions League state plus its derived phase.
fn cl_view(session: &ChampionsLeagueSession) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "phase": session.phase(),
        "session": session,
    }))
}

fn config_from(body: Option<Json<CreateSessionBody>>) -> TournamentConfig {
    TournamentConfig {
        seed: body.and_then(|b| b.seed),
        ..TournamentConfig::default()
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "football-tournament-sim",
    })
}

// World Cup

/// Create a World Cup session with the group draw in place (client stores the id).
#[post("/api/world-cup")]
async fn api_wc_create(state: AppState, body: Option<Json<CreateSessionBody>>) -> HttpResponse {
    match WorldCupSession::start(config_from(body)) {
        Ok(session) => insert_session(&state.world_cup, session.id, session),
        Err(e) => bad_request(e),
    }
}

#[get("/api/world-cup/{id}")]
async fn api_wc_get(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    with_session(&state.world_cup, path.id, |s| HttpResponse::Ok().json(s))
}

#[post("/api/world-cup/{id}/groups/simulate")]
async fn api_wc_simulate_all_groups(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    with_session(&state.world_cup, path.id, |s| {
        group_play::simulate_all_groups(s);
        HttpResponse::Ok().json(s)
    })
}

#[post("/api/world-cup/{id}/groups/{group}/simulate")]
async fn api_wc_simulate_group(state: AppState, path: Path<GroupPath>) -> HttpResponse {
    with_session(&state.world_cup, path.id, |s| {
        group_play::simulate_group(s, &path.group);
        HttpResponse::Ok().json(s)
    })
}

#[post("/api/world-cup/{id}/groups/{group}/matches/{match_id}/simulate")]
async fn api_wc_simulate_group_match(state: AppState, path: Path<GroupMatchPath>) -> HttpResponse {
    with_session(&state.world_cup, path.id, |s| {
        group_play::simulate_group_match(s, &path.group, path.match_id);
        HttpResponse::Ok().json(s)
    })
}

/// Enter a group match score by hand (only while the match is unplayed).
#[put("/api/world-cup/{id}/groups/{group}/matches/{match_id}")]
async fn api_wc_set_group_score(
    state: AppState,
    path: Path<GroupMatchPath>,
    body: Json<ScoreBody>,
) -> HttpResponse {
    let max = group_play::MAX_MANUAL_GOALS;
    if body.score_a > max || body.score_b > max {
        return bad_request(format!("scores must be between 0 and {max}"));
    }
    with_session(&state.world_cup, path.id, |s| {
        group_play::set_manual_match_result(s, &path.group, path.match_id, body.score_a, body.score_b);
        HttpResponse::Ok().json(s)
    })
}

#[post("/api/world-cup/{id}/groups/{group}/nudge")]
async fn api_wc_nudge(state: AppState, path: Path<GroupPath>, body: Json<NudgeBody>) -> HttpResponse {
    with_session(&state.world_cup, path.id, |s| {
        group_play::nudge_points(s, &path.group, &body.team_id, body.delta);
        HttpResponse::Ok().json(s)
    })
}

#[post("/api/world-cup/{id}/groups/{group}/move")]
async fn api_wc_move(state: AppState, path: Path<GroupPath>, body: Json<MoveBody>) -> HttpResponse {
    with_session(&state.world_cup, path.id, |s| {
        group_play::move_team(s, &path.group, body.index, body.direction);
        HttpResponse::Ok().json(s)
    })
}

#[get("/api/world-cup/{id}/thirds")]
async fn api_wc_thirds(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    with_session(&state.world_cup, path.id, |s| {
        HttpResponse::Ok().json(group_play::third_place_ranking(s))
    })
}

#[put("/api/world-cup/{id}/thirds")]
async fn api_wc_set_thirds(
    state: AppState,
    path: Path<SessionPath>,
    body: Json<ThirdsOrderBody>,
) -> HttpResponse {
    let order = body.into_inner().order;
    with_session(&state.world_cup, path.id, |s| {
        group_play::set_manual_thirds_order(s, order);
        HttpResponse::Ok().json(group_play::third_place_ranking(s))
    })
}

/// Build the round of 32 (Groups -> Knockout). Unchanged while groups are unfinished.
#[post("/api/world-cup/{id}/knockout")]
async fn api_wc_init_knockout(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    with_session(&state.world_cup, path.id, |s| {
        match finals::initialize_knockout(s).map(|_| ()) {
            Ok(()) => HttpResponse::Ok().json(&*s),
            Err(e) => bad_request(e),
        }
    })
}

#[post("/api/world-cup/{id}/knockout/simulate-round")]
async fn api_wc_simulate_round(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    with_session(&state.world_cup, path.id, |s| {
        finals::simulate_round(s);
        HttpResponse::Ok().json(s)
    })
}

#[post("/api/world-cup/{id}/knockout/{match_id}/simulate")]
async fn api_wc_simulate_knockout(state: AppState, path: Path<MatchPath>) -> HttpResponse {
    with_session(&state.world_cup, path.id, |s| {
        finals::simulate_knockout_match(s, path.match_id);
        HttpResponse::Ok().json(s)
    })
}

#[put("/api/world-cup/{id}/knockout/{match_id}/winner")]
async fn api_wc_set_winner(state: AppState, path: Path<MatchPath>, body: Json<WinnerBody>) -> HttpResponse {
    with_session(&state.world_cup, path.id, |s| {
        finals::set_manual_winner(s, path.match_id, &body.team_id);
        HttpResponse::Ok().json(s)
    })
}

#[post("/api/world-cup/{id}/knockout/{match_id}/reopen")]
async fn api_wc_reopen(state: AppState, path: Path<MatchPath>) -> HttpResponse {
    with_session(&state.world_cup, path.id, |s| {
        finals::reopen_knockout_match(s, path.match_id);
        HttpResponse::Ok().json(s)
    })
}

/// Redraw from scratch with the same id.
#[post("/api/world-cup/{id}/restart")]
async fn api_wc_restart(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    with_session(&state.world_cup, path.id, |s| {
        match football_tournament_sim::start_world_cup(s) {
            Ok(()) => HttpResponse::Ok().json(&*s),
            Err(e) => bad_request(e),
        }
    })
}

// Champions League

#[post("/api/champions-league")]
async fn api_cl_create(state: AppState, body: Option<Json<CreateSessionBody>>) -> HttpResponse {
    let session = match ChampionsLeagueSession::start(config_from(body)) {
        Ok(session) => session,
        Err(e) => return bad_request(e),
    };
    let id = session.id;
    let response = cl_view(&session);
    match state.champions_league.write() {
        Ok(mut g) => {
            g.insert(id, Entry::new(session));
            response
        }
        Err(_) => HttpResponse::InternalServerError().body("lock error"),
    }
}

#[get("/api/champions-league/{id}")]
async fn api_cl_get(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    with_session(&state.champions_league, path.id, |s| cl_view(s))
}

#[post("/api/champions-league/{id}/playoffs/simulate")]
async fn api_cl_simulate_playoffs(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    with_session(&state.champions_league, path.id, |s| {
        champions_league::simulate_all_playoffs(s);
        cl_view(s)
    })
}

#[post("/api/champions-league/{id}/playoffs/{match_id}/simulate")]
async fn api_cl_simulate_playoff(state: AppState, path: Path<MatchPath>) -> HttpResponse {
    with_session(&state.champions_league, path.id, |s| {
        champions_league::simulate_playoff(s, path.match_id);
        cl_view(s)
    })
}

#[put("/api/champions-league/{id}/playoffs/{match_id}/winner")]
async fn api_cl_set_playoff_winner(
    state: AppState,
    path: Path<MatchPath>,
    body: Json<WinnerBody>,
) -> HttpResponse {
    with_session(&state.champions_league, path.id, |s| {
        champions_league::set_playoff_winner(s, path.match_id, &body.team_id);
        cl_view(s)
    })
}

/// Left/right draw of the direct qualifiers; needs every playoff tie decided.
#[post("/api/champions-league/{id}/draw")]
async fn api_cl_draw(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    with_session(&state.champions_league, path.id, |s| {
        match champions_league::perform_draw(s) {
            Ok(_) => cl_view(s),
            Err(e) => bad_request(e),
        }
    })
}

#[post("/api/champions-league/{id}/knockout/simulate-round")]
async fn api_cl_simulate_round(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    with_session(&state.champions_league, path.id, |s| {
        champions_league::simulate_round(s);
        cl_view(s)
    })
}

#[post("/api/champions-league/{id}/knockout/{match_id}/simulate")]
async fn api_cl_simulate_knockout(state: AppState, path: Path<MatchPath>) -> HttpResponse {
    with_session(&state.champions_league, path.id, |s| {
        champions_league::simulate_knockout_match(s, path.match_id);
        cl_view(s)
    })
}

#[put("/api/champions-league/{id}/knockout/{match_id}/winner")]
async fn api_cl_set_winner(state: AppState, path: Path<MatchPath>, body: Json<WinnerBody>) -> HttpResponse {
    with_session(&state.champions_league, path.id, |s| {
        champions_league::set_manual_winner(s, path.match_id, &body.team_id);
        cl_view(s)
    })
}

#[post("/api/champions-league/{id}/knockout/{match_id}/reopen")]
async fn api_cl_reopen(state: AppState, path: Path<MatchPath>) -> HttpResponse {
    with_session(&state.champions_league, path.id, |s| {
        champions_league::reopen_knockout_match(s, path.match_id);
        cl_view(s)
    })
}

#[post("/api/champions-league/{id}/restart")]
async fn api_cl_restart(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    with_session(&state.champions_league, path.id, |s| {
        match football_tournament_sim::start_champions_league(s) {
            Ok(()) => cl_view(s),
            Err(e) => bad_request(e),
        }
    })
}

// Fixture wheel

#[post("/api/fixtures")]
async fn api_wheel_create(state: AppState, body: Option<Json<CreateWheelBody>>) -> HttpResponse {
    let mode = body.map(|b| b.mode).unwrap_or_default();
    insert_session(&state.fixtures, Uuid::new_v4(), FixtureWheel::new(mode))
}

#[get("/api/fixtures/{id}")]
async fn api_wheel_get(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    with_session(&state.fixtures, path.id, |w| HttpResponse::Ok().json(w))
}

#[post("/api/fixtures/{id}/spin/{wheel}")]
async fn api_wheel_spin(state: AppState, path: Path<WheelPath>) -> HttpResponse {
    with_session(&state.fixtures, path.id, |w| {
        let picked = w.spin(path.wheel, &mut rand::thread_rng());
        HttpResponse::Ok().json(serde_json::json!({ "picked": picked, "wheel": w }))
    })
}

#[post("/api/fixtures/{id}/complete")]
async fn api_wheel_complete(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    with_session(&state.fixtures, path.id, |w| {
        w.fast_complete(&mut rand::thread_rng());
        HttpResponse::Ok().json(w)
    })
}

#[post("/api/fixtures/{id}/reset")]
async fn api_wheel_reset(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    with_session(&state.fixtures, path.id, |w| {
        w.reset();
        HttpResponse::Ok().json(w)
    })
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn evict_inactive<T>(sessions: &Sessions<T>) -> usize {
    let mut g = match sessions.write() {
        Ok(guard) => guard,
        Err(_) => return 0,
    };
    let before = g.len();
    g.retain(|_, entry| entry.last_activity.elapsed() < INACTIVITY_TIMEOUT);
    before - g.len()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(Store::default());

    // Background task: every 30 minutes, remove sessions inactive for 12+ hours
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let removed = evict_inactive(&state_cleanup.world_cup)
                + evict_inactive(&state_cleanup.champions_league)
                + evict_inactive(&state_cleanup.fixtures);
            if removed > 0 {
                log::info!("Cleaned up {} inactive session(s) (no activity for 12h)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_wc_create)
            .service(api_wc_get)
            .service(api_wc_simulate_all_groups)
            .service(api_wc_simulate_group)
            .service(api_wc_simulate_group_match)
            .service(api_wc_set_group_score)
            .service(api_wc_nudge)
            .service(api_wc_move)
            .service(api_wc_thirds)
            .service(api_wc_set_thirds)
            .service(api_wc_init_knockout)
            .service(api_wc_simulate_round)
            .service(api_wc_simulate_knockout)
            .service(api_wc_set_winner)
            .service(api_wc_reopen)
            .service(api_wc_restart)
            .service(api_cl_create)
            .service(api_cl_get)
            .service(api_cl_simulate_playoffs)
            .service(api_cl_simulate_playoff)
            .service(api_cl_set_playoff_winner)
            .service(api_cl_draw)
            .service(api_cl_simulate_round)
            .service(api_cl_simulate_knockout)
            .service(api_cl_set_winner)
            .service(api_cl_reopen)
            .service(api_cl_restart)
            .service(api_wheel_create)
            .service(api_wheel_get)
            .service(api_wheel_spin)
            .service(api_wheel_complete)
            .service(api_wheel_reset)
    })
    .bind(bind)?
    .run()
    .await
}
