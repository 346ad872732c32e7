//! Single binary web server: HTML from templates/, static from /static, API via REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default so the app is reachable via DNS on a VPS.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080).

use actix_files::Files;
use actix_web::{
    delete, get, post, put,
    web::{self, Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use cricket_tournament_web::{
    commit_result, compute_standings, generate_schedule, regenerate_schedule, unlock_match,
    MatchResult, PenaltyId, PointsConfig, ScheduleConfig, Stadium, StadiumId, Team, TeamId,
    Tournament, TournamentError, TournamentId,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Per-tournament entry: tournament data + last activity time (for auto-cleanup).
struct TournamentEntry {
    tournament: Tournament,
    last_activity: Instant,
}

/// In-memory state: many tournaments by ID. Entries are removed after long inactivity.
type AppState = Data<RwLock<HashMap<TournamentId, TournamentEntry>>>;

/// Inactivity threshold: tournaments not accessed for this long are removed.
const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(12 * 3600);

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    #[serde(default = "default_tournament_name")]
    name: String,
}

fn default_tournament_name() -> String {
    "New Tournament".to_string()
}

#[derive(Deserialize)]
struct AddTeamBody {
    name: String,
    #[serde(default)]
    short_code: String,
    #[serde(default)]
    owner: String,
    #[serde(default)]
    logo_ref: Option<String>,
}

#[derive(Deserialize)]
struct UpdateTeamBody {
    name: Option<String>,
    short_code: Option<String>,
    owner: Option<String>,
    logo_ref: Option<String>,
}

#[derive(Deserialize)]
struct AddStadiumBody {
    name: String,
}

#[derive(Deserialize)]
struct CommitResultBody {
    result: MatchResult,
    #[serde(default)]
    winner_id: Option<TeamId>,
    #[serde(default)]
    notes: Option<String>,
}

#[derive(Deserialize)]
struct AddPenaltyBody {
    team_id: TeamId,
    points: u32,
    #[serde(default)]
    reason: String,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

/// Path segments: tournament id plus one child entity id.
#[derive(Deserialize)]
struct TournamentTeamPath {
    id: TournamentId,
    team_id: TeamId,
}

#[derive(Deserialize)]
struct TournamentStadiumPath {
    id: TournamentId,
    stadium_id: StadiumId,
}

#[derive(Deserialize)]
struct TournamentMatchPath {
    id: TournamentId,
    match_id: Uuid,
}

#[derive(Deserialize)]
struct TournamentPenaltyPath {
    id: TournamentId,
    penalty_id: PenaltyId,
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" }))
}

/// Run `f` against the tournament under the registry write lock, refresh its
/// last-activity stamp, and answer with the updated tournament (or a 400
/// carrying the error message).
fn with_tournament<F>(state: &AppState, id: TournamentId, f: F) -> HttpResponse
where
    F: FnOnce(&mut Tournament) -> Result<(), TournamentError>,
{
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&id) {
        Some(e) => e,
        None => return not_found(),
    };
    entry.last_activity = Instant::now();
    match f(&mut entry.tournament) {
        Ok(()) => HttpResponse::Ok().json(&entry.tournament),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "cricket-tournament-web",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Create a new tournament (returns it with id; client stores id for subsequent requests).
#[post("/api/tournaments")]
async fn api_create_tournament(
    state: AppState,
    body: Option<Json<CreateTournamentBody>>,
) -> HttpResponse {
    let name = body
        .map(|b| b.into_inner().name)
        .unwrap_or_else(default_tournament_name);
    let tournament = Tournament::new(name);
    let id = tournament.id;
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    g.insert(
        id,
        TournamentEntry {
            tournament,
            last_activity: Instant::now(),
        },
    );
    HttpResponse::Ok().json(&g.get(&id).unwrap().tournament)
}

/// Get a tournament by id (404 if not found). Touching it refreshes last_activity.
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |_| Ok(()))
}

/// Add a team to the roster.
#[post("/api/tournaments/{id}/teams")]
async fn api_add_team(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<AddTeamBody>,
) -> HttpResponse {
    let body = body.into_inner();
    with_tournament(&state, path.id, move |t| {
        let mut team = Team::new(body.name.trim(), body.short_code.trim());
        team.owner = body.owner;
        team.logo_ref = body.logo_ref;
        t.add_team(team).map(|_| ())
    })
}

/// Edit team display fields (name/short code/owner/logo).
#[put("/api/tournaments/{id}/teams/{team_id}")]
async fn api_update_team(
    state: AppState,
    path: Path<TournamentTeamPath>,
    body: Json<UpdateTeamBody>,
) -> HttpResponse {
    let body = body.into_inner();
    with_tournament(&state, path.id, move |t| {
        t.update_team(
            path.team_id,
            body.name,
            body.short_code,
            body.owner,
            body.logo_ref,
        )
    })
}

/// Remove a team (tournament must be in Setup).
#[delete("/api/tournaments/{id}/teams/{team_id}")]
async fn api_remove_team(state: AppState, path: Path<TournamentTeamPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| t.remove_team(path.team_id))
}

/// Add a stadium.
#[post("/api/tournaments/{id}/stadiums")]
async fn api_add_stadium(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<AddStadiumBody>,
) -> HttpResponse {
    let body = body.into_inner();
    with_tournament(&state, path.id, move |t| {
        t.add_stadium(Stadium::new(body.name.trim()));
        Ok(())
    })
}

/// Remove a stadium (tournament must be in Setup).
#[delete("/api/tournaments/{id}/stadiums/{stadium_id}")]
async fn api_remove_stadium(state: AppState, path: Path<TournamentStadiumPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| t.remove_stadium(path.stadium_id))
}

/// Replace the points formula (tournament must be in Setup).
#[put("/api/tournaments/{id}/points")]
async fn api_set_points(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<PointsConfig>,
) -> HttpResponse {
    let points = body.into_inner();
    with_tournament(&state, path.id, move |t| t.set_points_config(points))
}

/// Replace the scheduling config (tournament must be in Setup).
#[put("/api/tournaments/{id}/schedule")]
async fn api_set_schedule_config(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<ScheduleConfig>,
) -> HttpResponse {
    let schedule = body.into_inner();
    with_tournament(&state, path.id, move |t| t.set_schedule_config(schedule))
}

/// Generate the season schedule (refused once matches exist).
#[post("/api/tournaments/{id}/schedule/generate")]
async fn api_generate_schedule(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, generate_schedule)
}

/// Clear all matches/series and generate a fresh schedule.
#[post("/api/tournaments/{id}/schedule/regenerate")]
async fn api_regenerate_schedule(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, regenerate_schedule)
}

/// Commit a result for one match.
#[put("/api/tournaments/{id}/matches/{match_id}/result")]
async fn api_commit_result(
    state: AppState,
    path: Path<TournamentMatchPath>,
    body: Json<CommitResultBody>,
) -> HttpResponse {
    let body = body.into_inner();
    with_tournament(&state, path.id, move |t| {
        commit_result(t, path.match_id, body.result, body.winner_id, body.notes)
    })
}

/// Revert a completed match to not-started and clear its result.
#[post("/api/tournaments/{id}/matches/{match_id}/unlock")]
async fn api_unlock_match(state: AppState, path: Path<TournamentMatchPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| unlock_match(t, path.match_id))
}

/// Record a penalty against a team.
#[post("/api/tournaments/{id}/penalties")]
async fn api_add_penalty(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<AddPenaltyBody>,
) -> HttpResponse {
    let body = body.into_inner();
    with_tournament(&state, path.id, move |t| {
        t.add_penalty(body.team_id, body.points, body.reason).map(|_| ())
    })
}

/// Remove a penalty record by id.
#[delete("/api/tournaments/{id}/penalties/{penalty_id}")]
async fn api_remove_penalty(state: AppState, path: Path<TournamentPenaltyPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| t.remove_penalty(path.penalty_id))
}

/// Current standings table, recomputed from scratch on every call.
#[get("/api/tournaments/{id}/standings")]
async fn api_standings(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get_mut(&path.id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            let standings = compute_standings(&entry.tournament);
            HttpResponse::Ok().json(standings)
        }
        None => not_found(),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
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

    let state = Data::new(RwLock::new(HashMap::<TournamentId, TournamentEntry>::new()));

    // Background task: every 30 minutes, remove tournaments inactive for 12+ hours
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < INACTIVITY_TIMEOUT);
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Cleaned up {} inactive tournament(s) (no activity for 12h)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .route("/", web::get().to(serve_index_async))
            .service(api_health)
            .service(favicon)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_add_team)
            .service(api_update_team)
            .service(api_remove_team)
            .service(api_add_stadium)
            .service(api_remove_stadium)
            .service(api_set_points)
            .service(api_set_schedule_config)
            .service(api_generate_schedule)
            .service(api_regenerate_schedule)
            .service(api_commit_result)
            .service(api_unlock_match)
            .service(api_add_penalty)
            .service(api_remove_penalty)
            .service(api_standings)
            .service(Files::new("/static", "static").show_files_listing())
    })
    .bind(bind)?
    .run()
    .await
}

async fn serve_index_async() -> HttpResponse {
    let html = include_str!("../../templates/index.html");
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html)
}
