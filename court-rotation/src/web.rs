use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use actix_files::Files;
use actix_web::{middleware, web, App, HttpRequest, HttpResponse, HttpServer, Result};
use log::{error, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::error::RosterError;
use crate::export::{to_document, to_table};
use crate::roster::{Roster, RosterStore};
use crate::schedule::{LeftoverPolicy, MatchType, Round, SchedulerState};
use crate::scores::{ScoreBoard, ScoreStore, ScoreSubmission, Standing};
use crate::timer::{format_remaining, MatchFormat, MatchTimer};

/// One match night shared by every request
pub struct AppState {
    pub session: Mutex<SchedulerState>,
    pub roster: Mutex<Roster>,
    pub scores: Mutex<ScoreBoard>,
    pub timer: Mutex<Option<MatchTimer>>,
    pub roster_store: RosterStore,
    pub score_store: ScoreStore,
    pub admin_password: String,
}

impl AppState {
    pub fn new(roster: Roster, all_time: BTreeMap<String, u32>, roster_store: RosterStore, score_store: ScoreStore, admin_password: String) -> Self {
        Self {
            session: Mutex::new(SchedulerState::new()),
            roster: Mutex::new(roster),
            scores: Mutex::new(ScoreBoard::with_all_time(all_time)),
            timer: Mutex::new(None),
            roster_store,
            score_store,
            admin_password,
        }
    }
}

#[derive(Deserialize)]
pub struct NameRequest {
    name: String,
}

#[derive(Deserialize)]
pub struct RenameRequest {
    from: String,
    to: String,
}

#[derive(Deserialize)]
pub struct MoveRequest {
    from: usize,
    to: usize,
}

#[derive(Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    match_type: MatchType,
    #[serde(default)]
    leftover: LeftoverPolicy,
}

#[derive(Serialize)]
pub struct RoundView {
    current: usize,
    total: usize,
    has_previous: bool,
    has_next: bool,
    round: Option<Round>,
}

#[derive(Serialize)]
pub struct HistoryResponse {
    players: Vec<String>,
    matrix: Vec<Vec<Option<u32>>>,
}

#[derive(Serialize)]
pub struct ScoresResponse {
    tonight: Vec<Standing>,
    all_time: Vec<Standing>,
}

#[derive(Serialize)]
pub struct TimerResponse {
    running: bool,
    remaining_seconds: u64,
    display: String,
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>> {
    mutex
        .lock()
        .map_err(|_| actix_web::error::ErrorInternalServerError("state lock poisoned"))
}

fn unauthorized() -> HttpResponse {
    HttpResponse::Unauthorized().json(serde_json::json!({"success": false, "error": "Unauthorized"}))
}

fn failure(message: impl ToString) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({"success": false, "error": message.to_string()}))
}

fn is_admin(req: &HttpRequest, state: &AppState) -> bool {
    let password = req
        .headers()
        .get("X-Admin-Password")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    password == state.admin_password
}

fn round_view(session: &SchedulerState) -> RoundView {
    RoundView {
        current: session.current_number(),
        total: session.rounds().len(),
        has_previous: session.has_previous(),
        has_next: session.has_next(),
        round: session.current_round().cloned(),
    }
}

// Applies a roster edit, persists it and returns the new roster
fn edit_roster<F>(req: &HttpRequest, state: &AppState, edit: F) -> Result<HttpResponse>
where
    F: FnOnce(&mut Roster) -> std::result::Result<(), RosterError>,
{
    if !is_admin(req, state) {
        return Ok(unauthorized());
    }
    let mut roster = lock(&state.roster)?;
    if let Err(e) = edit(&mut roster) {
        warn!("Roster edit rejected: {}", e);
        return Ok(failure(e));
    }
    if let Err(e) = state.roster_store.save(&roster) {
        error!("Failed to save roster: {}", e);
        return Err(actix_web::error::ErrorInternalServerError(format!("Failed to save roster: {}", e)));
    }
    Ok(HttpResponse::Ok().json(&*roster))
}

async fn get_roster(state: web::Data<AppState>) -> Result<HttpResponse> {
    let roster = lock(&state.roster)?;
    Ok(HttpResponse::Ok().json(&*roster))
}

async fn add_player(req: HttpRequest, body: web::Json<NameRequest>, state: web::Data<AppState>) -> Result<HttpResponse> {
    edit_roster(&req, &state, |r| r.add_player(&body.name))
}

async fn remove_player(req: HttpRequest, name: web::Path<String>, state: web::Data<AppState>) -> Result<HttpResponse> {
    edit_roster(&req, &state, |r| r.remove_player(&name))
}

async fn rename_player(req: HttpRequest, body: web::Json<RenameRequest>, state: web::Data<AppState>) -> Result<HttpResponse> {
    edit_roster(&req, &state, |r| r.rename_player(&body.from, &body.to))
}

async fn move_player(req: HttpRequest, body: web::Json<MoveRequest>, state: web::Data<AppState>) -> Result<HttpResponse> {
    edit_roster(&req, &state, |r| r.move_player(body.from, body.to))
}

async fn add_court(req: HttpRequest, body: web::Json<NameRequest>, state: web::Data<AppState>) -> Result<HttpResponse> {
    edit_roster(&req, &state, |r| r.add_court(&body.name))
}

async fn remove_court(req: HttpRequest, name: web::Path<String>, state: web::Data<AppState>) -> Result<HttpResponse> {
    edit_roster(&req, &state, |r| r.remove_court(&name))
}

async fn move_court(req: HttpRequest, body: web::Json<MoveRequest>, state: web::Data<AppState>) -> Result<HttpResponse> {
    edit_roster(&req, &state, |r| r.move_court(body.from, body.to))
}

async fn generate_round(body: web::Json<GenerateRequest>, state: web::Data<AppState>) -> Result<HttpResponse> {
    let roster = lock(&state.roster)?.clone();
    let mut session = lock(&state.session)?;
    let mut rng = StdRng::from_entropy();
    match session.generate_round(&roster.players, &roster.courts, body.match_type, body.leftover, &mut rng) {
        Ok(report) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "round": report.round,
            "shortfall": report.shortfall,
        }))),
        Err(e) => Ok(failure(e)),
    }
}

async fn current_round(state: web::Data<AppState>) -> Result<HttpResponse> {
    let session = lock(&state.session)?;
    Ok(HttpResponse::Ok().json(round_view(&session)))
}

async fn previous_round(state: web::Data<AppState>) -> Result<HttpResponse> {
    let mut session = lock(&state.session)?;
    session.previous();
    Ok(HttpResponse::Ok().json(round_view(&session)))
}

async fn next_round(state: web::Data<AppState>) -> Result<HttpResponse> {
    let mut session = lock(&state.session)?;
    session.next();
    Ok(HttpResponse::Ok().json(round_view(&session)))
}

async fn reset_rounds(req: HttpRequest, state: web::Data<AppState>) -> Result<HttpResponse> {
    if !is_admin(&req, &state) {
        return Ok(unauthorized());
    }
    let mut session = lock(&state.session)?;
    session.reset();
    lock(&state.scores)?.reset_tonight();
    Ok(HttpResponse::Ok().json(round_view(&session)))
}

fn find_round(state: &AppState, number: usize) -> Result<Option<Round>> {
    Ok(lock(&state.session)?.round(number).cloned())
}

async fn round_document(number: web::Path<usize>, state: web::Data<AppState>) -> Result<HttpResponse> {
    let Some(round) = find_round(&state, *number)? else {
        return Ok(HttpResponse::NotFound().json(serde_json::json!({"error": "Round not found"})));
    };
    let bytes = to_document(&round).map_err(actix_web::error::ErrorInternalServerError)?;
    Ok(HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .insert_header(("Content-Disposition", format!("attachment; filename=\"round_{}.txt\"", round.number)))
        .body(bytes))
}

async fn round_table(number: web::Path<usize>, state: web::Data<AppState>) -> Result<HttpResponse> {
    let Some(round) = find_round(&state, *number)? else {
        return Ok(HttpResponse::NotFound().json(serde_json::json!({"error": "Round not found"})));
    };
    let bytes = to_table(&round).map_err(actix_web::error::ErrorInternalServerError)?;
    Ok(HttpResponse::Ok()
        .content_type("text/csv")
        .insert_header(("Content-Disposition", format!("attachment; filename=\"round_{}.csv\"", round.number)))
        .body(bytes))
}

async fn pairing_history(state: web::Data<AppState>) -> Result<HttpResponse> {
    let players = lock(&state.roster)?.players.clone();
    let session = lock(&state.session)?;
    Ok(HttpResponse::Ok().json(HistoryResponse {
        matrix: session.history().matrix(&players),
        players,
    }))
}

async fn get_scores(state: web::Data<AppState>) -> Result<HttpResponse> {
    let board = lock(&state.scores)?;
    Ok(HttpResponse::Ok().json(ScoresResponse {
        tonight: board.tonight_leaderboard(),
        all_time: board.all_time_leaderboard(),
    }))
}

async fn submit_scores(body: web::Json<ScoreSubmission>, state: web::Data<AppState>) -> Result<HttpResponse> {
    let mut board = lock(&state.scores)?;
    if let Err(e) = board.submit(&body) {
        return Ok(failure(e));
    }
    if let Err(e) = state.score_store.save(&board.all_time) {
        error!("Failed to save scores: {}", e);
        return Err(actix_web::error::ErrorInternalServerError(format!("Failed to save scores: {}", e)));
    }
    Ok(HttpResponse::Ok().json(ScoresResponse {
        tonight: board.tonight_leaderboard(),
        all_time: board.all_time_leaderboard(),
    }))
}

fn timer_view(timer: &Option<MatchTimer>) -> TimerResponse {
    let (running, remaining) = match timer {
        Some(t) => (!t.is_finished(), t.remaining()),
        None => (false, 0),
    };
    TimerResponse {
        running,
        remaining_seconds: remaining,
        display: format_remaining(remaining),
    }
}

async fn start_timer(body: web::Json<MatchFormat>, state: web::Data<AppState>) -> Result<HttpResponse> {
    let format = match *body {
        MatchFormat::Timed { minutes } => MatchFormat::timed(minutes),
        MatchFormat::FastFour => MatchFormat::FastFour,
    };
    let Some(duration) = format.duration() else {
        return Ok(failure("Fast Four matches have no timer: first to 4 games wins"));
    };
    let mut timer = lock(&state.timer)?;
    *timer = Some(MatchTimer::start(duration));
    Ok(HttpResponse::Ok().json(timer_view(&timer)))
}

async fn cancel_timer(state: web::Data<AppState>) -> Result<HttpResponse> {
    let timer = lock(&state.timer)?;
    if let Some(t) = timer.as_ref() {
        t.cancel();
    }
    Ok(HttpResponse::Ok().json(timer_view(&timer)))
}

async fn get_timer(state: web::Data<AppState>) -> Result<HttpResponse> {
    let timer = lock(&state.timer)?;
    Ok(HttpResponse::Ok().json(timer_view(&timer)))
}

async fn index() -> Result<HttpResponse> {
    let html = include_str!("../templates/index.html");
    Ok(HttpResponse::Ok().content_type("text/html").body(html))
}

/// Registers every page and API route
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/api/roster", web::get().to(get_roster))
        .route("/api/roster/players", web::post().to(add_player))
        .route("/api/roster/players/rename", web::post().to(rename_player))
        .route("/api/roster/players/move", web::post().to(move_player))
        .route("/api/roster/players/{name}", web::delete().to(remove_player))
        .route("/api/roster/courts", web::post().to(add_court))
        .route("/api/roster/courts/move", web::post().to(move_court))
        .route("/api/roster/courts/{name}", web::delete().to(remove_court))
        .route("/api/rounds", web::post().to(generate_round))
        .route("/api/rounds/current", web::get().to(current_round))
        .route("/api/rounds/previous", web::post().to(previous_round))
        .route("/api/rounds/next", web::post().to(next_round))
        .route("/api/rounds/reset", web::post().to(reset_rounds))
        .route("/api/rounds/{number}/document", web::get().to(round_document))
        .route("/api/rounds/{number}/table", web::get().to(round_table))
        .route("/api/history", web::get().to(pairing_history))
        .route("/api/scores", web::get().to(get_scores))
        .route("/api/scores", web::post().to(submit_scores))
        .route("/api/timer", web::get().to(get_timer))
        .route("/api/timer", web::post().to(start_timer))
        .route("/api/timer", web::delete().to(cancel_timer));
}

pub async fn start_server(port: u16, state: AppState) -> std::io::Result<()> {
    let app_state = web::Data::new(state);

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(middleware::Logger::default())
            .service(Files::new("/static", "static"))
            .configure(configure)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
