use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::ratings::{RatingsCache, RatingsError, RatingsTable};
use crate::winprob;

#[derive(Clone)]
pub struct AppState {
    pub cache: RatingsCache,
    /// Standard deviation for the rating-gap model.
    pub sigma: f64,
}

/// Build the Axum router for the dashboard.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/api/ratings", get(ratings_handler))
        .route("/api/matchup", get(matchup_handler))
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

/// Serve the single-page UI.
async fn index_handler() -> impl IntoResponse {
    Html(DASHBOARD_HTML)
}

#[derive(Debug, Serialize)]
struct TeamRating {
    team: String,
    rating: f64,
}

#[derive(Debug, Serialize)]
struct RatingsResponse {
    /// Sorted by team name.
    teams: Vec<TeamRating>,
    fetched_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct MatchupParams {
    team_a: String,
    team_b: String,
}

#[derive(Debug, Serialize)]
struct MatchupResponse {
    team_a: String,
    team_b: String,
    rating_a: f64,
    rating_b: f64,
    /// P(team_a wins); `p_b` is the exact complement.
    p_a: f64,
    p_b: f64,
}

/// GET /api/ratings
async fn ratings_handler(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let snapshot = state.cache.get().await.map_err(upstream_error)?;
    let teams = snapshot
        .teams
        .into_iter()
        .map(|(team, rating)| TeamRating { team, rating })
        .collect();
    Ok(Json(RatingsResponse {
        teams,
        fetched_at: snapshot.fetched_at,
    }))
}

/// GET /api/matchup?team_a=X&team_b=Y
async fn matchup_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MatchupParams>,
) -> Result<Json<MatchupResponse>, (StatusCode, String)> {
    let snapshot = state.cache.get().await.map_err(upstream_error)?;
    compute_matchup(&snapshot.teams, &params.team_a, &params.team_b, state.sigma).map(Json)
}

/// Selection validation + probability computation, kept pure so it can be
/// tested without a server.
fn compute_matchup(
    table: &RatingsTable,
    team_a: &str,
    team_b: &str,
    sigma: f64,
) -> Result<MatchupResponse, (StatusCode, String)> {
    if team_a == team_b {
        return Err((
            StatusCode::BAD_REQUEST,
            "select two different teams".to_string(),
        ));
    }
    let rating_a = *table
        .get(team_a)
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("unknown team: {team_a}")))?;
    let rating_b = *table
        .get(team_b)
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("unknown team: {team_b}")))?;

    let (p_a, p_b) = winprob::matchup(rating_a, rating_b, sigma);
    Ok(MatchupResponse {
        team_a: team_a.to_string(),
        team_b: team_b.to_string(),
        rating_a,
        rating_b,
        p_a,
        p_b,
    })
}

/// A blocking fetch/parse failure: the upstream site is the broken party.
fn upstream_error(e: RatingsError) -> (StatusCode, String) {
    (StatusCode::BAD_GATEWAY, e.to_string())
}

/// Embedded single-file dashboard (HTML + CSS + JS)
const DASHBOARD_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>WNBA Win Probability</title>
<style>
  :root {
    --bg: #0f1117;
    --card: #1a1d27;
    --border: #2a2d3a;
    --accent: #6c63ff;
    --green: #00c896;
    --red: #ff4f6a;
    --text: #e0e0e0;
    --muted: #8888aa;
  }
  * { box-sizing: border-box; margin: 0; padding: 0; }
  body { background: var(--bg); color: var(--text); font-family: 'Segoe UI', system-ui, sans-serif; }
  header { display: flex; align-items: center; gap: 1rem; padding: 1rem 2rem; border-bottom: 1px solid var(--border); }
  header h1 { font-size: 1.4rem; font-weight: 700; }
  main { max-width: 760px; margin: 0 auto; padding: 1.5rem 2rem; display: grid; gap: 1.5rem; }
  .panel { background: var(--card); border: 1px solid var(--border); border-radius: 10px; padding: 1.2rem; }
  .selectors { display: grid; grid-template-columns: 1fr 1fr; gap: 1.5rem; }
  @media (max-width: 600px) { .selectors { grid-template-columns: 1fr; } }
  label { display: block; color: var(--muted); font-size: .8rem; text-transform: uppercase; letter-spacing: .06em; margin-bottom: .4rem; }
  select { width: 100%; background: var(--bg); color: var(--text); border: 1px solid var(--border); border-radius: 6px; padding: .55rem .7rem; font-size: .95rem; }
  select:focus { outline: none; border-color: var(--accent); }
  .readouts { display: grid; grid-template-columns: 1fr 1fr; gap: 1.5rem; }
  @media (max-width: 600px) { .readouts { grid-template-columns: 1fr; } }
  .metric .label { color: var(--muted); font-size: .8rem; text-transform: uppercase; letter-spacing: .06em; margin-bottom: .4rem; }
  .metric .value { font-size: 2rem; font-weight: 700; }
  .value.fav { color: var(--green); }
  .value.dog { color: var(--red); }
  .hint { color: var(--muted); text-align: center; padding: 1.2rem; font-size: .9rem; }
  .error { background: rgba(255,79,106,.12); border: 1px solid var(--red); color: var(--red); border-radius: 10px; padding: 1rem 1.2rem; font-size: .9rem; }
  .hidden { display: none; }
  footer { color: var(--muted); font-size: .78rem; text-align: center; padding-bottom: 1.5rem; }
</style>
</head>
<body>
<header>
  <h1>🏀 WNBA Win Probability</h1>
  <span style="margin-left:auto;color:var(--muted);font-size:.8rem;" id="fetched-at"></span>
</header>

<main>
  <div class="error hidden" id="error-box"></div>

  <div class="panel hidden" id="selector-panel">
    <div class="selectors">
      <div>
        <label for="team-a">Team A</label>
        <select id="team-a"></select>
      </div>
      <div>
        <label for="team-b">Team B</label>
        <select id="team-b"></select>
      </div>
    </div>
  </div>

  <div class="panel hidden" id="readout-panel">
    <div class="readouts hidden" id="readouts">
      <div class="metric">
        <div class="label" id="label-a">Win Probability</div>
        <div class="value" id="prob-a">–</div>
      </div>
      <div class="metric">
        <div class="label" id="label-b">Win Probability</div>
        <div class="value" id="prob-b">–</div>
      </div>
    </div>
    <div class="hint hidden" id="same-team-hint">Select two different teams to see a matchup.</div>
  </div>

  <footer>Ratings scraped once per session from masseyratings.com</footer>
</main>

<script>
const pct = v => (v * 100).toFixed(2) + '%';
const show = id => document.getElementById(id).classList.remove('hidden');
const hide = id => document.getElementById(id).classList.add('hidden');

function showError(message) {
  const box = document.getElementById('error-box');
  box.textContent = 'Failed to load Massey Ratings: ' + message;
  show('error-box');
  hide('selector-panel');
  hide('readout-panel');
}

async function updateMatchup() {
  const a = document.getElementById('team-a').value;
  const b = document.getElementById('team-b').value;
  if (!a || !b) return;
  if (a === b) {
    hide('readouts');
    show('same-team-hint');
    return;
  }
  const r = await fetch(`/api/matchup?team_a=${encodeURIComponent(a)}&team_b=${encodeURIComponent(b)}`);
  if (!r.ok) { showError(await r.text()); return; }
  const m = await r.json();
  document.getElementById('label-a').textContent = 'Win Probability: ' + m.team_a;
  document.getElementById('label-b').textContent = 'Win Probability: ' + m.team_b;
  const elA = document.getElementById('prob-a');
  const elB = document.getElementById('prob-b');
  elA.textContent = pct(m.p_a);
  elB.textContent = pct(m.p_b);
  elA.className = 'value ' + (m.p_a >= m.p_b ? 'fav' : 'dog');
  elB.className = 'value ' + (m.p_b >= m.p_a ? 'fav' : 'dog');
  hide('same-team-hint');
  show('readouts');
}

async function init() {
  let r;
  try {
    r = await fetch('/api/ratings');
  } catch (e) {
    showError(String(e));
    return;
  }
  if (!r.ok) { showError(await r.text()); return; }
  const data = await r.json();

  const selA = document.getElementById('team-a');
  const selB = document.getElementById('team-b');
  for (const { team } of data.teams) {
    selA.add(new Option(team, team));
    selB.add(new Option(team, team));
  }
  selA.addEventListener('change', updateMatchup);
  selB.addEventListener('change', updateMatchup);

  document.getElementById('fetched-at').textContent =
    'Ratings fetched ' + new Date(data.fetched_at).toLocaleTimeString();

  show('selector-panel');
  show('readout-panel');
  // Both selectors start on the first team: an intentional no-op state.
  updateMatchup();
}

init();
</script>
</body>
</html>"#;
