// Outbound score submission to the leaderboard service.
//
// Fire-and-forget: every failure path is logged and swallowed so the
// player-facing flow is never interrupted by a dead or slow service.

use std::time::Duration;

use reqwest::Client;

use crate::store::ScoreEntry;

const SUBMIT_TIMEOUT: Duration = Duration::from_secs(5);

/// Post the final score to `{base}/scores/`. A missing base URL makes this
/// a no-op. Called once per completed game, after the game loop has already
/// terminated, so it can never stall frame pacing.
pub async fn submit_score(api_url: Option<&str>, player: &str, score: u32) {
    let Some(base) = api_url else {
        return;
    };

    let entry = ScoreEntry {
        player: player.to_string(),
        score,
        date: chrono::Local::now().naive_local(),
    };

    let client = match Client::builder().timeout(SUBMIT_TIMEOUT).build() {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!(error = %e, "could not build HTTP client, score not submitted");
            return;
        }
    };

    let url = format!("{}/scores/", base.trim_end_matches('/'));
    match client.post(&url).json(&entry).send().await {
        Ok(resp) if resp.status().is_success() => {
            tracing::debug!(player, score, "score submitted");
        }
        Ok(resp) => {
            tracing::warn!(status = %resp.status(), "leaderboard rejected score");
        }
        Err(e) => {
            tracing::warn!(error = %e, "score submission failed");
        }
    }
}
