// Application configuration, loaded from environment variables and CLI flags.

use std::path::PathBuf;

/// Application configuration, shared by the game client and the
/// leaderboard server (each reads the fields it cares about).
#[derive(Debug, Clone)]
pub struct Config {
    /// Port to bind the leaderboard HTTP server to.
    pub port: u16,
    /// Path of the JSON leaderboard snapshot.
    pub leaderboard_file: PathBuf,
    /// Maximum number of entries returned by the leaderboard endpoint.
    pub leaderboard_limit: usize,
    /// Base URL of the leaderboard service, used by the game client to
    /// submit scores. When unset, submission is a no-op.
    pub api_url: Option<String>,
}

impl Config {
    /// Load configuration from environment variables and CLI arguments.
    ///
    /// Environment variables:
    /// - `PORT` - leaderboard server port (default: 8000)
    /// - `LEADERBOARD_FILE` - path of the JSON score snapshot (default: `leaderboard.json`)
    /// - `LEADERBOARD_LIMIT` - list cap for `GET /leaderboard/` (default: 10)
    /// - `API_URL` - leaderboard base URL for the game client (default: unset)
    ///
    /// CLI flags:
    /// - `--port <PORT>` - override the port
    pub fn load() -> Self {
        let args: Vec<String> = std::env::args().collect();

        // Port: CLI flag --port takes precedence, then env var, then default
        let port = Self::parse_cli_value(&args, "--port")
            .and_then(|v| v.parse().ok())
            .or_else(|| std::env::var("PORT").ok().and_then(|v| v.parse().ok()))
            .unwrap_or(8000);

        let leaderboard_file = std::env::var("LEADERBOARD_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("leaderboard.json"));

        let leaderboard_limit = std::env::var("LEADERBOARD_LIMIT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);

        let api_url = std::env::var("API_URL").ok().filter(|v| !v.is_empty());

        Config {
            port,
            leaderboard_file,
            leaderboard_limit,
            api_url,
        }
    }

    /// Parse a CLI flag value like `--port 8080`.
    fn parse_cli_value(args: &[String], flag: &str) -> Option<String> {
        args.windows(2).find_map(|pair| {
            if pair[0] == flag {
                Some(pair[1].clone())
            } else {
                None
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cli_value() {
        let args: Vec<String> = ["snake", "--port", "9090"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(
            Config::parse_cli_value(&args, "--port"),
            Some("9090".to_string())
        );
        assert_eq!(Config::parse_cli_value(&args, "--host"), None);
    }
}
