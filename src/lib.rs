// Snake arcade: a terminal grid-snake game client plus the leaderboard
// web service it reports scores to. The two binaries (`snake` and
// `leaderboard-server`) share this library.

pub mod api;
pub mod client;
pub mod config;
pub mod game;
pub mod store;
pub mod submit;
pub mod ui;
