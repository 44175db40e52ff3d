//! HTTP handlers for osb-web

pub mod buildinfo;
pub mod error;
pub mod health;
pub mod lang;
pub mod pages;
pub mod scores;

pub use buildinfo::get_build_info;
pub use error::ApiError;
pub use health::health_routes;
pub use lang::{request_language, set_lang};
pub use pages::{home_page, leaderboard_page, overall_page, player_page, process_page};
pub use scores::{home_json, leaderboard_json, player_json};
