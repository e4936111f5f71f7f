pub mod auth;
pub mod backend;
pub mod events;
pub mod jobs;
pub mod rate_limit;
pub mod sweep;
pub mod tts;
