pub mod job;
pub mod mission;
pub mod rate_limit;
pub mod tts;
