pub mod config;
pub mod console;
pub mod error;
pub mod espn_fetch;
pub mod expected;
pub mod http_client;
pub mod input;
pub mod league;
pub mod luck;
pub mod matchups;
pub mod pipeline;
pub mod report;
pub mod snapshot;
