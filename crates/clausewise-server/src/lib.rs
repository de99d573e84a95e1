//! ClauseWise HTTP service: document upload, summaries, clause extraction and
//! what-if analysis over legal text.

pub mod cli;
pub mod routes;
pub mod state;
pub mod store;

pub use routes::build_router;
pub use state::AppState;
