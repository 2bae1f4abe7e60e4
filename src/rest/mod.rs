//! REST module for the track service.
//!
//! Routes:
//! - `GET /`: redirect to `/tracks`
//! - `GET /tracks`: list all tracks
//! - `POST /tracks/`: create a track
//! - `GET /tracks/{id}`: fetch a track
//! - `PUT /tracks/{id}`: update a track
//! - `DELETE /tracks/{id}`: delete a track
//!
//! Every failure is answered with `400 Bad Request`.

pub mod methods;
pub mod server;
pub mod types;

// Re-export commonly used types
pub use server::{router, run_server, AppState};
pub use types::{ApiError, ApiResult};
