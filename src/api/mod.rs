//! The HTTP-facing layer (§4.5, §6, §7): query-parameter parsing into the
//! planner/executor's types, the four route handlers, and response
//! encoding. Everything upstream of this module is infallible by
//! construction; this is where malformed input gets turned into `400`s.

mod errors;
mod handlers;
mod params;
mod response;
mod server;
mod state;

pub use errors::ApiError;
pub use params::{parse_filter_query, FilterQuery};
pub use server::build_router;
pub use state::AppState;
