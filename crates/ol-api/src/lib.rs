//! # ol-api
//!
//! The data boundary of the experiment subsystem: request/response payloads
//! for DOE generation and random-search optimization, request-limit
//! enforcement, and handlers that wire the variable store through the domain
//! validator into the samplers and search driver.

pub mod handlers;
pub mod models;

pub use handlers::{record_run, run_doe, run_optimize};
pub use models::{
    DoeMeta, DoeMethod, DoeRequest, DoeResponse, OptimizeMeta, OptimizeMethod, OptimizeRequest,
    OptimizeResponse, MAX_REQUEST_POINTS,
};
