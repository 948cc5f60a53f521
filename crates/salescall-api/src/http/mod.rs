//! HTTP layer: the HTML form at `/` and `/sessions/*`, and a JSON API at
//! `/api/v1/` using the envelope response format.

pub mod error;
pub mod form;
pub mod handlers;
pub mod page;
pub mod response;
pub mod router;
