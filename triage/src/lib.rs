//! Domain logic of the health risk assessment.
//!
//! Everything in here is free of I/O: turning form input into a request body,
//! coercing a client request into the external risk service contract, and
//! interpreting whatever the risk service answers with.

pub mod flow;
mod macros;
pub mod models;
pub mod payload;
pub mod presenter;
pub mod profile;
pub mod vitals;
