//! Visitor authentication state.
//!
//! Each page load builds a [`SessionContainer`] around the shared Dream API
//! client and the visitor's credential cookie. The container initializes
//! once, flips readiness, and is the only writer of sign-in state for the
//! rest of the request.
//!
//! # Architecture
//!
//! - [`SessionContainer`]: state machine `Uninitialized → Initializing → Ready`
//! - [`Session`]: read-only snapshot handed to views
//! - [`cookie`]: credential persistence between page loads

pub mod cookie;
mod container;

pub use container::{Phase, Session, SessionContainer};
