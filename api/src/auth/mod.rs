//! Request authentication

pub mod session;

pub use session::{auth_middleware, SessionToken};
