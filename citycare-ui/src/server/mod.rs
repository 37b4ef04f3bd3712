//! Server functions. Each one resolves the caller's session on the server
//! and forwards the call to the CityCare backend.

mod auth;
mod issues;
mod profiles;
mod staff;
mod votes;

#[cfg(feature = "ssr")]
mod session;

pub use auth::*;
pub use issues::*;
pub use profiles::*;
pub use staff::*;
pub use votes::*;
