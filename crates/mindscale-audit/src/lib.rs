//! mindscale-audit
//!
//! Application-level audit events for assessment decisions. Events are
//! emitted through `tracing`; whichever subscriber the host installs decides
//! where they land.

pub mod error;
pub mod events;
