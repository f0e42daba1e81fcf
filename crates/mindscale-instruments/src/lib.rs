//! mindscale-instruments
//!
//! Screening instrument definitions and the assessment engine built on them.
//! Pure computation, no I/O. The [`registry::Registry`] is built once at
//! startup, validated, and then shared read-only by every session.

pub mod daily;
pub mod error;
pub mod escalation;
pub mod instruments;
pub mod interpret;
pub mod registry;
pub mod responses;
pub mod safety;
pub mod scoring;
pub mod session;

use error::RegistryError;
use scoring::ScaleDefinition;

/// Trait implemented by each builtin screening instrument.
pub trait Instrument: Send + Sync {
    /// Unique identifier for this instrument (e.g., "gad7", "pss10").
    fn id(&self) -> &str;

    /// Build the validated reference definition. Fails only if the
    /// compiled-in band table is malformed.
    fn definition(&self) -> Result<ScaleDefinition, RegistryError>;
}

/// Return all builtin instruments, in display order.
pub fn all_instruments() -> Vec<Box<dyn Instrument>> {
    vec![
        Box::new(instruments::gad7::Gad7),
        Box::new(instruments::phq9::Phq9),
        Box::new(instruments::isi::Isi),
        Box::new(instruments::pss10::Pss10),
        Box::new(instruments::chalder::ChalderFatigue),
    ]
}
