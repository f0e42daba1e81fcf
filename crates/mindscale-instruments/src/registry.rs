use std::collections::HashSet;

use tracing::info;

use crate::all_instruments;
use crate::daily::DailyCheckIn;
use crate::error::RegistryError;
use crate::instruments;
use crate::scoring::ScaleDefinition;

/// Anxiety instrument the daily check-in borrows its screen from.
pub const DAILY_ANXIETY_SCALE: &str = "gad7";

/// Validated, immutable reference data for every instrument.
///
/// Build it once at startup and pass it (by reference or behind an `Arc`)
/// to whatever needs it. There is no way to obtain an unvalidated registry.
#[derive(Debug, Clone)]
pub struct Registry {
    scales: Vec<ScaleDefinition>,
    daily: DailyCheckIn,
}

impl Registry {
    /// The compiled-in instrument set.
    pub fn builtin() -> Result<Self, RegistryError> {
        let scales = all_instruments()
            .iter()
            .map(|instrument| instrument.definition())
            .collect::<Result<Vec<_>, _>>()?;

        let anxiety = scales
            .iter()
            .find(|s| s.id == DAILY_ANXIETY_SCALE)
            .ok_or_else(|| RegistryError::UnknownScale(DAILY_ANXIETY_SCALE.to_string()))?;
        let daily = instruments::daily::check_in(anxiety)?;

        Self::new(scales, daily)
    }

    /// Validate and assemble a registry. Any invariant violation fails the
    /// whole registry.
    pub fn new(scales: Vec<ScaleDefinition>, daily: DailyCheckIn) -> Result<Self, RegistryError> {
        let mut ids = HashSet::new();
        for scale in &scales {
            if !ids.insert(scale.id.as_str()) {
                return Err(RegistryError::DuplicateScale(scale.id.clone()));
            }
            scale.validate()?;
        }
        if ids.contains(daily.id.as_str()) {
            return Err(RegistryError::DuplicateScale(daily.id.clone()));
        }
        daily.validate()?;

        info!(
            instruments = scales.len(),
            daily_items = daily.questions.len(),
            "instrument registry loaded"
        );

        Ok(Self { scales, daily })
    }

    pub fn scales(&self) -> &[ScaleDefinition] {
        &self.scales
    }

    pub fn get(&self, id: &str) -> Option<&ScaleDefinition> {
        self.scales.iter().find(|s| s.id == id)
    }

    /// Like [`Registry::get`], but also accepts a short-form code ("gad2")
    /// and resolves it to its parent instrument.
    pub fn resolve(&self, id: &str) -> Option<&ScaleDefinition> {
        self.get(id).or_else(|| {
            self.scales
                .iter()
                .find(|s| s.short_form.as_ref().is_some_and(|sf| sf.id == id))
        })
    }

    pub fn require(&self, id: &str) -> Result<&ScaleDefinition, RegistryError> {
        self.resolve(id)
            .ok_or_else(|| RegistryError::UnknownScale(id.to_string()))
    }

    pub fn daily(&self) -> &DailyCheckIn {
        &self.daily
    }
}
