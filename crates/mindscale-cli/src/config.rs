use std::path::{Path, PathBuf};

use mindscale_instruments::scoring::Locale;
use serde::{Deserialize, Serialize};

/// On-disk schema version written by this build. Every bump needs a step
/// in [`migrate`].
const CURRENT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MindscaleConfig {
    /// 0 (or absent) marks a file written before versioning.
    #[serde(default)]
    pub config_version: u32,
    #[serde(default)]
    pub locale: Locale,
    /// Region code used to pick crisis resources (e.g. "US", "CN").
    #[serde(default = "default_region")]
    pub region: String,
    /// Shown whenever the safety branch activates. The engine only signals
    /// the trigger; what to show is deployment configuration.
    #[serde(default)]
    pub crisis_resources: Vec<CrisisResource>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrisisResource {
    pub region: String,
    pub name: String,
    pub contact: String,
}

fn default_region() -> String {
    "US".to_string()
}

impl Default for MindscaleConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            locale: Locale::En,
            region: default_region(),
            crisis_resources: vec![CrisisResource {
                region: "US".to_string(),
                name: "988 Suicide & Crisis Lifeline".to_string(),
                contact: "Call or text 988".to_string(),
            }],
        }
    }
}

impl MindscaleConfig {
    /// Resources for the configured region. Falls back to every configured
    /// resource rather than showing nothing.
    pub fn crisis_resources_for_region(&self) -> Vec<&CrisisResource> {
        let regional: Vec<_> = self
            .crisis_resources
            .iter()
            .filter(|r| r.region.eq_ignore_ascii_case(&self.region))
            .collect();
        if regional.is_empty() {
            self.crisis_resources.iter().collect()
        } else {
            regional
        }
    }
}

pub fn config_path(explicit: Option<&Path>) -> eyre::Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("mindscale").join("config.json"))
}

/// Load the config at `path`, or defaults when the file does not exist.
pub fn load_config(path: &Path) -> eyre::Result<MindscaleConfig> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file; using defaults");
        return Ok(MindscaleConfig::default());
    }

    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;

    // Migrations operate on untyped JSON; old shapes would not deserialize.
    let json: serde_json::Value = serde_json::from_str(&contents)?;
    let on_disk_version = match json.get("config_version").and_then(|v| v.as_u64()) {
        Some(raw) => u32::try_from(raw).map_err(|_| {
            eyre::eyre!("config_version {raw} is newer than this build supports ({CURRENT_VERSION})")
        })?,
        None => 0,
    };

    let migrated = migrate(json, on_disk_version)?;
    let config: MindscaleConfig = serde_json::from_value(migrated)?;
    Ok(config)
}

/// Bring a raw config from `from_version` up to [`CURRENT_VERSION`], one
/// step at a time.
fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION}). \
             Please update mindscale."
        ));
    }

    // v0 → v1: `hotlines` (flat list of strings) became `crisis_resources`
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;
        let region = obj
            .get("region")
            .and_then(|r| r.as_str())
            .map(str::to_string)
            .unwrap_or_else(default_region);
        if let Some(serde_json::Value::Array(hotlines)) = obj.remove("hotlines") {
            let resources: Vec<serde_json::Value> = hotlines
                .iter()
                .filter_map(|h| h.as_str())
                .map(|contact| {
                    serde_json::json!({
                        "region": region,
                        "name": contact,
                        "contact": contact,
                    })
                })
                .collect();
            obj.entry("crisis_resources")
                .or_insert(serde_json::Value::Array(resources));
        }
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated config v0 → v1 (hotlines → crisis_resources)");
    }

    Ok(json)
}

pub fn save_config(path: &Path, config: &MindscaleConfig) -> eyre::Result<()> {
    let dir = path
        .parent()
        .ok_or_else(|| eyre::eyre!("config path has no parent: {}", path.display()))?;
    std::fs::create_dir_all(dir)?;

    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;
    let json = serde_json::to_string_pretty(&stamped)?;

    // Readers never see a half-written file.
    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;
    std::fs::rename(&tmp_path, path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}
