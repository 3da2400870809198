//! Per-character render configuration.
//!
//! Each known character maps to an immutable [`CharacterRenderConfigEntry`]
//! describing how its visual asset sits on the shared surface. The table is
//! fixed for the lifetime of the process; there is no mutation API.

use crate::id::CharacterId;
use kurbo::Vec2;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::sync::LazyLock;
use thiserror::Error;

// ─── Entries ─────────────────────────────────────────────────────────────

/// How one character's asset is anchored, placed, and scaled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterRenderConfigEntry {
    /// Pivot within the asset, as a fraction of its native size.
    pub anchor: Vec2,
    /// Placement as a fraction of the surface width/height.
    /// Values outside `[0, 1]` place the pivot off-canvas on purpose.
    pub position: Vec2,
    /// Multiplier applied to the asset's native size.
    pub scale: Vec2,
    /// Model parameter that drives mouth shape during speech.
    pub mouth_param: String,
}

impl CharacterRenderConfigEntry {
    pub fn new(anchor: Vec2, position: Vec2, scale: Vec2, mouth_param: impl Into<String>) -> Self {
        Self {
            anchor,
            position,
            scale,
            mouth_param: mouth_param.into(),
        }
    }

    /// Reject entries that cannot produce a usable transform.
    fn validate(&self) -> Result<(), &'static str> {
        if !(self.anchor.x.is_finite() && self.anchor.y.is_finite()) {
            return Err("anchor must be finite");
        }
        if !(self.position.x.is_finite() && self.position.y.is_finite()) {
            return Err("position must be finite");
        }
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !(positive(self.scale.x) && positive(self.scale.y)) {
            return Err("scale must be finite and positive");
        }
        if self.mouth_param.trim().is_empty() {
            return Err("mouth parameter must not be empty");
        }
        Ok(())
    }
}

// ─── Errors ──────────────────────────────────────────────────────────────

/// Failure to look up or build a render configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// No entry exists for the requested character.
    #[error("no render configuration for character '{id}'")]
    NotFound { id: String },
    /// The same character appeared twice while building a table.
    #[error("character '{id}' is configured more than once")]
    DuplicateCharacter { id: CharacterId },
    /// An entry failed validation.
    #[error("invalid render configuration for '{id}': {reason}")]
    InvalidEntry { id: CharacterId, reason: &'static str },
}

// ─── Table ───────────────────────────────────────────────────────────────

static BUILTIN: LazyLock<CharacterRenderConfig> = LazyLock::new(CharacterRenderConfig::reference);

/// Immutable mapping `character id → render entry`.
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterRenderConfig {
    entries: BTreeMap<CharacterId, CharacterRenderConfigEntry>,
}

impl CharacterRenderConfig {
    /// The table shipped with the application, built once on first use.
    pub fn builtin() -> &'static CharacterRenderConfig {
        &BUILTIN
    }

    /// Build a table from integrator-supplied entries.
    ///
    /// Fails on a repeated character or an entry that would not render.
    pub fn from_entries<I, S>(entries: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (S, CharacterRenderConfigEntry)>,
        S: AsRef<str>,
    {
        let mut map = BTreeMap::new();
        for (name, entry) in entries {
            let id = CharacterId::intern(name.as_ref());
            entry
                .validate()
                .map_err(|reason| ConfigError::InvalidEntry { id, reason })?;
            match map.entry(id) {
                Entry::Occupied(_) => return Err(ConfigError::DuplicateCharacter { id }),
                Entry::Vacant(slot) => {
                    slot.insert(entry);
                }
            }
        }
        log::debug!("built render configuration for {} characters", map.len());
        Ok(Self { entries: map })
    }

    /// Look up the entry for `id`.
    ///
    /// Unknown characters are a configuration error, never a default.
    pub fn lookup(&self, id: &str) -> Result<&CharacterRenderConfigEntry, ConfigError> {
        CharacterId::get(id)
            .and_then(|key| self.entries.get(&key))
            .ok_or_else(|| ConfigError::NotFound { id: id.to_string() })
    }

    /// Look up by an already-interned ID.
    pub fn get(&self, id: CharacterId) -> Option<&CharacterRenderConfigEntry> {
        self.entries.get(&id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.lookup(id).is_ok()
    }

    /// Configured character IDs, sorted by name.
    pub fn ids(&self) -> impl Iterator<Item = CharacterId> + '_ {
        self.entries.keys().copied()
    }

    /// All entries, sorted by character name.
    pub fn iter(&self) -> impl Iterator<Item = (CharacterId, &CharacterRenderConfigEntry)> {
        self.entries.iter().map(|(id, entry)| (*id, entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn reference() -> Self {
        let entries = [
            (
                "aria",
                CharacterRenderConfigEntry::new(
                    Vec2::new(0.86, 0.43),
                    Vec2::new(1.5, 1.2),
                    Vec2::new(0.54, 0.54),
                    "ParamMouthOpenY",
                ),
            ),
            (
                "sera",
                CharacterRenderConfigEntry::new(
                    Vec2::new(0.3, 1.0),
                    Vec2::new(0.1, 2.5),
                    Vec2::new(0.18, 0.18),
                    "ParamMouthForm",
                ),
            ),
            (
                "eidon",
                CharacterRenderConfigEntry::new(
                    Vec2::new(0.5, 1.0),
                    Vec2::new(0.5, 1.0),
                    Vec2::new(0.12, 0.12),
                    "ParamMouthOpen",
                ),
            ),
        ];
        Self {
            entries: entries
                .into_iter()
                .map(|(name, entry)| (CharacterId::intern(name), entry))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn entry(scale: f64, mouth: &str) -> CharacterRenderConfigEntry {
        CharacterRenderConfigEntry::new(
            Vec2::new(0.5, 1.0),
            Vec2::new(0.5, 0.5),
            Vec2::new(scale, scale),
            mouth,
        )
    }

    #[test]
    fn builtin_has_the_three_characters() {
        let config = CharacterRenderConfig::builtin();
        let ids: Vec<&str> = config.ids().map(|id| id.as_str()).collect();
        assert_eq!(ids, vec!["aria", "eidon", "sera"]);
    }

    #[test]
    fn builtin_entries_pass_validation() {
        let rebuilt = CharacterRenderConfig::from_entries(
            CharacterRenderConfig::builtin()
                .iter()
                .map(|(id, e)| (id.as_str().to_string(), e.clone())),
        )
        .unwrap();
        assert_eq!(&rebuilt, CharacterRenderConfig::builtin());
    }

    #[test]
    fn lookup_unknown_is_not_found() {
        let err = CharacterRenderConfig::builtin().lookup("ghost").unwrap_err();
        assert_eq!(
            err,
            ConfigError::NotFound {
                id: "ghost".to_string()
            }
        );
        assert_eq!(err.to_string(), "no render configuration for character 'ghost'");
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert!(CharacterRenderConfig::builtin().lookup("Aria").is_err());
    }

    #[test]
    fn duplicate_character_rejected() {
        let err = CharacterRenderConfig::from_entries([
            ("dup_char", entry(0.2, "ParamMouthOpen")),
            ("dup_char", entry(0.3, "ParamMouthOpen")),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::DuplicateCharacter {
                id: CharacterId::intern("dup_char")
            }
        );
    }

    #[test]
    fn invalid_scale_rejected() {
        let err = CharacterRenderConfig::from_entries([("flat", entry(0.0, "ParamMouthOpen"))])
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEntry { reason, .. } if reason.contains("scale")));
    }

    #[test]
    fn empty_mouth_param_rejected() {
        let err = CharacterRenderConfig::from_entries([("mute", entry(0.2, "  "))]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEntry { reason, .. } if reason.contains("mouth")));
    }

    #[test]
    fn off_canvas_position_is_allowed() {
        let mut far = entry(0.2, "ParamMouthOpen");
        far.position = Vec2::new(3.0, -1.5);
        let config = CharacterRenderConfig::from_entries([("far", far.clone())]).unwrap();
        assert_eq!(config.lookup("far").unwrap(), &far);
    }

    #[test]
    fn entry_serializes_camel_case() {
        let aria = CharacterRenderConfig::builtin().lookup("aria").unwrap();
        let json = serde_json::to_value(aria).unwrap();
        assert_eq!(json["mouthParam"], "ParamMouthOpenY");
        assert_eq!(json["anchor"]["x"], 0.86);
        assert_eq!(json["position"]["y"], 1.2);
    }
}
