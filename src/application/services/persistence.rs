//! Persistence adapter
//!
//! Serializes the phases and the theme under two independent keys of a
//! [`KeyValueStore`]. Loading is fail-soft: a missing or corrupt phases
//! value yields an empty list instead of an error.

use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::application::{ApplicationResult, IoResultExt};
use crate::domain::{Phase, Theme};
use crate::infrastructure::traits::KeyValueStore;

/// Default key holding the phases document.
pub const DEFAULT_PHASES_KEY: &str = "wishlist";

/// Default key holding the theme literal.
pub const DEFAULT_THEME_KEY: &str = "wishlist_theme";

/// Accepted shapes of the phases document.
///
/// Older releases wrapped the array in an object: `{"phases": [...]}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredPhases {
    List(Vec<Phase>),
    Wrapped {
        #[serde(default)]
        phases: Option<Vec<Phase>>,
    },
}

impl StoredPhases {
    fn into_phases(self) -> Vec<Phase> {
        match self {
            Self::List(phases) => phases,
            Self::Wrapped { phases } => phases.unwrap_or_default(),
        }
    }
}

/// Reads and writes the hierarchy and theme.
pub struct PersistenceService {
    store: Arc<dyn KeyValueStore>,
    phases_key: String,
    theme_key: String,
}

impl PersistenceService {
    /// Create a persistence service using the default keys.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_keys(store, DEFAULT_PHASES_KEY, DEFAULT_THEME_KEY)
    }

    pub fn with_keys(
        store: Arc<dyn KeyValueStore>,
        phases_key: impl Into<String>,
        theme_key: impl Into<String>,
    ) -> Self {
        Self {
            store,
            phases_key: phases_key.into(),
            theme_key: theme_key.into(),
        }
    }

    pub fn phases_key(&self) -> &str {
        &self.phases_key
    }

    pub fn theme_key(&self) -> &str {
        &self.theme_key
    }

    /// Overwrite both keys with the given state.
    #[instrument(level = "debug", skip(self, phases))]
    pub fn save(&self, phases: &[Phase], theme: Theme) -> ApplicationResult<()> {
        let json = serde_json::to_string(phases)?;
        self.store
            .set(&self.phases_key, &json)
            .with_key_context(&self.phases_key)?;
        self.store
            .set(&self.theme_key, theme.as_str())
            .with_key_context(&self.theme_key)?;
        debug!("save: {} phase(s), theme={}", phases.len(), theme);
        Ok(())
    }

    /// Read phases and theme.
    ///
    /// Absent or unparseable phases load as an empty list; an absent or
    /// unknown theme loads as [`Theme::Light`]. Only read failures of the
    /// underlying store are returned as errors.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&self) -> ApplicationResult<(Vec<Phase>, Theme)> {
        let phases = match self
            .store
            .get(&self.phases_key)
            .with_key_context(&self.phases_key)?
        {
            Some(raw) => parse_phases(&raw),
            None => {
                debug!("load: key '{}' absent", self.phases_key);
                Vec::new()
            }
        };

        let theme = match self
            .store
            .get(&self.theme_key)
            .with_key_context(&self.theme_key)?
        {
            Some(raw) => raw.trim().parse::<Theme>().unwrap_or_else(|_| {
                warn!("load: unknown theme {:?}, using light", raw);
                Theme::Light
            }),
            None => Theme::default(),
        };

        debug!("load: {} phase(s), theme={}", phases.len(), theme);
        Ok((phases, theme))
    }

    /// Remove both keys.
    pub fn clear(&self) -> ApplicationResult<()> {
        self.store
            .remove(&self.phases_key)
            .with_key_context(&self.phases_key)?;
        self.store
            .remove(&self.theme_key)
            .with_key_context(&self.theme_key)?;
        Ok(())
    }
}

fn parse_phases(raw: &str) -> Vec<Phase> {
    match serde_json::from_str::<StoredPhases>(raw) {
        Ok(stored) => stored.into_phases(),
        Err(e) => {
            warn!("load: stored phases unreadable, starting empty: {}", e);
            Vec::new()
        }
    }
}
