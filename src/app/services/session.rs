use tracing::{debug, warn};

use crate::app::domain::{Preferences, SETTINGS_KEY};
use crate::app::infrastructure::error::Result;
use crate::app::infrastructure::storage::KeyValueStore;

/// Read the persisted preferences, falling back to defaults.
///
/// A missing or malformed blob never fails the caller; fields missing from
/// an older blob take their defaults, and out-of-range values are clamped.
pub fn load_preferences(store: &dyn KeyValueStore) -> Preferences {
    let Some(blob) = store.get(SETTINGS_KEY) else {
        debug!("No saved preferences, using defaults");
        return Preferences::default();
    };

    match serde_json::from_str::<Preferences>(&blob) {
        Ok(prefs) => prefs.clamped(),
        Err(e) => {
            warn!("Failed to parse saved preferences: {}. Using defaults.", e);
            Preferences::default()
        }
    }
}

/// Write the preferences blob under [`SETTINGS_KEY`].
pub fn save_preferences(store: &dyn KeyValueStore, prefs: &Preferences) -> Result<()> {
    let json = serde_json::to_string(prefs)?;
    store.set(SETTINGS_KEY, &json)?;
    debug!("Saved preferences: {}", json);
    Ok(())
}

/// Clear saved preferences by writing the defaults back.
pub fn reset_preferences(store: &dyn KeyValueStore) -> Result<Preferences> {
    let defaults = Preferences::default();
    save_preferences(store, &defaults)?;
    Ok(defaults)
}
