// ABOUTME: Loads workspace configuration from reviewdesk.toml
// ABOUTME: Falls back to defaults and sanitizes out-of-range layout values

use anyhow::Context;
use reviewdesk_logging::{info, warn};
use reviewdesk_types::config::{
    default_dropzone_width, default_min_panel_size_percent, default_min_panel_width,
    default_save_debounce_ms, default_sidebar_width,
};
use reviewdesk_types::WorkspaceConfig;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "reviewdesk.toml";

/// Largest allowed minimum panel percentage; two panels must always fit
const MAX_MIN_PANEL_PERCENT: f64 = 50.0;

/// Default configuration directory: ~/.config/reviewdesk
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join("reviewdesk"))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Load configuration from the default directory
pub fn load_config() -> anyhow::Result<WorkspaceConfig> {
    load_config_from_dir(&config_dir())
}

/// Load `reviewdesk.toml` from `dir`, using defaults when it does not exist
pub fn load_config_from_dir(dir: &Path) -> anyhow::Result<WorkspaceConfig> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    info!(
        config_dir = %dir.display(),
        config_path = %config_path.display(),
        config_exists = config_path.exists(),
        "Loading workspace configuration"
    );

    let config = if config_path.exists() {
        let config_str = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;
        toml::from_str::<WorkspaceConfig>(&config_str)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?
    } else {
        info!("No workspace configuration file found, using defaults");
        WorkspaceConfig::default()
    };

    let config = match validate(&config) {
        Ok(()) => {
            info!("Workspace configuration validation passed");
            config
        }
        Err(reason) => {
            warn!(reason = %reason, "Invalid workspace configuration, sanitizing");
            sanitized(&config)
        }
    };

    info!(
        persist_workspace = config.persistence.persist_workspace,
        save_debounce_ms = config.persistence.save_debounce_ms,
        dropzone_width_px = config.layout.dropzone_width_px,
        min_panel_width_px = config.layout.min_panel_width_px,
        "Workspace configuration loaded"
    );

    Ok(config)
}

/// Check layout values are usable
pub fn validate(config: &WorkspaceConfig) -> Result<(), String> {
    let layout = &config.layout;
    if !(layout.dropzone_width_px > 0.0) {
        return Err(format!(
            "dropzone_width_px must be positive, got {}",
            layout.dropzone_width_px
        ));
    }
    if !(layout.min_panel_width_px > 0.0) {
        return Err(format!(
            "min_panel_width_px must be positive, got {}",
            layout.min_panel_width_px
        ));
    }
    let min_percent = layout.min_panel_size_percent;
    if !(min_percent > 0.0 && min_percent <= MAX_MIN_PANEL_PERCENT) {
        return Err(format!(
            "min_panel_size_percent must be in (0, {MAX_MIN_PANEL_PERCENT}], got {}",
            layout.min_panel_size_percent
        ));
    }
    if !(layout.sidebar_width_px >= 0.0) {
        return Err(format!(
            "sidebar_width_px must not be negative, got {}",
            layout.sidebar_width_px
        ));
    }
    if config.persistence.save_debounce_ms == 0 {
        warn!("Workspace save debounce is 0 - every change will be written immediately");
    }
    Ok(())
}

/// Replace invalid values with defaults
pub fn sanitized(config: &WorkspaceConfig) -> WorkspaceConfig {
    let mut config = config.clone();
    let layout = &mut config.layout;

    if !(layout.dropzone_width_px > 0.0) {
        warn!(
            original = layout.dropzone_width_px,
            "Invalid drop zone width, using default"
        );
        layout.dropzone_width_px = default_dropzone_width();
    }
    if !(layout.min_panel_width_px > 0.0) {
        warn!(
            original = layout.min_panel_width_px,
            "Invalid minimum panel width, using default"
        );
        layout.min_panel_width_px = default_min_panel_width();
    }
    if !(layout.min_panel_size_percent > 0.0) {
        warn!(
            original = layout.min_panel_size_percent,
            "Invalid minimum panel percentage, using default"
        );
        layout.min_panel_size_percent = default_min_panel_size_percent();
    } else if layout.min_panel_size_percent > MAX_MIN_PANEL_PERCENT {
        warn!(
            original = layout.min_panel_size_percent,
            "Minimum panel percentage too high, capping"
        );
        layout.min_panel_size_percent = MAX_MIN_PANEL_PERCENT;
    }
    if !(layout.sidebar_width_px >= 0.0) {
        layout.sidebar_width_px = default_sidebar_width();
    }
    if config.persistence.save_debounce_ms > 60_000 {
        warn!(
            original = config.persistence.save_debounce_ms,
            "Save debounce too high, using default"
        );
        config.persistence.save_debounce_ms = default_save_debounce_ms();
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let config = load_config_from_dir(dir.path()).unwrap();
        assert_eq!(config, WorkspaceConfig::default());
    }

    #[test]
    fn test_loads_values_from_file() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"
            [persistence]
            persist_workspace = true
            save_debounce_ms = 250

            [layout]
            min_panel_width_px = 150.0
            "#,
        )
        .unwrap();

        let config = load_config_from_dir(dir.path()).unwrap();
        assert!(config.persistence.persist_workspace);
        assert_eq!(config.persistence.save_debounce_ms, 250);
        assert_eq!(config.layout.min_panel_width_px, 150.0);
        assert_eq!(config.layout.dropzone_width_px, 200.0);
    }

    #[test]
    fn test_invalid_values_are_sanitized() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"
            [layout]
            dropzone_width_px = -5.0
            min_panel_size_percent = 80.0
            "#,
        )
        .unwrap();

        let config = load_config_from_dir(dir.path()).unwrap();
        assert_eq!(config.layout.dropzone_width_px, 200.0);
        assert_eq!(config.layout.min_panel_size_percent, 50.0);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "[layout\nbroken").unwrap();
        assert!(load_config_from_dir(dir.path()).is_err());
    }

    #[test]
    fn test_validate_defaults() {
        assert!(validate(&WorkspaceConfig::default()).is_ok());
    }
}
