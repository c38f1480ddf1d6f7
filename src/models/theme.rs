//! Display theme preference

use serde::{Deserialize, Serialize};

/// The user's theme choice; `Device` follows the browser's color scheme
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    Device,
}

impl ThemeMode {
    /// Resolve to a concrete light/dark mode
    pub fn resolve(self, prefers_dark: bool) -> ThemeMode {
        match self {
            ThemeMode::Device if prefers_dark => ThemeMode::Dark,
            ThemeMode::Device => ThemeMode::Light,
            mode => mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_follows_preference() {
        assert_eq!(ThemeMode::Device.resolve(true), ThemeMode::Dark);
        assert_eq!(ThemeMode::Device.resolve(false), ThemeMode::Light);
        assert_eq!(ThemeMode::Light.resolve(true), ThemeMode::Light);
        assert_eq!(ThemeMode::Dark.resolve(false), ThemeMode::Dark);
    }
}
