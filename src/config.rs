/// Nombre del sitio usado en títulos y como título por defecto
/// Configurado en tiempo de compilación vía SITE_NAME (ver build.rs)
pub const SITE_NAME: &str = match option_env!("SITE_NAME") {
    Some(name) => name,
    None => "Nexus Ong",
};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub site_name: String,
    pub enable_logging: bool,
    pub timing: TimingConfig,
    pub menu_config: MenuConfig,
    pub form_config: FormConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            site_name: SITE_NAME.to_string(),
            enable_logging: true,
            timing: TimingConfig::default(),
            menu_config: MenuConfig::default(),
            form_config: FormConfig::default(),
        }
    }
}

/// Retardos de los callbacks diferidos (milisegundos)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingConfig {
    pub focus_delay_ms: u32,
    pub temp_tabindex_ms: u32,
    pub announce_clear_ms: u32,
    pub announce_step_ms: u32,
    pub search_debounce_ms: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            focus_delay_ms: 100,
            temp_tabindex_ms: 1000,
            announce_clear_ms: 3000,
            announce_step_ms: 500,
            search_debounce_ms: 300,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuConfig {
    /// Ancho a partir del cual el menú móvil se cierra solo
    pub breakpoint_px: f64,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self { breakpoint_px: 768.0 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormConfig {
    pub reset_delay_ms: u32,
    pub password_min_len: usize,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            reset_delay_ms: 1500,
            password_min_len: 6,
        }
    }
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            site_name: SITE_NAME.to_string(),
            enable_logging: option_env!("ENABLE_LOGGING")
                .unwrap_or("true").parse().unwrap_or(true),
            timing: TimingConfig {
                focus_delay_ms: option_env!("FOCUS_DELAY_MS")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.timing.focus_delay_ms),
                temp_tabindex_ms: option_env!("TEMP_TABINDEX_MS")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.timing.temp_tabindex_ms),
                announce_clear_ms: option_env!("ANNOUNCE_CLEAR_MS")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.timing.announce_clear_ms),
                announce_step_ms: option_env!("ANNOUNCE_STEP_MS")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.timing.announce_step_ms),
                search_debounce_ms: option_env!("SEARCH_DEBOUNCE_MS")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.timing.search_debounce_ms),
            },
            menu_config: MenuConfig {
                breakpoint_px: option_env!("MENU_BREAKPOINT_PX")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.menu_config.breakpoint_px),
            },
            form_config: FormConfig {
                reset_delay_ms: option_env!("FORM_RESET_DELAY_MS")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.form_config.reset_delay_ms),
                password_min_len: option_env!("PASSWORD_MIN_LEN")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.form_config.password_min_len),
            },
        }
    }

    /// Nivel de log según ENABLE_LOGGING
    pub fn log_level(&self) -> log::Level {
        if self.enable_logging {
            log::Level::Debug
        } else {
            log::Level::Warn
        }
    }

    /// Título del documento para una página concreta
    pub fn page_title(&self, page_title: &str) -> String {
        format!("{} - {}", page_title, self.site_name)
    }
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_documented_values() {
        let config = AppConfig::default();
        assert_eq!(config.menu_config.breakpoint_px, 768.0);
        assert_eq!(config.timing.temp_tabindex_ms, 1000);
        assert_eq!(config.timing.search_debounce_ms, 300);
        assert_eq!(config.form_config.reset_delay_ms, 1500);
        assert_eq!(config.form_config.password_min_len, 6);
    }

    #[test]
    fn test_page_title_appends_site_name() {
        let config = AppConfig {
            site_name: "Nexus Ong".to_string(),
            ..AppConfig::default()
        };
        assert_eq!(config.page_title("Sobre Nós"), "Sobre Nós - Nexus Ong");
    }
}
