use log::Level;
use web_sys::window;

/// Global application settings
#[derive(Debug, Clone)]
pub struct AppSettings {
    /// Backend API host (e.g., "localhost" or "dash.example.com")
    pub api_host: String,

    /// Backend API port (e.g., 3000)
    pub api_port: u16,

    /// API path prefix (e.g., "/api/v1")
    pub api_path: String,

    /// Use HTTPS for API requests
    pub api_use_https: bool,

    /// Default log level for the application
    pub log_level: Level,

    /// Enable debug mode
    pub debug_mode: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            api_host: "localhost".to_string(),
            api_port: 3000,
            api_path: "/api/v1".to_string(),
            api_use_https: false,
            log_level: Level::Info,
            debug_mode: false,
        }
    }
}

impl AppSettings {
    /// Create settings from the window location, with localStorage
    /// overrides for the API endpoint.
    pub fn from_environment() -> Self {
        let mut settings = Self::default();

        if let Some(window) = window() {
            if let Ok(hostname) = window.location().hostname() {
                settings.debug_mode = hostname == "localhost" || hostname == "127.0.0.1";
                if settings.debug_mode {
                    settings.log_level = Level::Debug;
                }

                if let Ok(Some(storage)) = window.local_storage() {
                    if let Ok(Some(api_host)) = storage.get_item("stockdash_api_host") {
                        settings.api_host = api_host;
                    }
                    if let Ok(Some(api_port)) = storage.get_item("stockdash_api_port") {
                        if let Ok(port) = api_port.parse::<u16>() {
                            settings.api_port = port;
                        }
                    }
                    if let Ok(Some(api_path)) = storage.get_item("stockdash_api_path") {
                        settings.api_path = api_path;
                    }
                    if let Ok(Some(use_https)) = storage.get_item("stockdash_api_use_https") {
                        settings.api_use_https = use_https.to_lowercase() == "true";
                    }
                }
            }
        }

        settings
    }

    /// Get the base API URL (protocol + host + port + prefix)
    pub fn api_base_url(&self) -> String {
        let protocol = if self.api_use_https { "https" } else { "http" };
        format!(
            "{}://{}:{}{}",
            protocol, self.api_host, self.api_port, self.api_path
        )
    }
}

// Global settings instance using thread_local
use std::cell::RefCell;

thread_local! {
    static SETTINGS: RefCell<AppSettings> = RefCell::new(AppSettings::from_environment());
}

/// Get a copy of the current settings
pub fn get_settings() -> AppSettings {
    SETTINGS.with(|s| s.borrow().clone())
}

/// Initialize settings (call this at app startup)
pub fn init_settings() {
    SETTINGS.with(|s| {
        *s.borrow_mut() = AppSettings::from_environment();
    });
}
