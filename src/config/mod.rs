use serde::Deserialize;
use std::env;

// Главная структура конфигурации
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub upload: UploadConfig,
}

// Настройки приложения
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub rust_log: String,
}

// Настройки приёма файлов
#[derive(Debug, Clone, Deserialize)]
pub struct UploadConfig {
    pub max_bytes: usize,
    pub temp_dir: String,
}

impl Config {
    /// Загружает конфигурацию: значения по умолчанию, затем переменные
    /// `BOARDING_<SECTION>__<KEY>`, затем `PORT`, `HOST` и `RUST_LOG`.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .set_default("app.host", "0.0.0.0")?
            .set_default("app.port", 5000)?
            .set_default("app.environment", "development")?
            .set_default("app.rust_log", "boarding_sequence=debug,tower_http=debug")?
            .set_default("upload.max_bytes", 5 * 1024 * 1024)?
            .set_default(
                "upload.temp_dir",
                env::temp_dir().to_string_lossy().into_owned(),
            )?
            .add_source(
                config::Environment::with_prefix("BOARDING")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("app.port", env::var("PORT").ok())?
            .set_override_option("app.host", env::var("HOST").ok())?
            .set_override_option("app.rust_log", env::var("RUST_LOG").ok())?
            .build()?
            .try_deserialize()
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.app.host, self.app.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            app: AppConfig {
                host: "0.0.0.0".to_string(),
                port: 5000,
                environment: "development".to_string(),
                rust_log: "boarding_sequence=debug,tower_http=debug".to_string(),
            },
            upload: UploadConfig {
                max_bytes: 5 * 1024 * 1024,
                temp_dir: env::temp_dir().to_string_lossy().into_owned(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_system_temp_dir() {
        let config = Config::default();
        assert_eq!(config.app.port, 5000);
        assert_eq!(config.bind_addr(), "0.0.0.0:5000");
        assert_eq!(
            config.upload.temp_dir,
            env::temp_dir().to_string_lossy().into_owned()
        );
    }
}
