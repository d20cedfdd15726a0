use config::{Config, ConfigBuilder, ConfigError, Environment, File, builder::DefaultState};
use std::sync::OnceLock;

use super::{AppConfig, ServerConfig};

static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// 直接读取的环境变量，优先级高于 `CAPSTONE__*`
const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("app.environment", "APP_ENV"),
    ("app.log_level", "RUST_LOG"),
    ("server.host", "SERVER_HOST"),
    ("server.port", "SERVER_PORT"),
    ("server.unix_socket_path", "UNIX_SOCKET"),
    ("server.workers", "CPU_COUNT"),
    ("database.url", "DATABASE_URL"),
];

fn app_env() -> String {
    std::env::var("APP_ENV").unwrap_or_else(|_| "development".into())
}

impl ServerConfig {
    /// workers 为 0 时按 CPU 核数推断，并受 max_workers 限制
    fn resolve_workers(&mut self, cpus: usize) {
        if self.workers == 0 {
            self.workers = cpus.min(self.max_workers).max(1);
        }
    }
}

impl AppConfig {
    fn builder() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let mut builder = Config::builder()
            .add_source(File::with_name("config").required(false))
            .add_source(File::with_name(&format!("config.{}", app_env())).required(false))
            .add_source(
                Environment::with_prefix("CAPSTONE")
                    .separator("__")
                    .try_parsing(true),
            );

        for (key, var) in ENV_OVERRIDES {
            builder = builder.set_override_option(*key, std::env::var(var).ok())?;
        }

        Ok(builder)
    }

    /// 加载配置
    pub fn load() -> Result<Self, ConfigError> {
        let mut app_config: AppConfig = Self::builder()?.build()?.try_deserialize()?;
        app_config.server.resolve_workers(num_cpus::get());
        app_config.validate()?;
        Ok(app_config)
    }

    /// 启动前的基本校验
    fn validate(&self) -> Result<(), ConfigError> {
        if self.database.url.trim().is_empty() {
            return Err(ConfigError::Message("database.url must not be empty".into()));
        }
        if self.database.pool_size == 0 {
            return Err(ConfigError::Message(
                "database.pool_size must be at least 1".into(),
            ));
        }
        if self.server.limits.max_payload_size == 0 {
            return Err(ConfigError::Message(
                "server.limits.max_payload_size must be positive".into(),
            ));
        }
        Ok(())
    }

    /// 获取全局配置实例
    pub fn get() -> &'static AppConfig {
        APP_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                eprintln!("Failed to load configuration: {e}");
                std::process::exit(1);
            })
        })
    }

    /// 初始化配置 (在应用启动时调用)
    pub fn init() -> Result<(), ConfigError> {
        let config = Self::load()?;
        APP_CONFIG
            .set(config)
            .map_err(|_| ConfigError::Message("Configuration already initialized".to_string()))
    }

    pub fn is_development(&self) -> bool {
        self.app.environment == "development"
    }

    /// 获取服务器绑定地址
    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// 获取 Unix 套接字路径 (如果配置了)
    #[cfg(unix)]
    pub fn unix_socket_path(&self) -> Option<&str> {
        Some(self.server.unix_socket_path.as_str()).filter(|p| !p.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AppConfig {
        Config::builder()
            .add_source(File::from_str(
                include_str!("../../config.toml"),
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_sample_config_parses_with_scoring_defaults() {
        let config = sample();
        assert!(config.scoring.resync_combined_on_revision);
        assert!(config.validate().is_ok());
        assert_eq!(config.server_bind_address(), "127.0.0.1:8080");
    }

    #[test]
    fn test_resolve_workers_caps_at_max() {
        let mut config = sample();
        config.server.workers = 0;
        config.server.max_workers = 4;
        config.server.resolve_workers(16);
        assert_eq!(config.server.workers, 4);

        config.server.workers = 2;
        config.server.resolve_workers(16);
        assert_eq!(config.server.workers, 2);
    }

    #[test]
    fn test_validate_rejects_empty_pool() {
        let mut config = sample();
        config.database.pool_size = 0;
        assert!(config.validate().is_err());
    }
}
