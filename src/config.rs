use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub spin: SpinConfig,
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    #[serde(default)]
    pub bootstrap: BootstrapConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// 允许跨域的前端地址，留空表示不限制
    #[serde(default)]
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub expires_in: i64, // seconds
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpinConfig {
    /// 新建 token 的有效期 (小时)
    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: i64,
    /// 过期 token 清理间隔 (秒)
    #[serde(default = "default_cleanup_interval_secs")]
    pub cleanup_interval_secs: u64,
    /// 过期多久之后删除 token (小时)，期间后台仍可看到已过期 token
    #[serde(default = "default_expired_token_retention_hours")]
    pub expired_token_retention_hours: i64,
}

impl Default for SpinConfig {
    fn default() -> Self {
        Self {
            token_ttl_hours: default_token_ttl_hours(),
            cleanup_interval_secs: default_cleanup_interval_secs(),
            expired_token_retention_hours: default_expired_token_retention_hours(),
        }
    }
}

fn default_token_ttl_hours() -> i64 {
    48
}

fn default_cleanup_interval_secs() -> u64 {
    60
}

fn default_expired_token_retention_hours() -> i64 {
    24
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    pub global_window_secs: u64,
    pub global_max_requests: u32,
    pub spin_window_secs: u64,
    pub spin_max_requests: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            global_window_secs: 15 * 60,
            global_max_requests: 100,
            spin_window_secs: 60,
            spin_max_requests: 5,
        }
    }
}

/// 启动时若不存在超级管理员，则用这里的账号创建一个
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BootstrapConfig {
    #[serde(default)]
    pub superadmin_username: Option<String>,
    #[serde(default)]
    pub superadmin_password: Option<String>,
}

impl Config {
    pub fn from_toml() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        use std::io::ErrorKind;

        // 尝试读取配置文件，如果不存在则完全依赖环境变量
        let config_result = std::fs::read_to_string(&config_path);

        let mut config: Config = match config_result {
            Ok(config_str) => {
                toml::from_str(&config_str).map_err(|e| format!("Failed to parse {config_path}: {e}"))?
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                fn get_env(name: &str) -> Option<String> {
                    env::var(name).ok()
                }
                fn get_env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
                    env::var(name)
                        .ok()
                        .and_then(|v| v.parse::<T>().ok())
                        .unwrap_or(default)
                }

                // 无配置文件时必须提供数据库地址
                let database_url = get_env("DATABASE_URL")
                    .ok_or("DATABASE_URL is not set and no config.toml was found")?;

                Config {
                    server: ServerConfig {
                        host: get_env("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                        port: get_env_parse("SERVER_PORT", 5000u16),
                        cors_allowed_origins: Vec::new(),
                    },
                    database: DatabaseConfig {
                        url: database_url,
                        max_connections: get_env_parse("DB_MAX_CONNECTIONS", 10u32),
                    },
                    jwt: JwtConfig {
                        secret: get_env("JWT_SECRET")
                            .unwrap_or_else(|| "change-me-in-production".to_string()),
                        expires_in: get_env_parse("JWT_EXPIRES_IN", 86_400i64),
                    },
                    spin: SpinConfig::default(),
                    rate_limit: RateLimitConfig::default(),
                    bootstrap: BootstrapConfig::default(),
                }
            }
            Err(e) => {
                return Err(format!("Cannot read config file {config_path}: {e}").into());
            }
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// 环境变量覆盖（即便文件存在时也覆盖）
    fn apply_env_overrides(&mut self) {
        if let Ok(v) = env::var("SERVER_HOST") {
            self.server.host = v;
        }
        if let Ok(v) = env::var("SERVER_PORT")
            && let Ok(p) = v.parse()
        {
            self.server.port = p;
        }
        if let Ok(v) = env::var("CORS_ALLOWED_ORIGINS") {
            self.server.cors_allowed_origins = parse_origin_list(&v);
        }
        if let Ok(v) = env::var("DATABASE_URL") {
            self.database.url = v;
        }
        if let Ok(v) = env::var("DB_MAX_CONNECTIONS")
            && let Ok(mc) = v.parse()
        {
            self.database.max_connections = mc;
        }
        if let Ok(v) = env::var("JWT_SECRET") {
            self.jwt.secret = v;
        }
        if let Ok(v) = env::var("JWT_EXPIRES_IN")
            && let Ok(n) = v.parse()
        {
            self.jwt.expires_in = n;
        }
        if let Ok(v) = env::var("TOKEN_TTL_HOURS")
            && let Ok(n) = v.parse()
        {
            self.spin.token_ttl_hours = n;
        }
        if let Ok(v) = env::var("TOKEN_CLEANUP_INTERVAL_SECS")
            && let Ok(n) = v.parse()
        {
            self.spin.cleanup_interval_secs = n;
        }
        if let Ok(v) = env::var("EXPIRED_TOKEN_RETENTION_HOURS")
            && let Ok(n) = v.parse()
        {
            self.spin.expired_token_retention_hours = n;
        }
        if let Ok(v) = env::var("RATE_LIMIT_MAX_REQUESTS")
            && let Ok(n) = v.parse()
        {
            self.rate_limit.global_max_requests = n;
        }
        if let Ok(v) = env::var("RATE_LIMIT_SPIN_MAX_REQUESTS")
            && let Ok(n) = v.parse()
        {
            self.rate_limit.spin_max_requests = n;
        }
        if let Ok(v) = env::var("SUPERADMIN_USERNAME") {
            self.bootstrap.superadmin_username = Some(v);
        }
        if let Ok(v) = env::var("SUPERADMIN_PASSWORD") {
            self.bootstrap.superadmin_password = Some(v);
        }
    }
}

fn parse_origin_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
