use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Origins accepted by CORS. Empty means any origin.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

fn split_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    /// SQL dump replayed by the `restore` binary.
    #[serde(default = "default_dump_path")]
    pub dump_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expires_in: i64, // seconds
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Products per page when the listing does not ask for a size.
    pub page_size: u64,
    /// Products per page in the admin product list.
    pub admin_page_size: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            page_size: 5,
            admin_page_size: 5,
        }
    }
}

fn default_dump_path() -> String {
    "backup_insert.sql".to_string()
}

impl Config {
    pub fn from_toml() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        use std::io::ErrorKind;

        // A missing file means the whole configuration comes from the environment.
        let config_result = std::fs::read_to_string(&config_path);

        let mut config: Config = match config_result {
            Ok(config_str) => toml::from_str(&config_str)
                .map_err(|e| format!("Failed to parse config file: {e}"))?,
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

                Config {
                    server: ServerConfig {
                        host: get_env("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
                        port: get_env_parse("SERVER_PORT", 8000u16),
                        allowed_origins: Vec::new(),
                    },
                    database: DatabaseConfig {
                        url: get_env("DATABASE_URL")
                            .unwrap_or_else(|| "sqlite://db.sqlite3?mode=rwc".to_string()),
                        max_connections: get_env_parse("DB_MAX_CONNECTIONS", 5u32),
                        dump_path: get_env("DUMP_PATH").unwrap_or_else(default_dump_path),
                    },
                    jwt: JwtConfig {
                        secret: get_env("JWT_SECRET")
                            .unwrap_or_else(|| "change-me-in-production".to_string()),
                        access_token_expires_in: get_env_parse("JWT_ACCESS_EXPIRES_IN", 7200i64),
                    },
                    catalog: CatalogConfig {
                        page_size: get_env_parse("CATALOG_PAGE_SIZE", 5u64),
                        admin_page_size: get_env_parse("ADMIN_PAGE_SIZE", 5u64),
                    },
                }
            }
            Err(e) => {
                return Err(format!("Cannot read config file {config_path}: {e}").into());
            }
        };

        // Environment variables win over file values.
        if let Ok(v) = env::var("SERVER_HOST") {
            config.server.host = v;
        }
        if let Ok(v) = env::var("SERVER_PORT")
            && let Ok(p) = v.parse()
        {
            config.server.port = p;
        }
        if let Ok(v) = env::var("CORS_ALLOWED_ORIGINS") {
            config.server.allowed_origins = split_origins(&v);
        }
        if let Ok(v) = env::var("DATABASE_URL") {
            config.database.url = v;
        }
        if let Ok(v) = env::var("DB_MAX_CONNECTIONS")
            && let Ok(mc) = v.parse()
        {
            config.database.max_connections = mc;
        }
        if let Ok(v) = env::var("DUMP_PATH") {
            config.database.dump_path = v;
        }
        if let Ok(v) = env::var("JWT_SECRET") {
            config.jwt.secret = v;
        }
        if let Ok(v) = env::var("JWT_ACCESS_EXPIRES_IN")
            && let Ok(n) = v.parse()
        {
            config.jwt.access_token_expires_in = n;
        }
        if let Ok(v) = env::var("CATALOG_PAGE_SIZE")
            && let Ok(n) = v.parse()
        {
            config.catalog.page_size = n;
        }
        if let Ok(v) = env::var("ADMIN_PAGE_SIZE")
            && let Ok(n) = v.parse()
        {
            config.catalog.admin_page_size = n;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_file_without_catalog_section() {
        let cfg: Config = toml::from_str(
            r#"
            [server]
            host = "0.0.0.0"
            port = 8000

            [database]
            url = "sqlite::memory:"
            max_connections = 1

            [jwt]
            secret = "s"
            access_token_expires_in = 60
            "#,
        )
        .unwrap();
        assert_eq!(cfg.catalog.page_size, 5);
        assert_eq!(cfg.catalog.admin_page_size, 5);
        assert_eq!(cfg.database.dump_path, "backup_insert.sql");
        assert!(cfg.server.allowed_origins.is_empty());
    }

    #[test]
    fn origin_list_from_env_value() {
        assert_eq!(
            split_origins("http://localhost:3000, https://magazin.ro,"),
            vec!["http://localhost:3000", "https://magazin.ro"]
        );
    }
}
