use std::path::PathBuf;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Session token configuration.
    pub jwt: JwtConfig,
    /// Upload storage location and limits.
    pub uploads: UploadConfig,
    /// Optional admin account ensured at startup.
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    ///
    /// See [`JwtConfig::from_env`], [`UploadConfig::from_env`] and
    /// [`BootstrapAdmin::from_env`] for the remaining variables.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt: JwtConfig::from_env(),
            uploads: UploadConfig::from_env(),
            bootstrap_admin: BootstrapAdmin::from_env(),
        }
    }
}

/// Local blob storage settings.
#[derive(Debug, Clone)]
pub struct UploadConfig {
    /// Directory uploaded files are written to.
    pub dir: PathBuf,
    /// URL prefix under which stored files are served back.
    pub public_base_url: String,
    /// Largest accepted upload in bytes.
    pub max_bytes: usize,
}

/// Default upload ceiling: 5 MiB.
const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

impl UploadConfig {
    /// | Env Var                  | Default      |
    /// |--------------------------|--------------|
    /// | `UPLOAD_DIR`             | `./uploads`  |
    /// | `PUBLIC_UPLOAD_BASE_URL` | `/uploads`   |
    /// | `MAX_UPLOAD_BYTES`       | `5242880`    |
    pub fn from_env() -> Self {
        let dir = std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "./uploads".into());

        let public_base_url = std::env::var("PUBLIC_UPLOAD_BASE_URL")
            .unwrap_or_else(|_| "/uploads".into())
            .trim_end_matches('/')
            .to_string();

        let max_bytes: usize = std::env::var("MAX_UPLOAD_BYTES")
            .unwrap_or_else(|_| DEFAULT_MAX_UPLOAD_BYTES.to_string())
            .parse()
            .expect("MAX_UPLOAD_BYTES must be a valid usize");

        Self {
            dir: PathBuf::from(dir),
            public_base_url,
            max_bytes,
        }
    }
}

/// Credentials of an admin account created (or promoted) at startup.
#[derive(Debug, Clone)]
pub struct BootstrapAdmin {
    pub email: String,
    pub password: String,
    pub student_id: String,
    pub name: String,
}

impl BootstrapAdmin {
    /// Read the bootstrap admin from the environment.
    ///
    /// Returns `None` unless both `ADMIN_EMAIL` and `ADMIN_PASSWORD` are set.
    /// `ADMIN_STUDENT_ID` defaults to `admin`, `ADMIN_NAME` to `Club Admin`.
    pub fn from_env() -> Option<Self> {
        let email = std::env::var("ADMIN_EMAIL").ok().filter(|s| !s.trim().is_empty())?;
        let password = std::env::var("ADMIN_PASSWORD").ok().filter(|s| !s.is_empty())?;
        Some(Self {
            email,
            password,
            student_id: std::env::var("ADMIN_STUDENT_ID").unwrap_or_else(|_| "admin".into()),
            name: std::env::var("ADMIN_NAME").unwrap_or_else(|_| "Club Admin".into()),
        })
    }
}
