use std::path::PathBuf;

/// Which media backend the server runs with. Picked once at startup; no
/// call site ever branches on path-vs-URL shapes.
#[derive(Debug, Clone)]
pub enum MediaBackend {
    /// Files under a local directory, served at `/media`.
    Local { root: PathBuf },
    /// Objects in an S3 bucket, referenced by public URL.
    S3 { bucket: String, region: String },
}

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
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
    /// Lifetime of a login session in hours (default: `24`).
    pub session_ttl_hours: i64,
    /// Media backend selection.
    pub media: MediaBackend,
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
    /// | `SESSION_TTL_HOURS`    | `24`                       |
    /// | `MEDIA_BACKEND`        | `local`                    |
    /// | `MEDIA_ROOT`           | `./media` (local backend)  |
    /// | `S3_BUCKET`            | required for `s3` backend  |
    /// | `S3_REGION`            | required for `s3` backend  |
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

        let session_ttl_hours: i64 = std::env::var("SESSION_TTL_HOURS")
            .unwrap_or_else(|_| "24".into())
            .parse()
            .expect("SESSION_TTL_HOURS must be a valid i64");

        let media = match std::env::var("MEDIA_BACKEND")
            .unwrap_or_else(|_| "local".into())
            .as_str()
        {
            "local" => MediaBackend::Local {
                root: std::env::var("MEDIA_ROOT")
                    .unwrap_or_else(|_| "./media".into())
                    .into(),
            },
            "s3" => MediaBackend::S3 {
                bucket: std::env::var("S3_BUCKET")
                    .expect("S3_BUCKET must be set for the s3 media backend"),
                region: std::env::var("S3_REGION")
                    .expect("S3_REGION must be set for the s3 media backend"),
            },
            other => panic!("MEDIA_BACKEND must be 'local' or 's3', got '{other}'"),
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            session_ttl_hours,
            media,
        }
    }
}
