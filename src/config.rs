use std::{env, path::PathBuf};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    /// Directory uploaded files are written to.
    pub upload_dir: PathBuf,
    /// Public URL prefix the upload directory is served under.
    pub upload_url_prefix: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET is not set"))?;
        let upload_dir = env::var("UPLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("public/uploads"));
        let upload_url_prefix =
            env::var("UPLOAD_URL_PREFIX").unwrap_or_else(|_| "/uploads".to_string());
        Ok(Self {
            port,
            database_url,
            host,
            jwt_secret,
            upload_dir,
            upload_url_prefix,
        })
    }
}
