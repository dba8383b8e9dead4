use anyhow::{Context, Result};

use super::{
    config_model::{AdminSecret, BackendServer, Database, DotEnvyConfig, Gemini},
    stage::Stage,
};

pub fn load() -> Result<DotEnvyConfig> {
    dotenvy::dotenv().ok();

    let backend_server = BackendServer {
        port: std::env::var("SERVER_PORT_BACKEND")
            .unwrap_or_else(|_| "8001".to_string())
            .parse()
            .context("SERVER_PORT_BACKEND is invalid")?,
        body_limit: std::env::var("SERVER_BODY_LIMIT")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .context("SERVER_BODY_LIMIT is invalid")?,
        timeout: std::env::var("SERVER_TIMEOUT")
            .unwrap_or_else(|_| "90".to_string())
            .parse()
            .context("SERVER_TIMEOUT is invalid")?,
    };

    let database = Database {
        url: required("DATABASE_URL")?,
    };

    let gemini = Gemini {
        api_key: required("GEMINI_API_KEY")?,
        base_url: std::env::var("GEMINI_BASE_URL")
            .unwrap_or_else(|_| "https://generativelanguage.googleapis.com/v1beta".to_string()),
        model: std::env::var("GEMINI_MODEL").unwrap_or_else(|_| "gemini-2.0-flash".to_string()),
        max_tokens: std::env::var("GEMINI_MAX_TOKENS")
            .unwrap_or_else(|_| "4000".to_string())
            .parse()
            .context("GEMINI_MAX_TOKENS is invalid")?,
        timeout: std::env::var("GEMINI_TIMEOUT")
            .unwrap_or_else(|_| "60".to_string())
            .parse()
            .context("GEMINI_TIMEOUT is invalid")?,
    };

    Ok(DotEnvyConfig {
        stage: get_stage(),
        backend_server,
        database,
        gemini,
        admin: get_admin_secret()?,
    })
}

pub fn get_stage() -> Stage {
    dotenvy::dotenv().ok();

    let stage_str = std::env::var("STAGE").unwrap_or("".to_string());
    Stage::try_from(&stage_str).unwrap_or_default()
}

pub fn get_admin_secret() -> Result<AdminSecret> {
    dotenvy::dotenv().ok();

    Ok(AdminSecret {
        email: required("ADMIN_EMAIL")?,
        password: required("ADMIN_PASSWORD")?,
        jwt_secret: required("JWT_ADMIN_SECRET")?,
    })
}

fn required(key: &str) -> Result<String> {
    let value = std::env::var(key).with_context(|| format!("{key} is missing"))?;
    if value.trim().is_empty() {
        anyhow::bail!("{key} is empty");
    }
    Ok(value)
}
