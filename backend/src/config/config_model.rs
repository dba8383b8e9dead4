use super::stage::Stage;

#[derive(Debug, Clone)]
pub struct DotEnvyConfig {
    pub stage: Stage,
    pub backend_server: BackendServer,
    pub database: Database,
    pub gemini: Gemini,
    pub admin: AdminSecret,
}

#[derive(Debug, Clone)]
pub struct BackendServer {
    pub port: u16,
    /// MiB.
    pub body_limit: u64,
    /// Seconds.
    pub timeout: u64,
}

#[derive(Debug, Clone)]
pub struct Database {
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct Gemini {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    /// Seconds.
    pub timeout: u64,
}

#[derive(Debug, Clone)]
pub struct AdminSecret {
    pub email: String,
    pub password: String,
    pub jwt_secret: String,
}
