use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
}

/// Optional credentials for the admin account created at startup.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    pub admin: Option<AdminConfig>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET").unwrap_or_else(|_| generated_secret()),
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "rollcall".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "rollcall-users".into()),
            ttl_minutes: std::env::var("JWT_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60),
        };
        let admin = match (std::env::var("ADMIN_EMAIL"), std::env::var("ADMIN_PASSWORD")) {
            (Ok(email), Ok(password)) => Some(AdminConfig { email, password }),
            _ => None,
        };
        Ok(Self {
            database_url,
            jwt,
            admin,
        })
    }
}

// Tokens signed with a generated key do not survive a restart; set JWT_SECRET
// for multi-instance deployments.
fn generated_secret() -> String {
    let bytes: [u8; 32] = rand::random();
    tracing::warn!("JWT_SECRET not set; generated a process-local signing key");
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
