use std::path::PathBuf;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development except the
/// identity settings, which must name a way to verify tokens.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `120`). Model calls are slow.
    pub request_timeout_secs: u64,
    /// Upper bound on a streamed completion body in seconds (default: `300`).
    pub stream_timeout_secs: u64,
    /// Lowercased emails allowed on admin routes.
    pub admin_emails: Vec<String>,
    pub identity: IdentityConfig,
    pub voice: VoiceConfig,
}

/// How bearer tokens are verified.
#[derive(Debug, Clone, Default)]
pub struct IdentityConfig {
    /// HS256 shared secret. Takes precedence over `jwks_url`.
    pub jwt_secret: Option<String>,
    /// URL of an RS256 JSON Web Key Set.
    pub jwks_url: Option<String>,
    /// Required `iss` claim, if set.
    pub issuer: Option<String>,
    /// Required `aud` claim, if set.
    pub audience: Option<String>,
}

/// Storage and pacing for voice cloning.
#[derive(Debug, Clone)]
pub struct VoiceConfig {
    /// Root directory for per-user model files (default: `voice_models`).
    pub models_dir: PathBuf,
    /// Root directory for per-user uploaded samples (default: `voice_audio`).
    pub audio_dir: PathBuf,
    /// Delay between training progress steps in milliseconds (default: `1000`).
    pub training_step_ms: u64,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            models_dir: PathBuf::from("voice_models"),
            audio_dir: PathBuf::from("voice_audio"),
            training_step_ms: 1000,
        }
    }
}

fn optional_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                                          |
    /// |------------------------|--------------------------------------------------|
    /// | `HOST`                 | `0.0.0.0`                                        |
    /// | `PORT`                 | `8000`                                           |
    /// | `CORS_ORIGINS`         | `http://localhost:3000,http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `120`                                            |
    /// | `STREAM_TIMEOUT_SECS`  | `300`                                            |
    /// | `ADMIN_EMAILS`         | empty (no admins)                                |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = parse_list(
            &std::env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| "http://localhost:3000,http://localhost:5173".into()),
        );

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "120".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let stream_timeout_secs: u64 = std::env::var("STREAM_TIMEOUT_SECS")
            .unwrap_or_else(|_| "300".into())
            .parse()
            .expect("STREAM_TIMEOUT_SECS must be a valid u64");

        let admin_emails = parse_list(&std::env::var("ADMIN_EMAILS").unwrap_or_default())
            .into_iter()
            .map(|e| e.to_lowercase())
            .collect();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            stream_timeout_secs,
            admin_emails,
            identity: IdentityConfig::from_env(),
            voice: VoiceConfig::from_env(),
        }
    }

    pub fn is_admin_email(&self, email: &str) -> bool {
        let email = email.to_lowercase();
        self.admin_emails.iter().any(|admin| *admin == email)
    }
}

impl IdentityConfig {
    /// | Env Var               | Required                      |
    /// |-----------------------|-------------------------------|
    /// | `IDENTITY_JWT_SECRET` | one of these two              |
    /// | `IDENTITY_JWKS_URL`   | one of these two              |
    /// | `IDENTITY_ISSUER`     | no                            |
    /// | `IDENTITY_AUDIENCE`   | no                            |
    ///
    /// # Panics
    ///
    /// Panics if neither `IDENTITY_JWT_SECRET` nor `IDENTITY_JWKS_URL` is set.
    pub fn from_env() -> Self {
        let config = Self {
            jwt_secret: optional_var("IDENTITY_JWT_SECRET"),
            jwks_url: optional_var("IDENTITY_JWKS_URL"),
            issuer: optional_var("IDENTITY_ISSUER"),
            audience: optional_var("IDENTITY_AUDIENCE"),
        };
        assert!(
            config.jwt_secret.is_some() || config.jwks_url.is_some(),
            "IDENTITY_JWT_SECRET or IDENTITY_JWKS_URL must be set in the environment"
        );
        config
    }
}

impl VoiceConfig {
    /// | Env Var                  | Default        |
    /// |--------------------------|----------------|
    /// | `VOICE_MODELS_DIR`       | `voice_models` |
    /// | `VOICE_AUDIO_DIR`        | `voice_audio`  |
    /// | `VOICE_TRAINING_STEP_MS` | `1000`         |
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let training_step_ms: u64 = std::env::var("VOICE_TRAINING_STEP_MS")
            .unwrap_or_else(|_| defaults.training_step_ms.to_string())
            .parse()
            .expect("VOICE_TRAINING_STEP_MS must be a valid u64");

        Self {
            models_dir: optional_var("VOICE_MODELS_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.models_dir),
            audio_dir: optional_var("VOICE_AUDIO_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.audio_dir),
            training_step_ms,
        }
    }
}
