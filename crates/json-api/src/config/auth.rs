//! Auth Config

use clap::Args;

/// Bearer token validation settings. Tokens are issued elsewhere.
#[derive(Debug, Args)]
pub struct AuthConfig {
    /// Shared HS256 signing secret
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: String,

    /// Expected `iss` claim
    #[arg(long, env = "JWT_ISSUER", default_value = "tamweely-hr")]
    pub jwt_issuer: String,

    /// Expected `aud` claim
    #[arg(long, env = "JWT_AUDIENCE", default_value = "tamweely-hr-clients")]
    pub jwt_audience: String,
}
