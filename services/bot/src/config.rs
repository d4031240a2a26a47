/// Bot gateway configuration loaded from environment variables.
#[derive(Debug)]
pub struct BotConfig {
    /// Bot API token issued by BotFather.
    pub telegram_bot_token: String,
    /// Numeric chat id of the gated channel (e.g. "-1001234567890").
    pub channel_id: i64,
    /// Public username of the gated channel, with or without the leading `@`.
    pub channel_username: String,
    /// Base URL of the auth service (e.g. "http://auth:3112").
    pub auth_url: String,
    /// URL of the web client that login codes are entered into.
    pub web_app_url: String,
    /// TCP port to listen on (default 3114). Env var: `BOT_PORT`.
    pub bot_port: u16,
}

impl BotConfig {
    pub fn from_env() -> Self {
        Self {
            telegram_bot_token: std::env::var("TELEGRAM_BOT_TOKEN").expect("TELEGRAM_BOT_TOKEN"),
            channel_id: std::env::var("CHANNEL_ID")
                .expect("CHANNEL_ID")
                .parse()
                .expect("CHANNEL_ID must be a numeric chat id"),
            channel_username: std::env::var("CHANNEL_USERNAME").expect("CHANNEL_USERNAME"),
            auth_url: std::env::var("AUTH_URL").expect("AUTH_URL"),
            web_app_url: std::env::var("WEB_APP_URL").expect("WEB_APP_URL"),
            bot_port: std::env::var("BOT_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3114),
        }
    }
}
