use ravon_telegram::client::Client;

use crate::infra::http::HttpCodeIssuer;
use crate::infra::telegram::{TelegramMembershipPort, TelegramReplyPort};
use crate::usecase::handle_update::HandleUpdateUseCase;
use crate::usecase::membership::MembershipGate;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub telegram: Client,
    pub issuer: HttpCodeIssuer,
    pub channel_id: i64,
    pub channel_username: String,
    pub web_app_url: String,
}

impl AppState {
    pub fn handle_update(
        &self,
    ) -> HandleUpdateUseCase<TelegramMembershipPort, HttpCodeIssuer, TelegramReplyPort> {
        HandleUpdateUseCase {
            gate: MembershipGate {
                membership: TelegramMembershipPort {
                    client: self.telegram.clone(),
                    channel_id: self.channel_id,
                },
            },
            issuer: self.issuer.clone(),
            replies: TelegramReplyPort {
                client: self.telegram.clone(),
            },
            channel_username: self.channel_username.clone(),
            web_app_url: self.web_app_url.clone(),
        }
    }
}
