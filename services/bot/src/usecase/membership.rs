use ravon_telegram::types::ChatMemberStatus;

use crate::domain::repository::MembershipPort;

// ── MembershipGate ────────────────────────────────────────────────────────────

/// Decides whether an account may receive login codes.
pub struct MembershipGate<M: MembershipPort> {
    pub membership: M,
}

impl<M: MembershipPort> MembershipGate<M> {
    /// Fail-closed: only a positive, well-formed answer from the port grants
    /// access. A lookup failure logs and denies; the caller cannot tell it
    /// from an ordinary non-member.
    pub async fn is_member(&self, user_id: i64) -> bool {
        match self.membership.chat_member_status(user_id).await {
            Ok(
                ChatMemberStatus::Creator
                | ChatMemberStatus::Administrator
                | ChatMemberStatus::Member,
            ) => true,
            Ok(status) => {
                tracing::debug!(user_id, ?status, "not a channel member");
                false
            }
            Err(e) => {
                tracing::warn!(user_id, error = %e, "membership lookup failed, denying");
                false
            }
        }
    }
}
