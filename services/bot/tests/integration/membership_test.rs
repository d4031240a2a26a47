use ravon_bot::usecase::membership::MembershipGate;
use ravon_telegram::types::ChatMemberStatus;

use crate::helpers::MockMembership;

#[tokio::test]
async fn should_admit_members_admins_and_creators() {
    for status in [
        ChatMemberStatus::Member,
        ChatMemberStatus::Administrator,
        ChatMemberStatus::Creator,
    ] {
        let gate = MembershipGate {
            membership: MockMembership::with_status(status),
        };
        assert!(gate.is_member(42).await, "status {status:?} must admit");
    }
}

#[tokio::test]
async fn should_deny_everyone_else() {
    for status in [
        ChatMemberStatus::Restricted,
        ChatMemberStatus::Left,
        ChatMemberStatus::Kicked,
        ChatMemberStatus::Unknown,
    ] {
        let gate = MembershipGate {
            membership: MockMembership::with_status(status),
        };
        assert!(!gate.is_member(42).await, "status {status:?} must deny");
    }
}

#[tokio::test]
async fn should_deny_when_the_lookup_fails() {
    let gate = MembershipGate {
        membership: MockMembership::failing(),
    };
    assert!(
        !gate.is_member(42).await,
        "a failed lookup must read as not-a-member"
    );
}
