use ravon_auth::error::AuthServiceError;
use ravon_auth::usecase::code::{IssueCodeUseCase, VerifyCodeUseCase};

use crate::helpers::{MockCodeStore, expired_code, identity};

#[tokio::test]
async fn should_issue_six_digit_codes() {
    let store = MockCodeStore::new();
    let uc = IssueCodeUseCase {
        codes: store.clone(),
    };

    for owner in 0..20 {
        let issued = uc.execute(identity(owner, "Aziz")).await.unwrap();
        assert_eq!(issued.code.len(), 6, "code {} is not 6 digits", issued.code);
        assert!(
            issued.code.chars().all(|c| c.is_ascii_digit()),
            "code {} has non-digits",
            issued.code
        );
        let value: u32 = issued.code.parse().unwrap();
        assert!(
            (100_000..=999_999).contains(&value),
            "code {value} out of range"
        );
    }
}

#[tokio::test]
async fn should_store_the_identity_snapshot_at_issuance() {
    let store = MockCodeStore::new();
    let rows = store.rows_handle();
    let uc = IssueCodeUseCase {
        codes: store.clone(),
    };

    let mut who = identity(42, "Aziz");
    who.last_name = Some("Karimov".to_owned());
    who.username = Some("aziz".to_owned());
    let issued = uc.execute(who).await.unwrap();

    let rows = rows.lock().unwrap();
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.code, issued.code);
    assert_eq!(row.telegram_user_id, 42);
    assert_eq!(row.first_name, "Aziz");
    assert_eq!(row.last_name.as_deref(), Some("Karimov"));
    assert_eq!(row.username.as_deref(), Some("aziz"));
    assert!(row.used_at.is_none(), "new code must start unused");
    assert_eq!(
        (row.expires_at - row.created_at).num_seconds(),
        300,
        "the lifetime is fixed at five minutes"
    );
    assert_eq!(issued.expires_at, row.expires_at);
}

#[tokio::test]
async fn should_retire_previous_codes_on_reissue() {
    let store = MockCodeStore::new();
    let issue = IssueCodeUseCase {
        codes: store.clone(),
    };
    let verify = VerifyCodeUseCase {
        codes: store.clone(),
    };

    let first = issue.execute(identity(42, "Aziz")).await.unwrap();
    let second = issue.execute(identity(42, "Aziz")).await.unwrap();
    assert_eq!(store.row_count(), 1, "reissue must not accumulate rows");

    // The first code died with the reissue, whether or not it collides
    // with the second by value.
    if first.code != second.code {
        let result = verify.execute(&first.code).await;
        assert!(
            matches!(result, Err(AuthServiceError::InvalidCode)),
            "expected InvalidCode for the retired code, got {result:?}"
        );
    }

    let claimed = verify.execute(&second.code).await.unwrap();
    assert_eq!(claimed.telegram_user_id, 42);
}

#[tokio::test]
async fn should_claim_a_code_only_once() {
    let store = MockCodeStore::new();
    let issue = IssueCodeUseCase {
        codes: store.clone(),
    };
    let verify = VerifyCodeUseCase {
        codes: store.clone(),
    };

    let issued = issue.execute(identity(42, "Aziz")).await.unwrap();

    let claimed = verify.execute(&issued.code).await.unwrap();
    assert_eq!(claimed.telegram_user_id, 42);
    assert_eq!(claimed.first_name, "Aziz");

    let again = verify.execute(&issued.code).await;
    assert!(
        matches!(again, Err(AuthServiceError::InvalidCode)),
        "expected InvalidCode on second claim, got {again:?}"
    );
}

#[tokio::test]
async fn should_reject_codes_past_their_expiry() {
    // A store whose purge fails keeps the row around; the claim predicate
    // alone must refuse it.
    let store = MockCodeStore::failing_purges();
    store.seed(expired_code(42, "123456"));
    let verify = VerifyCodeUseCase { codes: store };

    let result = verify.execute("123456").await;
    assert!(
        matches!(result, Err(AuthServiceError::InvalidCode)),
        "expected InvalidCode for the expired code, got {result:?}"
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn should_resolve_concurrent_claims_to_one_winner() {
    let store = MockCodeStore::new();
    let issue = IssueCodeUseCase {
        codes: store.clone(),
    };
    let issued = issue.execute(identity(42, "Aziz")).await.unwrap();

    let mut tasks = Vec::new();
    for _ in 0..2 {
        let verify = VerifyCodeUseCase {
            codes: store.clone(),
        };
        let code = issued.code.clone();
        tasks.push(tokio::spawn(async move { verify.execute(&code).await }));
    }

    let mut winners = 0;
    for task in tasks {
        match task.await.unwrap() {
            Ok(claimed) => {
                winners += 1;
                assert_eq!(claimed.telegram_user_id, 42);
            }
            Err(AuthServiceError::InvalidCode) => {}
            Err(other) => panic!("unexpected error under concurrent claim: {other:?}"),
        }
    }
    assert_eq!(winners, 1, "exactly one concurrent claim may succeed");
}

#[tokio::test]
async fn should_not_leak_a_code_when_insert_fails() {
    let store = MockCodeStore::failing_inserts();
    let uc = IssueCodeUseCase {
        codes: store.clone(),
    };

    let result = uc.execute(identity(42, "Aziz")).await;
    assert!(
        matches!(result, Err(AuthServiceError::Internal(_))),
        "expected Internal on store failure, got {result:?}"
    );
    assert_eq!(store.row_count(), 0, "no half-issued code may remain");
}

#[tokio::test]
async fn should_verify_when_the_purge_sweep_fails() {
    let store = MockCodeStore::failing_purges();
    let issue = IssueCodeUseCase {
        codes: store.clone(),
    };
    let verify = VerifyCodeUseCase {
        codes: store.clone(),
    };

    let issued = issue.execute(identity(42, "Aziz")).await.unwrap();
    let claimed = verify.execute(&issued.code).await.unwrap();
    assert_eq!(claimed.telegram_user_id, 42);
}

#[tokio::test]
async fn should_report_invalid_for_never_issued_codes() {
    let store = MockCodeStore::new();
    let verify = VerifyCodeUseCase { codes: store };

    let result = verify.execute("000000").await;
    assert!(
        matches!(result, Err(AuthServiceError::InvalidCode)),
        "expected InvalidCode for an unknown code, got {result:?}"
    );
}
