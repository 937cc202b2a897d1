use lentera_accounts::domain::types::CodePurpose;
use lentera_accounts::password::verify_password;
use lentera_accounts::usecase::verify::{ResetPasswordInput, ResetPasswordUseCase};

use crate::helpers::*;

fn usecase(
    users: &MockUserRepo,
    codes: &MockCodeRepo,
    activity: &MockActivityLog,
) -> ResetPasswordUseCase<MockUserRepo, MockCodeRepo, MockActivityLog> {
    ResetPasswordUseCase {
        users: users.clone(),
        codes: codes.clone(),
        activity: activity.clone(),
    }
}

fn input(email: &str, code: &str, password: &str) -> ResetPasswordInput {
    ResetPasswordInput {
        email: email.to_owned(),
        code: code.to_owned(),
        password: password.to_owned(),
        client: client(),
    }
}

#[tokio::test]
async fn should_reset_password_and_consume_code() {
    let user = test_user("reset@example.com");
    let user_id = user.id;
    let users = MockUserRepo::with_users(vec![user]);
    let codes = MockCodeRepo::with_codes(
        &users,
        vec![live_code(user_id, CodePurpose::PasswordReset, "123456")],
    );
    let activity = MockActivityLog::default();

    usecase(&users, &codes, &activity)
        .execute(input("Reset@Example.com", "123456", "brand new password"))
        .await
        .unwrap();

    let users = users.users_handle();
    let users = users.lock().unwrap();
    assert!(verify_password("brand new password", &users[0].password_hash));
    assert!(!verify_password("original password", &users[0].password_hash));

    assert!(codes.codes_handle().lock().unwrap()[0].used_at.is_some());

    let entries = activity.entries_handle();
    let entries = entries.lock().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].action, "RESET_PASSWORD");
}

#[tokio::test]
async fn should_consume_code_at_most_once() {
    let user = test_user("replay@example.com");
    let user_id = user.id;
    let users = MockUserRepo::with_users(vec![user]);
    let codes = MockCodeRepo::with_codes(
        &users,
        vec![live_code(user_id, CodePurpose::PasswordReset, "123456")],
    );
    let activity = MockActivityLog::default();
    let usecase = usecase(&users, &codes, &activity);

    usecase
        .execute(input("replay@example.com", "123456", "first new password"))
        .await
        .unwrap();

    // The same code is dead after the first successful reset.
    let err = usecase
        .execute(input("replay@example.com", "123456", "second new password"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "INVALID_OR_USED_CODE");

    let users = users.users_handle();
    let users = users.lock().unwrap();
    assert!(verify_password("first new password", &users[0].password_hash));
}

#[tokio::test]
async fn should_reject_unknown_email_with_generic_error() {
    let users = MockUserRepo::default();
    let codes = MockCodeRepo::sharing_users(&users);
    let activity = MockActivityLog::default();

    let err = usecase(&users, &codes, &activity)
        .execute(input("nobody@example.com", "123456", "whatever password"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), "INVALID_CREDENTIAL");
}

#[tokio::test]
async fn should_reject_expired_reset_code() {
    let user = test_user("late@example.com");
    let user_id = user.id;
    let users = MockUserRepo::with_users(vec![user]);
    let codes = MockCodeRepo::with_codes(
        &users,
        vec![expired_code(user_id, CodePurpose::PasswordReset, "123456")],
    );
    let activity = MockActivityLog::default();

    let err = usecase(&users, &codes, &activity)
        .execute(input("late@example.com", "123456", "too late password"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), "EXPIRED_CODE");
    let users = users.users_handle();
    let users = users.lock().unwrap();
    assert!(verify_password("original password", &users[0].password_hash));
}

#[tokio::test]
async fn should_not_accept_email_verification_code_for_reset() {
    let user = test_user("crossed@example.com");
    let user_id = user.id;
    let users = MockUserRepo::with_users(vec![user]);
    let codes = MockCodeRepo::with_codes(
        &users,
        vec![live_code(user_id, CodePurpose::EmailVerification, "123456")],
    );
    let activity = MockActivityLog::default();

    let err = usecase(&users, &codes, &activity)
        .execute(input("crossed@example.com", "123456", "sneaky password"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), "INVALID_OR_USED_CODE");
}
