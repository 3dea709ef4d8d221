use crate::{
    application::in_memory_service,
    domain::{
        common::{CoreError, ErrorKind},
        identity::{entities::RegisterRequest, ports::AuthService},
        test::fixtures::{register, signed_in_service},
        user::ports::UserService,
    },
};

fn request(email: &str, password: &str, username: &str) -> RegisterRequest {
    RegisterRequest {
        email: email.to_string(),
        password: password.to_string(),
        username: username.to_string(),
    }
}

// == Register Tests ==

#[tokio::test]
async fn test_register_creates_profile() -> Result<(), Box<dyn std::error::Error>> {
    let service = in_memory_service();

    let (session, user) = service
        .register(request(" dave@example.com ", "hunter22", " dave "))
        .await?;

    assert_eq!(user.id, session.user_id);
    assert_eq!(user.username, "dave");
    assert_eq!(user.email, "dave@example.com");
    assert_eq!(service.current_user(&session).await?, user);
    Ok(())
}

#[tokio::test]
async fn test_register_validation() -> Result<(), Box<dyn std::error::Error>> {
    let service = in_memory_service();

    let bad_email = service
        .register(request("not-an-email", "hunter22", "dave"))
        .await
        .expect_err("email without @ must be rejected");
    assert!(matches!(bad_email, CoreError::InvalidEmail));

    let weak = service
        .register(request("dave@example.com", "123", "dave"))
        .await
        .expect_err("short password must be rejected");
    assert_eq!(weak.to_string(), "Password must be at least 6 characters long");

    let nameless = service
        .register(request("dave@example.com", "hunter22", ""))
        .await
        .expect_err("blank username must be rejected");
    assert_eq!(nameless.kind(), ErrorKind::Validation);
    Ok(())
}

#[tokio::test]
async fn test_register_fail_duplicate_email() -> Result<(), Box<dyn std::error::Error>> {
    let (service, _) = signed_in_service().await?;

    let error = register(&service, "alice@example.com", "alice2")
        .await
        .expect_err("second account on one email must fail");

    assert!(matches!(error, CoreError::EmailAlreadyInUse));
    Ok(())
}

// == Sign In / Out Tests ==

#[tokio::test]
async fn test_sign_in_and_out() -> Result<(), Box<dyn std::error::Error>> {
    let (service, registered) = signed_in_service().await?;

    let session = service
        .sign_in("alice@example.com", "secret-password")
        .await?;
    assert_eq!(session.user_id, registered.user_id);
    assert_ne!(session.token, registered.token);

    service.sign_out(&session).await?;
    let error = service
        .current_user(&session)
        .await
        .expect_err("signed out session must be rejected");
    assert_eq!(error.kind(), ErrorKind::Unauthenticated);

    // Other sessions of the same user are unaffected.
    service.current_user(&registered).await?;
    Ok(())
}

#[tokio::test]
async fn test_sign_in_fail_wrong_password() -> Result<(), Box<dyn std::error::Error>> {
    let (service, _) = signed_in_service().await?;

    let error = service
        .sign_in("alice@example.com", "wrong-password")
        .await
        .expect_err("wrong password must be rejected");

    assert!(matches!(error, CoreError::InvalidCredentials));
    Ok(())
}

// == Session Tests ==

#[tokio::test]
async fn test_refresh_issues_usable_token() -> Result<(), Box<dyn std::error::Error>> {
    let (service, session) = signed_in_service().await?;

    let refreshed = service.refresh(&session).await?;

    assert_eq!(refreshed.user_id, session.user_id);
    assert_ne!(refreshed.token, session.token);
    service.current_user(&refreshed).await?;
    Ok(())
}

#[tokio::test]
async fn test_resolve_session_from_token() -> Result<(), Box<dyn std::error::Error>> {
    let (service, session) = signed_in_service().await?;

    let resolved = service.resolve_session(&session.token).await?;
    assert_eq!(resolved, session);

    let error = service
        .resolve_session("forged-token")
        .await
        .expect_err("unknown token must be rejected");
    assert!(matches!(error, CoreError::Unauthenticated));
    Ok(())
}

#[tokio::test]
async fn test_session_for_other_user_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let (service, alice) = signed_in_service().await?;
    let (bob, _) = register(&service, "bob@example.com", "bob").await?;
    let forged = crate::domain::identity::entities::Session {
        user_id: bob.user_id,
        token: alice.token,
    };

    let error = service
        .current_user(&forged)
        .await
        .expect_err("token and user ID must agree");

    assert_eq!(error.kind(), ErrorKind::Unauthenticated);
    Ok(())
}
