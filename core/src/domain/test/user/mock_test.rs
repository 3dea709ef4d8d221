use crate::{
    application::in_memory_service,
    domain::{
        common::{CoreError, ErrorKind},
        group::ports::GroupService,
        identity::ports::IdentityRepository,
        test::fixtures::{register, signed_in_service},
        user::{
            entities::{DEFAULT_PROFILE_IMAGE, DEFAULT_STATUS, UpdateUserInput, UserId},
            ports::UserService,
        },
    },
};

// == Current User Tests ==

#[tokio::test]
async fn test_current_user_after_register() -> Result<(), Box<dyn std::error::Error>> {
    let (service, session) = signed_in_service().await?;

    let user = service.current_user(&session).await?;

    assert_eq!(user.id, session.user_id);
    assert_eq!(user.username, "alice");
    assert_eq!(user.email, "alice@example.com");
    assert_eq!(user.profile_image_url, DEFAULT_PROFILE_IMAGE);
    assert_eq!(user.status, DEFAULT_STATUS);
    assert!(user.groups.is_empty());
    assert!(user.friends.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_current_user_creates_missing_profile() -> Result<(), Box<dyn std::error::Error>> {
    let service = in_memory_service();
    let session = service
        .identity_repository
        .register("carol@example.com", "secret-password", "carol")
        .await?;

    let user = service.current_user(&session).await?;

    assert_eq!(user.username, "carol");
    assert_eq!(service.get_user(&session.user_id).await?, user);
    Ok(())
}

#[tokio::test]
async fn test_get_user_fail_not_found() -> Result<(), Box<dyn std::error::Error>> {
    let (service, _) = signed_in_service().await?;

    let error = service
        .get_user(&UserId::from("nobody"))
        .await
        .expect_err("get_user should fail for an unknown ID");

    assert_eq!(error.kind(), ErrorKind::NotFound);
    Ok(())
}

// == Update Profile Tests ==

#[tokio::test]
async fn test_update_profile_merges_fields() -> Result<(), Box<dyn std::error::Error>> {
    let (service, session) = signed_in_service().await?;

    let user = service
        .update_profile(
            &session,
            UpdateUserInput {
                age: Some(29),
                personality: Some("night owl".to_string()),
                ..Default::default()
            },
        )
        .await?;

    assert_eq!(user.username, "alice", "Untouched fields keep their value");
    assert_eq!(user.age, Some(29));
    assert_eq!(user.personality.as_deref(), Some("night owl"));
    Ok(())
}

#[tokio::test]
async fn test_update_profile_fail_blank_username() -> Result<(), Box<dyn std::error::Error>> {
    let (service, session) = signed_in_service().await?;

    let error = service
        .update_profile(
            &session,
            UpdateUserInput {
                username: Some(" ".to_string()),
                ..Default::default()
            },
        )
        .await
        .expect_err("update_profile should reject a blank username");

    assert!(matches!(error, CoreError::InvalidUsername));
    Ok(())
}

#[tokio::test]
async fn test_update_status() -> Result<(), Box<dyn std::error::Error>> {
    let (service, session) = signed_in_service().await?;

    let user = service.update_status(&session, "busy").await?;
    assert_eq!(user.status, "busy");

    let error = service
        .update_status(&session, "sleeping")
        .await
        .expect_err("update_status should reject unknown statuses");
    assert_eq!(error.to_string(), "Unknown status 'sleeping'");
    Ok(())
}

// == List Groups Tests ==

#[tokio::test]
async fn test_list_groups_of_member() -> Result<(), Box<dyn std::error::Error>> {
    let (service, owner) = signed_in_service().await?;
    let (guest, _) = register(&service, "bob@example.com", "bob").await?;
    let first = service.create_group(&owner, "First").await?;
    let second = service.create_group(&owner, "Second").await?;
    service.join_group(&guest, &second.id).await?;

    let owned: Vec<_> = service
        .list_groups(&owner)
        .await?
        .into_iter()
        .map(|g| g.id)
        .collect();
    let joined: Vec<_> = service
        .list_groups(&guest)
        .await?
        .into_iter()
        .map(|g| g.id)
        .collect();

    assert_eq!(owned, vec![first.id, second.id.clone()]);
    assert_eq!(joined, vec![second.id]);
    Ok(())
}
