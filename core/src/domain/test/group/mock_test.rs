use crate::domain::{
    channel::entities::{ChannelKind, DEFAULT_CHANNEL_NAME},
    common::{CoreError, ErrorKind},
    group::{
        entities::GroupId,
        ports::{GroupRepository, GroupService},
    },
    test::fixtures::{register, signed_in_service},
    user::ports::{UserRepository, UserService},
};

// == Create Group Tests ==

#[tokio::test]
async fn test_create_group_success() -> Result<(), Box<dyn std::error::Error>> {
    let (service, session) = signed_in_service().await?;

    let group = service.create_group(&session, "Test").await?;

    assert_eq!(group.name, "Test");
    assert_eq!(group.owner_id, session.user_id);
    assert_eq!(group.members, vec![session.user_id.clone()]);
    assert_eq!(group.tag, "0001");
    assert_eq!(group.channels.len(), 1, "Expected a single default channel");
    assert_eq!(group.text_channels, group.channels);
    assert!(group.voice_channels.is_empty());

    let channels = service.list_channels(&group.id).await?;
    assert_eq!(channels.len(), 1);
    assert_eq!(channels[0].name, DEFAULT_CHANNEL_NAME);
    assert_eq!(channels[0].kind, ChannelKind::Text);
    assert_eq!(channels[0].group_id, group.id);

    let profile = service.current_user(&session).await?;
    assert_eq!(profile.groups, vec![group.id.clone()]);

    Ok(())
}

#[tokio::test]
async fn test_create_group_trims_name() -> Result<(), Box<dyn std::error::Error>> {
    let (service, session) = signed_in_service().await?;

    let group = service.create_group(&session, "  Book Club  ").await?;

    assert_eq!(group.name, "Book Club");
    Ok(())
}

#[tokio::test]
async fn test_create_group_fail_empty_name() -> Result<(), Box<dyn std::error::Error>> {
    let (service, session) = signed_in_service().await?;

    let error = service
        .create_group(&session, "   ")
        .await
        .expect_err("create_group should reject a blank name");

    assert!(matches!(error, CoreError::InvalidGroupName));
    assert_eq!(error.kind(), ErrorKind::Validation);
    assert_eq!(error.to_string(), "Group name cannot be empty");
    Ok(())
}

#[tokio::test]
async fn test_create_group_tags_count_per_name() -> Result<(), Box<dyn std::error::Error>> {
    let (service, session) = signed_in_service().await?;

    let first = service.create_group(&session, "Test").await?;
    let second = service.create_group(&session, "Test").await?;
    let other = service.create_group(&session, "Other").await?;

    assert_eq!(first.tag, "0001");
    assert_eq!(second.tag, "0002");
    assert_eq!(other.tag, "0001");
    assert_ne!(first.id, second.id);
    Ok(())
}

#[tokio::test]
async fn test_create_group_fail_unauthenticated() -> Result<(), Box<dyn std::error::Error>> {
    let (service, session) = signed_in_service().await?;
    service.identity_repository.expire(&session)?;

    let error = service
        .create_group(&session, "Test")
        .await
        .expect_err("create_group should require a live session");

    assert_eq!(error.kind(), ErrorKind::Unauthenticated);
    Ok(())
}

#[tokio::test]
async fn test_create_group_survives_profile_update_failure() -> Result<(), Box<dyn std::error::Error>>
{
    let (service, session) = signed_in_service().await?;
    service
        .user_repository
        .fail_group_updates(CoreError::NetworkUnavailable {
            msg: "connection reset".to_string(),
        })?;

    let group = service.create_group(&session, "Test").await?;

    let stored = service.get_group(&group.id).await?;
    assert_eq!(stored.id, group.id);
    let profile = service
        .user_repository
        .find_by_id(&session.user_id)
        .await?
        .expect("profile exists");
    assert!(profile.groups.is_empty(), "Profile update was expected to fail");
    Ok(())
}

// == Get Group Tests ==

#[tokio::test]
async fn test_get_group_fail_not_found() -> Result<(), Box<dyn std::error::Error>> {
    let (service, _) = signed_in_service().await?;

    let error = service
        .get_group(&GroupId::from("missing"))
        .await
        .expect_err("get_group should fail for an unknown ID");

    assert_eq!(error.kind(), ErrorKind::NotFound);
    assert_eq!(error.to_string(), "Group with id missing not found");
    Ok(())
}

// == Join Group Tests ==

#[tokio::test]
async fn test_join_group_is_idempotent() -> Result<(), Box<dyn std::error::Error>> {
    let (service, owner) = signed_in_service().await?;
    let (guest, _) = register(&service, "bob@example.com", "bob").await?;
    let group = service.create_group(&owner, "Test").await?;

    service.join_group(&guest, &group.id).await?;
    let joined = service.join_group(&guest, &group.id).await?;

    assert_eq!(joined.members, vec![owner.user_id.clone(), guest.user_id.clone()]);
    let profile = service.current_user(&guest).await?;
    assert_eq!(profile.groups, vec![group.id.clone()]);
    Ok(())
}

#[tokio::test]
async fn test_join_group_fail_not_found() -> Result<(), Box<dyn std::error::Error>> {
    let (service, session) = signed_in_service().await?;

    let error = service
        .join_group(&session, &GroupId::from("missing"))
        .await
        .expect_err("join_group should fail for an unknown group");

    assert!(matches!(error, CoreError::GroupNotFound { .. }));
    Ok(())
}

// == List Channels Tests ==

#[tokio::test]
async fn test_list_channels_blank_id_is_empty() -> Result<(), Box<dyn std::error::Error>> {
    let (service, _) = signed_in_service().await?;

    let channels = service.list_channels(&GroupId::from("")).await?;

    assert!(channels.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_list_channels_skips_dangling_ids() -> Result<(), Box<dyn std::error::Error>> {
    let (service, session) = signed_in_service().await?;
    let group = service.create_group(&session, "Test").await?;
    service
        .group_repository
        .add_channel(&group.id, &"ghost".into(), ChannelKind::Voice)
        .await?;

    let channels = service.list_channels(&group.id).await?;

    assert_eq!(channels.len(), 1);
    assert_eq!(channels[0].name, DEFAULT_CHANNEL_NAME);
    Ok(())
}
