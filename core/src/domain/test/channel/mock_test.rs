use crate::domain::{
    channel::{
        entities::{ChannelId, ChannelKind},
        ports::{ChannelRepository, ChannelService},
    },
    common::{CoreError, ErrorKind},
    group::{entities::GroupId, ports::GroupService},
    message::entities::MessageId,
    test::fixtures::signed_in_service,
};

// == Create Channel Tests ==

#[tokio::test]
async fn test_create_channel_success() -> Result<(), Box<dyn std::error::Error>> {
    let (service, session) = signed_in_service().await?;
    let group = service.create_group(&session, "Test").await?;

    let voice = service
        .create_channel(&session, &group.id, "Lounge", ChannelKind::Voice)
        .await?;

    assert_eq!(voice.name, "Lounge");
    assert_eq!(voice.kind, ChannelKind::Voice);
    assert_eq!(voice.group_id, group.id);
    assert!(voice.message_ids.is_empty());

    let group = service.get_group(&group.id).await?;
    assert!(group.channels.contains(&voice.id));
    assert!(group.voice_channels.contains(&voice.id));
    assert!(!group.text_channels.contains(&voice.id));

    let fetched = service.get_channel(&voice.id).await?;
    assert_eq!(fetched, voice);
    Ok(())
}

#[tokio::test]
async fn test_create_channel_keeps_kind_lists_partitioned() -> Result<(), Box<dyn std::error::Error>>
{
    let (service, session) = signed_in_service().await?;
    let group = service.create_group(&session, "Test").await?;

    service
        .create_channel(&session, &group.id, "random", ChannelKind::Text)
        .await?;
    service
        .create_channel(&session, &group.id, "voice", ChannelKind::Voice)
        .await?;

    let group = service.get_group(&group.id).await?;
    assert_eq!(group.channels.len(), 3);
    assert_eq!(
        group.text_channels.len() + group.voice_channels.len(),
        group.channels.len()
    );
    for id in &group.channels {
        let in_text = group.text_channels.contains(id);
        let in_voice = group.voice_channels.contains(id);
        assert!(in_text ^ in_voice, "Channel {id} must be in exactly one kind list");
    }
    Ok(())
}

#[tokio::test]
async fn test_create_channel_concurrent_calls_both_persist() -> Result<(), Box<dyn std::error::Error>>
{
    let (service, session) = signed_in_service().await?;
    let group = service.create_group(&session, "Test").await?;

    let (first, second) = tokio::join!(
        service.create_channel(&session, &group.id, "one", ChannelKind::Text),
        service.create_channel(&session, &group.id, "two", ChannelKind::Voice),
    );
    let (first, second) = (first?, second?);

    let group = service.get_group(&group.id).await?;
    assert!(group.channels.contains(&first.id));
    assert!(group.channels.contains(&second.id));
    assert!(group.text_channels.contains(&first.id));
    assert!(group.voice_channels.contains(&second.id));
    Ok(())
}

#[tokio::test]
async fn test_create_channel_fail_empty_name() -> Result<(), Box<dyn std::error::Error>> {
    let (service, session) = signed_in_service().await?;
    let group = service.create_group(&session, "Test").await?;

    let error = service
        .create_channel(&session, &group.id, "", ChannelKind::Text)
        .await
        .expect_err("create_channel should reject a blank name");

    assert!(matches!(error, CoreError::InvalidChannelName));
    assert_eq!(error.kind(), ErrorKind::Validation);
    Ok(())
}

#[tokio::test]
async fn test_create_channel_fail_unknown_group() -> Result<(), Box<dyn std::error::Error>> {
    let (service, session) = signed_in_service().await?;

    let error = service
        .create_channel(&session, &GroupId::from("missing"), "general", ChannelKind::Text)
        .await
        .expect_err("create_channel should fail for an unknown group");

    assert_eq!(error.kind(), ErrorKind::NotFound);
    Ok(())
}

// == Channel Repository Tests ==

#[tokio::test]
async fn test_append_message_is_idempotent() -> Result<(), Box<dyn std::error::Error>> {
    let (service, session) = signed_in_service().await?;
    let group = service.create_group(&session, "Test").await?;
    let channel_id = group.channels[0].clone();
    let message_id = MessageId::from("m1");

    assert!(service.channel_repository.append_message(&channel_id, &message_id).await?);
    assert!(!service.channel_repository.append_message(&channel_id, &message_id).await?);

    let channel = service.get_channel(&channel_id).await?;
    assert_eq!(channel.message_ids, vec![message_id]);
    Ok(())
}

#[tokio::test]
async fn test_get_channel_fail_not_found() -> Result<(), Box<dyn std::error::Error>> {
    let (service, _) = signed_in_service().await?;

    let error = service
        .get_channel(&ChannelId::from("missing"))
        .await
        .expect_err("get_channel should fail for an unknown ID");

    assert_eq!(error.to_string(), "Channel with id missing not found");
    Ok(())
}
