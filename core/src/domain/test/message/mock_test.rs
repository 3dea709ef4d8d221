use chrono::{TimeZone, Utc};

use crate::domain::{
    channel::{entities::ChannelId, ports::ChannelService},
    common::{CoreError, ErrorKind},
    group::ports::GroupService,
    message::{
        entities::{ImageUpload, Message, MessageId, NewMessage},
        ports::{MessageRepository, MessageService},
    },
    storage::ports::message_image_path,
    test::fixtures::{register, signed_in_service},
    user::{
        entities::{DEFAULT_PROFILE_IMAGE, UpdateUserInput, UserId},
        ports::UserService,
    },
};

fn stored_message(id: &str, sent_at_ms: i64) -> Message {
    Message {
        id: MessageId::from(id),
        sender_id: UserId::from("someone"),
        text: id.to_string(),
        image_url: None,
        sender_username: "someone".to_string(),
        sender_profile_url: DEFAULT_PROFILE_IMAGE.to_string(),
        sent_at: Utc.timestamp_millis_opt(sent_at_ms).unwrap(),
        edited: false,
    }
}

// == Send Message Tests ==

#[tokio::test]
async fn test_send_message_in_new_group() -> Result<(), Box<dyn std::error::Error>> {
    let (service, session) = signed_in_service().await?;
    let group = service.create_group(&session, "Test").await?;
    let channel_id = group.channels[0].clone();

    let sent = service
        .send_message(&session, &channel_id, NewMessage::text("hi"))
        .await?;

    assert_eq!(sent.text, "hi");
    assert_eq!(sent.sender_id, session.user_id);
    assert_eq!(sent.sender_username, "alice");
    assert_eq!(sent.sender_profile_url, DEFAULT_PROFILE_IMAGE);
    assert!(!sent.edited);
    assert!(sent.id.as_str().starts_with("message_"));

    let messages = service.get_messages(&channel_id).await?;
    assert_eq!(messages, vec![sent.clone()]);

    let channel = service.get_channel(&channel_id).await?;
    assert_eq!(channel.message_ids, vec![sent.id]);
    Ok(())
}

#[tokio::test]
async fn test_send_message_same_id_twice_is_idempotent() -> Result<(), Box<dyn std::error::Error>> {
    let (service, session) = signed_in_service().await?;
    let group = service.create_group(&session, "Test").await?;
    let channel_id = group.channels[0].clone();
    let draft = NewMessage {
        id: Some(MessageId::from("client-1")),
        ..NewMessage::text("hello")
    };

    let first = service.send_message(&session, &channel_id, draft.clone()).await?;
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let second = service
        .send_message(&session, &channel_id, NewMessage::text("second"))
        .await?;
    let resent = service
        .send_message(
            &session,
            &channel_id,
            NewMessage {
                text: "hello again".to_string(),
                ..draft
            },
        )
        .await?;

    assert_eq!(resent, first, "A resend returns the stored message unchanged");
    assert_eq!(
        service.get_messages(&channel_id).await?,
        vec![first.clone(), second.clone()],
        "A resend keeps its place, text and send time"
    );
    let channel = service.get_channel(&channel_id).await?;
    assert_eq!(channel.message_ids, vec![first.id, second.id]);
    Ok(())
}

#[tokio::test]
async fn test_send_message_fail_reused_id_of_other_sender() -> Result<(), Box<dyn std::error::Error>> {
    let (service, owner) = signed_in_service().await?;
    let (intruder, _) = register(&service, "eve@example.com", "eve").await?;
    let group = service.create_group(&owner, "Test").await?;
    let channel_id = group.channels[0].clone();
    let sent = service
        .send_message(&owner, &channel_id, NewMessage::text("mine"))
        .await?;

    let error = service
        .send_message(
            &intruder,
            &channel_id,
            NewMessage {
                id: Some(sent.id.clone()),
                ..NewMessage::text("hijacked")
            },
        )
        .await
        .expect_err("another user's message ID must not be reusable");

    assert!(matches!(error, CoreError::NotMessageSender { .. }));
    assert_eq!(error.kind(), ErrorKind::PermissionDenied);
    assert_eq!(service.get_messages(&channel_id).await?, vec![sent]);
    Ok(())
}

#[tokio::test]
async fn test_send_message_rapid_sends_keep_every_message() -> Result<(), Box<dyn std::error::Error>> {
    let (service, session) = signed_in_service().await?;
    let group = service.create_group(&session, "Test").await?;
    let channel_id = group.channels[0].clone();

    // Back-to-back sends land in the same millisecond and share a base ID.
    let mut sent = Vec::new();
    for i in 0..20 {
        let message = service
            .send_message(&session, &channel_id, NewMessage::text(format!("m{i}")))
            .await?;
        sent.push(message);
    }

    let stored = service.get_messages(&channel_id).await?;
    assert_eq!(stored.len(), 20);
    let mut texts: Vec<&str> = stored.iter().map(|m| m.text.as_str()).collect();
    texts.sort();
    let mut expected: Vec<String> = (0..20).map(|i| format!("m{i}")).collect();
    expected.sort();
    assert_eq!(texts, expected);

    let channel = service.get_channel(&channel_id).await?;
    assert_eq!(channel.message_ids.len(), 20);
    for message in &sent {
        assert!(stored.contains(message), "{} was overwritten", message.id);
    }
    Ok(())
}

#[tokio::test]
async fn test_send_message_keeps_sender_snapshot() -> Result<(), Box<dyn std::error::Error>> {
    let (service, session) = signed_in_service().await?;
    let group = service.create_group(&session, "Test").await?;
    let channel_id = group.channels[0].clone();
    service
        .send_message(&session, &channel_id, NewMessage::text("before"))
        .await?;

    service
        .update_profile(
            &session,
            UpdateUserInput {
                username: Some("alicia".to_string()),
                profile_image_url: Some("https://example.com/alicia.png".to_string()),
                ..Default::default()
            },
        )
        .await?;

    let messages = service.get_messages(&channel_id).await?;
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].sender_username, "alice");
    assert_eq!(messages[0].sender_profile_url, DEFAULT_PROFILE_IMAGE);

    let after = service
        .send_message(&session, &channel_id, NewMessage::text("after"))
        .await?;
    assert_eq!(after.sender_username, "alicia");
    Ok(())
}

#[tokio::test]
async fn test_send_message_with_image_uploads_it() -> Result<(), Box<dyn std::error::Error>> {
    let (service, session) = signed_in_service().await?;
    let group = service.create_group(&session, "Test").await?;
    let channel_id = group.channels[0].clone();
    let draft = NewMessage {
        id: Some(MessageId::from("photo")),
        text: String::new(),
        image: Some(ImageUpload {
            bytes: vec![0xFF, 0xD8, 0xFF],
            content_type: "image/jpeg".to_string(),
        }),
    };

    let sent = service.send_message(&session, &channel_id, draft).await?;

    let path = message_image_path("photo");
    assert_eq!(sent.image_url, Some(format!("memory://{path}")));
    let (bytes, content_type) = service.storage_repository.get(&path)?.expect("image stored");
    assert_eq!(bytes, vec![0xFF, 0xD8, 0xFF]);
    assert_eq!(content_type, "image/jpeg");
    Ok(())
}

#[tokio::test]
async fn test_send_message_fail_empty() -> Result<(), Box<dyn std::error::Error>> {
    let (service, session) = signed_in_service().await?;
    let group = service.create_group(&session, "Test").await?;

    let error = service
        .send_message(&session, &group.channels[0], NewMessage::text("  "))
        .await
        .expect_err("send_message should reject an empty message");

    assert!(matches!(error, CoreError::EmptyMessage));
    assert_eq!(error.kind(), ErrorKind::Validation);
    Ok(())
}

#[tokio::test]
async fn test_send_message_fail_unknown_channel() -> Result<(), Box<dyn std::error::Error>> {
    let (service, session) = signed_in_service().await?;

    let error = service
        .send_message(&session, &ChannelId::from("missing"), NewMessage::text("hi"))
        .await
        .expect_err("send_message should fail for an unknown channel");

    assert_eq!(error.kind(), ErrorKind::NotFound);
    Ok(())
}

#[tokio::test]
async fn test_send_message_fail_signed_out() -> Result<(), Box<dyn std::error::Error>> {
    let (service, session) = signed_in_service().await?;
    let group = service.create_group(&session, "Test").await?;
    service.identity_repository.expire(&session)?;

    let error = service
        .send_message(&session, &group.channels[0], NewMessage::text("hi"))
        .await
        .expect_err("send_message should require a live session");

    assert!(matches!(error, CoreError::Unauthenticated));
    Ok(())
}

// == Get Messages Tests ==

#[tokio::test]
async fn test_get_messages_sorted_by_send_time() -> Result<(), Box<dyn std::error::Error>> {
    let (service, session) = signed_in_service().await?;
    let group = service.create_group(&session, "Test").await?;
    let channel_id = group.channels[0].clone();

    for (id, at) in [("late", 3_000), ("early", 1_000), ("middle", 2_000)] {
        service
            .message_repository
            .insert(&channel_id, stored_message(id, at))
            .await?;
    }

    let ids: Vec<String> = service
        .get_messages(&channel_id)
        .await?
        .into_iter()
        .map(|m| m.id.into())
        .collect();

    assert_eq!(ids, vec!["early", "middle", "late"]);
    Ok(())
}

#[tokio::test]
async fn test_get_messages_blank_or_empty_channel() -> Result<(), Box<dyn std::error::Error>> {
    let (service, _) = signed_in_service().await?;

    assert!(service.get_messages(&ChannelId::from("")).await?.is_empty());
    assert!(service.get_messages(&ChannelId::from("quiet")).await?.is_empty());
    Ok(())
}

// == Edit Message Tests ==

#[tokio::test]
async fn test_edit_message_by_sender() -> Result<(), Box<dyn std::error::Error>> {
    let (service, session) = signed_in_service().await?;
    let group = service.create_group(&session, "Test").await?;
    let channel_id = group.channels[0].clone();
    let sent = service
        .send_message(&session, &channel_id, NewMessage::text("helo"))
        .await?;

    let edited = service
        .edit_message(&session, &channel_id, &sent.id, "hello")
        .await?;

    assert_eq!(edited.text, "hello");
    assert!(edited.edited);
    assert_eq!(service.get_messages(&channel_id).await?, vec![edited]);
    Ok(())
}

#[tokio::test]
async fn test_edit_message_fail_not_sender() -> Result<(), Box<dyn std::error::Error>> {
    let (service, owner) = signed_in_service().await?;
    let (intruder, _) = register(&service, "eve@example.com", "eve").await?;
    let group = service.create_group(&owner, "Test").await?;
    let channel_id = group.channels[0].clone();
    let sent = service
        .send_message(&owner, &channel_id, NewMessage::text("mine"))
        .await?;

    let error = service
        .edit_message(&intruder, &channel_id, &sent.id, "yours")
        .await
        .expect_err("only the sender may edit");

    assert_eq!(error.kind(), ErrorKind::PermissionDenied);
    Ok(())
}
