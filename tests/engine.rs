//! Integration tests driving the engine through its public handle.

use anyhow::Result;
use forum_sim::engine::{CommunityCreated, EngineError};
use forum_sim::service;
use pretty_assertions::assert_eq;

#[tokio::test]
async fn a_full_session_through_the_handle() -> Result<()> {
    let forum = service::spawn();

    let alice = forum.register_user("alice").await?;
    assert_eq!(alice.id, 1);
    let bob = forum.register_user("bob").await?;
    assert_eq!(bob.id, 2);

    assert_eq!(
        forum.create_community("golang").await?,
        CommunityCreated::Created
    );
    assert_eq!(
        forum.create_community("golang").await?,
        CommunityCreated::AlreadyExists
    );

    let joined = forum.join_community(alice.id, "golang").await?;
    assert_eq!(joined, "alice");

    let post = forum.create_post(alice.id, "golang", "hello").await?;
    assert_eq!(post.id, 1);
    assert_eq!(post.author, "alice");

    let comment = forum.comment_on_post(post.id, bob.id, "nice").await?;
    assert_eq!(comment.position, 1);
    assert_eq!(comment.author, "bob");

    let author = forum.reply_to_comment(post.id, 1, bob.id, "thanks").await?;
    assert_eq!(author, "bob");

    let left = forum.leave_community(alice.id, "golang").await?;
    assert_eq!(left, "alice");

    Ok(())
}

#[tokio::test]
async fn missing_entities_surface_as_typed_errors() -> Result<()> {
    let forum = service::spawn();
    let alice = forum.register_user("alice").await?;

    assert_eq!(
        forum.join_community(alice.id, "nowhere").await,
        Err(EngineError::CommunityNotFound("nowhere".into()))
    );
    assert_eq!(
        forum.leave_community(alice.id, "nowhere").await,
        Err(EngineError::CommunityNotFound("nowhere".into()))
    );
    assert_eq!(
        forum.comment_on_post(5, alice.id, "into the void").await,
        Err(EngineError::PostNotFound(5))
    );
    assert_eq!(
        forum.send_message(alice.id, 99, "anyone there").await,
        Err(EngineError::UserNotFound(99))
    );
    assert_eq!(
        forum.view_inbox(99).await,
        Err(EngineError::UserNotFound(99))
    );

    Ok(())
}

#[tokio::test]
async fn failed_post_creation_still_consumes_an_id() -> Result<()> {
    let forum = service::spawn();
    let alice = forum.register_user("alice").await?;
    forum.create_community("rust").await?;

    assert_eq!(
        forum.create_post(alice.id, "golang", "first").await,
        Err(EngineError::CommunityNotFound("golang".into()))
    );

    let post = forum.create_post(alice.id, "rust", "second").await?;
    assert_eq!(post.id, 2);

    Ok(())
}

#[tokio::test]
async fn likes_accept_any_post_id() -> Result<()> {
    let forum = service::spawn();
    let alice = forum.register_user("alice").await?;

    assert_eq!(forum.like_post(42, alice.id).await?, "alice");
    assert_eq!(forum.dislike_post(42, 7).await?, "User7");

    Ok(())
}

#[tokio::test]
async fn inbox_preserves_delivery_order() -> Result<()> {
    let forum = service::spawn();
    let alice = forum.register_user("alice").await?;
    let bob = forum.register_user("bob").await?;

    assert_eq!(forum.view_inbox(bob.id).await?, Vec::<String>::new());

    forum.send_message(alice.id, bob.id, "first").await?;
    forum.reply_to_message(alice.id, bob.id, "second").await?;

    assert_eq!(
        forum.view_inbox(bob.id).await?,
        vec![
            "Message from 'alice': first".to_string(),
            "Reply from 'alice': second".to_string(),
        ]
    );

    Ok(())
}

#[tokio::test]
async fn concurrent_registrations_receive_a_dense_id_range() -> Result<()> {
    let forum = service::spawn();

    let mut workers = Vec::new();
    for n in 0..8 {
        let forum = forum.clone();
        workers.push(tokio::spawn(async move {
            forum.register_user(&format!("user-{n}")).await
        }));
    }

    let mut ids = Vec::new();
    for worker in workers {
        ids.push(worker.await??.id);
    }
    ids.sort_unstable();
    assert_eq!(ids, (1..=8).collect::<Vec<u64>>());

    Ok(())
}
