use super::*;
use sea_orm::EntityTrait;

/// Tests creating a session and finding it as the active one.
///
/// Expected: Ok with a session whose status is "active" and all counters zeroed
#[tokio::test]
async fn create_makes_session_active() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_session_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TournamentSessionRepository::new(db);
    let session = repo.create().await.unwrap();

    assert_eq!(session.status, "active");
    assert_eq!(session.message_count, 0);
    assert_eq!(session.ticket_count, 0);
    assert_eq!(session.queue_current, 0);
    assert_eq!(session.queue_peak, 0);
    assert!(session.ended_at.is_none());

    let active = repo.get_active().await.unwrap();
    assert_eq!(active.map(|s| s.id), Some(session.id));

    Ok(())
}

/// Tests that a finished session is not returned as active.
///
/// Expected: Ok(None) when only finished sessions exist
#[tokio::test]
async fn finished_session_is_not_active() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_session_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::session::create_finished_session(db).await?;

    let repo = TournamentSessionRepository::new(db);
    assert!(repo.get_active().await.unwrap().is_none());

    Ok(())
}

/// Tests ending an active session.
///
/// Expected: Ok with status "finished" and an end timestamp set
#[tokio::test]
async fn end_marks_session_finished() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_session_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let session = factory::session::create_active_session(db).await?;

    let repo = TournamentSessionRepository::new(db);
    let ended = repo.end(session.id).await.unwrap();

    let ended = ended.expect("session should exist");
    assert_eq!(ended.status, "finished");
    assert!(ended.ended_at.is_some());
    assert!(repo.get_active().await.unwrap().is_none());

    Ok(())
}

/// Tests ending a session id that does not exist.
///
/// Expected: Ok(None)
#[tokio::test]
async fn end_unknown_session_returns_none() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_session_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TournamentSessionRepository::new(db);
    assert!(repo.end(9999).await.unwrap().is_none());

    Ok(())
}

/// Tests the fire-and-forget message and ticket counters.
///
/// Expected: counters reflect the number of increment calls
#[tokio::test]
async fn counters_increment() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_session_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let session = factory::session::create_active_session(db).await?;
    let repo = TournamentSessionRepository::new(db);

    repo.increment_message_count(session.id).await.unwrap();
    repo.increment_message_count(session.id).await.unwrap();
    repo.increment_message_count(session.id).await.unwrap();
    repo.increment_ticket_count(session.id).await.unwrap();

    let updated = entity::prelude::TournamentSession::find_by_id(session.id)
        .one(db)
        .await?
        .unwrap();
    assert_eq!(updated.message_count, 3);
    assert_eq!(updated.ticket_count, 1);

    Ok(())
}
