use super::*;
use entity::prelude::TournamentSession;
use sea_orm::EntityTrait;

/// Tests that queue increments raise the peak high-water mark.
///
/// Expected: peak follows current upward but never downward
#[tokio::test]
async fn peak_tracks_highest_current() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_session_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let session = factory::session::create_active_session(db).await?;
    let repo = TournamentSessionRepository::new(db);

    repo.increment_queue(session.id, 1).await.unwrap();
    repo.increment_queue(session.id, 1).await.unwrap();
    repo.increment_queue(session.id, 1).await.unwrap();
    repo.increment_queue(session.id, -1).await.unwrap();

    let updated = TournamentSession::find_by_id(session.id)
        .one(db)
        .await?
        .unwrap();
    assert_eq!(updated.queue_current, 2);
    assert_eq!(updated.queue_peak, 3);

    Ok(())
}

/// Tests that the current queue size never goes negative.
///
/// Expected: current clamped at 0 after excess decrements
#[tokio::test]
async fn current_is_clamped_at_zero() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_session_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let session = factory::session::create_active_session(db).await?;
    let repo = TournamentSessionRepository::new(db);

    repo.increment_queue(session.id, 1).await.unwrap();
    repo.increment_queue(session.id, -1).await.unwrap();
    repo.increment_queue(session.id, -1).await.unwrap();

    let updated = TournamentSession::find_by_id(session.id)
        .one(db)
        .await?
        .unwrap();
    assert_eq!(updated.queue_current, 0);
    assert_eq!(updated.queue_peak, 1);

    Ok(())
}

/// Tests that incrementing an unknown session id is a no-op.
///
/// Expected: Ok without error
#[tokio::test]
async fn unknown_session_is_a_noop() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_session_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TournamentSessionRepository::new(db);
    assert!(repo.increment_queue(9999, 1).await.is_ok());

    Ok(())
}
