use super::*;

/// Tests the first closure for a staff member.
///
/// Expected: a new row with a count of 1
#[tokio::test]
async fn first_closure_creates_row() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_session_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let session = factory::session::create_active_session(db).await?;
    let repo = TournamentSessionRepository::new(db);

    repo.record_staff_closure(session.id, "100", "alice")
        .await
        .unwrap();

    let top = repo.top_staff_by_closures(session.id, 10).await.unwrap();
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].staff_id, "100");
    assert_eq!(top[0].staff_name, "alice");
    assert_eq!(top[0].closures, 1);

    Ok(())
}

/// Tests repeated closures by the same staff member.
///
/// Expected: the existing row is incremented and the name refreshed
#[tokio::test]
async fn repeat_closure_increments_and_renames() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_session_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let session = factory::session::create_active_session(db).await?;
    let repo = TournamentSessionRepository::new(db);

    repo.record_staff_closure(session.id, "100", "alice")
        .await
        .unwrap();
    repo.record_staff_closure(session.id, "100", "alice-renamed")
        .await
        .unwrap();

    let top = repo.top_staff_by_closures(session.id, 10).await.unwrap();
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].closures, 2);
    assert_eq!(top[0].staff_name, "alice-renamed");

    Ok(())
}

/// Tests the leaderboard ordering and limit.
///
/// Expected: staff ordered by closures descending, truncated to the limit
#[tokio::test]
async fn top_staff_is_ordered_and_limited() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_session_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let session = factory::session::create_active_session(db).await?;
    let repo = TournamentSessionRepository::new(db);

    for _ in 0..3 {
        repo.record_staff_closure(session.id, "1", "alice")
            .await
            .unwrap();
    }
    repo.record_staff_closure(session.id, "2", "bob")
        .await
        .unwrap();
    for _ in 0..2 {
        repo.record_staff_closure(session.id, "3", "carol")
            .await
            .unwrap();
    }

    let top = repo.top_staff_by_closures(session.id, 2).await.unwrap();
    assert_eq!(top.len(), 2);
    assert_eq!(top[0].staff_id, "1");
    assert_eq!(top[0].closures, 3);
    assert_eq!(top[1].staff_id, "3");
    assert_eq!(top[1].closures, 2);

    Ok(())
}

/// Tests that closures are scoped to their session.
///
/// Expected: a closure in one session does not appear in another
#[tokio::test]
async fn closures_are_scoped_per_session() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_session_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let first = factory::session::create_finished_session(db).await?;
    let second = factory::session::create_active_session(db).await?;
    let repo = TournamentSessionRepository::new(db);

    repo.record_staff_closure(first.id, "100", "alice")
        .await
        .unwrap();

    let top = repo.top_staff_by_closures(second.id, 10).await.unwrap();
    assert!(top.is_empty());

    Ok(())
}
