use super::*;

/// Tests approving a pending registration.
///
/// Expected: Ok(Some) with approved status, moderator and decision time
#[tokio::test]
async fn approves_pending_registration() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Registration)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let created = factory::create_pending_registration(db, 1).await?;

    let repo = RegistrationRepository::new(db);
    let decided = repo
        .decide(DecideRegistrationParam {
            id: created.id,
            status: RegistrationStatus::Approved,
            moderator_id: 77,
        })
        .await?
        .unwrap();

    assert_eq!(decided.status, RegistrationStatus::Approved);
    assert_eq!(decided.moderator_id, Some(77));
    assert!(decided.decided_at.is_some());

    Ok(())
}

/// Tests that a terminal record cannot be decided again.
///
/// Verifies that rejecting an approved registration leaves it approved.
///
/// Expected: Ok(None) and the original decision intact
#[tokio::test]
async fn leaves_terminal_record_untouched() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Registration)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let created = factory::create_pending_registration(db, 1).await?;

    let repo = RegistrationRepository::new(db);
    repo.decide(DecideRegistrationParam {
        id: created.id,
        status: RegistrationStatus::Approved,
        moderator_id: 1,
    })
    .await?;

    let second = repo
        .decide(DecideRegistrationParam {
            id: created.id,
            status: RegistrationStatus::Rejected,
            moderator_id: 2,
        })
        .await?;

    assert!(second.is_none());
    let stored = repo.get_by_id(created.id).await?.unwrap();
    assert_eq!(stored.status, RegistrationStatus::Approved);
    assert_eq!(stored.moderator_id, Some(1));

    Ok(())
}

/// Tests deciding a record that does not exist.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_missing_record() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Registration)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = RegistrationRepository::new(db);
    let result = repo
        .decide(DecideRegistrationParam {
            id: 12345,
            status: RegistrationStatus::Rejected,
            moderator_id: 1,
        })
        .await?;

    assert!(result.is_none());

    Ok(())
}
