use super::*;

/// Tests recording the review message.
///
/// Expected: Ok with channel and message ids stored
#[tokio::test]
async fn stores_review_message_location() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Registration)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let created = factory::create_pending_registration(db, 1).await?;

    let repo = RegistrationRepository::new(db);
    let updated = repo.set_approval_message(created.id, 10, 20).await?;

    assert_eq!(updated.approval_channel_id, Some(10));
    assert_eq!(updated.approval_message_id, Some(20));

    Ok(())
}

/// Tests recording a review message for a missing record.
///
/// Expected: Err(RecordNotFound)
#[tokio::test]
async fn fails_for_missing_record() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Registration)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = RegistrationRepository::new(db);
    let result = repo.set_approval_message(999, 10, 20).await;

    assert!(matches!(result, Err(sea_orm::DbErr::RecordNotFound(_))));

    Ok(())
}
