use super::*;

/// Tests the record scan used when the member index has no entry.
///
/// Verifies that the newest approved registration wins and pending or rejected records
/// with the same assigned id are ignored.
///
/// Expected: Ok(Some) with the newest approved record's user
#[tokio::test]
async fn returns_newest_approved_record() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Registration)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    RegistrationFactory::new(db, 1)
        .user_id(100)
        .assigned_id("777")
        .status("approved")
        .created_at(now - Duration::days(10))
        .build()
        .await?;
    RegistrationFactory::new(db, 1)
        .user_id(200)
        .assigned_id("777")
        .status("approved")
        .created_at(now - Duration::days(1))
        .build()
        .await?;
    RegistrationFactory::new(db, 1)
        .user_id(300)
        .assigned_id("777")
        .status("rejected")
        .created_at(now)
        .build()
        .await?;

    let repo = RegistrationRepository::new(db);
    let found = repo
        .find_latest_approved_by_assigned_id(1, "777")
        .await?
        .unwrap();

    assert_eq!(found.user_id, 200);

    Ok(())
}

/// Tests the scan for an assigned id with no approved record.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_without_approved_record() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Registration)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    RegistrationFactory::new(db, 1)
        .assigned_id("555")
        .build()
        .await?;

    let repo = RegistrationRepository::new(db);

    assert!(repo
        .find_latest_approved_by_assigned_id(1, "555")
        .await?
        .is_none());
    assert!(repo
        .find_latest_approved_by_assigned_id(2, "555")
        .await?
        .is_none());

    Ok(())
}
