use super::*;

/// Tests listing pending registrations for reconciliation.
///
/// Verifies that decided records are excluded and pending ones from every guild are
/// returned oldest first.
///
/// Expected: Ok with the two pending records in creation order
#[tokio::test]
async fn returns_only_pending_records() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Registration)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let first = factory::create_pending_registration(db, 1).await?;
    RegistrationFactory::new(db, 1)
        .status("approved")
        .build()
        .await?;
    RegistrationFactory::new(db, 1)
        .status("rejected")
        .build()
        .await?;
    let second = factory::create_pending_registration(db, 2).await?;

    let repo = RegistrationRepository::new(db);
    let pending = repo.get_pending().await?;

    let ids: Vec<i32> = pending.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![first.id, second.id]);

    Ok(())
}
