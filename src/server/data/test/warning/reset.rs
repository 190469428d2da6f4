use super::*;

/// Tests resetting a member's counter after a ban.
///
/// Expected: Ok with count 0 and the next warning starting over at 1
#[tokio::test]
async fn resets_counter_to_zero() -> Result<(), AppError> {
    let test = TestBuilder::new().with_discipline_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_member_warning(db, 1, 2, 3).await?;

    let repo = WarningRepository::new(db);
    repo.reset(1, 2).await?;

    assert_eq!(repo.get_count(1, 2).await?, 0);
    assert_eq!(repo.increment(1, 2, "back again").await?, 1);

    Ok(())
}

/// Tests resetting a member who was never warned.
///
/// Expected: Ok without creating a row
#[tokio::test]
async fn reset_without_counter_is_noop() -> Result<(), AppError> {
    let test = TestBuilder::new().with_discipline_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = WarningRepository::new(db);
    repo.reset(1, 2).await?;

    assert_eq!(repo.get_count(1, 2).await?, 0);

    Ok(())
}
