use super::*;

/// Tests the first warning for a member.
///
/// Expected: Ok(1) with a counter row created
#[tokio::test]
async fn first_warning_creates_counter() -> Result<(), AppError> {
    let test = TestBuilder::new().with_discipline_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = WarningRepository::new(db);

    assert_eq!(repo.increment(1, 2, "spam").await?, 1);
    assert_eq!(repo.get_count(1, 2).await?, 1);

    Ok(())
}

/// Tests escalating an existing counter.
///
/// Verifies that each increment adds exactly one to the stored count.
///
/// Expected: Ok(2) then Ok(3)
#[tokio::test]
async fn increments_existing_counter() -> Result<(), AppError> {
    let test = TestBuilder::new().with_discipline_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_member_warning(db, 1, 2, 1).await?;

    let repo = WarningRepository::new(db);

    assert_eq!(repo.increment(1, 2, "flood").await?, 2);
    assert_eq!(repo.increment(1, 2, "flood again").await?, 3);

    Ok(())
}

/// Tests that counters are scoped per guild and member.
///
/// Expected: Ok with untouched counters for other members
#[tokio::test]
async fn counters_are_independent() -> Result<(), AppError> {
    let test = TestBuilder::new().with_discipline_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_member_warning(db, 1, 3, 2).await?;
    factory::create_member_warning(db, 2, 2, 2).await?;

    let repo = WarningRepository::new(db);
    repo.increment(1, 2, "spam").await?;

    assert_eq!(repo.get_count(1, 3).await?, 2);
    assert_eq!(repo.get_count(2, 2).await?, 2);
    assert_eq!(repo.get_count(1, 2).await?, 1);
    assert_eq!(repo.get_count(9, 9).await?, 0);

    Ok(())
}
