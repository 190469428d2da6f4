use super::*;

/// Tests pruning a departed member.
///
/// Expected: Ok(1) and the mapping gone
#[tokio::test]
async fn removes_member_mapping() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::MemberIndex)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_member_index(db, 1, "4521", 900).await?;

    let repo = MemberIndexRepository::new(db);

    assert_eq!(repo.remove_user(1, 900).await?, 1);
    assert!(repo.find_by_assigned_id(1, "4521").await?.is_none());

    Ok(())
}

/// Tests pruning a member with no mapping.
///
/// Expected: Ok(0)
#[tokio::test]
async fn ignores_unknown_member() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::MemberIndex)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = MemberIndexRepository::new(db);

    assert_eq!(repo.remove_user(1, 900).await?, 0);

    Ok(())
}
