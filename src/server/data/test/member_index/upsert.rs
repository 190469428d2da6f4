use super::*;

/// Tests creating a mapping.
///
/// Expected: Ok and the assigned id resolves to the user
#[tokio::test]
async fn creates_mapping() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::MemberIndex)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = MemberIndexRepository::new(db);
    repo.upsert(1, "4521", 900).await?;

    let entry = repo.find_by_assigned_id(1, "4521").await?.unwrap();
    assert_eq!(entry.user_id, 900);

    Ok(())
}

/// Tests that an assigned id moves to a new member.
///
/// Verifies that at most one live mapping exists per assigned id.
///
/// Expected: Ok with the new user and a single row
#[tokio::test]
async fn replaces_mapping_for_same_assigned_id() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::MemberIndex)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_member_index(db, 1, "4521", 900).await?;

    let repo = MemberIndexRepository::new(db);
    repo.upsert(1, "4521", 901).await?;

    let entry = repo.find_by_assigned_id(1, "4521").await?.unwrap();
    assert_eq!(entry.user_id, 901);
    let rows = entity::prelude::MemberIndex::find().count(db).await?;
    assert_eq!(rows, 1);

    Ok(())
}

/// Tests that a member re-registering under a new assigned id drops the old one.
///
/// Expected: Ok with the old assigned id no longer resolving
#[tokio::test]
async fn replaces_mapping_for_same_user() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::MemberIndex)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_member_index(db, 1, "100", 900).await?;

    let repo = MemberIndexRepository::new(db);
    repo.upsert(1, "200", 900).await?;

    assert!(repo.find_by_assigned_id(1, "100").await?.is_none());
    assert_eq!(
        repo.find_by_assigned_id(1, "200").await?.unwrap().user_id,
        900
    );

    Ok(())
}

/// Tests that mappings in other guilds are unaffected.
///
/// Expected: Ok with both guilds resolving independently
#[tokio::test]
async fn keeps_other_guilds() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::MemberIndex)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_member_index(db, 2, "4521", 800).await?;

    let repo = MemberIndexRepository::new(db);
    repo.upsert(1, "4521", 900).await?;

    assert_eq!(
        repo.find_by_assigned_id(2, "4521").await?.unwrap().user_id,
        800
    );

    Ok(())
}
