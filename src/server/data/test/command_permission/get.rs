use super::*;

/// Tests reading an unconfigured command.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_when_unconfigured() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_permission_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = CommandPermissionRepository::new(db);

    assert!(repo.get(1, "adv").await?.is_none());

    Ok(())
}

/// Tests reading a configured command with roles.
///
/// Expected: Ok with roles in insertion order
#[tokio::test]
async fn returns_configured_roles() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_permission_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_command_permission(db, 1, "adv", &[10, 20]).await?;

    let repo = CommandPermissionRepository::new(db);
    let permission = repo.get(1, "adv").await?.unwrap();

    assert_eq!(permission.command_name, "adv");
    assert_eq!(permission.role_ids, vec![10, 20]);

    Ok(())
}

/// Tests that configuration is scoped per guild.
///
/// Expected: Ok(None) for the same command in another guild
#[tokio::test]
async fn is_scoped_to_guild() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_permission_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_command_permission(db, 1, "adv", &[10]).await?;

    let repo = CommandPermissionRepository::new(db);

    assert!(repo.get(2, "adv").await?.is_none());

    Ok(())
}
