use super::*;

/// Tests removing a configured command.
///
/// Expected: Ok(true) and the command reads as unconfigured afterwards
#[tokio::test]
async fn removes_configuration_and_roles() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_permission_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_command_permission(db, 1, "ponto", &[10, 11]).await?;

    let repo = CommandPermissionRepository::new(db);

    assert!(repo.remove(1, "ponto").await?);
    assert!(repo.get(1, "ponto").await?.is_none());
    let role_rows = entity::prelude::CommandPermissionRole::find()
        .count(db)
        .await?;
    assert_eq!(role_rows, 0);

    Ok(())
}

/// Tests removing a command that was never configured.
///
/// Expected: Ok(false)
#[tokio::test]
async fn returns_false_when_unconfigured() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_permission_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = CommandPermissionRepository::new(db);

    assert!(!repo.remove(1, "ponto").await?);

    Ok(())
}
