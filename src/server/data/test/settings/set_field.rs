use super::*;

/// Tests storing one field.
///
/// Verifies that setting a field writes only that field and leaves the others unset.
///
/// Expected: Ok with only the approval channel configured
#[tokio::test]
async fn stores_single_field() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::GuildSettings)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = SettingsRepository::new(db);
    let settings = repo
        .set_field(1, SettingsField::ApprovalChannel, Some(555))
        .await?;

    assert_eq!(settings.approval_channel_id, Some(555));
    assert_eq!(settings.records_channel_id, None);
    assert_eq!(settings.member_role_id, None);

    Ok(())
}

/// Tests that repeating the same selection is idempotent.
///
/// Verifies that writing the same value twice yields identical configured fields.
///
/// Expected: Ok with equal field values after both writes
#[tokio::test]
async fn same_selection_twice_is_idempotent() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::GuildSettings)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = SettingsRepository::new(db);
    let first = repo.set_field(1, SettingsField::MemberRole, Some(77)).await?;
    let second = repo.set_field(1, SettingsField::MemberRole, Some(77)).await?;

    for field in SettingsField::ALL {
        assert_eq!(first.get(field), second.get(field));
    }
    let count = entity::prelude::GuildSettings::find().count(db).await?;
    assert_eq!(count, 1);

    Ok(())
}

/// Tests that a partially completed wizard keeps earlier selections.
///
/// Expected: Ok with both fields stored after two separate writes
#[tokio::test]
async fn partial_configuration_accumulates() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::GuildSettings)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = SettingsRepository::new(db);
    repo.set_field(1, SettingsField::WarningsChannel, Some(10))
        .await?;
    repo.set_field(1, SettingsField::Adv1Role, Some(20)).await?;

    let settings = repo.get(1).await?.unwrap();
    assert_eq!(settings.warnings_channel_id, Some(10));
    assert_eq!(settings.adv1_role_id, Some(20));

    Ok(())
}

/// Tests clearing a field.
///
/// Expected: Ok with the field reset to None
#[tokio::test]
async fn clears_field() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::GuildSettings)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = SettingsRepository::new(db);
    repo.set_field(1, SettingsField::ExitChannel, Some(10)).await?;
    let settings = repo.set_field(1, SettingsField::ExitChannel, None).await?;

    assert_eq!(settings.exit_channel_id, None);

    Ok(())
}
