use super::*;

/// Tests creating settings on first access.
///
/// Verifies that an unconfigured guild gets an empty settings row.
///
/// Expected: Ok with every field unset and one row stored
#[tokio::test]
async fn creates_empty_settings() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::GuildSettings)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = SettingsRepository::new(db);
    let settings = repo.get_or_create(123456789).await?;

    assert_eq!(settings.guild_id, 123456789);
    for field in SettingsField::ALL {
        assert_eq!(settings.get(field), None);
    }

    let count = entity::prelude::GuildSettings::find().count(db).await?;
    assert_eq!(count, 1);

    Ok(())
}

/// Tests that repeated access reuses the existing row.
///
/// Expected: Ok with a single row after two calls
#[tokio::test]
async fn reuses_existing_settings() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::GuildSettings)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = SettingsRepository::new(db);
    let first = repo.get_or_create(42).await?;
    let second = repo.get_or_create(42).await?;

    assert_eq!(first.created_at, second.created_at);
    let count = entity::prelude::GuildSettings::find().count(db).await?;
    assert_eq!(count, 1);

    Ok(())
}

/// Tests reading settings for an unknown guild.
///
/// Expected: Ok(None) without creating a row
#[tokio::test]
async fn get_returns_none_for_unknown_guild() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::GuildSettings)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = SettingsRepository::new(db);

    assert!(repo.get(42).await?.is_none());
    let count = entity::prelude::GuildSettings::find().count(db).await?;
    assert_eq!(count, 0);

    Ok(())
}
