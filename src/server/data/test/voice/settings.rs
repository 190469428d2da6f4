use super::*;

/// Tests reading settings for an unconfigured guild.
///
/// Expected: Ok with nothing monitored and no allowed roles
#[tokio::test]
async fn defaults_to_nothing_monitored() -> Result<(), AppError> {
    let test = TestBuilder::new().with_voice_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = VoiceRepository::new(db);
    let settings = repo.get_settings(1).await?;

    assert!(!settings.monitor_all);
    assert!(settings.afk_channel_id.is_none());
    assert!(settings.allowed_role_ids.is_empty());
    assert!(!settings.is_monitored(10));

    Ok(())
}

/// Tests writing every voice setting.
///
/// Verifies that role and channel lists are replaced rather than appended.
///
/// Expected: Ok with the latest lists and flags
#[tokio::test]
async fn stores_settings() -> Result<(), AppError> {
    let test = TestBuilder::new().with_voice_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = VoiceRepository::new(db);
    repo.set_afk_channel(1, Some(99)).await?;
    repo.set_monitor_all(1, true).await?;
    repo.set_allowed_roles(1, &[5, 6]).await?;
    repo.set_allowed_roles(1, &[7]).await?;
    repo.set_monitored_channels(1, &[10, 11]).await?;

    let settings = repo.get_settings(1).await?;

    assert!(settings.monitor_all);
    assert_eq!(settings.afk_channel_id, Some(99));
    assert_eq!(settings.allowed_role_ids, vec![7]);
    let mut channels = settings.monitored_channel_ids.clone();
    channels.sort();
    assert_eq!(channels, vec![10, 11]);
    assert!(!settings.is_monitored(99));

    Ok(())
}

/// Tests that settings are scoped per guild.
///
/// Expected: Ok with the other guild still at defaults
#[tokio::test]
async fn settings_are_per_guild() -> Result<(), AppError> {
    let test = TestBuilder::new().with_voice_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = VoiceRepository::new(db);
    repo.set_monitor_all(1, true).await?;
    repo.set_allowed_roles(1, &[5]).await?;

    let other = repo.get_settings(2).await?;

    assert!(!other.monitor_all);
    assert!(other.allowed_role_ids.is_empty());

    Ok(())
}
