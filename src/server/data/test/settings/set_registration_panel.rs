use super::*;

/// Tests recording the registration panel location.
///
/// Expected: Ok with both channel and message ids stored
#[tokio::test]
async fn stores_channel_and_message() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::GuildSettings)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = SettingsRepository::new(db);
    let settings = repo.set_registration_panel(1, 200, 300).await?;

    assert_eq!(settings.registration_channel_id, Some(200));
    assert_eq!(settings.registration_message_id, Some(300));

    Ok(())
}
