use super::*;

/// Tests ranking members by total time.
///
/// Verifies that totals are summed across channels, ties are ordered by user id and the
/// limit is applied.
///
/// Expected: Ok with the top two members
#[tokio::test]
async fn ranks_by_total_time() -> Result<(), AppError> {
    let test = TestBuilder::new().with_voice_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_voice_time(db, 1, 20, 10, 100).await?;
    factory::create_voice_time(db, 1, 20, 11, 200).await?;
    factory::create_voice_time(db, 1, 30, 10, 300).await?;
    factory::create_voice_time(db, 1, 40, 10, 50).await?;
    factory::create_voice_time(db, 2, 50, 10, 10_000).await?;

    let repo = VoiceRepository::new(db);
    let ranking = repo.ranking(1, 2).await?;

    assert_eq!(
        ranking,
        vec![
            VoiceTotal {
                user_id: 20,
                total_seconds: 300
            },
            VoiceTotal {
                user_id: 30,
                total_seconds: 300
            },
        ]
    );

    Ok(())
}

/// Tests ranking an empty guild.
///
/// Expected: Ok(empty)
#[tokio::test]
async fn empty_guild_has_no_ranking() -> Result<(), AppError> {
    let test = TestBuilder::new().with_voice_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = VoiceRepository::new(db);

    assert!(repo.ranking(1, 10).await?.is_empty());

    Ok(())
}
