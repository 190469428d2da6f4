use super::*;

/// Tests replacing a member's accumulators after an adjustment.
///
/// Verifies that old rows are dropped and zero totals are not stored.
///
/// Expected: Ok with only the non-zero replacement rows
#[tokio::test]
async fn replaces_all_rows() -> Result<(), AppError> {
    let test = TestBuilder::new().with_voice_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_voice_time(db, 1, 2, 10, 500).await?;
    factory::create_voice_time(db, 1, 2, 11, 700).await?;
    factory::create_voice_time(db, 1, 3, 10, 50).await?;

    let repo = VoiceRepository::new(db);
    repo.replace_times(
        1,
        2,
        &[
            VoiceTime {
                channel_id: 10,
                total_seconds: 0,
            },
            VoiceTime {
                channel_id: ADJUSTMENT_CHANNEL_ID,
                total_seconds: 3600,
            },
        ],
    )
    .await?;

    assert_eq!(
        repo.get_times(1, 2).await?,
        vec![VoiceTime {
            channel_id: ADJUSTMENT_CHANNEL_ID,
            total_seconds: 3600
        }]
    );
    assert_eq!(repo.get_times(1, 3).await?.len(), 1);

    Ok(())
}
