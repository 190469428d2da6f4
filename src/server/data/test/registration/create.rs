use super::*;

/// Tests creating a registration.
///
/// Verifies that a new registration starts pending with no decision metadata.
///
/// Expected: Ok with pending status and submitted fields preserved
#[tokio::test]
async fn creates_pending_registration() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Registration)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = RegistrationRepository::new(db);
    let registration = repo
        .create(CreateRegistrationParam {
            guild_id: 1,
            user_id: 2,
            display_name: "Joao".to_string(),
            assigned_id: "4521".to_string(),
            recruiter_id: "99".to_string(),
        })
        .await?;

    assert_eq!(registration.status, RegistrationStatus::Pending);
    assert_eq!(registration.display_name, "Joao");
    assert_eq!(registration.assigned_id, "4521");
    assert!(registration.moderator_id.is_none());
    assert!(registration.decided_at.is_none());
    assert!(registration.approval_message_id.is_none());

    Ok(())
}
