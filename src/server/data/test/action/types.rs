use super::*;

fn param(name: &str) -> ActionTypeParam {
    ActionTypeParam {
        name: name.to_string(),
        min_players: 2,
        max_players: 5,
        total_value_cents: 50_000,
    }
}

/// Tests creating, editing and deleting an action type.
///
/// Verifies that types are listed per guild in creation order.
///
/// Expected: Ok with the edited fields stored and the type gone after delete
#[tokio::test]
async fn type_lifecycle() -> Result<(), AppError> {
    let test = TestBuilder::new().with_action_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ActionRepository::new(db);
    let first = repo.create_type(1, param("Banco")).await?;
    repo.create_type(1, param("Joalheria")).await?;
    repo.create_type(2, param("Outro servidor")).await?;

    let names: Vec<String> = repo.get_types(1).await?.into_iter().map(|t| t.name).collect();
    assert_eq!(names, ["Banco", "Joalheria"]);

    let edited = repo
        .update_type(
            first.id,
            ActionTypeParam {
                total_value_cents: 75_050,
                ..param("Banco Central")
            },
        )
        .await?;
    assert_eq!(edited.name, "Banco Central");
    assert_eq!(edited.total_value_cents, 75_050);

    assert!(repo.delete_type(first.id).await?);
    assert!(!repo.delete_type(first.id).await?);
    assert!(repo.get_type(first.id).await?.is_none());

    Ok(())
}

/// Tests editing a type that does not exist.
///
/// Expected: Err(RecordNotFound)
#[tokio::test]
async fn update_missing_type_fails() -> Result<(), AppError> {
    let test = TestBuilder::new().with_action_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let result = ActionRepository::new(db).update_type(99, param("Nada")).await;

    assert!(matches!(result, Err(sea_orm::DbErr::RecordNotFound(_))));

    Ok(())
}

/// Tests that an action keeps its copy of the type after the type changes.
///
/// Expected: Ok with the original name, capacity and value on the action
#[tokio::test]
async fn action_survives_type_edit_and_delete() -> Result<(), AppError> {
    let test = TestBuilder::new().with_action_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ActionRepository::new(db);
    let action_type = repo.create_type(1, param("Banco")).await?;
    let action = repo
        .create(CreateActionParam {
            guild_id: 1,
            creator_id: 10,
            channel_id: 20,
            action_type: action_type.clone(),
        })
        .await?;

    repo.update_type(action_type.id, param("Renomeado")).await?;
    repo.delete_type(action_type.id).await?;

    let stored = repo.get(action.id).await?.unwrap();
    assert_eq!(stored.type_name, "Banco");
    assert_eq!(stored.max_players, 5);
    assert_eq!(stored.total_value_cents, 50_000);
    assert_eq!(stored.status, ActionStatus::Open);
    assert!(!stored.registrations_open);

    Ok(())
}
