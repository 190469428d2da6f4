//! Per-command role gate.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::command_permission::CommandPermissionRepository, error::AppError,
    model::permission::CommandPermission,
};

/// Commands whose access can be configured with `!setup_cargos`.
///
/// Every other command is administrator only.
pub const GATED_COMMANDS: [&str; 7] = [
    "set",
    "adv",
    "purge",
    "ficha",
    "comandos",
    "ponto",
    "ponto_relatorio",
];

pub fn is_gated(command_name: &str) -> bool {
    GATED_COMMANDS.contains(&command_name)
}

/// Decides whether an actor may run a command.
///
/// Administrators always pass. An unconfigured command is open to everyone, while a
/// configured command requires one of its roles; an empty role set therefore means
/// administrators only.
pub fn allowed(configured: Option<&CommandPermission>, actor_roles: &[u64], is_admin: bool) -> bool {
    if is_admin {
        return true;
    }

    match configured {
        None => true,
        Some(permission) => permission
            .role_ids
            .iter()
            .any(|role| actor_roles.contains(role)),
    }
}

pub struct PermissionService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PermissionService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Reads the current configuration and applies [`allowed`].
    pub async fn is_allowed(
        &self,
        guild_id: u64,
        command_name: &str,
        actor_roles: &[u64],
        is_admin: bool,
    ) -> Result<bool, AppError> {
        if is_admin {
            return Ok(true);
        }

        let configured = CommandPermissionRepository::new(self.db)
            .get(guild_id, command_name)
            .await?;

        Ok(allowed(configured.as_ref(), actor_roles, is_admin))
    }

    /// Like [`Self::is_allowed`] but fails with `AppError::Permission`.
    pub async fn check(
        &self,
        guild_id: u64,
        command_name: &str,
        actor_roles: &[u64],
        is_admin: bool,
    ) -> Result<(), AppError> {
        if self
            .is_allowed(guild_id, command_name, actor_roles, is_admin)
            .await?
        {
            Ok(())
        } else {
            Err(AppError::Permission(
                "Você não tem permissão para usar este comando.".to_string(),
            ))
        }
    }

    /// Replaces the roles allowed to run a gated command.
    pub async fn configure(
        &self,
        guild_id: u64,
        command_name: &str,
        role_ids: &[u64],
    ) -> Result<CommandPermission, AppError> {
        if !is_gated(command_name) {
            return Err(AppError::Validation(format!(
                "O comando `{}` não pode ser configurado.",
                command_name
            )));
        }

        Ok(CommandPermissionRepository::new(self.db)
            .set_roles(guild_id, command_name, role_ids)
            .await?)
    }

    /// Removes a command's configuration, opening it to everyone.
    pub async fn reset(&self, guild_id: u64, command_name: &str) -> Result<bool, AppError> {
        Ok(CommandPermissionRepository::new(self.db)
            .remove(guild_id, command_name)
            .await?)
    }

    pub async fn list(&self, guild_id: u64) -> Result<Vec<CommandPermission>, AppError> {
        Ok(CommandPermissionRepository::new(self.db)
            .get_all(guild_id)
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::{builder::TestBuilder, factory};

    fn configured(role_ids: Vec<u64>) -> CommandPermission {
        CommandPermission {
            command_name: "adv".to_string(),
            role_ids,
        }
    }

    #[test]
    fn admin_always_passes() {
        assert!(allowed(None, &[], true));
        assert!(allowed(Some(&configured(vec![])), &[], true));
        assert!(allowed(Some(&configured(vec![5])), &[1], true));
    }

    #[test]
    fn unconfigured_command_is_open() {
        assert!(allowed(None, &[], false));
    }

    #[test]
    fn configured_command_requires_intersection() {
        let permission = configured(vec![5, 6]);

        assert!(allowed(Some(&permission), &[1, 6], false));
        assert!(!allowed(Some(&permission), &[1, 2], false));
    }

    #[test]
    fn empty_role_set_is_admin_only() {
        assert!(!allowed(Some(&configured(vec![])), &[1, 2, 3], false));
    }

    /// Tests the gate against stored configuration.
    ///
    /// Verifies that the configuration is read on every call, so a change takes effect
    /// immediately.
    ///
    /// Expected: denied before configuring the actor's role, allowed after
    #[tokio::test]
    async fn reads_configuration_on_every_call() -> Result<(), AppError> {
        let test = TestBuilder::new().with_permission_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        factory::create_command_permission(db, 1, "ficha", &[10]).await?;

        let service = PermissionService::new(db);
        assert!(!service.is_allowed(1, "ficha", &[20], false).await?);
        assert!(matches!(
            service.check(1, "ficha", &[20], false).await,
            Err(AppError::Permission(_))
        ));

        service.configure(1, "ficha", &[10, 20]).await?;
        assert!(service.is_allowed(1, "ficha", &[20], false).await?);

        Ok(())
    }

    /// Tests configuring an admin-only command.
    ///
    /// Expected: Err(Validation) and nothing stored
    #[tokio::test]
    async fn rejects_ungated_command() -> Result<(), AppError> {
        let test = TestBuilder::new().with_permission_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let service = PermissionService::new(db);
        let result = service.configure(1, "setup", &[10]).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert!(service.list(1).await?.is_empty());

        Ok(())
    }

    /// Tests resetting a configured command.
    ///
    /// Expected: open to everyone again
    #[tokio::test]
    async fn reset_reopens_command() -> Result<(), AppError> {
        let test = TestBuilder::new().with_permission_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let service = PermissionService::new(db);
        service.configure(1, "purge", &[]).await?;
        assert!(!service.is_allowed(1, "purge", &[7], false).await?);

        assert!(service.reset(1, "purge").await?);
        assert!(service.is_allowed(1, "purge", &[7], false).await?);

        Ok(())
    }
}
