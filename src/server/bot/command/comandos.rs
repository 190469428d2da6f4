use sea_orm::DatabaseConnection;
use serenity::all::{Context, CreateEmbed, CreateEmbedFooter, CreateMessage, GuildId, Message};

use crate::server::{
    bot::{
        command::{Authorization, Command},
        util::COLOR_INFO,
    },
    error::AppError,
    model::permission::CommandPermission,
    service::permission::PermissionService,
};

/// Who may currently run a command, as shown in `!comandos`.
pub fn access_label(command: Command, configured: &[CommandPermission]) -> String {
    match command.authorization() {
        Authorization::Admin => return "Administradores".to_string(),
        Authorization::ActionManager => {
            return "Administradores e responsáveis de ações".to_string()
        }
        Authorization::Gated => {}
    }

    match configured.iter().find(|p| p.command_name == command.name()) {
        None => "Todos".to_string(),
        Some(permission) if permission.role_ids.is_empty() => "Administradores".to_string(),
        Some(permission) => permission
            .role_ids
            .iter()
            .map(|role| format!("<@&{}>", role))
            .collect::<Vec<_>>()
            .join(", "),
    }
}

/// `!comandos`: lists every command with its usage and current access.
pub async fn comandos(
    db: &DatabaseConnection,
    ctx: &Context,
    message: &Message,
    guild_id: GuildId,
    prefix: &str,
) -> Result<(), AppError> {
    let configured = PermissionService::new(db).list(guild_id.get()).await?;

    let mut embed = CreateEmbed::new()
        .title("📜 Comandos")
        .color(COLOR_INFO)
        .footer(CreateEmbedFooter::new(
            "Use !setup_cargos para liberar comandos para cargos.",
        ));
    for command in Command::ALL {
        embed = embed.field(
            format!("{}{}", prefix, command.usage()),
            format!(
                "{}\nAcesso: {}",
                command.description(),
                access_label(command, &configured)
            ),
            false,
        );
    }

    message
        .channel_id
        .send_message(&ctx.http, CreateMessage::new().embed(embed))
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describes_access_per_configuration() {
        let configured = vec![
            CommandPermission {
                command_name: "adv".to_string(),
                role_ids: vec![10, 11],
            },
            CommandPermission {
                command_name: "purge".to_string(),
                role_ids: vec![],
            },
        ];

        assert_eq!(access_label(Command::Adv, &configured), "<@&10>, <@&11>");
        assert_eq!(access_label(Command::Purge, &configured), "Administradores");
        assert_eq!(access_label(Command::Ficha, &configured), "Todos");
        assert_eq!(access_label(Command::Setup, &configured), "Administradores");
        assert_eq!(
            access_label(Command::Acao, &configured),
            "Administradores e responsáveis de ações"
        );
        assert_eq!(access_label(Command::Convite, &configured), "Administradores");
    }
}
