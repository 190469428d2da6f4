use serenity::all::{ButtonStyle, Context, CreateButton, CreateEmbed, CreateMessage, Message};

use crate::server::{
    bot::{
        custom_id::CustomId,
        layout::{ComponentLayout, MAX_BUTTONS_PER_ROW, MAX_ROWS},
        util::COLOR_INFO,
    },
    error::AppError,
};

/// Guild names are cut to this many characters on leave buttons.
const BUTTON_NAME_LENGTH: usize = 20;

/// One "Sair de" button per guild, as many as a message can hold.
pub fn leave_buttons(guilds: &[(u64, String)]) -> Vec<CreateButton> {
    guilds
        .iter()
        .take(MAX_ROWS * MAX_BUTTONS_PER_ROW)
        .map(|(id, name)| {
            let short: String = name.chars().take(BUTTON_NAME_LENGTH).collect();
            CreateButton::new(CustomId::LeaveGuild(*id).to_string())
                .label(format!("Sair de: {}", short))
                .style(ButtonStyle::Danger)
        })
        .collect()
}

/// `!servidores`: lists connected guilds with a leave button each.
pub async fn servidores(ctx: &Context, message: &Message) -> Result<(), AppError> {
    let mut guilds: Vec<(u64, String)> = ctx
        .cache
        .guilds()
        .into_iter()
        .map(|id| {
            let name = ctx
                .cache
                .guild(id)
                .map(|guild| guild.name.clone())
                .unwrap_or_else(|| id.to_string());
            (id.get(), name)
        })
        .collect();
    guilds.sort_by(|a, b| a.1.cmp(&b.1));

    let mut description = guilds
        .iter()
        .map(|(id, name)| format!("• **{}** (ID: `{}`)", name, id))
        .collect::<Vec<_>>()
        .join("\n");
    let shown = MAX_ROWS * MAX_BUTTONS_PER_ROW;
    if guilds.len() > shown {
        description.push_str(&format!(
            "\n\nApenas os primeiros {} têm botão de saída.",
            shown
        ));
    }

    let embed = CreateEmbed::new()
        .title(format!("🌐 Servidores Conectados ({})", guilds.len()))
        .description(description)
        .color(COLOR_INFO);

    let buttons = leave_buttons(&guilds);
    let mut builder = CreateMessage::new().embed(embed);
    if !buttons.is_empty() {
        builder = builder.components(ComponentLayout::buttons(buttons)?.into_components());
    }

    message.channel_id.send_message(&ctx.http, builder).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caps_leave_buttons_at_layout_capacity() {
        let guilds: Vec<(u64, String)> =
            (1..=30).map(|i| (i, format!("Servidor {}", i))).collect();

        let buttons = leave_buttons(&guilds);

        assert_eq!(buttons.len(), 25);
        assert!(ComponentLayout::buttons(buttons).is_ok());
    }

    #[test]
    fn shortens_long_guild_names() {
        let guilds = vec![(7, "Comunidade Muito Grande Demais".to_string())];

        let button = serde_json::to_value(&leave_buttons(&guilds)[0]).unwrap();

        assert_eq!(button["label"], "Sair de: Comunidade Muito Gra");
    }
}
