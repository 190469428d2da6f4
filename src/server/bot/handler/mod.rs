use std::time::Duration;

use sea_orm::DatabaseConnection;
use serenity::all::{
    Context, EventHandler, GuildId, Interaction, Member, Message, Ready, User, VoiceState,
};
use serenity::async_trait;

use crate::server::{
    bot::interaction,
    service::{cooldown::CooldownTracker, discipline::WarningLocks},
};

pub mod member;
pub mod message;
pub mod ready;
pub mod voice;

/// Discord bot event handler
pub struct Handler {
    pub db: DatabaseConnection,
    /// Chat command prefix.
    pub prefix: String,
    pub warning_locks: WarningLocks,
    pub cooldowns: CooldownTracker,
}

impl Handler {
    pub fn new(db: DatabaseConnection, prefix: String, cooldown: Duration) -> Self {
        Self {
            db,
            prefix,
            warning_locks: WarningLocks::new(),
            cooldowns: CooldownTracker::new(cooldown),
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    /// Called when the bot is ready and connected to Discord
    async fn ready(&self, ctx: Context, ready: Ready) {
        ready::handle_ready(&self.db, ctx, ready).await;
    }

    /// Called when a member joins a guild
    async fn guild_member_addition(&self, ctx: Context, new_member: Member) {
        member::handle_guild_member_addition(&self.db, ctx, new_member).await;
    }

    /// Called when a member leaves a guild
    async fn guild_member_removal(
        &self,
        ctx: Context,
        guild_id: GuildId,
        user: User,
        member_data_if_available: Option<Member>,
    ) {
        member::handle_guild_member_removal(
            &self.db,
            ctx,
            guild_id,
            user,
            member_data_if_available,
        )
        .await;
    }

    /// Called when a message is sent in a channel
    async fn message(&self, ctx: Context, message: Message) {
        message::handle_message(self, ctx, message).await;
    }

    /// Called when a button, select menu or modal is submitted
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        interaction::handle_interaction(&self.db, ctx, interaction).await;
    }

    /// Called when a member joins, leaves or moves between voice channels
    async fn voice_state_update(&self, ctx: Context, old: Option<VoiceState>, new: VoiceState) {
        voice::handle_voice_state_update(&self.db, ctx, old, new).await;
    }
}
