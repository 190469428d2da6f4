pub use super::action::Entity as Action;
pub use super::action_participant::Entity as ActionParticipant;
pub use super::action_responsible_role::Entity as ActionResponsibleRole;
pub use super::action_settings::Entity as ActionSettings;
pub use super::action_stat::Entity as ActionStat;
pub use super::action_type::Entity as ActionType;
pub use super::command_permission::Entity as CommandPermission;
pub use super::command_permission_role::Entity as CommandPermissionRole;
pub use super::guild_settings::Entity as GuildSettings;
pub use super::member_index::Entity as MemberIndex;
pub use super::member_warning::Entity as MemberWarning;
pub use super::registration::Entity as Registration;
pub use super::ticket::Entity as Ticket;
pub use super::ticket_settings::Entity as TicketSettings;
pub use super::voice_allowed_role::Entity as VoiceAllowedRole;
pub use super::voice_monitored_channel::Entity as VoiceMonitoredChannel;
pub use super::voice_session::Entity as VoiceSession;
pub use super::voice_settings::Entity as VoiceSettings;
pub use super::voice_time::Entity as VoiceTime;
pub use super::warning_log::Entity as WarningLog;
