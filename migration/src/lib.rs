pub use sea_orm_migration::prelude::*;

mod m20260301_000001_create_guild_settings_table;
mod m20260301_000002_create_command_permission_table;
mod m20260301_000003_create_command_permission_role_table;
mod m20260301_000004_create_registration_table;
mod m20260301_000005_create_member_index_table;
mod m20260301_000006_create_member_warning_table;
mod m20260301_000007_create_warning_log_table;
mod m20260302_000008_create_voice_settings_table;
mod m20260302_000009_create_voice_allowed_role_table;
mod m20260302_000010_create_voice_monitored_channel_table;
mod m20260302_000011_create_voice_time_table;
mod m20260302_000012_create_voice_session_table;
mod m20260303_000013_create_ticket_settings_table;
mod m20260303_000014_create_ticket_table;
mod m20260304_000015_create_action_type_table;
mod m20260304_000016_create_action_settings_table;
mod m20260304_000017_create_action_responsible_role_table;
mod m20260304_000018_create_action_table;
mod m20260304_000019_create_action_participant_table;
mod m20260304_000020_create_action_stat_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_guild_settings_table::Migration),
            Box::new(m20260301_000002_create_command_permission_table::Migration),
            Box::new(m20260301_000003_create_command_permission_role_table::Migration),
            Box::new(m20260301_000004_create_registration_table::Migration),
            Box::new(m20260301_000005_create_member_index_table::Migration),
            Box::new(m20260301_000006_create_member_warning_table::Migration),
            Box::new(m20260301_000007_create_warning_log_table::Migration),
            Box::new(m20260302_000008_create_voice_settings_table::Migration),
            Box::new(m20260302_000009_create_voice_allowed_role_table::Migration),
            Box::new(m20260302_000010_create_voice_monitored_channel_table::Migration),
            Box::new(m20260302_000011_create_voice_time_table::Migration),
            Box::new(m20260302_000012_create_voice_session_table::Migration),
            Box::new(m20260303_000013_create_ticket_settings_table::Migration),
            Box::new(m20260303_000014_create_ticket_table::Migration),
            Box::new(m20260304_000015_create_action_type_table::Migration),
            Box::new(m20260304_000016_create_action_settings_table::Migration),
            Box::new(m20260304_000017_create_action_responsible_role_table::Migration),
            Box::new(m20260304_000018_create_action_table::Migration),
            Box::new(m20260304_000019_create_action_participant_table::Migration),
            Box::new(m20260304_000020_create_action_stat_table::Migration),
        ]
    }
}
