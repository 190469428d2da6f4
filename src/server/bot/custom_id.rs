//! Component custom ids.
//!
//! Every id that refers to a stored record carries that record's id, so a button keeps
//! working after a restart without any in-memory registry.

use std::fmt;

use crate::server::model::settings::SettingsField;

/// Text inputs of the registration modal.
pub const INPUT_NAME: &str = "registration:name";
pub const INPUT_ASSIGNED_ID: &str = "registration:assigned_id";
pub const INPUT_RECRUITER_ID: &str = "registration:recruiter_id";

/// Text inputs of the action type modal.
pub const INPUT_ACTION_NAME: &str = "action_type:name";
pub const INPUT_ACTION_MIN: &str = "action_type:min";
pub const INPUT_ACTION_MAX: &str = "action_type:max";
pub const INPUT_ACTION_VALUE: &str = "action_type:value";

/// Option value of the `!acao_setup` type select that opens an empty modal.
pub const NEW_ACTION_TYPE: &str = "new";

/// Buttons on a posted action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionButton {
    Join,
    Leave,
    Open,
    Close,
    Win,
    Defeat,
    Remove,
    Restore,
    Cancel,
}

impl ActionButton {
    fn key(&self) -> &'static str {
        match self {
            Self::Join => "join",
            Self::Leave => "leave",
            Self::Open => "open",
            Self::Close => "close",
            Self::Win => "win",
            Self::Defeat => "defeat",
            Self::Remove => "remove",
            Self::Restore => "restore",
            Self::Cancel => "cancel",
        }
    }

    fn from_key(key: &str) -> Option<Self> {
        match key {
            "join" => Some(Self::Join),
            "leave" => Some(Self::Leave),
            "open" => Some(Self::Open),
            "close" => Some(Self::Close),
            "win" => Some(Self::Win),
            "defeat" => Some(Self::Defeat),
            "remove" => Some(Self::Remove),
            "restore" => Some(Self::Restore),
            "cancel" => Some(Self::Cancel),
            _ => None,
        }
    }
}

/// Controls of the `!acao_setup` panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionSetupControl {
    Type,
    ResponsibleRoles,
    ActionChannel,
    RankingChannel,
    ListTypes,
    Reset,
    ResetConfirm,
}

impl ActionSetupControl {
    fn key(&self) -> &'static str {
        match self {
            Self::Type => "type",
            Self::ResponsibleRoles => "roles",
            Self::ActionChannel => "channel",
            Self::RankingChannel => "ranking",
            Self::ListTypes => "list",
            Self::Reset => "reset",
            Self::ResetConfirm => "reset_confirm",
        }
    }

    fn from_key(key: &str) -> Option<Self> {
        match key {
            "type" => Some(Self::Type),
            "roles" => Some(Self::ResponsibleRoles),
            "channel" => Some(Self::ActionChannel),
            "ranking" => Some(Self::RankingChannel),
            "list" => Some(Self::ListTypes),
            "reset" => Some(Self::Reset),
            "reset_confirm" => Some(Self::ResetConfirm),
            _ => None,
        }
    }
}

/// Ticket settings written from wizard page 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketSetting {
    Category,
    LogChannel,
    StaffRole,
    MaxOpen,
}

impl TicketSetting {
    fn key(&self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::LogChannel => "log",
            Self::StaffRole => "staff",
            Self::MaxOpen => "max",
        }
    }

    fn from_key(key: &str) -> Option<Self> {
        match key {
            "category" => Some(Self::Category),
            "log" => Some(Self::LogChannel),
            "staff" => Some(Self::StaffRole),
            "max" => Some(Self::MaxOpen),
            _ => None,
        }
    }
}

/// Voice settings written from wizard page 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceSetting {
    AfkChannel,
    AllowedRoles,
    MonitoredChannels,
    MonitorAll,
}

impl VoiceSetting {
    fn key(&self) -> &'static str {
        match self {
            Self::AfkChannel => "afk",
            Self::AllowedRoles => "roles",
            Self::MonitoredChannels => "channels",
            Self::MonitorAll => "monitor_all",
        }
    }

    fn from_key(key: &str) -> Option<Self> {
        match key {
            "afk" => Some(Self::AfkChannel),
            "roles" => Some(Self::AllowedRoles),
            "channels" => Some(Self::MonitoredChannels),
            "monitor_all" => Some(Self::MonitorAll),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomId {
    RegistrationStart,
    RegistrationModal,
    RegistrationApprove(i32),
    RegistrationReject(i32),
    SetupPage(u8),
    SetupField(SettingsField),
    SetupTicket(TicketSetting),
    SetupVoice(VoiceSetting),
    PermissionCommand,
    PermissionRoles(String),
    PermissionReset(String),
    LeaveGuild(u64),
    TicketOpen,
    TicketClaim,
    TicketClose,
    TicketReopen,
    Action(ActionButton, i32),
    ActionRemovePick(i32),
    ActionRestorePick(i32),
    ActionCreate,
    ActionSetup(ActionSetupControl),
    ActionTypeEdit(i32),
    ActionTypeDelete(i32),
    /// `None` creates a new type.
    ActionTypeModal(Option<i32>),
}

impl CustomId {
    pub fn parse(value: &str) -> Option<Self> {
        if let Some(guild_id) = value.strip_prefix("leave_") {
            return guild_id.parse().ok().map(Self::LeaveGuild);
        }

        let parts: Vec<&str> = value.splitn(3, ':').collect();
        let id = match parts.as_slice() {
            ["registration", "start"] => Self::RegistrationStart,
            ["registration", "modal"] => Self::RegistrationModal,
            ["registration", "approve", id] => Self::RegistrationApprove(id.parse().ok()?),
            ["registration", "reject", id] => Self::RegistrationReject(id.parse().ok()?),
            ["setup", "page", page] => Self::SetupPage(page.parse().ok()?),
            ["setup", "field", key] => Self::SetupField(SettingsField::from_key(key)?),
            ["setup", "ticket", key] => Self::SetupTicket(TicketSetting::from_key(key)?),
            ["setup", "voice", key] => Self::SetupVoice(VoiceSetting::from_key(key)?),
            ["perm", "command"] => Self::PermissionCommand,
            ["perm", "roles", command] => Self::PermissionRoles(command.to_string()),
            ["perm", "reset", command] => Self::PermissionReset(command.to_string()),
            ["ticket", "open"] => Self::TicketOpen,
            ["ticket", "claim"] => Self::TicketClaim,
            ["ticket", "close"] => Self::TicketClose,
            ["ticket", "reopen"] => Self::TicketReopen,
            ["action", "create"] => Self::ActionCreate,
            ["action", "remove_pick", id] => Self::ActionRemovePick(id.parse().ok()?),
            ["action", "restore_pick", id] => Self::ActionRestorePick(id.parse().ok()?),
            ["action", key, id] => Self::Action(ActionButton::from_key(key)?, id.parse().ok()?),
            ["action_setup", key] => Self::ActionSetup(ActionSetupControl::from_key(key)?),
            ["action_type", "edit", id] => Self::ActionTypeEdit(id.parse().ok()?),
            ["action_type", "delete", id] => Self::ActionTypeDelete(id.parse().ok()?),
            ["action_type", "modal", "new"] => Self::ActionTypeModal(None),
            ["action_type", "modal", id] => Self::ActionTypeModal(Some(id.parse().ok()?)),
            _ => return None,
        };

        Some(id)
    }
}

impl fmt::Display for CustomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RegistrationStart => write!(f, "registration:start"),
            Self::RegistrationModal => write!(f, "registration:modal"),
            Self::RegistrationApprove(id) => write!(f, "registration:approve:{}", id),
            Self::RegistrationReject(id) => write!(f, "registration:reject:{}", id),
            Self::SetupPage(page) => write!(f, "setup:page:{}", page),
            Self::SetupField(field) => write!(f, "setup:field:{}", field.key()),
            Self::SetupTicket(setting) => write!(f, "setup:ticket:{}", setting.key()),
            Self::SetupVoice(setting) => write!(f, "setup:voice:{}", setting.key()),
            Self::PermissionCommand => write!(f, "perm:command"),
            Self::PermissionRoles(command) => write!(f, "perm:roles:{}", command),
            Self::PermissionReset(command) => write!(f, "perm:reset:{}", command),
            Self::LeaveGuild(guild_id) => write!(f, "leave_{}", guild_id),
            Self::TicketOpen => write!(f, "ticket:open"),
            Self::TicketClaim => write!(f, "ticket:claim"),
            Self::TicketClose => write!(f, "ticket:close"),
            Self::TicketReopen => write!(f, "ticket:reopen"),
            Self::Action(button, id) => write!(f, "action:{}:{}", button.key(), id),
            Self::ActionRemovePick(id) => write!(f, "action:remove_pick:{}", id),
            Self::ActionRestorePick(id) => write!(f, "action:restore_pick:{}", id),
            Self::ActionCreate => write!(f, "action:create"),
            Self::ActionSetup(control) => write!(f, "action_setup:{}", control.key()),
            Self::ActionTypeEdit(id) => write!(f, "action_type:edit:{}", id),
            Self::ActionTypeDelete(id) => write!(f, "action_type:delete:{}", id),
            Self::ActionTypeModal(None) => write!(f, "action_type:modal:new"),
            Self::ActionTypeModal(Some(id)) => write!(f, "action_type:modal:{}", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decision_ids_carry_the_record_id() {
        assert_eq!(
            CustomId::parse("registration:approve:42"),
            Some(CustomId::RegistrationApprove(42))
        );
        assert_eq!(
            CustomId::RegistrationReject(7).to_string(),
            "registration:reject:7"
        );
        assert_eq!(CustomId::parse("registration:approve:x"), None);
    }

    #[test]
    fn leave_buttons_use_guild_id() {
        assert_eq!(
            CustomId::parse("leave_123456789012345678"),
            Some(CustomId::LeaveGuild(123456789012345678))
        );
        assert_eq!(CustomId::LeaveGuild(5).to_string(), "leave_5");
    }

    #[test]
    fn every_variant_survives_formatting() {
        let ids = [
            CustomId::RegistrationStart,
            CustomId::RegistrationModal,
            CustomId::SetupPage(3),
            CustomId::SetupField(SettingsField::Adv2Role),
            CustomId::SetupTicket(TicketSetting::MaxOpen),
            CustomId::SetupVoice(VoiceSetting::MonitorAll),
            CustomId::PermissionCommand,
            CustomId::PermissionRoles("ponto_relatorio".to_string()),
            CustomId::PermissionReset("adv".to_string()),
            CustomId::TicketOpen,
            CustomId::TicketClaim,
            CustomId::TicketClose,
            CustomId::TicketReopen,
            CustomId::Action(ActionButton::Win, 9),
            CustomId::Action(ActionButton::Restore, 9),
            CustomId::ActionRemovePick(9),
            CustomId::ActionRestorePick(9),
            CustomId::ActionCreate,
            CustomId::ActionSetup(ActionSetupControl::ResetConfirm),
            CustomId::ActionTypeEdit(4),
            CustomId::ActionTypeDelete(4),
            CustomId::ActionTypeModal(None),
            CustomId::ActionTypeModal(Some(4)),
        ];

        for id in ids {
            assert_eq!(CustomId::parse(&id.to_string()), Some(id));
        }
    }

    #[test]
    fn action_ids_carry_the_action_id() {
        assert_eq!(
            CustomId::parse("action:join:12"),
            Some(CustomId::Action(ActionButton::Join, 12))
        );
        assert_eq!(
            CustomId::parse("action:remove_pick:12"),
            Some(CustomId::ActionRemovePick(12))
        );
        assert_eq!(CustomId::parse("action:dance:12"), None);
        assert_eq!(CustomId::parse("action_type:modal:x"), None);
    }

    #[test]
    fn unknown_ids_are_ignored() {
        assert_eq!(CustomId::parse("navalha:tiro:3"), None);
        assert_eq!(CustomId::parse("setup:field:nope"), None);
        assert_eq!(CustomId::parse(""), None);
    }
}
