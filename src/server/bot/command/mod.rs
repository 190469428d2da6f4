//! Prefixed chat commands.
//!
//! Every command is administrator only, passes through the per-command role gate
//! configured with `!setup_cargos`, or is open to the action responsible roles. [`dispatch`] applies the cooldown and the
//! authorization before running a command, so command functions only deal with their
//! own arguments.

use dioxus_logger::tracing;
use sea_orm::DatabaseConnection;
use serenity::all::{Context, GuildId, Message};

use crate::server::{
    bot::{handler::Handler, interaction::action::action_actor, util::Actor},
    error::AppError,
    service::{
        action::ActionService,
        lookup::{nickname_matches, LookupService},
        permission::PermissionService,
    },
};

pub mod acao;
pub mod adv;
pub mod comandos;
pub mod convite;
pub mod ponto;
pub mod purge;
pub mod registration;
pub mod servidores;
pub mod setup;
pub mod ticket;

/// A prefixed message split into command name and raw arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub name: String,
    pub args: String,
}

impl Invocation {
    /// Parses `content` when it starts with `prefix`; the name is lowercased.
    pub fn parse(prefix: &str, content: &str) -> Option<Self> {
        let rest = content.trim_start().strip_prefix(prefix)?;
        let (name, args) = match rest.split_once(char::is_whitespace) {
            Some((name, args)) => (name, args.trim()),
            None => (rest, ""),
        };

        if name.is_empty() {
            return None;
        }

        Some(Self {
            name: name.to_lowercase(),
            args: args.to_string(),
        })
    }
}

/// Who may run a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authorization {
    Admin,
    /// Administrators, or the roles configured for the command.
    Gated,
    /// Administrators, or the responsible roles set in `!acao_setup`.
    ActionManager,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Setup,
    Set,
    SetupCargos,
    Adv,
    Purge,
    Servidores,
    Ficha,
    Comandos,
    Ponto,
    PontoRelatorio,
    PontoAjustar,
    Ticket,
    AcaoSetup,
    Acao,
    Convite,
}

impl Command {
    pub const ALL: [Command; 15] = [
        Command::Setup,
        Command::Set,
        Command::SetupCargos,
        Command::Adv,
        Command::Purge,
        Command::Servidores,
        Command::Ficha,
        Command::Comandos,
        Command::Ponto,
        Command::PontoRelatorio,
        Command::PontoAjustar,
        Command::Ticket,
        Command::AcaoSetup,
        Command::Acao,
        Command::Convite,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Setup => "setup",
            Self::Set => "set",
            Self::SetupCargos => "setup_cargos",
            Self::Adv => "adv",
            Self::Purge => "purge",
            Self::Servidores => "servidores",
            Self::Ficha => "ficha",
            Self::Comandos => "comandos",
            Self::Ponto => "ponto",
            Self::PontoRelatorio => "ponto_relatorio",
            Self::PontoAjustar => "ponto_ajustar",
            Self::Ticket => "ticket",
            Self::AcaoSetup => "acao_setup",
            Self::Acao => "acao",
            Self::Convite => "convite",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|command| command.name() == name)
    }

    pub fn authorization(&self) -> Authorization {
        match self {
            Self::Set
            | Self::Adv
            | Self::Purge
            | Self::Ficha
            | Self::Comandos
            | Self::Ponto
            | Self::PontoRelatorio => Authorization::Gated,
            Self::Setup
            | Self::SetupCargos
            | Self::Servidores
            | Self::PontoAjustar
            | Self::Ticket
            | Self::Convite => Authorization::Admin,
            Self::AcaoSetup | Self::Acao => Authorization::ActionManager,
        }
    }

    /// Usage line shown by `!comandos`, without the prefix.
    pub fn usage(&self) -> &'static str {
        match self {
            Self::Setup => "setup",
            Self::Set => "set",
            Self::SetupCargos => "setup_cargos",
            Self::Adv => "adv <id|@membro> <motivo>",
            Self::Purge => "purge [quantidade]",
            Self::Servidores => "servidores",
            Self::Ficha => "ficha <id|@membro>",
            Self::Comandos => "comandos",
            Self::Ponto => "ponto [id|@membro]",
            Self::PontoRelatorio => "ponto_relatorio",
            Self::PontoAjustar => "ponto_ajustar <id|@membro> <±minutos>",
            Self::Ticket => "ticket",
            Self::AcaoSetup => "acao_setup",
            Self::Acao => "acao",
            Self::Convite => "convite",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Setup => "Assistente de configuração de canais e cargos",
            Self::Set => "Publica o painel de cadastro",
            Self::SetupCargos => "Define quais cargos podem usar cada comando",
            Self::Adv => "Aplica uma advertência",
            Self::Purge => "Apaga mensagens do canal",
            Self::Servidores => "Lista os servidores do bot",
            Self::Ficha => "Mostra a ficha de um membro",
            Self::Comandos => "Lista os comandos",
            Self::Ponto => "Mostra o tempo em call",
            Self::PontoRelatorio => "Ranking de tempo em call",
            Self::PontoAjustar => "Ajusta o tempo em call de um membro",
            Self::Ticket => "Publica o painel de tickets",
            Self::AcaoSetup => "Configura tipos, responsáveis e canais de ações",
            Self::Acao => "Cria uma ação a partir de um tipo cadastrado",
            Self::Convite => "Publica o convite do bot para outros servidores",
        }
    }
}

/// Checks whether the actor may run `command` in the guild.
///
/// # Returns
/// - `Ok(())` - Actor is authorized
/// - `Err(AppError::Permission)` - Missing administrator bit or configured role
pub async fn authorize(
    db: &DatabaseConnection,
    command: Command,
    guild_id: u64,
    actor: &Actor,
) -> Result<(), AppError> {
    match command.authorization() {
        Authorization::Admin => actor.require_admin(),
        Authorization::Gated => {
            PermissionService::new(db)
                .check(guild_id, command.name(), &actor.role_ids, actor.is_admin)
                .await
        }
        Authorization::ActionManager => {
            ActionService::new(db)
                .require_responsible(guild_id, &action_actor(actor.clone()))
                .await?;
            Ok(())
        }
    }
}

/// Runs a parsed invocation. Unknown command names are ignored.
pub async fn dispatch(
    handler: &Handler,
    ctx: &Context,
    message: &Message,
    invocation: Invocation,
) -> Result<(), AppError> {
    let Some(command) = Command::from_name(&invocation.name) else {
        return Ok(());
    };
    let Some(guild_id) = message.guild_id else {
        return Ok(());
    };

    handler
        .cooldowns
        .check(message.author.id.get(), command.name())?;

    let actor = Actor::from_message(ctx, message).await?;
    authorize(&handler.db, command, guild_id.get(), &actor).await?;

    tracing::debug!(
        "Running !{} for {} in guild {}",
        command.name(),
        actor.user_id,
        guild_id
    );

    let db = &handler.db;
    let args = invocation.args.as_str();
    match command {
        Command::Setup => setup::setup(db, ctx, message, guild_id).await,
        Command::SetupCargos => setup::setup_cargos(db, ctx, message, guild_id).await,
        Command::Set => registration::set(db, ctx, message, guild_id).await,
        Command::Ficha => registration::ficha(db, ctx, message, guild_id, args).await,
        Command::Adv => {
            adv::adv(db, &handler.warning_locks, ctx, message, guild_id, &actor, args).await
        }
        Command::Purge => purge::purge(ctx, message, args).await,
        Command::Servidores => servidores::servidores(ctx, message).await,
        Command::Comandos => comandos::comandos(db, ctx, message, guild_id, &handler.prefix).await,
        Command::Ponto => ponto::ponto(db, ctx, message, guild_id, &actor, args).await,
        Command::PontoRelatorio => ponto::ranking(db, ctx, message, guild_id).await,
        Command::PontoAjustar => ponto::adjust(db, ctx, message, guild_id, args).await,
        Command::Ticket => ticket::ticket(ctx, message).await,
        Command::AcaoSetup => acao::acao_setup(db, ctx, message, guild_id).await,
        Command::Acao => acao::acao(db, ctx, message, guild_id, &handler.prefix).await,
        Command::Convite => convite::convite(ctx, message).await,
    }
}

/// Resolves a member argument, falling back to cached nicknames of the form
/// `Name | id` when neither the index nor the records know the id.
pub async fn resolve_member(
    db: &DatabaseConnection,
    ctx: &Context,
    guild_id: GuildId,
    input: &str,
) -> Result<u64, AppError> {
    match LookupService::new(db).resolve(guild_id.get(), input).await {
        Ok(resolved) => Ok(resolved.user_id),
        Err(AppError::NotFound(message)) => {
            let wanted = input.trim();
            let found = ctx.cache.guild(guild_id).and_then(|guild| {
                guild
                    .members
                    .values()
                    .find(|member| {
                        member
                            .nick
                            .as_deref()
                            .is_some_and(|nick| nickname_matches(nick, wanted))
                    })
                    .map(|member| member.user.id.get())
            });

            match found {
                Some(user_id) => {
                    tracing::debug!("Resolved {} through cached nickname", wanted);
                    Ok(user_id)
                }
                None => Err(AppError::NotFound(message)),
            }
        }
        Err(e) => Err(e),
    }
}

/// Splits the leading member argument from the rest.
pub fn split_target(args: &str) -> Option<(&str, &str)> {
    let args = args.trim();
    if args.is_empty() {
        return None;
    }

    Some(match args.split_once(char::is_whitespace) {
        Some((target, rest)) => (target, rest.trim()),
        None => (args, ""),
    })
}
