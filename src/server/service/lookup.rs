//! Member resolution for `!adv` and `!ficha`.
//!
//! Tokens are tried as a mention, then as an assigned id through the index and the
//! approved-record scan, then as a raw snowflake. Nickname matching needs the member
//! cache, so the bot layer applies [`nickname_matches`] itself when resolution fails.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::{member_index::MemberIndexRepository, registration::RegistrationRepository},
    error::AppError,
};

/// A parsed lookup argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupToken {
    Mention(u64),
    Numeric(String),
}

/// How a member was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupSource {
    Mention,
    Index,
    RecordScan,
    Snowflake,
    Nickname,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedMember {
    pub user_id: u64,
    pub source: LookupSource,
}

/// Parses `<@id>`, `<@!id>` or a bare number.
pub fn parse_token(input: &str) -> Option<LookupToken> {
    let input = input.trim();

    if let Some(inner) = input.strip_prefix("<@").and_then(|s| s.strip_suffix('>')) {
        let inner = inner.strip_prefix('!').unwrap_or(inner);
        return inner.parse::<u64>().ok().map(LookupToken::Mention);
    }

    if !input.is_empty() && input.chars().all(|c| c.is_ascii_digit()) {
        return Some(LookupToken::Numeric(input.to_string()));
    }

    None
}

/// Discord ids are 17 to 20 digits long.
pub fn is_snowflake_shaped(value: &str) -> bool {
    (17..=20).contains(&value.len()) && value.chars().all(|c| c.is_ascii_digit())
}

/// Matches nicknames of the form `Name | assigned_id`.
pub fn nickname_matches(nickname: &str, assigned_id: &str) -> bool {
    nickname
        .split_once('|')
        .is_some_and(|(_, id)| id.trim() == assigned_id.trim())
}

pub struct LookupService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> LookupService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Resolves an assigned id through the index, falling back to the newest approved
    /// registration.
    pub async fn find_by_assigned_id(
        &self,
        guild_id: u64,
        assigned_id: &str,
    ) -> Result<Option<ResolvedMember>, AppError> {
        if let Some(entry) = MemberIndexRepository::new(self.db)
            .find_by_assigned_id(guild_id, assigned_id)
            .await?
        {
            return Ok(Some(ResolvedMember {
                user_id: entry.user_id,
                source: LookupSource::Index,
            }));
        }

        let scanned = RegistrationRepository::new(self.db)
            .find_latest_approved_by_assigned_id(guild_id, assigned_id)
            .await?;

        Ok(scanned.map(|registration| ResolvedMember {
            user_id: registration.user_id,
            source: LookupSource::RecordScan,
        }))
    }

    /// Drops a departed member's index entry. Lookups still resolve through the record
    /// scan afterwards.
    pub async fn remove_member(&self, guild_id: u64, user_id: u64) -> Result<u64, AppError> {
        Ok(MemberIndexRepository::new(self.db)
            .remove_user(guild_id, user_id)
            .await?)
    }

    /// Resolves a lookup argument to a Discord user id.
    ///
    /// # Returns
    /// - `Ok(ResolvedMember)` - Resolved id and how it was found
    /// - `Err(AppError::Validation)` - Argument is neither a mention nor a number
    /// - `Err(AppError::NotFound)` - No member matches
    pub async fn resolve(&self, guild_id: u64, input: &str) -> Result<ResolvedMember, AppError> {
        let token = parse_token(input).ok_or_else(|| {
            AppError::Validation("Informe uma menção ou um ID numérico.".to_string())
        })?;

        match token {
            LookupToken::Mention(user_id) => Ok(ResolvedMember {
                user_id,
                source: LookupSource::Mention,
            }),
            LookupToken::Numeric(value) => {
                if let Some(found) = self.find_by_assigned_id(guild_id, &value).await? {
                    return Ok(found);
                }

                if is_snowflake_shaped(&value) {
                    if let Ok(user_id) = value.parse::<u64>() {
                        return Ok(ResolvedMember {
                            user_id,
                            source: LookupSource::Snowflake,
                        });
                    }
                }

                Err(AppError::NotFound(format!(
                    "Não encontrei membro com ID `{}`.",
                    value
                )))
            }
        }
    }
}
