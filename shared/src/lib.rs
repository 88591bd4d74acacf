//! Shared domain types and collaborator traits used across the Riftwatch
//! components.
//!
//! Everything the reconciliation core knows about the outside world is
//! defined here: the persisted entities ([`Player`], [`Game`]), the
//! transient match and ranking views, and the traits the remote sources,
//! the repository and the notification sink implement.

pub mod errors;
pub mod format;
pub mod live_match;
pub mod ranking;
pub mod traits;

/// Opaque identifier of a notification post returned by the sink.
pub type PostId = String;

/// Settings key under which the credential fingerprint is persisted.
pub const CREDENTIAL_FINGERPRINT_KEY: &str = "riot_api_key_fingerprint";

/// A tracked player as stored in the repository.
///
/// `summoner_id` is only ever set by the identity resolver and is valid
/// only under the credential fingerprint currently persisted in settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: i64,
    /// Human label used in notification text.
    pub display_name: String,
    /// In-game name used to resolve the summoner id.
    pub game_name: String,
    pub summoner_id: Option<String>,
    /// External profile slug used to build live-match viewer links.
    pub profile_slug: String,
    /// Last ranking position announced for this player, if any.
    pub last_rank_position: Option<u32>,
}

/// A match the tracker has announced, kept until its result is posted.
///
/// A row exists if and only if the start-of-match notification went out;
/// `finished` flips to true exactly once, when the result reply is posted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    pub id: i64,
    pub finished: bool,
    /// Post created for the start-of-match notification, replied to when
    /// the result is announced.
    pub post_id: PostId,
}

/// Riot platform routing for the summoner, spectator and match endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Euw,
    Eune,
    Na,
    Br,
    Kr,
    Jp,
}

impl Region {
    pub fn to_endpoint(&self) -> String {
        match self {
            Region::Euw => "euw1.api.riotgames.com".to_string(),
            Region::Eune => "eun1.api.riotgames.com".to_string(),
            Region::Na => "na1.api.riotgames.com".to_string(),
            Region::Br => "br1.api.riotgames.com".to_string(),
            Region::Kr => "kr.api.riotgames.com".to_string(),
            Region::Jp => "jp1.api.riotgames.com".to_string(),
        }
    }

    /// Path segment used by the external match-analysis site.
    pub fn to_analysis_slug(&self) -> &'static str {
        match self {
            Region::Euw => "euw",
            Region::Eune => "eune",
            Region::Na => "na",
            Region::Br => "br",
            Region::Kr => "kr",
            Region::Jp => "jp",
        }
    }
}

impl From<Region> for String {
    fn from(region: Region) -> Self {
        match region {
            Region::Euw => "EUW".to_string(),
            Region::Eune => "EUNE".to_string(),
            Region::Na => "NA".to_string(),
            Region::Br => "BR".to_string(),
            Region::Kr => "KR".to_string(),
            Region::Jp => "JP".to_string(),
        }
    }
}

impl TryFrom<String> for Region {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_uppercase().as_str() {
            "EUW" => Ok(Region::Euw),
            "EUNE" => Ok(Region::Eune),
            "NA" => Ok(Region::Na),
            "BR" => Ok(Region::Br),
            "KR" => Ok(Region::Kr),
            "JP" => Ok(Region::Jp),
            _ => Err(format!("Unknown region: {}", value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_conversions() {
        assert_eq!(Region::Euw.to_endpoint(), "euw1.api.riotgames.com");
        assert_eq!(Region::Euw.to_analysis_slug(), "euw");
        let s: String = Region::Br.into();
        assert_eq!(s, "BR");
        assert_eq!(Region::try_from("euw".to_string()).unwrap(), Region::Euw);
        assert!(Region::try_from("ATLANTIS".to_string()).is_err());
    }
}
