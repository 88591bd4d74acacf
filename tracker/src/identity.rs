//! Identity resolution for tracked players.
//!
//! A summoner id returned by the remote source is only valid under the API
//! credential that produced it. The resolver therefore fingerprints the
//! credential, wipes every cached id when the fingerprint changes, and
//! fills in whatever ids are missing afterwards.

use sha2::{Digest, Sha256};
use tracing::{info, warn};

use riftwatch_shared::{
    errors::TrackerError,
    traits::{api::SummonerApi, CachedPlayerSource, CachedSettingSource},
    Player, Region, CREDENTIAL_FINGERPRINT_KEY,
};

pub fn credential_fingerprint(credential: &str) -> String {
    hex::encode(Sha256::digest(credential.as_bytes()))
}

/// Compare the fingerprint of the configured credential against the stored
/// one; on mismatch (including first run) clear every resolved summoner id
/// and persist the new fingerprint.
pub async fn validate_credential_fingerprint<C>(
    cache: &C,
    credential: &str,
) -> Result<(), TrackerError>
where
    C: CachedPlayerSource + CachedSettingSource,
{
    let fingerprint = credential_fingerprint(credential);
    let stored = cache
        .get_setting(CREDENTIAL_FINGERPRINT_KEY)
        .await
        .map_err(TrackerError::Cache)?;

    if stored.as_deref() == Some(fingerprint.as_str()) {
        return Ok(());
    }

    info!("🔑 API credential changed, clearing all resolved summoner ids");
    cache
        .clear_all_summoner_ids()
        .await
        .map_err(TrackerError::Cache)?;
    cache
        .set_setting(CREDENTIAL_FINGERPRINT_KEY, &fingerprint)
        .await
        .map_err(TrackerError::Cache)?;

    Ok(())
}

/// Resolve and persist the summoner id of every player missing one.
///
/// A failed lookup is logged and skipped so one bad entry never blocks the
/// rest of the roster. Returns whether any id was newly persisted, the
/// signal to refresh the in-memory roster.
pub async fn resolve_missing_summoner_ids<C, A>(
    cache: &C,
    api: &A,
    players: &[Player],
    region: Region,
) -> Result<bool, TrackerError>
where
    C: CachedPlayerSource,
    A: SummonerApi,
{
    let mut changed = false;

    for player in players.iter().filter(|p| p.summoner_id.is_none()) {
        info!(
            "fetching summoner id for {} ({})",
            player.display_name, player.game_name
        );
        match api.get_summoner_by_name(player.game_name.clone(), region).await {
            Ok(summoner) => {
                cache
                    .set_summoner_id(player.id, summoner.id)
                    .await
                    .map_err(TrackerError::Cache)?;
                changed = true;
            }
            Err(e) => warn!(
                "summoner lookup failed for {}, will retry next start: {}",
                player.display_name, e
            ),
        }
    }

    Ok(changed)
}
