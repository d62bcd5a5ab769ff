//! Game data service - owns the loaded actor cache and asset resolution
//!
//! The service performs its initial load during `initialize`; the
//! caller decides whether a failed initial load is fatal. Refreshes
//! replace the whole actor map behind a single reference swap, so
//! readers holding an old snapshot see consistent but possibly stale
//! data, never a half-updated map.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

use crate::domain::entities::{CprActor, Model};
use crate::infrastructure::assets::AssetResolver;
use crate::infrastructure::config::FoundryConfig;
use crate::infrastructure::database::load_database;

/// Default image served when a model has none or conversion fails.
const DEFAULT_IMAGE: &str = "icons/vtt.png";
/// Default thumbnail, a larger variant of the default image.
const DEFAULT_THUMBNAIL: &str = "icons/vtt-512.png";

pub struct GameDataService {
    config: FoundryConfig,
    assets: AssetResolver,
    actors: RwLock<Arc<HashMap<String, CprActor>>>,
}

impl GameDataService {
    /// Build the service and perform the initial load. Errors are
    /// returned to the caller, which owns the decision to treat a
    /// failed startup load as fatal.
    pub async fn initialize(config: FoundryConfig) -> Result<Self> {
        let assets = AssetResolver::new(config.base_url.clone(), config.base_path.clone());
        let actors = Self::load_actors(&config.actors_db)
            .await
            .context("initial actor database load failed")?;
        info!(actors = actors.len(), "actor database loaded");
        Ok(Self {
            config,
            assets,
            actors: RwLock::new(Arc::new(actors)),
        })
    }

    async fn load_actors(path: &Path) -> Result<HashMap<String, CprActor>> {
        let actors = load_database(path, CprActor::is_actor, CprActor::from_model, false)
            .await
            .with_context(|| format!("failed to load actor database {}", path.display()))?;
        Ok(actors
            .into_iter()
            .map(|actor| (actor.id().to_string(), actor))
            .collect())
    }

    /// Current actor map snapshot. With `force_refresh` the database is
    /// re-read and the cache replaced before returning; otherwise the
    /// existing snapshot is returned as-is, reference-equal across
    /// calls.
    #[instrument(skip(self))]
    pub async fn get_actors(&self, force_refresh: bool) -> Result<Arc<HashMap<String, CprActor>>> {
        if force_refresh {
            let fresh = Arc::new(Self::load_actors(&self.config.actors_db).await?);
            let mut guard = self.actors.write().await;
            *guard = Arc::clone(&fresh);
            info!(actors = fresh.len(), "actor cache refreshed");
            return Ok(fresh);
        }
        Ok(Arc::clone(&*self.actors.read().await))
    }

    /// Look up one actor by id. Absence is not an error. The returned
    /// actor is the caller's own read-only copy.
    pub async fn get_actor(&self, id: &str) -> Result<Option<CprActor>> {
        debug!(actor = %id, "fetching actor");
        Ok(self.get_actors(false).await?.get(id).cloned())
    }

    /// Force a reload of the actor database; returns the new actor
    /// count.
    #[instrument(skip(self))]
    pub async fn reload(&self) -> Result<usize> {
        Ok(self.get_actors(true).await?.len())
    }

    /// Servable URL for a model's image, with the stock default as
    /// fallback.
    pub async fn get_image(&self, model: &Model) -> Option<String> {
        self.assets
            .resolve_image_url(Some(&model.img), Some(DEFAULT_IMAGE))
            .await
    }

    /// Servable URL for a model's thumbnail, preferring the dedicated
    /// thumbnail path over the full image.
    pub async fn get_thumbnail(&self, model: &Model) -> Option<String> {
        let path = model.thumbnail.as_deref().unwrap_or(&model.img);
        self.assets
            .resolve_image_url(Some(path), Some(DEFAULT_THUMBNAIL))
            .await
    }

    /// Servable URL for a d10 face image. With `specials`, faces 1 and
    /// 10 use the critical-failure/critical-success art.
    pub async fn get_die_image(&self, face: i32, specials: bool) -> Option<String> {
        self.assets
            .resolve_image_url(Some(&die_image_path(face, specials)), None)
            .await
    }

    pub fn config(&self) -> &FoundryConfig {
        &self.config
    }

    pub fn assets(&self) -> &AssetResolver {
        &self.assets
    }
}

/// Relative path of the die-face art shipped by the game system. Bonus
/// dice are recorded signed, so the face value is taken absolute.
pub fn die_image_path(face: i32, specials: bool) -> String {
    let face = face.abs();
    let suffix = match (specials, face) {
        (true, 1) => "_fail",
        (true, 10) => "_preem",
        _ => "",
    };
    format!("systems/cyberpunk-red-core/icons/dice/red/d10_{face}{suffix}.svg")
}
