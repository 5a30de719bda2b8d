//! Viewer Session
//!
//! Host-level state of the animator: the live asset, the selected profile and
//! the custom parameters. Every load, replace or selection change is routed
//! through here and turned into an [`AnimationDriver`] reconfiguration.
//!
//! # Lifecycle
//!
//! ```text
//! new() ──► start() ──► [load / replace / select / tune]* ──► teardown()
//!  Idle      Running                Running                   Suspended
//! ```
//!
//! A load only becomes visible once the renderer decoded it: on failure the
//! previous asset and its running motion are left exactly as they were, and
//! the temporary handle created for the failed file is revoked.

use serde::Serialize;

use crate::assets::{AssetHandle, AssetSource, GLB_MIME, LocalFile, TempHandleStore, validate_glb};
use crate::errors::{AnimatorError, Result};
use crate::host::{AssetDecoder, FrameScheduler, FrameTick, ManualFrameLoop, NodeTransforms};
use crate::motion::{
    ActiveMotion, AnimationDriver, ClipSelector, CustomParam, CustomParams, DriverState, ProfileId,
};
use crate::settings::AnimatorSettings;

/// What the export surface needs to offer the current model for download.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRequest {
    pub source_uri: String,
    pub suggested_name: String,
}

pub struct ViewerSession<R, F>
where
    R: AssetDecoder + NodeTransforms,
    F: FrameScheduler,
{
    renderer: R,
    frames: F,
    temp_store: TempHandleStore,
    settings: AnimatorSettings,

    current: Option<AssetHandle>,
    file_name: String,
    profile: ProfileId,
    params: CustomParams,

    selector: ClipSelector,
    driver: AnimationDriver,
}

impl<R, F> ViewerSession<R, F>
where
    R: AssetDecoder + NodeTransforms,
    F: FrameScheduler,
{
    pub fn new(renderer: R, frames: F, temp_store: TempHandleStore, settings: AnimatorSettings) -> Self {
        Self {
            renderer,
            frames,
            temp_store,
            file_name: settings.initial_model_name.clone(),
            profile: settings.initial_profile,
            params: settings.custom_params.clamped(),
            selector: ClipSelector::new(settings.clip_policy),
            settings,
            current: None,
            driver: AnimationDriver::new(),
        }
    }

    /// Loads the configured initial model, if any.
    pub async fn start(&mut self) -> Result<()> {
        let Some(uri) = self.settings.initial_model_uri.clone() else {
            log::info!("No initial model configured; waiting for a file");
            return Ok(());
        };
        let name = self.settings.initial_model_name.clone();
        self.load_uri(&uri, &name).await
    }

    /// Loads a model the renderer resolves on its own (static path, remote URL).
    pub async fn load_uri(&mut self, uri: &str, name: &str) -> Result<()> {
        self.ensure_active()?;
        self.install(AssetSource::Uri(uri.to_string()), name.to_string()).await
    }

    /// Accepts one user-supplied file.
    ///
    /// Rejected files leave the session untouched.
    pub async fn on_file_accepted(&mut self, file: LocalFile) -> Result<()> {
        self.ensure_active()?;
        if let Err(err) = validate_glb(&file) {
            log::warn!("{err}");
            return Err(err);
        }

        let LocalFile { name, bytes } = file;
        let handle = self.temp_store.create(bytes, GLB_MIME);
        log::debug!("Exposed '{name}' as {}", handle.uri());
        self.install(AssetSource::Local(handle), name).await
    }

    /// Drop-zone entry point: only the first file of a drop is considered.
    pub async fn on_files_dropped(&mut self, files: Vec<LocalFile>) -> Result<()> {
        let mut files = files.into_iter();
        let Some(first) = files.next() else {
            return Ok(());
        };
        let ignored = files.len();
        if ignored > 0 {
            log::debug!("Ignoring {ignored} extra dropped file(s)");
        }
        self.on_file_accepted(first).await
    }

    /// Switches the requested profile. Restarts the motion from its initial state.
    pub fn select_profile(&mut self, profile: ProfileId) {
        if self.is_torn_down() {
            log::warn!("Profile change to '{profile}' ignored: session torn down");
            return;
        }
        if profile == self.profile {
            return;
        }
        log::info!("Profile: {} -> {profile}", self.profile);
        self.profile = profile;
        self.reconfigure();
    }

    /// Updates one custom parameter. Takes effect on the next frame without restarting.
    pub fn set_custom_param(&mut self, param: CustomParam, value: f32) {
        if self.is_torn_down() {
            log::warn!("Parameter change '{param}' ignored: session torn down");
            return;
        }
        self.params.set(param, value);
        log::trace!("{param} = {}", self.params.get(param));
    }

    pub fn set_custom_params(&mut self, params: CustomParams) {
        if self.is_torn_down() {
            log::warn!("Parameter change ignored: session torn down");
            return;
        }
        self.params = params.clamped();
    }

    /// Delivers one frame tick. Returns whether the scene was mutated.
    pub fn dispatch(&mut self, tick: FrameTick) -> bool {
        self.driver.step(tick, &self.frames, &mut self.renderer, &self.params)
    }

    /// Cancels the active motion and releases the live asset. Idempotent.
    pub fn teardown(&mut self) {
        if self.is_torn_down() {
            return;
        }
        self.driver.suspend(&mut self.frames);
        if let Some(mut asset) = self.current.take() {
            asset.release(&mut self.renderer);
        }
        log::info!("Viewer session torn down");
    }

    #[must_use]
    pub fn export_request(&self) -> Option<ExportRequest> {
        self.current.as_ref().map(|asset| ExportRequest {
            source_uri: asset.source_uri().to_string(),
            suggested_name: asset.export_name(),
        })
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    #[inline]
    #[must_use]
    pub fn driver_state(&self) -> DriverState {
        self.driver.state()
    }

    /// The requested profile, even while an embedded clip overrides it.
    #[must_use]
    pub fn active_profile(&self) -> ProfileId {
        self.profile
    }

    #[must_use]
    pub fn active_clip_name(&self) -> Option<&str> {
        self.driver.motion().and_then(ActiveMotion::clip_name)
    }

    #[must_use]
    pub fn current_asset(&self) -> Option<&AssetHandle> {
        self.current.as_ref()
    }

    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    #[must_use]
    pub fn custom_params(&self) -> &CustomParams {
        &self.params
    }

    #[must_use]
    pub fn settings(&self) -> &AnimatorSettings {
        &self.settings
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn frames(&self) -> &F {
        &self.frames
    }

    #[must_use]
    pub fn temp_store(&self) -> &TempHandleStore {
        &self.temp_store
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn is_torn_down(&self) -> bool {
        self.driver.state() == DriverState::Suspended
    }

    fn ensure_active(&self) -> Result<()> {
        if self.is_torn_down() {
            return Err(AnimatorError::SessionSuspended);
        }
        Ok(())
    }

    /// Decodes `source` and, on success, swaps it in for the live asset.
    async fn install(&mut self, mut source: AssetSource, name: String) -> Result<()> {
        let decoded = match self.renderer.decode(source.uri()).await {
            Ok(decoded) => decoded,
            Err(err) => {
                source.release();
                log::error!("Failed to load '{name}': {err}");
                return Err(err);
            }
        };

        let asset = AssetHandle::new(source, name, decoded);
        log::info!(
            "Loaded '{}' ({} embedded clip(s){})",
            asset.name(),
            asset.clips().len(),
            if asset.clips().is_empty() {
                String::new()
            } else {
                format!(": {}", asset.clip_names().join(", "))
            }
        );

        self.file_name = asset.name().to_string();
        self.driver.stop(&mut self.frames);
        if let Some(mut previous) = self.current.replace(asset) {
            previous.release(&mut self.renderer);
        }

        self.reconfigure();
        Ok(())
    }

    /// Re-resolves profile or clip for the live asset and restarts the driver.
    fn reconfigure(&mut self) {
        let Some(root) = self.current.as_ref().and_then(AssetHandle::root) else {
            self.driver.stop(&mut self.frames);
            return;
        };
        let clips = self.current.as_ref().map_or(&[][..], AssetHandle::clips);

        let motion = match self.selector.bind(&self.renderer, root, clips, self.profile) {
            Some(binding) => ActiveMotion::Clip(binding),
            None => ActiveMotion::profile(self.profile),
        };
        self.driver.start(&mut self.frames, root, motion);
    }
}

impl<R> ViewerSession<R, ManualFrameLoop>
where
    R: AssetDecoder + NodeTransforms,
{
    /// Runs one host frame: advances the loop and dispatches every pending tick.
    ///
    /// Returns the number of ticks that mutated the scene.
    pub fn frame(&mut self, dt: f32) -> usize {
        let ticks = self.frames.advance(dt);
        let mut applied = 0;
        for tick in ticks {
            if self.dispatch(tick) {
                applied += 1;
            }
        }
        applied
    }

    /// Mutable access to the loop, for simulating host-side tick races.
    pub fn frames_mut(&mut self) -> &mut ManualFrameLoop {
        &mut self.frames
    }
}

impl<R, F> Drop for ViewerSession<R, F>
where
    R: AssetDecoder + NodeTransforms,
    F: FrameScheduler,
{
    fn drop(&mut self) {
        self.teardown();
    }
}
