//! Cancellable world loader.
//!
//! The loader is a small state machine polled once per tick. It suspends
//! while the bundle streams in and again while the named resource loads,
//! checking for cancellation every time it resumes. Whatever handles it has
//! acquired are handed back to the storage when it finishes, fails or is
//! cancelled.

use std::task::Poll;

use bevy::log::{debug, info, warn};

use super::error::LoadError;
use super::host::{BundleStorage, SceneSpawner};
use crate::core::WorldSource;

/// Progress of a [`WorldLoader`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadStatus {
    /// Waiting for the bundle
    Pending,
    /// Bundle is open, waiting for the named resource
    BundleLoaded,
    /// Resource is available. Instantiation follows in the same poll, so
    /// `status()` moves straight from `BundleLoaded` to `Completed`
    ResourceLoaded,
    Failed,
    Cancelled,
    /// The world instance was created
    Completed,
}

impl LoadStatus {
    /// Whether the loader will make no further progress.
    pub fn is_finished(self) -> bool {
        matches!(
            self,
            LoadStatus::Failed | LoadStatus::Cancelled | LoadStatus::Completed
        )
    }
}

/// One attempt at loading and instantiating the world.
pub struct WorldLoader<B, A> {
    source_path: String,
    asset_name: String,
    status: LoadStatus,
    cancel_requested: bool,
    bundle: Option<B>,
    asset: Option<A>,
}

impl<B, A> WorldLoader<B, A> {
    /// Start streaming the bundle described by `source`.
    pub fn start<H>(source: &WorldSource, host: &mut H) -> Self
    where
        H: BundleStorage<Bundle = B, Asset = A>,
    {
        debug!("Loading world bundle '{}'", source.bundle_path);
        let bundle = host.load_bundle(&source.bundle_path);

        Self {
            source_path: source.bundle_path.clone(),
            asset_name: source.asset_name.clone(),
            status: LoadStatus::Pending,
            cancel_requested: false,
            bundle: Some(bundle),
            asset: None,
        }
    }

    pub fn source_path(&self) -> &str {
        &self.source_path
    }

    pub fn status(&self) -> LoadStatus {
        self.status
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel_requested
    }

    /// Flag the loader for cancellation. It aborts the next time it is polled.
    pub fn request_cancel(&mut self) {
        self.cancel_requested = true;
    }

    /// Cancel right away and release anything acquired so far.
    ///
    /// A finished loader stays in its final status.
    pub fn cancel<H>(&mut self, host: &mut H)
    where
        H: BundleStorage<Bundle = B, Asset = A>,
    {
        self.cancel_requested = true;
        if !self.status.is_finished() {
            self.abort(host);
        }
    }

    /// Advance by at most one suspension point.
    ///
    /// Returns the new world instance on the tick the load completes.
    pub fn poll<H>(&mut self, host: &mut H) -> Option<H::Instance>
    where
        H: BundleStorage<Bundle = B, Asset = A> + SceneSpawner<Resource = A>,
    {
        if self.status.is_finished() {
            return None;
        }
        if self.cancel_requested {
            self.abort(host);
            return None;
        }

        match self.status {
            LoadStatus::Pending => {
                self.poll_bundle(host);
                None
            }
            LoadStatus::BundleLoaded => self.poll_asset(host),
            _ => None,
        }
    }

    fn poll_bundle<H>(&mut self, host: &mut H)
    where
        H: BundleStorage<Bundle = B, Asset = A>,
    {
        let Some(bundle) = self.bundle.as_ref() else {
            return;
        };

        let requested = match host.poll_bundle(bundle) {
            Poll::Pending => return,
            Poll::Ready(Err(e)) => Err(e),
            Poll::Ready(Ok(())) => host.load_asset(bundle, &self.asset_name),
        };

        match requested {
            Ok(asset) => {
                debug!("Bundle '{}' open, loading '{}'", self.source_path, self.asset_name);
                self.asset = Some(asset);
                self.status = LoadStatus::BundleLoaded;
            }
            Err(e) => self.fail(e, host),
        }
    }

    fn poll_asset<H>(&mut self, host: &mut H) -> Option<H::Instance>
    where
        H: BundleStorage<Bundle = B, Asset = A> + SceneSpawner<Resource = A>,
    {
        let asset = self.asset.as_ref()?;

        match host.poll_asset(asset) {
            Poll::Pending => None,
            Poll::Ready(Err(e)) => {
                self.fail(e, host);
                None
            }
            Poll::Ready(Ok(())) => {
                let instance = host.instantiate(asset);
                self.status = LoadStatus::Completed;
                info!("World '{}' instantiated from '{}'", self.asset_name, self.source_path);
                self.release(host);
                Some(instance)
            }
        }
    }

    fn fail<H>(&mut self, error: LoadError, host: &mut H)
    where
        H: BundleStorage<Bundle = B, Asset = A>,
    {
        warn!("World load failed: {}", error);
        self.status = LoadStatus::Failed;
        self.release(host);
    }

    fn abort<H>(&mut self, host: &mut H)
    where
        H: BundleStorage<Bundle = B, Asset = A>,
    {
        debug!("World load from '{}' cancelled", self.source_path);
        self.status = LoadStatus::Cancelled;
        self.release(host);
    }

    fn release<H>(&mut self, host: &mut H)
    where
        H: BundleStorage<Bundle = B, Asset = A>,
    {
        if let Some(asset) = self.asset.take() {
            host.release_asset(asset);
        }
        if let Some(bundle) = self.bundle.take() {
            host.release_bundle(bundle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::testing::{FakeAsset, FakeBundle, FakeHost};

    type Loader = WorldLoader<FakeBundle, FakeAsset>;

    fn start(host: &mut FakeHost) -> Loader {
        Loader::start(&WorldSource::default(), host)
    }

    #[test]
    fn walks_through_each_suspension_point() {
        let mut host = FakeHost::default();
        let mut loader = start(&mut host);
        assert_eq!(loader.status(), LoadStatus::Pending);
        assert_eq!(loader.source_path(), "bundles/world.glb");

        host.bundle_state = Poll::Pending;
        assert!(loader.poll(&mut host).is_none());
        assert_eq!(loader.status(), LoadStatus::Pending);

        host.bundle_state = Poll::Ready(Ok(()));
        host.asset_state = Poll::Pending;
        assert!(loader.poll(&mut host).is_none());
        assert_eq!(loader.status(), LoadStatus::BundleLoaded);

        host.asset_state = Poll::Ready(Ok(()));
        let instance = loader.poll(&mut host);
        assert!(instance.is_some());
        assert_eq!(loader.status(), LoadStatus::Completed);
        assert_eq!(host.instantiate_calls, 1);
        assert_eq!(host.instantiated, vec!["World".to_string()]);
        assert!(host.live_bundles.is_empty());
        assert!(host.live_assets.is_empty());
    }

    #[test]
    fn missing_bundle_fails_without_instantiating() {
        let mut host = FakeHost::default();
        host.fail_bundles();
        let mut loader = start(&mut host);

        assert!(loader.poll(&mut host).is_none());
        assert_eq!(loader.status(), LoadStatus::Failed);
        assert!(loader.poll(&mut host).is_none());
        assert_eq!(host.instantiate_calls, 0);
        assert!(host.live_bundles.is_empty());
    }

    #[test]
    fn missing_named_resource_fails_and_releases_bundle() {
        let mut host = FakeHost::default();
        host.bundle_contents = vec!["Lobby".to_string()];
        let mut loader = start(&mut host);

        loader.poll(&mut host);
        assert_eq!(loader.status(), LoadStatus::Failed);
        assert!(host.live_bundles.is_empty());
        assert_eq!(host.instantiate_calls, 0);
    }

    #[test]
    fn resource_failure_releases_both_handles() {
        let mut host = FakeHost::default();
        host.asset_state = Poll::Ready(Err(LoadError::AssetUnavailable {
            name: "World".to_string(),
            details: "corrupt".to_string(),
        }));
        let mut loader = start(&mut host);

        loader.poll(&mut host);
        assert_eq!(loader.status(), LoadStatus::BundleLoaded);
        loader.poll(&mut host);
        assert_eq!(loader.status(), LoadStatus::Failed);
        assert!(host.live_bundles.is_empty());
        assert!(host.live_assets.is_empty());
    }

    #[test]
    fn cancel_releases_partially_acquired_bundle() {
        let mut host = FakeHost::default();
        host.asset_state = Poll::Pending;
        let mut loader = start(&mut host);
        loader.poll(&mut host);
        assert_eq!(host.live_assets.len(), 1);

        loader.cancel(&mut host);
        assert!(loader.is_cancelled());
        assert_eq!(loader.status(), LoadStatus::Cancelled);
        assert!(host.live_bundles.is_empty());
        assert!(host.live_assets.is_empty());

        host.asset_state = Poll::Ready(Ok(()));
        assert!(loader.poll(&mut host).is_none());
        assert_eq!(host.instantiate_calls, 0);
    }

    #[test]
    fn requested_cancel_is_honoured_at_next_resumption() {
        let mut host = FakeHost::default();
        host.bundle_state = Poll::Pending;
        let mut loader = start(&mut host);

        loader.request_cancel();
        assert_eq!(loader.status(), LoadStatus::Pending);
        assert_eq!(host.live_bundles.len(), 1);

        host.bundle_state = Poll::Ready(Ok(()));
        assert!(loader.poll(&mut host).is_none());
        assert_eq!(loader.status(), LoadStatus::Cancelled);
        assert!(host.live_bundles.is_empty());
        assert_eq!(host.instantiate_calls, 0);
    }

    #[test]
    fn cancelling_a_completed_load_keeps_its_status() {
        let mut host = FakeHost::default();
        let mut loader = start(&mut host);
        loader.poll(&mut host);
        assert!(loader.poll(&mut host).is_some());

        loader.cancel(&mut host);
        assert_eq!(loader.status(), LoadStatus::Completed);
    }
}
