use std::sync::Arc;

use log::debug;
use parking_lot::RwLock;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::{
    collision::{bvh::Bvh, contact::Resolution},
    config::{BvhConfig, ResolveOptions},
    core::{
        scene::{Layers, SceneNode},
        types::{Capsule, Triangle},
    },
    error::Result,
    utils::logging::ScopedTimer,
};

/// Shared static collision mesh that many threads can query while a rebuild
/// is prepared off to the side.
///
/// Rebuilds construct a new tree without holding the lock and then swap it
/// in; readers see either the old tree or the new one, never a partial one.
pub struct CollisionWorld {
    bvh: RwLock<Arc<Bvh>>,
    config: BvhConfig,
    pub options: ResolveOptions,
    parallel_enabled: bool,
}

impl Default for CollisionWorld {
    fn default() -> Self {
        Self {
            bvh: RwLock::new(Arc::new(Bvh::default())),
            config: BvhConfig::default(),
            options: ResolveOptions::default(),
            parallel_enabled: cfg!(feature = "parallel"),
        }
    }
}

impl CollisionWorld {
    pub fn new(config: BvhConfig) -> Result<Self> {
        Ok(Self {
            bvh: RwLock::new(Arc::new(Bvh::build_with_config(Vec::new(), config)?)),
            config,
            ..Self::default()
        })
    }

    pub fn config(&self) -> &BvhConfig {
        &self.config
    }

    /// Enables or disables rayon for batch queries. Has no effect without the
    /// `parallel` feature.
    pub fn set_parallel_enabled(&mut self, enabled: bool) {
        self.parallel_enabled = enabled && cfg!(feature = "parallel");
    }

    pub fn parallel_enabled(&self) -> bool {
        self.parallel_enabled
    }

    /// Current tree. Holding the snapshot keeps it alive across rebuilds.
    pub fn snapshot(&self) -> Arc<Bvh> {
        self.bvh.read().clone()
    }

    /// Replaces the mesh. The write lock is only held for the swap.
    pub fn rebuild(&self, triangles: Vec<Triangle>) -> Result<()> {
        let bvh = Bvh::build_with_config(triangles, self.config)?;
        self.publish(bvh);
        Ok(())
    }

    pub fn rebuild_from_scene(&self, root: &SceneNode, layers: &Layers) -> Result<()> {
        let bvh = Bvh::from_scene(root, layers, self.config)?;
        self.publish(bvh);
        Ok(())
    }

    fn publish(&self, bvh: Bvh) {
        let triangles = bvh.triangles().len();
        let previous = std::mem::replace(&mut *self.bvh.write(), Arc::new(bvh));
        debug!(
            "Published collision mesh with {} triangles (replaced {})",
            triangles,
            previous.triangles().len()
        );
    }

    pub fn capsule_intersect(&self, capsule: &Capsule) -> Option<Resolution> {
        self.snapshot().capsule_intersect_with(capsule, &self.options)
    }

    /// Resolves many capsules against one snapshot; results keep input order.
    pub fn capsule_intersect_batch(&self, capsules: &[Capsule]) -> Vec<Option<Resolution>> {
        let _timer = ScopedTimer::new("capsule batch");
        let bvh = self.snapshot();
        let options = self.options;

        #[cfg(feature = "parallel")]
        if self.parallel_enabled {
            return capsules
                .par_iter()
                .map(|capsule| bvh.capsule_intersect_with(capsule, &options))
                .collect();
        }

        capsules
            .iter()
            .map(|capsule| bvh.capsule_intersect_with(capsule, &options))
            .collect()
    }
}
