//! Minimal scene-graph collaborator used to harvest world-space triangles.
//!
//! Only [`NodeKind::Mesh`] nodes contribute geometry; groups just carry a
//! transform for their children.

use glam::Mat4;
use log::debug;
use serde::{Deserialize, Serialize};

use super::{mesh::Geometry, types::Transform, types::Triangle};
use crate::error::Result;

/// 32-slot layer membership mask. Defaults to layer 0 only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Layers {
    pub mask: u32,
}

impl Default for Layers {
    fn default() -> Self {
        Self { mask: 1 }
    }
}

impl Layers {
    pub const ALL: Layers = Layers { mask: u32::MAX };
    pub const NONE: Layers = Layers { mask: 0 };

    /// Membership in exactly one layer.
    pub fn only(layer: u32) -> Self {
        let mut layers = Self::NONE;
        layers.set(layer);
        layers
    }

    pub fn set(&mut self, layer: u32) {
        self.mask = bit(layer);
    }

    pub fn enable(&mut self, layer: u32) {
        self.mask |= bit(layer);
    }

    pub fn disable(&mut self, layer: u32) {
        self.mask &= !bit(layer);
    }

    pub fn toggle(&mut self, layer: u32) {
        self.mask ^= bit(layer);
    }

    pub fn enable_all(&mut self) {
        self.mask = u32::MAX;
    }

    pub fn disable_all(&mut self) {
        self.mask = 0;
    }

    pub fn is_enabled(&self, layer: u32) -> bool {
        self.mask & bit(layer) != 0
    }

    /// True when the two masks share at least one layer.
    pub fn test(&self, other: &Layers) -> bool {
        self.mask & other.mask != 0
    }
}

fn bit(layer: u32) -> u32 {
    1u32.checked_shl(layer).unwrap_or(0)
}

/// What a scene node carries besides its transform.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub enum NodeKind {
    #[default]
    Group,
    Mesh { geometry: Geometry, layers: Layers },
}

/// Scene node with a local transform and owned children.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneNode {
    pub transform: Transform,
    pub kind: NodeKind,
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    pub fn group(transform: Transform) -> Self {
        Self {
            transform,
            kind: NodeKind::Group,
            children: Vec::new(),
        }
    }

    pub fn mesh(transform: Transform, geometry: Geometry, layers: Layers) -> Self {
        Self {
            transform,
            kind: NodeKind::Mesh { geometry, layers },
            children: Vec::new(),
        }
    }

    pub fn with_child(mut self, child: SceneNode) -> Self {
        self.children.push(child);
        self
    }
}

/// Walks `root` depth-first and returns the world-space triangles of every
/// mesh whose layers pass `filter`. The root's own transform is applied.
pub fn collect_triangles(root: &SceneNode, filter: &Layers) -> Result<Vec<Triangle>> {
    let mut triangles = Vec::new();
    let mut meshes = 0usize;
    collect_node(root, &Mat4::IDENTITY, filter, &mut triangles, &mut meshes)?;
    debug!(
        "Harvested {} triangles from {} meshes",
        triangles.len(),
        meshes
    );
    Ok(triangles)
}

fn collect_node(
    node: &SceneNode,
    parent_world: &Mat4,
    filter: &Layers,
    out: &mut Vec<Triangle>,
    meshes: &mut usize,
) -> Result<()> {
    let world = *parent_world * node.transform.to_matrix();

    if let NodeKind::Mesh { geometry, layers } = &node.kind {
        if filter.test(layers) {
            out.extend(geometry.triangles(&world)?);
            *meshes += 1;
        }
    }

    for child in &node.children {
        collect_node(child, &world, filter, out, meshes)?;
    }
    Ok(())
}
