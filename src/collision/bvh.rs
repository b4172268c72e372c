use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::{
    collision::{contact::Contact, narrowphase::TriangleCapsuleTest},
    config::{BvhConfig, SegmentClamp},
    core::{
        mesh::Aabb,
        scene::{collect_triangles, Layers, SceneNode},
        types::{Capsule, Triangle},
    },
    error::{BvhError, Result},
    utils::logging::ScopedTimer,
};

/// Node of the flat BVH arena.
///
/// Leaves own `triangles[start..start + count]`; internal nodes own two
/// children and an empty range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BvhNode {
    pub bounds: Aabb,
    pub left: Option<usize>,
    pub right: Option<usize>,
    pub start: usize,
    pub count: usize,
    pub depth: u32,
}

impl BvhNode {
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// Borrowed view of a leaf, handed out by [`Bvh::leaves`].
#[derive(Debug, Clone, Copy)]
pub struct BvhLeaf<'a> {
    pub depth: u32,
    pub bounds: Aabb,
    pub triangles: &'a [Triangle],
}

/// Shape summary of a built tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BvhStats {
    pub triangle_count: usize,
    pub node_count: usize,
    pub leaf_count: usize,
    pub max_depth: u32,
    pub largest_leaf: usize,
}

/// Bounding volume hierarchy over a static triangle soup.
///
/// Built once with a median split on the longest axis; immutable afterwards.
/// Rebuilding means building a new `Bvh`. Deserialized trees go through
/// [`Bvh::from_parts`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "BvhParts")]
pub struct Bvh {
    triangles: Vec<Triangle>,
    nodes: Vec<BvhNode>,
    config: BvhConfig,
}

#[derive(Deserialize)]
struct BvhParts {
    triangles: Vec<Triangle>,
    nodes: Vec<BvhNode>,
    config: BvhConfig,
}

impl TryFrom<BvhParts> for Bvh {
    type Error = BvhError;

    fn try_from(parts: BvhParts) -> Result<Self> {
        Self::from_parts(parts.triangles, parts.nodes, parts.config)
    }
}

impl Default for Bvh {
    fn default() -> Self {
        Self::build(Vec::new())
    }
}

impl Bvh {
    const ROOT: usize = 0;

    /// Builds with the default leaf size and depth limit.
    pub fn build(triangles: Vec<Triangle>) -> Self {
        Self::build_unchecked(triangles, BvhConfig::default())
    }

    pub fn build_with_config(triangles: Vec<Triangle>, config: BvhConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build_unchecked(triangles, config))
    }

    /// Harvests the meshes of `root` that pass `layers` and builds over them.
    pub fn from_scene(root: &SceneNode, layers: &Layers, config: BvhConfig) -> Result<Self> {
        config.validate()?;
        let triangles = collect_triangles(root, layers)?;
        Ok(Self::build_unchecked(triangles, config))
    }

    /// Reassembles a tree from a previously built arena.
    ///
    /// Every node range must lie inside `triangles`, and each internal node
    /// must have both children stored after it, so traversal can neither
    /// slice out of bounds nor loop.
    pub fn from_parts(
        triangles: Vec<Triangle>,
        nodes: Vec<BvhNode>,
        config: BvhConfig,
    ) -> Result<Self> {
        config.validate()?;
        if nodes.is_empty() {
            return Err(BvhError::InvalidTree("node arena is empty".to_string()));
        }

        for (index, node) in nodes.iter().enumerate() {
            let in_range = node
                .start
                .checked_add(node.count)
                .is_some_and(|end| end <= triangles.len());
            if !in_range {
                return Err(BvhError::InvalidTree(format!(
                    "node {index} range {}+{} exceeds {} triangles",
                    node.start,
                    node.count,
                    triangles.len()
                )));
            }

            match (node.left, node.right) {
                (None, None) => {}
                (Some(left), Some(right)) => {
                    for child in [left, right] {
                        if child <= index || child >= nodes.len() {
                            return Err(BvhError::InvalidTree(format!(
                                "node {index} has invalid child {child}"
                            )));
                        }
                    }
                }
                _ => {
                    return Err(BvhError::InvalidTree(format!(
                        "node {index} has a single child"
                    )))
                }
            }
        }

        Ok(Self {
            triangles,
            nodes,
            config,
        })
    }

    fn build_unchecked(mut triangles: Vec<Triangle>, config: BvhConfig) -> Self {
        let _timer = ScopedTimer::new("bvh build");

        let mut nodes = Vec::with_capacity(Self::estimate_nodes(triangles.len(), &config));
        let count = triangles.len();
        Self::build_node(&mut nodes, &mut triangles, 0, count, 0, &config);

        let bvh = Self {
            triangles,
            nodes,
            config,
        };
        let stats = bvh.stats();
        debug!(
            "Built BVH: {} triangles, {} nodes, {} leaves, depth {}",
            stats.triangle_count, stats.node_count, stats.leaf_count, stats.max_depth
        );
        bvh
    }

    fn estimate_nodes(triangle_count: usize, config: &BvhConfig) -> usize {
        let leaves = triangle_count.div_ceil(config.max_leaf_triangles.max(1)).max(1);
        2 * leaves - 1
    }

    fn build_node(
        nodes: &mut Vec<BvhNode>,
        triangles: &mut [Triangle],
        start: usize,
        count: usize,
        depth: u32,
        config: &BvhConfig,
    ) -> usize {
        let bounds = Aabb::from_triangles(&triangles[start..start + count]);
        let index = nodes.len();
        nodes.push(BvhNode {
            bounds,
            left: None,
            right: None,
            start,
            count,
            depth,
        });

        if count <= config.max_leaf_triangles || depth >= config.max_depth {
            if count > config.max_leaf_triangles {
                warn!(
                    "BVH depth limit {} reached with {} triangles in one leaf",
                    config.max_depth, count
                );
            }
            return index;
        }

        let axis = bounds.longest_axis();
        triangles[start..start + count]
            .sort_by(|a, b| a.centroid()[axis].total_cmp(&b.centroid()[axis]));

        let mid = count / 2;
        let left = Self::build_node(nodes, triangles, start, mid, depth + 1, config);
        let right = Self::build_node(nodes, triangles, start + mid, count - mid, depth + 1, config);

        let node = &mut nodes[index];
        node.left = Some(left);
        node.right = Some(right);
        node.count = 0;
        index
    }

    pub fn config(&self) -> &BvhConfig {
        &self.config
    }

    /// Triangles in leaf order.
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn nodes(&self) -> &[BvhNode] {
        &self.nodes
    }

    pub fn root(&self) -> &BvhNode {
        &self.nodes[Self::ROOT]
    }

    pub fn bounds(&self) -> Aabb {
        self.root().bounds
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    pub fn node_triangles(&self, node: &BvhNode) -> &[Triangle] {
        &self.triangles[node.start..node.start + node.count]
    }

    pub fn leaves(&self) -> impl Iterator<Item = BvhLeaf<'_>> + '_ {
        self.nodes
            .iter()
            .filter(|node| node.is_leaf())
            .map(move |node| BvhLeaf {
                depth: node.depth,
                bounds: node.bounds,
                triangles: self.node_triangles(node),
            })
    }

    pub fn stats(&self) -> BvhStats {
        let mut stats = BvhStats {
            triangle_count: self.triangles.len(),
            node_count: self.nodes.len(),
            ..BvhStats::default()
        };
        for leaf in self.leaves() {
            stats.leaf_count += 1;
            stats.max_depth = stats.max_depth.max(leaf.depth);
            stats.largest_leaf = stats.largest_leaf.max(leaf.triangles.len());
        }
        stats
    }

    /// Calls `visit` for every triangle in a leaf whose box overlaps `capsule`,
    /// depth-first with the left child first.
    pub fn for_each_candidate<F>(&self, capsule: &Capsule, mut visit: F)
    where
        F: FnMut(&Triangle),
    {
        self.visit_node(Self::ROOT, capsule, &mut visit);
    }

    fn visit_node<F>(&self, index: usize, capsule: &Capsule, visit: &mut F)
    where
        F: FnMut(&Triangle),
    {
        let node = &self.nodes[index];
        if !capsule.intersects_aabb(&node.bounds) {
            return;
        }

        if node.is_leaf() {
            for tri in self.node_triangles(node) {
                visit(tri);
            }
            return;
        }

        if let Some(left) = node.left {
            self.visit_node(left, capsule, visit);
        }
        if let Some(right) = node.right {
            self.visit_node(right, capsule, visit);
        }
    }

    /// Every capsule/triangle contact in traversal order.
    pub fn capsule_contacts(&self, capsule: &Capsule) -> Vec<Contact> {
        self.capsule_contacts_with(capsule, SegmentClamp::SinglePass)
    }

    pub fn capsule_contacts_with(&self, capsule: &Capsule, clamp: SegmentClamp) -> Vec<Contact> {
        let mut contacts = Vec::new();
        self.for_each_candidate(capsule, |tri| {
            if let Some(contact) = TriangleCapsuleTest::intersect_with(capsule, tri, clamp) {
                contacts.push(contact);
            }
        });
        contacts
    }
}
