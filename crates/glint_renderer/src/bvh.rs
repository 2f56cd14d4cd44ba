//! Bounding volume hierarchy built with a binned surface-area heuristic.
//!
//! The tree is a flat node array over index ranges of a primitive slice.
//! Building permutes the slice in place; traversal borrows the same slice
//! back, so the hierarchy itself stays small and copyable.

use glint_math::{axis_component, Aabb, Interval, Ray};

use crate::primitive::{HitRecord, Primitive};

/// Number of SAH bins per axis.
const SAH_BINS: usize = 12;
/// Cost of one traversal step, in units of primitive intersections.
const TRAVERSAL_COST: f32 = 1.0;
/// Cost of intersecting one primitive.
const INTERSECTION_COST: f32 = 1.0;
/// Leaves hold at most this many primitives.
const LEAF_MAX_PRIMS: usize = 2;
/// Axes with less extent than this are not worth splitting.
const MIN_AXIS_EXTENT: f32 = 1e-4;
/// Fixed traversal stack depth.
const STACK_SIZE: usize = 64;

#[derive(Debug, Clone, Copy)]
enum NodeKind {
    Leaf { first: u32, count: u32 },
    Internal { left: u32, right: u32 },
}

#[derive(Debug, Clone, Copy)]
struct BvhNode {
    bounds: Aabb,
    kind: NodeKind,
}

/// Flat-array BVH over a primitive slice.
#[derive(Debug, Clone)]
pub struct Bvh {
    nodes: Vec<BvhNode>,
}

impl Bvh {
    /// Build a hierarchy over `primitives`, permuting the slice in place so
    /// leaves address contiguous ranges of it.
    pub fn build(primitives: &mut [Primitive]) -> Self {
        let mut nodes = Vec::new();
        if !primitives.is_empty() {
            // A binary tree over n primitives has at most 2n - 1 nodes.
            nodes.reserve_exact(2 * primitives.len() - 1);
            build_node(&mut nodes, primitives, 0, primitives.len());
        }
        Bvh { nodes }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Closest hit within `ray_t`, against the slice the tree was built over.
    pub fn hit<'a>(
        &self,
        primitives: &'a [Primitive],
        ray: &Ray,
        ray_t: Interval,
    ) -> Option<HitRecord<'a>> {
        if self.nodes.is_empty() {
            return None;
        }

        let inv_dir = ray.direction.recip();
        let mut stack = [0u32; STACK_SIZE];
        let mut stack_len = 1;
        stack[0] = 0;

        let mut closest = ray_t.max;
        let mut record = None;

        while stack_len > 0 {
            stack_len -= 1;
            let node = &self.nodes[stack[stack_len] as usize];

            if !node
                .bounds
                .hit(ray.origin, inv_dir, Interval::new(ray_t.min, closest))
            {
                continue;
            }

            match node.kind {
                NodeKind::Leaf { first, count } => {
                    let range = first as usize..(first + count) as usize;
                    for prim in &primitives[range] {
                        if let Some(hit) = prim.hit(ray, Interval::new(ray_t.min, closest)) {
                            closest = hit.t;
                            record = Some(hit);
                        }
                    }
                }
                NodeKind::Internal { left, right } => {
                    stack[stack_len] = left;
                    stack[stack_len + 1] = right;
                    stack_len += 2;
                }
            }
        }

        record
    }
}

/// Recursively build the node for `primitives[start..end]`, returning its
/// index. Parents are allocated before their children, so the root lands at
/// index 0.
fn build_node(
    nodes: &mut Vec<BvhNode>,
    primitives: &mut [Primitive],
    start: usize,
    end: usize,
) -> u32 {
    let mut bounds = Aabb::EMPTY;
    for prim in &primitives[start..end] {
        bounds = Aabb::surrounding(&bounds, prim.bounds());
    }

    // Pushed as a leaf; interior nodes are patched once children exist.
    let index = nodes.len() as u32;
    nodes.push(BvhNode {
        bounds,
        kind: NodeKind::Leaf {
            first: start as u32,
            count: (end - start) as u32,
        },
    });

    if end - start <= LEAF_MAX_PRIMS {
        return index;
    }

    let mut mid = match find_best_split(primitives, start, end, &bounds) {
        Some((axis, threshold)) => partition_by_centroid(primitives, start, end, axis, threshold),
        None => start,
    };

    // The SAH can come up empty (no splittable axis, or binning and the
    // partition comparison disagree right at a boundary). Fall back to a
    // median split along the longest axis.
    if mid == start || mid == end {
        mid = median_split(primitives, start, end, &bounds);
    }

    // If even the median split cannot separate the range, keep the oversized
    // leaf; this bounds the recursion.
    if mid == start || mid == end {
        return index;
    }

    let left = build_node(nodes, primitives, start, mid);
    let right = build_node(nodes, primitives, mid, end);
    nodes[index as usize].kind = NodeKind::Internal { left, right };
    index
}

/// Scan all three axes for the cheapest binned split. Returns the axis and
/// the centroid threshold of the best candidate, or None if no boundary had
/// primitives on both sides.
fn find_best_split(
    primitives: &[Primitive],
    start: usize,
    end: usize,
    bounds: &Aabb,
) -> Option<(usize, f32)> {
    let parent_area = bounds.surface_area();
    let mut best: Option<(f32, usize, f32)> = None;

    for axis in 0..3 {
        let axis_bounds = bounds.axis_interval(axis);
        let extent = axis_bounds.size();
        if extent < MIN_AXIS_EXTENT {
            continue;
        }
        let bin_width = extent / SAH_BINS as f32;

        let mut bin_bounds = [Aabb::EMPTY; SAH_BINS];
        let mut bin_counts = [0usize; SAH_BINS];

        for prim in &primitives[start..end] {
            let centroid = axis_component(prim.bounds().centroid(), axis);
            let offset = (centroid - axis_bounds.min) / bin_width;
            let bin = (offset as usize).min(SAH_BINS - 1);
            bin_bounds[bin] = Aabb::surrounding(&bin_bounds[bin], prim.bounds());
            bin_counts[bin] += 1;
        }

        for boundary in 1..SAH_BINS {
            let mut left_bounds = Aabb::EMPTY;
            let mut left_count = 0;
            for bin in 0..boundary {
                left_bounds = Aabb::surrounding(&left_bounds, &bin_bounds[bin]);
                left_count += bin_counts[bin];
            }

            let mut right_bounds = Aabb::EMPTY;
            let mut right_count = 0;
            for bin in boundary..SAH_BINS {
                right_bounds = Aabb::surrounding(&right_bounds, &bin_bounds[bin]);
                right_count += bin_counts[bin];
            }

            if left_count == 0 || right_count == 0 {
                continue;
            }

            let cost = TRAVERSAL_COST
                + (left_count as f32 * left_bounds.surface_area()
                    + right_count as f32 * right_bounds.surface_area())
                    * INTERSECTION_COST
                    / parent_area;

            // Strict less-than: ties go to the first candidate found
            // (axes ascending, boundaries ascending).
            if best.map_or(true, |(best_cost, _, _)| cost < best_cost) {
                let threshold = axis_bounds.min + boundary as f32 * bin_width;
                best = Some((cost, axis, threshold));
            }
        }
    }

    best.map(|(_, axis, threshold)| (axis, threshold))
}

/// Swap-scan partition: primitives with centroid below `threshold` on `axis`
/// move to the front of the range. Returns the first index of the right side.
fn partition_by_centroid(
    primitives: &mut [Primitive],
    start: usize,
    end: usize,
    axis: usize,
    threshold: f32,
) -> usize {
    let mut mid = start;
    for i in start..end {
        let centroid = axis_component(primitives[i].bounds().centroid(), axis);
        if centroid < threshold {
            primitives.swap(i, mid);
            mid += 1;
        }
    }
    mid
}

/// Sort the range by centroid along the longest axis of `bounds` and split
/// at the middle.
fn median_split(primitives: &mut [Primitive], start: usize, end: usize, bounds: &Aabb) -> usize {
    let axis = bounds.longest_axis();
    primitives[start..end].sort_unstable_by(|a, b| {
        let ca = axis_component(a.bounds().centroid(), axis);
        let cb = axis_component(b.bounds().centroid(), axis);
        ca.partial_cmp(&cb).unwrap_or(std::cmp::Ordering::Equal)
    });
    start + (end - start) / 2
}
