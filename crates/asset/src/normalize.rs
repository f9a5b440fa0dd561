//! Uniform recentering/rescaling of vertex positions into the `[-1, 1]` cube.

use corelib::{Aabb, Vec3};

use crate::mesh::MeshVertex;

/// Transform applied by [`normalize_vertices`]: `p' = (p - center) * scale`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Normalization {
    pub center: Vec3,
    pub scale: f32,
}

/// Moves the bounding-box center to the origin and scales uniformly so the
/// longest side spans exactly 2 units. Other axes keep their proportions.
///
/// Positions must be finite. Returns `None` without touching anything when
/// the slice is empty or every position coincides (zero extent).
pub fn normalize_vertices(vertices: &mut [MeshVertex]) -> Option<Normalization> {
    let bounds = Aabb::from_points(vertices.iter().map(MeshVertex::position_vec))?;
    // Half extents and the halved-sum center stay finite up to f32::MAX.
    let half = bounds.half_extent().max_element();
    if half == 0.0 {
        log::debug!("Skipping normalization: zero extent");
        return None;
    }

    let center = bounds.center();
    for v in vertices.iter_mut() {
        v.position = ((v.position_vec() - center) / half).to_array();
    }

    Some(Normalization {
        center,
        scale: 1.0 / half,
    })
}
