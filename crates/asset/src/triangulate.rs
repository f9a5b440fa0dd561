//! Fan triangulation of polygon faces.

/// Appends the fan triangulation of `face` to `out`: `(f[0], f[i-1], f[i])`
/// for `i` in `2..len`. Returns the number of triangles emitted (`len - 2`,
/// or 0 for fewer than three vertices).
///
/// Correct for convex planar polygons only; concave faces are split as-is.
pub fn triangulate_fan<T: Copy>(face: &[T], out: &mut Vec<T>) -> usize {
    if face.len() < 3 {
        return 0;
    }
    out.reserve((face.len() - 2) * 3);
    for i in 2..face.len() {
        out.extend_from_slice(&[face[0], face[i - 1], face[i]]);
    }
    face.len() - 2
}
