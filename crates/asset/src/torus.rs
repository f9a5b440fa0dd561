//! Procedural torus, used as a stand-in mesh when a requested asset is missing.

use std::{f32::consts::PI, fs, io, path::Path};

use crate::{error::ObjResult, mesh::Mesh, obj::load_obj_from_str};

/// Torus around the z axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TorusParams {
    /// Steps around the main ring.
    pub segments: u32,
    /// Steps around the tube.
    pub sides: u32,
    pub radius: f32,
    pub tube_radius: f32,
}

impl Default for TorusParams {
    fn default() -> Self {
        Self {
            segments: 20,
            sides: 15,
            radius: 2.0,
            tube_radius: 0.8,
        }
    }
}

impl TorusParams {
    pub fn with_resolution(segments: u32, sides: u32) -> Self {
        Self {
            segments,
            sides,
            ..Self::default()
        }
    }

    /// OBJ text with `(segments+1)*(sides+1)` position/uv pairs and
    /// `2*segments*sides` triangles. The seam rows are duplicated so uvs wrap.
    pub fn to_obj_string(&self) -> String {
        let segments = self.segments.max(1);
        let sides = self.sides.max(1);
        let mut out = String::new();

        for i in 0..=segments {
            let theta = i as f32 * 2.0 * PI / segments as f32;
            for j in 0..=sides {
                let phi = j as f32 * 2.0 * PI / sides as f32;
                let ring = self.radius + self.tube_radius * phi.cos();
                let x = ring * theta.cos();
                let y = ring * theta.sin();
                let z = self.tube_radius * phi.sin();
                out.push_str(&format!("v {x} {y} {z}\n"));
                out.push_str(&format!(
                    "vt {} {}\n",
                    i as f32 / segments as f32,
                    j as f32 / sides as f32
                ));
            }
        }

        for i in 0..segments {
            for j in 0..sides {
                let cur = i * (sides + 1) + j + 1;
                let nxt = cur + sides + 1;
                let (cur1, nxt1) = (cur + 1, nxt + 1);
                out.push_str(&format!("f {cur}/{cur} {nxt}/{nxt} {cur1}/{cur1}\n"));
                out.push_str(&format!("f {nxt}/{nxt} {nxt1}/{nxt1} {cur1}/{cur1}\n"));
            }
        }

        out
    }

    pub fn write_obj(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_obj_string())?;
        log::info!("Wrote torus OBJ to {}", path.display());
        Ok(())
    }

    /// Parses the generated OBJ text through the regular loader (normalized).
    pub fn mesh(&self) -> ObjResult<Mesh> {
        load_obj_from_str(&self.to_obj_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_torus_record_counts() {
        let text = TorusParams::default().to_obj_string();
        let count = |tag: &str| {
            text.lines()
                .filter(|l| l.split_whitespace().next() == Some(tag))
                .count()
        };
        assert_eq!(count("v"), 21 * 16);
        assert_eq!(count("vt"), 21 * 16);
        assert_eq!(count("f"), 2 * 20 * 15);
    }

    #[test]
    fn face_lines_stitch_neighbouring_rings() {
        let text = TorusParams::with_resolution(2, 2).to_obj_string();
        let faces: Vec<&str> = text.lines().filter(|l| l.starts_with("f ")).collect();
        assert_eq!(faces.len(), 8);
        assert_eq!(faces[0], "f 1/1 4/4 2/2");
        assert_eq!(faces[1], "f 4/4 5/5 2/2");
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn torus_mesh_is_normalized() {
        let mesh = TorusParams::with_resolution(8, 6).mesh().expect("torus parses");
        assert_eq!(mesh.triangle_count(), 2 * 8 * 6);
        let b = mesh.bounds().expect("bounds");
        assert!((b.max_extent() - 2.0).abs() < 1e-4);
        assert!(b.center().length() < 1e-4);
        // Ring is wider than the tube is thick.
        assert!(b.extent().z < b.extent().x);
    }

    #[test]
    fn uvs_cover_unit_square() {
        let mesh = TorusParams::with_resolution(4, 4).mesh().expect("torus parses");
        let (mut lo, mut hi) = ([1.0f32; 2], [0.0f32; 2]);
        for v in mesh.vertices() {
            for k in 0..2 {
                lo[k] = lo[k].min(v.uv[k]);
                hi[k] = hi[k].max(v.uv[k]);
            }
        }
        assert_eq!(lo, [0.0, 0.0]);
        assert_eq!(hi, [1.0, 1.0]);
    }

    #[test]
    fn write_then_load() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("donut.obj");
        let params = TorusParams::with_resolution(5, 3);
        params.write_obj(&path).expect("write");
        let mesh = crate::obj::load_obj_from_path(&path).expect("load");
        assert_eq!(mesh, params.mesh().expect("in-memory"));
    }
}
