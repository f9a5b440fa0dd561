//! Asset loading (meshes, textures).
//! OBJ loader producing flat, normalized triangle lists plus a procedural
//! torus fallback and RGBA8 texture loading.

pub mod error;
pub mod mesh;
pub mod normalize;
pub mod obj;
pub mod texture;
pub mod torus;
pub mod triangulate;

pub use error::{ObjError, ObjResult};
pub use mesh::{Mesh, MeshVertex, SharedMesh};
pub use obj::{LoadOptions, load_obj_from_path, load_obj_from_path_with, load_obj_from_str};
pub use torus::TorusParams;
