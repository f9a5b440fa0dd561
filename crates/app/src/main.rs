//! Entry point: load OBJ meshes, fall back to a generated torus, report stats.

mod config;

use std::{
    path::{Path, PathBuf},
    thread,
};

use anyhow::{Context, Result};
use asset::{LoadOptions, ObjResult, SharedMesh, TorusParams, load_obj_from_path_with};

use crate::config::{Config, Fallback};

/// Outcome of one requested asset.
struct Loaded {
    path: PathBuf,
    mesh: SharedMesh,
    fallback: bool,
}

fn load_all(config: &Config) -> Result<Vec<Loaded>> {
    let options = LoadOptions {
        normalize: config.normalize,
    };

    // Independent files, independent meshes: one thread each.
    let results: Vec<(PathBuf, ObjResult<asset::Mesh>)> = thread::scope(|s| {
        let handles: Vec<_> = config
            .paths
            .iter()
            .map(|path| (path, s.spawn(move || load_obj_from_path_with(path, options))))
            .collect();
        handles
            .into_iter()
            .map(|(path, h)| {
                let res = h.join().unwrap_or_else(|panic| std::panic::resume_unwind(panic));
                (path.clone(), res)
            })
            .collect()
    });

    // Generated lazily and shared by every failed slot.
    let mut fallback_mesh: Option<SharedMesh> = None;
    let mut loaded = Vec::with_capacity(results.len());
    for (path, result) in results {
        match result {
            Ok(mesh) => loaded.push(Loaded {
                path,
                mesh: mesh.into_shared(),
                fallback: false,
            }),
            Err(err) => match config.fallback {
                Fallback::None => {
                    return Err(err).with_context(|| format!("Loading {}", path.display()));
                }
                Fallback::Torus => {
                    log::warn!("{err}; using generated torus instead");
                    let mesh = match &fallback_mesh {
                        Some(mesh) => SharedMesh::clone(mesh),
                        None => {
                            let mesh = config
                                .torus
                                .mesh()
                                .context("Generating fallback torus")?
                                .into_shared();
                            fallback_mesh = Some(SharedMesh::clone(&mesh));
                            mesh
                        }
                    };
                    loaded.push(Loaded {
                        path,
                        mesh,
                        fallback: true,
                    });
                }
            },
        }
    }
    Ok(loaded)
}

fn report(item: &Loaded) {
    let mesh = &item.mesh;
    let source = if item.fallback { " (fallback)" } else { "" };
    match mesh.bounds() {
        Some(b) => log::info!(
            "{}{}: {} vertices, {} triangles, {} bytes, bounds min={:?} max={:?}",
            item.path.display(),
            source,
            mesh.len(),
            mesh.triangle_count(),
            mesh.as_bytes().len(),
            b.min.to_array(),
            b.max.to_array()
        ),
        None => log::info!("{}{}: empty mesh", item.path.display(), source),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_args(std::env::args().skip(1));
    log::info!(
        "Starting mesh loader. files={}, fallback={:?}, normalize={}, torus={}x{}",
        config.paths.len(),
        config.fallback,
        config.normalize,
        config.torus.segments,
        config.torus.sides
    );

    if let Some(path) = &config.write_torus {
        write_torus(config.torus, path)?;
    }

    for item in load_all(&config)? {
        report(&item);
    }

    Ok(())
}

fn write_torus(params: TorusParams, path: &Path) -> Result<()> {
    params
        .write_obj(path)
        .with_context(|| format!("Writing torus to {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(paths: Vec<PathBuf>, fallback: Fallback) -> Config {
        Config {
            paths,
            fallback,
            normalize: true,
            torus: TorusParams::with_resolution(6, 4),
            write_torus: None,
        }
    }

    #[test]
    fn missing_file_falls_back_to_shared_torus() {
        let dir = tempfile::tempdir().expect("tempdir");
        let good = dir.path().join("tri.obj");
        std::fs::write(&good, "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").expect("write");
        let paths = vec![dir.path().join("sun.obj"), good, dir.path().join("planet.obj")];

        let loaded = load_all(&config(paths, Fallback::Torus)).expect("fallback succeeds");
        assert_eq!(loaded.len(), 3);
        assert!(loaded[0].fallback && loaded[2].fallback);
        assert!(!loaded[1].fallback);
        assert_eq!(loaded[1].mesh.triangle_count(), 1);
        assert_eq!(loaded[0].mesh.triangle_count(), 2 * 6 * 4);
        assert!(SharedMesh::ptr_eq(&loaded[0].mesh, &loaded[2].mesh));
    }

    #[test]
    fn no_fallback_reports_failure() {
        let dir = tempfile::tempdir().expect("tempdir");
        let bad = dir.path().join("bad.obj");
        std::fs::write(&bad, "v 0 0 0\nv 1 0 0\nf 1 2 99\n").expect("write");
        let err = match load_all(&config(vec![bad], Fallback::None)) {
            Err(err) => err,
            Ok(_) => panic!("expected failure"),
        };
        assert!(format!("{err:#}").contains("out of range"));
    }
}
