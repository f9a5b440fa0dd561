//! OBJ loader for `v`/`vt`/`f` records producing a flat, normalized triangle list.
//!
//! Face elements may be `P`, `P/T`, `P//` or `P/T/N` (normals are ignored).
//! Negative indices count back from the most recent record, as in OBJ.

use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

use crate::{
    error::{ObjError, ObjResult},
    mesh::{Mesh, MeshVertex},
    normalize::normalize_vertices,
    triangulate::triangulate_fan,
};

/// Options for a single load.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadOptions {
    /// Rescale into the `[-1, 1]` cube after triangulation.
    pub normalize: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self { normalize: true }
    }
}

/// Load and normalize an OBJ mesh from a file path.
pub fn load_obj_from_path(path: impl AsRef<Path>) -> ObjResult<Mesh> {
    load_obj_from_path_with(path, LoadOptions::default())
}

pub fn load_obj_from_path_with(path: impl AsRef<Path>, options: LoadOptions) -> ObjResult<Mesh> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| ObjError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let mesh = load_obj_from_reader_with(BufReader::new(file), options)?;
    log::info!(
        "Loaded {}: {} vertices ({} triangles)",
        path.display(),
        mesh.len(),
        mesh.triangle_count()
    );
    Ok(mesh)
}

/// Load and normalize an OBJ mesh from a [`BufRead`] implementation.
pub fn load_obj_from_reader<R: BufRead>(reader: R) -> ObjResult<Mesh> {
    load_obj_from_reader_with(reader, LoadOptions::default())
}

pub fn load_obj_from_reader_with<R: BufRead>(reader: R, options: LoadOptions) -> ObjResult<Mesh> {
    parse_obj(reader, options)
}

/// Convenience helper to parse an OBJ string literal.
pub fn load_obj_from_str(contents: &str) -> ObjResult<Mesh> {
    load_obj_from_str_with(contents, LoadOptions::default())
}

pub fn load_obj_from_str_with(contents: &str, options: LoadOptions) -> ObjResult<Mesh> {
    parse_obj(io::Cursor::new(contents), options)
}

/// One face element with raw (still 1-based or negative) indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct FaceElement {
    position: i64,
    texcoord: Option<i64>,
}

/// A single parsed line.
#[derive(Debug, PartialEq)]
enum Record {
    Position([f32; 3]),
    TexCoord([f32; 2]),
    Face(Vec<FaceElement>),
    Ignored,
}

/// Positions and texture coordinates seen so far, in file order.
#[derive(Default)]
struct VertexTable {
    positions: Vec<[f32; 3]>,
    texcoords: Vec<[f32; 2]>,
    /// Texture references that pointed past the table and fell back to (0, 0).
    texcoord_misses: usize,
}

impl VertexTable {
    /// Out-of-range positions are a hard error.
    fn position(&self, raw: i64, line: usize) -> ObjResult<[f32; 3]> {
        resolve_index(raw, self.positions.len())
            .map(|i| self.positions[i])
            .ok_or(ObjError::PositionOutOfRange {
                line,
                index: raw,
                count: self.positions.len(),
            })
    }

    /// Missing or out-of-range texture references resolve to (0, 0); they
    /// never fail the load.
    fn texcoord(&mut self, raw: Option<i64>) -> [f32; 2] {
        let Some(raw) = raw else {
            return [0.0, 0.0];
        };
        match resolve_index(raw, self.texcoords.len()) {
            Some(i) => self.texcoords[i],
            None => {
                self.texcoord_misses += 1;
                [0.0, 0.0]
            }
        }
    }

    fn resolve(&mut self, element: FaceElement, line: usize) -> ObjResult<MeshVertex> {
        let position = self.position(element.position, line)?;
        let uv = self.texcoord(element.texcoord);
        Ok(MeshVertex::new(position, uv))
    }
}

fn parse_obj<R: BufRead>(reader: R, options: LoadOptions) -> ObjResult<Mesh> {
    let mut table = VertexTable::default();
    let mut vertices: Vec<MeshVertex> = Vec::new();
    let mut face: Vec<MeshVertex> = Vec::new();
    let mut short_faces = 0usize;

    for (line_no, line) in reader.lines().enumerate() {
        let line_no = line_no + 1;
        let line = line.map_err(|source| ObjError::Read {
            line: line_no,
            source,
        })?;

        match parse_line(&line, line_no)? {
            Record::Position(p) => table.positions.push(p),
            Record::TexCoord(t) => table.texcoords.push(t),
            Record::Face(elements) => {
                face.clear();
                for element in elements {
                    face.push(table.resolve(element, line_no)?);
                }
                if triangulate_fan(&face, &mut vertices) == 0 {
                    short_faces += 1;
                }
            }
            Record::Ignored => {}
        }
    }

    if short_faces > 0 {
        log::warn!("Skipped {short_faces} face(s) with fewer than 3 vertices");
    }
    if table.texcoord_misses > 0 {
        log::warn!(
            "{} texture index(es) out of range ({} declared); used (0, 0)",
            table.texcoord_misses,
            table.texcoords.len()
        );
    }
    log::debug!(
        "Parsed OBJ: {} positions, {} texcoords -> {} vertices",
        table.positions.len(),
        table.texcoords.len(),
        vertices.len()
    );

    if options.normalize {
        if let Some(n) = normalize_vertices(&mut vertices) {
            log::debug!("Normalized: center={:?} scale={}", n.center, n.scale);
        }
    }

    Ok(Mesh::from_triangulated(vertices))
}

fn parse_line(line: &str, line_no: usize) -> ObjResult<Record> {
    let mut parts = line.split_whitespace();
    let record = match parts.next() {
        Some("v") => {
            let x = parse_f32(parts.next(), line_no, "x coordinate")?;
            let y = parse_f32(parts.next(), line_no, "y coordinate")?;
            let z = parse_f32(parts.next(), line_no, "z coordinate")?;
            Record::Position([x, y, z])
        }
        Some("vt") => {
            let u = parse_f32(parts.next(), line_no, "u coordinate")?;
            let v = parse_f32(parts.next(), line_no, "v coordinate")?;
            Record::TexCoord([u, v])
        }
        Some("f") => Record::Face(
            parts
                .map(|token| parse_face_element(token, line_no))
                .collect::<ObjResult<_>>()?,
        ),
        // Comments, blank lines, normals, groups, materials, ...
        _ => Record::Ignored,
    };
    Ok(record)
}

fn parse_f32(value: Option<&str>, line_no: usize, what: &'static str) -> ObjResult<f32> {
    let token = value.ok_or(ObjError::MissingField {
        line: line_no,
        what,
    })?;
    match token.parse::<f32>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(ObjError::InvalidNumber {
            line: line_no,
            what,
            token: token.to_owned(),
        }),
    }
}

fn parse_face_element(token: &str, line_no: usize) -> ObjResult<FaceElement> {
    let malformed = || ObjError::MalformedFace {
        line: line_no,
        token: token.to_owned(),
    };
    let parse_index = |s: &str| s.parse::<i64>().map_err(|_| malformed());

    let mut split = token.split('/');
    let position = match split.next() {
        Some(p) if !p.is_empty() => parse_index(p)?,
        _ => return Err(malformed()),
    };
    let texcoord = match split.next() {
        Some(t) if !t.is_empty() => Some(parse_index(t)?),
        _ => None,
    };
    // Normal index: validated, then dropped.
    if let Some(n) = split.next().filter(|n| !n.is_empty()) {
        parse_index(n)?;
    }
    if split.next().is_some() {
        return Err(malformed());
    }

    Ok(FaceElement { position, texcoord })
}

/// Maps a raw OBJ index onto `[0, len)`: positive indices are 1-based,
/// negative ones are relative to the end. `0` never resolves.
fn resolve_index(raw: i64, len: usize) -> Option<usize> {
    let len = i64::try_from(len).ok()?;
    let idx = if raw > 0 { raw - 1 } else { len + raw };
    if (0..len).contains(&idx) {
        usize::try_from(idx).ok()
    } else {
        None
    }
}
