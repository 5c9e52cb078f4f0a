//! The ASCII OFF ("object file format") codec.
//!
//! The format: an `OFF` header line, a counts line (`#vertices #faces
//! #edges`), one line per vertex with its three coordinates and one line per
//! face with its degree followed by its vertex indices. `#` starts a comment,
//! blank lines are ignored.

use std::io::{self, BufRead, Write};

use cgmath::Point3;
use log::debug;
use thiserror::Error;

use crate::attr::VertexAttr;
use crate::handle::{hsize, Handle, VertexHandle};
use crate::mesh::Mesh;


/// Everything that can go wrong while reading or writing OFF data.
#[derive(Debug, Error)]
pub enum OffError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("parse error in line {line}: {msg}")]
    Parse { line: usize, msg: String },

    #[error("face #{face} cannot be added: it would make the mesh non-manifold")]
    NonManifold { face: usize },
}

impl OffError {
    fn parse(line: usize, msg: impl Into<String>) -> Self {
        OffError::Parse { line, msg: msg.into() }
    }
}


/// Reads an ASCII OFF mesh, returning the connectivity and the vertex
/// positions.
///
/// Faces the half-edge structure cannot represent are rejected with
/// [`OffError::NonManifold`] instead of corrupting the mesh.
pub fn read_off<R: BufRead>(reader: R) -> Result<(Mesh, VertexAttr<Point3<f32>>), OffError> {
    let mut lines = ContentLines::new(reader);

    let (line_no, header) = lines.next_content()?;
    if header.trim() != "OFF" {
        return Err(OffError::parse(line_no, "expected `OFF` header"));
    }

    let (line_no, counts) = lines.next_content()?;
    let counts = parse_fields::<u64>(line_no, &counts)?;
    let (vertex_count, face_count) = match counts.as_slice() {
        // The edge count is traditionally ignored.
        [v, f, _] => (*v, *f),
        _ => return Err(OffError::parse(line_no, "expected `#vertices #faces #edges`")),
    };

    let mut mesh = Mesh::new();
    let positions = mesh.create_vertex_attr(Point3::new(0.0f32, 0.0, 0.0));

    for _ in 0..vertex_count {
        let (line_no, line) = lines.next_content()?;
        let coords = parse_fields::<f32>(line_no, &line)?;
        match coords.as_slice() {
            [x, y, z] => {
                let vh = mesh.add_vertex();
                positions.set(vh, Point3::new(*x, *y, *z));
            }
            _ => return Err(OffError::parse(line_no, "expected 3 vertex coordinates")),
        }
    }

    let mut corners = Vec::new();
    for face_idx in 0..face_count {
        let (line_no, line) = lines.next_content()?;
        let fields = parse_fields::<u64>(line_no, &line)?;
        let indices = match fields.split_first() {
            Some((degree, indices)) if *degree >= 3 && indices.len() == *degree as usize => {
                indices
            }
            _ => {
                return Err(OffError::parse(
                    line_no,
                    "expected face degree (>= 3) followed by that many vertex indices",
                ));
            }
        };

        corners.clear();
        for &idx in indices {
            if idx >= vertex_count {
                return Err(OffError::parse(
                    line_no,
                    format!("vertex index {} out of range (< {})", idx, vertex_count),
                ));
            }
            corners.push(VertexHandle::new(idx as hsize));
        }

        if !mesh.can_add_face(&corners) {
            return Err(OffError::NonManifold { face: face_idx as usize });
        }
        mesh.add_face(&corners);
    }

    debug!(
        "read OFF mesh: {} vertices, {} faces, {} edges",
        mesh.size_vertices(),
        mesh.size_faces(),
        mesh.size_edges(),
    );

    Ok((mesh, positions))
}

/// Writes the mesh as ASCII OFF.
///
/// Tombstoned slots are skipped and the emitted vertex indices renumbered
/// accordingly, so the mesh does not have to be compact.
pub fn write_off<W: Write>(
    mesh: &Mesh,
    positions: &VertexAttr<Point3<f32>>,
    mut writer: W,
) -> Result<(), OffError> {
    writeln!(writer, "OFF")?;
    writeln!(
        writer,
        "{} {} {}",
        mesh.size_vertices(),
        mesh.size_faces(),
        mesh.size_edges(),
    )?;

    // Output index of each live vertex slot.
    let mut out_index = vec![0 as hsize; mesh.size_all_vertices() as usize];
    for (i, vh) in mesh.vertices().enumerate() {
        out_index[vh.to_usize()] = i as hsize;
        let p = positions.get(vh);
        writeln!(writer, "{} {} {}", p.x, p.y, p.z)?;
    }

    for fh in mesh.faces() {
        write!(writer, "{}", mesh.degree(fh))?;
        for v in mesh.face(fh).vertices() {
            write!(writer, " {}", out_index[v.handle().to_usize()])?;
        }
        writeln!(writer)?;
    }

    Ok(())
}


/// Line-based reading that skips blank lines and `#` comments and tracks line
/// numbers for error reporting.
struct ContentLines<R> {
    reader: R,
    line: usize,
}

impl<R: BufRead> ContentLines<R> {
    fn new(reader: R) -> Self {
        Self { reader, line: 0 }
    }

    fn next_content(&mut self) -> Result<(usize, String), OffError> {
        loop {
            let mut buf = String::new();
            if self.reader.read_line(&mut buf)? == 0 {
                return Err(OffError::parse(self.line, "unexpected end of file"));
            }
            self.line += 1;

            let content = match buf.find('#') {
                Some(pos) => &buf[..pos],
                None => &buf[..],
            };
            let content = content.trim();
            if !content.is_empty() {
                return Ok((self.line, content.to_string()));
            }
        }
    }
}

fn parse_fields<T: std::str::FromStr>(line_no: usize, line: &str) -> Result<Vec<T>, OffError> {
    line.split_whitespace()
        .map(|field| {
            field
                .parse()
                .map_err(|_| OffError::parse(line_no, format!("invalid number `{}`", field)))
        })
        .collect()
}
