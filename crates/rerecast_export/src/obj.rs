//! Writes a [`TriMesh`] as a Wavefront OBJ file, followed by a free-form block of extra lines.

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use thiserror::Error;

use crate::TriMesh;

/// Writes one `v` line per vertex and one `f` line per triangle, then `additional_data` verbatim.
///
/// Face indices are 1-based, as OBJ requires. Nothing is reordered, merged or validated.
pub fn write_obj(writer: &mut impl Write, mesh: &TriMesh, additional_data: &str) -> io::Result<()> {
    for vertex in &mesh.vertices {
        writeln!(writer, "v {:.6} {:.6} {:.6} ", vertex.x, vertex.y, vertex.z)?;
    }
    for face in &mesh.indices {
        writeln!(
            writer,
            "f {} {} {} ",
            face.x as u64 + 1,
            face.y as u64 + 1,
            face.z as u64 + 1
        )?;
    }
    writer.write_all(additional_data.as_bytes())
}

/// Creates the file at `path` and writes the mesh into it with [`write_obj`].
pub fn export_geom_to_obj_file(
    path: &Path,
    mesh: &TriMesh,
    additional_data: &str,
) -> Result<(), ObjExportError> {
    let file = File::create(path).map_err(|source| ObjExportError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    write_obj(&mut writer, mesh, additional_data)
        .and_then(|()| writer.flush())
        .map_err(|source| ObjExportError::Write {
            path: path.to_path_buf(),
            source,
        })
}

/// Errors that can occur when writing an OBJ file.
#[derive(Error, Debug)]
pub enum ObjExportError {
    /// The destination could not be opened for writing.
    #[error("Failed to create {}: {source}", path.display())]
    Create {
        /// The destination
        path: PathBuf,
        /// The underlying error
        source: io::Error,
    },
    /// Writing failed after the destination was opened.
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        /// The destination
        path: PathBuf,
        /// The underlying error
        source: io::Error,
    },
}
