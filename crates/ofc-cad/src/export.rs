//! STL export of tessellated shapes

use std::io::BufWriter;
use std::path::Path;

use crate::kernel::{CadError, CadResult, TessellatedMesh};

/// Write a tessellated mesh as binary STL
pub fn write_stl(mesh: &TessellatedMesh, path: impl AsRef<Path>) -> CadResult<()> {
    if mesh.is_empty() {
        return Err(CadError::StlExport("Mesh has no triangles".into()));
    }

    let triangles: Vec<stl_io::Triangle> = mesh
        .triangles()
        .map(|[v0, v1, v2]| {
            let normal = (v1 - v0).cross(v2 - v0).normalize_or_zero();
            stl_io::Triangle {
                normal: stl_io::Normal::new(normal.to_array()),
                vertices: [
                    stl_io::Vertex::new(v0.to_array()),
                    stl_io::Vertex::new(v1.to_array()),
                    stl_io::Vertex::new(v2.to_array()),
                ],
            }
        })
        .collect();

    let file = std::fs::File::create(path.as_ref()).map_err(|e| CadError::FileIo(e.to_string()))?;
    let mut writer = BufWriter::new(file);
    stl_io::write_stl(&mut writer, triangles.iter())
        .map_err(|e| CadError::StlExport(e.to_string()))?;

    tracing::info!(
        "Exported {} triangles to {}",
        triangles.len(),
        path.as_ref().display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> TessellatedMesh {
        TessellatedMesh {
            vertices: vec![
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [1.0, 1.0, 0.0],
                [0.0, 1.0, 0.0],
            ],
            normals: vec![[0.0, 0.0, 1.0]; 4],
            indices: vec![0, 1, 2, 0, 2, 3],
        }
    }

    #[test]
    fn test_write_and_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shape.stl");
        write_stl(&quad(), &path).unwrap();

        let mut file = std::fs::File::open(&path).unwrap();
        let read = stl_io::read_stl(&mut file).unwrap();
        assert_eq!(read.faces.len(), 2);
        assert_eq!(read.vertices.len(), 4);
        assert_eq!(read.faces[0].normal, stl_io::Normal::new([0.0, 0.0, 1.0]));
    }

    #[test]
    fn test_empty_mesh_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let result = write_stl(&TessellatedMesh::new(), dir.path().join("empty.stl"));
        assert!(matches!(result, Err(CadError::StlExport(_))));
    }
}
