use vertsync_mesh::{as_coords, Matrix4, MeshView, Vector3};

use crate::config::SyncConfig;
use crate::error::SyncError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Positions were written in place.
    Updated { count: usize },
    /// Nothing was written. The host has to rebuild the mesh with the new vertex count.
    NeedsRebuild { current: usize, proposed: usize },
}

/// One block of positions in a merged write, with an optional matrix applied to each position.
///
/// Positions are extended with `w = 1` and the result is truncated back to xyz without a
/// perspective divide.
#[derive(Debug, Clone, Copy)]
pub struct MeshPart<'a> {
    pub positions: &'a [Vector3],
    pub matrix: Option<Matrix4>,
}

impl<'a> MeshPart<'a> {
    pub fn new(positions: &'a [Vector3]) -> Self {
        Self {
            positions,
            matrix: None,
        }
    }

    pub fn with_matrix(self, matrix: Matrix4) -> Self {
        Self {
            matrix: Some(matrix),
            ..self
        }
    }
}

fn check_count(mesh: &MeshView<'_>, actual: usize) -> Result<(), SyncError> {
    let expected = mesh.vertex_count();
    if expected != actual {
        log::error!("refusing to write {actual} positions into a mesh of {expected} vertices");
        return Err(SyncError::VertexCountMismatch { expected, actual });
    }
    Ok(())
}

/// Copies coordinate triples into the mesh, vertex `i` taking triple `i`.
///
/// The count is checked before anything is written, so on error the mesh is untouched. On
/// success only the `co` field of each record changes, bit for bit.
pub fn set_coords(mesh: &mut MeshView<'_>, coords: &[[f32; 3]]) -> Result<(), SyncError> {
    check_count(mesh, coords.len())?;
    mesh.write_coords(coords.iter().copied());
    log::debug!("wrote {} vertex positions", coords.len());
    Ok(())
}

/// Copies one position per vertex into the mesh. See [`set_coords`].
pub fn set_verts(mesh: &mut MeshView<'_>, positions: &[Vector3]) -> Result<(), SyncError> {
    set_coords(mesh, as_coords(positions))
}

/// Copies a flat `x0, y0, z0, x1, ...` list into the mesh.
///
/// The list must hold exactly three values per vertex.
pub fn set_verts_flat(mesh: &mut MeshView<'_>, coords: &[f32]) -> Result<(), SyncError> {
    let coords: &[[f32; 3]] = bytemuck::try_cast_slice(coords)
        .map_err(|_| SyncError::FlatLength { len: coords.len() })?;
    set_coords(mesh, coords)
}

fn rebuild_needed(current: usize, proposed: usize, config: &SyncConfig) -> Option<SyncOutcome> {
    if config.fixed_verts && current == proposed {
        return None;
    }
    log::debug!("mesh needs rebuild ({current} -> {proposed} vertices)");
    Some(SyncOutcome::NeedsRebuild { current, proposed })
}

/// Position-only update for hosts whose topology is usually stable.
///
/// Writes in place when `config.fixed_verts` is set and the counts agree. Otherwise leaves the
/// mesh alone and reports that the host must rebuild it.
pub fn sync_coords(
    mesh: &mut MeshView<'_>,
    coords: &[[f32; 3]],
    config: &SyncConfig,
) -> SyncOutcome {
    let proposed = coords.len();
    if let Some(outcome) = rebuild_needed(mesh.vertex_count(), proposed, config) {
        return outcome;
    }
    mesh.write_coords(coords.iter().copied());
    log::debug!("wrote {proposed} vertex positions");
    SyncOutcome::Updated { count: proposed }
}

/// See [`sync_coords`].
pub fn sync_positions(
    mesh: &mut MeshView<'_>,
    positions: &[Vector3],
    config: &SyncConfig,
) -> SyncOutcome {
    sync_coords(mesh, as_coords(positions), config)
}

fn transform(position: Vector3, matrix: Option<&Matrix4>) -> [f32; 3] {
    match matrix {
        Some(m) => (*m * position.extend(1.0)).truncate().into(),
        None => position.into(),
    }
}

fn merged_len(parts: &[MeshPart<'_>]) -> usize {
    parts.iter().map(|p| p.positions.len()).sum()
}

fn merged_coords<'p, 'a: 'p>(
    parts: &'p [MeshPart<'a>],
) -> impl Iterator<Item = [f32; 3]> + 'p {
    parts.iter().flat_map(|part| {
        part.positions
            .iter()
            .map(move |&p| transform(p, part.matrix.as_ref()))
    })
}

/// Concatenates several parts into one mesh, transforming each part by its matrix first.
///
/// The total number of positions across all parts must equal the mesh's vertex count.
pub fn set_verts_merged(
    mesh: &mut MeshView<'_>,
    parts: &[MeshPart<'_>],
) -> Result<(), SyncError> {
    let actual = merged_len(parts);
    check_count(mesh, actual)?;
    mesh.write_coords(merged_coords(parts));
    log::debug!("wrote {actual} vertex positions from {} parts", parts.len());
    Ok(())
}

/// Fixed-topology counterpart of [`set_verts_merged`].
///
/// Writes the merged parts in place when `config.fixed_verts` is set and their total count
/// matches the mesh. Otherwise leaves the mesh alone and reports that the host must rebuild it.
pub fn sync_merged(
    mesh: &mut MeshView<'_>,
    parts: &[MeshPart<'_>],
    config: &SyncConfig,
) -> SyncOutcome {
    let proposed = merged_len(parts);
    if let Some(outcome) = rebuild_needed(mesh.vertex_count(), proposed, config) {
        return outcome;
    }
    mesh.write_coords(merged_coords(parts));
    log::debug!("wrote {proposed} vertex positions from {} parts", parts.len());
    SyncOutcome::Updated { count: proposed }
}
