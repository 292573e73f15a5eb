use std::os::raw::c_int;

use crate::geometry::Vector3;
use crate::handle::{MeshHandle, MeshView};

/// A single vertex as the host application stores it.
///
/// The bridge only ever writes `co`. The remaining fields are mirrored so that the record
/// stride matches the host's vertex array exactly:
///
/// ```text
///    offset  0          12          18     19        20
///            +----------+-----------+------+---------+
///            | co: 3xf32| no: 3xi16 | flag | bweight |
///            +----------+-----------+------+---------+
/// ```
///
/// Any change to the host's vertex layout invalidates this type. It is a mapping of the
/// fields we touch plus the bytes we must step over, not a general binding.
#[derive(Debug, PartialEq, Copy, Clone, Default)]
#[repr(C)]
pub struct VertexRecord {
    pub co: [f32; 3],
    pub no: [i16; 3],
    pub flag: i8,
    pub bweight: i8,
}

static_assertions::assert_eq_size!(VertexRecord, [u8; 20]);
static_assertions::assert_eq_align!(VertexRecord, f32);

impl VertexRecord {
    pub fn at(co: Vector3) -> Self {
        Self {
            co: co.into(),
            ..Default::default()
        }
    }
}

/// The head of a host-owned mesh: a vertex count followed by a pointer to the vertex array.
///
/// A [`MeshHandle`] is the address of one of these.
#[derive(Debug)]
#[repr(C)]
pub struct HostMesh {
    pub totvert: c_int,
    pub mvert: *mut VertexRecord,
}

/// An owning host-side mesh.
///
/// The bridge never allocates meshes. This type plays the host for embedders that keep their
/// vertex storage in Rust, and for tests.
pub struct HostMeshBuffer {
    records: Vec<VertexRecord>,
    mesh: HostMesh,
}

impl HostMeshBuffer {
    /// # Panics
    ///
    /// Panics if there are more records than a `c_int` can count.
    pub fn from_records(mut records: Vec<VertexRecord>) -> Self {
        let totvert = c_int::try_from(records.len()).expect("vertex count exceeds c_int");
        let mvert = records.as_mut_ptr();
        Self {
            records,
            mesh: HostMesh { totvert, mvert },
        }
    }

    pub fn from_positions(positions: &[Vector3]) -> Self {
        Self::from_records(positions.iter().copied().map(VertexRecord::at).collect())
    }

    pub fn vertex_count(&self) -> usize {
        self.records.len()
    }

    pub fn records(&self) -> &[VertexRecord] {
        &self.records
    }

    pub fn positions(&self) -> Vec<Vector3> {
        self.records.iter().map(|r| Vector3::from(r.co)).collect()
    }

    /// Borrows the vertex array as a typed view without going through a handle.
    pub fn view(&mut self) -> MeshView<'_> {
        MeshView::from_records(&mut self.records)
    }

    /// Returns the raw handle a foreign caller would receive for this mesh.
    ///
    /// The handle is the address of the mesh head and is only valid while `self` is neither
    /// moved nor dropped.
    pub fn handle(&mut self) -> MeshHandle {
        self.mesh.mvert = self.records.as_mut_ptr();
        MeshHandle::from_raw(std::ptr::addr_of_mut!(self.mesh) as usize)
    }
}
