use std::marker::PhantomData;
use std::os::raw::c_int;

use crate::host::{HostMesh, VertexRecord};

#[derive(Debug, thiserror::Error, PartialEq, Eq, Copy, Clone)]
pub enum ViewError {
    #[error("mesh handle is null")]
    NullHandle,
    #[error("mesh reports an invalid vertex count of {0}")]
    InvalidVertexCount(c_int),
    #[error("mesh reports {0} vertices but its vertex array is null")]
    NullVertexArray(usize),
}

/// An address-sized integer naming a host-owned [`HostMesh`].
///
/// The handle neither owns nor retains the mesh. It is just the number the host gave us.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct MeshHandle(usize);

impl MeshHandle {
    pub const fn from_raw(addr: usize) -> Self {
        Self(addr)
    }

    pub const fn into_raw(self) -> usize {
        self.0
    }

    pub const fn is_null(self) -> bool {
        self.0 == 0
    }

    /// Reinterprets the handle as a mutable view of the host's vertex array.
    ///
    /// This is the one place where a foreign address becomes a typed reference. Everything
    /// downstream works on the returned [`MeshView`].
    ///
    /// # Safety
    ///
    /// The caller must guarantee that, for all of `'a`:
    ///
    /// * the handle is the address of a live, properly aligned [`HostMesh`] whose layout matches
    ///   the host's real mesh head,
    /// * `mvert` points to at least `totvert` contiguous [`VertexRecord`]s,
    /// * nothing else reads or writes that vertex array; the host holds whatever lock its own
    ///   mesh-editing context requires.
    ///
    /// A null handle, a negative count, and a null vertex array with a non-zero count are
    /// reported as errors. Every other fault is undefined behavior.
    pub unsafe fn view<'a>(self) -> Result<MeshView<'a>, ViewError> {
        if self.is_null() {
            return Err(ViewError::NullHandle);
        }
        let mesh = &*(self.0 as *const HostMesh);
        let count = usize::try_from(mesh.totvert)
            .map_err(|_| ViewError::InvalidVertexCount(mesh.totvert))?;
        if count == 0 {
            return Ok(MeshView::from_records(Default::default()));
        }
        if mesh.mvert.is_null() {
            return Err(ViewError::NullVertexArray(count));
        }
        let records = std::slice::from_raw_parts_mut(mesh.mvert, count);
        Ok(MeshView {
            records,
            _host: PhantomData,
        })
    }
}

/// A borrowed, mutable view of a host mesh's vertex records.
pub struct MeshView<'a> {
    records: &'a mut [VertexRecord],
    // Views of foreign memory must not cross threads on their own.
    _host: PhantomData<*mut VertexRecord>,
}

impl<'a> MeshView<'a> {
    pub fn from_records(records: &'a mut [VertexRecord]) -> Self {
        Self {
            records,
            _host: PhantomData,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.records.len()
    }

    pub fn records(&self) -> &[VertexRecord] {
        &self.records[..]
    }

    /// Overwrites `co` of each record, in order, with the next coordinate triple.
    ///
    /// Callers check the count first; a short or long iterator is a bug.
    pub fn write_coords<I>(&mut self, coords: I)
    where
        I: IntoIterator<Item = [f32; 3]>,
    {
        let mut written = 0;
        for (record, co) in self.records.iter_mut().zip(coords) {
            record.co = co;
            written += 1;
        }
        debug_assert_eq!(self.records.len(), written);
    }
}
