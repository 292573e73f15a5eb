//! C entry points for hosts that load the bridge as a shared library.
//!
//! Every function takes the mesh handle as a plain address-sized integer and returns a status
//! code: [`VERTSYNC_OK`] on success, [`VERTSYNC_NEEDS_REBUILD`] when a fixed-topology sync could
//! not be applied, or a negative [`SyncError::code`].

use std::os::raw::c_int;

use vertsync_mesh::{MeshHandle, MeshView};

use crate::config::SyncConfig;
use crate::error::SyncError;
use crate::sync::{self, SyncOutcome};

pub const VERTSYNC_OK: c_int = 0;
pub const VERTSYNC_NEEDS_REBUILD: c_int = 1;

unsafe fn raw_slice<'a, T>(ptr: *const T, len: usize) -> Result<&'a [T], SyncError> {
    if len == 0 {
        return Ok(Default::default());
    }
    if ptr.is_null() {
        return Err(SyncError::NullPositions { len });
    }
    Ok(std::slice::from_raw_parts(ptr, len))
}

// Input is validated before the handle is dereferenced.
unsafe fn open<'a, T>(
    handle: usize,
    ptr: *const T,
    len: usize,
) -> Result<(MeshView<'a>, &'a [T]), SyncError> {
    let input = raw_slice(ptr, len)?;
    let mesh = MeshHandle::from_raw(handle).view()?;
    Ok((mesh, input))
}

fn status(result: Result<(), SyncError>) -> c_int {
    match result {
        Ok(()) => VERTSYNC_OK,
        Err(e) => e.code(),
    }
}

/// Writes `count` xyz triples into the mesh behind `handle`.
///
/// # Safety
///
/// `handle` must satisfy the contract of [`MeshHandle::view`] for the duration of the call, and
/// `positions` must point to `count` readable triples that do not overlap the mesh's vertices.
#[no_mangle]
pub unsafe extern "C" fn vertsync_set_verts(
    handle: usize,
    positions: *const [f32; 3],
    count: usize,
) -> c_int {
    let result = open(handle, positions, count)
        .and_then(|(mut mesh, coords)| sync::set_coords(&mut mesh, coords));
    status(result)
}

/// Writes a flat list of `len` floats (three per vertex) into the mesh behind `handle`.
///
/// # Safety
///
/// As for [`vertsync_set_verts`], with `coords` pointing to `len` readable floats.
#[no_mangle]
pub unsafe extern "C" fn vertsync_set_verts_flat(
    handle: usize,
    coords: *const f32,
    len: usize,
) -> c_int {
    let result = open(handle, coords, len)
        .and_then(|(mut mesh, coords)| sync::set_verts_flat(&mut mesh, coords));
    status(result)
}

/// Fixed-topology update: writes in place when `fixed_verts` is non-zero and the vertex count is
/// unchanged, otherwise returns [`VERTSYNC_NEEDS_REBUILD`] without touching the mesh.
///
/// # Safety
///
/// As for [`vertsync_set_verts`].
#[no_mangle]
pub unsafe extern "C" fn vertsync_sync_positions(
    handle: usize,
    positions: *const [f32; 3],
    count: usize,
    fixed_verts: c_int,
) -> c_int {
    let config = SyncConfig {
        fixed_verts: fixed_verts != 0,
    };
    match open(handle, positions, count) {
        Ok((mut mesh, coords)) => match sync::sync_coords(&mut mesh, coords, &config) {
            SyncOutcome::Updated { .. } => VERTSYNC_OK,
            SyncOutcome::NeedsRebuild { .. } => VERTSYNC_NEEDS_REBUILD,
        },
        Err(e) => e.code(),
    }
}
