pub type Vector3 = cgmath::Vector3<f32>;
pub type Matrix4 = cgmath::Matrix4<f32>;

// We rely on Vector3 being repr(c).
static_assertions::assert_eq_size!(Vector3, [f32; 3]);
static_assertions::assert_eq_align!(Vector3, f32);

/// Views a list of positions as packed xyz triples.
pub fn as_coords(positions: &[Vector3]) -> &[[f32; 3]] {
    // Safety: Vector3 is a repr(C) struct of three f32 fields, which the assertions above pin
    // to the size and alignment of [f32; 3]. The returned slice borrows from `positions` so it
    // cannot outlive the input slice.
    unsafe { std::slice::from_raw_parts(positions.as_ptr().cast::<[f32; 3]>(), positions.len()) }
}
