#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncConfig {
    /// Overwrite positions in place when the host's vertex count is unchanged.
    ///
    /// When disabled, [`sync_positions`](crate::sync_positions) always asks the host to rebuild.
    pub fixed_verts: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self { fixed_verts: true }
    }
}
