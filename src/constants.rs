/// Grid construction constants
pub mod grid {
    /// Half-width of the neighbourhood around the singularity that no grid point may enter
    pub const GAP_HALF_WIDTH: f64 = 0.1;
}

/// Resolution sweep used by the global error analysis
pub mod sweep {
    /// First probed resolution
    pub const START: usize = 30;

    /// Last probed resolution (inclusive)
    pub const END: usize = 510;

    /// Increment between two probed resolutions
    pub const STEP: usize = 10;
}
