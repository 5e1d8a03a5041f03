//! Constants for PULSIM
//!
//! Gantree: L0_Foundation → Constants
//!
//! Labels, reserved names, and numeric tolerances shared across crates.

// ============================================================================
// Labels
// Gantree: labels // 라벨
// ============================================================================

pub mod labels {
    //! Pulse labels used by the pipeline

    /// Label of the systematic-noise accumulator pulse
    pub const SYSTEMATIC_NOISE: &str = "systematic_noise";
}

// ============================================================================
// Random Noise
// Gantree: random // 랜덤 노이즈
// ============================================================================

pub mod random {
    //! Random amplitude noise parameters

    /// Draw-parameter name owned by the pipeline (sample count)
    pub const RESERVED_SIZE_KEY: &str = "size";

    /// Default mean of a normal draw
    pub const DEFAULT_LOC: f64 = 0.0;

    /// Default standard deviation of a normal draw
    pub const DEFAULT_SCALE: f64 = 1.0;

    /// Default lower bound of a uniform draw
    pub const DEFAULT_LOW: f64 = 0.0;

    /// Default upper bound of a uniform draw
    pub const DEFAULT_HIGH: f64 = 1.0;

    /// Upper bound on the number of points in a random-noise grid
    pub const MAX_GRID_POINTS: usize = 10_000_000;
}

// ============================================================================
// Numerics
// ============================================================================

pub mod numerics {
    //! Numerical tolerances

    /// Default tolerance for operator comparison
    pub const OPERATOR_TOLERANCE: f64 = 1e-12;
}
