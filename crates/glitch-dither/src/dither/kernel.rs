//! Error diffusion kernel definitions.

/// An error diffusion kernel.
///
/// Each entry gives a neighbor offset `(dx, dy)` and the numerator of the
/// share of quantization error it receives; the denominator is `divisor`.
/// Neighbors are always to the right on the current row or on a later row.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Kernel {
    /// (dx, dy, weight) entries for error diffusion.
    pub(crate) entries: &'static [(i32, i32, u8)],

    /// Each neighbor receives `error * weight / divisor`.
    pub(crate) divisor: u8,

    /// Maximum dy value in entries.
    ///
    /// Used to determine error buffer depth: need `max_dy + 1` rows.
    pub(crate) max_dy: usize,
}

/// Floyd-Steinberg dithering kernel.
///
/// Distributes error to 4 neighbors with 100% total propagation (16/16).
///
/// ```text
///        X   7
///    3   5   1
/// ```
pub(crate) const FLOYD_STEINBERG: Kernel = Kernel {
    entries: &[
        (1, 0, 7),  // right
        (-1, 1, 3), // bottom-left
        (0, 1, 5),  // bottom
        (1, 1, 1),  // bottom-right
    ],
    divisor: 16,
    max_dy: 1,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floyd_steinberg_full_propagation() {
        let total: u32 = FLOYD_STEINBERG.entries.iter().map(|&(_, _, w)| w as u32).sum();
        assert_eq!(total, FLOYD_STEINBERG.divisor as u32);
    }

    #[test]
    fn test_max_dy_matches_entries() {
        let max = FLOYD_STEINBERG
            .entries
            .iter()
            .map(|&(_, dy, _)| dy as usize)
            .max();
        assert_eq!(max, Some(FLOYD_STEINBERG.max_dy));
    }

    #[test]
    fn test_entries_only_reach_unvisited_pixels() {
        for &(dx, dy, _) in FLOYD_STEINBERG.entries {
            assert!(dy > 0 || dx > 0, "({}, {}) points backwards", dx, dy);
        }
    }
}
