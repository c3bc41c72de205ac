//! Error diffusion kernel tables.

/// Neighbor offsets and weights for one error diffusion scheme.
///
/// Each entry `(dx, dy, weight)` sends `error * weight / divisor` to the
/// pixel `dx` columns right and `dy` rows down. Only neighbors not yet
/// visited in raster order may appear, so `dy > 0` or `dx > 0` holds.
#[derive(Debug, Clone, Copy)]
pub struct Kernel {
    pub entries: &'static [(i32, i32, u8)],
    pub divisor: u8,
}

/// Floyd-Steinberg kernel.
///
/// ```text
///        X   7
///    3   5   1
/// ```
pub const FLOYD_STEINBERG: Kernel = Kernel {
    entries: &[
        (1, 0, 7),  // east
        (-1, 1, 3), // south-west
        (0, 1, 5),  // south
        (1, 1, 1),  // south-east
    ],
    divisor: 16,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floyd_steinberg_propagates_everything() {
        let total: u32 = FLOYD_STEINBERG.entries.iter().map(|&(_, _, w)| w as u32).sum();
        assert_eq!(total, FLOYD_STEINBERG.divisor as u32);
    }

    #[test]
    fn test_floyd_steinberg_only_forward() {
        for &(dx, dy, _) in FLOYD_STEINBERG.entries {
            assert!(dy > 0 || dx > 0, "({dx}, {dy}) points backwards");
        }
    }
}
