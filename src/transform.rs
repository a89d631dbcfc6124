//! Stock per-item transforms for the compute phase.

use std::f32::consts::PI;

/// Sine of an integer angle given in degrees.
///
/// The default workload treats each item as an angle, so a round maps
/// every item to `sin(item * PI / 180)`.
pub fn sin_degrees(theta: &i32) -> f32 {
    (*theta as f32 * PI / 180.0).sin()
}

/// Pass each item through unchanged.
pub fn identity<T: Clone>(item: &T) -> T {
    item.clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sin_degrees_known_angles() {
        assert!(sin_degrees(&0).abs() < 1e-6);
        assert!((sin_degrees(&30) - 0.5).abs() < 1e-6);
        assert!((sin_degrees(&90) - 1.0).abs() < 1e-6);
        assert!(sin_degrees(&180).abs() < 1e-5);
    }

    #[test]
    fn test_identity_clones_items() {
        assert_eq!(identity(&41), 41);
        assert_eq!(identity(&String::from("item")), "item");
    }
}
