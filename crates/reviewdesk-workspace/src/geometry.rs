// ABOUTME: Pure geometry helpers for drop zones and panel resizing
// ABOUTME: Maps pointer coordinates to insertion positions and clamps widths

use crate::model::FULL_WIDTH_PERCENT;

/// Where a drop on the split container should insert a new panel.
///
/// The right strip is checked first so that a container narrower than two
/// drop zones resolves to an append.
pub fn determine_drop_position(
    relative_x: f64,
    container_width: f64,
    dropzone_width: f64,
    panel_count: usize,
) -> Option<usize> {
    if relative_x >= container_width - dropzone_width {
        Some(panel_count)
    } else if relative_x <= dropzone_width {
        Some(0)
    } else {
        None
    }
}

/// Whether the pointer is over the left drop zone
pub fn in_left_drop_zone(relative_x: f64, dropzone_width: f64) -> bool {
    relative_x <= dropzone_width
}

/// Whether the pointer is over the right drop zone
pub fn in_right_drop_zone(relative_x: f64, container_width: f64, dropzone_width: f64) -> bool {
    relative_x >= container_width - dropzone_width
}

/// Clamp `desired` so that both panels of a pair keep at least `min` each.
pub fn clamp_pair_width(desired: f64, pair_total: f64, min: f64) -> f64 {
    let upper = (pair_total - min).max(min);
    desired.clamp(min, upper)
}

/// Size percentage to pixels for a container of `container_width` pixels
pub fn percent_to_px(percent: f64, container_width: f64) -> f64 {
    percent * container_width / FULL_WIDTH_PERCENT
}

/// Pixels to size percentage for a container of `container_width` pixels
pub fn px_to_percent(px: f64, container_width: f64) -> f64 {
    px * FULL_WIDTH_PERCENT / container_width
}

/// Even sizes for `count` panels
pub fn equal_sizes(count: usize) -> Option<f64> {
    (count > 0).then(|| FULL_WIDTH_PERCENT / count as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drop_position_left_edge() {
        assert_eq!(determine_drop_position(5.0, 1000.0, 200.0, 3), Some(0));
        assert_eq!(determine_drop_position(200.0, 1000.0, 200.0, 3), Some(0));
    }

    #[test]
    fn test_drop_position_right_edge() {
        assert_eq!(determine_drop_position(850.0, 1000.0, 200.0, 3), Some(3));
        assert_eq!(determine_drop_position(800.0, 1000.0, 200.0, 3), Some(3));
    }

    #[test]
    fn test_drop_position_middle() {
        assert_eq!(determine_drop_position(500.0, 1000.0, 200.0, 3), None);
        assert_eq!(determine_drop_position(201.0, 1000.0, 200.0, 3), None);
    }

    #[test]
    fn test_drop_position_narrow_container_appends() {
        assert_eq!(determine_drop_position(150.0, 300.0, 200.0, 1), Some(1));
    }

    #[test]
    fn test_zone_flags() {
        assert!(in_left_drop_zone(0.0, 200.0));
        assert!(!in_left_drop_zone(201.0, 200.0));
        assert!(in_right_drop_zone(999.0, 1000.0, 200.0));
        assert!(!in_right_drop_zone(799.0, 1000.0, 200.0));
    }

    #[test]
    fn test_clamp_pair_width() {
        assert_eq!(clamp_pair_width(20.0, 1000.0, 100.0), 100.0);
        assert_eq!(clamp_pair_width(950.0, 1000.0, 100.0), 900.0);
        assert_eq!(clamp_pair_width(400.0, 1000.0, 100.0), 400.0);
        // Pair too small for both minimums collapses to the minimum
        assert_eq!(clamp_pair_width(50.0, 150.0, 100.0), 100.0);
    }

    #[test]
    fn test_percent_px_conversion() {
        assert_eq!(percent_to_px(25.0, 800.0), 200.0);
        assert_eq!(px_to_percent(200.0, 800.0), 25.0);
    }

    #[test]
    fn test_equal_sizes() {
        assert_eq!(equal_sizes(0), None);
        assert_eq!(equal_sizes(4), Some(25.0));
    }
}
