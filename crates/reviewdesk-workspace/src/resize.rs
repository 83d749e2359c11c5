// ABOUTME: Converts divider drags between adjacent panels into size percentages
// ABOUTME: Works in pixels against the measured container and clamps to a minimum width

use reviewdesk_logging::trace;

use crate::geometry::{clamp_pair_width, percent_to_px, px_to_percent};
use crate::model::Panel;

#[derive(Debug, Clone, PartialEq)]
pub struct ResizeController {
    /// Measured width of the split container; None until first layout
    container_width_px: Option<f64>,
    min_panel_width_px: f64,
}

impl ResizeController {
    pub fn new(min_panel_width_px: f64) -> Self {
        Self {
            container_width_px: None,
            min_panel_width_px,
        }
    }

    pub fn set_container_width(&mut self, width_px: f64) {
        self.container_width_px = (width_px > 0.0).then_some(width_px);
    }

    pub fn container_width(&self) -> Option<f64> {
        self.container_width_px
    }

    pub fn min_panel_width_px(&self) -> f64 {
        self.min_panel_width_px
    }

    /// New size percentage for `panels[panel_index]` after its right divider moved.
    ///
    /// `divider_position_px` is in window coordinates; `sidebar_offset_px` is
    /// subtracted first. Returns None when there is no container, no right neighbour,
    /// or the position is not finite.
    pub fn divider_moved(
        &self,
        panels: &[Panel],
        panel_index: usize,
        divider_position_px: f64,
        sidebar_offset_px: f64,
    ) -> Option<f64> {
        let container_width = self.container_width_px?;
        if panel_index + 1 >= panels.len() {
            return None;
        }

        let current = &panels[panel_index];
        let next = &panels[panel_index + 1];
        let pair_total_px = percent_to_px(current.size, container_width)
            + percent_to_px(next.size, container_width);

        let preceding_px: f64 = panels[..panel_index]
            .iter()
            .map(|p| percent_to_px(p.size, container_width))
            .sum();

        let desired_px = divider_position_px - sidebar_offset_px - preceding_px;
        if !desired_px.is_finite() {
            trace!(panel_index, desired_px, "Ignoring non-finite divider position");
            return None;
        }
        let clamped_px = clamp_pair_width(desired_px, pair_total_px, self.min_panel_width_px);

        trace!(
            panel_index,
            desired_px,
            clamped_px,
            pair_total_px,
            "Divider moved"
        );

        Some(px_to_percent(clamped_px, container_width))
    }
}

impl Default for ResizeController {
    fn default() -> Self {
        Self::new(reviewdesk_types::config::default_min_panel_width())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panels(sizes: &[f64]) -> Vec<Panel> {
        sizes
            .iter()
            .enumerate()
            .map(|(i, size)| {
                let mut panel = Panel::new(i as u64 + 1, Some("f.ts"));
                panel.size = *size;
                panel
            })
            .collect()
    }

    fn measured(width: f64) -> ResizeController {
        let mut controller = ResizeController::default();
        controller.set_container_width(width);
        controller
    }

    #[test]
    fn test_rejects_without_container() {
        let controller = ResizeController::default();
        assert_eq!(controller.divider_moved(&panels(&[50.0, 50.0]), 0, 300.0, 0.0), None);
    }

    #[test]
    fn test_rejects_last_panel() {
        let controller = measured(1000.0);
        assert_eq!(controller.divider_moved(&panels(&[50.0, 50.0]), 1, 300.0, 0.0), None);
        assert_eq!(controller.divider_moved(&panels(&[100.0]), 0, 300.0, 0.0), None);
    }

    #[test]
    fn test_clamps_to_minimum_width() {
        let controller = measured(1000.0);
        let layout = panels(&[50.0, 50.0]);
        assert_eq!(controller.divider_moved(&layout, 0, 20.0, 0.0), Some(10.0));
        assert_eq!(controller.divider_moved(&layout, 0, 990.0, 0.0), Some(90.0));
    }

    #[test]
    fn test_accounts_for_preceding_panels() {
        let controller = measured(1000.0);
        let layout = panels(&[25.0, 25.0, 50.0]);
        // Panel 1 starts at 250px; divider at 550px makes it 300px wide
        assert_eq!(controller.divider_moved(&layout, 1, 550.0, 0.0), Some(30.0));
    }

    #[test]
    fn test_subtracts_sidebar_offset() {
        let controller = measured(1000.0);
        let layout = panels(&[50.0, 50.0]);
        assert_eq!(controller.divider_moved(&layout, 0, 650.0, 250.0), Some(40.0));
    }

    #[test]
    fn test_rejects_non_finite_divider_position() {
        let controller = measured(1000.0);
        let layout = panels(&[50.0, 50.0]);
        assert_eq!(controller.divider_moved(&layout, 0, f64::NAN, 0.0), None);
        assert_eq!(controller.divider_moved(&layout, 0, f64::INFINITY, 0.0), None);
        assert_eq!(controller.divider_moved(&layout, 0, 300.0, f64::NAN), None);
    }

    #[test]
    fn test_zero_width_container_is_unset() {
        let mut controller = measured(800.0);
        controller.set_container_width(0.0);
        assert_eq!(controller.container_width(), None);
    }
}
