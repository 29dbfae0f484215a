use ratatui::{prelude::*, widgets::*};

use crate::algo::SweepStats;

/// Lowest plotted `log10` level; exact zeros have no logarithm
const FLOOR: f64 = -12.0;

/// Line chart of `log10(max delta)` per sweep
///
/// The tolerance is drawn as a horizontal reference line.
pub struct Plot {
    data: Vec<(f64, f64)>,
    tolerance: Vec<(f64, f64)>,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
}

impl Plot {
    pub fn new(max_sweeps: u32, tolerance: f32) -> Self {
        let x_bounds = [0.0, max_sweeps.max(1) as f64];
        let level = f64::from(tolerance).log10().max(FLOOR);
        Self {
            data: Vec::new(),
            tolerance: vec![(x_bounds[0], level), (x_bounds[1], level)],
            x_bounds,
            y_bounds: [level, level],
        }
    }

    pub fn update(&mut self, stats: SweepStats) {
        let y = f64::from(stats.max_delta).log10().max(FLOOR);
        self.y_bounds = [self.y_bounds[0].min(y), self.y_bounds[1].max(y)];
        self.data.push((stats.sweep as f64, y));
    }

    fn labels(bounds: [f64; 2], precision: usize) -> Vec<Span<'static>> {
        bounds
            .iter()
            .map(|x| format!("{x:.precision$}").bold())
            .collect()
    }
}

impl Widget for &Plot {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let deltas = Dataset::default()
            .name("max delta")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .cyan()
            .data(&self.data);

        let tolerance = Dataset::default()
            .name("tolerance")
            .marker(Marker::Dot)
            .graph_type(GraphType::Line)
            .dark_gray()
            .data(&self.tolerance);

        let x_axis = Axis::default()
            .title("Sweep")
            .dark_gray()
            .labels(Plot::labels(self.x_bounds, 0))
            .bounds(self.x_bounds);

        // pad so a flat series still has some height
        let y_bounds = [self.y_bounds[0] - 0.5, self.y_bounds[1] + 0.5];
        let y_axis = Axis::default()
            .title("log10 max delta")
            .dark_gray()
            .labels(Plot::labels(y_bounds, 2))
            .bounds(y_bounds);

        Chart::new(vec![deltas, tolerance])
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .title("Convergence")
                    .padding(Padding::uniform(2)),
            )
            .x_axis(x_axis)
            .y_axis(y_axis)
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plot_tracks_bounds() {
        let mut plot = Plot::new(100, 1e-3);
        assert!((plot.y_bounds[0] + 3.0).abs() < 1e-6, "Starts at the tolerance level");
        assert_eq!(plot.y_bounds[0], plot.y_bounds[1], "Empty range");

        plot.update(SweepStats { sweep: 1, max_delta: 10.0 });
        plot.update(SweepStats { sweep: 2, max_delta: 0.0 });
        assert_eq!(plot.data, vec![(1.0, 1.0), (2.0, -12.0)], "Points in log space");
        assert_eq!(plot.y_bounds, [-12.0, 1.0], "Bounds widened");
    }

    #[test]
    fn zero_tolerance_stays_finite() {
        let plot = Plot::new(100, 0.0);
        assert_eq!(plot.y_bounds, [FLOOR, FLOOR], "Tolerance line clipped to the floor");
        assert!(
            plot.tolerance.iter().all(|(x, y)| x.is_finite() && y.is_finite()),
            "Tolerance line is drawable"
        );
    }
}
