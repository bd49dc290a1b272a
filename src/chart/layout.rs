//! Plot geometry shared by every chart: margins, value ranges, tick
//! generation, and value→pixel mapping. Pure math, no DOM.

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Chart margins: room for y tick labels on the left, legend on top,
/// category labels below.
pub fn plot_area(canvas_width: f64, canvas_height: f64) -> PlotArea {
    let left = 44.0;
    let top = 26.0;
    let right_pad = 14.0;
    let bottom_pad = 30.0;
    PlotArea {
        left,
        top,
        width: (canvas_width - left - right_pad).max(1.0),
        height: (canvas_height - top - bottom_pad).max(1.0),
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Range spanning the finite values, `None` when there are none.
    pub fn of<I: IntoIterator<Item = f64>>(values: I) -> Option<Self> {
        let mut range: Option<Self> = None;
        for v in values {
            if !v.is_finite() {
                continue;
            }
            range = Some(match range {
                None => Self::new(v, v),
                Some(r) => Self::new(r.min.min(v), r.max.max(v)),
            });
        }
        range
    }

    /// Expand both ends by a fraction of the span. A degenerate span gets a
    /// unit of headroom so a single point still plots mid-chart.
    pub fn padded(self, fraction: f64) -> Self {
        let span = self.max - self.min;
        if span <= 0.0 {
            return Self::new(self.min - 1.0, self.max + 1.0);
        }
        let pad = span * fraction;
        Self::new(self.min - pad, self.max + pad)
    }

    /// Normalized position of a value in [0, 1].
    pub fn position(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if span <= 0.0 {
            return 0.5;
        }
        ((value - self.min) / span).clamp(0.0, 1.0)
    }
}

/// A 1/2/5-series step that yields roughly `target` ticks over `span`.
pub fn nice_step(span: f64, target: usize) -> f64 {
    if span <= 0.0 || target == 0 {
        return 1.0;
    }
    let raw = span / target as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    let normalized = raw / magnitude;
    let factor = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };
    factor * magnitude
}

/// Tick values covering the range at a nice step, endpoints included when
/// they land on the grid.
pub fn ticks(range: &ValueRange, target: usize) -> Vec<f64> {
    let step = nice_step(range.max - range.min, target);
    let mut out = Vec::new();
    let mut tick = (range.min / step).ceil() * step;
    // tolerate fp drift at the far edge
    let limit = range.max + step * 1e-6;
    while tick <= limit {
        out.push(tick);
        tick += step;
    }
    out
}

/// X pixel of point `i` of `n` evenly spread across the area; a lone point
/// sits in the middle.
pub fn x_for_index(area: &PlotArea, i: usize, n: usize) -> f64 {
    if n <= 1 {
        return area.left + area.width / 2.0;
    }
    area.left + area.width * i as f64 / (n - 1) as f64
}

/// Y pixel for a value (canvas y grows downward).
pub fn y_for_value(area: &PlotArea, range: &ValueRange, value: f64) -> f64 {
    area.bottom() - area.height * range.position(value)
}

/// X pixel for a value on a horizontal value axis.
pub fn x_for_value(area: &PlotArea, range: &ValueRange, value: f64) -> f64 {
    area.left + area.width * range.position(value)
}

/// Left edge and width of bar `i` of `n`, with the bar occupying
/// `bar_fraction` of its category slot.
pub fn bar_slot(area: &PlotArea, i: usize, n: usize, bar_fraction: f64) -> (f64, f64) {
    if n == 0 {
        return (area.left, 0.0);
    }
    let slot = area.width / n as f64;
    let bar = slot * bar_fraction;
    (area.left + i as f64 * slot + (slot - bar) / 2.0, bar)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area() -> PlotArea {
        PlotArea {
            left: 40.0,
            top: 20.0,
            width: 200.0,
            height: 100.0,
        }
    }

    #[test]
    fn range_of_ignores_non_finite() {
        let range = ValueRange::of([1.0, f64::NAN, 5.0, f64::INFINITY]).unwrap();
        assert_eq!(range, ValueRange::new(1.0, 5.0));
        assert!(ValueRange::of([f64::NAN]).is_none());
        assert!(ValueRange::of([]).is_none());
    }

    #[test]
    fn degenerate_range_pads_to_a_unit() {
        let range = ValueRange::new(3.0, 3.0).padded(0.1);
        assert_eq!(range, ValueRange::new(2.0, 4.0));
    }

    #[test]
    fn position_is_clamped() {
        let range = ValueRange::new(0.0, 100.0);
        assert_eq!(range.position(-10.0), 0.0);
        assert_eq!(range.position(50.0), 0.5);
        assert_eq!(range.position(150.0), 1.0);
    }

    #[test]
    fn score_axis_ticks_land_on_twenties() {
        let t = ticks(&ValueRange::new(0.0, 100.0), 5);
        assert_eq!(t, vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
    }

    #[test]
    fn nice_step_picks_from_the_125_series() {
        assert_eq!(nice_step(100.0, 5), 20.0);
        assert_eq!(nice_step(7.0, 5), 2.0);
        assert!((nice_step(0.35, 5) - 0.1).abs() < 1e-12);
    }

    #[test]
    fn lone_point_sits_mid_chart() {
        let a = area();
        assert_eq!(x_for_index(&a, 0, 1), 140.0);
        assert_eq!(x_for_index(&a, 0, 2), 40.0);
        assert_eq!(x_for_index(&a, 1, 2), 240.0);
    }

    #[test]
    fn y_axis_grows_downward() {
        let a = area();
        let range = ValueRange::new(0.0, 100.0);
        assert_eq!(y_for_value(&a, &range, 0.0), a.bottom());
        assert_eq!(y_for_value(&a, &range, 100.0), a.top);
    }

    #[test]
    fn bars_stay_inside_their_slots() {
        let a = area();
        let (x0, w0) = bar_slot(&a, 0, 4, 0.8);
        let (x3, w3) = bar_slot(&a, 3, 4, 0.8);
        assert!(x0 >= a.left);
        assert!(x3 + w3 <= a.right() + 1e-9);
        assert_eq!(w0, w3);
    }
}
