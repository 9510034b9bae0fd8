//! Text line graph of a metric's history
//!
//! Points are placed on the x axis by time, so gaps between entries show
//! up as gaps on the graph.

use crate::metric::{HistoryPoint, Metric};

const MARKER: char = '●';
const LINE: char = '·';
const LABEL_WIDTH: usize = 9;

/// Render `points` (oldest first) as a `width` x `height` plot.
///
/// Returns a one-line message when there is nothing to draw.
pub fn render_chart(metric: Metric, points: &[HistoryPoint], width: usize, height: usize) -> String {
    if points.is_empty() {
        return format!("No {} entries yet.", metric.as_str());
    }
    let width = width.max(2);
    let height = height.max(2);

    let (lo, hi) = value_range(points);
    let first = points[0].created_at;
    let span = (points[points.len() - 1].created_at - first).num_seconds();

    let cells: Vec<(usize, usize)> = points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let x = if span > 0 {
                let offset = (p.created_at - first).num_seconds() as f64;
                (offset / span as f64 * (width - 1) as f64).round() as usize
            } else if points.len() > 1 {
                // All at the same instant: spread evenly
                i * (width - 1) / (points.len() - 1)
            } else {
                (width - 1) / 2
            };
            let y = ((hi - p.value) / (hi - lo) * (height - 1) as f64).round() as usize;
            (x.min(width - 1), y.min(height - 1))
        })
        .collect();

    let mut grid = vec![vec![' '; width]; height];
    for pair in cells.windows(2) {
        let ((x0, y0), (x1, y1)) = (pair[0], pair[1]);
        if x1 <= x0 + 1 {
            continue;
        }
        for x in (x0 + 1)..x1 {
            let t = (x - x0) as f64 / (x1 - x0) as f64;
            let y = (y0 as f64 + t * (y1 as f64 - y0 as f64)).round() as usize;
            grid[y][x] = LINE;
        }
    }
    for &(x, y) in &cells {
        grid[y][x] = MARKER;
    }

    let mut out = String::new();
    out.push_str(&format!("{} ({})\n", metric.label(), metric.unit()));
    for (row, line) in grid.iter().enumerate() {
        let label = if row == 0 {
            format!("{hi:>w$.2} ┤", w = LABEL_WIDTH - 2)
        } else if row == height - 1 {
            format!("{lo:>w$.2} ┤", w = LABEL_WIDTH - 2)
        } else {
            format!("{:>w$}│", "", w = LABEL_WIDTH - 1)
        };
        out.push_str(&label);
        out.extend(line.iter());
        out.push('\n');
    }
    out.push_str(&format!("{:>w$}└{}\n", "", "─".repeat(width), w = LABEL_WIDTH - 1));

    let start = first.format("%Y-%m-%d").to_string();
    let end = points[points.len() - 1].created_at.format("%Y-%m-%d").to_string();
    let axis = if span > 0 && start != end && width > start.len() + end.len() {
        format!("{start}{}{end}", " ".repeat(width + 1 - start.len() - end.len()))
    } else {
        start
    };
    out.push_str(&format!("{:>w$}{axis}", "", w = LABEL_WIDTH - 1));
    out
}

/// Min/max of the values, widened when flat so the line sits mid-plot
fn value_range(points: &[HistoryPoint]) -> (f64, f64) {
    let lo = points.iter().map(|p| p.value).fold(f64::INFINITY, f64::min);
    let hi = points.iter().map(|p| p.value).fold(f64::NEG_INFINITY, f64::max);
    if (hi - lo).abs() < f64::EPSILON {
        (lo - 1.0, hi + 1.0)
    } else {
        (lo, hi)
    }
}
