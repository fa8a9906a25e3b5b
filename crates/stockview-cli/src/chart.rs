//! Terminal candlestick rendering.

use stockview_core::{price_bounds, Bar, BarSeries};

pub const DEFAULT_HEIGHT: usize = 16;
pub const DEFAULT_MAX_COLUMNS: usize = 72;

const WICK: char = '│';
const BULL_BODY: char = '┃';
const BEAR_BODY: char = '█';
const AXIS_WIDTH: usize = 10;

/// Render the most recent `max_columns` bars as a candlestick chart, one
/// column per bar, `height` rows tall.
pub fn render_candles(series: &BarSeries, title: &str, height: usize, max_columns: usize) -> Vec<String> {
    let height = height.max(2);
    let bars = series.bars();
    let visible = &bars[bars.len().saturating_sub(max_columns.max(1))..];

    let (low, high) = price_bounds(visible);
    let scale = Scale::new(low, high, height);
    let columns = visible.iter().map(|bar| Column::new(bar, &scale)).collect::<Vec<_>>();

    let mut lines = Vec::with_capacity(height + 3);
    lines.push(title.to_owned());

    for row in 0..height {
        let label = if row == 0 || row == height - 1 || row == height / 2 {
            format!("{:>AXIS_WIDTH$.2}", scale.price_at(row))
        } else {
            " ".repeat(AXIS_WIDTH)
        };
        let cells = columns.iter().map(|column| column.cell(row)).collect::<String>();
        lines.push(format!("{label} ┤{}", cells.trim_end()));
    }

    lines.push(format!("{} └{}", " ".repeat(AXIS_WIDTH), "─".repeat(columns.len())));
    let first = visible[0].ts;
    let last = visible[visible.len() - 1].ts;
    if visible.len() < bars.len() {
        lines.push(format!(
            "{} {first} … {last} (last {} of {} bars)",
            " ".repeat(AXIS_WIDTH),
            visible.len(),
            bars.len()
        ));
    } else if first == last {
        lines.push(format!("{} {first}", " ".repeat(AXIS_WIDTH)));
    } else {
        lines.push(format!("{} {first} … {last}", " ".repeat(AXIS_WIDTH)));
    }

    lines
}

/// Maps prices onto chart rows, row 0 being the highest price.
struct Scale {
    high: f64,
    span: f64,
    height: usize,
}

impl Scale {
    fn new(low: f64, high: f64, height: usize) -> Self {
        let span = high - low;
        Self {
            high,
            span: if span > 0.0 { span } else { 1.0 },
            height,
        }
    }

    fn row_of(&self, price: f64) -> usize {
        let steps = (self.height - 1) as f64;
        let row = ((self.high - price) / self.span * steps).round();
        (row.max(0.0) as usize).min(self.height - 1)
    }

    fn price_at(&self, row: usize) -> f64 {
        self.high - self.span * row as f64 / (self.height - 1) as f64
    }
}

struct Column {
    wick_top: usize,
    wick_bottom: usize,
    body_top: usize,
    body_bottom: usize,
    body: char,
}

impl Column {
    fn new(bar: &Bar, scale: &Scale) -> Self {
        Self {
            wick_top: scale.row_of(bar.high),
            wick_bottom: scale.row_of(bar.low),
            body_top: scale.row_of(bar.open.max(bar.close)),
            body_bottom: scale.row_of(bar.open.min(bar.close)),
            body: if bar.is_bullish() { BULL_BODY } else { BEAR_BODY },
        }
    }

    fn cell(&self, row: usize) -> char {
        if (self.body_top..=self.body_bottom).contains(&row) {
            self.body
        } else if (self.wick_top..=self.wick_bottom).contains(&row) {
            WICK
        } else {
            ' '
        }
    }
}
