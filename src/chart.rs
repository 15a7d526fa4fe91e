use crate::render::esc;
use crate::types::VisitorRecord;

/// Series colours, assigned in order of first appearance.
pub const PALETTE: [&str; 10] = [
    "#636efa", "#ef553b", "#00cc96", "#ab63fa", "#ffa15a",
    "#19d3f3", "#ff6692", "#b6e880", "#ff97ff", "#fecb52",
];

const MONTHS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

const WIDTH: f64 = 760.0;
const HEIGHT: f64 = 420.0;
const MARGIN_LEFT: f64 = 80.0;
const MARGIN_RIGHT: f64 = 150.0;
const MARGIN_TOP: f64 = 50.0;
const MARGIN_BOTTOM: f64 = 50.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub state: String,
    pub color: &'static str,
    /// (month index, visitors), ordered by month.
    pub points: Vec<(usize, u64)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrendChart {
    pub title: String,
    pub months: Vec<String>,
    pub series: Vec<Series>,
}

/// Calendar position of a month name such as `Jan` or `January`.
fn month_number(month: &str) -> Option<usize> {
    let lower = month.trim().to_lowercase();
    if lower.len() < 3 {
        return None;
    }
    let position = MONTHS.iter().position(|m| lower.starts_with(m))?;
    let full = [
        "january", "february", "march", "april", "may", "june",
        "july", "august", "september", "october", "november", "december",
    ][position];
    (lower.len() == 3 || lower == full || (position == 8 && lower == "sept")).then_some(position)
}

/// Distinct months in calendar order when every one is recognised,
/// otherwise in order of first appearance.
fn order_months(records: &[VisitorRecord]) -> Vec<String> {
    let mut months: Vec<String> = Vec::new();
    for r in records {
        if !months.contains(&r.month) {
            months.push(r.month.clone());
        }
    }
    if months.iter().all(|m| month_number(m).is_some()) {
        months.sort_by_key(|m| month_number(m));
    }
    months
}

impl TrendChart {
    pub fn from_records(title: &str, records: &[VisitorRecord]) -> Self {
        let months = order_months(records);
        let mut series: Vec<Series> = Vec::new();

        for r in records {
            let x = months.iter().position(|m| *m == r.month).unwrap_or_default();
            match series.iter_mut().find(|s| s.state == r.state) {
                Some(s) => s.points.push((x, r.visitors)),
                None => {
                    let color = PALETTE[series.len() % PALETTE.len()];
                    series.push(Series {
                        state: r.state.clone(),
                        color,
                        points: vec![(x, r.visitors)],
                    });
                }
            }
        }
        for s in &mut series {
            s.points.sort_by_key(|(x, _)| *x);
        }

        Self {
            title: title.to_string(),
            months,
            series,
        }
    }

    pub fn y_max(&self) -> u64 {
        self.series
            .iter()
            .flat_map(|s| s.points.iter().map(|(_, v)| *v))
            .max()
            .unwrap_or(0)
    }

    /// Tick step and tick count covering `y_max` with round numbers.
    fn y_ticks(&self) -> (u64, u64) {
        let step = nice_step(self.y_max() as f64 / 5.0);
        let count = (self.y_max() as f64 / step as f64).ceil().max(1.0) as u64;
        (step, count)
    }

    pub fn to_svg(&self) -> String {
        let plot_w = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
        let plot_h = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
        let (step, ticks) = self.y_ticks();
        let y_top = (step * ticks) as f64;

        let x_of = |i: usize| -> f64 {
            match self.months.len() {
                0 | 1 => MARGIN_LEFT + plot_w / 2.0,
                n => MARGIN_LEFT + plot_w * i as f64 / (n - 1) as f64,
            }
        };
        let y_of = |v: u64| -> f64 { MARGIN_TOP + plot_h - plot_h * v as f64 / y_top };

        let mut out = format!(
            "<svg class=\"trend-chart\" xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 {WIDTH} {HEIGHT}\" \
             width=\"100%\" role=\"img\" aria-label=\"{0}\"><text x=\"{MARGIN_LEFT}\" y=\"28\" \
             font-size=\"18\">{0}</text>",
            esc(&self.title)
        );

        // Grid and y labels
        for t in 0..=ticks {
            let value = step * t;
            let y = y_of(value);
            out.push_str(&format!(
                "<line x1=\"{MARGIN_LEFT}\" y1=\"{y:.1}\" x2=\"{:.1}\" y2=\"{y:.1}\" stroke=\"#e6e9ef\"/>\
                 <text x=\"{:.1}\" y=\"{:.1}\" font-size=\"11\" text-anchor=\"end\">{}</text>",
                MARGIN_LEFT + plot_w,
                MARGIN_LEFT - 8.0,
                y + 4.0,
                group_thousands(value)
            ));
        }

        // Axes
        out.push_str(&format!(
            "<line class=\"axis\" x1=\"{MARGIN_LEFT}\" y1=\"{MARGIN_TOP}\" x2=\"{MARGIN_LEFT}\" y2=\"{0:.1}\" stroke=\"#444\"/>\
             <line class=\"axis\" x1=\"{MARGIN_LEFT}\" y1=\"{0:.1}\" x2=\"{1:.1}\" y2=\"{0:.1}\" stroke=\"#444\"/>\
             <text x=\"{2:.1}\" y=\"{3:.1}\" font-size=\"13\" text-anchor=\"middle\">Month</text>\
             <text x=\"18\" y=\"{4:.1}\" font-size=\"13\" text-anchor=\"middle\" transform=\"rotate(-90 18 {4:.1})\">Visitors</text>",
            MARGIN_TOP + plot_h,
            MARGIN_LEFT + plot_w,
            MARGIN_LEFT + plot_w / 2.0,
            HEIGHT - 10.0,
            MARGIN_TOP + plot_h / 2.0,
        ));

        for (i, month) in self.months.iter().enumerate() {
            out.push_str(&format!(
                "<text x=\"{:.1}\" y=\"{:.1}\" font-size=\"12\" text-anchor=\"middle\">{}</text>",
                x_of(i),
                MARGIN_TOP + plot_h + 18.0,
                esc(month)
            ));
        }

        for (n, s) in self.series.iter().enumerate() {
            let points: Vec<String> = s
                .points
                .iter()
                .map(|(x, v)| format!("{:.1},{:.1}", x_of(*x), y_of(*v)))
                .collect();
            out.push_str(&format!(
                "<polyline class=\"series\" data-state=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"2.5\" points=\"{}\"/>",
                esc(&s.state),
                s.color,
                points.join(" ")
            ));
            for (x, v) in &s.points {
                out.push_str(&format!(
                    "<circle cx=\"{:.1}\" cy=\"{:.1}\" r=\"4\" fill=\"{}\"><title>{}, {}: {}</title></circle>",
                    x_of(*x),
                    y_of(*v),
                    s.color,
                    esc(&s.state),
                    esc(&self.months[*x]),
                    group_thousands(*v)
                ));
            }

            // Legend
            let ly = MARGIN_TOP + 10.0 + 22.0 * n as f64;
            let lx = MARGIN_LEFT + plot_w + 20.0;
            out.push_str(&format!(
                "<line x1=\"{lx:.1}\" y1=\"{ly:.1}\" x2=\"{:.1}\" y2=\"{ly:.1}\" stroke=\"{}\" stroke-width=\"3\"/>\
                 <text x=\"{:.1}\" y=\"{:.1}\" font-size=\"12\">{}</text>",
                lx + 20.0,
                s.color,
                lx + 26.0,
                ly + 4.0,
                esc(&s.state)
            ));
        }

        out.push_str("</svg>");
        out
    }
}

/// Smallest of 1, 2, 2.5, 5 or 10 times a power of ten that is >= `raw`.
fn nice_step(raw: f64) -> u64 {
    if raw <= 1.0 {
        return 1;
    }
    let magnitude = 10f64.powi(raw.log10().floor() as i32);
    let factor = [1.0, 2.0, 2.5, 5.0, 10.0]
        .into_iter()
        .find(|f| f * magnitude >= raw)
        .unwrap_or(10.0);
    (factor * magnitude).ceil() as u64
}

pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
