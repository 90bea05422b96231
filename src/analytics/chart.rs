//! Two-panel SVG summary: a bar chart of item-name lengths on the left and a
//! pie chart of username lengths on the right.
use std::f64::consts::{FRAC_PI_2, PI, TAU};

use base64::{engine::general_purpose::STANDARD, Engine};

use super::stats::{distribution, slices, Slice};

const WIDTH: f64 = 1400.0;
const HEIGHT: f64 = 600.0;

const BAR_LEFT: f64 = 80.0;
const BAR_RIGHT: f64 = 660.0;
const BAR_TOP: f64 = 100.0;
const BAR_BOTTOM: f64 = 520.0;

const PIE_CENTER_X: f64 = 1050.0;
const PIE_CENTER_Y: f64 = 320.0;
const PIE_RADIUS: f64 = 190.0;

const BAR_COLOR: &str = "#87ceeb";
// matplotlib "Paired"
const PALETTE: [&str; 12] = [
    "#a6cee3", "#1f78b4", "#b2df8a", "#33a02c", "#fb9a99", "#e31a1c", "#fdbf6f", "#ff7f00",
    "#cab2d6", "#6a3d9a", "#ffff99", "#b15928",
];

pub fn render_svg(item_name_lengths: &[usize], username_lengths: &[usize]) -> String {
    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="sans-serif">"#,
        w = WIDTH,
        h = HEIGHT
    );
    svg.push_str(&format!(
        r#"<rect width="{}" height="{}" fill="white"/>"#,
        WIDTH, HEIGHT
    ));
    svg.push_str(&text(
        WIDTH / 2.0,
        40.0,
        "Analytics Data Visualization",
        22,
        "middle",
    ));

    render_bars(&mut svg, item_name_lengths);
    render_pie(&mut svg, username_lengths);

    svg.push_str("</svg>");
    svg
}

/// `data:` URI for an SVG document.
pub fn to_data_uri(svg: &str) -> String {
    format!("data:image/svg+xml;base64,{}", STANDARD.encode(svg))
}

fn render_bars(svg: &mut String, lengths: &[usize]) {
    let panel_center = (BAR_LEFT + BAR_RIGHT) / 2.0;
    let counts = distribution(lengths);

    if counts.is_empty() {
        svg.push_str(&text(
            panel_center,
            (BAR_TOP + BAR_BOTTOM) / 2.0,
            "No item data available",
            16,
            "middle",
        ));
        return;
    }

    svg.push_str(&text(
        panel_center,
        80.0,
        "Item Name Length Distribution",
        16,
        "middle",
    ));

    let max_count = counts.iter().map(|(_, count)| *count).max().unwrap_or(1);
    let step = ((max_count as f64) / 5.0).ceil().max(1.0) as usize;
    let top_tick = max_count.div_ceil(step) * step;
    let scale = (BAR_BOTTOM - BAR_TOP) / top_tick as f64;

    for tick in (0..=top_tick).step_by(step) {
        let y = BAR_BOTTOM - tick as f64 * scale;
        svg.push_str(&format!(
            r##"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="#bbbbbb" stroke-dasharray="4 3"/>"##,
            BAR_LEFT, y, BAR_RIGHT, y
        ));
        svg.push_str(&text(BAR_LEFT - 8.0, y + 4.0, &tick.to_string(), 12, "end"));
    }

    let slot = (BAR_RIGHT - BAR_LEFT) / counts.len() as f64;
    let bar_width = (slot * 0.8).min(60.0);

    for (index, (length, count)) in counts.iter().enumerate() {
        let center = BAR_LEFT + slot * (index as f64 + 0.5);
        let height = *count as f64 * scale;

        svg.push_str(&format!(
            r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}" fill-opacity="0.7"/>"#,
            center - bar_width / 2.0,
            BAR_BOTTOM - height,
            bar_width,
            height,
            BAR_COLOR
        ));
        svg.push_str(&text(
            center,
            BAR_BOTTOM - height - 6.0,
            &count.to_string(),
            12,
            "middle",
        ));
        svg.push_str(&text(center, BAR_BOTTOM + 18.0, &length.to_string(), 12, "middle"));
    }

    svg.push_str(&format!(
        r#"<line x1="{l}" y1="{b}" x2="{r}" y2="{b}" stroke="black"/><line x1="{l}" y1="{t}" x2="{l}" y2="{b}" stroke="black"/>"#,
        l = BAR_LEFT,
        r = BAR_RIGHT,
        t = BAR_TOP,
        b = BAR_BOTTOM
    ));
    svg.push_str(&text(panel_center, 565.0, "Length of Item Names", 14, "middle"));
    svg.push_str(&format!(
        r#"<text x="25" y="{y:.1}" font-size="14" text-anchor="middle" transform="rotate(-90 25 {y:.1})">Number of Items</text>"#,
        y = (BAR_TOP + BAR_BOTTOM) / 2.0
    ));
}

fn render_pie(svg: &mut String, lengths: &[usize]) {
    let pie_slices: Vec<Slice> = slices(lengths)
        .into_iter()
        .filter(|slice| slice.count > 0)
        .collect();

    if pie_slices.is_empty() {
        svg.push_str(&text(
            PIE_CENTER_X,
            PIE_CENTER_Y,
            "No user data available",
            16,
            "middle",
        ));
        return;
    }

    svg.push_str(&text(
        PIE_CENTER_X,
        80.0,
        "Username Length Distribution",
        16,
        "middle",
    ));

    let total: usize = pie_slices.iter().map(|slice| slice.count).sum();

    // Counter-clockwise from twelve o'clock.
    let mut start = FRAC_PI_2;
    for (index, slice) in pie_slices.iter().enumerate() {
        let fraction = slice.count as f64 / total as f64;
        let sweep = fraction * TAU;
        let end = start + sweep;
        let color = PALETTE[index % PALETTE.len()];

        if pie_slices.len() == 1 {
            svg.push_str(&format!(
                r#"<circle cx="{}" cy="{}" r="{}" fill="{}" stroke="white"/>"#,
                PIE_CENTER_X, PIE_CENTER_Y, PIE_RADIUS, color
            ));
        } else {
            let (x0, y0) = polar(start, PIE_RADIUS);
            let (x1, y1) = polar(end, PIE_RADIUS);
            let large_arc = u8::from(sweep > PI);
            svg.push_str(&format!(
                r#"<path d="M {:.2} {:.2} L {:.2} {:.2} A {r} {r} 0 {} 0 {:.2} {:.2} Z" fill="{}" stroke="white"/>"#,
                PIE_CENTER_X,
                PIE_CENTER_Y,
                x0,
                y0,
                large_arc,
                x1,
                y1,
                color,
                r = PIE_RADIUS
            ));
        }

        let middle = start + sweep / 2.0;
        let (px, py) = polar(middle, PIE_RADIUS * 0.6);
        svg.push_str(&text(
            px,
            py + 4.0,
            &format!("{:.1}%", fraction * 100.0),
            12,
            "middle",
        ));

        let (lx, ly) = polar(middle, PIE_RADIUS * 1.12);
        let anchor = if middle.cos() >= 0.0 { "start" } else { "end" };
        svg.push_str(&text(lx, ly + 4.0, &slice.label, 13, anchor));

        start = end;
    }
}

fn polar(angle: f64, radius: f64) -> (f64, f64) {
    (
        PIE_CENTER_X + radius * angle.cos(),
        PIE_CENTER_Y - radius * angle.sin(),
    )
}

// Only ever fed numbers and fixed captions, so no escaping.
fn text(x: f64, y: f64, content: &str, size: u32, anchor: &str) -> String {
    format!(
        r#"<text x="{:.1}" y="{:.1}" font-size="{}" text-anchor="{}">{}</text>"#,
        x, y, size, anchor, content
    )
}
