//! ASCII charts for terminal output.
//!
//! This is intentionally "dumb" (fixed-size text), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Charts:
//! - breakdown: one `#` bar per category
//! - distribution: a single strip split by share (the pie chart stand-in)
//! - trend: per-day counts, one marker per category (`+`, `x`, `o`)

use chrono::NaiveDate;

use crate::domain::Category;
use crate::query::Summary;

/// Horizontal bar per category present in the summary.
pub fn render_bar_chart(summary: &Summary, width: usize) -> String {
    let width = width.max(1);
    let max = summary.category_counts.values().copied().max().unwrap_or(0);

    let mut out = String::from("Sentiment breakdown\n");
    for (&category, &count) in &summary.category_counts {
        let len = if max == 0 { 0 } else { (count * width / max).max(1) };
        out.push_str(&format!("{:<8} | {} {count}\n", category.label(), "#".repeat(len)));
    }
    out
}

/// A strip of `width` cells split between categories by share, plus a legend.
pub fn render_share_strip(summary: &Summary, width: usize) -> String {
    let width = width.max(1);
    let cells = allocate_cells(summary, width);

    let mut out = String::from("Sentiment distribution\n[");
    for (category, n) in &cells {
        out.extend(std::iter::repeat_n(category.marker(), *n));
    }
    out.push_str("]\n");

    for (&category, &count) in &summary.category_counts {
        out.push_str(&format!(
            "{} {} {count} ({})\n",
            category.marker(),
            category.label(),
            format_share(count, summary.total)
        ));
    }
    out
}

/// Per-day counts per category. `None` when the summary has no dates.
pub fn render_trend_plot(summary: &Summary, width: usize, height: usize) -> Option<String> {
    let buckets = summary.date_counts.as_ref()?;
    let dates = summary.dates();
    let (first, last) = (*dates.first()?, *dates.last()?);

    let width = width.max(10);
    let height = height.max(5);
    let y_max = buckets.values().copied().max().unwrap_or(0).max(1);

    let mut grid = vec![vec![' '; width]; height];
    let series: Vec<(Category, Vec<(usize, usize)>)> = Category::ALL
        .iter()
        .map(|&category| {
            let points: Vec<(usize, usize)> = buckets
                .iter()
                .filter(|((_, c), _)| *c == category)
                .map(|((date, _), &count)| {
                    (
                        map_x(day_index(&dates, *date), dates.len(), width),
                        map_y(count, y_max, height),
                    )
                })
                .collect();
            (category, points)
        })
        .filter(|(_, points)| !points.is_empty())
        .collect();

    // Lines first so markers overlay them.
    for (_, points) in &series {
        for pair in points.windows(2) {
            draw_line(&mut grid, pair[0], pair[1], '.');
        }
    }
    for (category, points) in &series {
        for &(x, y) in points {
            grid[y][x] = category.marker();
        }
    }

    let mut out = format!("Trend: {first} .. {last} | count=[0, {y_max}]\n");
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }
    let legend: Vec<String> = series
        .iter()
        .map(|(category, _)| format!("{} {}", category.marker(), category.label()))
        .collect();
    out.push_str(&legend.join("  "));
    out.push('\n');
    Some(out)
}

/// `count/total` as a percentage with one decimal, using integer rounding.
pub fn format_share(count: usize, total: usize) -> String {
    if total == 0 {
        return "0.0%".to_string();
    }
    let permille = (count * 1000 + total / 2) / total;
    format!("{}.{}%", permille / 10, permille % 10)
}

// Largest-remainder split of `width` cells; ties go to the earlier category.
fn allocate_cells(summary: &Summary, width: usize) -> Vec<(Category, usize)> {
    if summary.total == 0 {
        return Vec::new();
    }
    let mut cells: Vec<(Category, usize, usize)> = summary
        .category_counts
        .iter()
        .map(|(&category, &count)| {
            let scaled = count * width;
            (category, scaled / summary.total, scaled % summary.total)
        })
        .collect();

    let assigned: usize = cells.iter().map(|(_, n, _)| n).sum();
    let mut order: Vec<usize> = (0..cells.len()).collect();
    order.sort_by(|&a, &b| cells[b].2.cmp(&cells[a].2).then(a.cmp(&b)));
    for &idx in order.iter().take(width.saturating_sub(assigned)) {
        cells[idx].1 += 1;
    }

    cells.into_iter().map(|(category, n, _)| (category, n)).collect()
}

fn day_index(dates: &[NaiveDate], date: NaiveDate) -> usize {
    dates.binary_search(&date).unwrap_or(0)
}

fn map_x(idx: usize, n: usize, width: usize) -> usize {
    if n <= 1 {
        return 0;
    }
    let u = idx as f64 / (n as f64 - 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(count: usize, y_max: usize, height: usize) -> usize {
    let u = (count as f64 / y_max as f64).clamp(0.0, 1.0);
    // Row 0 is the top (largest count).
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

/// Integer line drawing (Bresenham-ish); only fills blank cells.
fn draw_line(grid: &mut [Vec<char>], from: (usize, usize), to: (usize, usize), ch: char) {
    let (mut x0, mut y0) = (from.0 as isize, from.1 as isize);
    let (x1, y1) = (to.0 as isize, to.1 as isize);

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}
