use std::f64::consts::{FRAC_PI_2, TAU};

use ratatui::prelude::*;
use ratatui::symbols::Marker;
use ratatui::widgets::canvas::{Canvas, Line as CanvasLine};
use ratatui::widgets::{
    Axis, Bar, BarChart, BarGroup, Block, Cell, Chart, Clear, Dataset as ChartDataset, GraphType,
    List, ListItem, Paragraph, Row, Table, Tabs,
};

use crate::analytics::radar_profile;
use crate::data::{Metric, RegionRecord};
use crate::output::{format_compact, format_metric, format_percent, format_score, truncate_name};
use crate::tui::app::{App, InputMode, Tab};
use crate::tui::theme::{correlation_color, ThemeColors};

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Handle very small terminal sizes gracefully
    if area.height < 12 || area.width < 50 {
        let msg = Paragraph::new("Terminal too small")
            .alignment(Alignment::Center);
        frame.render_widget(msg, area);
        return;
    }

    // Layout: Title(1) + Tabs(1) + Body(fill) + Status(1)
    let chunks = Layout::vertical([
        Constraint::Length(1),  // Title bar
        Constraint::Length(1),  // Tab bar
        Constraint::Fill(1),    // Active tab
        Constraint::Length(1),  // Status bar
    ])
    .split(area);

    render_title(frame, chunks[0], app);
    render_tabs(frame, chunks[1], app);
    match app.current_tab {
        Tab::Overview => render_overview(frame, chunks[2], app),
        Tab::Correlation => render_correlation(frame, chunks[2], app),
        Tab::Distribution => render_distribution(frame, chunks[2], app),
        Tab::Region => render_region(frame, chunks[2], app),
        Tab::Scatter => render_scatter(frame, chunks[2], app),
    }
    render_status_bar(frame, chunks[3], app);

    // Render overlays based on input mode
    match app.input_mode {
        InputMode::Search => render_search_popup(frame, app),
        InputMode::Help => render_help_popup(frame, &app.theme),
        InputMode::ScoreBreakdown => render_breakdown_popup(frame, app),
        InputMode::Normal => {}
    }
}

fn render_title(frame: &mut Frame, area: Rect, app: &App) {
    let title_text = "Property Market Analysis";
    let mut spans = vec![Span::styled(
        title_text,
        Style::default().fg(app.theme.title_color).bold(),
    )];

    let source_text = format!("{} ({} regions)", app.source, app.dataset.len());
    let padding_len = (area.width as usize).saturating_sub(title_text.len() + source_text.len());
    spans.push(Span::raw(" ".repeat(padding_len)));
    spans.push(Span::styled(source_text, Style::default().fg(app.theme.muted)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_tabs(frame: &mut Frame, area: Rect, app: &App) {
    let titles: Vec<String> = Tab::ALL
        .iter()
        .enumerate()
        .map(|(i, tab)| format!("{} {}", i + 1, tab.title()))
        .collect();

    let tabs = Tabs::new(titles)
        .select(app.current_tab.index())
        .style(app.theme.tab_inactive_style)
        .highlight_style(app.theme.tab_active_style)
        .divider(" | ");

    frame.render_widget(tabs, area);
}

fn render_overview(frame: &mut Frame, area: Rect, app: &mut App) {
    let chunks = Layout::vertical([
        Constraint::Length(3),  // KPI cards
        Constraint::Fill(1),    // Top-N table
    ])
    .split(area);

    let cards = Layout::horizontal([Constraint::Fill(1); 4]).split(chunks[0]);
    let kpis = [
        ("Median Price", format_metric(Metric::Median, app.kpis.median_price)),
        ("12M Price Change", format_metric(Metric::PriceChange12m, app.kpis.price_change_12m)),
        ("Yield", format_metric(Metric::Yield, app.kpis.yield_pct)),
        ("Buy Affordability", format_metric(Metric::BuyAffordability, app.kpis.buy_affordability)),
    ];
    for ((label, value), card) in kpis.into_iter().zip(cards.iter()) {
        let widget = Paragraph::new(Span::styled(value, Style::default().fg(app.theme.kpi_value).bold()))
            .alignment(Alignment::Center)
            .block(
                Block::bordered()
                    .title(label)
                    .border_style(Style::default().fg(app.theme.muted)),
            );
        frame.render_widget(widget, *card);
    }

    render_top_table(frame, chunks[1], app);
}

fn render_top_table(frame: &mut Frame, area: Rect, app: &mut App) {
    let block = Block::bordered()
        .title(format!(" Top {} Investment Opportunities ", app.config.dashboard.top_n))
        .border_style(Style::default().fg(app.theme.muted));

    if app.top.is_empty() {
        let empty_msg = Paragraph::new("No scored regions")
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(empty_msg, area);
        return;
    }

    let theme = &app.theme;
    let max_score = app.max_score();

    let rows: Vec<Row> = app
        .top
        .iter()
        .enumerate()
        .map(|(idx, record)| {
            let score = record.investment_score.unwrap_or(0.0);
            let score_str = format_score(record.investment_score, record.is_incomplete());
            let mut score_spans = vec![Span::styled(
                format!("{:>6} ", score_str),
                Style::default().fg(theme.score_color(score, max_score)),
            )];
            score_spans.extend(score_bar(score, max_score, 8, theme).spans);

            // Alternating row background (odd rows get subtle background)
            let row_style = if idx % 2 == 1 {
                Style::default().bg(theme.row_alt_bg)
            } else {
                Style::default()
            };

            let mut cells = vec![
                Cell::from(format!("{}.", idx + 1)).style(Style::default().fg(theme.index_color)),
                Cell::from(Line::from(score_spans)),
                Cell::from(truncate_name(&record.id, 40)),
            ];
            cells.extend([
                Metric::Median,
                Metric::PriceChange12m,
                Metric::Yield,
                Metric::SalesTurnover,
                Metric::BuyAffordability,
            ]
            .into_iter()
            .map(|m| Cell::from(Text::from(format_metric(m, record.get(m))).alignment(Alignment::Right))));

            Row::new(cells).style(row_style)
        })
        .collect();

    let widths = [
        Constraint::Length(4),   // Index: "10."
        Constraint::Length(16),  // Score + bar: "0.873 ████░░░░"
        Constraint::Fill(1),     // Region
        Constraint::Length(12),  // Median
        Constraint::Length(9),   // 12M change
        Constraint::Length(8),   // Yield
        Constraint::Length(9),   // Turnover
        Constraint::Length(9),   // Buy affordability
    ];

    let header = Row::new(vec![
        Cell::from("#"),
        Cell::from("Score"),
        Cell::from("Region"),
        Cell::from(Text::from("Median").alignment(Alignment::Right)),
        Cell::from(Text::from("12M Chg").alignment(Alignment::Right)),
        Cell::from(Text::from("Yield").alignment(Alignment::Right)),
        Cell::from(Text::from("Turnover").alignment(Alignment::Right)),
        Cell::from(Text::from("Buy Aff").alignment(Alignment::Right)),
    ])
    .style(theme.header_style)
    .bottom_margin(1);

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(theme.row_selected);

    frame.render_stateful_widget(table, area, &mut app.table_state);
}

fn score_bar(score: f64, max_score: f64, width: usize, theme: &ThemeColors) -> Line<'static> {
    let ratio = if max_score > 0.0 {
        (score / max_score).min(1.0)
    } else {
        0.0
    };
    let filled = (ratio * width as f64).round() as usize;
    let empty = width.saturating_sub(filled);

    let bar_color = theme.score_color(score, max_score);

    let mut spans = Vec::new();
    if filled > 0 {
        spans.push(Span::styled("█".repeat(filled), Style::default().fg(bar_color)));
    }
    if empty > 0 {
        spans.push(Span::styled("░".repeat(empty), Style::default().fg(theme.bar_empty)));
    }

    Line::from(spans)
}

fn render_correlation(frame: &mut Frame, area: Rect, app: &App) {
    let matrix = &app.correlation;
    let block = Block::bordered()
        .title(" Market Metrics Correlation Heatmap ")
        .border_style(Style::default().fg(app.theme.muted));

    let mut header_cells = vec![Cell::from("")];
    header_cells.extend(
        matrix
            .metrics
            .iter()
            .map(|m| Cell::from(Text::from(m.short_label()).alignment(Alignment::Center))),
    );

    let rows: Vec<Row> = matrix
        .metrics
        .iter()
        .enumerate()
        .map(|(i, metric)| {
            let mut cells = vec![Cell::from(metric.header()).style(app.theme.header_style)];
            cells.extend((0..matrix.metrics.len()).map(|j| match matrix.get(i, j) {
                Some(r) => Cell::from(Text::from(format!("{:.2}", r)).alignment(Alignment::Center))
                    .style(Style::default().bg(correlation_color(r)).fg(Color::Black)),
                None => Cell::from(Text::from("-").alignment(Alignment::Center))
                    .style(Style::default().fg(app.theme.muted)),
            }));
            // Three lines per row reads as a heatmap rather than a list
            Row::new(cells).height(3)
        })
        .collect();

    let mut widths = vec![Constraint::Length(20)];
    widths.extend(std::iter::repeat(Constraint::Fill(1)).take(matrix.metrics.len()));

    let table = Table::new(rows, widths)
        .header(Row::new(header_cells).style(app.theme.header_style).bottom_margin(1))
        .column_spacing(0)
        .block(block);

    frame.render_widget(table, area);
}

fn render_distribution(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::bordered()
        .title(" Distribution of Property Prices (Median) ")
        .border_style(Style::default().fg(app.theme.muted));

    if app.histogram.is_empty() {
        let empty_msg = Paragraph::new("No median prices to plot")
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(empty_msg, area);
        return;
    }

    let inner_width = block.inner(area).width as usize;
    let bins = app.histogram.len();
    let bar_gap: u16 = 1;
    let bar_width = (inner_width / bins).saturating_sub(bar_gap as usize).max(1) as u16;
    let show_labels = bar_width >= 4;

    let bars: Vec<Bar> = app
        .histogram
        .iter()
        .map(|bin| {
            let bar = Bar::default()
                .value(bin.count as u64)
                .style(Style::default().fg(app.theme.histogram_bar));
            if show_labels {
                bar.label(Line::from(format_compact(bin.start)))
            } else {
                bar
            }
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(bar_gap)
        .value_style(Style::default().fg(Color::Black).bg(app.theme.histogram_bar));

    frame.render_widget(chart, area);
}

fn render_region(frame: &mut Frame, area: Rect, app: &mut App) {
    let chunks = Layout::horizontal([
        Constraint::Length(30),  // Region list
        Constraint::Fill(1),     // Details + radar
    ])
    .split(area);

    let items: Vec<ListItem> = app
        .regions
        .iter()
        .map(|name| ListItem::new(truncate_name(name, 26)))
        .collect();
    let list = List::new(items)
        .block(
            Block::bordered()
                .title(" Select a Suburb (SA3) ")
                .border_style(Style::default().fg(app.theme.muted)),
        )
        .highlight_style(app.theme.row_selected);
    frame.render_stateful_widget(list, chunks[0], &mut app.region_state);

    let record = match app.selected_region() {
        Some(r) => r,
        None => {
            let msg = Paragraph::new("No region selected")
                .alignment(Alignment::Center)
                .block(Block::bordered());
            frame.render_widget(msg, chunks[1]);
            return;
        }
    };

    let right = Layout::vertical([
        Constraint::Length(Metric::ALL.len() as u16 + 3),  // Metrics + score + borders
        Constraint::Fill(1),                                // Radar
    ])
    .split(chunks[1]);

    let mut rows: Vec<Row> = Metric::ALL
        .iter()
        .map(|m| {
            Row::new(vec![
                Cell::from(m.header()).style(Style::default().fg(app.theme.muted)),
                Cell::from(format_metric(*m, record.get(*m))),
            ])
        })
        .collect();
    rows.push(
        Row::new(vec![
            Cell::from("Investment Score").style(Style::default().fg(app.theme.muted)),
            Cell::from(format_score(record.investment_score, record.is_incomplete())).style(
                Style::default()
                    .fg(app.theme.score_color(record.investment_score.unwrap_or(0.0), app.max_score()))
                    .bold(),
            ),
        ]),
    );
    let details = Table::new(rows, [Constraint::Length(20), Constraint::Fill(1)]).block(
        Block::bordered()
            .title(format!(" Detailed Metrics for {} ", record.id))
            .border_style(Style::default().fg(app.theme.muted)),
    );
    frame.render_widget(details, right[0]);

    render_radar(frame, right[1], record, &app.theme);
}

/// Point on the radar for axis `index` of `count` at `radius` (0..1), first axis straight up
fn radar_point(index: usize, count: usize, radius: f64) -> (f64, f64) {
    let angle = FRAC_PI_2 - TAU * index as f64 / count as f64;
    (radius * angle.cos(), radius * angle.sin())
}

fn render_radar(frame: &mut Frame, area: Rect, record: &RegionRecord, theme: &ThemeColors) {
    let profile = radar_profile(record);
    let count = profile.axes.len();
    let title = format!(
        " Radar Chart for {} (scale {} to {}) ",
        profile.region,
        format_compact(profile.range.0),
        format_compact(profile.range.1)
    );

    let canvas = Canvas::default()
        .block(
            Block::bordered()
                .title(title)
                .border_style(Style::default().fg(theme.muted)),
        )
        .marker(Marker::Braille)
        .x_bounds([-1.6, 1.6])
        .y_bounds([-1.3, 1.3])
        .paint(|ctx| {
            // Grid rings and spokes
            for ring in [0.25, 0.5, 0.75, 1.0] {
                for i in 0..count {
                    let (x1, y1) = radar_point(i, count, ring);
                    let (x2, y2) = radar_point((i + 1) % count, count, ring);
                    ctx.draw(&CanvasLine::new(x1, y1, x2, y2, theme.radar_grid));
                }
            }
            for i in 0..count {
                let (x, y) = radar_point(i, count, 1.0);
                ctx.draw(&CanvasLine::new(0.0, 0.0, x, y, theme.radar_grid));
            }
            ctx.layer();

            // Region polygon
            for i in 0..count {
                let (x1, y1) = radar_point(i, count, profile.axes[i].radius);
                let j = (i + 1) % count;
                let (x2, y2) = radar_point(j, count, profile.axes[j].radius);
                ctx.draw(&CanvasLine::new(x1, y1, x2, y2, theme.radar_line));
            }

            // Axis labels just outside the rim
            for (i, axis) in profile.axes.iter().enumerate() {
                let (x, y) = radar_point(i, count, 1.12);
                let label = format!(
                    "{} {}",
                    axis.metric.short_label(),
                    format_metric(axis.metric, axis.value)
                );
                // Shift left-side labels so they grow away from the chart
                let x = if x < -0.1 { x - 0.02 * label.len() as f64 } else { x };
                ctx.print(x, y, Span::styled(label, Style::default().fg(theme.axis_color)));
            }
        });

    frame.render_widget(canvas, area);
}

fn render_scatter(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::bordered()
        .title(" Price vs 12M Price Change (colour: Yield) ")
        .border_style(Style::default().fg(app.theme.muted));

    if app.scatter.is_empty() {
        let empty_msg = Paragraph::new("No regions with both Median and 12M Price Change")
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(empty_msg, area);
        return;
    }

    // Terminal cells cannot blend colours, so yield is bucketed into terciles
    let mut yields: Vec<f64> = app.scatter.iter().filter_map(|p| p.yield_pct).collect();
    yields.sort_by(f64::total_cmp);
    let cut = |q: f64| -> f64 {
        if yields.is_empty() {
            0.0
        } else {
            yields[((yields.len() - 1) as f64 * q).round() as usize]
        }
    };
    let (low_cut, high_cut) = (cut(1.0 / 3.0), cut(2.0 / 3.0));

    let mut low = Vec::new();
    let mut mid = Vec::new();
    let mut high = Vec::new();
    let mut unknown = Vec::new();
    for point in &app.scatter {
        let xy = (point.median, point.price_change_12m);
        match point.yield_pct {
            Some(y) if y <= low_cut => low.push(xy),
            Some(y) if y <= high_cut => mid.push(xy),
            Some(_) => high.push(xy),
            None => unknown.push(xy),
        }
    }

    let x_bounds = padded_bounds(app.scatter.iter().map(|p| p.median));
    let y_bounds = padded_bounds(app.scatter.iter().map(|p| p.price_change_12m));

    let series = [
        (format!("Yield <= {}", format_percent(low_cut)), app.theme.scatter_low, &low),
        (format!("Yield <= {}", format_percent(high_cut)), app.theme.scatter_mid, &mid),
        (format!("Yield > {}", format_percent(high_cut)), app.theme.scatter_high, &high),
        ("Yield n/a".to_string(), app.theme.muted, &unknown),
    ];
    let datasets: Vec<ChartDataset> = series
        .into_iter()
        .filter(|(_, _, points)| !points.is_empty())
        .map(|(name, color, points)| {
            ChartDataset::default()
                .name(name)
                .marker(Marker::Braille)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(color))
                .data(points)
        })
        .collect();

    let axis_labels = |b: [f64; 2], fmt: fn(f64) -> String| -> Vec<String> {
        vec![fmt(b[0]), fmt((b[0] + b[1]) / 2.0), fmt(b[1])]
    };

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .title("Median Price")
                .style(Style::default().fg(app.theme.axis_color))
                .bounds(x_bounds)
                .labels(axis_labels(x_bounds, format_compact)),
        )
        .y_axis(
            Axis::default()
                .title("12M Price Change (%)")
                .style(Style::default().fg(app.theme.axis_color))
                .bounds(y_bounds)
                .labels(axis_labels(y_bounds, format_percent)),
        );

    frame.render_widget(chart, area);
}

/// Axis bounds spanning every value with 5% headroom on each side
fn padded_bounds(values: impl Iterator<Item = f64>) -> [f64; 2] {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    let pad = if max > min { (max - min) * 0.05 } else { 1.0 };
    [min - pad, max + pad]
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let text = if let Some((ref msg, _)) = app.flash_message {
        // Show flash message with color based on message type
        let msg_color = if msg.starts_with("No region") {
            theme.flash_error
        } else {
            theme.flash_success
        };
        Line::from(Span::styled(msg.clone(), Style::default().fg(msg_color)))
    } else {
        let incomplete = app.dataset.records.iter().filter(|r| r.is_incomplete()).count();
        let summary = if incomplete > 0 {
            format!("{} regions, {} with missing inputs (*)", app.dataset.len(), incomplete)
        } else {
            format!("{} regions", app.dataset.len())
        };

        // Build hints with colored shortcut keys
        let hints: &[(&str, &str)] = match app.current_tab {
            Tab::Overview => &[
                ("j/k", ":nav "),
                ("Enter", ":details "),
                ("b", ":breakdown "),
                ("/", ":search "),
                ("Tab", ":next "),
                ("?", ":help "),
                ("q", ":quit"),
            ],
            Tab::Region => &[
                ("j/k", ":region "),
                ("b", ":breakdown "),
                ("/", ":search "),
                ("Tab", ":next "),
                ("?", ":help "),
                ("q", ":quit"),
            ],
            _ => &[
                ("1-5", ":tabs "),
                ("/", ":search "),
                ("Tab", ":next "),
                ("?", ":help "),
                ("q", ":quit"),
            ],
        };

        let mut spans = vec![
            Span::styled(summary, Style::default().fg(theme.muted)),
            Span::raw("  "),
        ];
        for (i, (key, label)) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(*key, Style::default().fg(theme.status_key_color)));
            spans.push(Span::raw(*label));
        }
        Line::from(spans)
    };

    frame.render_widget(
        Paragraph::new(text).style(Style::default().bg(theme.status_bar_bg)),
        area
    );
}

/// Create a centered rectangle with fixed width and height
fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    // Clamp dimensions to area bounds
    let width = width.min(area.width);
    let height = height.min(area.height);

    // Calculate centered position
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect {
        x,
        y,
        width,
        height,
    }
}

fn popup_block<'a>(title: &'a str, theme: &ThemeColors) -> Block<'a> {
    Block::bordered()
        .title(Span::styled(title, theme.popup_title))
        .border_style(Style::default().fg(theme.popup_border))
        .style(Style::default().bg(theme.popup_bg))
}

/// Render the region search input popup
fn render_search_popup(frame: &mut Frame, app: &App) {
    let popup_area = centered_rect_fixed(44, 4, frame.area());
    frame.render_widget(Clear, popup_area);

    let block = popup_block(" Find Region ", &app.theme);
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let chunks = Layout::vertical([
        Constraint::Length(1),  // Input line
        Constraint::Length(1),  // Help text
    ])
    .split(inner);

    // Render input with cursor
    frame.render_widget(Paragraph::new(format!("{}|", app.search_input)), chunks[0]);
    frame.render_widget(
        Paragraph::new("Enter: select first match | Esc: cancel")
            .style(Style::default().fg(app.theme.muted)),
        chunks[1],
    );
}

/// Render the help overlay popup
fn render_help_popup(frame: &mut Frame, theme: &ThemeColors) {
    let popup_area = centered_rect_fixed(50, 15, frame.area());
    frame.render_widget(Clear, popup_area);

    let block = popup_block(" Keyboard Shortcuts ", theme);
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let key_style = Style::default().fg(theme.status_key_color).bold();
    let entries = [
        ("Tab / S-Tab   ", "Next / previous tab"),
        ("1-5           ", "Jump to tab"),
        ("j / Down      ", "Move down"),
        ("k / Up        ", "Move up"),
        ("Enter         ", "Show region details"),
        ("/             ", "Search regions"),
        ("b             ", "Score breakdown"),
        ("?             ", "Show/hide this help"),
        ("q / Ctrl-c    ", "Quit"),
    ];

    let mut help_lines: Vec<Line> = entries
        .iter()
        .map(|(key, desc)| Line::from(vec![Span::styled(*key, key_style), Span::raw(*desc)]))
        .collect();
    help_lines.push(Line::from(""));
    help_lines.push(Line::from(Span::styled(
        "Scores marked * had missing inputs",
        Style::default().fg(theme.muted),
    )));
    help_lines.push(Line::from(Span::styled(
        "Press any key to close",
        Style::default().fg(theme.muted),
    )));

    frame.render_widget(Paragraph::new(help_lines), inner);
}

/// Render the score breakdown popup for the highlighted region
fn render_breakdown_popup(frame: &mut Frame, app: &App) {
    let record = match app.breakdown_target() {
        Some(r) => r,
        None => return,
    };
    let theme = &app.theme;

    let popup_area = centered_rect_fixed(64, 12, frame.area());
    frame.render_widget(Clear, popup_area);

    let title = format!(" Score Breakdown: {} ", truncate_name(&record.id, 40));
    let block = popup_block(&title, theme);
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let mut lines = Vec::new();
    match &record.breakdown {
        Some(breakdown) => {
            lines.push(Line::from(Span::styled(
                format!("{:<18} {:>10} {:>8} {:>7} {:>8}", "Factor", "Value", "Rank", "Weight", "Points"),
                theme.header_style,
            )));
            for factor in &breakdown.factors {
                let rank = factor
                    .rank
                    .map(|r| format!("{:.3}", r))
                    .unwrap_or_else(|| "missing".to_string());
                let style = if factor.rank.is_none() {
                    Style::default().fg(theme.flash_error)
                } else {
                    Style::default()
                };
                lines.push(Line::from(Span::styled(
                    format!(
                        "{:<18} {:>10} {:>8} {:>7.1} {:>8.3}",
                        factor.metric.header(),
                        format_metric(factor.metric, factor.value),
                        rank,
                        factor.weight,
                        factor.contribution
                    ),
                    style,
                )));
            }
            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                Span::raw("Investment Score: "),
                Span::styled(
                    format_score(record.investment_score, breakdown.incomplete),
                    Style::default().bold(),
                ),
            ]));
        }
        None => {
            lines.push(Line::from("Score was loaded from the sheet, no breakdown available."));
            lines.push(Line::from(format!(
                "Investment Score: {}",
                format_score(record.investment_score, false)
            )));
        }
    }
    lines.push(Line::from(Span::styled(
        "Esc / b: close",
        Style::default().fg(theme.muted),
    )));

    frame.render_widget(Paragraph::new(lines), inner);
}
