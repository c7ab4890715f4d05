use rust_decimal::prelude::ToPrimitive as _;
use rust_decimal::Decimal;
use std::fmt::Write as _;

use crate::error::{LedgerError, Result};
use crate::operations::{ranking_order, ClientTotal};

/// Renders the client ranking into an image that can be shared.
///
/// The image shows a client/quantity table above a bar chart with one bar per client, in
/// ranking order.
pub trait RankingRenderer {
    /// File extension of the produced image, without the dot.
    fn file_extension(&self) -> &'static str;

    fn render(&self, title: &str, ranking: &[ClientTotal]) -> Result<Vec<u8>>;
}

/// Row shown when there is nothing to rank.
pub fn placeholder_ranking() -> Vec<ClientTotal> {
    vec![ClientTotal {
        client: "—".to_string(),
        total: Decimal::ZERO,
    }]
}

/// Ranking with the placeholder row substituted when empty, sorted largest first.
pub fn ranking_for_image(ranking: &[ClientTotal]) -> Vec<ClientTotal> {
    if ranking.is_empty() {
        return placeholder_ranking();
    }
    let mut ranking = ranking.to_vec();
    ranking.sort_by(ranking_order);
    ranking
}

const WIDTH: f64 = 1000.0;
const HEIGHT: f64 = 800.0;
const TITLE_Y: f64 = 36.0;
const TABLE_TOP: f64 = 64.0;
const TABLE_HEIGHT: f64 = 272.0;
const TABLE_LEFT: f64 = 60.0;
const TABLE_WIDTH: f64 = 880.0;
const MAX_ROW_HEIGHT: f64 = 26.0;
const CHART_LEFT: f64 = 100.0;
const CHART_TOP: f64 = 400.0;
const CHART_WIDTH: f64 = 840.0;
const CHART_HEIGHT: f64 = 300.0;
const TICK_ROTATION: f64 = -20.0;
const BAR_COLOR: &str = "#1f77b4";

/// Vector backend, writes an SVG document. Also the layout stage of the PNG backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct SvgRankingRenderer;

impl RankingRenderer for SvgRankingRenderer {
    fn file_extension(&self) -> &'static str {
        "svg"
    }

    fn render(&self, title: &str, ranking: &[ClientTotal]) -> Result<Vec<u8>> {
        let ranking = ranking_for_image(ranking);
        let mut svg = String::new();
        write_svg(&mut svg, title, &ranking).map_err(LedgerError::render)?;
        Ok(svg.into_bytes())
    }
}

fn write_svg(svg: &mut String, title: &str, ranking: &[ClientTotal]) -> std::fmt::Result {
    writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {WIDTH} {HEIGHT}" font-family="DejaVu Sans, Liberation Sans, Arial, sans-serif">"#
    )?;
    writeln!(svg, r#"<rect width="100%" height="100%" fill="white"/>"#)?;
    writeln!(
        svg,
        r#"<text x="{}" y="{TITLE_Y}" font-size="22" text-anchor="middle">{}</text>"#,
        WIDTH / 2.0,
        escape(title)
    )?;
    write_table(svg, ranking)?;
    write_bar_chart(svg, ranking)?;
    writeln!(svg, "</svg>")
}

fn write_table(svg: &mut String, ranking: &[ClientTotal]) -> std::fmt::Result {
    let rows = ranking.len() + 1;
    let row_height = (TABLE_HEIGHT / rows as f64).min(MAX_ROW_HEIGHT);
    let column_width = TABLE_WIDTH / 2.0;
    let font_size = (row_height * 0.55).clamp(6.0, 13.0);
    writeln!(svg, r#"<g class="table" font-size="{font_size:.1}">"#)?;
    let header = ("Cliente".to_string(), "Quantidade".to_string());
    let body = ranking
        .iter()
        .map(|row| (row.client.clone(), row.total.to_string()));
    for (index, (client, quantity)) in std::iter::once(header).chain(body).enumerate() {
        let y = TABLE_TOP + index as f64 * row_height;
        for (column, content) in [client, quantity].iter().enumerate() {
            let x = TABLE_LEFT + column as f64 * column_width;
            writeln!(
                svg,
                r##"<rect x="{x:.1}" y="{y:.1}" width="{column_width:.1}" height="{row_height:.1}" fill="{}" stroke="#333"/>"##,
                if index == 0 { "#eeeeee" } else { "white" }
            )?;
            writeln!(
                svg,
                r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" dominant-baseline="middle">{}</text>"#,
                x + column_width / 2.0,
                y + row_height / 2.0,
                escape(content)
            )?;
        }
    }
    writeln!(svg, "</g>")
}

fn write_bar_chart(svg: &mut String, ranking: &[ClientTotal]) -> std::fmt::Result {
    let max = ranking
        .iter()
        .filter_map(|row| row.total.to_f64())
        .fold(0.0_f64, f64::max);
    let baseline = CHART_TOP + CHART_HEIGHT;
    let slot = CHART_WIDTH / ranking.len() as f64;
    let bar_width = slot * 0.8;

    writeln!(svg, r#"<g class="chart" font-size="12">"#)?;
    writeln!(
        svg,
        r##"<line x1="{CHART_LEFT}" y1="{baseline}" x2="{}" y2="{baseline}" stroke="#333"/>"##,
        CHART_LEFT + CHART_WIDTH
    )?;
    writeln!(
        svg,
        r##"<line x1="{CHART_LEFT}" y1="{CHART_TOP}" x2="{CHART_LEFT}" y2="{baseline}" stroke="#333"/>"##
    )?;
    writeln!(
        svg,
        r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" transform="rotate(-90 {:.1} {:.1})">Quantidade</text>"#,
        CHART_LEFT - 60.0,
        CHART_TOP + CHART_HEIGHT / 2.0,
        CHART_LEFT - 60.0,
        CHART_TOP + CHART_HEIGHT / 2.0,
    )?;
    writeln!(
        svg,
        r#"<text x="{:.1}" y="{CHART_TOP}" text-anchor="end">{}</text>"#,
        CHART_LEFT - 6.0,
        format_axis_value(max)
    )?;
    writeln!(
        svg,
        r#"<text x="{:.1}" y="{baseline}" text-anchor="end">0</text>"#,
        CHART_LEFT - 6.0
    )?;
    for (index, row) in ranking.iter().enumerate() {
        let value = row.total.to_f64().unwrap_or(0.0);
        let height = if max > 0.0 {
            value / max * CHART_HEIGHT
        } else {
            0.0
        };
        let x = CHART_LEFT + index as f64 * slot + (slot - bar_width) / 2.0;
        let center = x + bar_width / 2.0;
        writeln!(
            svg,
            r#"<rect x="{x:.1}" y="{:.1}" width="{bar_width:.1}" height="{height:.1}" fill="{BAR_COLOR}"/>"#,
            baseline - height
        )?;
        writeln!(
            svg,
            r#"<text x="{center:.1}" y="{:.1}" text-anchor="end" transform="rotate({TICK_ROTATION} {center:.1} {:.1})">{}</text>"#,
            baseline + 16.0,
            baseline + 16.0,
            escape(&row.client)
        )?;
    }
    writeln!(svg, "</g>")
}

fn format_axis_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

fn escape(content: &str) -> String {
    let mut escaped = String::with_capacity(content.len());
    for c in content.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            c => escaped.push(c),
        }
    }
    escaped
}
