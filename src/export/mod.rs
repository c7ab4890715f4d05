mod csv;
mod image;
mod png;

pub use self::csv::{to_bytes as csv_bytes, write as write_csv};
pub use image::{placeholder_ranking, ranking_for_image, RankingRenderer, SvgRankingRenderer};
pub use png::PngRankingRenderer;

use crate::ledger::Period;

pub fn csv_file_name(period: Period) -> String {
    format!("gv_volumes_{}.csv", period.file_stem())
}

pub fn ranking_file_name(period: Period, extension: &str) -> String {
    format!("gv_ranking_{}.{}", period.file_stem(), extension)
}

/// e.g. `G&V • Ranking por Cliente — JUL/2025`
pub fn ranking_title(brand: &str, period: Period) -> String {
    format!(
        "{} • Ranking por Cliente — {}/{}",
        brand,
        period.month_abbreviation().to_uppercase(),
        period.year()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names() {
        let period = Period::new(2025, 7).unwrap();
        assert_eq!("gv_volumes_2025-07.csv", csv_file_name(period));
        assert_eq!(
            "gv_ranking_2025-07.png",
            ranking_file_name(period, PngRankingRenderer::new().file_extension())
        );
        assert_eq!(
            "gv_ranking_2025-07.svg",
            ranking_file_name(period, SvgRankingRenderer.file_extension())
        );
        assert_eq!(
            "gv_volumes_2024-12.csv",
            csv_file_name(Period::new(2024, 12).unwrap())
        );
    }

    #[test]
    fn title() {
        assert_eq!(
            "G&V • Ranking por Cliente — JUL/2025",
            ranking_title("G&V", Period::new(2025, 7).unwrap())
        );
    }
}
