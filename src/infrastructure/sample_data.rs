// Bundled sample datasets, embedded at build time
use crate::domain::dataset::Dataset;
use crate::infrastructure::csv_codec;
use anyhow::{Context, Result};

const IRIS_CSV: &str = include_str!("../../data/iris.csv");
const TIPS_CSV: &str = include_str!("../../data/tips.csv");
const STOCKS_CSV: &str = include_str!("../../data/stocks.csv");

/// The three fixed datasets the chart panels render. Loaded once at startup;
/// a parse failure or a missing panel column is a fatal setup error, so the
/// panels can index these columns without re-checking.
#[derive(Debug, Clone)]
pub struct SampleData {
    pub iris: Dataset,
    pub tips: Dataset,
    pub stocks: Dataset,
}

impl SampleData {
    pub fn load() -> Result<Self> {
        let iris = csv_codec::parse_dataset(IRIS_CSV.as_bytes())
            .context("Failed to parse bundled iris.csv")?;
        require_columns(&iris, "iris.csv", &["sepal_width", "sepal_length"], &["species"])?;

        let tips = csv_codec::parse_dataset(TIPS_CSV.as_bytes())
            .context("Failed to parse bundled tips.csv")?;
        require_columns(&tips, "tips.csv", &["total_bill", "tip"], &["smoker", "day"])?;

        let stocks = csv_codec::parse_dataset(STOCKS_CSV.as_bytes())
            .context("Failed to parse bundled stocks.csv")?;
        require_columns(&stocks, "stocks.csv", &["GOOG"], &["date"])?;

        Ok(Self { iris, tips, stocks })
    }
}

fn require_columns(
    dataset: &Dataset,
    file: &str,
    numeric: &[&str],
    text: &[&str],
) -> Result<()> {
    if dataset.row_count() == 0 {
        anyhow::bail!("Bundled {} has no data rows", file);
    }
    for name in numeric {
        if dataset.numeric(name).is_none() {
            anyhow::bail!("Bundled {} is missing numeric column '{}'", file, name);
        }
    }
    for name in text {
        if dataset.text(name).is_none() {
            anyhow::bail!("Bundled {} is missing text column '{}'", file, name);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dataset::Column;

    #[test]
    fn test_bundled_datasets_load() {
        let samples = SampleData::load().unwrap();

        assert!(samples.iris.row_count() > 0);
        assert!(samples.iris.numeric("sepal_width").is_some());
        assert!(samples.iris.numeric("sepal_length").is_some());
        assert!(samples.iris.text("species").is_some());

        assert!(samples.tips.row_count() > 0);
        assert!(samples.tips.numeric("total_bill").is_some());
        assert!(samples.tips.numeric("tip").is_some());
        assert!(samples.tips.text("smoker").is_some());
        assert!(samples.tips.text("day").is_some());

        assert!(samples.stocks.row_count() > 0);
        assert!(samples.stocks.text("date").is_some());
        assert!(samples.stocks.numeric("GOOG").is_some());
    }

    #[test]
    fn test_require_columns_flags_wrong_type() {
        let dataset = Dataset::new(vec![Column::text(
            "GOOG",
            vec!["not a number".to_string()],
        )])
        .unwrap();

        let err = require_columns(&dataset, "stocks.csv", &["GOOG"], &[]).unwrap_err();
        assert!(err.to_string().contains("missing numeric column 'GOOG'"));
    }
}
