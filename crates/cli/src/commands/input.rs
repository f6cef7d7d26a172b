//! Loading scraped quote lists from disk.
//!
//! Scrapers dump one file per site, either a JSON array of
//! `{"team", "odds", "link"?}` objects or a CSV with `team,odds[,link]` columns.
//! The source is assigned by which file a quote came from.

use anyhow::{Context, Result};
use oddsarb_arbitrage::{Odds, OddsQuote, Source};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct JsonRecord {
    team: String,
    odds: Odds,
    #[serde(default)]
    link: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CsvRecord {
    team: String,
    odds: String,
    #[serde(default)]
    link: Option<String>,
}

/// Loads a quote file, dispatching on the `.csv` extension.
pub fn load_quotes(path: impl AsRef<Path>, source: Source) -> Result<Vec<OddsQuote>> {
    let path = path.as_ref();
    let is_csv = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

    let quotes = if is_csv {
        load_csv(path, source)?
    } else {
        load_json(path, source)?
    };

    tracing::debug!(
        path = %path.display(),
        source = %source,
        quotes = quotes.len(),
        "Loaded quotes"
    );
    Ok(quotes)
}

fn load_json(path: &Path, source: Source) -> Result<Vec<OddsQuote>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read quote file: {}", path.display()))?;
    let records: Vec<JsonRecord> = serde_json::from_str(&text)
        .with_context(|| format!("Invalid quote JSON in {}", path.display()))?;

    Ok(records
        .into_iter()
        .map(|record| OddsQuote {
            team: record.team,
            odds: record.odds,
            source,
            link: record.link,
        })
        .collect())
}

fn load_csv(path: &Path, source: Source) -> Result<Vec<OddsQuote>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;

    let mut quotes = Vec::new();
    for (row, record) in reader.deserialize::<CsvRecord>().enumerate() {
        let record =
            record.with_context(|| format!("Invalid CSV row {} in {}", row + 1, path.display()))?;
        let odds: Odds = record
            .odds
            .parse()
            .with_context(|| format!("Row {} of {}", row + 1, path.display()))?;
        quotes.push(OddsQuote {
            team: record.team,
            odds,
            source,
            link: record.link.filter(|link| !link.is_empty()),
        });
    }
    Ok(quotes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Write;

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_json_assigns_source() {
        let file = write_temp(
            ".json",
            r#"[{"team": "HOU", "odds": 1.8, "link": "r1"}, {"team": "DEN", "odds": "Suspended", "source": "A"}]"#,
        );

        let quotes = load_quotes(file.path(), Source::B).unwrap();
        assert_eq!(quotes.len(), 2);
        assert!(quotes.iter().all(|q| q.source == Source::B));
        assert_eq!(quotes[0].odds.price(), Some(dec!(1.8)));
        assert_eq!(quotes[0].link.as_deref(), Some("r1"));
        assert!(quotes[1].odds.is_suspended());
    }

    #[test]
    fn test_load_csv() {
        let file = write_temp(".csv", "team,odds,link\nHOU,1.80,row-1\nDEN,Suspended,\n");

        let quotes = load_quotes(file.path(), Source::A).unwrap();
        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[0].odds, Odds::Active(dec!(1.80)));
        assert_eq!(quotes[0].link.as_deref(), Some("row-1"));
        assert!(quotes[1].odds.is_suspended());
        assert!(quotes[1].link.is_none());
    }

    #[test]
    fn test_load_csv_bad_odds() {
        let file = write_temp(".csv", "team,odds\nHOU,evens\n");
        let err = load_quotes(file.path(), Source::A).unwrap_err();
        assert!(format!("{err:#}").contains("evens"));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(load_quotes("/nonexistent/quotes.json", Source::A).is_err());
    }
}
