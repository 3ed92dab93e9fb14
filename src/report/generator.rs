//! Sales report generation.
//!
//! This module renders the full sales report as console text or JSON
//! from the loaded records.

use crate::analysis::{
    group_by_genre, platforms_by_average, top_n, totals_by_region, year_span, DEFAULT_TOP_N,
};
use crate::models::{GameRecord, GenreSummary, Region, RegionTotals, YearSpan};
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;

const RULE_WIDTH: usize = 60;
const REGION_WIDTH: usize = 7;
const PLATFORM_WIDTH: usize = 10;

/// Layout settings for generated reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    /// Number of entries in each ranking.
    pub top_n: usize,
    /// Column width of game names in rankings.
    pub name_width: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            name_width: 30,
        }
    }
}

/// Generate the complete text report.
pub fn generate_text_report(records: &[GameRecord], options: &ReportOptions) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut output = String::new();

    output.push_str(&format!("\n{}\n", rule));
    output.push_str("VIDEO GAME SALES REPORT\n");
    output.push_str(&format!("{}\n", rule));
    output.push_str(&format!("Total games analyzed: {}\n\n", records.len()));

    output.push_str(&generate_totals_section(&totals_by_region(records)));
    output.push_str(&generate_rankings_section(records, options));
    output.push_str(&generate_genre_section(&group_by_genre(records)));
    output.push_str(&generate_platform_section(&platforms_by_average(records)));

    if let Some(span) = year_span(records) {
        output.push_str(&format!("\nYear range: {} - {}\n", span.min, span.max));
    }

    output.push_str(&format!("{}\n", rule));

    output
}

/// Generate the regional totals section.
fn generate_totals_section(totals: &RegionTotals) -> String {
    let mut section = String::new();

    section.push_str("TOTAL SALES BY REGION (millions)\n");
    for (region, total) in totals.iter() {
        section.push_str(&format!(
            "  {:<width$}: {:.2}\n",
            region.to_string(),
            total,
            width = REGION_WIDTH
        ));
    }

    section
}

/// Generate the per-region rankings section.
fn generate_rankings_section(records: &[GameRecord], options: &ReportOptions) -> String {
    let mut section = String::new();

    section.push_str(&format!("\nTOP {} BY REGION\n", options.top_n));
    for region in Region::ALL {
        section.push_str(&format!("\n Region {}:\n", region));
        let ranking = top_n(records, region, options.top_n);
        for line in format_ranking(&ranking, options).lines() {
            section.push_str(&format!("   {}\n", line));
        }
    }

    section
}

/// Generate the genre breakdown section.
fn generate_genre_section(genres: &GenreSummary) -> String {
    let mut section = String::new();

    section.push_str("\nGENRE ANALYSIS\n");
    for (genre, stats) in genres.iter() {
        section.push_str(&format!("\n {}\n", genre));
        section.push_str(&format!("   Games: {}\n", stats.count));
        section.push_str(&format!("   Global sales: {:.2}\n", stats.sales_global));
    }

    section
}

/// Generate the platform averages section.
fn generate_platform_section(averages: &[(String, f64)]) -> String {
    let mut section = String::new();

    section.push_str("\nAVERAGE SALES BY PLATFORM\n");
    for (platform, average) in averages {
        section.push_str(&format!(
            "  {:<width$}: {:.2}\n",
            platform,
            average,
            width = PLATFORM_WIDTH
        ));
    }

    section
}

/// Format a ranking as one `name  sales` line per entry.
pub fn format_ranking(ranking: &[(String, f64)], options: &ReportOptions) -> String {
    ranking
        .iter()
        .map(|(name, sales)| format!("{:<width$} {:.2}\n", name, sales, width = options.name_width))
        .collect()
}

/// A ranked entry in the JSON report.
#[derive(Debug, Clone, Serialize)]
pub struct RankedGame {
    pub name: String,
    pub sales: f64,
}

/// Ranking of one region in the JSON report.
#[derive(Debug, Clone, Serialize)]
pub struct RegionRanking {
    pub region: Region,
    pub games: Vec<RankedGame>,
}

/// Average of one platform in the JSON report.
#[derive(Debug, Clone, Serialize)]
pub struct PlatformEntry {
    pub platform: String,
    pub average_global_sales: f64,
}

/// The complete sales report in machine-readable form.
#[derive(Debug, Clone, Serialize)]
pub struct SalesReport {
    pub generated_at: DateTime<Utc>,
    pub total_games: usize,
    pub totals: RegionTotals,
    pub rankings: Vec<RegionRanking>,
    pub genres: GenreSummary,
    pub platforms: Vec<PlatformEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_span: Option<YearSpan>,
}

impl SalesReport {
    /// Builds the report from the loaded records.
    pub fn build(records: &[GameRecord], options: &ReportOptions) -> Self {
        let rankings = Region::ALL
            .into_iter()
            .map(|region| RegionRanking {
                region,
                games: top_n(records, region, options.top_n)
                    .into_iter()
                    .map(|(name, sales)| RankedGame { name, sales })
                    .collect(),
            })
            .collect();

        let platforms = platforms_by_average(records)
            .into_iter()
            .map(|(platform, average_global_sales)| PlatformEntry {
                platform,
                average_global_sales,
            })
            .collect();

        Self {
            generated_at: Utc::now(),
            total_games: records.len(),
            totals: totals_by_region(records),
            rankings,
            genres: group_by_genre(records),
            platforms,
            year_span: year_span(records),
        }
    }
}

/// Generate a JSON report.
pub fn generate_json_report(records: &[GameRecord], options: &ReportOptions) -> Result<String> {
    let report = SalesReport::build(records, options);
    serde_json::to_string_pretty(&report).map_err(Into::into)
}
