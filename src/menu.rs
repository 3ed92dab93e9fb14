//! Interactive menu loop.
//!
//! Reads choices from an input stream and writes results to an output
//! stream, so the loop can run against stdin/stdout or in-memory buffers.

use crate::analysis::{filter_by_year_range, top_n_by_region};
use crate::error::{InvalidMenuChoice, InvalidYear};
use crate::models::{GameRecord, Region};
use crate::report::{format_ranking, generate_text_report, ReportOptions};
use anyhow::Result;
use std::io::{BufRead, Write};
use std::str::FromStr;
use tracing::{debug, warn};

const MENU: &str = "
MAIN MENU
1. Full report
2. Top sales by region
3. Filter by year range
4. Exit
";

/// An entry of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    FullReport,
    TopByRegion,
    YearRange,
    Exit,
}

impl FromStr for MenuChoice {
    type Err = InvalidMenuChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(MenuChoice::FullReport),
            "2" => Ok(MenuChoice::TopByRegion),
            "3" => Ok(MenuChoice::YearRange),
            "4" => Ok(MenuChoice::Exit),
            other => Err(InvalidMenuChoice(other.to_string())),
        }
    }
}

/// Menu loop over a fixed record collection.
pub struct Menu<'a, R, W> {
    records: &'a [GameRecord],
    options: ReportOptions,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(records: &'a [GameRecord], options: ReportOptions, input: R, output: W) -> Self {
        Self {
            records,
            options,
            input,
            output,
        }
    }

    /// Run until the user exits or the input ends.
    pub fn run(&mut self) -> Result<()> {
        loop {
            write!(self.output, "{}", MENU)?;
            let Some(line) = self.prompt("Select an option: ")? else {
                debug!("Input closed, leaving menu");
                break;
            };

            match line.parse::<MenuChoice>() {
                Ok(MenuChoice::FullReport) => self.full_report()?,
                Ok(MenuChoice::TopByRegion) => self.top_by_region()?,
                Ok(MenuChoice::YearRange) => self.year_range()?,
                Ok(MenuChoice::Exit) => {
                    writeln!(self.output, "Exiting...")?;
                    break;
                }
                Err(e) => {
                    debug!("{}", e);
                    writeln!(self.output, "Invalid option")?;
                }
            }
        }

        self.output.flush()?;
        Ok(())
    }

    fn full_report(&mut self) -> Result<()> {
        let report = generate_text_report(self.records, &self.options);
        write!(self.output, "{}", report)?;
        Ok(())
    }

    fn top_by_region(&mut self) -> Result<()> {
        let Some(region) = self.prompt("Region (na, eu, jp, other, global): ")? else {
            return Ok(());
        };

        if Region::from_key(&region).is_none() {
            warn!("Unknown region '{}', every value counts as zero", region.trim());
        }

        let ranking = top_n_by_region(self.records, &region, self.options.top_n);
        write!(self.output, "{}", format_ranking(&ranking, &self.options))?;
        Ok(())
    }

    fn year_range(&mut self) -> Result<()> {
        let Some(start) = self.prompt_year("Start year: ")? else {
            return Ok(());
        };
        let Some(end) = self.prompt_year("End year: ")? else {
            return Ok(());
        };

        let found = filter_by_year_range(self.records, start, end);
        writeln!(self.output, "Games found: {}", found.len())?;
        Ok(())
    }

    /// Prompt for a year; reports bad input and yields `None`.
    fn prompt_year(&mut self, message: &str) -> Result<Option<i64>> {
        let Some(line) = self.prompt(message)? else {
            return Ok(None);
        };

        match parse_year(&line) {
            Ok(year) => Ok(Some(year)),
            Err(e) => {
                writeln!(self.output, "Error: {}", e)?;
                Ok(None)
            }
        }
    }

    /// Write `message` and read one line; `None` once the input is exhausted.
    fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

fn parse_year(s: &str) -> Result<i64, InvalidYear> {
    s.trim()
        .parse()
        .map_err(|_| InvalidYear(s.trim().to_string()))
}
