//! Rendering of reports as CSV or as a printed table.

use crate::analysis::{EnergyDiversityRow, TopTrackRow};
use crate::cli_style::TableBuilder;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

pub const TOP_TRACKS_HEADERS: [&str; 4] = ["artist", "track", "total_views", "rank"];
pub const ENERGY_DIVERSITY_HEADERS: [&str; 2] = ["album", "energy_diff"];

#[derive(PartialEq, Eq, Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => f.write_str("table"),
            OutputFormat::Csv => f.write_str("csv"),
        }
    }
}

/// Writes `rows` as CSV with the given header. The header is written even
/// when there are no rows.
pub fn write_csv<W: Write, T: Serialize>(out: W, headers: &[&str], rows: &[T]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(out);
    writer.write_record(headers)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn top_tracks_table(rows: &[TopTrackRow]) -> TableBuilder {
    let mut table = TableBuilder::new(TOP_TRACKS_HEADERS.to_vec()).align_right(&[2, 3]);
    for row in rows {
        table.add_row(vec![
            row.artist.clone(),
            row.track.clone(),
            row.total_views.to_string(),
            row.rank.to_string(),
        ]);
    }
    table
}

pub fn energy_diversity_table(rows: &[EnergyDiversityRow]) -> TableBuilder {
    let mut table = TableBuilder::new(ENERGY_DIVERSITY_HEADERS.to_vec()).align_right(&[1]);
    for row in rows {
        table.add_row(vec![row.album.clone(), format!("{:.4}", row.energy_diff)]);
    }
    table
}

/// Where a report goes: styled table or CSV on stdout, or a plain file.
pub struct ReportSink<'a> {
    pub format: OutputFormat,
    pub output: Option<&'a Path>,
}

impl ReportSink<'_> {
    pub fn emit_top_tracks(&self, rows: &[TopTrackRow]) -> Result<()> {
        self.emit(&TOP_TRACKS_HEADERS, rows, || top_tracks_table(rows))
    }

    pub fn emit_energy_diversity(&self, rows: &[EnergyDiversityRow]) -> Result<()> {
        self.emit(&ENERGY_DIVERSITY_HEADERS, rows, || {
            energy_diversity_table(rows)
        })
    }

    fn emit<T: Serialize>(
        &self,
        headers: &[&str],
        rows: &[T],
        table: impl FnOnce() -> TableBuilder,
    ) -> Result<()> {
        match (self.format, self.output) {
            (OutputFormat::Csv, None) => write_csv(std::io::stdout().lock(), headers, rows),
            (OutputFormat::Csv, Some(path)) => {
                let file = File::create(path)
                    .with_context(|| format!("Failed to create output file {:?}", path))?;
                write_csv(file, headers, rows)
            }
            (OutputFormat::Table, None) => {
                table().print();
                Ok(())
            }
            (OutputFormat::Table, Some(path)) => {
                let mut file = File::create(path)
                    .with_context(|| format!("Failed to create output file {:?}", path))?;
                for line in table().render(false) {
                    writeln!(file, "{}", line)?;
                }
                Ok(())
            }
        }
    }
}
