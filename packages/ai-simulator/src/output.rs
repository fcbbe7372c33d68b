//! Output writers for simulation results.
//!
//! JSON lines are written as games finish; the `json` format buffers every
//! game and writes one array at the end. A CSV summary is always written.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;

use crate::metrics::{CsvSummaryRow, GameMetrics};
use crate::types::OutputFormat;

pub struct OutputWriter {
    writer: Box<dyn Write + Send>,
    format: OutputFormat,
    buffered: Vec<GameMetrics>,
    csv_writer: csv::Writer<BufWriter<File>>,
    results_path: PathBuf,
    csv_path: PathBuf,
}

fn open_truncated(path: &Path) -> std::io::Result<File> {
    OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
}

impl OutputWriter {
    pub fn new(
        output_dir: &str,
        format: &OutputFormat,
        compress: bool,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let dir = Path::new(output_dir);
        std::fs::create_dir_all(dir)?;

        let timestamp = time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Iso8601::DEFAULT)
            .unwrap_or_else(|_| "unknown".to_string())
            .replace(':', "-");

        let extension = match format {
            OutputFormat::Jsonl => "jsonl",
            OutputFormat::Json => "json",
        };
        let mut results_path = dir.join(format!("simulation_{timestamp}.{extension}"));
        let writer: Box<dyn Write + Send> = if compress {
            results_path.set_extension(format!("{extension}.gz"));
            Box::new(BufWriter::new(GzEncoder::new(
                open_truncated(&results_path)?,
                Compression::default(),
            )))
        } else {
            Box::new(BufWriter::new(open_truncated(&results_path)?))
        };

        let csv_path = dir.join(format!("simulation_{timestamp}_summary.csv"));
        // Header comes from the row struct on the first serialize.
        let csv_writer = csv::Writer::from_writer(BufWriter::new(open_truncated(&csv_path)?));

        Ok(Self {
            writer,
            format: format.clone(),
            buffered: Vec::new(),
            csv_writer,
            results_path,
            csv_path,
        })
    }

    pub fn write_game(&mut self, metrics: &GameMetrics) -> Result<(), Box<dyn std::error::Error>> {
        match self.format {
            OutputFormat::Jsonl => {
                let json = serde_json::to_string(metrics)?;
                writeln!(self.writer, "{json}")?;
                self.writer.flush()?;
            }
            OutputFormat::Json => self.buffered.push(metrics.clone()),
        }

        let row: CsvSummaryRow = metrics.into();
        self.csv_writer.serialize(&row)?;
        self.csv_writer.flush()?;
        Ok(())
    }

    pub fn finish(mut self) -> Result<(), Box<dyn std::error::Error>> {
        if matches!(self.format, OutputFormat::Json) {
            serde_json::to_writer_pretty(&mut self.writer, &self.buffered)?;
            writeln!(self.writer)?;
        }
        self.writer.flush()?;
        self.csv_writer.flush()?;
        Ok(())
    }

    pub fn output_paths(&self) -> (&Path, &Path) {
        (&self.results_path, &self.csv_path)
    }
}
