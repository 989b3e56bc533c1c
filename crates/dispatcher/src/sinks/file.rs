//! FileSink - writes summaries to a JSON Lines or CSV file

use contracts::{ContractError, SummaryFileFormat, SummarySink, WindowSummary};
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tracing::{debug, error, instrument};

/// Configuration for FileSink
#[derive(Debug, Clone)]
pub struct FileSinkConfig {
    /// Output file
    pub path: PathBuf,
    /// On-disk layout
    pub format: SummaryFileFormat,
}

impl FileSinkConfig {
    /// Create config from params map
    ///
    /// `format` defaults to the path extension, then to JSON Lines.
    pub fn from_params(params: &HashMap<String, String>) -> std::io::Result<Self> {
        let path = params
            .get("path")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
            .ok_or_else(|| invalid_input("file sink requires a 'path' parameter"))?;

        let format = match params.get("format") {
            Some(value) => SummaryFileFormat::from_param(value)
                .ok_or_else(|| invalid_input(format!("unknown file format '{value}'")))?,
            None => path
                .extension()
                .and_then(|e| e.to_str())
                .and_then(SummaryFileFormat::from_param)
                .unwrap_or_default(),
        };

        Ok(Self { path, format })
    }
}

fn invalid_input(message: impl Into<String>) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::InvalidInput, message.into())
}

enum SummaryWriter {
    Jsonl(BufWriter<File>),
    Csv(csv::Writer<File>),
}

impl SummaryWriter {
    fn open(config: &FileSinkConfig) -> std::io::Result<Self> {
        if let Some(parent) = config.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(&config.path)?;

        Ok(match config.format {
            SummaryFileFormat::Jsonl => Self::Jsonl(BufWriter::new(file)),
            SummaryFileFormat::Csv => {
                let mut writer = csv::Writer::from_writer(file);
                writer.write_record(WindowSummary::COLUMNS)?;
                Self::Csv(writer)
            }
        })
    }

    fn write(&mut self, summary: &WindowSummary) -> std::io::Result<()> {
        match self {
            Self::Jsonl(writer) => {
                serde_json::to_writer(&mut *writer, summary)?;
                writer.write_all(b"\n")
            }
            Self::Csv(writer) => Ok(writer.write_record(summary.to_row())?),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match self {
            Self::Jsonl(writer) => writer.flush(),
            Self::Csv(writer) => writer.flush(),
        }
    }
}

/// Sink that appends one line per summary to a file
///
/// The file is truncated when the sink is created.
pub struct FileSink {
    name: String,
    config: FileSinkConfig,
    writer: Option<SummaryWriter>,
}

impl FileSink {
    pub fn new(name: impl Into<String>, config: FileSinkConfig) -> std::io::Result<Self> {
        let writer = SummaryWriter::open(&config)?;

        Ok(Self {
            name: name.into(),
            config,
            writer: Some(writer),
        })
    }

    /// Create from params map (for factory)
    pub fn from_params(
        name: impl Into<String>,
        params: &HashMap<String, String>,
    ) -> std::io::Result<Self> {
        let config = FileSinkConfig::from_params(params)?;
        Self::new(name, config)
    }

    pub fn config(&self) -> &FileSinkConfig {
        &self.config
    }

    fn writer(&mut self) -> Result<&mut SummaryWriter, ContractError> {
        self.writer
            .as_mut()
            .ok_or_else(|| ContractError::sink_write(&self.name, "sink already closed"))
    }

    fn persist_summary(&mut self, summary: &WindowSummary) -> Result<(), ContractError> {
        let name = self.name.clone();
        self.writer()?.write(summary).map_err(|e| {
            error!(sink = %name, window_id = summary.window_id, error = %e, "Write failed");
            ContractError::sink_write(&name, e.to_string())
        })
    }
}

impl SummarySink for FileSink {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "file_sink_write",
        skip(self, summary),
        fields(sink = %self.name, window_id = summary.window_id)
    )]
    async fn write(&mut self, summary: &WindowSummary) -> Result<(), ContractError> {
        self.persist_summary(summary)
    }

    #[instrument(name = "file_sink_flush", skip(self))]
    async fn flush(&mut self) -> Result<(), ContractError> {
        let name = self.name.clone();
        match self.writer.as_mut() {
            Some(writer) => writer
                .flush()
                .map_err(|e| ContractError::sink_write(&name, e.to_string())),
            None => Ok(()),
        }
    }

    #[instrument(name = "file_sink_close", skip(self))]
    async fn close(&mut self) -> Result<(), ContractError> {
        if let Some(mut writer) = self.writer.take() {
            writer
                .flush()
                .map_err(|e| ContractError::sink_write(&self.name, e.to_string()))?;
        }
        debug!(sink = %self.name, path = %self.config.path.display(), "FileSink closed");
        Ok(())
    }
}
