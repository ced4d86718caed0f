//! Batch conversion
//!
//! Runs one job per song, strictly in order. A failing song is logged and
//! recorded in the report; the rest of the batch carries on. Songs that
//! convert successfully are entered into the manifest.

use std::collections::BTreeMap;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::decode::SongDecoder;
use crate::errors::{ConversionError, Result};
use crate::models::Song;
use crate::renderers::{render_blueprint, render_script};
use crate::settings::ExportSettings;

/// Raw input for one job
#[derive(Debug, Clone)]
pub struct SongInput {
    /// Song identifier, e.g. the file stem
    pub name: String,
    pub bytes: Vec<u8>,
}

impl SongInput {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

/// Everything produced for one song
#[derive(Debug, Clone, PartialEq)]
pub struct SongOutput {
    pub name: String,
    pub script: Option<String>,
    pub blueprint: Option<String>,
    pub entry: ManifestEntry,
}

/// Manifest metadata for one song
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub author: String,
    #[serde(rename = "originalAuthor")]
    pub original_author: String,
}

/// Song id to metadata, accumulated over a batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    entries: BTreeMap<String, ManifestEntry>,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a song; a repeated id replaces the earlier entry
    pub fn insert(&mut self, name: impl Into<String>, entry: ManifestEntry) {
        self.entries.insert(name.into(), entry);
    }

    pub fn get(&self, name: &str) -> Option<&ManifestEntry> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ManifestEntry)> {
        self.entries.iter()
    }

    /// Tab-indented JSON
    pub fn to_json_string(&self) -> Result<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        String::from_utf8(buf).map_err(|e| ConversionError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
    }

    /// Persist the manifest as JSON at `path`
    pub fn write_to(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json_string()?)?;
        Ok(())
    }
}

/// Result of one job
#[derive(Debug)]
pub struct JobOutcome {
    pub name: String,
    pub result: Result<SongOutput>,
}

/// Outcome of a whole batch, in input order
#[derive(Debug, Default)]
pub struct BatchReport {
    pub jobs: Vec<JobOutcome>,
    pub manifest: Manifest,
}

impl BatchReport {
    pub fn succeeded(&self) -> impl Iterator<Item = &SongOutput> {
        self.jobs.iter().filter_map(|job| job.result.as_ref().ok())
    }

    pub fn failed(&self) -> impl Iterator<Item = (&str, &ConversionError)> {
        self.jobs
            .iter()
            .filter_map(|job| job.result.as_ref().err().map(|e| (job.name.as_str(), e)))
    }

    pub fn success_count(&self) -> usize {
        self.succeeded().count()
    }

    pub fn failure_count(&self) -> usize {
        self.failed().count()
    }

    pub fn is_complete_success(&self) -> bool {
        self.failure_count() == 0
    }
}

/// Run the enabled pipelines for one decoded song
///
/// Any failure discards everything produced for the song so far.
pub fn convert_song(name: &str, song: &Song, settings: &ExportSettings) -> Result<SongOutput> {
    if song.groups().is_empty() {
        return Err(ConversionError::EmptySong);
    }

    let script = if settings.targets.script {
        Some(render_script(song, settings.pitch_policy)?)
    } else {
        None
    };

    let blueprint = if settings.targets.blueprint {
        Some(render_blueprint(song, settings)?)
    } else {
        None
    };

    Ok(SongOutput {
        name: name.to_string(),
        script,
        blueprint,
        entry: ManifestEntry {
            author: song.author.clone(),
            original_author: song.original_author.clone(),
        },
    })
}

fn run_job<D: SongDecoder + ?Sized>(decoder: &D, input: &SongInput, settings: &ExportSettings) -> Result<SongOutput> {
    let song = decoder.decode(&input.bytes)?;
    log::info!(
        "converting {}: {} groups, {} notes",
        input.name,
        song.groups().len(),
        song.note_count()
    );
    convert_song(&input.name, &song, settings)
}

/// Convert every input, isolating per-song failures
pub fn convert_batch<D, I>(decoder: &D, inputs: I, settings: &ExportSettings) -> BatchReport
where
    D: SongDecoder + ?Sized,
    I: IntoIterator<Item = SongInput>,
{
    let mut report = BatchReport::default();

    for input in inputs {
        let result = run_job(decoder, &input, settings);
        match &result {
            Ok(output) => {
                report.manifest.insert(input.name.clone(), output.entry.clone());
            }
            Err(e) => {
                log::error!("failed to convert {}: {}", input.name, e);
            }
        }
        report.jobs.push(JobOutcome {
            name: input.name,
            result,
        });
    }

    if !report.is_complete_success() {
        log::warn!(
            "batch finished with {} of {} songs failed",
            report.failure_count(),
            report.jobs.len()
        );
    }

    report
}
