use std::{
    fs,
    io::{self, Read},
    path::Path,
};

use anyhow::Context;
use serde::Deserialize;
use whoop_digest_types::{DailySummary, RawEvent, RawStreams};

/// Either the four collections keyed by name, or a flat list of events
/// tagged with `kind`.
#[derive(Deserialize)]
#[serde(untagged)]
enum StreamsFile {
    Events(Vec<RawEvent>),
    Collections(RawStreams),
}

/// Reads `path`, or standard input for `-`.
pub fn read_input(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read standard input")?;
        return Ok(buf);
    }

    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

pub fn parse_streams(json: &str) -> anyhow::Result<RawStreams> {
    let file = serde_json::from_str::<StreamsFile>(json)
        .context("expected an object of record collections or a list of tagged records")?;

    Ok(match file {
        StreamsFile::Events(events) => events.into_iter().collect(),
        StreamsFile::Collections(streams) => streams,
    })
}

pub fn parse_summaries(json: &str) -> anyhow::Result<Vec<DailySummary>> {
    serde_json::from_str(json).context("expected a list of daily summaries")
}

pub fn load_streams(path: &Path) -> anyhow::Result<RawStreams> {
    let streams = parse_streams(&read_input(path)?)
        .with_context(|| format!("invalid raw records in {}", path.display()))?;
    debug!(
        "loaded {} recovery, {} sleep, {} cycle and {} workout records",
        streams.recovery.len(),
        streams.sleep.len(),
        streams.cycle.len(),
        streams.workout.len()
    );
    Ok(streams)
}

pub fn load_summaries(path: &Path) -> anyhow::Result<Vec<DailySummary>> {
    parse_summaries(&read_input(path)?)
        .with_context(|| format!("invalid daily summaries in {}", path.display()))
}
