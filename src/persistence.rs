// File: src/persistence.rs
use crate::core::graph::WordGraph;
use crate::error::Result;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use std::time::UNIX_EPOCH;
use tempfile::NamedTempFile;

/// Identifies the corpus file a snapshot was built from. A snapshot whose
/// fingerprint no longer matches the corpus on disk is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusFingerprint {
    len: u64,
    modified_nanos: Option<u128>,
}

impl CorpusFingerprint {
    pub fn of(corpus: &Path) -> Result<Self> {
        let meta = fs::metadata(corpus)?;
        let modified_nanos = meta
            .modified()
            .ok()
            .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
            .map(|d| d.as_nanos());
        Ok(CorpusFingerprint { len: meta.len(), modified_nanos })
    }
}

#[derive(Serialize)]
struct SnapshotRef<'a> {
    fingerprint: CorpusFingerprint,
    graph: &'a WordGraph,
}

#[derive(Deserialize)]
struct SerializableState {
    fingerprint: CorpusFingerprint,
    graph: WordGraph,
}

/// Writes a built graph as a bincode snapshot tagged with the corpus it came
/// from. The file is replaced atomically.
pub fn save_snapshot(graph: &WordGraph, fingerprint: CorpusFingerprint, path: &Path) -> Result<()> {
    let parent_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir)?;

    let temp_file = NamedTempFile::new_in(parent_dir)?;
    {
        let mut writer = BufWriter::new(&temp_file);
        bincode::serialize_into(&mut writer, &SnapshotRef { fingerprint, graph })?;
        writer.flush()?;
    }

    temp_file.persist(path).map_err(|e| e.error)?;
    debug!("saved word graph snapshot to {}", path.display());
    Ok(())
}

/// Loads a snapshot and re-checks it; a snapshot is no more trusted than a corpus.
pub fn load_snapshot(path: &Path) -> Result<(CorpusFingerprint, WordGraph)> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let state: SerializableState = bincode::deserialize_from(reader)?;
    state.graph.validate()?;
    debug!("loaded word graph snapshot from {}", path.display());
    Ok((state.fingerprint, state.graph))
}

/// Uses the snapshot at `snapshot` when it loads cleanly and was built from
/// the current `corpus`, otherwise parses `corpus` and refreshes the snapshot.
/// A failed refresh only costs speed.
pub fn load_or_build(corpus: &Path, snapshot: Option<&Path>) -> Result<WordGraph> {
    let Some(snapshot) = snapshot else {
        return WordGraph::from_path(corpus);
    };
    let fingerprint = CorpusFingerprint::of(corpus)?;
    match load_snapshot(snapshot) {
        Ok((cached, graph)) if cached == fingerprint => return Ok(graph),
        Ok(_) => debug!("snapshot {} is stale, rebuilding", snapshot.display()),
        Err(e) => debug!("snapshot {} unusable ({}), rebuilding", snapshot.display(), e),
    }
    let graph = WordGraph::from_path(corpus)?;
    if let Err(e) = save_snapshot(&graph, fingerprint, snapshot) {
        log::warn!("could not write snapshot {}: {}", snapshot.display(), e);
    }
    Ok(graph)
}
