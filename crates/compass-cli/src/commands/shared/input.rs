use std::io::Read;
use std::path::Path;

use anyhow::Context;
use compass_core::entities::{AcademicRecord, Response, TraitScores};
use serde::de::DeserializeOwned;

/// Read and parse a JSON document from `path`, or from stdin when `path` is `-`.
pub fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> anyhow::Result<T> {
    let text = if path.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .with_context(|| format!("failed to read {what} from stdin"))?;
        buffer
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {what} file {}", path.display()))?
    };

    serde_json::from_str(&text)
        .with_context(|| format!("failed to parse {what} from {}", path.display()))
}

pub fn read_responses(path: &Path) -> anyhow::Result<Vec<Response>> {
    read_json(path, "responses")
}

/// An absent academics file is an empty record.
pub fn read_academics(path: Option<&Path>) -> anyhow::Result<AcademicRecord> {
    path.map_or_else(|| Ok(AcademicRecord::new()), |path| read_json(path, "academics"))
}

/// Read a trait score map, rejecting scores outside `[0, 1]`.
pub fn read_trait_scores(path: &Path) -> anyhow::Result<TraitScores> {
    let scores: TraitScores = read_json(path, "trait scores")?;
    if let Some((name, score)) = scores
        .iter()
        .find(|(_, score)| !(0.0..=1.0).contains(score))
    {
        anyhow::bail!("trait '{name}' has score {score}, expected a value in [0, 1]");
    }
    Ok(scores)
}
