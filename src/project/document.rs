use std::fs::File;
use std::io::{BufReader, BufWriter, Write as _};
use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::{DramaError, DramaResult};
use crate::project::model::Project;

impl Project {
    /// Parse a project from a JSON reader. The result is not validated.
    pub fn from_reader<R: std::io::Read>(r: R) -> DramaResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| DramaError::serde(format!("parse project JSON: {e}")))
    }

    /// Parse a project from a JSON string. The result is not validated.
    pub fn from_json_str(s: &str) -> DramaResult<Self> {
        serde_json::from_str(s).map_err(|e| DramaError::serde(format!("parse project JSON: {e}")))
    }

    /// Parse and validate a project JSON file.
    #[tracing::instrument]
    pub fn from_path(path: &Path) -> DramaResult<Self> {
        let f = File::open(path)
            .with_context(|| format!("open project JSON '{}'", path.display()))?;
        let project = Self::from_reader(BufReader::new(f))?;
        project.validate()?;
        tracing::debug!(
            scenes = project.scenes.len(),
            actors = project.actors.len(),
            "loaded project"
        );
        Ok(project)
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_writer<W: std::io::Write>(&self, w: W) -> DramaResult<()> {
        serde_json::to_writer_pretty(w, self)
            .map_err(|e| DramaError::serde(format!("write project JSON: {e}")))
    }

    /// Serialize to a JSON string.
    pub fn to_json_string(&self) -> DramaResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| DramaError::serde(format!("write project JSON: {e}")))
    }

    /// Write a JSON file, creating parent directories as needed.
    pub fn to_path(&self, path: &Path) -> DramaResult<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create project dir '{}'", parent.display()))?;
        }
        let f = File::create(path)
            .with_context(|| format!("create project JSON '{}'", path.display()))?;
        let mut w = BufWriter::new(f);
        self.to_writer(&mut w)?;
        w.flush()
            .with_context(|| format!("flush project JSON '{}'", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/project/document.rs"]
mod tests;
