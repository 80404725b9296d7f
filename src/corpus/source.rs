use anyhow::{Context, Result};
use std::fmt;
use std::fs;

use crate::settings::DataPaths;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Resource {
    ArabicText,
    Translation,
    Sections,
    AudioSources,
    Timestamps,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Resource::ArabicText => "arabic text",
            Resource::Translation => "translation",
            Resource::Sections => "juz boundaries",
            Resource::AudioSources => "recitation audio",
            Resource::Timestamps => "recitation timestamps",
        };
        f.write_str(name)
    }
}

/// Where the raw data comes from. Implementations return the whole document
/// for a resource; parsing and caching happen in [`crate::Corpus`].
pub trait CorpusSource: Send + Sync {
    fn fetch(&self, resource: Resource) -> Result<String>;
}

#[derive(Clone, Debug)]
pub struct FileSource {
    paths: DataPaths,
}

impl FileSource {
    pub fn new(paths: DataPaths) -> Self {
        FileSource { paths }
    }

    fn path(&self, resource: Resource) -> &std::path::Path {
        match resource {
            Resource::ArabicText => &self.paths.arabic_text,
            Resource::Translation => &self.paths.translation,
            Resource::Sections => &self.paths.sections,
            Resource::AudioSources => &self.paths.audio_sources,
            Resource::Timestamps => &self.paths.timestamps,
        }
    }
}

impl CorpusSource for FileSource {
    fn fetch(&self, resource: Resource) -> Result<String> {
        let path = self.path(resource);
        fs::read_to_string(path).with_context(|| format!("could not read {}", path.display()))
    }
}
