use anyhow::{Context, Result};
use directories_next::BaseDirs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug)]
pub struct Settings {
    pub max_attempts: usize,
    pub foreign_sample_attempts: usize,
    pub mask_fraction: f64,
    pub partial_fraction: f64,
    pub rng_seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            max_attempts: 64,
            foreign_sample_attempts: 50,
            mask_fraction: 0.25,
            partial_fraction: 0.5,
            rng_seed: None,
        }
    }
}

/// Location of the five data files read by [`crate::FileSource`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataPaths {
    pub arabic_text: PathBuf,
    pub translation: PathBuf,
    pub sections: PathBuf,
    pub audio_sources: PathBuf,
    pub timestamps: PathBuf,
}

impl DataPaths {
    pub fn in_directory(dir: &Path) -> Self {
        DataPaths {
            arabic_text: dir.join("imlaei-script-ayah-by-ayah.json"),
            translation: dir.join("en-sahih-international-simple.json"),
            sections: dir.join("juz_breakdown_standard.csv"),
            audio_sources: dir.join("surah.json"),
            timestamps: dir.join("segments.json"),
        }
    }

    pub fn default_location() -> Result<Self> {
        let mut dir = BaseDirs::new()
            .context("could not locate system directories")?
            .data_dir()
            .to_path_buf();
        dir.push("hifz-quiz");
        Ok(Self::in_directory(&dir))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_files_live_in_one_directory() {
        let paths = DataPaths::in_directory(Path::new("/srv/quran"));
        assert_eq!(
            paths.arabic_text,
            Path::new("/srv/quran/imlaei-script-ayah-by-ayah.json")
        );
        assert_eq!(paths.sections, Path::new("/srv/quran/juz_breakdown_standard.csv"));
        assert_eq!(paths.timestamps, Path::new("/srv/quran/segments.json"));
    }

    #[test]
    fn default_location_is_under_data_dir() {
        let data_dir = match BaseDirs::new() {
            Some(dirs) => dirs.data_dir().to_path_buf(),
            None => return,
        };
        let paths = DataPaths::default_location().unwrap();
        assert_eq!(paths, DataPaths::in_directory(&data_dir.join("hifz-quiz")));
        assert!(paths.audio_sources.ends_with("hifz-quiz/surah.json"));
    }
}
