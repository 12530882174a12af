use anyhow::Context;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Répertoire de sortie : `<stem>-schedule-NN.<ext>`, premier numéro libre.
#[derive(Debug, Clone)]
pub struct OutputStore {
    dir: PathBuf,
    prefix: String,
}

impl OutputStore {
    pub fn new<P: AsRef<Path>, S: Into<String>>(dir: P, stem: S) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            prefix: format!("{}-schedule", stem.into()),
        }
    }

    /// Dérive le préfixe du nom du fichier de configuration (`team.json` → `team`).
    pub fn for_config<P: AsRef<Path>>(dir: P, config_path: &Path) -> Self {
        let stem = config_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("roster");
        Self::new(dir, stem)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Prochain chemin libre pour l'extension donnée : premier numéro
    /// non pris, sans jamais écraser un fichier existant.
    pub fn next_path(&self, ext: &str) -> anyhow::Result<PathBuf> {
        let mut n: u32 = 0;
        loop {
            let path = self.dir.join(format!("{}-{:02}.{}", self.prefix, n, ext));
            if !path.try_exists().with_context(|| format!("checking {}", path.display()))? {
                return Ok(path);
            }
            n += 1;
        }
    }

    /// Écrit de manière atomique sous le prochain nom libre.
    pub fn save(&self, ext: &str, content: &[u8]) -> anyhow::Result<PathBuf> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("creating output directory {}", self.dir.display()))?;
        let path = self.next_path(ext)?;
        let mut tmp = NamedTempFile::new_in(&self.dir).with_context(|| "creating temp file")?;
        tmp.write_all(content)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist_noclobber(&path)
            .with_context(|| format!("atomic rename to {}", path.display()))?;
        Ok(path)
    }
}
