//! Patch descriptions from config files, merged with command-line flags.
//!
//! Relative paths inside a config file are resolved against the directory
//! that holds it. Paths given as flags are used as-is, relative to the
//! working directory.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use spanpatch_core::{MarkerPair, Replacement};
use spanpatch_fs::{ConfigStore, NormalizedPath, RobustnessConfig, io};

use crate::error::{CliError, Result};

/// On-disk shape of a patch description.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PatchFile {
    pub target: Option<String>,
    pub open: Option<String>,
    pub close: Option<String>,
    pub replacement: Option<String>,
    pub replacement_file: Option<String>,
    #[serde(default)]
    pub body: bool,
    pub lock_timeout_ms: Option<u64>,
}

/// A loaded (or absent) config file plus the directory it lives in.
#[derive(Debug, Default)]
pub struct PatchSource {
    file: PatchFile,
    base: Option<NormalizedPath>,
}

impl PatchSource {
    /// Load the config file, if one was given.
    pub fn load(config: Option<&Path>) -> Result<Self> {
        let Some(config) = config else {
            return Ok(Self::default());
        };

        let path = NormalizedPath::new(config);
        let file: PatchFile = ConfigStore::new().load(&path)?;
        let canonical =
            dunce::canonicalize(config).map_err(|e| spanpatch_fs::Error::io(config, e))?;
        let base = canonical.parent().map(NormalizedPath::new);

        tracing::debug!(config = %path, "loaded patch description");
        Ok(Self { file, base })
    }

    /// The file to patch. The flag wins over the config file.
    pub fn target(&self, flag: Option<&Path>) -> Result<NormalizedPath> {
        if let Some(flag) = flag {
            return Ok(NormalizedPath::new(flag));
        }
        self.file
            .target
            .as_deref()
            .map(|target| self.config_relative(target))
            .ok_or_else(|| {
                CliError::user("no target file given; pass a path or set `target` in the config")
            })
    }

    /// The marker pair. Each flag wins over its config counterpart.
    pub fn markers(&self, open: Option<&str>, close: Option<&str>) -> Result<MarkerPair> {
        let open = open.or(self.file.open.as_deref()).ok_or_else(|| {
            CliError::user("no opening marker given; pass --open or set `open` in the config")
        })?;
        let close = close.or(self.file.close.as_deref()).ok_or_else(|| {
            CliError::user("no closing marker given; pass --close or set `close` in the config")
        })?;
        Ok(MarkerPair::new(open, close)?)
    }

    /// The replacement block.
    ///
    /// Flags take precedence over the config file as a whole, so an inline
    /// `--replacement` ignores a `replacement_file` from the config. Files are
    /// read verbatim, trailing newline included.
    pub fn replacement(
        &self,
        inline: Option<&str>,
        file: Option<&Path>,
        body_flag: bool,
    ) -> Result<Replacement> {
        let text = match (inline, file) {
            (Some(text), _) => text.to_string(),
            (None, Some(file)) => io::read_text(&NormalizedPath::new(file))?,
            (None, None) => match (&self.file.replacement, &self.file.replacement_file) {
                (Some(_), Some(_)) => {
                    return Err(CliError::user(
                        "config sets both `replacement` and `replacement_file`; keep one",
                    ));
                }
                (Some(text), None) => text.clone(),
                (None, Some(file)) => io::read_text(&self.config_relative(file))?,
                (None, None) => {
                    return Err(CliError::user(
                        "no replacement given; pass --replacement or --replacement-file, or set one in the config",
                    ));
                }
            },
        };

        if body_flag || self.file.body {
            Ok(Replacement::Body(text))
        } else {
            Ok(Replacement::Literal(text))
        }
    }

    /// Write settings, with the lock timeout taken from the config when set.
    pub fn robustness(&self) -> RobustnessConfig {
        let mut robustness = RobustnessConfig::default();
        if let Some(ms) = self.file.lock_timeout_ms {
            robustness.lock_timeout = Duration::from_millis(ms);
        }
        robustness
    }

    fn config_relative(&self, path: &str) -> NormalizedPath {
        let path = NormalizedPath::new(path);
        match &self.base {
            Some(base) => path.resolve_against(base),
            None => path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_no_config_requires_flags() {
        let source = PatchSource::load(None).unwrap();

        assert!(matches!(source.target(None), Err(CliError::User { .. })));
        assert!(matches!(source.markers(Some("a"), None), Err(CliError::User { .. })));
        assert!(matches!(source.replacement(None, None, false), Err(CliError::User { .. })));
    }

    #[test]
    fn test_flags_without_config() {
        let source = PatchSource::load(None).unwrap();

        let target = source.target(Some(Path::new("src/App.tsx"))).unwrap();
        let markers = source.markers(Some("<a>"), Some("</a>")).unwrap();
        let replacement = source.replacement(Some("x"), None, true).unwrap();

        assert_eq!(target.as_str(), "src/App.tsx");
        assert_eq!(markers.open(), "<a>");
        assert_eq!(replacement, Replacement::Body("x".into()));
    }

    #[test]
    fn test_config_paths_resolve_against_config_dir() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("block.txt"), "<a>new</a>").unwrap();
        let config = write_config(
            temp.path(),
            "patch.toml",
            r#"
target = "src/App.tsx"
open = "<a>"
close = "</a>"
replacement_file = "block.txt"
lock_timeout_ms = 250
"#,
        );

        let source = PatchSource::load(Some(&config)).unwrap();
        let base = NormalizedPath::new(dunce::canonicalize(temp.path()).unwrap());

        assert_eq!(source.target(None).unwrap(), base.join("src/App.tsx"));
        assert_eq!(
            source.replacement(None, None, false).unwrap(),
            Replacement::Literal("<a>new</a>".into())
        );
        assert_eq!(source.robustness().lock_timeout, Duration::from_millis(250));
    }

    #[test]
    fn test_flags_override_config() {
        let temp = TempDir::new().unwrap();
        let config = write_config(
            temp.path(),
            "patch.json",
            r#"{"target": "a.txt", "open": "[", "close": "]", "replacement": "[cfg]"}"#,
        );

        let source = PatchSource::load(Some(&config)).unwrap();

        assert_eq!(source.target(Some(Path::new("b.txt"))).unwrap().as_str(), "b.txt");
        assert_eq!(source.markers(Some("{"), None).unwrap().open(), "{");
        assert_eq!(source.markers(Some("{"), None).unwrap().close(), "]");
        assert_eq!(
            source.replacement(Some("[flag]"), None, false).unwrap(),
            Replacement::Literal("[flag]".into())
        );
    }

    #[test]
    fn test_body_from_yaml_config() {
        let temp = TempDir::new().unwrap();
        let config = write_config(
            temp.path(),
            "patch.yaml",
            "target: a.txt\nopen: '['\nclose: ']'\nreplacement: inner\nbody: true\n",
        );

        let source = PatchSource::load(Some(&config)).unwrap();

        assert_eq!(
            source.replacement(None, None, false).unwrap(),
            Replacement::Body("inner".into())
        );
    }

    #[test]
    fn test_both_replacement_sources_in_config_is_an_error() {
        let temp = TempDir::new().unwrap();
        let config = write_config(
            temp.path(),
            "patch.toml",
            "replacement = \"x\"\nreplacement_file = \"y.txt\"\n",
        );

        let source = PatchSource::load(Some(&config)).unwrap();

        assert!(matches!(source.replacement(None, None, false), Err(CliError::User { .. })));
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let temp = TempDir::new().unwrap();
        let config = write_config(temp.path(), "patch.toml", "taget = \"typo.txt\"\n");

        let result = PatchSource::load(Some(&config));

        assert!(matches!(
            result,
            Err(CliError::Fs(spanpatch_fs::Error::ConfigParse { .. }))
        ));
    }

    #[test]
    fn test_missing_config_is_not_found() {
        let temp = TempDir::new().unwrap();
        let result = PatchSource::load(Some(&temp.path().join("absent.toml")));

        assert!(matches!(
            result,
            Err(CliError::Fs(spanpatch_fs::Error::NotFound { .. }))
        ));
    }
}
