use std::path::Path;

use anyhow::anyhow;
use config::{Config, File};
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    /// Resolve the bare word under the cursor when no selection and no
    /// line reference produced a target. Off by default: the word walker
    /// has no notion of context and picks up operands of ordinary
    /// statements.
    pub word_fallback: bool,
    /// Suffix every status message with the live `:` count.
    pub status_location_count: bool,
    /// File extensions the jump command is offered for.
    pub supported_extensions: Vec<String>,
}

impl Settings {
    pub fn new(root_dir: &Path) -> anyhow::Result<Settings> {
        let expanded = shellexpand::tilde("~/.config/urqjump/settings");
        let settings = Config::builder()
            .add_source(File::with_name(&expanded).required(false))
            .add_source(
                File::with_name(&format!(
                    "{}/.urqjump",
                    root_dir
                        .to_str()
                        .ok_or(anyhow!("Can't convert root_dir to str"))?
                ))
                .required(false),
            )
            .set_default("word_fallback", false)?
            .set_default("status_location_count", true)?
            .set_default(
                "supported_extensions",
                vec!["qst".to_string(), "txt".to_string()],
            )?
            .build()
            .map_err(|err| anyhow!("Build err: {err}"))?;

        let settings = settings.try_deserialize::<Settings>()?;

        anyhow::Ok(settings)
    }

    /// File-extension gating for the command, case-insensitive.
    pub fn supports_path(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                let ext = ext.to_lowercase();
                self.supported_extensions
                    .iter()
                    .any(|supported| supported.to_lowercase() == ext)
            })
            .unwrap_or(false)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            word_fallback: false,
            status_location_count: true,
            supported_extensions: vec!["qst".to_string(), "txt".to_string()],
        }
    }
}
