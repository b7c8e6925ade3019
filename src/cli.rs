// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use crate::config::SceneProfile;

pub const DEFAULT_MODEL: &str = "assets/single-paddle.glb";
pub const DEFAULT_TEXTURE: &str = "assets/textures/tennis-court.jpeg";

#[derive(Parser, Debug, Clone)]
#[command(name = "paddletopia")]
#[command(about = "Paddles rain down on a tennis court", long_about = None)]
pub struct Cli {
    /// TOML scene profile; built-in defaults when omitted
    #[arg(long, value_name = "PATH")]
    pub profile: Option<PathBuf>,

    /// Paddle model (glTF or GLB)
    #[arg(long, value_name = "PATH", default_value = DEFAULT_MODEL)]
    pub model: PathBuf,

    /// Court texture image
    #[arg(long, value_name = "PATH", default_value = DEFAULT_TEXTURE)]
    pub texture: PathBuf,

    /// Hide the title and paddle counter
    #[arg(long = "no-ui", default_value = "false")]
    pub no_ui: bool,

    /// Print the effective profile as TOML and exit
    #[arg(long)]
    pub dump_profile: bool,
}

impl Cli {
    /// Profile from `--profile`, or the defaults
    pub fn load_profile(&self) -> anyhow::Result<SceneProfile> {
        match &self.profile {
            Some(path) => SceneProfile::load(path)
                .with_context(|| format!("Invalid scene profile {}", path.display())),
            None => Ok(SceneProfile::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_bundled_assets() {
        let cli = Cli::try_parse_from(["paddletopia"]).unwrap();
        assert_eq!(cli.model, PathBuf::from(DEFAULT_MODEL));
        assert_eq!(cli.texture, PathBuf::from(DEFAULT_TEXTURE));
        assert!(cli.profile.is_none());
        assert!(!cli.no_ui);
        assert!(!cli.dump_profile);
        assert_eq!(cli.load_profile().unwrap(), SceneProfile::default());
    }

    #[test]
    fn parses_every_flag() {
        let cli = Cli::try_parse_from([
            "paddletopia",
            "--profile",
            "calm.toml",
            "--model",
            "m.glb",
            "--texture",
            "t.png",
            "--no-ui",
            "--dump-profile",
        ])
        .unwrap();
        assert_eq!(cli.profile, Some(PathBuf::from("calm.toml")));
        assert_eq!(cli.model, PathBuf::from("m.glb"));
        assert!(cli.no_ui);
        assert!(cli.dump_profile);
    }

    #[test]
    fn missing_profile_file_is_reported() {
        let cli = Cli::try_parse_from(["paddletopia", "--profile", "no/such/profile.toml"]).unwrap();
        let err = cli.load_profile().unwrap_err();
        assert!(format!("{:#}", err).contains("no/such/profile.toml"));
    }
}
