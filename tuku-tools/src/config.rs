use std::path::{Path, PathBuf};

use tuku::{error::Error, SiteConfig};

/// The content of `Tuku.toml` .
///
/// ```toml
/// site_root = "dist"
///
/// [site]
/// locale_path = "locales/{lang}.json"
/// attractions_url = "attractions.json"
/// ```
#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// The directory the site is served from.
    pub site_root: PathBuf,
    /// The same config as the site's own `tuku-config` .
    pub site: SiteConfig,
}

impl ToolConfig {
    pub fn from_toml(path: &str, src: &str) -> Result<Self, Error> {
        toml::from_str(src).map_err(|err| Error::Parse {
            url: path.to_string(),
            msg: err.to_string(),
        })
    }

    /// Read `path` ; a missing file gives the defaults.
    pub fn load(path: &Path) -> Result<Self, Error> {
        match std::fs::read_to_string(path) {
            Ok(src) => Self::from_toml(&path.to_string_lossy(), &src),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(err) => Err(read_error(path, err)),
        }
    }

    /// The file path of a site resource URL.
    pub fn resource_path(&self, url: &str) -> PathBuf {
        self.site_root.join(url.trim_start_matches('/'))
    }
}

pub(crate) fn read_error(path: &Path, err: std::io::Error) -> Error {
    Error::ResourceLoad {
        url: path.display().to_string(),
        msg: err.to_string(),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn site_section() {
        let config = ToolConfig::from_toml(
            "Tuku.toml",
            "site_root = \"dist\"\n[site]\nlocale_path = \"i18n/{lang}.json\"\n",
        )
        .unwrap();
        assert_eq!(
            config.resource_path(&config.site.locale_url("en")),
            Path::new("dist/i18n/en.json")
        );
        assert_eq!(config.site.attractions_url, "attractions.json");
        assert!(ToolConfig::from_toml("Tuku.toml", "site_root = 1").is_err());
    }
}
