//! Path helpers for the Zellij plugin sandbox.
//!
//! Inside the sandbox `/host` is the cwd of the last focused terminal, or the
//! folder Zellij was started from. In practice that is usually the user's home.

use std::path::PathBuf;

/// Returns the directory Jiffy writes its trace files to.
///
/// ```
/// use jiffy::infrastructure::get_data_dir;
///
/// assert_eq!(get_data_dir().to_str(), Some("/host/.local/share/zellij/jiffy"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("jiffy")
}

/// Maps a `~`-prefixed path onto `/host`, leaving other paths alone.
///
/// Used for the `theme_file` option, which users naturally write relative to
/// their home directory.
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', "/host", 1)
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tilde_maps_to_host() {
        assert_eq!(expand_tilde("~/themes/jiffy.toml"), "/host/themes/jiffy.toml");
        assert_eq!(expand_tilde("~"), "/host");
    }

    #[test]
    fn other_paths_are_untouched() {
        assert_eq!(expand_tilde("/etc/jiffy.toml"), "/etc/jiffy.toml");
        assert_eq!(expand_tilde("relative/~/x"), "relative/~/x");
    }
}
