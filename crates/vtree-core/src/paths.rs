//! Virtual tree conventions.
//!
//! Folder names of the browsing tree plus pure helpers for turning chains
//! and filesystem locations into path segments.

use std::path::{Component, Path, PathBuf};

// ---------------------------------------------------------------------------
// Audio
// ---------------------------------------------------------------------------

pub const AUDIO: &str = "Audio";
pub const ALL_AUDIO: &str = "All Audio";
pub const ARTISTS: &str = "Artists";
pub const ALL_SONGS: &str = "All Songs";
pub const ALL_FULL_NAME: &str = "All - full name";
pub const ALBUMS: &str = "Albums";
pub const GENRES: &str = "Genres";
pub const YEAR: &str = "Year";
pub const COMPOSERS: &str = "Composers";

// ---------------------------------------------------------------------------
// Pictures
// ---------------------------------------------------------------------------

pub const PICTURES: &str = "Pictures";
pub const DATE: &str = "Date";
pub const PLACES: &str = "Places";

// ---------------------------------------------------------------------------
// Video
// ---------------------------------------------------------------------------

pub const VIDEO: &str = "Video";
pub const ALL_VIDEO: &str = "All Video";

// ---------------------------------------------------------------------------
// Online services
// ---------------------------------------------------------------------------

pub const ONLINE_SERVICES: &str = "Online Services";
pub const APPLE_TRAILERS: &str = "Apple Trailers";
pub const ALL_TRAILERS: &str = "All Trailers";
pub const RELEASE_DATE: &str = "Release Date";
pub const POST_DATE: &str = "Post Date";

// ---------------------------------------------------------------------------
// Shared
// ---------------------------------------------------------------------------

pub const DIRECTORIES: &str = "Directories";

/// Join a chain into `/a/b/c`. A `/` or `\` inside a segment is escaped
/// with a backslash so it cannot open an extra level. Hosts that join
/// chains with a plain `/` split such a segment (`AC/DC`) into two levels
/// instead.
pub fn join_chain<S: AsRef<str>>(chain: &[S]) -> String {
    let mut out = String::new();
    for segment in chain {
        out.push('/');
        for c in segment.as_ref().chars() {
            if c == '/' || c == '\\' {
                out.push('\\');
            }
            out.push(c);
        }
    }
    if out.is_empty() {
        out.push('/');
    }
    out
}

/// Directory of `location` relative to `root`, as path segments.
///
/// Empty when the file sits directly in `root`. Locations outside `root`
/// yield leading `..` segments, the same as a lexical relpath. Relative
/// paths are resolved against the working directory first, so a relative
/// location still compares correctly with an absolute root.
pub fn relative_dir(location: &Path, root: &Path) -> Vec<String> {
    let dir = location.parent().unwrap_or_else(|| Path::new(""));
    let dir = normalize(&absolute(dir));
    let root = normalize(&absolute(root));

    let common = dir
        .iter()
        .zip(root.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut segments: Vec<String> = std::iter::repeat("..".to_string())
        .take(root.len() - common)
        .collect();
    segments.extend(dir[common..].iter().cloned());
    segments
}

/// Anchor a relative path at the working directory. Left as is when the
/// working directory is unavailable.
fn absolute(path: &Path) -> PathBuf {
    if path.has_root() {
        return path.to_path_buf();
    }
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(_) => path.to_path_buf(),
    }
}

fn normalize(path: &Path) -> Vec<String> {
    let mut parts: Vec<String> = Vec::new();
    let mut root_len = 0;
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last().map(String::as_str) {
                None | Some("..") => parts.push("..".into()),
                // `/..` is `/`
                Some(_) if parts.len() == root_len => {}
                Some(_) => {
                    parts.pop();
                }
            },
            Component::RootDir | Component::Prefix(_) => {
                parts.push(component.as_os_str().to_string_lossy().into_owned());
                root_len = parts.len();
            }
            Component::Normal(s) => parts.push(s.to_string_lossy().into_owned()),
        }
    }
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_chain_escapes_separators() {
        assert_eq!(join_chain(&["Audio", "Artists", "AC/DC"]), "/Audio/Artists/AC\\/DC");
        assert_eq!(join_chain::<&str>(&[]), "/");
    }

    #[test]
    fn relative_dir_directly_in_root_is_empty() {
        assert!(relative_dir(Path::new("/lib/x.mkv"), Path::new("/lib")).is_empty());
        assert!(relative_dir(Path::new("/lib/x.mkv"), Path::new("/lib/")).is_empty());
    }

    #[test]
    fn relative_dir_nested() {
        assert_eq!(
            relative_dir(Path::new("/lib/movies/2024/x.mkv"), Path::new("/lib")),
            vec!["movies", "2024"]
        );
    }

    #[test]
    fn relative_dir_outside_root() {
        assert_eq!(
            relative_dir(Path::new("/other/x.mkv"), Path::new("/lib/media")),
            vec!["..", "..", "other"]
        );
    }

    #[test]
    fn relative_dir_resolves_relative_location() {
        let cwd = std::env::current_dir().unwrap();
        assert!(relative_dir(Path::new("x.mkv"), &cwd).is_empty());
        assert_eq!(relative_dir(Path::new("movies/x.mkv"), &cwd), vec!["movies"]);
        assert_eq!(
            relative_dir(Path::new("lib/movies/x.mkv"), Path::new("lib")),
            vec!["movies"]
        );
    }

    #[test]
    fn relative_dir_ignores_dot_components() {
        assert_eq!(
            relative_dir(Path::new("/lib/./a/../b/x.jpg"), Path::new("/lib")),
            vec!["b"]
        );
    }
}
