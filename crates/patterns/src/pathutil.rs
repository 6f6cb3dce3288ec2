//! Forward-slash path helpers.
//!
//! Patterns, roots and matched paths always use `/` as the separator, no
//! matter the host platform. These helpers normalize separators and resolve
//! `.`/`..` lexically, without touching the filesystem.

use std::borrow::Cow;
use std::io;
use std::path::Path;

/// Replaces platform separators with `/`.
#[must_use]
pub fn normsep(path: &str) -> Cow<'_, str> {
    if std::path::MAIN_SEPARATOR != '/' && path.contains(std::path::MAIN_SEPARATOR) {
        Cow::Owned(path.replace(std::path::MAIN_SEPARATOR, "/"))
    } else {
        Cow::Borrowed(path)
    }
}

/// Collapses redundant separators and `.`/`..` components.
///
/// Leading `..` components of relative paths are kept; `..` directly below
/// the root of an absolute path is dropped. An empty result is `"."`.
#[must_use]
pub fn normpath(path: &str) -> String {
    let path = normsep(path);
    if path.is_empty() {
        return ".".to_owned();
    }
    let absolute = path.starts_with('/');
    let mut parts: Vec<&str> = Vec::new();
    for part in path.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                if parts.last().is_some_and(|last| *last != "..") {
                    parts.pop();
                } else if !absolute {
                    parts.push("..");
                }
            }
            _ => parts.push(part),
        }
    }
    let joined = parts.join("/");
    if absolute {
        format!("/{joined}")
    } else if joined.is_empty() {
        ".".to_owned()
    } else {
        joined
    }
}

/// Joins `path` onto `base`; an absolute `path` replaces `base`.
#[must_use]
pub fn join(base: &str, path: &str) -> String {
    let base = normsep(base);
    let path = normsep(path);
    if path.starts_with('/') || base.is_empty() {
        path.into_owned()
    } else if base.ends_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}

/// Returns everything before the last separator, without trailing slashes.
#[must_use]
pub fn dirname(path: &str) -> String {
    let path = normsep(path);
    let head = path.rfind('/').map_or("", |index| &path[..=index]);
    if head.chars().all(|c| c == '/') {
        head.to_owned()
    } else {
        head.trim_end_matches('/').to_owned()
    }
}

/// Resolves `path` against the current directory and normalizes it.
pub fn abspath(path: &str) -> io::Result<String> {
    let path = normsep(path);
    if is_absolute(&path) {
        return Ok(normpath(&path));
    }
    let cwd = std::env::current_dir()?;
    let cwd = cwd.to_string_lossy();
    Ok(normpath(&join(&cwd, &path)))
}

/// Returns `true` for `/`-rooted paths and host-absolute paths.
#[must_use]
pub fn is_absolute(path: &str) -> bool {
    path.starts_with('/') || Path::new(path).is_absolute()
}
