//! Path algebra over forward-slash path strings
//!
//! All paths handed to the generator are normalized once with [`normalize`]
//! and afterwards treated as plain strings. Comparisons follow a single
//! process-wide case policy, see [`CASE_INSENSITIVE_FS`].

use std::path::{Component, Path};

/// Separator used by every normalized path
pub const SEPARATOR: char = '/';

/// Whether path comparisons ignore case. Windows and macOS volumes are
/// case-insensitive by default, everything else is treated as case-sensitive.
pub const CASE_INSENSITIVE_FS: bool = cfg!(any(windows, target_os = "macos"));

/// Convert separators to `/`, collapse duplicate separators and drop a trailing separator.
///
/// A leading `//` is a UNC prefix (`\\server\share`) and is kept as is.
pub fn normalize(path: &str) -> String {
    let mut result = String::with_capacity(path.len());
    let mut prev_char = ' ';
    for ch in path.chars() {
        let ch = if ch == '\\' { SEPARATOR } else { ch };
        if ch == SEPARATOR && prev_char == SEPARATOR && result.len() != 1 {
            continue;
        }
        result.push(ch);
        prev_char = ch;
    }
    // "/" alone is a root, keep it
    if result.len() > 1 && result.ends_with(SEPARATOR) {
        result.pop();
    }
    result
}

/// Everything before the last separator, or an empty string if there is none
pub fn parent_folder(path: &str) -> &str {
    match path.rfind(SEPARATOR) {
        Some(index) => &path[..index],
        None => "",
    }
}

/// Everything after the last separator
pub fn file_name(path: &str) -> &str {
    match path.rfind(SEPARATOR) {
        Some(index) => &path[index + 1..],
        None => path,
    }
}

/// Compare two normalized paths using the process case policy
pub fn paths_equal(a: &str, b: &str) -> bool {
    if CASE_INSENSITIVE_FS {
        a.len() == b.len() && a.to_lowercase() == b.to_lowercase()
    } else {
        a == b
    }
}

/// True iff `candidate` is `root` itself or lies somewhere below it
pub fn is_nested(root: &str, candidate: &str) -> bool {
    let root = normalize(root);
    let candidate = normalize(candidate);

    if paths_equal(&root, &candidate) {
        return true;
    }
    if candidate.len() <= root.len() || !candidate.is_char_boundary(root.len()) {
        return false;
    }

    let (prefix, rest) = candidate.split_at(root.len());
    // a root of "/" already ends with the separator
    let separated = root.ends_with(SEPARATOR) || rest.starts_with(SEPARATOR);
    separated && paths_equal(prefix, &root)
}

/// Deepest folder containing every file, provided it lies inside `source_tree`.
///
/// Returns `None` when `files` is empty, when the files share no common
/// ancestor, or when the common ancestor falls outside `source_tree`. A folder
/// that is too shallow would make the project swallow unrelated sources, so no
/// partial answer is given.
pub fn infer_common_root<I, S>(files: I, source_tree: &str) -> Option<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    common_ancestor(files).filter(|root| is_nested(source_tree, root))
}

/// Deepest folder containing every file, wherever it lies.
///
/// Returns `None` when `files` is empty or the files share no named ancestor.
pub fn common_ancestor<I, S>(files: I) -> Option<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut files = files.into_iter();
    let first = normalize(files.next()?.as_ref());
    let mut candidate = parent_folder(&first).to_string();

    for file in files {
        let file = normalize(file.as_ref());
        let mut current = parent_folder(&file);
        let mut root = candidate.as_str();

        while !paths_equal(root, current) {
            if root.is_empty() || current.is_empty() {
                return None;
            }
            if root.len() > current.len() {
                root = parent_folder(root);
            } else if current.len() > root.len() {
                current = parent_folder(current);
            } else {
                root = parent_folder(root);
                current = parent_folder(current);
            }
        }
        candidate = root.to_string();
    }

    if candidate.is_empty() {
        return None;
    }
    Some(candidate)
}

/// Whether both absolute paths live on the same drive or volume
pub fn same_volume(a: &str, b: &str) -> bool {
    let first_a = Path::new(a).components().next();
    let first_b = Path::new(b).components().next();
    match (first_a, first_b) {
        (Some(Component::Prefix(pa)), Some(Component::Prefix(pb))) => {
            pa.as_os_str().to_string_lossy().to_lowercase()
                == pb.as_os_str().to_string_lossy().to_lowercase()
        }
        (Some(Component::RootDir), Some(Component::RootDir)) => true,
        _ => false,
    }
}

/// Express `path` relative to `base_dir` when both are absolute and on one volume.
///
/// Returns `None` when no relative form exists, the caller keeps the absolute path.
pub fn relative_path(base_dir: &str, path: &str) -> Option<String> {
    let base = Path::new(base_dir);
    let target = Path::new(path);
    if !base.is_absolute() || !target.is_absolute() || !same_volume(base_dir, path) {
        return None;
    }
    if is_nested(base_dir, path) && CASE_INSENSITIVE_FS {
        // pathdiff compares components case-sensitively
        let base_len = normalize(base_dir).len();
        let path = normalize(path);
        return Some(path[base_len..].trim_start_matches(SEPARATOR).to_string());
    }
    let relative = pathdiff::diff_paths(target, base)?;
    Some(normalize(&relative.to_string_lossy()))
}

/// Join a relative path onto a relative base, resolving `.` and `..` lexically
pub fn lexical_join(base: &str, relative: &str) -> String {
    let mut segments: Vec<&str> = base
        .split(SEPARATOR)
        .filter(|s| !s.is_empty() && *s != ".")
        .collect();

    for segment in relative.split(SEPARATOR) {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.last().is_some_and(|last| *last != "..") {
                    segments.pop();
                } else {
                    segments.push("..");
                }
            }
            other => segments.push(other),
        }
    }
    segments.join("/")
}
