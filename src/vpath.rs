use crate::error::VaultError;

pub const ROOT_PATH: &str = "files";

/// Parent marker of the root entry. It is never itself an entry.
pub const ROOT_PARENT: &str = "";

/// Normalizes a virtual path: trims, converts backslashes, drops empty and `.`
/// segments. `..` is refused and the first segment must be the root.
pub fn normalize(path: &str) -> Result<String, VaultError> {
    let trimmed = path.trim();
    let replaced = trimmed.replace('\\', "/");

    let mut segments = Vec::new();
    for segment in replaced.split('/') {
        if segment.is_empty() || segment == "." {
            continue;
        }
        if segment == ".." {
            return Err(VaultError::InvalidPath(format!(
                "path traversal (.. component) not allowed: {trimmed}"
            )));
        }
        segments.push(segment);
    }

    match segments.first() {
        Some(&first) if first == ROOT_PATH => Ok(segments.join("/")),
        _ => Err(VaultError::InvalidPath(format!(
            "path must start with {ROOT_PATH}: {trimmed:?}"
        ))),
    }
}

pub fn join(parent: &str, name: &str) -> String {
    format!("{parent}/{name}")
}

pub fn parent_of(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) => &path[..idx],
        None => ROOT_PARENT,
    }
}

pub fn name_of(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

pub fn is_root(path: &str) -> bool {
    path == ROOT_PATH
}

pub fn is_within(path: &str, ancestor: &str) -> bool {
    path == ancestor || path.starts_with(&format!("{ancestor}/"))
}

pub fn rebase(path: &str, old_prefix: &str, new_prefix: &str) -> String {
    if path == old_prefix {
        return new_prefix.to_string();
    }
    match path.strip_prefix(&format!("{old_prefix}/")) {
        Some(rest) => join(new_prefix, rest),
        None => path.to_string(),
    }
}

pub fn validate_name(name: &str) -> Result<(), VaultError> {
    if name.trim().is_empty() {
        return Err(VaultError::InvalidName("name is empty".to_string()));
    }
    if name != name.trim() {
        return Err(VaultError::InvalidName(format!(
            "name has leading or trailing whitespace: {name:?}"
        )));
    }
    if name == "." || name == ".." {
        return Err(VaultError::InvalidName(format!("reserved name: {name}")));
    }
    if name.contains('/') || name.contains('\\') {
        return Err(VaultError::InvalidName(format!(
            "name contains a path separator: {name}"
        )));
    }
    if name.chars().any(char::is_control) {
        return Err(VaultError::InvalidName(format!(
            "name contains control characters: {name:?}"
        )));
    }
    Ok(())
}
