use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Resolve a container member name against `base`, rejecting names that
/// would land outside of it.
pub fn sanitize_member_path<B: AsRef<Path>>(member: &str, base: B) -> Result<PathBuf> {
    let base = base.as_ref();
    let slip = |resolved| Error::ZipSlip {
        member: member.to_string(),
        resolved,
    };

    // A leading `..` pops nothing in normalize_path, so count depth first
    let mut depth = 0usize;
    for component in Path::new(member).components() {
        match component {
            Component::Normal(_) => depth += 1,
            Component::ParentDir if depth == 0 => return Err(slip(PathBuf::from(member))),
            Component::ParentDir => depth -= 1,
            _ => {}
        }
    }

    let normalized = normalize_path(Path::new(member));

    // Reject absolute paths (zip-slip protection)
    if normalized.is_absolute() || normalized.as_os_str().is_empty() {
        return Err(slip(normalized));
    }

    let resolved = normalize_path(&base.join(normalized));
    if !resolved.starts_with(normalize_path(base)) {
        return Err(slip(resolved));
    }

    Ok(resolved)
}

/// Normalize path separators and resolve relative components.
fn normalize_path(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();

    for component in path.components() {
        match component {
            Component::ParentDir => {
                result.pop();
            }
            Component::Normal(part) => result.push(part),
            Component::RootDir => result.push("/"),
            Component::Prefix(prefix) => result.push(prefix.as_os_str()),
            Component::CurDir => {}
        }
    }

    result
}
