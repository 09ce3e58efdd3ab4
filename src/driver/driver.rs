use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, info};
use walkdir::WalkDir;

use crate::{
    config::AbiProfile,
    model::TypeModel,
    token::{Source, SourceMap},
    types::parse_sources,
};

type Res<T> = Result<T, String>;

/// Parse a header file, or every header under a directory, into one
/// type model. Quoted includes are loaded before the file including
/// them so definition-before-use ordering holds across files.
pub fn parse_headers(path: &str, profile: &AbiProfile) -> Res<TypeModel> {
    let files = collect_header_files(path)?;
    if files.is_empty() {
        return Err(format!("no header files found under '{}'", path));
    }

    let mut map = SourceMap::new();
    let mut seen = HashSet::new();

    for file in files {
        load_with_includes(&file, &mut map, &mut seen)?;
    }

    let sources: Vec<&Source> = map.ordered().collect();
    info!("parsing {} header file(s)", sources.len());

    parse_sources(sources, profile).map_err(|report| report.render_map(&map))
}

/// Collect .h files under a path. A file path is taken as-is, a
/// directory is walked in filename order for deterministic results.
fn collect_header_files(path: &str) -> Res<Vec<PathBuf>> {
    let root = Path::new(path);

    if root.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }

    if !root.is_dir() {
        return Err(format!("no such file or directory: '{}'", path));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|err| format!("failed to read directory: {}", err))?;

        if entry.file_type().is_file()
            && entry.path().extension().is_some_and(|ext| ext == "h")
        {
            files.push(entry.path().to_path_buf());
        }
    }

    Ok(files)
}

/// Load a header and, depth-first, every header it includes with
/// `#include "..."`. Each file is loaded once no matter how often it is
/// included. Preprocessor lines are blanked (not removed) so token
/// positions keep pointing at the real file.
fn load_with_includes(
    path: &Path,
    map: &mut SourceMap,
    seen: &mut HashSet<PathBuf>,
) -> Res<()> {
    let canon = fs::canonicalize(path)
        .map_err(|err| format!("failed to read '{}': {}", path.display(), err))?;

    if !seen.insert(canon) {
        return Ok(());
    }

    let content = fs::read_to_string(path)
        .map_err(|err| format!("failed to read '{}': {}", path.display(), err))?;

    let dir = path.parent().unwrap_or(Path::new("."));

    // Includes are parsed before the file that includes them
    for include in quoted_includes(&content) {
        let target = dir.join(&include);
        if target.exists() {
            load_with_includes(&target, map, seen)?;
        } else {
            debug!("skipping unresolved include '{}'", include);
        }
    }

    let cleaned = strip_preprocessor_lines(&content);
    map.add(Source::new(
        path.display().to_string(),
        cleaned.into_bytes(),
    ));

    Ok(())
}

/// Filenames of all `#include "..."` directives, in order.
fn quoted_includes(content: &str) -> Vec<String> {
    let mut includes = Vec::new();

    for line in content.lines() {
        let line = line.trim_start();
        let Some(rest) = line.strip_prefix("#include") else {
            continue;
        };

        let rest = rest.trim_start();
        if let Some(rest) = rest.strip_prefix('"') {
            if let Some(end) = rest.find('"') {
                includes.push(rest[..end].to_string());
            }
        }
        // Angle-bracket includes name system headers the registry knows
        // nothing about, they are stripped without being followed
    }

    includes
}

/// Blank out preprocessor directive lines, preserving line numbering.
fn strip_preprocessor_lines(content: &str) -> String {
    content
        .lines()
        .map(|line| if line.trim_start().starts_with('#') { "" } else { line })
        .collect::<Vec<_>>()
        .join("\n")
}
