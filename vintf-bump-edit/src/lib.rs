//! Text-splicing engine for compatibility-matrix bumps.
//!
//! Responsibilities:
//! - Insert a block of lines above a unique anchor line (`insert_above`).
//! - Rewrite the matrix `level` attribute when cloning a matrix file.
//! - Splice the matrix module lists in `Android.bp` / `Android.mk`.
//!
//! Every transformation is a pure function (content in, content out) so it
//! can be tested without touching the file system; [`insert_above_in_file`]
//! is the only entry point that performs I/O.

mod error;

pub use error::{EditError, EditResult};

use anyhow::Context;
use camino::Utf8Path;
use fs_err as fs;

/// Insert `block` on its own line(s) directly above the unique line equal to
/// `anchor`.
///
/// The anchor must match a whole line exactly (leading whitespace included).
/// Fails with [`EditError::AnchorNotFoundOrAmbiguous`] when it matches zero
/// or multiple lines; the caller's content is left untouched in that case.
pub fn insert_above(contents: &str, anchor: &str, block: &str) -> EditResult<String> {
    let matches = contents.lines().filter(|line| *line == anchor).count();
    if matches != 1 {
        return Err(EditError::AnchorNotFoundOrAmbiguous {
            anchor: anchor.to_string(),
            matches,
        });
    }

    let mut out = String::with_capacity(contents.len() + block.len() + 1);
    for line in contents.split_inclusive('\n') {
        if line_text(line) == anchor {
            out.push_str(block);
            if !block.ends_with('\n') {
                out.push('\n');
            }
        }
        out.push_str(line);
    }
    Ok(out)
}

/// Read `path`, apply [`insert_above`], and rewrite the whole file.
///
/// Nothing is written when the anchor check fails.
pub fn insert_above_in_file(path: &Utf8Path, anchor: &str, block: &str) -> anyhow::Result<()> {
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path))?;
    let updated = insert_above(&contents, anchor, block).with_context(|| format!("splice {}", path))?;
    fs::write(path, updated).with_context(|| format!("write {}", path))?;
    Ok(())
}

/// Replace every `level="<current>"` attribute with `level="<next>"`.
pub fn replace_level_attribute(contents: &str, current_level: &str, next_level: &str) -> String {
    contents.replace(
        &format!("level=\"{current_level}\""),
        &format!("level=\"{next_level}\""),
    )
}

/// Render the module stanza appended to `Android.bp` for a new matrix.
pub fn matrix_module_block(module_name: &str) -> String {
    format!("vintf_compatibility_matrix {{\n    name: \"{module_name}\",\n}}\n")
}

/// Splice the two matrix lists in `Android.bp`:
///
/// - insert the current module into `SYSTEM_MATRIX_DEPS` (directly above the
///   device module entry);
/// - swap the current module for the next one in the phony module's nested
///   `product_variables` list.
///
/// Both edits are guarded by a membership test, so re-running on an
/// already-bumped file is byte-identical.
pub fn splice_bp_matrix_lists(
    contents: &str,
    device_module: &str,
    current_module: &str,
    next_module: &str,
) -> String {
    let deps_device = format!("    \"{device_module}\",");
    let deps_current = format!("    \"{current_module}\",");
    let nested_current = format!("                \"{current_module}\",");
    let nested_next = format!("                \"{next_module}\",");

    let add_dep = !contents.lines().any(|line| line == deps_current);
    let swap_nested = !contents.lines().any(|line| line == nested_next);

    let mut out = String::with_capacity(contents.len() + 128);
    for line in contents.split_inclusive('\n') {
        let text = line_text(line);
        if add_dep && text == deps_device {
            out.push_str(&deps_current);
            out.push('\n');
        }
        if swap_nested && text == nested_current {
            out.push_str(&nested_next);
            out.push('\n');
        } else {
            out.push_str(line);
        }
    }
    out
}

/// Splice the matrix lists in the legacy `Android.mk` (backslash-continued
/// entries). Returns the input unchanged when the next module is already
/// listed.
pub fn splice_mk_matrix_lists(
    contents: &str,
    device_module: &str,
    current_module: &str,
    next_module: &str,
) -> String {
    if contents.contains(next_module) {
        return contents.to_string();
    }

    let device_line = format!("    {device_module} \\");
    let current_line = format!("    {current_module} \\");
    let next_line = format!("    {next_module} \\");

    let mut out = String::with_capacity(contents.len() + 128);
    for line in contents.split_inclusive('\n') {
        let text = line_text(line);
        if text == device_line {
            out.push_str(&current_line);
            out.push('\n');
        }
        if text.contains(current_module) {
            out.push_str(&next_line);
            out.push('\n');
        } else {
            out.push_str(line);
        }
    }
    out
}

/// A line as produced by `split_inclusive('\n')`, stripped of its terminator.
fn line_text(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}
