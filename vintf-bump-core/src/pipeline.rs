//! The five-step bump pipeline.
//!
//! Steps run strictly in order and the first failure aborts the run. There is
//! no rollback: every file edit is guarded by a membership test, so a re-run
//! after a manual fix picks up where the failed run left off.

use crate::ports::CommandRunner;
use crate::settings::BumpSettings;
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use tracing::{debug, info};
use vintf_bump_edit as edit;

/// Soong module that anchors the device matrix in both dependency lists.
const DEVICE_MODULE_NAME: &str = "framework_compatibility_matrix.device.xml";

/// Orchestrates one bump run against the tree rooted at
/// [`BumpSettings::build_top`].
pub struct Bump<R> {
    settings: BumpSettings,
    runner: R,
}

impl<R: CommandRunner> Bump<R> {
    pub fn new(settings: BumpSettings, runner: R) -> Self {
        Self { settings, runner }
    }

    /// Perform all five steps in order, stopping at the first failure.
    pub fn run(&self) -> anyhow::Result<()> {
        self.bump_kernel_configs().context("bump kernel configs")?;
        self.copy_matrix().context("copy matrix")?;
        self.edit_android_bp().context("edit Android.bp")?;
        self.edit_android_mk().context("edit Android.mk")?;
        self.bump_libvintf().context("bump libvintf")?;
        Ok(())
    }

    /// Step 1: hand the letter pair to the sibling kernel-config bump tool.
    pub fn bump_kernel_configs(&self) -> anyhow::Result<()> {
        let tool = self.settings.build_top.join("kernel/configs/tools/bump.py");
        self.runner.run(
            &tool,
            &[
                &self.settings.current.letter_lower(),
                &self.settings.next.letter_lower(),
            ],
        )
    }

    /// Step 2: clone the current matrix, rewriting its `level` attribute.
    pub fn copy_matrix(&self) -> anyhow::Result<()> {
        let current_xml = self.matrix_xml(&self.settings.current);
        let next_xml = self.matrix_xml(&self.settings.next);

        let contents =
            fs::read_to_string(&current_xml).with_context(|| format!("read {}", current_xml))?;
        let next = edit::replace_level_attribute(
            &contents,
            self.settings.current.level(),
            self.settings.next.level(),
        );
        fs::write(&next_xml, next).with_context(|| format!("write {}", next_xml))?;
        info!("wrote {}", next_xml);
        Ok(())
    }

    /// Step 3: register the next matrix module in `Android.bp`.
    ///
    /// Appends the module stanza when absent, lets `bpmodify` fill in stem,
    /// srcs and kernel_configs, then splices the two matrix lists.
    pub fn edit_android_bp(&self) -> anyhow::Result<()> {
        let android_bp = self.matrices_dir().join("Android.bp");
        let next_module = self.settings.next.module_name();
        let next_matrix_file = self.settings.next.matrix_file_name();

        let contents =
            fs::read_to_string(&android_bp).with_context(|| format!("read {}", android_bp))?;
        if !contents.contains(&next_module) {
            let mut appended = contents;
            appended.push('\n');
            appended.push_str(&edit::matrix_module_block(&next_module));
            fs::write(&android_bp, appended).with_context(|| format!("write {}", android_bp))?;
        }

        let kernel_configs = self.scan_kernel_config_names()?;
        debug!("kernel config modules: {:?}", kernel_configs);

        let bpmodify = Utf8Path::new("bpmodify");
        self.runner.run(
            bpmodify,
            &[
                "-w",
                "-m",
                &next_module,
                "-property",
                "stem",
                "-str",
                &next_matrix_file,
                android_bp.as_str(),
            ],
        )?;
        self.runner.run(
            bpmodify,
            &[
                "-w",
                "-m",
                &next_module,
                "-property",
                "srcs",
                "-a",
                &next_matrix_file,
                android_bp.as_str(),
            ],
        )?;
        self.runner.run(
            bpmodify,
            &[
                "-w",
                "-m",
                &next_module,
                "-property",
                "kernel_configs",
                "-a",
                &kernel_configs.join(" "),
                android_bp.as_str(),
            ],
        )?;

        // bpmodify rewrote the file on disk, so re-read before splicing the
        // SYSTEM_MATRIX_DEPS list and the phony module's nested entry.
        let contents =
            fs::read_to_string(&android_bp).with_context(|| format!("read {}", android_bp))?;
        let spliced = edit::splice_bp_matrix_lists(
            &contents,
            DEVICE_MODULE_NAME,
            &self.settings.current.module_name(),
            &next_module,
        );
        if spliced == contents {
            debug!("{} matrix lists already up to date", android_bp);
        } else {
            fs::write(&android_bp, spliced).with_context(|| format!("write {}", android_bp))?;
        }
        Ok(())
    }

    /// Step 4: mirror the list edits into the legacy `Android.mk`.
    ///
    /// The whole step is skipped when the next module is already listed, so
    /// re-runs are byte-identical.
    pub fn edit_android_mk(&self) -> anyhow::Result<()> {
        let android_mk = self.matrices_dir().join("Android.mk");
        let contents =
            fs::read_to_string(&android_mk).with_context(|| format!("read {}", android_mk))?;

        let spliced = edit::splice_mk_matrix_lists(
            &contents,
            DEVICE_MODULE_NAME,
            &self.settings.current.module_name(),
            &self.settings.next.module_name(),
        );
        if spliced == contents {
            info!("{} already lists {}", android_mk, self.settings.next.module_name());
            return Ok(());
        }
        fs::write(&android_mk, spliced).with_context(|| format!("write {}", android_mk))?;
        Ok(())
    }

    /// Step 5: register the current release in the libvintf sources.
    ///
    /// Needs the public platform version; without one the step only reports a
    /// skip. Also skipped when `Level.h` already carries the enumerator.
    pub fn bump_libvintf(&self) -> anyhow::Result<()> {
        let Some(version) = self.settings.current.platform_version() else {
            info!("no platform version supplied; skipping libvintf update");
            return Ok(());
        };
        let letter = self.settings.current.letter_upper();
        let level = self.settings.current.level();

        let level_h = self
            .settings
            .build_top
            .join("system/libvintf/include/vintf/Level.h");
        let enumerator = format!("{letter} = {level}");
        let level_h_contents =
            fs::read_to_string(&level_h).with_context(|| format!("read {}", level_h))?;
        if level_h_contents.contains(&enumerator) {
            info!("libvintf already knows level {}", level);
            return Ok(());
        }

        info!("adding API level {} to libvintf", level);
        edit::insert_above_in_file(
            &self
                .settings
                .build_top
                .join("system/libvintf/analyze_matrix/analyze_matrix.cpp"),
            "        case Level::UNSPECIFIED:",
            &format!(
                "        case Level::{letter}:\n            return \"Android {version} ({letter})\";"
            ),
        )?;
        edit::insert_above_in_file(
            &level_h,
            "    // To add new values:",
            &format!("    {letter} = {level},"),
        )?;
        edit::insert_above_in_file(
            &level_h,
            "        Level::UNSPECIFIED,",
            &format!("        Level::{letter},"),
        )?;
        edit::insert_above_in_file(
            &self.settings.build_top.join("system/libvintf/RuntimeInfo.cpp"),
            "            // Add more levels above this line.",
            &format!(
                "            case {version}: {{\n                ret = Level::{letter};\n            }} break;"
            ),
        )?;
        Ok(())
    }

    fn matrices_dir(&self) -> Utf8PathBuf {
        self.settings
            .build_top
            .join("hardware/interfaces/compatibility_matrices")
    }

    fn matrix_xml(&self, id: &crate::identity::VersionIdentity) -> Utf8PathBuf {
        self.matrices_dir().join(id.matrix_file_name())
    }

    /// Collect module names from the next release's kernel-config fragments,
    /// sorted for a deterministic `bpmodify` argument.
    fn scan_kernel_config_names(&self) -> anyhow::Result<Vec<String>> {
        let dir = self
            .settings
            .build_top
            .join("kernel/configs")
            .join(self.settings.next.letter_lower());
        let mut names = Vec::new();
        collect_kernel_config_names(&dir, &mut names)?;
        names.sort();
        Ok(names)
    }
}

fn collect_kernel_config_names(dir: &Utf8Path, names: &mut Vec<String>) -> anyhow::Result<()> {
    for entry in dir.read_dir_utf8().with_context(|| format!("scan {}", dir))? {
        let entry = entry.with_context(|| format!("scan {}", dir))?;
        if entry.file_type()?.is_dir() {
            collect_kernel_config_names(entry.path(), names)?;
            continue;
        }
        let contents =
            fs::read_to_string(entry.path()).with_context(|| format!("read {}", entry.path()))?;
        for line in contents.lines().filter(|line| line.contains("name:")) {
            if let Some(name) = quoted_value(line) {
                names.push(name.to_string());
            }
        }
    }
    Ok(())
}

/// Text between the first and last double quote on a line, if both exist.
fn quoted_value(line: &str) -> Option<&str> {
    let start = line.find('"')? + 1;
    let end = line.rfind('"')?;
    (start <= end).then(|| &line[start..end])
}

#[cfg(test)]
mod tests {
    use super::quoted_value;

    #[test]
    fn quoted_value_extracts_between_outer_quotes() {
        assert_eq!(quoted_value("    name: \"kernel_config_w_6.12\","), Some("kernel_config_w_6.12"));
        assert_eq!(quoted_value("name: bare"), None);
        assert_eq!(quoted_value("a \"\" b"), Some(""));
    }
}
