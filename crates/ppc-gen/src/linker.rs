//! Hands a generated `.asm` file to `nasm` and `ld` to produce a native
//! executable. Kept as its own module, separate from [`crate::asm`], since
//! it shells out rather than generates text.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{GenError, Result};

pub struct Linker {
    pub nasm: String,
    pub ld: String,
    /// Extra `-i` search directory for `%include`s (e.g. wherever
    /// `printer.asm` lives), if it isn't already next to the source.
    pub include_dir: Option<PathBuf>,
}

impl Linker {
    pub fn new() -> Self {
        Self {
            nasm: "nasm".to_string(),
            ld: "ld".to_string(),
            include_dir: None,
        }
    }

    pub fn with_include_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.include_dir = Some(dir.into());
        self
    }

    /// Assembles `asm_path` to an ELF64 object next to it, then links that
    /// object into `output`.
    pub fn assemble_and_link(&self, asm_path: &Path, output: &Path) -> Result<()> {
        let obj_path = asm_path.with_extension("o");

        let mut nasm_cmd = Command::new(&self.nasm);
        nasm_cmd.args(["-felf64", "-o"]).arg(&obj_path).arg(asm_path);
        if let Some(dir) = &self.include_dir {
            // nasm appends the included filename straight onto `-i`'s
            // argument with no separator, so the directory must end in one.
            let mut arg = dir.as_os_str().to_os_string();
            if !arg.to_string_lossy().ends_with('/') {
                arg.push("/");
            }
            nasm_cmd.arg("-i").arg(arg);
        }
        self.run(nasm_cmd, "nasm")?;

        let mut ld_cmd = Command::new(&self.ld);
        ld_cmd.arg(&obj_path).arg("-o").arg(output);
        self.run(ld_cmd, "ld")?;

        Ok(())
    }

    fn run(&self, mut cmd: Command, tool: &str) -> Result<()> {
        let result = cmd
            .output()
            .map_err(|e| GenError::ToolUnavailable { tool: tool.to_string(), source: e })?;
        if !result.status.success() {
            return Err(GenError::ExternalToolFailed {
                tool: tool.to_string(),
                code: result.status.code(),
                stderr: String::from_utf8_lossy(&result.stderr).into_owned(),
            });
        }
        Ok(())
    }
}

impl Default for Linker {
    fn default() -> Self {
        Self::new()
    }
}
