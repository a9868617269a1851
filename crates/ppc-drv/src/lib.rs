//! Compiler driver: CLI argument handling, pipeline orchestration, and the
//! final call out to `nasm`/`ld`.
//!
//! Each invocation compiles exactly one source file through all four stages
//! in order — lexer, parser, IR generator, assembly generator — stopping at
//! the first stage that errors. The parser's arena and the lowered TAC
//! vector are both local to [`compile`] and drop once the next stage has
//! consumed them, matching how the stages themselves describe their own
//! resource ownership.

mod config;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use bumpalo::Bump;
use clap::{Parser as ClapParser, ValueEnum};
use tracing::{debug, info};

use config::Config;

#[derive(ClapParser, Debug)]
#[command(name = "ppc", about = "Compiler for the kończwaść-to-NASM toy language")]
struct Cli {
    /// Source file to compile.
    source: PathBuf,

    /// Base name for generated output (`<output>.ppprw`, `<output>.asm`, and
    /// the executable). Defaults to the source file's own name, extension
    /// stripped.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Keep the `.ppprw`/`.asm` intermediates after a successful build.
    #[arg(long)]
    keep_temps: bool,

    /// Stop after one pipeline stage and print its representation instead
    /// of assembling and linking.
    #[arg(long, value_enum)]
    emit: Option<EmitStage>,

    /// Verbose logging (also settable via the `PPC_LOG` env var).
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum EmitStage {
    Tokens,
    Ast,
    Tac,
    Asm,
}

/// Entry point called by `main`. Returns the process exit code.
pub fn run() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(_) => {
            eprintln!("Nieprawidłowe użycie");
            return exit_code(1);
        }
    };

    let filter = if cli.verbose {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_env("PPC_LOG")
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
    };
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init();

    let config = match Config::load().context("nie można wczytać konfiguracji") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e:#}");
            return exit_code(1);
        }
    };

    match compile(&cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => exit_code(code),
    }
}

fn exit_code(code: i32) -> ExitCode {
    ExitCode::from(code.clamp(0, 255) as u8)
}

/// Runs the full pipeline for `cli.source`. With no `--emit` flag this
/// writes `<base>.ppprw` and `<base>.asm` next to it (or under
/// `config.output_dir`/`cli.output` if given) and then assembles/links
/// `<base>.asm` into a native executable. With `--emit`, the pipeline stops
/// right after the named stage and prints its representation to stdout.
/// `Err` carries the process exit code to surface.
fn compile(cli: &Cli, config: &Config) -> Result<(), i32> {
    let source_path = &cli.source;
    info!(path = %source_path.display(), "reading source");
    let source = fs::read_to_string(source_path).map_err(|e| {
        eprintln!("Nie można odczytać pliku '{}': {e}", source_path.display());
        1
    })?;

    let tokens = ppc_lex::Lexer::new(&source).tokenize().map_err(|e| {
        eprintln!("{e}");
        1
    })?;
    debug!(count = tokens.len(), "lexed");
    if cli.emit == Some(EmitStage::Tokens) {
        println!("{tokens:#?}");
        return Ok(());
    }

    let arena = Bump::new();
    let program = ppc_par::Parser::new(&arena, tokens).parse_program().map_err(|e| {
        eprintln!("{e}");
        1
    })?;
    debug!("parsed");
    if cli.emit == Some(EmitStage::Ast) {
        println!("{program:#?}");
        return Ok(());
    }

    let instrs = ppc_ir::lower_program(&program).map_err(|e| {
        eprintln!("{e}");
        1
    })?;
    debug!(count = instrs.len(), "lowered to TAC");
    let listing = ppc_ir::render_listing(&instrs);
    if cli.emit == Some(EmitStage::Tac) {
        println!("{listing}");
        return Ok(());
    }

    let asm = ppc_gen::generate(&instrs).map_err(|e| {
        eprintln!("{e}");
        1
    })?;
    if cli.emit == Some(EmitStage::Asm) {
        println!("{asm}");
        return Ok(());
    }

    let base = output_base(cli, config, source_path);
    let ppprw_path = base.with_extension("ppprw");
    let asm_path = base.with_extension("asm");
    let exe_path = base.clone();

    if let Some(parent) = base.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            eprintln!("Nie można utworzyć katalogu '{}': {e}", parent.display());
            1
        })?;
    }

    fs::write(&ppprw_path, &listing).map_err(|e| {
        eprintln!("Nie można zapisać '{}': {e}", ppprw_path.display());
        1
    })?;
    fs::write(&asm_path, &asm).map_err(|e| {
        eprintln!("Nie można zapisać '{}': {e}", asm_path.display());
        1
    })?;
    info!(asm = %asm_path.display(), ppprw = %ppprw_path.display(), "wrote output files");

    let mut linker = ppc_gen::linker::Linker::new().with_include_dir(runtime_dir());
    if let Some(nasm) = &config.nasm {
        linker.nasm = nasm.clone();
    }
    if let Some(ld) = &config.ld {
        linker.ld = ld.clone();
    }
    linker.assemble_and_link(&asm_path, &exe_path).map_err(|e| {
        eprintln!("{e}");
        e.exit_code()
    })?;

    if !(cli.keep_temps || config.keep_temps) {
        let _ = fs::remove_file(&ppprw_path);
        let _ = fs::remove_file(&asm_path);
    }

    println!("Skompilowano pomyślnie: {}", exe_path.display());
    Ok(())
}

/// Resolves the extensionless base path generated output is written under:
/// `cli.output` overrides `config.output_dir` (joined with the source
/// file's own stem) overrides the source path with its extension stripped.
fn output_base(cli: &Cli, config: &Config, source_path: &Path) -> PathBuf {
    if let Some(output) = &cli.output {
        return output.clone();
    }
    if let Some(dir) = &config.output_dir {
        let stem = source_path.file_stem().unwrap_or_default();
        return PathBuf::from(dir).join(stem);
    }
    strip_final_extension(source_path)
}

/// `foo.ppc` → `foo`; a path with no extension is left as-is.
fn strip_final_extension(path: &Path) -> PathBuf {
    path.with_extension("")
}

/// Where `printer.asm` lives, so `nasm -i` can find it regardless of the
/// caller's current directory. Resolved relative to this crate's own
/// manifest rather than the generated `.asm` file's location.
fn runtime_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("runtime")
}
