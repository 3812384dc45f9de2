pub mod annotation;
pub mod config;
pub mod emit;
pub mod error;
pub mod ir;
pub mod normalize;
pub mod walk;

pub use error::{Error, Result};

use config::Config;
use ir::Stats;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Generates the script for a raw document, streaming it into `out`.
pub fn compile_to<W: Write>(source: &[u8], config: &Config, out: &mut W) -> Result<Stats> {
    // Stages 0-1
    let blocks = walk::parse(source)?;

    // Stages 2-3
    let stats = emit::synthesize(&blocks, config, out)?;
    Ok(stats)
}

/// Generates the script for a document already held in memory.
pub fn compile(text: &str, config: &Config) -> Result<String> {
    let mut out = Vec::new();
    compile_to(text.as_bytes(), config, &mut out)?;
    // Only `&str` data is ever written to the sink.
    Ok(String::from_utf8_lossy(&out).into_owned())
}

/// Reads `input`, writes the generated script to `output`. Nothing is
/// written when the document cannot be parsed.
pub fn compile_file(input: &Path, output: &Path, config: &Config) -> Result<Stats> {
    let source = fs::read(input).map_err(|source| Error::Read {
        path: input.to_path_buf(),
        source,
    })?;
    let blocks = walk::parse(&source)?;

    let write_err = |source: std::io::Error| Error::Write {
        path: output.to_path_buf(),
        source,
    };
    let file = File::create(output).map_err(write_err)?;
    let mut out = BufWriter::new(file);
    let stats = emit::synthesize(&blocks, config, &mut out).map_err(write_err)?;
    out.flush().map_err(write_err)?;

    if config.executable {
        make_executable(output).map_err(write_err)?;
    }

    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        commands = stats.commands,
        ignored = stats.ignored,
        injected = stats.injected,
        tests = stats.tests,
        dropped = stats.dropped,
        "script written"
    );
    Ok(stats)
}

#[cfg(unix)]
fn make_executable(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let mut perms = fs::metadata(path)?.permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms)
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> std::io::Result<()> {
    Ok(())
}
