//! chefwire CLI: JSON <-> user record wire bytes.

#[cfg(feature = "fast-alloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use chefwire::{DecodeOptions, RawFields, UserField};
use clap::{Args, Parser, Subcommand};
use std::io::{IsTerminal, Read, Write};
use std::process;

#[derive(Parser)]
#[command(name = "chefwire", about = "ByteChef user record <-> JSON conversion")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encode a JSON user to wire bytes
    Encode(EncodeArgs),
    /// Decode wire bytes to a JSON user
    Decode(DecodeArgs),
    /// List the raw entries of an encoded record
    Inspect(InspectArgs),
}

#[derive(Args)]
struct EncodeArgs {
    /// Input file (- for stdin)
    #[arg(short, long)]
    input: String,

    /// Output file (optional; without -o auto-derived, -o - = stdout)
    #[arg(short, long)]
    output: Option<String>,
}

#[derive(Args)]
struct DecodeArgs {
    /// Input file (- for stdin)
    #[arg(short, long)]
    input: String,

    /// Output file (optional; without -o auto-derived, -o - = stdout)
    #[arg(short, long)]
    output: Option<String>,

    /// Pretty-printed JSON output (2-space indent)
    #[arg(long)]
    pretty: bool,

    /// Reject text values longer than N bytes
    #[arg(long, value_name = "N")]
    max_text_length: Option<u32>,

    /// Reject repeated fields with more than N entries
    #[arg(long, value_name = "N")]
    max_repeated: Option<u32>,
}

#[derive(Args)]
struct InspectArgs {
    /// Input file (- for stdin)
    #[arg(short, long)]
    input: String,
}

impl DecodeArgs {
    fn to_options(&self) -> DecodeOptions {
        let mut opts = DecodeOptions::default();
        opts.set_max_text_length(self.max_text_length);
        opts.set_max_repeated_count(self.max_repeated);
        opts
    }
}

/// Whole input as bytes; `-` is stdin.
fn read_input(path: &str) -> Result<Vec<u8>, String> {
    match path {
        "-" => {
            let mut stdin = std::io::stdin().lock();
            if stdin.is_terminal() {
                eprintln!("reading from stdin (Ctrl+D to finish)...");
            }
            let mut buf = Vec::new();
            stdin
                .read_to_end(&mut buf)
                .map_err(|e| format!("read error (stdin): {e}"))?;
            Ok(buf)
        }
        _ => std::fs::read(path).map_err(|e| format!("read error '{path}': {e}")),
    }
}

/// Encoded record bytes for `decode`, either read into memory or mapped.
enum RecordBytes {
    Owned(Vec<u8>),
    #[cfg(feature = "mmap")]
    Mapped(memmap2::Mmap),
}

impl std::ops::Deref for RecordBytes {
    type Target = [u8];
    fn deref(&self) -> &[u8] {
        match self {
            RecordBytes::Owned(v) => v,
            #[cfg(feature = "mmap")]
            RecordBytes::Mapped(m) => m,
        }
    }
}

#[cfg(feature = "mmap")]
fn load_record(path: &str) -> Result<RecordBytes, String> {
    if path == "-" {
        return read_input(path).map(RecordBytes::Owned);
    }
    let file = std::fs::File::open(path).map_err(|e| format!("read error '{path}': {e}"))?;
    let len = file
        .metadata()
        .map_err(|e| format!("read error '{path}': {e}"))?
        .len();
    // Leerer Record (Default-User); leere Dateien lassen sich nicht mappen
    if len == 0 {
        return Ok(RecordBytes::Owned(Vec::new()));
    }
    let map = unsafe { memmap2::Mmap::map(&file) }
        .map_err(|e| format!("mmap error '{path}': {e}"))?;
    Ok(RecordBytes::Mapped(map))
}

#[cfg(not(feature = "mmap"))]
fn load_record(path: &str) -> Result<RecordBytes, String> {
    read_input(path).map(RecordBytes::Owned)
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Command::Encode(args) => run_encode(args),
        Command::Decode(args) => run_decode(args),
        Command::Inspect(args) => run_inspect(args),
    }
}

fn run_encode(args: EncodeArgs) -> Result<(), String> {
    let input = read_input(&args.input)?;
    let json = std::str::from_utf8(&input).map_err(|e| format!("JSON must be UTF-8: {e}"))?;
    let user = chefwire::from_json(json).map_err(|e| format!("invalid user JSON: {e}"))?;

    let output = resolve_output_path(args.output.as_deref(), &args.input, "pb")?;
    write_output(&output, &chefwire::encode(&user))
}

fn run_decode(args: DecodeArgs) -> Result<(), String> {
    let opts = args.to_options();
    let input = load_record(&args.input)?;
    let user = chefwire::decode_with_options(&input, &opts)
        .map_err(|e| format!("decode error: {e}"))?;
    let mut json =
        chefwire::to_json(&user, args.pretty).map_err(|e| format!("JSON error: {e}"))?;
    json.push('\n');

    let output = resolve_output_path(args.output.as_deref(), &args.input, "json")?;
    write_output(&output, json.as_bytes())
}

// Liest immer komplett ein: die Ausgabe ist zeilenweise und klein
fn run_inspect(args: InspectArgs) -> Result<(), String> {
    let input = read_input(&args.input)?;
    let mut out = std::io::BufWriter::new(std::io::stdout().lock());
    for (i, entry) in RawFields::new(&input).enumerate() {
        let entry = entry.map_err(|e| format!("entry {i}: {e}"))?;
        let name = UserField::from_number(entry.tag.field_number)
            .map_or("unknown", UserField::name);
        writeln!(
            out,
            "{i:>4}  field {:>3} {:<22} {:<7} {} bytes",
            entry.tag.field_number,
            name,
            entry.tag.wire_type.name(),
            entry.payload.len()
        )
        .map_err(|e| format!("write error: {e}"))?;
    }
    out.flush().map_err(|e| format!("write error: {e}"))
}

/// Writes `bytes` to stdout (`-`) or to `path`.
///
/// Files are written to `<path>.tmp` first and renamed, so a failed run
/// never leaves a half-written record behind.
fn write_output(path: &str, bytes: &[u8]) -> Result<(), String> {
    if path == "-" {
        let mut out = std::io::stdout().lock();
        return out
            .write_all(bytes)
            .and_then(|()| out.flush())
            .map_err(|e| format!("write error: {e}"));
    }

    let tmp = format!("{path}.tmp");
    if let Err(e) = std::fs::write(&tmp, bytes) {
        let _ = std::fs::remove_file(&tmp);
        return Err(format!("write error '{tmp}': {e}"));
    }
    std::fs::rename(&tmp, path).map_err(|e| format!("rename error '{tmp}' -> '{path}': {e}"))
}

/// Output path: the explicit `-o` if given, otherwise the input path with
/// its extension replaced by `ext`.
fn resolve_output_path(explicit: Option<&str>, input: &str, ext: &str) -> Result<String, String> {
    match (explicit, input) {
        (Some(path), _) => Ok(path.to_string()),
        (None, "-") => Err("-o is required when reading from stdin".into()),
        (None, _) => {
            let derived = std::path::Path::new(input).with_extension(ext);
            derived
                .to_str()
                .map(str::to_string)
                .ok_or_else(|| format!("invalid input path '{input}'"))
        }
    }
}
