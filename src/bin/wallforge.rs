use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "wallforge", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a wallpaper from a parameter JSON file or a built-in preset.
    Render(RenderArgs),
    /// List the built-in presets.
    Presets,
    /// List the style variant catalog.
    Variants,
    /// Convert between parameter JSON and the URL-hash payload.
    Hash(HashArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input parameter JSON (partial documents are fine).
    #[arg(long = "in", conflicts_with = "preset")]
    in_path: Option<PathBuf>,

    /// Built-in preset id.
    #[arg(long)]
    preset: Option<String>,

    /// Output directory; the filename follows the wall_<w>x<h>_<seed> convention.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Seed override.
    #[arg(long)]
    seed: Option<u32>,

    /// Force the sequential reference backend.
    #[arg(long, default_value_t = false)]
    reference: bool,
}

#[derive(Parser, Debug)]
struct HashArgs {
    /// Input parameter JSON.
    #[arg(long = "in", conflicts_with = "decode")]
    in_path: Option<PathBuf>,

    /// Hash payload to decode back into parameter JSON.
    #[arg(long)]
    decode: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Presets => cmd_presets(),
        Command::Variants => cmd_variants(),
        Command::Hash(args) => cmd_hash(args),
    }
}

fn load_snapshot(args: &RenderArgs) -> anyhow::Result<wallforge::ParameterSnapshot> {
    let mut snapshot = if let Some(id) = &args.preset {
        let library = wallforge::presets::PresetLibrary::builtin();
        library
            .find(id)
            .with_context(|| format!("unknown preset '{id}'"))?
            .snapshot()
    } else if let Some(path) = &args.in_path {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read params '{}'", path.display()))?;
        let value: serde_json::Value =
            serde_json::from_str(&text).with_context(|| "parse params JSON")?;
        wallforge::normalize(&value)
    } else {
        wallforge::ParameterSnapshot::default()
    };

    if let Some(seed) = args.seed {
        snapshot.random.seed = seed;
    }
    Ok(snapshot)
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let snapshot = load_snapshot(&args)?;

    let backend = if args.reference {
        wallforge::create_backend(wallforge::BackendKind::Reference)?
    } else {
        wallforge::create_backend_with_fallback(wallforge::BackendKind::Parallel)
    };

    let mut renderer = wallforge::Renderer::new(backend);
    renderer.set_snapshot(snapshot);
    let frame = renderer.export_frame()?;
    let exported = wallforge::encode::export(&frame, renderer.snapshot())?;

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;
    let out_path = args.out_dir.join(&exported.filename);
    std::fs::write(&out_path, &exported.bytes)
        .with_context(|| format!("write '{}'", out_path.display()))?;

    eprintln!("wrote {}", out_path.display());
    Ok(())
}

fn cmd_presets() -> anyhow::Result<()> {
    let library = wallforge::presets::PresetLibrary::builtin();
    for preset in library.list() {
        println!("{:<16} {}", preset.id, preset.name);
    }
    Ok(())
}

fn cmd_variants() -> anyhow::Result<()> {
    for info in wallforge::pipeline::variant::catalog() {
        println!("{:<10} {:<16} {}", info.id, info.name, info.description);
    }
    Ok(())
}

fn cmd_hash(args: HashArgs) -> anyhow::Result<()> {
    if let Some(payload) = &args.decode {
        let snapshot = wallforge::params::hash_codec::decode(payload)?;
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    let snapshot = if let Some(path) = &args.in_path {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read params '{}'", path.display()))?;
        let value: serde_json::Value =
            serde_json::from_str(&text).with_context(|| "parse params JSON")?;
        wallforge::normalize(&value)
    } else {
        wallforge::ParameterSnapshot::default()
    };
    println!("{}", wallforge::params::hash_codec::encode(&snapshot)?);
    Ok(())
}
