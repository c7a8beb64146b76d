use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "dramaton", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load and validate a project file.
    Validate(ValidateArgs),
    /// Key the background out of an image and write a PNG.
    Key(KeyArgs),
    /// Print the presented stage of one scene as JSON.
    Stage(StageArgs),
    /// Auto-play a project and print the transcript.
    Play(PlayArgs),
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Input project JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct KeyArgs {
    /// Input image (PNG, JPEG or WebP).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Remove green-screen pixels instead of corner-matched ones.
    #[arg(long)]
    green: bool,

    /// Per-channel corner tolerance.
    #[arg(long, default_value_t = dramaton::DEFAULT_TOLERANCE)]
    tolerance: u8,
}

#[derive(Parser, Debug)]
struct StageArgs {
    /// Input project JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Scene name.
    #[arg(long)]
    scene: String,

    /// Canvas width in pixels.
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Canvas height in pixels.
    #[arg(long, default_value_t = 720)]
    height: u32,
}

#[derive(Parser, Debug)]
struct PlayArgs {
    /// Input project JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Start at this scene name instead of the title scene.
    #[arg(long)]
    scene: Option<String>,

    /// Voice beats that have no recorded audio.
    #[arg(long)]
    speech: bool,

    /// Stop once this many scene transfers have been followed.
    #[arg(long, default_value_t = 32)]
    max_transfers: usize,

    /// Write a snapshot JSON here whenever a scene completes.
    #[arg(long)]
    save: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Validate(args) => cmd_validate(args),
        Command::Key(args) => cmd_key(args),
        Command::Stage(args) => cmd_stage(args),
        Command::Play(args) => cmd_play(args),
    }
}

fn load(path: &Path) -> anyhow::Result<dramaton::Project> {
    dramaton::Project::from_path(path)
        .with_context(|| format!("load project '{}'", path.display()))
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let project = load(&args.in_path)?;
    println!(
        "ok: '{}' ({} scenes, {} actors, {} items, {} drops, {} sfx)",
        project.info.title,
        project.scenes.len(),
        project.actors.len(),
        project.items.len(),
        project.drops.len(),
        project.sfx.len()
    );
    Ok(())
}

fn cmd_key(args: KeyArgs) -> anyhow::Result<()> {
    let bytes = std::fs::read(&args.in_path)
        .with_context(|| format!("read image '{}'", args.in_path.display()))?;
    let out = if args.green {
        dramaton::extract_green_screen(&bytes)
    } else {
        dramaton::extract_transparency_with(
            &bytes,
            dramaton::ChromaKeyOpts {
                tolerance: args.tolerance,
            },
        )
    };
    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, out)
        .with_context(|| format!("write image '{}'", args.out.display()))?;
    Ok(())
}

fn cmd_stage(args: StageArgs) -> anyhow::Result<()> {
    let project = load(&args.in_path)?;
    let scene = project
        .scene_by_name(&args.scene)
        .with_context(|| format!("no scene named '{}'", args.scene))?;
    let canvas = dramaton::Canvas::new(args.width, args.height)?;
    let stage = dramaton::present(&project, scene, canvas);
    println!("{}", serde_json::to_string_pretty(&stage)?);
    Ok(())
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    let project = load(&args.in_path)?;
    let opts = dramaton::RuntimeOpts::from_info(&project.info, args.speech);
    let store: Box<dyn dramaton::SnapshotStore> = match &args.save {
        Some(path) => Box::new(dramaton::JsonFileSnapshots::new(path)),
        None => Box::new(dramaton::DiscardSnapshots),
    };
    let log = dramaton::AudioLog::new();
    let mut session = dramaton::Session::new(&project, log.channel(), opts, store);

    match &args.scene {
        Some(name) => {
            let scene = project
                .scene_by_name(name)
                .with_context(|| format!("no scene named '{name}'"))?;
            session.begin_at(&scene.id)?;
        }
        None => session.begin()?,
    }

    loop {
        match session.phase() {
            dramaton::SessionPhase::Scene => {}
            dramaton::SessionPhase::SceneMenu => {
                println!("[scene complete]");
                session.choose(dramaton::MenuAction::EndSession)?;
                continue;
            }
            dramaton::SessionPhase::Credits => {
                println!("[credits]");
                break;
            }
            dramaton::SessionPhase::Idle | dramaton::SessionPhase::SceneClosed => break,
        }

        match session.interpreter().state() {
            dramaton::PlaybackState::EstablishingShot => {
                if let Some(scene) = session.scene() {
                    let drop = scene.backdrop.as_deref().unwrap_or_default();
                    println!("[{}: establishing shot {drop}]", scene.name);
                }
                session.dismiss()?;
                continue;
            }
            dramaton::PlaybackState::Playing(_) => print_beat(&session, &log),
            _ => {}
        }

        match session.continue_()? {
            dramaton::Advance::Transfer { scene } => {
                println!("[goto {}]", scene.name);
                if session.transfers() >= args.max_transfers {
                    println!("[stopped after {} transfers]", args.max_transfers);
                    break;
                }
            }
            dramaton::Advance::Stalled => {
                println!("[stalled: GOTO target not found]");
                break;
            }
            dramaton::Advance::Beat { .. } | dramaton::Advance::Complete => {}
        }
    }
    Ok(())
}

fn print_beat(session: &dramaton::Session<'_>, log: &dramaton::AudioLog) {
    let cue = log
        .drain()
        .into_iter()
        .find_map(|e| match e {
            dramaton::AudioEvent::Play(src) => Some(format!("  (audio {src})")),
            dramaton::AudioEvent::Speak(_) => Some("  (speech)".to_string()),
            _ => None,
        })
        .unwrap_or_default();
    match session.interpreter().current_line() {
        Some(dramaton::Line::Dialogue { speaker, text }) => println!("{speaker}: {text}{cue}"),
        Some(dramaton::Line::Directive(d)) => println!("[{}]", d.trim()),
        Some(dramaton::Line::Goto { .. }) | None => {}
    }
}
