use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use posterkit::{
    DirectoryTarget, ImageSource, PosterConfig, PosterGenerator, PosterRequest, ShareOutcome,
    TemplateId,
};

#[derive(Parser, Debug)]
#[command(name = "posterkit", version)]
struct Cli {
    /// JSON configuration file. `POSTERKIT_*` environment variables override it.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a poster and write it as a PNG (or print its data URI).
    Generate(GenerateArgs),
    /// Generate a poster and save it under a timestamped file name.
    Download(DeliverArgs),
    /// Generate a poster and share it, falling back to a download on this platform.
    Share(DeliverArgs),
    /// List the available templates.
    Templates,
}

#[derive(Parser, Debug)]
struct PosterArgs {
    /// User photo: http(s) URL, data URL, file:// URL or local path.
    #[arg(long)]
    photo: String,

    /// Template identifier.
    #[arg(long, default_value_t = TemplateId::Poster1)]
    template: TemplateId,

    /// Frame shape hint (accepted, the frame is always a circle).
    #[arg(long)]
    frame_type: Option<String>,

    /// Custom message (accepted, not drawn).
    #[arg(long)]
    message: Option<String>,
}

impl PosterArgs {
    fn request(&self) -> PosterRequest {
        let mut req =
            PosterRequest::new(ImageSource::parse(&self.photo)).with_template(self.template);
        req.frame_type = self.frame_type.clone();
        req.custom_message = self.message.clone();
        req
    }
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    #[command(flatten)]
    poster: PosterArgs,

    /// Output PNG path.
    #[arg(long, default_value = "DevFest-Poster.png")]
    out: PathBuf,

    /// Print the `data:image/png;base64,...` URI to stdout instead of writing a file.
    #[arg(long)]
    data_uri: bool,
}

#[derive(Parser, Debug)]
struct DeliverArgs {
    #[command(flatten)]
    poster: PosterArgs,

    /// Directory the poster is saved into.
    #[arg(long, default_value = ".")]
    dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let cfg = load_config(cli.config.as_deref())?;
    match cli.cmd {
        Command::Generate(args) => cmd_generate(&cfg, args),
        Command::Download(args) => cmd_download(&cfg, args),
        Command::Share(args) => cmd_share(&cfg, args),
        Command::Templates => {
            cmd_templates(&cfg);
            Ok(())
        }
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> anyhow::Result<PosterConfig> {
    let mut cfg = match path {
        Some(p) => PosterConfig::from_path(p)?,
        None => PosterConfig::default(),
    };
    cfg.apply_env();
    Ok(cfg)
}

fn cmd_generate(cfg: &PosterConfig, args: GenerateArgs) -> anyhow::Result<()> {
    let mut generator = PosterGenerator::from_config(cfg)?;
    let image = pollster::block_on(generator.generate(&args.poster.request()))?;

    if args.data_uri {
        println!("{}", image.to_data_uri());
        return Ok(());
    }
    std::fs::write(&args.out, image.png_bytes())
        .with_context(|| format!("write poster '{}'", args.out.display()))?;
    eprintln!(
        "wrote {} ({}x{})",
        args.out.display(),
        image.width,
        image.height
    );
    Ok(())
}

fn cmd_download(cfg: &PosterConfig, args: DeliverArgs) -> anyhow::Result<()> {
    let mut generator = PosterGenerator::from_config(cfg)?;
    let target = DirectoryTarget::new(&args.dir);
    let name = pollster::block_on(generator.download(&args.poster.request(), &target))?;
    eprintln!("wrote {}", target.dir().join(name).display());
    Ok(())
}

fn cmd_share(cfg: &PosterConfig, args: DeliverArgs) -> anyhow::Result<()> {
    let mut generator = PosterGenerator::from_config(cfg)?;
    let target = DirectoryTarget::new(&args.dir);
    match pollster::block_on(generator.share(&args.poster.request(), &target))? {
        ShareOutcome::Shared => eprintln!("shared"),
        ShareOutcome::Clipboard => eprintln!("copied to clipboard"),
        ShareOutcome::Downloaded(name) => {
            eprintln!("wrote {}", target.dir().join(name).display());
        }
    }
    Ok(())
}

fn cmd_templates(cfg: &PosterConfig) {
    for id in TemplateId::ALL {
        println!(
            "{}\t{}",
            id,
            cfg.template_dir.join(id.asset_path()).display()
        );
    }
}
