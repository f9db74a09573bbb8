// SPDX-License-Identifier: MPL-2.0
use std::path::PathBuf;
use std::process::ExitCode;
use stiloz::config::{self, Config};
use stiloz::domain::crop::CropBox;
use stiloz::editor::EditorSession;
use stiloz::error::{Error, Result};
use stiloz::media::{DirectorySink, NoShare};
use stiloz::render::{Compositor, TemplateAsset, TemplateLayout};

const HELP: &str = "\
Compose a doctor poster and save it as a PNG.

USAGE:
  stiloz [OPTIONS]

OPTIONS:
  --photo <PATH>         Profile photo to crop into the circle
  --crop <X,Y,SIZE>      Crop box in photo pixels (default: centered, 80%)
  --name <TEXT>          Doctor's name
  --specialty <TEXT>     Doctor's specialty
  --background <PATH>    Background template image
  --out <DIR>            Output directory
  --config <PATH>        Read settings from this file
  -h, --help             Print this help
";

struct Flags {
    photo: Option<PathBuf>,
    crop: Option<CropBox>,
    name: Option<String>,
    specialty: Option<String>,
    background: Option<PathBuf>,
    out: Option<PathBuf>,
    config: Option<PathBuf>,
}

fn parse_crop(value: &str) -> std::result::Result<CropBox, String> {
    let parts: Vec<f32> = value
        .split(',')
        .map(|part| part.trim().parse::<f32>())
        .collect::<std::result::Result<_, _>>()
        .map_err(|e| format!("invalid crop '{value}': {e}"))?;
    match parts.as_slice() {
        [x, y, size] => Ok(CropBox::new(*x, *y, *size)),
        _ => Err(format!("crop must be X,Y,SIZE, got '{value}'")),
    }
}

fn parse_flags() -> std::result::Result<Option<Flags>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }
    let flags = Flags {
        photo: args.opt_value_from_str("--photo")?,
        crop: args.opt_value_from_fn("--crop", parse_crop)?,
        name: args.opt_value_from_str("--name")?,
        specialty: args.opt_value_from_str("--specialty")?,
        background: args.opt_value_from_str("--background")?,
        out: args.opt_value_from_str("--out")?,
        config: args.opt_value_from_str("--config")?,
    };
    let rest = args.finish();
    if !rest.is_empty() {
        log::warn!("Ignoring unexpected arguments: {rest:?}");
    }
    Ok(Some(flags))
}

fn load_config(flags: &Flags) -> Result<Config> {
    let mut config = match &flags.config {
        Some(path) => config::load_from_path(path)?,
        None => config::load().unwrap_or_else(|e| {
            log::warn!("Using default settings: {e}");
            Config::default()
        }),
    };
    if let Some(background) = &flags.background {
        config.background = Some(background.clone());
    }
    if let Some(out) = &flags.out {
        config.output_dir = Some(out.clone());
    }
    Ok(config)
}

async fn run(flags: Flags) -> Result<PathBuf> {
    let config = load_config(&flags)?;
    let mut session = EditorSession::new(&config);
    session.set_name(flags.name.unwrap_or_default());
    session.set_specialty(flags.specialty.unwrap_or_default());

    if let Some(photo) = &flags.photo {
        let bytes = tokio::fs::read(photo)
            .await
            .map_err(|e| Error::Io(format!("{}: {e}", photo.display())))?;
        session.load_image_async(bytes).await?;
        if let Some(crop) = flags.crop {
            session.set_crop_box(crop);
        }
        session.commit_crop()?;
    } else if flags.crop.is_some() {
        log::warn!("--crop has no effect without --photo");
    }

    let asset = match &config.background {
        Some(path) => TemplateAsset::load(path.clone()),
        None => TemplateAsset::solid(),
    };
    let compositor = Compositor::new(&config, TemplateLayout::default(), asset);
    let sink = DirectorySink::new(config.output_dir());

    let outcome = session.export(&compositor, &sink, &NoShare).await?;
    Ok(outcome.saved_to)
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let flags = match parse_flags() {
        Ok(Some(flags)) => flags,
        Ok(None) => {
            print!("{HELP}");
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("{e}\n\n{HELP}");
            return ExitCode::from(2);
        }
    };

    match run(flags).await {
        Ok(path) => {
            println!("{}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Failed to generate image: {e}");
            ExitCode::FAILURE
        }
    }
}
