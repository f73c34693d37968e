//! CLI implementation.
mod config;
mod output;

pub use crate::cli::config::Config;
pub use crate::cli::output::OutputDir;
use crate::error::{Error, Result};
use crate::image::{Backend, ImgBackend};
use crate::interaction::PointerEvent;
use crate::layout::Layout;
use crate::logs::{Console, LogEvent};
use crate::scene::{Photo, Scene};

use clap::Parser;
use std::fs;
use std::path::PathBuf;
use std::sync::mpsc;

/// Compose photo booth strips decorated with emoji stickers
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Captured photos, in shot order
    pub photos: Vec<PathBuf>,

    /// Grid layout: grid-1x4, grid-2x3, grid-2x2 or default
    #[arg(short, long, default_value = "default")]
    pub layout: String,

    #[cfg(not(target_os = "windows"))]
    /// Booth profile, corresponding to a folder in ~/.photomata,
    /// or ./booth.toml if omitted.
    #[arg(short, long)]
    pub profile: Option<String>,

    #[cfg(target_os = "windows")]
    /// Booth profile, corresponding to a folder in %APPDATA%/photomata,
    /// or ./booth.toml if omitted.
    #[arg(short, long)]
    pub profile: Option<String>,

    /// Frame name or #RRGGBB color
    #[arg(short, long)]
    pub background: Option<String>,

    /// Sticker to add, by glyph or catalog index
    #[arg(short, long = "sticker")]
    pub stickers: Vec<String>,

    /// Pointer event applied after the stickers are placed:
    /// down@X,Y, move@X,Y, up, leave or wheel@DELTA
    #[arg(short, long = "event")]
    pub events: Vec<PointerEvent>,

    /// Seed for sticker placement
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output folder
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// Prints the sticker and frame catalog and exits
    #[arg(long)]
    pub list: bool,

    /// Reports every render pass
    #[arg(short, long)]
    pub verbose: bool,
}

macro_rules! error {
    ($res:expr) => {
        $res.unwrap_or_else(|e| panic!("{e}"))
    };
}

impl Cli {
    pub fn run() {
        std::panic::set_hook(Box::new(|panic_info| {
            if let Some(s) = panic_info.payload().downcast_ref::<String>() {
                eprintln!("{s}");
            } else {
                eprintln!("{panic_info}");
            }
        }));

        let cli = Self::parse();
        let config = error!(Config::find(cli.profile.as_deref()));
        if cli.list {
            cli.print_catalog(&config);
            return;
        }

        let (tx, rx) = mpsc::channel();
        let mut console = Console::new_stderr(cli.verbose);
        let backend = error!(ImgBackend::new());
        let backend = match &config.font {
            Some(font) => backend.with_font(font),
            None => backend,
        };
        let mut scene = Scene::new(backend, config.booth.clone()).with_log(tx);
        if let Some(seed) = cli.seed {
            scene = scene.with_seed(seed);
        }

        let photos = error!(cli.read_photos());
        error!(scene.init(photos, Layout::parse(&cli.layout)));
        error!(scene.decode_pending());
        error!(console.drain(&rx));

        error!(cli.decorate(&mut scene, &config));
        error!(console.drain(&rx));

        let export = error!(scene.export());
        let path = error!(OutputDir::new(&cli.output).write(&export));
        error!(console.drain(&rx));
        error!(console.log(LogEvent::Done(format!("saved {}", path.display()))));
    }

    fn read_photos(&self) -> Result<Vec<Photo>> {
        self.photos
            .iter()
            .map(|path| {
                fs::read(path)
                    .map(Photo::from)
                    .map_err(|e| Error::photo_open(path, e))
            })
            .collect()
    }

    /// Applies the background, stickers and pointer events from the command
    /// line, in that order.
    fn decorate<B: Backend>(&self, scene: &mut Scene<B>, config: &Config) -> Result<()> {
        if let Some(key) = &self.background {
            let color = config
                .catalog
                .color(key)
                .ok_or_else(|| Error::UnknownColor(key.clone()))?;
            scene.set_background_color(color)?;
        }
        for key in self.stickers.iter() {
            let glyph = config
                .catalog
                .glyph(key)
                .ok_or_else(|| Error::UnknownGlyph(key.clone()))?;
            scene.add_sticker(glyph)?;
        }
        for event in self.events.iter() {
            scene.handle(*event)?;
        }
        Ok(())
    }

    fn print_catalog(&self, config: &Config) {
        println!("stickers:");
        for (i, glyph) in config.catalog.glyphs.iter().enumerate() {
            println!("  {i:2}  {glyph}");
        }
        println!("frames:");
        for frame in config.catalog.frames.iter() {
            println!("  {:<8} {}", frame.name, frame.color);
        }
        println!("layouts:");
        for layout in Layout::ALL {
            let grid = layout.grid();
            println!("  {layout:<9} {}x{}", grid.columns, grid.rows);
        }
    }
}
