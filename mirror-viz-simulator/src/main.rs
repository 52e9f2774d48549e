mod audio;
mod cli;
mod surface;

use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use mirror_viz::{run_frame_loop, AudioSource, MirrorSpectrum};

use audio::{NoiseSource, ToneSource};
use cli::{Args, SourceKind};
use surface::{InstantClock, SimulatorSurface};

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = args.layout_config();
    let mut spectrum = MirrorSpectrum::new(config).context("invalid layout configuration")?;
    let layout = spectrum.layout();
    log::info!(
        "{}x{} area, {} bars per side, {} samples per bar, bar width {:.2}",
        config.area_width,
        config.area_height,
        layout.bar_count,
        layout.samples_per_bar,
        layout.bar_width
    );

    let mut surface = SimulatorSurface::new(
        args.display_size(),
        args.origin(),
        (config.area_width / 2.0, config.area_height / 2.0),
        Duration::from_millis(args.frame_delay_ms),
    );
    if !args.headless {
        surface = surface.with_window("Mirror Spectrum", args.scale);
    }

    let mut source: Box<dyn AudioSource> = match args.source {
        SourceKind::Noise => Box::new(NoiseSource::new(args.seed)),
        SourceKind::Tone => Box::new(ToneSource::new()),
    };

    let stats = run_frame_loop(
        &mut surface,
        &mut source,
        &InstantClock::new(),
        &mut spectrum,
        &args.paint_style(),
        args.frames,
    )
    .context("frame loop failed")?;

    log::info!(
        "{} frames, average {:.2} ms, worst {:.2} ms",
        stats.frames,
        stats.average_frame_ms(),
        stats.max_frame_ms
    );
    Ok(())
}
