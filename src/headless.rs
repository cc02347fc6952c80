//! Fixed-timestep playback of a pointer script against the showcase scene.

use crate::config::ShowcaseConfig;
use crate::scripted_input::ScriptedPointerPlayer;
use crate::showcase::{Showcase, Target};
use anyhow::{Context, Result};
use spatial_pointer_input::InputState;
use spatial_pointer_testkit::{FrameRecord, JsonlSink};
use std::path::PathBuf;
use tracing::{debug, info};

pub struct HeadlessOptions {
    pub script: Option<PathBuf>,
    pub trace: Option<PathBuf>,
    /// Overrides the configured frame budget.
    pub frames: Option<u64>,
}

/// What a headless run ended with.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessSummary {
    pub frames: u64,
    pub state_changes: usize,
    pub selected_frames: usize,
    pub primitive: &'static str,
}

pub fn run(config: &ShowcaseConfig, options: HeadlessOptions) -> Result<HeadlessSummary> {
    let mut player = match &options.script {
        Some(path) => ScriptedPointerPlayer::from_path(path)?,
        None => {
            info!("No pointer script given, playing the built-in demo");
            ScriptedPointerPlayer::demo()
        }
    };
    let label = options
        .script
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "demo".to_string());
    let mut sink = options
        .trace
        .as_ref()
        .map(|path| JsonlSink::with_header(path, &label))
        .transpose()?;

    let viewport = (config.viewport.width, config.viewport.height);
    let camera = config.camera.build(&config.viewport);
    let mut input = InputState::new(viewport.0, viewport.1);
    let mut showcase = Showcase::build(&config.interaction);
    let primary = config.interaction.primary_controller;
    let dt = config.headless.timestep;
    let max_frames = options.frames.unwrap_or(config.headless.frames);

    info!(frames = max_frames, timestep = dt, script = %label, "Starting headless run");

    let mut state_changes = 0;
    let mut selected_frames = 0;
    let mut frames = 0;
    while frames < max_frames && !player.finished() {
        player.current().apply(
            &mut input,
            primary,
            viewport,
            |name| Target::parse(name).map(|target| showcase.target_center(target)),
            |point| camera.world_to_ndc(point),
        )?;

        let report = showcase
            .manager
            .update(&input.snapshot(), &camera)
            .with_context(|| format!("interaction update failed at frame {frames}"))?;

        state_changes += report.changes().count();
        if report.winner.is_some() && input.engaged() {
            selected_frames += 1;
        }
        if let Some(sink) = sink.as_mut() {
            sink.write(&FrameRecord::from(&report))?;
        }
        for change in report.changes() {
            debug!(frame = report.frame.0, object = %change.handle, to = %change.to, "transition");
        }

        player.advance(dt);
        frames += 1;
    }

    if let Some(sink) = sink.as_mut() {
        sink.flush()?;
    }

    let summary = HeadlessSummary {
        frames,
        state_changes,
        selected_frames,
        primitive: showcase.current_primitive().name(),
    };
    info!(
        frames = summary.frames,
        state_changes = summary.state_changes,
        selected_frames = summary.selected_frames,
        primitive = summary.primitive,
        "Headless run complete"
    );
    Ok(summary)
}
