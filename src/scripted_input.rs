use anyhow::Context;
use glam::{Vec2, Vec3};
use serde::Deserialize;
use spatial_pointer_core::Ray;
use spatial_pointer_input::InputState;
use std::{fs, path::Path};

#[derive(Debug, Deserialize)]
struct ScriptedPointerFile {
    steps: Vec<ScriptedStep>,
}

/// One segment of scripted pointer input, held for `duration` seconds.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct ScriptedStep {
    pub duration: f32,
    /// Device pointer position in NDC.
    #[serde(default)]
    pub ndc: Option<[f32; 2]>,
    /// Named scene target to point the device at ("next", "previous").
    #[serde(default)]
    pub aim: Option<String>,
    /// Drive the device pointer with touch events instead of the mouse.
    #[serde(default)]
    pub touch: bool,
    /// Controller ray; setting one presents an XR session for the step.
    #[serde(default)]
    pub controller: Option<ScriptedRay>,
    #[serde(default)]
    pub engaged: bool,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
pub struct ScriptedRay {
    pub origin: [f32; 3],
    pub direction: [f32; 3],
}

const SCRIPT_TOUCH_ID: u64 = 0;

pub struct ScriptedPointerPlayer {
    steps: Vec<ScriptedStep>,
    index: usize,
    time_in_step: f32,
    finished: bool,
}

impl ScriptedPointerPlayer {
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read pointer script {}", path.display()))?;
        let file: ScriptedPointerFile = serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse pointer script {}", path.display()))?;
        Self::from_steps(file.steps)
    }

    pub fn from_steps(steps: Vec<ScriptedStep>) -> anyhow::Result<Self> {
        if steps.is_empty() {
            anyhow::bail!("pointer script contains no steps");
        }
        Ok(Self {
            steps,
            index: 0,
            time_in_step: 0.0,
            finished: false,
        })
    }

    /// Built-in demo: hover and click "next" twice, then "previous" once.
    pub fn demo() -> Self {
        let aim = |target: &str, engaged: bool, duration: f32| ScriptedStep {
            duration,
            aim: Some(target.to_string()),
            engaged,
            ..Default::default()
        };
        Self {
            steps: vec![
                ScriptedStep {
                    duration: 0.25,
                    ..Default::default()
                },
                aim("next", false, 0.25),
                aim("next", true, 1.0 / 60.0),
                aim("next", false, 0.25),
                aim("next", true, 1.0 / 60.0),
                aim("next", false, 0.25),
                aim("previous", false, 0.25),
                aim("previous", true, 1.0 / 60.0),
                aim("previous", false, 0.25),
            ],
            index: 0,
            time_in_step: 0.0,
            finished: false,
        }
    }

    /// Step active for the coming frame.
    pub fn current(&self) -> &ScriptedStep {
        &self.steps[self.index]
    }

    /// Whether the last step has run to its end.
    pub fn finished(&self) -> bool {
        self.finished
    }

    pub fn advance(&mut self, dt: f32) {
        if self.finished {
            return;
        }
        // At most one step per frame, so short steps are never skipped.
        self.time_in_step += dt;
        let duration = self.steps[self.index].duration;
        if self.time_in_step >= duration {
            self.time_in_step -= duration;
            if self.index + 1 < self.steps.len() {
                self.index += 1;
            } else {
                self.finished = true;
            }
        }
    }
}

impl ScriptedStep {
    /// Replay this step as the events a window or XR runtime would send.
    ///
    /// `resolve_aim` maps a named target to a world-space point and
    /// `world_to_ndc` projects that point through the camera.
    pub fn apply(
        &self,
        input: &mut InputState,
        primary_controller: usize,
        viewport: (u32, u32),
        resolve_aim: impl Fn(&str) -> Option<Vec3>,
        world_to_ndc: impl Fn(Vec3) -> Vec2,
    ) -> anyhow::Result<()> {
        if let Some(scripted) = self.controller {
            let ray = Ray::new(scripted.origin.into(), scripted.direction.into())
                .context("scripted controller ray is degenerate")?;
            input.xr_mut().session_started();
            input.xr_mut().set_ray(primary_controller, Some(ray));
            if self.engaged != input.engaged() {
                if self.engaged {
                    input.select_start(primary_controller);
                } else {
                    input.select_end(primary_controller);
                }
            }
            return Ok(());
        }

        if input.xr().presenting() {
            input.xr_mut().session_ended();
        }

        let ndc = match (&self.aim, self.ndc) {
            (Some(name), _) => {
                let point = resolve_aim(name)
                    .with_context(|| format!("unknown scripted aim target {name:?}"))?;
                Some(world_to_ndc(point))
            }
            (None, Some([x, y])) => Some(Vec2::new(x, y)),
            (None, None) => None,
        };
        let pixels = ndc.map(|ndc| ndc_to_pixels(ndc, viewport));

        if self.touch {
            let touching = input.device().touch_active();
            match pixels {
                Some((x, y)) if self.engaged => {
                    if touching {
                        input.touch_moved(SCRIPT_TOUCH_ID, x, y);
                    } else {
                        input.touch_started(SCRIPT_TOUCH_ID, x, y);
                    }
                }
                _ if touching => input.touch_ended(SCRIPT_TOUCH_ID),
                _ => {}
            }
            return Ok(());
        }

        if let Some((x, y)) = pixels {
            input.pointer_moved(x, y);
        }
        if self.engaged != input.engaged() {
            if self.engaged {
                input.pointer_pressed();
            } else {
                input.pointer_released();
            }
        }
        Ok(())
    }
}

fn ndc_to_pixels(ndc: Vec2, (width, height): (u32, u32)) -> (f64, f64) {
    let x = (ndc.x as f64 + 1.0) * 0.5 * width as f64;
    let y = (1.0 - ndc.y as f64) * 0.5 * height as f64;
    (x, y)
}
