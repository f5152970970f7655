//! Tilt Maze entry point
//!
//! `play` runs a headless session on a map with a fixed step and logs what
//! happens. `sample-map` drives the editor model to author a small map.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use glam::DVec2;

use tilt_maze::consts::SIM_DT;
use tilt_maze::editor::{EditMode, Editor, EditorAction, EditorInput};
use tilt_maze::platform::{Key, KeyboardState, MouseState};
use tilt_maze::renderer::build_scene;
use tilt_maze::sim::{GameEvent, GamePhase, Session, TickInput, Tilt, tick};
use tilt_maze::{ItemCatalog, MapData, Settings};

#[derive(Parser, Debug)]
#[command(author, version, about = "Rotatable-board rolling ball maze", long_about = None)]
struct Cli {
    /// Settings JSON (defaults are used when missing)
    #[arg(long, global = true, default_value = Settings::DEFAULT_PATH)]
    settings: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a map headlessly
    Play {
        #[arg(long)]
        map: PathBuf,
        /// Simulated seconds
        #[arg(long, default_value_t = 10.0)]
        seconds: f64,
        /// Tilt held for the whole run
        #[arg(long, value_enum, default_value_t = TiltArg::None)]
        tilt: TiltArg,
        /// Fixed step (seconds)
        #[arg(long, default_value_t = SIM_DT)]
        dt: f64,
        /// Write the final ball and board positions as a map file
        #[arg(long)]
        save_final: Option<PathBuf>,
    },
    /// Author a small playable map with the editor and save it
    SampleMap {
        #[arg(long)]
        out: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum TiltArg {
    None,
    Left,
    Right,
}

impl From<TiltArg> for Tilt {
    fn from(arg: TiltArg) -> Self {
        match arg {
            TiltArg::None => Tilt::None,
            TiltArg::Left => Tilt::Left,
            TiltArg::Right => Tilt::Right,
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    let settings = Settings::load_from(&cli.settings);

    match cli.command {
        Command::Play {
            map,
            seconds,
            tilt,
            dt,
            save_final,
        } => play(
            &settings,
            &map,
            seconds,
            tilt.into(),
            dt,
            save_final.as_deref(),
        ),
        Command::SampleMap { out } => sample_map(&settings, out),
    }
}

fn play(
    settings: &Settings,
    map_path: &Path,
    seconds: f64,
    tilt: Tilt,
    dt: f64,
    save_final: Option<&Path>,
) -> ExitCode {
    if dt.is_nan() || dt <= 0.0 {
        log::error!("Step must be positive, got {}", dt);
        return ExitCode::FAILURE;
    }

    let map = match MapData::load(map_path) {
        Ok(map) => map,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let catalog = ItemCatalog::from_config(&settings.item_catalog);
    let mut session = Session::from_map(&map, settings, &catalog);
    let input = TickInput {
        tilt,
        ..Default::default()
    };

    let steps = (seconds / dt).ceil().max(0.0) as u64;
    log::info!(
        "Playing {} for {} steps of {:.4}s",
        map_path.display(),
        steps,
        dt
    );

    for step in 0..steps {
        for event in tick(&mut session, &input, dt) {
            log::info!("[{:.2}s] {:?}", step as f64 * dt, event);
            if event == GameEvent::QuitRequested {
                return ExitCode::SUCCESS;
            }
        }
        if matches!(
            session.attempt.phase,
            GamePhase::Cleared | GamePhase::GameOver
        ) {
            break;
        }
    }

    let scene = build_scene(&session, &catalog);
    log::debug!("Final frame: {} draw commands", scene.commands.len());
    log::info!(
        "Finished in {:?}: life {}, score {}, ball at ({:.3}, {:.3})",
        session.attempt.phase,
        session.attempt.life,
        session.attempt.score,
        session.ball.pos.x,
        session.ball.pos.y
    );

    if let Some(path) = save_final {
        if let Err(e) = session.current_level().to_map().save(path) {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}

/// Feeds synthetic mouse and keyboard frames to the editor
struct EditorDriver {
    editor: Editor,
    mouse: MouseState,
    keys: KeyboardState,
}

impl EditorDriver {
    fn frame(
        &mut self,
        left: bool,
        right: bool,
        pos: DVec2,
        keys: &[Key],
    ) -> Vec<EditorAction> {
        self.mouse.update(left, right, pos);
        self.keys.update(keys.iter().copied());
        self.editor.handle(&EditorInput {
            mouse: &self.mouse,
            keys: &self.keys,
        })
    }

    fn drag(&mut self, from: DVec2, to: DVec2) {
        self.frame(true, false, from, &[]);
        self.frame(true, false, to, &[]);
        self.frame(false, false, to, &[]);
    }

    fn press(&mut self, key: Key) -> Vec<EditorAction> {
        let actions = self.frame(false, false, DVec2::ZERO, &[key]);
        self.frame(false, false, DVec2::ZERO, &[]);
        actions
    }

    fn switch_to(&mut self, mode: EditMode) {
        while self.editor.mode() != mode {
            self.press(Key::Space);
        }
    }
}

fn sample_map(settings: &Settings, out: PathBuf) -> ExitCode {
    let mut driver = EditorDriver {
        editor: Editor::new(settings.editor.clone(), out),
        mouse: MouseState::new(),
        keys: KeyboardState::new(),
    };
    let ppm = settings.editor.pixel_per_meter;
    let px = |x: f64, y: f64| DVec2::new(x, y) * ppm;

    driver.switch_to(EditMode::Rect);
    driver.drag(px(1.0, 1.0), px(15.0, 13.0));

    driver.switch_to(EditMode::Line);
    driver.drag(px(2.0, 5.0), px(10.0, 7.0));
    driver.drag(px(14.0, 8.0), px(6.0, 10.5));

    driver.switch_to(EditMode::Ball);
    driver.drag(px(3.5, 3.0), px(4.5, 3.0));

    driver.switch_to(EditMode::Goal);
    driver.drag(px(0.0, 14.0), px(16.0, 14.0));

    driver.switch_to(EditMode::Item);
    driver.drag(px(0.4, 14.5), px(1.6, 14.5));
    driver.drag(px(8.4, 14.5), px(9.6, 14.5));

    match driver.press(Key::W).as_slice() {
        [EditorAction::Saved(path)] => {
            log::info!("Sample map written to {}", path.display());
            ExitCode::SUCCESS
        }
        _ => ExitCode::FAILURE,
    }
}
