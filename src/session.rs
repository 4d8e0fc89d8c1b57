//! Textual control surface.
//!
//! A [`Session`] drives an [`EditorContext`] from line-oriented commands,
//! read from a script file or stdin. Coordinates are world coordinates.
//! Blank lines and lines starting with `#` are ignored.

use std::fmt;
use std::io::{BufRead, Write};
use std::str::FromStr;

use gridpoly_core::{polygon_report, Point};
use gridpoly_designer::{Action, Bounds, EditorContext, Key, Renderer, Scene};
use gridpoly_settings::Config;
use thiserror::Error;

/// Instructions printed when the program starts.
pub const USAGE: &[&str] = &[
    "- Click on the canvas to create a polygon: `click X Y`, close it by clicking the first vertex.",
    "- `escape` or `start` clears the current selection and starts a new one.",
    "- `add` saves the current polygon selection.",
    "- `remove` removes the selected area from the saved polygons.",
    "- `merge` merges overlapping saved polygons and reports the final vertices.",
    "- `shift DX DY` moves all vertices; `press`/`move`/`release` drags a single vertex.",
    "- `help` lists every command.",
];

const HELP: &[&str] = &[
    "move X Y          move the cursor, prints the snapped position",
    "press X Y         press at a position (grabs a nearby vertex)",
    "release X Y       release at a position (adds a vertex or ends a drag)",
    "click X Y         press and release",
    "shift DX DY       move every vertex of the selection",
    "start | clear     clear the selection and start a new one",
    "add               save the selection as a polygon",
    "remove            subtract the selection from the saved polygons",
    "reset             discard everything",
    "merge             merge the saved polygons",
    "escape            discard the selection",
    "grid SX SY        set the grid spacing",
    "gridx V | gridy V move a spacing slider",
    "view X0 Y0 X1 Y1  show a world rectangle",
    "zoom F X Y        scale the view by F around (X, Y)",
    "pan DX DY         move the view content",
    "home              return to the home view",
    "show [json]       print the current scene",
    "help              this list",
    "quit              end the session",
];

/// Errors from parsing a command line.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommandError {
    #[error("Unknown command '{0}'")]
    Unknown(String),

    #[error("'{command}' expects {expected} argument(s), got {got}")]
    ArgumentCount {
        command: String,
        expected: usize,
        got: usize,
    },

    #[error("Invalid number '{0}'")]
    InvalidNumber(String),
}

/// One parsed command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Move(Point),
    Press(Point),
    Release(Point),
    Click(Point),
    Shift(f64, f64),
    Button(Action),
    Escape,
    Grid(f64, f64),
    GridX(f64),
    GridY(f64),
    View(Bounds),
    Zoom { factor: f64, anchor: Point },
    Pan(f64, f64),
    Home,
    Show { json: bool },
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let name = words.next().unwrap_or_default().to_ascii_lowercase();
        let args: Vec<&str> = words.collect();

        let command = match name.as_str() {
            "move" => Command::Move(point_arg(&name, &args)?),
            "press" => Command::Press(point_arg(&name, &args)?),
            "release" => Command::Release(point_arg(&name, &args)?),
            "click" => Command::Click(point_arg(&name, &args)?),
            "shift" => {
                let [dx, dy] = numbers::<2>(&name, &args)?;
                Command::Shift(dx, dy)
            }
            "start" | "clear" => Command::Button(Action::StartOrClear),
            "add" => Command::Button(Action::AddPolygon),
            "remove" => Command::Button(Action::RemoveSelectedArea),
            "reset" => Command::Button(Action::Reset),
            "merge" => Command::Button(Action::Merge),
            "escape" | "esc" => Command::Escape,
            "grid" => {
                let [sx, sy] = numbers::<2>(&name, &args)?;
                Command::Grid(sx, sy)
            }
            "gridx" => Command::GridX(numbers::<1>(&name, &args)?[0]),
            "gridy" => Command::GridY(numbers::<1>(&name, &args)?[0]),
            "view" => {
                let [x0, y0, x1, y1] = numbers::<4>(&name, &args)?;
                Command::View(Bounds::new(x0, y0, x1, y1))
            }
            "zoom" => {
                let [factor, x, y] = numbers::<3>(&name, &args)?;
                Command::Zoom {
                    factor,
                    anchor: Point::new(x, y),
                }
            }
            "pan" => {
                let [dx, dy] = numbers::<2>(&name, &args)?;
                Command::Pan(dx, dy)
            }
            "home" => Command::Home,
            "show" => match args.as_slice() {
                [] => Command::Show { json: false },
                ["json"] => Command::Show { json: true },
                _ => return Err(CommandError::Unknown(line.trim().to_string())),
            },
            "help" => Command::Help,
            "quit" | "exit" => Command::Quit,
            _ => return Err(CommandError::Unknown(name)),
        };
        Ok(command)
    }
}

fn point_arg(name: &str, args: &[&str]) -> Result<Point, CommandError> {
    let [x, y] = numbers::<2>(name, args)?;
    Ok(Point::new(x, y))
}

fn numbers<const N: usize>(name: &str, args: &[&str]) -> Result<[f64; N], CommandError> {
    if args.len() != N {
        return Err(CommandError::ArgumentCount {
            command: name.to_string(),
            expected: N,
            got: args.len(),
        });
    }
    let mut values = [0.0; N];
    for (value, arg) in values.iter_mut().zip(args) {
        *value = arg
            .parse()
            .map_err(|_| CommandError::InvalidNumber(arg.to_string()))?;
    }
    Ok(values)
}

/// Renderer that keeps the latest scene for textual output.
#[derive(Debug, Default)]
pub struct TextRenderer {
    frames: usize,
    last: Option<Scene>,
}

impl TextRenderer {
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// The most recently rendered scene.
    pub fn last_scene(&self) -> Option<&Scene> {
        self.last.as_ref()
    }

    /// Human-readable description of a scene.
    pub fn describe(scene: &Scene) -> Vec<String> {
        let mut lines = vec![format!(
            "grid: ({}, {}){}",
            scene.spacing.0,
            scene.spacing.1,
            if scene.grid.is_some() { "" } else { " [hidden]" }
        )];
        lines.push(format!("view: {}", scene.bounds));
        lines.push(format!("saved polygons: {}", scene.saved.len()));
        lines.extend(polygon_report(&scene.saved));
        if let Some(transient) = &scene.transient {
            lines.push(format!("candidate: {}", transient.exterior));
        }
        if !scene.current.is_empty() {
            lines.push(format!("selection: {}", format_points(&scene.current)));
        }
        if let Some(status) = &scene.status {
            lines.push(format!("! {}", status));
        }
        lines
    }
}

impl Renderer for TextRenderer {
    fn render(&mut self, scene: &Scene) {
        self.frames += 1;
        self.last = Some(scene.clone());
    }
}

fn format_points(points: &[Point]) -> String {
    let parts: Vec<String> = points.iter().map(|p| p.to_string()).collect();
    format!("[{}]", parts.join(", "))
}

/// Whether the command loop should continue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// An editor context driven by text commands.
pub struct Session {
    context: EditorContext<TextRenderer>,
}

impl Session {
    pub fn new(config: Config) -> Self {
        Self {
            context: EditorContext::new(config, TextRenderer::default()),
        }
    }

    pub fn context(&self) -> &EditorContext<TextRenderer> {
        &self.context
    }

    /// Runs one command and returns the lines to print.
    pub fn execute(&mut self, command: Command) -> (Flow, Vec<String>) {
        let lines = match command {
            Command::Move(world) => {
                let snapped = self.context.pointer_move(world);
                vec![format!("cursor: {}", snapped)]
            }
            Command::Press(world) => {
                self.context.pointer_press(world);
                self.selection_lines()
            }
            Command::Release(world) => {
                self.context.pointer_release(world);
                self.selection_lines()
            }
            Command::Click(world) => {
                self.context.click(world);
                self.selection_lines()
            }
            Command::Shift(dx, dy) => {
                self.context.shift_all(dx, dy);
                self.selection_lines()
            }
            Command::Button(action) => {
                self.context.perform(action);
                self.outcome_lines(action)
            }
            Command::Escape => {
                self.context.key_press(Key::Escape);
                vec!["selection cleared".to_string()]
            }
            Command::Grid(sx, sy) => {
                self.context.set_grid_spacing(sx, sy);
                self.grid_lines()
            }
            Command::GridX(value) => {
                self.context.set_grid_spacing_x(value);
                self.grid_lines()
            }
            Command::GridY(value) => {
                self.context.set_grid_spacing_y(value);
                self.grid_lines()
            }
            Command::View(bounds) => {
                self.context.set_view(bounds);
                self.view_lines()
            }
            Command::Zoom { factor, anchor } => {
                self.context.zoom_view(factor, anchor);
                self.view_lines()
            }
            Command::Pan(dx, dy) => {
                self.context.pan_view(dx, dy);
                self.view_lines()
            }
            Command::Home => {
                self.context.home_view();
                self.view_lines()
            }
            Command::Show { json: false } => match self.context.renderer().last_scene() {
                Some(scene) => TextRenderer::describe(scene),
                None => TextRenderer::describe(&self.context.scene()),
            },
            Command::Show { json: true } => match serde_json::to_string_pretty(&self.context.scene()) {
                Ok(json) => vec![json],
                Err(err) => vec![format!("error: {}", err)],
            },
            Command::Help => HELP.iter().map(|line| line.to_string()).collect(),
            Command::Quit => return (Flow::Quit, Vec::new()),
        };
        (Flow::Continue, lines)
    }

    /// Parses and runs one script line. Blank lines and comments yield nothing.
    pub fn run_line(&mut self, line: &str) -> Result<(Flow, Vec<String>), CommandError> {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Ok((Flow::Continue, Vec::new()));
        }
        let command: Command = trimmed.parse()?;
        tracing::debug!("Command: {:?}", command);
        Ok(self.execute(command))
    }

    /// Reads commands until end of input or `quit`.
    ///
    /// Malformed lines are reported on `output` and skipped.
    pub fn run<B: BufRead, W: Write>(&mut self, input: B, mut output: W) -> std::io::Result<()> {
        for line in input.lines() {
            let line = line?;
            match self.run_line(&line) {
                Ok((flow, lines)) => {
                    for text in lines {
                        writeln!(output, "{}", text)?;
                    }
                    if flow == Flow::Quit {
                        break;
                    }
                }
                Err(err) => {
                    tracing::warn!("{}", err);
                    writeln!(output, "error: {}", err)?;
                }
            }
        }
        output.flush()
    }

    /// Ends the session and returns the number of frames rendered.
    pub fn shutdown(self) -> usize {
        self.context.shutdown().frames()
    }

    fn selection_lines(&self) -> Vec<String> {
        vec![format!(
            "selection: {}",
            format_points(self.context.editor().current())
        )]
    }

    fn view_lines(&self) -> Vec<String> {
        vec![format!("view: {}", self.context.viewport().visible_bounds())]
    }

    fn grid_lines(&self) -> Vec<String> {
        let (sx, sy) = self.context.editor().snapper().spacing();
        vec![format!("grid: ({}, {})", sx, sy)]
    }

    fn outcome_lines(&self, action: Action) -> Vec<String> {
        let mut lines = Vec::new();
        if action == Action::Merge && self.context.status().is_none() {
            lines.push("Final merged polygon(s) vertices:".to_string());
            lines.extend(polygon_report(self.context.editor().saved()));
        }
        lines.push(format!(
            "saved polygons: {}",
            self.context.editor().saved().len()
        ));
        if let Some(status) = self.context.status() {
            lines.push(format!("! {}", status));
        }
        lines
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("saved", &self.context.editor().saved().len())
            .field("current", &self.context.editor().current().len())
            .field("status", &self.context.status())
            .finish()
    }
}
