#![warn(clippy::todo)]
#![warn(clippy::unwrap_used)]

use std::cell::RefCell;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::rc::Rc;
use std::str::FromStr;

use anyhow::{Context as _, Error};
use log::*;
use structopt::StructOpt;
use thiserror::Error as ThisError;

mod canvas;
mod color;
mod config;
mod events;
mod logger;
mod prompt;
mod turtle;

pub mod global;

pub use canvas::{
    Canvas, CanvasRegistry, DisplayList, DrawCommand, Grid, SharedCanvas, SurfacePoint,
    SurfaceSize, SurfaceSpace, SurfaceVector, UserPoint, UserSpace,
};
pub use color::{Color, ParseColorError};
pub use config::Config;
pub use events::{InputEvent, Key};
pub use logger::Logger;
pub use prompt::{input_float, input_int, input_string, repeat, Prompter};
pub use turtle::{
    Turtle, TurtleConfig, TurtleError, DEFAULT_DOT_RADIUS, DEFAULT_POINTER_SCALE,
};

/// Command-line options.
#[derive(Debug, StructOpt)]
pub struct Options {
    /// A command script to execute before the interactive session.
    script: Option<PathBuf>,
}

/// Runs the interactive drawing session: one command per line against a
/// turtle bound to a character-grid canvas.
pub fn run(options: Options) -> Result<(), Error> {
    let config = match Config::read(Config::config_path()) {
        Ok(config) => config,
        Err(e) => {
            info!("unable to read config file: {}", e);
            Config::default()
        }
    };

    let mut registry = CanvasRegistry::new();
    let grid = registry.register(
        &config.canvas,
        Grid::new(SurfaceSize::new(config.surface.width, config.surface.height)),
    );

    let turtle_config = TurtleConfig::new(&config.canvas).pointer_scale(config.pointer_scale);
    let mut turtle = Turtle::create(turtle_config, &registry)?;

    if let Some(path) = &options.script {
        let script = fs::read_to_string(path)?;

        for (number, line) in script.lines().enumerate() {
            if is_blank(line) {
                continue;
            }

            let quit = run_line(&mut turtle, &grid, line)
                .with_context(|| format!("script line {}", number + 1))?;
            if quit {
                return Ok(());
            }
        }
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break;
        }

        if is_blank(&line) {
            continue;
        }

        match run_line(&mut turtle, &grid, line.trim()) {
            Ok(true) => break,
            Ok(false) => (),
            Err(e) => println!("{}", e),
        }
    }

    info!("session over");

    Ok(())
}

fn is_blank(line: &str) -> bool {
    let line = line.trim();
    line.is_empty() || line.starts_with('#')
}

/// Parses and applies one command line. Returns `true` when the line asks
/// to quit.
fn run_line(
    turtle: &mut Turtle,
    grid: &Rc<RefCell<Grid>>,
    line: &str,
) -> Result<bool, ParseCommandError> {
    let command = line.parse::<Command>()?;

    if let Command::Quit = command {
        return Ok(true);
    }

    apply(turtle, grid, command);
    Ok(false)
}

fn apply(turtle: &mut Turtle, grid: &Rc<RefCell<Grid>>, command: Command) {
    match command {
        Command::Forward(distance) => turtle.forward(distance),
        Command::Back(distance) => turtle.back(distance),
        Command::Left(degrees) => turtle.left(degrees),
        Command::Right(degrees) => turtle.right(degrees),
        Command::Heading(degrees) => turtle.set_heading(degrees),
        Command::Towards(x, y) => println!("{}", turtle.towards(x, y)),
        Command::PenUp => turtle.pen_up(),
        Command::PenDown => turtle.pen_down(),
        Command::PenColor(color) => turtle.set_pen_color(color),
        Command::FillColor(color) => turtle.set_fill_color(color),
        Command::LineWidth(width) => turtle.set_line_width(width),
        Command::Dot(radius) => turtle.dot(radius),
        Command::StartPath => turtle.start_path(),
        Command::FillPath => turtle.fill_path(),
        Command::Pos(x, y) => turtle.set_position(x, y),
        Command::RandomPos(x_min, x_max, y_min, y_max) => {
            turtle.set_random_position(x_min, x_max, y_min, y_max)
        }
        Command::Where => {
            let p = turtle.position();
            println!("({}, {})", p.x, p.y);
        }
        Command::Show => print!("{:?}", grid.borrow()),
        Command::Help => println!("{}", HELP),
        Command::Quit => (),
    }
}

const HELP: &str = "\
forward N / back N        move, drawing while the pen is down
left A / right A          turn by A degrees
heading A                 face A degrees (0 is up, clockwise)
towards X Y               print the heading that faces (X, Y)
penup / pendown           lift or lower the pen
pencolor C / fillcolor C  set a color (name, #RGB, or #RRGGBB)
linewidth W               set the stroke width
dot [R]                   fill a dot at the current position
startpath / fillpath      accumulate and fill a polygon
pos X Y                   jump to (X, Y), without drawing
random X0 X1 Y0 Y1        jump somewhere inside the rectangle
where                     print the current position
show                      print the canvas
quit                      leave";

/// One line of the drawing session.
#[derive(Debug, PartialEq)]
enum Command {
    Forward(f64),
    Back(f64),
    Left(f64),
    Right(f64),
    Heading(f64),
    Towards(f64, f64),
    PenUp,
    PenDown,
    PenColor(Color),
    FillColor(Color),
    LineWidth(f64),
    Dot(f64),
    StartPath,
    FillPath,
    Pos(f64, f64),
    RandomPos(f64, f64, f64, f64),
    Where,
    Show,
    Help,
    Quit,
}

#[derive(Debug, PartialEq, ThisError)]
enum ParseCommandError {
    #[error("empty command")]
    Empty,

    #[error("unknown command `{0}`; try `help`")]
    Unknown(String),

    #[error("`{0}` expects {1} numeric argument(s)")]
    BadArguments(String, usize),

    #[error("`{0}` expects a color")]
    BadColor(String),
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let name = words.next().ok_or(ParseCommandError::Empty)?;
        let args: Vec<&str> = words.collect();

        let numbers = |count: usize| -> Result<Vec<f64>, ParseCommandError> {
            if args.len() != count {
                return Err(ParseCommandError::BadArguments(name.to_string(), count));
            }

            args.iter()
                .map(|arg| {
                    arg.parse()
                        .map_err(|_| ParseCommandError::BadArguments(name.to_string(), count))
                })
                .collect()
        };

        let color = || -> Result<Color, ParseCommandError> {
            match args.as_slice() {
                [arg] => arg
                    .parse()
                    .map_err(|_| ParseCommandError::BadColor(name.to_string())),
                _ => Err(ParseCommandError::BadColor(name.to_string())),
            }
        };

        let command = match name {
            "forward" | "fd" => Command::Forward(numbers(1)?[0]),
            "back" | "bk" => Command::Back(numbers(1)?[0]),
            "left" | "lt" => Command::Left(numbers(1)?[0]),
            "right" | "rt" => Command::Right(numbers(1)?[0]),
            "heading" => Command::Heading(numbers(1)?[0]),
            "towards" => {
                let args = numbers(2)?;
                Command::Towards(args[0], args[1])
            }
            "penup" => Command::PenUp,
            "pendown" => Command::PenDown,
            "pencolor" => Command::PenColor(color()?),
            "fillcolor" => Command::FillColor(color()?),
            "linewidth" => Command::LineWidth(numbers(1)?[0]),
            "dot" => {
                if args.is_empty() {
                    Command::Dot(DEFAULT_DOT_RADIUS)
                } else {
                    Command::Dot(numbers(1)?[0])
                }
            }
            "startpath" => Command::StartPath,
            "fillpath" => Command::FillPath,
            "pos" => {
                let args = numbers(2)?;
                Command::Pos(args[0], args[1])
            }
            "random" => {
                let args = numbers(4)?;
                Command::RandomPos(args[0], args[1], args[2], args[3])
            }
            "where" => Command::Where,
            "show" => Command::Show,
            "help" => Command::Help,
            "quit" | "exit" => Command::Quit,
            _ => return Err(ParseCommandError::Unknown(name.to_string())),
        };

        Ok(command)
    }
}
