use rand::Rng;
use std::env;
use std::io::{self, BufRead};
use std::process;
use std::sync::mpsc::{self, Sender};
use std::thread;
use std::time::Duration;
use tracing::{error, info, warn};
use voxelboard::config::pixel_scale;
use voxelboard::{parse_series, ChartCommand, ChartConfig, ChartKind, ChartWindow, Resolution};

struct Args {
    kind: ChartKind,
    title: Option<String>,
    resolution: Option<Resolution>,
    stdin: bool,
}

fn parse_args() -> Result<Args, voxelboard::ChartError> {
    let mut kind = ChartKind::Bar;
    let mut title = None;
    let mut resolution = None;
    let mut stdin = false;
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--chart" => {
                if let Some(name) = args.next() {
                    kind = name.parse()?;
                }
            }
            "--title" => title = args.next(),
            "--size" => {
                if let Some(name) = args.next() {
                    resolution = pixel_scale::by_name(&name);
                    if resolution.is_none() {
                        warn!(size = %name, "unknown size preset, using the chart default");
                    }
                }
            }
            "--stdin" => stdin = true,
            other => warn!(arg = other, "ignoring unknown argument"),
        }
    }
    Ok(Args {
        kind,
        title,
        resolution,
        stdin,
    })
}

/// One series per line; bad lines are reported and skipped.
fn feed_from_stdin(sender: Sender<ChartCommand>) {
    for line in io::stdin().lock().lines() {
        let Ok(line) = line else { break };
        match parse_series(&line) {
            Ok(series) => {
                if sender.send(ChartCommand::SetSeries(series)).is_err() {
                    break;
                }
            }
            Err(err) => warn!(%err, "skipping line"),
        }
    }
}

fn feed_random(sender: Sender<ChartCommand>, kind: ChartKind) {
    let mut rng = rand::rng();
    loop {
        let len = match kind {
            ChartKind::Pie => rng.random_range(2..=5),
            _ => rng.random_range(4..=12),
        };
        let series: Vec<f64> = (0..len).map(|_| rng.random_range(0.0..100.0)).collect();
        if sender.send(ChartCommand::SetSeries(series)).is_err() {
            break;
        }
        thread::sleep(Duration::from_millis(2000));
    }
}

fn main() {
    tracing_subscriber::fmt::init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(err) => {
            error!(%err, "invalid arguments");
            process::exit(2);
        }
    };

    let config = ChartConfig::builder()
        .kind(args.kind)
        .maybe_resolution(args.resolution)
        .title(args.title.unwrap_or_else(|| format!("Voxelboard - {}", args.kind)))
        .build();

    let (sender, receiver) = mpsc::channel();
    let kind = args.kind;
    if args.stdin {
        info!("reading series from stdin, one per line");
        thread::spawn(move || feed_from_stdin(sender));
    } else if kind != ChartKind::Activity {
        thread::spawn(move || feed_random(sender, kind));
    }

    let mut window = ChartWindow::new(config);
    if let Err(err) = window.show_with_commands(receiver) {
        error!(%err, "chart window failed");
        process::exit(1);
    }
}
