use rand::Rng;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;
use voxelboard::{ChartCommand, ChartConfig, ChartKind, ChartWindow, EasingConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    // Snappier bars than the default, starting from the pink palette entry.
    let config = ChartConfig::builder()
        .title("Submissions per day".to_string())
        .kind(ChartKind::Bar)
        .color_offset(2)
        .scale(12)
        .easing(EasingConfig {
            bar_rate: 0.2,
            ..EasingConfig::default()
        })
        .build();

    let mut window = ChartWindow::new(config);
    window.set_series(vec![0.0; 7]);

    let (sender, receiver) = mpsc::channel();

    thread::spawn(move || {
        let mut rng = rand::rng();
        loop {
            let series: Vec<f64> = (0..7).map(|_| rng.random_range(0.0..50.0)).collect();
            let offset = rng.random_range(0..5);
            let commands = [
                ChartCommand::SetSeries(series),
                ChartCommand::SetColorOffset(offset),
            ];

            if commands.into_iter().any(|cmd| sender.send(cmd).is_err()) {
                break;
            }

            thread::sleep(Duration::from_millis(1500));
        }
    });

    println!("Streaming random bar heights; close the window to exit");
    window.show_with_commands(receiver)?;
    Ok(())
}
