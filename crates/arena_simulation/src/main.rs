//! Headless симуляция арены
//!
//! Запускает Bevy App без рендера: игрок + гоблины, FlatGround вместо
//! геометрии арены, клавиши можно "зажать" через --hold.

use std::path::PathBuf;

use clap::Parser;

use arena_simulation::{
    create_headless_app_with, init_logger, log_error, log_info, ArenaConfig, GameOutcome, Goblin,
    Health, InputMap, Player,
};

#[derive(Parser, Debug)]
#[command(name = "arena_simulation", about = "Headless goblin arena simulation")]
struct Args {
    /// RNG seed (перекрывает seed из конфига)
    #[arg(long)]
    seed: Option<u64>,

    /// Сколько кадров прогнать
    #[arg(long, default_value_t = 1000)]
    frames: u32,

    /// JSON конфиг (ArenaConfig)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Клавиши, зажатые всю симуляцию (например: z,Shift,e)
    #[arg(long, value_delimiter = ',')]
    hold: Vec<String>,
}

fn main() {
    let args = Args::parse();
    init_logger();

    let mut config = match &args.config {
        Some(path) => match ArenaConfig::from_json_file(path) {
            Ok(config) => config,
            Err(err) => {
                log_error(&format!("{}", err));
                std::process::exit(2);
            }
        },
        None => ArenaConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.simulation.seed = seed;
    }

    log_info(&format!(
        "Starting arena headless simulation (seed: {}, frames: {})",
        config.simulation.seed, args.frames
    ));

    let mut app = create_headless_app_with(config);

    {
        let mut input = app.world_mut().resource_mut::<InputMap>();
        for key in &args.hold {
            input.press(key);
        }
    }

    for frame in 0..args.frames {
        app.update();

        if frame % 100 == 0 {
            print_status(&mut app, frame);
        }

        if app.world().resource::<GameOutcome>().is_finished() {
            print_status(&mut app, frame);
            break;
        }
    }

    let outcome = *app.world().resource::<GameOutcome>();
    log_info(&format!("Simulation complete: {:?}", outcome));
}

fn print_status(app: &mut bevy::app::App, frame: u32) {
    let world = app.world_mut();

    let mut goblins = world.query::<(&Goblin, &Health)>();
    let alive = goblins.iter(world).filter(|(_, health)| health.is_alive()).count();
    let total = goblins.iter(world).count();

    let mut players = world.query::<(&Player, &Health)>();
    let player_health = players
        .iter(world)
        .next()
        .map(|(_, health)| health.current)
        .unwrap_or(0);

    log_info(&format!(
        "Frame {}: goblins alive {}/{}, player hp {}",
        frame, alive, total, player_health
    ));
}
