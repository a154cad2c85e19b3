//! Several hunters request routes to one target through a shared scheduler.
//!
//! Run: cargo run --bin waygrid-hunt -- --seed 7 --hunters 4
//!      cargo run --bin waygrid-hunt -- --map arena.txt

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use waygrid_core::{Point, Position};
use waygrid_demos::{
    Canvas, HUNTER_GLYPHS, ROUTE_GLYPH, TARGET_GLYPH, free_tiles, random_world, take_random,
    tile_settings, trace,
};
use waygrid_paths::{PathScheduler, SchedulerState, TileWorld};

/// Hunters path toward a target over a cost-weighted grid
#[derive(Parser, Debug)]
#[command(name = "waygrid-hunt")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// ASCII map file ('#' obstacle, '.' ground, digits terrain layers)
    #[arg(short, long)]
    map: Option<PathBuf>,

    /// Width of a generated map
    #[arg(long, default_value_t = 40)]
    width: i32,

    /// Height of a generated map
    #[arg(long, default_value_t = 16)]
    height: i32,

    /// Fraction of obstacle tiles in a generated map
    #[arg(long, default_value_t = 0.22)]
    density: f64,

    /// Random seed for map generation and placement
    #[arg(short, long, default_value_t = 7)]
    seed: u64,

    /// Number of hunters
    #[arg(long, default_value_t = 3)]
    hunters: usize,

    /// Penalty blur radius (default: library default)
    #[arg(long)]
    blur: Option<usize>,
}

struct Outcome {
    hunter: usize,
    waypoints: Vec<Position>,
    success: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();
    let mut rng = StdRng::seed_from_u64(args.seed);

    let world = match &args.map {
        Some(path) => TileWorld::parse(&std::fs::read_to_string(path)?, 1.0)?,
        None => random_world(&mut rng, args.width, args.height, args.density, 1.0),
    };
    let hunters = args.hunters.min(HUNTER_GLYPHS.len());
    let mut pool = free_tiles(&world);
    let placed = take_random(&mut rng, &mut pool, hunters + 1);
    let Some((&target, starts)) = placed.split_last() else {
        return Err("map has no free tiles".into());
    };
    log::info!("{} hunters chasing {target}", starts.len());

    let settings = tile_settings(&world, args.blur);
    let mut scheduler = PathScheduler::new(settings, world)?;
    let outcomes = Rc::new(RefCell::new(Vec::new()));
    let goal = scheduler.world().center_of(target);
    for (hunter, &start) in starts.iter().enumerate() {
        let sink = Rc::clone(&outcomes);
        let from = scheduler.world().center_of(start);
        scheduler.submit(from, goal, move |waypoints, success| {
            sink.borrow_mut().push(Outcome {
                hunter,
                waypoints,
                success,
            });
        });
    }

    let mut polls = 0;
    while scheduler.poll() == SchedulerState::Busy {
        polls += 1;
    }

    let world = scheduler.world();
    let mut canvas = Canvas::new(world);
    for o in outcomes.borrow().iter() {
        for p in trace(world, starts[o.hunter], &o.waypoints) {
            canvas.put(p, ROUTE_GLYPH);
        }
    }
    for (hunter, &start) in starts.iter().enumerate() {
        canvas.put(start, HUNTER_GLYPHS[hunter]);
    }
    canvas.put(target, TARGET_GLYPH);
    print!("{canvas}");

    for o in outcomes.borrow().iter() {
        let glyph = HUNTER_GLYPHS[o.hunter];
        let from: Point = starts[o.hunter];
        if o.success {
            println!("{glyph} {from}: {} waypoints", o.waypoints.len());
        } else {
            println!("{glyph} {from}: no route");
        }
    }
    if let Some((lo, hi)) = scheduler.grid().map(|g| g.penalty_range()) {
        println!(
            "penalties {lo}..={hi}, {} requests in {} polls",
            scheduler.completed(),
            polls + 1
        );
    }
    Ok(())
}
