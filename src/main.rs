//! LED cube frame generator CLI - Generate animations from JSON configuration.

#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use ledcube_frames::{
    AnimationPlayer, GeneratorConfig,
    animation::{FileWriter, generate_frames},
};

fn main() {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage(&args[0]);
        std::process::exit(1);
    }

    match args[1].as_str() {
        "--example" => print_example_config(),
        "--play" => match args.get(2) {
            Some(path) => play(PathBuf::from(path)),
            None => {
                print_usage(&args[0]);
                std::process::exit(1);
            }
        },
        path => generate(PathBuf::from(path)),
    }
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} <config.json>", program);
    eprintln!("       {} --play <animation.json>", program);
    eprintln!("       {} --example", program);
    eprintln!();
    eprintln!("Generate LED cube animation frames from JSON configuration.");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  config.json     Path to generator configuration file");
    eprintln!("  --play FILE     Summarize a generated batch animation");
    eprintln!("  --example       Print an example configuration");
}

fn generate(config_path: PathBuf) {
    let config_str = fs::read_to_string(&config_path).unwrap_or_else(|e| {
        eprintln!("Error reading config file: {}", e);
        std::process::exit(1);
    });

    let config = GeneratorConfig::from_json(&config_str).unwrap_or_else(|e| {
        eprintln!("Error parsing config: {}", e);
        std::process::exit(1);
    });

    println!("LED Cube Frame Generator");
    println!("========================");
    println!("Cube: {}", config.dimensions());
    println!("Animation: {:?}", config.animation);
    println!("Serializer: {:?}", config.serializer);
    println!("Output: {}", config.output_dir.display());
    if let Some(cap) = config.max_frames {
        println!("Frame cap: {}", cap);
    }
    println!();

    let start = Instant::now();
    let mut writer = FileWriter::new(&config.output_dir);
    let stats = generate_frames(&config, &mut writer).unwrap_or_else(|e| {
        eprintln!("Generation failed: {}", e);
        std::process::exit(1);
    });

    for path in &stats.artifacts {
        println!("  wrote {}", path.display());
    }
    println!();
    println!("Generated {}", stats);
    println!("Time: {:.3}s", start.elapsed().as_secs_f32());
}

fn play(path: PathBuf) {
    let player = AnimationPlayer::open(&path).unwrap_or_else(|e| {
        eprintln!("Error loading animation: {}", e);
        std::process::exit(1);
    });

    println!("Animation: {}", path.display());
    println!("Cube: {}", player.dimensions());
    println!("Frames: {}", player.frame_count());
    for (index, grid) in player.frames().enumerate() {
        println!("  Frame {}: {} lit voxels", index, grid.lit_count());
    }
}

fn print_example_config() {
    let config = GeneratorConfig::default();

    println!("Example configuration (config.json):");
    match serde_json::to_string_pretty(&config) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing example: {}", e);
            std::process::exit(1);
        }
    }
}
