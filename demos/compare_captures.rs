use std::env;
use std::fs;
use std::process;

use traceroute_history::{
    analyze, decide, format_markers, render, Analysis, AnalysisConfig, Capture, OutputFormat,
    INCOMPARABLE_NOTICE,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let (current_path, previous_path) = match args.as_slice() {
        [current, previous, ..] => (current, previous),
        _ => {
            eprintln!("usage: compare_captures <current> <previous> [threshold_ms] [plain|console|web]");
            process::exit(2);
        }
    };

    let threshold = args.get(2).map(|t| t.parse::<u32>()).transpose()?.unwrap_or(0);
    let format = args
        .get(3)
        .map(|f| f.parse::<OutputFormat>())
        .transpose()?
        .unwrap_or_default();

    let config = AnalysisConfig::builder()
        .rtt_detection_threshold(threshold)
        .output_format(format)
        .build();
    print!("{config}");

    let current = Capture::new(0, fs::read_to_string(current_path)?);
    let previous = Capture::new(0, fs::read_to_string(previous_path)?);

    match analyze(&current.raw, &previous.raw, config.rtt_detection_threshold) {
        Analysis::Compared(changes) => {
            let rendered = render(&current, &previous, &changes);
            println!("{}", format_markers(&rendered, config.output_format));
        }
        Analysis::Incomparable => {
            print!("{INCOMPARABLE_NOTICE}{current}{previous}");
        }
    }

    let decision = decide(current_path, &current, Some(&previous), &config);
    println!("Decision: {decision} (persist: {})", decision.should_persist());

    Ok(())
}
