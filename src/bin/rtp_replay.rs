//! Replays a capture file through the unpacker and prints a summary with a
//! SHA-256 fingerprint of everything reconstructed.
//!
//! Usage: `rtp_replay <capture> [config]`

use rtp_unpacker::{
    config::Config,
    dump::{dump_file::DumpReader, replay::replay},
    log::logger::Logger,
    unpacker::unpacker_config::UnpackerConfig,
};
use std::{env, fs::File, io::BufReader, process::ExitCode, sync::Arc};

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    let Some(capture) = args.get(1) else {
        eprintln!("usage: rtp_replay <capture> [config]");
        return ExitCode::from(2);
    };

    let config = match args.get(2) {
        Some(path) => Config::load(path),
        None => Config::load("rtp_unpacker.conf"),
    }
    .unwrap_or_else(|e| {
        eprintln!("Error loading config: {e}. Using defaults.");
        Config::empty()
    });

    let logger = Logger::start(&config);
    let log_path = logger.file_path().to_path_buf();
    let unpacker_config = UnpackerConfig::from_config(&config);

    let file = match File::open(capture) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("cannot open {capture}: {e}");
            logger.shutdown();
            return ExitCode::FAILURE;
        }
    };

    let result = replay(
        DumpReader::new(BufReader::new(file)),
        unpacker_config,
        Arc::new(logger.handle()),
        |_| {},
    );
    logger.shutdown();

    match result {
        Ok(summary) => {
            println!("{summary}");
            println!("log:           {}", log_path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
