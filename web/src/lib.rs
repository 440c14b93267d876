use clap::Parser;
use memora_core as game;
use wasm_bindgen::prelude::*;

mod view;
mod utils;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Keep the targets highlighted while playing
    #[arg(long)]
    reveal_targets: bool,

    /// Multiply every animation delay by this factor
    #[arg(long, default_value_t = 1.0)]
    speed: f32,
}

impl Args {
    /// Parses `#-v&--seed=7` style hashes. Anything clap rejects falls back to
    /// the defaults and the error is handed back for logging.
    fn from_hash(hash: &str) -> (Self, Option<clap::Error>) {
        match Self::try_parse_from(hash.split(['#', '&'])) {
            Ok(args) => (args, None),
            Err(err) => (Self::parse_from([""]), Some(err)),
        }
    }

    fn engine_config(&self) -> game::EngineConfig {
        game::EngineConfig {
            timings: game::Timings::default().scaled(self.speed),
            reveal_targets: self.reveal_targets,
        }
    }
}

#[wasm_bindgen(start)]
pub fn run_app() {
    use gloo::utils::{document, window};

    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let location_hash = window()
        .location()
        .hash()
        .unwrap_or_else(|_| "".to_string());

    let (args, parse_error) = Args::from_hash(&location_hash);
    if let Some(log_level) = args.verbose.log_level() {
        console_log::init_with_level(log_level).expect("Error initializing logger");
    }
    if let Some(err) = parse_error {
        // error level so it shows with the default verbosity
        log::error!("Ignoring URL arguments {:?}: {}", location_hash, err);
    }
    log::debug!("args: {:?}", args);

    let props = view::GameProps {
        config: args.engine_config(),
        seed: args.seed.unwrap_or_else(utils::js_random_seed),
    };

    let root = document()
        .get_element_by_id("game")
        .expect("Could not find id=\"game\" element");

    log::debug!("App started");
    yew::Renderer::<view::GameView>::with_root_and_props(root, props).render();
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn hash_arguments_are_parsed() {
        let (args, err) = Args::from_hash("#--seed=7&--reveal-targets&--speed=0.5");
        assert!(err.is_none());
        assert_eq!(args.seed, Some(7));
        assert!(args.reveal_targets);
        assert_eq!(args.speed, 0.5);
    }

    #[wasm_bindgen_test]
    fn malformed_hash_falls_back_to_defaults() {
        let (args, err) = Args::from_hash("#--speed=fast");
        assert!(err.is_some());
        assert_eq!(args.seed, None);
        assert!(!args.reveal_targets);
        assert_eq!(args.speed, 1.0);
    }
}
