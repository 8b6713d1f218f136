use clap::Parser;
use minigames_core::GameKind;
use wasm_bindgen::prelude::*;
use yew::Properties;

mod app;
mod audio;
mod clicker;
mod dodge;
mod guess;
mod rps;
mod session;
mod stages;
mod utils;

pub use utils::BrowserStorage;

/// Props shared by games that draw random numbers.
#[derive(Properties, Clone, PartialEq, Debug)]
pub(crate) struct GameProps {
    #[prop_or_default]
    pub seed: Option<u64>,
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Which minigame to mount
    #[arg(short, long, default_value = "clicker")]
    game: GameKind,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,
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

    let args = Args::try_parse_from(location_hash.split(['#', '&'])).expect("Could not parse args");
    if let Some(log_level) = args.verbose.log_level() {
        console_log::init_with_level(log_level).expect("Error initializing logger");
    }
    log::debug!("game: {:?}, seed: {:?}", args.game, args.seed);

    let root = document()
        .get_element_by_id("game")
        .expect("Could not find id=\"game\" element");

    let props = app::AppProps {
        game: args.game,
        seed: args.seed,
    };
    log::debug!("App started");
    yew::Renderer::<app::App>::with_root_and_props(root, props).render();
}
