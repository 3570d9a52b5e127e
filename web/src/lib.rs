use clap::Parser;
use flashgrid_core::SessionConfig;
use wasm_bindgen::prelude::*;

mod game;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Seconds each pattern stays on screen
    #[arg(long)]
    flash_ticks: Option<u8>,
}

impl Args {
    /// Args come from the location hash, e.g. `#-vv&--flash-ticks=5`
    fn from_hash(hash: &str) -> Result<Self, clap::Error> {
        Self::try_parse_from(hash.split(['#', '&']))
    }

    fn session_config(&self) -> SessionConfig {
        let config = SessionConfig::default();
        match self.flash_ticks {
            Some(flash_ticks) => config.with_flash_ticks(flash_ticks),
            None => config,
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

    let args = Args::from_hash(&location_hash).expect("Could not parse args");
    if let Some(log_level) = args.verbose.log_level() {
        console_log::init_with_level(log_level).expect("Error initializing logger");
    }
    let config = args.session_config();
    log::debug!("config: {:?}", config);

    let root = document()
        .get_element_by_id("game")
        .expect("Could not find id=\"game\" element");

    log::debug!("App started");
    yew::Renderer::<game::GameView>::with_root_and_props(root, game::GameProps { config }).render();
}
