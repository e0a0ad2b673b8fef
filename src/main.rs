use clap::Parser;
use log::{debug, error};
use std::path::PathBuf;
use std::process::ExitCode;

use culinary_vision::{views, AppConfig, AppController, GeminiProvider, Phase, Settings};

/// Suggest recipes from a photo of your ingredients
#[derive(Parser, Debug)]
#[command(name = "culinary-vision", version, about)]
struct Cli {
    /// Photo of the ingredients (png, jpg, gif, webp, ...)
    image: PathBuf,

    /// Dietary restrictions, e.g. "vegan, gluten-free"
    #[arg(short, long, default_value = "")]
    restrictions: String,

    /// Configuration file (defaults to ./culinary-vision.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the configured model
    #[arg(long)]
    model: Option<String>,

    /// Print the recipes as JSON instead of rendering them
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(model) = cli.model {
        config.model = model;
    }

    // Refuse to start without a key
    let settings = Settings::from_config(config).map_err(|e| {
        error!("{}", e);
        e
    })?;
    debug!("Using model {} at {}", settings.model, settings.base_url);
    let provider = GeminiProvider::new(&settings)?;

    let mut controller = AppController::new();
    controller.select_image(&cli.image)?;
    controller.set_dietary_restrictions(cli.restrictions);

    if !cli.json {
        println!("{}", views::render(controller.state()));
    }

    let phase = controller.submit(&provider).await;
    let state = controller.state();

    if cli.json {
        match phase {
            Phase::Succeeded => println!("{}", serde_json::to_string_pretty(&state.recipes)?),
            _ => eprintln!("{}", state.error.as_deref().unwrap_or_default()),
        }
    } else {
        println!("{}", views::render_results(state));
    }

    Ok(if phase == Phase::Succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
