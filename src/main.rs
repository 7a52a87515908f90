use clap::{Parser, Subcommand};
use eframe::{egui, NativeOptions};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use sentence_lens::analysis::Analysis;
use sentence_lens::app::SentenceLensApp;
use sentence_lens::completion::{Analyzer, OpenAiClient};
use sentence_lens::config::{self, Config, DEFAULT_CONFIG_FILE};
use sentence_lens::parsing::parse_saved_response;
use sentence_lens::presentation::{render_groups, render_text};
use sentence_lens::prompt_io::load_prompts;
use sentence_lens::types::analysis_data::AnalysisResponse;
use sentence_lens::Result;

#[derive(Parser, Debug)]
#[command(name = "sentence-lens", version, about = "Visualize the grammatical structure of English sentences")]
struct Cli {
    /// Path to the TOML config file.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Open the desktop window (default).
    Gui,
    /// Analyze one sentence with the completion model and print the result.
    Analyze {
        sentence: String,
        /// Print the response as JSON instead of the annotated view.
        #[arg(long)]
        json: bool,
    },
    /// Render a saved JSON response without calling the model.
    Render {
        #[arg(long)]
        response: PathBuf,
    },
}

fn print_response(response: &AnalysisResponse) {
    if response.is_raw_only() {
        println!("Original sentence: {}", response.sentence);
        println!();
        println!("Analysis:");
        println!("{}", response.raw_response.as_deref().unwrap_or_default());
        return;
    }
    let analysis = Analysis::from(response);
    println!("{}", render_text(&analysis));
    if !analysis.groups.is_empty() {
        println!();
        println!("{}", render_groups(&analysis.groups));
    }
}

fn run_analyze(config: &Config, sentence: &str, json: bool) -> Result<()> {
    let prompts = load_prompts(&config.prompt_file)?;
    let analyzer = Analyzer::new(OpenAiClient::from_config(config)?, prompts);
    let response = analyzer.analyze(sentence)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print_response(&response);
    }
    Ok(())
}

fn run_render(path: &Path) -> Result<()> {
    let contents = fs::read_to_string(path)?;
    print_response(&parse_saved_response(&contents)?);
    Ok(())
}

fn run_gui(config: Config, config_error: Option<String>) -> std::result::Result<(), eframe::Error> {
    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Sentence Lens",
        options,
        Box::new(move |cc| Box::new(SentenceLensApp::new(cc, config, config_error))),
    )
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let (config, config_error) = match config::load_config_from_file(&cli.config) {
        Ok(config) => (config, None),
        Err(e) => {
            log::error!("{}", e);
            (Config::default(), Some(e.to_string()))
        }
    };

    let outcome = match cli.command.unwrap_or(Command::Gui) {
        Command::Gui => run_gui(config, config_error).map_err(|e| e.to_string()),
        Command::Analyze { sentence, json } => {
            if let Some(err) = config_error {
                Err(err)
            } else {
                run_analyze(&config, &sentence, json).map_err(|e| e.to_string())
            }
        }
        Command::Render { response } => run_render(&response).map_err(|e| e.to_string()),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
