use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use seedream_scene_proxy::generation::{BatchOrchestrator, GenerationOptions, GenerationSpeed, Generator, ImageQuality, PromptJob};
use seedream_scene_proxy::prompt::{catalog, parse_jobs, parse_sections, product_scene_jobs, scene_prompts_for, ParseMode, SceneStyle};
use seedream_scene_proxy::seedream::{self, ApiMode};
use seedream_scene_proxy::utils::image_data::load_data_url;
use seedream_scene_proxy::{Config, SeedreamClient};

#[derive(Parser, Debug)]
#[command(name = "seedctl", about = "CLI for the Seedream scene proxy", version)]
struct Cli {
    /// Override SEEDREAM_BASE_URL
    #[arg(global = true, long)]
    base_url: Option<String>,

    /// Force demo mode (no calls to the image API)
    #[arg(global = true, long)]
    demo: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args, Debug)]
struct OptionArgs {
    /// Scene style: professional, lifestyle, creative, minimalist
    #[arg(long, default_value = "professional")]
    style: String,
    /// Generation speed: fast, normal, quality
    #[arg(long, default_value = "normal")]
    speed: String,
    /// Image quality: 1K, 2K, 4K
    #[arg(long, default_value = "2K")]
    quality: String,
    /// Product description woven into scene prompts
    #[arg(long)]
    description: Option<String>,
}

impl OptionArgs {
    fn to_options(&self) -> GenerationOptions {
        GenerationOptions {
            scene_style: SceneStyle::from_key(&self.style),
            generation_speed: GenerationSpeed::from_key(&self.speed),
            image_quality: ImageQuality::from_key(&self.quality),
            product_description: self.description.clone(),
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Probe the image API and report the resulting mode
    Status,
    /// List the configured series prompts
    Prompts,
    /// Parse a prompt file without generating anything
    Parse {
        file: PathBuf,
        /// Group numbered sections into title/description jobs
        #[arg(long)]
        sectioned: bool,
    },
    /// Print the scene templates for a style
    Scenes {
        #[arg(long, default_value = "professional")]
        style: String,
        #[arg(long)]
        description: Option<String>,
        /// Only the first N templates
        #[arg(long)]
        count: Option<usize>,
    },
    /// Generate a single image
    Generate {
        #[arg(long)]
        prompt: String,
        /// Base image for image-to-image
        #[arg(long, value_name = "PATH")]
        image: Option<PathBuf>,
        #[command(flatten)]
        options: OptionArgs,
    },
    /// Generate one image per prompt found in a file
    Batch {
        file: PathBuf,
        #[arg(long)]
        sectioned: bool,
        #[command(flatten)]
        options: OptionArgs,
    },
    /// Generate the configured series
    Series {
        #[command(flatten)]
        options: OptionArgs,
    },
    /// Generate product scenes from a base image
    Product {
        #[arg(long, value_name = "PATH")]
        image: PathBuf,
        /// Replace the style templates with a single custom prompt
        #[arg(long)]
        custom_prompt: Option<String>,
        /// Only the first N scenes
        #[arg(long)]
        count: Option<usize>,
        #[command(flatten)]
        options: OptionArgs,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load env and parse CLI
    Config::dotenv_load();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let mut conf = Config::new();
    if let Some(url) = cli.base_url {
        conf.seedream_base_url = url;
    }
    if cli.demo {
        conf.demo_mode = true;
    }

    match cli.command {
        Commands::Status => {
            let client = build_client(&conf)?;
            let mode = seedream::resolve_mode(&conf, &client).await;
            println!("{}", mode);
            Ok(())
        }
        Commands::Prompts => {
            for (i, p) in catalog::SERIES_PROMPTS.iter().enumerate() {
                println!("{}. {}", i + 1, p);
            }
            Ok(())
        }
        Commands::Parse { file, sectioned } => {
            let text = tokio::fs::read_to_string(&file).await?;
            if sectioned {
                print_json(&parse_sections(&text))
            } else {
                print_json(&parse_jobs(&text, ParseMode::Flat))
            }
        }
        Commands::Scenes { style, description, count } => {
            let prompts = scene_prompts_for(SceneStyle::from_key(&style), description.as_deref().unwrap_or(""));
            for (i, p) in prompts.iter().take(count.unwrap_or(prompts.len())).enumerate() {
                println!("{}. {}", i + 1, p);
            }
            Ok(())
        }
        Commands::Generate { prompt, image, options } => {
            let base_image = match image {
                Some(path) => Some(load_data_url(&path).await?),
                None => None,
            };
            let batches = build_orchestrator(&conf).await?;
            let result = batches
                .generator()
                .generate_prompt(&prompt, 0, &options.to_options(), base_image.as_deref())
                .await;
            print_json(&result)
        }
        Commands::Batch { file, sectioned, options } => {
            let text = tokio::fs::read_to_string(&file).await?;
            let mode = if sectioned { ParseMode::Sectioned } else { ParseMode::Flat };
            let jobs = parse_jobs(&text, mode);
            if jobs.is_empty() {
                eprintln!("No prompts found in {}", file.display());
            }
            let batches = build_orchestrator(&conf).await?;
            print_json(&batches.run(&jobs, &options.to_options(), None).await)
        }
        Commands::Series { options } => {
            let jobs = PromptJob::from_texts(catalog::series_prompts());
            let batches = build_orchestrator(&conf).await?;
            print_json(&batches.run(&jobs, &options.to_options(), None).await)
        }
        Commands::Product { image, custom_prompt, count, options } => {
            let base_image = load_data_url(&image).await?;
            let opts = options.to_options();
            let jobs = product_scene_jobs(custom_prompt.as_deref(), opts.scene_style, opts.product_description(), count);
            let batches = build_orchestrator(&conf).await?;
            print_json(&batches.run(&jobs, &opts, Some(&base_image)).await)
        }
    }
}

fn build_client(conf: &Config) -> Result<SeedreamClient, Box<dyn std::error::Error>> {
    Ok(SeedreamClient::new(
        &conf.seedream_base_url,
        &conf.seedream_api_key,
        &conf.seedream_model,
        conf.request_timeout,
    )?)
}

async fn build_orchestrator(conf: &Config) -> Result<BatchOrchestrator, Box<dyn std::error::Error>> {
    let client = build_client(conf)?;
    let mode = seedream::resolve_mode(conf, &client).await;
    if mode == ApiMode::Demo {
        eprintln!("Running in demo mode");
    }
    let generator = Generator::from_config(conf, client, mode);
    Ok(BatchOrchestrator::new(Arc::new(generator), conf.pacing))
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
