use clap::{Args, Parser, Subcommand};
use serde_json::json;
use std::path::PathBuf;
use tokio::sync::RwLock;

use nanoframe::prompt::catalog::{ModifierCategory, ASPECT_RATIO_OPTIONS, DEFAULT_ASPECT_RATIO};
use nanoframe::prompt::composer::{compose, ModifierSelections};
use nanoframe::session::{run_generation, GenerationRequest, Mode, Session};
use nanoframe::utils::image_intake::{decode_data_url, load_reference_image};
use nanoframe::{Config, GeminiClient, ModifierCatalog};

#[derive(Parser, Debug)]
#[command(name = "nanoctl", about = "CLI for the NanoFrame image generator", version)]
struct Cli {
    /// Override GEMINI_API_URL
    #[arg(global = true, long)]
    gemini_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Clone)]
struct ModifierFlags {
    /// Artistic style id (see `nanoctl options style`)
    #[arg(long, default_value = "none")]
    style: String,
    /// Framing id
    #[arg(long, default_value = "default")]
    framing: String,
    /// Camera angle id
    #[arg(long, default_value = "default")]
    angle: String,
    /// Lighting id
    #[arg(long, default_value = "default")]
    lighting: String,
    /// Color grading id
    #[arg(long, default_value = "default")]
    color: String,
    /// Texture / film stock id
    #[arg(long, default_value = "default")]
    texture: String,
    /// Aspect ratio id (see `nanoctl options aspect-ratios`)
    #[arg(long, default_value = DEFAULT_ASPECT_RATIO)]
    aspect_ratio: String,
}

impl ModifierFlags {
    fn selections(&self) -> ModifierSelections {
        ModifierSelections {
            style: self.style.clone(),
            framing: self.framing.clone(),
            angle: self.angle.clone(),
            lighting: self.lighting.clone(),
            color: self.color.clone(),
            texture: self.texture.clone(),
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate an image (or edit one, with --image)
    Generate {
        /// Free-text description of the desired image
        description: String,
        #[command(flatten)]
        modifiers: ModifierFlags,
        /// Reference image to edit (png, jpeg, webp; max 5 MiB)
        #[arg(long, value_name = "PATH")]
        image: Option<PathBuf>,
        /// Rewrite the description with the text model before generating
        #[arg(long)]
        enhance: bool,
        /// Output path (defaults to ./nanoframe-<id>.png)
        #[arg(long, value_name = "PATH")]
        out: Option<PathBuf>,
        /// Verbose: print the composed prompt before sending
        #[arg(short, long)]
        verbose: bool,
    },
    /// Rewrite a description with the text model
    Enhance {
        /// Free-text description to improve
        description: String,
    },
    /// Compose the final prompt locally without calling the API
    Compose {
        /// Free-text description of the desired image
        description: String,
        #[command(flatten)]
        modifiers: ModifierFlags,
    },
    /// List modifier categories or the options of one category
    Options {
        /// Category name (style, framing, angle, lighting, color, texture,
        /// aspect-ratios); omit to list category names
        category: Option<String>,
        /// Output raw JSON instead of pretty lines
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load env and parse CLI
    Config::dotenv_load();
    let cli = Cli::parse();

    let mut conf = Config::new().expect("Failed to load config");
    if let Some(url) = cli.gemini_url {
        conf.gemini_api_url = url;
    }

    match cli.command {
        Commands::Generate { description, modifiers, image, enhance, out, verbose } => {
            let client = GeminiClient::from_config(&conf);
            let catalog = ModifierCatalog::new();

            let description = if enhance {
                let enhanced = client.enhance_prompt(&description).await;
                if verbose {
                    eprintln!("[verbose] Enhanced description:\n{}", enhanced);
                }
                enhanced
            } else {
                description
            };

            let reference_image = match image {
                Some(path) => Some(load_reference_image(&path).await?),
                None => None,
            };
            let mode = if reference_image.is_some() { Mode::Edit } else { Mode::Generate };

            let request = GenerationRequest {
                description,
                selections: modifiers.selections(),
                aspect_ratio: modifiers.aspect_ratio.clone(),
                mode,
                reference_image,
            };

            if verbose {
                eprintln!(
                    "[verbose] Final prompt:\n{}",
                    compose(&request.description, &request.selections, &catalog)
                );
            }

            let session = RwLock::new(Session::new());
            let res = run_generation(&client, &catalog, &session, request).await;
            match res {
                Ok(artifact) => {
                    let bytes = decode_data_url(&artifact.image_data)?;
                    let path = out.unwrap_or_else(|| PathBuf::from(format!("nanoframe-{}.png", artifact.id)));
                    tokio::fs::write(&path, &bytes).await?;
                    println!("Prompt: {}", artifact.final_prompt);
                    println!("Saved {} ({} bytes)", path.display(), bytes.len());
                    Ok(())
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::Enhance { description } => {
            let client = GeminiClient::from_config(&conf);
            println!("{}", client.enhance_prompt(&description).await);
            Ok(())
        }
        Commands::Compose { description, modifiers } => {
            let catalog = ModifierCatalog::new();
            println!("{}", compose(&description, &modifiers.selections(), &catalog));
            Ok(())
        }
        Commands::Options { category, json } => {
            match category {
                None => {
                    if json {
                        let names: Vec<&str> = ModifierCategory::ORDERED.iter().map(|c| c.as_str()).collect();
                        println!("{}", serde_json::to_string(&json!({"categories": names}))?);
                    } else {
                        for category in ModifierCategory::ORDERED {
                            println!("{}", category.as_str());
                        }
                        println!("aspect-ratios");
                    }
                }
                Some(name) if name == "aspect-ratios" => {
                    if json {
                        println!("{}", serde_json::to_string(&ASPECT_RATIO_OPTIONS)?);
                    } else {
                        for ratio in ASPECT_RATIO_OPTIONS {
                            println!("{}\t{}", ratio.id, ratio.label);
                        }
                    }
                }
                Some(name) => {
                    let Some(category) = ModifierCategory::parse(&name) else {
                        eprintln!("Unknown modifier category '{}'", name);
                        std::process::exit(2);
                    };
                    let table = ModifierCatalog::table(category);
                    if json {
                        println!("{}", serde_json::to_string(&table)?);
                    } else {
                        for option in table {
                            println!("{}\t{}", option.id, option.label);
                        }
                    }
                }
            }
            Ok(())
        }
    }
}
