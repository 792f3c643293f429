use tokio::sync::RwLock;

use nanoframe::prompt::composer::ModifierSelections;
use nanoframe::session::{run_generation, GenerationRequest, Mode, Session};
use nanoframe::utils::image_intake::decode_data_url;
use nanoframe::{Config, GeminiClient, ModifierCatalog};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load env (if .env present)
    Config::dotenv_load();
    let cfg = Config::new().expect("Failed to load config");

    let client = GeminiClient::from_config(&cfg);
    let catalog = ModifierCatalog::new();
    let session = RwLock::new(Session::new());

    let mut selections = ModifierSelections::default();
    selections.style = "cinematic".to_string();
    selections.lighting = "golden".to_string();

    let request = GenerationRequest {
        description: "A lighthouse on a rocky coast at dusk".to_string(),
        selections,
        aspect_ratio: "16:9".to_string(),
        mode: Mode::Generate,
        reference_image: None,
    };

    println!("Requesting image from {}", cfg.gemini_api_url);
    let artifact = run_generation(&client, &catalog, &session, request).await?;

    println!("Prompt: {}", artifact.final_prompt);
    let bytes = decode_data_url(&artifact.image_data)?;
    let path = format!("nanoframe-{}.png", artifact.id);
    tokio::fs::write(&path, &bytes).await?;
    println!("Saved {} ({} bytes)", path, bytes.len());
    Ok(())
}
