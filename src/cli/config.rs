//! `git-ai config`: show or update the LLM configuration.

use anyhow::Result;
use clap::Args;

use crate::config::{provider_info, Config, PROVIDERS};

/// Show or update the LLM configuration stored in ~/.git-ai.yaml.
#[derive(Args, Debug)]
pub struct ConfigCommand {
    /// Show the current configuration and exit
    #[arg(long)]
    pub show: bool,

    /// Provider to use (openai, anthropic, ollama, or other)
    #[arg(long)]
    pub provider: Option<String>,

    /// Model identifier
    #[arg(long)]
    pub model: Option<String>,

    /// API base URL
    #[arg(long)]
    pub endpoint: Option<String>,

    /// API key
    #[arg(long = "api-key")]
    pub api_key: Option<String>,
}

impl ConfigCommand {
    /// Executes the config command.
    pub fn execute(self) -> Result<()> {
        let path = Config::config_path()?;

        if self.show || self.has_no_updates() {
            let config = Config::load()?;
            print_config(&config);
            println!("\nConfig file: {}", path.display());
            if self.has_no_updates() && !self.show {
                println!(
                    "\nSet values with --provider, --model, --endpoint, --api-key.\n\
                     Known providers: {}",
                    PROVIDERS
                        .iter()
                        .map(|p| p.key)
                        .collect::<Vec<_>>()
                        .join(", ")
                );
            }
            return Ok(());
        }

        // Update on top of the file contents, not the env-overridden
        // view, so overrides never get baked into the file.
        let mut config = Config::load_from_path(&path)?;

        if let Some(provider) = self.provider {
            // Switching provider picks up the catalog defaults unless
            // explicitly overridden below.
            if let Some(info) = provider_info(&provider) {
                config.endpoint = info.endpoint.to_string();
                config.model = info.default_model.to_string();
            }
            config.provider = provider;
        }
        if let Some(model) = self.model {
            config.model = model;
        }
        if let Some(endpoint) = self.endpoint {
            config.endpoint = endpoint;
        }
        if let Some(api_key) = self.api_key {
            config.api_key = api_key;
        }

        config.save_to_path(&path)?;
        println!("Configuration saved to {}", path.display());
        print_config(&config);
        Ok(())
    }

    fn has_no_updates(&self) -> bool {
        self.provider.is_none()
            && self.model.is_none()
            && self.endpoint.is_none()
            && self.api_key.is_none()
    }
}

/// Prints the configuration with the API key masked.
fn print_config(config: &Config) {
    println!("provider: {}", config.provider);
    println!("model:    {}", config.model);
    println!("endpoint: {}", config.endpoint);
    println!("api_key:  {}", mask_key(&config.api_key));
}

/// Masks all but the last four characters of a key.
fn mask_key(key: &str) -> String {
    if key.is_empty() {
        return "(not set)".to_string();
    }
    let visible = 4.min(key.len());
    let suffix: String = key.chars().skip(key.chars().count().saturating_sub(visible)).collect();
    format!("****{suffix}")
}
