// crates/strata-cli/src/world.rs
//
// The persisted simulation world: one token instance plus the in-memory
// asset gateway holding its escrow and the simulated external balances.
// Both are saved together so escrowed funds survive between invocations.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use strata_core::{Address, MemoryGateway, TokenError};
use strata_token::AssetToken;

/// Token state and simulated external funds, persisted as one JSON file.
#[derive(Debug, Serialize, Deserialize)]
pub struct World {
    pub token: AssetToken,
    pub gateway: MemoryGateway,
}

impl World {
    /// Fresh world around a newly constructed token.
    pub fn create(
        owner: Address,
        capital_control: Option<Address>,
        promote_on_alive: bool,
    ) -> Result<Self, TokenError> {
        let token = match capital_control {
            Some(capital_control) => {
                AssetToken::with_capital_control(owner, capital_control, promote_on_alive)?
            }
            None => AssetToken::new(owner),
        };
        Ok(Self {
            token,
            gateway: MemoryGateway::new(),
        })
    }

    /// Load a world from `path`.
    pub fn load(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let data = fs::read_to_string(path)
            .map_err(|e| format!("could not read state file {}: {}", path, e))?;
        let world = serde_json::from_str(&data)?;
        Ok(world)
    }

    /// Save the world to `path`, creating parent directories as needed.
    pub fn save(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = Path::new(path).parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

/// Default state file location: `~/.strata/token.json`.
pub fn default_state_path() -> String {
    "~/.strata/token.json".to_string()
}

/// Expand `~` at the start of a path to the user's home directory.
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        if let Some(home) = dirs::home_dir() {
            return format!("{}{}", home.display(), &path[1..]);
        }
    }
    path.to_string()
}
