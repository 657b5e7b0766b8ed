use serde::{Deserialize, Serialize};

/// Static facts the terminal commands print.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub name: String,
    /// Shown in the welcome line ("Welcome to <handle>'s terminal")
    pub handle: String,
    pub age: u32,
    pub profession: String,
    pub discord_username: String,
    pub discord_server: String,
    pub inspiration: String,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: "Alya".to_string(),
            handle: "alisaa".to_string(),
            age: 20,
            profession: "Graphic Design / Web Development".to_string(),
            discord_username: "arcticayl".to_string(),
            discord_server: "discord.gg/aerox".to_string(),
            inspiration: "cursi.ng".to_string(),
        }
    }
}

impl Profile {
    pub fn welcome_line(&self) -> String {
        format!("Welcome to {}'s terminal. Type \"help\" for commands.", self.handle)
    }
}
