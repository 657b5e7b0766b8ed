use crate::profile::Profile;

/// Tokens recognised by the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Help,
    Server,
    About,
    WebInfo,
    Discord,
    Chatbot,
    Clear,
    /// `exit` or `quit`; only meaningful while chatting
    Exit,
}

pub const CLEARED_LINE: &str = "Terminal cleared. Type \"help\" for commands.";
pub const EXITED_CHAT_LINE: &str = "👋 Exited chatbot mode. Type \"help\" for commands.";
pub const CHAT_ALREADY_ACTIVE_LINE: &str =
    "🤖 Chatbot mode is already active.\n  Type \"exit\" or \"quit\" to leave chatbot mode.";

/// Trim and case-fold user input before matching it against the table.
pub fn normalize(input: &str) -> String {
    input.trim().to_lowercase()
}

impl Command {
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Help => "help",
            Command::Server => "server",
            Command::About => "about",
            Command::WebInfo => "webinfo",
            Command::Discord => "discord",
            Command::Chatbot => "chatbot",
            Command::Clear => "clear",
            Command::Exit => "exit",
        }
    }

    /// Exact match against already-normalized input.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "help" => Some(Command::Help),
            "server" => Some(Command::Server),
            "about" => Some(Command::About),
            "webinfo" => Some(Command::WebInfo),
            "discord" => Some(Command::Discord),
            "chatbot" => Some(Command::Chatbot),
            "clear" => Some(Command::Clear),
            "exit" | "quit" => Some(Command::Exit),
            _ => None,
        }
    }

    /// Commands listed by `help`, in display order.
    pub fn listed() -> Vec<Command> {
        vec![
            Command::Help,
            Command::Server,
            Command::About,
            Command::WebInfo,
            Command::Discord,
            Command::Chatbot,
            Command::Clear,
        ]
    }

    pub fn description(&self) -> &'static str {
        match self {
            Command::Help => "Show this list",
            Command::Server => "Discord server invite",
            Command::About => "About me",
            Command::WebInfo => "Website information",
            Command::Discord => "My Discord username",
            Command::Chatbot => "Start AI chatbot",
            Command::Clear => "Clear terminal",
            Command::Exit => "Leave chatbot mode",
        }
    }

    /// Static response text. `None` for commands whose effect is not a
    /// printed line (`clear`, and `exit` outside chat mode).
    pub fn response(&self, profile: &Profile) -> Option<String> {
        let text = match self {
            Command::Help => help_listing(),
            Command::Server => format!("🎮 Discord Server: {}", profile.discord_server),
            Command::About => format!(
                "👤 About Me:\n  Name: {}\n  Age: {}\n  Profession: {}",
                profile.name, profile.age, profile.profession
            ),
            Command::WebInfo => format!(
                "🌐 Website Info:\n  Inspiration: {}\n  Created by: {}",
                profile.inspiration, profile.name
            ),
            Command::Discord => format!("💬 Discord: {}", profile.discord_username),
            Command::Chatbot => "🤖 Chatbot mode enabled!\n  Type your message to chat with AI.\n  Type \"exit\" or \"quit\" to leave chatbot mode.".to_string(),
            Command::Clear | Command::Exit => return None,
        };
        Some(text)
    }
}

fn help_listing() -> String {
    let mut text = String::from("Available commands:");
    for (i, command) in Command::listed().iter().enumerate() {
        text.push_str(&format!(
            "\n  {}. {:<8} - {}",
            i + 1,
            command.as_str(),
            command.description()
        ));
    }
    text
}

pub fn not_found_line(original: &str) -> String {
    format!(
        "Command not found: \"{}\". Type \"help\" for available commands.",
        original.trim()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_trims_and_folds_case() {
        assert_eq!(normalize("  HeLp \n"), "help");
    }

    #[test]
    fn matching_is_exact() {
        assert_eq!(Command::from_str("help"), Some(Command::Help));
        assert_eq!(Command::from_str("quit"), Some(Command::Exit));
        assert_eq!(Command::from_str("hel"), None);
        assert_eq!(Command::from_str("help me"), None);
        assert_eq!(Command::from_str("chat"), None);
    }

    #[test]
    fn help_lists_every_listed_command() {
        let help = Command::Help.response(&Profile::default()).unwrap();
        for command in Command::listed() {
            assert!(help.contains(command.as_str()), "missing {}", command.as_str());
        }
        assert!(help.contains("  2. server   - Discord server invite"));
        assert!(!help.contains("exit"));
    }

    #[test]
    fn responses_render_profile_data() {
        let profile = Profile {
            discord_username: "someone".to_string(),
            ..Profile::default()
        };
        assert_eq!(
            Command::Discord.response(&profile).unwrap(),
            "💬 Discord: someone"
        );
        assert!(Command::About.response(&profile).unwrap().contains("Age: 20"));
        assert_eq!(Command::Clear.response(&profile), None);
    }

    #[test]
    fn not_found_quotes_original_text() {
        assert_eq!(
            not_found_line(" LS -la "),
            "Command not found: \"LS -la\". Type \"help\" for available commands."
        );
    }
}
