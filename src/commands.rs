/// Command strings the transport recognises. Everything else is ordinary text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandConfig {
    pub start_form: String,
    pub help: String,
}


impl Default for CommandConfig {
    fn default() -> Self {
        Self {
            start_form: "/calories".to_string(),
            help: "/start".to_string(),
        }
    }
}


#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    StartForm,
    Help,
    Text(String),
}


impl Command {
    pub fn classify(text: &str, commands: &CommandConfig) -> Self {
        let trimmed = text.trim();
        if trimmed == commands.start_form {
            Command::StartForm
        } else if trimmed == commands.help {
            Command::Help
        } else {
            Command::Text(text.to_string())
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_recognises_configured_commands() {
        let commands = CommandConfig::default();

        let test_cases = vec![
            ("/calories", Command::StartForm),
            ("  /calories\n", Command::StartForm),
            ("/start", Command::Help),
            ("/Calories", Command::Text("/Calories".to_string())),
            ("/calories now", Command::Text("/calories now".to_string())),
            ("42", Command::Text("42".to_string())),
        ];

        for (input, expected) in test_cases {
            assert_eq!(Command::classify(input, &commands), expected, "input {:?}", input);
        }
    }

    #[test]
    fn classify_uses_custom_commands() {
        let commands = CommandConfig {
            start_form: "!kcal".to_string(),
            help: "!help".to_string(),
        };

        assert_eq!(Command::classify("!kcal", &commands), Command::StartForm);
        assert_eq!(Command::classify("!help", &commands), Command::Help);
        assert_eq!(Command::classify("/calories", &commands), Command::Text("/calories".to_string()));
    }
}
