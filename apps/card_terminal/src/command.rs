use card_core::ReactionKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Randomize,
    Next,
    Previous,
    React(ReactionKind),
    Show,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Option<Self> {
        let word = line.trim().to_ascii_lowercase();
        let command = match word.as_str() {
            "r" | "random" | "randomize" => Command::Randomize,
            "n" | "next" => Command::Next,
            "p" | "prev" | "previous" => Command::Previous,
            "s" | "show" | "" => Command::Show,
            "h" | "help" | "?" => Command::Help,
            "q" | "quit" | "exit" => Command::Quit,
            other => Command::React(ReactionKind::from_label(other)?),
        };
        Some(command)
    }
}

pub fn help_text() -> String {
    let reactions: Vec<&str> = ReactionKind::ALL.iter().map(|kind| kind.label()).collect();
    format!(
        "commands: r(andomize), n(ext), p(revious), s(how), q(uit); reactions: {}",
        reactions.join(", ")
    )
}
