use std::io::Write;

/// Blocking yes/no question put to the user before a destructive step.
pub trait Confirm {
    fn confirm(&self, question: &str) -> bool;
}

/// Asks on the terminal, unless told to assume yes.
pub struct Prompt {
    assume_yes: bool,
}

impl Prompt {
    pub fn new(assume_yes: bool) -> Self {
        Prompt { assume_yes }
    }
}

impl Confirm for Prompt {
    fn confirm(&self, question: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        print!("{} [y/N]: ", question);
        if std::io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        match std::io::stdin().read_line(&mut answer) {
            Ok(_) => is_yes(&answer),
            Err(err) => {
                warn!("Could not read answer: {}", err);
                false
            },
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
