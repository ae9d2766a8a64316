use std::path::PathBuf;

pub const HELP: &'static str = "\
Commands:
  select <path>    choose an image file
  clear            forget the chosen file
  upload           upload the chosen file
  refresh          reload the gallery
  delete <n|id>    delete a card by position or id
  download <n|id>  print the download link of a card
  help             show this help
  quit             leave";

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Select(PathBuf),
    Clear,
    Upload,
    Refresh,
    Delete(String),
    Download(String),
    Help,
    Quit,
}

/// Parses one line typed at the browse prompt. Blank lines are `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let argument = |name: &str| {
        if rest.is_empty() {
            Err(format!("usage: {} <{}>", word, name))
        } else {
            Ok(rest.to_owned())
        }
    };
    let command = match word {
        "select" => Command::Select(PathBuf::from(argument("path")?)),
        "clear" => Command::Clear,
        "upload" => Command::Upload,
        "refresh" | "r" => Command::Refresh,
        "delete" | "rm" => Command::Delete(argument("n|id")?),
        "download" | "dl" => Command::Download(argument("n|id")?),
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(format!("unknown command `{}`, try `help`", other)),
    };
    Ok(Some(command))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_with_arguments() {
        assert_eq!(
            parse_command("select  ~/Pictures/my cat.png \n"),
            Ok(Some(Command::Select(PathBuf::from("~/Pictures/my cat.png"))))
        );
        assert_eq!(parse_command("rm 2"), Ok(Some(Command::Delete("2".into()))));
        assert_eq!(parse_command("download abc"), Ok(Some(Command::Download("abc".into()))));
    }

    #[test]
    fn bare_commands() {
        assert_eq!(parse_command("upload"), Ok(Some(Command::Upload)));
        assert_eq!(parse_command(" q "), Ok(Some(Command::Quit)));
        assert_eq!(parse_command("   "), Ok(None));
    }

    #[test]
    fn missing_argument_and_unknown_word() {
        assert_eq!(parse_command("delete"), Err("usage: delete <n|id>".to_owned()));
        assert!(parse_command("frobnicate").unwrap_err().contains("frobnicate"));
    }
}
