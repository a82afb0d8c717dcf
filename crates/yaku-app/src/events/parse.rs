use yaku_types::Language;

use super::AppEvent;

pub const HELP: &str = "Type text to translate. Commands: :go, :swap, :clear, :copy, :lang <from> <to>, :quit";

/// Turn one line of user input into an event.
///
/// Lines starting with `:` are commands; `::` escapes a literal leading colon.
pub fn parse_line(line: &str) -> Result<AppEvent, String> {
    let trimmed = line.trim();

    if let Some(rest) = trimmed.strip_prefix("::") {
        return Ok(AppEvent::TextInput(format!(":{rest}")));
    }

    let Some(command) = trimmed.strip_prefix(':') else {
        return Ok(AppEvent::TextInput(line.to_string()));
    };

    let mut parts = command.split_whitespace();
    let event = match parts.next().unwrap_or_default() {
        "go" | "t" => AppEvent::TranslateNow,
        "swap" | "s" => AppEvent::Swap,
        "clear" | "c" => AppEvent::Clear,
        "copy" | "y" => AppEvent::Copy,
        "quit" | "q" => AppEvent::Quit,
        "lang" | "l" => {
            let (Some(source), Some(target), None) = (parts.next(), parts.next(), parts.next())
            else {
                return Err("usage: :lang <from> <to>".to_string());
            };
            let source: Language = source.parse().map_err(|e| format!("{e}"))?;
            let target: Language = target.parse().map_err(|e| format!("{e}"))?;
            return Ok(AppEvent::SetLanguages { source, target });
        }
        other => return Err(format!("Unknown command ':{other}'. {HELP}")),
    };

    if parts.next().is_some() {
        return Err(format!("':{command}' takes no arguments"));
    }

    Ok(event)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_lines_are_text_input() {
        assert_eq!(
            parse_line("Hello world"),
            Ok(AppEvent::TextInput("Hello world".to_string()))
        );
    }

    #[test]
    fn commands_and_aliases() {
        assert_eq!(parse_line(":go"), Ok(AppEvent::TranslateNow));
        assert_eq!(parse_line(" :s "), Ok(AppEvent::Swap));
        assert_eq!(parse_line(":clear"), Ok(AppEvent::Clear));
        assert_eq!(parse_line(":y"), Ok(AppEvent::Copy));
        assert_eq!(parse_line(":quit"), Ok(AppEvent::Quit));
    }

    #[test]
    fn lang_command_parses_codes() {
        assert_eq!(
            parse_line(":lang ja EN"),
            Ok(AppEvent::SetLanguages {
                source: Language::Japanese,
                target: Language::English,
            })
        );
        assert!(parse_line(":lang ja").is_err());
        assert!(parse_line(":lang ja xx").is_err());
        assert!(parse_line(":lang ja en fr").is_err());
    }

    #[test]
    fn double_colon_escapes_text() {
        assert_eq!(
            parse_line("::go"),
            Ok(AppEvent::TextInput(":go".to_string()))
        );
    }

    #[test]
    fn unknown_or_overlong_commands_are_rejected() {
        assert!(parse_line(":frobnicate").is_err());
        assert!(parse_line(":swap now").is_err());
    }
}
