use tutor_core::ReplyMode;

pub(crate) const HELP: &str = "\
Type a question and press Enter to ask the tutor.
  /key <api key>     set the API key for live replies (blank clears it)
  /mode canned|live  switch where replies come from
  /run <n>           render the animation in message #n
  /copy <n>          copy the animation code of message #n
  /solve <equation>  quick answer for a simple equation
  /clear             clear the conversation
  /help              show this help
  /quit              exit";

/// One line of terminal input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    Ask(String),
    SetKey(String),
    SetMode(ReplyMode),
    Run(usize),
    Copy(usize),
    Solve(String),
    Clear,
    Help,
    Quit,
    Invalid(String),
}

pub(crate) fn parse_line(line: &str) -> Command {
    let trimmed = line.trim();
    let Some(rest) = trimmed.strip_prefix('/') else {
        return Command::Ask(line.to_string());
    };
    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };

    match name {
        "key" => Command::SetKey(arg.to_string()),
        "mode" => match arg {
            "canned" => Command::SetMode(ReplyMode::Canned),
            "live" => Command::SetMode(ReplyMode::Live),
            _ => Command::Invalid(format!("unknown mode {arg:?}; use canned or live")),
        },
        "run" => parse_index(arg).map_or_else(Command::Invalid, Command::Run),
        "copy" => parse_index(arg).map_or_else(Command::Invalid, Command::Copy),
        "solve" => Command::Solve(arg.to_string()),
        "clear" => Command::Clear,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => Command::Invalid(format!("unknown command /{name}; try /help")),
    }
}

fn parse_index(arg: &str) -> Result<usize, String> {
    arg.parse::<usize>()
        .map_err(|_| format!("expected a message number, got {arg:?}"))
}
