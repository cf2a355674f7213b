use std::collections::VecDeque;
use std::io::{self, BufRead};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use chrono::{DateTime, Utc};
use log::LevelFilter;
use tutor_core::{update, ChatState, ChatViewModel, Msg, STARTER_PROMPTS};
use tutor_engine::{
    Clipboard, EngineHandle, EngineServices, MemoryClipboard, ReqwestCompletionService,
    SimulatedRenderer,
};
use tutor_logging::{tutor_info, tutor_warn};

use super::commands::{parse_line, Command, HELP};
use super::config::{load_config, ConfigSource};
use super::effects::EffectRunner;
use super::render::{render_notice, render_status, Renderer, Style};

const INPUT_POLL: Duration = Duration::from_millis(50);

pub fn run_app() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("resolve working directory")?;
    let (config, source) = load_config(&cwd);
    tutor_logging::initialize(config.log_destination, LevelFilter::Info);
    match &source {
        ConfigSource::Defaults => tutor_info!("No config file found; using defaults"),
        ConfigSource::File(path) => tutor_info!("Loaded config from {}", path.display()),
        ConfigSource::Invalid { path, reason } => {
            tutor_warn!("Ignoring {}: {}", path.display(), reason)
        }
    }

    let completions = ReqwestCompletionService::new(config.completion_settings())
        .context("build completion client")?;
    let services = EngineServices {
        completions: Arc::new(completions),
        executor: Arc::new(SimulatedRenderer::new(config.render_settings())),
    };
    let engine = EngineHandle::new(services).context("start engine runtime")?;

    let mut session = Session {
        state: ChatState::with_config(config.chat_config()).with_welcome(Utc::now()),
        runner: EffectRunner::new(engine, open_clipboard()),
        renderer: Renderer::new(Style { ansi: config.color }),
        style: Style { ansi: config.color },
    };

    println!("Math tutor. Try one of these:");
    for prompt in STARTER_PROMPTS {
        println!("  {prompt}");
    }
    println!("Type /help for commands.");
    println!("{}", render_status(&session.state.view()));
    session.render();

    let input = spawn_stdin_reader();
    let mut input_open = true;
    loop {
        if input_open {
            match input.recv_timeout(INPUT_POLL) {
                Ok(line) => {
                    if !session.handle_line(&line) {
                        break;
                    }
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => {
                    tutor_info!("Input closed");
                    input_open = false;
                }
            }
        } else if session.is_idle() {
            break;
        } else if let Some(msg) = session.runner.wait_event(INPUT_POLL) {
            session.dispatch(msg);
        }

        while let Some(msg) = session.runner.try_event() {
            session.dispatch(msg);
        }
    }

    tutor_info!("Exiting");
    Ok(())
}

struct Session {
    state: ChatState,
    runner: EffectRunner,
    renderer: Renderer,
    style: Style,
}

impl Session {
    /// Returns false when the user asked to quit.
    fn handle_line(&mut self, line: &str) -> bool {
        match parse_line(line) {
            Command::Quit => return false,
            Command::Help => println!("{HELP}"),
            Command::Invalid(reason) => println!("{reason}"),
            command => {
                let view = self.state.view();
                let announce_mode = matches!(command, Command::SetMode(_) | Command::SetKey(_));
                for msg in command_messages(command, &view, Utc::now()) {
                    self.dispatch(msg);
                }
                if announce_mode {
                    println!("{}", render_status(&self.state.view()));
                }
            }
        }
        true
    }

    fn dispatch(&mut self, msg: Msg) {
        let mut queue = VecDeque::from([msg]);
        while let Some(msg) = queue.pop_front() {
            let state = std::mem::take(&mut self.state);
            let (state, effects) = update(state, msg);
            self.state = state;

            let outcome = self.runner.run(effects);
            for notice in &outcome.notices {
                println!("{}", render_notice(notice, self.style));
            }
            queue.extend(outcome.follow_up);
        }
        if self.state.consume_dirty() {
            self.render();
        }
    }

    fn render(&mut self) {
        for line in self.renderer.render(&self.state.view()) {
            println!("{line}");
        }
    }

    fn is_idle(&self) -> bool {
        !self.state.is_typing() && self.state.active_job().is_none()
    }
}

/// Translates a terminal command into the messages the core understands.
fn command_messages(command: Command, view: &ChatViewModel, at: DateTime<Utc>) -> Vec<Msg> {
    let code_of = |index: usize| {
        view.messages
            .get(index)
            .and_then(|row| row.code.clone())
            .unwrap_or_default()
    };
    match command {
        Command::Ask(text) => vec![Msg::InputChanged(text), Msg::Submitted { at }],
        Command::SetKey(key) => vec![Msg::CredentialEntered(key)],
        Command::SetMode(mode) => vec![Msg::ModeSelected(mode)],
        Command::Run(index) => vec![Msg::RunCodeRequested {
            message_index: index,
            code: code_of(index),
        }],
        Command::Copy(index) => vec![Msg::CopyRequested(code_of(index))],
        Command::Solve(equation) => vec![Msg::EquationSubmitted(equation)],
        Command::Clear => vec![Msg::ClearRequested],
        Command::Help | Command::Quit | Command::Invalid(_) => Vec::new(),
    }
}

fn spawn_stdin_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

#[cfg(feature = "system-clipboard")]
fn open_clipboard() -> Box<dyn Clipboard> {
    match tutor_engine::SystemClipboard::new() {
        Ok(clipboard) => Box::new(clipboard),
        Err(err) => {
            tutor_warn!("Falling back to in-memory clipboard: {}", err);
            Box::new(MemoryClipboard::new())
        }
    }
}

#[cfg(not(feature = "system-clipboard"))]
fn open_clipboard() -> Box<dyn Clipboard> {
    Box::new(MemoryClipboard::new())
}
