mod cli;

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::Duration;

use clap::Parser;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use read_ease::app::controllers::presentation::{preview_path, write_html};
use read_ease::app::infrastructure::platform::command_available;
use read_ease::app::infrastructure::storage::{FileStore, KeyValueStore};
use read_ease::app::services::cleaner::clean_html_with_threshold;
use read_ease::app::services::session::{load_preferences, reset_preferences, save_preferences};
use read_ease::app::services::speech::{CommandSpeech, SpeechEngine};
use read_ease::app::{
    Acquirer, AppConfig, AppError, AppState, Effect, Extractors, FileUpload, InputType, Message,
    Mode, UtteranceId, detect_system_dark_mode,
};

use cli::{Cli, Commands, OutputFormat, PrefsCommand, ReadArgs, SourceArgs};

type Result<T> = std::result::Result<T, AppError>;

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays the document
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref());
    let store = FileStore::open_default(config.storage.dir.clone());
    debug!("Preferences stored in {:?}", store.dir());

    match cli.command {
        Commands::Read(args) => read_command(&config, &store, args),
        Commands::Clean(args) => {
            let html = std::fs::read_to_string(&args.input)?;
            println!("{}", clean_html_with_threshold(&html, args.min_chars));
            Ok(())
        }
        Commands::Prefs(command) => prefs_command(&store, command),
        Commands::Speak(args) => speak_command(&config, &store, &args.source),
        Commands::Timer(args) => timer_command(args.minutes),
        Commands::Modes => {
            let current = load_preferences(&store).mode;
            for mode in Mode::all() {
                let marker = if *mode == current { "*" } else { " " };
                println!("{} {:<10} {}", marker, mode.key(), mode.display_name());
            }
            Ok(())
        }
    }
}

/// Owns the state and carries out the effects of each transition.
struct Session<'a> {
    state: AppState,
    acquirer: Acquirer,
    receiver: Receiver<Message>,
    store: &'a dyn KeyValueStore,
    persist: bool,
    speech: Option<Box<dyn SpeechEngine>>,
    utterance: Option<UtteranceId>,
}

impl<'a> Session<'a> {
    fn new(config: &AppConfig, store: &'a dyn KeyValueStore, dark_mode: bool) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            state: AppState::new(load_preferences(store), dark_mode),
            acquirer: Acquirer::new(Extractors::from_config(config), sender),
            receiver,
            store,
            persist: false,
            speech: None,
            utterance: None,
        }
    }

    fn dispatch(&mut self, message: Message) -> Result<()> {
        for effect in self.state.update(message) {
            self.execute(effect)?;
        }
        Ok(())
    }

    fn execute(&mut self, effect: Effect) -> Result<()> {
        match effect {
            Effect::PersistPreferences(prefs) => {
                if self.persist {
                    save_preferences(self.store, &prefs)?;
                } else {
                    debug!("Not saving {:?} without --remember", prefs);
                }
            }
            Effect::Extract { request, job } => self.acquirer.spawn(request, job),
            Effect::Speak { utterance, text } => {
                let speech = self
                    .speech
                    .as_mut()
                    .ok_or_else(|| AppError::Speech("no speech engine configured".to_string()))?;
                speech.speak(&text)?;
                self.utterance = Some(utterance);
            }
            Effect::CancelSpeech => {
                if let Some(speech) = self.speech.as_mut() {
                    speech.cancel();
                }
                self.utterance = None;
            }
        }
        Ok(())
    }

    /// Feed worker completions back until no acquisition is pending.
    fn wait_for_acquisition(&mut self) -> Result<()> {
        while self.state.in_flight().is_some() {
            match self.receiver.recv() {
                Ok(message) => self.dispatch(message)?,
                Err(_) => break,
            }
        }
        Ok(())
    }

    fn acquire(&mut self, source: &SourceArgs, ocr_command: &str) -> Result<()> {
        if let Some(text) = &source.text {
            self.dispatch(Message::SetInputType(InputType::Text))?;
            self.dispatch(Message::SetDirectText(text.clone()))?;
        } else if let Some(path) = &source.file {
            let upload = FileUpload::from_path(path, source.mime.as_deref())?;
            if upload.is_image() && !command_available(ocr_command) {
                warn!("OCR program {:?} not found; image extraction will fail", ocr_command);
            }
            info!("Reading {} ({})", upload.name, upload.media_type);
            self.dispatch(Message::SetInputType(InputType::File))?;
            self.dispatch(Message::UploadFile(upload))?;
        } else if let Some(url) = &source.url {
            self.dispatch(Message::SetInputType(InputType::Url))?;
            self.dispatch(Message::SetUrl(url.clone()))?;
            self.dispatch(Message::SubmitUrl)?;
        } else {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            self.dispatch(Message::SetDirectText(text))?;
        }

        self.wait_for_acquisition()?;
        if let Some(kind) = self.state.last_failure {
            warn!("Acquisition failed ({:?}): {}", kind, self.state.document.display_text());
        }
        Ok(())
    }
}

fn read_command(config: &AppConfig, store: &dyn KeyValueStore, args: ReadArgs) -> Result<()> {
    let dark_mode = if args.dark {
        true
    } else if args.light {
        false
    } else {
        detect_system_dark_mode()
    };

    let mut session = Session::new(config, store, dark_mode);
    session.persist = args.remember;

    if let Some(mode) = args.mode {
        session.dispatch(Message::SetMode(mode))?;
    }
    if let Some(size) = args.font_size {
        session.dispatch(Message::SetFontSize(size))?;
    }
    if let Some(spacing) = args.line_spacing {
        session.dispatch(Message::SetLineSpacing(spacing))?;
    }
    session.dispatch(Message::SetFocusLine(args.focus_line))?;
    if args.bold {
        session.dispatch(Message::ToggleBold)?;
    }
    if args.italic {
        session.dispatch(Message::ToggleItalic)?;
    }
    if args.underline {
        session.dispatch(Message::ToggleUnderline)?;
    }
    if args.color.is_some() {
        session.dispatch(Message::SetColor(args.color.clone()))?;
    }

    session.acquire(&args.source, &config.ocr.command)?;

    let view = session.state.rendered();
    match (args.format, &args.output) {
        (OutputFormat::Html, Some(path)) => {
            write_html(&view, path)?;
            open_if_requested(args.open, path);
        }
        (OutputFormat::Html, None) if args.open => {
            let path = preview_path();
            write_html(&view, &path)?;
            open_if_requested(true, &path);
        }
        (OutputFormat::Html, None) => print!("{}", view.to_html()),
        (OutputFormat::Text, Some(path)) => std::fs::write(path, view.to_plain() + "\n")?,
        (OutputFormat::Text, None) => println!("{}", view.to_plain()),
    }
    Ok(())
}

fn open_if_requested(open: bool, path: &Path) {
    if !open {
        return;
    }
    if let Err(e) = open::that(path) {
        warn!("Failed to open {:?} in the browser: {}", path, e);
    }
}

fn prefs_command(store: &FileStore, command: PrefsCommand) -> Result<()> {
    let prefs = match command {
        PrefsCommand::Show => load_preferences(store),
        PrefsCommand::Set(args) => {
            let mut state = AppState::new(load_preferences(store), false);
            let mut messages = Vec::new();
            if let Some(mode) = args.mode {
                messages.push(Message::SetMode(mode));
            }
            if let Some(size) = args.font_size {
                messages.push(Message::SetFontSize(size));
            }
            if let Some(spacing) = args.line_spacing {
                messages.push(Message::SetLineSpacing(spacing));
            }
            if messages.is_empty() {
                return Err(AppError::InvalidInput(
                    "nothing to set: pass --mode, --font-size or --line-spacing".to_string(),
                ));
            }
            for message in messages {
                state.update(message);
            }
            let prefs = state.preferences();
            save_preferences(store, &prefs)?;
            prefs
        }
        PrefsCommand::Reset => reset_preferences(store)?,
    };

    println!("{}", serde_json::to_string_pretty(&prefs)?);
    println!("# stored in {}", storage_file(store.dir()).display());
    Ok(())
}

fn storage_file(dir: &Path) -> PathBuf {
    dir.join(format!("{}.json", read_ease::app::domain::SETTINGS_KEY))
}

fn speak_command(config: &AppConfig, store: &dyn KeyValueStore, source: &SourceArgs) -> Result<()> {
    let mut session = Session::new(config, store, false);
    session.speech = Some(Box::new(CommandSpeech::from_config(&config.speech)));
    session.acquire(source, &config.ocr.command)?;

    session.dispatch(Message::ToggleSpeech)?;
    while session.state.is_speaking() {
        thread::sleep(Duration::from_millis(100));
        let finished = session
            .speech
            .as_mut()
            .map(|speech| speech.is_finished())
            .unwrap_or(true);
        if finished {
            if let Some(utterance) = session.utterance.take() {
                session.dispatch(Message::SpeechEnded(utterance))?;
            }
        }
    }
    Ok(())
}

fn timer_command(minutes: u32) -> Result<()> {
    let mut state = AppState::new(Default::default(), false);
    state.update(Message::SetTimerMinutes(minutes));
    state.update(Message::StartTimer);

    let mut stdout = io::stdout();
    while state.timer.is_running() {
        write!(stdout, "\r{} ", state.timer.format_remaining())?;
        stdout.flush()?;
        thread::sleep(Duration::from_secs(1));
        state.update(Message::TimerTick);
    }
    writeln!(stdout, "\r{} ", state.timer.format_remaining())?;
    println!("Time's up! Take a short break.");
    Ok(())
}
