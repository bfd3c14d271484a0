//! Listen command implementation (interactive console navigation)

use std::sync::mpsc::{self, Receiver};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};

use voicenav::config::Config;
use voicenav::language::{LanguageCatalog, StaticCatalog};
use voicenav::voice::{
    ConsoleMic, ConsoleProbe, NavigationEvent, NavigatorConfig, Platform, PlatformEvent,
    Subscription, VoiceNavigator,
};
use voicenav::LogEvent;

use super::demo::{demo_commands, DemoState};

/// Frame interval for timers (restart delay, overlay auto-hide)
const TICK: Duration = Duration::from_millis(50);

/// Run voice navigation against the console: each stdin line is heard as
/// one utterance, and spoken feedback is printed.
pub async fn listen_command(config: &Config, language: Option<&str>) -> Result<()> {
    let catalog = Arc::new(config.catalog(system_locale().as_deref())?);
    if let Some(code) = language {
        catalog.select(code)?;
    }

    let (tx, rx) = mpsc::channel::<PlatformEvent>();
    let mut probe = ConsoleProbe::new(tx);
    let platform = Platform::detect(&mut probe);
    let mic = probe
        .take_mic()
        .context("Console recognition was not created")?;

    let mut navigator = VoiceNavigator::new(
        platform,
        catalog.clone(),
        NavigatorConfig::from(&config.settings),
    );
    let events = navigator.subscribe();

    let state = Arc::new(Mutex::new(DemoState::default()));
    navigator.set_commands(demo_commands(state.clone()));

    println!("{}", catalog.translate("voice.main_welcome"));
    println!(
        "Voice navigation in {}. Type what you would say; :help for console commands.",
        catalog.current_language()
    );
    navigator.enable();
    navigator.show_command_hint(Instant::now());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut ticker = tokio::time::interval(TICK);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read stdin")? else {
                    break;
                };
                if !handle_line(&mut navigator, &catalog, &mic, &state, line.trim())? {
                    break;
                }
            }
            _ = ticker.tick() => {}
            _ = tokio::signal::ctrl_c() => break,
        }

        pump(&mut navigator, &rx, &events);
    }

    navigator.shutdown();
    pump(&mut navigator, &rx, &events);
    Ok(())
}

/// Returns false when the user asked to quit
fn handle_line(
    navigator: &mut VoiceNavigator,
    catalog: &StaticCatalog,
    mic: &ConsoleMic,
    state: &Arc<Mutex<DemoState>>,
    line: &str,
) -> Result<bool> {
    match line.split_once(' ').unwrap_or((line, "")) {
        ("", _) => {}
        (":quit" | ":q", _) => return Ok(false),
        (":help", _) => {
            for entry in console_help(catalog, navigator.is_enabled()) {
                println!("{}", entry);
            }
        }
        (":toggle", _) => {
            navigator.toggle();
            println!("{}", voice_status(catalog, navigator.is_enabled()));
        }
        (":status", _) => {
            let snapshot = navigator.snapshot();
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
            let current = state.lock().unwrap_or_else(|e| e.into_inner());
            println!("app: {}", current);
            println!("{}", voice_status(catalog, snapshot.enabled));
        }
        (":lang", code) => {
            if let Err(e) = navigator.set_language(code.trim()) {
                eprintln!("{}", e);
            }
        }
        (":say", text) => {
            navigator.speak(text);
        }
        _ if line.starts_with(':') => eprintln!("Unknown console command: {}", line),
        _ => {
            if !mic.hear(line) {
                println!("(not listening; :toggle turns voice navigation on)");
            }
        }
    }
    Ok(true)
}

/// Deliver pending platform notifications, advance timers, print activity
fn pump(
    navigator: &mut VoiceNavigator,
    rx: &Receiver<PlatformEvent>,
    events: &Subscription<NavigationEvent>,
) {
    // Handling an event can produce more (e.g. help speaks), so loop until quiet
    loop {
        let pending: Vec<PlatformEvent> = rx.try_iter().collect();
        if pending.is_empty() {
            break;
        }
        for event in pending {
            navigator.handle_event(Instant::now(), event);
        }
    }
    navigator.poll(Instant::now());

    for event in events.poll_events() {
        if let Some(log) = LogEvent::from_navigation(&event) {
            println!("{}", log);
        }
    }
}

/// Localized on/off label
fn voice_status(catalog: &dyn LanguageCatalog, enabled: bool) -> String {
    catalog.translate(if enabled { "voice_on" } else { "voice_off" })
}

/// Console command reference; the `:toggle` line names what it will do next
fn console_help(catalog: &dyn LanguageCatalog, enabled: bool) -> Vec<String> {
    let toggle = catalog.translate(if enabled {
        "disable_voice_navigation"
    } else {
        "enable_voice_navigation"
    });
    vec![
        "  <text>         heard as one utterance".to_string(),
        format!("  :toggle        {}", toggle),
        "  :lang <code>   switch language (see `voicenav languages`)".to_string(),
        "  :say <text>    speak arbitrary text".to_string(),
        "  :status        print navigator state".to_string(),
        "  :quit          exit".to_string(),
    ]
}

/// Primary locale from the environment, e.g. "es_ES.UTF-8"
pub fn system_locale() -> Option<String> {
    ["LC_ALL", "LC_MESSAGES", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|value| !value.is_empty() && value != "C" && value != "POSIX")
}
