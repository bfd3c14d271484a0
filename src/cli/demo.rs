//! Demo navigation target for the interactive CLI

use std::sync::{Arc, Mutex};

use voicenav::voice::Command;

pub const TABS: [&str; 5] = ["home", "tools", "reports", "learn", "profile"];

const FONT_SIZE_STEP: u32 = 10;
const FONT_SIZE_MIN: u32 = 50;
const FONT_SIZE_MAX: u32 = 200;

/// Where the pretend app currently is
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoState {
    pub tab: &'static str,
    pub step: usize,
    pub signed_in: bool,
    pub high_contrast: bool,
    /// Text size in percent
    pub font_size: u32,
}

impl Default for DemoState {
    fn default() -> Self {
        Self {
            tab: TABS[0],
            step: 0,
            signed_in: true,
            high_contrast: false,
            font_size: 100,
        }
    }
}

impl std::fmt::Display for DemoState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if !self.signed_in {
            return write!(f, "signed out");
        }
        write!(
            f,
            "{} tab, step {}, text {}%",
            self.tab,
            self.step + 1,
            self.font_size
        )?;
        if self.high_contrast {
            write!(f, ", high contrast")?;
        }
        Ok(())
    }
}

/// Commands for the tab bar, step navigation, account and display
/// settings, all acting on `state`
pub fn demo_commands(state: Arc<Mutex<DemoState>>) -> Vec<Command> {
    let mut commands = Vec::new();

    for tab in TABS {
        commands.push(navigate(
            &state,
            &format!("voice.go_to_{}", tab),
            &format!("voice.desc.go_to_{}", tab),
            move |s| {
                s.tab = tab;
                s.step = 0;
            },
        ));
    }

    commands.push(navigate(&state, "voice.next", "voice.desc.next", |s| {
        s.step += 1
    }));
    commands.push(navigate(&state, "voice.previous", "voice.desc.previous", |s| {
        s.step = s.step.saturating_sub(1)
    }));
    commands.push(navigate(&state, "voice.back", "voice.desc.back", |s| {
        s.step = s.step.saturating_sub(1)
    }));
    commands.push(navigate(
        &state,
        "voice.restart_tutorial",
        "voice.desc.restart_tutorial",
        |s| {
            s.tab = TABS[0];
            s.step = 0;
        },
    ));

    // Synonyms: "sign out, I mean logout" fires both
    commands.push(navigate(&state, "voice.sign_out", "voice.desc.sign_out", |s| {
        s.signed_in = false
    }));
    commands.push(navigate(&state, "voice.logout", "voice.desc.logout", |s| {
        s.signed_in = false
    }));

    commands.push(navigate(
        &state,
        "voice.enable_high_contrast",
        "voice.desc.enable_high_contrast",
        |s| s.high_contrast = true,
    ));
    commands.push(navigate(
        &state,
        "voice.disable_high_contrast",
        "voice.desc.disable_high_contrast",
        |s| s.high_contrast = false,
    ));
    commands.push(navigate(
        &state,
        "voice.increase_font_size",
        "voice.desc.increase_font_size",
        |s| s.font_size = (s.font_size + FONT_SIZE_STEP).min(FONT_SIZE_MAX),
    ));
    commands.push(navigate(
        &state,
        "voice.decrease_font_size",
        "voice.desc.decrease_font_size",
        |s| {
            s.font_size = s
                .font_size
                .saturating_sub(FONT_SIZE_STEP)
                .max(FONT_SIZE_MIN)
        },
    ));

    commands
}

fn navigate(
    state: &Arc<Mutex<DemoState>>,
    phrase_key: &str,
    description_key: &str,
    apply: impl Fn(&mut DemoState) + Send + Sync + 'static,
) -> Command {
    let state = state.clone();
    Command::new(phrase_key, description_key, move || {
        let mut current = state.lock().unwrap_or_else(|e| e.into_inner());
        apply(&mut current);
        println!("→ {}", current);
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use voicenav::language::StaticCatalog;
    use voicenav::voice::CommandRegistry;

    fn registry() -> (CommandRegistry, Arc<Mutex<DemoState>>) {
        let state = Arc::new(Mutex::new(DemoState::default()));
        let mut registry = CommandRegistry::new();
        registry.register(demo_commands(state.clone()));
        (registry, state)
    }

    fn run(registry: &CommandRegistry, utterance: &str) -> Vec<String> {
        let catalog = StaticCatalog::bundled();
        let matches = registry.match_utterance(utterance, &catalog);
        for matched in &matches {
            matched.command.invoke();
        }
        matches
            .into_iter()
            .map(|m| m.command.phrase_key.clone())
            .collect()
    }

    #[test]
    fn test_sign_out_synonyms_both_fire() {
        let (registry, state) = registry();

        let fired = run(&registry, "sign out, i mean logout");

        assert_eq!(fired, vec!["voice.sign_out", "voice.logout"]);
        assert!(!state.lock().unwrap().signed_in);
    }

    #[test]
    fn test_display_commands() {
        let (registry, state) = registry();

        run(&registry, "enable high contrast");
        run(&registry, "increase font size");
        {
            let s = state.lock().unwrap();
            assert!(s.high_contrast);
            assert_eq!(s.font_size, 110);
        }

        run(&registry, "disable high contrast");
        for _ in 0..20 {
            run(&registry, "decrease font size");
        }
        let s = state.lock().unwrap();
        assert!(!s.high_contrast);
        assert_eq!(s.font_size, 50);
    }

    #[test]
    fn test_restart_tutorial_returns_to_first_step() {
        let (registry, state) = registry();

        run(&registry, "go to reports");
        run(&registry, "next");
        run(&registry, "restart tutorial");

        let s = state.lock().unwrap();
        assert_eq!(s.tab, "home");
        assert_eq!(s.step, 0);
    }
}
