use anyhow::Result;
use inquire::{Confirm, InquireError, Text};
use skyfetch_core::{
    Panel, SearchControl, UiEvent, UiPort,
    view::{CurrentView, ForecastView},
};
use std::fmt::Write;

/// What the user typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Event(UiEvent),
    Quit,
}

/// `UiPort` that prints to stdout and reads input with inquire prompts.
#[derive(Debug, Default)]
pub struct TerminalUi {
    /// Unsubmitted search box contents; kept when validation fails.
    input: String,
    control: SearchControl,
    recent_shown: bool,
}

impl TerminalUi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prompts once for a city, a recent-search number or a command.
    /// Returns `Quit` on Esc / Ctrl-C.
    pub fn prompt(&mut self, recent: &[String]) -> Result<Input> {
        let message = format!("{}:", self.control.label());
        let initial = self.input.clone();

        let answer = Text::new(&message)
            .with_initial_value(&initial)
            .with_help_message("city name, 1-5 for a recent search, :clear, :quit")
            .prompt();

        match answer {
            Ok(line) => {
                let input = parse_input(&line, recent);
                self.input = match input {
                    Input::Event(UiEvent::Search(_)) => line,
                    _ => String::new(),
                };
                Ok(input)
            }
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                Ok(Input::Quit)
            }
            Err(err) => Err(err.into()),
        }
    }
}

/// Maps a prompt line onto an event. Numbers pick from `recent` (1-based).
pub fn parse_input(line: &str, recent: &[String]) -> Input {
    let trimmed = line.trim();

    match trimmed {
        ":quit" | ":q" => return Input::Quit,
        ":clear" => return Input::Event(UiEvent::ClearHistory),
        _ => {}
    }

    let picked = trimmed
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| recent.get(i));

    if let Some(city) = picked {
        return Input::Event(UiEvent::Recent(city.clone()));
    }

    Input::Event(UiEvent::Search(line.to_string()))
}

pub fn format_panel(panel: &Panel) -> String {
    let mut out = String::new();

    match panel {
        Panel::Welcome { suggestions } => {
            let _ = writeln!(out, "Welcome to SkyFetch!");
            let _ = writeln!(out, "Enter a city name to get started.");
            if !suggestions.is_empty() {
                let _ = writeln!(out, "Try: {}", suggestions.join(", "));
            }
        }
        Panel::Loading => {
            let _ = writeln!(out, "Loading weather data...");
        }
        Panel::Error { message } => {
            let _ = writeln!(out, "Error: {message}");
        }
        Panel::Current(view) => format_current(&mut out, view),
        Panel::Forecast(view) => format_forecast(&mut out, view),
    }

    out
}

fn format_current(out: &mut String, view: &CurrentView) {
    let _ = writeln!(out, "{}", view.city);
    let _ = writeln!(out, "  {}  {}", view.temperature, view.description);
    let _ = writeln!(out, "  {}", view.icon_url);
}

fn format_forecast(out: &mut String, view: &ForecastView) {
    let _ = writeln!(out, "{}", view.title);
    for card in &view.cards {
        let _ = writeln!(
            out,
            "  {:<4} {:>6}  {:<24} {}",
            card.day, card.temperature, card.description, card.icon_url
        );
    }
}

pub fn format_recent(cities: &[String]) -> String {
    let entries: Vec<String> = cities
        .iter()
        .enumerate()
        .map(|(i, city)| format!("{}) {city}", i + 1))
        .collect();

    format!("Recent: {}", entries.join("  "))
}

impl UiPort for TerminalUi {
    fn render(&mut self, panel: Panel) {
        print!("\n{}", format_panel(&panel));
    }

    fn append(&mut self, panel: Panel) {
        print!("{}", format_panel(&panel));
    }

    fn render_recent(&mut self, cities: &[String]) {
        if cities.is_empty() {
            if self.recent_shown {
                println!("Recent searches cleared.");
            }
            self.recent_shown = false;
            return;
        }

        self.recent_shown = true;
        println!("{}", format_recent(cities));
    }

    fn set_search_control(&mut self, control: SearchControl) {
        self.control = control;
    }

    fn clear_input(&mut self) {
        self.input.clear();
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        Confirm::new(prompt)
            .with_default(false)
            .prompt()
            .unwrap_or(false)
    }
}
