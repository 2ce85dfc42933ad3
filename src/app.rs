use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::path::PathBuf;
use std::time::Instant;

use crate::config::AppConfig;
use crate::convert::{self, Base, ConversionResult};

/// Seconds before a status message clears itself
const STATUS_TIMEOUT_SECS: u64 = 3;

/// Longest text the number field holds, leading zeros included.
/// A UI cap on typing only; one-shot conversions have no length limit.
pub const MAX_INPUT_LEN: usize = 160;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    BaseSelector,
    Input,
    ConvertButton,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Popup {
    None,
    Help,
}

pub struct App {
    pub field: Field,
    pub popup: Popup,

    // Form state
    pub base: Base,
    pub input: String,
    pub result: Option<ConversionResult>,
    pub explanation: String,
    pub error: bool,

    pub config: AppConfig,
    /// Where the last base is saved; `None` when running without a config file
    pub config_path: Option<PathBuf>,

    // Status message (shown in info line, auto-clears after timeout)
    pub status_message: Option<String>,
    pub status_message_time: Option<Instant>,
}

impl App {
    pub fn new(config: AppConfig, config_path: Option<PathBuf>) -> Self {
        Self {
            field: Field::Input,
            popup: Popup::None,

            base: config.initial_base(),
            input: String::new(),
            result: None,
            explanation: String::new(),
            error: false,

            config,
            config_path,

            status_message: None,
            status_message_time: None,
        }
    }

    /// Set a status message (auto-clears after 3 seconds)
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
        self.status_message_time = Some(Instant::now());
    }

    /// True while keystrokes go into the number field
    pub fn is_typing(&self) -> bool {
        self.popup == Popup::None && self.field == Field::Input
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        // Handle popups first
        if self.popup != Popup::None {
            return self.handle_popup_key(key);
        }

        self.handle_form_key(key)
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab => {
                self.field = match self.field {
                    Field::BaseSelector => Field::Input,
                    Field::Input => Field::ConvertButton,
                    Field::ConvertButton => Field::BaseSelector,
                };
            }
            KeyCode::BackTab => {
                self.field = match self.field {
                    Field::BaseSelector => Field::ConvertButton,
                    Field::Input => Field::BaseSelector,
                    Field::ConvertButton => Field::Input,
                };
            }
            KeyCode::Enter => self.convert(),
            KeyCode::F(1) => self.popup = Popup::Help,
            _ => match self.field {
                Field::BaseSelector => self.handle_selector_key(key),
                Field::Input => self.handle_input_key(key),
                Field::ConvertButton => {
                    match key.code {
                        KeyCode::Char(' ') => self.convert(),
                        KeyCode::Char('?') => self.popup = Popup::Help,
                        _ => {}
                    }
                }
            },
        }
    }

    fn handle_selector_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Right | KeyCode::Down | KeyCode::Char('l') | KeyCode::Char('j') => {
                self.select_base(self.base.next());
            }
            KeyCode::Left | KeyCode::Up | KeyCode::Char('h') | KeyCode::Char('k') => {
                self.select_base(self.base.prev());
            }
            KeyCode::Char('b') => self.select_base(Base::Binary),
            KeyCode::Char('d') => self.select_base(Base::Decimal),
            KeyCode::Char('o') => self.select_base(Base::Octal),
            KeyCode::Char('x') => self.select_base(Base::Hexadecimal),
            KeyCode::Char('?') => self.popup = Popup::Help,
            _ => {}
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Esc => self.input.clear(),
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.input.clear();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                if self.input.chars().count() >= MAX_INPUT_LEN {
                    self.set_status("Input is at maximum length");
                } else {
                    // Invalid characters are kept so the validator can report them
                    self.input.push(c);
                }
            }
            _ => {}
        }
    }

    fn handle_popup_key(&mut self, key: KeyEvent) {
        match self.popup {
            Popup::Help => {
                if matches!(
                    key.code,
                    KeyCode::Esc | KeyCode::Char('?') | KeyCode::F(1) | KeyCode::Enter | KeyCode::Char('q')
                ) {
                    self.popup = Popup::None;
                }
            }
            Popup::None => {}
        }
    }

    pub fn select_base(&mut self, base: Base) {
        if self.base != base {
            tracing::debug!(from = %self.base, to = %base, "base selected");
            self.base = base;
        }
    }

    /// Run the conversion for the current input and base
    pub fn convert(&mut self) {
        match convert::convert(&self.input, self.base) {
            Ok(result) => {
                self.explanation = result.explanation();
                self.result = Some(result);
                self.error = false;
            }
            Err(e) => {
                tracing::debug!(base = %e.base(), "conversion failed: {}", e);
                self.result = None;
                self.explanation = e.to_string();
                self.error = true;
            }
        }
    }

    /// Persist the selected base when the config asks for it.
    /// Returns whether the file was written.
    pub fn save_last_base(&mut self) -> Result<bool> {
        let Some(path) = &self.config_path else {
            return Ok(false);
        };
        if !self.config.remember_last_base || self.config.last_base == Some(self.base) {
            return Ok(false);
        }
        self.config.last_base = Some(self.base);
        self.config.save_to(path)?;
        Ok(true)
    }

    pub fn tick(&mut self) {
        // Clear status message after timeout
        if let Some(time) = self.status_message_time {
            if time.elapsed().as_secs() >= STATUS_TIMEOUT_SECS {
                self.status_message = None;
                self.status_message_time = None;
            }
        }
    }
}
