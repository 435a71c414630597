use super::*;

impl App {
    /// Returns `Ok(true)` when the app should quit.
    pub fn handle_event(&mut self, event: Event) -> Result<bool> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key_event(key),
            Event::Paste(text) => {
                if let Some(ref mut login) = self.login {
                    login.code.handle_paste(&text);
                }
                Ok(false)
            }
            _ => Ok(false),
        }
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<bool> {
        if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(true);
        }

        if self.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
                self.show_help = false;
            }
            return Ok(false);
        }

        if self.surface == Surface::Display {
            return Ok(self.handle_display_key(key));
        }

        if self.login.is_some() {
            return Ok(self.handle_login_key(key));
        }

        Ok(self.handle_control_key(key))
    }

    fn handle_login_key(&mut self, key: KeyEvent) -> bool {
        let Some(ref mut login) = self.login else {
            return false;
        };

        match key.code {
            KeyCode::Esc => return true,
            KeyCode::Enter => match login.take_code() {
                Ok(code) => self.complete_oauth(code),
                Err(message) => login.error_message = Some(message),
            },
            KeyCode::Backspace => login.code.handle_backspace(),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                if login.status == LoginStatus::WaitingForCode {
                    login.code.handle_char(c);
                }
            }
            _ => {}
        }
        false
    }

    fn handle_control_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char('m') => self.toggle(AlertAction::Mute),
            KeyCode::Char('s') => self.toggle(AlertAction::Suppress),
            KeyCode::Char('r') => self.refresh_status(),
            KeyCode::Char('d') => self.open_display(),
            KeyCode::Char('l') => self.logout(),
            KeyCode::Esc => self.clear_error(),
            _ => {}
        }
        false
    }

    fn handle_display_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Esc => self.close_display(),
            _ => {}
        }
        false
    }
}
