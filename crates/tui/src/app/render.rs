use super::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap};

const DISPLAY_GREEN: Color = Color::Rgb(34, 197, 94);
const ON_COLOR: Color = Color::Green;
const ACTIVE_COLOR: Color = Color::Red;

impl App {
    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();

        if self.surface == Surface::Display {
            self.render_display(frame, area);
            if self.show_help {
                self.render_help(frame, area);
            }
            return;
        }

        if let Some(ref login) = self.login {
            self.render_login(frame, area, login);
            return;
        }

        if self.show_help {
            self.render_help(frame, area);
            return;
        }

        let panels = self.layout.calculate_layout(area).to_vec();

        for panel in panels {
            match panel.panel_type {
                PanelType::Topbar => self.render_topbar(frame, panel.rect),
                PanelType::StatePanel => self.render_state_panel(frame, panel.rect),
                PanelType::Controls => self.render_controls(frame, panel.rect),
                PanelType::StatusBar => self.render_status_bar(frame, panel.rect),
            }
        }
    }

    fn render_topbar(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![Span::styled(
            " Streamlabs Alert Control ",
            Style::default().add_modifier(Modifier::BOLD),
        )];
        if let Some(ref user) = self.user {
            spans.push(Span::styled(
                format!(" {} ", user.display_name()),
                Style::default().fg(Color::DarkGray),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)).centered(), area);
    }

    fn render_state_panel(&self, frame: &mut Frame, area: Rect) {
        let color = match self.alert_state {
            AlertState::Normal => ON_COLOR,
            AlertState::Mute => ACTIVE_COLOR,
            AlertState::Suppress => Color::Yellow,
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(" Current State ");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let badge = Paragraph::new(Line::from(Span::styled(
            format!(" {} ", self.alert_state.label()),
            Style::default()
                .fg(Color::Black)
                .bg(color)
                .add_modifier(Modifier::BOLD),
        )))
        .centered();
        frame.render_widget(badge, centered_rect(inner, inner.width, 1));
    }

    fn render_controls(&self, frame: &mut Frame, area: Rect) {
        let button = |key: char, active: bool, on: &str, off: &str| -> Line<'static> {
            let label = if self.busy {
                "...".to_string()
            } else if active {
                on.to_string()
            } else {
                off.to_string()
            };
            let bg = if active { ACTIVE_COLOR } else { ON_COLOR };
            let mut style = Style::default().fg(Color::White).bg(bg);
            if self.busy {
                style = style.add_modifier(Modifier::DIM);
            }
            Line::from(vec![
                Span::raw(format!(" [{key}] ")),
                Span::styled(format!(" {label:<20}"), style),
            ])
        };

        let lines = vec![
            button('m', self.alert_state == AlertState::Mute, "Unmute Alerts", "Mute Alerts"),
            button(
                's',
                self.alert_state == AlertState::Suppress,
                "Unsuppress Alerts",
                "Suppress Alerts",
            ),
            Line::raw(""),
            Line::from(vec![
                Span::raw(" [d] "),
                Span::styled(
                    " Open Display         ",
                    Style::default().fg(Color::White).bg(Color::Blue),
                ),
            ]),
            Line::from(vec![
                Span::raw(" [l] "),
                Span::styled(
                    " Logout               ",
                    Style::default().fg(Color::White).bg(Color::DarkGray),
                ),
            ]),
            Line::raw(" [r] refresh  [?] help  [q] quit"),
        ];

        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .title(" Controls "),
        );
        frame.render_widget(paragraph, area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let line = if let Some(ref error) = self.last_error {
            Line::from(Span::styled(
                format!(" {error}"),
                Style::default().fg(Color::Red),
            ))
        } else {
            let changed = self
                .last_change
                .map(|t| t.format("%H:%M:%S").to_string())
                .unwrap_or_else(|| "-".to_string());
            Line::from(Span::styled(
                format!(" proxy {} | last change {}", self.proxy.base_url(), changed),
                Style::default().fg(Color::DarkGray),
            ))
        };
        frame.render_widget(Paragraph::new(line), area);
    }

    /// Full-screen, read-only mirror of the alert state.
    fn render_display(&self, frame: &mut Frame, area: Rect) {
        frame.render_widget(
            Block::default().style(Style::default().bg(DISPLAY_GREEN)),
            area,
        );

        let label = match self.alert_state {
            AlertState::Mute => "MUTED",
            AlertState::Suppress => "SUPPRESSED",
            AlertState::Normal => return,
        };

        let banner_width = (label.len() as u16 + 12).min(area.width);
        let banner = Paragraph::new(vec![
            Line::raw(""),
            Line::styled(
                label,
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Line::raw(""),
        ])
        .centered()
        .style(Style::default().bg(DISPLAY_GREEN))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Thick)
                .border_style(Style::default().fg(Color::White)),
        );
        frame.render_widget(banner, centered_rect(area, banner_width, 5));
    }

    fn render_login(&self, frame: &mut Frame, area: Rect, login: &LoginState) {
        let mut lines = vec![
            Line::styled(
                "Connect with Streamlabs",
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Line::raw(""),
        ];

        if let Some(ref url) = login.auth_url {
            lines.push(Line::raw("1. Open this URL in your browser and authorize:"));
            lines.push(Line::styled(url.clone(), Style::default().fg(Color::Cyan)));
            lines.push(Line::raw(""));
            lines.push(Line::raw("2. Paste the code or the whole callback URL:"));
            lines.push(Line::raw(format!("   Code: {}_", login.code.display())));
            lines.push(Line::raw(""));
        }

        match (login.status, &login.error_message) {
            (LoginStatus::ExchangingToken, _) => lines.push(Line::styled(
                "Authenticating...",
                Style::default().fg(Color::Yellow),
            )),
            (_, Some(error)) => {
                lines.push(Line::styled(error.clone(), Style::default().fg(Color::Red)))
            }
            _ => {}
        }

        lines.push(Line::raw(""));
        lines.push(Line::styled(
            "[Enter] log in   [Esc] quit",
            Style::default().fg(Color::DarkGray),
        ));

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .title(" Streamlabs Alert Control "),
        );
        frame.render_widget(paragraph, centered_rect(area, 80, 18));
    }

    fn render_help(&self, frame: &mut Frame, area: Rect) {
        let popup = centered_rect(area, 60, 24);
        frame.render_widget(Clear, popup);
        let paragraph = Paragraph::new(self.keybinds.help_text()).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Help (Esc to close) "),
        );
        frame.render_widget(paragraph, popup);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn rendered(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).expect("terminal");
        terminal.draw(|frame| app.render(frame)).expect("draw");
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn app(surface: Surface) -> (App, tempfile::TempDir) {
        let dir = tempfile::tempdir().expect("tempdir");
        let app = App::new(Config::default(), SessionStore::in_dir(dir.path()), surface);
        (app, dir)
    }

    #[test]
    fn display_is_blank_when_normal_and_labelled_otherwise() {
        let (mut app, _dir) = app(Surface::Display);
        let screen = rendered(&mut app);
        assert!(!screen.contains("MUTED"));

        app.alert_state = AlertState::Suppress;
        assert!(rendered(&mut app).contains("SUPPRESSED"));
    }

    #[test]
    fn control_buttons_follow_state() {
        let (mut app, _dir) = app(Surface::Control);
        let screen = rendered(&mut app);
        assert!(screen.contains("Mute Alerts"));
        assert!(screen.contains("ON"));

        app.alert_state = AlertState::Mute;
        let screen = rendered(&mut app);
        assert!(screen.contains("Unmute Alerts"));
        assert!(screen.contains("MUTED"));

        app.busy = true;
        assert!(!rendered(&mut app).contains("Unmute Alerts"));
    }

    #[test]
    fn login_screen_explains_missing_credentials() {
        let (mut app, _dir) = app(Surface::Control);
        app.init();
        assert!(rendered(&mut app).contains("STREAMLABS_CLIENT_ID"));
    }
}
