use ratatui::layout::{Constraint, Direction, Flex, Layout, Rect};

use super::panel::{Panel, PanelType};

const TOPBAR_HEIGHT: u16 = 1;
const CONTROLS_HEIGHT: u16 = 8;
const STATUS_HEIGHT: u16 = 1;
const MAX_CONTENT_WIDTH: u16 = 60;

#[derive(Default)]
pub struct LayoutState {
    cached_panels: Vec<Panel>,
}

impl LayoutState {
    pub fn calculate_layout(&mut self, area: Rect) -> &[Panel] {
        let column = centered_columns(area, MAX_CONTENT_WIDTH);

        let main_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(TOPBAR_HEIGHT),
                Constraint::Min(5),
                Constraint::Length(CONTROLS_HEIGHT),
                Constraint::Length(STATUS_HEIGHT),
            ])
            .split(column);

        self.cached_panels = vec![
            Panel {
                panel_type: PanelType::Topbar,
                rect: main_layout[0],
            },
            Panel {
                panel_type: PanelType::StatePanel,
                rect: main_layout[1],
            },
            Panel {
                panel_type: PanelType::Controls,
                rect: main_layout[2],
            },
            Panel {
                panel_type: PanelType::StatusBar,
                rect: main_layout[3],
            },
        ];

        &self.cached_panels
    }
}

/// Horizontal strip of at most `max_width` columns, centered in `area`.
pub fn centered_columns(area: Rect, max_width: u16) -> Rect {
    let [column] = Layout::horizontal([Constraint::Max(max_width)])
        .flex(Flex::Center)
        .areas(area);
    column
}

/// Box of `width` x `height`, centered in `area` and clipped to it.
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    centered_columns(row, width)
}
