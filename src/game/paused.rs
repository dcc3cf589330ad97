use crate::command::Command;
use crate::consts;
use crate::util::EnumExt;
use enum_map::Enum;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{
        block::{Block, Padding},
        Clear, Widget,
    },
};

/// A widget for displaying a pause menu pop-up
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct PauseMenu {
    /// The currently-selected item in the pause menu
    selection: PauseOpt,
}

impl PauseMenu {
    /// The height that should be used for the `Rect` passed to
    /// `PauseMenu::render()`
    pub(super) const HEIGHT: u16 = 5;

    /// The width that should be used for the `Rect` passed to
    /// `PauseMenu::render()`
    pub(super) const WIDTH: u16 = 19;

    pub(super) fn new() -> PauseMenu {
        PauseMenu {
            selection: PauseOpt::min(),
        }
    }

    /// Handle a command.  Returns `Some` if the user made a choice.
    pub(super) fn handle_command(&mut self, cmd: Command) -> Option<PauseOpt> {
        match cmd {
            Command::Esc | Command::P => return Some(PauseOpt::Resume),
            Command::R => return Some(PauseOpt::Restart),
            Command::Q | Command::Quit => return Some(PauseOpt::Quit),
            Command::Enter | Command::Space => return Some(self.selection),
            Command::Up => {
                if let Some(opt) = self.selection.prev() {
                    self.selection = opt;
                }
            }
            Command::Down => {
                if let Some(opt) = self.selection.next() {
                    self.selection = opt;
                }
            }
            Command::Next => self.selection = self.selection.next().unwrap_or_else(PauseOpt::min),
            Command::Prev => self.selection = self.selection.prev().unwrap_or_else(PauseOpt::max),
            Command::Home => self.selection = PauseOpt::min(),
            Command::End => self.selection = PauseOpt::max(),
            _ => (),
        }
        None
    }
}

/// The choices in the pause menu
#[derive(Clone, Copy, Debug, Enum, Eq, PartialEq)]
pub(super) enum PauseOpt {
    /// Unpause/resume the game
    Resume,

    /// Start a new game
    Restart,

    /// Quit the application
    Quit,
}

impl PauseOpt {
    /// Render the option as a `Line` for display in the pause menu.  If
    /// `selected` is `true`, this option is the currently-selected/active one.
    fn to_line(self, selected: bool) -> Line<'static> {
        let mut line = Line::default();
        if selected {
            line.push_span("» ");
        } else {
            line.push_span("  ");
        }
        let (label, key) = match self {
            PauseOpt::Resume => ("Resume", "Esc"),
            PauseOpt::Restart => ("Restart", "r"),
            PauseOpt::Quit => ("Quit", "q"),
        };
        line.push_span(format!("{label} ("));
        line.push_span(Span::styled(key, consts::KEY_STYLE));
        line.push_span(")");
        if selected {
            line = line.style(consts::MENU_SELECTION_STYLE);
        }
        line
    }
}

impl Widget for PauseMenu {
    /*
     * ┌──── PAUSED ─────┐
     * │ » Resume (Esc)  │
     * │   Restart (r)   │
     * │   Quit (q)      │
     * └─────────────────┘
     */

    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(" PAUSED ")
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1))
            .style(Style::reset());
        let inner = block.inner(area);
        Clear.render(area, buf);
        block.render(area, buf);
        for (opt, row) in PauseOpt::iter().zip(inner.rows()) {
            opt.to_line(self.selection == opt).render(row, buf);
        }
    }
}
