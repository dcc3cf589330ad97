mod clock;
mod direction;
mod input;
mod paused;
mod placement;
mod sim;
mod snake;
use self::clock::Clock;
use self::direction::Direction;
use self::paused::{PauseMenu, PauseOpt};
pub(crate) use self::sim::Tuning;
use self::sim::{Ending, Phase, Simulation, Snapshot};
use crate::app::Screen;
use crate::command::Command;
use crate::consts;
use crate::highscore::{JsonScoreStore, ScoreStore};
use crate::util::{center_rect, get_display_area};
use crate::words::WordList;
use crossterm::event::{poll, read, Event};
use rand::Rng;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Margin, Position, Rect, Size},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Widget},
    Frame,
};
use std::time::Instant;

/// Size of the board's on-screen border box
const BOARD_BOX: Size = Size {
    width: consts::GRID_SIZE * consts::CELL_WIDTH + 2,
    height: consts::GRID_SIZE + 2,
};

/// The game screen: a [`Simulation`] plus everything needed to drive it from
/// the terminal
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Game<R = rand::rngs::ThreadRng, S = JsonScoreStore> {
    sim: Simulation<R, S>,
    clock: Clock,
    pause_menu: PauseMenu,
}

impl<S: ScoreStore> Game<rand::rngs::ThreadRng, S> {
    pub(crate) fn new(words: WordList, tuning: Tuning, store: S) -> Self {
        Game::new_with_rng(words, tuning, store, rand::rng())
    }
}

impl<R: Rng, S: ScoreStore> Game<R, S> {
    pub(crate) fn new_with_rng(words: WordList, tuning: Tuning, store: S, rng: R) -> Game<R, S> {
        Game {
            sim: Simulation::new(words, tuning, store, rng),
            clock: Clock::new(),
            pause_menu: PauseMenu::new(),
        }
    }

    /// Wait for either the next input event or the next tick, whichever comes
    /// first, and handle it
    pub(crate) fn process_input(&mut self) -> std::io::Result<Option<Screen>> {
        if self.sim.phase() == Phase::Running {
            let wait = self
                .clock
                .time_left(Instant::now(), self.sim.tick_interval());
            if wait.is_zero() || !poll(wait)? {
                self.tick(Instant::now());
                Ok(None)
            } else {
                Ok(self.handle_event(read()?))
            }
        } else {
            self.clock.cancel();
            Ok(self.handle_event(read()?))
        }
    }

    fn tick(&mut self, now: Instant) {
        if self.clock.fire(now) {
            self.sim.step();
        }
    }

    fn handle_event(&mut self, event: Event) -> Option<Screen> {
        if event == Event::FocusLost {
            if self.sim.phase() == Phase::Running {
                self.pause();
            }
            return None;
        }
        let cmd = Command::from_key_event(event.as_key_press_event()?)?;
        match self.sim.phase() {
            Phase::NotStarted => match cmd {
                Command::Enter | Command::Space => self.sim.start(),
                Command::Quit | Command::Q => return Some(Screen::Quit),
                _ => (),
            },
            Phase::Running => match cmd {
                Command::Quit => return Some(Screen::Quit),
                Command::Up => self.sim.direction_intent(Direction::North),
                Command::Left => self.sim.direction_intent(Direction::West),
                Command::Down => self.sim.direction_intent(Direction::South),
                Command::Right => self.sim.direction_intent(Direction::East),
                Command::Esc | Command::P => self.pause(),
                _ => (),
            },
            Phase::Paused => match self.pause_menu.handle_command(cmd)? {
                PauseOpt::Resume => self.sim.toggle_pause(),
                PauseOpt::Restart => self.reset(),
                PauseOpt::Quit => return Some(Screen::Quit),
            },
            Phase::GameOver(_) => match cmd {
                Command::R | Command::Enter => self.reset(),
                Command::Quit | Command::Q => return Some(Screen::Quit),
                _ => (),
            },
        }
        None
    }

    fn pause(&mut self) {
        self.sim.toggle_pause();
        self.clock.cancel();
        self.pause_menu = PauseMenu::new();
    }

    fn reset(&mut self) {
        self.sim.reset();
        self.clock.cancel();
    }
}

impl<R, S> Game<R, S> {
    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }
}

impl<R, S> Widget for &Game<R, S> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let snap = self.sim.snapshot();
        let display = get_display_area(area);
        let [score_area, board_area, msg_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(BOARD_BOX.height),
            Constraint::Length(1),
        ])
        .areas(display);
        score_bar(&snap).render(score_area, buf);

        let block_area = center_rect(board_area, BOARD_BOX);
        Block::bordered().render(block_area, buf);
        let mut board = Canvas {
            area: block_area.inner(Margin::new(1, 1)),
            buf,
        };
        for p in snap.snake.body() {
            board.draw_cell(p, consts::SNAKE_BODY_SYMBOL, consts::SNAKE_STYLE);
        }
        let next_letter = snap.next_letter();
        for food in snap.food {
            let style = if Some(food.letter) == next_letter {
                consts::NEXT_LETTER_STYLE
            } else {
                consts::LETTER_STYLE
            };
            board.draw_cell(food.position, food.letter, style);
        }
        // Draw the head last so that, if it's a collision, we overwrite
        // whatever it's colliding with
        match snap.phase {
            Phase::GameOver(Ending::Wall | Ending::SelfCollision | Ending::WrongLetter) => {
                board.draw_cell(
                    snap.snake.head(),
                    consts::COLLISION_SYMBOL,
                    consts::COLLISION_STYLE,
                );
            }
            _ => board.draw_cell(
                snap.snake.head(),
                snap.snake.head_symbol(),
                consts::SNAKE_STYLE,
            ),
        }

        match snap.phase {
            Phase::NotStarted => Line::from_iter([
                Span::raw(" Eat the letters in order! Start ("),
                Span::styled("Enter", consts::KEY_STYLE),
                Span::raw(") — Quit ("),
                Span::styled("q", consts::KEY_STYLE),
                Span::raw(")"),
            ])
            .render(msg_area, buf),
            Phase::Running => Line::from_iter([
                Span::raw(" Pause ("),
                Span::styled("p", consts::KEY_STYLE),
                Span::raw(format!(")   Speed: {} ms", snap.tick_interval.as_millis())),
            ])
            .render(msg_area, buf),
            Phase::Paused => {
                let pause_area = center_rect(
                    display,
                    Size {
                        width: PauseMenu::WIDTH,
                        height: PauseMenu::HEIGHT,
                    },
                );
                self.pause_menu.render(pause_area, buf);
            }
            Phase::GameOver(ending) => Line::from_iter([
                Span::raw(format!(" — GAME OVER — {} Restart (", ending.message())),
                Span::styled("r", consts::KEY_STYLE),
                Span::raw(") — Quit ("),
                Span::styled("q", consts::KEY_STYLE),
                Span::raw(")"),
            ])
            .render(msg_area, buf),
        }
    }
}

/// Build the line across the top of the screen showing the score, the high
/// score, and the word being spelled
fn score_bar(snap: &Snapshot<'_>) -> Line<'static> {
    let mut line = Line::from(format!(
        " Score: {}   High: {}   Word: ",
        snap.score, snap.high_score
    ));
    let (eaten, remaining) = snap
        .word
        .letters()
        .split_at(snap.progress.min(snap.word.len()));
    line.push_span(Span::styled(
        eaten.iter().collect::<String>(),
        consts::EATEN_STYLE,
    ));
    line.push_span(Span::raw(remaining.iter().collect::<String>()));
    line.style(consts::SCORE_BAR_STYLE)
}

#[derive(Debug, Eq, PartialEq)]
struct Canvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    /// Draw `symbol` in the board cell at `pos`
    fn draw_cell(&mut self, pos: Position, symbol: char, style: Style) {
        let Some(x) = pos
            .x
            .checked_mul(consts::CELL_WIDTH)
            .and_then(|x| self.area.x.checked_add(x))
        else {
            return;
        };
        let Some(y) = self.area.y.checked_add(pos.y) else {
            return;
        };
        if let Some(cell) = self.buf.cell_mut((x, y)) {
            cell.set_char(symbol);
            cell.set_style(Style::reset().patch(style));
        }
    }
}
