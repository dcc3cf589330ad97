//! Assorted constants & hard-coded configuration
use ratatui::{
    layout::Size,
    style::{Color, Modifier, Style},
};
use std::time::Duration;

/// Width & height of the (square) board, in cells
pub(crate) const GRID_SIZE: u16 = 20;

/// Number of terminal columns used to draw a single board cell
pub(crate) const CELL_WIDTH: u16 = 2;

/// Draw everything inside a rectangle of this size in the center of the
/// terminal window.
///
/// Cf. [`crate::util::get_display_area()`]
pub(crate) const DISPLAY_SIZE: Size = Size {
    width: 80,
    height: 24,
};

/// Snake length at the start of a game
pub(crate) const INITIAL_SNAKE_LENGTH: u16 = 3;

/// Default time between movements of the snake at the start of a game
pub(crate) const BASE_TICK: Duration = Duration::from_millis(150);

/// Default amount by which the tick interval shrinks upon completing a word
pub(crate) const TICK_STEP: Duration = Duration::from_millis(5);

/// Default lower limit on the tick interval
pub(crate) const MIN_TICK: Duration = Duration::from_millis(60);

/// Points awarded for eating the correct next letter
pub(crate) const LETTER_POINTS: u32 = 10;

/// Bonus points awarded on top of [`LETTER_POINTS`] for eating the last
/// letter of a word
pub(crate) const WORD_BONUS: u32 = 50;

/// How many random cells to try per letter before giving up on placing it
pub(crate) const MAX_PLACEMENT_ATTEMPTS: usize = 1000;

/// Maximum number of turns that can be queued up between ticks
pub(crate) const INPUT_BUFFER_CAPACITY: usize = 3;

/// Longest word accepted in a custom word list
pub(crate) const MAX_WORD_LENGTH: usize = 12;

/// Glyph for the snake's head when it is moving north/up
pub(crate) const SNAKE_HEAD_NORTH_SYMBOL: char = 'v';

/// Glyph for the snake's head when it is moving south/down
pub(crate) const SNAKE_HEAD_SOUTH_SYMBOL: char = '^';

/// Glyph for the snake's head when it is moving east/right
pub(crate) const SNAKE_HEAD_EAST_SYMBOL: char = '<';

/// Glyph for the snake's head when it is moving west/left
pub(crate) const SNAKE_HEAD_WEST_SYMBOL: char = '>';

/// Glyph for the parts of the snake's body
pub(crate) const SNAKE_BODY_SYMBOL: char = '⚬';

/// Glyph for the snake's head when the game has ended
pub(crate) const COLLISION_SYMBOL: char = '×';

/// Style for the snake's head and body
pub(crate) const SNAKE_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);

/// Style for letters on the board other than the one to eat next
pub(crate) const LETTER_STYLE: Style = Style::new().fg(Color::LightRed);

/// Style for the letter on the board that should be eaten next
pub(crate) const NEXT_LETTER_STYLE: Style = Style::new()
    .fg(Color::LightYellow)
    .add_modifier(Modifier::BOLD);

/// Style for [`COLLISION_SYMBOL`]
pub(crate) const COLLISION_STYLE: Style = Style::new()
    .fg(Color::LightRed)
    .add_modifier(Modifier::REVERSED);

/// Style for key codes shown in the interface
pub(crate) const KEY_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for the score bar at the top of the game screen
pub(crate) const SCORE_BAR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Style for the already-eaten letters of the word in the score bar
pub(crate) const EATEN_STYLE: Style = Style::new().add_modifier(Modifier::DIM);

/// Style for the currently-selected menu item
pub(crate) const MENU_SELECTION_STYLE: Style = Style::new().add_modifier(Modifier::UNDERLINED);
