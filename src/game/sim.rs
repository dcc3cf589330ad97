//! The rules of the game, independent of any display
use super::direction::Direction;
use super::input::InputBuffer;
use super::placement::{self, Food};
use super::snake::Snake;
use crate::consts;
use crate::highscore::ScoreStore;
use crate::words::{Word, WordList};
use log::{debug, info, warn};
use rand::Rng;
use std::time::Duration;

/// How fast the game runs and how quickly it speeds up
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Tuning {
    /// Tick interval at the start of a game
    pub(crate) base_tick: Duration,

    /// Amount by which the tick interval shrinks on each completed word
    pub(crate) tick_step: Duration,

    /// Lower limit on the tick interval
    pub(crate) min_tick: Duration,
}

impl Tuning {
    fn faster(&self, tick: Duration) -> Duration {
        tick.saturating_sub(self.tick_step).max(self.min_tick)
    }
}

impl Default for Tuning {
    fn default() -> Tuning {
        Tuning {
            base_tick: consts::BASE_TICK,
            tick_step: consts::TICK_STEP,
            min_tick: consts::MIN_TICK,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Phase {
    /// Waiting for the player to start the game
    NotStarted,
    Running,
    Paused,
    GameOver(Ending),
}

/// Why a game ended
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Ending {
    /// The snake ran into the edge of the board
    Wall,
    /// The snake ran into itself
    SelfCollision,
    /// The snake ate a letter out of order
    WrongLetter,
    /// There was no room on the board for the letters of the next word
    BoardExhausted,
}

impl Ending {
    pub(crate) fn message(self) -> &'static str {
        match self {
            Ending::Wall => "You hit the wall!",
            Ending::SelfCollision => "You bit yourself!",
            Ending::WrongLetter => "Wrong letter!",
            Ending::BoardExhausted => "No room left for the next word!",
        }
    }
}

/// Read-only view of the game for display purposes
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Snapshot<'a> {
    pub(crate) snake: &'a Snake,
    pub(crate) food: &'a [Food],
    pub(crate) word: &'a Word,
    pub(crate) progress: usize,
    pub(crate) score: u32,
    pub(crate) high_score: u32,
    pub(crate) phase: Phase,
    pub(crate) tick_interval: Duration,
}

impl Snapshot<'_> {
    /// Return the letter that must be eaten next
    pub(crate) fn next_letter(&self) -> Option<char> {
        self.word.get(self.progress)
    }
}

/// The state of a game of Word Snake
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Simulation<R, S> {
    rng: R,
    store: S,
    words: WordList,
    tuning: Tuning,
    snake: Snake,
    input: InputBuffer,
    word: Word,
    /// Index into `word` of the next letter to eat
    progress: usize,
    food: Vec<Food>,
    score: u32,
    high_score: u32,
    tick: Duration,
    phase: Phase,
}

impl<R, S> Simulation<R, S> {
    pub(crate) fn phase(&self) -> Phase {
        self.phase
    }

    pub(crate) fn tick_interval(&self) -> Duration {
        self.tick
    }

    /// Take all letters off the board
    #[cfg(test)]
    pub(crate) fn clear_food(&mut self) {
        self.food.clear();
    }

    pub(crate) fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            snake: &self.snake,
            food: &self.food,
            word: &self.word,
            progress: self.progress,
            score: self.score,
            high_score: self.high_score,
            phase: self.phase,
            tick_interval: self.tick,
        }
    }
}

impl<R: Rng, S: ScoreStore> Simulation<R, S> {
    pub(crate) fn new(words: WordList, tuning: Tuning, store: S, mut rng: R) -> Simulation<R, S> {
        let word = words.choose(&mut rng);
        let high_score = store.get();
        let mut sim = Simulation {
            rng,
            store,
            words,
            tuning,
            snake: Snake::new(),
            input: InputBuffer::new(),
            word,
            progress: 0,
            food: Vec::new(),
            score: 0,
            high_score,
            tick: tuning.base_tick,
            phase: Phase::NotStarted,
        };
        sim.place_food();
        sim
    }

    /// Begin play.  Only has an effect before the game has started.
    pub(crate) fn start(&mut self) {
        if self.phase == Phase::NotStarted {
            info!("Starting game; first word is {}", self.word);
            self.phase = Phase::Running;
        }
    }

    /// Throw away the current game and set up a new one, waiting to be
    /// started
    pub(crate) fn reset(&mut self) {
        self.snake = Snake::new();
        self.input.clear();
        self.word = self.words.choose(&mut self.rng);
        self.progress = 0;
        self.score = 0;
        self.high_score = self.store.get();
        self.tick = self.tuning.base_tick;
        self.phase = Phase::NotStarted;
        self.place_food();
    }

    /// Pause a running game or resume a paused one
    pub(crate) fn toggle_pause(&mut self) {
        match self.phase {
            Phase::Running => self.phase = Phase::Paused,
            Phase::Paused => self.phase = Phase::Running,
            _ => (),
        }
    }

    /// Queue up a turn to be applied on a later step
    pub(crate) fn direction_intent(&mut self, direction: Direction) {
        if self.phase == Phase::Running && !self.input.push(direction, self.snake.direction()) {
            debug!("Ignoring turn {direction:?}");
        }
    }

    /// Advance the game by one tick
    pub(crate) fn step(&mut self) {
        if self.phase != Phase::Running {
            return;
        }
        if let Some(direction) = self.input.drain() {
            if direction != self.snake.direction().reverse() {
                self.snake.turn(direction);
            }
        }
        let Some(new_head) = self.snake.next_head() else {
            self.end(Ending::Wall);
            return;
        };
        if self.snake.contains(new_head) {
            self.end(Ending::SelfCollision);
            return;
        }
        self.snake.push_head(new_head);
        let Some(i) = self.food.iter().position(|f| f.position == new_head) else {
            self.snake.drop_tail();
            return;
        };
        if Some(self.food[i].letter) != self.word.get(self.progress) {
            self.end(Ending::WrongLetter);
            return;
        }
        let eaten = self.food.remove(i);
        debug!("Ate letter {:?} at {:?}", eaten.letter, eaten.position);
        self.score += consts::LETTER_POINTS;
        if self.progress + 1 >= self.word.len() {
            self.complete_word();
        } else {
            self.progress += 1;
        }
    }

    fn complete_word(&mut self) {
        self.score += consts::WORD_BONUS;
        let next = self.words.choose(&mut self.rng);
        let finished = std::mem::replace(&mut self.word, next);
        self.progress = 0;
        self.tick = self.tuning.faster(self.tick);
        info!(
            "Completed {finished}; next word is {}, tick interval now {:?}",
            self.word, self.tick
        );
        self.place_food();
    }

    /// Scatter the letters of the current word around the board.  Ends the
    /// game if there isn't room.
    fn place_food(&mut self) {
        match placement::generate(&self.word, self.snake.cells().iter().copied(), &mut self.rng) {
            Ok(food) => self.food = food,
            Err(e) => {
                warn!("{e}");
                self.food.clear();
                self.end(Ending::BoardExhausted);
            }
        }
    }

    fn end(&mut self, ending: Ending) {
        info!("Game over ({ending:?}) with score {}", self.score);
        self.phase = Phase::GameOver(ending);
        if self.score > self.store.get() {
            self.store.set(self.score);
        }
        self.high_score = self.high_score.max(self.score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscore::MemoryScoreStore;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use ratatui::layout::{Position, Rect};
    use std::collections::{HashSet, VecDeque};

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    type TestSim = Simulation<ChaCha12Rng, MemoryScoreStore>;

    fn word_list(words: &[&str]) -> WordList {
        WordList::new(words.iter().map(|w| w.parse().unwrap()).collect()).unwrap()
    }

    fn new_sim(words: &[&str]) -> TestSim {
        Simulation::new(
            word_list(words),
            Tuning::default(),
            MemoryScoreStore::default(),
            ChaCha12Rng::seed_from_u64(RNG_SEED),
        )
    }

    fn food(letters: &[(u16, u16, char)]) -> Vec<Food> {
        letters
            .iter()
            .enumerate()
            .map(|(index, &(x, y, letter))| Food {
                index,
                position: Position::new(x, y),
                letter,
            })
            .collect()
    }

    /// The "AB" setup: the starting snake pointing north at an 'A', with a
    /// 'B' off to the side
    fn ab_sim(first: char) -> TestSim {
        let mut sim = new_sim(&["AB"]);
        sim.word = "AB".parse().unwrap();
        sim.food = food(&[(10, 9, first), (5, 5, 'B')]);
        sim.start();
        sim
    }

    fn cells(sim: &TestSim) -> Vec<Position> {
        sim.snake.cells().iter().copied().collect()
    }

    fn assert_fresh(sim: &TestSim) {
        assert_eq!(sim.phase, Phase::NotStarted);
        assert_eq!(sim.snake, Snake::new());
        assert_eq!(sim.progress, 0);
        assert_eq!(sim.score, 0);
        assert_eq!(sim.tick, consts::BASE_TICK);
        assert_eq!(sim.input.len(), 0);
        assert_eq!(sim.food.len(), sim.word.len());
        let positions = sim.food.iter().map(|f| f.position).collect::<HashSet<_>>();
        assert_eq!(positions.len(), sim.word.len());
        assert!(sim.snake.cells().iter().all(|p| !positions.contains(p)));
        for (f, &c) in sim.food.iter().zip(sim.word.letters()) {
            assert_eq!(f.letter, c);
        }
    }

    #[test]
    fn new_game() {
        let sim = new_sim(&["SNAKE", "TIGER"]);
        assert_fresh(&sim);
        assert!(["SNAKE", "TIGER"].contains(&sim.word.to_string().as_str()));
        assert_eq!(sim.high_score, 0);
    }

    #[test]
    fn high_score_read_from_store() {
        let sim = Simulation::new(
            word_list(&["SNAKE"]),
            Tuning::default(),
            MemoryScoreStore(340),
            ChaCha12Rng::seed_from_u64(RNG_SEED),
        );
        assert_eq!(sim.snapshot().high_score, 340);
    }

    #[test]
    fn no_ticks_before_start() {
        let mut sim = new_sim(&["SNAKE"]);
        let before = sim.clone();
        sim.step();
        assert_eq!(sim, before);
        sim.start();
        assert_eq!(sim.phase(), Phase::Running);
        sim.step();
        assert_eq!(sim.snake.head(), Position::new(10, 9));
    }

    #[test]
    fn eat_correct_letter() {
        let mut sim = ab_sim('A');
        sim.step();
        assert_eq!(sim.phase, Phase::Running);
        assert_eq!(sim.score, 10);
        assert_eq!(sim.progress, 1);
        assert_eq!(
            cells(&sim),
            [
                Position::new(10, 9),
                Position::new(10, 10),
                Position::new(10, 11),
                Position::new(10, 12),
            ]
        );
        assert_eq!(
            sim.food,
            [Food {
                index: 1,
                position: Position::new(5, 5),
                letter: 'B'
            }]
        );
        assert_eq!(sim.snapshot().next_letter(), Some('B'));
    }

    #[test]
    fn eat_wrong_letter() {
        let mut sim = ab_sim('Z');
        sim.step();
        assert_eq!(sim.phase, Phase::GameOver(Ending::WrongLetter));
        assert_eq!(sim.score, 0);
        assert_eq!(sim.progress, 0);
        assert_eq!(sim.food.len(), 2);
        // The head sits on the wrong letter and the tail stays put.
        assert_eq!(sim.snake.len(), 4);
        assert_eq!(sim.snake.head(), Position::new(10, 9));
        let after = sim.clone();
        sim.step();
        assert_eq!(sim, after);
    }

    #[test]
    fn eat_second_letter_first() {
        let mut sim = ab_sim('A');
        sim.food = food(&[(10, 9, 'B'), (5, 5, 'A')]);
        sim.step();
        assert_eq!(sim.phase, Phase::GameOver(Ending::WrongLetter));
    }

    #[test]
    fn move_without_eating() {
        let mut sim = ab_sim('A');
        sim.food = food(&[(3, 3, 'A'), (5, 5, 'B')]);
        sim.step();
        assert_eq!(
            cells(&sim),
            [
                Position::new(10, 9),
                Position::new(10, 10),
                Position::new(10, 11),
            ]
        );
        assert_eq!(sim.score, 0);
        assert_eq!(sim.food.len(), 2);
    }

    #[test]
    fn complete_word() {
        let mut sim = new_sim(&["CAT"]);
        sim.word = "AB".parse().unwrap();
        sim.food = food(&[(10, 9, 'B')]);
        sim.progress = 1;
        sim.score = 10;
        sim.start();
        sim.step();
        assert_eq!(sim.phase, Phase::Running);
        assert_eq!(sim.score, 10 + 10 + 50);
        assert_eq!(sim.progress, 0);
        assert_eq!(sim.word.to_string(), "CAT");
        assert_eq!(sim.snake.len(), 4);
        assert_eq!(sim.tick, Duration::from_millis(145));
        assert_eq!(sim.food.len(), 3);
        let positions = sim.food.iter().map(|f| f.position).collect::<HashSet<_>>();
        assert_eq!(positions.len(), 3);
        assert!(sim.snake.cells().iter().all(|p| !positions.contains(p)));
        assert_eq!(
            sim.food.iter().map(|f| f.letter).collect::<String>(),
            "CAT"
        );
    }

    #[test]
    fn tick_interval_floors() {
        let mut sim = new_sim(&["A"]);
        sim.tick = Duration::from_millis(62);
        sim.word = "A".parse().unwrap();
        sim.food = food(&[(10, 9, 'A')]);
        sim.start();
        sim.step();
        assert_eq!(sim.tick_interval(), consts::MIN_TICK);
        assert_eq!(sim.score, 60);
    }

    #[test]
    fn wall_collision() {
        let mut sim = new_sim(&["SNAKE"]);
        sim.snake.cells = VecDeque::from([
            Position::new(0, 5),
            Position::new(1, 5),
            Position::new(2, 5),
        ]);
        sim.snake.direction = Direction::West;
        sim.food.clear();
        sim.start();
        let before = sim.snake.clone();
        sim.step();
        assert_eq!(sim.phase, Phase::GameOver(Ending::Wall));
        assert_eq!(sim.snake, before);
    }

    #[test]
    fn self_collision() {
        let mut sim = new_sim(&["SNAKE"]);
        sim.snake.cells = VecDeque::from([
            Position::new(5, 5),
            Position::new(5, 6),
            Position::new(6, 6),
            Position::new(6, 5),
            Position::new(6, 4),
        ]);
        sim.snake.direction = Direction::North;
        sim.food.clear();
        sim.start();
        sim.direction_intent(Direction::East);
        sim.step();
        assert_eq!(sim.phase, Phase::GameOver(Ending::SelfCollision));
        assert_eq!(sim.snake.len(), 5);
    }

    #[test]
    fn buffered_turns_one_per_tick() {
        let mut sim = new_sim(&["SNAKE"]);
        sim.food.clear();
        sim.start();
        sim.direction_intent(Direction::East);
        sim.direction_intent(Direction::South);
        sim.step();
        assert_eq!(sim.snake.direction(), Direction::East);
        assert_eq!(sim.snake.head(), Position::new(11, 10));
        sim.step();
        assert_eq!(sim.snake.direction(), Direction::South);
        assert_eq!(sim.snake.head(), Position::new(11, 11));
    }

    #[test]
    fn reversal_ignored() {
        let mut sim = new_sim(&["SNAKE"]);
        sim.food.clear();
        sim.start();
        sim.direction_intent(Direction::South);
        sim.step();
        assert_eq!(sim.phase, Phase::Running);
        assert_eq!(sim.snake.direction(), Direction::North);
        assert_eq!(sim.snake.head(), Position::new(10, 9));
    }

    #[test]
    fn pause_keeps_buffered_input() {
        let mut sim = new_sim(&["SNAKE"]);
        sim.food.clear();
        sim.start();
        sim.direction_intent(Direction::West);
        sim.toggle_pause();
        assert_eq!(sim.phase, Phase::Paused);
        let before = sim.clone();
        sim.step();
        assert_eq!(sim, before);
        // Input while paused is dropped.
        sim.direction_intent(Direction::South);
        sim.toggle_pause();
        assert_eq!(sim.phase, Phase::Running);
        sim.step();
        assert_eq!(sim.snake.head(), Position::new(9, 10));
        assert_eq!(sim.input.len(), 0);
    }

    #[test]
    fn pause_only_while_running() {
        let mut sim = new_sim(&["SNAKE"]);
        sim.toggle_pause();
        assert_eq!(sim.phase, Phase::NotStarted);
        sim.phase = Phase::GameOver(Ending::Wall);
        sim.toggle_pause();
        assert_eq!(sim.phase, Phase::GameOver(Ending::Wall));
        sim.start();
        assert_eq!(sim.phase, Phase::GameOver(Ending::Wall));
    }

    #[test]
    fn reset_then_start() {
        let mut sim = ab_sim('A');
        sim.step();
        sim.direction_intent(Direction::East);
        sim.tick = Duration::from_millis(100);
        sim.reset();
        assert_fresh(&sim);
        assert_eq!(sim.word.to_string(), "AB");
        sim.start();
        assert_eq!(sim.phase, Phase::Running);
        assert_eq!(sim.score, 0);
    }

    #[test]
    fn reset_after_game_over() {
        let mut sim = ab_sim('Z');
        sim.step();
        assert!(matches!(sim.phase, Phase::GameOver(_)));
        sim.reset();
        assert_fresh(&sim);
    }

    #[test]
    fn high_score_saved_on_game_over() {
        let mut sim = ab_sim('A');
        sim.store = MemoryScoreStore(5);
        sim.step();
        assert_eq!(sim.store.0, 5);
        sim.snake.direction = Direction::West;
        sim.snake.cells = VecDeque::from([
            Position::new(0, 5),
            Position::new(1, 5),
            Position::new(2, 5),
            Position::new(3, 5),
        ]);
        sim.step();
        assert_eq!(sim.phase, Phase::GameOver(Ending::Wall));
        assert_eq!(sim.store.0, 10);
        assert_eq!(sim.snapshot().high_score, 10);
    }

    #[test]
    fn high_score_kept_when_not_beaten() {
        let mut sim = ab_sim('Z');
        sim.store = MemoryScoreStore(500);
        sim.high_score = 500;
        sim.step();
        assert_eq!(sim.store.0, 500);
        assert_eq!(sim.snapshot().high_score, 500);
    }

    #[derive(Clone, Debug, Default, Eq, PartialEq)]
    struct CountingStore {
        score: u32,
        writes: usize,
    }

    impl ScoreStore for CountingStore {
        fn get(&self) -> u32 {
            self.score
        }

        fn set(&mut self, score: u32) {
            self.score = score;
            self.writes += 1;
        }
    }

    #[test]
    fn high_score_written_once() {
        let mut sim = Simulation::new(
            word_list(&["AB"]),
            Tuning::default(),
            CountingStore::default(),
            ChaCha12Rng::seed_from_u64(RNG_SEED),
        );
        sim.word = "AB".parse().unwrap();
        sim.food = food(&[(10, 9, 'A'), (10, 8, 'Z')]);
        sim.start();
        sim.step();
        sim.step();
        assert_eq!(sim.phase, Phase::GameOver(Ending::WrongLetter));
        sim.step();
        sim.step();
        assert_eq!(sim.store, CountingStore { score: 10, writes: 1 });
    }

    #[test]
    fn board_exhausted_on_new_word() {
        let mut sim = new_sim(&["CAT"]);
        sim.word = "AB".parse().unwrap();
        sim.progress = 1;
        sim.food = food(&[(0, 0, 'B')]);
        let head = Position::new(1, 0);
        let mut body = VecDeque::from([head]);
        body.extend(
            Rect::new(0, 0, consts::GRID_SIZE, consts::GRID_SIZE)
                .positions()
                .filter(|&p| p != head && p != Position::ORIGIN),
        );
        sim.snake.cells = body;
        sim.snake.direction = Direction::West;
        sim.start();
        sim.step();
        assert_eq!(sim.phase, Phase::GameOver(Ending::BoardExhausted));
        assert_eq!(sim.score, 60);
        assert!(sim.food.is_empty());
        assert_eq!(sim.snake.len(), 400);
    }

    /// Wander around at random and check the invariants after every tick
    #[test]
    fn random_walk() {
        let mut sim = new_sim(&["SNAKE", "TIGER", "APPLE", "ZEBRA"]);
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED ^ 0xFFFF);
        let directions = [
            Direction::North,
            Direction::East,
            Direction::South,
            Direction::West,
        ];
        for _ in 0..50 {
            sim.reset();
            sim.start();
            while sim.phase == Phase::Running {
                for _ in 0..rng.random_range(0..3) {
                    sim.direction_intent(directions[rng.random_range(0..4)]);
                }
                let len = sim.snake.len();
                let score = sim.score;
                let direction = sim.snake.direction();
                sim.step();
                assert!(sim.score >= score);
                assert_ne!(sim.snake.direction(), direction.reverse());
                if sim.phase == Phase::Running {
                    let grew = usize::from(sim.score > score);
                    assert_eq!(sim.snake.len(), len + grew);
                    let distinct = sim.snake.cells().iter().collect::<HashSet<_>>();
                    assert_eq!(distinct.len(), sim.snake.len());
                    assert!(sim.progress < sim.word.len());
                    assert_eq!(sim.food.len(), sim.word.len() - sim.progress);
                }
            }
        }
    }
}
