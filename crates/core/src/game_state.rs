//! Game state module - the session state machine
//!
//! A [`GameSession`] owns the board, the falling shape, the score and the
//! game-over flag. Spawning, falling, locking and row clearing are not separate
//! tasks: they all happen inside [`GameSession::apply_action_with`], called
//! synchronously by the polling loop. Once a freshly spawned shape conflicts
//! with the board the session is over and ignores every action until
//! [`GameSession::restart`].

use crate::board::Board;
use crate::display::Renderer;
use crate::pieces::Shape;
use crate::rng::{RandomSource, SimpleRng, SpawnChoice, SpawnPicker};
use crate::scoring::ScoreTracker;
use crate::snapshot::{GameSnapshot, ShapeSnapshot};
use crate::types::*;

/// Complete state of one play session
#[derive(Debug, Clone)]
pub struct GameSession<R = SimpleRng> {
    board: Board,
    current: Option<Shape>,
    score: ScoreTracker,
    picker: SpawnPicker,
    rng: R,
    /// Increments on every restart.
    session_id: u32,
    /// Shapes spawned in this session, including one that ended the game.
    shapes_spawned: u32,
    rows_cleared: u32,
    started: bool,
    game_over: bool,
}

impl GameSession<SimpleRng> {
    /// Create a session driven by the built-in LCG
    pub fn with_seed(seed: u32) -> Self {
        Self::new(SimpleRng::new(seed))
    }
}

impl<R: RandomSource> GameSession<R> {
    /// Create an idle session; call [`GameSession::start`] to spawn the first shape
    pub fn new(rng: R) -> Self {
        Self::from_board(rng, Board::new())
    }

    /// Create a session on a prepared board with no falling shape.
    ///
    /// Used for scripted play and replays; follow with
    /// [`GameSession::spawn_with`] or [`GameSession::spawn_shape`].
    pub fn from_board(rng: R, board: Board) -> Self {
        Self {
            board,
            current: None,
            score: ScoreTracker::new(),
            picker: SpawnPicker::new(),
            rng,
            session_id: 0,
            shapes_spawned: 0,
            rows_cleared: 0,
            started: false,
            game_over: false,
        }
    }

    /// Clear the board, zero the score and spawn the first shape
    pub fn start<O: Renderer + ?Sized>(&mut self, out: &mut O) {
        for row in 0..ROWS as i8 {
            for col in 0..COLS as i8 {
                if self.board.is_occupied(row, col) {
                    self.board.set(row, col, Color::Empty);
                    out.paint_cell(row as u8, col as u8, Color::Empty);
                }
            }
        }

        self.current = None;
        self.shapes_spawned = 0;
        self.rows_cleared = 0;
        self.game_over = false;
        self.started = true;

        self.spawn_shape();
        if !self.game_over {
            if let Some(shape) = self.current {
                paint_shape(&shape, shape.color, out);
            }
        }
        self.score.reset(out);
    }

    /// Begin a new session on the same random stream
    pub fn restart<O: Renderer + ?Sized>(&mut self, out: &mut O) {
        self.session_id = self.session_id.wrapping_add(1);
        self.start(out);
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current(&self) -> Option<Shape> {
        self.current
    }

    pub fn score(&self) -> u32 {
        self.score.score()
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn session_id(&self) -> u32 {
        self.session_id
    }

    pub fn shapes_spawned(&self) -> u32 {
        self.shapes_spawned
    }

    pub fn rows_cleared(&self) -> u32 {
        self.rows_cleared
    }

    /// Spawn a random shape at row 0.
    ///
    /// Returns false (and ends the game) if it conflicts immediately.
    pub fn spawn_shape(&mut self) -> bool {
        let choice = self.picker.pick(&mut self.rng);
        self.place(choice)
    }

    /// Spawn a specific shape at row 0 and the given column.
    ///
    /// Returns false (and ends the game) if it conflicts immediately.
    pub fn spawn_with(&mut self, kind: ShapeKind, color: Color, col: i8) -> bool {
        self.picker.note(kind, color);
        self.place(SpawnChoice { kind, color, col })
    }

    fn place(&mut self, choice: SpawnChoice) -> bool {
        let shape = Shape::spawn(choice.kind, choice.color, choice.col);
        self.current = Some(shape);
        self.started = true;
        self.shapes_spawned = self.shapes_spawned.wrapping_add(1);

        if self.board.conflict(&shape) {
            self.game_over = true;
            return false;
        }
        true
    }

    /// Apply an action without rendering
    pub fn apply_action(&mut self, action: GameAction) -> ActionOutcome {
        self.apply_action_with(action, &mut ())
    }

    /// Apply an action, reporting changed cells and score to `out`.
    ///
    /// The falling shape is painted empty first and repainted in its color
    /// afterwards (unless the game just ended).
    pub fn apply_action_with<O: Renderer + ?Sized>(
        &mut self,
        action: GameAction,
        out: &mut O,
    ) -> ActionOutcome {
        if self.game_over {
            return ActionOutcome::Ignored;
        }
        let Some(current) = self.current else {
            return ActionOutcome::Ignored;
        };

        paint_shape(&current, Color::Empty, out);

        let outcome = match action {
            GameAction::Left => self.try_commit(current.shifted(0, -1)),
            GameAction::Right => self.try_commit(current.shifted(0, 1)),
            GameAction::Rotate => self.try_commit(current.rotated()),
            GameAction::Down => match self.try_commit(current.shifted(1, 0)) {
                ActionOutcome::Rejected => self.lock(current, out),
                moved => moved,
            },
            GameAction::Drop => self.drop_to_floor(current),
        };

        if !self.game_over {
            if let Some(shape) = self.current {
                paint_shape(&shape, shape.color, out);
            }
        }

        outcome
    }

    /// Lowest row the current shape can reach, if there is one
    pub fn landing_row(&self) -> Option<i8> {
        let current = self.current?;
        let mut probe = current;
        loop {
            let next = probe.shifted(1, 0);
            if self.board.conflict(&next) {
                return Some(probe.row);
            }
            probe = next;
        }
    }

    fn try_commit(&mut self, tentative: Shape) -> ActionOutcome {
        if self.board.conflict(&tentative) {
            return ActionOutcome::Rejected;
        }
        self.current = Some(tentative);
        ActionOutcome::Moved
    }

    fn drop_to_floor(&mut self, current: Shape) -> ActionOutcome {
        match self.landing_row() {
            Some(row) if row != current.row => {
                self.current = Some(Shape { row, ..current });
                ActionOutcome::Moved
            }
            _ => ActionOutcome::Rejected,
        }
    }

    /// Write the landed shape into the board, collapse rows, spawn the next shape
    fn lock<O: Renderer + ?Sized>(&mut self, landed: Shape, out: &mut O) -> ActionOutcome {
        paint_shape(&landed, landed.color, out);
        self.board.lock_shape(&landed);
        self.current = None;

        let cleared = self.board.collapse_full_rows(out);
        for _ in cleared.iter() {
            self.score.award_row(out);
        }
        self.rows_cleared = self.rows_cleared.wrapping_add(cleared.len() as u32);

        self.spawn_shape();
        self.score.award_landing(out);

        ActionOutcome::Locked {
            rows_cleared: cleared.len() as u8,
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_grid(&mut out.board);
        out.current = self.current.map(ShapeSnapshot::from);
        out.landing_row = self.landing_row();
        out.score = self.score.score();
        out.game_over = self.game_over;
        out.session_id = self.session_id;
        out.shapes_spawned = self.shapes_spawned;
        out.rows_cleared = self.rows_cleared;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameSession<SimpleRng> {
    fn default() -> Self {
        Self::with_seed(1)
    }
}

fn paint_shape<O: Renderer + ?Sized>(shape: &Shape, color: Color, out: &mut O) {
    for (row, col) in shape.cells() {
        if row >= 0 && col >= 0 && row < ROWS as i8 && col < COLS as i8 {
            out.paint_cell(row as u8, col as u8, color);
        }
    }
}
