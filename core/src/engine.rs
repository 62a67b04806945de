use alloc::collections::{BTreeSet, VecDeque};
use alloc::vec::Vec;
use core::num::Saturating;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Ready -> Playing (first reveal places the mines)
/// - Ready -> Lost (only without a safe start)
/// - Ready -> Won (a single reveal opens every safe cell)
/// - Playing -> Won
/// - Playing -> Lost
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    Ready,
    Playing,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::Ready
    }
}

/// Owns the board and accepts every state-changing request against it.
#[derive(Clone, Debug)]
pub struct CubeEngine {
    config: GameConfig,
    seed: u64,
    board: Board,
    revealed_count: Saturating<CellCount>,
    flagged_count: Saturating<CellCount>,
    state: GameState,
    triggered_mine: Option<CellId>,
    placement: Option<MinePlacement>,
    pending_rotation: Option<Slice>,
}

impl CubeEngine {
    /// Builds the surface for `config`; mines are placed on the first reveal.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        let config = config.validate()?;
        let board = Board::build(config.size)?;
        Ok(Self::with_board(config, seed, board, GameState::Ready))
    }

    /// Starts from a board whose mines are already laid out.
    pub fn from_board(board: Board) -> Self {
        let config = GameConfig::new_unchecked(board.size(), board.mine_count());
        Self::with_board(config, 0, board, GameState::Playing)
    }

    fn with_board(config: GameConfig, seed: u64, board: Board, state: GameState) -> Self {
        Self {
            config,
            seed,
            board,
            revealed_count: Saturating(0),
            flagged_count: Saturating(0),
            state,
            triggered_mine: None,
            placement: None,
            pending_rotation: None,
        }
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn is_animating(&self) -> bool {
        self.pending_rotation.is_some()
    }

    pub fn size(&self) -> Coord {
        self.board.size()
    }

    /// Mines on the board, or the configured count while they are still unplaced.
    pub fn total_mines(&self) -> CellCount {
        if self.state.is_ready() {
            self.config.mines
        } else {
            self.board.mine_count()
        }
    }

    pub fn mines_left(&self) -> isize {
        (self.total_mines() as isize) - (self.flagged_count.0 as isize)
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count.0
    }

    pub fn triggered_mine(&self) -> Option<CellId> {
        self.triggered_mine
    }

    /// Result of random mine placement, including any clamping of the requested count.
    pub fn placement(&self) -> Option<&MinePlacement> {
        self.placement.as_ref()
    }

    pub fn neighbors(&self, id: CellId) -> Result<Neighbors> {
        let id = self.board.validate_id(id)?;
        Ok(self.board.neighbors(id))
    }

    pub fn cell_view(&self, id: CellId) -> Result<CellView> {
        use CellView::*;

        let cell = self.board.cell(id)?;
        Ok(match (cell.is_revealed(), cell.is_flagged(), cell.is_mine()) {
            (true, _, true) if self.triggered_mine == Some(id) => Exploded,
            (true, _, true) => Mine,
            (true, _, false) => Revealed(cell.adjacent_mines()),
            (false, true, false) if self.state == GameState::Lost => WrongFlag,
            (false, true, _) => Flagged,
            (false, false, _) => Hidden,
        })
    }

    pub fn toggle_flag(&mut self, id: CellId) -> Result<FlagOutcome> {
        let id = self.check_move(id)?;
        let cell = &self.board[id];

        Ok(if cell.is_revealed() {
            FlagOutcome::NoChange
        } else if cell.is_flagged() {
            self.board.cell_mut(id).set_flagged(false);
            self.flagged_count -= 1;
            FlagOutcome::Unflagged
        } else {
            self.board.cell_mut(id).set_flagged(true);
            self.flagged_count += 1;
            FlagOutcome::Flagged
        })
    }

    pub fn reveal(&mut self, id: CellId) -> Result<RevealOutcome> {
        let id = self.check_move(id)?;
        let cell = &self.board[id];
        if cell.is_revealed() || cell.is_flagged() {
            return Ok(RevealOutcome::NoChange);
        }

        if self.state.is_ready() {
            self.place_mines(id);
        }
        Ok(self.reveal_single_cell(id))
    }

    /// Reveals every neighbor of a revealed number once enough of them are flagged.
    pub fn chord_reveal(&mut self, id: CellId) -> Result<RevealOutcome> {
        let id = self.check_move(id)?;
        let cell = &self.board[id];

        if !cell.is_revealed() || cell.is_mine() {
            return self.reveal(id);
        }
        if cell.adjacent_mines() != self.count_flagged_neighbors(id) {
            return Ok(RevealOutcome::NoChange);
        }

        Ok(self
            .board
            .neighbors(id)
            .into_iter()
            .map(|neighbor| self.reveal_single_cell(neighbor))
            .reduce(core::ops::BitOr::bitor)
            .unwrap_or(RevealOutcome::NoChange))
    }

    /// Enters the animating phase for `slice`.
    ///
    /// Reveals, flags and other rotations are rejected until [`CubeEngine::apply_rotation`].
    pub fn begin_rotation(&mut self, slice: Slice) -> Result<RotationHandle> {
        self.check_not_finished()?;
        self.check_not_animating()?;
        let slice = slice.validate(self.size())?;

        self.pending_rotation = Some(slice);
        log::trace!("Rotation of {:?} started", slice);
        Ok(RotationHandle {
            slice,
            cells: self.board.slice_cells(slice).collect(),
            duration_millis: self.config.rotation_millis,
        })
    }

    /// Completes the pending rotation and leaves the animating phase.
    pub fn apply_rotation(&mut self) -> Result<RotationOutcome> {
        let slice = self
            .pending_rotation
            .take()
            .ok_or(GameError::NoRotationPending)?;
        let moved = self.board.apply_rotation(slice)?;
        Ok(RotationOutcome { slice, moved })
    }

    /// Rotates `slice` in one step, for callers with no animation to play.
    pub fn rotate(&mut self, slice: Slice) -> Result<RotationOutcome> {
        self.begin_rotation(slice)?;
        self.apply_rotation()
    }

    pub fn rotate_random<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<RotationOutcome> {
        let slice = Slice::random(rng, self.size());
        self.rotate(slice)
    }

    fn place_mines(&mut self, start: CellId) {
        let placement = RandomMineGenerator::new(self.seed, start, self.config.start_cell)
            .generate(&self.board, self.config.mines);
        self.board.apply_mines(&placement);
        self.placement = Some(placement);
        self.state = GameState::Playing;
    }

    fn reveal_single_cell(&mut self, id: CellId) -> RevealOutcome {
        let cell = &self.board[id];
        if self.state.is_finished() || cell.is_revealed() || cell.is_flagged() {
            return RevealOutcome::NoChange;
        }

        if cell.is_mine() {
            self.board.cell_mut(id).set_revealed();
            self.triggered_mine = Some(id);
            self.end_game(false);
            return RevealOutcome::HitMine;
        }

        let mut visited = BTreeSet::from([id]);
        let mut to_visit = VecDeque::from([id]);
        while let Some(visit) = to_visit.pop_front() {
            self.board.cell_mut(visit).set_revealed();
            self.revealed_count += 1;

            if self.board[visit].adjacent_mines() != 0 {
                continue;
            }
            for neighbor in self.board.neighbors(visit) {
                let next = &self.board[neighbor];
                if next.is_revealed() || next.is_flagged() || next.is_mine() {
                    continue;
                }
                if visited.insert(neighbor) {
                    to_visit.push_back(neighbor);
                }
            }
        }

        if self.revealed_count.0 == self.board.safe_cell_count() {
            self.end_game(true);
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        }
    }

    fn end_game(&mut self, won: bool) {
        if self.state.is_finished() {
            return;
        }

        self.state = if won { GameState::Won } else { GameState::Lost };
        if won {
            self.triggered_mine = None;
        }

        let hidden_mines: Vec<CellId> = self
            .board
            .iter()
            .filter(|(_, cell)| cell.is_mine() && !cell.is_revealed() && !cell.is_flagged())
            .map(|(id, _)| id)
            .collect();
        for &id in &hidden_mines {
            self.board.cell_mut(id).set_revealed();
        }
        log::debug!(
            "Game ended ({:?}), {} unflagged mines shown",
            self.state,
            hidden_mines.len()
        );
    }

    fn count_flagged_neighbors(&self, id: CellId) -> u8 {
        // at most 8 neighbors
        self.board
            .neighbors(id)
            .iter()
            .filter(|&&neighbor| self.board[neighbor].is_flagged())
            .count() as u8
    }

    /// Common gate for reveal and flag requests.
    fn check_move(&self, id: CellId) -> Result<CellId> {
        self.check_not_finished()?;
        self.check_not_animating()?;
        self.board.validate_id(id)
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }

    fn check_not_animating(&self) -> Result<()> {
        if self.pending_rotation.is_some() {
            Err(GameError::RotationInProgress)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(size: Coord, mines: &[(Coord3, Direction)]) -> CubeEngine {
        CubeEngine::from_board(Board::from_mine_cells(size, mines).unwrap())
    }

    fn id(engine: &CubeEngine, coords: Coord3, normal: Direction) -> CellId {
        engine.board().cell_at(coords, normal).unwrap()
    }

    #[test]
    fn reveal_hits_mine_and_sets_triggered_cell() {
        let mut engine = engine(3, &[([1, 2, 1], Direction::PosY)]);
        let mine = id(&engine, [1, 2, 1], Direction::PosY);

        let outcome = engine.reveal(mine).unwrap();

        assert_eq!(outcome, RevealOutcome::HitMine);
        assert_eq!(engine.state(), GameState::Lost);
        assert_eq!(engine.triggered_mine(), Some(mine));
        assert_eq!(engine.cell_view(mine), Ok(CellView::Exploded));
    }

    #[test]
    fn flagged_cells_ignore_reveal_and_revealed_cells_ignore_flags() {
        let mut engine = engine(3, &[([1, 2, 1], Direction::PosY)]);
        let flagged = id(&engine, [0, 2, 0], Direction::PosY);
        let opened = id(&engine, [2, 2, 2], Direction::PosY);

        assert_eq!(engine.toggle_flag(flagged).unwrap(), FlagOutcome::Flagged);
        assert_eq!(engine.reveal(flagged).unwrap(), RevealOutcome::NoChange);
        assert_eq!(engine.reveal(opened).unwrap(), RevealOutcome::Revealed);
        assert_eq!(engine.toggle_flag(opened).unwrap(), FlagOutcome::NoChange);
        assert_eq!(engine.mines_left(), 0);
    }

    #[test]
    fn flag_delta_tracks_toggles() {
        let mut engine = engine(3, &[([1, 2, 1], Direction::PosY)]);
        let cell = id(&engine, [1, 0, 1], Direction::NegY);

        assert_eq!(engine.toggle_flag(cell).unwrap().delta(), 1);
        assert_eq!(engine.toggle_flag(cell).unwrap().delta(), -1);
        assert_eq!(engine.mines_left(), 1);
    }

    #[test]
    fn chord_reveal_uses_flagged_neighbors() {
        let mut engine = engine(3, &[([1, 2, 1], Direction::PosY)]);
        let corner = id(&engine, [0, 2, 0], Direction::PosY);
        let mine = id(&engine, [1, 2, 1], Direction::PosY);

        assert_eq!(engine.reveal(corner).unwrap(), RevealOutcome::Revealed);
        engine.toggle_flag(mine).unwrap();
        let outcome = engine.chord_reveal(corner).unwrap();

        assert_eq!(outcome, RevealOutcome::Won);
        assert_eq!(engine.cell_view(mine), Ok(CellView::Flagged));
    }

    #[test]
    fn moves_are_rejected_while_animating() {
        let mut engine = engine(3, &[([1, 2, 1], Direction::PosY)]);
        let cell = id(&engine, [1, 0, 1], Direction::NegY);

        let handle = engine
            .begin_rotation(Slice::new(Axis::X, 0, Turn::Clockwise))
            .unwrap();

        assert_eq!(handle.cells.len(), 21);
        assert_eq!(handle.duration_millis, DEFAULT_ROTATION_MILLIS);
        assert_eq!(engine.reveal(cell), Err(GameError::RotationInProgress));
        assert_eq!(engine.toggle_flag(cell), Err(GameError::RotationInProgress));
        assert_eq!(
            engine.begin_rotation(Slice::new(Axis::Y, 1, Turn::Clockwise)),
            Err(GameError::RotationInProgress)
        );

        assert_eq!(engine.apply_rotation().unwrap().moved, 21);
        assert!(!engine.is_animating());
        assert_eq!(engine.apply_rotation(), Err(GameError::NoRotationPending));
    }

    #[test]
    fn finished_games_reject_every_move() {
        let mut engine = engine(3, &[([1, 2, 1], Direction::PosY)]);
        let mine = id(&engine, [1, 2, 1], Direction::PosY);
        let other = id(&engine, [1, 0, 1], Direction::NegY);

        engine.reveal(mine).unwrap();

        assert_eq!(engine.reveal(other), Err(GameError::AlreadyEnded));
        assert_eq!(engine.toggle_flag(other), Err(GameError::AlreadyEnded));
        assert_eq!(
            engine.rotate(Slice::new(Axis::Z, 0, Turn::Clockwise)),
            Err(GameError::AlreadyEnded)
        );
    }

    #[test]
    fn loss_shows_unflagged_mines_and_wrong_flags() {
        let mines = &[([1, 2, 1], Direction::PosY), ([1, 0, 1], Direction::NegY)];
        let mut engine = engine(3, mines);
        let first = id(&engine, [1, 2, 1], Direction::PosY);
        let second = id(&engine, [1, 0, 1], Direction::NegY);
        let wrong = id(&engine, [2, 1, 1], Direction::PosX);

        engine.toggle_flag(wrong).unwrap();
        engine.reveal(first).unwrap();

        assert_eq!(engine.cell_view(second), Ok(CellView::Mine));
        assert_eq!(engine.cell_view(wrong), Ok(CellView::WrongFlag));
    }

    #[test]
    fn first_reveal_places_mines_away_from_the_click() {
        let config = GameConfig::new(4, 20).unwrap();
        let mut engine = CubeEngine::new(config, 3).unwrap();
        let start = id(&engine, [0, 1, 2], Direction::NegX);

        assert!(engine.state().is_ready());
        let outcome = engine.reveal(start).unwrap();

        assert_ne!(outcome, RevealOutcome::HitMine);
        assert_eq!(engine.board().mine_count(), 20);
        assert_eq!(engine.board()[start].adjacent_mines(), 0);
        assert!(engine.placement().is_some_and(|p| !p.is_clamped()));
    }
}
