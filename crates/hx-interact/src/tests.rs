//! Unit tests for hit-testing and the drag state machine.

use hx_core::Oddr;

use crate::drag::DragController;
use crate::hit::{GridIndex, HitTester};
use crate::pointer::{DragCommand, DragTarget, ScreenPoint};

/// A 5×5 drawn grid with 30px hexes, origin at (100, 100).
fn index() -> GridIndex {
    let mut idx = GridIndex::new(30.0, ScreenPoint::new(100.0, 100.0));
    for r in 0..5 {
        for c in 0..5 {
            idx.insert(Oddr::new(r, c));
        }
    }
    idx
}

#[cfg(test)]
mod hit {
    use super::*;

    #[test]
    fn center_resolves_to_its_tile() {
        let idx = index();
        for coord in [Oddr::new(0, 0), Oddr::new(3, 2), Oddr::new(4, 4)] {
            assert_eq!(idx.coord_at(idx.center_of(coord)), Some(coord));
        }
    }

    #[test]
    fn undrawn_tiles_miss() {
        let idx = index();
        // (7,7) is a perfectly valid coordinate but has no polygon.
        let p = idx.center_of(Oddr::new(7, 7));
        assert_eq!(idx.coord_at(p), None);
    }

    #[test]
    fn removal_makes_a_tile_miss() {
        let mut idx = index();
        let p = idx.center_of(Oddr::new(2, 2));
        assert_eq!(idx.coord_at(p), Some(Oddr::new(2, 2)));
        idx.remove(Oddr::new(2, 2));
        assert_eq!(idx.coord_at(p), None);
    }

    #[test]
    fn near_center_still_resolves() {
        let idx = index();
        let mut p = idx.center_of(Oddr::new(1, 3));
        p.x += 9.0;
        p.y -= 9.0;
        assert_eq!(idx.coord_at(p), Some(Oddr::new(1, 3)));
    }
}

#[cfg(test)]
mod drag {
    use super::*;

    #[test]
    fn dot_press_selects() {
        let idx = index();
        let mut drag = DragController::new();
        let cmd = drag.begin(DragTarget::Dot(2), idx.center_of(Oddr::new(0, 2)), &idx);
        assert_eq!(cmd, Some(DragCommand::SelectDot(2)));
        assert!(drag.dragging());
    }

    #[test]
    fn token_press_selects_nothing() {
        let idx = index();
        let mut drag = DragController::new();
        assert_eq!(
            drag.begin(DragTarget::Token, idx.center_of(Oddr::new(0, 0)), &idx),
            None
        );
    }

    #[test]
    fn drag_dot_commits_move_selected_once() {
        let idx = index();
        let mut drag = DragController::new();
        drag.begin(DragTarget::Dot(1), idx.center_of(Oddr::new(0, 1)), &idx);

        // Moving within the starting hex produces no ghost updates.
        let mut inside = idx.center_of(Oddr::new(0, 1));
        inside.x += 3.0;
        assert_eq!(drag.update(inside, &idx), None);

        // Crossing into a new hex repositions the ghost exactly once per tile.
        let target = idx.center_of(Oddr::new(2, 3));
        assert_eq!(drag.update(target, &idx), Some(Oddr::new(2, 3)));
        assert_eq!(drag.update(target, &idx), None);

        assert_eq!(
            drag.finish(target, &idx),
            Some(DragCommand::MoveSelected(Oddr::new(2, 3)))
        );
        assert!(!drag.dragging());
        // The drag's synthetic click is suppressed, exactly once.
        assert!(drag.consume_click_suppression());
        assert!(!drag.consume_click_suppression());
    }

    #[test]
    fn drag_token_commits_move_token() {
        let idx = index();
        let mut drag = DragController::new();
        drag.begin(DragTarget::Token, idx.center_of(Oddr::new(0, 0)), &idx);
        let dest = idx.center_of(Oddr::new(1, 1));
        drag.update(dest, &idx);
        assert_eq!(drag.finish(dest, &idx), Some(DragCommand::MoveToken(Oddr::new(1, 1))));
    }

    #[test]
    fn release_on_origin_commits_nothing() {
        let idx = index();
        let mut drag = DragController::new();
        let home = idx.center_of(Oddr::new(2, 2));
        drag.begin(DragTarget::Dot(0), home, &idx);
        drag.update(idx.center_of(Oddr::new(2, 3)), &idx);
        drag.update(home, &idx); // wandered, then came back

        assert_eq!(drag.finish(home, &idx), None);
        // It still moved through another tile, so the click is suppressed.
        assert!(drag.consume_click_suppression());
    }

    #[test]
    fn plain_click_is_not_suppressed() {
        let idx = index();
        let mut drag = DragController::new();
        let home = idx.center_of(Oddr::new(1, 1));
        drag.begin(DragTarget::Dot(0), home, &idx);
        assert_eq!(drag.finish(home, &idx), None);
        assert!(!drag.consume_click_suppression());
    }

    #[test]
    fn release_off_grid_falls_back_to_last_tile() {
        let idx = index();
        let mut drag = DragController::new();
        drag.begin(DragTarget::Token, idx.center_of(Oddr::new(0, 0)), &idx);
        drag.update(idx.center_of(Oddr::new(0, 4)), &idx);
        // Pointer released far outside the drawn grid.
        let off = ScreenPoint::new(-500.0, -500.0);
        assert_eq!(drag.finish(off, &idx), Some(DragCommand::MoveToken(Oddr::new(0, 4))));
    }

    #[test]
    fn cancel_discards_but_still_suppresses_after_motion() {
        let idx = index();
        let mut drag = DragController::new();
        drag.begin(DragTarget::Dot(3), idx.center_of(Oddr::new(3, 3)), &idx);
        drag.update(idx.center_of(Oddr::new(3, 4)), &idx);
        drag.cancel();
        assert!(!drag.dragging());
        assert!(drag.consume_click_suppression());
    }

    #[test]
    fn update_without_active_drag_is_noop() {
        let idx = index();
        let mut drag = DragController::new();
        assert_eq!(drag.update(idx.center_of(Oddr::new(0, 0)), &idx), None);
        assert_eq!(drag.finish(idx.center_of(Oddr::new(0, 0)), &idx), None);
    }
}
