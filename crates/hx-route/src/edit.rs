//! Route expansion and structural editing.
//!
//! # Contract
//!
//! Every operation here is **total**: out-of-range indices, wrong node kinds,
//! and degenerate coordinates are silent no-ops, never panics — the UI may
//! race a deletion against a drag that still holds a stale index.  Each
//! operation mutates the store exactly once (one `set`), and returns the
//! coordinates it introduced so the caller can make sure they are drawable
//! (`RenderAdapter::ensure_polys`) before they are addressed.
//!
//! # Segment arithmetic
//!
//! [`expand_coords`] is the single bridging primitive: the straight hex line
//! from `a` to `b` with `a` removed (so consecutive segments concatenate
//! without duplicating shared anchors).  Stripping its last element yields
//! the `Auto` run strictly between two anchors.

use hx_core::{Oddr, line_oddr};

use crate::node::RouteNode;
use crate::state::TravelState;
use crate::store::{TravelPatch, TravelStore};

// ── Expansion primitives ─────────────────────────────────────────────────────

/// The hex line from `a` to `b`, excluding `a`, including `b`.
///
/// Empty when `a == b`.
pub fn expand_coords(a: Oddr, b: Oddr) -> Vec<Oddr> {
    let mut line = line_oddr(a, b);
    if line.len() <= 1 {
        return Vec::new();
    }
    line.remove(0);
    line
}

/// Rebuild the entire route from the token position and an ordered anchor
/// list: `[autos(token→a₁), a₁, autos(a₁→a₂), a₂, …]`.
///
/// The canonical "recompute everything" path, used whenever the token itself
/// moves (which invalidates every segment prefix).
pub fn rebuild_from_anchors(token: Oddr, anchors: &[Oddr]) -> Vec<RouteNode> {
    let mut route = Vec::new();
    let mut prev = token;
    for &anchor in anchors {
        route.extend(auto_run(prev, anchor));
        route.push(RouteNode::user(anchor));
        prev = anchor;
    }
    route
}

/// The `Auto` nodes strictly between `a` and `b`.
fn auto_run(a: Oddr, b: Oddr) -> Vec<RouteNode> {
    let mut seg = expand_coords(a, b);
    seg.pop(); // drop the destination anchor itself
    seg.into_iter().map(RouteNode::auto).collect()
}

// ── Editing operations ───────────────────────────────────────────────────────

/// Append a new anchor at `coord`, bridging from the last anchor (or the
/// token when the route is empty).
///
/// Clicking the current endpoint is a no-op.  Returns the coords introduced.
pub fn handle_hex_click(store: &mut TravelStore, coord: Oddr) -> Vec<Oddr> {
    let s = store.get();
    let source = s.last_anchor().unwrap_or(s.token);
    if source == coord {
        return Vec::new();
    }

    let seg = expand_coords(source, coord);
    let mut route = s.route.clone();
    route.extend(auto_run(source, coord));
    route.push(RouteNode::user(coord));

    store.set(TravelPatch::new().route(route));
    seg
}

/// Move the currently selected node to `coord`, re-deriving only the two
/// adjacent segments and leaving every other anchor untouched.
///
/// The moved node becomes (or stays) a `User` anchor; the selection follows
/// it to its new index.  No selection, a stale index, or `coord` already
/// occupied by the node are all no-ops.
pub fn move_selected_to(store: &mut TravelStore, coord: Oddr) -> Vec<Oddr> {
    let s = store.get();
    let idx = match s.edit_idx {
        Some(i) if i < s.route.len() => i,
        _ => return Vec::new(),
    };
    if s.route[idx].coord == coord {
        return Vec::new();
    }

    let users = s.user_indices();
    let prev_user = users.iter().rev().copied().find(|&u| u < idx);
    let next_user = users.iter().copied().find(|&u| u > idx);

    let prev_anchor = prev_user.map_or(s.token, |u| s.route[u].coord);

    // head: everything up to and including the previous anchor.
    let mut route: Vec<RouteNode> = match prev_user {
        Some(u) => s.route[..=u].to_vec(),
        None => Vec::new(),
    };

    let mut introduced = vec![coord];

    // left bridge: prev anchor → moved node.
    introduced.extend(expand_coords(prev_anchor, coord));
    route.extend(auto_run(prev_anchor, coord));
    route.push(RouteNode::user(coord));

    // right bridge: moved node → next anchor, then the untouched tail.
    if let Some(u) = next_user {
        let next_anchor = s.route[u].coord;
        let right = auto_run(coord, next_anchor);
        introduced.extend(right.iter().map(|n| n.coord));
        route.extend(right);
        route.extend_from_slice(&s.route[u..]);
    }

    let new_idx = route
        .iter()
        .position(|n| n.is_user() && n.coord == coord);

    store.set(TravelPatch::new().route(route).edit_idx(new_idx));
    introduced
}

/// Delete the `User` anchor at `idx`, bridging the gap between its neighbor
/// anchors with a fresh `Auto` run.
///
/// With no following anchor the route simply truncates; deleting the only
/// anchor empties the route.  Non-`User` indices and out-of-range indices
/// are no-ops.  Clears the selection.
pub fn delete_user_at(store: &mut TravelStore, idx: usize) -> Vec<Oddr> {
    let s = store.get();
    if idx >= s.route.len() || !s.route[idx].is_user() {
        return Vec::new();
    }

    let users = s.user_indices();
    let pos = match users.iter().position(|&u| u == idx) {
        Some(p) => p,
        None => return Vec::new(),
    };
    let prev_user = if pos > 0 { Some(users[pos - 1]) } else { None };
    let next_user = users.get(pos + 1).copied();

    let prev_anchor = prev_user.map_or(s.token, |u| s.route[u].coord);

    let mut route: Vec<RouteNode> = match prev_user {
        Some(u) => s.route[..=u].to_vec(),
        None => Vec::new(),
    };

    let mut introduced = Vec::new();
    if let Some(u) = next_user {
        let next_anchor = s.route[u].coord;
        introduced = expand_coords(prev_anchor, next_anchor);
        route.extend(auto_run(prev_anchor, next_anchor));
        route.extend_from_slice(&s.route[u..]); // next anchor survives in the tail
    }

    store.set(TravelPatch::new().route(route).edit_idx(None));
    introduced
}

/// Move the token to `coord` and rebuild the whole route from the surviving
/// anchors (every segment's start point conceptually changed).
///
/// A surviving selected node keeps its selection at its new index.
/// Returns the token coord plus every route coord, all of which need polys.
pub fn move_token_to(store: &mut TravelStore, coord: Oddr) -> Vec<Oddr> {
    let s = store.get();
    let anchors: Vec<Oddr> = s.route.iter().filter(|n| n.is_user()).map(|n| n.coord).collect();
    let route = rebuild_from_anchors(coord, &anchors);

    let edit_idx = s.edit_idx.and_then(|i| {
        let prev_node = *s.route.get(i)?;
        route
            .iter()
            .position(|n| n.kind == prev_node.kind && n.coord == prev_node.coord)
    });

    let mut introduced = vec![coord];
    introduced.extend(route.iter().map(|n| n.coord));

    store.set(
        TravelPatch::new()
            .token(coord)
            .route(route)
            .edit_idx(edit_idx),
    );
    introduced
}

/// Select the route node at `idx` for editing (or clear the selection).
///
/// Indices are clamped into the current route; selecting on an empty route
/// clears instead.
pub fn select_dot(store: &mut TravelStore, idx: Option<usize>) {
    let len = store.get().route.len();
    let safe = match (idx, len) {
        (None, _) | (_, 0) => None,
        (Some(i), _) => Some(i.min(len - 1)),
    };
    store.set(TravelPatch::new().edit_idx(safe));
}

/// Set the travel speed (tiles of distance per hour); sanitized to `> 0`.
pub fn set_token_speed(store: &mut TravelStore, v: f64) {
    store.set(TravelPatch::new().token_speed(TravelState::clamp_speed(v)));
}

/// Set the playback tempo; clamped to `[0.1, 10]`.
pub fn set_tempo(store: &mut TravelStore, v: f64) {
    store.set(TravelPatch::new().tempo(TravelState::clamp_tempo(v)));
}
