//! Scenery (trees, buildings): inert, always alive.

use skirmish_core::enums::Liveness;
use skirmish_core::Uid;

use crate::context::SimContext;

pub fn update(ctx: &mut SimContext, uid: Uid, _dt: f32) -> Liveness {
    while ctx.messenger.fetch(uid).is_some() {}
    Liveness::Alive
}
